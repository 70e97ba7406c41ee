//! Species profiles and the reference catalog.
//!
//! A species is data, not a type: one [`SpeciesProfile`] per species holds
//! its optimum readings, its base growth rate and the strategies that
//! score it.

use crate::{
    error::{GrowthError, Result},
    strategy::GrowthStrategy,
};
use serde::{Deserialize, Serialize};

/// Optimum readings, growth rate and strategy assignment of one species.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    pub name: String,
    pub optimal_temperature: f64,
    pub optimal_humidity: f64,
    pub optimal_light: f64,
    pub optimal_soil_quality: f64,
    pub optimal_precipitation: f64,
    /// Multiplier applied to every deviation-based contribution.
    pub base_growth_rate: f64,
    /// Applied in order; contributions are summed.
    pub strategies: Vec<GrowthStrategy>,
    /// One-line description shown next to the species. Display only.
    #[serde(default)]
    pub characteristics: String,
}

impl SpeciesProfile {
    /// Checks that the profile can grow a tree.
    ///
    /// Requires a non-empty name, finite optima, a finite
    /// `base_growth_rate > 0` and at least one strategy.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GrowthError::invalid_profile("<unnamed>", "name is empty"));
        }
        let optima = [
            ("optimal_temperature", self.optimal_temperature),
            ("optimal_humidity", self.optimal_humidity),
            ("optimal_light", self.optimal_light),
            ("optimal_soil_quality", self.optimal_soil_quality),
            ("optimal_precipitation", self.optimal_precipitation),
        ];
        if let Some((field, _)) = optima.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GrowthError::invalid_profile(
                &self.name,
                format!("{field} is not finite"),
            ));
        }
        if !(self.base_growth_rate.is_finite() && self.base_growth_rate > 0.0) {
            return Err(GrowthError::invalid_profile(
                &self.name,
                format!("base_growth_rate must be > 0, got {}", self.base_growth_rate),
            ));
        }
        if self.strategies.is_empty() {
            return Err(GrowthError::invalid_profile(&self.name, "no growth strategies"));
        }
        Ok(())
    }
}

fn profile(
    name: &str,
    strategies: [GrowthStrategy; 2],
    optima: [f64; 5],
    base_growth_rate: f64,
    characteristics: &str,
) -> SpeciesProfile {
    let [temperature, humidity, light, soil_quality, precipitation] = optima;
    SpeciesProfile {
        name: name.to_owned(),
        optimal_temperature: temperature,
        optimal_humidity: humidity,
        optimal_light: light,
        optimal_soil_quality: soil_quality,
        optimal_precipitation: precipitation,
        base_growth_rate,
        strategies: strategies.to_vec(),
        characteristics: characteristics.to_owned(),
    }
}

pub fn oak() -> SpeciesProfile {
    profile(
        "Oak",
        [GrowthStrategy::Temperature, GrowthStrategy::Precipitation],
        [20.0, 50.0, 700.0, 60.0, 100.0],
        0.8,
        "Oak - a sturdy tree with slow growth.",
    )
}

pub fn pine() -> SpeciesProfile {
    profile(
        "Pine",
        [GrowthStrategy::Light, GrowthStrategy::SoilQuality],
        [15.0, 40.0, 900.0, 50.0, 80.0],
        1.0,
        "Pine - a fast-growing tree that prefers sunny places.",
    )
}

pub fn birch() -> SpeciesProfile {
    profile(
        "Birch",
        [GrowthStrategy::Humidity, GrowthStrategy::SoilQuality],
        [18.0, 60.0, 800.0, 55.0, 90.0],
        0.9,
        "Birch - a tree that grows well in humid conditions.",
    )
}

pub fn maple() -> SpeciesProfile {
    profile(
        "Maple",
        [GrowthStrategy::Temperature, GrowthStrategy::Humidity],
        [16.0, 55.0, 850.0, 65.0, 110.0],
        0.85,
        "Maple - a handsome tree with bright foliage, prefers a temperate climate.",
    )
}

pub fn cherry() -> SpeciesProfile {
    profile(
        "Cherry",
        [GrowthStrategy::Temperature, GrowthStrategy::Light],
        [17.0, 50.0, 850.0, 60.0, 95.0],
        0.95,
        "Cherry - a fruit tree that needs good light and a temperate climate.",
    )
}

/// The five reference species in forest order: Oak, Pine, Birch, Maple,
/// Cherry.
pub fn reference_catalog() -> Vec<SpeciesProfile> {
    vec![oak(), pine(), birch(), maple(), cherry()]
}
