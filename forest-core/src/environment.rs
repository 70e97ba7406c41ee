//! Ambient readings applied uniformly to every tree in a growth period.

use crate::error::{GrowthError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The five ambient readings of one growth period.
///
/// The value is `Copy` and is passed by value into every scoring call, so a
/// period always sees one consistent snapshot even if the caller keeps
/// editing its own copy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Illuminance in lux.
    pub light: f64,
    /// Soil quality index, 0-100.
    pub soil_quality: f64,
    /// Precipitation in mm.
    pub precipitation: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            temperature: 20.0,
            humidity: 50.0,
            light: 800.0,
            soil_quality: 50.0,
            precipitation: 100.0,
        }
    }
}

/// Inclusive `(min, max)` range for each reading, as exposed by the
/// control panel sliders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentBounds {
    pub temperature: (f64, f64),
    pub humidity: (f64, f64),
    pub light: (f64, f64),
    pub soil_quality: (f64, f64),
    pub precipitation: (f64, f64),
}

impl EnvironmentBounds {
    pub const SLIDERS: Self = Self {
        temperature: (-10.0, 40.0),
        humidity: (0.0, 100.0),
        light: (0.0, 2000.0),
        soil_quality: (0.0, 100.0),
        precipitation: (0.0, 300.0),
    };
}

impl Default for EnvironmentBounds {
    fn default() -> Self {
        Self::SLIDERS
    }
}

impl Environment {
    /// Returns the readings paired with their field names, in declaration
    /// order.
    pub fn readings(&self) -> [(&'static str, f64); 5] {
        [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("light", self.light),
            ("soil_quality", self.soil_quality),
            ("precipitation", self.precipitation),
        ]
    }

    /// Sum of the five raw readings.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.temperature + self.humidity + self.light + self.soil_quality + self.precipitation
    }

    /// Checks that every reading is a finite number.
    ///
    /// Ranges are not enforced here; out-of-slider values are legal input
    /// for the model. Only NaN and infinities are rejected, since they would
    /// poison the height history of every tree.
    ///
    /// ### Returns
    /// - `Ok(())` if all readings are finite.
    /// - `Err(GrowthError::InvalidEnvironment)` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        match self.readings().into_iter().find(|(_, v)| !v.is_finite()) {
            Some((field, value)) => Err(GrowthError::InvalidEnvironment { field, value }),
            None => Ok(()),
        }
    }

    /// Returns a copy with every reading clamped into `bounds`.
    pub fn clamped(&self, bounds: &EnvironmentBounds) -> Self {
        let clamp = |v: f64, (lo, hi): (f64, f64)| v.clamp(lo, hi);
        Self {
            temperature: clamp(self.temperature, bounds.temperature),
            humidity: clamp(self.humidity, bounds.humidity),
            light: clamp(self.light, bounds.light),
            soil_quality: clamp(self.soil_quality, bounds.soil_quality),
            precipitation: clamp(self.precipitation, bounds.precipitation),
        }
    }

    /// Samples every reading uniformly inside its range in `bounds`.
    pub fn random_within(bounds: &EnvironmentBounds, rng: &mut impl Rng) -> Self {
        let mut sample = |(lo, hi): (f64, f64)| rng.random_range(lo..=hi);
        Self {
            temperature: sample(bounds.temperature),
            humidity: sample(bounds.humidity),
            light: sample(bounds.light),
            soil_quality: sample(bounds.soil_quality),
            precipitation: sample(bounds.precipitation),
        }
    }
}
