//! Growth strategies: pure scoring rules from environment to height gain.
//!
//! Every variant except [`GrowthStrategy::Default`] scores a single reading
//! by its deviation from the species optimum:
//!
//! ```text
//! growth = max(0, 1 - |actual - optimal| / scale) * base_growth_rate
//! ```
//!
//! so the contribution is `base_growth_rate` at the optimum, falls off
//! linearly, and is exactly `0` once the deviation reaches `scale`.

use crate::{environment::Environment, species::SpeciesProfile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deviation at which the temperature contribution reaches zero, in °C.
pub const TEMPERATURE_SCALE: f64 = 50.0;
/// Deviation at which the humidity contribution reaches zero, in %.
pub const HUMIDITY_SCALE: f64 = 100.0;
/// Deviation at which the light contribution reaches zero, in lux.
pub const LIGHT_SCALE: f64 = 1000.0;
/// Deviation at which the soil contribution reaches zero, in index points.
pub const SOIL_QUALITY_SCALE: f64 = 100.0;
/// Deviation at which the precipitation contribution reaches zero, in mm.
pub const PRECIPITATION_SCALE: f64 = 200.0;

/// Divisor of the summed raw readings in [`GrowthStrategy::Default`].
pub const DEFAULT_DIVISOR: f64 = 50.0;

/// A scoring rule applied to one tree per growth period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStrategy {
    /// Sum of all five raw readings divided by [`DEFAULT_DIVISOR`].
    ///
    /// Ignores the profile and is not clamped: a cold enough environment
    /// yields negative growth, and out-of-range readings yield arbitrarily
    /// large growth. No reference species uses it.
    Default,
    Temperature,
    Humidity,
    Light,
    SoilQuality,
    Precipitation,
}

impl GrowthStrategy {
    /// Scores one period of growth.
    ///
    /// ### Parameters
    /// - `env` - Snapshot of the period's readings.
    /// - `profile` - Species whose optimum and base rate are applied.
    ///
    /// ### Returns
    /// The height increment in meters contributed by this strategy.
    pub fn score(self, env: &Environment, profile: &SpeciesProfile) -> f64 {
        let (actual, optimal, scale) = match self {
            GrowthStrategy::Default => return env.sum() / DEFAULT_DIVISOR,
            GrowthStrategy::Temperature => (
                env.temperature,
                profile.optimal_temperature,
                TEMPERATURE_SCALE,
            ),
            GrowthStrategy::Humidity => {
                (env.humidity, profile.optimal_humidity, HUMIDITY_SCALE)
            }
            GrowthStrategy::Light => (env.light, profile.optimal_light, LIGHT_SCALE),
            GrowthStrategy::SoilQuality => (
                env.soil_quality,
                profile.optimal_soil_quality,
                SOIL_QUALITY_SCALE,
            ),
            GrowthStrategy::Precipitation => (
                env.precipitation,
                profile.optimal_precipitation,
                PRECIPITATION_SCALE,
            ),
        };
        deviation_score(actual, optimal, scale, profile.base_growth_rate)
    }
}

impl fmt::Display for GrowthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GrowthStrategy::Default => "default",
            GrowthStrategy::Temperature => "temperature",
            GrowthStrategy::Humidity => "humidity",
            GrowthStrategy::Light => "light",
            GrowthStrategy::SoilQuality => "soil quality",
            GrowthStrategy::Precipitation => "precipitation",
        };
        f.write_str(name)
    }
}

#[inline]
fn deviation_score(actual: f64, optimal: f64, scale: f64, rate: f64) -> f64 {
    let deviation = (actual - optimal).abs();
    (1.0 - deviation / scale).max(0.0) * rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species;
    use approx::assert_relative_eq;

    const DEVIATION_STRATEGIES: [GrowthStrategy; 5] = [
        GrowthStrategy::Temperature,
        GrowthStrategy::Humidity,
        GrowthStrategy::Light,
        GrowthStrategy::SoilQuality,
        GrowthStrategy::Precipitation,
    ];

    /// Environment sitting exactly on every optimum of `profile`.
    fn optimum_of(profile: &SpeciesProfile) -> Environment {
        Environment {
            temperature: profile.optimal_temperature,
            humidity: profile.optimal_humidity,
            light: profile.optimal_light,
            soil_quality: profile.optimal_soil_quality,
            precipitation: profile.optimal_precipitation,
        }
    }

    /// Environment shifted away from every optimum of `profile` by `offset`
    /// times the matching strategy scale.
    fn shifted(profile: &SpeciesProfile, offset: f64) -> Environment {
        Environment {
            temperature: profile.optimal_temperature + offset * TEMPERATURE_SCALE,
            humidity: profile.optimal_humidity - offset * HUMIDITY_SCALE,
            light: profile.optimal_light + offset * LIGHT_SCALE,
            soil_quality: profile.optimal_soil_quality - offset * SOIL_QUALITY_SCALE,
            precipitation: profile.optimal_precipitation + offset * PRECIPITATION_SCALE,
        }
    }

    #[test]
    fn deviation_strategies_give_base_rate_at_optimum() {
        for profile in species::reference_catalog() {
            let env = optimum_of(&profile);
            for s in DEVIATION_STRATEGIES {
                assert_eq!(s.score(&env, &profile), profile.base_growth_rate, "{s}");
            }
        }
    }

    #[test]
    fn deviation_strategies_hit_exact_zero_at_scale() {
        let oak = species::oak();
        for offset in [1.0, 1.5, 10.0] {
            let env = shifted(&oak, offset);
            for s in DEVIATION_STRATEGIES {
                assert_eq!(s.score(&env, &oak), 0.0, "{s} at offset {offset}");
            }
        }
    }

    #[test]
    fn deviation_strategies_fall_off_linearly() {
        let pine = species::pine();
        let env = shifted(&pine, 0.25);
        for s in DEVIATION_STRATEGIES {
            assert_relative_eq!(s.score(&env, &pine), 0.75, epsilon = 1e-12);
        }
    }

    #[test]
    fn deviation_strategies_never_negative() {
        let cherry = species::cherry();
        for offset in [-3.0, -1.0, -0.5, 0.0, 0.5, 0.99, 2.0] {
            let env = shifted(&cherry, offset);
            for s in DEVIATION_STRATEGIES {
                assert!(s.score(&env, &cherry) >= 0.0);
            }
        }
    }

    #[test]
    fn pine_light_and_soil_in_the_dark() {
        let pine = species::pine();
        let env = Environment {
            light: 0.0,
            soil_quality: 0.0,
            ..Environment::default()
        };
        assert_relative_eq!(GrowthStrategy::Light.score(&env, &pine), 0.1, epsilon = 1e-12);
        assert_relative_eq!(
            GrowthStrategy::SoilQuality.score(&env, &pine),
            0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn default_strategy_averages_raw_readings() {
        let oak = species::oak();
        let env = Environment::default();
        assert_eq!(GrowthStrategy::Default.score(&env, &oak), 1020.0 / 50.0);
    }

    #[test]
    fn default_strategy_ignores_profile() {
        let env = Environment::default();
        let scores: Vec<f64> = species::reference_catalog()
            .iter()
            .map(|p| GrowthStrategy::Default.score(&env, p))
            .collect();
        assert!(scores.iter().all(|&s| s == scores[0]));
    }

    #[test]
    fn default_strategy_is_not_floored() {
        let oak = species::oak();
        let env = Environment {
            temperature: -10.0,
            humidity: 0.0,
            light: 0.0,
            soil_quality: 0.0,
            precipitation: 0.0,
        };
        assert_eq!(GrowthStrategy::Default.score(&env, &oak), -0.2);
    }
}
