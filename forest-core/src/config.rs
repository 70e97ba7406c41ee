use crate::{
    environment::Environment,
    error::{GrowthError, Result},
    forest::Forest,
    species::{self, SpeciesProfile},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};
use tracing::info;

/// Startup configuration: initial readings and the species catalog.
///
/// ```toml
/// [environment]
/// temperature = 20.0
/// humidity = 50.0
/// light = 800.0
/// soil_quality = 50.0
/// precipitation = 100.0
///
/// [[species]]
/// name = "Oak"
/// optimal_temperature = 20.0
/// # ...
/// strategies = ["temperature", "precipitation"]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub environment: Environment,
    pub species: Vec<SpeciesProfile>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            species: species::reference_catalog(),
        }
    }
}

impl SimConfig {
    /// Parses and validates a TOML document.
    ///
    /// A missing `[environment]` table falls back to the default readings,
    /// but a table that is present must name all five readings.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let cfg: SimConfig = toml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads and validates the configuration at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            species = cfg.species.len(),
            "species catalog loaded"
        );
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GrowthError::Config(e.to_string()))
    }

    /// Checks the initial environment, every profile, and that species
    /// names are unique and non-empty as a set.
    pub fn validate(&self) -> Result<()> {
        self.environment.validate()?;
        if self.species.is_empty() {
            return Err(GrowthError::Config("species catalog is empty".into()));
        }
        let mut seen = HashSet::with_capacity(self.species.len());
        for p in &self.species {
            p.validate()?;
            if !seen.insert(p.name.as_str()) {
                return Err(GrowthError::Config(format!(
                    "duplicate species name: {}",
                    p.name
                )));
            }
        }
        Ok(())
    }

    /// Plants a forest with one tree per configured species.
    pub fn build_forest(&self) -> Result<Forest> {
        Forest::new(self.species.iter().cloned())
    }
}
