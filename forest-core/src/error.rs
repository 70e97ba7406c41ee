//! Error types for the growth model.
//!
//! The arithmetic of the model is total, so every error here is caller
//! misuse: a malformed environment, an inconsistent species profile, or a
//! configuration document that does not describe a complete simulation.

use thiserror::Error;

/// Main error type for forest-core operations.
#[derive(Error, Debug)]
pub enum GrowthError {
    /// An environment reading is NaN or infinite.
    #[error("invalid environment: {field} = {value}")]
    InvalidEnvironment { field: &'static str, value: f64 },

    /// Finite readings would push a tree's growth or height to NaN or
    /// infinity.
    #[error("non-finite growth for {species}: delta = {delta}, height = {height}")]
    NonFiniteGrowth {
        species: String,
        delta: f64,
        height: f64,
    },

    /// No tree with the requested species name exists in the forest.
    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    /// A species profile cannot be used to grow a tree.
    #[error("invalid profile for {species}: {reason}")]
    InvalidProfile { species: String, reason: String },

    /// Configuration document could not be parsed or is incomplete.
    #[error("config error: {0}")]
    Config(String),

    /// File system errors while reading a configuration.
    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for forest-core operations.
pub type Result<T> = std::result::Result<T, GrowthError>;

impl GrowthError {
    #[must_use]
    pub fn invalid_profile<S: Into<String>, R: Into<String>>(species: S, reason: R) -> Self {
        Self::InvalidProfile {
            species: species.into(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for GrowthError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
