//! Core forest growth model.
//!
//! Main components:
//! - [`environment`] - the five ambient readings of a growth period.
//! - [`strategy`] - pure scoring rules turning readings into height gain.
//! - [`species`] - species profiles and the reference catalog.
//! - [`tree`] - a single tree with its height history.
//! - [`forest`] - the ordered set of trees and the per-period driver.
//! - [`config`] - TOML startup configuration.
//! - [`error`] - error type shared by the crate.
//! - [`types`] - shared type aliases and IDs.

pub mod config;
pub mod environment;
pub mod error;
pub mod forest;
pub mod species;
pub mod strategy;
pub mod tree;
pub mod types;

pub use config::SimConfig;
pub use environment::{Environment, EnvironmentBounds};
pub use error::{GrowthError, Result};
pub use forest::{Forest, GrowthRecord, PeriodReport};
pub use species::SpeciesProfile;
pub use strategy::GrowthStrategy;
pub use tree::Tree;
