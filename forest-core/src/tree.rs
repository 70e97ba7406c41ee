use crate::{
    environment::Environment,
    error::{GrowthError, Result},
    species::SpeciesProfile,
    types::Period,
};
use std::sync::Arc;
use tracing::debug;

/// One tree of a single species and its height over time.
///
/// `history[p]` is the height after period `p`; `history[0]` is always
/// `0.0`, so `history.len() == periods_elapsed() + 1`.
#[derive(Debug, Clone)]
pub struct Tree {
    profile: Arc<SpeciesProfile>,
    height: f64,
    history: Vec<f64>,
}

impl Tree {
    pub fn new(profile: impl Into<Arc<SpeciesProfile>>) -> Self {
        Self {
            profile: profile.into(),
            height: 0.0,
            history: vec![0.0],
        }
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn profile(&self) -> &SpeciesProfile {
        &self.profile
    }

    /// Current height in meters.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn periods_elapsed(&self) -> Period {
        self.history.len() - 1
    }

    /// Sum of every strategy's contribution for `env`, without growing.
    pub fn growth_for(&self, env: &Environment) -> f64 {
        self.profile
            .strategies
            .iter()
            .map(|s| s.score(env, &self.profile))
            .sum()
    }

    /// Growth for `env` checked against overflow, without growing.
    ///
    /// ### Returns
    /// - `Ok(delta)` if both the delta and the resulting height are finite.
    /// - `Err(GrowthError::NonFiniteGrowth)` otherwise. Only an unclamped
    ///   strategy fed extreme readings can get here.
    pub fn checked_growth(&self, env: &Environment) -> Result<f64> {
        let delta = self.growth_for(env);
        let height = self.height + delta;
        if delta.is_finite() && height.is_finite() {
            Ok(delta)
        } else {
            Err(GrowthError::NonFiniteGrowth {
                species: self.profile.name.clone(),
                delta,
                height,
            })
        }
    }

    /// Grows the tree by one period.
    ///
    /// ### Parameters
    /// - `env` - Snapshot of the period's readings.
    ///
    /// ### Returns
    /// - `Ok(delta)` with the height gained this period.
    /// - `Err` if `env` has a non-finite reading or the growth would not be
    ///   finite; the tree is unchanged.
    pub fn advance(&mut self, env: Environment) -> Result<f64> {
        env.validate()?;
        let delta = self.checked_growth(&env)?;
        self.grow_by(delta);
        Ok(delta)
    }

    /// Appends one period of already checked growth.
    pub(crate) fn grow_by(&mut self, delta: f64) {
        self.height += delta;
        self.history.push(self.height);
        debug!(
            species = %self.profile.name,
            period = self.periods_elapsed(),
            delta,
            height = self.height,
            "tree advanced"
        );
    }

    /// Restores height `0` and history `[0]`.
    pub fn reset(&mut self) {
        self.height = 0.0;
        self.history.clear();
        self.history.push(0.0);
    }
}
