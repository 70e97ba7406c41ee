//! The simulation driver: a fixed, ordered set of trees advanced together.
//!
//! A presentation layer talks to the core only through [`Forest`]:
//! 1. [`Forest::advance_all`] - grow every tree by one period using the
//!    same [`Environment`] snapshot and get back a [`PeriodReport`].
//! 2. [`Forest::reset_all`] - return every tree and the period counter to
//!    the initial state.
//! 3. [`Forest::trees`] / [`Forest::history_of`] - read heights and
//!    histories for display.

use crate::{
    environment::Environment,
    error::{GrowthError, Result},
    species::{self, SpeciesProfile},
    tree::Tree,
    types::{Period, TreeId},
};
use std::fmt;
use tracing::{info, warn};

/// Growth of one tree in one period.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthRecord {
    pub tree: TreeId,
    pub species: String,
    /// Height gained this period, in meters.
    pub delta: f64,
    /// Height after this period, in meters.
    pub height: f64,
}

impl fmt::Display for GrowthRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} grew by {:.2} m. Current height: {:.2} m.",
            self.species, self.delta, self.height
        )
    }
}

/// Per-period report, one record per tree in forest order.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodReport {
    /// Period that just completed (the first advance is period `1`).
    pub period: Period,
    pub environment: Environment,
    pub records: Vec<GrowthRecord>,
}

impl PeriodReport {
    pub fn total_growth(&self) -> f64 {
        self.records.iter().map(|r| r.delta).sum()
    }
}

impl fmt::Display for PeriodReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.records {
            writeln!(f, "{r}")?;
        }
        Ok(())
    }
}

/// Ordered collection of trees with fixed membership.
#[derive(Debug, Clone)]
pub struct Forest {
    trees: Vec<Tree>,
    period: Period,
}

impl Forest {
    /// Plants one tree per profile, in the given order.
    ///
    /// ### Returns
    /// - `Ok(forest)` if every profile validates and names are unique.
    /// - `Err(GrowthError::InvalidProfile)` for the first profile that
    ///   does not validate or repeats an earlier name.
    pub fn new(profiles: impl IntoIterator<Item = SpeciesProfile>) -> Result<Self> {
        let mut trees: Vec<Tree> = Vec::new();
        for p in profiles {
            p.validate()?;
            if trees.iter().any(|t| t.name() == p.name) {
                return Err(GrowthError::invalid_profile(
                    &p.name,
                    "duplicate species name",
                ));
            }
            trees.push(Tree::new(p));
        }
        info!(trees = trees.len(), "forest planted");
        Ok(Self { trees, period: 0 })
    }

    /// The five reference species: Oak, Pine, Birch, Maple, Cherry.
    pub fn reference() -> Self {
        Self {
            trees: species::reference_catalog()
                .into_iter()
                .map(Tree::new)
                .collect(),
            period: 0,
        }
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Number of periods advanced since creation or the last reset.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Height history of the tree named `name`, indexed by period.
    pub fn history_of(&self, name: &str) -> Result<&[f64]> {
        self.trees
            .iter()
            .find(|t| t.name() == name)
            .map(Tree::history)
            .ok_or_else(|| GrowthError::UnknownSpecies(name.to_owned()))
    }

    /// Largest height any tree has reached, `0.0` for an empty forest.
    pub fn max_height(&self) -> f64 {
        self.trees
            .iter()
            .flat_map(|t| t.history().iter().copied())
            .fold(0.0, f64::max)
    }

    /// Advances every tree by one period.
    ///
    /// The environment is copied once and the same snapshot is used for
    /// every tree. The snapshot and every tree's growth are checked before
    /// any tree is touched, so a rejected call leaves the forest unchanged.
    ///
    /// ### Parameters
    /// - `env` - Current readings from the control panel.
    ///
    /// ### Returns
    /// A [`PeriodReport`] with one [`GrowthRecord`] per tree, in forest
    /// order.
    pub fn advance_all(&mut self, env: &Environment) -> Result<PeriodReport> {
        let snapshot = *env;
        if let Err(err) = snapshot.validate() {
            warn!(%err, "advance rejected");
            return Err(err);
        }

        let deltas = self
            .trees
            .iter()
            .map(|t| t.checked_growth(&snapshot))
            .collect::<Result<Vec<_>>>()
            .inspect_err(|err| warn!(%err, "advance rejected"))?;

        let mut records = Vec::with_capacity(self.trees.len());
        for ((id, tree), delta) in self.trees.iter_mut().enumerate().zip(deltas) {
            tree.grow_by(delta);
            records.push(GrowthRecord {
                tree: id,
                species: tree.name().to_owned(),
                delta,
                height: tree.height(),
            });
        }
        self.period += 1;

        Ok(PeriodReport {
            period: self.period,
            environment: snapshot,
            records,
        })
    }

    /// Resets every tree and the period counter. Idempotent.
    pub fn reset_all(&mut self) {
        for tree in &mut self.trees {
            tree.reset();
        }
        self.period = 0;
        info!("simulation reset");
    }
}

impl Default for Forest {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::GrowthStrategy;
    use approx::assert_relative_eq;

    #[test]
    fn reference_forest_order() {
        let forest = Forest::reference();
        let names: Vec<&str> = forest.trees().iter().map(Tree::name).collect();
        assert_eq!(names, vec!["Oak", "Pine", "Birch", "Maple", "Cherry"]);
        assert_eq!(forest.period(), 0);
        assert_eq!(forest.len(), 5);
    }

    #[test]
    fn advance_all_reports_every_tree_in_order() {
        let mut forest = Forest::reference();
        let report = forest.advance_all(&Environment::default()).unwrap();

        assert_eq!(report.period, 1);
        assert_eq!(report.records.len(), 5);
        for (i, (record, tree)) in report.records.iter().zip(forest.trees()).enumerate() {
            assert_eq!(record.tree, i);
            assert_eq!(record.species, tree.name());
            assert_eq!(record.height, tree.height());
        }
        assert_relative_eq!(report.records[0].delta, 1.6, epsilon = 1e-12);
    }

    #[test]
    fn reference_deltas_at_default_environment() {
        let mut forest = Forest::reference();
        let report = forest.advance_all(&Environment::default()).unwrap();
        let deltas: Vec<f64> = report.records.iter().map(|r| r.delta).collect();

        // Oak: temp 0.8 + precip 0.8
        // Pine: light (1 - 100/1000) + soil 1.0
        // Birch: humidity (1 - 10/100) * 0.9 + soil (1 - 5/100) * 0.9
        // Maple: temp (1 - 4/50) * 0.85 + humidity (1 - 5/100) * 0.85
        // Cherry: temp (1 - 3/50) * 0.95 + light (1 - 50/1000) * 0.95
        let expected = [1.6, 1.9, 1.665, 1.5895, 1.7955];
        for (got, want) in deltas.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-9);
        }
        assert_relative_eq!(report.total_growth(), expected.iter().sum::<f64>(), epsilon = 1e-9);
    }

    #[test]
    fn period_and_histories_stay_in_step() {
        let mut forest = Forest::reference();
        let env = Environment {
            temperature: 31.0,
            light: 1500.0,
            ..Environment::default()
        };
        for n in 1..=7 {
            forest.advance_all(&env).unwrap();
            assert_eq!(forest.period(), n);
            for tree in forest.trees() {
                assert_eq!(tree.history().len(), n + 1);
                assert_eq!(tree.periods_elapsed(), forest.period());
            }
        }
    }

    #[test]
    fn rejected_advance_leaves_forest_untouched() {
        let mut forest = Forest::reference();
        forest.advance_all(&Environment::default()).unwrap();

        let bad = Environment {
            temperature: f64::NAN,
            ..Environment::default()
        };
        assert!(forest.advance_all(&bad).is_err());
        assert_eq!(forest.period(), 1);
        for tree in forest.trees() {
            assert_eq!(tree.history().len(), 2);
        }
    }

    #[test]
    fn reset_all_restores_initial_state() {
        let mut forest = Forest::reference();
        for _ in 0..3 {
            forest.advance_all(&Environment::default()).unwrap();
        }
        forest.reset_all();
        forest.reset_all();

        assert_eq!(forest.period(), 0);
        for tree in forest.trees() {
            assert_eq!(tree.height(), 0.0);
            assert_eq!(tree.history(), &[0.0]);
        }
    }

    #[test]
    fn history_of_looks_up_by_name() {
        let mut forest = Forest::reference();
        forest.advance_all(&Environment::default()).unwrap();

        let oak = forest.history_of("Oak").unwrap();
        assert_eq!(oak.len(), 2);
        assert_relative_eq!(oak[1], 1.6, epsilon = 1e-12);

        assert!(matches!(
            forest.history_of("Baobab"),
            Err(GrowthError::UnknownSpecies(ref name)) if name == "Baobab"
        ));
    }

    #[test]
    fn new_rejects_invalid_profile() {
        let mut bad = species::pine();
        bad.base_growth_rate = -1.0;
        let err = Forest::new([species::oak(), bad]).unwrap_err();
        assert!(matches!(err, GrowthError::InvalidProfile { .. }));
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let err = Forest::new([species::oak(), species::oak()]).unwrap_err();
        assert!(matches!(
            err,
            GrowthError::InvalidProfile { ref species, ref reason }
                if species == "Oak" && reason.contains("duplicate")
        ));

        let mut faster_oak = species::oak();
        faster_oak.base_growth_rate = 2.0;
        assert!(Forest::new([species::pine(), species::oak(), faster_oak]).is_err());
    }

    #[test]
    fn overflow_in_one_tree_leaves_whole_forest_untouched() {
        let mut sprout = species::birch();
        sprout.name = "Sprout".into();
        sprout.strategies = vec![GrowthStrategy::Default];
        let mut forest = Forest::new([species::oak(), sprout]).unwrap();

        let huge = Environment {
            temperature: 1e308,
            light: 1e308,
            ..Environment::default()
        };
        let err = forest.advance_all(&huge).unwrap_err();

        assert!(matches!(err, GrowthError::NonFiniteGrowth { .. }));
        assert_eq!(forest.period(), 0);
        for tree in forest.trees() {
            assert_eq!(tree.history(), &[0.0]);
        }

        forest.advance_all(&Environment::default()).unwrap();
        assert!(forest.trees().iter().all(|t| t.height().is_finite()));
    }

    #[test]
    fn max_height_tracks_tallest_tree() {
        let mut forest = Forest::reference();
        assert_eq!(forest.max_height(), 0.0);
        forest.advance_all(&Environment::default()).unwrap();
        let tallest = forest
            .trees()
            .iter()
            .map(Tree::height)
            .fold(f64::MIN, f64::max);
        assert_eq!(forest.max_height(), tallest);
    }

    #[test]
    fn record_renders_as_log_line() {
        let record = GrowthRecord {
            tree: 0,
            species: "Oak".into(),
            delta: 1.6,
            height: 3.2,
        };
        assert_eq!(
            record.to_string(),
            "Oak grew by 1.60 m. Current height: 3.20 m."
        );
    }
}
