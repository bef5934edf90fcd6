//! Condition ranking from repeated-trial kinematic measurements
//!
//! This crate turns per-trial movement parameters recorded under several
//! medication and stimulation conditions into one ranked list of conditions
//! per hand, ordered by clinical improvement over a baseline condition.
//!
//! # Overview
//!
//! The pipeline runs strictly forward, one hand at a time:
//!
//! 1. **Aggregate Trials** ([`aggregate::summarize_hand`]): Mean of each parameter
//!    per condition, stored in a [`table::ConditionTable`]
//! 2. **Compare to Baseline** ([`improvement::improvement_over_baseline`]):
//!    Direction-corrected deltas, positive meaning improvement
//! 3. **Estimate Responsiveness** ([`responsiveness::responsiveness`]): Spread of
//!    each parameter across conditions; flat parameters are dropped
//! 4. **Blend Weights** ([`weights::blend_weights`]): Responsiveness-proportional
//!    weights shrunk toward uniform by λ
//! 5. **Score and Rank** ([`ranking::composite_scores`], [`ranking::rank`]):
//!    Weighted sum per condition, stable descending order
//!
//! [`pipeline::analyze_hand`] runs all five stages and always returns a
//! [`pipeline::HandAnalysis`]. Stages that cannot proceed record an
//! [`abort::AbortReason`] instead of failing.
//!
//! # Configuration
//!
//! [`config::AnalysisConfig`] holds the parameter direction table, the policy
//! for parameters without a known direction, the shrinkage λ, and the raw name
//! normalization table. It deserializes from JSON with every field optional.
//!
//! # Examples
//!
//! ```
//! use kinerank_analysis::{
//!     condition::Hand, config::AnalysisConfig, measurement::TrialSet, pipeline::analyze_hand,
//! };
//!
//! let mut trials = TrialSet::new();
//! for (condition, std_speed, speed) in [
//!     ("Med Off - DBS Off", 5.0, 8.0),
//!     ("Med Off - DBS On - Pr1", 3.0, 9.0),
//!     ("Med Off - DBS On - Pr2", 6.0, 7.0),
//! ] {
//!     trials.push(
//!         condition,
//!         Hand::Left,
//!         [("StdSpeed", std_speed), ("MeanSpeed", speed)].into_iter().collect(),
//!     );
//! }
//!
//! let config = AnalysisConfig::default();
//! let analysis = analyze_hand(&trials, Hand::Left, "Med Off - DBS Off", &config);
//!
//! assert!(analysis.is_complete());
//! assert_eq!(analysis.best_condition(), Some("Med Off - DBS On - Pr1"));
//! assert!((analysis.weights.sum() - 1.0).abs() < 1e-12);
//! ```

pub mod abort;
pub mod aggregate;
pub mod condition;
pub mod config;
pub mod direction;
pub mod improvement;
pub mod measurement;
pub mod parameter;
pub mod pipeline;
pub mod ranking;
pub mod responsiveness;
pub mod series;
pub mod table;
pub mod weights;
