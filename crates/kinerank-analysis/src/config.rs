//! Analysis configuration.
//!
//! An [`AnalysisConfig`] is built once (from defaults or a JSON file) and
//! passed by reference into every pipeline call. Nothing in the pipeline
//! mutates it.

use serde::{Deserialize, Serialize};

use crate::{
    direction::{DirectionTable, UnknownDirectionPolicy},
    parameter::ParameterNames,
};

/// Error returned when a shrinkage value is outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("shrinkage must be within [0, 1], got {value}")]
pub struct InvalidShrinkage {
    pub value: f64,
}

/// Regularization strength λ blending data-driven weights toward uniform.
///
/// `0` is pure responsiveness-proportional weighting, `1` is uniform
/// weighting. The default is `0.1`.
///
/// # Examples
///
/// ```
/// use kinerank_analysis::config::Shrinkage;
///
/// assert_eq!(Shrinkage::default().get(), 0.1);
/// assert!(Shrinkage::new(1.0).is_ok());
/// assert!(Shrinkage::new(1.5).is_err());
/// assert!(Shrinkage::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Shrinkage(f64);

impl Shrinkage {
    pub const DEFAULT: Self = Self(0.1);

    pub fn new(value: f64) -> Result<Self, InvalidShrinkage> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidShrinkage { value })
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Shrinkage {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Shrinkage {
    type Error = InvalidShrinkage;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Shrinkage> for f64 {
    fn from(value: Shrinkage) -> Self {
        value.0
    }
}

/// Immutable settings shared by every hand and patient of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Parameter polarity.
    pub directions: DirectionTable,
    /// Handling of parameters missing from `directions`.
    pub unknown_direction: UnknownDirectionPolicy,
    /// Weight regularization λ.
    pub shrinkage: Shrinkage,
    /// Raw attribute name normalization and display labels.
    pub parameter_names: ParameterNames,
}
