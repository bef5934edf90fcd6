//! Clinical polarity of kinematic parameters.
//!
//! For some parameters a larger value is an improvement (speed, amplitude),
//! for others a smaller one is (variability, decay, cycle duration). The
//! improvement calculator flips the sign of lower-is-better parameters so that
//! a positive improvement always means the patient got better.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which way a parameter moves when the patient improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "higher")]
    HigherIsBetter,
    #[serde(rename = "lower")]
    LowerIsBetter,
}

impl Direction {
    /// Factor that turns a raw delta into an improvement.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::HigherIsBetter => 1.0,
            Self::LowerIsBetter => -1.0,
        }
    }
}

/// What to do with a parameter that has no entry in the [`DirectionTable`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownDirectionPolicy {
    /// Keep the raw, uncorrected delta (treats the parameter as higher-is-better).
    #[default]
    KeepRawSign,
    /// Leave the parameter out of the improvement matrix.
    Exclude,
}

const STANDARD_DIRECTIONS: [(&str, Direction); 23] = {
    use Direction::{HigherIsBetter as H, LowerIsBetter as L};
    [
        ("MeanAmplitude", H),
        ("StdAmplitude", L),
        ("MeanSpeed", H),
        ("StdSpeed", L),
        ("MeanRMSVelocity", H),
        ("StdRMSVelocity", L),
        ("MeanOpeningSpeed", H),
        ("StdOpeningSpeed", L),
        ("MeanClosingSpeed", H),
        ("StdClosingSpeed", L),
        ("MeanCycleDuration", L),
        ("StdCycleDuration", L),
        ("RangeCycleDuration", L),
        ("Frequency", H),
        ("AmplitudeDecay", L),
        ("VelocityDecay", L),
        ("RateDecay", L),
        ("CVAmplitude", L),
        ("CVCycleDuration", L),
        ("CVSpeed", L),
        ("CVRMSVelocity", L),
        ("CVOpeningSpeed", L),
        ("CVClosingSpeed", L),
    ]
};

/// Immutable mapping from canonical parameter name to [`Direction`].
///
/// The default table covers the standard finger-tapping kinematic parameters.
///
/// # Examples
///
/// ```
/// use kinerank_analysis::direction::{Direction, DirectionTable};
///
/// let table = DirectionTable::default();
/// assert_eq!(table.get("MeanSpeed"), Some(Direction::HigherIsBetter));
/// assert_eq!(table.get("StdSpeed"), Some(Direction::LowerIsBetter));
/// assert_eq!(table.get("Unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectionTable {
    directions: BTreeMap<String, Direction>,
}

impl Default for DirectionTable {
    fn default() -> Self {
        STANDARD_DIRECTIONS
            .into_iter()
            .map(|(name, direction)| (name.to_owned(), direction))
            .collect()
    }
}

impl DirectionTable {
    #[must_use]
    pub fn get(&self, parameter: &str) -> Option<Direction> {
        self.directions.get(parameter).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Sign to apply to a raw delta of `parameter`, or `None` when the
    /// parameter must be left out under `policy`.
    #[must_use]
    pub fn correction(&self, parameter: &str, policy: UnknownDirectionPolicy) -> Option<f64> {
        match (self.get(parameter), policy) {
            (Some(direction), _) => Some(direction.sign()),
            (None, UnknownDirectionPolicy::KeepRawSign) => Some(1.0),
            (None, UnknownDirectionPolicy::Exclude) => None,
        }
    }
}

impl FromIterator<(String, Direction)> for DirectionTable {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, Direction)>,
    {
        Self {
            directions: iter.into_iter().collect(),
        }
    }
}
