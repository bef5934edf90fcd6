//! Raw trial measurements as delivered by a data loader.
//!
//! A trial is a list of `parameter → value` pairs. Values are kept exactly as
//! the loader saw them; whether a value is numeric is decided later by
//! [`RawValue::as_number`], which never fails.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::condition::Hand;

/// A single cell of a trial table before numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Missing,
}

impl RawValue {
    /// Coerces the value to a finite number.
    ///
    /// Text is trimmed and parsed; anything unparsable, `NaN`, or infinite is
    /// treated as missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinerank_analysis::measurement::RawValue;
    ///
    /// assert_eq!(RawValue::from(" 1.5 ").as_number(), Some(1.5));
    /// assert_eq!(RawValue::from("n/a").as_number(), None);
    /// assert_eq!(RawValue::Number(f64::NAN).as_number(), None);
    /// ```
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().ok()?,
            Self::Missing => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One trial's parameter table.
///
/// When the same parameter appears more than once, the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMeasurement {
    entries: Vec<(String, RawValue)>,
}

impl RawMeasurement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<RawValue>,
    {
        self.entries.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All parameter names mentioned by this trial, numeric or not.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Numeric view of the trial; malformed values are absent from the map.
    #[must_use]
    pub fn numeric_values(&self) -> BTreeMap<&str, f64> {
        let mut coerced = BTreeMap::new();
        for (name, value) in &self.entries {
            coerced.insert(name.as_str(), value.as_number());
        }
        coerced
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }
}

impl<N, V> FromIterator<(N, V)> for RawMeasurement
where
    N: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
    {
        let entries = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { entries }
    }
}

/// All trials of one patient: condition → hand → trials.
///
/// The pipeline only ever reads from a `TrialSet`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrialSet {
    conditions: BTreeMap<String, BTreeMap<Hand, Vec<RawMeasurement>>>,
}

impl TrialSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<C>(&mut self, condition: C, hand: Hand, trial: RawMeasurement)
    where
        C: Into<String>,
    {
        self.conditions
            .entry(condition.into())
            .or_default()
            .entry(hand)
            .or_default()
            .push(trial);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Condition names in lexical order.
    pub fn conditions(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    /// Hands recorded for `condition`.
    #[must_use]
    pub fn hands(&self, condition: &str) -> BTreeSet<Hand> {
        self.conditions
            .get(condition)
            .map(|hands| hands.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Trials recorded for `condition` and `hand`, empty when there are none.
    #[must_use]
    pub fn trials(&self, condition: &str, hand: Hand) -> &[RawMeasurement] {
        self.conditions
            .get(condition)
            .and_then(|hands| hands.get(&hand))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `(condition, trials)` pairs for every condition with at least one trial
    /// for `hand`, in lexical condition order.
    pub fn by_hand(&self, hand: Hand) -> impl Iterator<Item = (&str, &[RawMeasurement])> {
        self.conditions.iter().filter_map(move |(condition, hands)| {
            hands
                .get(&hand)
                .filter(|trials| !trials.is_empty())
                .map(|trials| (condition.as_str(), trials.as_slice()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_drops_malformed() {
        let trial: RawMeasurement = [
            ("MeanSpeed", RawValue::from("10.5")),
            ("StdSpeed", RawValue::from("--")),
            ("Frequency", RawValue::Missing),
            ("MeanAmplitude", RawValue::from(f64::INFINITY)),
        ]
        .into_iter()
        .collect();

        let values = trial.numeric_values();
        assert_eq!(values.len(), 1);
        assert_eq!(values["MeanSpeed"], 10.5);
        assert_eq!(trial.parameter_names().count(), 4);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let mut trial = RawMeasurement::new();
        trial.push("MeanSpeed", 1.0);
        trial.push("MeanSpeed", "bad");
        assert!(trial.numeric_values().is_empty());

        trial.push("MeanSpeed", 3.0);
        assert_eq!(trial.numeric_values()["MeanSpeed"], 3.0);
    }

    #[test]
    fn test_trial_set_lookup() {
        let mut trials = TrialSet::new();
        trials.push("Med Off - DBS Off", Hand::Right, RawMeasurement::new());
        trials.push("Med Off - DBS Off", Hand::Left, RawMeasurement::new());
        trials.push("Med Off - DBS On", Hand::Left, RawMeasurement::new());

        assert_eq!(trials.trials("Med Off - DBS Off", Hand::Right).len(), 1);
        assert!(trials.trials("Med Off - DBS On", Hand::Right).is_empty());
        assert!(trials.trials("Unknown", Hand::Left).is_empty());
        assert_eq!(trials.hands("Med Off - DBS Off").len(), 2);
        assert_eq!(trials.by_hand(Hand::Left).count(), 2);
        assert_eq!(trials.by_hand(Hand::Right).count(), 1);
    }

    #[test]
    fn test_deserialize_mixed_values() {
        let json = r#"{"DBS On - Pr1": {"Right": [[["MeanSpeed", 10], ["StdSpeed", "x"], ["Frequency", null]]]}}"#;
        let trials: TrialSet = serde_json::from_str(json).unwrap();
        let trial = &trials.trials("DBS On - Pr1", Hand::Right)[0];
        assert_eq!(trial.len(), 3);
        assert_eq!(trial.numeric_values()["MeanSpeed"], 10.0);
    }
}
