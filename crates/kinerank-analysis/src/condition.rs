//! Conditions, hands, and the domain ordering of conditions.
//!
//! A condition is a free-form label such as `"Med Off - DBS On - Pr2"`. The
//! pipeline only needs two things from it: equality (to find the baseline)
//! and a stable presentation order, given by [`ConditionClass`].

use std::{cmp::Ordering, fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Limb being measured. Each hand is analysed independently.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }

    /// Lower-case name used in export file names (`left`, `right`).
    #[must_use]
    pub const fn file_tag(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown hand {input:?} (expected \"left\" or \"right\")")]
pub struct ParseHandError {
    input: String,
}

impl FromStr for Hand {
    type Err = ParseHandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(ParseHandError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Coarse category of a condition label, ordered the way reports list them.
///
/// Stimulation-off conditions come first (they are baseline candidates),
/// followed by numbered programs or levels in ascending order, then any other
/// stimulation-on condition, then medication-on conditions, then everything
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum ConditionClass {
    StimulationOff,
    Program(u32),
    StimulationOn,
    MedicationOn,
    Other,
}

static PROGRAM_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:pr|level)\s?(\d+)").unwrap());

impl ConditionClass {
    /// Classifies a condition label.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinerank_analysis::condition::ConditionClass;
    ///
    /// assert_eq!(ConditionClass::of("Med Off - DBS Off"), ConditionClass::StimulationOff);
    /// assert_eq!(ConditionClass::of("Med Off - DBS On - Pr3"), ConditionClass::Program(3));
    /// assert_eq!(ConditionClass::of("Med Off - DBS On - Level 2"), ConditionClass::Program(2));
    /// assert_eq!(ConditionClass::of("Med Off - DBS On"), ConditionClass::StimulationOn);
    /// assert_eq!(ConditionClass::of("Med On"), ConditionClass::MedicationOn);
    /// assert_eq!(ConditionClass::of("Unlabelled"), ConditionClass::Other);
    /// ```
    #[must_use]
    pub fn of(condition: &str) -> Self {
        let lower = condition.to_lowercase();
        if lower.contains("dbs off") {
            return Self::StimulationOff;
        }
        if let Some(number) = PROGRAM_NUMBER
            .captures(&lower)
            .and_then(|caps| caps[1].parse().ok())
        {
            return Self::Program(number);
        }
        if lower.contains("dbs on") {
            return Self::StimulationOn;
        }
        if lower.contains("med on") {
            return Self::MedicationOn;
        }
        Self::Other
    }
}

/// Compares two condition labels by their [`ConditionClass`] only.
///
/// Labels of the same class compare equal, so a stable sort keeps their
/// incoming order.
#[must_use]
pub fn domain_order(a: &str, b: &str) -> Ordering {
    ConditionClass::of(a).cmp(&ConditionClass::of(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_order_sorts_programs_numerically() {
        let mut conditions = vec![
            "Med On",
            "Med Off - DBS On - Pr10",
            "Other",
            "Med Off - DBS On",
            "Med Off - DBS On - Pr2",
            "Med Off - DBS Off",
        ];
        conditions.sort_by(|a, b| domain_order(a, b));
        assert_eq!(
            conditions,
            [
                "Med Off - DBS Off",
                "Med Off - DBS On - Pr2",
                "Med Off - DBS On - Pr10",
                "Med Off - DBS On",
                "Med On",
                "Other",
            ]
        );
    }

    #[test]
    fn test_stimulation_off_wins_over_program_number() {
        assert_eq!(
            ConditionClass::of("Med On - DBS Off - Pr1"),
            ConditionClass::StimulationOff
        );
    }

    #[test]
    fn test_stimulation_label_precedes_medication_label() {
        // "Med On - DBS On" contains "dbs on" and is classified by stimulation first
        assert_eq!(
            ConditionClass::of("Med On - DBS On"),
            ConditionClass::StimulationOn
        );
        assert!(ConditionClass::of("med on").is_medication_on());
    }

    #[test]
    fn test_parse_hand() {
        assert_eq!("Left".parse::<Hand>().unwrap(), Hand::Left);
        assert_eq!(" RIGHT ".parse::<Hand>().unwrap(), Hand::Right);
        assert!("both".parse::<Hand>().is_err());
    }
}
