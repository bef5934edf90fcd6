//! Canonical parameter names and their display labels.
//!
//! Measurement exports spell attribute names inconsistently (`meanspeed`,
//! `MeanSpeed`, `rate`). [`ParameterNames`] maps them onto one canonical
//! spelling before aggregation, and supplies human-readable labels for
//! reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const STANDARD_PARAMETERS: [(&str, &str, &str); 23] = [
    ("meanamplitude", "MeanAmplitude", "Mean Amplitude"),
    ("stdamplitude", "StdAmplitude", "SD of Amplitude"),
    ("meanspeed", "MeanSpeed", "Mean Speed"),
    ("stdspeed", "StdSpeed", "SD of Speed"),
    ("meanrmsvelocity", "MeanRMSVelocity", "Mean RMS Velocity"),
    ("stdrmsvelocity", "StdRMSVelocity", "SD of RMS Velocity"),
    ("meanopeningspeed", "MeanOpeningSpeed", "Mean Opening Speed"),
    ("stdopeningspeed", "StdOpeningSpeed", "SD of Opening Speed"),
    ("meanclosingspeed", "MeanClosingSpeed", "Mean Closing Speed"),
    ("stdclosingspeed", "StdClosingSpeed", "SD of Closing Speed"),
    ("meancycleduration", "MeanCycleDuration", "Mean Cycle Duration"),
    ("stdcycleduration", "StdCycleDuration", "SD of Cycle Duration"),
    ("rangecycleduration", "RangeCycleDuration", "Range of Cycle Duration"),
    ("rate", "Frequency", "Frequency"),
    ("amplitudedecay", "AmplitudeDecay", "Amplitude Decay"),
    ("velocitydecay", "VelocityDecay", "Velocity Decay"),
    ("ratedecay", "RateDecay", "Rate Decay"),
    ("cvamplitude", "CVAmplitude", "CV of Amplitude"),
    ("cvcycleduration", "CVCycleDuration", "CV of Cycle Duration"),
    ("cvspeed", "CVSpeed", "CV of Speed"),
    ("cvrmsvelocity", "CVRMSVelocity", "CV of RMS Velocity"),
    ("cvopeningspeed", "CVOpeningSpeed", "CV of Opening Speed"),
    ("cvclosingspeed", "CVClosingSpeed", "CV of Closing Speed"),
];

/// Alias and label tables for parameter names.
///
/// Deserialized entries are merged over the standard tables: a configuration
/// only lists the aliases and labels it adds or changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NameOverrides")]
pub struct ParameterNames {
    /// Lower-case raw attribute name → canonical name.
    pub aliases: BTreeMap<String, String>,
    /// Canonical name → display label.
    pub labels: BTreeMap<String, String>,
}

impl Default for ParameterNames {
    fn default() -> Self {
        let mut aliases = BTreeMap::new();
        let mut labels = BTreeMap::new();
        for (alias, canonical, label) in STANDARD_PARAMETERS {
            aliases.insert(alias.to_owned(), canonical.to_owned());
            labels.insert(canonical.to_owned(), label.to_owned());
        }
        Self { aliases, labels }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct NameOverrides {
    aliases: BTreeMap<String, String>,
    labels: BTreeMap<String, String>,
}

impl From<NameOverrides> for ParameterNames {
    fn from(overrides: NameOverrides) -> Self {
        let mut names = Self::default();
        names.aliases.extend(
            overrides
                .aliases
                .into_iter()
                .map(|(alias, canonical)| (alias.trim().to_lowercase(), canonical)),
        );
        names.labels.extend(overrides.labels);
        names
    }
}

impl ParameterNames {
    /// Canonical spelling of a raw attribute name.
    ///
    /// Lookup is case-insensitive; unknown names are returned trimmed but
    /// otherwise unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinerank_analysis::parameter::ParameterNames;
    ///
    /// let names = ParameterNames::default();
    /// assert_eq!(names.canonical("meanSpeed"), "MeanSpeed");
    /// assert_eq!(names.canonical("rate"), "Frequency");
    /// assert_eq!(names.canonical(" Tremor "), "Tremor");
    /// ```
    #[must_use]
    pub fn canonical(&self, raw: &str) -> String {
        let raw = raw.trim();
        self.aliases
            .get(&raw.to_lowercase())
            .cloned()
            .unwrap_or_else(|| raw.to_owned())
    }

    /// Display label of a canonical name, falling back to the name itself.
    #[must_use]
    pub fn label<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.labels.get(canonical).map_or(canonical, String::as_str)
    }
}
