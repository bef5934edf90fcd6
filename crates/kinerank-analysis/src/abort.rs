//! Reasons a hand analysis stops early.
//!
//! None of these are failures of the program: they describe data that cannot
//! support a ranking. The pipeline records the reason in its result and leaves
//! the later stages empty, and the caller decides whether to skip the hand.

use serde::Serialize;

#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbortReason {
    /// No condition has usable data for the hand.
    #[display("no summary data for this hand")]
    EmptySummary,
    /// The requested baseline has no row in the summary.
    #[display("baseline condition {baseline:?} not found in summary")]
    MissingBaseline {
        baseline: String,
    },
    /// The baseline is the only condition with data.
    #[display("no conditions to compare against the baseline")]
    NoComparisonConditions,
    /// Every parameter's responsiveness is at or below the epsilon.
    #[display("no responsive parameters")]
    NoResponsiveParameters,
    /// Responsiveness scores do not add up to a positive total.
    #[display("total responsiveness is not positive")]
    ZeroTotalResponsiveness,
}
