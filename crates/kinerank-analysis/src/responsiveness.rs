//! Parameter responsiveness.
//!
//! A parameter that moves by the same amount under every condition cannot
//! tell conditions apart. Responsiveness is the sample standard deviation of a
//! parameter's improvement values across conditions; parameters with
//! (numerically) zero responsiveness are dropped.

use kinerank_stats::descriptive::DescriptiveStats;

use crate::{series::NamedSeries, table::ConditionTable};

/// Scores at or below this value carry no discriminating signal.
pub const RESPONSIVENESS_EPSILON: f64 = 1e-9;

/// Computes the responsiveness of every parameter in `improvement`.
///
/// Undefined cells are excluded from the standard deviation, not treated as
/// zero. A column with fewer than two defined cells scores `0` and is
/// therefore dropped. The result keeps the matrix's parameter order and may be
/// empty.
///
/// # Examples
///
/// ```
/// use kinerank_analysis::{responsiveness::responsiveness, table::ConditionTable};
///
/// let mut improvement = ConditionTable::new(vec!["StdSpeed".into(), "MeanSpeed".into()]);
/// improvement.push_row("A", vec![Some(2.0), Some(1.0)]);
/// improvement.push_row("B", vec![Some(-1.0), Some(1.0)]);
///
/// let scores = responsiveness(&improvement);
/// assert_eq!(scores.len(), 1);
/// assert!((scores.get("StdSpeed").unwrap() - 4.5_f64.sqrt()).abs() < 1e-12);
/// ```
#[must_use]
pub fn responsiveness(improvement: &ConditionTable) -> NamedSeries {
    let scores = improvement
        .parameters()
        .iter()
        .enumerate()
        .map(|(index, parameter)| {
            let score = DescriptiveStats::new(improvement.column(index).flatten())
                .and_then(|stats| stats.sample_std_dev)
                .unwrap_or(0.0);
            (parameter.as_str(), score)
        })
        .filter(|(_, score)| *score > RESPONSIVENESS_EPSILON)
        .collect::<NamedSeries>();

    tracing::debug!(
        candidates = improvement.parameters().len(),
        responsive = scores.len(),
        "estimated responsiveness"
    );
    scores
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_single_condition_has_no_responsive_parameters() {
        let mut improvement = ConditionTable::new(vec!["MeanSpeed".into()]);
        improvement.push_row("DBS On - Pr1", vec![Some(3.0)]);
        assert!(responsiveness(&improvement).is_empty());
    }

    #[test]
    fn test_undefined_cells_are_excluded() {
        let mut improvement = ConditionTable::new(vec!["MeanSpeed".into(), "Frequency".into()]);
        improvement.push_row("A", vec![Some(1.0), Some(1.0)]);
        improvement.push_row("B", vec![None, Some(3.0)]);
        improvement.push_row("C", vec![Some(3.0), None]);

        let scores = responsiveness(&improvement);
        // std of [1, 3] in both columns; a zero-filled column would differ
        assert_abs_diff_eq!(scores.get("MeanSpeed").unwrap(), 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(scores.get("Frequency").unwrap(), 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_near_constant_parameters_are_dropped() {
        let mut improvement = ConditionTable::new(vec!["Flat".into(), "Noisy".into()]);
        improvement.push_row("A", vec![Some(0.5), Some(0.0)]);
        improvement.push_row("B", vec![Some(0.5 + 1e-12), Some(1.0)]);

        let scores = responsiveness(&improvement);
        assert_eq!(scores.names().collect::<Vec<_>>(), ["Noisy"]);
    }

    #[test]
    fn test_empty_matrix() {
        assert!(responsiveness(&ConditionTable::default()).is_empty());
    }
}
