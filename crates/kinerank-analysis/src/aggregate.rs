//! Trial aggregation.
//!
//! Folds the repeated trials of each condition into one mean value per
//! parameter for a single hand.

use std::collections::BTreeSet;

use kinerank_stats::descriptive::DescriptiveStats;

use crate::{
    condition::{Hand, domain_order},
    measurement::{RawMeasurement, TrialSet},
    table::{ConditionRow, ConditionTable},
};

/// Builds the per-condition summary table for `hand`.
///
/// - Only conditions with at least one trial for `hand` appear.
/// - Each cell is the mean over the trials where the parameter has a numeric
///   value; a parameter with no numeric value in any trial is undefined.
/// - Columns are the union of parameter names seen for `hand`, sorted by name.
/// - Rows are sorted by [`domain_order`]; rows with no defined cell are dropped.
///
/// Empty or entirely malformed input yields an empty table.
///
/// # Examples
///
/// ```
/// use kinerank_analysis::{
///     aggregate::summarize_hand,
///     condition::Hand,
///     measurement::TrialSet,
/// };
///
/// let mut trials = TrialSet::new();
/// for speed in [10.0, 12.0] {
///     trials.push("DBS On - Pr1", Hand::Right, [("MeanSpeed", speed)].into_iter().collect());
/// }
/// let summary = summarize_hand(&trials, Hand::Right);
/// assert_eq!(summary.get("DBS On - Pr1", "MeanSpeed"), Some(11.0));
/// assert!(summarize_hand(&trials, Hand::Left).is_empty());
/// ```
#[must_use]
pub fn summarize_hand(trials: &TrialSet, hand: Hand) -> ConditionTable {
    let conditions = trials.by_hand(hand).collect::<Vec<_>>();

    let parameters = conditions
        .iter()
        .flat_map(|(_, trials)| trials.iter().flat_map(RawMeasurement::parameter_names))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();

    let mut rows = conditions
        .into_iter()
        .map(|(condition, trials)| ConditionRow {
            condition: condition.to_owned(),
            values: condition_means(&parameters, trials),
        })
        .filter(|row| !row.is_all_undefined())
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| domain_order(&a.condition, &b.condition));

    tracing::debug!(
        %hand,
        conditions = rows.len(),
        parameters = parameters.len(),
        "summarized trials"
    );

    let mut table = ConditionTable::new(parameters);
    for row in rows {
        table.push_row(row.condition, row.values);
    }
    table
}

fn condition_means(parameters: &[String], trials: &[RawMeasurement]) -> Vec<Option<f64>> {
    let numeric = trials
        .iter()
        .map(RawMeasurement::numeric_values)
        .collect::<Vec<_>>();
    parameters
        .iter()
        .map(|parameter| {
            let present = numeric
                .iter()
                .filter_map(|values| values.get(parameter.as_str()).copied());
            DescriptiveStats::new(present).map(|stats| stats.mean)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, seq::SliceRandom as _};
    use rand_pcg::Pcg64;

    use super::*;
    use crate::measurement::RawValue;

    fn trial(values: &[(&str, RawValue)]) -> RawMeasurement {
        values.iter().cloned().collect()
    }

    #[test]
    fn test_scenario_means() {
        let mut trials = TrialSet::new();
        trials.push("DBS On - Pr1", Hand::Right, trial(&[("MeanSpeed", RawValue::Number(10.0))]));
        trials.push("DBS On - Pr1", Hand::Right, trial(&[("MeanSpeed", RawValue::Number(12.0))]));
        trials.push("Med Off - DBS Off", Hand::Right, trial(&[("MeanSpeed", RawValue::Number(8.0))]));
        trials.push("Med Off - DBS Off", Hand::Right, trial(&[("MeanSpeed", RawValue::Number(8.0))]));

        let summary = summarize_hand(&trials, Hand::Right);
        assert_eq!(
            summary.conditions().collect::<Vec<_>>(),
            ["Med Off - DBS Off", "DBS On - Pr1"]
        );
        assert_eq!(summary.get("Med Off - DBS Off", "MeanSpeed"), Some(8.0));
        assert_eq!(summary.get("DBS On - Pr1", "MeanSpeed"), Some(11.0));
    }

    #[test]
    fn test_missing_values_are_skipped_per_parameter() {
        let mut trials = TrialSet::new();
        trials.push(
            "DBS On - Pr1",
            Hand::Left,
            trial(&[("MeanSpeed", RawValue::Number(10.0)), ("StdSpeed", "oops".into())]),
        );
        trials.push(
            "DBS On - Pr1",
            Hand::Left,
            trial(&[("MeanSpeed", "14".into()), ("StdSpeed", RawValue::Missing)]),
        );
        trials.push("DBS On - Pr1", Hand::Left, trial(&[("Frequency", RawValue::Number(3.0))]));

        let summary = summarize_hand(&trials, Hand::Left);
        assert_eq!(summary.parameters(), ["Frequency", "MeanSpeed", "StdSpeed"]);
        assert_eq!(summary.get("DBS On - Pr1", "MeanSpeed"), Some(12.0));
        assert_eq!(summary.get("DBS On - Pr1", "Frequency"), Some(3.0));
        // never a numeric value: undefined, not zero
        assert_eq!(summary.get("DBS On - Pr1", "StdSpeed"), None);
    }

    #[test]
    fn test_fully_undefined_rows_are_dropped() {
        let mut trials = TrialSet::new();
        trials.push("Med Off - DBS Off", Hand::Right, trial(&[("MeanSpeed", RawValue::Number(1.0))]));
        trials.push("DBS On - Pr2", Hand::Right, trial(&[("MeanSpeed", "n/a".into())]));
        trials.push("DBS On - Pr3", Hand::Right, RawMeasurement::new());

        let summary = summarize_hand(&trials, Hand::Right);
        assert_eq!(summary.conditions().collect::<Vec<_>>(), ["Med Off - DBS Off"]);
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert!(summarize_hand(&TrialSet::new(), Hand::Left).is_empty());

        let mut trials = TrialSet::new();
        trials.push("Med Off - DBS Off", Hand::Left, trial(&[("MeanSpeed", "?".into())]));
        assert!(summarize_hand(&trials, Hand::Left).is_empty());
    }

    #[test]
    fn test_rows_follow_domain_order() {
        let mut trials = TrialSet::new();
        for condition in [
            "Med On - DBS On",
            "Med Off - DBS On - Pr12",
            "Med Off - DBS On - Pr3",
            "Med Off - DBS Off",
        ] {
            trials.push(condition, Hand::Right, trial(&[("MeanSpeed", RawValue::Number(1.0))]));
        }
        let summary = summarize_hand(&trials, Hand::Right);
        assert_eq!(
            summary.conditions().collect::<Vec<_>>(),
            [
                "Med Off - DBS Off",
                "Med Off - DBS On - Pr3",
                "Med Off - DBS On - Pr12",
                "Med On - DBS On",
            ]
        );
    }

    #[test]
    fn test_invariant_under_trial_permutation() {
        let values = [0.1, 0.7, 1e-3, 123.456, 0.3, 9.99, 42.0, 0.2];
        let mut trial_list = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut t = trial(&[("MeanSpeed", RawValue::Number(*v))]);
                if i % 3 == 0 {
                    t.push("StdSpeed", v * 2.0);
                }
                t
            })
            .collect::<Vec<_>>();
        let build = |list: &[RawMeasurement]| {
            let mut trials = TrialSet::new();
            for t in list {
                trials.push("DBS On - Pr1", Hand::Right, t.clone());
            }
            summarize_hand(&trials, Hand::Right)
        };

        let expected = build(&trial_list);
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..20 {
            trial_list.shuffle(&mut rng);
            assert_eq!(build(&trial_list), expected);
        }
    }

    #[test]
    fn test_does_not_mutate_input() {
        let mut trials = TrialSet::new();
        trials.push("DBS On - Pr1", Hand::Right, trial(&[("MeanSpeed", "10".into())]));
        let before = trials.clone();
        let _ = summarize_hand(&trials, Hand::Right);
        assert_eq!(trials, before);
    }
}
