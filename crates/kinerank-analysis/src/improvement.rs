//! Baseline-relative improvement.
//!
//! Each non-baseline condition is compared against the baseline row of the
//! summary, parameter by parameter. Deltas of lower-is-better parameters are
//! negated so that a positive value always means clinical improvement.

use std::iter;

use crate::{
    abort::AbortReason,
    direction::{DirectionTable, UnknownDirectionPolicy},
    series::NamedSeries,
    table::ConditionTable,
};

/// Computes the direction-corrected improvement matrix.
///
/// Rows are the non-baseline conditions in summary order. A cell is undefined
/// when either the condition or the baseline lacks a value. Parameters without
/// a direction are kept with their raw sign or dropped, according to `policy`.
///
/// # Errors
///
/// - [`AbortReason::EmptySummary`] if `summary` has no rows
/// - [`AbortReason::MissingBaseline`] if `baseline` is not a summary row
/// - [`AbortReason::NoComparisonConditions`] if the baseline is the only row
///
/// # Examples
///
/// ```
/// use kinerank_analysis::{
///     direction::{DirectionTable, UnknownDirectionPolicy},
///     improvement::improvement_over_baseline,
///     table::ConditionTable,
/// };
///
/// let mut summary = ConditionTable::new(vec!["StdSpeed".into()]);
/// summary.push_row("Med Off - DBS Off", vec![Some(5.0)]);
/// summary.push_row("Pr1", vec![Some(3.0)]);
///
/// let improvement = improvement_over_baseline(
///     &summary,
///     "Med Off - DBS Off",
///     &DirectionTable::default(),
///     UnknownDirectionPolicy::KeepRawSign,
/// )
/// .unwrap();
/// // StdSpeed is lower-is-better, so a drop of 2 is an improvement of +2
/// assert_eq!(improvement.get("Pr1", "StdSpeed"), Some(2.0));
/// ```
pub fn improvement_over_baseline(
    summary: &ConditionTable,
    baseline: &str,
    directions: &DirectionTable,
    policy: UnknownDirectionPolicy,
) -> Result<ConditionTable, AbortReason> {
    if summary.is_empty() {
        return Err(AbortReason::EmptySummary);
    }
    let baseline_row = summary
        .row(baseline)
        .ok_or_else(|| AbortReason::MissingBaseline {
            baseline: baseline.to_owned(),
        })?;
    if summary.conditions().all(|condition| condition == baseline) {
        return Err(AbortReason::NoComparisonConditions);
    }

    let columns = summary
        .parameters()
        .iter()
        .enumerate()
        .filter_map(|(index, parameter)| {
            directions
                .correction(parameter, policy)
                .map(|sign| (index, parameter.clone(), sign))
        })
        .collect::<Vec<_>>();

    let mut improvement =
        ConditionTable::new(columns.iter().map(|(_, p, _)| p.clone()).collect());
    for row in summary.rows().iter().filter(|row| row.condition != baseline) {
        let values = columns
            .iter()
            .map(|&(index, _, sign)| {
                let (value, reference) = (row.values[index]?, baseline_row.values[index]?);
                Some(sign * (value - reference))
            })
            .collect();
        improvement.push_row(row.condition.clone(), values);
    }

    tracing::debug!(
        baseline,
        conditions = improvement.rows().len(),
        parameters = improvement.parameters().len(),
        "computed improvement over baseline"
    );
    Ok(improvement)
}

/// Raw, uncorrected `condition - baseline` difference of every parameter
/// defined in both rows.
///
/// Returns `None` if either row is missing from `summary`.
#[must_use]
pub fn raw_effect(
    summary: &ConditionTable,
    condition: &str,
    baseline: &str,
) -> Option<NamedSeries> {
    let row = summary.row(condition)?;
    let reference = summary.row(baseline)?;
    Some(
        iter::zip(summary.parameters(), iter::zip(&row.values, &reference.values))
            .filter_map(|(parameter, (v, b))| Some((parameter.as_str(), (*v)? - (*b)?)))
            .collect(),
    )
}
