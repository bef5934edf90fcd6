//! Composite scoring and ranking of conditions.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{series::NamedSeries, table::ConditionTable};

/// A condition and its composite score.
///
/// The score is `None` when the condition has no value for some weighted
/// parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionScore {
    pub condition: String,
    pub score: Option<f64>,
}

/// Weighted improvement score of every condition in `improvement`.
///
/// Only parameters present in both the matrix and `weights` contribute. A
/// single undefined cell among them leaves the condition's score undefined.
/// The result follows the matrix's row order.
///
/// # Examples
///
/// ```
/// use kinerank_analysis::{ranking::composite_scores, series::NamedSeries, table::ConditionTable};
///
/// let mut improvement = ConditionTable::new(vec!["MeanSpeed".into(), "StdSpeed".into()]);
/// improvement.push_row("Pr1", vec![Some(2.0), Some(4.0)]);
/// improvement.push_row("Pr2", vec![Some(2.0), None]);
///
/// // "Frequency" has no column and "MeanSpeed" has no weight: neither contributes
/// let weights = [("StdSpeed", 0.5), ("Frequency", 0.5)].into_iter().collect::<NamedSeries>();
/// let scores = composite_scores(&improvement, &weights);
/// assert_eq!(scores[0].score, Some(2.0));
/// assert_eq!(scores[1].score, None);
/// ```
#[must_use]
pub fn composite_scores(
    improvement: &ConditionTable,
    weights: &NamedSeries,
) -> Vec<ConditionScore> {
    let common = improvement
        .parameters()
        .iter()
        .enumerate()
        .filter_map(|(index, parameter)| weights.get(parameter).map(|w| (index, w)))
        .collect::<Vec<_>>();

    improvement
        .rows()
        .iter()
        .map(|row| {
            let score = common
                .iter()
                .map(|&(index, weight)| row.values[index].map(|v| v * weight))
                .try_fold(0.0, |acc, x| Some(acc + x?));
            ConditionScore {
                condition: row.condition.clone(),
                score,
            }
        })
        .collect()
}

/// Conditions ordered by descending composite score, undefined scores last.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<ConditionScore>,
}

impl Ranking {
    #[must_use]
    pub fn entries(&self) -> &[ConditionScore] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Highest-scoring condition. A condition without a score never wins.
    #[must_use]
    pub fn best(&self) -> Option<&ConditionScore> {
        self.entries.first().filter(|entry| entry.score.is_some())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.condition.as_str())
    }

    pub fn scores(&self) -> impl Iterator<Item = Option<f64>> {
        self.entries.iter().map(|e| e.score)
    }
}

/// Sorts `scores` in descending order, undefined scores after every defined one.
///
/// The sort is stable: conditions with equal scores keep their order in
/// `scores` (the summary order), so the output is deterministic.
///
/// # Examples
///
/// ```
/// use kinerank_analysis::ranking::{ConditionScore, rank};
///
/// let scores = [("Pr1", Some(1.0)), ("Pr2", None), ("Pr3", Some(3.0)), ("Pr4", Some(1.0))]
///     .map(|(condition, score)| ConditionScore { condition: condition.into(), score });
/// let ranking = rank(&scores);
/// assert_eq!(ranking.names().collect::<Vec<_>>(), ["Pr3", "Pr1", "Pr4", "Pr2"]);
/// ```
#[must_use]
pub fn rank(scores: &[ConditionScore]) -> Ranking {
    let mut entries = scores.to_vec();
    entries.sort_by(|a, b| descending(a.score, b.score));
    Ranking { entries }
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    // total_cmp separates -0.0 from 0.0; treat them as a tie
    let canonical = |x: f64| if x == 0.0 { 0.0 } else { x };
    match (a, b) {
        (Some(a), Some(b)) => canonical(b).total_cmp(&canonical(a)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
