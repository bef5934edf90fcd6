//! Full per-hand analysis.
//!
//! [`analyze_hand`] chains the stages
//!
//! 1. [`summarize_hand`]: trials → per-condition summary
//! 2. [`improvement_over_baseline`]: summary → improvement matrix
//! 3. [`responsiveness()`]: improvement matrix → responsiveness vector
//! 4. [`blend_weights`]: responsiveness → regularized weights
//! 5. [`composite_scores`] and [`rank`]: weights × matrix → ranking
//!
//! and always returns a [`HandAnalysis`]. When a stage cannot proceed, the
//! reason is stored in [`HandAnalysis::abort`] and every later field stays
//! empty, so callers see one result shape on every path.

use serde::Serialize;

use crate::{
    abort::AbortReason,
    aggregate::summarize_hand,
    condition::Hand,
    config::AnalysisConfig,
    improvement::{improvement_over_baseline, raw_effect},
    measurement::TrialSet,
    ranking::{ConditionScore, Ranking, composite_scores, rank},
    responsiveness::responsiveness,
    series::NamedSeries,
    table::ConditionTable,
    weights::blend_weights,
};

/// Every intermediate and final result of one hand's analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandAnalysis {
    pub hand: Hand,
    pub baseline: String,
    /// Mean of each parameter per condition.
    pub summary: ConditionTable,
    /// Direction-corrected change from the baseline per non-baseline condition.
    pub improvement: ConditionTable,
    /// Responsive parameters and their scores.
    pub responsiveness: NamedSeries,
    /// Final blended weights over the responsive parameters.
    pub weights: NamedSeries,
    /// Composite score per condition, in summary order.
    pub scores: Vec<ConditionScore>,
    /// Conditions by descending composite score.
    pub ranking: Ranking,
    /// Why the analysis stopped early, if it did.
    pub abort: Option<AbortReason>,
}

impl HandAnalysis {
    fn new(hand: Hand, baseline: &str, summary: ConditionTable) -> Self {
        Self {
            hand,
            baseline: baseline.to_owned(),
            summary,
            improvement: ConditionTable::default(),
            responsiveness: NamedSeries::new(),
            weights: NamedSeries::new(),
            scores: Vec::new(),
            ranking: Ranking::default(),
            abort: None,
        }
    }

    fn run_stages(&mut self, config: &AnalysisConfig) -> Result<(), AbortReason> {
        self.improvement = improvement_over_baseline(
            &self.summary,
            &self.baseline,
            &config.directions,
            config.unknown_direction,
        )?;
        self.responsiveness = responsiveness(&self.improvement);
        self.weights = blend_weights(&self.responsiveness, config.shrinkage)?;
        self.scores = composite_scores(&self.improvement, &self.weights);
        self.ranking = rank(&self.scores);
        Ok(())
    }

    /// The analysis reached the ranking stage.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.abort.is_none()
    }

    /// Name of the top-ranked condition, if any condition has a score.
    #[must_use]
    pub fn best_condition(&self) -> Option<&str> {
        self.ranking.best().map(|best| best.condition.as_str())
    }

    /// Summary values of the baseline condition.
    #[must_use]
    pub fn baseline_values(&self) -> Option<NamedSeries> {
        self.summary.row_series(&self.baseline)
    }

    /// Raw (uncorrected) change of the top-ranked condition from the baseline.
    #[must_use]
    pub fn optimal_effect(&self) -> Option<NamedSeries> {
        raw_effect(&self.summary, self.best_condition()?, &self.baseline)
    }
}

/// Runs the whole pipeline for one hand.
///
/// Never fails: abort conditions are reported through
/// [`HandAnalysis::abort`] and a `warn` log record. The input is only read, so
/// hands and patients can be analysed concurrently.
///
/// # Examples
///
/// ```
/// use kinerank_analysis::{
///     condition::Hand, config::AnalysisConfig, measurement::TrialSet, pipeline::analyze_hand,
/// };
///
/// let mut trials = TrialSet::new();
/// for (condition, std_speed) in [("Med Off - DBS Off", 5.0), ("Pr1", 3.0), ("Pr2", 6.0)] {
///     trials.push(condition, Hand::Right, [("StdSpeed", std_speed)].into_iter().collect());
/// }
///
/// let analysis = analyze_hand(&trials, Hand::Right, "Med Off - DBS Off", &AnalysisConfig::default());
/// assert_eq!(analysis.best_condition(), Some("Pr1"));
/// ```
#[must_use]
pub fn analyze_hand(
    trials: &TrialSet,
    hand: Hand,
    baseline: &str,
    config: &AnalysisConfig,
) -> HandAnalysis {
    let mut analysis = HandAnalysis::new(hand, baseline, summarize_hand(trials, hand));
    if let Err(reason) = analysis.run_stages(config) {
        tracing::warn!(%hand, baseline, %reason, "hand analysis stopped early");
        analysis.abort = Some(reason);
    }
    analysis
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{config::Shrinkage, measurement::RawMeasurement};

    const BASELINE: &str = "Med Off - DBS Off";

    fn trial(parameter: &str, value: f64) -> RawMeasurement {
        [(parameter, value)].into_iter().collect()
    }

    #[test]
    fn test_single_comparison_stops_at_weighting() {
        let mut trials = TrialSet::new();
        trials.push("DBS On - Pr1", Hand::Right, trial("MeanSpeed", 10.0));
        trials.push("DBS On - Pr1", Hand::Right, trial("MeanSpeed", 12.0));
        trials.push(BASELINE, Hand::Right, trial("MeanSpeed", 8.0));
        trials.push(BASELINE, Hand::Right, trial("MeanSpeed", 8.0));

        let analysis = analyze_hand(&trials, Hand::Right, BASELINE, &AnalysisConfig::default());

        assert_eq!(analysis.summary.get(BASELINE, "MeanSpeed"), Some(8.0));
        assert_eq!(analysis.summary.get("DBS On - Pr1", "MeanSpeed"), Some(11.0));
        assert_eq!(analysis.improvement.get("DBS On - Pr1", "MeanSpeed"), Some(3.0));
        // std of a single value is undefined, hence 0, hence filtered out
        assert!(analysis.responsiveness.is_empty());
        assert!(analysis.weights.is_empty());
        assert!(analysis.scores.is_empty());
        assert!(analysis.ranking.is_empty());
        assert_eq!(analysis.abort, Some(AbortReason::NoResponsiveParameters));
        assert!(!analysis.is_complete());
    }

    #[test]
    fn test_lower_is_better_ranking() {
        let mut trials = TrialSet::new();
        trials.push(BASELINE, Hand::Left, trial("StdSpeed", 5.0));
        trials.push("Med Off - DBS On - Pr1", Hand::Left, trial("StdSpeed", 3.0));
        trials.push("Med Off - DBS On - Pr2", Hand::Left, trial("StdSpeed", 6.0));

        let analysis = analyze_hand(&trials, Hand::Left, BASELINE, &AnalysisConfig::default());

        assert!(analysis.is_complete());
        assert_eq!(
            analysis.ranking.names().collect::<Vec<_>>(),
            ["Med Off - DBS On - Pr1", "Med Off - DBS On - Pr2"]
        );
        let scores = analysis.ranking.scores().collect::<Option<Vec<_>>>().unwrap();
        assert_abs_diff_eq!(scores[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(scores[1], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(analysis.weights.get("StdSpeed").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_baseline_keeps_summary() {
        let mut trials = TrialSet::new();
        trials.push("Med Off - DBS On - Pr1", Hand::Right, trial("MeanSpeed", 1.0));
        trials.push("Med Off - DBS On - Pr2", Hand::Right, trial("MeanSpeed", 2.0));

        let analysis = analyze_hand(&trials, Hand::Right, BASELINE, &AnalysisConfig::default());
        assert_eq!(analysis.summary.rows().len(), 2);
        assert!(analysis.improvement.is_empty());
        assert!(analysis.ranking.is_empty());
        assert_eq!(
            analysis.abort,
            Some(AbortReason::MissingBaseline {
                baseline: BASELINE.into()
            })
        );
        assert!(analysis.best_condition().is_none());
        assert!(analysis.optimal_effect().is_none());
    }

    #[test]
    fn test_hand_without_data() {
        let mut trials = TrialSet::new();
        trials.push(BASELINE, Hand::Right, trial("MeanSpeed", 1.0));

        let analysis = analyze_hand(&trials, Hand::Left, BASELINE, &AnalysisConfig::default());
        assert!(analysis.summary.is_empty());
        assert_eq!(analysis.abort, Some(AbortReason::EmptySummary));
    }

    #[test]
    fn test_multi_parameter_blend_and_exports() {
        let mut trials = TrialSet::new();
        for (condition, speed, std_speed) in [
            (BASELINE, 8.0, 5.0),
            ("Med Off - DBS On - Pr1", 10.0, 4.0),
            ("Med Off - DBS On - Pr2", 14.0, 4.5),
            ("Med Off - DBS On - Pr3", 9.0, 2.0),
        ] {
            trials.push(
                condition,
                Hand::Right,
                [("MeanSpeed", speed), ("StdSpeed", std_speed)]
                    .into_iter()
                    .collect(),
            );
        }
        let config = AnalysisConfig {
            shrinkage: Shrinkage::new(0.5).unwrap(),
            ..AnalysisConfig::default()
        };

        let analysis = analyze_hand(&trials, Hand::Right, BASELINE, &config);
        assert!(analysis.is_complete());
        assert_abs_diff_eq!(analysis.weights.sum(), 1.0, epsilon = 1e-12);

        // every score is the weighted sum of the corrected improvements
        for entry in &analysis.scores {
            let expected = analysis
                .weights
                .iter()
                .map(|(p, w)| w * analysis.improvement.get(&entry.condition, p).unwrap())
                .sum::<f64>();
            assert_abs_diff_eq!(entry.score.unwrap(), expected, epsilon = 1e-12);
        }
        let scores = analysis.ranking.scores().collect::<Option<Vec<_>>>().unwrap();
        assert!(scores.is_sorted_by(|a, b| a >= b));

        let best = analysis.best_condition().unwrap();
        let effect = analysis.optimal_effect().unwrap();
        assert_abs_diff_eq!(
            effect.get("MeanSpeed").unwrap(),
            analysis.summary.get(best, "MeanSpeed").unwrap() - 8.0,
            epsilon = 1e-12
        );
        assert_eq!(analysis.baseline_values().unwrap().get("StdSpeed"), Some(5.0));
    }

    #[test]
    fn test_condition_missing_a_weighted_parameter_ranks_last() {
        let mut trials = TrialSet::new();
        for (condition, speed, std_speed) in [
            (BASELINE, 8.0, Some(5.0)),
            ("Med Off - DBS On - Pr1", 9.0, Some(7.0)),
            ("Med Off - DBS On - Pr2", 10.0, Some(6.0)),
            ("Med Off - DBS On - Pr3", 9.5, None),
        ] {
            let mut measurement = trial("MeanSpeed", speed);
            if let Some(std_speed) = std_speed {
                measurement.push("StdSpeed", std_speed);
            }
            trials.push(condition, Hand::Right, measurement);
        }

        let analysis = analyze_hand(&trials, Hand::Right, BASELINE, &AnalysisConfig::default());
        assert!(analysis.is_complete());
        assert!(analysis.weights.contains("StdSpeed"));
        assert_eq!(
            analysis.ranking.names().collect::<Vec<_>>(),
            [
                "Med Off - DBS On - Pr2",
                "Med Off - DBS On - Pr1",
                "Med Off - DBS On - Pr3"
            ]
        );
        assert_eq!(analysis.ranking.entries()[2].score, None);
        assert_eq!(analysis.best_condition(), Some("Med Off - DBS On - Pr2"));
        let effect = analysis.optimal_effect().unwrap();
        assert_eq!(effect.get("MeanSpeed"), Some(2.0));
        assert_eq!(effect.get("StdSpeed"), Some(1.0));
    }

    #[test]
    fn test_idempotent() {
        let mut trials = TrialSet::new();
        trials.push(BASELINE, Hand::Left, trial("StdSpeed", 5.0));
        trials.push("Pr1", Hand::Left, trial("StdSpeed", 3.0));
        trials.push("Pr2", Hand::Left, trial("StdSpeed", 6.0));
        let config = AnalysisConfig::default();

        let first = analyze_hand(&trials, Hand::Left, BASELINE, &config);
        let second = analyze_hand(&trials, Hand::Left, BASELINE, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_shape_is_stable_on_abort() {
        let analysis = analyze_hand(&TrialSet::new(), Hand::Left, BASELINE, &AnalysisConfig::default());
        let json = serde_json::to_value(&analysis).unwrap();
        for key in [
            "summary",
            "improvement",
            "responsiveness",
            "weights",
            "scores",
            "ranking",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["abort"]["kind"], "empty_summary");
        assert_eq!(json["ranking"], serde_json::json!([]));
    }
}
