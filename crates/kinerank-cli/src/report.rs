//! Patient reports and cross-patient summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kinerank_analysis::{
    condition::Hand, config::AnalysisConfig, direction::UnknownDirectionPolicy,
    parameter::ParameterNames, pipeline::HandAnalysis,
};
use kinerank_stats::{congruence::tuckers_congruence, descriptive::DescriptiveStats};
use serde::Serialize;

/// Contents of a patient's `analysis.json`.
#[derive(Debug, Clone, Serialize)]
pub struct PatientReport {
    pub patient: String,
    pub generated_at: DateTime<Utc>,
    pub baseline: String,
    pub shrinkage: f64,
    pub unknown_direction: UnknownDirectionPolicy,
    pub hands: Vec<HandAnalysis>,
    /// Tucker's congruence between the left and right weight vectors.
    pub left_right_congruence: Option<f64>,
}

impl PatientReport {
    pub fn new(
        patient: &str,
        baseline: &str,
        config: &AnalysisConfig,
        hands: Vec<HandAnalysis>,
    ) -> Self {
        let left_right_congruence = left_right_congruence(&hands);
        Self {
            patient: patient.to_owned(),
            generated_at: Utc::now(),
            baseline: baseline.to_owned(),
            shrinkage: config.shrinkage.get(),
            unknown_direction: config.unknown_direction,
            hands,
            left_right_congruence,
        }
    }
}

/// Similarity of the two hands' weight profiles.
///
/// Both hands must have completed. The vectors are aligned on the union of
/// their parameters, a parameter missing on one side counting as `0`.
pub fn left_right_congruence(hands: &[HandAnalysis]) -> Option<f64> {
    let weights = |hand: Hand| {
        hands
            .iter()
            .find(|analysis| analysis.hand == hand && analysis.is_complete())
            .map(|analysis| &analysis.weights)
    };
    let (left, right) = weights(Hand::Left)?.aligned_union(weights(Hand::Right)?);
    Some(tuckers_congruence(&left, &right))
}

/// Responsiveness of one parameter summarized over patients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub parameter: String,
    pub patients: usize,
    pub mean: f64,
    pub sem: Option<f64>,
}

/// Responsiveness scores collected across patients, per hand and parameter.
#[derive(Debug, Default)]
pub struct GroupResponsiveness {
    scores: BTreeMap<Hand, BTreeMap<String, Vec<f64>>>,
}

impl GroupResponsiveness {
    pub fn add(&mut self, analysis: &HandAnalysis) {
        let by_parameter = self.scores.entry(analysis.hand).or_default();
        for (parameter, score) in analysis.responsiveness.iter() {
            by_parameter
                .entry(parameter.to_owned())
                .or_default()
                .push(score);
        }
    }

    /// Mean and standard error per parameter, in parameter-name order.
    pub fn rows(&self, hand: Hand) -> Vec<GroupRow> {
        let Some(by_parameter) = self.scores.get(&hand) else {
            return Vec::new();
        };
        by_parameter
            .iter()
            .filter_map(|(parameter, scores)| {
                let stats = DescriptiveStats::new(scores.iter().copied())?;
                Some(GroupRow {
                    parameter: parameter.clone(),
                    patients: stats.count,
                    mean: stats.mean,
                    sem: stats.std_error,
                })
            })
            .collect()
    }
}

pub fn print_hand(analysis: &HandAnalysis, names: &ParameterNames) {
    println!("{} hand (baseline: {})", analysis.hand, analysis.baseline);
    if let Some(reason) = &analysis.abort {
        println!("  Not ranked: {reason}");
        return;
    }

    println!("  {:<28} {:>14} {:>8}", "Parameter", "Responsiveness", "Weight");
    for (parameter, weight) in analysis.weights.iter() {
        let score = analysis.responsiveness.get(parameter).unwrap_or_default();
        println!(
            "  {:<28} {score:>14.4} {weight:>8.4}",
            names.label(parameter)
        );
    }
    println!();
    println!("  {:>4} {:>10}  Condition", "Rank", "Score");
    for (index, entry) in analysis.ranking.entries().iter().enumerate() {
        let score = entry
            .score
            .map_or_else(|| "-".to_owned(), |score| format!("{score:+.4}"));
        println!("  {:>4} {score:>10}  {}", index + 1, entry.condition);
    }
}

pub fn print_group(hand: Hand, rows: &[GroupRow], names: &ParameterNames) {
    println!("Group responsiveness, {hand} hand");
    println!(
        "  {:<28} {:>8} {:>10} {:>10}",
        "Parameter", "Patients", "Mean", "SEM"
    );
    for row in rows {
        let sem = row.sem.map_or_else(|| "-".to_owned(), |sem| format!("{sem:.4}"));
        println!(
            "  {:<28} {:>8} {:>10.4} {sem:>10}",
            names.label(&row.parameter),
            row.patients,
            row.mean
        );
    }
}

#[cfg(test)]
mod tests {
    use kinerank_analysis::{measurement::TrialSet, pipeline::analyze_hand};

    use super::*;

    const BASELINE: &str = "Med Off - DBS Off";

    fn trials() -> TrialSet {
        let mut trials = TrialSet::new();
        for hand in Hand::ALL {
            let offset = if hand == Hand::Left { 0.0 } else { 1.0 };
            for (condition, speed, std_speed) in [
                (BASELINE, 8.0, 5.0),
                ("Med Off - DBS On - Pr1", 10.0 + offset, 4.0),
                ("Med Off - DBS On - Pr2", 9.0, 3.0 - offset),
            ] {
                trials.push(
                    condition,
                    hand,
                    [("MeanSpeed", speed), ("StdSpeed", std_speed)]
                        .into_iter()
                        .collect(),
                );
            }
        }
        trials
    }

    fn analyses(trials: &TrialSet) -> Vec<HandAnalysis> {
        Hand::ALL
            .into_iter()
            .map(|hand| analyze_hand(trials, hand, BASELINE, &AnalysisConfig::default()))
            .collect()
    }

    #[test]
    fn test_congruence_needs_both_hands() {
        let trials = trials();
        let hands = analyses(&trials);
        let phi = left_right_congruence(&hands).unwrap();
        assert!(phi > 0.0 && phi <= 1.0 + 1e-12);

        assert!(left_right_congruence(&hands[..1]).is_none());

        let mut aborted = hands.clone();
        aborted[1] = analyze_hand(&trials, Hand::Right, "Med On", &AnalysisConfig::default());
        assert!(left_right_congruence(&aborted).is_none());
    }

    #[test]
    fn test_identical_hands_are_fully_congruent() {
        let mut trials = TrialSet::new();
        for hand in Hand::ALL {
            for (condition, speed) in [(BASELINE, 1.0), ("Pr1", 2.0), ("Pr2", 4.0)] {
                trials.push(condition, hand, [("MeanSpeed", speed)].into_iter().collect());
            }
        }
        let phi = left_right_congruence(&analyses(&trials)).unwrap();
        assert!((phi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_group_rows() {
        let trials = trials();
        let mut group = GroupResponsiveness::default();
        for analysis in analyses(&trials).iter().chain(&analyses(&trials)) {
            group.add(analysis);
        }

        let rows = group.rows(Hand::Left);
        assert_eq!(
            rows.iter().map(|r| r.parameter.as_str()).collect::<Vec<_>>(),
            ["MeanSpeed", "StdSpeed"]
        );
        assert!(rows.iter().all(|r| r.patients == 2));
        // identical patients: zero spread
        assert!(rows.iter().all(|r| r.sem == Some(0.0)));

        assert!(GroupResponsiveness::default().rows(Hand::Right).is_empty());
    }

    #[test]
    fn test_report_serializes_hands_and_timestamp() {
        let trials = trials();
        let report = PatientReport::new("P01", BASELINE, &AnalysisConfig::default(), analyses(&trials));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["patient"], "P01");
        assert_eq!(json["shrinkage"], 0.1);
        assert_eq!(json["unknown_direction"], "keep-raw-sign");
        assert_eq!(json["hands"][0]["hand"], "Left");
        assert!(json["generated_at"].as_str().is_some());
        assert!(json["left_right_congruence"].is_number());
    }
}
