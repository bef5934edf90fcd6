//! Batch analysis command
//!
//! Every subdirectory of the data directory is one patient. For each patient
//! and hand the full ranking pipeline runs, the result is printed, and the
//! report and CSV exports are written to `<OUTPUT_DIR>/<patient>/`. A group
//! responsiveness summary over all processed patients is written last.
//!
//! A patient that cannot be read or written is logged and skipped; only
//! failures on the data directory, the output root or the group summary stop
//! the run.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Args, ValueEnum};
use kinerank_analysis::{
    condition::Hand,
    config::{AnalysisConfig, Shrinkage},
    direction::UnknownDirectionPolicy,
    pipeline::analyze_hand,
};

use crate::{
    export, loader,
    report::{self, GroupResponsiveness, PatientReport},
    util,
};

const DEFAULT_BASELINE: &str = "Med Off - DBS Off";
const REPORT_FILE: &str = "analysis.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum UnknownDirectionArg {
    /// Keep the raw sign of the change
    KeepRawSign,
    /// Leave the parameter out of the analysis
    Exclude,
}

impl From<UnknownDirectionArg> for UnknownDirectionPolicy {
    fn from(arg: UnknownDirectionArg) -> Self {
        match arg {
            UnknownDirectionArg::KeepRawSign => Self::KeepRawSign,
            UnknownDirectionArg::Exclude => Self::Exclude,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    /// Directory with one subdirectory of trial CSV files per patient
    pub data_dir: PathBuf,

    /// Directory receiving one output folder per patient
    pub output_dir: PathBuf,

    /// Name of the baseline condition
    #[arg(long, default_value = DEFAULT_BASELINE)]
    pub baseline: String,

    /// Weight regularization toward uniform, within [0, 1]
    #[arg(long, value_parser = parse_shrinkage)]
    pub shrinkage: Option<Shrinkage>,

    /// Treatment of parameters with no known direction
    #[arg(long, value_enum)]
    pub unknown_direction: Option<UnknownDirectionArg>,

    /// Hands to analyze (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["left", "right"])]
    pub hand: Vec<Hand>,

    /// JSON analysis configuration; command-line options take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Re-process patients whose output folder already exists
    #[arg(long)]
    pub overwrite: bool,
}

fn parse_shrinkage(s: &str) -> anyhow::Result<Shrinkage> {
    let value = s
        .parse::<f64>()
        .with_context(|| format!("invalid number: {s}"))?;
    Ok(Shrinkage::new(value)?)
}

impl AnalyzeArg {
    fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = util::load_config(self.config.as_deref())?;
        if let Some(shrinkage) = self.shrinkage {
            config.shrinkage = shrinkage;
        }
        if let Some(policy) = self.unknown_direction {
            config.unknown_direction = policy.into();
        }
        Ok(config)
    }

    fn hands(&self) -> BTreeSet<Hand> {
        self.hand.iter().copied().collect()
    }
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = arg.analysis_config()?;
    let hands = arg.hands();
    let patients = patient_dirs(&arg.data_dir)?;
    if patients.is_empty() {
        anyhow::bail!(
            "No patient subdirectories found in {}",
            arg.data_dir.display()
        );
    }
    fs::create_dir_all(&arg.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            arg.output_dir.display()
        )
    })?;

    tracing::info!(
        patients = patients.len(),
        baseline = %arg.baseline,
        shrinkage = config.shrinkage.get(),
        "starting analysis"
    );

    let mut group = GroupResponsiveness::default();
    let mut processed = 0;
    for (patient, data_dir) in &patients {
        let patient = patient.as_str();
        let output_dir = arg.output_dir.join(patient);
        if output_dir.is_dir() && !arg.overwrite {
            tracing::info!(
                patient,
                "output folder exists, skipped (use --overwrite to re-process)"
            );
            continue;
        }

        match process_patient(patient, data_dir, &output_dir, arg, &hands, &config) {
            Ok(Some(report)) => {
                for analysis in &report.hands {
                    group.add(analysis);
                }
                processed += 1;
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(patient, error = %format!("{err:#}"), "patient failed, skipped");
            }
        }
    }

    for &hand in &hands {
        let rows = group.rows(hand);
        if rows.is_empty() {
            continue;
        }
        println!();
        report::print_group(hand, &rows, &config.parameter_names);
        let path = arg
            .output_dir
            .join(format!("group_responsiveness_{}.csv", hand.file_tag()));
        export::write_group_rows(&path, &rows)?;
    }

    tracing::info!(processed, "analysis complete");
    Ok(())
}

/// Patient subdirectories of `data_dir`, sorted by name.
fn patient_dirs(data_dir: &Path) -> anyhow::Result<Vec<(String, PathBuf)>> {
    let mut patients = Vec::new();
    for entry in fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read data directory: {}", data_dir.display()))?
    {
        let entry = entry.with_context(|| {
            format!("Failed to read directory entry in {}", data_dir.display())
        })?;
        let path = entry.path();
        if path.is_dir() {
            patients.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    patients.sort();
    Ok(patients)
}

/// Analyzes one patient and writes its output folder.
///
/// Returns `None` when the patient was skipped for lack of data.
fn process_patient(
    patient: &str,
    data_dir: &Path,
    output_dir: &Path,
    arg: &AnalyzeArg,
    hands: &BTreeSet<Hand>,
    config: &AnalysisConfig,
) -> anyhow::Result<Option<PatientReport>> {
    if output_dir.is_dir() {
        fs::remove_dir_all(output_dir).with_context(|| {
            format!("Failed to remove output folder: {}", output_dir.display())
        })?;
    }

    let Some(report) = analyze_patient(patient, data_dir, &arg.baseline, hands, config)? else {
        return Ok(None);
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output folder: {}", output_dir.display()))?;
    for analysis in &report.hands {
        export::write_hand_exports(output_dir, analysis)?;
    }
    util::write_json_file("patient report", output_dir.join(REPORT_FILE), &report)?;
    Ok(Some(report))
}

/// Runs every requested hand for one patient.
///
/// Returns `None` when the patient has no usable data or lacks the baseline.
fn analyze_patient(
    patient: &str,
    data_dir: &Path,
    baseline: &str,
    hands: &BTreeSet<Hand>,
    config: &AnalysisConfig,
) -> anyhow::Result<Option<PatientReport>> {
    let trials = loader::load_patient_dir(data_dir, &config.parameter_names)?;
    if trials.is_empty() {
        tracing::warn!(patient, "no valid trial CSV files, skipped");
        return Ok(None);
    }
    if !trials.conditions().any(|condition| condition == baseline) {
        tracing::warn!(patient, baseline, "baseline condition not found, skipped");
        return Ok(None);
    }

    println!();
    println!("=== Patient {patient} ===");
    let analyses = hands
        .iter()
        .map(|&hand| {
            let analysis = analyze_hand(&trials, hand, baseline, config);
            report::print_hand(&analysis, &config.parameter_names);
            analysis
        })
        .collect();

    let report = PatientReport::new(patient, baseline, config, analyses);
    if let Some(congruence) = report.left_right_congruence {
        tracing::info!(patient, congruence, "left/right weight congruence");
    }
    Ok(Some(report))
}
