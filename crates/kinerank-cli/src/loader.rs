//! Trial CSV loading
//!
//! A patient directory holds one CSV file per recorded trial. The file name
//! encodes the condition and hand (for example
//! `P01_Med_Off_DBS_On_Pr2_left_trial1.csv`) and the file body is a long-form
//! table with `Attribute` and `Value` columns.

use std::{
    ffi::OsStr,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::Context;
use csv::{ReaderBuilder, Trim};
use kinerank_analysis::{
    condition::Hand,
    measurement::{RawMeasurement, TrialSet},
    parameter::ParameterNames,
};
use regex::Regex;

static MEDICATION_ON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)med[_\s]*on").unwrap());
static STIMULATION_ON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)dbs[_\s]*on").unwrap());
static PROGRAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Pr\d+|Level[_\s]?\d+)").unwrap());
static LEFT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)left").unwrap());
static RIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)right").unwrap());

/// Condition and hand encoded in a trial file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialFile {
    pub condition: String,
    pub hand: Hand,
}

/// Parses the condition and hand out of a trial file name.
///
/// Medication and stimulation default to "Off" unless the name says "on".
/// A program (`Pr3`) or level (`Level_2`) tag becomes a third segment.
/// Returns `None` when the name mentions neither hand.
pub fn parse_trial_file_name(file_name: &str) -> Option<TrialFile> {
    let hand = if LEFT.is_match(file_name) {
        Hand::Left
    } else if RIGHT.is_match(file_name) {
        Hand::Right
    } else {
        return None;
    };

    let medication = if MEDICATION_ON.is_match(file_name) {
        "Med On"
    } else {
        "Med Off"
    };
    let stimulation = if STIMULATION_ON.is_match(file_name) {
        "DBS On"
    } else {
        "DBS Off"
    };
    let mut condition = format!("{medication} - {stimulation}");
    if let Some(program) = PROGRAM.captures(file_name) {
        condition.push_str(" - ");
        condition.push_str(program[1].replace('_', " ").trim());
    }

    Some(TrialFile { condition, hand })
}

/// Reads one trial from an `Attribute`/`Value` CSV.
///
/// Returns `Ok(None)` if either column is missing. Attribute names are
/// normalized through `names`; values are kept as text.
pub fn read_trial<R>(reader: R, names: &ParameterNames) -> anyhow::Result<Option<RawMeasurement>>
where
    R: io::Read,
{
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV header")?;
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (Some(attribute), Some(value)) = (column("Attribute"), column("Value")) else {
        return Ok(None);
    };

    let mut trial = RawMeasurement::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        let Some(name) = record.get(attribute).filter(|name| !name.is_empty()) else {
            continue;
        };
        trial.push(names.canonical(name), record.get(value).unwrap_or_default());
    }
    Ok(Some(trial))
}

fn read_trial_file(path: &Path, names: &ParameterNames) -> anyhow::Result<Option<RawMeasurement>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open trial file: {}", path.display()))?;
    read_trial(io::BufReader::new(file), names)
        .with_context(|| format!("Failed to parse trial file: {}", path.display()))
}

fn csv_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("Failed to read directory entry in {}", dir.display()))?
            .path();
        let is_csv = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Loads every trial CSV in a patient directory.
///
/// Files whose name has no hand, that lack the `Attribute`/`Value` columns, or
/// that cannot be parsed are skipped with a log record.
pub fn load_patient_dir(dir: &Path, names: &ParameterNames) -> anyhow::Result<TrialSet> {
    let paths = csv_files(dir)?;
    let mut trials = TrialSet::new();
    let mut loaded = 0;

    for path in &paths {
        let Some(file_name) = path.file_name().and_then(OsStr::to_str) else {
            continue;
        };
        let Some(TrialFile { condition, hand }) = parse_trial_file_name(file_name) else {
            tracing::debug!(file_name, "no hand in file name, skipped");
            continue;
        };
        match read_trial_file(path, names) {
            Ok(Some(trial)) => {
                trials.push(condition, hand, trial);
                loaded += 1;
            }
            Ok(None) => {
                tracing::warn!(file_name, "no Attribute/Value columns, skipped");
            }
            Err(err) => {
                tracing::warn!(
                    file_name,
                    error = %format!("{err:#}"),
                    "skipped unreadable trial file"
                );
            }
        }
    }

    tracing::info!(
        dir = %dir.display(),
        csv_files = paths.len(),
        loaded,
        conditions = trials.conditions().count(),
        "loaded patient trials"
    );
    Ok(trials)
}
