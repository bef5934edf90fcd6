//! CSV exports written next to each patient report.

use std::path::{Path, PathBuf};

use anyhow::Context;
use kinerank_analysis::{pipeline::HandAnalysis, ranking::Ranking, series::NamedSeries};

use crate::report::GroupRow;

fn create_writer(path: &Path) -> anyhow::Result<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))
}

/// Writes a `Parameter,Value` table.
pub fn write_series(path: &Path, series: &NamedSeries) -> anyhow::Result<()> {
    let mut writer = create_writer(path)?;
    let write = |writer: &mut csv::Writer<_>| -> csv::Result<()> {
        writer.write_record(["Parameter", "Value"])?;
        for row in series.iter() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    };
    write(&mut writer).with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

/// Writes a `Rank,Condition,Score` table; ranks start at 1 and an undefined
/// score is left empty.
pub fn write_ranking(path: &Path, ranking: &Ranking) -> anyhow::Result<()> {
    let mut writer = create_writer(path)?;
    let write = |writer: &mut csv::Writer<_>| -> csv::Result<()> {
        writer.write_record(["Rank", "Condition", "Score"])?;
        for (index, entry) in ranking.entries().iter().enumerate() {
            writer.serialize((index + 1, &entry.condition, entry.score))?;
        }
        writer.flush()?;
        Ok(())
    };
    write(&mut writer).with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

/// Writes a `Parameter,Patients,Mean,Sem` table. An undefined SEM is left empty.
pub fn write_group_rows(path: &Path, rows: &[GroupRow]) -> anyhow::Result<()> {
    let mut writer = create_writer(path)?;
    let write = |writer: &mut csv::Writer<_>| -> csv::Result<()> {
        writer.write_record(["Parameter", "Patients", "Mean", "Sem"])?;
        for row in rows {
            writer.serialize((&row.parameter, row.patients, row.mean, row.sem))?;
        }
        writer.flush()?;
        Ok(())
    };
    write(&mut writer).with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

/// Writes every per-hand table that `analysis` has data for into `dir`.
///
/// Returns the written paths.
pub fn write_hand_exports(dir: &Path, analysis: &HandAnalysis) -> anyhow::Result<Vec<PathBuf>> {
    let tag = analysis.hand.file_tag();
    let mut written = Vec::new();

    if !analysis.responsiveness.is_empty() {
        let path = dir.join(format!("responsiveness_scores_{tag}.csv"));
        write_series(&path, &analysis.responsiveness)?;
        written.push(path);
    }
    if let (Some(baseline), Some(effect)) = (analysis.baseline_values(), analysis.optimal_effect())
    {
        let path = dir.join(format!("baseline_values_{tag}.csv"));
        write_series(&path, &baseline)?;
        written.push(path);

        let path = dir.join(format!("optimal_effect_vs_baseline_{tag}.csv"));
        write_series(&path, &effect)?;
        written.push(path);
    }
    if !analysis.ranking.is_empty() {
        let path = dir.join(format!("ranking_{tag}.csv"));
        write_ranking(&path, &analysis.ranking)?;
        written.push(path);
    }

    tracing::debug!(hand = %analysis.hand, files = written.len(), "wrote exports");
    Ok(written)
}
