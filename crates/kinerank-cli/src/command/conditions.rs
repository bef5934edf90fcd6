//! Condition listing command
//!
//! Shows which conditions a patient directory contains, in report order, so
//! a baseline can be picked before running `analyze`.

use std::path::PathBuf;

use clap::Args;
use kinerank_analysis::{
    condition::{Hand, domain_order},
    measurement::TrialSet,
};

use crate::{loader, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct ConditionsArg {
    /// Directory holding one patient's trial CSV files
    pub patient_dir: PathBuf,

    /// JSON analysis configuration (for parameter name aliases)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub(crate) fn run(arg: &ConditionsArg) -> anyhow::Result<()> {
    let config = util::load_config(arg.config.as_deref())?;
    let trials = loader::load_patient_dir(&arg.patient_dir, &config.parameter_names)?;
    if trials.is_empty() {
        anyhow::bail!("No trial CSV files found in {}", arg.patient_dir.display());
    }

    println!("{:<32} {:>6} {:>6}", "Condition", Hand::Left, Hand::Right);
    for (condition, [left, right]) in condition_table(&trials) {
        println!("{condition:<32} {left:>6} {right:>6}");
    }
    Ok(())
}

/// Conditions in domain order with their trial counts per hand.
fn condition_table(trials: &TrialSet) -> Vec<(&str, [usize; 2])> {
    let mut conditions = trials.conditions().collect::<Vec<_>>();
    conditions.sort_by(|a, b| domain_order(a, b));
    conditions
        .into_iter()
        .map(|condition| {
            let counts = Hand::ALL.map(|hand| trials.trials(condition, hand).len());
            (condition, counts)
        })
        .collect()
}
