use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, conditions::ConditionsArg};

mod analyze;
mod conditions;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rank stimulation conditions for every patient in a data directory
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// List the conditions and hands recorded for one patient
    Conditions(#[clap(flatten)] ConditionsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Conditions(arg) => conditions::run(&arg)?,
    }
    Ok(())
}
