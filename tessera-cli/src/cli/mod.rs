//! Command-line interface orchestration for tessera.
//!
//! `analyze` loads an assembly description (or a previously exported CSV
//! matrix), computes the contact matrix and prints the analysis; `test` runs
//! the built-in scenario checks. Without a subcommand the bundled demo
//! assembly is analysed.

mod commands;

pub use commands::{
    AnalysisSummary, AnalyzeCommand, Cli, CliError, CliOutput, Command, DEMO_ASSEMBLY,
    StrategyArg, render_summary, run_cli,
};
pub use self_test::{CheckOutcome, SelfTestReport, run_self_test};

#[cfg(test)]
mod test_helpers;
