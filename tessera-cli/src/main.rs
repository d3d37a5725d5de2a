//! CLI entry point for tessera.
//!
//! Parses arguments with clap, runs the requested command, renders its report
//! to stdout and maps failures to a non-zero exit code. Logging is set up
//! first so every later stage can emit structured diagnostics.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tessera_cli::{
    cli::{Cli, CliError, CliOutput, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse arguments, run the command, render its report and flush stdout.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let output = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    output.render(&mut writer).context("failed to render report")?;
    writer.flush().context("failed to flush output")?;
    if let CliOutput::SelfTest(report) = &output
        && !report.passed()
    {
        return Err(CliError::SelfTestFailed {
            failed: report.failures(),
            total: report.outcomes().len(),
        }
        .into());
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, geometry_code) = err
            .downcast_ref::<CliError>()
            .map_or((None, None), |cli_error| {
                (Some(cli_error.code()), cli_error.geometry_code())
            });

        let message = format!("{err:#}");
        error!(
            error = %message,
            code = code.map(field::display),
            geometry_code = geometry_code.map(|code| field::display(code.as_str())),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
