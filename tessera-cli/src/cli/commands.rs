//! Command implementations and argument parsing for the tessera CLI.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tessera_core::{
    AnalysisResult, ContactAnalyzerBuilder, ContactError, ContactGraph, ContactMatrix,
    DEFAULT_TOLERANCE, ExecutionStrategy, GeometryErrorCode, GeometryProvider, Layout,
    LayoutPolicy, MatrixStats, ValidationError, analyze, import_csv, write_csv,
};
use tessera_providers_primitives::{AssemblyError, PrimitiveAssembly};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::self_test::{SelfTestReport, run_self_test};

/// Assembly analysed when no subcommand is given.
pub const DEMO_ASSEMBLY: &str = include_str!("../../assets/demo.assembly");

const DEMO_NAME: &str = "demo";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "tessera",
    version,
    about = "Find which parts of an assembly touch and analyse the contact graph."
)]
pub struct Cli {
    /// Command to execute; analyses the bundled demo assembly when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute and analyse the contact matrix of an assembly.
    Analyze(AnalyzeCommand),
    /// Run the built-in scenario checks.
    Test,
}

/// Options accepted by the `analyze` command.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeCommand {
    /// Assembly description, or a `.csv` contact matrix exported earlier.
    pub path: PathBuf,

    /// Largest separation still counted as contact.
    #[arg(default_value_t = DEFAULT_TOLERANCE, allow_negative_numbers = true)]
    pub tolerance: f64,

    /// Write the contact matrix as CSV to this path.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Upper bound on worker threads for distance queries.
    #[arg(long)]
    pub workers: Option<usize>,

    /// How distance queries are scheduled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,
}

impl AnalyzeCommand {
    /// Creates a command for `path` with default options.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tolerance: DEFAULT_TOLERANCE,
            export: None,
            workers: None,
            strategy: StrategyArg::Auto,
        }
    }
}

/// Command-line spelling of [`ExecutionStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel once the assembly is large enough.
    Auto,
    /// Always on the calling thread.
    Sequential,
    /// Always on the worker pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The assembly description could not be loaded.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    /// Configuring or computing the contact matrix failed.
    #[error(transparent)]
    Contact(#[from] ContactError),
    /// An imported contact matrix was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// At least one self-test check failed.
    #[error("{failed} of {total} self-test checks failed")]
    SelfTestFailed {
        /// Number of failing checks.
        failed: usize,
        /// Number of checks run.
        total: usize,
    },
}

impl CliError {
    /// Returns the stable code of the underlying failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CLI_IO",
            Self::Assembly(error) => error.code().as_str(),
            Self::Contact(error) => error.code().as_str(),
            Self::Validation(error) => error.code().as_str(),
            Self::SelfTestFailed { .. } => "CLI_SELF_TEST_FAILED",
        }
    }

    /// Returns the provider's code when a geometry query caused the failure.
    #[must_use]
    pub const fn geometry_code(&self) -> Option<GeometryErrorCode> {
        match self {
            Self::Contact(error) => error.geometry_code(),
            _ => None,
        }
    }
}

/// Everything the summary reports about one analysed assembly.
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    /// Name of the assembly or imported matrix.
    pub assembly: String,
    /// Tolerance used, `None` when the matrix was imported.
    pub tolerance: Option<f64>,
    /// The contact matrix.
    pub matrix: ContactMatrix,
    /// Centralities and structural features of the contact graph.
    pub analysis: AnalysisResult,
    /// Layout recommended for drawing the graph.
    pub layout: Layout,
}

impl AnalysisSummary {
    /// Analyses `matrix` and selects a layout with the default policy.
    #[must_use]
    pub fn from_matrix(
        assembly: impl Into<String>,
        tolerance: Option<f64>,
        matrix: ContactMatrix,
    ) -> Self {
        let graph = ContactGraph::from_matrix(&matrix);
        let analysis = analyze(&graph);
        let layout = LayoutPolicy::default().select(graph.node_count(), graph.density());
        Self {
            assembly: assembly.into(),
            tolerance,
            matrix,
            analysis,
            layout,
        }
    }
}

/// Outcome of a successful command.
#[derive(Debug, Clone)]
pub enum CliOutput {
    /// Summary of an analysed assembly.
    Analysis(Box<AnalysisSummary>),
    /// Results of the built-in checks.
    SelfTest(SelfTestReport),
}

impl CliOutput {
    /// Writes the human-readable report.
    ///
    /// # Errors
    /// Returns [`io::Error`] if writing fails.
    pub fn render(&self, writer: impl Write) -> io::Result<()> {
        match self {
            Self::Analysis(summary) => render_summary(summary, writer),
            Self::SelfTest(report) => report.render(writer),
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, computing or exporting fails.
///
/// # Examples
/// ```
/// use tessera_cli::cli::{Cli, CliOutput, run_cli};
///
/// let output = run_cli(Cli { command: None })?;
/// let CliOutput::Analysis(summary) = output else {
///     panic!("no subcommand analyses the demo");
/// };
/// assert_eq!(summary.assembly, "demo");
/// assert_eq!(summary.matrix.size(), 7);
/// # Ok::<(), tessera_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CliOutput, CliError> {
    let span = Span::current();
    match cli.command {
        None => {
            span.record("command", "demo");
            run_demo().map(|summary| CliOutput::Analysis(Box::new(summary)))
        }
        Some(Command::Analyze(command)) => {
            span.record("command", "analyze");
            run_analyze(command).map(|summary| CliOutput::Analysis(Box::new(summary)))
        }
        Some(Command::Test) => {
            span.record("command", "test");
            Ok(CliOutput::SelfTest(run_self_test()))
        }
    }
}

pub(super) fn run_demo() -> Result<AnalysisSummary, CliError> {
    let assembly = PrimitiveAssembly::try_from_reader(DEMO_NAME, DEMO_ASSEMBLY.as_bytes())?;
    let analyzer = ContactAnalyzerBuilder::new().build()?;
    let matrix = analyzer.compute(&assembly)?;
    Ok(summarise(assembly.name(), Some(analyzer.tolerance()), matrix))
}

#[instrument(
    name = "cli.analyze",
    err,
    skip(command),
    fields(path = %command.path.display(), source = field::Empty),
)]
pub(super) fn run_analyze(command: AnalyzeCommand) -> Result<AnalysisSummary, CliError> {
    let span = Span::current();
    let summary = if is_csv(&command.path) {
        span.record("source", "csv");
        let text = fs::read_to_string(&command.path).map_err(|source| CliError::Io {
            path: command.path.clone(),
            source,
        })?;
        let matrix = import_csv(&text)?;
        summarise(&derive_assembly_name(&command.path), None, matrix)
    } else {
        span.record("source", "assembly");
        let mut builder = ContactAnalyzerBuilder::new()
            .with_tolerance(command.tolerance)
            .with_execution_strategy(command.strategy.into());
        if let Some(workers) = command.workers {
            builder = builder.with_max_workers(workers);
        }
        let analyzer = builder.build()?;
        let assembly = PrimitiveAssembly::try_from_path(&command.path)?;
        let matrix = analyzer.compute(&assembly)?;
        summarise(assembly.name(), Some(analyzer.tolerance()), matrix)
    };
    if let Some(path) = &command.export {
        export_matrix(&summary.matrix, path)?;
    }
    Ok(summary)
}

fn summarise(assembly: &str, tolerance: Option<f64>, matrix: ContactMatrix) -> AnalysisSummary {
    let summary = AnalysisSummary::from_matrix(assembly, tolerance, matrix);
    info!(
        assembly,
        parts = summary.matrix.size(),
        contacts = summary.matrix.contact_count(),
        bridges = summary.analysis.bridges().len(),
        components = summary.analysis.components().len(),
        layout = summary.layout.as_str(),
        "analysis completed"
    );
    summary
}

fn export_matrix(matrix: &ContactMatrix, path: &Path) -> Result<(), CliError> {
    let to_io = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(to_io)?);
    write_csv(matrix, &mut writer).map_err(to_io)?;
    writer.flush().map_err(to_io)?;
    info!(path = %path.display(), "contact matrix exported");
    Ok(())
}

pub(super) fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"))
}

pub(super) fn derive_assembly_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "matrix".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` as a plain-text report.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use tessera_cli::cli::{AnalysisSummary, render_summary};
/// use tessera_core::ContactMatrix;
///
/// let matrix = ContactMatrix::try_new(
///     vec!["A".into(), "B".into()],
///     vec![vec![1, 1], vec![1, 1]],
/// )?;
/// let summary = AnalysisSummary::from_matrix("pair", Some(0.001), matrix);
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.starts_with("assembly: pair\n"));
/// assert!(text.contains("layout: force-directed"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &AnalysisSummary, mut writer: impl Write) -> io::Result<()> {
    let matrix = &summary.matrix;
    let names = matrix.names();
    let stats = matrix.stats();

    writeln!(writer, "assembly: {}", summary.assembly)?;
    writeln!(writer, "parts: {}", stats.part_count)?;
    match summary.tolerance {
        Some(tolerance) => writeln!(writer, "tolerance: {tolerance}")?,
        None => writeln!(writer, "tolerance: n/a (imported matrix)")?,
    }
    writeln!(writer, "contacts: {}", stats.contact_count)?;
    writeln!(writer, "density: {:.3}", stats.density)?;
    render_connection_stats(&stats, &mut writer)?;

    writeln!(writer)?;
    writeln!(writer, "matrix:")?;
    render_matrix(matrix, &mut writer)?;

    writeln!(writer)?;
    writeln!(writer, "connections:")?;
    for (name, row) in names.iter().zip(matrix.rows()) {
        let touching: Vec<&str> = names
            .iter()
            .zip(row)
            .filter(|&(other, value)| *value == 1 && other != name)
            .map(|(other, _)| other.as_str())
            .collect();
        if touching.is_empty() {
            writeln!(writer, "  {name}: none")?;
        } else {
            writeln!(writer, "  {name}: {}", touching.join(", "))?;
        }
    }

    writeln!(writer)?;
    render_centrality(summary, &mut writer)?;

    writeln!(writer)?;
    writeln!(writer, "bridges:")?;
    if summary.analysis.bridges().is_empty() {
        writeln!(writer, "  none")?;
    }
    for edge in summary.analysis.bridges() {
        let (left, right) = edge.endpoints();
        writeln!(writer, "  {} - {}", label(names, left), label(names, right))?;
    }

    writeln!(writer, "components:")?;
    for (index, component) in summary.analysis.components().iter().enumerate() {
        writeln!(writer, "  {}: {}", index + 1, joined(names, component))?;
    }

    let isolated = summary.analysis.isolated();
    if isolated.is_empty() {
        writeln!(writer, "isolated: none")?;
    } else {
        writeln!(writer, "isolated: {}", joined(names, isolated))?;
    }

    writeln!(writer)?;
    writeln!(writer, "layout: {}", summary.layout)?;
    Ok(())
}

fn render_connection_stats(stats: &MatrixStats, writer: &mut impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "connections per part: min {}, max {}, mean {:.2}",
        stats.min_connections, stats.max_connections, stats.mean_connections
    )
}

fn render_matrix(matrix: &ContactMatrix, writer: &mut impl Write) -> io::Result<()> {
    let names = matrix.names();
    let width = names.iter().map(|name| name.chars().count()).max().unwrap_or(0);
    write!(writer, "  {:width$}", "")?;
    for name in names {
        write!(writer, " {name:>width$}")?;
    }
    writeln!(writer)?;
    for (name, row) in names.iter().zip(matrix.rows()) {
        write!(writer, "  {name:<width$}")?;
        for value in row {
            write!(writer, " {value:>width$}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn render_centrality(summary: &AnalysisSummary, writer: &mut impl Write) -> io::Result<()> {
    let names = summary.matrix.names();
    let width = names
        .iter()
        .map(|name| name.chars().count())
        .chain(std::iter::once("part".len()))
        .max()
        .unwrap_or(0);
    writeln!(writer, "centrality:")?;
    writeln!(
        writer,
        "  {:<width$}  {:>8}  {:>11}  {:>9}",
        "part", "degree", "betweenness", "closeness"
    )?;
    for (index, name) in names.iter().enumerate() {
        if let Some(scores) = summary.analysis.centrality(index) {
            writeln!(
                writer,
                "  {name:<width$}  {:>8.3}  {:>11.3}  {:>9.3}",
                scores.degree, scores.betweenness, scores.closeness
            )?;
        }
    }
    Ok(())
}

fn label(names: &[String], index: usize) -> &str {
    names.get(index).map_or("?", String::as_str)
}

fn joined(names: &[String], indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&index| label(names, index))
        .collect::<Vec<_>>()
        .join(", ")
}
