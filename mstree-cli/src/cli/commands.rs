//! Command implementations and argument parsing for the mstree CLI.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use mstree_core::{
    DisconnectedPolicy, GraphInput, MstreeError, PipelineBuilder, PipelineReport, RawForm,
    SelfLoopPolicy,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "mstree",
    about = "Shape the minimum spanning tree of a weighted graph into a binary tree."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the pipeline over a graph description file.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Graph description to read.
    pub path: PathBuf,

    /// Layout of the input file.
    #[arg(long, value_enum, default_value_t = InputFormat::Json)]
    pub format: InputFormat,

    /// Tree root; defaults to the first declared node.
    #[arg(long)]
    pub root: Option<String>,

    /// Value to search for in the shaped tree.
    #[arg(long)]
    pub find: Option<String>,

    /// Meaning of incidence columns with a single marked node.
    #[arg(long = "self-loops", value_enum, default_value_t = SelfLoopArg::Synthesize)]
    pub self_loops: SelfLoopArg,

    /// Behaviour when the graph has several components.
    #[arg(long, value_enum, default_value_t = DisconnectedArg::Partial)]
    pub disconnected: DisconnectedArg,

    /// Indent the JSON report.
    #[arg(long)]
    pub pretty: bool,
}

/// Input file layouts.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum InputFormat {
    /// A camelCase `GraphInput` JSON object.
    Json,
    /// `[nodes]`, `[edges]`, `[incidence]`, `[weights]` and optional
    /// `[adjacency]` sections of free text.
    Sections,
}

impl InputFormat {
    fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Sections => "sections",
        }
    }
}

/// `--self-loops` values.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum SelfLoopArg {
    /// Turn the column into a self-loop on the marked node.
    Synthesize,
    /// Drop the column.
    Omit,
}

impl From<SelfLoopArg> for SelfLoopPolicy {
    fn from(value: SelfLoopArg) -> Self {
        match value {
            SelfLoopArg::Synthesize => Self::Synthesize,
            SelfLoopArg::Omit => Self::Omit,
        }
    }
}

/// `--disconnected` values.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum DisconnectedArg {
    /// Shape only the root's component.
    Partial,
    /// Fail the run.
    Reject,
}

impl From<DisconnectedArg> for DisconnectedPolicy {
    fn from(value: DisconnectedArg) -> Self {
        match value {
            DisconnectedArg::Partial => Self::Partial,
            DisconnectedArg::Reject => Self::Reject,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the input file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input file was not a valid JSON graph description.
    #[error("`{path}` is not a valid JSON graph description: {source}")]
    Json {
        /// Path of the rejected file.
        path: PathBuf,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// The pipeline rejected the input.
    #[error(transparent)]
    Core(#[from] MstreeError),
}

/// Outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Output contract produced by the pipeline.
    pub report: PipelineReport,
    /// Whether the report is rendered indented.
    pub pretty: bool,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the input cannot be read or decoded, or when
/// the pipeline rejects it.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use mstree_cli::cli::{
/// #     Cli, Command, DisconnectedArg, InputFormat, RunCommand, SelfLoopArg, run_cli,
/// # };
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     "[nodes]\n1 2\n[edges]\nA\n[incidence]\n1\n1\n[weights]\nA 4\n",
/// )?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path: file.path().to_path_buf(),
///         format: InputFormat::Sections,
///         root: None,
///         find: None,
///         self_loops: SelfLoopArg::Synthesize,
///         disconnected: DisconnectedArg::Partial,
///         pretty: false,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.report.in_order, ["1", "2"]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(path = field::Empty, format = field::Empty, find = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));
    span.record("format", command.format.label());
    if let Some(query) = &command.find {
        span.record("find", field::display(query));
    }

    let input = load_input(&command.path, command.format)?;
    let mut builder = PipelineBuilder::new()
        .with_self_loops(command.self_loops.into())
        .with_disconnected(command.disconnected.into());
    if let Some(root) = command.root {
        builder = builder.with_root(root);
    }
    let output = builder.build().run(&input)?;
    let report = output.report(command.find.as_deref());

    info!(
        root = report.root.as_str(),
        mst_edges = report.mst_edges.len(),
        found = report.search.as_ref().map(|search| search.is_found()),
        "command completed"
    );
    Ok(ExecutionSummary {
        report,
        pretty: command.pretty,
    })
}

/// Reads and decodes the graph description at `path`.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be read,
/// [`CliError::Json`] for invalid JSON, and [`CliError::Core`] for
/// malformed sectioned text.
#[instrument(name = "cli.load_input", err, fields(path = field::Empty))]
pub fn load_input(path: &Path, format: InputFormat) -> Result<GraphInput, CliError> {
    Span::current().record("path", field::display(path.display()));
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match format {
        InputFormat::Json => serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        }),
        InputFormat::Sections => Ok(RawForm::from_sections(&text)?.parse()?),
    }
}

/// Writes the report in `summary` to `writer` as JSON followed by a
/// newline.
///
/// # Errors
/// Returns [`io::Error`] if serialization or writing fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    if summary.pretty {
        serde_json::to_writer_pretty(&mut writer, &summary.report)?;
    } else {
        serde_json::to_writer(&mut writer, &summary.report)?;
    }
    writeln!(writer)
}
