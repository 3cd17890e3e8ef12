//! Command-line interface for the mstree pipeline.
//!
//! `run` loads a graph description from a JSON or sectioned text file, runs
//! the MST-to-tree pipeline and reports the result as JSON.

mod commands;

pub use commands::{
    Cli, CliError, Command, DisconnectedArg, ExecutionSummary, InputFormat, RunCommand,
    SelfLoopArg, load_input, render_summary, run_cli,
};
