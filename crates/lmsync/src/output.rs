//! Output formatting: plain, JSON, YAML.
//!
//! Renders a reconciliation outcome in the format selected by
//! `--output`. Plain is a one-line summary for humans; the structured
//! formats serialize the outcome verbatim for scripting.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;

use lmsync_core::Outcome;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Render one outcome in the chosen format.
pub fn render_outcome(
    format: &OutputFormat,
    color: &ColorMode,
    outcome: &Outcome,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Plain => Ok(render_plain(outcome, should_color(color))),
        OutputFormat::Json => {
            serde_json::to_string_pretty(outcome).map_err(|e| CliError::Output(e.to_string()))
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(outcome).map_err(|e| CliError::Output(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(outcome).map_err(|e| CliError::Output(e.to_string()))
        }
    }
}

fn render_plain(outcome: &Outcome, color: bool) -> String {
    let word = if outcome.changed { "changed" } else { "unchanged" };
    let word = if color {
        if outcome.changed {
            word.yellow().to_string()
        } else {
            word.green().to_string()
        }
    } else {
        word.to_owned()
    };

    match &outcome.message {
        Some(msg) => format!("{word}: {msg}"),
        None => word,
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
