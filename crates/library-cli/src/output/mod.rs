//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying snippets
//! in various formats (JSON, table, plain text).

mod json;
mod text;

use std::io::IsTerminal;

use owo_colors::OwoColorize;

// Re-export public API
pub use json::{item_json, items_json};
pub use text::{print_item, print_item_list};

/// Terminal context for output decisions.
#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Bordered tables and labels instead of pipe-separated lines
    pub pretty: bool,
}

impl UiContext {
    /// Detect from stdout and the NO_COLOR / TERM environment.
    pub fn from_env() -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            color: is_tty && !no_color_env && !term_is_dumb,
            pretty: is_tty && !term_is_dumb,
        }
    }
}

/// Print an error to stderr, red when stderr is a terminal.
pub fn print_error(err: &anyhow::Error) {
    let color = std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err();
    let label = if color {
        "Error:".red().bold().to_string()
    } else {
        "Error:".to_string()
    };
    eprintln!("{} {}", label, err);
}

/// Print a warning to stderr unless quiet.
pub fn print_warning(message: &str, quiet: bool) {
    if quiet {
        return;
    }
    let color = std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err();
    let label = if color {
        "Warning:".yellow().to_string()
    } else {
        "Warning:".to_string()
    };
    eprintln!("{} {}", label, message);
}
