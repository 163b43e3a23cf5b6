//! CLI module for the grammar synchronizer
//!
//! ## Commands
//!
//! - `sync [--check]` - Rewrite the grammar from the taxonomy (default when no subcommand is given)
//! - `lint` - Structural checks on the grammar
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use miette::Diagnostic;

use crate::config::{DEFAULT_GRAMMAR, DEFAULT_SCOPE_NAME, DEFAULT_SYNTAX_DATA, SYNTAX_DATA_ENV, SyncConfig};
use crate::errors::SyncError;
use crate::version::HEW_GRAMMAR_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<SyncError> for CliError {
    /// `Error: <message>` followed by the diagnostic's help line, if any.
    fn from(err: SyncError) -> Self {
        let mut message = format!("Error: {err}");
        if let Some(help) = err.help() {
            message.push('\n');
            message.push_str(&help.to_string());
        }
        CliError::failure(message)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Keep the Hew TextMate grammar in sync with the compiler's keyword taxonomy
#[derive(Parser, Debug)]
#[command(name = "hew-grammar")]
#[command(version = HEW_GRAMMAR_VERSION)]
#[command(about = "Keep the Hew TextMate grammar in sync with syntax-data.json", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the compiler's syntax-data.json
    #[arg(long, global = true, value_name = "PATH", env = SYNTAX_DATA_ENV, default_value = DEFAULT_SYNTAX_DATA)]
    pub syntax_data: PathBuf,

    /// Path to the TextMate grammar to update
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_GRAMMAR)]
    pub grammar: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Update the grammar from syntax-data.json
    Sync {
        /// Report what would change without writing; exit 1 if anything would
        #[arg(long)]
        check: bool,
    },

    /// Check the grammar's structure
    Lint {
        /// Expected top-level scopeName
        #[arg(long, value_name = "SCOPE", default_value = DEFAULT_SCOPE_NAME)]
        scope_name: String,
    },
}

impl Cli {
    /// Config for this invocation.
    pub fn config(&self) -> SyncConfig {
        let config = SyncConfig::new()
            .with_syntax_data(&self.syntax_data)
            .with_grammar(&self.grammar);
        match &self.command {
            Some(Command::Sync { check }) => config.with_check(*check),
            Some(Command::Lint { scope_name }) => config.with_expected_scope_name(scope_name.as_str()),
            None => config,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.config();
    match cli.command {
        Some(Command::Lint { .. }) => commands::lint_grammar(&config),
        Some(Command::Sync { .. }) | None => commands::sync_grammar(&config),
    }
}

// ============================================================================
// Tests
// ============================================================================
