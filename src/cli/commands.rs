//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//! The `run_*` variants take an explicit writer so tests can capture the report.

use std::io::{self, Write};

use hew_vocab::scopes::HEW;

use crate::config::SyncConfig;
use crate::errors::{InputKind, SyncError};
use crate::grammar::{self, lint};
use crate::sync::synchronize;
use crate::taxonomy::load_taxonomy;

use super::{CliError, CliResult, ExitCode};

/// Run `sync` against stdout.
pub fn sync_grammar(config: &SyncConfig) -> CliResult<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_sync(config, &mut out)
}

/// Load both inputs, synchronize, write the grammar back (unless checking) and print the report.
///
/// ## Returns
/// - `Ok(ExitCode::SUCCESS)` after a normal run, even when coverage warnings were printed.
/// - `Err` with exit code 1 for any load or write error, and in check mode when the grammar is out of date.
#[tracing::instrument(skip_all, fields(check = config.check))]
pub fn run_sync(config: &SyncConfig, out: &mut impl Write) -> CliResult<ExitCode> {
    if !config.syntax_data.exists() {
        return Err(SyncError::missing_input(InputKind::Taxonomy, &config.syntax_data).into());
    }
    if !config.grammar.exists() {
        return Err(SyncError::missing_input(InputKind::Grammar, &config.grammar).into());
    }

    let target_label = if config.check {
        "Checking grammar at:     "
    } else {
        "Updating grammar at:     "
    };
    writeln!(out, "Reading syntax data from: {}", config.syntax_data.display()).map_err(output_error)?;
    writeln!(out, "{target_label} {}\n", config.grammar.display()).map_err(output_error)?;

    let taxonomy = load_taxonomy(&config.syntax_data, &HEW)?;
    let mut document = grammar::load_grammar(&config.grammar)?;

    let outcome = synchronize(&mut document, &taxonomy, &HEW);

    if !config.check {
        grammar::write_grammar(&config.grammar, &document)?;
    }

    let verb = if config.check { "checked against" } else { "updated from" };
    writeln!(out, "TextMate grammar {verb} syntax-data.json v{}\n", taxonomy.version).map_err(output_error)?;
    write!(out, "{}", outcome.changes.render()).map_err(output_error)?;
    write!(out, "{}", outcome.render_skipped()).map_err(output_error)?;
    write!(out, "{}", outcome.coverage.render()).map_err(output_error)?;

    if config.check && !outcome.is_in_sync() {
        return Err(CliError::failure(format!(
            "Grammar is out of date: {} pattern(s) would change. Run `hew-grammar sync` to apply.",
            outcome.changes.len()
        )));
    }

    writeln!(out, "Done.").map_err(output_error)?;
    Ok(ExitCode::SUCCESS)
}

/// Run `lint` against stdout.
pub fn lint_grammar(config: &SyncConfig) -> CliResult<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_lint(config, &mut out)
}

/// Lint the grammar; issues go to `out`, one per line.
#[tracing::instrument(skip_all)]
pub fn run_lint(config: &SyncConfig, out: &mut impl Write) -> CliResult<ExitCode> {
    let document = grammar::load_grammar(&config.grammar)?;
    let issues = lint::lint(&document, &HEW, &config.expected_scope_name);

    if issues.is_empty() {
        writeln!(out, "✓ {} passed lint", config.grammar.display()).map_err(output_error)?;
        return Ok(ExitCode::SUCCESS);
    }

    writeln!(out, "{} issue(s) in {}:", issues.len(), config.grammar.display()).map_err(output_error)?;
    for issue in &issues {
        writeln!(out, "  - {issue}").map_err(output_error)?;
    }
    Err(CliError::new("", ExitCode::FAILURE))
}

fn output_error(e: io::Error) -> CliError {
    CliError::failure(format!("Error writing output: {e}"))
}
