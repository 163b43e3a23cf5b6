//! Bring a grammar's keyword patterns in line with a taxonomy.
//!
//! [`synchronize`] is the whole pipeline on in-memory values: build scope groups, update every existing
//! managed pattern ([`walker`]), insert patterns for scopes the grammar lacks ([`inserter`]) and cross-check
//! keyword coverage. Loading and writing files is left to the caller.
//!
//! ## Notes
//! - Running it twice with the same taxonomy yields no changes the second time.
//! - Only `match` values are rewritten and nodes are only ever added; everything else in the grammar is left
//!   as it was.

pub mod inserter;
pub mod walker;

use hew_vocab::scopes::{ScopeTable, build_scope_groups};
use hew_vocab::taxonomy::Taxonomy;

use crate::coverage::{CoverageReport, verify_coverage};
use crate::grammar::GrammarDocument;
use crate::report::ChangeLog;

pub use inserter::SkippedScope;
pub use walker::Handled;

/// Everything a synchronization run found and did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub changes: ChangeLog,
    /// Scopes that could not be inserted because their section is missing.
    pub skipped: Vec<SkippedScope>,
    pub coverage: CoverageReport,
}

impl SyncOutcome {
    /// `true` when the grammar was already up to date.
    pub fn is_in_sync(&self) -> bool {
        self.changes.is_empty()
    }

    /// Warning block for skipped scopes; empty when nothing was skipped.
    pub fn render_skipped(&self) -> String {
        if self.skipped.is_empty() {
            return String::new();
        }
        let listed: Vec<String> = self
            .skipped
            .iter()
            .map(|s| format!("{} (repository.{})", s.scope, s.section))
            .collect();
        format!(
            "⚠  Scopes not inserted, target section missing or without patterns:\n   {}\n\n",
            listed.join(", ")
        )
    }
}

/// Run the synchronizer over `grammar` in place.
///
/// ## Parameters
/// - `grammar`: the loaded grammar; mutated in place.
/// - `taxonomy`: the loaded taxonomy.
/// - `table`: scope table, normally [`hew_vocab::HEW`].
///
/// ## Returns
/// - (`SyncOutcome`): the change log in emission order (updates first, then insertions), skipped scopes and
///   the coverage report.
#[tracing::instrument(skip_all, fields(version = %taxonomy.version))]
pub fn synchronize(grammar: &mut GrammarDocument, taxonomy: &Taxonomy, table: &ScopeTable) -> SyncOutcome {
    let groups = build_scope_groups(taxonomy, table);
    let mut changes = ChangeLog::new();

    let mut handled = walker::update_existing(grammar, &groups, &mut changes);
    let skipped = inserter::insert_missing(grammar, &groups, table, &mut handled, &mut changes);
    let coverage = verify_coverage(taxonomy, &groups);

    tracing::info!(
        changes = changes.len(),
        skipped = skipped.len(),
        coverage_clean = coverage.is_clean(),
        "synchronized grammar"
    );

    SyncOutcome {
        changes,
        skipped,
        coverage,
    }
}
