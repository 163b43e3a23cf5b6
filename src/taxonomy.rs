//! Load the compiler's `syntax-data.json`.
//!
//! Loading is all-or-nothing: a missing file, unparseable JSON, a missing required field or a category the
//! scope table depends on but the taxonomy lacks are all fatal, before anything touches the grammar.

use std::fs;
use std::path::Path;

use hew_vocab::scopes::ScopeTable;
use hew_vocab::taxonomy::Taxonomy;

use crate::errors::{InputKind, SyncError, SyncResult};

/// Read and validate a taxonomy file.
///
/// ## Parameters
/// - `path`: location of `syntax-data.json`.
/// - `table`: scope table whose category references must resolve.
///
/// ## Errors
/// - [`SyncError::MissingInput`] if `path` does not exist.
/// - [`SyncError::MalformedInput`] if the content is not a taxonomy record.
/// - [`SyncError::MissingCategory`] for the first category `table` needs that the taxonomy does not declare.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_taxonomy(path: &Path, table: &ScopeTable) -> SyncResult<Taxonomy> {
    if !path.exists() {
        return Err(SyncError::missing_input(InputKind::Taxonomy, path));
    }
    let text = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    parse_taxonomy(&text, path, table)
}

/// Parse and validate taxonomy text; see [`load_taxonomy`].
pub fn parse_taxonomy(text: &str, path: &Path, table: &ScopeTable) -> SyncResult<Taxonomy> {
    let taxonomy: Taxonomy = serde_json::from_str(text).map_err(|source| SyncError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(missing) = table.missing_categories(&taxonomy).into_iter().next() {
        return Err(SyncError::MissingCategory {
            path: path.to_path_buf(),
            scope: missing.scope,
            role: missing.role,
            category: missing.category,
        });
    }

    tracing::debug!(
        version = %taxonomy.version,
        keyword_categories = taxonomy.keywords.len(),
        type_categories = taxonomy.types.len(),
        all_keywords = taxonomy.all_keywords.len(),
        "loaded taxonomy"
    );
    Ok(taxonomy)
}
