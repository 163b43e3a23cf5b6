//! Errors raised while loading, synchronizing and writing the grammar.
//!
//! Every failure is fatal: nothing is written once an error has been produced. The CLI prints the message
//! followed by the diagnostic help line.

use std::path::PathBuf;

use hew_vocab::scopes::ScopeRole;
use miette::Diagnostic;
use thiserror::Error;

/// Which input a [`SyncError::MissingInput`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Taxonomy,
    Grammar,
}

impl InputKind {
    pub fn file_name(self) -> &'static str {
        match self {
            InputKind::Taxonomy => "syntax-data.json",
            InputKind::Grammar => "hew.tmLanguage.json",
        }
    }

    /// How the user points the tool at a different file.
    pub fn override_hint(self) -> &'static str {
        match self {
            InputKind::Taxonomy => "Set HEW_SYNTAX_DATA env var (or pass --syntax-data) to the correct path.",
            InputKind::Grammar => "Pass --grammar with the path to hew.tmLanguage.json.",
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SyncError {
    #[error("{} not found at {}", .kind.file_name(), .path.display())]
    #[diagnostic(code(hew_grammar::missing_input))]
    MissingInput {
        kind: InputKind,
        path: PathBuf,
        #[help]
        hint: &'static str,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    #[diagnostic(code(hew_grammar::malformed_input))]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected shape in {} at `{pointer}`: {message}", .path.display())]
    #[diagnostic(
        code(hew_grammar::invalid_shape),
        help("Pattern nodes need string `name`/`match`/`comment` fields and an array of objects for `patterns`.")
    )]
    InvalidShape {
        path: PathBuf,
        pointer: String,
        message: String,
    },

    #[error("{} category `{category}` (needed by {scope}) is missing from {}", .role.taxonomy_section(), .path.display())]
    #[diagnostic(
        code(hew_grammar::missing_category),
        help("Update the scope table in hew_vocab if the category was renamed upstream.")
    )]
    MissingCategory {
        path: PathBuf,
        scope: &'static str,
        role: ScopeRole,
        category: &'static str,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    #[diagnostic(code(hew_grammar::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub fn missing_input(kind: InputKind, path: impl Into<PathBuf>) -> Self {
        SyncError::MissingInput {
            kind,
            path: path.into(),
            hint: kind.override_hint(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
