//! Configuration for a synchronization run.

use std::path::{Path, PathBuf};

/// Environment variable overriding the taxonomy location.
pub const SYNTAX_DATA_ENV: &str = "HEW_SYNTAX_DATA";

/// Default taxonomy location: the compiler checkout next to this repository.
pub const DEFAULT_SYNTAX_DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../hew/docs/syntax-data.json");

/// Default grammar location inside this repository.
pub const DEFAULT_GRAMMAR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/syntaxes/hew.tmLanguage.json");

/// Grammar `scopeName` the lint expects.
pub const DEFAULT_SCOPE_NAME: &str = "source.hew";

/// Settings for one run of the tool
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Path to `syntax-data.json`
    pub syntax_data: PathBuf,
    /// Path to the TextMate grammar that is rewritten in place
    pub grammar: PathBuf,
    /// Compute and report changes without writing
    pub check: bool,
    /// Expected top-level `scopeName` of the grammar
    pub expected_scope_name: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            syntax_data: PathBuf::from(DEFAULT_SYNTAX_DATA),
            grammar: PathBuf::from(DEFAULT_GRAMMAR),
            check: false,
            expected_scope_name: DEFAULT_SCOPE_NAME.to_string(),
        }
    }
}

impl SyncConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the taxonomy path
    pub fn with_syntax_data(mut self, path: impl AsRef<Path>) -> Self {
        self.syntax_data = path.as_ref().to_path_buf();
        self
    }

    /// Set the grammar path
    pub fn with_grammar(mut self, path: impl AsRef<Path>) -> Self {
        self.grammar = path.as_ref().to_path_buf();
        self
    }

    /// Enable or disable check mode
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Set the expected grammar scope name
    pub fn with_expected_scope_name(mut self, scope_name: impl Into<String>) -> Self {
        self.expected_scope_name = scope_name.into();
        self
    }
}
