#![forbid(unsafe_code)]
//! Hew TextMate grammar synchronizer
//!
//! Keeps `syntaxes/hew.tmLanguage.json` in line with the compiler's keyword taxonomy (`syntax-data.json`):
//! keyword patterns are regenerated from the taxonomy, missing scopes are inserted and keyword coverage is
//! cross-checked. The scope registry itself lives in the `hew_vocab` crate.
//!
//! ## Pipeline
//!
//! 1. [`taxonomy::load_taxonomy`] reads and validates `syntax-data.json`.
//! 2. [`grammar::load_grammar`] reads the grammar into typed pattern nodes.
//! 3. [`sync::synchronize`] updates, inserts and verifies in memory.
//! 4. [`grammar::write_grammar`] writes the result back with the original formatting.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod coverage;
pub mod errors;
pub mod grammar;
pub mod report;
pub mod sync;
pub mod taxonomy;
pub mod version;

pub use config::SyncConfig;
pub use coverage::{CoverageReport, verify_coverage};
pub use errors::{SyncError, SyncResult};
pub use grammar::{GrammarDocument, PatternNode, load_grammar, write_grammar};
pub use report::{ChangeAction, ChangeLog, ChangeRecord};
pub use sync::{SyncOutcome, synchronize};
pub use taxonomy::load_taxonomy;
