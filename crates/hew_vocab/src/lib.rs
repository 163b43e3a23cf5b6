//! Provide the pure vocabulary layer for keeping Hew's TextMate grammar in sync with the compiler.
//!
//! This crate is intentionally small and dependency-light. It contains:
//! - the typed shape of the compiler's `syntax-data.json` taxonomy ([`taxonomy`]),
//! - the registry that decides which grammar scope owns which keyword ([`scopes`]), and
//! - the deterministic regex builder used for every generated `match` ([`regex`]).
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global mutable state, and no grammar-document types.
//! - The same [`scopes::ScopeTable`] value is consulted by the grammar walker, the inserter and the
//!   coverage check, so they can never disagree about keyword ownership.

pub mod regex;
pub mod scopes;
pub mod taxonomy;

pub use regex::word_alternation;
pub use scopes::{HEW, ScopeGroup, ScopeGroups, ScopeRole, ScopeRule, ScopeTable, SectionRoute, build_scope_groups};
pub use taxonomy::{ContextualEntry, Taxonomy, TaxonomyVersion};
