//! Insert patterns for scopes the grammar does not have yet.
//!
//! A scope is routed to a repository section by prefix ([`ScopeTable::route`]). The new node is placed right
//! before the section's catch-all pattern when the route declares one and the section contains it, and is
//! appended otherwise.

use hew_vocab::regex::word_alternation;
use hew_vocab::scopes::{ScopeGroups, ScopeTable};

use super::walker::Handled;
use crate::grammar::{GrammarDocument, PatternNode};
use crate::report::{ChangeLog, ChangeRecord};

/// A scope that needed a new pattern but had nowhere to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedScope {
    pub scope: &'static str,
    /// Repository section the scope routes to.
    pub section: &'static str,
}

/// Add a pattern for every group not in `handled`.
///
/// ## Parameters
/// - `handled`: scopes the walker already manages; updated with every inserted scope.
///
/// ## Returns
/// - Scopes whose target section is absent or has no `patterns` list. Scopes without any route are silently
///   ignored and are not part of the result.
#[tracing::instrument(skip_all, fields(handled = handled.len()))]
pub fn insert_missing(
    grammar: &mut GrammarDocument,
    groups: &ScopeGroups,
    table: &ScopeTable,
    handled: &mut Handled,
    log: &mut ChangeLog,
) -> Vec<SkippedScope> {
    let mut skipped = Vec::new();

    for group in groups {
        if handled.contains(group.scope) {
            continue;
        }

        let Some(route) = table.route(group.scope) else {
            tracing::debug!(scope = group.scope, "no section route, not inserting");
            continue;
        };

        let Some(patterns) = grammar.section_patterns_mut(route.section) else {
            tracing::warn!(
                scope = group.scope,
                section = route.section,
                "repository section missing or has no patterns, pattern not inserted"
            );
            skipped.push(SkippedScope {
                scope: group.scope,
                section: route.section,
            });
            continue;
        };

        let regex = word_alternation(&group.keywords);
        let node = PatternNode::generated(group.comment, group.scope, regex.clone());
        let anchor = table
            .catch_all(route.section)
            .and_then(|catch_all| patterns.iter().position(|p| p.name() == Some(catch_all)));
        match anchor {
            Some(idx) => patterns.insert(idx, node),
            None => patterns.push(node),
        }

        tracing::debug!(scope = group.scope, section = route.section, "inserted pattern");
        log.push(ChangeRecord::added(group.scope, format!("repository.{}", route.section), regex));
        handled.insert(group.scope);
    }

    skipped
}
