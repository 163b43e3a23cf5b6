//! Update existing patterns whose scope the table owns.
//!
//! The walk visits the top-level pattern sequence and every repository section's pattern sequence, recursing
//! into nested `patterns` to any depth. Only the `match` of a node whose `name` is a known scope and which
//! already has a `match` is ever rewritten; nodes are never added, removed or reordered here.

use std::collections::BTreeSet;

use hew_vocab::regex::word_alternation;
use hew_vocab::scopes::ScopeGroups;

use crate::grammar::{GrammarDocument, PatternNode};
use crate::report::{ChangeLog, ChangeRecord};

/// Scopes found in the grammar with a `match` to manage.
pub type Handled = BTreeSet<&'static str>;

/// Walk the whole grammar.
///
/// ## Returns
/// - (`Handled`): every scope that has at least one managed node, changed or not.
#[tracing::instrument(skip_all, fields(sections = grammar.repository().len()))]
pub fn update_existing(grammar: &mut GrammarDocument, groups: &ScopeGroups, log: &mut ChangeLog) -> Handled {
    let mut handled = Handled::new();

    update_patterns(grammar.patterns_mut(), "patterns", groups, &mut handled, log);

    for (key, section) in grammar.repository_mut().iter_mut() {
        if let Some(patterns) = section.patterns_mut() {
            let path = format!("repository.{key}");
            update_patterns(patterns, &path, groups, &mut handled, log);
        }
    }

    handled
}

/// Walk one pattern sequence and its descendants.
///
/// ## Parameters
/// - `path`: label of the containing top-level sequence; nested nodes report the same path.
/// - `handled`: accumulator of managed scopes, shared across calls.
pub fn update_patterns(
    patterns: &mut [PatternNode],
    path: &str,
    groups: &ScopeGroups,
    handled: &mut Handled,
    log: &mut ChangeLog,
) {
    for node in patterns.iter_mut() {
        let group = node.name().and_then(|name| groups.get(name));
        if let Some(group) = group {
            if let Some(current) = node.match_regex() {
                let regex = word_alternation(&group.keywords);
                if current != regex {
                    let previous = node.set_match_regex(regex.clone()).unwrap_or_default();
                    tracing::debug!(scope = group.scope, path, "updated pattern");
                    log.push(ChangeRecord::updated(group.scope, path, previous, regex));
                }
                handled.insert(group.scope);
            }
        }

        if let Some(children) = node.patterns_mut() {
            update_patterns(children, path, groups, handled, log);
        }
    }
}
