//! Structural checks on a grammar document.
//!
//! These run on their own (`hew-grammar lint`) and never modify the grammar.

use std::fmt;

use hew_vocab::scopes::ScopeTable;

use super::{GrammarDocument, PatternNode};

/// One structural problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintIssue {
    /// `scopeName` differs from what editors expect.
    UnexpectedScopeName { expected: String, found: String },
    /// An `#name` include that names no repository entry.
    UnresolvedInclude {
        /// Containing sequence, e.g. `patterns` or `repository.strings`.
        context: String,
        reference: String,
    },
    /// A managed scope placed after its section's catch-all pattern, where it can never match.
    ShadowedByCatchAll {
        section: String,
        scope: String,
        catch_all: &'static str,
    },
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintIssue::UnexpectedScopeName { expected, found } => {
                write!(f, "scopeName is `{found}`, expected `{expected}`")
            }
            LintIssue::UnresolvedInclude { context, reference } => {
                write!(f, "include `{reference}` in {context} does not resolve to a repository entry")
            }
            LintIssue::ShadowedByCatchAll {
                section,
                scope,
                catch_all,
            } => write!(
                f,
                "`{scope}` comes after catch-all `{catch_all}` in repository.{section} and is never reached"
            ),
        }
    }
}

/// Check `grammar` against `table`.
///
/// ## Parameters
/// - `expected_scope_name`: required top-level `scopeName`, normally `source.hew`.
///
/// ## Notes
/// - Only same-grammar includes (`#name`) are resolved; `$self`, `$base` and references to other grammars
///   are accepted as is.
#[tracing::instrument(skip_all, fields(sections = grammar.repository().len()))]
pub fn lint(grammar: &GrammarDocument, table: &ScopeTable, expected_scope_name: &str) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    if grammar.scope_name() != expected_scope_name {
        issues.push(LintIssue::UnexpectedScopeName {
            expected: expected_scope_name.to_string(),
            found: grammar.scope_name().to_string(),
        });
    }

    check_includes(grammar.patterns(), "patterns", grammar, &mut issues);
    for (key, section) in grammar.repository() {
        let context = format!("repository.{key}");
        check_node(section, &context, grammar, &mut issues);
    }

    for route in table.routes {
        let Some(catch_all) = route.catch_all else {
            continue;
        };
        let Some(patterns) = grammar.section_patterns(route.section) else {
            continue;
        };
        let Some(idx) = patterns.iter().position(|p| p.name() == Some(catch_all)) else {
            continue;
        };
        for node in &patterns[idx + 1..] {
            if let Some(scope) = node.name().filter(|name| table.rule(name).is_some()) {
                issues.push(LintIssue::ShadowedByCatchAll {
                    section: route.section.to_string(),
                    scope: scope.to_string(),
                    catch_all,
                });
            }
        }
    }

    tracing::debug!(issues = issues.len(), "linted grammar");
    issues
}

fn check_includes(patterns: &[PatternNode], context: &str, grammar: &GrammarDocument, issues: &mut Vec<LintIssue>) {
    for node in patterns {
        check_node(node, context, grammar, issues);
    }
}

fn check_node(node: &PatternNode, context: &str, grammar: &GrammarDocument, issues: &mut Vec<LintIssue>) {
    if let Some(reference) = node.include() {
        if let Some(key) = reference.strip_prefix('#') {
            if !grammar.repository().contains_key(key) {
                issues.push(LintIssue::UnresolvedInclude {
                    context: context.to_string(),
                    reference: reference.to_string(),
                });
            }
        }
    }
    if let Some(children) = node.patterns() {
        check_includes(children, context, grammar, issues);
    }
}
