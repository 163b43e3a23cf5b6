//! Structural checks on the shipped grammar.

use std::collections::HashSet;
use std::path::PathBuf;

use hew_grammar::config::DEFAULT_SCOPE_NAME;
use hew_grammar::grammar::{lint::lint, to_json_string};
use hew_grammar::load_grammar;
use hew_vocab::scopes::HEW;

fn shipped() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("syntaxes/hew.tmLanguage.json")
}

#[test]
fn test_shipped_grammar_loads_with_expected_scope() {
    let grammar = load_grammar(&shipped()).unwrap();
    assert_eq!(grammar.scope_name(), DEFAULT_SCOPE_NAME);
    assert!(!grammar.patterns().is_empty());
    assert!(!grammar.repository().is_empty());
}

#[test]
fn test_shipped_grammar_passes_lint() {
    let grammar = load_grammar(&shipped()).unwrap();
    let issues = lint(&grammar, &HEW, DEFAULT_SCOPE_NAME);
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn test_shipped_grammar_has_routed_sections() {
    let grammar = load_grammar(&shipped()).unwrap();
    let sections: HashSet<&str> = HEW.routes.iter().map(|r| r.section).collect();
    for section in sections {
        assert!(grammar.section_patterns(section).is_some(), "missing section {section}");
    }
}

#[test]
fn test_shipped_grammar_has_every_managed_scope_once() {
    let grammar = load_grammar(&shipped()).unwrap();
    for rule in HEW.rules {
        let route = HEW.route(rule.scope).unwrap();
        let count = grammar
            .section_patterns(route.section)
            .unwrap()
            .iter()
            .filter(|p| p.name() == Some(rule.scope))
            .count();
        assert_eq!(count, 1, "{} in repository.{}", rule.scope, route.section);
    }
}

#[test]
fn test_shipped_grammar_round_trips_byte_for_byte() {
    let raw = std::fs::read_to_string(shipped()).unwrap();
    let grammar = load_grammar(&shipped()).unwrap();
    assert_eq!(to_json_string(&grammar).unwrap(), raw);
}
