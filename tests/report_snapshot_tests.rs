//! Snapshot tests for the console report
//!
//! These tests capture the text printed after a run and compare it against stored snapshots.
//! When the report format changes intentionally, review the diffs with `cargo insta review`.

use std::path::{Path, PathBuf};

use hew_grammar::coverage::verify_coverage;
use hew_grammar::grammar::{GrammarDocument, lint::lint};
use hew_grammar::sync::synchronize;
use hew_grammar::{load_grammar, load_taxonomy};
use hew_vocab::scopes::{HEW, build_scope_groups};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn test_fixture_sync_report() {
    let taxonomy = load_taxonomy(&fixture("syntax-data.json"), &HEW).unwrap();
    let mut doc = load_grammar(&fixture("hew.tmLanguage.json")).unwrap();

    let outcome = synchronize(&mut doc, &taxonomy, &HEW);
    let rendered = format!(
        "{}{}{}",
        outcome.changes.render(),
        outcome.render_skipped(),
        outcome.coverage.render()
    );

    insta::assert_snapshot!("fixture_sync_report", rendered.trim_end());
}

#[test]
fn test_coverage_warnings() {
    let mut taxonomy = load_taxonomy(&fixture("syntax-data.json"), &HEW).unwrap();
    taxonomy
        .keywords
        .get_mut("other")
        .unwrap()
        .retain(|k| k != "defer");
    taxonomy.keywords.get_mut("control_flow").unwrap().push("let".to_string());
    taxonomy.all_keywords.retain(|k| k != "isolated");
    taxonomy.all_keywords.push("goto".to_string());

    let report = verify_coverage(&taxonomy, &build_scope_groups(&taxonomy, &HEW));
    let rendered = report.render();

    insta::assert_snapshot!("coverage_warnings", rendered.trim_end());
}

#[test]
fn test_lint_issues() {
    let text = r##"{
  "scopeName": "source.hew-next",
  "patterns": [{ "include": "#keywords" }, { "include": "#missing" }],
  "repository": {
    "keywords": { "patterns": [{ "include": "#strings" }] },
    "variables": { "patterns": [
      { "name": "variable.other.hew", "match": "\\w+" },
      { "name": "variable.language.contextual.hew", "match": "\\b(ready)\\b" }
    ] }
  }
}"##;
    let doc = GrammarDocument::parse(text, Path::new("hew.tmLanguage.json")).unwrap();
    let rendered: Vec<String> = lint(&doc, &HEW, "source.hew").iter().map(ToString::to_string).collect();

    insta::assert_snapshot!("lint_issues", rendered.join("\n"));
}
