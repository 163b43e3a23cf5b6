//! Cross-check keyword scope groups against the taxonomy's `all_keywords`.
//!
//! Only [`ScopeRole::Keyword`] groups count; type and contextual groups classify other vocabulary. Findings are
//! warnings: they are printed after the grammar is written and never change the exit code.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::Write as _;

use hew_vocab::scopes::{ScopeGroups, ScopeRole};
use hew_vocab::taxonomy::Taxonomy;

/// A keyword owned by more than one keyword scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKeyword {
    pub keyword: String,
    /// Owning scopes, in table order.
    pub scopes: Vec<&'static str>,
}

/// Result of [`verify_coverage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// In `all_keywords` but in no keyword scope (taxonomy order).
    pub gaps: Vec<String>,
    /// In some keyword scope but not in `all_keywords` (sorted).
    pub orphans: Vec<String>,
    /// Assigned to several keyword scopes (sorted by keyword).
    pub duplicates: Vec<DuplicateKeyword>,
}

impl CoverageReport {
    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty() && self.orphans.is_empty() && self.duplicates.is_empty()
    }

    /// Warning blocks for every non-empty finding; empty when clean.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.gaps.is_empty() {
            let _ = writeln!(out, "⚠  Keywords in all_keywords not assigned to any grammar scope:");
            let _ = writeln!(out, "   {}\n", self.gaps.join(", "));
        }
        if !self.orphans.is_empty() {
            let _ = writeln!(out, "⚠  Keywords in grammar scopes but not in all_keywords:");
            let _ = writeln!(out, "   {}\n", self.orphans.join(", "));
        }
        if !self.duplicates.is_empty() {
            let _ = writeln!(out, "⚠  Keywords assigned to more than one grammar scope:");
            let listed: Vec<String> = self
                .duplicates
                .iter()
                .map(|d| format!("{} ({})", d.keyword, d.scopes.join(", ")))
                .collect();
            let _ = writeln!(out, "   {}\n", listed.join(", "));
        }
        out
    }
}

/// Compare keyword scope groups with the authoritative keyword list.
///
/// ## Parameters
/// - `taxonomy`: provides `all_keywords`.
/// - `groups`: output of `hew_vocab::build_scope_groups` for the same taxonomy.
#[tracing::instrument(skip_all, fields(all_keywords = taxonomy.all_keywords.len()))]
pub fn verify_coverage(taxonomy: &Taxonomy, groups: &ScopeGroups) -> CoverageReport {
    let mut owners: BTreeMap<&str, Vec<&'static str>> = BTreeMap::new();
    for group in groups.with_role(ScopeRole::Keyword) {
        for keyword in &group.keywords {
            owners.entry(keyword.as_str()).or_default().push(group.scope);
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let gaps: Vec<String> = taxonomy
        .all_keywords
        .iter()
        .filter(|k| !owners.contains_key(k.as_str()))
        .filter(|k| seen.insert(k.as_str()))
        .cloned()
        .collect();

    let authoritative: BTreeSet<&str> = taxonomy.all_keywords.iter().map(String::as_str).collect();
    let orphans: Vec<String> = owners
        .keys()
        .filter(|k| !authoritative.contains(*k))
        .map(|k| k.to_string())
        .collect();

    let duplicates: Vec<DuplicateKeyword> = owners
        .iter()
        .filter(|(_, scopes)| scopes.len() > 1)
        .map(|(keyword, scopes)| DuplicateKeyword {
            keyword: keyword.to_string(),
            scopes: scopes.clone(),
        })
        .collect();

    let report = CoverageReport {
        gaps,
        orphans,
        duplicates,
    };
    if !report.is_clean() {
        tracing::debug!(
            gaps = report.gaps.len(),
            orphans = report.orphans.len(),
            duplicates = report.duplicates.len(),
            "keyword coverage mismatch"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use hew_vocab::scopes::{ScopeRule, ScopeTable, SectionRoute, build_scope_groups};
    use hew_vocab::taxonomy::TaxonomyVersion;

    use super::*;

    const TABLE: ScopeTable = ScopeTable::new(
        &[
            ScopeRule::keywords("keyword.control.test", &["control_flow"], &["await"]),
            ScopeRule::keywords("keyword.declaration.test", &["declarations"], &[]),
            ScopeRule::types("storage.type.test", &["integer"], &["Option"]),
        ],
        &[SectionRoute::new("keyword.", "keywords")],
    );

    fn taxonomy(control: &[&str], declarations: &[&str], all: &[&str]) -> Taxonomy {
        let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut keywords = BTreeMap::new();
        keywords.insert("control_flow".to_string(), list(control));
        keywords.insert("declarations".to_string(), list(declarations));
        let mut types = BTreeMap::new();
        types.insert("integer".to_string(), list(&["i32"]));
        Taxonomy {
            version: TaxonomyVersion::Text("test".to_string()),
            keywords,
            types,
            contextual_identifiers: BTreeMap::new(),
            all_keywords: list(all),
        }
    }

    fn verify(t: &Taxonomy) -> CoverageReport {
        verify_coverage(t, &build_scope_groups(t, &TABLE))
    }

    #[test]
    fn test_exact_partition_is_clean() {
        let t = taxonomy(&["if", "else"], &["fn"], &["if", "else", "fn", "await"]);
        let report = verify(&t);
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.render(), "");
    }

    #[test]
    fn test_gap_reported_in_taxonomy_order() {
        let t = taxonomy(&["if"], &[], &["while", "if", "await", "loop", "while"]);
        let report = verify(&t);
        assert_eq!(report.gaps, vec!["while", "loop"]);
        assert!(report.orphans.is_empty());
    }

    #[test]
    fn test_fixed_addition_missing_upstream_is_orphan() {
        let t = taxonomy(&["if"], &[], &["if"]);
        let report = verify(&t);
        assert_eq!(report.orphans, vec!["await"]);
    }

    #[test]
    fn test_type_groups_do_not_count() {
        let t = taxonomy(&["if"], &[], &["if", "await", "i32"]);
        let report = verify(&t);
        // `i32` and `Option` live in a type scope
        assert_eq!(report.gaps, vec!["i32"]);
        assert!(!report.orphans.contains(&"Option".to_string()));
    }

    #[test]
    fn test_duplicate_ownership() {
        let t = taxonomy(&["if", "let"], &["let"], &["if", "let", "await"]);
        let report = verify(&t);
        assert_eq!(
            report.duplicates,
            vec![DuplicateKeyword {
                keyword: "let".to_string(),
                scopes: vec!["keyword.control.test", "keyword.declaration.test"],
            }]
        );
    }

    #[test]
    fn test_render_blocks() {
        let report = CoverageReport {
            gaps: vec!["loop".to_string(), "goto".to_string()],
            orphans: vec!["await".to_string()],
            duplicates: vec![],
        };
        assert_eq!(
            report.render(),
            "⚠  Keywords in all_keywords not assigned to any grammar scope:\n   loop, goto\n\n\
             ⚠  Keywords in grammar scopes but not in all_keywords:\n   await\n\n"
        );
    }
}
