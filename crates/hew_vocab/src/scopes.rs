//! Define which TextMate scope owns which keyword.
//!
//! This module is the single source of truth for keyword ownership in the grammar: a const rule table
//! ([`HEW_SCOPES`]) mapping each generated scope to the taxonomy categories that feed it, plus the fixed
//! spellings the taxonomy does not (yet) carry, and a routing table ([`HEW_ROUTES`]) naming the repository
//! section a freshly generated pattern lands in.
//!
//! ## Notes
//! - Tables are plain `const` data wrapped in a [`ScopeTable`] that callers pass by reference; nothing writes
//!   back into them at runtime.
//! - [`build_scope_groups`] is the ScopeGroupBuilder: it turns a taxonomy plus a table into sorted, deduplicated
//!   keyword sets.
//! - Routing is prefix based and first-match wins.
//!
//! ## Examples
//! ```rust
//! use hew_vocab::scopes::{HEW, ScopeRole};
//!
//! let rule = HEW.rule("keyword.reserved.hew").unwrap();
//! assert_eq!(rule.role, ScopeRole::Keyword);
//! assert_eq!(HEW.route("storage.type.numeric.hew").unwrap().section, "types");
//! ```

use std::collections::BTreeSet;

use crate::taxonomy::Taxonomy;

/// Comment attached to generated patterns whose rule does not carry its own.
pub const GENERATED_COMMENT: &str = "Generated from syntax-data.json";

/// What kind of vocabulary a scope classifies.
///
/// ## Notes
/// - Only [`ScopeRole::Keyword`] groups take part in keyword coverage checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeRole {
    /// Reserved words; categories are looked up in `Taxonomy::keywords`.
    Keyword,
    /// Type names; categories are looked up in `Taxonomy::types`.
    Type,
    /// Names taken from the keys of `Taxonomy::contextual_identifiers`.
    Contextual,
}

impl ScopeRole {
    /// Name of the taxonomy section this role reads categories from.
    pub fn taxonomy_section(self) -> &'static str {
        match self {
            ScopeRole::Keyword => "keywords",
            ScopeRole::Type => "types",
            ScopeRole::Contextual => "contextual_identifiers",
        }
    }
}

/// One row of the scope table.
#[derive(Debug, Clone, Copy)]
pub struct ScopeRule {
    /// TextMate scope name, e.g. `keyword.control.hew`.
    pub scope: &'static str,
    pub role: ScopeRole,
    /// Taxonomy categories merged into this scope (ignored for [`ScopeRole::Contextual`]).
    pub categories: &'static [&'static str],
    /// Spellings added on top of the taxonomy categories.
    pub extras: &'static [&'static str],
    /// Contextual-identifier keys that must not be emitted (metadata, names with their own pattern).
    pub excluded: &'static [&'static str],
    /// Comment for a generated pattern; [`GENERATED_COMMENT`] when `None`.
    pub comment: Option<&'static str>,
}

impl ScopeRule {
    pub const fn keywords(
        scope: &'static str,
        categories: &'static [&'static str],
        extras: &'static [&'static str],
    ) -> Self {
        rule(scope, ScopeRole::Keyword, categories, extras, &[])
    }

    pub const fn types(
        scope: &'static str,
        categories: &'static [&'static str],
        extras: &'static [&'static str],
    ) -> Self {
        rule(scope, ScopeRole::Type, categories, extras, &[])
    }

    pub const fn contextual(scope: &'static str, excluded: &'static [&'static str]) -> Self {
        rule(scope, ScopeRole::Contextual, &[], &[], excluded)
    }

    pub const fn with_comment(mut self, comment: &'static str) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Comment written on a pattern generated for this rule.
    pub fn pattern_comment(&self) -> &'static str {
        self.comment.unwrap_or(GENERATED_COMMENT)
    }
}

/// Route generated patterns whose scope starts with `prefix` into repository section `section`.
#[derive(Debug, Clone, Copy)]
pub struct SectionRoute {
    pub prefix: &'static str,
    pub section: &'static str,
    /// Scope of the section's "any other identifier" pattern; new patterns go right before it.
    pub catch_all: Option<&'static str>,
}

impl SectionRoute {
    pub const fn new(prefix: &'static str, section: &'static str) -> Self {
        Self {
            prefix,
            section,
            catch_all: None,
        }
    }

    pub const fn before_catch_all(mut self, scope: &'static str) -> Self {
        self.catch_all = Some(scope);
        self
    }
}

/// A rule table plus its routing table.
#[derive(Debug, Clone, Copy)]
pub struct ScopeTable {
    pub rules: &'static [ScopeRule],
    pub routes: &'static [SectionRoute],
}

/// A taxonomy category a rule depends on but the taxonomy does not declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCategory {
    pub scope: &'static str,
    pub role: ScopeRole,
    pub category: &'static str,
}

impl ScopeTable {
    pub const fn new(rules: &'static [ScopeRule], routes: &'static [SectionRoute]) -> Self {
        Self { rules, routes }
    }

    /// Rule for a scope name, if the table owns it.
    pub fn rule(&self, scope: &str) -> Option<&'static ScopeRule> {
        self.rules.iter().find(|r| r.scope == scope)
    }

    /// Destination section for a scope name (first matching prefix).
    ///
    /// ## Returns
    /// - `None` if no route prefix matches; such scopes are never inserted.
    pub fn route(&self, scope: &str) -> Option<&'static SectionRoute> {
        self.routes.iter().find(|r| scope.starts_with(r.prefix))
    }

    /// Catch-all scope declared for a section, if any.
    pub fn catch_all(&self, section: &str) -> Option<&'static str> {
        self.routes
            .iter()
            .filter(|r| r.section == section)
            .find_map(|r| r.catch_all)
    }

    /// Categories referenced by the rules that `taxonomy` does not declare.
    ///
    /// ## Notes
    /// - An empty category is fine; only absent ones are reported.
    pub fn missing_categories(&self, taxonomy: &Taxonomy) -> Vec<MissingCategory> {
        let mut missing = Vec::new();
        for rule in self.rules {
            for &category in rule.categories {
                let present = match rule.role {
                    ScopeRole::Keyword => taxonomy.keyword_category(category).is_some(),
                    ScopeRole::Type => taxonomy.type_category(category).is_some(),
                    ScopeRole::Contextual => true,
                };
                if !present {
                    missing.push(MissingCategory {
                        scope: rule.scope,
                        role: rule.role,
                        category,
                    });
                }
            }
        }
        missing
    }
}

/// Scope table for the Hew grammar (`source.hew`).
///
/// ## Notes
/// - The ordering is the order generated patterns are appended in; it is grouped for readability.
/// - Every keyword from the taxonomy's `all_keywords` should appear in exactly one keyword rule.
pub const HEW_SCOPES: &[ScopeRule] = &[
    // Keywords
    ScopeRule::keywords(
        "keyword.control.hew",
        &["control_flow"],
        // Actor keywords that behave as control flow
        &["select", "join", "after", "from", "await", "scope", "cooperate"],
    ),
    ScopeRule::keywords("keyword.declaration.hew", &["declarations"], &[]),
    ScopeRule::keywords("keyword.actor.hew", &[], &["actor", "receive", "init", "spawn", "move"]),
    ScopeRule::keywords(
        "keyword.supervisor.hew",
        &[],
        &["supervisor", "child", "restart", "budget", "strategy"],
    ),
    ScopeRule::keywords(
        "constant.language.strategy.hew",
        &[],
        &[
            "permanent",
            "transient",
            "temporary",
            "one_for_one",
            "one_for_all",
            "rest_for_one",
        ],
    ),
    ScopeRule::keywords("keyword.wire.hew", &["wire"], &[]),
    ScopeRule::keywords("keyword.other.hew", &["other"], &["isolated"]),
    ScopeRule::keywords("keyword.operator.logical.hew", &[], &["and", "or"]),
    ScopeRule::keywords("constant.language.boolean.hew", &[], &["true", "false"]),
    ScopeRule::keywords("keyword.reserved.hew", &["reserved_unused"], &[])
        .with_comment("Reserved keywords (not yet used in the language)"),
    // Types
    ScopeRule::types("storage.type.numeric.hew", &["integer", "float"], &[]),
    ScopeRule::types("storage.type.primitive.hew", &["primitive"], &[]),
    ScopeRule::types(
        "storage.type.generic.hew",
        &["collections", "other"],
        // `None` has its own constant.language pattern
        &["Option", "Result", "Ok", "Err", "Some", "Arc", "Rc", "Weak"],
    ),
    ScopeRule::types("storage.type.concurrency.hew", &["concurrency"], &[]),
    ScopeRule::types("storage.type.trait.hew", &[], &["Send", "Frozen", "Copy"]),
    // Contextual identifiers (`self` has its own pattern)
    ScopeRule::contextual("variable.language.contextual.hew", &["self", "description"])
        .with_comment("Contextual identifiers (special meaning in specific contexts)"),
];

/// Section routing for the Hew grammar.
pub const HEW_ROUTES: &[SectionRoute] = &[
    SectionRoute::new("keyword.", "keywords"),
    SectionRoute::new("constant.language.", "keywords"),
    SectionRoute::new("storage.type.", "types"),
    SectionRoute::new("variable.language.", "variables").before_catch_all("variable.other.hew"),
];

/// The table used by the `hew-grammar` tool.
pub const HEW: ScopeTable = ScopeTable::new(HEW_SCOPES, HEW_ROUTES);

/// The keyword set of one scope, ready for regex generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeGroup {
    pub scope: &'static str,
    pub role: ScopeRole,
    pub comment: &'static str,
    /// Sorted and deduplicated.
    pub keywords: BTreeSet<String>,
}

/// Scope groups in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeGroups {
    groups: Vec<ScopeGroup>,
}

impl ScopeGroups {
    pub fn get(&self, scope: &str) -> Option<&ScopeGroup> {
        self.groups.iter().find(|g| g.scope == scope)
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.get(scope).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScopeGroup> {
        self.groups.iter()
    }

    /// Groups with the given role, in table order.
    pub fn with_role(&self, role: ScopeRole) -> impl Iterator<Item = &ScopeGroup> {
        self.groups.iter().filter(move |g| g.role == role)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScopeGroups {
    type Item = &'a ScopeGroup;
    type IntoIter = std::slice::Iter<'a, ScopeGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Build the keyword set of every scope in `table` from `taxonomy`.
///
/// ## Parameters
/// - `taxonomy`: the loaded taxonomy.
/// - `table`: the scope table; see [`HEW`].
///
/// ## Returns
/// - (`ScopeGroups`): one group per rule, in rule order.
///
/// ## Notes
/// - Absent categories contribute nothing here; loaders reject them up front via
///   [`ScopeTable::missing_categories`].
/// - Contextual groups take every key of `contextual_identifiers` except the rule's exclusions.
pub fn build_scope_groups(taxonomy: &Taxonomy, table: &ScopeTable) -> ScopeGroups {
    let groups = table
        .rules
        .iter()
        .map(|rule| {
            let mut keywords: BTreeSet<String> = BTreeSet::new();
            match rule.role {
                ScopeRole::Keyword | ScopeRole::Type => {
                    for &category in rule.categories {
                        let members = match rule.role {
                            ScopeRole::Keyword => taxonomy.keyword_category(category),
                            _ => taxonomy.type_category(category),
                        };
                        keywords.extend(members.unwrap_or_default().iter().cloned());
                    }
                }
                ScopeRole::Contextual => {
                    let excluded: &[&str] = rule.excluded;
                    keywords.extend(
                        taxonomy
                            .contextual_names()
                            .filter(|name| !excluded.contains(name))
                            .map(str::to_string),
                    );
                }
            }
            keywords.extend(rule.extras.iter().map(|s| s.to_string()));

            ScopeGroup {
                scope: rule.scope,
                role: rule.role,
                comment: rule.pattern_comment(),
                keywords,
            }
        })
        .collect();

    ScopeGroups { groups }
}

// --- helpers -----------------------------------------------------------------

const fn rule(
    scope: &'static str,
    role: ScopeRole,
    categories: &'static [&'static str],
    extras: &'static [&'static str],
    excluded: &'static [&'static str],
) -> ScopeRule {
    ScopeRule {
        scope,
        role,
        categories,
        extras,
        excluded,
        comment: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::taxonomy::{ContextualEntry, TaxonomyVersion};

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn taxonomy() -> Taxonomy {
        let mut keywords = BTreeMap::new();
        keywords.insert("control_flow".to_string(), list(&["while", "if", "else"]));
        keywords.insert("declarations".to_string(), list(&["fn", "let"]));
        keywords.insert("wire".to_string(), list(&["wire"]));
        keywords.insert("other".to_string(), list(&["pub", "unsafe"]));
        keywords.insert("reserved_unused".to_string(), list(&["macro", "yield"]));

        let mut types = BTreeMap::new();
        types.insert("integer".to_string(), list(&["i64", "i32"]));
        types.insert("float".to_string(), list(&["f64"]));
        types.insert("primitive".to_string(), list(&["bool", "string"]));
        types.insert("collections".to_string(), list(&["Vec", "HashMap"]));
        types.insert("concurrency".to_string(), list(&["Mailbox"]));
        types.insert("other".to_string(), list(&["Duration", "Vec"]));

        let mut contextual = BTreeMap::new();
        contextual.insert(
            "description".to_string(),
            ContextualEntry::Note("map metadata".to_string()),
        );
        contextual.insert("self".to_string(), ContextualEntry::Detailed { description: None });
        contextual.insert(
            "ready".to_string(),
            ContextualEntry::Detailed {
                description: Some("select arm".to_string()),
            },
        );

        Taxonomy {
            version: TaxonomyVersion::Text("0.1.0".to_string()),
            keywords,
            types,
            contextual_identifiers: contextual,
            all_keywords: Vec::new(),
        }
    }

    fn words(group: &ScopeGroup) -> Vec<&str> {
        group.keywords.iter().map(String::as_str).collect()
    }

    // ========================================
    // Table lookups
    // ========================================

    #[test]
    fn test_rule_lookup() {
        assert!(HEW.rule("keyword.control.hew").is_some());
        assert!(HEW.rule("keyword.control.rust").is_none());
    }

    #[test]
    fn test_route_by_prefix() {
        assert_eq!(HEW.route("keyword.wire.hew").unwrap().section, "keywords");
        assert_eq!(HEW.route("constant.language.boolean.hew").unwrap().section, "keywords");
        assert_eq!(HEW.route("storage.type.trait.hew").unwrap().section, "types");
        assert_eq!(HEW.route("variable.language.contextual.hew").unwrap().section, "variables");
        assert!(HEW.route("entity.name.function.hew").is_none());
    }

    #[test]
    fn test_catch_all_only_for_variables() {
        assert_eq!(HEW.catch_all("variables"), Some("variable.other.hew"));
        assert_eq!(HEW.catch_all("keywords"), None);
        assert_eq!(HEW.catch_all("missing"), None);
    }

    #[test]
    fn test_pattern_comment_fallback() {
        assert_eq!(HEW.rule("keyword.wire.hew").unwrap().pattern_comment(), GENERATED_COMMENT);
        assert_eq!(
            HEW.rule("keyword.reserved.hew").unwrap().pattern_comment(),
            "Reserved keywords (not yet used in the language)"
        );
    }

    // ========================================
    // Missing categories
    // ========================================

    #[test]
    fn test_missing_categories_none_for_complete_taxonomy() {
        assert!(HEW.missing_categories(&taxonomy()).is_empty());
    }

    #[test]
    fn test_missing_categories_reports_role_and_scope() {
        let mut t = taxonomy();
        t.keywords.remove("wire");
        t.types.remove("float");
        let missing = HEW.missing_categories(&t);
        assert_eq!(
            missing,
            vec![
                MissingCategory {
                    scope: "keyword.wire.hew",
                    role: ScopeRole::Keyword,
                    category: "wire",
                },
                MissingCategory {
                    scope: "storage.type.numeric.hew",
                    role: ScopeRole::Type,
                    category: "float",
                },
            ]
        );
    }

    // ========================================
    // Group building
    // ========================================

    #[test]
    fn test_groups_follow_table_order() {
        let groups = build_scope_groups(&taxonomy(), &HEW);
        let scopes: Vec<&str> = groups.iter().map(|g| g.scope).collect();
        let expected: Vec<&str> = HEW_SCOPES.iter().map(|r| r.scope).collect();
        assert_eq!(scopes, expected);
    }

    #[test]
    fn test_control_group_merges_category_and_extras_sorted() {
        let groups = build_scope_groups(&taxonomy(), &HEW);
        let control = groups.get("keyword.control.hew").unwrap();
        assert_eq!(
            words(control),
            vec!["after", "await", "cooperate", "else", "from", "if", "join", "scope", "select", "while"]
        );
    }

    #[test]
    fn test_numeric_group_merges_integer_and_float() {
        let groups = build_scope_groups(&taxonomy(), &HEW);
        assert_eq!(words(groups.get("storage.type.numeric.hew").unwrap()), vec!["f64", "i32", "i64"]);
    }

    #[test]
    fn test_generic_group_deduplicates_across_categories() {
        let groups = build_scope_groups(&taxonomy(), &HEW);
        let generic = groups.get("storage.type.generic.hew").unwrap();
        assert_eq!(generic.keywords.iter().filter(|k| k.as_str() == "Vec").count(), 1);
        assert!(generic.keywords.contains("Duration"));
        assert!(generic.keywords.contains("Weak"));
    }

    #[test]
    fn test_contextual_group_skips_exclusions() {
        let groups = build_scope_groups(&taxonomy(), &HEW);
        let contextual = groups.get("variable.language.contextual.hew").unwrap();
        assert_eq!(words(contextual), vec!["ready"]);
        assert_eq!(contextual.role, ScopeRole::Contextual);
    }

    #[test]
    fn test_fixed_only_groups_ignore_taxonomy() {
        let groups = build_scope_groups(&taxonomy(), &HEW);
        assert_eq!(words(groups.get("keyword.operator.logical.hew").unwrap()), vec!["and", "or"]);
        assert_eq!(
            words(groups.get("storage.type.trait.hew").unwrap()),
            vec!["Copy", "Frozen", "Send"]
        );
    }

    #[test]
    fn test_with_role_filters() {
        let groups = build_scope_groups(&taxonomy(), &HEW);
        assert_eq!(groups.with_role(ScopeRole::Keyword).count(), 10);
        assert_eq!(groups.with_role(ScopeRole::Type).count(), 5);
        assert_eq!(groups.with_role(ScopeRole::Contextual).count(), 1);
    }

    #[test]
    fn test_absent_category_contributes_nothing() {
        let mut t = taxonomy();
        t.keywords.remove("declarations");
        let groups = build_scope_groups(&t, &HEW);
        assert!(groups.get("keyword.declaration.hew").unwrap().keywords.is_empty());
    }

    #[test]
    fn test_custom_table() {
        const RULES: &[ScopeRule] = &[ScopeRule::keywords("keyword.control.test", &["control_flow"], &[])];
        const ROUTES: &[SectionRoute] = &[SectionRoute::new("keyword.", "keywords")];
        let table = ScopeTable::new(RULES, ROUTES);
        let groups = build_scope_groups(&taxonomy(), &table);
        assert_eq!(groups.len(), 1);
        assert_eq!(words(groups.get("keyword.control.test").unwrap()), vec!["else", "if", "while"]);
    }
}
