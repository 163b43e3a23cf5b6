//! Generate a Markdown reference of the grammar scope table.
//!
//! This binary renders [`hew_vocab::scopes::HEW`] (which taxonomy categories and fixed spellings feed each
//! TextMate scope, and where generated patterns are routed) into `docs/grammar/scopes.md`.
//!
//! ## Notes
//! - The generated file is a derived artifact; edit the scope table instead.
//!
//! ## Examples
//! Run from the workspace root:
//! ```bash
//! cargo run -p hew_vocab --bin generate_scope_reference
//! ```
//!
//! ## Panics
//! - If the workspace root cannot be resolved.
//! - If the output file cannot be written.

use std::fs;
use std::path::{Path, PathBuf};

use hew_vocab::scopes::{HEW, ScopeRole, ScopeRule, ScopeTable};

fn trim_trailing_newlines_to_at_most_two(out: &mut String) {
    let mut count = 0usize;
    for ch in out.chars().rev() {
        if ch == '\n' {
            count += 1;
        } else {
            break;
        }
    }
    while count > 2 {
        out.pop();
        count -= 1;
    }
}

fn start_section(out: &mut String, heading: &str) {
    trim_trailing_newlines_to_at_most_two(out);
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push_str(if out.ends_with('\n') { "\n" } else { "\n\n" });
    }
    out.push_str(heading);
    out.push_str("\n\n");
}

fn main() {
    let root = workspace_root();

    let out_dir = root.join("docs/grammar");
    fs::create_dir_all(&out_dir).expect("create docs/grammar/");

    write_scope_reference(&out_dir.join("scopes.md"), &HEW);
}

fn write_scope_reference(path: &Path, table: &ScopeTable) {
    let mut out = render_scope_reference(table);
    trim_trailing_newlines_to_at_most_two(&mut out);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    fs::write(path, out).expect("write scopes.md");
}

fn render_scope_reference(table: &ScopeTable) -> String {
    let mut out = String::new();
    out.push_str("# Hew grammar scopes\n\n");
    out.push_str("!!! warning \"Generated file\"\n");
    out.push_str("    Do not edit this page by hand.\n\n");
    out.push_str("    Regenerate with: `cargo run -p hew_vocab --bin generate_scope_reference`\n\n");

    render_rules_section(&mut out, "## Keyword scopes", table, ScopeRole::Keyword);
    render_rules_section(&mut out, "## Type scopes", table, ScopeRole::Type);
    render_rules_section(&mut out, "## Contextual scopes", table, ScopeRole::Contextual);
    render_routes_section(&mut out, table);
    out
}

fn render_rules_section(out: &mut String, heading: &str, table: &ScopeTable, role: ScopeRole) {
    start_section(out, heading);

    out.push_str(&format!(
        "| Scope | Taxonomy `{}` | Fixed additions | Excluded | Section |\n",
        role.taxonomy_section()
    ));
    out.push_str("|---|---|---|---|---|\n");

    for rule in table.rules.iter().filter(|r| r.role == role) {
        let section = table.route(rule.scope).map(|r| r.section).unwrap_or("(not inserted)");
        out.push_str(&format!(
            "| `{}` | {} | {} | {} | {} |\n",
            rule.scope,
            code_list(categories_for(rule)),
            code_list(rule.extras),
            code_list(rule.excluded),
            section
        ));
    }
    out.push('\n');
}

fn render_routes_section(out: &mut String, table: &ScopeTable) {
    start_section(out, "## Section routing");

    out.push_str("| Scope prefix | Section | Inserted before |\n");
    out.push_str("|---|---|---|\n");
    for route in table.routes {
        let before = route.catch_all.map(|s| format!("`{s}`")).unwrap_or_default();
        out.push_str(&format!("| `{}` | {} | {} |\n", route.prefix, route.section, before));
    }
    out.push('\n');
}

fn categories_for(rule: &ScopeRule) -> &'static [&'static str] {
    match rule.role {
        ScopeRole::Contextual => &["*"],
        _ => rule.categories,
    }
}

fn code_list(items: &[&str]) -> String {
    items.iter().map(|s| format!("`{s}`")).collect::<Vec<_>>().join(", ")
}

fn workspace_root() -> PathBuf {
    // crates/hew_vocab -> crates -> workspace root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .expect("workspace root (two levels above crates/hew_vocab)")
}
