//! Change records produced by a synchronization run.
//!
//! Records are appended in the order the walker and the inserter emit them and are never modified afterwards.
//! Rendering is purely observational.

use std::fmt::Write as _;

/// What happened to a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    /// An existing pattern got a new `match` regex.
    Updated,
    /// A pattern was generated for a scope the grammar did not have.
    Added,
}

/// One change to the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    scope: String,
    path: String,
    previous: Option<String>,
    regex: String,
    action: ChangeAction,
}

impl ChangeRecord {
    pub fn updated(
        scope: impl Into<String>,
        path: impl Into<String>,
        previous: impl Into<String>,
        regex: impl Into<String>,
    ) -> Self {
        Self {
            scope: scope.into(),
            path: path.into(),
            previous: Some(previous.into()),
            regex: regex.into(),
            action: ChangeAction::Updated,
        }
    }

    pub fn added(scope: impl Into<String>, path: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            path: path.into(),
            previous: None,
            regex: regex.into(),
            action: ChangeAction::Added,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Containing sequence, e.g. `patterns` or `repository.keywords`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Regex before the change; `None` for added patterns.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn regex(&self) -> &str {
        &self.regex
    }

    pub fn action(&self) -> ChangeAction {
        self.action
    }
}

/// Append-only list of [`ChangeRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    records: Vec<ChangeRecord>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ChangeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records with the given action.
    pub fn count(&self, action: ChangeAction) -> usize {
        self.records.iter().filter(|r| r.action == action).count()
    }

    /// Human-readable summary, one block per record.
    pub fn render(&self) -> String {
        if self.records.is_empty() {
            return "No changes needed, grammar already in sync.\n".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "{} pattern(s) changed:\n", self.records.len());
        for record in &self.records {
            match record.action {
                ChangeAction::Added => {
                    let _ = writeln!(out, "  + {} (new pattern in {})", record.scope, record.path);
                    let _ = writeln!(out, "    {}\n", record.regex);
                }
                ChangeAction::Updated => {
                    let _ = writeln!(out, "  ~ {} ({})", record.scope, record.path);
                    let _ = writeln!(out, "    old: {}", record.previous.as_deref().unwrap_or_default());
                    let _ = writeln!(out, "    new: {}\n", record.regex);
                }
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
