//! Request journal for the mock engine
//!
//! Records every request the engine answered so that tests can check what
//! a program submitted. Recording never influences responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Kind of engine request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// `create_resource`
    CreateResource,
    /// `call`
    Call,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::CreateResource => write!(f, "create"),
            RequestKind::Call => write!(f, "call"),
        }
    }
}

/// A single answered request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub kind: RequestKind,

    /// Type token or function token
    pub token: String,

    /// Logical name (resources only)
    pub logical_name: Option<String>,

    /// Whether a token-specific override was applied
    pub overridden: bool,

    pub recorded_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn resource(token: impl Into<String>, logical_name: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::CreateResource,
            token: token.into(),
            logical_name: Some(logical_name.into()),
            overridden: false,
            recorded_at: Utc::now(),
        }
    }

    pub fn call(token: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::Call,
            token: token.into(),
            logical_name: None,
            overridden: false,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_overridden(mut self, overridden: bool) -> Self {
        self.overridden = overridden;
        self
    }
}

/// Append-only list of answered requests
///
/// Never trimmed; it grows for the lifetime of its engine.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Mutex<Vec<JournalEntry>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: JournalEntry) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
    }

    /// Snapshot of all entries in submission order
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries of a given kind
    pub fn of_kind(&self, kind: RequestKind) -> Vec<JournalEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.kind == kind)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_keeps_order() {
        let journal = Journal::new();
        assert!(journal.is_empty());

        journal.record(JournalEntry::resource("azure-native:resources:ResourceGroup", "rg"));
        journal.record(
            JournalEntry::call("azure-native:storage:listStorageAccountKeys").with_overridden(true),
        );

        let entries = journal.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].logical_name.as_deref(), Some("rg"));
        assert!(entries[1].overridden);
        assert_eq!(journal.of_kind(RequestKind::Call).len(), 1);
        assert_eq!(RequestKind::CreateResource.to_string(), "create");
    }
}
