//! Import ledger
//!
//! Append-only record of every entity the target acknowledged, mapping
//! `(kind, original id)` to the id the target assigned.

use std::collections::HashMap;

use kontent_import_types::{EntityKind, ImportError, ImportResult};
use serde::Serialize;
use serde_json::Value;

/// One imported entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub kind: EntityKind,
    pub original_id: String,
    pub imported_id: String,
    /// Entity as read from the import source
    pub original: Value,
    /// Entity as returned by the target project
    pub imported: Value,
}

/// Run-scoped mapping from source identity to target identity
#[derive(Debug, Default)]
pub struct ImportLedger {
    entries: Vec<LedgerEntry>,
    index: HashMap<(EntityKind, String), usize>,
}

impl ImportLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; an id can be recorded once per kind
    pub fn record(
        &mut self,
        kind: EntityKind,
        original_id: impl Into<String>,
        imported_id: impl Into<String>,
        original: Value,
        imported: Value,
    ) -> ImportResult<&LedgerEntry> {
        let original_id = original_id.into();
        let key = (kind, original_id.clone());
        if self.index.contains_key(&key) {
            return Err(ImportError::DuplicateLedgerEntry { kind, original_id });
        }

        let position = self.entries.len();
        self.entries.push(LedgerEntry {
            kind,
            original_id,
            imported_id: imported_id.into(),
            original,
            imported,
        });
        self.index.insert(key, position);

        Ok(&self.entries[position])
    }

    /// Target id of an imported entity
    pub fn lookup(&self, kind: EntityKind, original_id: &str) -> Option<&str> {
        self.entry(kind, original_id)
            .map(|entry| entry.imported_id.as_str())
    }

    pub fn entry(&self, kind: EntityKind, original_id: &str) -> Option<&LedgerEntry> {
        self.index
            .get(&(kind, original_id.to_string()))
            .map(|position| &self.entries[*position])
    }

    /// First kind in `kinds` that recorded `original_id`, with its target id
    pub fn find(&self, kinds: &[EntityKind], original_id: &str) -> Option<(EntityKind, &str)> {
        kinds.iter().find_map(|kind| {
            self.lookup(*kind, original_id)
                .map(|imported_id| (*kind, imported_id))
        })
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LedgerEntry> {
        self.entries
    }
}
