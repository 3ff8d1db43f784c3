//! Progress events

use serde::Serialize;
use serde_json::Value;

use crate::{kind::ImportEventKind, source::BinaryFile};

/// One successfully processed entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportEvent {
    #[serde(rename = "type")]
    pub kind: ImportEventKind,
    pub title: String,
    /// The entity as returned by the target project
    pub data: Value,
}

/// Receives progress events from an import run
///
/// Called synchronously after the ledger has been updated. Implementations
/// observe only; they cannot alter the run.
pub trait ImportObserver: Send + Sync {
    fn on_import(&self, _event: &ImportEvent) {}

    /// A binary payload exceeded the size ceiling and was uploaded empty
    fn on_unsupported_binary_file(&self, _file: &BinaryFile) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ImportObserver for NoopObserver {}
