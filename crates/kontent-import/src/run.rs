//! State of a single import run
//!
//! The per-kind importers in [`crate::importers`] extend [`ImportRun`] with one
//! `impl` block each. Entities are processed strictly one after another: a
//! ledger write completes before the next request is issued.

use kontent_import_types::{
    EntityKind, ImportConfig, ImportError, ImportResult, ManagementClient, ManagementError,
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::{
    ledger::ImportLedger,
    reporter::ProgressReporter,
    translator::{ensure_symbolic, strip_nested_ids, SymbolIndex},
};

/// Counters kept alongside the ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Codenames of source languages that already existed in the target
    pub skipped_languages: Vec<String>,
    /// Codenames of existing inactive languages that were activated
    pub reactivated_languages: Vec<String>,
    pub published: usize,
    pub workflow_changes: usize,
    /// Asset ids whose payload exceeded the size ceiling
    pub unsupported_binary_files: Vec<String>,
}

/// Variant accepted by the target, kept for the publish and workflow passes
#[derive(Debug, Clone)]
pub(crate) struct UpsertedVariant {
    pub(crate) title: String,
    pub(crate) item_codename: String,
    pub(crate) language_codename: String,
    /// Workflow step id in the source project
    pub(crate) source_workflow_step: Option<String>,
    pub(crate) published: bool,
}

pub(crate) struct ImportRun<'a> {
    pub(crate) client: &'a dyn ManagementClient,
    pub(crate) config: &'a ImportConfig,
    pub(crate) reporter: ProgressReporter<'a>,
    pub(crate) symbols: SymbolIndex,
    pub(crate) ledger: ImportLedger,
    pub(crate) stats: RunStats,
    pub(crate) variants: Vec<UpsertedVariant>,
    /// Codename of the default language, once known
    pub(crate) default_language_codename: Option<String>,
}

impl<'a> ImportRun<'a> {
    pub(crate) fn new(
        client: &'a dyn ManagementClient,
        config: &'a ImportConfig,
        reporter: ProgressReporter<'a>,
        symbols: SymbolIndex,
    ) -> Self {
        Self {
            client,
            config,
            reporter,
            symbols,
            ledger: ImportLedger::new(),
            stats: RunStats::default(),
            variants: Vec::new(),
            default_language_codename: None,
        }
    }

    /// Log a failed request and turn it into the error that aborts the run
    pub(crate) fn fail(
        &self,
        operation: &str,
        title: &str,
        source: ManagementError,
    ) -> ImportError {
        error!(
            operation,
            title,
            status = ?source.status(),
            error = %source,
            "Import request failed, aborting"
        );
        ImportError::remote(format!("{} '{}'", operation, title), source)
    }

    /// Record an acknowledged entity and report it
    pub(crate) fn record<O: Serialize, I: Serialize>(
        &mut self,
        kind: EntityKind,
        original_id: &str,
        imported_id: &str,
        original: &O,
        imported: &I,
        title: &str,
    ) -> ImportResult<()> {
        let entry = self.ledger.record(
            kind,
            original_id,
            imported_id,
            serde_json::to_value(original)?,
            serde_json::to_value(imported)?,
        )?;
        self.reporter.imported(kind.into(), title, &entry.imported);
        Ok(())
    }

    /// Schema payload ready to send: fully symbolic, without source ids
    pub(crate) fn schema_payload(
        &self,
        values: &[Value],
        context: &str,
    ) -> ImportResult<Vec<Value>> {
        let mut payload = values.to_vec();
        for value in payload.iter_mut() {
            ensure_symbolic(value, context)?;
            strip_nested_ids(value);
        }
        Ok(payload)
    }
}
