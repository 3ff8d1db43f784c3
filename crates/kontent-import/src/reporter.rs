//! Progress reporting
//!
//! Forwards every processed entity to the configured observer and to the log.
//! Reporting never influences the run.

use kontent_import_types::{AssetContract, BinaryFile, ImportEvent, ImportEventKind, ImportObserver};
use serde_json::Value;
use tracing::{debug, info, warn};

pub(crate) struct ProgressReporter<'a> {
    observer: &'a dyn ImportObserver,
    enable_log: bool,
}

impl<'a> ProgressReporter<'a> {
    pub(crate) fn new(observer: &'a dyn ImportObserver, enable_log: bool) -> Self {
        Self {
            observer,
            enable_log,
        }
    }

    pub(crate) fn imported(&self, kind: ImportEventKind, title: &str, data: &Value) {
        if self.enable_log {
            info!("Imported {}: {}", kind, title);
        } else {
            debug!("Imported {}: {}", kind, title);
        }

        self.observer.on_import(&ImportEvent {
            kind,
            title: title.to_string(),
            data: data.clone(),
        });
    }

    pub(crate) fn skipped(&self, kind: ImportEventKind, title: &str, reason: &str) {
        if self.enable_log {
            info!("Skipping {} '{}': {}", kind, title, reason);
        } else {
            debug!("Skipping {} '{}': {}", kind, title, reason);
        }
    }

    pub(crate) fn unsupported_binary_file(
        &self,
        asset: &AssetContract,
        file: &BinaryFile,
        limit: u64,
    ) {
        warn!(
            asset_id = %asset.id,
            file_name = %asset.file_name,
            size_bytes = file.size_bytes,
            limit_bytes = limit,
            "Binary file exceeds the maximum allowed size, uploading empty content"
        );
        self.observer.on_unsupported_binary_file(file);
    }
}
