//! Import orchestrator service
//!
//! Runs the per-kind importers in their fixed dependency order against one
//! target project.

use std::sync::Arc;
use std::time::Instant;

use kontent_import_types::{
    ImportConfig, ImportObserver, ImportResult, ImportSource, ManagementClient, NoopObserver,
    ProcessFilters,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    filter::apply_filters,
    ledger::LedgerEntry,
    reporter::ProgressReporter,
    run::{ImportRun, RunStats},
    translator::{normalize_import_data, SymbolIndex},
};

/// Result of a completed import
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    /// Every imported entity of every stage, in import order
    pub items: Vec<LedgerEntry>,
    pub skipped_languages: Vec<String>,
    pub reactivated_languages: Vec<String>,
    pub published: usize,
    pub workflow_changes: usize,
    pub unsupported_binary_files: Vec<String>,
    pub duration_seconds: f64,
}

impl ImportOutcome {
    fn new(items: Vec<LedgerEntry>, stats: RunStats, started: Instant) -> Self {
        Self {
            items,
            skipped_languages: stats.skipped_languages,
            reactivated_languages: stats.reactivated_languages,
            published: stats.published,
            workflow_changes: stats.workflow_changes,
            unsupported_binary_files: stats.unsupported_binary_files,
            duration_seconds: started.elapsed().as_secs_f64(),
        }
    }
}

/// Import orchestrator restoring an export into a target project
pub struct ImportOrchestrator {
    client: Arc<dyn ManagementClient>,
    config: ImportConfig,
    filters: ProcessFilters,
    observer: Arc<dyn ImportObserver>,
}

impl ImportOrchestrator {
    pub fn new(client: Arc<dyn ManagementClient>, config: ImportConfig) -> Self {
        Self {
            client,
            config,
            filters: ProcessFilters::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_filters(mut self, filters: ProcessFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ImportObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Import everything the filters keep
    ///
    /// Stages run strictly in order and the first error aborts the run.
    /// Entities created before the failure stay in the target project.
    pub async fn import(&self, source: &ImportSource) -> ImportResult<ImportOutcome> {
        let started = Instant::now();
        info!(
            "Starting import: {} languages, {} types, {} assets, {} items, {} variants",
            source.data.languages.len(),
            source.data.content_types.len(),
            source.data.assets.len(),
            source.data.content_items.len(),
            source.data.language_variants.len()
        );

        let filtered = if self.filters.is_empty() {
            source.data.clone()
        } else {
            debug!("Applying inclusion filters");
            apply_filters(&self.filters, &source.data)
        };
        let symbols = SymbolIndex::build(&filtered)?;
        if symbols.is_empty() {
            debug!("Nothing to index for symbolic references");
        } else {
            debug!("Indexed {} symbolic references", symbols.len());
        }
        let data = normalize_import_data(&filtered, &symbols)?;

        let reporter = ProgressReporter::new(self.observer.as_ref(), self.config.enable_log);
        let mut run = ImportRun::new(self.client.as_ref(), &self.config, reporter, symbols);

        if !data.languages.is_empty() {
            run.prepare_default_language(&data.languages).await?;
        }

        if data.asset_folders.is_empty() {
            debug!("No asset folders to import");
        } else {
            info!("Importing asset folders");
            run.import_asset_folders(&data.asset_folders).await?;
        }

        if data.languages.is_empty() {
            debug!("No languages to import");
        } else {
            info!("Importing {} languages", data.languages.len());
            run.import_languages(&data.languages).await?;
        }

        if data.taxonomies.is_empty() {
            debug!("No taxonomies to import");
        } else {
            info!("Importing {} taxonomies", data.taxonomies.len());
            run.import_taxonomies(&data.taxonomies).await?;
        }

        if data.content_type_snippets.is_empty() {
            debug!("No content type snippets to import");
        } else {
            info!(
                "Importing {} content type snippets",
                data.content_type_snippets.len()
            );
            run.import_content_type_snippets(&data.content_type_snippets)
                .await?;
        }

        if data.content_types.is_empty() {
            debug!("No content types to import");
        } else {
            info!("Importing {} content types", data.content_types.len());
            run.import_content_types(&data.content_types).await?;
        }

        if data.assets.is_empty() {
            debug!("No assets to import");
        } else {
            info!("Importing {} assets", data.assets.len());
            run.import_assets(&data.assets, source).await?;
        }

        if data.content_items.is_empty() {
            debug!("No content items to import");
        } else {
            info!("Importing {} content items", data.content_items.len());
            run.import_content_items(&data.content_items).await?;
        }

        if data.language_variants.is_empty() {
            debug!("No language variants to import");
        } else {
            info!(
                "Importing {} language variants",
                data.language_variants.len()
            );
            run.import_language_variants(&data.language_variants)
                .await?;
        }

        if self.config.enable_publish && !run.variants.is_empty() {
            info!("Publishing language variants");
            run.publish_language_variants(&data.workflow_steps).await?;
        }

        if let Some(workflow_step_id) = &self.config.workflow_id_for_imported_items {
            if !run.variants.is_empty() {
                info!("Moving imported variants to workflow step {}", workflow_step_id);
                run.change_workflow_steps(workflow_step_id).await?;
            }
        }

        let outcome = ImportOutcome::new(run.ledger.into_entries(), run.stats, started);
        info!(
            "Import finished: {} entities in {:.2}s",
            outcome.items.len(),
            outcome.duration_seconds
        );
        Ok(outcome)
    }
}
