use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use colored::Colorize;
use kontent_import::{ImportOrchestrator, ImportOutcome};
use kontent_import_types::{
    BinaryFile, EntityKind, ImportConfig, ImportData, ImportSource, ProcessFilters,
};
use kontent_management::{
    KontentManagementClient, ManagementClientConfig, RetryConfig, DEFAULT_BASE_URL,
};
use tracing::{debug, info, warn};

const DATA_FILE: &str = "data.json";
const FILES_DIR: &str = "files";

#[derive(Args)]
pub struct ImportCommand {
    /// Directory with the unpacked export (data.json and files/)
    #[arg(long)]
    pub source: PathBuf,

    /// Target project id
    #[arg(long, env = "KONTENT_PROJECT_ID")]
    pub project_id: String,

    /// Management API key of the target project
    #[arg(long, env = "KONTENT_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Management API base URL
    #[arg(long, env = "KONTENT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Rename the target default language when its codename differs
    #[arg(long)]
    pub fix_languages: bool,

    /// Publish variants that were published in the source project
    #[arg(long)]
    pub enable_publish: bool,

    /// Move imported variants to this workflow step
    #[arg(long)]
    pub workflow_step_id: Option<String>,

    /// Entity kind to leave out, e.g. `asset` or `content-item` (repeatable)
    #[arg(long = "skip", value_parser = parse_kind)]
    pub skip: Vec<EntityKind>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Retries for transient API failures
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Write the import outcome as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

fn parse_kind(value: &str) -> Result<EntityKind, String> {
    EntityKind::parse(value).ok_or_else(|| format!("unknown entity kind '{}'", value))
}

/// Filters rejecting every entity of the skipped kinds
fn skip_filters(kinds: &[EntityKind]) -> ProcessFilters {
    kinds
        .iter()
        .fold(ProcessFilters::new(), |filters, kind| match kind {
            EntityKind::Language => filters.language(|_| false),
            EntityKind::Taxonomy => filters.taxonomy(|_| false),
            EntityKind::ContentTypeSnippet => filters.content_type_snippet(|_| false),
            EntityKind::ContentType => filters.content_type(|_| false),
            EntityKind::AssetFolder => filters.asset_folder(|_| false),
            EntityKind::Asset => filters.asset(|_| false),
            EntityKind::ContentItem => filters.content_item(|_| false),
            EntityKind::LanguageVariant => filters.language_variant(|_| false),
        })
}

/// Read `data.json` and the binary files of every asset from an export directory
fn load_source(dir: &Path, with_binaries: bool) -> anyhow::Result<ImportSource> {
    let data_path = dir.join(DATA_FILE);
    let raw = fs::read_to_string(&data_path)
        .with_context(|| format!("Failed to read {}", data_path.display()))?;
    let data: ImportData = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", data_path.display()))?;

    let mut binary_files = Vec::new();
    if with_binaries {
        for asset in &data.assets {
            let file_path = dir.join(FILES_DIR).join(&asset.id);
            if !file_path.exists() {
                warn!("No binary file for asset {} ({})", asset.id, asset.file_name);
                continue;
            }
            let content = fs::read(&file_path)
                .with_context(|| format!("Failed to read {}", file_path.display()))?;
            binary_files.push(BinaryFile::new(asset.id.clone(), content));
        }
    }
    debug!(
        "Loaded export with {} assets and {} binary files",
        data.assets.len(),
        binary_files.len()
    );

    Ok(ImportSource::new(data, binary_files))
}

fn print_summary(outcome: &ImportOutcome) {
    println!();
    println!("{}", "Import complete".bright_green().bold());
    for kind in [
        EntityKind::AssetFolder,
        EntityKind::Language,
        EntityKind::Taxonomy,
        EntityKind::ContentTypeSnippet,
        EntityKind::ContentType,
        EntityKind::Asset,
        EntityKind::ContentItem,
        EntityKind::LanguageVariant,
    ] {
        let count = outcome.items.iter().filter(|entry| entry.kind == kind).count();
        if count > 0 {
            println!("  {} {}", format!("{:>6}", count).bright_cyan(), kind);
        }
    }
    if !outcome.skipped_languages.is_empty() {
        println!(
            "  {} {}",
            "Existing languages:".bright_white(),
            outcome.skipped_languages.join(", ")
        );
    }
    if outcome.published > 0 {
        println!("  {} {}", "Published:".bright_white(), outcome.published);
    }
    if outcome.workflow_changes > 0 {
        println!(
            "  {} {}",
            "Workflow changes:".bright_white(),
            outcome.workflow_changes
        );
    }
    if !outcome.unsupported_binary_files.is_empty() {
        println!(
            "  {} {}",
            "Uploaded empty (too large):".bright_yellow(),
            outcome.unsupported_binary_files.join(", ")
        );
    }
    println!("  {} {:.1}s", "Duration:".bright_white(), outcome.duration_seconds);
    println!();
}

impl ImportCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        info!("Importing {} into project {}", self.source.display(), self.project_id);

        let source = load_source(&self.source, !self.skip.contains(&EntityKind::Asset))?;

        let client_config = ManagementClientConfig::new(&self.project_id, &self.api_key)
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry(RetryConfig {
                max_retries: self.max_retries,
                ..RetryConfig::default()
            });
        let client = KontentManagementClient::new(client_config)?;

        let config = ImportConfig {
            enable_publish: self.enable_publish,
            workflow_id_for_imported_items: self.workflow_step_id.clone(),
            fix_languages: self.fix_languages,
            ..ImportConfig::default()
        };
        let orchestrator = ImportOrchestrator::new(Arc::new(client), config)
            .with_filters(skip_filters(&self.skip));

        let rt = tokio::runtime::Runtime::new()?;
        let outcome = rt.block_on(orchestrator.import(&source))?;

        if let Some(report) = &self.report {
            fs::write(report, serde_json::to_vec_pretty(&outcome)?)
                .with_context(|| format!("Failed to write {}", report.display()))?;
            info!("Wrote import report to {}", report.display());
        }
        print_summary(&outcome);

        Ok(())
    }
}
