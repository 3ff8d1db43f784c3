//! Import configuration and inclusion filters

use serde::{Deserialize, Serialize};

use crate::contracts::{
    AssetContract, AssetFolderContract, ContentItemContract, ContentTypeContract,
    ContentTypeSnippetContract, LanguageContract, LanguageVariantContract, TaxonomyContract,
};

/// Largest binary payload the management API accepts
pub const MAX_ASSET_SIZE_BYTES: u64 = 100_000_000;

/// Options controlling an import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Log each imported entity at info level instead of debug
    pub enable_log: bool,
    /// Publish variants whose source workflow step is "Published"
    pub enable_publish: bool,
    /// Move every imported variant to this workflow step of the target
    pub workflow_id_for_imported_items: Option<String>,
    /// Rename the target default language to match the source instead of failing
    pub fix_languages: bool,
    /// Payloads at or above this size are uploaded empty
    pub max_asset_size_bytes: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            enable_log: true,
            enable_publish: false,
            workflow_id_for_imported_items: None,
            fix_languages: false,
            max_asset_size_bytes: MAX_ASSET_SIZE_BYTES,
        }
    }
}

/// Inclusion predicate for one entity kind
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Per-kind inclusion predicates
///
/// An entity is kept when its kind has no predicate or the predicate returns
/// `true`.
#[derive(Default)]
pub struct ProcessFilters {
    pub language: Option<Predicate<LanguageContract>>,
    pub taxonomy: Option<Predicate<TaxonomyContract>>,
    pub content_type_snippet: Option<Predicate<ContentTypeSnippetContract>>,
    pub content_type: Option<Predicate<ContentTypeContract>>,
    pub asset_folder: Option<Predicate<AssetFolderContract>>,
    pub asset: Option<Predicate<AssetContract>>,
    pub content_item: Option<Predicate<ContentItemContract>>,
    pub language_variant: Option<Predicate<LanguageVariantContract>>,
}

impl ProcessFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(
        mut self,
        f: impl Fn(&LanguageContract) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.language = Some(Box::new(f));
        self
    }

    pub fn taxonomy(
        mut self,
        f: impl Fn(&TaxonomyContract) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.taxonomy = Some(Box::new(f));
        self
    }

    pub fn content_type_snippet(
        mut self,
        f: impl Fn(&ContentTypeSnippetContract) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.content_type_snippet = Some(Box::new(f));
        self
    }

    pub fn content_type(
        mut self,
        f: impl Fn(&ContentTypeContract) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.content_type = Some(Box::new(f));
        self
    }

    pub fn asset_folder(
        mut self,
        f: impl Fn(&AssetFolderContract) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.asset_folder = Some(Box::new(f));
        self
    }

    pub fn asset(mut self, f: impl Fn(&AssetContract) -> bool + Send + Sync + 'static) -> Self {
        self.asset = Some(Box::new(f));
        self
    }

    pub fn content_item(
        mut self,
        f: impl Fn(&ContentItemContract) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.content_item = Some(Box::new(f));
        self
    }

    pub fn language_variant(
        mut self,
        f: impl Fn(&LanguageVariantContract) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.language_variant = Some(Box::new(f));
        self
    }

    /// Whether any predicate is configured
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.taxonomy.is_none()
            && self.content_type_snippet.is_none()
            && self.content_type.is_none()
            && self.asset_folder.is_none()
            && self.asset.is_none()
            && self.content_item.is_none()
            && self.language_variant.is_none()
    }
}

impl std::fmt::Debug for ProcessFilters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessFilters")
            .field("language", &self.language.is_some())
            .field("taxonomy", &self.taxonomy.is_some())
            .field("content_type_snippet", &self.content_type_snippet.is_some())
            .field("content_type", &self.content_type.is_some())
            .field("asset_folder", &self.asset_folder.is_some())
            .field("asset", &self.asset.is_some())
            .field("content_item", &self.content_item.is_some())
            .field("language_variant", &self.language_variant.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_api_size_ceiling() {
        let config = ImportConfig::default();
        assert_eq!(config.max_asset_size_bytes, 100_000_000);
        assert!(!config.fix_languages);
        assert!(!config.enable_publish);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ImportConfig =
            serde_json::from_str(r#"{ "fix_languages": true }"#).unwrap();
        assert!(config.fix_languages);
        assert!(config.enable_log);
        assert_eq!(config.max_asset_size_bytes, MAX_ASSET_SIZE_BYTES);
    }

    #[test]
    fn test_filters_builder() {
        let filters = ProcessFilters::new().content_item(|item| item.codename != "hidden");
        assert!(!filters.is_empty());
        assert!(filters.content_item.is_some());
        assert!(filters.asset.is_none());
    }
}
