//! Import source: the exported snapshot being restored

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::contracts::{
    AssetContract, AssetFolderContract, ContentItemContract, ContentTypeContract,
    ContentTypeSnippetContract, LanguageContract, LanguageVariantContract, TaxonomyContract,
    WorkflowStepContract,
};

/// Entity collections of an export, in the order they were exported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportData {
    #[serde(default)]
    pub languages: Vec<LanguageContract>,
    #[serde(default)]
    pub taxonomies: Vec<TaxonomyContract>,
    #[serde(default)]
    pub content_type_snippets: Vec<ContentTypeSnippetContract>,
    #[serde(default)]
    pub content_types: Vec<ContentTypeContract>,
    /// Root folders; children hang off each node
    #[serde(default)]
    pub asset_folders: Vec<AssetFolderContract>,
    #[serde(default)]
    pub assets: Vec<AssetContract>,
    #[serde(default)]
    pub content_items: Vec<ContentItemContract>,
    #[serde(default)]
    pub language_variants: Vec<LanguageVariantContract>,
    #[serde(default)]
    pub workflow_steps: Vec<WorkflowStepContract>,
}

/// Binary payload of an asset, keyed by the asset's original id
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryFile {
    pub asset_id: String,
    pub data: Bytes,
    pub size_bytes: u64,
}

impl BinaryFile {
    pub fn new(asset_id: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            asset_id: asset_id.into(),
            size_bytes: data.len() as u64,
            data,
        }
    }
}

/// Everything needed to restore a project
#[derive(Debug, Clone, Default)]
pub struct ImportSource {
    pub data: ImportData,
    pub binary_files: Vec<BinaryFile>,
}

impl ImportSource {
    pub fn new(data: ImportData, binary_files: Vec<BinaryFile>) -> Self {
        Self { data, binary_files }
    }

    /// Binary payload for an asset, if the export contains one
    pub fn binary_file(&self, asset_id: &str) -> Option<&BinaryFile> {
        self.binary_files.iter().find(|file| file.asset_id == asset_id)
    }
}
