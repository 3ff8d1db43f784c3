//! Management API client trait
//!
//! The importers talk to the target project only through this trait. One
//! method per request; retries and timeouts are the implementation's concern.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    contracts::{
        AssetContract, AssetDescription, AssetFolderContract, ContentItemContract,
        ContentTypeContract, ContentTypeSnippetContract, FileReference, LanguageContract,
        LanguageVariantContract, TaxonomyContract,
    },
    error::ManagementResult,
    reference::Reference,
};

/// Payload for creating a language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageData {
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_language: Option<Reference>,
}

/// Single operation of a language PATCH request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguagePatch {
    pub op: String,
    pub property_name: String,
    pub value: Value,
}

impl LanguagePatch {
    pub fn replace(property_name: impl Into<String>, value: Value) -> Self {
        Self {
            op: "replace".to_string(),
            property_name: property_name.into(),
            value,
        }
    }

    pub fn rename(codename: &str) -> Self {
        Self::replace("codename", Value::String(codename.to_string()))
    }

    pub fn activate() -> Self {
        Self::replace("is_active", Value::Bool(true))
    }
}

/// Payload for creating a taxonomy group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyData {
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub terms: Vec<Value>,
}

/// Payload for creating a content type snippet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSnippetData {
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub elements: Vec<Value>,
}

/// Payload for creating a content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeData {
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub elements: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_groups: Vec<Value>,
}

/// Folder node of a folder-tree creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFolderData {
    pub name: String,
    pub external_id: String,
    #[serde(default)]
    pub folders: Vec<AssetFolderData>,
}

/// Binary upload request
#[derive(Debug, Clone, PartialEq)]
pub struct UploadBinaryFileData {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Payload for creating an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetData {
    pub file_reference: FileReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<Reference>,
    #[serde(default)]
    pub descriptions: Vec<AssetDescription>,
}

/// Payload for creating a content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItemData {
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Reference,
}

/// Payload for upserting a language variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageVariantData {
    pub elements: Vec<Value>,
}

/// Client for the target project's management API
#[async_trait]
pub trait ManagementClient: Send + Sync {
    /// List every language of the target project
    async fn list_languages(&self) -> ManagementResult<Vec<LanguageContract>>;

    async fn add_language(&self, data: &LanguageData) -> ManagementResult<LanguageContract>;

    /// Apply patch operations to an existing language
    async fn modify_language(
        &self,
        language: &Reference,
        operations: &[LanguagePatch],
    ) -> ManagementResult<LanguageContract>;

    async fn add_taxonomy(&self, data: &TaxonomyData) -> ManagementResult<TaxonomyContract>;

    async fn add_content_type_snippet(
        &self,
        data: &ContentTypeSnippetData,
    ) -> ManagementResult<ContentTypeSnippetContract>;

    async fn add_content_type(
        &self,
        data: &ContentTypeData,
    ) -> ManagementResult<ContentTypeContract>;

    /// Create a folder tree in one request; returns the created tree
    async fn add_asset_folders(
        &self,
        folders: &[AssetFolderData],
    ) -> ManagementResult<Vec<AssetFolderContract>>;

    async fn upload_binary_file(
        &self,
        data: &UploadBinaryFileData,
    ) -> ManagementResult<FileReference>;

    async fn add_asset(&self, data: &AssetData) -> ManagementResult<AssetContract>;

    async fn add_content_item(
        &self,
        data: &ContentItemData,
    ) -> ManagementResult<ContentItemContract>;

    /// Create or replace the variant of an item in a language
    async fn upsert_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
        data: &LanguageVariantData,
    ) -> ManagementResult<LanguageVariantContract>;

    async fn publish_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
    ) -> ManagementResult<()>;

    async fn change_workflow_step(
        &self,
        item_codename: &str,
        language_codename: &str,
        workflow_step_id: &str,
    ) -> ManagementResult<()>;
}
