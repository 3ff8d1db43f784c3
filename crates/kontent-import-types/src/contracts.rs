//! Entity contracts
//!
//! Serialized shapes of entities as the management API exports and returns
//! them. Top-level identity fields are typed; nested schema payloads (taxonomy
//! terms, type elements, variant elements) stay as JSON so reference rewriting
//! can walk them without knowing every element type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reference::{Reference, DEFAULT_LANGUAGE_ID};

/// Common accessors used by the ledger, filters and progress reporting
pub trait Contract {
    /// Identity of the entity in the project it was read from
    fn original_id(&self) -> String;

    /// Human-readable label for progress output
    fn title(&self) -> String;
}

/// Project language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageContract {
    pub id: String,
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_language: Option<Reference>,
}

impl LanguageContract {
    /// The default language is identified by the sentinel id, not by its flag
    pub fn is_default_language(&self) -> bool {
        self.id == DEFAULT_LANGUAGE_ID
    }
}

/// Taxonomy group with its nested term tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyContract {
    pub id: String,
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Nested terms (`{ id, name, codename, terms: [...] }`)
    #[serde(default)]
    pub terms: Vec<Value>,
}

/// Reusable group of elements shared between content types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSnippetContract {
    pub id: String,
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub elements: Vec<Value>,
}

/// Content type schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeContract {
    pub id: String,
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub elements: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_groups: Vec<Value>,
}

/// Asset folder node; folders form a tree through `folders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFolderContract {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub folders: Vec<AssetFolderContract>,
}

/// Reference to an uploaded binary file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    pub id: String,
    #[serde(rename = "type", default = "FileReference::internal_type")]
    pub reference_type: String,
}

impl FileReference {
    pub fn internal(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reference_type: Self::internal_type(),
        }
    }

    fn internal_type() -> String {
        "internal".to_string()
    }
}

/// Localized asset description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescription {
    pub language: Reference,
    #[serde(default)]
    pub description: Option<String>,
}

/// Asset metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetContract {
    pub id: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Size of the binary payload in bytes
    #[serde(default)]
    pub size: u64,
    /// MIME type of the binary payload
    #[serde(rename = "type", default)]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_reference: Option<FileReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub descriptions: Vec<AssetDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Content item (language-independent part of a piece of content)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItemContract {
    pub id: String,
    pub name: String,
    pub codename: String,
    #[serde(rename = "type")]
    pub content_type: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Language-specific content of a content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageVariantContract {
    pub item: Reference,
    pub language: Reference,
    #[serde(default)]
    pub elements: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_step: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl LanguageVariantContract {
    /// Ledger identity of a variant: its item and language ids
    pub fn composite_id(&self) -> String {
        format!(
            "{}:{}",
            reference_key(&self.item),
            reference_key(&self.language)
        )
    }
}

/// Workflow step definition of the source project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStepContract {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
}

impl WorkflowStepContract {
    /// Published step is recognised by name; step ids differ between projects
    pub fn is_published(&self) -> bool {
        self.name.eq_ignore_ascii_case("published")
    }
}

fn reference_key(reference: &Reference) -> &str {
    match reference {
        Reference::Id(value) | Reference::Codename(value) | Reference::ExternalId(value) => value,
    }
}

impl Contract for LanguageContract {
    fn original_id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl Contract for TaxonomyContract {
    fn original_id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl Contract for ContentTypeSnippetContract {
    fn original_id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl Contract for ContentTypeContract {
    fn original_id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl Contract for AssetFolderContract {
    fn original_id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl Contract for AssetContract {
    fn original_id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.file_name.clone())
    }
}

impl Contract for ContentItemContract {
    fn original_id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl Contract for LanguageVariantContract {
    fn original_id(&self) -> String {
        self.composite_id()
    }

    fn title(&self) -> String {
        format!("{} ({})", reference_key(&self.item), reference_key(&self.language))
    }
}
