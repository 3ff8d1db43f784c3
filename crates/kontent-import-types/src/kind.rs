//! Entity kinds and observer event tags

use serde::{Deserialize, Serialize};

/// Kind of entity tracked by the import ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Language,
    Taxonomy,
    ContentTypeSnippet,
    ContentType,
    AssetFolder,
    Asset,
    ContentItem,
    LanguageVariant,
}

impl EntityKind {
    /// Get the string identifier for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Language => "language",
            EntityKind::Taxonomy => "taxonomy",
            EntityKind::ContentTypeSnippet => "contentTypeSnippet",
            EntityKind::ContentType => "contentType",
            EntityKind::AssetFolder => "assetFolder",
            EntityKind::Asset => "asset",
            EntityKind::ContentItem => "contentItem",
            EntityKind::LanguageVariant => "languageVariant",
        }
    }

    /// Parse an EntityKind from its string identifier
    ///
    /// Accepts both the camelCase tag and its kebab-case spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "").as_str() {
            "language" => Some(EntityKind::Language),
            "taxonomy" => Some(EntityKind::Taxonomy),
            "contenttypesnippet" => Some(EntityKind::ContentTypeSnippet),
            "contenttype" => Some(EntityKind::ContentType),
            "assetfolder" => Some(EntityKind::AssetFolder),
            "asset" => Some(EntityKind::Asset),
            "contentitem" => Some(EntityKind::ContentItem),
            "languagevariant" => Some(EntityKind::LanguageVariant),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tag attached to every event delivered to an [`ImportObserver`](crate::ImportObserver)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportEventKind {
    Language,
    Taxonomy,
    Asset,
    AssetFolder,
    ContentType,
    ContentTypeSnippet,
    ContentItem,
    LanguageVariant,
    Publish,
    ChangeWorkflowStep,
}

impl ImportEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportEventKind::Language => "language",
            ImportEventKind::Taxonomy => "taxonomy",
            ImportEventKind::Asset => "asset",
            ImportEventKind::AssetFolder => "assetFolder",
            ImportEventKind::ContentType => "contentType",
            ImportEventKind::ContentTypeSnippet => "contentTypeSnippet",
            ImportEventKind::ContentItem => "contentItem",
            ImportEventKind::LanguageVariant => "languageVariant",
            ImportEventKind::Publish => "publish",
            ImportEventKind::ChangeWorkflowStep => "changeWorkflowStep",
        }
    }
}

impl From<EntityKind> for ImportEventKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Language => ImportEventKind::Language,
            EntityKind::Taxonomy => ImportEventKind::Taxonomy,
            EntityKind::ContentTypeSnippet => ImportEventKind::ContentTypeSnippet,
            EntityKind::ContentType => ImportEventKind::ContentType,
            EntityKind::AssetFolder => ImportEventKind::AssetFolder,
            EntityKind::Asset => ImportEventKind::Asset,
            EntityKind::ContentItem => ImportEventKind::ContentItem,
            EntityKind::LanguageVariant => ImportEventKind::LanguageVariant,
        }
    }
}

impl std::fmt::Display for ImportEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_parse_accepts_tag_and_kebab_case() {
        assert_eq!(EntityKind::parse("contentItem"), Some(EntityKind::ContentItem));
        assert_eq!(EntityKind::parse("content-item"), Some(EntityKind::ContentItem));
        assert_eq!(EntityKind::parse("assetFolder"), Some(EntityKind::AssetFolder));
        assert_eq!(EntityKind::parse("workflow"), None);
    }

    #[test]
    fn test_kind_serializes_as_camel_case_tag() {
        let json = serde_json::to_string(&EntityKind::ContentTypeSnippet).unwrap();
        assert_eq!(json, "\"contentTypeSnippet\"");

        let json = serde_json::to_string(&ImportEventKind::ChangeWorkflowStep).unwrap();
        assert_eq!(json, "\"changeWorkflowStep\"");
    }
}
