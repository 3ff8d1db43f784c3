//! Entity references
//!
//! The management API identifies an entity in three ways: the internal id
//! assigned by the project, the codename, or a caller-assigned external id.
//! On the wire a reference is an object with exactly one of those keys.

use serde::{Deserialize, Serialize};

/// Id of the default language in every project
///
/// Also used by assets that do not live in any folder.
pub const DEFAULT_LANGUAGE_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Reference to another entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawReference", into = "RawReference")]
pub enum Reference {
    Id(String),
    Codename(String),
    ExternalId(String),
}

impl Reference {
    pub fn id(id: impl Into<String>) -> Self {
        Reference::Id(id.into())
    }

    pub fn codename(codename: impl Into<String>) -> Self {
        Reference::Codename(codename.into())
    }

    pub fn external_id(external_id: impl Into<String>) -> Self {
        Reference::ExternalId(external_id.into())
    }

    /// Reference to the default language sentinel
    pub fn default_language() -> Self {
        Reference::Id(DEFAULT_LANGUAGE_ID.to_string())
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            Reference::Id(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_codename(&self) -> Option<&str> {
        match self {
            Reference::Codename(codename) => Some(codename),
            _ => None,
        }
    }

    /// Whether this reference points at the all-zero sentinel id
    pub fn is_sentinel(&self) -> bool {
        self.as_id() == Some(DEFAULT_LANGUAGE_ID)
    }

    /// Identifier path segment understood by the management API
    ///
    /// `{id}`, `codename/{codename}` or `external-id/{external_id}`.
    pub fn path_segment(&self) -> String {
        match self {
            Reference::Id(id) => id.clone(),
            Reference::Codename(codename) => format!("codename/{}", codename),
            Reference::ExternalId(external_id) => format!("external-id/{}", external_id),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Id(id) => write!(f, "id '{}'", id),
            Reference::Codename(codename) => write!(f, "codename '{}'", codename),
            Reference::ExternalId(external_id) => write!(f, "external id '{}'", external_id),
        }
    }
}

/// Wire shape of a reference
///
/// Source exports occasionally carry more than one key; the id wins because it
/// is the identity the export was taken with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    codename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
}

impl TryFrom<RawReference> for Reference {
    type Error = String;

    fn try_from(raw: RawReference) -> Result<Self, Self::Error> {
        match raw {
            RawReference { id: Some(id), .. } => Ok(Reference::Id(id)),
            RawReference {
                codename: Some(codename),
                ..
            } => Ok(Reference::Codename(codename)),
            RawReference {
                external_id: Some(external_id),
                ..
            } => Ok(Reference::ExternalId(external_id)),
            _ => Err("reference must contain one of 'id', 'codename' or 'external_id'".to_string()),
        }
    }
}

impl From<Reference> for RawReference {
    fn from(reference: Reference) -> Self {
        match reference {
            Reference::Id(id) => RawReference {
                id: Some(id),
                ..Default::default()
            },
            Reference::Codename(codename) => RawReference {
                codename: Some(codename),
                ..Default::default()
            },
            Reference::ExternalId(external_id) => RawReference {
                external_id: Some(external_id),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_serializes_with_single_key() {
        let value = serde_json::to_value(Reference::codename("article")).unwrap();
        assert_eq!(value, json!({ "codename": "article" }));

        let value = serde_json::to_value(Reference::external_id("ext-1")).unwrap();
        assert_eq!(value, json!({ "external_id": "ext-1" }));
    }

    #[test]
    fn test_reference_prefers_id_when_several_keys_present() {
        let reference: Reference =
            serde_json::from_value(json!({ "id": "abc", "codename": "article" })).unwrap();
        assert_eq!(reference, Reference::id("abc"));
    }

    #[test]
    fn test_empty_reference_is_rejected() {
        let result = serde_json::from_value::<Reference>(json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(Reference::id("abc").path_segment(), "abc");
        assert_eq!(Reference::codename("en").path_segment(), "codename/en");
        assert_eq!(
            Reference::external_id("x").path_segment(),
            "external-id/x"
        );
    }

    #[test]
    fn test_default_language_is_sentinel() {
        assert!(Reference::default_language().is_sentinel());
        assert!(!Reference::codename(DEFAULT_LANGUAGE_ID).is_sentinel());
    }
}
