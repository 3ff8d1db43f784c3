//! Error types for the import system

use thiserror::Error;

use crate::kind::EntityKind;

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type for calls against the management API
pub type ManagementResult<T> = Result<T, ManagementError>;

/// Errors that abort an import run
///
/// Every variant is terminal: the orchestrator stops at the first error and
/// the target project keeps whatever was created up to that point.
#[derive(Error, Debug)]
pub enum ImportError {
    /// An asset has no companion binary payload in the import source
    #[error("Could not find binary file for asset with id '{asset_id}'")]
    MissingBinaryFile { asset_id: String },

    /// A reference that must be symbolic (codename) was not resolved
    #[error("Missing codename for {kind} reference in '{context}'")]
    MissingCodename { kind: EntityKind, context: String },

    /// A raw id could not be translated into the target project's identity space
    #[error("Unresolved reference to id '{id}' ({expected})")]
    UnresolvedReference { id: String, expected: String },

    /// The asset folder tree returned by the target does not match the submitted one
    #[error("Asset folder mismatch for external id '{external_id}': {reason}")]
    AssetFolderMismatch { external_id: String, reason: String },

    /// The default language codenames differ and language fixing is disabled
    #[error(
        "Codename of default language in the import source ('{source_codename}') does not match \
         the target project ('{target_codename}'). Enable language fixing or rename the target \
         default language"
    )]
    DefaultLanguageMismatch {
        source_codename: String,
        target_codename: String,
    },

    /// The target project returned no default language
    #[error("Target project has no default language")]
    DefaultLanguageNotFound,

    /// The same original entity was recorded twice
    #[error("Entity {kind} '{original_id}' is already recorded in the import ledger")]
    DuplicateLedgerEntry {
        kind: EntityKind,
        original_id: String,
    },

    /// A create/update/publish call failed on the target
    #[error("{operation} failed: {source}")]
    Remote {
        operation: String,
        #[source]
        source: ManagementError,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ImportError {
    /// Wrap a management API failure with the operation that produced it
    pub fn remote(operation: impl Into<String>, source: ManagementError) -> Self {
        ImportError::Remote {
            operation: operation.into(),
            source,
        }
    }
}

/// Errors surfaced by a [`ManagementClient`](crate::ManagementClient) implementation
///
/// Transient failures are expected to be retried by the client before they
/// reach this type.
#[derive(Error, Debug)]
pub enum ManagementError {
    /// The API answered with a non-success status
    #[error("API returned status {status}: {message}")]
    Api {
        status: u16,
        message: String,
        error_code: Option<i64>,
        validation_errors: Vec<String>,
    },

    /// The request never produced a response (connection, timeout, DNS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ManagementError {
    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ManagementError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
