//! Core types and traits for the Kontent import system
//!
//! This crate provides the foundational abstractions for restoring an exported
//! project snapshot into a target project.
//!
//! # Architecture
//!
//! - **Contracts**: serialized entity shapes (`LanguageContract`, `AssetContract`, ...)
//! - **Source**: `ImportSource`, the snapshot being restored
//! - **Client**: `ManagementClient`, the interface to the target project
//! - **Config**: `ImportConfig` options and `ProcessFilters` predicates
//! - **Events**: `ImportObserver` progress sink
//! - **Errors**: unified error handling across the import
//!
//! # Usage
//!
//! `kontent-import` drives the import through these types;
//! `kontent-management` implements `ManagementClient` over HTTP.

pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod events;
pub mod kind;
pub mod reference;
pub mod source;

pub use client::{
    AssetData, AssetFolderData, ContentItemData, ContentTypeData, ContentTypeSnippetData,
    LanguageData, LanguagePatch, LanguageVariantData, ManagementClient, TaxonomyData,
    UploadBinaryFileData,
};
pub use config::{ImportConfig, Predicate, ProcessFilters, MAX_ASSET_SIZE_BYTES};
pub use contracts::{
    AssetContract, AssetDescription, AssetFolderContract, ContentItemContract,
    ContentTypeContract, ContentTypeSnippetContract, Contract, FileReference, LanguageContract,
    LanguageVariantContract, TaxonomyContract, WorkflowStepContract,
};
pub use error::{ImportError, ImportResult, ManagementError, ManagementResult};
pub use events::{ImportEvent, ImportObserver, NoopObserver};
pub use kind::{EntityKind, ImportEventKind};
pub use reference::{Reference, DEFAULT_LANGUAGE_ID};
pub use source::{BinaryFile, ImportData, ImportSource};
