//! Per-kind importers
//!
//! Each module adds the stage for one entity kind to [`ImportRun`]. A stage
//! validates its preconditions, resolves references, issues the request and
//! records the acknowledged entity in the ledger before moving on.
//!
//! [`ImportRun`]: crate::run::ImportRun

mod asset_folders;
mod assets;
mod content_items;
mod content_types;
mod language_variants;
mod languages;
mod taxonomies;
mod workflow;

pub use asset_folders::flatten_folders;
