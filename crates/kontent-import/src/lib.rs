//! Kontent project import
//!
//! Restores an exported project into a target project through its management
//! API.
//!
//! # Architecture
//!
//! - **Translator**: rewrites source ids into codenames and later into target ids
//! - **Ledger**: maps every imported entity to the id the target assigned
//! - **Importers**: one stage per entity kind
//! - **Services**: the orchestrator running the stages in dependency order

pub mod filter;
mod importers;
pub mod ledger;
mod reporter;
mod run;
pub mod services;
pub mod translator;

pub use filter::apply_filters;
pub use importers::flatten_folders;
pub use ledger::{ImportLedger, LedgerEntry};
pub use run::RunStats;
pub use services::{ImportOrchestrator, ImportOutcome};
pub use translator::SymbolIndex;
