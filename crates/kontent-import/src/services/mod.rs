//! Import orchestration services

mod orchestrator;

pub use orchestrator::{ImportOrchestrator, ImportOutcome};
