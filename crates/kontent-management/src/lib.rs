//! Kontent management API client
//!
//! [`KontentManagementClient`] is the HTTP implementation of
//! [`kontent_import_types::ManagementClient`] used by the importer. Transient
//! failures (transport errors, 408, 429, 5xx) are retried with jittered
//! exponential backoff before they surface.

mod client;
pub mod config;
pub mod retry;

pub use client::KontentManagementClient;
pub use config::{ManagementClientConfig, DEFAULT_BASE_URL};
pub use retry::{with_retry, RetryConfig};
