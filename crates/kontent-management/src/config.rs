//! Client configuration

use std::fmt;
use std::time::Duration;

use crate::retry::RetryConfig;

pub const DEFAULT_BASE_URL: &str = "https://manage.kontent.ai/v2";

/// Connection settings for one target project
#[derive(Clone)]
pub struct ManagementClientConfig {
    pub project_id: String,
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl ManagementClientConfig {
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Root of every project-scoped endpoint
    pub fn project_url(&self) -> String {
        format!(
            "{}/projects/{}",
            self.base_url.trim_end_matches('/'),
            self.project_id
        )
    }
}

impl fmt::Debug for ManagementClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementClientConfig")
            .field("project_id", &self.project_id)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}
