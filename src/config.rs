// src/config.rs
// Environment-based configuration - single source of truth for all env vars

use tracing::{debug, warn};

/// Work package type used when a caller does not specify one.
///
/// Type id 1 is the stock "Task" type on a fresh OpenProject install; it is
/// deployment-specific, so `OPENPROJECT_DEFAULT_TYPE_ID` can override it.
pub const DEFAULT_TYPE_ID: i64 = 1;

/// Connection settings for the OpenProject instance.
///
/// A missing base URL or API key is logged but does not fail startup; the
/// first remote call surfaces the problem instead.
#[derive(Debug, Clone)]
pub struct OpenProjectConfig {
    /// Instance root, e.g. `https://mycompany.openproject.com` (OPENPROJECT_BASE_URL)
    pub base_url: Option<String>,
    /// API token, sent as basic auth with the fixed `apikey` username (OPENPROJECT_API_KEY)
    pub api_key: Option<String>,
    /// Fallback work package type (OPENPROJECT_DEFAULT_TYPE_ID)
    pub default_type_id: i64,
}

impl Default for OpenProjectConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            default_type_id: DEFAULT_TYPE_ID,
        }
    }
}

impl OpenProjectConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let config = Self {
            base_url: read_var("OPENPROJECT_BASE_URL"),
            api_key: read_var("OPENPROJECT_API_KEY"),
            default_type_id: read_var("OPENPROJECT_DEFAULT_TYPE_ID")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TYPE_ID),
        };
        config.log_status();
        config
    }

    /// The v3 API root derived from the base URL, trailing slash tolerated
    pub fn api_root(&self) -> String {
        let base = self.base_url.as_deref().unwrap_or("");
        format!("{}/api/v3", base.trim_end_matches('/'))
    }

    /// Log what is configured without exposing the key
    fn log_status(&self) {
        match &self.base_url {
            Some(url) => debug!(base_url = %url, "OpenProject base URL configured"),
            None => warn!("OPENPROJECT_BASE_URL not set - remote calls will fail"),
        }
        if self.api_key.is_none() {
            warn!("OPENPROJECT_API_KEY not set - remote calls will be rejected");
        }
    }
}

/// Read a single environment variable, filtering empty values
fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
