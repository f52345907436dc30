//! Console configuration
//!
//! Loaded from environment variables over built-in defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default REST API location.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// File name of the persisted credential inside the state directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Main console configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Base URL every API path is appended to
    pub api_base_url: String,
    /// Directory holding the persisted credential. `None` keeps it in memory.
    pub state_dir: Option<PathBuf>,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            state_dir: None,
            request_timeout: None,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. Unset, empty or unparsable
    /// values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("COOLANT_API_BASE_URL")
            && !url.is_empty()
        {
            config.api_base_url = url;
        }
        if let Some(dir) = lookup("COOLANT_STATE_DIR")
            && !dir.is_empty()
        {
            config.state_dir = Some(PathBuf::from(dir));
        }
        if let Some(val) = lookup("COOLANT_REQUEST_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
            && secs > 0
        {
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config
    }

    /// Where the credential file lives, when persisted on disk.
    pub fn credentials_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|dir| dir.join(CREDENTIALS_FILE))
    }
}
