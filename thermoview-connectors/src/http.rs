//! HTTP snapshot client
//!
//! Fetches the full list of currently known readings from the data
//! source with a single authenticated `GET`. Kept deliberately plain:
//! one request per call, no connection ceremony, and no automatic
//! retry. Failed fetches are the caller's (i.e. the session's) problem
//! to log and shrug off; the only recovery path is the next manual
//! refresh.

use std::time::Duration;

use thiserror::Error;

use thermoview_core::Reading;

/// Snapshot fetch errors
///
/// The session treats all variants identically (log, leave the store
/// unchanged); the split exists for the log line and for tests.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or request error
    #[error("request failed: {0}")]
    Transport(String),

    /// Server returned a non-success status
    #[error("server returned status {code}")]
    Status {
        /// HTTP status code
        code: u16,
    },

    /// Response body was not a decodable list of readings
    #[error("undecodable snapshot payload: {0}")]
    Decode(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Snapshot endpoint configuration
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Base URL of the data source
    pub base_url: String,
    /// Path of the snapshot endpoint
    pub snapshot_path: String,
    /// Opaque bearer token, passed through verbatim
    pub token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl SnapshotConfig {
    /// Create new configuration with base URL and default endpoint path.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            snapshot_path: "/readings".into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set bearer token authentication.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the snapshot endpoint path.
    pub fn snapshot_path(mut self, path: impl Into<String>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    /// Set request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// Snapshot client using the lightweight ureq agent.
pub struct SnapshotClient {
    config: SnapshotConfig,
    agent: ureq::Agent,
}

impl SnapshotClient {
    /// Create a new snapshot client.
    pub fn new(config: SnapshotConfig) -> Result<Self, FetchError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(FetchError::Config(
                "base URL must start with http:// or https://".into(),
            ));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&format!("thermoview/{}", env!("CARGO_PKG_VERSION")))
            .build();

        Ok(Self { config, agent })
    }

    /// Fetch the full snapshot of readings.
    ///
    /// Exactly one attempt; no retry, no backoff.
    pub fn fetch(&self) -> Result<Vec<Reading>, FetchError> {
        let url = format!("{}{}", self.config.base_url, self.config.snapshot_path);

        let mut request = self.agent.get(&url).set("Accept", "application/json");
        if let Some(token) = &self.config.token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        match request.call() {
            Ok(response) => {
                let body = response
                    .into_string()
                    .map_err(|e| FetchError::Transport(e.to_string()))?;
                serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
            }
            Err(ureq::Error::Status(code, _)) => Err(FetchError::Status { code }),
            Err(ureq::Error::Transport(e)) => Err(FetchError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = SnapshotConfig::new("https://api.example.com")
            .bearer_token("test-token")
            .snapshot_path("/sensor-data")
            .timeout_secs(5);

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.snapshot_path, "/sensor-data");
        assert_eq!(config.token.as_deref(), Some("test-token"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn default_path() {
        let config = SnapshotConfig::new("http://localhost:3000");
        assert_eq!(config.snapshot_path, "/readings");
        assert!(config.token.is_none());
    }

    #[test]
    fn url_validation() {
        assert!(SnapshotClient::new(SnapshotConfig::new("not-a-url")).is_err());
        assert!(SnapshotClient::new(SnapshotConfig::new("https://valid.url")).is_ok());
    }
}
