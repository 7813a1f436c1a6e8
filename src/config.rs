//! Configuration options for the slotbook client

use std::time::Duration;

/// Default base URL for a locally running store.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";

/// Configuration options for the slotbook client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the remote store
    pub base_url: String,

    /// Optional API token sent as a bearer credential
    pub api_token: Option<String>,

    /// The request timeout. `None` leaves requests unbounded, matching the
    /// store deployments this client targets.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            request_timeout: None,
        }
    }
}

impl ClientOptions {
    /// Set the base URL of the remote store
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the API token used for bearer authentication
    pub fn with_api_token(mut self, value: &str) -> Self {
        self.api_token = Some(value.to_string());
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}
