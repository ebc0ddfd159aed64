use crate::{Error, Result};
use std::time::Duration;
use url::Url;

/// Endpoint probed when none is given on the command line
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3030";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the server under test
    pub endpoint: Url,

    /// Latency budget for `GET /health`
    pub health_budget: Duration,

    /// Latency budget for a `tools/list` round trip
    pub tools_list_budget: Duration,

    /// Per-request timeout. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,

    /// Colorize console output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),

            // Default health budget: 500ms
            health_budget: Duration::from_millis(500),

            // Default tools/list budget: 1s
            tools_list_budget: Duration::from_millis(1000),

            request_timeout: None,

            color: true,
        }
    }
}

impl Config {
    /// Build a configuration for the given base URL.
    ///
    /// Only `http` and `https` URLs are accepted, since the derived paths are
    /// appended as path segments.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.cannot_be_a_base() {
            return Err(Error::UnsupportedEndpoint(endpoint.to_string()));
        }

        Ok(Self {
            endpoint,
            ..Self::default()
        })
    }

    pub fn with_health_budget(mut self, budget: Duration) -> Self {
        self.health_budget = budget;
        self
    }

    pub fn with_tools_list_budget(mut self, budget: Duration) -> Self {
        self.tools_list_budget = budget;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The endpoint as the user would write it, without a trailing slash
    pub fn base(&self) -> &str {
        self.endpoint.as_str().trim_end_matches('/')
    }

    /// `{base}/health`
    pub fn health_url(&self) -> Url {
        self.join("health")
    }

    /// `{base}/mcp`, the JSON-RPC endpoint
    pub fn mcp_url(&self) -> Url {
        self.join("mcp")
    }

    /// Ping goes through the regular JSON-RPC endpoint
    pub fn ping_url(&self) -> Url {
        self.mcp_url()
    }

    fn join(&self, segment: &str) -> Url {
        let mut url = self.endpoint.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url
    }
}
