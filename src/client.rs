use crate::{Config, Request, Response, Result};
use http::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// HTTP client for the two endpoints an MCP server exposes: `GET /health` and
/// `POST /mcp` carrying JSON-RPC 2.0.
///
/// Every call is a single request/response pair. Nothing is retried.
#[derive(Debug, Clone)]
pub struct McpHttpClient {
    http: reqwest::Client,
    health_url: Url,
    mcp_url: Url,
    ping_url: Url,
}

impl McpHttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            health_url: config.health_url(),
            mcp_url: config.mcp_url(),
            ping_url: config.ping_url(),
        })
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }

    pub fn ping_url(&self) -> &Url {
        &self.ping_url
    }

    /// `GET /health`, returning the status as soon as the headers arrive.
    /// The body is never read.
    pub async fn health(&self) -> Result<StatusCode> {
        let status = self.get_health().await?.status();
        debug!(%status, "health responded");
        Ok(status)
    }

    /// `GET /health` and wait for the full body
    pub async fn health_round_trip(&self) -> Result<()> {
        self.get_health().await?.bytes().await?;
        Ok(())
    }

    /// POST a JSON-RPC request and wait for the full body without decoding it
    pub async fn send(&self, request: &Request) -> Result<()> {
        self.post(&self.mcp_url, request).await?.bytes().await?;
        Ok(())
    }

    /// POST a JSON-RPC request and decode the response envelope.
    ///
    /// The HTTP status is not inspected, only the body.
    pub async fn call(&self, request: &Request) -> Result<Response> {
        self.call_at(&self.mcp_url, request).await
    }

    /// Like [`call`](Self::call), against the ping path
    pub async fn ping(&self, request: &Request) -> Result<Response> {
        self.call_at(&self.ping_url, request).await
    }

    async fn call_at(&self, url: &Url, request: &Request) -> Result<Response> {
        let body = self.post(url, request).await?.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        Ok(Response::from_value(value))
    }

    async fn get_health(&self) -> Result<reqwest::Response> {
        debug!(url = %self.health_url, "GET");
        let response = self
            .http
            .get(self.health_url.clone())
            .send()
            .await
            .inspect_err(|err| warn!(url = %self.health_url, "health request failed: {err}"))?;
        Ok(response)
    }

    async fn post(&self, url: &Url, request: &Request) -> Result<reqwest::Response> {
        debug!(method = request.method, id = %request.id, %url, "POST");
        let response = self
            .http
            .post(url.clone())
            .json(request)
            .send()
            .await
            .inspect_err(|err| warn!(method = request.method, "request failed: {err}"))?;

        debug!(method = request.method, status = %response.status(), "responded");
        Ok(response)
    }
}
