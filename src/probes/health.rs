use crate::{McpHttpClient, Report};
use http::StatusCode;

/// `GET /health` must answer exactly 200.
pub async fn run(client: &McpHttpClient, report: &mut Report) {
    report.info(format!("Testing health endpoint: {}", client.health_url()));

    match client.health().await {
        Ok(status) if status == StatusCode::OK => report.pass("Health endpoint returns 200"),
        Ok(status) => report.fail(format!(
            "Health endpoint returns {} (expected 200)",
            status.as_u16()
        )),
        Err(err) => report.fail(format!("Health endpoint error: {err}")),
    }
}
