use crate::{Config, McpHttpClient, Report, Request, Result};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Latency thresholds. Exceeding one is a warning, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    pub health: Duration,
    pub tools_list: Duration,
}

impl From<&Config> for Budgets {
    fn from(config: &Config) -> Self {
        Self {
            health: config.health_budget,
            tools_list: config.tools_list_budget,
        }
    }
}

/// Time a `GET /health` and a `tools/list` round trip, each from dispatch to
/// the body being fully received.
pub async fn run(client: &McpHttpClient, budgets: Budgets, report: &mut Report) {
    report.info("Testing response times");

    if let Err(err) = measure(client, budgets, report).await {
        report.fail(format!("Response time test error: {err}"));
    }
}

async fn measure(client: &McpHttpClient, budgets: Budgets, report: &mut Report) -> Result<()> {
    let start = Instant::now();
    client.health_round_trip().await?;
    let elapsed = start.elapsed();
    debug!(?elapsed, "health timed");
    judge("Health response time", elapsed, budgets.health, report);

    let start = Instant::now();
    client.send(&Request::tools_list()).await?;
    let elapsed = start.elapsed();
    debug!(?elapsed, "tools/list timed");
    judge("Tools list response time", elapsed, budgets.tools_list, report);

    Ok(())
}

fn judge(what: &str, elapsed: Duration, budget: Duration, report: &mut Report) {
    let ms = elapsed.as_millis();
    if elapsed < budget {
        report.pass(format!("{what}: {ms}ms"));
    } else {
        report.warn(format!(
            "{what} slow: {ms}ms (expected <{}ms)",
            budget.as_millis()
        ));
    }
}
