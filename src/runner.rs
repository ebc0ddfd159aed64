use crate::probes::{health, latency, ping, tools};
use crate::{Config, McpHttpClient, Report, Result};

/// Runs every probe once, in a fixed order, against one server.
///
/// Requests are issued one at a time; each probe completes before the next
/// starts and no probe outcome skips a later one.
pub struct Runner {
    client: McpHttpClient,
    budgets: latency::Budgets,
}

impl Runner {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: McpHttpClient::new(config)?,
            budgets: config.into(),
        })
    }

    pub async fn run(&self, report: &mut Report) {
        health::run(&self.client, report).await;
        ping::run(&self.client, report).await;

        let tools = tools::list(&self.client, report).await;
        tools::validate_schemas(&tools, report);
        tools::sample_call(&self.client, &tools, report).await;

        latency::run(&self.client, self.budgets, report).await;
    }
}
