use clap::{ArgAction, Parser};
use mcp_smoke::{Config, DEFAULT_ENDPOINT, Report, Runner, report};
use std::{io, process::ExitCode, time::Duration};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Smoke test a running MCP server over HTTP/JSON-RPC
#[derive(Debug, Parser)]
#[command(name = "mcp-smoke", version, about)]
struct Args {
    /// Base URL of the server; `/health` and `/mcp` are derived from it
    #[arg(default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Health responses at or above this many milliseconds are flagged
    #[arg(long, value_name = "MS", default_value_t = 500)]
    health_budget_ms: u64,

    /// tools/list responses at or above this many milliseconds are flagged
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    tools_budget_ms: u64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Diagnostic log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> mcp_smoke::Result<Config> {
        let mut config = Config::new(&self.endpoint)?
            .with_health_budget(Duration::from_millis(self.health_budget_ms))
            .with_tools_list_budget(Duration::from_millis(self.tools_budget_ms))
            .with_color(!self.no_color);
        if let Some(secs) = self.timeout {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Fatal error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let config = args.config()?;
    if !config.color {
        yansi::disable();
    }
    tracing::debug!(?config, "starting");

    let mut stdout = io::stdout();
    report::write_banner(&mut stdout, config.base())?;

    let runner = Runner::new(&config)?;
    let mut report = Report::new();
    runner.run(&mut report).await;

    report.write_summary(&mut stdout)?;
    Ok(ExitCode::from(report.exit_code()))
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
