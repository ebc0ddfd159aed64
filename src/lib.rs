mod client;
mod config;
mod error;
pub mod probes;
pub mod report;
mod runner;
#[cfg(test)]
mod tests;
mod types;

pub use client::McpHttpClient;
pub use config::{Config, DEFAULT_ENDPOINT};
pub use error::{Error, Result};
pub use report::{Finding, Report, Status, Tally};
pub use runner::Runner;
pub use types::*;
