use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use uadetector::{DataStore, DetectorConfig, UserAgentStringParser};

/// Classify User-Agent strings against the rule database.
#[derive(Debug, Parser)]
#[command(name = "uadetector", version, about)]
struct Cli {
    /// User-Agent strings to classify
    user_agents: Vec<String>,

    /// Read User-Agent strings from stdin, one per line
    #[arg(long)]
    stdin: bool,

    /// Force a refresh against the remote database before parsing
    #[arg(long)]
    refresh: bool,

    /// Print the active rule database version and exit
    #[arg(long)]
    database_version: bool,

    /// Print a sample configuration file and exit
    #[arg(long)]
    sample_config: bool,

    /// Include the detected device category in the output
    #[arg(long)]
    device: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if cli.sample_config {
        print!("{}", DetectorConfig::sample_toml());
        return Ok(());
    }

    let store = DataStore::new(DetectorConfig::load()).context("failed to create data store")?;

    if cli.refresh {
        match store.refresh().await {
            Ok(outcome) => tracing::debug!("refresh outcome: {:?}", outcome),
            Err(e) => warn!("refresh failed, continuing with current data: {}", e),
        }
    }

    if cli.database_version {
        println!("{}", store.current_version());
        store.shutdown();
        return Ok(());
    }

    let parser = UserAgentStringParser::new(store.clone());

    let inputs: Vec<String> = if cli.stdin {
        io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<_>>()
            .context("failed to read stdin")?
    } else {
        cli.user_agents.clone()
    };

    if inputs.is_empty() {
        store.shutdown();
        anyhow::bail!("no User-Agent strings given (pass them as arguments or use --stdin)");
    }

    for input in &inputs {
        let agent = parser.parse(input);
        let value = if cli.device {
            let device = parser.detect_device(input).map(|d| d.name);
            serde_json::json!({ "agent": agent, "device": device })
        } else {
            serde_json::to_value(&agent)?
        };
        let json = if cli.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        println!("{}", json);
    }

    store.shutdown();
    Ok(())
}
