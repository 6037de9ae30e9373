mod catalog;
mod scan;
mod tools;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pchunter")]
#[command(about = "Used-hardware price intelligence")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan every source live and score the listings found
    Scan {
        /// Model to search for (e.g. "dell latitude 5420")
        #[arg(required = true)]
        model: Vec<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Match a free-text query against the curated catalog
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Judge this buying cost against each matched unit
        #[arg(long)]
        cost: Option<i64>,
    },
    /// Show the specs extracted from a listing title or query
    Parse {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Normalize a displayed price (e.g. "6m", "62 000 DA")
    Price {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Judge a buying cost against a unit's market pricing
    Assess {
        /// What you would pay
        #[arg(long)]
        cost: i64,
        /// Unit average price
        #[arg(long)]
        avg: i64,
        /// Unit maximum price
        #[arg(long)]
        max: i64,
        /// Unit deal threshold
        #[arg(long)]
        threshold: i64,
    },
    /// List recent catalog listings priced at or below their deal threshold
    Alerts {
        /// Look-back window
        #[arg(long, default_value = "60")]
        since_minutes: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pchunter_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Logs go to stderr so `--json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(
        env = ?config.env,
        catalog = %config.catalog_path.display(),
        "configuration loaded"
    );

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Scan { model, json }) => {
            scan::run_scan(&config, &model.join(" "), json).await?;
        }
        Some(Commands::Search { query, json, cost }) => {
            catalog::run_search(&config, &query.join(" "), json, cost).await?;
        }
        Some(Commands::Parse { text }) => tools::run_parse(&text.join(" "))?,
        Some(Commands::Price { text }) => tools::run_price(&text.join(" ")),
        Some(Commands::Assess {
            cost,
            avg,
            max,
            threshold,
        }) => tools::run_assess(cost, avg, max, threshold),
        Some(Commands::Alerts { since_minutes }) => {
            catalog::run_alerts(&config, since_minutes)?;
        }
        None => println!("no command given; see `pchunter --help`"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
