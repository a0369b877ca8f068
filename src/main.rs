use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gitcompare::client::ApiClient;
use gitcompare::config::Config;
use gitcompare::{render, view, ProfileReport, Scorecard, SortMode};

#[derive(Debug, Parser)]
#[command(name = "gitcompare", version, about = "Compare GitHub developers side by side")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare two GitHub users
    Compare {
        user_a: String,
        user_b: String,
        /// Open the winner's profile page in the browser
        #[arg(long = "open")]
        open_winner: bool,
        /// Print the scorecard as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse random user profiles
    Find {
        /// Matches name, country or gender
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long, default_value_t = SortMode::Asc)]
        sort: SortMode,
        /// Number of profiles to fetch
        #[arg(short = 'n', long)]
        results: Option<u32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let api = ApiClient::new(&config)?;

    // Background tokio runtime for async HTTP
    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Command::Compare {
            user_a,
            user_b,
            open_winner,
            json,
        } => {
            let (user_a, user_b) = (user_a.trim(), user_b.trim());
            if user_a.is_empty() || user_b.is_empty() {
                bail!("Both usernames are required");
            }

            let (a, b) = rt.block_on(api.fetch_pair(user_a, user_b))?;
            let now = chrono::Utc::now();
            let card = Scorecard::build(
                ProfileReport::from_bundle(a, now),
                ProfileReport::from_bundle(b, now),
            );

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&card).context("Failed to serialize scorecard")?
                );
            } else {
                print!("{}", render::scorecard(&card));
            }

            if open_winner {
                match card.winning_report() {
                    Some(report) => {
                        info!(url = %report.profile.html_url, "opening winner profile");
                        if let Err(e) = open::that(&report.profile.html_url) {
                            warn!(error = %e, "could not open browser");
                        }
                    }
                    None => warn!("no overall winner, nothing to open"),
                }
            }
        }
        Command::Find {
            query,
            sort,
            results,
        } => {
            let count = results.unwrap_or(config.randomuser_results);
            let records = rt.block_on(api.fetch_random_users(count))?;
            let shown = view(&records, query.trim(), sort);
            print!("{}", render::user_grid(&shown));
        }
    }

    Ok(())
}
