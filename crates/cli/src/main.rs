use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use directors::DirectorTally;
use server::{build_aggregator, CatalogArgs, RetryArgs};
use std::time::Instant;
use tracing::debug;

/// ReelDirectors - who directed the most movies in the catalog
#[derive(Parser)]
#[command(name = "reel-directors")]
#[command(about = "Find directors with more movies than a threshold in the movie catalog", long_about = None)]
struct Cli {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(flatten)]
    retry: RetryArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List directors with strictly more movies than the threshold
    Directors {
        /// Minimum number of movies a director must exceed
        #[arg(long, default_value = "3", allow_negative_numbers = true)]
        threshold: i64,

        /// Print the result as a JSON object instead of one name per line
        #[arg(long)]
        json: bool,
    },

    /// Show the movie count of every director
    Tally {
        /// Only show the N directors with the most movies
        #[arg(long)]
        top: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(catalog = %cli.catalog.catalog_url, "Using catalog");

    match cli.command {
        Commands::Directors { threshold, json } => {
            handle_directors(&cli.catalog, &cli.retry, threshold, json).await?
        }
        Commands::Tally { top } => handle_tally(&cli.catalog, &cli.retry, top).await?,
    }

    Ok(())
}

/// Handle the 'directors' command
async fn handle_directors(
    catalog: &CatalogArgs,
    retry: &RetryArgs,
    threshold: i64,
    json: bool,
) -> Result<()> {
    let aggregator = build_aggregator(catalog, retry)?;
    debug!(policy = ?aggregator.retry_policy(), "Using retry policy");

    let start = Instant::now();
    let directors = aggregator
        .get_directors(threshold)
        .await
        .context("Error fetching directors")?;

    if json {
        let body = serde_json::json!({ "directors": directors });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("Directors with more than {} movies:", threshold)
            .bold()
            .blue()
    );
    if directors.is_empty() {
        println!("  (none)");
    }
    for director in &directors {
        println!("{}{}", "• ".green(), display_name(director));
    }
    println!(
        "{} {} director(s) in {:?}",
        "✓".green(),
        directors.len(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'tally' command
async fn handle_tally(catalog: &CatalogArgs, retry: &RetryArgs, top: Option<usize>) -> Result<()> {
    let aggregator = build_aggregator(catalog, retry)?;
    debug!(policy = ?aggregator.retry_policy(), "Using retry policy");

    let start = Instant::now();
    let tally = aggregator
        .collect_tally()
        .await
        .context("Error fetching catalog pages")?;

    let ranked = rank_tally(&tally);
    let shown = top.unwrap_or(ranked.len()).min(ranked.len());

    println!("{}", "Movies per director:".bold().blue());
    for (rank, (director, count)) in ranked.iter().take(shown).enumerate() {
        println!(
            "{:>4}. {} - {} movie(s)",
            (rank + 1).to_string().green(),
            display_name(director),
            count
        );
    }
    println!(
        "{} {} director(s) in {:?}",
        "✓".green(),
        tally.len(),
        start.elapsed()
    );
    Ok(())
}

/// Most movies first, ties broken by name.
fn rank_tally(tally: &DirectorTally) -> Vec<(&str, u64)> {
    let mut ranked: Vec<(&str, u64)> = tally.counts().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

fn display_name(director: &str) -> &str {
    if director.is_empty() {
        "(unknown director)"
    } else {
        director
    }
}
