use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keepsake::input::{load_events, load_photos};
use keepsake::AppConfig;
use keepsake_core::ranking::RankOptions;
use keepsake_core::service::{GalleryService, MemoryEventStore};
use keepsake_core::{EngagementRanker, RecencyCache};

#[derive(Parser)]
#[command(name = "keepsake")]
#[command(about = "Rank events, plan photo rows and replay cached lookups", long_about = None)]
struct Cli {
    /// Config file (YAML)
    #[arg(short, long, env = "KEEPSAKE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank events by engagement
    Rank {
        /// JSON array of events
        #[arg(short, long)]
        events: PathBuf,

        /// Search text matched against title, recipient and occasion
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only rank events owned by this user
        #[arg(long)]
        owner: Option<String>,

        /// Maximum results to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Plan justified photo rows for a container width
    Layout {
        /// JSON array of photo records
        #[arg(short, long)]
        photos: PathBuf,

        /// Container width in pixels
        #[arg(short, long, allow_negative_numbers = true)]
        width: f64,

        /// Target row height in pixels
        #[arg(short, long)]
        target_height: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replay event lookups through the recency cache
    Lookup {
        /// JSON array of events
        #[arg(short, long)]
        events: PathBuf,

        /// Cache capacity
        #[arg(long)]
        capacity: Option<usize>,

        /// Event ids to look up, in order
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "keepsake=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Rank {
            events,
            query,
            owner,
            limit,
            json,
        } => {
            let config = config.with_overrides(None, None, limit);
            let events = load_events(&events)?;

            let mut options = RankOptions::new();
            options.limit = config.ranking.limit;
            options.owner = owner;

            let ranked = EngagementRanker::with_options(options).rank(&events, &query);
            info!("{} of {} events matched", ranked.len(), events.len());

            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else if ranked.is_empty() {
                println!("No events matched.");
            } else {
                println!("{:>6}  {:<24} {:<20} {}", "SCORE", "ID", "OCCASION", "TITLE");
                for r in &ranked {
                    println!(
                        "{:>6}  {:<24} {:<20} {}",
                        r.score, r.event.id, r.event.occasion, r.event.title
                    );
                }
            }
        }

        Commands::Layout {
            photos,
            width,
            target_height,
            json,
        } => {
            let config = config.with_overrides(None, target_height, None);
            let planner = config.planner()?;
            let photos = load_photos(&photos)?;

            let rows = planner.plan(&photos, width);
            info!("Planned {} rows for {} photos", rows.len(), photos.len());

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("Nothing to lay out.");
            } else {
                for (i, row) in rows.iter().enumerate() {
                    let ids: Vec<&str> = row.photos.iter().map(|p| p.id.as_str()).collect();
                    println!(
                        "Row {:>3}: height {:>7.1}  width {:>7.1}  [{}]",
                        i + 1,
                        row.height,
                        row.width(),
                        ids.join(", ")
                    );
                }
            }
        }

        Commands::Lookup {
            events,
            capacity,
            ids,
        } => {
            let config = config.with_overrides(capacity, None, None);
            let store = MemoryEventStore::with_events(load_events(&events)?);
            let cache = RecencyCache::with_config(config.cache.clone())
                .context("Invalid cache configuration")?;
            let service = GalleryService::new(store, cache);

            for id in &ids {
                match service.get_event(id)? {
                    Some(event) => println!("{:<24} {}", id, event.title),
                    None => println!("{:<24} (not found)", id),
                }
            }

            if let Some(stats) = service.cache_stats()? {
                println!("\n{}", stats);
                println!("Store reads: {}", service.store().fetch_count());
            }
        }
    }

    Ok(())
}
