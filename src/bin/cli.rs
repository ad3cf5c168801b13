use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bgg_collection_engine::{
    challenges,
    providers::{BggProvider, FileSource},
    CollectionEngine, CollectionSnapshot, EngineConfig, Enricher, FilterState, PlayTimeRange,
    PlayerCountMode, SortKey,
};

#[derive(Parser)]
#[command(name = "collection-cli")]
#[command(about = "Board game collection statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// BGG username (falls back to BGG_USERNAME)
    #[arg(short, long)]
    user: Option<String>,

    /// Read the collection from a local XML export instead of BGG
    #[arg(short, long)]
    file: Option<String>,

    /// Fetch complexity and best player counts in batches
    #[arg(long)]
    enrich: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List games matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sort key (name, year-asc, plays-desc, complexity-desc, ...)
        #[arg(short, long, default_value = "name")]
        sort: SortKey,
    },

    /// Summary statistics for games matching the filters
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Unplayed-games progress and personal bests
    Challenges,
}

#[derive(Args)]
struct FilterArgs {
    /// Name substring
    #[arg(long, default_value = "")]
    search: String,

    /// all, 2-only, 1..5 (5 means 5+)
    #[arg(long, default_value = "all")]
    players: PlayerCountMode,

    /// e.g. 31-60 or 180+
    #[arg(long)]
    time: Option<PlayTimeRange>,

    /// Minimum community rating
    #[arg(long)]
    min_rating: Option<f64>,

    #[arg(long)]
    unplayed: bool,

    #[arg(long)]
    solo: bool,

    /// Voted best at this player count
    #[arg(long)]
    best_at: Option<u32>,
}

impl From<FilterArgs> for FilterState {
    fn from(args: FilterArgs) -> Self {
        FilterState {
            search_text: args.search.trim().to_string(),
            player_count: args.players,
            play_time: args.time,
            min_rating: args.min_rating,
            unplayed_only: args.unplayed,
            solo_only: args.solo,
            best_at_count: args.best_at,
        }
    }
}

fn build_engine(cli: &Cli) -> anyhow::Result<CollectionEngine> {
    let mut config = EngineConfig::from_env();
    if let Some(user) = &cli.user {
        config.username = user.clone();
    }

    match &cli.file {
        Some(path) => {
            let mut engine = CollectionEngine::new(Arc::new(FileSource::new(path)));
            if cli.enrich {
                let bgg = BggProvider::http(config.clone())?;
                engine = engine
                    .with_lookup(Arc::new(bgg))
                    .with_enricher(Enricher::from_config(&config));
            }
            Ok(engine)
        }
        None => Ok(CollectionEngine::from_config(&config)?),
    }
}

async fn load(cli: &Cli, engine: &CollectionEngine) -> anyhow::Result<CollectionSnapshot> {
    let mut snapshot = engine.load().await?;

    if cli.enrich {
        let summary = engine
            .enrich(&mut snapshot, |event, _| {
                eprintln!(
                    "   enrichment batch {}/{}: {:?}",
                    event.batch_index + 1,
                    event.total_batches,
                    event.outcome
                );
            })
            .await;
        if summary.failed > 0 {
            eprintln!("⚠️ {} of {} batches failed", summary.failed, summary.total_batches);
        }
    }

    Ok(snapshot)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bgg_collection_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let engine = build_engine(&cli)?;
    let snapshot = load(&cli, &engine).await?;

    match cli.command {
        Commands::List { filters, sort } => {
            let view = engine.view(&snapshot, &filters.into(), sort);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view.records)?);
                return Ok(());
            }

            println!("🎲 {} games (sorted by {})", view.records.len(), sort);
            for game in &view.records {
                let weight = if game.enrichment_pending {
                    "-".to_string()
                } else {
                    format!("{:.2}", game.complexity_weight)
                };
                println!(
                    "   {:<40} 👥 {:<6} ⏱️ {:>4} min  ⭐ {:.1}  ⚖️ {}  plays: {}",
                    game.display_name(),
                    game.player_range(),
                    game.playing_time_minutes,
                    game.community_rating,
                    weight,
                    game.play_count
                );
            }
        }

        Commands::Stats { filters } => {
            let view = engine.view(&snapshot, &filters.into(), SortKey::Name);
            let stats = &view.stats;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(stats)?);
                return Ok(());
            }

            println!("📊 Collection Statistics:");
            println!("   Total games: {}", stats.total_games);
            println!("   Total plays: {}", stats.total_plays);
            println!("   Avg rating: {}", stats.average_rating_display());
            println!("   Avg my rating: {}", stats.average_personal_rating_display());
            println!("   Avg play time: {} min", stats.average_play_time_rounded());
            println!(
                "   Most played: {}",
                stats.most_played.as_ref().map(|g| g.name.as_str()).unwrap_or("-")
            );
            println!("   Solo: {}  Unplayed: {}  Rated 7.5+: {}  Since 2020: {}",
                stats.solo_capable, stats.unplayed, stats.highly_rated, stats.recent);

            println!("\n📅 By decade:");
            for (decade, count) in &stats.by_decade {
                println!("   {}s: {}", decade, count);
            }
            println!("\n⏱️ By play time:");
            for bucket in &stats.by_play_time {
                println!("   {}: {}", bucket.label, bucket.count);
            }
            println!("\n⭐ By rating:");
            for bucket in &stats.by_rating {
                println!("   {}: {}", bucket.label, bucket.count);
            }

            println!("\n🏆 Most played:");
            if stats.top_played.games().is_empty() {
                println!("   No play data available");
            }
            for (i, game) in stats.top_played.games().iter().enumerate() {
                println!("   {}. {} ({} plays)", i + 1, game.name, game.play_count);
            }
        }

        Commands::Challenges => {
            let report = challenges(&snapshot.records);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("🎯 {}% played, {} games to go", report.played_percentage, report.unplayed.len());
            for game in &report.unplayed {
                println!("   - {}", game.name);
            }
            if let Some(best) = &report.highest_personal_rating {
                println!("   Highest rated: {} ({:.2})", best.name, best.value);
            }
            if let Some(oldest) = &report.oldest {
                println!("   Oldest: {} ({})", oldest.name, oldest.value);
            }
            if let Some(newest) = &report.newest {
                println!("   Newest: {} ({})", newest.name, newest.value);
            }
        }
    }

    Ok(())
}
