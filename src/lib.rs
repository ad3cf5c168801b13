//! # BGG Collection Engine
//!
//! Board game collection pipeline:
//! - XML normalization of BoardGameGeek collection exports
//! - Filter and sort views over an immutable snapshot
//! - Summary statistics and play challenges
//! - Batched, rate-limited enrichment (weight, rating, best player counts)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bgg_collection_engine::{CollectionEngine, EngineConfig, FilterState, SortKey};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = CollectionEngine::from_config(&EngineConfig::for_user("koraytugay"))?;
//!     let mut snapshot = engine.load().await?;
//!
//!     engine.enrich(&mut snapshot, |event, _| {
//!         println!("batch {}/{} done", event.batch_index + 1, event.total_batches);
//!     }).await;
//!
//!     let view = engine.view(&snapshot, &FilterState::new().solo_only(), SortKey::ComplexityDesc);
//!     println!("{} solo games, avg rating {}", view.records.len(), view.stats.average_rating_display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod parser;
pub mod providers;
pub mod stats;
pub mod view;

// Re-export primary types
pub use config::EngineConfig;
pub use crate::core::{
    CollectionSnapshot, EnrichmentData, FilterState, GameRecord, PlayTimeRange, PlayerCountMode, SortKey,
};
pub use engine::{CollectionEngine, CollectionView};
pub use enrichment::{BatchOutcome, Enricher, EnrichmentEvent, EnrichmentSummary};
pub use error::{CollectionError, ParseError, Result};
pub use parser::{parse_collection, parse_things};
pub use stats::{challenges, summarize, ChallengeReport, Stats, TopPlayed};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
