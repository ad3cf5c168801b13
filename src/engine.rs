use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::core::{CollectionSnapshot, FilterState, GameRecord, SortKey};
use crate::enrichment::{Enricher, EnrichmentEvent, EnrichmentSummary};
use crate::error::Result;
use crate::parser::parse_collection;
use crate::providers::{BggProvider, CollectionSource, EnrichmentLookup};
use crate::stats::{challenges, summarize, ChallengeReport, Stats};
use crate::view;

/// Filtered, sorted records plus statistics over them
#[derive(Debug, Clone, Serialize)]
pub struct CollectionView {
    pub records: Vec<GameRecord>,
    pub stats: Stats,
}

impl CollectionView {
    /// Filter, then sort, then aggregate. Pure function of its inputs.
    pub fn derive(records: &[GameRecord], filter: &FilterState, sort: SortKey) -> Self {
        let mut records = view::filter(records, filter);
        view::sort_in_place(&mut records, sort);
        let stats = summarize(&records);
        Self { records, stats }
    }

    pub fn challenges(&self) -> ChallengeReport {
        challenges(&self.records)
    }
}

/// Main pipeline orchestrator: load → (enrich) → view
pub struct CollectionEngine {
    source: Arc<dyn CollectionSource>,
    lookup: Option<Arc<dyn EnrichmentLookup>>,
    enricher: Enricher,
}

impl CollectionEngine {
    /// Engine over an arbitrary source, without enrichment
    pub fn new(source: Arc<dyn CollectionSource>) -> Self {
        Self {
            source,
            lookup: None,
            enricher: Enricher::default(),
        }
    }

    /// Engine fetching from and enriching through the BGG XML API
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let bgg = Arc::new(BggProvider::http(config.clone())?);
        tracing::info!("Collection engine configured: {}", config);

        Ok(Self {
            source: bgg.clone(),
            lookup: Some(bgg),
            enricher: Enricher::from_config(config),
        })
    }

    pub fn with_lookup(mut self, lookup: Arc<dyn EnrichmentLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn can_enrich(&self) -> bool {
        self.lookup.is_some()
    }

    /// Fetch and normalize the collection. Any failure here is fatal: no
    /// partial collection is returned.
    pub async fn load(&self) -> Result<CollectionSnapshot> {
        let start = Instant::now();

        let xml = self.source.fetch_collection().await.map_err(|e| {
            tracing::error!("Error fetching collection from {}: {}", self.source.name(), e);
            e
        })?;

        let records = parse_collection(&xml).map_err(|e| {
            tracing::error!("Error parsing collection from {}: {}", self.source.name(), e);
            e
        })?;

        tracing::info!(
            "📦 Loaded {} games from {} in {:.2}ms",
            records.len(),
            self.source.name(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(CollectionSnapshot::new(records))
    }

    /// Enrich the snapshot in place, notifying after every batch. Without
    /// a configured lookup this is a no-op.
    pub async fn enrich<F>(&self, snapshot: &mut CollectionSnapshot, on_batch: F) -> EnrichmentSummary
    where
        F: FnMut(&EnrichmentEvent, &[GameRecord]),
    {
        match &self.lookup {
            Some(lookup) => {
                self.enricher
                    .enrich(&mut snapshot.records, lookup.as_ref(), on_batch)
                    .await
            }
            None => {
                tracing::debug!("No enrichment lookup configured; skipping");
                EnrichmentSummary::default()
            }
        }
    }

    /// Current view of a snapshot
    pub fn view(&self, snapshot: &CollectionSnapshot, filter: &FilterState, sort: SortKey) -> CollectionView {
        CollectionView::derive(&snapshot.records, filter, sort)
    }
}
