//! Batched, paced enrichment of a record set.
//!
//! Records are cut into positional batches that are looked up strictly
//! one after another, with a fixed pause between batches. A failed batch
//! is logged and skipped. The caller is told after every batch so it can
//! redraw with partial data.

pub mod schedule;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::core::snapshot::index_by_id;
use crate::core::{EnrichmentData, GameRecord};
use crate::error::CollectionError;
use crate::providers::EnrichmentLookup;

pub use schedule::{BatchOutcome, BatchSchedule, ScheduleState};

/// Emitted after each batch, success or failure
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentEvent {
    /// Zero-based
    pub batch_index: usize,
    pub total_batches: usize,
    /// Ids requested in this batch
    pub ids: Vec<String>,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    pub total_batches: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub records_updated: usize,
    pub cancelled: bool,
}

/// Drives a `BatchSchedule` against an `EnrichmentLookup`
#[derive(Debug, Clone)]
pub struct Enricher {
    batch_size: usize,
    delay: Duration,
    batch_timeout: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Default for Enricher {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Enricher {
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            delay,
            batch_timeout: None,
            cancel: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut enricher = Self::new(config.batch_size, config.batch_delay());
        enricher.batch_timeout = config.batch_timeout();
        enricher
    }

    /// Give up on a batch after `timeout`. Off by default: a hung lookup
    /// then stalls every later batch.
    pub fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = Some(timeout);
        self
    }

    /// Stop at the next batch boundary once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::SeqCst))
    }

    async fn fetch<L>(&self, lookup: &L, ids: &[String]) -> Result<Vec<EnrichmentData>, BatchOutcome>
    where
        L: EnrichmentLookup + ?Sized,
    {
        match self.batch_timeout {
            Some(limit) => match tokio::time::timeout(limit, lookup.lookup_many(ids)).await {
                Ok(result) => result.map_err(|e| BatchOutcome::Failed(e.to_string())),
                Err(_) => Err(BatchOutcome::TimedOut),
            },
            None => lookup
                .lookup_many(ids)
                .await
                .map_err(|e| BatchOutcome::Failed(e.to_string())),
        }
    }

    /// Enrich `records` in place. Never fails: batch errors are logged,
    /// reported through `on_batch`, and skipped.
    pub async fn enrich<L, F>(
        &self,
        records: &mut [GameRecord],
        lookup: &L,
        mut on_batch: F,
    ) -> EnrichmentSummary
    where
        L: EnrichmentLookup + ?Sized,
        F: FnMut(&EnrichmentEvent, &[GameRecord]),
    {
        let start = Instant::now();
        let index: HashMap<String, Vec<usize>> = index_by_id(records)
            .into_iter()
            .map(|(id, positions)| (id.to_string(), positions))
            .collect();

        let mut schedule = BatchSchedule::new(records.len(), self.batch_size, self.delay);
        let mut summary = EnrichmentSummary {
            total_batches: schedule.total_batches(),
            ..EnrichmentSummary::default()
        };

        tracing::info!(
            "Enriching {} games in {} batches via {}",
            records.len(),
            summary.total_batches,
            lookup.name()
        );

        while !schedule.is_done() {
            if self.is_cancelled() {
                schedule.cancel();
                summary.cancelled = true;
                tracing::info!("Enrichment cancelled with {} batches left", schedule.remaining());
                break;
            }

            if let Some(delay) = schedule.pending_delay() {
                tokio::time::sleep(delay).await;
                schedule.resume();
                continue;
            }

            let Some((batch_index, range)) = schedule.current() else {
                break;
            };
            let ids: Vec<String> = records[range].iter().map(|r| r.id.clone()).collect();

            let outcome = match self.fetch(lookup, &ids).await {
                Ok(items) => {
                    let (updated, ignored) = merge(records, &index, &items);
                    summary.succeeded += 1;
                    summary.records_updated += updated;
                    tracing::debug!(
                        "Batch {}/{}: {} records updated, {} unknown ids ignored",
                        batch_index + 1,
                        summary.total_batches,
                        updated,
                        ignored
                    );
                    BatchOutcome::Applied { updated, ignored }
                }
                Err(outcome) => {
                    summary.failed += 1;
                    let message = match &outcome {
                        BatchOutcome::Failed(message) => message.clone(),
                        _ => "lookup timed out".to_string(),
                    };
                    let err = CollectionError::EnrichmentBatch {
                        batch: batch_index + 1,
                        message,
                    };
                    tracing::warn!("⚠️ {}; skipping", err);
                    outcome
                }
            };

            let event = EnrichmentEvent {
                batch_index,
                total_batches: summary.total_batches,
                ids,
                outcome: outcome.clone(),
            };
            schedule.complete(outcome);
            on_batch(&event, &*records);
        }

        tracing::info!(
            "✅ Enrichment done: {}/{} batches ok, {} records updated in {:.0}ms",
            summary.succeeded,
            summary.total_batches,
            summary.records_updated,
            start.elapsed().as_secs_f64() * 1000.0
        );

        summary
    }
}

/// Merge lookup results by id. Returns (records updated, unknown ids).
fn merge(
    records: &mut [GameRecord],
    index: &HashMap<String, Vec<usize>>,
    items: &[EnrichmentData],
) -> (usize, usize) {
    let mut updated = 0;
    let mut ignored = 0;

    for item in items {
        match index.get(&item.id) {
            Some(positions) => {
                for &pos in positions {
                    item.apply_to(&mut records[pos]);
                    updated += 1;
                }
            }
            None => {
                tracing::warn!("Ignoring unknown id {} in lookup response", item.id);
                ignored += 1;
            }
        }
    }

    (updated, ignored)
}
