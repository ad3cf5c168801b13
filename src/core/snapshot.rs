use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::core::game_record::{clamp_score, GameRecord, MAX_RATING, MAX_WEIGHT};

/// The record set produced by one fetch-and-parse cycle.
///
/// Replaced wholesale on re-fetch. Enrichment mutates records in place
/// but never adds, removes or reorders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub records: Vec<GameRecord>,

    /// When the collection document was fetched
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl CollectionSnapshot {
    pub fn new(records: Vec<GameRecord>) -> Self {
        Self {
            records,
            fetched_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records still waiting for enrichment
    pub fn pending_enrichment(&self) -> usize {
        self.records.iter().filter(|r| r.enrichment_pending).count()
    }

    /// Positions of each id (duplicates keep every position)
    pub fn index_by_id(&self) -> HashMap<&str, Vec<usize>> {
        index_by_id(&self.records)
    }
}

pub(crate) fn index_by_id(records: &[GameRecord]) -> HashMap<&str, Vec<usize>> {
    let mut index: HashMap<&str, Vec<usize>> = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        index.entry(record.id.as_str()).or_default().push(pos);
    }
    index
}

/// Supplemental attributes for one game from a lookup response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentData {
    pub id: String,

    /// `averageweight`
    #[serde(default)]
    pub complexity_weight: Option<f64>,

    /// `average`
    #[serde(default)]
    pub community_rating: Option<f64>,

    /// From the `suggested_numplayers` poll; `None` when the poll is absent
    #[serde(default)]
    pub best_at_player_counts: Option<BTreeSet<u32>>,
}

impl EnrichmentData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Merge into a record. Fields missing from the response keep their
    /// prior values.
    pub fn apply_to(&self, record: &mut GameRecord) {
        if let Some(weight) = self.complexity_weight {
            record.complexity_weight = clamp_score(weight, MAX_WEIGHT);
        }
        if let Some(rating) = self.community_rating {
            record.community_rating = clamp_score(rating, MAX_RATING);
        }
        if let Some(best) = &self.best_at_player_counts {
            record.best_at_player_counts = best.clone();
        }
        record.enrichment_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_missing_fields() {
        let mut record = GameRecord::new("1", "Azul");
        record.community_rating = 7.8;
        record.best_at_player_counts.insert(2);

        let mut data = EnrichmentData::new("1");
        data.complexity_weight = Some(1.77);
        data.apply_to(&mut record);

        assert_eq!(record.complexity_weight, 1.77);
        assert_eq!(record.community_rating, 7.8);
        assert!(record.best_at_player_counts.contains(&2));
        assert!(!record.enrichment_pending);
    }

    #[test]
    fn test_apply_low_weight_is_distinguishable() {
        let mut record = GameRecord::new("1", "Candy Land");
        let mut data = EnrichmentData::new("1");
        data.complexity_weight = Some(0.0);
        data.apply_to(&mut record);

        assert_eq!(record.complexity_weight, 0.0);
        assert!(!record.enrichment_pending);
    }

    #[test]
    fn test_index_by_id_keeps_duplicates() {
        let snapshot = CollectionSnapshot::new(vec![
            GameRecord::new("1", "A"),
            GameRecord::new("2", "B"),
            GameRecord::new("1", "A again"),
        ]);
        let index = snapshot.index_by_id();
        assert_eq!(index["1"], vec![0, 2]);
        assert_eq!(index["2"], vec![1]);
        assert_eq!(snapshot.pending_enrichment(), 3);
    }
}
