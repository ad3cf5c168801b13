use std::collections::BTreeSet;

use crate::parser::xml::XmlElement;

/// Name of the BGG poll carrying player-count votes
pub const SUGGESTED_PLAYERS_POLL: &str = "suggested_numplayers";

/// Votes for one player count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub best: u64,
    pub recommended: u64,
    pub not_recommended: u64,
}

impl VoteTally {
    pub fn new(best: u64, recommended: u64, not_recommended: u64) -> Self {
        Self {
            best,
            recommended,
            not_recommended,
        }
    }

    pub fn total(&self) -> u64 {
        self.best + self.recommended + self.not_recommended
    }

    /// "Best" strictly beats both other categories; ties do not count
    pub fn is_best(&self) -> bool {
        self.total() > 0 && self.best > self.recommended && self.best > self.not_recommended
    }

    fn from_results(results: &XmlElement) -> Self {
        let mut tally = Self::default();
        for result in results.children_named("result") {
            let votes = result
                .attr("numvotes")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(0);
            match result.attr("value") {
                Some("Best") => tally.best += votes,
                Some("Recommended") => tally.recommended += votes,
                Some("Not Recommended") => tally.not_recommended += votes,
                _ => {}
            }
        }
        tally
    }
}

/// Per-player-count tallies from a `suggested_numplayers` poll element.
/// Buckets that are not plain integers (`"4+"`) are skipped.
pub fn player_count_tallies(poll: &XmlElement) -> Vec<(u32, VoteTally)> {
    poll.children_named("results")
        .filter_map(|results| {
            let players = results.attr("numplayers")?.trim().parse::<u32>().ok()?;
            Some((players, VoteTally::from_results(results)))
        })
        .collect()
}

/// Player counts voted "Best", from the first matching poll under `item`.
/// `None` when the item carries no such poll.
pub fn best_at_player_counts(item: &XmlElement) -> Option<BTreeSet<u32>> {
    let poll = item
        .find_all("poll")
        .into_iter()
        .find(|p| p.attr("name") == Some(SUGGESTED_PLAYERS_POLL))?;

    Some(
        player_count_tallies(poll)
            .into_iter()
            .filter(|(_, tally)| tally.is_best())
            .map(|(players, _)| players)
            .collect(),
    )
}
