use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::GameRecord;

/// Community rating at or above which a game counts as highly rated
pub const HIGH_RATING_THRESHOLD: f64 = 7.5;

/// First publication year counted as recent
pub const RECENT_YEAR: i32 = 2020;

/// Length of the most-played chart
pub const TOP_PLAYED_LIMIT: usize = 10;

/// Play-time buckets: label and inclusive upper bound in minutes
const PLAY_TIME_BUCKETS: [(&str, Option<u32>); 6] = [
    ("0-30", Some(30)),
    ("31-60", Some(60)),
    ("61-90", Some(90)),
    ("91-120", Some(120)),
    ("121-180", Some(180)),
    ("180+", None),
];

/// Rating bands: label and inclusive upper bound (lower bound exclusive)
const RATING_BUCKETS: [(&str, Option<f64>); 6] = [
    ("0-5.0", Some(5.0)),
    ("5.1-6.0", Some(6.0)),
    ("6.1-7.0", Some(7.0)),
    ("7.1-8.0", Some(8.0)),
    ("8.1-9.0", Some(9.0)),
    ("9.1-10", None),
];

/// One histogram bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayedGame {
    pub id: String,
    pub name: String,
    pub play_count: u32,
}

impl From<&GameRecord> for PlayedGame {
    fn from(record: &GameRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            play_count: record.play_count,
        }
    }
}

/// Most-played chart, or an explicit marker when nothing was played
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopPlayed {
    NoPlayData,
    Ranked(Vec<PlayedGame>),
}

impl TopPlayed {
    pub fn games(&self) -> &[PlayedGame] {
        match self {
            TopPlayed::NoPlayData => &[],
            TopPlayed::Ranked(games) => games,
        }
    }
}

/// Summary statistics over an arbitrary record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_games: usize,
    pub total_plays: u64,
    pub unplayed: usize,
    pub solo_capable: usize,
    pub highly_rated: usize,
    pub recent: usize,

    /// Means over non-zero values only
    pub average_rating: f64,
    pub average_personal_rating: f64,
    pub average_play_time: f64,

    /// Sparse: decades without games are absent
    pub by_decade: BTreeMap<i32, usize>,
    /// Sparse, keyed by known minimum player count
    pub by_min_players: BTreeMap<u32, usize>,
    /// All six buckets, zero counts included
    pub by_play_time: Vec<Bucket>,
    /// All six bands, zero counts included
    pub by_rating: Vec<Bucket>,

    pub most_played: Option<PlayedGame>,
    pub top_played: TopPlayed,
}

impl Stats {
    pub fn average_rating_display(&self) -> String {
        format!("{:.2}", self.average_rating)
    }

    /// `N/A` when the owner rated nothing
    pub fn average_personal_rating_display(&self) -> String {
        if self.average_personal_rating > 0.0 {
            format!("{:.2}", self.average_personal_rating)
        } else {
            "N/A".to_string()
        }
    }

    /// Whole minutes
    pub fn average_play_time_rounded(&self) -> u32 {
        self.average_play_time.round() as u32
    }
}

fn mean_of_positive(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .filter(|v| *v > 0.0)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

fn play_time_histogram(records: &[GameRecord]) -> Vec<Bucket> {
    let mut counts = [0usize; PLAY_TIME_BUCKETS.len()];
    for record in records {
        let minutes = record.playing_time_minutes;
        let slot = PLAY_TIME_BUCKETS
            .iter()
            .position(|(_, upper)| upper.map_or(true, |u| minutes <= u))
            .unwrap_or(PLAY_TIME_BUCKETS.len() - 1);
        counts[slot] += 1;
    }
    PLAY_TIME_BUCKETS
        .iter()
        .zip(counts)
        .map(|((label, _), count)| Bucket {
            label: label.to_string(),
            count,
        })
        .collect()
}

fn rating_histogram(records: &[GameRecord]) -> Vec<Bucket> {
    let mut counts = [0usize; RATING_BUCKETS.len()];
    for record in records {
        let rating = record.community_rating;
        let slot = RATING_BUCKETS
            .iter()
            .position(|(_, upper)| upper.map_or(true, |u| rating <= u))
            .unwrap_or(RATING_BUCKETS.len() - 1);
        counts[slot] += 1;
    }
    RATING_BUCKETS
        .iter()
        .zip(counts)
        .map(|((label, _), count)| Bucket {
            label: label.to_string(),
            count,
        })
        .collect()
}

/// Up to `limit` records with plays, most played first; ties keep
/// input order
pub fn top_played(records: &[GameRecord], limit: usize) -> TopPlayed {
    let mut played: Vec<&GameRecord> = records.iter().filter(|r| r.play_count > 0).collect();
    if played.is_empty() {
        return TopPlayed::NoPlayData;
    }
    played.sort_by(|a, b| b.play_count.cmp(&a.play_count));
    TopPlayed::Ranked(played.into_iter().take(limit).map(PlayedGame::from).collect())
}

/// Compute summary statistics. Never fails; empty input yields zeros
/// and no most-played game.
pub fn summarize(records: &[GameRecord]) -> Stats {
    let mut by_decade = BTreeMap::new();
    let mut by_min_players = BTreeMap::new();

    for record in records {
        if let Some(year) = record.year_published {
            *by_decade.entry(decade_of(year)).or_insert(0) += 1;
        }
        if let Some(min) = record.min_players {
            *by_min_players.entry(min).or_insert(0) += 1;
        }
    }

    let top_played = top_played(records, TOP_PLAYED_LIMIT);

    Stats {
        total_games: records.len(),
        total_plays: records.iter().map(|r| u64::from(r.play_count)).sum(),
        unplayed: records.iter().filter(|r| r.is_unplayed()).count(),
        solo_capable: records.iter().filter(|r| r.is_solo_capable()).count(),
        highly_rated: records
            .iter()
            .filter(|r| r.community_rating >= HIGH_RATING_THRESHOLD)
            .count(),
        recent: records
            .iter()
            .filter(|r| r.year_published.map_or(false, |y| y >= RECENT_YEAR))
            .count(),
        average_rating: mean_of_positive(records.iter().map(|r| r.community_rating)),
        average_personal_rating: mean_of_positive(records.iter().map(|r| r.personal_rating)),
        average_play_time: mean_of_positive(records.iter().map(|r| f64::from(r.playing_time_minutes))),
        by_decade,
        by_min_players,
        by_play_time: play_time_histogram(records),
        by_rating: rating_histogram(records),
        most_played: top_played.games().first().cloned(),
        top_played,
    }
}
