use serde::Serialize;

use crate::core::GameRecord;
use crate::stats::summary::PlayedGame;

/// A game with the value that earned it a personal-best slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight<T> {
    pub id: String,
    pub name: String,
    pub value: T,
}

impl<T> Highlight<T> {
    fn of(record: &GameRecord, value: T) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            value,
        }
    }
}

/// "Play everything you own" progress plus personal bests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeReport {
    /// Unplayed games, in input order
    pub unplayed: Vec<PlayedGame>,
    /// Rounded; 100 for an empty collection
    pub played_percentage: u32,
    /// Rounded; 0 for an empty collection
    pub unplayed_percentage: u32,
    pub most_played: Option<PlayedGame>,
    pub highest_personal_rating: Option<Highlight<f64>>,
    pub oldest: Option<Highlight<i32>>,
    pub newest: Option<Highlight<i32>>,
}

fn percentage(part: usize, total: usize) -> u32 {
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// First record holding the strict maximum of `key`, ignoring `None`
fn first_max_by<'a, T: PartialOrd + Copy>(
    records: &'a [GameRecord],
    key: impl Fn(&GameRecord) -> Option<T>,
) -> Option<(&'a GameRecord, T)> {
    records.iter().fold(None, |best, record| match (key(record), best) {
        (Some(v), Some((_, b))) if v > b => Some((record, v)),
        (Some(v), None) => Some((record, v)),
        (_, best) => best,
    })
}

pub fn challenges(records: &[GameRecord]) -> ChallengeReport {
    let unplayed: Vec<PlayedGame> = records
        .iter()
        .filter(|r| r.is_unplayed())
        .map(PlayedGame::from)
        .collect();

    let total = records.len();
    let (played_percentage, unplayed_percentage) = if total == 0 {
        (100, 0)
    } else {
        (
            percentage(total - unplayed.len(), total),
            percentage(unplayed.len(), total),
        )
    };

    let most_played = first_max_by(records, |r| Some(r.play_count).filter(|p| *p > 0))
        .map(|(record, _)| PlayedGame::from(record));

    let highest_personal_rating =
        first_max_by(records, |r| Some(r.personal_rating).filter(|v| *v > 0.0))
            .map(|(record, value)| Highlight::of(record, value));

    let newest = first_max_by(records, |r| r.year_published)
        .map(|(record, year)| Highlight::of(record, year));

    // min via negated key keeps the "first wins" rule
    let oldest = first_max_by(records, |r| r.year_published.map(|y| -i64::from(y)))
        .map(|(record, _)| Highlight::of(record, record.year_published.unwrap_or_default()));

    ChallengeReport {
        unplayed,
        played_percentage,
        unplayed_percentage,
        most_played,
        highest_personal_rating,
        oldest,
        newest,
    }
}
