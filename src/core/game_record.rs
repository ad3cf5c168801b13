use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name used when the export carries no `<name>` element
pub const UNKNOWN_GAME_NAME: &str = "Unknown Game";

/// Upper bound for community and personal ratings
pub const MAX_RATING: f64 = 10.0;

/// Upper bound for complexity weight
pub const MAX_WEIGHT: f64 = 5.0;

fn default_name() -> String {
    UNKNOWN_GAME_NAME.to_string()
}

fn default_pending() -> bool {
    true
}

/// One owned game, normalized from the collection export.
///
/// Unknown years and player counts are `None`, never zero, so they can
/// not take part in numeric comparisons by accident. Ratings and weight
/// use `0.0` for "unrated"; whether a `0.0` weight is real or simply not
/// fetched yet is told apart by `enrichment_pending`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    /// BGG object id
    pub id: String,

    /// Display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Year of publication
    #[serde(default)]
    pub year_published: Option<i32>,

    /// Image URL (falls back to the thumbnail)
    #[serde(default)]
    pub thumbnail_url: String,

    #[serde(default)]
    pub min_players: Option<u32>,

    #[serde(default)]
    pub max_players: Option<u32>,

    /// Playing time in minutes (0 when unknown)
    #[serde(default)]
    pub playing_time_minutes: u32,

    #[serde(default)]
    pub play_count: u32,

    /// Community average (0.0-10.0, 0 = unrated)
    #[serde(default)]
    pub community_rating: f64,

    /// Owner's rating (0.0-10.0, 0 = unrated)
    #[serde(default)]
    pub personal_rating: f64,

    /// Average weight (0.0-5.0, 0 = unknown)
    #[serde(default)]
    pub complexity_weight: f64,

    /// Player counts voted "Best"
    #[serde(default)]
    pub best_at_player_counts: BTreeSet<u32>,

    /// Set until an enrichment batch has filled this record in
    #[serde(default = "default_pending")]
    pub enrichment_pending: bool,
}

impl GameRecord {
    /// Create a record with every optional field at its default
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year_published: None,
            thumbnail_url: String::new(),
            min_players: None,
            max_players: None,
            playing_time_minutes: 0,
            play_count: 0,
            community_rating: 0.0,
            personal_rating: 0.0,
            complexity_weight: 0.0,
            best_at_player_counts: BTreeSet::new(),
            enrichment_pending: true,
        }
    }

    /// "Name (Year)" when the year is known
    pub fn display_name(&self) -> String {
        if let Some(year) = self.year_published {
            format!("{} ({})", self.name, year)
        } else {
            self.name.clone()
        }
    }

    /// "min-max" with `?` for unknown ends
    pub fn player_range(&self) -> String {
        let fmt = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
        format!("{}-{}", fmt(self.min_players), fmt(self.max_players))
    }

    /// BoardGameGeek detail page
    pub fn url(&self) -> String {
        format!("https://boardgamegeek.com/boardgame/{}", self.id)
    }

    pub fn is_unplayed(&self) -> bool {
        self.play_count == 0
    }

    pub fn is_solo_capable(&self) -> bool {
        self.min_players == Some(1)
    }

    pub fn is_rated(&self) -> bool {
        self.community_rating > 0.0
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new("", UNKNOWN_GAME_NAME)
    }
}

/// Clamp a parsed score into `[0, max]`; NaN becomes 0
pub fn clamp_score(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}
