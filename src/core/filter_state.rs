use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The player-count bucket that means "this many or more"
pub const OPEN_ENDED_PLAYER_COUNT: u32 = 5;

/// Player-count selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerCountMode {
    /// No restriction
    #[default]
    All,
    /// Strictly two-player games (min = max = 2)
    TwoOnly,
    /// Supports N players (`min <= N <= max`); N = 5 means "5 or more"
    Count(u32),
}

impl FromStr for PlayerCountMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            "2-only" => Ok(Self::TwoOnly),
            other => other
                .trim_end_matches('+')
                .parse::<u32>()
                .map(Self::Count)
                .map_err(|_| format!("Invalid player count mode: {}", s)),
        }
    }
}

impl fmt::Display for PlayerCountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::TwoOnly => write!(f, "2-only"),
            Self::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Inclusive play-time window in minutes; `max = None` is open-ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayTimeRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl PlayTimeRange {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.min && self.max.map_or(true, |max| minutes <= max)
    }
}

impl FromStr for PlayTimeRange {
    type Err = String;

    /// Accepts `"31-60"` or `"180+"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid play time range: {}", s);
        let s = s.trim();

        if let Some(lower) = s.strip_suffix('+') {
            let min = lower.trim().parse().map_err(|_| invalid())?;
            return Ok(Self::new(min, None));
        }

        let (lower, upper) = s.split_once('-').ok_or_else(invalid)?;
        let min: u32 = lower.trim().parse().map_err(|_| invalid())?;
        let max: u32 = upper.trim().parse().map_err(|_| invalid())?;
        if max < min {
            return Err(invalid());
        }
        Ok(Self::new(min, Some(max)))
    }
}

impl fmt::Display for PlayTimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}+", self.min),
        }
    }
}

/// Active filters. All set predicates are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring of the name; empty matches everything
    #[serde(default)]
    pub search_text: String,

    #[serde(default)]
    pub player_count: PlayerCountMode,

    #[serde(default)]
    pub play_time: Option<PlayTimeRange>,

    /// Community rating floor
    #[serde(default)]
    pub min_rating: Option<f64>,

    #[serde(default)]
    pub unplayed_only: bool,

    #[serde(default)]
    pub solo_only: bool,

    /// Only games voted "Best" at this player count
    #[serde(default)]
    pub best_at_count: Option<u32>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_player_count(mut self, mode: PlayerCountMode) -> Self {
        self.player_count = mode;
        self
    }

    pub fn with_play_time(mut self, range: PlayTimeRange) -> Self {
        self.play_time = Some(range);
        self
    }

    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn unplayed_only(mut self) -> Self {
        self.unplayed_only = true;
        self
    }

    pub fn solo_only(mut self) -> Self {
        self.solo_only = true;
        self
    }

    pub fn with_best_at(mut self, players: u32) -> Self {
        self.best_at_count = Some(players);
        self
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
