//! Aggregations over a record set

pub mod challenges;
pub mod summary;

pub use challenges::{challenges, ChallengeReport, Highlight};
pub use summary::{summarize, top_played, Bucket, PlayedGame, Stats, TopPlayed};
