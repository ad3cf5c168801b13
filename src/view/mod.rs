//! Derived views over a record snapshot: filter, then sort

pub mod filter;
pub mod sort;

pub use filter::{filter, matches_player_count};
pub use sort::{compare, sort, sort_in_place};
