pub mod filter_state;
pub mod game_record;
pub mod snapshot;
pub mod sort_key;

pub use filter_state::{FilterState, PlayTimeRange, PlayerCountMode, OPEN_ENDED_PLAYER_COUNT};
pub use game_record::{GameRecord, UNKNOWN_GAME_NAME};
pub use snapshot::{CollectionSnapshot, EnrichmentData};
pub use sort_key::SortKey;
