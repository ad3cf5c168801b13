use crate::core::{FilterState, GameRecord, PlayerCountMode, OPEN_ENDED_PLAYER_COUNT};

/// Player-count predicate. Unknown bounds never match a specific mode.
pub fn matches_player_count(record: &GameRecord, mode: PlayerCountMode) -> bool {
    match mode {
        PlayerCountMode::All => true,
        PlayerCountMode::TwoOnly => record.min_players == Some(2) && record.max_players == Some(2),
        // "5" is the open-ended "5+" bucket: only the upper bound matters
        PlayerCountMode::Count(n) if n == OPEN_ENDED_PLAYER_COUNT => {
            record.max_players.map_or(false, |max| max >= n)
        }
        PlayerCountMode::Count(n) => match (record.min_players, record.max_players) {
            (Some(min), Some(max)) => min <= n && n <= max,
            _ => false,
        },
    }
}

impl FilterState {
    /// Whether a record passes every active predicate
    pub fn matches(&self, record: &GameRecord) -> bool {
        self.matches_search(record)
            && matches_player_count(record, self.player_count)
            && self
                .play_time
                .map_or(true, |range| range.contains(record.playing_time_minutes))
            && self
                .min_rating
                .map_or(true, |floor| record.community_rating >= floor)
            && (!self.unplayed_only || record.is_unplayed())
            && (!self.solo_only || record.is_solo_capable())
            && self
                .best_at_count
                .map_or(true, |n| record.best_at_player_counts.contains(&n))
    }

    /// Case-insensitive substring match on the search text as given
    fn matches_search(&self, record: &GameRecord) -> bool {
        self.search_text.is_empty()
            || record
                .name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }
}

/// Order-preserving subsequence of `records` passing `state`
pub fn filter(records: &[GameRecord], state: &FilterState) -> Vec<GameRecord> {
    if state.is_empty() {
        return records.to_vec();
    }
    records.iter().filter(|r| state.matches(r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayTimeRange;

    fn game(id: &str, name: &str, min: Option<u32>, max: Option<u32>) -> GameRecord {
        let mut g = GameRecord::new(id, name);
        g.min_players = min;
        g.max_players = max;
        g
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = vec![
            game("1", "Ticket to Ride", None, None),
            game("2", "Pandemic", None, None),
        ];
        let found = filter(&records, &FilterState::new().with_search("TICKET"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");

        assert_eq!(filter(&records, &FilterState::new().with_search("")).len(), 2);
    }

    #[test]
    fn test_search_text_is_not_trimmed() {
        let records = vec![
            game("1", "7 Wonders Duel", None, None),
            game("2", "Azul", None, None),
        ];
        assert!(filter(&records, &FilterState::new().with_search("Duel ")).is_empty());
        assert!(filter(&records, &FilterState::new().with_search("   ")).is_empty());

        let found = filter(&records, &FilterState::new().with_search("wonders d"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_two_only_is_exact() {
        let duel = game("1", "7 Wonders Duel", Some(2), Some(2));
        let azul = game("2", "Azul", Some(2), Some(4));
        assert!(matches_player_count(&duel, PlayerCountMode::TwoOnly));
        assert!(!matches_player_count(&azul, PlayerCountMode::TwoOnly));
        assert!(matches_player_count(&azul, PlayerCountMode::Count(2)));
    }

    #[test]
    fn test_five_plus_bucket() {
        let three_to_five = game("1", "A", Some(3), Some(5));
        let three_to_four = game("2", "B", Some(3), Some(4));
        let six_to_ten = game("3", "C", Some(6), Some(10));
        let mode = "5".parse::<PlayerCountMode>().unwrap();

        assert!(matches_player_count(&three_to_five, mode));
        assert!(!matches_player_count(&three_to_four, mode));
        assert!(matches_player_count(&six_to_ten, mode));
        assert!(!matches_player_count(&six_to_ten, PlayerCountMode::Count(4)));
    }

    #[test]
    fn test_unknown_players_never_match() {
        let unknown = game("1", "Mystery", None, Some(4));
        assert!(matches_player_count(&unknown, PlayerCountMode::All));
        assert!(!matches_player_count(&unknown, PlayerCountMode::Count(2)));
        assert!(!matches_player_count(&unknown, PlayerCountMode::TwoOnly));
        assert!(!matches_player_count(&game("2", "X", Some(1), None), PlayerCountMode::Count(5)));
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let odd = game("1", "Odd", Some(4), Some(2));
        assert!(!matches_player_count(&odd, PlayerCountMode::Count(3)));
    }

    #[test]
    fn test_rating_floor_excludes_unrated() {
        let mut rated = GameRecord::new("1", "Rated");
        rated.community_rating = 7.5;
        let unrated = GameRecord::new("2", "Unrated");

        let found = filter(&[rated, unrated.clone()], &FilterState::new().with_min_rating(7.5));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");

        assert!(FilterState::new().with_min_rating(0.0).matches(&unrated));
    }

    #[test]
    fn test_play_time_range() {
        let mut long = GameRecord::new("1", "Twilight Imperium");
        long.playing_time_minutes = 480;
        let mut short = GameRecord::new("2", "Love Letter");
        short.playing_time_minutes = 20;

        let open = FilterState::new().with_play_time(PlayTimeRange::new(180, None));
        assert!(open.matches(&long));
        assert!(!open.matches(&short));

        let bounded = FilterState::new().with_play_time(PlayTimeRange::new(0, Some(30)));
        assert!(bounded.matches(&short));
        assert!(!bounded.matches(&long));
    }

    #[test]
    fn test_predicates_are_anded_and_order_preserved() {
        let mut solo_unplayed = game("1", "Mage Knight", Some(1), Some(4));
        solo_unplayed.best_at_player_counts.insert(1);
        let mut solo_played = game("2", "Spirit Island", Some(1), Some(4));
        solo_played.play_count = 3;
        let mut solo_unplayed_2 = game("3", "Arkham Horror", Some(1), Some(6));
        solo_unplayed_2.best_at_player_counts.insert(1);
        let group = game("4", "Codenames", Some(2), Some(8));

        let records = vec![solo_unplayed, solo_played, solo_unplayed_2, group];
        let state = FilterState::new().solo_only().unplayed_only().with_best_at(1);
        let ids: Vec<_> = filter(&records, &state).into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["1", "3"]);

        // Input untouched
        assert_eq!(records.len(), 4);
    }
}
