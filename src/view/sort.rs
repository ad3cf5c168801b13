use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::core::{GameRecord, SortKey};

/// Primary collation key: accents stripped, case folded
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Name order: base letters first, then case-folded text with accents,
/// then raw text so that the order is total
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Unknown years sink to the end in both directions: they read as
/// +infinity ascending and -infinity descending.
fn year_key(record: &GameRecord, descending: bool) -> i32 {
    match (record.year_published, descending) {
        (Some(year), _) => year,
        (None, false) => i32::MAX,
        (None, true) => i32::MIN,
    }
}

/// Comparator for `key`. Equal records compare `Equal`, so a stable
/// sort keeps their input order.
pub fn compare(a: &GameRecord, b: &GameRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::YearAsc => year_key(a, false).cmp(&year_key(b, false)),
        SortKey::YearDesc => year_key(b, true).cmp(&year_key(a, true)),
        SortKey::PlaysAsc => a.play_count.cmp(&b.play_count),
        SortKey::PlaysDesc => b.play_count.cmp(&a.play_count),
        SortKey::RatingAsc => a.community_rating.total_cmp(&b.community_rating),
        SortKey::RatingDesc => b.community_rating.total_cmp(&a.community_rating),
        SortKey::PersonalRatingAsc => a.personal_rating.total_cmp(&b.personal_rating),
        SortKey::PersonalRatingDesc => b.personal_rating.total_cmp(&a.personal_rating),
        SortKey::ComplexityAsc => a.complexity_weight.total_cmp(&b.complexity_weight),
        SortKey::ComplexityDesc => b.complexity_weight.total_cmp(&a.complexity_weight),
    }
}

/// Stable in-place sort
pub fn sort_in_place(records: &mut [GameRecord], key: SortKey) {
    records.sort_by(|a, b| compare(a, b, key));
}

/// Sorted copy of `records`
pub fn sort(records: &[GameRecord], key: SortKey) -> Vec<GameRecord> {
    let mut sorted = records.to_vec();
    sort_in_place(&mut sorted, key);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_year(id: &str, year: Option<i32>) -> GameRecord {
        let mut g = GameRecord::new(id, format!("Game {}", id));
        g.year_published = year;
        g
    }

    fn ids(records: &[GameRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_unknown_year_sinks_both_ways() {
        let records = vec![
            with_year("unknown", None),
            with_year("old", Some(1995)),
            with_year("new", Some(2021)),
        ];

        assert_eq!(ids(&sort(&records, SortKey::YearAsc)), vec!["old", "new", "unknown"]);
        assert_eq!(ids(&sort(&records, SortKey::YearDesc)), vec!["new", "old", "unknown"]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let records = vec![
            GameRecord::new("1", "catan"),
            GameRecord::new("2", "Azul"),
            GameRecord::new("3", "brass"),
        ];
        assert_eq!(ids(&sort(&records, SortKey::Name)), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_name_sort_places_accented_titles_by_base_letter() {
        let records = vec![
            GameRecord::new("z", "Zombicide"),
            GameRecord::new("e", "Éclipse"),
            GameRecord::new("a", "Azul"),
            GameRecord::new("c", "Çatal"),
            GameRecord::new("b", "Brass"),
        ];
        assert_eq!(ids(&sort(&records, SortKey::Name)), vec!["a", "b", "c", "e", "z"]);
    }

    #[test]
    fn test_name_sort_accent_variants_are_ordered_totally() {
        let records = vec![
            GameRecord::new("accent", "Élan"),
            GameRecord::new("plain", "Elan"),
            GameRecord::new("lower", "elan"),
        ];
        let sorted = sort(&records, SortKey::Name);
        assert_eq!(ids(&sorted), vec!["plain", "lower", "accent"]);
        assert_eq!(sort(&sorted, SortKey::Name), sorted);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut records: Vec<GameRecord> = (0..5)
            .map(|i| {
                let mut g = GameRecord::new(i.to_string(), "Same");
                g.play_count = if i % 2 == 0 { 3 } else { 1 };
                g
            })
            .collect();

        sort_in_place(&mut records, SortKey::PlaysDesc);
        assert_eq!(ids(&records), vec!["0", "2", "4", "1", "3"]);
    }

    #[test]
    fn test_numeric_keys() {
        let mut light = GameRecord::new("light", "Light");
        light.complexity_weight = 1.2;
        light.community_rating = 6.0;
        let mut heavy = GameRecord::new("heavy", "Heavy");
        heavy.complexity_weight = 4.5;
        heavy.community_rating = 8.0;
        let records = vec![heavy, light];

        assert_eq!(ids(&sort(&records, SortKey::ComplexityAsc)), vec!["light", "heavy"]);
        assert_eq!(ids(&sort(&records, SortKey::RatingDesc)), vec!["heavy", "light"]);
        assert_eq!(ids(&sort(&records, SortKey::RatingAsc)), vec!["light", "heavy"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut records = vec![
            with_year("a", None),
            with_year("b", Some(2001)),
            with_year("c", Some(1980)),
            with_year("d", None),
        ];
        records[1].play_count = 4;
        records[2].personal_rating = 9.0;

        for key in SortKey::ALL {
            let once = sort(&records, key);
            let twice = sort(&once, key);
            assert_eq!(once, twice, "sort key {} is not idempotent", key);
        }
    }
}
