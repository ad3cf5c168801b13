use std::collections::HashSet;

use crate::core::game_record::{clamp_score, GameRecord, MAX_RATING, MAX_WEIGHT, UNKNOWN_GAME_NAME};
use crate::error::ParseError;
use crate::parser::poll::best_at_player_counts;
use crate::parser::xml::{parse_document, XmlElement};
use crate::parser::{check_error_root, element_text, parse_f64, parse_u32, text_or_value, value_attr};

/// Normalize a collection export into records, one per `<item>`, in
/// document order.
pub fn parse_collection(xml: &str) -> Result<Vec<GameRecord>, ParseError> {
    let root = parse_document(xml)?;
    check_error_root(&root)?;

    let items = root.find_all("item");
    if items.is_empty() {
        return Err(ParseError::EmptyCollection);
    }

    let mut seen = HashSet::with_capacity(items.len());
    let records: Vec<GameRecord> = items
        .into_iter()
        .map(|item| {
            let record = record_from_item(item);
            if !seen.insert(record.id.clone()) {
                tracing::warn!("Duplicate game id {} ({}) in collection", record.id, record.name);
            }
            record
        })
        .collect();

    tracing::debug!("Normalized {} collection items", records.len());
    Ok(records)
}

/// Field extraction for a single item. Never fails: every missing or
/// unparsable field falls back to its default.
fn record_from_item(item: &XmlElement) -> GameRecord {
    let id = item
        .attr("objectid")
        .or_else(|| item.attr("id"))
        .unwrap_or_default()
        .trim();

    // Collection exports carry text, thing responses a `value` attribute
    let name = item
        .find("name")
        .and_then(text_or_value)
        .unwrap_or_else(|| UNKNOWN_GAME_NAME.to_string());

    let mut record = GameRecord::new(id, name);

    record.year_published = item
        .find("yearpublished")
        .and_then(text_or_value)
        .and_then(|y| y.parse::<i32>().ok());

    let thumbnail = item.find("thumbnail").and_then(element_text);
    record.thumbnail_url = item
        .find("image")
        .and_then(element_text)
        .or(thumbnail)
        .unwrap_or_default();

    if let Some(stats) = item.find("stats") {
        record.min_players = stats.attr("minplayers").and_then(parse_u32);
        record.max_players = stats.attr("maxplayers").and_then(parse_u32);
        record.playing_time_minutes = stats.attr("playingtime").and_then(parse_u32).unwrap_or(0);
    }

    record.play_count = item
        .find("numplays")
        .and_then(element_text)
        .as_deref()
        .and_then(parse_u32)
        .unwrap_or(0);

    record.community_rating = item
        .find_path(&["stats", "rating", "average"])
        .and_then(value_attr)
        .and_then(parse_f64)
        .map(|r| clamp_score(r, MAX_RATING))
        .unwrap_or(0.0);

    record.personal_rating = item
        .find_path(&["stats", "rating"])
        .and_then(value_attr)
        .and_then(parse_f64)
        .map(|r| clamp_score(r, MAX_RATING))
        .unwrap_or(0.0);

    record.complexity_weight = item
        .find("averageweight")
        .and_then(value_attr)
        .and_then(parse_f64)
        .map(|w| clamp_score(w, MAX_WEIGHT))
        .unwrap_or(0.0);

    record.best_at_player_counts = best_at_player_counts(item).unwrap_or_default();

    record
}
