use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort order for a record view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "year-asc")]
    YearAsc,
    #[serde(rename = "year-desc")]
    YearDesc,
    #[serde(rename = "plays-asc")]
    PlaysAsc,
    #[serde(rename = "plays-desc")]
    PlaysDesc,
    #[serde(rename = "rating-asc")]
    RatingAsc,
    #[serde(rename = "rating-desc")]
    RatingDesc,
    #[serde(rename = "personalRating-asc")]
    PersonalRatingAsc,
    #[serde(rename = "personalRating-desc")]
    PersonalRatingDesc,
    #[serde(rename = "complexity-asc")]
    ComplexityAsc,
    #[serde(rename = "complexity-desc")]
    ComplexityDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 11] = [
        SortKey::Name,
        SortKey::YearAsc,
        SortKey::YearDesc,
        SortKey::PlaysAsc,
        SortKey::PlaysDesc,
        SortKey::RatingAsc,
        SortKey::RatingDesc,
        SortKey::PersonalRatingAsc,
        SortKey::PersonalRatingDesc,
        SortKey::ComplexityAsc,
        SortKey::ComplexityDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::YearAsc => "year-asc",
            SortKey::YearDesc => "year-desc",
            SortKey::PlaysAsc => "plays-asc",
            SortKey::PlaysDesc => "plays-desc",
            SortKey::RatingAsc => "rating-asc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::PersonalRatingAsc => "personalRating-asc",
            SortKey::PersonalRatingDesc => "personalRating-desc",
            SortKey::ComplexityAsc => "complexity-asc",
            SortKey::ComplexityDesc => "complexity-desc",
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(
            self,
            SortKey::YearDesc
                | SortKey::PlaysDesc
                | SortKey::RatingDesc
                | SortKey::PersonalRatingDesc
                | SortKey::ComplexityDesc
        )
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown sort key: {}", s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!("personalrating-desc".parse::<SortKey>().unwrap(), SortKey::PersonalRatingDesc);
        assert!("popularity".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_direction() {
        assert!(!SortKey::Name.is_descending());
        assert!(SortKey::YearDesc.is_descending());
        assert!(!SortKey::ComplexityAsc.is_descending());
    }
}
