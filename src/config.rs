//! Engine configuration
//!
//! Every field has a default; `from_map` falls back to it per key when a
//! value is missing or unparsable, so a partially broken environment
//! still yields a usable config. `validate` catches the combinations that
//! cannot work at all.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{CollectionError, Result};

pub const DEFAULT_API_BASE: &str = "https://boardgamegeek.com/xmlapi2";
pub const DEFAULT_BATCH_SIZE: usize = 20;
pub const DEFAULT_BATCH_DELAY_MS: u64 = 100;

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_batch_delay_ms() -> u64 {
    DEFAULT_BATCH_DELAY_MS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// BGG user whose owned games are fetched
    #[serde(default)]
    pub username: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Explicit collection document URL (e.g. a published export);
    /// overrides the username-derived one
    #[serde(default)]
    pub collection_url: Option<String>,

    /// Games per enrichment lookup
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between enrichment batches
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Per-batch lookup timeout; unset means wait as long as the transport does
    #[serde(default)]
    pub batch_timeout_ms: Option<u64>,

    /// HTTP client timeout; unset keeps the client default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            api_base: default_api_base(),
            collection_url: None,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
            batch_timeout_ms: None,
            request_timeout_secs: None,
        }
    }
}

impl EngineConfig {
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Build from `BGG_*` keys with per-key fallbacks
    pub fn from_map(values: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            values
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let number = |key: &str| text(key).and_then(|v| v.parse::<u64>().ok());

        Self {
            username: text("BGG_USERNAME").unwrap_or(defaults.username),
            api_base: text("BGG_API_BASE").unwrap_or(defaults.api_base),
            collection_url: text("BGG_COLLECTION_URL"),
            batch_size: number("BGG_BATCH_SIZE")
                .map(|n| n as usize)
                .filter(|n| *n > 0)
                .unwrap_or(defaults.batch_size),
            batch_delay_ms: number("BGG_BATCH_DELAY_MS").unwrap_or(defaults.batch_delay_ms),
            batch_timeout_ms: number("BGG_BATCH_TIMEOUT_MS"),
            request_timeout_secs: number("BGG_REQUEST_TIMEOUT_SECS"),
        }
    }

    /// Read the process environment
    pub fn from_env() -> Self {
        Self::from_map(&std::env::vars().collect())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(CollectionError::Config("batch_size must be at least 1".into()));
        }
        if self.collection_url.is_none() && self.username.trim().is_empty() {
            return Err(CollectionError::Config(
                "either a username or a collection URL is required".into(),
            ));
        }
        Ok(())
    }

    /// Owned games with statistics for `username`, unless overridden
    pub fn collection_url(&self) -> String {
        match &self.collection_url {
            Some(url) => url.clone(),
            None => format!(
                "{}/collection?username={}&own=1&stats=1",
                self.api_base.trim_end_matches('/'),
                urlencoding::encode(self.username.trim())
            ),
        }
    }

    /// Thing lookup for a batch of ids, comma-joined
    pub fn thing_url(&self, ids: &[String]) -> String {
        format!(
            "{}/thing?id={}&stats=1",
            self.api_base.trim_end_matches('/'),
            ids.join(",")
        )
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn batch_timeout(&self) -> Option<Duration> {
        self.batch_timeout_ms.map(Duration::from_millis)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl std::fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "source={}, batch_size={}, batch_delay={}ms, batch_timeout={}",
            self.collection_url(),
            self.batch_size,
            self.batch_delay_ms,
            self.batch_timeout_ms
                .map(|ms| format!("{}ms", ms))
                .unwrap_or_else(|| "none".to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.batch_delay(), Duration::from_millis(100));
        assert_eq!(config.batch_timeout(), None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_from_map_fallbacks() {
        let config = EngineConfig::from_map(&map(&[
            ("BGG_USERNAME", "koraytugay"),
            ("BGG_BATCH_SIZE", "0"),
            ("BGG_BATCH_DELAY_MS", "slow"),
            ("BGG_BATCH_TIMEOUT_MS", "5000"),
        ]));
        assert_eq!(config.username, "koraytugay");
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.batch_delay_ms, DEFAULT_BATCH_DELAY_MS);
        assert_eq!(config.batch_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_urls() {
        let config = EngineConfig::for_user("board gamer");
        assert_eq!(
            config.collection_url(),
            "https://boardgamegeek.com/xmlapi2/collection?username=board%20gamer&own=1&stats=1"
        );
        assert_eq!(
            config.thing_url(&["13".to_string(), "822".to_string()]),
            "https://boardgamegeek.com/xmlapi2/thing?id=13,822&stats=1"
        );

        let mut pinned = EngineConfig::default();
        pinned.collection_url = Some("https://example.org/collection.xml".into());
        assert_eq!(pinned.collection_url(), "https://example.org/collection.xml");
    }

    #[test]
    fn test_validate() {
        assert!(EngineConfig::default().validate().is_err());
        assert!(EngineConfig::for_user("someone").validate().is_ok());

        let mut zero = EngineConfig::for_user("someone");
        zero.batch_size = 0;
        assert!(matches!(zero.validate(), Err(CollectionError::Config(_))));
    }

    #[test]
    fn test_from_json_defaults() {
        let config = EngineConfig::from_json(r#"{"username": "someone", "batch_delay_ms": 250}"#).unwrap();
        assert_eq!(config.username, "someone");
        assert_eq!(config.batch_delay_ms, 250);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }
}
