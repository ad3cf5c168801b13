use async_trait::async_trait;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::core::EnrichmentData;
use crate::error::Result;
use crate::parser::parse_things;
use crate::providers::{CollectionSource, EnrichmentLookup, HttpTransport, Transport};

/// BoardGameGeek XML API v2: collection export and thing lookups
pub struct BggProvider {
    transport: Arc<dyn Transport>,
    config: EngineConfig,
}

impl BggProvider {
    pub fn new(transport: Arc<dyn Transport>, config: EngineConfig) -> Self {
        Self { transport, config }
    }

    /// Provider over a reqwest transport built from `config`
    pub fn http(config: EngineConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::new(transport, config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[async_trait]
impl CollectionSource for BggProvider {
    async fn fetch_collection(&self) -> Result<String> {
        let url = self.config.collection_url();
        tracing::debug!("Fetching collection from {}", url);
        self.transport.get_text(&url).await
    }

    fn name(&self) -> &str {
        "bgg"
    }
}

#[async_trait]
impl EnrichmentLookup for BggProvider {
    async fn lookup_many(&self, ids: &[String]) -> Result<Vec<EnrichmentData>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let body = self.transport.get_text(&self.config.thing_url(ids)).await?;
        Ok(parse_things(&body)?)
    }

    fn name(&self) -> &str {
        "bgg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CollectionError, ParseError};
    use std::sync::Mutex;

    /// Serves canned bodies and records requested URLs
    struct CannedTransport {
        body: String,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn get_text(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    fn provider(body: &str) -> (BggProvider, Arc<CannedTransport>) {
        let transport = Arc::new(CannedTransport {
            body: body.to_string(),
            requested: Mutex::new(Vec::new()),
        });
        let provider = BggProvider::new(transport.clone(), EngineConfig::for_user("tester"));
        (provider, transport)
    }

    #[tokio::test]
    async fn test_lookup_builds_batched_url() {
        let (bgg, transport) = provider(
            r#"<items><item id="13"><statistics><ratings><averageweight value="2.3"/></ratings></statistics></item></items>"#,
        );

        let data = bgg.lookup_many(&["13".to_string(), "822".to_string()]).await.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].complexity_weight, Some(2.3));
        assert_eq!(
            transport.requested.lock().unwrap().as_slice(),
            ["https://boardgamegeek.com/xmlapi2/thing?id=13,822&stats=1"]
        );
    }

    #[tokio::test]
    async fn test_lookup_surfaces_api_errors() {
        let (bgg, _) = provider("<message>Rate limited</message>");
        let err = bgg.lookup_many(&["1".to_string()]).await.unwrap_err();
        assert!(matches!(err, CollectionError::Parse(ParseError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_empty_batch_skips_request() {
        let (bgg, transport) = provider("<items/>");
        assert!(bgg.lookup_many(&[]).await.unwrap().is_empty());
        assert!(transport.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_bgg_collection_live() {
        let bgg = BggProvider::http(EngineConfig::for_user("koraytugay")).unwrap();
        let xml = bgg.fetch_collection().await.unwrap();
        assert!(xml.contains("<items") || xml.contains("<message"));
    }
}
