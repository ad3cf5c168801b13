pub mod bgg;
pub mod file;
pub mod http;

use async_trait::async_trait;

use crate::core::EnrichmentData;
use crate::error::Result;

pub use bgg::BggProvider;
pub use file::FileSource;
pub use http::HttpTransport;

/// Opaque "fetch a URL, get text or fail" capability
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// Where the raw collection document comes from
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetch the raw collection XML
    async fn fetch_collection(&self) -> Result<String>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// "Lookup many by id" for supplemental attributes
#[async_trait]
pub trait EnrichmentLookup: Send + Sync {
    /// Fetch and parse one batch. Ids missing from the answer are simply
    /// absent from the result.
    async fn lookup_many(&self, ids: &[String]) -> Result<Vec<EnrichmentData>>;

    /// Lookup name for logging
    fn name(&self) -> &str;
}
