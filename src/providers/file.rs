use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::Result;
use crate::providers::CollectionSource;

/// Collection export saved on disk
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl CollectionSource for FileSource {
    async fn fetch_collection(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileSource::new("/definitely/not/here/collection.xml");
        assert!(source.name().starts_with("file:"));
        assert!(matches!(source.fetch_collection().await, Err(CollectionError::Io(_))));
    }

    #[tokio::test]
    async fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("bgg-collection-{}.xml", std::process::id()));
        tokio::fs::write(&path, "<items/>").await.unwrap();

        let text = FileSource::new(&path).fetch_collection().await.unwrap();
        assert_eq!(text, "<items/>");

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
