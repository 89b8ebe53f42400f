use std::collections::HashMap;
use std::fs;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{ChefError, Result};

/// Loads recipe images from remote URLs or local file paths.
///
/// Fetched bytes are memoized in an in-memory cache keyed by the reference
/// string; the same key never triggers a second fetch.
pub struct ImageLoader {
    http_client: Client,
    cache: HashMap<String, Vec<u8>>,
}

impl ImageLoader {
    pub fn new(http_client: Client) -> Self {
        Self {
            http_client,
            cache: HashMap::new(),
        }
    }

    pub async fn load(&mut self, reference: &str) -> Result<Vec<u8>> {
        if let Some(bytes) = self.cache.get(reference) {
            debug!(reference, "image cache hit");
            return Ok(bytes.clone());
        }

        let bytes = match Self::remote_url(reference) {
            Some(url) => self.fetch(url).await?,
            None => Self::read_local(reference)?,
        };

        self.cache.insert(reference.to_string(), bytes.clone());
        Ok(bytes)
    }

    pub fn is_cached(&self, reference: &str) -> bool {
        self.cache.contains_key(reference)
    }

    /// An http(s) reference parses as a remote URL; everything else,
    /// including `file://` prefixes, is treated as a local path.
    fn remote_url(reference: &str) -> Option<Url> {
        let url = Url::parse(reference).ok()?;
        matches!(url.scheme(), "http" | "https").then_some(url)
    }

    fn read_local(reference: &str) -> Result<Vec<u8>> {
        let path = reference.strip_prefix("file://").unwrap_or(reference);
        fs::read(path).map_err(|_| ChefError::NotFound(format!("image file {}", path)))
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>> {
        let response = self.http_client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_remote_fetch_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/img/1.jpg")
            .with_status(200)
            .with_body(vec![0xFF, 0xD8, 0xFF])
            .expect(1)
            .create_async()
            .await;

        let mut loader = ImageLoader::new(Client::new());
        let reference = format!("{}/img/1.jpg", server.url());

        let first = loader.load(&reference).await.unwrap();
        let second = loader.load(&reference).await.unwrap();

        mock.assert_async().await;
        assert_eq!(first, second);
        assert!(loader.is_cached(&reference));
    }

    #[tokio::test]
    async fn test_local_path_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"imagebytes").unwrap();

        let mut loader = ImageLoader::new(Client::new());
        let reference = file.path().to_string_lossy().to_string();
        let bytes = loader.load(&reference).await.unwrap();
        assert_eq!(bytes, b"imagebytes");

        // file:// prefixed references resolve to the same path.
        let prefixed = format!("file://{}", reference);
        let bytes = loader.load(&prefixed).await.unwrap();
        assert_eq!(bytes, b"imagebytes");
    }

    #[tokio::test]
    async fn test_missing_local_file_is_not_found() {
        let mut loader = ImageLoader::new(Client::new());
        let err = loader.load("/no/such/image.jpg").await.unwrap_err();
        assert!(matches!(err, ChefError::NotFound(_)));
    }
}
