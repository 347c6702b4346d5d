//! Cache-first HTTP retrieval of per-(browser, OS) agent catalogs.
//!
//! Catalogs live on a CDN as one JSON file per browser/OS pair. A fetch
//! consults the local cache store first and only goes to the network on a
//! miss. Every failure mode degrades to an empty catalog: callers never see
//! an error and never need a failure branch.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{self, CacheStore};
use crate::catalog::Catalog;

const CDN_BASE: &str =
    "https://cdn.jsdelivr.net/gh/ray-lothian/UserAgent-Switcher/v2/firefox/data/popup/";

/// Name of the cache store scoped to catalog bodies.
const STORE_NAME: &str = "agents";

/// Internal failure taxonomy. Absorbed before reaching callers; kept
/// distinct so each branch can be logged and tested on its own.
#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed catalog body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Seam for the controller and tests: anything that can resolve a
/// (browser, OS) key to a catalog.
#[async_trait]
pub trait FetchCatalog: Send + Sync {
    async fn fetch(&self, browser: &str, os: &str) -> Catalog;
}

/// Production fetcher: shared cache store in front of the CDN.
pub struct CatalogFetcher {
    client: reqwest::Client,
    store: Arc<Mutex<Box<dyn CacheStore>>>,
    base_url: String,
}

impl Default for CatalogFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFetcher {
    pub fn new() -> Self {
        Self::with_store(cache::open_store(STORE_NAME), CDN_BASE)
    }

    pub fn with_store(store: Box<dyn CacheStore>, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("uaswitch")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            store: Arc::new(Mutex::new(store)),
            base_url: base_url.to_string(),
        }
    }

    /// URL of the catalog for a browser/OS pair. Both segments are
    /// lower-cased; slashes in OS names (e.g. "GNU/Linux") become hyphens.
    fn catalog_url(&self, browser: &str, os: &str) -> String {
        let browser = browser.to_lowercase();
        let os = os.replace('/', "-").to_lowercase();
        format!("{}browsers/{browser}-{os}.json", self.base_url)
    }

    async fn try_fetch(&self, url: &str) -> Result<Catalog, FetchError> {
        let cached = { self.store.lock().await.lookup(url) };
        let body = match cached {
            Some(body) => body,
            None => {
                let response = self.client.get(url).send().await?;
                if !response.status().is_success() {
                    return Err(FetchError::Status(response.status()));
                }
                let body = response.text().await?;
                self.store.lock().await.store(url, &body);
                body
            }
        };

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl FetchCatalog for CatalogFetcher {
    /// Resolve the catalog for a (browser, OS) key. Infallible: transport,
    /// status, and parse failures all yield an empty catalog.
    async fn fetch(&self, browser: &str, os: &str) -> Catalog {
        let url = self.catalog_url(browser, os);
        match self.try_fetch(&url).await {
            Ok(catalog) => catalog,
            Err(err) => {
                debug!(%url, "catalog fetch failed: {err}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NoopCache;
    use std::collections::HashMap;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// In-memory store for exercising the cache-first path.
    struct MemoryCache(HashMap<String, String>);

    impl CacheStore for MemoryCache {
        fn lookup(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn store(&mut self, key: &str, body: &str) {
            self.0.insert(key.to_string(), body.to_string());
        }
    }

    /// Serve a single canned HTTP response on a loopback port.
    fn one_shot_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/")
    }

    fn fetcher(base_url: &str) -> CatalogFetcher {
        CatalogFetcher::with_store(Box::new(NoopCache), base_url)
    }

    #[test]
    fn test_catalog_url_normalization() {
        let fetcher = fetcher("https://cdn.test/data/");
        assert_eq!(
            fetcher.catalog_url("Chrome", "Windows"),
            "https://cdn.test/data/browsers/chrome-windows.json"
        );
        assert_eq!(
            fetcher.catalog_url("Firefox", "GNU/Linux"),
            "https://cdn.test/data/browsers/firefox-gnu-linux.json"
        );
        assert_eq!(
            fetcher.catalog_url("Safari", "Mac OS"),
            "https://cdn.test/data/browsers/safari-mac os.json"
        );
    }

    #[tokio::test]
    async fn test_transport_failure_yields_empty_catalog() {
        // Nothing listens on the reserved port; connect fails immediately.
        let fetcher = fetcher("http://127.0.0.1:1/");
        let catalog = fetcher.fetch("Chrome", "Windows").await;
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_non_200_yields_empty_catalog() {
        let base = one_shot_server(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        );
        let catalog = fetcher(&base).fetch("Chrome", "Windows").await;
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_yields_empty_catalog() {
        let base = one_shot_server(
            "HTTP/1.1 200 OK\r\ncontent-length: 8\r\nconnection: close\r\n\r\nnot json",
        );
        let catalog = fetcher(&base).fetch("Chrome", "Windows").await;
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let body = r#"[{
            "browser": {"name": "Chrome", "version": "120.0.0"},
            "os": {"name": "Windows", "version": "10"},
            "ua": "UA-1"
        }]"#;

        // base_url points at a dead port, so any network attempt would
        // come back empty; the cached body must win.
        let mut entries = HashMap::new();
        entries.insert(
            "http://127.0.0.1:1/browsers/chrome-windows.json".to_string(),
            body.to_string(),
        );
        let fetcher =
            CatalogFetcher::with_store(Box::new(MemoryCache(entries)), "http://127.0.0.1:1/");

        let catalog = fetcher.fetch("Chrome", "Windows").await;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].ua, "UA-1");
    }

    #[tokio::test]
    async fn test_successful_fetch_populates_cache() {
        let base = one_shot_server(
            "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\n[]",
        );
        let fetcher = CatalogFetcher::with_store(Box::new(MemoryCache(HashMap::new())), &base);

        let catalog = fetcher.fetch("Chrome", "Windows").await;
        assert!(catalog.is_empty());

        let url = fetcher.catalog_url("Chrome", "Windows");
        let stored = fetcher.store.lock().await.lookup(&url);
        assert_eq!(stored.as_deref(), Some("[]"));
    }
}
