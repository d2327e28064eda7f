use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use spdlog::{debug, warn};

use crate::config::Sources;
use crate::content::catalog::Catalog;
use crate::content::normalize::{Normalizer, WireLodge, WirePost};
use crate::content::{ContentItem, ItemKey, Lodge};
use crate::error::FetchError;
use crate::listing::ContentState;
use crate::lookup::{resolve, Resolution};

pub const BLOGS_FAILED_MESSAGE: &str = "Failed to load blogs";
pub const LODGE_FAILED_MESSAGE: &str = "Failed to load lodge details";

/// `{ success, data, message }` wrapper used by content providers, both ways.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        Envelope {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }

    pub fn into_result(self, default_message: &str) -> Result<T, FetchError> {
        if !self.success {
            let message = self.message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| default_message.to_string());
            return Err(FetchError::Unsuccessful(message));
        }
        self.data.ok_or(FetchError::MissingData)
    }
}

pub fn decode_envelope<T: DeserializeOwned>(body: &[u8], default_message: &str) -> Result<T, FetchError> {
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    envelope.into_result(default_message)
}

/// HTTP access to the remote providers.
pub struct RemoteSource {
    client: reqwest::Client,
    blogs_url: Option<String>,
    lodges_url: Option<String>,
}

impl RemoteSource {
    pub fn new(sources: &Sources) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(sources.timeout_secs))
            .build()
            .map_err(|source| FetchError::Request { url: "-".to_string(), source })?;

        Ok(RemoteSource {
            client,
            blogs_url: sources.blogs_url.clone(),
            lodges_url: sources.lodges_url.clone(),
        })
    }

    /// `None` when the provider answers 404.
    async fn get<T: DeserializeOwned>(&self, url: &str, default_message: &str) -> Result<Option<T>, FetchError> {
        debug!("Fetching {}", url);
        let request_error = |source| FetchError::Request { url: url.to_string(), source };
        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.bytes().await.map_err(request_error)?;
        if !status.is_success() {
            // Providers may still explain the failure in an envelope
            return match decode_envelope::<serde_json::Value>(&body, default_message) {
                Err(FetchError::Unsuccessful(message)) => Err(FetchError::Unsuccessful(message)),
                _ => Err(FetchError::Status { url: url.to_string(), status: status.as_u16() }),
            };
        }

        decode_envelope(&body, default_message).map(Some)
    }

    pub async fn fetch_blogs(&self, url: &str) -> Result<Vec<WirePost>, FetchError> {
        match self.get(url, BLOGS_FAILED_MESSAGE).await? {
            Some(posts) => Ok(posts),
            None => Err(FetchError::Unsuccessful(BLOGS_FAILED_MESSAGE.to_string())),
        }
    }

    pub async fn fetch_lodge(&self, base_url: &str, key: &ItemKey) -> Result<Option<WireLodge>, FetchError> {
        let url = lodge_url(base_url, key)?;
        self.get(url.as_str(), LODGE_FAILED_MESSAGE).await
    }
}

/// `{base_url}/{key}` with the key percent-encoded as one path segment.
fn lodge_url(base_url: &str, key: &ItemKey) -> Result<Url, FetchError> {
    let mut url = Url::parse(base_url).map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .push(key.as_str());
    Ok(url)
}

/// Where blog posts and lodges come from for a page view: the catalog, or a
/// remote provider when one is configured.
pub struct ContentSource {
    catalog: Arc<Catalog>,
    remote: Option<RemoteSource>,
    normalizer: Normalizer,
}

impl ContentSource {
    pub fn new(catalog: Arc<Catalog>, remote: Option<RemoteSource>, normalizer: Normalizer) -> Self {
        ContentSource {
            catalog,
            remote,
            normalizer,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Blog posts for one page view. A remote provider is asked once, no retry.
    pub async fn blogs(&self) -> ContentState<'_, ContentItem> {
        let (remote, url) = match self.remote.as_ref() {
            Some(remote) => match remote.blogs_url.as_deref() {
                Some(url) => (remote, url),
                None => return ContentState::Ready(Cow::Borrowed(self.catalog.posts())),
            },
            None => return ContentState::Ready(Cow::Borrowed(self.catalog.posts())),
        };

        let fetched = remote.fetch_blogs(url).await
            .map(|posts| posts.into_iter().map(|p| self.normalizer.post(p)).collect::<Vec<ContentItem>>());
        if let Err(ref e) = fetched {
            warn!("Error fetching blogs from {}: {}", url, e);
        }
        ContentState::from(fetched)
    }

    /// The catalog record is used when present, otherwise the lodge provider is asked once.
    pub async fn lodge(&self, key: &ItemKey) -> Resolution<Lodge> {
        let prefetched = self.catalog.lodge(key).cloned();
        resolve(prefetched, move || async move {
            let Some(remote) = self.remote.as_ref() else {
                return Ok(None);
            };
            let Some(base_url) = remote.lodges_url.as_deref() else {
                return Ok(None);
            };
            let lodge = remote.fetch_lodge(base_url, key).await?;
            Ok(lodge.map(|l| self.normalizer.lodge(l)))
        }).await
    }
}

#[cfg(test)]
mod tests {
    use crate::content::normalize::DEFAULT_PLACEHOLDER_IMAGE;
    use crate::content::{Category, ItemId};
    use crate::test_data::{TestProvider, CATALOG_DATA};

    use super::*;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::parse(CATALOG_DATA, &Normalizer::default()).unwrap())
    }

    fn unreachable_sources() -> Sources {
        Sources {
            blogs_url: Some("http://127.0.0.1:9/api/blogs".to_string()),
            lodges_url: Some("http://127.0.0.1:9/api/lodges".to_string()),
            timeout_secs: 2,
        }
    }

    fn provider_source(provider: &TestProvider) -> ContentSource {
        let sources = Sources {
            blogs_url: Some(provider.url("/api/blogs")),
            lodges_url: Some(provider.url("/api/lodges")),
            timeout_secs: 5,
        };
        let remote = RemoteSource::new(&sources).unwrap();
        ContentSource::new(catalog(), Some(remote), Normalizer::default())
    }

    #[test]
    fn test_decode_success() {
        let body = br#"{"success": true, "data": [{"id": 1, "title": "Lions of the Serengeti", "tags": "big cats"}]}"#;
        let posts: Vec<WirePost> = decode_envelope(body, BLOGS_FAILED_MESSAGE).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Lions of the Serengeti");
    }

    #[test]
    fn test_decode_failure_message() {
        let body = br#"{"success": false, "message": "Failed to load blogs"}"#;
        let err = decode_envelope::<Vec<WirePost>>(body, "default").unwrap_err();
        assert_eq!(err.to_string(), "Failed to load blogs");
    }

    #[test]
    fn test_decode_failure_without_message() {
        let body = br#"{"success": false}"#;
        let err = decode_envelope::<Vec<WirePost>>(body, LODGE_FAILED_MESSAGE).unwrap_err();
        assert_eq!(err.to_string(), LODGE_FAILED_MESSAGE);
    }

    #[test]
    fn test_decode_missing_data() {
        let err = decode_envelope::<Vec<WirePost>>(br#"{"success": true}"#, "x").unwrap_err();
        assert!(matches!(err, FetchError::MissingData));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_envelope::<Vec<WirePost>>(b"<html>oops</html>", "x").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_envelope_serialization() {
        let json = serde_json::to_string(&Envelope::ok(vec![1, 2])).unwrap();
        assert_eq!(json, r#"{"success":true,"data":[1,2]}"#);
        let json = serde_json::to_string(&Envelope::<u32>::failure("Lodge not found")).unwrap();
        assert_eq!(json, r#"{"success":false,"message":"Lodge not found"}"#);
    }

    #[test]
    fn test_lodge_url() {
        let url = lodge_url("https://api.example.com/api/lodges/", &ItemKey::parse("101")).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/lodges/101");
        let url = lodge_url("https://api.example.com/api/lodges", &ItemKey::parse("a b")).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/lodges/a%20b");
        assert!(matches!(lodge_url("not a url", &ItemKey::parse("1")), Err(FetchError::InvalidUrl(_))));
    }

    #[ntex::test]
    async fn test_static_blogs() {
        let source = ContentSource::new(catalog(), None, Normalizer::default());
        let state = source.blogs().await;
        assert_eq!(state.items().len(), 8);
        assert_eq!(state.error(), None);
    }

    #[ntex::test]
    async fn test_unreachable_blogs_source() {
        let remote = RemoteSource::new(&unreachable_sources()).unwrap();
        let source = ContentSource::new(catalog(), Some(remote), Normalizer::default());
        let state = source.blogs().await;
        assert!(state.items().is_empty());
        assert!(state.error().is_some());
    }

    #[ntex::test]
    async fn test_catalog_lodge_skips_fetch() {
        let remote = RemoteSource::new(&unreachable_sources()).unwrap();
        let source = ContentSource::new(catalog(), Some(remote), Normalizer::default());
        match source.lodge(&ItemKey::parse("mara-river-camp")).await {
            Resolution::Found(lodge) => assert_eq!(lodge.id, ItemId::from(101)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[ntex::test]
    async fn test_unknown_lodge_without_remote() {
        let source = ContentSource::new(catalog(), None, Normalizer::default());
        assert_eq!(source.lodge(&ItemKey::parse("999")).await, Resolution::NotFound);
    }

    #[ntex::test]
    async fn test_unknown_lodge_with_unreachable_remote() {
        let remote = RemoteSource::new(&unreachable_sources()).unwrap();
        let source = ContentSource::new(catalog(), Some(remote), Normalizer::default());
        assert!(matches!(source.lodge(&ItemKey::parse("999")).await, Resolution::Failed(_)));
    }

    #[ntex::test]
    async fn test_remote_blogs_are_normalized() {
        let provider = TestProvider::start("200 OK",
            r#"{"success": true, "data": [{"_id": "a1", "title": "Remote Lions", "tags": "big cats, night,", "authorName": "Zawadi", "featured": true}]}"#);
        let source = provider_source(&provider);

        let state = source.blogs().await;
        assert_eq!(state.error(), None);
        let posts = state.items();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, ItemId("a1".to_string()));
        assert_eq!(posts[0].slug, "remote-lions");
        assert_eq!(posts[0].tags, ["big cats", "night"]);
        assert_eq!(posts[0].author, "Zawadi");
        assert_eq!(posts[0].category, Category::new("Other"));
        assert_eq!(posts[0].featured_image, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(provider.requests(), ["GET /api/blogs HTTP/1.1"]);
    }

    #[ntex::test]
    async fn test_unsuccessful_blogs_carry_message() {
        let provider = TestProvider::start("200 OK", r#"{"success": false, "message": "Blog service is down"}"#);
        let source = provider_source(&provider);

        let state = source.blogs().await;
        assert!(state.items().is_empty());
        assert_eq!(state.error(), Some("Blog service is down"));
        assert_eq!(provider.requests().len(), 1);
    }

    #[ntex::test]
    async fn test_error_status_with_envelope() {
        let provider = TestProvider::start("500 Internal Server Error", r#"{"success": false, "message": "Failed to load blogs"}"#);
        let remote = RemoteSource::new(&unreachable_sources()).unwrap();

        let err = remote.fetch_blogs(&provider.url("/api/blogs")).await.unwrap_err();
        assert!(matches!(err, FetchError::Unsuccessful(ref m) if m == "Failed to load blogs"));
    }

    #[ntex::test]
    async fn test_error_status_without_envelope() {
        let provider = TestProvider::start("503 Service Unavailable", "<html>busy</html>");
        let remote = RemoteSource::new(&unreachable_sources()).unwrap();

        let err = remote.fetch_blogs(&provider.url("/api/blogs")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[ntex::test]
    async fn test_missing_blog_list_is_a_failure() {
        let provider = TestProvider::start("404 Not Found", "");
        let remote = RemoteSource::new(&unreachable_sources()).unwrap();

        let err = remote.fetch_blogs(&provider.url("/api/blogs")).await.unwrap_err();
        assert_eq!(err.to_string(), BLOGS_FAILED_MESSAGE);
    }

    #[ntex::test]
    async fn test_remote_lodge_not_found() {
        let provider = TestProvider::start("404 Not Found", r#"{"success": false, "message": "Lodge not found"}"#);
        let source = provider_source(&provider);

        assert_eq!(source.lodge(&ItemKey::parse("999")).await, Resolution::NotFound);
        assert_eq!(provider.requests(), ["GET /api/lodges/999 HTTP/1.1"]);
    }

    #[ntex::test]
    async fn test_remote_lodge_found() {
        let provider = TestProvider::start("200 OK",
            r#"{"success": true, "data": {"id": "7", "name": "Remote Camp", "destination": 1, "amenities": "pool, wifi"}}"#);
        let source = provider_source(&provider);

        match source.lodge(&ItemKey::parse("7")).await {
            Resolution::Found(lodge) => {
                assert_eq!(lodge.id, ItemId::from(7));
                assert_eq!(lodge.slug, "remote-camp");
                assert_eq!(lodge.destination, Some(ItemId::from(1)));
                assert_eq!(lodge.amenities, ["pool", "wifi"]);
                assert_eq!(lodge.image, DEFAULT_PLACEHOLDER_IMAGE);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(provider.requests(), ["GET /api/lodges/7 HTTP/1.1"]);
    }

    #[ntex::test]
    async fn test_remote_lodge_unsuccessful() {
        let provider = TestProvider::start("200 OK", r#"{"success": false}"#);
        let source = provider_source(&provider);

        assert_eq!(source.lodge(&ItemKey::parse("7")).await, Resolution::Failed(LODGE_FAILED_MESSAGE.to_string()));
    }
}
