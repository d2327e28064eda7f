use std::future::Future;

use spdlog::warn;

use crate::error::FetchError;

/// Result of resolving a detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Found(T),
    NotFound,
    Failed(String),
}

/// Uses `prefetched` when present. Otherwise calls `fetch` exactly once, no retry.
pub async fn resolve<T, F, Fut>(prefetched: Option<T>, fetch: F) -> Resolution<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output=Result<Option<T>, FetchError>>,
{
    if let Some(item) = prefetched {
        return Resolution::Found(item);
    }

    match fetch().await {
        Ok(Some(item)) => Resolution::Found(item),
        Ok(None) => Resolution::NotFound,
        Err(e) => {
            warn!("Detail fetch failed: {}", e);
            Resolution::Failed(e.to_string())
        }
    }
}
