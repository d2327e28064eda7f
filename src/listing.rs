use std::borrow::Cow;

use crate::content::ContentItem;
use crate::error::FetchError;
use crate::filter::ContentFilter;
use crate::paginator::Paginator;

pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const DEFAULT_FEATURED_COUNT: usize = 2;

/// Outcome of obtaining a collection for one page view.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentState<'a, T: Clone> {
    Ready(Cow<'a, [T]>),
    Failed(String),
}

impl<'a, T: Clone> ContentState<'a, T> {
    /// Items to work on. A failed fetch has none.
    pub fn items(&self) -> &[T] {
        match self {
            ContentState::Ready(items) => items.as_ref(),
            ContentState::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ContentState::Ready(_) => None,
            ContentState::Failed(message) => Some(message.as_str()),
        }
    }
}

impl<T: Clone> From<Result<Vec<T>, FetchError>> for ContentState<'static, T> {
    fn from(value: Result<Vec<T>, FetchError>) -> Self {
        match value {
            Ok(items) => ContentState::Ready(Cow::Owned(items)),
            Err(e) => ContentState::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingOptions {
    pub page_size: u32,
    pub featured_count: usize,
}

impl Default for ListingOptions {
    fn default() -> Self {
        ListingOptions {
            page_size: DEFAULT_PAGE_SIZE,
            featured_count: DEFAULT_FEATURED_COUNT,
        }
    }
}

/// Everything the blog listing page shows for one request.
#[derive(Debug, PartialEq)]
pub struct Listing<'a> {
    pub page: u32,
    pub items: Vec<&'a ContentItem>,
    pub featured: Vec<&'a ContentItem>,
    pub total_matches: usize,
    pub total_pages: u32,
    pub error: Option<String>,
}

impl<'a> Listing<'a> {
    pub fn build(state: &'a ContentState<'_, ContentItem>, filter: &ContentFilter, page: u32, options: &ListingOptions) -> Self {
        let all_items = state.items();
        let matches = filter.apply(all_items);
        let paginator = Paginator::from(&matches, options.page_size);
        let items = paginator.get_page(page).to_vec();

        let featured = if page == 1 {
            featured(all_items, options.featured_count)
        } else {
            vec![]
        };

        Listing {
            page,
            items,
            featured,
            total_matches: paginator.item_count(),
            total_pages: paginator.page_count(),
            error: state.error().map(|e| e.to_string()),
        }
    }

    /// Filters matched nothing. A failed fetch is not an empty result.
    pub fn is_empty_result(&self) -> bool {
        self.error.is_none() && self.total_matches == 0
    }
}

/// The first `count` featured items of the whole collection, in source order.
pub fn featured(items: &[ContentItem], count: usize) -> Vec<&ContentItem> {
    items.iter().filter(|i| i.featured).take(count).collect()
}
