use crate::content::{Category, ContentItem, ALL_CATEGORIES};

/// Category selector. `All` is written as the sentinel "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | ALL_CATEGORIES => CategoryFilter::All,
            name => CategoryFilter::Only(Category::new(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    /// Exact, case-sensitive match.
    pub fn matches(&self, item: &ContentItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }
}

/// Category and free-text filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentFilter {
    pub category: CategoryFilter,
    query: String,
    needle: String,
}

impl ContentFilter {
    pub fn new(category: CategoryFilter, query: &str) -> Self {
        let query = query.trim().to_string();
        let needle = query.to_lowercase();
        ContentFilter {
            category,
            query,
            needle,
        }
    }

    /// The search text as typed, trimmed. Empty when there is no text filter.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_active(&self) -> bool {
        self.category != CategoryFilter::All || !self.needle.is_empty()
    }

    /// Substring match on title, excerpt or any tag, ignoring case.
    fn matches_text(&self, item: &ContentItem) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        item.title.to_lowercase().contains(&self.needle)
            || item.excerpt.to_lowercase().contains(&self.needle)
            || item.tags.iter().any(|t| t.to_lowercase().contains(&self.needle))
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        self.category.matches(item) && self.matches_text(item)
    }

    /// Matching items in source order.
    pub fn apply<'a>(&self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}
