use std::collections::HashMap;

use crate::filter::{CategoryFilter, ContentFilter};

#[derive(PartialEq, Debug, Default)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    /// 1 when missing, not a number or zero.
    pub fn get_page(&self) -> u32 {
        match self.items.get("page").and_then(|v| v.trim().parse::<u32>().ok()) {
            Some(0) | None => 1,
            Some(page) => page,
        }
    }

    pub fn get_category(&self) -> CategoryFilter {
        match self.items.get("category") {
            Some(category) => CategoryFilter::parse(category),
            None => CategoryFilter::All,
        }
    }

    pub fn get_query(&self) -> &str {
        self.items.get("q").map(|q| q.as_str()).unwrap_or("")
    }

    pub fn get_filter(&self) -> ContentFilter {
        ContentFilter::new(self.get_category(), self.get_query())
    }
}
