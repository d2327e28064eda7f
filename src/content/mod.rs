use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

pub mod catalog;
pub mod normalize;
pub mod reading_time;

/// Category value meaning "no category filtering". Never a member of the category list.
pub const ALL_CATEGORIES: &str = "All";

pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Wildlife",
    "Travel Tips",
    "Conservation",
    "Photography",
    "Guides",
    "Destinations",
    "Other",
];

pub const FALLBACK_CATEGORY: &str = "Other";

/// Identifier of a record, integer or string on the wire.
///
/// Two ids are equal when both parse as unsigned integers with the same value
/// (`"007" == "7"`), otherwise when the strings are equal.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    fn as_number(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }

    /// Form used for hashing and uniqueness checks.
    pub fn canonical(&self) -> String {
        match self.as_number() {
            Some(n) => n.to_string(),
            None => self.0.clone(),
        }
    }
}

impl PartialEq for ItemId {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.0 == other.0,
        }
    }
}

impl Hash for ItemId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        ItemId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Number(u64),
            Text(String),
        }

        let id = match WireId::deserialize(deserializer)? {
            WireId::Number(n) => ItemId(n.to_string()),
            WireId::Text(s) => ItemId(s),
        };
        Ok(id)
    }
}

/// Raw identifier taken from a URL. Matches a record by id or by slug.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn parse(raw: &str) -> Self {
        ItemKey(raw.trim().trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches_slug<T: Keyed>(&self, item: &T) -> bool {
        item.slug() == self.0
    }

    pub fn matches_id<T: Keyed>(&self, item: &T) -> bool {
        *item.id() == ItemId(self.0.clone())
    }
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Records reachable by id or slug.
pub trait Keyed {
    fn id(&self) -> &ItemId;
    fn slug(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn new(name: &str) -> Self {
        Category(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ItemId,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author: String,
    pub publish_date: String,
    pub read_time: String,
    pub featured: bool,
    pub featured_image: String,
}

impl Keyed for ContentItem {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: ItemId,
    pub slug: String,
    pub name: String,
    pub country: String,
    pub region: String,
    pub summary: String,
    pub description: String,
    pub image: String,
    pub highlights: Vec<String>,
    pub best_time: String,
    pub lodges: Vec<ItemId>,
}

impl Keyed for Destination {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

/// A camp or lodge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lodge {
    pub id: ItemId,
    pub slug: String,
    pub name: String,
    pub destination: Option<ItemId>,
    pub location: String,
    pub description: String,
    pub image: String,
    pub amenities: Vec<String>,
    pub price_from: Option<u32>,
    pub rating: Option<f32>,
}

impl Keyed for Lodge {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

/// A guest review. `rating` is always within 1..=5.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub trip: String,
    pub text: String,
    pub date: String,
}
