use serde::Deserialize;

use crate::content::reading_time::read_time_label;
use crate::content::{Category, ContentItem, Destination, ItemId, Lodge, Review, FALLBACK_CATEGORY};
use crate::text_utils::{slugify, summarize};

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/public/images/placeholder.jpg";
pub const UNKNOWN_AUTHOR: &str = "Unknown";

const EXCERPT_MAX_CHARS: usize = 180;

/// Tags come either as a list or as one comma separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireTags {
    List(Vec<String>),
    Joined(String),
}

impl WireTags {
    fn into_tags(self) -> Vec<String> {
        let pieces: Vec<String> = match self {
            WireTags::List(tags) => tags,
            WireTags::Joined(joined) => joined.split(',').map(|s| s.to_string()).collect(),
        };
        pieces.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// A blog post as found in the catalog file or in a remote blog list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePost {
    #[serde(alias = "_id")]
    pub id: ItemId,
    pub slug: Option<String>,
    pub title: String,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    pub category: Option<String>,
    pub tags: Option<WireTags>,
    pub author: Option<String>,
    #[serde(alias = "author_name")]
    pub author_name: Option<String>,
    #[serde(alias = "publish_date")]
    pub publish_date: Option<String>,
    #[serde(alias = "read_time")]
    pub read_time: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(alias = "featured_image")]
    pub featured_image: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDestination {
    #[serde(alias = "_id")]
    pub id: ItemId,
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default, alias = "best_time")]
    pub best_time: String,
    #[serde(default)]
    pub lodges: Vec<ItemId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLodge {
    #[serde(alias = "_id")]
    pub id: ItemId,
    pub slug: Option<String>,
    pub name: String,
    pub destination: Option<ItemId>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
    pub amenities: Option<WireTags>,
    #[serde(alias = "price_from")]
    pub price_from: Option<u32>,
    pub rating: Option<f32>,
}

/// A review as written in the catalog. The rating is read wide so a typo
/// only drops that review.
#[derive(Debug, Clone, Deserialize)]
pub struct WireReview {
    pub author: String,
    pub rating: i64,
    #[serde(default)]
    pub trip: String,
    pub text: String,
    #[serde(default)]
    pub date: String,
}

impl WireReview {
    /// `None` when the rating is outside 1..=5.
    pub fn into_review(self) -> Option<Review> {
        if !(1..=5).contains(&self.rating) {
            return None;
        }
        let rating = u8::try_from(self.rating).ok()?;
        Some(Review {
            author: self.author,
            rating,
            trip: self.trip,
            text: self.text,
            date: self.date,
        })
    }
}

/// Fills the gaps left by content sources so views never deal with missing fields.
#[derive(Debug, Clone)]
pub struct Normalizer {
    placeholder_image: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(DEFAULT_PLACEHOLDER_IMAGE)
    }
}

impl Normalizer {
    pub fn new(placeholder_image: &str) -> Self {
        Normalizer {
            placeholder_image: placeholder_image.to_string(),
        }
    }

    fn image(&self, candidates: &[&Option<String>]) -> String {
        candidates.iter()
            .filter_map(|c| c.as_deref())
            .map(str::trim)
            .find(|c| !c.is_empty())
            .unwrap_or(self.placeholder_image.as_str())
            .to_string()
    }

    fn slug(slug: Option<String>, name: &str, id: &ItemId) -> String {
        match slug.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            Some(slug) => slug,
            None => {
                let derived = slugify(name);
                if derived.is_empty() { id.canonical() } else { derived }
            }
        }
    }

    pub fn post(&self, wire: WirePost) -> ContentItem {
        let featured_image = self.image(&[&wire.featured_image, &wire.image]);
        let author = [wire.author, wire.author_name].into_iter()
            .flatten()
            .map(|a| a.trim().to_string())
            .find(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        let category = wire.category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
        let excerpt = wire.excerpt.unwrap_or_else(|| summarize(&wire.content, EXCERPT_MAX_CHARS));
        let read_time = wire.read_time
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| read_time_label(&wire.content));
        let slug = Self::slug(wire.slug, &wire.title, &wire.id);

        ContentItem {
            id: wire.id,
            slug,
            title: wire.title,
            excerpt,
            content: wire.content,
            category: Category(category),
            tags: wire.tags.map(WireTags::into_tags).unwrap_or_default(),
            author,
            publish_date: wire.publish_date.unwrap_or_default(),
            read_time,
            featured: wire.featured,
            featured_image,
        }
    }

    pub fn destination(&self, wire: WireDestination) -> Destination {
        let image = self.image(&[&wire.image]);
        let slug = Self::slug(wire.slug, &wire.name, &wire.id);

        Destination {
            id: wire.id,
            slug,
            name: wire.name,
            country: wire.country,
            region: wire.region,
            summary: wire.summary,
            description: wire.description,
            image,
            highlights: wire.highlights,
            best_time: wire.best_time,
            lodges: wire.lodges,
        }
    }

    pub fn lodge(&self, wire: WireLodge) -> Lodge {
        let image = self.image(&[&wire.image]);
        let slug = Self::slug(wire.slug, &wire.name, &wire.id);

        Lodge {
            id: wire.id,
            slug,
            name: wire.name,
            destination: wire.destination,
            location: wire.location,
            description: wire.description,
            image,
            amenities: wire.amenities.map(WireTags::into_tags).unwrap_or_default(),
            price_from: wire.price_from,
            rating: wire.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_from_json(json: &str) -> ContentItem {
        let wire: WirePost = serde_json::from_str(json).unwrap();
        Normalizer::default().post(wire)
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let post = post_from_json(r#"{"id": 4, "title": "Lions of the Serengeti", "content": "Prides rest in the shade."}"#);
        assert_eq!(post.id, ItemId::from(4));
        assert_eq!(post.slug, "lions-of-the-serengeti");
        assert!(post.tags.is_empty());
        assert_eq!(post.featured_image, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(post.author, UNKNOWN_AUTHOR);
        assert_eq!(post.category, Category::new("Other"));
        assert_eq!(post.excerpt, "Prides rest in the shade.");
        assert_eq!(post.read_time, "1 min read");
        assert!(!post.featured);
    }

    #[test]
    fn test_tags_as_comma_separated_string() {
        let post = post_from_json(r#"{"id": "a1", "title": "t", "tags": " big cats, ,Serengeti ,migration"}"#);
        assert_eq!(post.tags, ["big cats", "Serengeti", "migration"]);
    }

    #[test]
    fn test_tags_as_list_keep_order() {
        let post = post_from_json(r#"{"id": 1, "title": "t", "tags": ["zebra", "  ", "antelope"]}"#);
        assert_eq!(post.tags, ["zebra", "antelope"]);
    }

    #[test]
    fn test_author_falls_back_to_alternate_field() {
        let post = post_from_json(r#"{"id": 1, "title": "t", "authorName": "Amani Njoroge"}"#);
        assert_eq!(post.author, "Amani Njoroge");
        let post = post_from_json(r#"{"id": 1, "title": "t", "author": "Zawadi", "authorName": "Other"}"#);
        assert_eq!(post.author, "Zawadi");
        let post = post_from_json(r#"{"id": 1, "title": "t", "author": "  "}"#);
        assert_eq!(post.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_image_falls_back_to_alternate_field() {
        let post = post_from_json(r#"{"id": 1, "title": "t", "image": "/img/mara.jpg"}"#);
        assert_eq!(post.featured_image, "/img/mara.jpg");
        let post = post_from_json(r#"{"id": 1, "title": "t", "featuredImage": "/img/a.jpg", "image": "/img/b.jpg"}"#);
        assert_eq!(post.featured_image, "/img/a.jpg");
    }

    #[test]
    fn test_custom_placeholder_and_mongo_id() {
        let wire: WirePost = serde_json::from_str(r#"{"_id": "65f0c1", "title": "!!!"}"#).unwrap();
        let post = Normalizer::new("/public/none.png").post(wire);
        assert_eq!(post.id, ItemId("65f0c1".to_string()));
        assert_eq!(post.slug, "65f0c1");
        assert_eq!(post.featured_image, "/public/none.png");
    }

    #[test]
    fn test_lodge_normalization() {
        let wire: WireLodge = serde_json::from_str(
            r#"{"id": "9", "name": "Kichwa Tembo Camp", "amenities": "pool, wifi", "priceFrom": 450}"#,
        ).unwrap();
        let lodge = Normalizer::default().lodge(wire);
        assert_eq!(lodge.slug, "kichwa-tembo-camp");
        assert_eq!(lodge.amenities, ["pool", "wifi"]);
        assert_eq!(lodge.price_from, Some(450));
        assert_eq!(lodge.image, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(lodge.destination, None);
    }

    #[test]
    fn test_review_rating_range() {
        let review = |rating: i64| WireReview {
            author: "Lena".to_string(),
            rating,
            trip: "".to_string(),
            text: "Great guides".to_string(),
            date: "".to_string(),
        };
        assert_eq!(review(4).into_review().map(|r| r.rating), Some(4));
        assert_eq!(review(1).into_review().map(|r| r.rating), Some(1));
        assert!(review(0).into_review().is_none());
        assert!(review(6).into_review().is_none());
        assert!(review(300).into_review().is_none());
        assert!(review(-1).into_review().is_none());
    }
}
