use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use spdlog::{info, warn};

use crate::content::normalize::{Normalizer, WireDestination, WireLodge, WirePost, WireReview};
use crate::content::{Category, ContentItem, Destination, ItemId, ItemKey, Keyed, Lodge, Review, DEFAULT_CATEGORIES};
use crate::error::CatalogError;

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default = "default_categories")]
    categories: Vec<String>,
    #[serde(default)]
    posts: Vec<WirePost>,
    #[serde(default)]
    destinations: Vec<WireDestination>,
    #[serde(default)]
    lodges: Vec<WireLodge>,
    #[serde(default)]
    reviews: Vec<WireReview>,
}

/// The site's compiled content. Built once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    posts: Vec<ContentItem>,
    destinations: Vec<Destination>,
    lodges: Vec<Lodge>,
    reviews: Vec<Review>,
}

impl Catalog {
    pub fn load(path: &Path, normalizer: &Normalizer) -> Result<Catalog, CatalogError> {
        let src = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::parse(&src, normalizer)?;
        info!("Catalog {} loaded: {} posts, {} destinations, {} lodges, {} reviews",
            path.display(),
            catalog.posts.len(),
            catalog.destinations.len(),
            catalog.lodges.len(),
            catalog.reviews.len());
        Ok(catalog)
    }

    pub fn parse(src: &str, normalizer: &Normalizer) -> Result<Catalog, CatalogError> {
        let file: CatalogFile = toml::from_str(src)?;

        let categories: Vec<Category> = file.categories.iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty() && *c != super::ALL_CATEGORIES)
            .map(Category::new)
            .collect();
        let posts: Vec<ContentItem> = file.posts.into_iter().map(|p| normalizer.post(p)).collect();
        let destinations: Vec<Destination> = file.destinations.into_iter().map(|d| normalizer.destination(d)).collect();
        let lodges: Vec<Lodge> = file.lodges.into_iter().map(|l| normalizer.lodge(l)).collect();

        ensure_unique("post", &posts)?;
        ensure_unique("destination", &destinations)?;
        ensure_unique("lodge", &lodges)?;

        for post in posts.iter() {
            if !categories.contains(&post.category) {
                warn!("Post {} uses category {} which is not in the category list. It is only listed under All",
                    post.slug, post.category);
            }
        }

        let reviews: Vec<Review> = file.reviews.into_iter()
            .filter_map(|r| {
                if !(1..=5).contains(&r.rating) {
                    warn!("Skipping review by {} with rating {}", r.author, r.rating);
                }
                r.into_review()
            })
            .collect();

        Ok(Catalog {
            categories,
            posts,
            destinations,
            lodges,
            reviews,
        })
    }

    /// The single list of categories offered as filters.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn posts(&self) -> &[ContentItem] {
        &self.posts
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn lodges(&self) -> &[Lodge] {
        &self.lodges
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn destination(&self, key: &ItemKey) -> Option<&Destination> {
        find(&self.destinations, key)
    }

    pub fn lodge(&self, key: &ItemKey) -> Option<&Lodge> {
        find(&self.lodges, key)
    }

    /// Lodges listed by the destination, in the destination's order, followed by
    /// lodges pointing back at the destination that it does not list.
    pub fn lodges_at(&self, destination: &Destination) -> Vec<&Lodge> {
        let mut lodges: Vec<&Lodge> = destination.lodges.iter()
            .filter_map(|id| self.lodges.iter().find(|l| l.id == *id))
            .collect();
        for lodge in self.lodges.iter() {
            let points_back = lodge.destination.as_ref() == Some(&destination.id);
            if points_back && !lodges.iter().any(|l| l.id == lodge.id) {
                lodges.push(lodge);
            }
        }
        lodges
    }

    pub fn average_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| r.rating as u32).sum();
        Some(total as f32 / self.reviews.len() as f32)
    }
}

/// Record whose slug is `key`, otherwise the first one whose id is `key`.
pub fn find<'a, T: Keyed>(items: &'a [T], key: &ItemKey) -> Option<&'a T> {
    items.iter().find(|item| key.matches_slug(*item))
        .or_else(|| items.iter().find(|item| key.matches_id(*item)))
}

fn ensure_unique<T: Keyed>(kind: &'static str, items: &[T]) -> Result<(), CatalogError> {
    let mut ids: HashSet<&ItemId> = HashSet::new();
    let mut slugs: HashSet<&str> = HashSet::new();
    for item in items {
        if !ids.insert(item.id()) {
            return Err(CatalogError::DuplicateId { kind, id: item.id().to_string() });
        }
        if !slugs.insert(item.slug()) {
            return Err(CatalogError::DuplicateSlug { kind, slug: item.slug().to_string() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_data::CATALOG_DATA;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::parse(CATALOG_DATA, &Normalizer::default()).unwrap()
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = catalog();
        assert_eq!(catalog.posts().len(), 8);
        assert_eq!(catalog.destinations().len(), 3);
        assert_eq!(catalog.lodges().len(), 4);
        assert_eq!(catalog.reviews().len(), 3);
        assert_eq!(catalog.categories().len(), 7);
        assert_eq!(catalog.categories()[0], Category::new("Wildlife"));
    }

    #[test]
    fn test_posts_keep_source_order() {
        let catalog = catalog();
        let ids: Vec<String> = catalog.posts().iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_default_categories() {
        let catalog = Catalog::parse("", &Normalizer::default()).unwrap();
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, DEFAULT_CATEGORIES);
        assert!(catalog.posts().is_empty());
        assert_eq!(catalog.average_rating(), None);
    }

    #[test]
    fn test_all_is_never_a_category() {
        let catalog = Catalog::parse(r#"categories = ["All", "Wildlife", " "]"#, &Normalizer::default()).unwrap();
        assert_eq!(catalog.categories(), [Category::new("Wildlife")]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let src = r#"
[[posts]]
id = 1
title = "First"

[[posts]]
id = "001"
title = "Second"
"#;
        let err = Catalog::parse(src, &Normalizer::default()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: "post", .. }));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let src = r#"
[[lodges]]
id = 1
name = "Sand River Camp"

[[lodges]]
id = 2
name = "Sand River  Camp"
"#;
        let err = Catalog::parse(src, &Normalizer::default()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug { kind: "lodge", .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Catalog::parse("[[posts]\nid = ", &Normalizer::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_lookup_by_id_and_slug() {
        let catalog = catalog();
        let mara = catalog.destination(&ItemKey::parse("1")).unwrap();
        assert_eq!(mara.name, "Masai Mara");
        assert_eq!(catalog.destination(&ItemKey::parse("serengeti")).unwrap().id, ItemId::from(2));
        assert!(catalog.destination(&ItemKey::parse("99")).is_none());
        assert_eq!(catalog.lodge(&ItemKey::parse("101")).unwrap().slug, "mara-river-camp");
    }

    #[test]
    fn test_slug_wins_over_id() {
        let src = r#"
[[lodges]]
id = 2
name = "Kirawira Camp"

[[lodges]]
id = 5
slug = "2"
name = "Camp Two"
"#;
        let catalog = Catalog::parse(src, &Normalizer::default()).unwrap();
        assert_eq!(catalog.lodge(&ItemKey::parse("2")).unwrap().name, "Camp Two");
        assert_eq!(catalog.lodge(&ItemKey::parse("002")).unwrap().name, "Kirawira Camp");
        assert_eq!(catalog.lodge(&ItemKey::parse("kirawira-camp")).unwrap().id, ItemId::from(2));
    }

    #[test]
    fn test_lodges_at_destination() {
        let catalog = catalog();
        let mara = catalog.destination(&ItemKey::parse("masai-mara")).unwrap();
        let names: Vec<&str> = catalog.lodges_at(mara).iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Mara River Camp", "Governors' Camp"]);

        let okavango = catalog.destination(&ItemKey::parse("okavango-delta")).unwrap();
        assert!(catalog.lodges_at(okavango).is_empty());
    }

    #[test]
    fn test_invalid_review_is_skipped_and_average() {
        let catalog = catalog();
        let ratings: Vec<u8> = catalog.reviews().iter().map(|r| r.rating).collect();
        assert_eq!(ratings, [5, 4, 5]);
        let avg = catalog.average_rating().unwrap();
        assert!((avg - 14.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wild_ratings_do_not_break_the_catalog() {
        let src = r#"
[[reviews]]
author = "A"
rating = 300
text = "Typo"

[[reviews]]
author = "B"
rating = -1
text = "Typo"

[[reviews]]
author = "C"
rating = 3
text = "Fine"
"#;
        let catalog = Catalog::parse(src, &Normalizer::default()).unwrap();
        let authors: Vec<&str> = catalog.reviews().iter().map(|r| r.author.as_str()).collect();
        assert_eq!(authors, ["C"]);
        assert_eq!(catalog.average_rating(), Some(3.0));
    }

    #[test]
    fn test_load_bundled_catalog() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("res").join("content.toml");
        let catalog = Catalog::load(&path, &Normalizer::default()).unwrap();
        assert_eq!(catalog.posts().len(), 8);
        assert!(catalog.posts().iter().all(|p| catalog.categories().contains(&p.category)));
        for destination in catalog.destinations() {
            assert_eq!(catalog.lodges_at(destination).len(), destination.lodges.len());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("no/such/content.toml"), &Normalizer::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
