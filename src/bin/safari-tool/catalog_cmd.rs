use std::borrow::Cow;
use std::path::Path;

use anyhow::Result;

use safari_site::content::catalog::Catalog;
use safari_site::content::normalize::Normalizer;
use safari_site::filter::{CategoryFilter, ContentFilter};
use safari_site::listing::{ContentState, Listing, ListingOptions};

/// Cross references the catalog cannot enforce while parsing.
fn reference_problems(catalog: &Catalog) -> Vec<String> {
    let mut problems = vec![];
    for post in catalog.posts() {
        if !catalog.categories().contains(&post.category) {
            problems.push(format!("Post {} has category {} which is not in the category list", post.slug, post.category));
        }
    }

    for destination in catalog.destinations() {
        for id in destination.lodges.iter() {
            if !catalog.lodges().iter().any(|l| l.id == *id) {
                problems.push(format!("Destination {} lists unknown lodge {}", destination.slug, id));
            }
        }
    }

    for lodge in catalog.lodges() {
        if let Some(ref id) = lodge.destination {
            if !catalog.destinations().iter().any(|d| d.id == *id) {
                problems.push(format!("Lodge {} points to unknown destination {}", lodge.slug, id));
            }
        }
    }

    problems
}

pub(crate) fn check_cmd(catalog_path: &Path) -> Result<bool> {
    let catalog = Catalog::load(catalog_path, &Normalizer::default())?;
    println!("{}: {} categories, {} posts, {} destinations, {} lodges, {} reviews",
             catalog_path.display(),
             catalog.categories().len(),
             catalog.posts().len(),
             catalog.destinations().len(),
             catalog.lodges().len(),
             catalog.reviews().len());

    let problems = reference_problems(&catalog);
    for problem in problems.iter() {
        println!("  - {}", problem);
    }
    if problems.is_empty() {
        println!("OK");
    }

    Ok(problems.is_empty())
}

fn format_listing(listing: &Listing) -> String {
    let mut lines = vec![];
    for item in listing.items.iter() {
        lines.push(format!("{:>4}  {:<14} {}", item.id.to_string(), item.category.as_str(), item.title));
    }
    if listing.is_empty_result() {
        lines.push("No posts match these filters".to_string());
    }
    lines.push(format!("Page {} of {} ({} matching posts)", listing.page, listing.total_pages, listing.total_matches));
    lines.join("\n")
}

pub(crate) fn list_cmd(catalog_path: &Path, category: &str, query: &str, page: u32, page_size: u32) -> Result<()> {
    let catalog = Catalog::load(catalog_path, &Normalizer::default())?;
    let state = ContentState::Ready(Cow::Borrowed(catalog.posts()));
    let filter = ContentFilter::new(CategoryFilter::parse(category), query);
    let options = ListingOptions {
        page_size,
        ..Default::default()
    };

    let listing = Listing::build(&state, &filter, page, &options);
    println!("{}", format_listing(&listing));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
categories = ["Wildlife", "Guides"]

[[posts]]
id = 1
title = "Lions of the Serengeti"
category = "Wildlife"

[[posts]]
id = 2
title = "Choosing a Safari Guide"
category = "Guides"

[[posts]]
id = 3
title = "Sundowners"
category = "Lifestyle"

[[destinations]]
id = 1
name = "Masai Mara"
lodges = [101, 102]

[[lodges]]
id = 101
name = "Mara River Camp"
destination = 1

[[lodges]]
id = 201
name = "Lost Camp"
destination = 9
"#;

    #[test]
    fn test_reference_problems() {
        let catalog = Catalog::parse(CATALOG, &Normalizer::default()).unwrap();
        assert_eq!(reference_problems(&catalog), [
            "Post sundowners has category Lifestyle which is not in the category list",
            "Destination masai-mara lists unknown lodge 102",
            "Lodge lost-camp points to unknown destination 9",
        ]);
    }

    #[test]
    fn test_format_listing() {
        let catalog = Catalog::parse(CATALOG, &Normalizer::default()).unwrap();
        let state = ContentState::Ready(Cow::Borrowed(catalog.posts()));
        let filter = ContentFilter::new(CategoryFilter::parse("Wildlife"), "");
        let listing = Listing::build(&state, &filter, 1, &ListingOptions::default());
        assert_eq!(format_listing(&listing),
                   "   1  Wildlife       Lions of the Serengeti\nPage 1 of 1 (1 matching posts)");

        let filter = ContentFilter::new(CategoryFilter::All, "penguin");
        let listing = Listing::build(&state, &filter, 1, &ListingOptions::default());
        assert_eq!(format_listing(&listing), "No posts match these filters\nPage 1 of 0 (0 matching posts)");
    }
}
