use std::io;

use chrono::NaiveDate;
use ramhorns::Template;

use crate::config::Site;
use crate::content::catalog::Catalog;
use crate::content::ContentItem;
use crate::listing::ContentState;
use crate::view::destination_renderer::destination_link;
use crate::view::{parse_template, PostCard};

#[derive(ramhorns::Content)]
struct ViewDestination<'a> {
    name: &'a str,
    country: &'a str,
    link: String,
}

#[derive(ramhorns::Content)]
struct IndexPage<'a> {
    site_name: &'a str,
    tagline: &'a str,
    years_operating: u32,
    post_count: u64,
    destination_count: u64,
    lodge_count: u64,
    review_count: u64,
    average_rating: String,
    failed: bool,
    error_message: &'a str,
    featured: Vec<PostCard<'a>>,
    destinations: Vec<ViewDestination<'a>>,
}

pub struct IndexRenderer<'a> {
    pub template: Template<'a>,
}

impl IndexRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<IndexRenderer> {
        let template = parse_template(tpl_src, "index")?;
        Ok(IndexRenderer {
            template,
        })
    }

    /// Post figures come from `blogs`, the collection this page view fetched.
    pub fn render(&self, site: &Site, catalog: &Catalog, blogs: &ContentState<'_, ContentItem>,
                  featured: &[&ContentItem], today: NaiveDate) -> String {
        let error_message = blogs.error().unwrap_or("");
        self.template.render(&IndexPage {
            site_name: &site.name,
            tagline: &site.tagline,
            years_operating: site.established.years_until(today),
            post_count: blogs.items().len() as u64,
            destination_count: catalog.destinations().len() as u64,
            lodge_count: catalog.lodges().len() as u64,
            review_count: catalog.reviews().len() as u64,
            average_rating: catalog.average_rating().map(|a| format!("{:.1}", a)).unwrap_or_default(),
            failed: blogs.error().is_some(),
            error_message,
            featured: featured.iter().map(|i| PostCard::from(i)).collect(),
            destinations: catalog.destinations().iter()
                .map(|d| ViewDestination {
                    name: &d.name,
                    country: &d.country,
                    link: destination_link(d),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use crate::content::normalize::Normalizer;
    use crate::listing::featured;
    use crate::test_data::CATALOG_DATA;
    use crate::util::toml_date::TomlDate;

    use super::*;

    #[test]
    fn test_render_index() {
        let catalog = Catalog::parse(CATALOG_DATA, &Normalizer::default()).unwrap();
        let site = Site {
            name: "Savanna Trails".to_string(),
            tagline: "Small group safaris".to_string(),
            established: TomlDate(NaiveDate::from_ymd_opt(2009, 5, 1).unwrap()),
        };
        let today = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        let renderer = IndexRenderer::new(
            "{{site_name}} - {{tagline}} | {{years_operating}} years | {{post_count}} posts, {{destination_count}} destinations, \
{{lodge_count}} lodges, {{review_count}} reviews ({{average_rating}}) | {{#featured}}[{{title}}]{{/featured}} | {{#destinations}}({{name}}){{/destinations}}",
        ).unwrap();
        let blogs = ContentState::Ready(Cow::Borrowed(catalog.posts()));
        let featured = featured(blogs.items(), 2);
        assert_eq!(renderer.render(&site, &catalog, &blogs, &featured, today),
                   "Savanna Trails - Small group safaris | 14 years | 8 posts, 3 destinations, 4 lodges, 3 reviews (4.7) | \
[Lions of the Serengeti][Protecting Rhinos in Laikipia] | (Masai Mara)(Serengeti)(Okavango Delta)");
    }

    #[test]
    fn test_render_index_with_failed_blogs() {
        let catalog = Catalog::parse(CATALOG_DATA, &Normalizer::default()).unwrap();
        let site = Site {
            name: "Savanna Trails".to_string(),
            tagline: "".to_string(),
            established: TomlDate(NaiveDate::from_ymd_opt(2009, 5, 1).unwrap()),
        };
        let today = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        let renderer = IndexRenderer::new(
            "{{#failed}}ERROR={{error_message}} {{/failed}}{{^failed}}{{post_count}} posts {{/failed}}{{#featured}}[{{title}}]{{/featured}}",
        ).unwrap();

        let blogs: ContentState<ContentItem> = ContentState::Failed("Failed to load blogs".to_string());
        assert_eq!(renderer.render(&site, &catalog, &blogs, &[], today), "ERROR=Failed to load blogs ");

        let remote = vec![catalog.posts()[2].clone()];
        let blogs = ContentState::Ready(Cow::Owned(remote));
        let featured = featured(blogs.items(), 2);
        assert_eq!(renderer.render(&site, &catalog, &blogs, &featured, today), "1 posts [Protecting Rhinos in Laikipia]");
    }
}
