use std::io;

use ramhorns::Template;

use crate::content::Category;
use crate::filter::{CategoryFilter, ContentFilter};
use crate::listing::Listing;
use crate::view::{parse_template, PostCard};

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site_name: &'a str,
    query: &'a str,
    selected_category: &'a str,
    all_link: String,
    all_selected: bool,
    categories: Vec<CategoryChip<'a>>,
    featured: Vec<PostCard<'a>>,
    has_featured: bool,
    post_list: Vec<PostCard<'a>>,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
    total_matches: u64,
    failed: bool,
    error_message: &'a str,
    no_results: bool,
    filtered: bool,
}

#[derive(ramhorns::Content)]
struct CategoryChip<'a> {
    name: &'a str,
    link: String,
    selected: bool,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
    link: String,
}

/// Link to the blog listing. The page is left out when it is the first one.
pub fn listing_link(category: &CategoryFilter, query: &str, page: u32) -> String {
    let mut params: Vec<(&str, String)> = vec![];
    if let CategoryFilter::Only(category) = category {
        params.push(("category", category.as_str().to_string()));
    }
    if !query.is_empty() {
        params.push(("q", query.to_string()));
    }
    if page > 1 {
        params.push(("page", page.to_string()));
    }

    match serde_urlencoded::to_string(&params) {
        Ok(qs) if !qs.is_empty() => format!("/blog?{}", qs),
        _ => "/blog".to_string(),
    }
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = parse_template(list_tpl_src, "list")?;
        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, site_name: &str, listing: &Listing, categories: &[Category], filter: &ContentFilter) -> String {
        let query = filter.query();
        let categories = categories.iter()
            .map(|c| {
                let chip_filter = CategoryFilter::Only(c.clone());
                CategoryChip {
                    name: c.as_str(),
                    link: listing_link(&chip_filter, query, 1),
                    selected: filter.category == chip_filter,
                }
            })
            .collect();

        let page_list = (1..=listing.total_pages)
            .map(|number| ViewPagination {
                current: number == listing.page,
                number,
                link: listing_link(&filter.category, query, number),
            })
            .collect();

        let featured: Vec<PostCard> = listing.featured.iter().map(|i| PostCard::from(i)).collect();
        let selected_category = match &filter.category {
            CategoryFilter::All => "",
            CategoryFilter::Only(category) => category.as_str(),
        };

        self.template.render(&ListPage {
            site_name,
            query,
            selected_category,
            all_link: listing_link(&CategoryFilter::All, query, 1),
            all_selected: filter.category == CategoryFilter::All,
            categories,
            has_featured: !featured.is_empty(),
            featured,
            post_list: listing.items.iter().map(|i| PostCard::from(i)).collect(),
            page_list,
            show_pagination: listing.total_pages > 1,
            total_matches: listing.total_matches as u64,
            failed: listing.error.is_some(),
            error_message: listing.error.as_deref().unwrap_or(""),
            no_results: listing.is_empty_result(),
            filtered: filter.is_active(),
        })
    }
}
