use std::io;

use ramhorns::Template;

use crate::content::ContentItem;
use crate::filter::CategoryFilter;
use crate::text_utils::{format_publish_date, render_markdown};
use crate::view::list_renderer::listing_link;
use crate::view::{parse_template, view_tags, ViewTag};

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    site_name: &'a str,
    id: String,
    author: &'a str,
    tags: Vec<ViewTag<'a>>,
    date: String,
    read_time: &'a str,
    category: &'a str,
    category_link: String,
    image: &'a str,
    post_title: &'a str,
    post_content: &'a str,
    back_link: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = parse_template(view_tpl_src, "post view")?;
        Ok(PostRenderer {
            template,
        })
    }

    pub fn render(&self, site_name: &str, item: &ContentItem) -> io::Result<String> {
        let post_content = render_markdown(&item.content)?;
        let rendered_page = self.template.render(&ViewItem {
            site_name,
            id: item.id.to_string(),
            author: &item.author,
            tags: view_tags(&item.tags),
            date: format_publish_date(&item.publish_date),
            read_time: &item.read_time,
            category: item.category.as_str(),
            category_link: listing_link(&CategoryFilter::Only(item.category.clone()), "", 1),
            image: &item.featured_image,
            post_title: &item.title,
            post_content: &post_content,
            back_link: "/blog",
        });

        Ok(rendered_page)
    }
}
