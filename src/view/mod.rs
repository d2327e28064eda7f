use std::io;
use std::io::ErrorKind;
use std::path::Path;

use ramhorns::Template;

use crate::content::ContentItem;
use crate::text_utils::format_publish_date;

pub mod contact_renderer;
pub mod destination_renderer;
pub mod index_renderer;
pub mod list_renderer;
pub mod lodge_renderer;
pub mod message_renderer;
pub mod post_renderer;
pub mod review_renderer;

/// Template sources, read once at startup.
pub struct TemplateSet {
    pub index: String,
    pub blog_list: String,
    pub blog_post: String,
    pub destinations: String,
    pub destination: String,
    pub lodge: String,
    pub reviews: String,
    pub contact: String,
    pub message: String,
}

impl TemplateSet {
    pub fn load(template_dir: &Path) -> io::Result<TemplateSet> {
        let read = |file_name: &str| -> io::Result<String> {
            let full_path = template_dir.join(file_name);
            std::fs::read_to_string(&full_path).map_err(|e| {
                io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))
            })
        };

        Ok(TemplateSet {
            index: read("index.tpl")?,
            blog_list: read("blog_list.tpl")?,
            blog_post: read("blog_post.tpl")?,
            destinations: read("destinations.tpl")?,
            destination: read("destination.tpl")?,
            lodge: read("lodge.tpl")?,
            reviews: read("reviews.tpl")?,
            contact: read("contact.tpl")?,
            message: read("message.tpl")?,
        })
    }
}

pub(crate) fn parse_template<'a>(src: &'a str, name: &str) -> io::Result<Template<'a>> {
    Template::new(src).map_err(|e| {
        io::Error::new(ErrorKind::InvalidInput, format!("Error parsing {} template: {}", name, e))
    })
}

#[derive(ramhorns::Content)]
pub(crate) struct ViewTag<'a> {
    tag: &'a str,
}

pub(crate) fn view_tags(tags: &[String]) -> Vec<ViewTag<'_>> {
    tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect()
}

/// Summary of a blog post, as shown in listings.
#[derive(ramhorns::Content)]
pub(crate) struct PostCard<'a> {
    link: String,
    title: &'a str,
    excerpt: &'a str,
    category: &'a str,
    author: &'a str,
    date: String,
    read_time: &'a str,
    image: &'a str,
    tags: Vec<ViewTag<'a>>,
}

pub(crate) fn post_link(item: &ContentItem) -> String {
    format!("/blog/{}/", item.slug)
}

impl<'a> PostCard<'a> {
    pub(crate) fn from(item: &'a ContentItem) -> Self {
        PostCard {
            link: post_link(item),
            title: &item.title,
            excerpt: &item.excerpt,
            category: item.category.as_str(),
            author: &item.author,
            date: format_publish_date(&item.publish_date),
            read_time: &item.read_time,
            image: &item.featured_image,
            tags: view_tags(&item.tags),
        }
    }
}
