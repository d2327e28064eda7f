use std::io;

use ramhorns::Template;

use crate::content::{Destination, Lodge};
use crate::text_utils::render_markdown;
use crate::view::destination_renderer::destination_link;
use crate::view::{parse_template, view_tags, ViewTag};

pub fn lodge_link(lodge: &Lodge) -> String {
    format!("/lodges/{}/", lodge.slug)
}

/// Empty when the lodge has no published rate.
pub fn price_label(price_from: Option<u32>) -> String {
    match price_from {
        Some(price) => format!("From ${} per night", price),
        None => "".to_string(),
    }
}

pub fn rating_label(rating: Option<f32>) -> String {
    match rating {
        Some(rating) => format!("{:.1} / 5", rating),
        None => "".to_string(),
    }
}

#[derive(ramhorns::Content)]
struct LodgePage<'a> {
    site_name: &'a str,
    name: &'a str,
    location: &'a str,
    image: &'a str,
    description: &'a str,
    amenities: Vec<ViewTag<'a>>,
    price: String,
    rating: String,
    has_destination: bool,
    destination_name: &'a str,
    destination_link: String,
}

pub struct LodgeRenderer<'a> {
    pub template: Template<'a>,
}

impl LodgeRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<LodgeRenderer> {
        let template = parse_template(tpl_src, "lodge")?;
        Ok(LodgeRenderer {
            template,
        })
    }

    pub fn render(&self, site_name: &str, lodge: &Lodge, destination: Option<&Destination>) -> io::Result<String> {
        let description = render_markdown(&lodge.description)?;
        Ok(self.template.render(&LodgePage {
            site_name,
            name: &lodge.name,
            location: &lodge.location,
            image: &lodge.image,
            description: &description,
            amenities: view_tags(&lodge.amenities),
            price: price_label(lodge.price_from),
            rating: rating_label(lodge.rating),
            has_destination: destination.is_some(),
            destination_name: destination.map(|d| d.name.as_str()).unwrap_or(""),
            destination_link: destination.map(destination_link).unwrap_or_default(),
        }))
    }
}
