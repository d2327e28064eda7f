use std::io;

use ramhorns::Template;

use crate::content::{Destination, Lodge};
use crate::text_utils::render_markdown;
use crate::view::lodge_renderer::{lodge_link, price_label, rating_label};
use crate::view::{parse_template, view_tags, ViewTag};

pub fn destination_link(destination: &Destination) -> String {
    format!("/destinations/{}/", destination.slug)
}

#[derive(ramhorns::Content)]
struct DestinationCard<'a> {
    link: String,
    name: &'a str,
    country: &'a str,
    region: &'a str,
    summary: &'a str,
    image: &'a str,
    best_time: &'a str,
}

impl<'a> DestinationCard<'a> {
    fn from(destination: &'a Destination) -> Self {
        DestinationCard {
            link: destination_link(destination),
            name: &destination.name,
            country: &destination.country,
            region: &destination.region,
            summary: &destination.summary,
            image: &destination.image,
            best_time: &destination.best_time,
        }
    }
}

#[derive(ramhorns::Content)]
struct DestinationListPage<'a> {
    site_name: &'a str,
    destinations: Vec<DestinationCard<'a>>,
    no_destinations: bool,
}

#[derive(ramhorns::Content)]
struct LodgeCard<'a> {
    link: String,
    name: &'a str,
    location: &'a str,
    image: &'a str,
    price: String,
    rating: String,
}

#[derive(ramhorns::Content)]
struct DestinationPage<'a> {
    site_name: &'a str,
    name: &'a str,
    country: &'a str,
    region: &'a str,
    summary: &'a str,
    image: &'a str,
    best_time: &'a str,
    highlights: Vec<ViewTag<'a>>,
    description: &'a str,
    lodges: Vec<LodgeCard<'a>>,
    no_lodges: bool,
}

pub struct DestinationListRenderer<'a> {
    pub template: Template<'a>,
}

impl DestinationListRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<DestinationListRenderer> {
        let template = parse_template(tpl_src, "destination list")?;
        Ok(DestinationListRenderer {
            template,
        })
    }

    pub fn render(&self, site_name: &str, destinations: &[Destination]) -> String {
        self.template.render(&DestinationListPage {
            site_name,
            destinations: destinations.iter().map(DestinationCard::from).collect(),
            no_destinations: destinations.is_empty(),
        })
    }
}

pub struct DestinationRenderer<'a> {
    pub template: Template<'a>,
}

impl DestinationRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<DestinationRenderer> {
        let template = parse_template(tpl_src, "destination")?;
        Ok(DestinationRenderer {
            template,
        })
    }

    pub fn render(&self, site_name: &str, destination: &Destination, lodges: &[&Lodge]) -> io::Result<String> {
        let description = render_markdown(&destination.description)?;
        let lodges: Vec<LodgeCard> = lodges.iter()
            .map(|l| LodgeCard {
                link: lodge_link(l),
                name: &l.name,
                location: &l.location,
                image: &l.image,
                price: price_label(l.price_from),
                rating: rating_label(l.rating),
            })
            .collect();

        Ok(self.template.render(&DestinationPage {
            site_name,
            name: &destination.name,
            country: &destination.country,
            region: &destination.region,
            summary: &destination.summary,
            image: &destination.image,
            best_time: &destination.best_time,
            highlights: view_tags(&destination.highlights),
            description: &description,
            no_lodges: lodges.is_empty(),
            lodges,
        }))
    }
}
