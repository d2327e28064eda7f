use std::io;

use ramhorns::Template;

use crate::content::Review;
use crate::forms::ReviewForm;
use crate::text_utils::format_publish_date;
use crate::view::parse_template;

/// Five stars, filled up to `rating`.
pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[derive(ramhorns::Content)]
struct ViewReview<'a> {
    author: &'a str,
    stars: String,
    rating: u32,
    trip: &'a str,
    text: &'a str,
    date: String,
}

#[derive(ramhorns::Content)]
struct ViewError<'a> {
    error: &'a str,
}

#[derive(ramhorns::Content)]
struct ReviewsPage<'a> {
    site_name: &'a str,
    reviews: Vec<ViewReview<'a>>,
    review_count: u64,
    has_average: bool,
    average: String,
    errors: Vec<ViewError<'a>>,
    has_errors: bool,
    form_name: &'a str,
    form_email: &'a str,
    form_trip: &'a str,
    form_message: &'a str,
    form_rating: &'a str,
}

pub struct ReviewRenderer<'a> {
    pub template: Template<'a>,
}

impl ReviewRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<ReviewRenderer> {
        let template = parse_template(tpl_src, "reviews")?;
        Ok(ReviewRenderer {
            template,
        })
    }

    /// `form` and `errors` are set when a rejected submission is shown back to the visitor.
    pub fn render(&self, site_name: &str, reviews: &[Review], average: Option<f32>, form: Option<&ReviewForm>, errors: &[String]) -> String {
        let reviews: Vec<ViewReview> = reviews.iter()
            .map(|r| ViewReview {
                author: &r.author,
                stars: stars(r.rating),
                rating: u32::from(r.rating),
                trip: &r.trip,
                text: &r.text,
                date: format_publish_date(&r.date),
            })
            .collect();

        self.template.render(&ReviewsPage {
            site_name,
            review_count: reviews.len() as u64,
            reviews,
            has_average: average.is_some(),
            average: average.map(|a| format!("{:.1}", a)).unwrap_or_default(),
            errors: errors.iter().map(|e| ViewError { error: e.as_str() }).collect(),
            has_errors: !errors.is_empty(),
            form_name: form.map(|f| f.name.as_str()).unwrap_or(""),
            form_email: form.map(|f| f.email.as_str()).unwrap_or(""),
            form_trip: form.map(|f| f.trip.as_str()).unwrap_or(""),
            form_message: form.map(|f| f.message.as_str()).unwrap_or(""),
            form_rating: form.map(|f| f.rating.as_str()).unwrap_or(""),
        })
    }
}
