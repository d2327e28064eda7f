use std::io;

use ramhorns::Template;

use crate::forms::ContactForm;
use crate::view::parse_template;

#[derive(ramhorns::Content)]
struct ViewError<'a> {
    error: &'a str,
}

#[derive(ramhorns::Content)]
struct ContactPage<'a> {
    site_name: &'a str,
    errors: Vec<ViewError<'a>>,
    has_errors: bool,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    subject: &'a str,
    travel_dates: &'a str,
    message: &'a str,
}

pub struct ContactRenderer<'a> {
    pub template: Template<'a>,
}

impl ContactRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<ContactRenderer> {
        let template = parse_template(tpl_src, "contact")?;
        Ok(ContactRenderer {
            template,
        })
    }

    pub fn render(&self, site_name: &str, form: &ContactForm, errors: &[String]) -> String {
        self.template.render(&ContactPage {
            site_name,
            errors: errors.iter().map(|e| ViewError { error: e.as_str() }).collect(),
            has_errors: !errors.is_empty(),
            name: &form.name,
            email: &form.email,
            phone: &form.phone,
            subject: &form.subject,
            travel_dates: &form.travel_dates,
            message: &form.message,
        })
    }
}
