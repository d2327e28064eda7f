use std::io;

use ramhorns::Template;

use crate::view::parse_template;

/// A short page with a title, one message and a link onwards. Used for
/// "not found", fetch failures and submission receipts.
#[derive(ramhorns::Content, Debug, Clone, PartialEq)]
pub struct Message {
    pub title: String,
    pub message: String,
    pub link: String,
    pub link_label: String,
}

impl Message {
    pub fn not_found(what: &str, link: &str, link_label: &str) -> Self {
        Message {
            title: format!("{} not found", what),
            message: format!("The {} you are looking for does not exist or has been removed.", what.to_lowercase()),
            link: link.to_string(),
            link_label: link_label.to_string(),
        }
    }

    pub fn failure(what: &str, message: &str, link: &str, link_label: &str) -> Self {
        Message {
            title: format!("Could not load {}", what.to_lowercase()),
            message: message.to_string(),
            link: link.to_string(),
            link_label: link_label.to_string(),
        }
    }
}

#[derive(ramhorns::Content)]
struct MessagePage<'a> {
    site_name: &'a str,
    page: &'a Message,
}

pub struct MessageRenderer<'a> {
    pub template: Template<'a>,
}

impl MessageRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<MessageRenderer> {
        let template = parse_template(tpl_src, "message")?;
        Ok(MessageRenderer {
            template,
        })
    }

    pub fn render(&self, site_name: &str, message: &Message) -> String {
        self.template.render(&MessagePage {
            site_name,
            page: message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "{{site_name}}: {{#page}}{{title}}. {{message}} <a href=\"{{link}}\">{{link_label}}</a>{{/page}}";

    #[test]
    fn test_not_found() {
        let renderer = MessageRenderer::new(TEMPLATE).unwrap();
        let res = renderer.render("Savanna Trails", &Message::not_found("Lodge", "/destinations", "Back to destinations"));
        assert_eq!(res, "Savanna Trails: Lodge not found. The lodge you are looking for does not exist or has been removed. \
<a href=\"/destinations\">Back to destinations</a>");
    }

    #[test]
    fn test_failure() {
        let message = Message::failure("Lodge", "Failed to load lodge details", "/destinations", "Back");
        assert_eq!(message.title, "Could not load lodge");
        assert_eq!(message.message, "Failed to load lodge details");
    }
}
