use std::fmt::Debug;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use spdlog::info;
use uuid::Uuid;

/// A visitor submission. Submissions are validated and logged, nothing is stored.
pub trait Submission: Debug {
    const KIND: &'static str;

    /// One message per invalid field, empty when the submission is valid.
    fn validate(&self) -> Vec<String>;

    fn summary(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub reference: Uuid,
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn is_email(s: &str) -> bool {
    lazy_static! {
        static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_REGEX.is_match(s.trim())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub travel_dates: String,
    pub message: String,
}

impl Submission for ContactForm {
    const KIND: &'static str = "contact";

    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        if is_blank(&self.name) {
            errors.push("Please tell us your name".to_string());
        }
        if !is_email(&self.email) {
            errors.push("Please enter a valid email address".to_string());
        }
        if is_blank(&self.message) {
            errors.push("Please write a message".to_string());
        }
        errors
    }

    fn summary(&self) -> String {
        format!("from={} email={} subject={:?} travel_dates={:?}",
                self.name.trim(), self.email.trim(), self.subject.trim(), self.travel_dates.trim())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewForm {
    pub name: String,
    pub email: String,
    pub rating: String,
    pub trip: String,
    pub message: String,
}

impl ReviewForm {
    pub fn rating(&self) -> Option<u8> {
        self.rating.trim().parse::<u8>().ok().filter(|r| (1..=5).contains(r))
    }
}

impl Submission for ReviewForm {
    const KIND: &'static str = "review";

    fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        if is_blank(&self.name) {
            errors.push("Please tell us your name".to_string());
        }
        if !is_blank(&self.email) && !is_email(&self.email) {
            errors.push("Please enter a valid email address".to_string());
        }
        if self.rating().is_none() {
            errors.push("Please rate your trip from 1 to 5".to_string());
        }
        if is_blank(&self.message) {
            errors.push("Please write a few words about your trip".to_string());
        }
        errors
    }

    fn summary(&self) -> String {
        format!("from={} rating={} trip={:?}", self.name.trim(), self.rating.trim(), self.trip.trim())
    }
}

/// Validates and logs a submission, returning the reference shown to the visitor.
pub fn accept<S: Submission>(submission: &S) -> Result<Receipt, Vec<String>> {
    let errors = submission.validate();
    if !errors.is_empty() {
        info!("Rejected {} submission: {}", S::KIND, errors.join("; "));
        return Err(errors);
    }

    let reference = Uuid::new_v4();
    info!("Received {} submission {}: {}", S::KIND, reference, submission.summary());
    Ok(Receipt { reference })
}
