use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Error reading catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error parsing catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("Duplicate {kind} slug {slug}")]
    DuplicateSlug { kind: &'static str, slug: String },
}

/// Everything that can go wrong while talking to a remote content source.
///
/// The `Display` output is what ends up in front of the visitor, so
/// `Unsuccessful` carries the message sent by the source untouched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid source url {0}")]
    InvalidUrl(String),
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Unsuccessful(String),
    #[error("Response carried no data")]
    MissingData,
}
