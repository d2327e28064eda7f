pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod forms;
pub mod listing;
pub mod logger;
pub mod lookup;
pub mod paginator;
pub mod query_string;
pub mod server;
pub mod source;
pub mod text_utils;
pub mod util;
pub mod view;
mod test_data;
