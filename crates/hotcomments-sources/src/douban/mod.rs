pub mod client;
pub mod parser;

pub use client::DoubanClient;
pub use parser::{extract_comment, parse_page, PageOutcome};
