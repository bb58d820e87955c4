pub mod client;
pub mod parser;
pub mod types;

pub use client::ArxivClient;
pub use types::{ArxivAuthor, ArxivEntry};
