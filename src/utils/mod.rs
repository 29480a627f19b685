//! Utility modules supporting the sources and the command line.
//!
//! - [`HttpClient`]: shared HTTP client configured from [`crate::config::HttpConfig`]
//! - [`render_articles`] / [`render_journals`]: table, JSON, and plain output

mod display;
mod http;

pub use display::{render_articles, render_journals, truncate_with_ellipsis, OutputFormat};
pub use http::HttpClient;
