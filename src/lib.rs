//! # Pheed
//!
//! Fetch recent articles from scholarly journals through a small source
//! abstraction.
//!
//! ## Architecture
//!
//! - [`models`]: Value objects ([`Article`], [`Author`])
//! - [`sources`]: The [`Source`] trait and the APS journal source
//! - [`config`]: Configuration management
//! - [`utils`]: HTTP client and output rendering

pub mod config;
pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{Article, Author};
pub use sources::aps::ApsSource;
pub use sources::{Source, SourceError, SourceOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
