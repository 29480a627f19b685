//! Article sources with a small trait-based architecture.
//!
//! This module defines the [`Source`] trait that every article source
//! implements, the [`SourceError`] type sources report failures with, and the
//! open-ended [`SourceOptions`] passed to each query.
//!
//! The only concrete source today is [`aps::ApsSource`], which serves the
//! latest issue of a journal published by the American Physical Society.
//!
//! # Example
//!
//! ```rust,no_run
//! use pheed::sources::{aps::ApsSource, Source, SourceOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ApsSource::new("PRL")?;
//! for article in source.recent(&SourceOptions::new()).await? {
//!     println!("{} ({})", article.title(), article.author_names());
//! }
//! # Ok(())
//! # }
//! ```

pub mod aps;
pub mod mock;
mod options;

pub use mock::MockJournalClient;
pub use options::SourceOptions;

use async_trait::async_trait;

use crate::models::Article;

/// Ordered articles returned by a source query
pub type Results = Vec<Article>;

bitflags::bitflags! {
    /// Operations a source actually serves
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SourceCapabilities: u32 {
        const SEARCH = 1 << 0;
        const RECENT = 1 << 1;
    }
}

/// The Source trait defines the interface for all article sources.
///
/// # Implementing a New Source
///
/// 1. Create a struct that implements `Source`
/// 2. Implement `name` and whichever queries the source can answer
/// 3. Report those queries from `capabilities`
///
/// Queries left at their default fail with [`SourceError::NotImplemented`].
/// A source that implements a query only to refuse it should return
/// [`SourceError::Unsupported`] instead.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Name of this source instance (e.g. a journal code such as "PRL")
    fn name(&self) -> &str;

    /// Describe the capabilities of this source
    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::empty()
    }

    /// Whether this source answers `search`
    fn supports_search(&self) -> bool {
        self.capabilities().contains(SourceCapabilities::SEARCH)
    }

    /// Whether this source answers `recent`
    fn supports_recent(&self) -> bool {
        self.capabilities().contains(SourceCapabilities::RECENT)
    }

    /// Search for articles matching the options
    async fn search(&self, _options: &SourceOptions) -> Result<Results, SourceError> {
        Err(SourceError::NotImplemented)
    }

    /// Get the most recently published articles
    async fn recent(&self, _options: &SourceOptions) -> Result<Results, SourceError> {
        Err(SourceError::NotImplemented)
    }
}

/// Errors that can occur when interacting with a source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The source never implemented the requested operation
    #[error("Operation not implemented for this source")]
    NotImplemented,

    /// The source implements the operation only to refuse it
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// The requested journal is not a known publication
    #[error("Unknown APS journal: {name:?}. Options are {options}")]
    UnknownJournal { name: String, options: String },

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested data does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Error status returned by the remote service
    #[error("API error: {0}")]
    Api(String),

    /// Parsing error (HTML, URLs, numbers)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::Parse(format!("URL: {}", err))
    }
}
