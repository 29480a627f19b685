//! APS (American Physical Society) source implementation.
//!
//! An [`ApsSource`] wraps a single APS journal. Recent articles come from the
//! latest issue of the journal's current volume, fetched through a
//! [`JournalClient`].
//!
//! References:
//! - APS journals home page: https://journals.aps.org/about
//! - APS terms and conditions: https://journals.aps.org/info/terms.html

mod client;
pub mod journals;
mod web;

pub use client::{ApsArticle, ApsAuthor, Issue, JournalClient, Volume};
pub use journals::{Journal, JOURNALS};
pub use web::{ApsWebClient, APS_BASE_URL};

use async_trait::async_trait;
use std::sync::Arc;

use crate::models::{Article, Author};
use crate::sources::{Results, Source, SourceCapabilities, SourceError, SourceOptions};

/// APS source for one journal
#[derive(Debug, Clone)]
pub struct ApsSource {
    name: String,
    journal: &'static Journal,
    client: Arc<dyn JournalClient>,
}

impl ApsSource {
    /// Operations every APS source serves
    pub const CAPABILITIES: SourceCapabilities = SourceCapabilities::RECENT;

    /// Create a source for a known APS journal, fetching from journals.aps.org
    pub fn new(name: &str) -> Result<Self, SourceError> {
        let journal = resolve(name)?;
        Ok(Self {
            name: name.to_string(),
            journal,
            client: Arc::new(ApsWebClient::new()?),
        })
    }

    /// Create a source for a known APS journal using the given client
    pub fn with_client(name: &str, client: Arc<dyn JournalClient>) -> Result<Self, SourceError> {
        let journal = resolve(name)?;
        Ok(Self {
            name: name.to_string(),
            journal,
            client,
        })
    }

    /// The journal this source reads from
    pub fn journal(&self) -> &'static Journal {
        self.journal
    }
}

fn resolve(name: &str) -> Result<&'static Journal, SourceError> {
    journals::lookup(name).ok_or_else(|| SourceError::UnknownJournal {
        name: name.to_string(),
        options: journals::names().collect::<Vec<_>>().join(", "),
    })
}

#[async_trait]
impl Source for ApsSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> SourceCapabilities {
        Self::CAPABILITIES
    }

    async fn search(&self, _options: &SourceOptions) -> Result<Results, SourceError> {
        Err(SourceError::Unsupported(
            "Search functionality is not available yet for APS journals".to_string(),
        ))
    }

    /// Articles of the latest issue in the journal's current volume.
    ///
    /// Accepts no options.
    async fn recent(&self, options: &SourceOptions) -> Result<Results, SourceError> {
        if !options.is_empty() {
            return Err(SourceError::InvalidRequest(format!(
                "APS recent takes no options, got: {}",
                options.keys().collect::<Vec<_>>().join(", ")
            )));
        }

        let volume = self.client.volume(self.journal).await?;
        let issue_id = volume.issues.last().ok_or_else(|| {
            SourceError::NotFound(format!(
                "{} volume {} has no issues",
                self.journal.name, volume.number
            ))
        })?;

        tracing::debug!(
            journal = self.journal.name,
            volume = volume.number,
            issue = %issue_id,
            "Fetching latest issue"
        );

        let issue = self
            .client
            .issue(self.journal, volume.number, issue_id)
            .await?;

        tracing::info!(
            "Found {} articles in {} volume {} issue {}",
            issue.articles.len(),
            self.journal.name,
            volume.number,
            issue.number
        );

        Ok(issue.articles.iter().map(aps_article_to_article).collect())
    }
}

/// Convert an APS author to an [`Author`]
pub fn aps_author_to_author(author: &ApsAuthor) -> Author {
    Author::new(author.first_name.clone(), author.last_name.clone())
}

/// Convert an APS article to an [`Article`], keeping author order
pub fn aps_article_to_article(article: &ApsArticle) -> Article {
    Article::new(
        article.name.clone(),
        article.authors.iter().map(aps_author_to_author),
        article.url.clone(),
        article.teaser.clone(),
    )
}
