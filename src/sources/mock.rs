//! In-memory journal client for tests and offline use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::sources::aps::{ApsArticle, Issue, Journal, JournalClient, Volume};
use crate::sources::SourceError;

/// A journal client that serves predefined volumes and issues.
///
/// Each journal has a single current volume. Issues are reported in the order
/// they were added, so the last one added is the latest.
#[derive(Debug, Default)]
pub struct MockJournalClient {
    journals: HashMap<String, MockVolume>,
    volume_calls: AtomicUsize,
    issue_calls: AtomicUsize,
}

#[derive(Debug, Default)]
struct MockVolume {
    number: u32,
    issues: Vec<(String, Vec<ApsArticle>)>,
}

impl MockJournalClient {
    /// Create a new mock client with no journals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current volume of a journal, dropping issues of any other volume.
    pub fn with_volume(mut self, journal: &str, number: u32) -> Self {
        self.volume_mut(journal, number);
        self
    }

    /// Add an issue to a journal's current volume.
    pub fn with_issue(
        mut self,
        journal: &str,
        volume: u32,
        issue: &str,
        articles: Vec<ApsArticle>,
    ) -> Self {
        self.volume_mut(journal, volume)
            .issues
            .push((issue.to_string(), articles));
        self
    }

    /// Number of `volume` calls served so far.
    pub fn volume_calls(&self) -> usize {
        self.volume_calls.load(Ordering::SeqCst)
    }

    /// Number of `issue` calls served so far.
    pub fn issue_calls(&self) -> usize {
        self.issue_calls.load(Ordering::SeqCst)
    }

    fn volume_mut(&mut self, journal: &str, number: u32) -> &mut MockVolume {
        let volume = self.journals.entry(journal.to_string()).or_default();
        if volume.number != number {
            volume.number = number;
            volume.issues.clear();
        }
        volume
    }

    fn journal(&self, journal: &Journal) -> Result<&MockVolume, SourceError> {
        self.journals
            .get(journal.name)
            .ok_or_else(|| SourceError::NotFound(format!("No data for journal {}", journal.name)))
    }
}

#[async_trait]
impl JournalClient for MockJournalClient {
    async fn volume(&self, journal: &Journal) -> Result<Volume, SourceError> {
        self.volume_calls.fetch_add(1, Ordering::SeqCst);
        let volume = self.journal(journal)?;
        Ok(Volume {
            number: volume.number,
            issues: volume.issues.iter().map(|(id, _)| id.clone()).collect(),
        })
    }

    async fn issue(
        &self,
        journal: &Journal,
        volume: u32,
        issue: &str,
    ) -> Result<Issue, SourceError> {
        self.issue_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.journal(journal)?;
        if current.number != volume {
            return Err(SourceError::NotFound(format!(
                "No volume {} for journal {}",
                volume, journal.name
            )));
        }

        current
            .issues
            .iter()
            .find(|(id, _)| id == issue)
            .map(|(id, articles)| Issue {
                number: id.clone(),
                articles: articles.clone(),
            })
            .ok_or_else(|| {
                SourceError::NotFound(format!(
                    "No issue {} in {} volume {}",
                    issue, journal.name, volume
                ))
            })
    }
}
