//! Contract for the collaborator that retrieves APS journal data.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::journals::Journal;
use crate::sources::SourceError;

/// Retrieves volumes and issues of an APS journal.
///
/// [`super::ApsWebClient`] scrapes journals.aps.org;
/// [`crate::sources::MockJournalClient`] serves data from memory.
#[async_trait]
pub trait JournalClient: Send + Sync + std::fmt::Debug {
    /// The journal's current (latest) volume
    async fn volume(&self, journal: &Journal) -> Result<Volume, SourceError>;

    /// One issue of a volume, with its articles in table-of-contents order
    async fn issue(
        &self,
        journal: &Journal,
        volume: u32,
        issue: &str,
    ) -> Result<Issue, SourceError>;
}

/// A journal volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub number: u32,
    /// Issue identifiers, oldest first
    pub issues: Vec<String>,
}

/// A journal issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: String,
    pub articles: Vec<ApsArticle>,
}

/// An article as listed in an APS issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApsArticle {
    pub name: String,
    pub authors: Vec<ApsAuthor>,
    pub url: String,
    pub teaser: Option<String>,
}

/// An author as listed in an APS issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApsAuthor {
    pub first_name: String,
    pub last_name: String,
}

impl ApsAuthor {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Parse a `"last, first"` name.
    ///
    /// Splits on the first comma. Without a comma the whole string is taken as
    /// the last name.
    pub fn from_sorted_name(name: &str) -> Self {
        match name.split_once(',') {
            Some((last, first)) => Self::new(first.trim(), last.trim()),
            None => Self::new("", name.trim()),
        }
    }

    /// Parse a `"First Middle Last"` name; the final word is the last name.
    ///
    /// A trailing suffix such as "Jr." is kept with the last name.
    pub fn from_display_name(name: &str) -> Self {
        let words: Vec<&str> = name.split_whitespace().collect();
        let mut last_start = words.len().saturating_sub(1);
        if words.len() > 2 && is_name_suffix(words[words.len() - 1]) {
            last_start -= 1;
        }
        Self::new(words[..last_start].join(" "), words[last_start..].join(" "))
    }
}

/// Whether a word is a generational suffix rather than a name
pub(crate) fn is_name_suffix(word: &str) -> bool {
    matches!(word, "Jr." | "Jr" | "Sr." | "Sr" | "II" | "III" | "IV")
}
