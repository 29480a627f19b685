//! Article model representing a published paper from any source.

use serde::{Deserialize, Serialize};

use super::Author;

/// A published paper with its authors.
///
/// The URL points at the page holding the article metadata, which is not
/// necessarily the PDF. `summary` carries an abstract or teaser when the
/// source has one; `None` means the source gave nothing, which is not the same
/// as an empty summary.
///
/// Equality covers every field, and the author list is compared in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Article {
    title: String,
    authors: Vec<Author>,
    url: String,
    summary: Option<String>,
}

impl Article {
    /// Create a new article. Authors keep the order of the iterator.
    pub fn new(
        title: impl Into<String>,
        authors: impl IntoIterator<Item = Author>,
        url: impl Into<String>,
        summary: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into_iter().collect(),
            url: url.into(),
            summary,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Author names joined with `"; "`, in credit order
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(Author::name)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
