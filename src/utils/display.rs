//! Terminal display utilities for articles and journals.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::models::Article;
use crate::sources::aps::Journal;
use crate::sources::SourceCapabilities;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table when writing to a terminal, JSON otherwise
    Auto,
    Table,
    Json,
    Plain,
}

impl OutputFormat {
    /// Resolve `Auto` against whether stdout is a terminal
    pub fn resolve(self, is_terminal: bool) -> Self {
        match self {
            OutputFormat::Auto if is_terminal => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

/// Truncate text to at most `max_chars` characters, appending "..." if cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept.trim_end())
}

/// Render articles in the given format.
///
/// `is_terminal` resolves `Auto` and turns on colors in plain output.
pub fn render_articles(
    articles: &[Article],
    format: OutputFormat,
    is_terminal: bool,
) -> Result<String, serde_json::Error> {
    match format.resolve(is_terminal) {
        OutputFormat::Json => serde_json::to_string_pretty(articles),
        OutputFormat::Table => Ok(articles_table(articles)),
        _ => Ok(articles_plain(articles, is_terminal)),
    }
}

fn articles_table(articles: &[Article]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "Authors", "URL"]);

    for (i, article) in articles.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            truncate_with_ellipsis(article.title(), 80),
            truncate_with_ellipsis(&article.author_names(), 60),
            article.url().to_string(),
        ]);
    }

    table.to_string()
}

fn articles_plain(articles: &[Article], color: bool) -> String {
    let mut out = String::new();
    for (i, article) in articles.iter().enumerate() {
        if color {
            out.push_str(&format!("{}. {}\n", i + 1, article.title().bold()));
        } else {
            out.push_str(&format!("{}. {}\n", i + 1, article.title()));
        }
        if !article.authors().is_empty() {
            out.push_str(&format!("   Authors: {}\n", article.author_names()));
        }
        if color {
            out.push_str(&format!("   URL: {}\n", article.url().cyan()));
        } else {
            out.push_str(&format!("   URL: {}\n", article.url()));
        }
        if let Some(summary) = article.summary() {
            out.push_str(&format!("   {}\n", truncate_with_ellipsis(summary, 200)));
        }
    }
    out
}

#[derive(Serialize)]
struct JournalRow<'a> {
    #[serde(flatten)]
    journal: &'a Journal,
    search: bool,
    recent: bool,
}

/// Render the journal registry, with the operations each journal supports
pub fn render_journals(
    journals: &[Journal],
    capabilities: SourceCapabilities,
    format: OutputFormat,
    is_terminal: bool,
) -> Result<String, serde_json::Error> {
    let rows: Vec<JournalRow> = journals
        .iter()
        .map(|journal| JournalRow {
            journal,
            search: capabilities.contains(SourceCapabilities::SEARCH),
            recent: capabilities.contains(SourceCapabilities::RECENT),
        })
        .collect();

    let mark = |on: bool| if on { "yes" } else { "no" };

    match format.resolve(is_terminal) {
        OutputFormat::Json => serde_json::to_string_pretty(&rows),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["Name", "Title", "Search", "Recent"]);
            for row in &rows {
                table.add_row(vec![
                    row.journal.name,
                    row.journal.title,
                    mark(row.search),
                    mark(row.recent),
                ]);
            }
            Ok(table.to_string())
        }
        _ => Ok(rows
            .iter()
            .map(|row| format!("{:<12} {}\n", row.journal.name, row.journal.title))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;
    use crate::sources::aps::JOURNALS;

    fn articles() -> Vec<Article> {
        vec![
            Article::new(
                "First",
                vec![Author::new("Paul", "Dirac")],
                "https://example.com/1",
                Some("Summary".to_string()),
            ),
            Article::new("Second", Vec::new(), "https://example.com/2", None),
        ]
    }

    #[test]
    fn test_resolve_auto() {
        assert_eq!(OutputFormat::Auto.resolve(true), OutputFormat::Table);
        assert_eq!(OutputFormat::Auto.resolve(false), OutputFormat::Json);
        assert_eq!(OutputFormat::Plain.resolve(true), OutputFormat::Plain);
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
        assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
        assert_eq!(truncate_with_ellipsis("Hello", 2), "..");
    }

    #[test]
    fn test_render_json() {
        let out = render_articles(&articles(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value[0]["title"], "First");
        assert_eq!(value[0]["authors"][0]["last_name"], "Dirac");
        assert!(value[1]["summary"].is_null());
    }

    #[test]
    fn test_render_plain() {
        let out = render_articles(&articles(), OutputFormat::Plain, false).unwrap();

        assert!(out.contains("1. First"));
        assert!(out.contains("Authors: Dirac, Paul"));
        assert!(out.contains("URL: https://example.com/2"));
        assert!(out.contains("Summary"));
    }

    #[test]
    fn test_render_table() {
        let out = render_articles(&articles(), OutputFormat::Table, false).unwrap();
        assert!(out.contains("First"));
        assert!(out.contains("Dirac, Paul"));
    }

    #[test]
    fn test_render_journals_json() {
        let out = render_journals(
            &JOURNALS,
            SourceCapabilities::RECENT,
            OutputFormat::Json,
            false,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 13);
        assert_eq!(value[8]["name"], "PRL");
        assert_eq!(value[8]["search"], false);
        assert_eq!(value[8]["recent"], true);
    }
}
