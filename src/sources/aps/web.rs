//! Journal client that scrapes journals.aps.org.
//!
//! APS has no public API for tables of contents, so volumes and issues are
//! read from the journal's HTML pages:
//!
//! - `/{slug}/issues` links every volume as `/{slug}/issues/<volume>`
//! - `/{slug}/issues/<volume>` links its issues as `/{slug}/issues/<volume>/<issue>`
//! - `/{slug}/issues/<volume>/<issue>` lists the articles in `div.article` entries
//!
//! Paths are resolved below the configured base URL, so a mirror served under
//! a path prefix works the same as the site root.

use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::client::{is_name_suffix, ApsArticle, ApsAuthor, Issue, JournalClient, Volume};
use super::journals::Journal;
use crate::config::{ApsConfig, HttpConfig};
use crate::sources::SourceError;
use crate::utils::HttpClient;

/// Default location of the APS journals site
pub const APS_BASE_URL: &str = "https://journals.aps.org";

/// APS journal client backed by HTTP and HTML scraping
#[derive(Debug, Clone)]
pub struct ApsWebClient {
    client: HttpClient,
    base_url: Url,
}

impl ApsWebClient {
    /// Create a client with default HTTP settings against journals.aps.org
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&HttpConfig::default(), &ApsConfig::default())
    }

    /// Create a client from configuration
    pub fn from_config(http: &HttpConfig, aps: &ApsConfig) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::from_config(http)?,
            base_url: site_root(&aps.base_url)?,
        })
    }

    /// Create a client with default HTTP settings against another site root
    pub fn with_base_url(base_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::new()?,
            base_url: site_root(base_url)?,
        })
    }

    /// Fetch a page by its path relative to the base URL
    async fn fetch_html(&self, path: &str) -> Result<String, SourceError> {
        let url = self.base_url.join(path)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "text/html")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(format!("APS page not found: {}", url)));
        }
        if !status.is_success() {
            return Err(SourceError::Api(format!("APS returned status {} for {}", status, url)));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to read HTML: {}", e)))
    }
}

#[async_trait]
impl JournalClient for ApsWebClient {
    async fn volume(&self, journal: &Journal) -> Result<Volume, SourceError> {
        let index = self.fetch_html(&format!("{}/issues", journal.slug)).await?;
        let number = parse_volume_numbers(&index, journal.slug)?
            .into_iter()
            .max()
            .ok_or_else(|| SourceError::Parse(format!("No volumes listed for {}", journal.name)))?;

        let page = self
            .fetch_html(&format!("{}/issues/{}", journal.slug, number))
            .await?;
        let issues = parse_issue_ids(&page, journal.slug, number)?;

        tracing::debug!(
            "{} volume {} lists {} issues",
            journal.name,
            number,
            issues.len()
        );

        Ok(Volume { number, issues })
    }

    async fn issue(
        &self,
        journal: &Journal,
        volume: u32,
        issue: &str,
    ) -> Result<Issue, SourceError> {
        let page = self
            .fetch_html(&format!("{}/issues/{}/{}", journal.slug, volume, issue))
            .await?;
        let articles = parse_articles(&page, &self.base_url)?;

        Ok(Issue {
            number: issue.to_string(),
            articles,
        })
    }
}

/// Parse a base URL so that relative paths resolve below it
fn site_root(base_url: &str) -> Result<Url, SourceError> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css)
        .map_err(|e| SourceError::Parse(format!("Invalid selector {:?}: {:?}", css, e)))
}

fn link_pattern(pattern: &str) -> Result<Regex, SourceError> {
    Regex::new(pattern).map_err(|e| SourceError::Parse(format!("Invalid pattern: {}", e)))
}

/// Href of every link in the document
fn hrefs(html: &str) -> Result<Vec<String>, SourceError> {
    let document = Html::parse_document(html);
    let links = selector("a[href]")?;
    Ok(document
        .select(&links)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect())
}

/// Volume numbers linked from a journal's issue index
fn parse_volume_numbers(html: &str, slug: &str) -> Result<Vec<u32>, SourceError> {
    let re = link_pattern(&format!(
        r"^(?:.*/)?{}/issues/(\d+)/?$",
        regex::escape(slug)
    ))?;

    Ok(hrefs(html)?
        .iter()
        .filter_map(|href| re.captures(href))
        .filter_map(|c| c[1].parse().ok())
        .collect())
}

/// Issue identifiers linked from a volume page, oldest first
fn parse_issue_ids(html: &str, slug: &str, volume: u32) -> Result<Vec<String>, SourceError> {
    let re = link_pattern(&format!(
        r"^(?:.*/)?{}/issues/{}/(\d+)/?$",
        regex::escape(slug),
        volume
    ))?;

    let mut issues: Vec<u32> = hrefs(html)?
        .iter()
        .filter_map(|href| re.captures(href))
        .filter_map(|c| c[1].parse().ok())
        .collect();
    issues.sort_unstable();
    issues.dedup();

    Ok(issues.into_iter().map(|n| n.to_string()).collect())
}

/// Articles of an issue page, in page order
fn parse_articles(html: &str, base_url: &Url) -> Result<Vec<ApsArticle>, SourceError> {
    let document = Html::parse_document(html);
    let entries = selector("div.article")?;
    let title = selector("h5.title a")?;
    let authors = selector("h6.authors")?;
    let summary = selector("div.summary, .teaser")?;

    let mut articles = Vec::new();
    for entry in document.select(&entries) {
        let Some(link) = entry.select(&title).next() else {
            tracing::debug!("Skipping article entry without a title link");
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        let author_list = entry
            .select(&authors)
            .next()
            .map(|a| split_author_names(&element_text(&a)))
            .unwrap_or_default();

        let teaser = entry
            .select(&summary)
            .next()
            .map(|t| element_text(&t))
            .filter(|t| !t.is_empty());

        articles.push(ApsArticle {
            name: element_text(&link),
            authors: author_list,
            url: base_url.join(href)?.to_string(),
            teaser,
        });
    }

    Ok(articles)
}

/// Text content with whitespace collapsed
fn element_text(elem: &ElementRef) -> String {
    elem.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split `"A. Smith, B. Jones, and C. Doe"` into authors.
///
/// Parenthesized collaboration credits and "et al." are dropped, and a
/// suffix such as "Jr." stays with the name before it.
fn split_author_names(text: &str) -> Vec<ApsAuthor> {
    let text = strip_parenthesized(text);
    let mut names: Vec<String> = Vec::new();

    for part in text.split(',').flat_map(|part| part.split(" and ")) {
        let name = part.trim();
        let name = name.strip_prefix("and ").unwrap_or(name);
        let name = name
            .strip_suffix("et al.")
            .or_else(|| name.strip_suffix("et al"))
            .unwrap_or(name)
            .trim();
        if name.is_empty() {
            continue;
        }

        match names.last_mut() {
            Some(previous) if is_name_suffix(name) => {
                previous.push(' ');
                previous.push_str(name);
            }
            _ => names.push(name.to_string()),
        }
    }

    names
        .iter()
        .map(|name| ApsAuthor::from_display_name(name))
        .collect()
}

/// Text with every parenthesized group removed, nesting included
fn strip_parenthesized(text: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::aps::journals;

    const INDEX_HTML: &str = r#"
        <html><body>
          <a href="/prl/issues/131">Volume 131</a>
          <a href="/prl/issues/132">Volume 132</a>
          <a href="https://journals.aps.org/prl/issues/130/">Volume 130</a>
          <a href="/prb/issues/200">Other journal</a>
          <a href="/prl/issues/132/1">Issue link</a>
        </body></html>
    "#;

    const VOLUME_HTML: &str = r#"
        <html><body>
          <a href="/prl/issues/132/10">10</a>
          <a href="/prl/issues/132/2">2</a>
          <a href="/prl/issues/132/1">1</a>
          <a href="/prl/issues/132/2">2 again</a>
          <a href="/prl/issues/131/26">Previous volume</a>
        </body></html>
    "#;

    const ISSUE_HTML: &str = r#"
        <html><body>
          <div class="article panel">
            <h5 class="title"><a href="/prl/abstract/10.1103/PhysRevLett.132.010001">
              Observation of   a Thing</a></h5>
            <h6 class="authors">A. B. Smith, C. Jones, and D. Doe</h6>
            <div class="summary"><p>A teaser about the thing.</p></div>
          </div>
          <div class="article panel">
            <h5 class="title">
              <a href="/prl/abstract/10.1103/PhysRevLett.132.010002">Erratum</a>
            </h5>
          </div>
          <div class="article panel">
            <h6 class="authors">No title here</h6>
          </div>
          <div class="article panel">
            <h5 class="title"><a href="/prl/abstract/10.1103/PhysRevLett.132.010003">Pairs</a></h5>
            <h6 class="authors">E. Noether and L. Meitner</h6>
            <div class="summary">   </div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_volume_numbers() {
        let mut volumes = parse_volume_numbers(INDEX_HTML, "prl").unwrap();
        volumes.sort_unstable();
        assert_eq!(volumes, vec![130, 131, 132]);
    }

    #[test]
    fn test_parse_issue_ids_sorted_numerically() {
        let issues = parse_issue_ids(VOLUME_HTML, "prl", 132).unwrap();
        assert_eq!(issues, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_parse_articles() {
        let base = Url::parse(APS_BASE_URL).unwrap();
        let articles = parse_articles(ISSUE_HTML, &base).unwrap();

        assert_eq!(articles.len(), 3);

        let first = &articles[0];
        assert_eq!(first.name, "Observation of a Thing");
        assert_eq!(
            first.url,
            "https://journals.aps.org/prl/abstract/10.1103/PhysRevLett.132.010001"
        );
        assert_eq!(first.teaser.as_deref(), Some("A teaser about the thing."));
        assert_eq!(
            first.authors,
            vec![
                ApsAuthor::new("A. B.", "Smith"),
                ApsAuthor::new("C.", "Jones"),
                ApsAuthor::new("D.", "Doe"),
            ]
        );

        let erratum = &articles[1];
        assert_eq!(erratum.name, "Erratum");
        assert!(erratum.authors.is_empty());
        assert_eq!(erratum.teaser, None);

        let pairs = &articles[2];
        assert_eq!(
            pairs.authors,
            vec![ApsAuthor::new("E.", "Noether"), ApsAuthor::new("L.", "Meitner")]
        );
        assert_eq!(pairs.teaser, None);
    }

    #[test]
    fn test_split_author_names_keeps_suffix() {
        assert_eq!(
            split_author_names("John Smith, Jr., and Jane Doe"),
            vec![ApsAuthor::new("John", "Smith Jr."), ApsAuthor::new("Jane", "Doe")]
        );
        assert_eq!(
            split_author_names("A. Lee III and B. Kim"),
            vec![ApsAuthor::new("A.", "Lee III"), ApsAuthor::new("B.", "Kim")]
        );
    }

    #[test]
    fn test_split_author_names_drops_collaboration_credit() {
        assert_eq!(
            split_author_names(
                "R. Abbott et al. (LIGO Scientific Collaboration and Virgo Collaboration)"
            ),
            vec![ApsAuthor::new("R.", "Abbott")]
        );
        assert_eq!(
            split_author_names("M. Aaboud (ATLAS Collaboration), and C. Doe"),
            vec![ApsAuthor::new("M.", "Aaboud"), ApsAuthor::new("C.", "Doe")]
        );
    }

    #[test]
    fn test_site_root_keeps_path_prefix() {
        let root = site_root("http://proxy.local/aps").unwrap();
        assert_eq!(root.as_str(), "http://proxy.local/aps/");
        assert_eq!(
            root.join("prl/issues").unwrap().as_str(),
            "http://proxy.local/aps/prl/issues"
        );
        assert_eq!(site_root(APS_BASE_URL).unwrap().as_str(), "https://journals.aps.org/");
    }

    #[test]
    fn test_split_author_names_single() {
        assert_eq!(
            split_author_names("Richard P. Feynman"),
            vec![ApsAuthor::new("Richard P.", "Feynman")]
        );
        assert!(split_author_names("").is_empty());
    }

    #[tokio::test]
    async fn test_fetch_latest_issue_from_server() {
        let mut server = mockito::Server::new_async().await;
        let _index = server
            .mock("GET", "/prl/issues")
            .with_status(200)
            .with_body(INDEX_HTML)
            .create_async()
            .await;
        let _volume = server
            .mock("GET", "/prl/issues/132")
            .with_status(200)
            .with_body(VOLUME_HTML)
            .create_async()
            .await;
        let _issue = server
            .mock("GET", "/prl/issues/132/10")
            .with_status(200)
            .with_body(ISSUE_HTML)
            .create_async()
            .await;

        let client = ApsWebClient::with_base_url(&server.url()).unwrap();
        let prl = journals::lookup("PRL").unwrap();

        let volume = client.volume(prl).await.unwrap();
        assert_eq!(volume.number, 132);
        assert_eq!(volume.issues.last().map(String::as_str), Some("10"));

        let issue = client.issue(prl, 132, "10").await.unwrap();
        assert_eq!(issue.number, "10");
        assert_eq!(issue.articles.len(), 3);
        assert!(issue.articles[0].url.starts_with(&server.url()));
    }

    #[tokio::test]
    async fn test_fetch_below_path_prefix() {
        let mut server = mockito::Server::new_async().await;
        let _index = server
            .mock("GET", "/aps/prl/issues")
            .with_status(200)
            .with_body(r#"<a href="/aps/prl/issues/132">Volume 132</a>"#)
            .create_async()
            .await;
        let _volume = server
            .mock("GET", "/aps/prl/issues/132")
            .with_status(200)
            .with_body(r#"<a href="/aps/prl/issues/132/3">3</a>"#)
            .create_async()
            .await;
        let _issue = server
            .mock("GET", "/aps/prl/issues/132/3")
            .with_status(200)
            .with_body(ISSUE_HTML)
            .create_async()
            .await;

        let client = ApsWebClient::with_base_url(&format!("{}/aps", server.url())).unwrap();
        let prl = journals::lookup("PRL").unwrap();

        let volume = client.volume(prl).await.unwrap();
        assert_eq!(volume.number, 132);
        assert_eq!(volume.issues, vec!["3"]);

        let issue = client.issue(prl, 132, "3").await.unwrap();
        assert_eq!(issue.articles.len(), 3);
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _index = server
            .mock("GET", "/pra/issues")
            .with_status(500)
            .create_async()
            .await;

        let client = ApsWebClient::with_base_url(&server.url()).unwrap();
        let pra = journals::lookup("PRA").unwrap();

        assert!(matches!(client.volume(pra).await, Err(SourceError::Api(_))));
    }

    #[tokio::test]
    async fn test_missing_page_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _issue = server
            .mock("GET", "/prx/issues/14/9")
            .with_status(404)
            .create_async()
            .await;

        let client = ApsWebClient::with_base_url(&server.url()).unwrap();
        let prx = journals::lookup("PRX").unwrap();

        assert!(matches!(
            client.issue(prx, 14, "9").await,
            Err(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_index_without_volumes() {
        let mut server = mockito::Server::new_async().await;
        let _index = server
            .mock("GET", "/pre/issues")
            .with_status(200)
            .with_body("<html><body>Maintenance</body></html>")
            .create_async()
            .await;

        let client = ApsWebClient::with_base_url(&server.url()).unwrap();
        let pre = journals::lookup("PRE").unwrap();

        assert!(matches!(client.volume(pre).await, Err(SourceError::Parse(_))));
    }
}
