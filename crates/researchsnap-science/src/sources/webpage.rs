use async_trait::async_trait;
use chrono::{Datelike, Utc};
use researchsnap_core::{CitationRecord, DEFAULT_LABEL, Identifier};
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::error::{Result, ScienceError};
use crate::http::HttpClient;
use crate::sources::CitationSource;

pub const SOURCE_NAME: &str = "webpage";

/// Last-resort tier: reads Highwire-style `citation_*` meta tags (plus
/// Open Graph and `<title>`) from the page itself.
pub struct WebPageSource {
    client: HttpClient,
}

impl WebPageSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn scrape(&self, url: &str) -> Result<CitationRecord> {
        debug!(%url, "scraping page");
        let page = self.client.get_page(url).await?;
        if !page.status.is_success() {
            warn!(%url, status = page.status.as_u16(), "scraping a non-success response");
        }
        parse_citation_page(&page.body, url, Utc::now().year())
    }
}

#[async_trait]
impl CitationSource for WebPageSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn lookup(&self, key: &str) -> Result<CitationRecord> {
        self.scrape(key).await
    }
}

/// Extracts a record from raw HTML. `current_year` is used when the page
/// carries no date at all.
pub fn parse_citation_page(html: &str, url: &str, current_year: i32) -> Result<CitationRecord> {
    let document = Html::parse_document(html);
    let meta = MetaReader::new(&document)?;

    let title = meta
        .first("name", "citation_title")
        .or_else(|| meta.first("property", "og:title"))
        .or_else(|| meta.title_element());

    let authors = meta.all("name", "citation_author");

    let year = meta
        .first("name", "citation_publication_date")
        .map(|date| date.chars().take(4).collect::<String>())
        .or_else(|| meta.first("name", "citation_year"))
        .unwrap_or_else(|| current_year.to_string());

    let venue = meta
        .first("name", "citation_journal_title")
        .or_else(|| meta.first("name", "citation_conference"));

    let institution = meta.first("name", "citation_author_institution");

    Ok(CitationRecord::builder(Identifier::url(url))
        .maybe_title(title)
        .authors(authors)
        .year(year)
        .maybe_venue(venue)
        .maybe_institution(institution)
        .label(DEFAULT_LABEL)
        .build())
}

struct MetaReader<'a> {
    document: &'a Html,
    meta: Selector,
    title: Selector,
}

impl<'a> MetaReader<'a> {
    fn new(document: &'a Html) -> Result<Self> {
        Ok(Self {
            document,
            meta: parse_selector("meta")?,
            title: parse_selector("title")?,
        })
    }

    /// Non-blank `content` values of `<meta {attr}="{key}">`, in document
    /// order. Attribute values match case-insensitively.
    fn all(&self, attr: &str, key: &str) -> Vec<String> {
        self.document
            .select(&self.meta)
            .filter(|el| {
                el.value()
                    .attr(attr)
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case(key))
            })
            .filter_map(|el| el.value().attr("content"))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn first(&self, attr: &str, key: &str) -> Option<String> {
        self.all(attr, key).into_iter().next()
    }

    fn title_element(&self) -> Option<String> {
        self.document
            .select(&self.title)
            .next()
            .map(|el| el.text().collect::<String>())
            .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|t| !t.is_empty())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScienceError::Parse(format!("invalid selector '{selector}': {e}")))
}
