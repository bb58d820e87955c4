use async_trait::async_trait;
use chrono::{DateTime, Datelike};
use researchsnap_core::{CitationRecord, Identifier, NetworkConfig};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ScienceError};
use crate::http::HttpClient;
use crate::sources::CitationSource;

pub const SOURCE_NAME: &str = "crossref";

/// Registry lookup: DOI → Crossref `works` record.
pub struct CrossRefSource {
    client: HttpClient,
    base_url: String,
}

impl CrossRefSource {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(client: HttpClient, config: &NetworkConfig) -> Self {
        Self::new(client, &config.crossref_base_url)
    }

    pub async fn fetch_by_doi(&self, doi: &str) -> Result<CitationRecord> {
        let url = format!("{}/works/{}", self.base_url, doi);
        debug!(%url, "crossref lookup");

        let val: Value = self
            .client
            .get_json(&url)
            .await
            .map_err(|e| ScienceError::adapter_failed(SOURCE_NAME, e))?;

        let work = val
            .get("message")
            .filter(|m| m.is_object())
            .ok_or_else(|| ScienceError::unavailable(SOURCE_NAME, "response has no message object"))?;

        work_to_record(work, doi)
    }
}

#[async_trait]
impl CitationSource for CrossRefSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn lookup(&self, key: &str) -> Result<CitationRecord> {
        self.fetch_by_doi(key).await
    }
}

/// Maps a Crossref `message` object. The identifier keeps the DOI as it was
/// found in the submitted URL. A record without a `title` list is not
/// usable; an empty list only leaves the title absent.
fn work_to_record(work: &Value, doi: &str) -> Result<CitationRecord> {
    let titles = work["title"]
        .as_array()
        .ok_or_else(|| ScienceError::unavailable(SOURCE_NAME, "record has no title"))?;
    let title = titles.first().and_then(Value::as_str);

    let authors = work["author"]
        .as_array()
        .map(|a| a.iter().filter_map(author_name).collect::<Vec<_>>())
        .unwrap_or_default();

    let publisher = work["publisher"].as_str();
    let institution = work["group-title"].as_str().or(publisher);

    Ok(CitationRecord::builder(Identifier::doi(doi))
        .maybe_title(title)
        .authors(authors)
        .maybe_year(created_year(work))
        .maybe_venue(publisher)
        .maybe_institution(institution)
        .label(researchsnap_core::DEFAULT_LABEL)
        .build())
}

/// "given family"; either half alone; organizational `name` otherwise.
fn author_name(v: &Value) -> Option<String> {
    let given = v["given"].as_str().map(str::trim).filter(|s| !s.is_empty());
    let family = v["family"].as_str().map(str::trim).filter(|s| !s.is_empty());
    match (given, family) {
        (Some(g), Some(f)) => Some(format!("{g} {f}")),
        (Some(g), None) => Some(g.to_string()),
        (None, Some(f)) => Some(f.to_string()),
        (None, None) => v["name"].as_str().map(str::to_string),
    }
}

fn created_year(work: &Value) -> Option<String> {
    let created = &work["created"];
    created["date-time"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.year())
        .or_else(|| created["date-parts"][0][0].as_i64().map(|y| y as i32))
        .map(|y| format!("{y:04}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use researchsnap_core::IdentifierKind;
    use std::time::Duration;

    fn source(base_url: &str) -> CrossRefSource {
        let client = HttpClient::new(Duration::from_secs(5), "researchsnap-test").unwrap();
        CrossRefSource::new(client, base_url)
    }

    #[tokio::test]
    async fn test_crossref_fetch_by_doi() {
        let mut server = Server::new_async().await;

        let _m = server
            .mock("GET", "/works/10.1038/nature14539")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "status": "ok",
                "message": {
                    "DOI": "10.1038/nature14539",
                    "title": ["Deep learning"],
                    "author": [
                        {"given": "Yann", "family": "LeCun"},
                        {"given": "Yoshua", "family": "Bengio"},
                        {"given": "Geoffrey", "family": "Hinton"}
                    ],
                    "created": {"date-parts": [[2015, 5, 27]], "date-time": "2015-05-27T14:04:39Z"},
                    "publisher": "Springer Science and Business Media LLC"
                }
            }"#,
            )
            .create_async()
            .await;

        let record = source(&server.url()).fetch_by_doi("10.1038/nature14539").await.unwrap();

        assert_eq!(record.title.as_deref(), Some("Deep learning"));
        assert_eq!(record.authors, vec!["Yann LeCun", "Yoshua Bengio", "Geoffrey Hinton"]);
        assert_eq!(record.year.as_deref(), Some("2015"));
        assert_eq!(record.identifier.kind, IdentifierKind::Doi);
        assert_eq!(record.identifier.value, "10.1038/nature14539");
        assert_eq!(record.venue.as_deref(), Some("Springer Science and Business Media LLC"));
        assert_eq!(
            record.institution.as_deref(),
            Some("Springer Science and Business Media LLC")
        );
    }

    #[tokio::test]
    async fn group_title_preferred_for_institution() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/works/10.1101/2020.01.01.123456")
            .with_status(200)
            .with_body(
                r#"{"message": {
                    "title": ["A preprint"],
                    "author": [{"family": "Curie"}, {"name": "The Consortium"}, {}],
                    "created": {"date-time": "2020-01-02T00:00:00Z"},
                    "publisher": "Cold Spring Harbor Laboratory",
                    "group-title": "Genomics"
                }}"#,
            )
            .create_async()
            .await;

        let record = source(&server.url())
            .fetch_by_doi("10.1101/2020.01.01.123456")
            .await
            .unwrap();

        assert_eq!(record.authors, vec!["Curie", "The Consortium"]);
        assert_eq!(record.institution.as_deref(), Some("Genomics"));
        assert_eq!(record.venue.as_deref(), Some("Cold Spring Harbor Laboratory"));
    }

    #[tokio::test]
    async fn record_without_title_is_adapter_unavailable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/works/10.5555/12345678")
            .with_status(200)
            .with_body(r#"{"message": {"DOI": "10.5555/12345678"}}"#)
            .create_async()
            .await;

        let err = source(&server.url()).fetch_by_doi("10.5555/12345678").await.unwrap_err();
        assert!(matches!(err, ScienceError::AdapterUnavailable { adapter: SOURCE_NAME, .. }));
    }

    #[tokio::test]
    async fn missing_fields_stay_absent() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/works/10.5555/12345678")
            .with_status(200)
            .with_body(r#"{"message": {"DOI": "10.5555/12345678", "title": []}}"#)
            .create_async()
            .await;

        let record = source(&server.url()).fetch_by_doi("10.5555/12345678").await.unwrap();
        assert_eq!(record.title, None);
        assert!(record.authors.is_empty());
        assert_eq!(record.year, None);
        assert_eq!(record.venue, None);
        assert_eq!(record.display_venue(), "Unknown Venue");
        assert_eq!(record.display_institution(), "Unknown Institution");
    }

    #[tokio::test]
    async fn not_found_is_adapter_unavailable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/works/10.9999/missing")
            .with_status(404)
            .with_body("Resource not found.")
            .create_async()
            .await;

        let err = source(&server.url()).fetch_by_doi("10.9999/missing").await.unwrap_err();
        assert!(matches!(err, ScienceError::AdapterUnavailable { adapter: SOURCE_NAME, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_adapter_unavailable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/works/10.9999/broken")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = source(&server.url()).lookup("10.9999/broken").await.unwrap_err();
        assert!(matches!(err, ScienceError::AdapterUnavailable { .. }));
    }

    #[test]
    fn created_year_falls_back_to_date_parts() {
        let work = serde_json::json!({"created": {"date-parts": [[1999, 1, 1]]}});
        assert_eq!(created_year(&work).as_deref(), Some("1999"));
    }
}
