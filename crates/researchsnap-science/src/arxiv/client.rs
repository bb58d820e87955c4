use async_trait::async_trait;
use researchsnap_core::{CitationRecord, NetworkConfig};
use tracing::debug;

use crate::arxiv::parser::parse_single_entry;
use crate::arxiv::types::ArxivEntry;
use crate::error::{Result, ScienceError};
use crate::http::{ACCEPT_XML, HttpClient};
use crate::sources::CitationSource;

pub const SOURCE_NAME: &str = "arxiv";

/// Preprint API lookup: bare arXiv ID → Atom feed entry.
pub struct ArxivClient {
    client: HttpClient,
    base_url: String,
}

impl ArxivClient {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    pub fn from_config(client: HttpClient, config: &NetworkConfig) -> Self {
        Self::new(client, &config.arxiv_base_url)
    }

    pub async fn fetch_entry(&self, id: &str) -> Result<ArxivEntry> {
        let url = if self.base_url.contains('?') {
            format!("{}&id_list={}", self.base_url, urlencoding::encode(id))
        } else {
            format!("{}?id_list={}", self.base_url, urlencoding::encode(id))
        };
        debug!(%url, "arxiv lookup");

        let xml = self
            .client
            .get_text(&url, ACCEPT_XML)
            .await
            .map_err(|e| ScienceError::adapter_failed(SOURCE_NAME, e))?;

        parse_single_entry(&xml).map_err(|e| ScienceError::adapter_failed(SOURCE_NAME, e))
    }
}

#[async_trait]
impl CitationSource for ArxivClient {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn lookup(&self, key: &str) -> Result<CitationRecord> {
        Ok(self.fetch_entry(key).await?.into_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arxiv::parser::tests::{KOJIMA_XML, SINGLE_AUTHOR_XML};
    use mockito::{Matcher, Server};
    use researchsnap_core::{Identifier, IdentifierKind};
    use std::time::Duration;

    fn client(base_url: &str) -> ArxivClient {
        let http = HttpClient::new(Duration::from_secs(5), "researchsnap-test").unwrap();
        ArxivClient::new(http, base_url)
    }

    #[tokio::test]
    async fn test_arxiv_client_lookup() {
        let mut server = Server::new_async().await;

        let _m = server
            .mock("GET", "/query")
            .match_query(Matcher::UrlEncoded("id_list".into(), "2205.11916".into()))
            .match_header("accept", "application/xml")
            .with_status(200)
            .with_header("content-type", "application/atom+xml")
            .with_body(KOJIMA_XML)
            .create_async()
            .await;

        let record = client(&format!("{}/query", server.url()))
            .lookup("2205.11916")
            .await
            .unwrap();

        assert_eq!(record.identifier, Identifier::arxiv("2205.11916"));
        assert_eq!(record.year.as_deref(), Some("2022"));
        assert_eq!(record.title.as_deref(), Some("Large Language Models are Zero-Shot Reasoners"));
        assert_eq!(record.authors.len(), 3);
        assert_eq!(record.institution.as_deref(), Some("The University of Tokyo"));
        assert_eq!(record.venue.as_deref(), Some("arXiv"));
    }

    #[tokio::test]
    async fn single_author_feed() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/query")
            .match_query(Matcher::UrlEncoded("id_list".into(), "2112.11446".into()))
            .with_status(200)
            .with_body(SINGLE_AUTHOR_XML)
            .create_async()
            .await;

        let record = client(&format!("{}/query", server.url()))
            .lookup("2112.11446")
            .await
            .unwrap();
        assert_eq!(record.identifier.kind, IdentifierKind::Arxiv);
        assert_eq!(record.identifier.value, "2112.11446");
        assert_eq!(record.authors, vec!["Jack W. Rae"]);
        assert_eq!(record.institution, None);
    }

    #[tokio::test]
    async fn server_error_is_adapter_unavailable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/query")
            .match_query(Matcher::UrlEncoded("id_list".into(), "2205.11916".into()))
            .with_status(503)
            .create_async()
            .await;

        let err = client(&format!("{}/query", server.url()))
            .lookup("2205.11916")
            .await
            .unwrap_err();
        assert!(matches!(err, ScienceError::AdapterUnavailable { adapter: SOURCE_NAME, .. }));
    }

    #[tokio::test]
    async fn unparseable_feed_is_adapter_unavailable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/query")
            .match_query(Matcher::UrlEncoded("id_list".into(), "2205.11916".into()))
            .with_status(200)
            .with_body(r#"<feed xmlns="http://www.w3.org/2005/Atom"></feed>"#)
            .create_async()
            .await;

        let err = client(&format!("{}/query", server.url()))
            .lookup("2205.11916")
            .await
            .unwrap_err();
        assert!(matches!(err, ScienceError::AdapterUnavailable { .. }));
    }
}
