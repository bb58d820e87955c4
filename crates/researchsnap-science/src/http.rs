use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use researchsnap_core::NetworkConfig;
use serde::de::DeserializeOwned;

use crate::error::{Result, ScienceError};

pub const ACCEPT_JSON: &str = "application/json";
pub const ACCEPT_XML: &str = "application/xml";
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";

// ─── HttpClient ───────────────────────────────────────────────────────────────

/// Shared HTTP client: one timeout per call, identifying User-Agent, no
/// retries.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

/// Body of a page fetch, returned whatever the status.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub body: String,
}

impl HttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            &user_agent(config.contact_email.as_deref()),
        )
    }

    /// GET `url` and return the body; any non-success status is an error.
    pub async fn get_text(&self, url: &str, accept: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ScienceError::ApiError(
                url.to_string(),
                format!("HTTP {}: {}", status.as_u16(), truncate(&body, 200)),
            ));
        }
        Ok(resp.text().await?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let text = self.get_text(url, ACCEPT_JSON).await?;
        serde_json::from_str(&text).map_err(|e| ScienceError::Parse(e.to_string()))
    }

    /// GET a web page. Only transport errors fail; the status is handed
    /// back to the caller.
    pub async fn get_page(&self, url: &str) -> Result<FetchedPage> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok(FetchedPage { status, body })
    }
}

/// `researchsnap/<version>`, plus a mailto when a contact address is set.
pub fn user_agent(contact_email: Option<&str>) -> String {
    let base = format!("researchsnap/{}", env!("CARGO_PKG_VERSION"));
    match contact_email.map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => format!("{base} (mailto:{email})"),
        None => base,
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn client() -> HttpClient {
        HttpClient::new(Duration::from_secs(5), "researchsnap-test").unwrap()
    }

    #[test]
    fn user_agent_includes_contact_when_set() {
        assert!(user_agent(None).starts_with("researchsnap/"));
        assert!(user_agent(Some("me@example.org")).ends_with("(mailto:me@example.org)"));
        assert!(!user_agent(Some("  ")).contains("mailto"));
    }

    #[tokio::test]
    async fn get_text_sends_accept_header() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/feed")
            .match_header("accept", ACCEPT_XML)
            .with_status(200)
            .with_body("<feed/>")
            .create_async()
            .await;

        let body = client()
            .get_text(&format!("{}/feed", server.url()), ACCEPT_XML)
            .await
            .unwrap();
        assert_eq!(body, "<feed/>");
    }

    #[tokio::test]
    async fn get_text_rejects_non_success() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("not here")
            .create_async()
            .await;

        let err = client()
            .get_text(&format!("{}/missing", server.url()), ACCEPT_JSON)
            .await
            .unwrap_err();
        assert!(matches!(err, ScienceError::ApiError(_, ref msg) if msg.starts_with("HTTP 404")));
    }

    #[tokio::test]
    async fn get_page_returns_body_for_any_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/gone")
            .with_status(410)
            .with_body("<title>Gone</title>")
            .create_async()
            .await;

        let page = client()
            .get_page(&format!("{}/gone", server.url()))
            .await
            .unwrap();
        assert_eq!(page.status.as_u16(), 410);
        assert!(page.body.contains("Gone"));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_http_error() {
        let err = client().get_page("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, ScienceError::Http(_)));
    }
}
