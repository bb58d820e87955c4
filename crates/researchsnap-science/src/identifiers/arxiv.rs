use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `arxiv.org/abs/<digits>.<digits>`; only the numeric ID is captured.
static ABS_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)arxiv\.org/abs/(\d+\.\d+)").expect("valid regex"));

static VERSION_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"v\d+$").expect("valid regex"));

/// Bare arXiv identifier, e.g. `2205.11916` (no version suffix).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArxivId(String);

impl ArxivId {
    /// ID from the first `arxiv.org/abs/...` occurrence in `text`.
    pub fn find_in_abs_url(text: &str) -> Option<Self> {
        ABS_URL_REGEX
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    /// ID from an Atom entry id such as `http://arxiv.org/abs/2205.11916v4`:
    /// the trailing path segment with any version suffix removed.
    pub fn from_entry_id(uri: &str) -> Option<Self> {
        let segment = uri.trim().trim_end_matches('/').rsplit('/').next()?;
        let bare = VERSION_SUFFIX.replace(segment, "");
        if bare.is_empty() {
            None
        } else {
            Some(Self(bare.into_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn abs_url(&self) -> String {
        format!("https://arxiv.org/abs/{}", self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ArxivId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_url() {
        let id = ArxivId::find_in_abs_url("https://arxiv.org/abs/2112.11446").unwrap();
        assert_eq!(id.as_str(), "2112.11446");
        assert_eq!(id.abs_url(), "https://arxiv.org/abs/2112.11446");
    }

    #[test]
    fn abs_url_with_version_captures_digits_only() {
        let id = ArxivId::find_in_abs_url("http://ArXiv.org/abs/1706.03762v5").unwrap();
        assert_eq!(id.as_str(), "1706.03762");
    }

    #[test]
    fn pdf_and_listing_urls_do_not_match() {
        assert!(ArxivId::find_in_abs_url("https://arxiv.org/pdf/2112.11446").is_none());
        assert!(ArxivId::find_in_abs_url("https://arxiv.org/list/cs.CL/recent").is_none());
        assert!(ArxivId::find_in_abs_url("https://arxiv.org/abs/hep-th/9901001").is_none());
    }

    #[test]
    fn entry_id_drops_version() {
        let id = ArxivId::from_entry_id("http://arxiv.org/abs/2205.11916v4").unwrap();
        assert_eq!(id.as_str(), "2205.11916");
    }

    #[test]
    fn entry_id_without_version() {
        let id = ArxivId::from_entry_id(" http://arxiv.org/abs/2112.11446 ").unwrap();
        assert_eq!(id.as_str(), "2112.11446");
    }

    #[test]
    fn empty_entry_id() {
        assert!(ArxivId::from_entry_id("").is_none());
    }
}
