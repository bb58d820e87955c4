use serde::Serialize;

use crate::identifiers::{arxiv::ArxivId, doi::Doi};

/// Identifiers spotted in a submitted URL. Both may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedIdentifiers {
    pub doi: Option<Doi>,
    pub arxiv_id: Option<ArxivId>,
}

impl ExtractedIdentifiers {
    pub fn is_empty(&self) -> bool {
        self.doi.is_none() && self.arxiv_id.is_none()
    }
}

/// Pattern match only: no network access, no validation against a registry.
pub fn extract_identifiers(url: &str) -> ExtractedIdentifiers {
    ExtractedIdentifiers {
        doi: Doi::find_in(url),
        arxiv_id: ArxivId::find_in_abs_url(url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doi_url() {
        let ids = extract_identifiers("https://doi.org/10.1145/3313831.3376166");
        assert_eq!(ids.doi.unwrap().as_str(), "10.1145/3313831.3376166");
        assert!(ids.arxiv_id.is_none());
    }

    #[test]
    fn arxiv_url() {
        let ids = extract_identifiers("https://arxiv.org/abs/2112.11446");
        assert!(ids.doi.is_none());
        assert_eq!(ids.arxiv_id.unwrap().as_str(), "2112.11446");
    }

    #[test]
    fn url_matching_both_patterns() {
        let ids = extract_identifiers("https://arxiv.org/abs/2112.11446?doi=10.48550/arXiv.2112.11446");
        assert!(ids.doi.is_some());
        assert!(ids.arxiv_id.is_some());
    }

    #[test]
    fn doi_shaped_query_value_is_detected() {
        // Unanchored search: any DOI-shaped substring counts.
        let ids = extract_identifiers("https://blog.example.org/post?ref=10.12345/xyz");
        assert_eq!(ids.doi.unwrap().as_str(), "10.12345/xyz");
    }

    #[test]
    fn plain_page() {
        let ids = extract_identifiers("https://www.nature.com/articles/nature14539");
        assert!(ids.is_empty());
    }
}
