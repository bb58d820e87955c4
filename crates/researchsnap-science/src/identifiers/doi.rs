use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `10.` + at least four digits + `/` + suffix characters. Searched anywhere
/// in the input, not anchored to a DOI resolver host.
static DOI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)10\.\d{4,}/[-._;()/:A-Z0-9]+").expect("valid regex"));

/// A DOI exactly as it appeared in the input (case preserved).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Doi(String);

impl Doi {
    /// First DOI-shaped substring of `text`.
    pub fn find_in(text: &str) -> Option<Self> {
        DOI_REGEX.find(text).map(|m| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Doi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doi_in_resolver_url() {
        let doi = Doi::find_in("https://doi.org/10.1038/nature14539").unwrap();
        assert_eq!(doi.as_str(), "10.1038/nature14539");
    }

    #[test]
    fn doi_in_publisher_path_keeps_case() {
        let doi = Doi::find_in("https://dl.acm.org/doi/10.1145/3313831.3376166").unwrap();
        assert_eq!(doi.as_str(), "10.1145/3313831.3376166");

        let doi = Doi::find_in("https://example.org/10.48550/arXiv.1706.03762").unwrap();
        assert_eq!(doi.as_str(), "10.48550/arXiv.1706.03762");
    }

    #[test]
    fn doi_stops_at_query_string() {
        let doi = Doi::find_in("https://x.org/10.1000/abc(1)?ref=feed").unwrap();
        assert_eq!(doi.as_str(), "10.1000/abc(1)");
    }

    #[test]
    fn first_match_wins() {
        let doi = Doi::find_in("10.1000/first and 10.2000/second").unwrap();
        assert_eq!(doi.as_str(), "10.1000/first");
    }

    #[test]
    fn registrant_needs_four_digits() {
        assert!(Doi::find_in("https://x.org/10.123/abc").is_none());
        assert!(Doi::find_in("https://example.org/paper").is_none());
    }

    #[test]
    fn incidental_doi_shaped_segment_is_detected() {
        // Unanchored search: any DOI-shaped run counts, wherever it sits.
        let doi = Doi::find_in("https://blog.example.org/v10.2024/notes").unwrap();
        assert_eq!(doi.as_str(), "10.2024/notes");
    }
}
