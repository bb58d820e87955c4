use chrono::{DateTime, Datelike};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::arxiv::types::{ArxivAuthor, ArxivEntry};
use crate::error::{Result, ScienceError};
use crate::identifiers::arxiv::ArxivId;

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    published: Option<String>,
    // A single <author> and a run of them both land here as a Vec, so the
    // one-or-many distinction ends at this struct.
    #[serde(rename = "author", default)]
    authors: Vec<AtomAuthor>,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    #[serde(default)]
    name: String,
    #[serde(rename = "arxiv:affiliation", alias = "affiliation")]
    affiliation: Option<String>,
}

/// Parses an arXiv API response and returns its single entry.
pub fn parse_single_entry(xml: &str) -> Result<ArxivEntry> {
    let feed: AtomFeed =
        from_str(xml).map_err(|e| ScienceError::Parse(format!("invalid atom xml: {e}")))?;

    let entry = feed
        .entries
        .into_iter()
        .next()
        .ok_or_else(|| ScienceError::Parse("feed has no entry".to_string()))?;

    parse_entry(entry)
}

fn parse_entry(entry: AtomEntry) -> Result<ArxivEntry> {
    // Unknown or malformed IDs come back as an entry under /api/errors.
    if entry.id.contains("/api/errors") {
        return Err(ScienceError::Parse(format!(
            "arXiv API error: {}",
            clean_text(&entry.summary)
        )));
    }

    let arxiv_id = ArxivId::from_entry_id(&entry.id)
        .ok_or_else(|| ScienceError::Parse(format!("invalid arXiv id in entry: {}", entry.id)))?;

    let authors = entry
        .authors
        .into_iter()
        .map(|author| ArxivAuthor {
            name: clean_text(&author.name),
            affiliation: clean_optional(author.affiliation),
        })
        .filter(|author| !author.name.is_empty())
        .collect::<Vec<_>>();

    Ok(ArxivEntry {
        arxiv_id,
        title: clean_text(&entry.title),
        authors,
        published_year: entry.published.as_deref().and_then(published_year),
    })
}

fn published_year(value: &str) -> Option<i32> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.year())
        .ok()
        .or_else(|| {
            value
                .get(..4)
                .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
                .and_then(|y| y.parse().ok())
        })
}

fn clean_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value.map(|v| clean_text(&v)).filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const KOJIMA_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom"
      xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/"
      xmlns:arxiv="http://arxiv.org/schemas/atom">
  <id>http://arxiv.org/api/query?id_list=2205.11916</id>
  <updated>2024-01-01T00:00:00Z</updated>
  <opensearch:totalResults>1</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/abs/2205.11916v4</id>
    <updated>2023-01-29T05:12:08Z</updated>
    <published>2022-05-24T17:55:48Z</published>
    <title>Large Language Models are
      Zero-Shot Reasoners</title>
    <summary>Pretrained large language models are widely used.</summary>
    <author>
      <name>Takeshi Kojima</name>
      <arxiv:affiliation>The University of Tokyo</arxiv:affiliation>
    </author>
    <author>
      <name>Shixiang Shane Gu</name>
    </author>
    <author>
      <name>Machel Reid</name>
    </author>
    <arxiv:journal_ref>NeurIPS 2022</arxiv:journal_ref>
    <link href="http://arxiv.org/abs/2205.11916v4" rel="alternate" type="text/html"/>
    <arxiv:primary_category term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>
"#;

    pub(crate) const SINGLE_AUTHOR_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/2112.11446v2</id>
    <published>2021-12-08T16:23:13Z</published>
    <title>Scaling Language Models: Methods, Analysis &amp; Insights from Training Gopher</title>
    <summary>Abstract</summary>
    <author><name>Jack W. Rae</name></author>
  </entry>
</feed>
"#;

    const ERROR_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/api/errors#incorrect_id_format_for_9999.bad</id>
    <title>Error</title>
    <summary>incorrect id format for 9999.bad</summary>
    <updated>2024-01-01T00:00:00-05:00</updated>
    <author><name>arXiv api core</name></author>
  </entry>
</feed>
"#;

    #[test]
    fn parses_multi_author_entry() {
        let entry = parse_single_entry(KOJIMA_XML).unwrap();

        assert_eq!(entry.arxiv_id.as_str(), "2205.11916");
        assert_eq!(entry.title, "Large Language Models are Zero-Shot Reasoners");
        assert_eq!(entry.published_year, Some(2022));
        let names: Vec<_> = entry.authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Takeshi Kojima", "Shixiang Shane Gu", "Machel Reid"]);
        assert_eq!(entry.authors[0].affiliation.as_deref(), Some("The University of Tokyo"));
    }

    #[test]
    fn single_author_becomes_one_element_list() {
        let entry = parse_single_entry(SINGLE_AUTHOR_XML).unwrap();
        assert_eq!(entry.authors.len(), 1);
        assert_eq!(entry.authors[0].name, "Jack W. Rae");
        assert_eq!(entry.arxiv_id.as_str(), "2112.11446");
        assert!(entry.title.contains("& Insights"));
    }

    #[test]
    fn api_error_entry_is_rejected() {
        let err = parse_single_entry(ERROR_XML).unwrap_err();
        assert!(err.to_string().contains("incorrect id format"));
    }

    #[test]
    fn empty_feed_is_rejected() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>empty</title></feed>"#;
        assert!(parse_single_entry(xml).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_single_entry("this is not xml <<<").is_err());
    }

    #[test]
    fn published_year_tolerates_odd_timestamps() {
        assert_eq!(published_year("2017-06-12T17:57:34Z"), Some(2017));
        assert_eq!(published_year("2017-06-12"), Some(2017));
        assert_eq!(published_year("soon"), None);
    }
}
