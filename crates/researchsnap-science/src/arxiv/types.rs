use researchsnap_core::{CitationRecord, DEFAULT_LABEL, Identifier};
use serde::{Deserialize, Serialize};

use crate::identifiers::arxiv::ArxivId;

pub const ARXIV_VENUE: &str = "arXiv";

/// One Atom feed entry, already normalized: authors are always an ordered
/// list, whether the feed had one `<author>` or several.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArxivEntry {
    pub arxiv_id: ArxivId,
    pub title: String,
    pub authors: Vec<ArxivAuthor>,
    /// Four-digit year of the `published` timestamp.
    pub published_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArxivAuthor {
    pub name: String,
    pub affiliation: Option<String>,
}

impl ArxivEntry {
    pub fn into_record(self) -> CitationRecord {
        let institution = self
            .authors
            .first()
            .and_then(|author| author.affiliation.clone());

        CitationRecord::builder(Identifier::arxiv(self.arxiv_id.into_string()))
            .title(&self.title)
            .authors(self.authors.iter().map(|a| a.name.as_str()))
            .maybe_year(self.published_year.map(|y| format!("{y:04}")))
            .venue(ARXIV_VENUE)
            .maybe_institution(institution)
            .label(DEFAULT_LABEL)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use researchsnap_core::IdentifierKind;

    #[test]
    fn institution_comes_from_first_author_only() {
        let entry = ArxivEntry {
            arxiv_id: ArxivId::from_entry_id("http://arxiv.org/abs/2205.11916v4").unwrap(),
            title: "Large Language Models are Zero-Shot Reasoners".to_string(),
            authors: vec![
                ArxivAuthor {
                    name: "Takeshi Kojima".to_string(),
                    affiliation: None,
                },
                ArxivAuthor {
                    name: "Shixiang Shane Gu".to_string(),
                    affiliation: Some("Google".to_string()),
                },
            ],
            published_year: Some(2022),
        };

        let record = entry.into_record();
        assert_eq!(record.identifier.kind, IdentifierKind::Arxiv);
        assert_eq!(record.identifier.value, "2205.11916");
        assert_eq!(record.year.as_deref(), Some("2022"));
        assert_eq!(record.venue.as_deref(), Some("arXiv"));
        assert_eq!(record.institution, None);
        assert_eq!(record.display_institution(), "Unknown Institution");
    }
}
