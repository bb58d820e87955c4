use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_YEAR: &str = "Unknown Year";
pub const UNKNOWN_VENUE: &str = "Unknown Venue";
pub const UNKNOWN_INSTITUTION: &str = "Unknown Institution";
pub const DEFAULT_LABEL: &str = "Academic Citation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    Doi,
    Arxiv,
    Acm,
    Ieee,
    Pubmed,
    Url,
}

impl IdentifierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doi => "doi",
            Self::Arxiv => "arxiv",
            Self::Acm => "acm",
            Self::Ieee => "ieee",
            Self::Pubmed => "pubmed",
            Self::Url => "url",
        }
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doi" => Ok(Self::Doi),
            "arxiv" => Ok(Self::Arxiv),
            "acm" => Ok(Self::Acm),
            "ieee" => Ok(Self::Ieee),
            "pubmed" => Ok(Self::Pubmed),
            "url" => Ok(Self::Url),
            other => Err(CoreError::UnknownIdentifierKind(other.to_string())),
        }
    }
}

/// Kind and value always travel together; there is no way to build one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub kind: IdentifierKind,
    pub value: String,
}

impl Identifier {
    pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn doi(value: impl Into<String>) -> Self {
        Self::new(IdentifierKind::Doi, value)
    }

    pub fn arxiv(value: impl Into<String>) -> Self {
        Self::new(IdentifierKind::Arxiv, value)
    }

    pub fn url(value: impl Into<String>) -> Self {
        Self::new(IdentifierKind::Url, value)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Normalized bibliographic record produced by one resolution.
///
/// Unknown values are stored as `None` (or an empty author list). The
/// "Unknown ..." placeholder strings only appear through the `display_*`
/// accessors, which the card model and front ends use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    pub identifier: Identifier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CitationRecord {
    pub fn builder(identifier: Identifier) -> CitationRecordBuilder {
        CitationRecordBuilder::new(identifier)
    }

    /// The record shown before anything has been fetched.
    pub fn sample() -> Self {
        Self::builder(Identifier::arxiv("2205.11916"))
            .title("Large Language Models are Zero-Shot Reasoners")
            .authors([
                "Takeshi Kojima",
                "Shixiang Shane Gu",
                "Machel Reid",
                "Yutaka Matsuo",
                "Yusuke Iwasawa",
            ])
            .year("2022")
            .institution("University of Tokyo")
            .label(DEFAULT_LABEL)
            .build()
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }

    /// Authors in source order, or the single placeholder author.
    pub fn display_authors(&self) -> Vec<&str> {
        if self.authors.is_empty() {
            vec![UNKNOWN_AUTHOR]
        } else {
            self.authors.iter().map(String::as_str).collect()
        }
    }

    pub fn display_year(&self) -> &str {
        self.year.as_deref().unwrap_or(UNKNOWN_YEAR)
    }

    pub fn display_venue(&self) -> &str {
        self.venue.as_deref().unwrap_or(UNKNOWN_VENUE)
    }

    pub fn display_institution(&self) -> &str {
        self.institution.as_deref().unwrap_or(UNKNOWN_INSTITUTION)
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    /// JSON in the display form, with every placeholder filled in.
    pub fn to_display_json(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.display_title(),
            "authors": self.display_authors(),
            "year": self.display_year(),
            "identifier": {
                "type": self.identifier.kind.as_str(),
                "value": self.identifier.value,
            },
            "venue": self.display_venue(),
            "institution": self.display_institution(),
            "label": self.display_label(),
        })
    }
}

/// Builds a [`CitationRecord`], dropping blank values on the way in.
#[derive(Debug, Clone)]
pub struct CitationRecordBuilder {
    record: CitationRecord,
}

impl CitationRecordBuilder {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            record: CitationRecord {
                title: None,
                authors: Vec::new(),
                year: None,
                identifier,
                venue: None,
                institution: None,
                label: None,
            },
        }
    }

    pub fn title(mut self, title: impl AsRef<str>) -> Self {
        self.record.title = non_blank(title.as_ref());
        self
    }

    pub fn maybe_title(self, title: Option<impl AsRef<str>>) -> Self {
        match title {
            Some(t) => self.title(t),
            None => self,
        }
    }

    pub fn author(mut self, name: impl AsRef<str>) -> Self {
        if let Some(name) = non_blank(name.as_ref()) {
            self.record.authors.push(name);
        }
        self
    }

    pub fn authors<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(self, |b, name| b.author(name))
    }

    pub fn year(mut self, year: impl AsRef<str>) -> Self {
        self.record.year = non_blank(year.as_ref());
        self
    }

    pub fn maybe_year(self, year: Option<impl AsRef<str>>) -> Self {
        match year {
            Some(y) => self.year(y),
            None => self,
        }
    }

    pub fn venue(mut self, venue: impl AsRef<str>) -> Self {
        self.record.venue = non_blank(venue.as_ref());
        self
    }

    pub fn maybe_venue(self, venue: Option<impl AsRef<str>>) -> Self {
        match venue {
            Some(v) => self.venue(v),
            None => self,
        }
    }

    pub fn institution(mut self, institution: impl AsRef<str>) -> Self {
        self.record.institution = non_blank(institution.as_ref());
        self
    }

    pub fn maybe_institution(self, institution: Option<impl AsRef<str>>) -> Self {
        match institution {
            Some(i) => self.institution(i),
            None => self,
        }
    }

    pub fn label(mut self, label: impl AsRef<str>) -> Self {
        self.record.label = non_blank(label.as_ref());
        self
    }

    pub fn build(self) -> CitationRecord {
        self.record
    }
}

fn non_blank(value: &str) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
