//! Card layout rules: turns a [`CitationRecord`] into the exact pieces of
//! text each card arrangement shows.

use serde::Serialize;

use crate::models::{CardLayout, CitationRecord, UNKNOWN_INSTITUTION};

/// Above this many authors only the first one is shown.
pub const LARGE_AUTHOR_LIST: usize = 10;
/// Regular author lists show at most this many names.
pub const MAX_LISTED_AUTHORS: usize = 3;
pub const ET_AL: &str = "et al.";

/// Glyph paired with the identifier kind on vertical cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// A small filled square inside an outlined square.
    BoxedSquare,
}

impl Marker {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::BoxedSquare => "▣",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLine {
    pub names: Vec<String>,
    pub et_al: bool,
}

impl AuthorLine {
    pub fn from_authors(authors: &[&str]) -> Self {
        let limit = if authors.len() > LARGE_AUTHOR_LIST {
            1
        } else {
            MAX_LISTED_AUTHORS
        };
        Self {
            names: authors.iter().take(limit).map(|a| (*a).to_string()).collect(),
            et_al: authors.len() > limit,
        }
    }

    /// "A, B, C et al." with no trailing comma on the last name.
    pub fn to_text(&self) -> String {
        let mut text = self.names.join(", ");
        if self.et_al {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(ET_AL);
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum CardFooter {
    /// Horizontal cards: `kind:value` on the left, institution on the right.
    Inline {
        identifier: String,
        institution: Option<String>,
    },
    /// Vertical cards: identifier kind with a marker, institution on its own
    /// line below the divider.
    Stacked {
        identifier_kind: String,
        marker: Marker,
        institution: Option<String>,
    },
}

impl CardFooter {
    pub fn institution(&self) -> Option<&str> {
        match self {
            Self::Inline { institution, .. } | Self::Stacked { institution, .. } => {
                institution.as_deref()
            }
        }
    }
}

/// Everything a renderer needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub layout: CardLayout,
    pub label: String,
    pub year: String,
    pub title: String,
    pub authors: AuthorLine,
    /// Vertical cards draw a rule between the header row and the title.
    pub divider_below_header: bool,
    /// Vertical cards draw a rule above the footer.
    pub divider_above_footer: bool,
    pub footer: CardFooter,
}

impl CardView {
    pub fn build(record: &CitationRecord, layout: CardLayout) -> Self {
        let institution = shown_institution(record);

        let footer = match layout {
            CardLayout::Horizontal => CardFooter::Inline {
                identifier: record.identifier.to_string(),
                institution,
            },
            CardLayout::Vertical => CardFooter::Stacked {
                identifier_kind: record.identifier.kind.to_string(),
                marker: Marker::BoxedSquare,
                institution,
            },
        };

        Self {
            layout,
            label: record.display_label().to_string(),
            year: record.display_year().to_string(),
            title: record.display_title().to_string(),
            authors: AuthorLine::from_authors(&record.display_authors()),
            divider_below_header: layout == CardLayout::Vertical,
            divider_above_footer: layout == CardLayout::Vertical,
            footer,
        }
    }

    /// Plain-text rendering, one card element per line.
    pub fn to_text_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{}  [{}]", self.label.to_uppercase(), self.year)];
        if self.divider_below_header {
            lines.push("─".repeat(32));
        }
        lines.push(self.title.clone());
        lines.push(self.authors.to_text());
        if self.divider_above_footer {
            lines.push("─".repeat(32));
        }
        match &self.footer {
            CardFooter::Inline {
                identifier,
                institution,
            } => match institution {
                Some(inst) => lines.push(format!("{identifier}  ▬ {inst}")),
                None => lines.push(identifier.clone()),
            },
            CardFooter::Stacked {
                identifier_kind,
                marker,
                institution,
            } => {
                lines.push(format!("{identifier_kind}  {}", marker.glyph()));
                if let Some(inst) = institution {
                    lines.push(inst.clone());
                }
            }
        }
        lines
    }
}

fn shown_institution(record: &CitationRecord) -> Option<String> {
    record
        .institution
        .as_deref()
        .filter(|inst| *inst != UNKNOWN_INSTITUTION)
        .map(str::to_string)
}
