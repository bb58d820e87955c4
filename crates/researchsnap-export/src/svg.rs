//! Vector rendering of a [`CardView`].
//!
//! Text metrics are estimated from the font size; the layout only has to be
//! close enough that wrapped titles and right-aligned footers do not
//! collide.

use std::fmt::Write as _;

use researchsnap_core::{CardFooter, CardLayout, CardView};

const SANS: &str = "Inter, Helvetica, Arial, sans-serif";
const MONO: &str = "'Roboto Mono', Menlo, monospace";

const INK: &str = "#000000";
const PAPER: &str = "#ffffff";
const MUTED: &str = "#6b7280";
const AUTHOR_INK: &str = "#4b5563";
const SHADOW: &str = "#f3f4f6";
const OUTLINE: &str = "#d1d5db";
const RULE_LIGHT: &str = "#e5e7eb";

/// Offset of the stacked "paper" layers behind the card face.
const STACK_OFFSET: f32 = 8.0;

/// Average glyph width as a fraction of font size.
const GLYPH_RATIO: f32 = 0.55;

/// Logical card dimensions and type sizes for one layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub title_size: f32,
    pub max_title_lines: usize,
}

impl CardGeometry {
    pub fn for_layout(layout: CardLayout) -> Self {
        match layout {
            CardLayout::Horizontal => Self {
                width: 640.0,
                height: 320.0,
                padding: 24.0,
                title_size: 22.0,
                max_title_lines: 4,
            },
            CardLayout::Vertical => Self {
                width: 360.0,
                height: 520.0,
                padding: 20.0,
                title_size: 18.0,
                max_title_lines: 8,
            },
        }
    }

    fn face_width(&self) -> f32 {
        self.width - STACK_OFFSET
    }

    fn face_height(&self) -> f32 {
        self.height - STACK_OFFSET
    }

    fn content_right(&self) -> f32 {
        self.face_width() - self.padding
    }

    fn chars_per_line(&self, font_size: f32) -> usize {
        let usable = self.face_width() - 2.0 * self.padding;
        ((usable / (font_size * GLYPH_RATIO)).floor() as usize).max(8)
    }
}

/// Renders `view` as a standalone SVG document. `scale` multiplies the
/// output size; the drawing itself stays in logical units.
pub fn render_svg(view: &CardView, scale: f32) -> String {
    let geo = CardGeometry::for_layout(view.layout);
    let mut svg = SvgWriter::new(&geo, scale);

    svg.rect(STACK_OFFSET, STACK_OFFSET, geo.face_width(), geo.face_height(), SHADOW, None);
    svg.rect(4.0, 4.0, geo.face_width(), geo.face_height(), "none", Some(OUTLINE));
    svg.rect(0.0, 0.0, geo.face_width(), geo.face_height(), PAPER, Some(INK));

    let pad = geo.padding;
    let header_baseline = pad + 14.0;
    svg.text(
        pad,
        header_baseline,
        &view.label.to_uppercase(),
        TextStyle::new(12.0, MUTED).spacing(2.0),
    );

    let mut y = match view.layout {
        CardLayout::Horizontal => {
            let box_width = view.year.chars().count() as f32 * 12.0 * GLYPH_RATIO + 16.0;
            let box_x = geo.content_right() - box_width;
            svg.rect(box_x, pad, box_width, 22.0, INK, None);
            svg.text(
                box_x + box_width / 2.0,
                pad + 15.0,
                &view.year,
                TextStyle::new(12.0, PAPER).anchor("middle"),
            );
            pad + 22.0 + 12.0
        }
        CardLayout::Vertical => {
            svg.text(
                geo.content_right(),
                header_baseline,
                &view.year,
                TextStyle::new(12.0, INK).bold().anchor("end"),
            );
            pad + 24.0 + 16.0
        }
    };

    if view.divider_below_header {
        svg.line(pad, pad + 24.0, geo.content_right(), pad + 24.0, INK);
    }

    let title_leading = geo.title_size * 1.25;
    for line in wrap_text(&view.title, geo.chars_per_line(geo.title_size), geo.max_title_lines) {
        y += title_leading;
        svg.text(pad, y, &line, TextStyle::new(geo.title_size, INK).bold());
    }

    y += 12.0;
    for line in wrap_text(&view.authors.to_text(), geo.chars_per_line(14.0), 2) {
        y += 18.0;
        svg.text(pad, y, &line, TextStyle::new(14.0, AUTHOR_INK));
    }

    let bottom = geo.face_height() - pad;
    match &view.footer {
        CardFooter::Inline {
            identifier,
            institution,
        } => {
            svg.text(pad, bottom, identifier, TextStyle::new(12.0, INK).mono());
            if let Some(inst) = institution {
                let right = geo.content_right();
                let text_width = inst.chars().count() as f32 * 12.0 * GLYPH_RATIO;
                svg.rect(right - text_width - 4.0 - 24.0, bottom - 6.0, 24.0, 4.0, INK, None);
                svg.text(right, bottom, inst, TextStyle::new(12.0, INK).anchor("end"));
            }
        }
        CardFooter::Stacked {
            identifier_kind,
            institution,
            ..
        } => {
            let kind_baseline = if institution.is_some() {
                bottom - 20.0
            } else {
                bottom
            };
            if view.divider_above_footer {
                let rule_y = kind_baseline - 24.0;
                svg.line(pad, rule_y, geo.content_right(), rule_y, RULE_LIGHT);
            }
            svg.text(pad, kind_baseline, identifier_kind, TextStyle::new(12.0, INK).mono());

            let marker_x = geo.content_right() - 20.0;
            let marker_y = kind_baseline - 15.0;
            svg.rect(marker_x, marker_y, 20.0, 20.0, "none", Some(INK));
            svg.rect(marker_x + 6.0, marker_y + 6.0, 8.0, 8.0, INK, None);

            if let Some(inst) = institution {
                svg.text(pad, bottom, inst, TextStyle::new(12.0, INK));
            }
        }
    }

    svg.finish()
}

/// Greedy word wrap. Words longer than a line are split; text past
/// `max_lines` is cut and the last kept line ends in "…".
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if max_lines > 0 && lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut kept: String = last.chars().take(width.saturating_sub(1)).collect();
            kept.push('…');
            *last = kept;
        }
    }
    lines
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

struct TextStyle {
    size: f32,
    fill: &'static str,
    bold: bool,
    mono: bool,
    anchor: &'static str,
    spacing: Option<f32>,
}

impl TextStyle {
    fn new(size: f32, fill: &'static str) -> Self {
        Self {
            size,
            fill,
            bold: false,
            mono: false,
            anchor: "start",
            spacing: None,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn mono(mut self) -> Self {
        self.mono = true;
        self
    }

    fn anchor(mut self, anchor: &'static str) -> Self {
        self.anchor = anchor;
        self
    }

    fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }
}

struct SvgWriter {
    out: String,
}

impl SvgWriter {
    fn new(geo: &CardGeometry, scale: f32) -> Self {
        let mut out = String::with_capacity(4096);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {vw} {vh}">"#,
            w = geo.width * scale,
            h = geo.height * scale,
            vw = geo.width,
            vh = geo.height,
        );
        Self { out }
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: &str, stroke: Option<&str>) {
        let _ = write!(
            self.out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}""#
        );
        if let Some(stroke) = stroke {
            let _ = write!(self.out, r#" stroke="{stroke}" stroke-width="1""#);
        }
        self.out.push_str("/>");
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str) {
        let _ = write!(
            self.out,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="1"/>"#
        );
    }

    fn text(&mut self, x: f32, y: f32, content: &str, style: TextStyle) {
        let family = if style.mono { MONO } else { SANS };
        let _ = write!(
            self.out,
            r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" fill="{fill}" text-anchor="{anchor}""#,
            size = style.size,
            fill = style.fill,
            anchor = style.anchor,
        );
        if style.bold {
            self.out.push_str(r#" font-weight="bold""#);
        }
        if let Some(spacing) = style.spacing {
            let _ = write!(self.out, r#" letter-spacing="{spacing}""#);
        }
        let _ = write!(self.out, ">{}</text>", escape_xml(content));
    }

    fn finish(mut self) -> String {
        self.out.push_str("</svg>");
        self.out
    }
}
