use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use researchsnap_core::{CardFooter, CardLayout, CardView};

use crate::app::App;
use crate::ui::popups::centered_rect;

/// Card preview on the left, record details on the right.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let view = CardView::build(&app.record, app.layout);
    render_preview(frame, app, &view, chunks[0]);
    render_details(frame, app, chunks[1]);
}

fn render_preview(frame: &mut Frame, app: &App, view: &CardView, area: Rect) {
    let (width_pct, height) = match view.layout {
        CardLayout::Horizontal => (90, 12),
        CardLayout::Vertical => (55, 18),
    };
    let card_area = centered_rect(width_pct, 100, area);
    let card_area = Rect {
        y: card_area.y + card_area.height.saturating_sub(height) / 2,
        height: height.min(card_area.height),
        ..card_area
    };

    let paper = Style::default().bg(app.theme.paper()).fg(app.theme.ink());
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", view.layout.title()),
            Style::default().fg(app.theme.muted()),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.ink()))
        .style(paper);
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    frame.render_widget(Paragraph::new(card_lines(app, view, inner.width)).style(paper).wrap(Wrap { trim: true }), inner);
}

fn card_lines<'a>(app: &App, view: &'a CardView, width: u16) -> Vec<Line<'a>> {
    let ink = app.theme.ink();
    let muted = app.theme.muted();
    let rule = "─".repeat(usize::from(width));

    let year = match view.layout {
        CardLayout::Horizontal => Span::styled(
            format!(" {} ", view.year),
            Style::default().bg(ink).fg(app.theme.paper()),
        ),
        CardLayout::Vertical => Span::styled(view.year.as_str(), Style::default().fg(ink).add_modifier(Modifier::BOLD)),
    };
    let label = view.label.to_uppercase();
    let gap = usize::from(width)
        .saturating_sub(label.chars().count() + view.year.chars().count() + 2)
        .max(1);

    let mut lines = vec![Line::from(vec![
        Span::styled(label, Style::default().fg(muted)),
        Span::raw(" ".repeat(gap)),
        year,
    ])];
    if view.divider_below_header {
        lines.push(Line::from(Span::styled(rule.clone(), Style::default().fg(ink))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        view.title.as_str(),
        Style::default().fg(ink).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(view.authors.to_text(), Style::default().fg(muted))));
    lines.push(Line::from(""));
    if view.divider_above_footer {
        lines.push(Line::from(Span::styled(rule, Style::default().fg(muted))));
    }

    match &view.footer {
        CardFooter::Inline {
            identifier,
            institution,
        } => {
            let mut spans = vec![Span::styled(identifier.as_str(), Style::default().fg(ink))];
            if let Some(inst) = institution {
                spans.push(Span::raw("  "));
                spans.push(Span::styled("▬ ", Style::default().fg(ink)));
                spans.push(Span::styled(inst.as_str(), Style::default().fg(ink)));
            }
            lines.push(Line::from(spans));
        }
        CardFooter::Stacked {
            identifier_kind,
            marker,
            institution,
        } => {
            lines.push(Line::from(vec![
                Span::styled(identifier_kind.as_str(), Style::default().fg(ink)),
                Span::raw("  "),
                Span::styled(marker.glyph(), Style::default().fg(ink)),
            ]));
            if let Some(inst) = institution {
                lines.push(Line::from(Span::styled(inst.as_str(), Style::default().fg(ink))));
            }
        }
    }
    lines
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let record = &app.record;
    let key = Style::default().fg(app.theme.muted());
    let value = Style::default().fg(app.theme.fg());

    let field = |name: &'static str, text: String| {
        Line::from(vec![Span::styled(format!("{name:<12}"), key), Span::styled(text, value)])
    };

    let image_state = if app.generating {
        Span::styled("rendering…", Style::default().fg(app.theme.warning()))
    } else if app.images.is_some() {
        Span::styled("ready", Style::default().fg(app.theme.success()))
    } else {
        Span::styled("unavailable", Style::default().fg(app.theme.danger()))
    };

    let mut lines = vec![
        field("identifier", record.identifier.to_string()),
        field("year", record.display_year().to_string()),
        field("venue", record.display_venue().to_string()),
        field("institution", record.display_institution().to_string()),
        field("authors", record.authors.len().to_string()),
        Line::from(""),
        Line::from(vec![Span::styled(format!("{:<12}", "images"), key), image_state]),
    ];
    if let Some(path) = &app.last_export {
        lines.push(field("exported", path.display().to_string()));
    }

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border()))
        .style(Style::default().bg(app.theme.bg()));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        area,
    );
}
