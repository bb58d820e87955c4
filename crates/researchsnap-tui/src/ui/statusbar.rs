use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Mode};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(8),  // Mode
            Constraint::Length(20), // Activity
            Constraint::Min(10),    // Key hints
            Constraint::Length(14), // Layout
        ])
        .split(area);

    render_mode_zone(frame, app, chunks[0]);
    render_activity_zone(frame, app, chunks[1]);
    render_hints_zone(frame, app, chunks[2]);
    render_layout_zone(frame, app, chunks[3]);
}

fn render_mode_zone(frame: &mut Frame, app: &App, area: Rect) {
    let (bg, fg) = match app.mode {
        Mode::Normal => (app.theme.cursor_bg(), app.theme.paper()),
        Mode::Editing => (app.theme.success(), app.theme.bg()),
    };
    let content = Line::from(Span::styled(
        format!(" {} ", app.mode),
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(content).style(Style::default().bg(bg)), area);
}

fn render_activity_zone(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = if app.loading {
        (" fetching…", app.theme.warning())
    } else if app.generating {
        (" rendering…", app.theme.warning())
    } else {
        (" idle", app.theme.muted())
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .style(Style::default().bg(app.theme.bg_secondary())),
        area,
    );
}

fn render_hints_zone(frame: &mut Frame, app: &App, area: Rect) {
    let hint = |key: &'static str, label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(app.theme.fg())
        } else {
            Style::default().fg(app.theme.muted()).add_modifier(Modifier::DIM)
        };
        [
            Span::styled(key, style.add_modifier(Modifier::BOLD)),
            Span::styled(format!(":{label}  "), style),
        ]
    };

    let spans: Vec<Span> = match app.mode {
        Mode::Editing => [hint("Enter", "fetch", true), hint("Esc", "done", true)].concat(),
        Mode::Normal => [
            hint("i", "url", true),
            hint("f", "fetch", !app.loading),
            hint("l", "layout", true),
            hint("e", "export", app.can_export()),
            hint("s", "share", app.can_export()),
            hint("?", "help", true),
            hint("q", "quit", true),
        ]
        .concat(),
    };

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.bg_secondary())),
        area,
    );
}

fn render_layout_zone(frame: &mut Frame, app: &App, area: Rect) {
    let content = Line::from(Span::styled(
        format!(" {} ", app.layout.as_str()),
        Style::default().fg(app.theme.active_panel()),
    ));
    frame.render_widget(
        Paragraph::new(content).style(Style::default().bg(app.theme.bg_secondary())),
        area,
    );
}
