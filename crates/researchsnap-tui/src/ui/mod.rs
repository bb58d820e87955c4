pub(crate) mod card;
pub(crate) mod popups;
pub(crate) mod statusbar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, Mode};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL input
            Constraint::Length(1), // inline error
            Constraint::Min(8),    // card preview
            Constraint::Length(1), // status bar
        ])
        .split(size);

    render_url_input(frame, app, main_layout[0]);
    render_error_line(frame, app, main_layout[1]);
    card::render(frame, app, main_layout[2]);
    statusbar::render(frame, app, main_layout[3]);

    popups::render_toasts(frame, app, size);
    if app.show_help {
        popups::render_help(frame, app, size);
    }
}

fn render_url_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == Mode::Editing;
    let border = if editing {
        app.theme.active_panel()
    } else {
        app.theme.border()
    };

    let block = Block::default()
        .title(Span::styled(
            " Paper URL ",
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(app.theme.bg()));

    let content = if app.url_input.is_empty() && !editing {
        Line::from(Span::styled(
            "press i to enter a DOI, arXiv or paper URL",
            Style::default().fg(app.theme.muted()),
        ))
    } else {
        let mut spans = vec![Span::styled(
            app.url_input.as_str(),
            Style::default().fg(app.theme.fg()),
        )];
        if editing {
            spans.push(Span::styled("█", Style::default().fg(app.theme.cursor_bg())));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_error_line(frame: &mut Frame, app: &App, area: Rect) {
    let Some(error) = &app.error else {
        return;
    };
    let line = Line::from(Span::styled(
        format!(" {error}"),
        Style::default().fg(app.theme.danger()),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
