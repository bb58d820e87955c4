use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::App;
use crate::app::toast::ToastKind;

const HELP: &[(&str, &str)] = &[
    ("i / Enter", "edit the URL"),
    ("Enter", "fetch (while editing)"),
    ("Esc", "stop editing"),
    ("f", "fetch citation"),
    ("l / Tab", "toggle horizontal / vertical"),
    ("e", "export card to the output directory"),
    ("s", "share card"),
    ("?", "toggle this help"),
    ("q / Ctrl-C", "quit"),
];

pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.active_panel()))
        .style(Style::default().bg(app.theme.bg()));

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("  {key:<12}"),
                    Style::default().fg(app.theme.active_panel()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(app.theme.fg())),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Stacks live toasts in the top-right corner, newest at the bottom.
pub fn render_toasts(frame: &mut Frame, app: &App, area: Rect) {
    let width = 40.min(area.width);
    for (i, toast) in app.toasts.iter().enumerate() {
        let y = area.y + 1 + (i as u16) * 3;
        if y + 3 > area.y + area.height {
            break;
        }
        let rect = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height: 3,
        };
        let color = match toast.kind {
            ToastKind::Success => app.theme.success(),
            ToastKind::Error => app.theme.danger(),
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Span::styled(toast.message.as_str(), Style::default().fg(color))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(app.theme.bg())),
            ),
            rect,
        );
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
