use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::{App, Mode};

pub(crate) fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay swallows everything but its close keys.
    if app.show_help {
        if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, code),
        Mode::Editing => handle_editing_mode(app, code, modifiers),
    }
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('i') | KeyCode::Enter => app.mode = Mode::Editing,
        KeyCode::Char('f') => app.submit_url(),
        KeyCode::Char('l') | KeyCode::Tab => app.toggle_layout(),
        KeyCode::Char('e') => app.export_card(),
        KeyCode::Char('s') => app.share_card(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.error = None,
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            app.submit_url();
        }
        KeyCode::Backspace => {
            app.url_input.pop();
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => app.url_input.clear(),
        KeyCode::Char(c) => app.url_input.push(c),
        _ => {}
    }
}
