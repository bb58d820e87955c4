pub mod app;
pub mod event;
pub mod keys;
pub mod theme;
pub mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use app::App;
use event::{AppEvent, EventHandler};

/// Run the full TUI application.
pub fn run_tui(app: &mut App) -> Result<()> {
    // Install panic hook
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = std::io::stdout().execute(crossterm::terminal::LeaveAlternateScreen);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let event_handler = EventHandler::new(Duration::from_millis(app.config.ui.tick_rate_ms.max(16)));

    // Main loop
    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::render(frame, app)) {
            break Err(e.into());
        }

        match event_handler.next() {
            Ok(AppEvent::Key(key)) => keys::handle_key(app, key.code, key.modifiers),
            Ok(AppEvent::AsyncResult(result)) => app.handle_task_result(result),
            Ok(AppEvent::Resize(_, _) | AppEvent::Tick) => {}
            Err(e) => break Err(e),
        }

        app.drain_events();
        app.expire_toasts(Instant::now());

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
