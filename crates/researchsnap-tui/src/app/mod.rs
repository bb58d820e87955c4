pub mod tasks;
pub mod toast;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use researchsnap_core::{AppConfig, CardLayout, CitationRecord};
use researchsnap_export::{
    BrowserIntent, CardImages, IntentOpener, NativeShare, NoNativeShare, RasterConfig, ShareOutcome,
};
use researchsnap_science::{CitationResolver, CitationSession};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

use crate::event::AppEvent;
use crate::theme::NordTheme;
use tasks::TaskResult;
use toast::{Toast, ToastKind};

pub const MSG_FETCHED: &str = "Citation data fetched";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch citation data";
pub const MSG_RENDER_FAILED: &str = "Failed to generate card images";
pub const MSG_EXPORTED: &str = "Card exported";
pub const MSG_SHARED: &str = "Ready to share";

/// Input modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Typing into the URL line.
    Editing,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Editing => write!(f, "URL"),
        }
    }
}

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub mode: Mode,
    pub theme: NordTheme,
    pub config: AppConfig,

    /// URL line contents.
    pub url_input: String,
    pub layout: CardLayout,

    /// Record the cards are drawn from. Mirrors the session slot.
    pub record: Arc<CitationRecord>,
    /// Rendered images for `record`, once ready.
    pub images: Option<CardImages>,

    /// A resolution is in flight.
    pub loading: bool,
    /// A card render is in flight.
    pub generating: bool,
    /// Inline error under the URL line, cleared on the next fetch.
    pub error: Option<String>,
    pub toasts: Vec<Toast>,
    pub show_help: bool,
    pub last_export: Option<PathBuf>,

    session: Arc<CitationSession>,
    runtime: Handle,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
    render_generation: u64,
    native_share: Box<dyn NativeShare>,
    opener: Box<dyn IntentOpener>,
}

impl App {
    pub fn new(config: AppConfig, runtime: Handle) -> Result<Self> {
        let resolver = CitationResolver::from_config(&config.network)?;
        let session = Arc::new(CitationSession::new(Arc::new(resolver)));
        Ok(Self::with_parts(
            config,
            runtime,
            session,
            Box::new(NoNativeShare),
            Box::new(BrowserIntent),
        ))
    }

    pub fn with_parts(
        config: AppConfig,
        runtime: Handle,
        session: Arc<CitationSession>,
        native_share: Box<dyn NativeShare>,
        opener: Box<dyn IntentOpener>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let layout = config.export.default_layout;
        let mut app = Self {
            should_quit: false,
            mode: Mode::Normal,
            theme: NordTheme::default(),
            config,
            url_input: String::new(),
            layout,
            record: Arc::new(CitationRecord::sample()),
            images: None,
            loading: false,
            generating: false,
            error: None,
            toasts: Vec::new(),
            show_help: false,
            last_export: None,
            session,
            runtime,
            tx,
            rx,
            render_generation: 0,
            native_share,
            opener,
        };
        app.request_render();
        app
    }

    // ── Actions ─────────────────────────────────────────────────────────────

    /// Submits the URL line for resolution. Ignored while one is running.
    pub fn submit_url(&mut self) {
        if self.loading {
            return;
        }
        self.error = None;
        self.loading = true;
        info!(url = %self.url_input.trim(), "fetch requested");
        tasks::spawn_resolve(
            &self.runtime,
            self.tx.clone(),
            Arc::clone(&self.session),
            self.url_input.trim().to_string(),
        );
    }

    pub fn toggle_layout(&mut self) {
        self.layout = self.layout.toggled();
    }

    /// Export and share need a finished render.
    pub fn can_export(&self) -> bool {
        !self.generating && self.images.is_some()
    }

    pub fn export_card(&mut self) {
        if !self.can_export() {
            return;
        }
        let Some(image) = self.images.as_ref().map(|i| i.get(self.layout).clone()) else {
            return;
        };
        match researchsnap_export::download(&image, &self.config.output_dir()) {
            Ok(path) => {
                self.last_export = Some(path);
                self.notify(ToastKind::Success, MSG_EXPORTED);
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.notify(ToastKind::Error, e.user_message());
            }
        }
    }

    pub fn share_card(&mut self) {
        if !self.can_export() {
            return;
        }
        let Some(image) = self.images.as_ref().map(|i| i.get(self.layout).clone()) else {
            return;
        };
        let title = self.record.display_title().to_string();
        match researchsnap_export::share(&image, &title, self.native_share.as_ref(), self.opener.as_ref()) {
            Ok(ShareOutcome::Native) => self.notify(ToastKind::Success, MSG_SHARED),
            Ok(ShareOutcome::Intent { .. }) => {}
            Err(e) => {
                tracing::warn!(error = %e, "share failed");
                self.notify(ToastKind::Error, e.user_message());
            }
        }
    }

    // ── Background results ──────────────────────────────────────────────────

    /// Applies every finished background task without blocking.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            if let AppEvent::AsyncResult(result) = event {
                self.handle_task_result(result);
            }
        }
    }

    pub fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Resolved(Ok(record)) => {
                self.loading = false;
                self.record = record;
                self.notify(ToastKind::Success, MSG_FETCHED);
                self.request_render();
            }
            TaskResult::Resolved(Err(message)) => {
                self.loading = false;
                self.error = Some(message);
                self.notify(ToastKind::Error, MSG_FETCH_FAILED);
            }
            TaskResult::Rendered { generation, result } => {
                if generation != self.render_generation {
                    return;
                }
                self.generating = false;
                match result {
                    Ok(images) => self.images = Some(images),
                    Err(_) => self.notify(ToastKind::Error, MSG_RENDER_FAILED),
                }
            }
        }
    }

    fn request_render(&mut self) {
        self.render_generation += 1;
        self.generating = true;
        self.images = None;
        tasks::spawn_render(
            &self.runtime,
            self.tx.clone(),
            Arc::clone(&self.record),
            RasterConfig::from_config(&self.config.export),
            self.render_generation,
        );
    }

    // ── Toasts ──────────────────────────────────────────────────────────────

    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        let ttl = Duration::from_secs(self.config.ui.notification_secs);
        self.toasts.push(Toast::new(kind, message, ttl));
    }

    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }
}
