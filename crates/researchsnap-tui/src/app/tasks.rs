use std::sync::Arc;

use researchsnap_core::CitationRecord;
use researchsnap_export::{CardImages, RasterConfig, render_pair};
use researchsnap_science::CitationSession;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::event::AppEvent;

/// Represents the result of an asynchronous background task.
#[derive(Debug)]
pub enum TaskResult {
    /// A submitted URL finished resolving. Errors are already user-facing.
    Resolved(Result<Arc<CitationRecord>, String>),

    /// Both card layouts finished rendering for render request `generation`.
    Rendered {
        generation: u64,
        result: Result<CardImages, String>,
    },
}

pub fn spawn_resolve(
    runtime: &Handle,
    tx: UnboundedSender<AppEvent>,
    session: Arc<CitationSession>,
    url: String,
) {
    runtime.spawn(async move {
        let result = session.submit(&url).await.map_err(|e| {
            warn!(%url, error = %e, "resolution failed");
            e.user_message()
        });
        let _ = tx.send(AppEvent::AsyncResult(TaskResult::Resolved(result)));
    });
}

pub fn spawn_render(
    runtime: &Handle,
    tx: UnboundedSender<AppEvent>,
    record: Arc<CitationRecord>,
    config: RasterConfig,
    generation: u64,
) {
    runtime.spawn(async move {
        let result = render_pair(&record, config).await.map_err(|e| {
            warn!(error = %e, "card rendering failed");
            e.to_string()
        });
        let _ = tx.send(AppEvent::AsyncResult(TaskResult::Rendered { generation, result }));
    });
}
