use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export failed: {0}")]
    ExportFailed(String),

    #[error("share failed: {0}")]
    ShareFailed(String),
}

impl ExportError {
    /// Short text for a transient notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ExportFailed(_) => "Failed to export card",
            Self::ShareFailed(_) => "Failed to share",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
