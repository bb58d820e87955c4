use thiserror::Error;

pub const RESOLUTION_FAILED_MESSAGE: &str =
    "Failed to extract citation data. Please check the URL and try again.";

#[derive(Debug, Error)]
pub enum ScienceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error from {0}: {1}")]
    ApiError(String, String),

    #[error("parse error: {0}")]
    Parse(String),

    /// One tier of the resolution chain failed; the resolver moves on.
    #[error("{adapter} unavailable: {reason}")]
    AdapterUnavailable {
        adapter: &'static str,
        reason: String,
        timed_out: bool,
    },

    /// Every applicable tier failed.
    #[error("resolution failed: {0}")]
    ResolutionFailed(String),
}

impl ScienceError {
    pub fn unavailable(adapter: &'static str, reason: impl Into<String>) -> Self {
        Self::AdapterUnavailable {
            adapter,
            reason: reason.into(),
            timed_out: false,
        }
    }

    /// Wraps a failed lookup as a tier failure, keeping whether it was a
    /// timeout. Tier failures pass through unchanged.
    pub fn adapter_failed(adapter: &'static str, err: ScienceError) -> Self {
        match err {
            e @ Self::AdapterUnavailable { .. } => e,
            other => Self::AdapterUnavailable {
                adapter,
                timed_out: other.is_timeout(),
                reason: other.to_string(),
            },
        }
    }

    /// Timeouts are handled like any other network failure; this only
    /// feeds log messages.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout(),
            Self::AdapterUnavailable { timed_out, .. } => *timed_out,
            _ => false,
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::ResolutionFailed(_) => RESOLUTION_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScienceError>;
