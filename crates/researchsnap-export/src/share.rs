use tracing::{info, warn};

use crate::error::{ExportError, Result};
use crate::raster::CardImage;

pub const SHARE_TITLE: &str = "Citation Card";
pub const INTENT_BASE_URL: &str = "https://twitter.com/intent/tweet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeShareError {
    /// The host has no share sheet.
    Unavailable,
    /// The user dismissed the share sheet.
    Declined,
    Failed(String),
}

/// A host share sheet that can take an image attachment.
pub trait NativeShare: Send + Sync {
    fn share(&self, image: &CardImage, title: &str, text: &str) -> std::result::Result<(), NativeShareError>;
}

/// Terminals have no share sheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNativeShare;

impl NativeShare for NoNativeShare {
    fn share(&self, _: &CardImage, _: &str, _: &str) -> std::result::Result<(), NativeShareError> {
        Err(NativeShareError::Unavailable)
    }
}

/// Opens a compose URL outside the app.
pub trait IntentOpener: Send + Sync {
    fn open_url(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs in the system browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserIntent;

impl IntentOpener for BrowserIntent {
    fn open_url(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Native,
    Intent { url: String },
}

pub fn share_text(title: &str) -> String {
    format!("Check out this paper: {title}")
}

pub fn intent_url(title: &str) -> String {
    format!("{INTENT_BASE_URL}?text={}", urlencoding::encode(&share_text(title)))
}

/// Tries the native share sheet first; when it is missing or the user
/// declines, opens the social compose URL instead.
pub fn share(
    image: &CardImage,
    title: &str,
    native: &dyn NativeShare,
    opener: &dyn IntentOpener,
) -> Result<ShareOutcome> {
    image
        .bytes()
        .map_err(|e| ExportError::ShareFailed(e.to_string()))?;

    let text = share_text(title);
    match native.share(image, SHARE_TITLE, &text) {
        Ok(()) => {
            info!("shared through native share sheet");
            return Ok(ShareOutcome::Native);
        }
        Err(NativeShareError::Unavailable) => {}
        Err(NativeShareError::Declined) => info!("native share declined, using compose link"),
        Err(NativeShareError::Failed(reason)) => {
            warn!(%reason, "native share failed");
            return Err(ExportError::ShareFailed(reason));
        }
    }

    let url = intent_url(title);
    opener
        .open_url(&url)
        .map_err(|e| ExportError::ShareFailed(format!("cannot open browser: {e}")))?;
    info!(%url, "opened share intent");
    Ok(ShareOutcome::Intent { url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{RasterConfig, rasterize};
    use researchsnap_core::{CardLayout, CardView, CitationRecord};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
        fail: bool,
    }

    impl IntentOpener for RecordingOpener {
        fn open_url(&self, url: &str) -> std::io::Result<()> {
            if self.fail {
                return Err(std::io::Error::other("no browser"));
            }
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    struct ScriptedShare(std::result::Result<(), NativeShareError>);

    impl NativeShare for ScriptedShare {
        fn share(&self, _: &CardImage, title: &str, text: &str) -> std::result::Result<(), NativeShareError> {
            assert_eq!(title, SHARE_TITLE);
            assert!(text.starts_with("Check out this paper: "));
            self.0.clone()
        }
    }

    fn image() -> CardImage {
        let view = CardView::build(&CitationRecord::sample(), CardLayout::Horizontal);
        rasterize(&view, &RasterConfig::default()).unwrap()
    }

    #[test]
    fn intent_url_encodes_text() {
        assert_eq!(
            intent_url("Deep learning & you"),
            "https://twitter.com/intent/tweet?text=Check%20out%20this%20paper%3A%20Deep%20learning%20%26%20you"
        );
    }

    #[test]
    fn terminal_host_falls_back_to_intent() {
        let opener = RecordingOpener::default();
        let outcome = share(&image(), "Deep learning", &NoNativeShare, &opener).unwrap();

        let expected = intent_url("Deep learning");
        assert_eq!(outcome, ShareOutcome::Intent { url: expected.clone() });
        assert_eq!(*opener.opened.lock().unwrap(), vec![expected]);
    }

    #[test]
    fn native_success_skips_intent() {
        let opener = RecordingOpener::default();
        let outcome = share(&image(), "T", &ScriptedShare(Ok(())), &opener).unwrap();
        assert_eq!(outcome, ShareOutcome::Native);
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn declined_native_share_falls_back() {
        let opener = RecordingOpener::default();
        let outcome = share(&image(), "T", &ScriptedShare(Err(NativeShareError::Declined)), &opener).unwrap();
        assert!(matches!(outcome, ShareOutcome::Intent { .. }));
    }

    #[test]
    fn native_failure_is_share_failed() {
        let opener = RecordingOpener::default();
        let err = share(
            &image(),
            "T",
            &ScriptedShare(Err(NativeShareError::Failed("boom".into()))),
            &opener,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::ShareFailed(_)));
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn browser_failure_is_share_failed() {
        let opener = RecordingOpener {
            fail: true,
            ..Default::default()
        };
        let err = share(&image(), "T", &NoNativeShare, &opener).unwrap_err();
        assert!(matches!(err, ExportError::ShareFailed(_)));
        assert_eq!(err.user_message(), "Failed to share");
    }
}
