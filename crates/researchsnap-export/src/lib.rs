//! Research Snap Export — turns card views into images and hands them to
//! the host: a file on disk, or a share target.

pub mod download;
pub mod error;
pub mod raster;
pub mod share;
pub mod svg;

pub use download::{download, file_name};
pub use error::{ExportError, Result};
pub use raster::{CardImage, CardImages, PNG_EXTENSION, PNG_MIME, RasterConfig, rasterize, render_pair};
pub use share::{
    BrowserIntent, IntentOpener, NativeShare, NativeShareError, NoNativeShare, SHARE_TITLE,
    ShareOutcome, intent_url, share, share_text,
};
