use std::sync::Arc;

use base64::prelude::*;
use once_cell::sync::Lazy;
use researchsnap_core::{CardLayout, CardView, CitationRecord, ExportConfig};
use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::svg::render_svg;

pub const PNG_MIME: &str = "image/png";
pub const PNG_EXTENSION: &str = "png";

/// System fonts, loaded once and shared by every render.
static FONTS: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    debug!(faces = db.len(), "loaded system fonts");
    Arc::new(db)
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterConfig {
    /// Pixel density over the logical card size.
    pub scale: f32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { scale: 2.0 }
    }
}

impl RasterConfig {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            scale: config.scale,
        }
    }
}

/// A rendered card, carried as a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub layout: CardLayout,
    pub data_uri: String,
}

impl CardImage {
    pub fn mime_type(&self) -> &str {
        self.data_uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or(PNG_MIME)
    }

    pub fn extension(&self) -> &'static str {
        PNG_EXTENSION
    }

    /// Raw image bytes decoded from the data URI.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let (_, payload) = self
            .data_uri
            .split_once(";base64,")
            .ok_or_else(|| ExportError::ExportFailed("image is not a base64 data URI".to_string()))?;
        BASE64_STANDARD
            .decode(payload)
            .map_err(|e| ExportError::ExportFailed(format!("corrupt image data: {e}")))
    }
}

/// Both layouts of the current record, rendered together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImages {
    pub horizontal: CardImage,
    pub vertical: CardImage,
}

impl CardImages {
    pub fn get(&self, layout: CardLayout) -> &CardImage {
        match layout {
            CardLayout::Horizontal => &self.horizontal,
            CardLayout::Vertical => &self.vertical,
        }
    }
}

/// Draws the card and rasterizes it to a PNG at `config.scale` pixels per
/// logical unit.
pub fn rasterize(view: &CardView, config: &RasterConfig) -> Result<CardImage> {
    if !(config.scale.is_finite() && config.scale > 0.0) {
        return Err(ExportError::ExportFailed(format!(
            "invalid scale {}",
            config.scale
        )));
    }
    let png = svg_to_png(&render_svg(view, config.scale))?;
    Ok(CardImage {
        layout: view.layout,
        data_uri: format!("data:{PNG_MIME};base64,{}", BASE64_STANDARD.encode(png)),
    })
}

fn svg_to_png(svg: &str) -> Result<Vec<u8>> {
    let options = usvg::Options {
        fontdb: Arc::clone(&FONTS),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| ExportError::ExportFailed(format!("invalid card drawing: {e}")))?;

    // The document's width/height already carry the scale.
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        ExportError::ExportFailed(format!(
            "cannot allocate a {}x{} image",
            size.width(),
            size.height()
        ))
    })?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| ExportError::ExportFailed(format!("PNG encoding failed: {e}")))
}

/// Renders the horizontal and vertical cards concurrently and waits for
/// both. Either failing fails the pair.
pub async fn render_pair(record: &CitationRecord, config: RasterConfig) -> Result<CardImages> {
    let horizontal_view = CardView::build(record, CardLayout::Horizontal);
    let vertical_view = CardView::build(record, CardLayout::Vertical);

    let (horizontal, vertical) = tokio::join!(
        tokio::task::spawn_blocking(move || rasterize(&horizontal_view, &config)),
        tokio::task::spawn_blocking(move || rasterize(&vertical_view, &config)),
    );

    let horizontal = horizontal.map_err(|e| ExportError::ExportFailed(format!("render task: {e}")))??;
    let vertical = vertical.map_err(|e| ExportError::ExportFailed(format!("render task: {e}")))??;
    debug!(
        horizontal_bytes = horizontal.data_uri.len(),
        vertical_bytes = vertical.data_uri.len(),
        "rendered card pair"
    );

    Ok(CardImages {
        horizontal,
        vertical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(image: &CardImage) -> tiny_skia::Pixmap {
        tiny_skia::Pixmap::decode_png(&image.bytes().unwrap()).unwrap()
    }

    #[test]
    fn rasterize_produces_png_data_uri() {
        let view = CardView::build(&CitationRecord::sample(), CardLayout::Vertical);
        let image = rasterize(&view, &RasterConfig::default()).unwrap();

        assert!(image.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.extension(), "png");
        assert_eq!(image.layout, CardLayout::Vertical);

        let bytes = image.bytes().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn pixel_size_follows_scale() {
        let view = CardView::build(&CitationRecord::sample(), CardLayout::Horizontal);

        let double = decode(&rasterize(&view, &RasterConfig::default()).unwrap());
        assert_eq!((double.width(), double.height()), (1280, 640));

        let single = decode(&rasterize(&view, &RasterConfig { scale: 1.0 }).unwrap());
        assert_eq!((single.width(), single.height()), (640, 320));
    }

    #[test]
    fn card_face_is_painted() {
        let view = CardView::build(&CitationRecord::sample(), CardLayout::Horizontal);
        let pixmap = decode(&rasterize(&view, &RasterConfig { scale: 1.0 }).unwrap());

        // Inside the card face, clear of any text.
        let face = pixmap.pixel(4, 300).unwrap();
        assert_eq!((face.red(), face.alpha()), (255, 255));

        // Top-right corner sits outside the face and its stacked layers.
        let corner = pixmap.pixel(639, 0).unwrap();
        assert_eq!(corner.alpha(), 0);
    }

    #[test]
    fn bad_scale_is_export_failed() {
        let view = CardView::build(&CitationRecord::sample(), CardLayout::Horizontal);
        let err = rasterize(&view, &RasterConfig { scale: 0.0 }).unwrap_err();
        assert!(matches!(err, ExportError::ExportFailed(_)));
    }

    #[test]
    fn bytes_rejects_non_data_uri() {
        let image = CardImage {
            layout: CardLayout::Horizontal,
            data_uri: "https://example.org/card.png".to_string(),
        };
        assert!(image.bytes().is_err());
    }

    #[tokio::test]
    async fn render_pair_renders_both_layouts() {
        let images = render_pair(&CitationRecord::sample(), RasterConfig::default())
            .await
            .unwrap();

        assert_eq!(images.horizontal.layout, CardLayout::Horizontal);
        assert_eq!(images.vertical.layout, CardLayout::Vertical);
        assert_ne!(images.horizontal, images.vertical);
        assert_eq!(images.get(CardLayout::Vertical), &images.vertical);

        let vertical = decode(&images.vertical);
        assert_eq!((vertical.width(), vertical.height()), (720, 1040));
    }

    #[tokio::test]
    async fn render_pair_is_deterministic() {
        let record = CitationRecord::sample();
        let first = render_pair(&record, RasterConfig::default()).await.unwrap();
        let second = render_pair(&record, RasterConfig::default()).await.unwrap();
        assert_eq!(first, second);
    }
}
