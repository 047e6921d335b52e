//! SVG to PNG rasterisation

use std::sync::Arc;

use usvg::fontdb;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

/// Face shipped with the crate so output does not depend on the host
pub const BUNDLED_FAMILY: &str = "DejaVu Sans";
const BUNDLED_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

/// Turns SVG documents into PNG bytes.
///
/// Fonts are loaded once, when the rasteriser is created.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    fontdb: Arc<fontdb::Database>,
    font_family: String,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Bundled face plus every system font
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        load_bundled(&mut db);
        tracing::debug!(faces = db.len(), "fonts loaded");
        Self::with_fontdb(db)
    }

    /// Bundled face only; no filesystem access
    pub fn bundled() -> Self {
        let mut db = fontdb::Database::new();
        load_bundled(&mut db);
        Self::with_fontdb(db)
    }

    /// Use an already populated font database
    pub fn with_fontdb(db: fontdb::Database) -> Self {
        if db.is_empty() {
            tracing::warn!("font database is empty; text will not be drawn");
        }
        Self {
            fontdb: Arc::new(db),
            font_family: BUNDLED_FAMILY.to_string(),
        }
    }

    /// Rasterise `svg` at its declared size
    pub fn png(&self, svg: &str) -> Result<Vec<u8>, RasterError> {
        let opt = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_family: self.font_family.clone(),
            ..usvg::Options::default()
        };

        let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| {
            tracing::error!(%err, "generated SVG did not parse");
            RasterError::SvgParse
        })?;

        let size = tree.size();
        let width = size.width().ceil().max(1.0) as u32;
        let height = size.height().ceil().max(1.0) as u32;

        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc)?;
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        pixmap.encode_png().map_err(|_| RasterError::PngEncode)
    }
}

/// Register the bundled face and make it the target of the generic families
fn load_bundled(db: &mut fontdb::Database) {
    db.load_font_data(BUNDLED_FONT.to_vec());
    db.set_sans_serif_family(BUNDLED_FAMILY);
    // usvg falls back to the serif family when nothing else matches
    db.set_serif_family(BUNDLED_FAMILY);
}
