use std::fmt;

use crate::coords::Vec2;

/// Error returned by [`FontStore::from_bytes`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Owns the UI font.
///
/// The store is owned by the application and passed to `TextRenderer::render`
/// each frame so new glyphs can be rasterized on demand. The game uses a
/// single face for all HUD and overlay text.
pub struct FontStore {
    font: fontdue::Font,
}

impl FontStore {
    /// Parses a TrueType or OpenType font from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self { font })
    }

    pub(crate) fn font(&self) -> &fontdue::Font {
        &self.font
    }

    /// Computes the bounding box of a laid-out text string.
    ///
    /// Returns `(width, height)` in logical pixels. Used for centering HUD
    /// text without direct access to `fontdue::Font`.
    #[must_use]
    pub fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        let w = glyphs
            .iter()
            .map(|g| {
                let m = self.font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs
            .iter()
            .map(|g| g.y + g.height as f32)
            .fold(size, f32::max);
        Vec2::new(w, h)
    }
}
