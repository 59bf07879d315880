//! Font measurement — the narrow seam between the layout engine and real fonts.
//!
//! The engine only needs two numbers from a font: the advance width of a string
//! and the height of one line slot. Keeping that behind `TextMeasure` lets the
//! wrap logic run against a fixed-advance fake in tests while production code
//! uses ab_glyph's scaled metrics.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};

/// Measurement interface consumed by the layout engine.
pub trait TextMeasure {
    /// Rendered advance width of `text` in pixels at this font and size.
    fn text_width(&self, text: &str) -> f32;

    /// Height of one line slot in pixels (ascent + descent), before any
    /// extra line gap is applied.
    fn line_height(&self) -> f32;
}

/// A font handle scaled to a fixed pixel size. Cheap to clone; one per
/// (font, size) pair per render call.
#[derive(Clone)]
pub struct ScaledFont {
    font: FontArc,
    scale: PxScale,
}

impl ScaledFont {
    pub fn new(font: FontArc, px_size: f32) -> Self {
        Self {
            font,
            scale: PxScale::from(px_size),
        }
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    pub fn scale(&self) -> PxScale {
        self.scale
    }
}

impl TextMeasure for ScaledFont {
    fn text_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0_f32;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let glyph = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, glyph);
            }
            width += scaled.h_advance(glyph);
            previous = Some(glyph);
        }
        width
    }

    fn line_height(&self) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        // descent() is negative in ab_glyph; ascent - descent is the full slot.
        scaled.ascent() - scaled.descent()
    }
}
