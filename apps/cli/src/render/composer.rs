//! Page Composer — turns one localized poem into a saved card image.
//!
//! Runs the layout engine once (dry run), sizes the canvas from the result,
//! requests a background of exactly that size, then draws title, author, and
//! body from the same cached layout so sizing and drawing can never diverge.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::layout::{
    layout_text, BodyLayout, ScaledFont, TextMeasure, LINE_SPACING_RATIO, PARA_SPACING_RATIO,
};
use crate::render::background::BackgroundSupplier;
use crate::render::fonts::resolve_font;

// ────────────────────────────────────────────────────────────────────────────
// Card style
// ────────────────────────────────────────────────────────────────────────────

/// Fixed card geometry and colors — the product format.
///
/// Width never changes; height grows past `standard_height` only when the body
/// needs the room.
#[derive(Debug, Clone)]
pub struct CardStyle {
    pub width: u32,
    pub margin_x: u32,
    pub y_title: f32,
    pub y_author: f32,
    pub y_body_start: f32,
    pub padding_bottom: f32,
    pub standard_height: u32,
    pub title_size: f32,
    pub author_size: f32,
    pub title_color: Rgba<u8>,
    pub author_color: Rgba<u8>,
    pub ink_color: Rgba<u8>,
    pub jpeg_quality: u8,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            width: 1242,
            margin_x: 140,
            y_title: 200.0,
            y_author: 320.0,
            y_body_start: 480.0,
            padding_bottom: 250.0,
            standard_height: 1660,
            title_size: 75.0,
            author_size: 38.0,
            title_color: Rgba([40, 40, 50, 240]),
            author_color: Rgba([100, 100, 100, 200]),
            ink_color: Rgba([60, 50, 50, 230]),
            jpeg_quality: 95,
        }
    }
}

impl CardStyle {
    /// Horizontal pixel budget for text, independent of canvas height.
    pub fn content_width(&self) -> f32 {
        (self.width - 2 * self.margin_x) as f32
    }

    /// Canvas height for a measured body: `y_body_start + body + padding_bottom`,
    /// rounded, but never below the standard card height.
    pub fn final_height(&self, body_height: f32) -> u32 {
        let required = self.y_body_start + body_height + self.padding_bottom;
        self.standard_height.max(required.round() as u32)
    }

    /// Where the body block starts drawing.
    ///
    /// Standard-height cards center the block in the window between
    /// `y_body_start` and the bottom padding (extra margin clamped at zero as a
    /// guard); grown cards anchor at `y_body_start` so every card's top region
    /// looks the same regardless of poem length.
    pub fn body_cursor(&self, final_height: u32, body_height: f32) -> f32 {
        if final_height == self.standard_height {
            let available =
                self.standard_height as f32 - self.y_body_start - self.padding_bottom;
            let extra_margin = ((available - body_height) / 2.0).max(0.0);
            self.y_body_start + extra_margin
        } else {
            self.y_body_start
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Render request
// ────────────────────────────────────────────────────────────────────────────

/// Immutable input to one render call.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub title: String,
    pub author: String,
    /// Paragraphs separated by line breaks.
    pub content: String,
    pub font_path: PathBuf,
    pub font_size: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

/// Stateless card renderer; safe to share across render calls and threads.
pub struct CardRenderer {
    style: CardStyle,
    background: Arc<dyn BackgroundSupplier>,
}

impl CardRenderer {
    pub fn new(background: Arc<dyn BackgroundSupplier>) -> Self {
        Self {
            style: CardStyle::default(),
            background,
        }
    }

    pub fn with_style(style: CardStyle, background: Arc<dyn BackgroundSupplier>) -> Self {
        Self { style, background }
    }

    /// Renders one card and writes exactly one JPEG to `output_path`.
    ///
    /// A missing card font degrades to a system fallback (resolved explicitly
    /// here, once per call); any other failure is a per-item error the caller
    /// logs and skips.
    pub fn render(&self, request: &RenderRequest, output_path: &Path) -> Result<(), AppError> {
        let style = &self.style;

        let face = resolve_font(&request.font_path)?;
        let title_font = ScaledFont::new(face.clone(), style.title_size);
        let author_font = ScaledFont::new(face.clone(), style.author_size);
        let body_font = ScaledFont::new(face, request.font_size);

        // Dry run: one layout pass drives both canvas sizing and drawing.
        let body = layout_text(
            &request.content,
            &body_font,
            style.content_width(),
            LINE_SPACING_RATIO,
            PARA_SPACING_RATIO,
        );
        let final_height = style.final_height(body.total_height);
        debug!(
            "Canvas {}x{} px (body {} px) for \"{}\"",
            style.width, final_height, body.total_height as u32, request.title
        );

        let mut canvas = self.background.supply(style.width, final_height)?;

        self.draw_centered(
            &mut canvas,
            &request.title,
            &title_font,
            style.y_title,
            style.title_color,
        );
        let author_line = format!("— {}", request.author);
        self.draw_centered(
            &mut canvas,
            &author_line,
            &author_font,
            style.y_author,
            style.author_color,
        );
        self.draw_body(&mut canvas, &body, &body_font, final_height);

        self.save_jpeg(&canvas, output_path)?;
        info!("Card saved: {}", output_path.display());
        Ok(())
    }

    /// Draws one line centered horizontally by its own measured width.
    fn draw_centered(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        font: &ScaledFont,
        y: f32,
        color: Rgba<u8>,
    ) {
        let x = (self.style.width as f32 - font.text_width(text)) / 2.0;
        draw_text_mut(canvas, color, x as i32, y as i32, font.scale(), font.font(), text);
    }

    /// Streams body lines from the cached layout, advancing a vertical cursor.
    fn draw_body(
        &self,
        canvas: &mut RgbaImage,
        body: &BodyLayout,
        font: &ScaledFont,
        final_height: u32,
    ) {
        let mut cursor_y = self.style.body_cursor(final_height, body.total_height);

        for para in &body.paragraphs {
            for line in &para.lines {
                self.draw_centered(canvas, line, font, cursor_y, self.style.ink_color);
                cursor_y += para.font_line_height + para.line_gap;
            }
            // The last line of a paragraph gets the paragraph gap, not a line gap.
            cursor_y -= para.line_gap;
            cursor_y += body.para_gap;
        }
    }

    fn save_jpeg(&self, canvas: &RgbaImage, path: &Path) -> Result<(), AppError> {
        let rgb = DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, self.style.jpeg_quality);
        rgb.write_with_encoder(encoder)?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
