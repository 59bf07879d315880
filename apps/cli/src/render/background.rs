//! Background texture supplier — procedurally generated letter paper.
//!
//! Randomness stays behind this interface: the layout/composition core is
//! deterministic, and only the texture generator consumes a random source.
//! `PaperTexture` seeds from entropy in production and from a fixed seed in
//! tests, which makes texture output reproducible without touching the core.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::errors::AppError;

/// Supplies an opaque background raster of exactly the requested dimensions.
///
/// Implementations must honor (width, height) precisely; the composer owns the
/// minimum-height rule and never requests less than the standard card height.
pub trait BackgroundSupplier: Send + Sync {
    fn supply(&self, width: u32, height: u32) -> Result<RgbaImage, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Paper texture
// ────────────────────────────────────────────────────────────────────────────

const GRADIENT_CENTER: [u8; 3] = [255, 253, 250];
const GRADIENT_EDGE: [u8; 3] = [245, 235, 225];
/// Keeps the gradient's visual weight in the upper region of tall canvases.
const GRADIENT_CENTER_MAX_Y: f32 = 830.0;

const PETAL_STEP: i32 = 300;
const PETAL_JITTER: i32 = 30;
const PETAL_COLOR: Rgba<u8> = Rgba([180, 160, 150, 15]);

const GRAIN_BLEND: f32 = 0.03;

/// Warm letter-paper texture: radial gradient, faint five-petal lattice, grain.
pub struct PaperTexture {
    seed: Option<u64>,
}

impl PaperTexture {
    /// Entropy-seeded texture; every card gets fresh petal placement and grain.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Fixed-seed texture for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for PaperTexture {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundSupplier for PaperTexture {
    fn supply(&self, width: u32, height: u32) -> Result<RgbaImage, AppError> {
        let mut rng = self.rng();
        let mut img = gradient_base(width, height);
        stamp_petal_lattice(&mut img, &mut rng);
        apply_grain(&mut img, &mut rng);
        Ok(img)
    }
}

/// Radial gradient from warm white at the visual center to beige at the edges.
///
/// The maximum distance uses 0.8 of the canvas height so the bottom of tall
/// canvases never saturates fully to the edge color.
fn gradient_base(width: u32, height: u32) -> RgbaImage {
    let center_x = width as f32 / 2.0;
    let center_y = (height as f32 / 2.0).min(GRADIENT_CENTER_MAX_Y);
    let max_dist = (center_x * center_x + (height as f32 * 0.8).powi(2)).sqrt();

    let mut img = RgbaImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        let ratio = ((dx * dx + dy * dy).sqrt() / max_dist).min(1.0);

        let mut channels = [255u8; 4];
        for c in 0..3 {
            channels[c] =
                (GRADIENT_CENTER[c] as f32 * (1.0 - ratio) + GRADIENT_EDGE[c] as f32 * ratio) as u8;
        }
        *pixel = Rgba(channels);
    }
    img
}

/// Tiles faint five-petal motifs on a jittered grid.
///
/// Petals land on a separate transparent layer composited over the gradient
/// once, so overlapping petals keep a single pass of opacity. The grid extends
/// one step past the canvas so clipped motifs reach the borders; odd rows shift
/// by half a step.
fn stamp_petal_lattice(img: &mut RgbaImage, rng: &mut StdRng) {
    let (width, height) = img.dimensions();
    let mut layer = RgbaImage::new(width, height);

    let mut row = 0;
    let mut y = 0i32;
    while y < height as i32 + PETAL_STEP {
        let mut x = 0i32;
        while x < width as i32 + PETAL_STEP {
            let mut offset_x = x + rng.gen_range(-PETAL_JITTER..=PETAL_JITTER);
            let offset_y = y + rng.gen_range(-PETAL_JITTER..=PETAL_JITTER);
            if row % 2 == 1 {
                offset_x += PETAL_STEP / 2;
            }

            let size = rng.gen_range(80..=120) as f32;
            for i in 0..5 {
                let angle = (72.0 * i as f32).to_radians();
                let px = offset_x as f32 + angle.cos() * (size * 0.3);
                let py = offset_y as f32 + angle.sin() * (size * 0.3);
                draw_filled_circle_mut(
                    &mut layer,
                    (px as i32, py as i32),
                    (size * 0.4) as i32,
                    PETAL_COLOR,
                );
            }
            x += PETAL_STEP;
        }
        row += 1;
        y += PETAL_STEP;
    }

    image::imageops::overlay(img, &layer, 0, 0);
}

/// Blends each pixel 3% toward grayscale noise for a paper-grain feel.
fn apply_grain(img: &mut RgbaImage, rng: &mut StdRng) {
    for pixel in img.pixels_mut() {
        let noise = 128.0 + rng.gen_range(-45.0..=45.0_f32);
        for c in 0..3 {
            let blended = pixel[c] as f32 * (1.0 - GRAIN_BLEND) + noise * GRAIN_BLEND;
            pixel[c] = blended.round() as u8;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
