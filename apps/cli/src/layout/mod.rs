// Text layout: measurement seam + greedy wrap engine.
// Pure and deterministic; all drawing lives in the render module.

pub mod engine;
pub mod metrics;

// Re-export the public API consumed by the composer.
pub use engine::{layout_text, BodyLayout, LINE_SPACING_RATIO, PARA_SPACING_RATIO};
pub use metrics::{ScaledFont, TextMeasure};
