// Card rendering: font resolution, background texture, page composer.

pub mod background;
pub mod composer;
pub mod fonts;

// Re-export the public API consumed by main and the workflow steps.
pub use background::{BackgroundSupplier, PaperTexture};
pub use composer::{CardRenderer, CardStyle, RenderRequest};
