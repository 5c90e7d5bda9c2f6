//! Saga Render - avatar sprite engine
//!
//! Two ways of producing an avatar bitmap:
//! - region recoloring of a single pre-drawn base sprite (masks found by
//!   color similarity, shade-preserving recolor, procedural accessories)
//! - layered compositing of transparent overlay sprites over a base,
//!   followed by nearest-neighbor upscaling

mod accessories;
mod assets;
mod compose;
mod layers;
mod mask;
mod recolor;
mod regions;

pub use accessories::{Accessories, head_box, overlay_accessories};
pub use assets::{AssetSource, DirectoryAssets, MemoryAssets, encode_png};
pub use compose::{blend_over, composite, overlay, upscale_nearest};
pub use layers::{LayerStack, Slot, render_layered};
pub use mask::{PixelRect, RegionMask, crop_mean, similarity_mask, smooth_mask};
pub use recolor::recolor;
pub use regions::{MaskSettings, Region, RegionEntry, RegionMasks, SeedTable, Sex};

pub use image::RgbaImage;
pub use saga_color::Color;

/// Pixel to color
#[inline]
pub fn pixel_color(pixel: &image::Rgba<u8>) -> Color {
    let [r, g, b, a] = pixel.0;
    Color::rgba(r, g, b, a)
}

/// Color to pixel
#[inline]
pub fn color_pixel(color: Color) -> image::Rgba<u8> {
    image::Rgba([color.r, color.g, color.b, color.a])
}

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Failed to read asset {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode asset {name}: {message}")]
    Decode { name: String, message: String },

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Invalid scale factor {0} for {1}x{2} image")]
    InvalidScale(u32, u32, u32),
}

impl RenderError {
    /// Missing assets are recoverable for overlay layers
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AssetNotFound(_))
    }
}
