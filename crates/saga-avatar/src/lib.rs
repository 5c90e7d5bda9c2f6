//! Saga Avatar - renderer front-ends
//!
//! The inventory/equipment layer hands over a finished appearance
//! descriptor and gets back an RGBA bitmap. Two front-ends:
//! [`RegionRenderer`] recolors regions of a single base sprite per sex,
//! [`LayeredRenderer`] stacks overlay sprites over the base.

mod appearance;
mod config;
mod equipment;
mod items;
mod layered_renderer;
mod region_renderer;

pub use appearance::{Appearance, LayeredAppearance};
pub use config::{ConfigError, LayeredConfig, RegionConfig, RenderConfig, load_config_from_path};
pub use equipment::Equipment;
pub use items::{Boost, Cosmetic, CosmeticSlot, Item, Look, Rarity, default_catalog};
pub use layered_renderer::LayeredRenderer;
pub use region_renderer::{RegionRenderer, SexSprite};

pub use saga_color::{Color, ColorError};
pub use saga_render::{RenderError, RgbaImage, Sex, Slot, encode_png};

/// Avatar rendering errors
#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    #[error(transparent)]
    InvalidColor(#[from] ColorError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Item {0:?} is not a cosmetic and cannot be equipped")]
    NotCosmetic(String),
}
