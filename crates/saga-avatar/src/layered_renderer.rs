//! Layered overlay renderer

use crate::AvatarError;
use crate::appearance::LayeredAppearance;
use crate::config::RenderConfig;
use saga_render::{AssetSource, DirectoryAssets, RgbaImage, render_layered};

/// Composites overlay sprites over a per-sex base and upscales the result
#[derive(Debug)]
pub struct LayeredRenderer<A = DirectoryAssets> {
    assets: A,
    config: RenderConfig,
}

impl LayeredRenderer<DirectoryAssets> {
    /// Renderer reading sprites from the configured asset directory
    pub fn from_config(config: &RenderConfig) -> Result<Self, AvatarError> {
        Self::new(DirectoryAssets::new(&config.asset_dir), config)
    }
}

impl<A: AssetSource> LayeredRenderer<A> {
    pub fn new(assets: A, config: &RenderConfig) -> Result<Self, AvatarError> {
        config.validate()?;
        Ok(Self { assets, config: config.clone() })
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn scale(&self) -> u32 {
        self.config.layered.scale
    }

    /// Render `appearance`; the base sprite must exist, overlays may be missing
    pub fn render(&self, appearance: &LayeredAppearance) -> Result<RgbaImage, AvatarError> {
        let base_name = self.config.base_asset(appearance.sex);
        let base = self.assets.load(base_name)?;

        let image = render_layered(&base, &appearance.layers, &self.assets, self.scale())?;
        tracing::info!(
            sex = %appearance.sex,
            base = base_name,
            layers = appearance.layers.iter().count(),
            width = image.width(),
            height = image.height(),
            "Rendered layered avatar"
        );
        Ok(image)
    }
}
