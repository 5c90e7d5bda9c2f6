//! Region-recoloring renderer
//!
//! Owns one base sprite per sex. Region masks are a pure function of the
//! base, so each sprite builds them once on first use and keeps them.

use crate::AvatarError;
use crate::appearance::Appearance;
use crate::config::RenderConfig;
use saga_color::Color;
use saga_render::{
    AssetSource, DirectoryAssets, MaskSettings, RegionMasks, RgbaImage, SeedTable, Sex, color_pixel,
    overlay, overlay_accessories, recolor, upscale_nearest,
};
use std::sync::OnceLock;

/// Base sprite plus its lazily built masks
#[derive(Debug)]
pub struct SexSprite {
    base: RgbaImage,
    seeds: SeedTable,
    masks: OnceLock<RegionMasks>,
}

impl SexSprite {
    pub fn new(base: RgbaImage, seeds: SeedTable) -> Self {
        Self { base, seeds, masks: OnceLock::new() }
    }

    pub fn base(&self) -> &RgbaImage {
        &self.base
    }

    pub fn seeds(&self) -> &SeedTable {
        &self.seeds
    }

    /// Masks, built under the cell's lock on first call
    fn masks(&self, settings: &MaskSettings) -> &RegionMasks {
        self.masks.get_or_init(|| {
            tracing::info!(
                width = self.base.width(),
                height = self.base.height(),
                "Building region masks"
            );
            RegionMasks::build(&self.base, &self.seeds, settings)
        })
    }
}

/// Renders an [`Appearance`] by shade-preserving recolor of base regions
#[derive(Debug)]
pub struct RegionRenderer {
    male: SexSprite,
    female: SexSprite,
    settings: MaskSettings,
    background: Option<Color>,
}

impl RegionRenderer {
    /// Load both base sprites from `assets`; a missing base is fatal
    pub fn new(assets: &dyn AssetSource, config: &RenderConfig) -> Result<Self, AvatarError> {
        config.validate()?;
        let scale = config.region.scale;

        let load = |sex: Sex| -> Result<SexSprite, AvatarError> {
            let base = assets.load(config.base_asset(sex))?;
            let base = upscale_nearest(&base, scale)?;
            Ok(SexSprite::new(base, SeedTable::for_sex(sex).scaled(scale)))
        };

        Ok(Self {
            male: load(Sex::Male)?,
            female: load(Sex::Female)?,
            settings: config.region.mask_settings(),
            background: config.region.background_color()?,
        })
    }

    /// Load base sprites from the configured asset directory
    pub fn from_config(config: &RenderConfig) -> Result<Self, AvatarError> {
        Self::new(&DirectoryAssets::new(&config.asset_dir), config)
    }

    /// Renderer over caller-supplied sprites and calibration
    pub fn from_sprites(male: SexSprite, female: SexSprite, settings: MaskSettings) -> Self {
        Self { male, female, settings, background: None }
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn sprite(&self, sex: Sex) -> &SexSprite {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    /// Masks for a body, building them if this is the first request
    pub fn masks(&self, sex: Sex) -> &RegionMasks {
        self.sprite(sex).masks(&self.settings)
    }

    /// Recolor hair, skin, shirt, pants, shoes (and belt when given), lay
    /// the optional background underneath, then draw accessories.
    pub fn render(&self, appearance: &Appearance) -> Result<RgbaImage, AvatarError> {
        // parse everything up front so a bad color fails before any work
        let targets = appearance.region_targets()?;
        let accessories = appearance.accessories()?;

        let sprite = self.sprite(appearance.sex);
        let masks = sprite.masks(&self.settings);
        tracing::info!(sex = %appearance.sex, regions = targets.len(), "Rendering avatar");

        let mut image = sprite.base.clone();
        for (region, target) in targets {
            if let Some(entry) = masks.get(region) {
                image = recolor(&image, &entry.mask, entry.mean, target);
            }
        }

        if let Some(background) = self.background {
            let (width, height) = image.dimensions();
            let mut canvas = RgbaImage::from_pixel(width, height, color_pixel(background));
            overlay(&mut canvas, &image);
            image = canvas;
        }

        if let Some(skin) = masks.skin() {
            overlay_accessories(&mut image, skin, &accessories);
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_render::{PixelRect, Region, color_pixel};

    const HAIR: [u8; 4] = [90, 50, 20, 255];
    const SKIN: [u8; 4] = [240, 200, 170, 255];

    /// Tiny two-region sprite: hair block on top, skin block below
    fn sprite() -> RgbaImage {
        RgbaImage::from_fn(40, 40, |x, y| {
            let inside = (5..35).contains(&x);
            let [r, g, b, a] = if inside && (2..12).contains(&y) {
                HAIR
            } else if inside && (14..38).contains(&y) {
                SKIN
            } else {
                [0, 0, 0, 0]
            };
            color_pixel(Color::rgba(r, g, b, a))
        })
    }

    fn seeds() -> SeedTable {
        let none = PixelRect::new(0, 0, 0, 0);
        SeedTable::new([
            PixelRect::new(10, 4, 30, 10),
            PixelRect::new(10, 20, 30, 30),
            none,
            none,
            none,
            none,
        ])
    }

    fn renderer() -> RegionRenderer {
        RegionRenderer::from_sprites(
            SexSprite::new(sprite(), seeds()),
            SexSprite::new(sprite(), seeds()),
            MaskSettings::default(),
        )
    }

    #[test]
    fn test_masks_are_cached() {
        let r = renderer();
        let first: *const RegionMasks = r.masks(Sex::Male);
        let second: *const RegionMasks = r.masks(Sex::Male);
        assert_eq!(first, second);
    }

    #[test]
    fn test_recolors_hair_only_where_asked() {
        let r = renderer();
        let appearance = Appearance {
            hair_color: "#2C7FA3".to_string(),
            skin_color: String::new(),
            ..Appearance::default()
        };
        let out = r.render(&appearance).unwrap();
        assert_ne!(out.get_pixel(20, 6).0, HAIR);
        assert_eq!(out.get_pixel(20, 25).0, SKIN);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_invalid_color_aborts() {
        let r = renderer();
        let appearance = Appearance { pants_color: "#12345G".to_string(), ..Appearance::default() };
        assert!(matches!(r.render(&appearance), Err(AvatarError::InvalidColor(_))));
    }

    #[test]
    fn test_background_fills_transparency() {
        let r = renderer().with_background(Some(Color::rgb(1, 2, 3)));
        let out = r.render(&Appearance::default()).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_glasses_drawn_on_skin() {
        let r = renderer();
        let plain = r.render(&Appearance::default()).unwrap();
        let glasses = Appearance { has_glasses: true, ..Appearance::default() };
        let with_glasses = r.render(&glasses).unwrap();
        assert_ne!(plain, with_glasses);

        let skin = r.masks(Sex::Male).skin().unwrap();
        assert_eq!(skin.bounding_box().unwrap().y0, 14);
        let head = saga_render::head_box(skin);
        for (x, y, pixel) in with_glasses.enumerate_pixels() {
            if pixel != plain.get_pixel(x, y) {
                assert!((head.y0..head.y1).contains(&y));
            }
        }
    }

    #[test]
    fn test_empty_region_mask_is_noop() {
        let r = renderer();
        assert!(r.masks(Sex::Female).get(Region::Shirt).unwrap().mask.is_empty());
        let appearance = Appearance {
            hair_color: String::new(),
            skin_color: String::new(),
            ..Appearance::for_sex(Sex::Female)
        };
        assert_eq!(r.render(&appearance).unwrap(), sprite());
    }

    #[test]
    fn test_renderer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RegionRenderer>();
    }
}
