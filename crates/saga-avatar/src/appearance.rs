//! Appearance descriptors
//!
//! Built fresh by the caller for every render and never modified by a
//! renderer. Colors stay as hex strings until render time.

use crate::AvatarError;
use saga_color::{Color, hex_to_rgb};
use saga_render::{Accessories, LayerStack, Region, Sex, Slot};
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_SKIN: &str = "#F5DEB3";
pub(crate) const DEFAULT_HAIR: &str = "#8B4513";
pub(crate) const DEFAULT_SHIRT: &str = "#4169E1";
pub(crate) const DEFAULT_PANTS: &str = "#4682B4";
pub(crate) const DEFAULT_SHOES: &str = "#8B4513";
pub(crate) const DEFAULT_GLASSES: &str = "#000000";
pub(crate) const DEFAULT_FACIAL_HAIR: &str = "#2C1B18";

fn default_glasses() -> String {
    DEFAULT_GLASSES.to_string()
}

fn default_facial_hair() -> String {
    DEFAULT_FACIAL_HAIR.to_string()
}

/// Per-region colors and facial accessories for the region renderer.
///
/// An empty color string leaves that region as drawn in the base sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub sex: Sex,
    pub skin_color: String,
    pub hair_color: String,
    pub shirt_color: String,
    pub pants_color: String,
    pub shoes_color: String,
    #[serde(default)]
    pub belt_color: Option<String>,
    #[serde(default)]
    pub has_glasses: bool,
    #[serde(default = "default_glasses")]
    pub glasses_color: String,
    #[serde(default)]
    pub has_mustache: bool,
    #[serde(default = "default_facial_hair")]
    pub facial_hair_color: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            skin_color: DEFAULT_SKIN.to_string(),
            hair_color: DEFAULT_HAIR.to_string(),
            shirt_color: DEFAULT_SHIRT.to_string(),
            pants_color: DEFAULT_PANTS.to_string(),
            shoes_color: DEFAULT_SHOES.to_string(),
            belt_color: None,
            has_glasses: false,
            glasses_color: default_glasses(),
            has_mustache: false,
            facial_hair_color: default_facial_hair(),
        }
    }
}

impl Appearance {
    /// Default appearance for a body
    pub fn for_sex(sex: Sex) -> Self {
        Self { sex, ..Self::default() }
    }

    /// Requested hex color for a region, `None` when the region is left alone
    pub fn region_color(&self, region: Region) -> Option<&str> {
        let hex = match region {
            Region::Hair => self.hair_color.as_str(),
            Region::Skin => self.skin_color.as_str(),
            Region::Shirt => self.shirt_color.as_str(),
            Region::Pants => self.pants_color.as_str(),
            Region::Shoes => self.shoes_color.as_str(),
            Region::Belt => self.belt_color.as_deref()?,
        };
        (!hex.is_empty()).then_some(hex)
    }

    /// Parsed recolor targets in recolor order
    pub fn region_targets(&self) -> Result<Vec<(Region, Color)>, AvatarError> {
        Region::ALL
            .into_iter()
            .filter_map(|region| self.region_color(region).map(|hex| (region, hex)))
            .map(|(region, hex)| {
                hex_to_rgb(hex).map(|color| (region, color)).map_err(AvatarError::from)
            })
            .collect()
    }

    /// Parsed accessory colors; colors of accessories that are off are not parsed
    pub fn accessories(&self) -> Result<Accessories, AvatarError> {
        let glasses = if self.has_glasses { Some(hex_to_rgb(&self.glasses_color)?) } else { None };
        let mustache = if self.has_mustache {
            Some(hex_to_rgb(&self.facial_hair_color)?)
        } else {
            None
        };
        Ok(Accessories { glasses, mustache })
    }
}

/// Overlay assets per slot for the layered renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayeredAppearance {
    pub sex: Sex,
    #[serde(default)]
    pub layers: LayerStack,
}

impl LayeredAppearance {
    pub fn new(sex: Sex) -> Self {
        Self { sex, layers: LayerStack::new() }
    }

    pub fn set_layer(&mut self, slot: Slot, asset: impl Into<String>) {
        self.layers.set(slot, Some(asset));
    }

    pub fn clear_layer(&mut self, slot: Slot) {
        self.layers.clear(slot);
    }

    /// Builder form of [`LayeredAppearance::set_layer`]
    pub fn with_layer(mut self, slot: Slot, asset: impl Into<String>) -> Self {
        self.set_layer(slot, asset);
        self
    }
}
