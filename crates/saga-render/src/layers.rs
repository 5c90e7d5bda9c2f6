//! Layered sprite compositing
//!
//! Equipped items are transparent overlays the size of the base sprite,
//! stacked in a fixed back-to-front order and then upscaled. The whole
//! stack is rebuilt on every call.

use crate::assets::AssetSource;
use crate::compose::{overlay, upscale_nearest};
use crate::{RenderError, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Equipment slot with a fixed stacking position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Bottom,
    Shoes,
    Top,
    Hair,
    Accessory,
}

impl Slot {
    /// Back-to-front draw order
    pub const DRAW_ORDER: [Slot; 5] = [
        Slot::Bottom,
        Slot::Shoes,
        Slot::Top,
        Slot::Hair,
        Slot::Accessory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Shoes => "shoes",
            Self::Top => "top",
            Self::Hair => "hair",
            Self::Accessory => "accessory",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::DRAW_ORDER
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Overlay asset per slot; unset slots draw nothing.
///
/// Serialized as a slot-name map where unset slots are `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SlotMap", into = "SlotMap")]
pub struct LayerStack {
    layers: BTreeMap<Slot, String>,
}

type SlotMap = BTreeMap<Slot, Option<String>>;

impl From<SlotMap> for LayerStack {
    fn from(map: SlotMap) -> Self {
        let mut stack = Self::new();
        for (slot, asset) in map {
            stack.set(slot, asset);
        }
        stack
    }
}

impl From<LayerStack> for SlotMap {
    fn from(stack: LayerStack) -> Self {
        let mut layers = stack.layers;
        Slot::DRAW_ORDER
            .into_iter()
            .map(|slot| (slot, layers.remove(&slot)))
            .collect()
    }
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear a slot; an empty name clears it
    pub fn set(&mut self, slot: Slot, asset: Option<impl Into<String>>) {
        match asset.map(Into::into) {
            Some(name) if !name.is_empty() => {
                self.layers.insert(slot, name);
            }
            _ => {
                self.layers.remove(&slot);
            }
        }
    }

    /// Builder form of [`LayerStack::set`]
    pub fn with(mut self, slot: Slot, asset: impl Into<String>) -> Self {
        self.set(slot, Some(asset));
        self
    }

    pub fn clear(&mut self, slot: Slot) {
        self.layers.remove(&slot);
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.layers.get(&slot).map(String::as_str).filter(|name| !name.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.layers.values().all(String::is_empty)
    }

    /// Set slots in draw order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        Slot::DRAW_ORDER
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|name| (slot, name)))
    }
}

/// Composite `layers` over `base` in draw order and upscale by `scale`.
///
/// An overlay that cannot be found is skipped with a warning; any other
/// asset failure aborts the render.
pub fn render_layered(
    base: &RgbaImage,
    layers: &LayerStack,
    assets: &dyn AssetSource,
    scale: u32,
) -> Result<RgbaImage, RenderError> {
    let mut canvas = RgbaImage::new(base.width(), base.height());
    overlay(&mut canvas, base);

    for (slot, name) in layers.iter() {
        match assets.load(name) {
            Ok(layer) => {
                if layer.dimensions() != canvas.dimensions() {
                    tracing::debug!(
                        slot = slot.name(),
                        asset = name,
                        size = ?layer.dimensions(),
                        "Overlay size differs from base, clipping"
                    );
                }
                overlay(&mut canvas, &layer);
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!(slot = slot.name(), asset = name, "Skipping missing overlay");
            }
            Err(err) => return Err(err),
        }
    }

    upscale_nearest(&canvas, scale)
}
