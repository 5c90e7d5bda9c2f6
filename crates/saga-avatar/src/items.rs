//! Inventory items
//!
//! Only cosmetics carry anything the renderer understands; boosts are
//! reward-side bookkeeping and never reach an appearance.

use saga_render::Slot;
use serde::{Deserialize, Serialize};

/// Gacha rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    C,
    B,
    A,
    S,
}

/// Where a cosmetic is worn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CosmeticSlot {
    Hair,
    Shirt,
    Pants,
    Shoes,
    Glasses,
    Mustache,
}

impl CosmeticSlot {
    /// Overlay layer this slot draws into
    pub fn layer_slot(self) -> Slot {
        match self {
            Self::Hair => Slot::Hair,
            Self::Shirt => Slot::Top,
            Self::Pants => Slot::Bottom,
            Self::Shoes => Slot::Shoes,
            Self::Glasses | Self::Mustache => Slot::Accessory,
        }
    }
}

/// How a cosmetic changes the sprite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Look {
    /// Hex color applied to the slot's region
    Tint(String),
    /// Overlay asset file name
    Overlay(String),
}

/// Percentage bonuses on study rewards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boost {
    pub exp_pct: u32,
    pub crystal_pct: u32,
}

/// Wearable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetic {
    pub name: String,
    pub slot: CosmeticSlot,
    pub rarity: Rarity,
    pub look: Look,
    #[serde(default)]
    pub boost: Boost,
}

impl Cosmetic {
    pub fn tint(name: &str, slot: CosmeticSlot, rarity: Rarity, hex: &str) -> Self {
        Self {
            name: name.to_string(),
            slot,
            rarity,
            look: Look::Tint(hex.to_string()),
            boost: Boost::default(),
        }
    }

    pub fn overlay(name: &str, slot: CosmeticSlot, rarity: Rarity, asset: &str) -> Self {
        Self {
            name: name.to_string(),
            slot,
            rarity,
            look: Look::Overlay(asset.to_string()),
            boost: Boost::default(),
        }
    }

    pub fn with_boost(mut self, exp_pct: u32, crystal_pct: u32) -> Self {
        self.boost = Boost { exp_pct, crystal_pct };
        self
    }

    /// Tint color, if this cosmetic recolors a region
    pub fn tint_color(&self) -> Option<&str> {
        match &self.look {
            Look::Tint(hex) => Some(hex),
            Look::Overlay(_) => None,
        }
    }

    /// Overlay asset, if this cosmetic is drawn as a layer
    pub fn overlay_asset(&self) -> Option<&str> {
        match &self.look {
            Look::Overlay(asset) => Some(asset),
            Look::Tint(_) => None,
        }
    }
}

/// Anything that can sit in the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Cosmetic(Cosmetic),
    Boost { name: String, rarity: Rarity, boost: Boost },
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Self::Cosmetic(c) => &c.name,
            Self::Boost { name, .. } => name,
        }
    }

    pub fn rarity(&self) -> Rarity {
        match self {
            Self::Cosmetic(c) => c.rarity,
            Self::Boost { rarity, .. } => *rarity,
        }
    }

    pub fn as_cosmetic(&self) -> Option<&Cosmetic> {
        match self {
            Self::Cosmetic(c) => Some(c),
            Self::Boost { .. } => None,
        }
    }

    /// Reward bonus granted while owned or worn
    pub fn boost(&self) -> Boost {
        match self {
            Self::Cosmetic(c) => c.boost,
            Self::Boost { boost, .. } => *boost,
        }
    }
}

/// Stock item catalog seeded into a fresh inventory
pub fn default_catalog() -> Vec<Item> {
    use CosmeticSlot::*;
    use Rarity::*;

    [
        Cosmetic::tint("Short Hair", Hair, C, "#8B4513"),
        Cosmetic::tint("Curly Hair", Hair, B, "#B6462B"),
        Cosmetic::tint("Long Hair", Hair, B, "#6A4CB3"),
        Cosmetic::tint("Ponytail", Hair, A, "#2C7FA3"),
        Cosmetic::tint("Blue Shirt", Shirt, C, "#4169E1"),
        Cosmetic::tint("Green Shirt", Shirt, B, "#228B22"),
        Cosmetic::tint("Gold Armor", Shirt, S, "#DAA520").with_boost(5, 5),
        Cosmetic::tint("Blue Pants", Pants, C, "#4682B4"),
        Cosmetic::tint("Black Pants", Pants, B, "#2F4F4F"),
        Cosmetic::tint("Skirt", Pants, B, "#6A4CB3"),
        Cosmetic::tint("Brown Boots", Shoes, C, "#8B4513"),
        Cosmetic::tint("Black Boots", Shoes, B, "#1C1C1C"),
        Cosmetic::tint("Round Glasses", Glasses, B, "#000000"),
        Cosmetic::tint("Square Glasses", Glasses, A, "#333333"),
        Cosmetic::tint("Classic Mustache", Mustache, B, "#2C1B18"),
    ]
    .into_iter()
    .map(Item::Cosmetic)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_colors_parse() {
        for item in default_catalog() {
            let cosmetic = item.as_cosmetic().unwrap();
            let hex = cosmetic.tint_color().unwrap();
            assert!(saga_color::hex_to_rgb(hex).is_ok(), "{} has bad color {hex}", item.name());
        }
    }

    #[test]
    fn test_catalog_boosts() {
        let catalog = default_catalog();
        let armor = catalog.iter().find(|i| i.name() == "Gold Armor").unwrap();
        assert_eq!(armor.rarity(), Rarity::S);
        assert_eq!(armor.boost(), Boost { exp_pct: 5, crystal_pct: 5 });
        assert!(
            catalog
                .iter()
                .filter(|i| i.name() != "Gold Armor")
                .all(|i| i.boost() == Boost::default())
        );
    }

    #[test]
    fn test_boost_is_not_cosmetic() {
        let item = Item::Boost {
            name: "Focus Tonic".to_string(),
            rarity: Rarity::A,
            boost: Boost { exp_pct: 10, crystal_pct: 0 },
        };
        assert!(item.as_cosmetic().is_none());
        assert_eq!(item.boost().exp_pct, 10);
    }

    #[test]
    fn test_layer_slots() {
        assert_eq!(CosmeticSlot::Shirt.layer_slot(), Slot::Top);
        assert_eq!(CosmeticSlot::Pants.layer_slot(), Slot::Bottom);
        assert_eq!(CosmeticSlot::Mustache.layer_slot(), Slot::Accessory);
    }

    #[test]
    fn test_look_accessors() {
        let hat = Cosmetic::overlay("Bob Cut", CosmeticSlot::Hair, Rarity::B, "hair_bob.png");
        assert_eq!(hat.overlay_asset(), Some("hair_bob.png"));
        assert_eq!(hat.tint_color(), None);
    }
}
