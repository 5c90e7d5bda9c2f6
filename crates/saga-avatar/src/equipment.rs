//! Equipped cosmetics
//!
//! Turns what a player is wearing into the descriptor a renderer takes.
//! Unequipped slots fall back to the stock colors.

use crate::AvatarError;
use crate::appearance::{
    Appearance, DEFAULT_FACIAL_HAIR, DEFAULT_GLASSES, DEFAULT_HAIR, DEFAULT_PANTS, DEFAULT_SHIRT,
    DEFAULT_SHOES, DEFAULT_SKIN, LayeredAppearance,
};
use crate::items::{Cosmetic, CosmeticSlot, Item};
use saga_render::Sex;
use std::collections::BTreeMap;

/// A player's body settings and worn cosmetics, one per slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    pub sex: Sex,
    /// Natural hair color, used when no hair item is worn
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    worn: BTreeMap<CosmeticSlot, Cosmetic>,
}

impl Equipment {
    pub fn new(sex: Sex) -> Self {
        Self { sex, ..Self::default() }
    }

    /// Wear a cosmetic, returning whatever it replaced
    pub fn equip(&mut self, item: &Item) -> Result<Option<Cosmetic>, AvatarError> {
        let cosmetic = item
            .as_cosmetic()
            .ok_or_else(|| AvatarError::NotCosmetic(item.name().to_string()))?;
        Ok(self.worn.insert(cosmetic.slot, cosmetic.clone()))
    }

    pub fn unequip(&mut self, slot: CosmeticSlot) -> Option<Cosmetic> {
        self.worn.remove(&slot)
    }

    pub fn worn(&self, slot: CosmeticSlot) -> Option<&Cosmetic> {
        self.worn.get(&slot)
    }

    fn tint_or<'a>(&'a self, slot: CosmeticSlot, default: &'a str) -> &'a str {
        self.worn(slot).and_then(Cosmetic::tint_color).unwrap_or(default)
    }

    /// Descriptor for the region renderer
    pub fn appearance(&self) -> Appearance {
        let hair_default = self.hair_color.as_deref().unwrap_or(DEFAULT_HAIR);
        Appearance {
            sex: self.sex,
            skin_color: self.skin_color.as_deref().unwrap_or(DEFAULT_SKIN).to_string(),
            hair_color: self.tint_or(CosmeticSlot::Hair, hair_default).to_string(),
            shirt_color: self.tint_or(CosmeticSlot::Shirt, DEFAULT_SHIRT).to_string(),
            pants_color: self.tint_or(CosmeticSlot::Pants, DEFAULT_PANTS).to_string(),
            shoes_color: self.tint_or(CosmeticSlot::Shoes, DEFAULT_SHOES).to_string(),
            belt_color: None,
            has_glasses: self.worn(CosmeticSlot::Glasses).is_some(),
            glasses_color: self.tint_or(CosmeticSlot::Glasses, DEFAULT_GLASSES).to_string(),
            has_mustache: self.worn(CosmeticSlot::Mustache).is_some(),
            facial_hair_color: self
                .tint_or(CosmeticSlot::Mustache, DEFAULT_FACIAL_HAIR)
                .to_string(),
        }
    }

    /// Descriptor for the layered renderer.
    ///
    /// Only overlay cosmetics contribute. Glasses and mustache share the
    /// accessory layer; glasses win when both are worn.
    pub fn layered_appearance(&self) -> LayeredAppearance {
        let mut layered = LayeredAppearance::new(self.sex);
        for (slot, cosmetic) in &self.worn {
            let Some(asset) = cosmetic.overlay_asset() else {
                continue;
            };
            let layer = slot.layer_slot();
            if layered.layers.get(layer).is_none() {
                layered.set_layer(layer, asset);
            }
        }
        layered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Boost, Rarity, default_catalog};
    use pretty_assertions::assert_eq;
    use saga_render::Slot;

    fn catalog_item(name: &str) -> Item {
        default_catalog().into_iter().find(|i| i.name() == name).unwrap()
    }

    #[test]
    fn test_bare_equipment_uses_defaults() {
        let appearance = Equipment::new(Sex::Female).appearance();
        assert_eq!(appearance, Appearance::for_sex(Sex::Female));
    }

    #[test]
    fn test_worn_tints_win() {
        let mut eq = Equipment::new(Sex::Male);
        eq.hair_color = Some("#123456".to_string());
        eq.equip(&catalog_item("Green Shirt")).unwrap();
        eq.equip(&catalog_item("Classic Mustache")).unwrap();

        let appearance = eq.appearance();
        assert_eq!(appearance.hair_color, "#123456");
        assert_eq!(appearance.shirt_color, "#228B22");
        assert!(appearance.has_mustache);
        assert_eq!(appearance.facial_hair_color, "#2C1B18");
        assert!(!appearance.has_glasses);
    }

    #[test]
    fn test_hair_item_beats_natural_color() {
        let mut eq = Equipment::new(Sex::Male);
        eq.hair_color = Some("#123456".to_string());
        eq.equip(&catalog_item("Ponytail")).unwrap();
        assert_eq!(eq.appearance().hair_color, "#2C7FA3");
    }

    #[test]
    fn test_equip_replaces_and_unequip_clears() {
        let mut eq = Equipment::new(Sex::Male);
        assert_eq!(eq.equip(&catalog_item("Blue Shirt")).unwrap(), None);
        let replaced = eq.equip(&catalog_item("Gold Armor")).unwrap();
        assert_eq!(replaced.map(|c| c.name), Some("Blue Shirt".to_string()));
        assert!(eq.unequip(CosmeticSlot::Shirt).is_some());
        assert_eq!(eq.appearance().shirt_color, DEFAULT_SHIRT);
    }

    #[test]
    fn test_boost_cannot_be_worn() {
        let mut eq = Equipment::new(Sex::Male);
        let tonic = Item::Boost {
            name: "Tonic".to_string(),
            rarity: Rarity::C,
            boost: Boost::default(),
        };
        assert!(matches!(eq.equip(&tonic), Err(AvatarError::NotCosmetic(name)) if name == "Tonic"));
    }

    #[test]
    fn test_layered_from_overlays() {
        let mut eq = Equipment::new(Sex::Female);
        let overlays = [
            ("Bob", CosmeticSlot::Hair, Rarity::B, "hair_bob.png"),
            ("Skirt", CosmeticSlot::Pants, Rarity::B, "bottom_skirt.png"),
            ("Monocle", CosmeticSlot::Glasses, Rarity::A, "acc_monocle.png"),
            ("Tache", CosmeticSlot::Mustache, Rarity::B, "acc_tache.png"),
        ];
        for (name, slot, rarity, asset) in overlays {
            let item = Item::Cosmetic(Cosmetic::overlay(name, slot, rarity, asset));
            eq.equip(&item).unwrap();
        }
        // tinted items have nothing to draw as a layer
        eq.equip(&catalog_item("Blue Shirt")).unwrap();

        let layered = eq.layered_appearance();
        assert_eq!(layered.sex, Sex::Female);
        let layers: Vec<(Slot, &str)> = layered.layers.iter().collect();
        assert_eq!(
            layers,
            vec![
                (Slot::Bottom, "bottom_skirt.png"),
                (Slot::Hair, "hair_bob.png"),
                (Slot::Accessory, "acc_monocle.png"),
            ]
        );
    }
}
