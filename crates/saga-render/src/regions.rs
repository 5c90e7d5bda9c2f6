//! Per-sex region tables and mask building
//!
//! Seed boxes are hand-tuned sampling rectangles on the stock base sprites.
//! They only pick the reference color; the region itself is whatever the
//! similarity search finds across the whole image.

use crate::mask::{PixelRect, RegionMask, crop_mean, similarity_mask, smooth_mask};
use crate::{Color, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Sprite body variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn name(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(s.to_string()),
        }
    }
}

/// Customizable body region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Hair,
    Skin,
    Shirt,
    Pants,
    Shoes,
    Belt,
}

impl Region {
    /// All regions, in recolor order
    pub const ALL: [Region; 6] = [
        Region::Hair,
        Region::Skin,
        Region::Shirt,
        Region::Pants,
        Region::Shoes,
        Region::Belt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hair => "hair",
            Self::Skin => "skin",
            Self::Shirt => "shirt",
            Self::Pants => "pants",
            Self::Shoes => "shoes",
            Self::Belt => "belt",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seed box per region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTable {
    boxes: [PixelRect; 6],
}

impl SeedTable {
    /// Calibration for the stock female base sprite
    pub const FEMALE: SeedTable = SeedTable {
        boxes: [
            PixelRect::new(90, 95, 150, 140),
            PixelRect::new(165, 120, 190, 150),
            PixelRect::new(160, 190, 220, 230),
            PixelRect::new(165, 260, 220, 315),
            PixelRect::new(125, 355, 215, 390),
            PixelRect::new(180, 240, 215, 260),
        ],
    };

    /// Calibration for the stock male base sprite
    pub const MALE: SeedTable = SeedTable {
        boxes: [
            PixelRect::new(90, 105, 150, 150),
            PixelRect::new(165, 130, 190, 160),
            PixelRect::new(160, 195, 220, 235),
            PixelRect::new(165, 265, 220, 320),
            PixelRect::new(125, 360, 215, 395),
            PixelRect::new(180, 242, 215, 262),
        ],
    };

    pub fn for_sex(sex: Sex) -> Self {
        match sex {
            Sex::Male => Self::MALE,
            Sex::Female => Self::FEMALE,
        }
    }

    /// Table from explicit boxes, in [`Region::ALL`] order
    pub fn new(boxes: [PixelRect; 6]) -> Self {
        Self { boxes }
    }

    pub fn get(&self, region: Region) -> PixelRect {
        self.boxes[region as usize]
    }

    /// Table for a base sprite upscaled by `factor`
    pub fn scaled(&self, factor: u32) -> Self {
        Self { boxes: self.boxes.map(|b| b.scaled(factor)) }
    }
}

/// Similarity-search tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskSettings {
    /// RGB distance below which a pixel joins a region
    pub tolerance: f32,
    /// Tighter distance for skin so it does not bleed into flesh-toned parts
    pub skin_tolerance: f32,
    /// Pixels less opaque than this never belong to a region
    pub alpha_threshold: u8,
    /// Smoothed intensity a pixel must exceed to stay in the mask
    pub binarize_threshold: u8,
}

impl Default for MaskSettings {
    fn default() -> Self {
        Self {
            tolerance: 52.0,
            skin_tolerance: 40.0,
            alpha_threshold: 16,
            binarize_threshold: 100,
        }
    }
}

impl MaskSettings {
    pub fn tolerance_for(&self, region: Region) -> f32 {
        match region {
            Region::Skin => self.skin_tolerance,
            _ => self.tolerance,
        }
    }
}

/// Mask and reference color of one region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionEntry {
    pub mask: RegionMask,
    pub mean: Color,
}

/// Masks for every region of one base sprite
#[derive(Debug, Clone)]
pub struct RegionMasks {
    entries: HashMap<Region, RegionEntry>,
}

impl RegionMasks {
    /// Sample each seed box, search the whole image for similar pixels,
    /// smooth, and drop anything below the visibility threshold.
    pub fn build(base: &RgbaImage, seeds: &SeedTable, settings: &MaskSettings) -> Self {
        let entries = Region::ALL
            .iter()
            .map(|&region| (region, build_region(base, region, seeds.get(region), settings)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, region: Region) -> Option<&RegionEntry> {
        self.entries.get(&region)
    }

    /// Skin mask, used to place facial accessories
    pub fn skin(&self) -> Option<&RegionMask> {
        self.get(Region::Skin).map(|e| &e.mask)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &RegionEntry)> {
        Region::ALL
            .into_iter()
            .filter_map(|r| self.entries.get(&r).map(|e| (r, e)))
    }
}

fn build_region(
    base: &RgbaImage,
    region: Region,
    seed: PixelRect,
    settings: &MaskSettings,
) -> RegionEntry {
    let mean = crop_mean(base, seed);
    let raw = similarity_mask(base, mean, settings.tolerance_for(region), settings.alpha_threshold);
    let mut mask = smooth_mask(&raw, settings.binarize_threshold);
    // smoothing grows edges by a pixel; re-apply the visibility gate
    mask.retain(|x, y| base.get_pixel(x, y).0[3] >= settings.alpha_threshold);

    tracing::debug!(
        region = region.name(),
        mean = %mean,
        pixels = mask.count(),
        "Built region mask"
    );

    RegionEntry { mask, mean }
}
