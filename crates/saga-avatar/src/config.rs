//! Renderer configuration
//!
//! Loaded from a TOML file; every key is optional and falls back to the
//! stock values. A missing file is not an error.
//!
//! ```toml
//! asset_dir = "assets"
//!
//! [region]
//! scale = 1
//! background = "#20242C"
//! tolerance = 52.0
//! skin_tolerance = 40.0
//!
//! [layered]
//! scale = 6
//! ```

use saga_color::{Color, hex_to_rgb};
use saga_render::{MaskSettings, Sex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid config value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Settings for both renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory holding base and overlay sprites
    pub asset_dir: PathBuf,
    pub base_male: String,
    pub base_female: String,
    pub region: RegionConfig,
    pub layered: LayeredConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            base_male: "base_male.png".to_string(),
            base_female: "base_female.png".to_string(),
            region: RegionConfig::default(),
            layered: LayeredConfig::default(),
        }
    }
}

/// Region renderer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Base sprite upscale applied before masks are built
    pub scale: u32,
    /// Optional hex fill painted beneath the recolored sprite
    pub background: Option<String>,
    pub tolerance: f32,
    pub skin_tolerance: f32,
    pub alpha_threshold: u8,
    pub binarize_threshold: u8,
}

impl Default for RegionConfig {
    fn default() -> Self {
        let mask = MaskSettings::default();
        Self {
            scale: 1,
            background: None,
            tolerance: mask.tolerance,
            skin_tolerance: mask.skin_tolerance,
            alpha_threshold: mask.alpha_threshold,
            binarize_threshold: mask.binarize_threshold,
        }
    }
}

impl RegionConfig {
    pub fn mask_settings(&self) -> MaskSettings {
        MaskSettings {
            tolerance: self.tolerance,
            skin_tolerance: self.skin_tolerance,
            alpha_threshold: self.alpha_threshold,
            binarize_threshold: self.binarize_threshold,
        }
    }

    /// Parsed background color
    pub fn background_color(&self) -> Result<Option<Color>, ConfigError> {
        self.background
            .as_deref()
            .map(|hex| {
                hex_to_rgb(hex).map_err(|e| ConfigError::InvalidValue {
                    key: "region.background",
                    message: e.to_string(),
                })
            })
            .transpose()
    }
}

/// Layered renderer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayeredConfig {
    /// Nearest-neighbor upscale applied to the composited sprite
    pub scale: u32,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self { scale: 6 }
    }
}

impl RenderConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Base sprite file name for a body
    pub fn base_asset(&self, sex: Sex) -> &str {
        match sex {
            Sex::Male => &self.base_male,
            Sex::Female => &self.base_female,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scales = [("region.scale", self.region.scale), ("layered.scale", self.layered.scale)];
        for (key, scale) in scales {
            if scale == 0 {
                return Err(ConfigError::InvalidValue { key, message: "must be at least 1".into() });
            }
        }
        let tolerances = [
            ("region.tolerance", self.region.tolerance),
            ("region.skin_tolerance", self.region.skin_tolerance),
        ];
        for (key, value) in tolerances {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key,
                    message: format!("{value} is not a positive distance"),
                });
            }
        }
        self.region.background_color()?;
        Ok(())
    }
}

/// Load configuration from a specific path
///
/// A `None` path or a path that does not exist yields the defaults.
pub fn load_config_from_path(path: Option<&Path>) -> Result<RenderConfig, ConfigError> {
    let Some(config_path) = path else {
        return Ok(RenderConfig::default());
    };

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "Config file not found, using defaults");
        return Ok(RenderConfig::default());
    }

    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.to_path_buf(),
        source: e,
    })?;
    let config = RenderConfig::from_toml_str(&content)?;

    tracing::info!(path = %config_path.display(), "Loaded render configuration");
    Ok(config)
}
