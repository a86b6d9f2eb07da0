//! Viewer configuration, read from TOML.
//!
//! ```toml
//! [layer]
//! url = "http://example.org/fcgi-bin/iipsrv.fcgi?FIF=m31.fits"
//! contrast = 1.2
//! cmap = "grey"
//!
//! [[coordinates]]
//! label = "RA, Dec"
//! units = "hms"
//!
//! [[coordinates]]
//! label = "l, b"
//! units = "deg"
//! native_celsys = true
//!
//! [scale_bar]
//! max_width = 160
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::control::{CoordinateChoice, CoordinateControl};
use crate::error::{IipError, IipResult};
use crate::metadata::IipMetadata;
use crate::scale_bar::{ScaleBar, ScaleBarOptions};
use crate::tiles::{RenderSettings, TileGeometry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub layer: LayerConfig,
    #[serde(default = "default_coordinates")]
    pub coordinates: Vec<CoordinateChoice>,
    #[serde(default)]
    pub scale_bar: ScaleBarOptions,
}

fn default_coordinates() -> Vec<CoordinateChoice> {
    vec![CoordinateChoice::default()]
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            layer: LayerConfig::default(),
            coordinates: default_coordinates(),
            scale_bar: ScaleBarOptions::default(),
        }
    }
}

/// Tile layer options. Rendering values left unset follow the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub min_zoom: i32,
    /// Defaults to two levels past the finest native resolution.
    #[serde(default)]
    pub max_zoom: Option<i32>,
    #[serde(default = "default_contrast")]
    pub contrast: f64,
    /// Defaults to 2.2 for 32-bit images and 1.0 otherwise.
    #[serde(default)]
    pub gamma: Option<f64>,
    #[serde(default = "default_cmap")]
    pub cmap: String,
    #[serde(default = "default_quality")]
    pub quality: u32,
}

fn default_contrast() -> f64 {
    1.0
}
fn default_cmap() -> String {
    "grey".to_string()
}
fn default_quality() -> u32 {
    90
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            url: None,
            min_zoom: 0,
            max_zoom: None,
            contrast: default_contrast(),
            gamma: None,
            cmap: default_cmap(),
            quality: default_quality(),
        }
    }
}

impl LayerConfig {
    pub fn render_settings(&self, meta: &IipMetadata) -> RenderSettings {
        let mut settings = RenderSettings::from_metadata(meta);
        settings.contrast = self.contrast;
        settings.cmap = self.cmap.clone();
        settings.quality = self.quality;
        if let Some(gamma) = self.gamma {
            settings.gamma = gamma;
        }
        settings
    }

    pub fn geometry(&self, meta: &IipMetadata) -> TileGeometry {
        let geometry = TileGeometry::from_metadata(meta, self.min_zoom);
        match self.max_zoom {
            Some(max_zoom) => geometry.with_max_zoom(max_zoom),
            None => geometry,
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(text: &str) -> IipResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| IipError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> IipResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| IipError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> IipResult<()> {
        if self.coordinates.is_empty() {
            return Err(IipError::config("at least one coordinate choice is required"));
        }
        if !(self.layer.contrast.is_finite() && self.layer.contrast > 0.0) {
            return Err(IipError::config(format!(
                "contrast must be positive, got {}",
                self.layer.contrast
            )));
        }
        if let Some(gamma) = self.layer.gamma {
            if !(gamma.is_finite() && gamma > 0.0) {
                return Err(IipError::config(format!("gamma must be positive, got {gamma}")));
            }
        }
        if !(1..=100).contains(&self.layer.quality) {
            return Err(IipError::config(format!(
                "quality must be within 1..=100, got {}",
                self.layer.quality
            )));
        }
        if self.scale_bar.max_width == 0 {
            return Err(IipError::config("scale bar max_width must be positive"));
        }
        Ok(())
    }

    pub fn control(&self) -> CoordinateControl {
        CoordinateControl::new(self.coordinates.clone())
    }

    pub fn scale_bar(&self) -> ScaleBar {
        ScaleBar::new(self.scale_bar.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::DisplayUnits;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.layer, LayerConfig::default());
        assert_eq!(config.coordinates, vec![CoordinateChoice::default()]);
        assert_eq!(config.scale_bar.max_width, 128);
        assert!(config.scale_bar.degrees && config.scale_bar.pixels);
    }

    #[test]
    fn test_full_file() {
        let text = r#"
            [layer]
            url = "http://example.org/iipsrv.fcgi?FIF=m31.fits"
            min_zoom = 1
            max_zoom = 9
            contrast = 1.2
            gamma = 1.8
            cmap = "jet"
            quality = 75

            [[coordinates]]
            label = "RA, Dec"
            units = "hms"

            [[coordinates]]
            label = "l, b"
            units = "degrees"
            native_celsys = true

            [scale_bar]
            max_width = 160
            pixels = false
        "#;
        let config = ViewerConfig::from_toml_str(text).unwrap();
        assert_eq!(config.layer.max_zoom, Some(9));
        assert_eq!(config.layer.cmap, "jet");
        assert_eq!(config.coordinates.len(), 2);
        assert_eq!(config.coordinates[1].units, DisplayUnits::Degrees);
        assert!(config.coordinates[1].native_celsys);
        assert!(!config.coordinates[0].native_celsys);
        assert_eq!(config.scale_bar.max_width, 160);
        assert!(!config.scale_bar.pixels);
        assert!(config.scale_bar.degrees);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ViewerConfig::from_toml_str("[layer]\nquality = 0\n").is_err());
        assert!(ViewerConfig::from_toml_str("[layer]\ncontrast = -1.0\n").is_err());
        assert!(ViewerConfig::from_toml_str("coordinates = []\n").is_err());
        assert!(ViewerConfig::from_toml_str("[layer]\nzoom = \"x\"\ncmap = 3\n").is_err());
    }

    #[test]
    fn test_render_settings_override_server() {
        let meta =
            IipMetadata::parse("Max-size:512 512\nBits-per-channel:32\nMin-Max-sample-values:0 10\n")
                .unwrap();
        let mut layer = LayerConfig::default();
        assert_eq!(layer.render_settings(&meta).gamma, 2.2);
        layer.gamma = Some(1.0);
        assert_eq!(layer.render_settings(&meta).gamma, 1.0);
    }
}
