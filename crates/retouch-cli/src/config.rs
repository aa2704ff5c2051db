//! TOML configuration.
//!
//! Every section is optional; missing keys take their defaults.
//!
//! ```toml
//! [open]
//! extensions = ["bmp", "jpg", "jpeg"]
//! apply_exif_orientation = true
//!
//! [save]
//! dir = "."
//! file_name = "modified_image"
//! jpeg_quality = 90
//!
//! [blur]
//! max_radius = 50
//!
//! [preview]
//! path = "/tmp/retouch-preview.png"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use retouch_core::decode::OpenOptions;
use retouch_core::encode::SaveOptions;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub open: OpenOptions,
    pub save: SaveOptions,
    pub blur: Blur,
    pub preview: Preview,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Blur {
    /// Largest radius the menu accepts.
    pub max_radius: u32,
}

impl Default for Blur {
    fn default() -> Self {
        Self { max_radius: 50 }
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Preview {
    /// Where the working image is written after every edit. Unset disables
    /// preview files.
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("parse config file {}", path.display()))?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.open.extensions, vec!["bmp", "jpg", "jpeg"]);
        assert_eq!(config.save.dir, PathBuf::from("."));
        assert_eq!(config.save.file_name, "modified_image");
        assert_eq!(config.save.jpeg_quality, 90);
        assert_eq!(config.blur.max_radius, 50);
        assert!(config.preview.path.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
            [save]
            jpeg_quality = 75

            [blur]
            max_radius = 8

            [preview]
            path = "/tmp/preview.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.save.jpeg_quality, 75);
        assert_eq!(config.save.file_name, "modified_image");
        assert_eq!(config.blur.max_radius, 8);
        assert_eq!(config.preview.path, Some(PathBuf::from("/tmp/preview.png")));
        assert!(config.open.apply_exif_orientation);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml("[blur]\nmax_radius = \"big\"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("read config file"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("retouch.toml");
        std::fs::write(&path, "[open]\nextensions = [\"png\"]\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.open.extensions, vec!["png"]);
    }
}
