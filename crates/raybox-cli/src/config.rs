//! `raybox.toml` configuration.

use std::path::{Path, PathBuf};

use raybox_render::RenderSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("could not read `{}`: {source}", path.display())]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`Config`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Zero width or height.
    #[error("invalid resolution {width}x{height}")]
    InvalidResolution {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// No built-in scene has this name.
    #[error("unknown scene `{0}` (run `raybox scenes` for the list)")]
    UnknownScene(String),

    /// The scene needs a bitmap but none was configured.
    #[error("scene `{0}` needs a texture path (`texture` in the config or --texture)")]
    MissingTexture(String),
}

/// Render job configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Name of the built-in scene to render.
    pub scene: String,
    /// Bitmap for scenes that use an image texture.
    pub texture: Option<PathBuf>,
    /// Renderer options.
    pub render: RenderSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            scene: "plane".to_string(),
            texture: None,
            render: RenderSettings::default(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Check values that parse but cannot be rendered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert!((config.aspect() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            width = 320
            height = 200
            scene = "csg"
            texture = "floor.bmp"

            [render]
            antialiasing = false
            aa_threshold = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.scene, "csg");
        assert_eq!(config.texture.as_deref(), Some(Path::new("floor.bmp")));
        assert!(!config.render.antialiasing);
        assert!((config.render.aa_threshold - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let err = Config::from_toml("width = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidResolution {
                width: 0,
                height: 480
            }
        ));
    }

    #[test]
    fn test_rejects_bad_types() {
        assert!(matches!(
            Config::from_toml("width = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/raybox.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/raybox.toml"));
    }
}
