//! Runtime configuration, read from TOML with every field defaulted.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::render::render3d::RenderStyle;
use crate::render::textures::TexturePaths;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Spawn {
    pub x: f64,
    pub y: f64,
    /// Turns, wrapped on use.
    pub angle: f64,
}

impl Default for Spawn {
    fn default() -> Self {
        Self { x: 1.5, y: 14.5, angle: 0.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Buffer width in tiles (one ray per column).
    pub tile_cols: u32,
    pub tile_rows: u32,
    /// Window pixels per tile when presenting.
    pub tile_size: u32,
    /// Full field of view in turns.
    pub fov: f64,
    pub move_speed: f64,
    pub rotate_speed: f64,
    pub style: RenderStyle,
    pub minimap: bool,
    /// Map file; the built-in reference map when absent.
    pub map: Option<PathBuf>,
    pub spawn: Spawn,
    pub textures: TexturePaths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_cols: 128,
            tile_rows: 96,
            tile_size: 8,
            fov: 0.25,
            move_speed: 2.0,
            rotate_speed: 0.5,
            style: RenderStyle::Flat,
            minimap: true,
            map: None,
            spawn: Spawn::default(),
            textures: TexturePaths::default(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_cols < 2 || self.tile_rows < 2 {
            return Err(ConfigError::Invalid(format!(
                "buffer must be at least 2x2 tiles, got {}x{}",
                self.tile_cols, self.tile_rows
            )));
        }
        if self.tile_size == 0 {
            return Err(ConfigError::Invalid("tile_size must be at least 1".into()));
        }
        if !(self.fov > 0.0 && self.fov < 0.5) {
            return Err(ConfigError::Invalid(format!(
                "fov must be inside (0, 0.5) turns, got {}",
                self.fov
            )));
        }
        if !self.move_speed.is_finite() || !self.rotate_speed.is_finite() {
            return Err(ConfigError::Invalid("speeds must be finite".into()));
        }
        if !(self.spawn.x.is_finite() && self.spawn.y.is_finite() && self.spawn.angle.is_finite()) {
            return Err(ConfigError::Invalid("spawn must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = Config::from_toml(
            r#"
            tile_cols = 160
            style = "textured"

            [spawn]
            angle = 0.5

            [textures]
            wall_x = "assets/brick.png"
            "#,
        )
        .unwrap();
        assert_eq!(config.tile_cols, 160);
        assert_eq!(config.tile_rows, 96);
        assert_eq!(config.style, RenderStyle::Textured);
        assert_eq!(config.spawn, Spawn { x: 1.5, y: 14.5, angle: 0.5 });
        assert_eq!(config.textures.wall_x, Some(PathBuf::from("assets/brick.png")));
        assert_eq!(config.textures.wall_y, None);
    }

    #[test]
    fn fov_must_be_less_than_half_a_turn() {
        let err = Config::from_toml("fov = 0.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(Config::from_toml("fov = 0.0").is_err());
    }

    #[test]
    fn tiny_buffers_are_rejected() {
        assert!(matches!(Config::from_toml("tile_cols = 1"), Err(ConfigError::Invalid(_))));
        assert!(matches!(Config::from_toml("tile_size = 0"), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_style_is_a_parse_error() {
        assert!(matches!(Config::from_toml("style = \"wireframe\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fps.toml");
        fs::write(&path, "minimap = false\n").unwrap();
        assert!(!Config::load(&path).unwrap().minimap);
    }
}
