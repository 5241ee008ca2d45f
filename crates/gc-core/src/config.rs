//! Configuration system for the gearcore adapter

use crate::error::CoreError;
use crate::platform::{PixelFormat, Platform};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub video: VideoConfig,
    pub debug: DebugConfig,
}

/// Audio settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Initial state of the user-facing FM audio toggle
    pub fm_audio: bool,
}

/// Framebuffer format per platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub game_gear: PixelFormat,
    pub master_system: PixelFormat,
    pub sg1000: PixelFormat,
}

/// Debug settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DebugConfig {
    pub log_level: LogLevel,
}

/// Logging level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { fm_audio: true }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            game_gear: PixelFormat::Rgb888,
            master_system: PixelFormat::Rgb888,
            sg1000: PixelFormat::Rgb565,
        }
    }
}

impl VideoConfig {
    /// Pixel format used for surfaces on the given platform
    pub fn pixel_format(&self, platform: Platform) -> PixelFormat {
        match platform {
            Platform::GameGear => self.game_gear,
            Platform::MasterSystem => self.master_system,
            Platform::Sg1000 => self.sg1000,
        }
    }
}

impl Config {
    /// Load configuration from the default location, or create it if it doesn't exist
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::info!("Creating default configuration at {}", path.display());
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(Self::config_path())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::io(format!("Failed to read {}", path.display()), e))?;
        toml::from_str(&content).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::io("Failed to create config directory", e))?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| CoreError::io(format!("Failed to write {}", path.display()), e))
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gearcore")
            .join("config.toml")
    }
}
