use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    model::Canvas,
};

/// Main configuration for the VideoML compiler
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Script generation settings
    pub generator: GeneratorConfig,

    /// Document build and watch settings
    pub build: BuildConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.build.validate()?;
        Ok(())
    }
}

/// Platform the generated script will run on
///
/// Only font resolution depends on it: Windows needs a path into the
/// system font directory, elsewhere the bare font name is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    #[default]
    Other,
}

impl std::str::FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Platform::Windows),
            "other" | "linux" | "macos" | "unix" => Ok(Platform::Other),
            _ => Err(ConfigError::InvalidValue {
                key: "generator.platform".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Script generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Target platform for font resolution
    pub platform: Platform,

    /// Output frame size
    pub canvas: Canvas,

    /// Font used when a text element names none
    pub default_font: String,

    pub default_font_size: u32,

    pub default_font_color: String,

    /// Display length of textual placements without an explicit duration (seconds)
    pub default_text_duration: f64,

    /// Vertical pixel offset of subtitles
    pub subtitle_offset_y: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Other,
            canvas: Canvas::default(),
            default_font: "Arial".to_string(),
            default_font_size: 60,
            default_font_color: "white".to_string(),
            default_text_duration: 5.0,
            subtitle_offset_y: 400,
        }
    }
}

impl GeneratorConfig {
    /// Font argument for the text clip constructor
    pub fn resolve_font(&self, font: Option<&str>) -> String {
        let font = font.unwrap_or(&self.default_font);
        match self.platform {
            Platform::Windows => format!("C:/Windows/Fonts/{}.ttf", font),
            Platform::Other => font.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "generator.canvas".to_string(),
                value: format!("{}x{}", self.canvas.width, self.canvas.height)
            }.into());
        }

        if self.default_text_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "generator.default_text_duration".to_string(),
                value: self.default_text_duration.to_string()
            }.into());
        }

        if !(1..=128).contains(&self.default_font_size) {
            return Err(ConfigError::InvalidValue {
                key: "generator.default_font_size".to_string(),
                value: self.default_font_size.to_string()
            }.into());
        }

        if self.default_font.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "generator.default_font".to_string(),
                value: self.default_font.clone()
            }.into());
        }

        Ok(())
    }
}

/// Document build configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Quiescence window after the last edit before rebuilding (milliseconds)
    pub debounce_ms: u64,

    /// Measure original media with ffprobe for the timeline view
    pub probe_durations: bool,

    /// ffprobe executable
    pub ffprobe_path: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            probe_durations: true,
            ffprobe_path: "ffprobe".to_string(),
        }
    }
}

impl BuildConfig {
    fn validate(&self) -> Result<()> {
        if self.probe_durations && self.ffprobe_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "build.ffprobe_path".to_string(),
                value: self.ffprobe_path.clone()
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("videoml.toml");

        let mut original_config = Config::default();
        original_config.generator.platform = Platform::Windows;
        original_config.build.debounce_ms = 50;

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[generator]\nplatform = \"windows\"\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.generator.platform, Platform::Windows);
        assert_eq!(config.generator.default_font_size, 60);
        assert_eq!(config.build, BuildConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/no/such/videoml.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_canvas() {
        let mut config = Config::default();
        config.generator.canvas = Canvas::new(0, 1080);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_text_duration() {
        let mut config = Config::default();
        config.generator.default_text_duration = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_font_resolution_per_platform() {
        let mut config = GeneratorConfig::default();
        assert_eq!(config.resolve_font(None), "Arial");
        assert_eq!(config.resolve_font(Some("Verdana")), "Verdana");

        config.platform = Platform::Windows;
        assert_eq!(config.resolve_font(None), "C:/Windows/Fonts/Arial.ttf");
        assert_eq!(config.resolve_font(Some("Verdana")), "C:/Windows/Fonts/Verdana.ttf");
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("Windows".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("other".parse::<Platform>().unwrap(), Platform::Other);
        assert!("amiga".parse::<Platform>().is_err());
    }
}
