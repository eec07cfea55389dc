//! Configuration management for the LESS scoring application

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model configuration
    pub model: ModelConfig,

    /// Smoothing / differentiation configuration
    pub smoothing: SmoothingConfig,

    /// Pose extraction configuration
    pub pose: PoseConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Model file paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the pose-landmark ONNX model
    pub pose_landmarks: PathBuf,
}

/// Savitzky-Golay differentiation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Smoothing window length in samples (must be odd)
    pub window_length: usize,

    /// Polynomial order of the local fit
    pub poly_order: usize,
}

/// Pose extraction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseConfig {
    /// Minimum mean lower-body landmark visibility (0.0-1.0)
    pub visibility_threshold: f32,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show a preview window while processing
    pub show_window: bool,

    /// Write the annotated output video
    pub write_video: bool,

    /// Overlay text scale
    pub font_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            smoothing: SmoothingConfig::default(),
            pose: PoseConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            pose_landmarks: PathBuf::from("assets/pose_landmarks.onnx"),
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_length: crate::constants::DEFAULT_WINDOW_LENGTH,
            poly_order: crate::constants::DEFAULT_POLY_ORDER,
        }
    }
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: crate::constants::DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_window: false,
            write_video: true,
            font_scale: 0.5,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if serialization fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.smoothing.window_length % 2 == 0 {
            return Err(Error::ConfigError(
                "Smoothing window length must be odd".to_string(),
            ));
        }
        if self.smoothing.window_length <= self.smoothing.poly_order {
            return Err(Error::ConfigError(
                "Smoothing window length must exceed the polynomial order".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.pose.visibility_threshold) {
            return Err(Error::ConfigError(
                "Visibility threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.display.font_scale <= 0.0 {
            return Err(Error::ConfigError("Font scale must be positive".to_string()));
        }
        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# LESS Scoring Configuration

# Model paths
model:
  pose_landmarks: "assets/pose_landmarks.onnx"

# Savitzky-Golay smoothing
smoothing:
  window_length: 31
  poly_order: 2

# Pose extraction
pose:
  visibility_threshold: 0.5

# Display settings
display:
  show_window: false
  write_video: true
  font_scale: 0.5
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_even_window_rejected() {
        let mut config = Config::default();
        config.smoothing.window_length = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_must_exceed_order() {
        let mut config = Config::default();
        config.smoothing.window_length = 1;
        config.smoothing.poly_order = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_visibility_threshold_range() {
        let mut config = Config::default();
        config.pose.visibility_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.smoothing.window_length, 31);
        assert_eq!(config.smoothing.poly_order, 2);
        assert!(config.validate().is_ok());
    }
}
