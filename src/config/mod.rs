// Configuration module: loads, validates and saves the depth chart configuration

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod system_config;

pub use system_config::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration manager bound to one file path
pub struct ConfigManager {
    config_path: PathBuf,
    config: DepthChartConfig,
    loaded: bool,
}

impl ConfigManager {
    /// Create new configuration manager with default path
    pub fn new() -> Self {
        Self::with_path("depth_sight.toml")
    }

    /// Create configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            config: DepthChartConfig::default(),
            loaded: false,
        }
    }

    /// Load configuration; a missing file keeps the defaults
    pub fn load(&mut self) -> Result<(), ConfigError> {
        if !self.config_path.exists() {
            log::info!(
                "Config file {} not found, using defaults",
                self.config_path.display()
            );
            self.config = DepthChartConfig::default();
        } else {
            let content = fs::read_to_string(&self.config_path)?;
            self.config = parse_config(&content)?;
        }
        self.loaded = true;
        Ok(())
    }

    /// Save current configuration
    pub fn save(&self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    pub fn config(&self) -> &DepthChartConfig {
        &self.config
    }

    pub fn into_config(self) -> DepthChartConfig {
        self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and validate configuration text
pub fn parse_config(content: &str) -> Result<DepthChartConfig, ConfigError> {
    let config: DepthChartConfig = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Convenience: load from a path, falling back to defaults when the file is absent
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DepthChartConfig, ConfigError> {
    let mut manager = ConfigManager::with_path(path);
    manager.load()?;
    Ok(manager.into_config())
}

pub fn validate(config: &DepthChartConfig) -> Result<(), ConfigError> {
    let window = &config.window;
    if !(window.premium_half_width > 0.0) {
        return Err(ConfigError::Invalid(
            "window.premium_half_width must be positive".to_string(),
        ));
    }
    if !(window.premium_step > 0.0) {
        return Err(ConfigError::Invalid(
            "window.premium_step must be positive".to_string(),
        ));
    }
    if !(window.price_step_divisor > 0.0) {
        return Err(ConfigError::Invalid(
            "window.price_step_divisor must be positive".to_string(),
        ));
    }
    if window.min_half_width < 0.0 {
        return Err(ConfigError::Invalid(
            "window.min_half_width must not be negative".to_string(),
        ));
    }
    if config.chart.height <= 0.0 {
        return Err(ConfigError::Invalid("chart.height must be positive".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DepthChartConfig::default();
        assert!(validate(&config).is_ok());
        assert_eq!(config.window.premium_half_width, 8.0);
        assert_eq!(config.window.premium_step, 0.5);
        assert_eq!(config.window.min_half_width, 1.0);
        assert_eq!(config.chart.volume_suffix, "BTC");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = parse_config(
            r#"
            [system]
            log_level = "debug"

            [window]
            premium_half_width = 12.0
            "#,
        )
        .unwrap();

        assert_eq!(config.system.log_level, "debug");
        assert_eq!(config.system.log_file, "depth_sight.log");
        assert_eq!(config.window.premium_half_width, 12.0);
        assert_eq!(config.window.premium_step, 0.5);
        assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = parse_config(
            r#"
            [window]
            premium_step = 0.0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config("/nonexistent/depth_sight/config.toml").unwrap();
        assert_eq!(config, DepthChartConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("depth_sight_test_{}.toml", std::process::id()));
        let mut manager = ConfigManager::with_path(&path);
        manager.load().unwrap();
        manager.save().unwrap();

        let reloaded = load_config(&path).unwrap();
        assert_eq!(reloaded, DepthChartConfig::default());
        let _ = fs::remove_file(&path);
    }
}
