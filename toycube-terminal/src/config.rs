//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TOYCUBE_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use toycube_core::{ControlSettings, ParseOptions, RenderSettings, SceneLayout};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Terminal loop configuration
    #[serde(default)]
    pub terminal: TerminalConfig,
    /// Scene population and model source
    #[serde(default)]
    pub scene: SceneConfig,
    /// Draw loop settings
    #[serde(default)]
    pub render: RenderSettings,
    /// Key step sizes
    #[serde(default)]
    pub input: ControlSettings,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TOYCUBE_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // TOYCUBE_RENDER__MODE=wireframe -> render.mode = "wireframe"
        figment = figment.merge(Env::prefixed("TOYCUBE_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Terminal loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Frames per second the loop aims for
    pub target_fps: u32,
    /// Show the status line
    pub show_hud: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            show_hud: true,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Objects to place. Sizes are in terminal columns.
    pub layout: SceneLayout,
    /// Geometry file replacing the built-in cube
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    /// How the geometry file is read
    pub parse: ParseOptions,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout: SceneLayout::Single { scale: 12.0 },
            model_path: None,
            parse: ParseOptions::default(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Write logs here; without a file only errors reach stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use toycube_core::RenderMode;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.terminal.target_fps, 30);
        assert_eq!(config.render.mode, RenderMode::Shaded);
        assert_eq!(config.scene.layout, SceneLayout::Single { scale: 12.0 });
        assert!(config.scene.model_path.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("target_fps"));
        assert!(toml.contains("rotate_step"));
        assert!(toml.contains("kind = \"single\""));
    }

    #[test]
    fn test_grid_layout_from_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [scene.layout]
            kind = "grid"
            cols = 4
            rows = 3
            spacing = 7.0
            scale = 2.0

            [render]
            mode = "wireframe"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.scene.layout,
            SceneLayout::Grid {
                cols: 4,
                rows: 3,
                spacing: 7.0,
                scale: 2.0
            }
        );
        assert_eq!(config.render.mode, RenderMode::Wireframe);
        // untouched sections keep their defaults
        assert_eq!(config.input.twist, 0.1);
    }
}
