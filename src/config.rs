//! Driver station configuration
//!
//! Loaded from TOML. Describes which controllers to open and the named button
//! and axis bindings the station reports every cycle. A missing file falls
//! back to [`StationConfig::default`], a single joystick on port 0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::controller::{ButtonMap, ControllerAxis, DEFAULT_BUTTON_COUNT, MAX_BUTTON_COUNT};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Which layout a configured controller uses
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    Joystick,
    Xbox,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ControllerSpec {
    pub port: u32,
    pub kind: ControllerKind,
    #[serde(default = "default_buttons")]
    pub buttons: usize,
    #[serde(default = "default_deadzone")]
    pub deadzone: f32,
}

fn default_buttons() -> usize {
    DEFAULT_BUTTON_COUNT
}

fn default_deadzone() -> f32 {
    0.05
}

fn default_poll_interval_ms() -> u64 {
    20
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct StationConfig {
    /// Control cycle period
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Controllers in group order; the first entry is controller 1
    pub controllers: Vec<ControllerSpec>,

    #[serde(default)]
    pub buttons: BTreeMap<String, ButtonMap>,

    #[serde(default)]
    pub axes: BTreeMap<String, ControllerAxis>,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            controllers: vec![ControllerSpec {
                port: 0,
                kind: ControllerKind::Joystick,
                buttons: DEFAULT_BUTTON_COUNT,
                deadzone: default_deadzone(),
            }],
            buttons: BTreeMap::new(),
            axes: BTreeMap::new(),
        }
    }
}

impl StationConfig {
    /// `<config dir>/fieldpad/station.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fieldpad").join("station.toml"))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: StationConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading station config from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        debug!(
            "Loaded {} controllers, {} button bindings, {} axis bindings",
            config.controllers.len(),
            config.buttons.len(),
            config.axes.len()
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise the defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.controllers.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one controller is required".to_string(),
            ));
        }
        for spec in &self.controllers {
            if !(0.0..1.0).contains(&spec.deadzone) {
                return Err(ConfigError::Invalid(format!(
                    "deadzone {} on port {} must be in [0, 1)",
                    spec.deadzone, spec.port
                )));
            }
            if spec.buttons == 0 {
                return Err(ConfigError::Invalid(format!(
                    "controller on port {} declares no buttons",
                    spec.port
                )));
            }
            if spec.buttons > MAX_BUTTON_COUNT {
                return Err(ConfigError::Invalid(format!(
                    "controller on port {} declares {} buttons, at most {} are supported",
                    spec.port, spec.buttons, MAX_BUTTON_COUNT
                )));
            }
        }

        let count = self.controllers.len() as i64;
        let in_range = |cont: i32| (1..=count).contains(&i64::from(cont));

        for (name, map) in &self.buttons {
            if let Some(bad) = map.iter().find(|b| !b.is_none() && !in_range(b.controller)) {
                return Err(ConfigError::Invalid(format!(
                    "button binding '{name}' references {bad}, but only {count} controllers are configured"
                )));
            }
        }
        for (name, axis) in &self.axes {
            if !axis.is_none() && !in_range(axis.controller) {
                return Err(ConfigError::Invalid(format!(
                    "axis binding '{name}' references {axis}, but only {count} controllers are configured"
                )));
            }
        }
        Ok(())
    }
}
