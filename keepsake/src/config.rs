//! Application configuration
//!
//! Read from a YAML file. Every section and field is optional; anything left
//! out takes its default.
//!
//! ```yaml
//! cache:
//!   capacity: 100
//! layout:
//!   target_row_height: 220
//! ranking:
//!   limit: 20
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use keepsake_core::{CacheConfig, RowLayoutPlanner, DEFAULT_TARGET_ROW_HEIGHT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cache: CacheConfig,
    pub layout: LayoutSettings,
    pub ranking: RankingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub target_row_height: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            target_row_height: DEFAULT_TARGET_ROW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// Cap on the number of results; `None` returns every match
    pub limit: Option<usize>,
}

/// `<config_dir>/keepsake/config.yaml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keepsake").join("config.yaml"))
}

impl AppConfig {
    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file that must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the configuration
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check values the core would reject later
    pub fn validate(&self) -> Result<()> {
        self.cache.validate()?;
        self.planner()?;
        Ok(())
    }

    /// Apply command line overrides
    pub fn with_overrides(
        mut self,
        capacity: Option<usize>,
        target_row_height: Option<f64>,
        limit: Option<usize>,
    ) -> Self {
        if let Some(capacity) = capacity {
            self.cache.capacity = capacity;
        }
        if let Some(height) = target_row_height {
            self.layout.target_row_height = height;
        }
        if limit.is_some() {
            self.ranking.limit = limit;
        }
        self
    }

    /// Build a planner for the configured target height
    pub fn planner(&self) -> Result<RowLayoutPlanner> {
        RowLayoutPlanner::new(self.layout.target_row_height)
            .map_err(|e| anyhow!("layout.target_row_height: {}", e))
    }
}
