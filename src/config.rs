//! Layered node configuration.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults (the demonstration grid and markers),
//! 2. an optional TOML file, `config/default.toml` unless `FUB_GRID_CONFIG`
//!    names another path,
//! 3. `FUB_GRID__<SECTION>__<KEY>` environment variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use fub_costmap::{CellCost, CellEdit};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

use crate::error::{NodeError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const CONFIG_PATH_ENV: &str = "FUB_GRID_CONFIG";
const ENV_PREFIX: &str = "FUB_GRID";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct NodeConfig {
    pub node: NodeSection,
    pub grid: GridConfig,
    pub markers: MarkerConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeSection {
    pub name: String,
    /// Marker republish rate.
    pub tick_hz: f64,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            name: "fub_grid".to_string(),
            tick_hz: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub frame_id: String,
    pub topic: String,
    /// World coordinates (m) of the bottom-left corner; becomes the map origin.
    pub bottom_left: [f64; 2],
    pub top_right: [f64; 2],
    /// Cell edge length (m).
    pub resolution: f64,
    /// Applied in order on top of the all-unknown grid.
    pub edits: Vec<CellEdit>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            frame_id: "map".to_string(),
            topic: "map/grid".to_string(),
            bottom_left: [0.0, 0.0],
            top_right: [4.5, 4.5],
            resolution: 0.3,
            edits: example_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub frame_id: String,
    pub topic: String,
    pub queue_size: usize,
    pub namespace: String,
    pub id: i32,
    /// Rendered point width and height (m).
    pub scale: f64,
    /// RGBA in `[0, 1]`.
    pub color: [f32; 4],
    /// Start cell; the marker point is its world-frame center.
    pub start: [usize; 2],
    /// Goal cell; the marker point is its world-frame center.
    pub goal: [usize; 2],
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            frame_id: "map".to_string(),
            topic: "visualization_marker".to_string(),
            queue_size: 10,
            namespace: String::new(),
            id: 0,
            scale: 0.2,
            color: [0.0, 1.0, 0.0, 1.0],
            start: [5, 2],
            goal: [5, 12],
        }
    }
}

/// A free corridor from (5,2) up to (5,12), detouring through column 4
/// around the obstacle at (5,5).
pub fn example_path() -> Vec<CellEdit> {
    use CellCost::{Free, Lethal};
    [
        (5, 2, Free),
        (5, 3, Free),
        (5, 4, Free),
        (4, 4, Free),
        (5, 5, Lethal),
        (4, 5, Free),
        (4, 6, Free),
        (5, 6, Free),
        (5, 7, Free),
        (5, 8, Free),
        (5, 9, Free),
        (5, 10, Free),
        (5, 11, Free),
        (5, 12, Free),
    ]
    .into_iter()
    .map(|(x, y, cost)| CellEdit::new(x, y, cost))
    .collect()
}

/// `FUB_GRID__<SECTION>__<KEY>` variables, e.g. `FUB_GRID__NODE__TICK_HZ=2`.
fn env_overrides() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

impl NodeConfig {
    /// Loads defaults, the optional config file and environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        info!("Attempting to load configuration from {}", path.display());

        let builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env_overrides());

        match Self::from_builder(builder) {
            Ok(config) => {
                info!(?config, "Successfully loaded configuration");
                Ok(config)
            }
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                Err(e)
            }
        }
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: NodeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the node cannot run with. Grid geometry is checked when
    /// the costmap is built.
    pub fn validate(&self) -> Result<()> {
        if !(self.node.tick_hz.is_finite() && self.node.tick_hz > 0.0) {
            return Err(NodeError::InvalidConfig(format!(
                "node.tick_hz must be positive and finite, got {}",
                self.node.tick_hz
            )));
        }
        if self.markers.queue_size == 0 {
            return Err(NodeError::InvalidConfig(
                "markers.queue_size must be at least 1".to_string(),
            ));
        }
        if self.grid.topic.is_empty() || self.markers.topic.is_empty() {
            return Err(NodeError::InvalidConfig(
                "topic names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.node.tick_hz)
    }
}
