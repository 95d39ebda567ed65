//! Error type for the grid node.

use fub_costmap::CostmapError;
use thiserror::Error;

use crate::bus::TransportError;

/// Everything that can stop the grid node before its marker loop starts.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Configuration sources could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    /// Configuration was read but holds values the node cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Degenerate grid geometry or an out-of-range cell edit.
    #[error(transparent)]
    Costmap(#[from] CostmapError),
    /// The transport refused a message.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T, E = NodeError> = std::result::Result<T, E>;
