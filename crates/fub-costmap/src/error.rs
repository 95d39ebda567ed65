//! This module defines the error types used by the `fub-costmap` crate.

use thiserror::Error;

/// Error type for costmap construction and cell access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostmapError {
    /// Returned when a map resolution is not positive and finite.
    #[error("Invalid map resolution: {0}")]
    InvalidResolution(&'static str),
    /// Returned when the bounding box yields a zero, negative or non-finite
    /// cell count on some axis.
    #[error("Invalid map dimensions: {0}")]
    InvalidDimensions(&'static str),
    /// Returned when a cell index lies outside the map.
    #[error("Map access out of bounds: cell ({x}, {y}) is outside a {width}x{height} map")]
    OutOfBounds {
        /// Column of the offending cell.
        x: usize,
        /// Row of the offending cell.
        y: usize,
        /// Map width in cells.
        width: usize,
        /// Map height in cells.
        height: usize,
    },
}
