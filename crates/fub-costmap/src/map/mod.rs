//! Map-related functionality.
//!
//! This module provides the cost map implementation used to describe the
//! demonstration occupancy grid.

pub mod costmap;

pub use costmap::{CellCost, CellEdit, CostMap2D};
