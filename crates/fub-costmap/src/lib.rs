#![warn(missing_docs)]
#![doc = "A 2D cost grid for the grid publisher node."]
#![doc = ""]
#![doc = "The grid is sized from a world-frame bounding box and a resolution, starts"]
#![doc = "out fully unknown, and is then edited cell by cell."]

pub mod error;
pub mod map;

pub use error::CostmapError;
pub use map::{CellCost, CellEdit, CostMap2D};
