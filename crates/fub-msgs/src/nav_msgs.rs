//! Occupancy grid messages.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry_msgs::Pose;
use crate::std_msgs::{Header, Time};

/// Occupancy value of a cell with no information.
pub const OCCUPANCY_UNKNOWN: i8 = -1;
/// Occupancy value of a free cell.
pub const OCCUPANCY_FREE: i8 = 0;
/// Occupancy value of a certainly occupied cell.
pub const OCCUPANCY_OCCUPIED: i8 = 100;

/// Metadata about the map.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapMetaData {
    /// The time at which the map was loaded.
    pub map_load_time: Time,
    /// The map resolution (meters/cell).
    pub resolution: f32,
    /// Map width (cells).
    pub width: u32,
    /// Map height (cells).
    pub height: u32,
    /// The real-world pose of cell (0, 0) in the map.
    pub origin: Pose,
}

/// A 2D grid map in which each cell holds an occupancy value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OccupancyGrid {
    /// Frame and stamp.
    pub header: Header,
    /// MetaData for the map.
    pub info: MapMetaData,
    /// Row-major map data starting with (0, 0). Values are in `[0, 100]`,
    /// unknown is [`OCCUPANCY_UNKNOWN`].
    pub data: Vec<i8>,
}

impl OccupancyGrid {
    /// Occupancy value at `(x, y)`, or `None` outside the grid.
    pub fn cell(&self, x: u32, y: u32) -> Option<i8> {
        if x >= self.info.width || y >= self.info.height {
            return None;
        }
        let index = y as usize * self.info.width as usize + x as usize;
        self.data.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_lookup_is_row_major() {
        let grid = OccupancyGrid {
            info: MapMetaData {
                width: 3,
                height: 2,
                ..Default::default()
            },
            data: vec![0, 0, 0, 0, 0, OCCUPANCY_OCCUPIED],
            ..Default::default()
        };
        assert_eq!(grid.cell(2, 1), Some(OCCUPANCY_OCCUPIED));
        assert_eq!(grid.cell(1, 1), Some(OCCUPANCY_FREE));
        assert_eq!(grid.cell(3, 0), None);
        assert_eq!(grid.cell(0, 2), None);
    }
}
