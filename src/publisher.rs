//! Grid construction and the one-shot occupancy grid publish.

use fub_costmap::{CellCost, CostMap2D, CostmapError};
use fub_msgs::nav_msgs::{OCCUPANCY_FREE, OCCUPANCY_OCCUPIED, OCCUPANCY_UNKNOWN};
use fub_msgs::{Header, MapMetaData, OccupancyGrid, Point, Pose, Quaternion};
use nalgebra::SVector;
use std::sync::Arc;
use tracing::{debug, info};

use crate::bus::Publish;
use crate::config::GridConfig;
use crate::error::{NodeError, Result};

/// Builds the all-unknown grid covering the configured box and applies the
/// configured edits on top of it.
pub fn build_costmap(config: &GridConfig) -> std::result::Result<CostMap2D, CostmapError> {
    let mut costmap = CostMap2D::from_bounds(
        SVector::<f64, 2>::from(config.bottom_left),
        SVector::<f64, 2>::from(config.top_right),
        config.resolution,
    )?;
    info!(
        width = costmap.width(),
        height = costmap.height(),
        resolution = costmap.resolution(),
        "Allocated costmap"
    );

    costmap.apply_edits(&config.edits)?;
    info!(
        edits = config.edits.len(),
        free = costmap.count(CellCost::Free),
        occupied = costmap.count(CellCost::Lethal),
        unknown = costmap.count(CellCost::Unknown),
        "Applied cell edits"
    );
    debug!("\n{}", costmap);

    Ok(costmap)
}

/// Maps a cell cost onto the `[-1, 100]` occupancy scale.
///
/// Inflated costs 1..=252 are compressed linearly onto 1..=98.
pub fn cost_to_occupancy(cost: CellCost) -> i8 {
    match cost.as_u8() {
        0 => OCCUPANCY_FREE,
        253 => 99,
        254 => OCCUPANCY_OCCUPIED,
        255 => OCCUPANCY_UNKNOWN,
        i => (1 + (97 * (i as i32 - 1)) / 251) as i8,
    }
}

/// Serializes `costmap` into an occupancy grid message.
pub fn to_occupancy_grid(costmap: &CostMap2D, header: Header) -> Result<OccupancyGrid> {
    let too_large = |_| {
        NodeError::InvalidConfig(format!(
            "a {}x{} grid does not fit an occupancy grid message",
            costmap.width(),
            costmap.height()
        ))
    };
    let width = u32::try_from(costmap.width()).map_err(too_large)?;
    let height = u32::try_from(costmap.height()).map_err(too_large)?;
    let origin = costmap.origin();

    Ok(OccupancyGrid {
        info: MapMetaData {
            map_load_time: header.stamp,
            resolution: costmap.resolution() as f32,
            width,
            height,
            origin: Pose {
                position: Point::new(origin[0], origin[1], 0.0),
                orientation: Quaternion::IDENTITY,
            },
        },
        header,
        data: costmap.data().iter().copied().map(cost_to_occupancy).collect(),
    })
}

/// Announces a costmap once on a grid topic.
pub struct GridPublisher<P> {
    topic: P,
    frame_id: String,
}

impl<P: Publish<OccupancyGrid>> GridPublisher<P> {
    pub fn new(topic: P, frame_id: impl Into<String>) -> Self {
        Self {
            topic,
            frame_id: frame_id.into(),
        }
    }

    /// Publishes the current state of `costmap`. Later changes to the map are
    /// not seen by subscribers unless this is called again.
    pub fn publish(&self, costmap: &CostMap2D) -> Result<usize> {
        let grid = to_occupancy_grid(costmap, Header::now(self.frame_id.as_str()))?;
        let delivered = self.topic.publish_shared(Arc::new(grid))?;
        info!(
            topic = self.topic.topic_name(),
            frame = %self.frame_id,
            subscribers = delivered,
            "Published costmap"
        );
        Ok(delivered)
    }
}
