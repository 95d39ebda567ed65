//! Start/goal marker construction.

use fub_costmap::CostMap2D;
use fub_msgs::{
    ColorRGBA, Header, Marker, MarkerAction, MarkerType, Point, Pose, Quaternion, Vector3,
};
use nalgebra::SVector;

use crate::config::MarkerConfig;
use crate::error::{NodeError, Result};

fn cell_center(costmap: &CostMap2D, label: &str, cell: [usize; 2]) -> Result<Point> {
    let center = costmap
        .grid_to_world(&SVector::<usize, 2>::from(cell))
        .ok_or_else(|| {
            NodeError::InvalidConfig(format!(
                "{} cell ({}, {}) lies outside the {}x{} grid",
                label,
                cell[0],
                cell[1],
                costmap.width(),
                costmap.height()
            ))
        })?;
    Ok(Point::new(center[0], center[1], 0.0))
}

/// Builds the points marker holding the start and goal cell centers.
///
/// The stamp is taken here, once; the returned marker is meant to be
/// republished unchanged.
pub fn build_markers(config: &MarkerConfig, costmap: &CostMap2D) -> Result<Marker> {
    let start = cell_center(costmap, "start", config.start)?;
    let goal = cell_center(costmap, "goal", config.goal)?;

    Ok(Marker {
        header: Header::now(config.frame_id.as_str()),
        ns: config.namespace.clone(),
        id: config.id,
        marker_type: MarkerType::Points,
        action: MarkerAction::Add,
        pose: Pose {
            position: Point::default(),
            orientation: Quaternion::IDENTITY,
        },
        scale: Vector3 {
            x: config.scale,
            y: config.scale,
            z: 0.0,
        },
        color: ColorRGBA::from(config.color),
        lifetime_secs: 0.0,
        frame_locked: false,
        points: vec![start, goal],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::publisher::build_costmap;

    fn assert_point_near(p: &Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9, "x = {} expected {}", p.x, x);
        assert!((p.y - y).abs() < 1e-9, "y = {} expected {}", p.y, y);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_reference_markers() {
        let costmap = build_costmap(&GridConfig::default()).unwrap();
        let marker = build_markers(&MarkerConfig::default(), &costmap).unwrap();

        assert_eq!(marker.header.frame_id, "map");
        assert_eq!(marker.marker_type, MarkerType::Points);
        assert_eq!(marker.action, MarkerAction::Add);
        assert_eq!(marker.id, 0);
        assert_eq!(marker.pose.orientation.w, 1.0);
        assert_eq!(marker.scale.x, 0.2);
        assert_eq!(marker.scale.y, 0.2);
        assert_eq!(marker.color, ColorRGBA::new(0.0, 1.0, 0.0, 1.0));

        assert_eq!(marker.points.len(), 2);
        assert_point_near(&marker.points[0], 5.0 * 0.3 + 0.15, 2.0 * 0.3 + 0.15);
        assert_point_near(&marker.points[1], 1.65, 3.75);
    }

    #[test]
    fn test_marker_outside_grid_is_rejected() {
        let costmap = build_costmap(&GridConfig::default()).unwrap();
        let config = MarkerConfig {
            goal: [5, 15],
            ..Default::default()
        };
        assert!(matches!(
            build_markers(&config, &costmap),
            Err(NodeError::InvalidConfig(_))
        ));
    }
}
