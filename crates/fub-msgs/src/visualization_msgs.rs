//! Visualization markers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry_msgs::{Point, Pose, Vector3};
use crate::std_msgs::{ColorRGBA, Header};

/// Primitive drawn by a [`Marker`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum MarkerType {
    /// Single arrow.
    #[default]
    Arrow = 0,
    /// Single cube.
    Cube = 1,
    /// Single sphere.
    Sphere = 2,
    /// Single cylinder.
    Cylinder = 3,
    /// Connected line segments through `points`.
    LineStrip = 4,
    /// Pairs of `points` drawn as separate segments.
    LineList = 5,
    /// One cube per entry in `points`.
    CubeList = 6,
    /// One sphere per entry in `points`.
    SphereList = 7,
    /// One screen-aligned square per entry in `points`.
    Points = 8,
}

/// What a consumer should do with a [`Marker`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum MarkerAction {
    /// Add or replace the marker with the same namespace and id.
    #[default]
    Add = 0,
    /// Remove the marker with the same namespace and id.
    Delete = 2,
    /// Remove every marker.
    DeleteAll = 3,
}

/// A renderable set of geometric primitives.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Marker {
    /// Frame and stamp.
    pub header: Header,
    /// Namespace, combined with `id` to identify the marker.
    pub ns: String,
    /// Identifier inside `ns`.
    pub id: i32,
    /// Primitive type.
    pub marker_type: MarkerType,
    /// Add/delete action.
    pub action: MarkerAction,
    /// Pose of the marker frame.
    pub pose: Pose,
    /// Scale; for points, x and y are the point width and height.
    pub scale: Vector3,
    /// Color shared by all primitives.
    pub color: ColorRGBA,
    /// How long the marker stays visible, in seconds. Zero means forever.
    pub lifetime_secs: f64,
    /// Re-transform the marker into its frame every render.
    pub frame_locked: bool,
    /// Points for list-type markers.
    pub points: Vec<Point>,
}
