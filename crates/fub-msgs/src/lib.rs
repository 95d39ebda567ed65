#![warn(missing_docs)]
#![doc = "Message types published by the grid node."]
#![doc = ""]
#![doc = "The layouts follow the common robotics message definitions so that the"]
#![doc = "grid and marker topics carry what a map viewer expects."]

pub mod geometry_msgs;
pub mod nav_msgs;
pub mod std_msgs;
pub mod visualization_msgs;

pub use geometry_msgs::{Point, Pose, Quaternion, Vector3};
pub use nav_msgs::{MapMetaData, OccupancyGrid};
pub use std_msgs::{ColorRGBA, Header, Time};
pub use visualization_msgs::{Marker, MarkerAction, MarkerType};
