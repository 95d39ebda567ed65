//! Demonstration grid node.
//!
//! Builds a small static occupancy grid, announces it once on a latched topic
//! and republishes a start/goal points marker at a fixed rate until shutdown.

pub mod bus;
pub mod config;
pub mod error;
pub mod executor;
pub mod markers;
pub mod node;
pub mod publisher;
pub mod shutdown;

pub use bus::{Publish, Topic, TransportError};
pub use config::NodeConfig;
pub use error::{NodeError, Result};
pub use node::{GridNode, LoopReport, RunningNode};
pub use shutdown::ShutdownToken;
