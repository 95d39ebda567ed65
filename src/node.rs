//! The grid node: one-shot grid announcement followed by the marker loop.
//!
//! The node moves through its states by value. [`GridNode`] is the
//! initializing node, [`GridNode::initialize`] builds the grid, publishes it
//! once and returns a [`RunningNode`], and [`RunningNode::spin`] ticks until
//! shutdown and hands back a [`LoopReport`] for the stopped node. There is no
//! way back to initialization.

use fub_costmap::CostMap2D;
use fub_msgs::{Marker, OccupancyGrid};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::bus::{Publish, Topic};
use crate::config::NodeConfig;
use crate::error::Result;
use crate::executor::{CallbackHandle, Executor};
use crate::markers::build_markers;
use crate::publisher::{GridPublisher, build_costmap};
use crate::shutdown::ShutdownToken;

/// What the marker loop did before it stopped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub ticks: u64,
    pub published: u64,
    pub failed: u64,
    /// Inbound callbacks run, including the final drain.
    pub callbacks: usize,
}

/// Republishes one fixed marker every tick until shutdown.
pub struct MarkerLoop<P> {
    marker: Arc<Marker>,
    publisher: P,
    period: Duration,
    executor: Executor,
}

impl<P: Publish<Marker>> MarkerLoop<P> {
    pub fn new(marker: Marker, publisher: P, period: Duration, executor: Executor) -> Self {
        Self {
            marker: Arc::new(marker),
            publisher,
            period,
            executor,
        }
    }

    pub fn marker(&self) -> &Arc<Marker> {
        &self.marker
    }

    /// Ticks every `period`, first tick immediately. Each tick checks
    /// `shutdown`, services queued callbacks, then publishes the marker.
    /// A failed publish is logged and the loop carries on.
    pub async fn run(mut self, shutdown: &ShutdownToken) -> LoopReport {
        let mut report = LoopReport::default();
        let mut ticker = time::interval(self.period);
        // A stalled tick delays the schedule instead of bursting to catch up.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            topic = self.publisher.topic_name(),
            period = ?self.period,
            "Marker loop started."
        );

        loop {
            ticker.tick().await;
            if shutdown.is_triggered() {
                break;
            }

            report.callbacks += self.executor.spin_once();
            match self.publisher.publish_shared(Arc::clone(&self.marker)) {
                Ok(subscribers) => {
                    report.published += 1;
                    debug!(tick = report.ticks, subscribers, "Published markers");
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(tick = report.ticks, "Failed to publish markers: {}", e);
                }
            }
            report.ticks += 1;
        }

        report.callbacks += self.executor.shutdown();
        info!(
            ticks = report.ticks,
            published = report.published,
            failed = report.failed,
            "Marker loop stopped."
        );
        report
    }
}

/// A node that has not published anything yet.
pub struct GridNode {
    config: NodeConfig,
    grid_topic: Topic<OccupancyGrid>,
    marker_topic: Topic<Marker>,
    executor: Executor,
}

impl GridNode {
    pub fn new(config: NodeConfig) -> Self {
        let grid_topic = Topic::latched(config.grid.topic.as_str(), 1);
        let marker_topic = Topic::new(config.markers.topic.as_str(), config.markers.queue_size);
        Self {
            config,
            grid_topic,
            marker_topic,
            executor: Executor::new(),
        }
    }

    pub fn grid_topic(&self) -> &Topic<OccupancyGrid> {
        &self.grid_topic
    }

    pub fn marker_topic(&self) -> &Topic<Marker> {
        &self.marker_topic
    }

    /// Handle for queueing work onto the node's tick loop.
    pub fn callbacks(&self) -> CallbackHandle {
        self.executor.handle()
    }

    /// Builds the grid, publishes it once, and builds the marker.
    pub fn initialize(self) -> Result<RunningNode> {
        let GridNode {
            config,
            grid_topic,
            marker_topic,
            executor,
        } = self;
        info!(node = %config.node.name, "Initializing grid node.");
        let period = config.tick_period();

        let costmap = build_costmap(&config.grid)?;
        GridPublisher::new(grid_topic.clone(), config.grid.frame_id.as_str()).publish(&costmap)?;

        let marker = build_markers(&config.markers, &costmap)?;
        info!(points = ?marker.points, "Built start/goal markers");

        Ok(RunningNode {
            name: config.node.name,
            costmap,
            grid_topic,
            marker_topic: marker_topic.clone(),
            marker_loop: MarkerLoop::new(marker, marker_topic, period, executor),
        })
    }
}

/// A node whose grid has been announced.
pub struct RunningNode {
    name: String,
    costmap: CostMap2D,
    grid_topic: Topic<OccupancyGrid>,
    marker_topic: Topic<Marker>,
    marker_loop: MarkerLoop<Topic<Marker>>,
}

impl RunningNode {
    pub fn costmap(&self) -> &CostMap2D {
        &self.costmap
    }

    pub fn marker(&self) -> &Arc<Marker> {
        self.marker_loop.marker()
    }

    /// Runs the marker loop until `shutdown` is observed, then closes both topics.
    pub async fn spin(self, shutdown: &ShutdownToken) -> LoopReport {
        info!(node = %self.name, "Grid node running.");
        let report = self.marker_loop.run(shutdown).await;
        self.marker_topic.close();
        self.grid_topic.close();
        info!(node = %self.name, "Grid node stopped.");
        report
    }
}
