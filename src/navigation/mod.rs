//! Collection route planning for Harvester
//!
//! This module turns the current set of uncollected targets and the agent
//! position into a smooth, drivable path. The pipeline is:
//! clustering -> selection -> nearest-neighbor ordering -> 2-opt refinement ->
//! intake-aware pruning -> Catmull-Rom smoothing.
//!
//! Every call is a pure function of its arguments; nothing is cached between
//! calls.

pub mod cluster;
pub mod prune;
pub mod smoother;
pub mod tour;

pub use cluster::{ClusterSelection, ScoredCluster, find_all_clusters, find_nearest_cluster, score_cluster, select_best_cluster};
pub use prune::prune_waypoints;
pub use smoother::smooth_path;
pub use tour::{nearest_neighbor_order, two_opt_improve};

use serde::{Deserialize, Serialize};

use crate::HarvestError;
use crate::core::{Point, path_length};

/// How the local-cluster planner picks the cluster to service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Partition everything and take the highest `size / (distance + bias)`
    BestScore,
    /// Grow a single cluster from the target nearest the agent
    Nearest,
}

/// Which pipeline a planning call runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningMode {
    /// Service one cluster at a time, no 2-opt
    LocalCluster,
    /// Order every target, refine with 2-opt
    FullSweep,
}

/// Planner tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Maximum hop between two targets of the same cluster
    pub cluster_radius: f64,
    /// Added to the cluster distance when scoring
    pub distance_bias: f64,
    /// Interpolated points per waypoint segment
    pub interpolation_density: usize,
    /// Half-width of the capture zone used for pruning
    pub capture_half_width: f64,
    /// Cluster choice in local-cluster mode
    pub selection: SelectionStrategy,
    /// Upper bound on 2-opt sweeps; `None` runs to the fixed point
    pub max_two_opt_sweeps: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            cluster_radius: 1.5,
            distance_bias: 0.5,
            interpolation_density: 20,
            capture_half_width: 0.45,
            selection: SelectionStrategy::BestScore,
            max_two_opt_sweeps: None,
        }
    }
}

impl PlannerConfig {
    /// Rejects parameters the pipeline cannot work with
    pub fn validate(&self) -> Result<(), HarvestError> {
        positive("cluster_radius", self.cluster_radius)?;
        positive("distance_bias", self.distance_bias)?;
        positive("capture_half_width", self.capture_half_width)?;
        if self.interpolation_density == 0 {
            return Err(HarvestError::InvalidParameter(
                "interpolation_density must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn positive(name: &str, value: f64) -> Result<(), HarvestError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HarvestError::InvalidParameter(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )))
    }
}

pub(crate) fn non_negative(name: &str, value: f64) -> Result<(), HarvestError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HarvestError::InvalidParameter(format!(
            "{} must be a non-negative finite number, got {}",
            name, value
        )))
    }
}

/// Result of a local-cluster plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// Targets in the serviced cluster
    pub cluster: Vec<Point>,
    /// Agent position followed by the pruned visiting order
    pub waypoints: Vec<Point>,
    /// Smoothed path through `waypoints`
    pub path: Vec<Point>,
    /// Length of `path`
    pub distance: f64,
    /// Waypoints before pruning (agent position included)
    pub total_waypoints: usize,
    /// Waypoints removed by pruning
    pub pruned_waypoints: usize,
    /// Score of the serviced cluster
    pub cluster_score: f64,
    /// Distance from the agent to the nearest cluster member
    pub cluster_min_distance: f64,
    /// Number of targets in the cluster
    pub cluster_size: usize,
    /// Clusters in the full partition, `None` when only the nearest cluster was grown
    pub num_clusters: Option<usize>,
}

/// Result of a full-sweep plan, with the unrefined ordering kept for comparison
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    /// Every target the sweep covers
    pub targets: Vec<Point>,
    /// Pruned nearest-neighbor waypoints
    pub nn_waypoints: Vec<Point>,
    /// Smoothed nearest-neighbor path
    pub nn_path: Vec<Point>,
    /// Length of `nn_path`
    pub nn_distance: f64,
    /// Pruned 2-opt waypoints
    pub opt_waypoints: Vec<Point>,
    /// Smoothed 2-opt path; this is the one to drive
    pub opt_path: Vec<Point>,
    /// Length of `opt_path`
    pub opt_distance: f64,
    /// `(nn - opt) / nn * 100`, 0 when the nearest-neighbor path has no length
    pub improvement_pct: f64,
    /// Waypoints before pruning (agent position included)
    pub total_waypoints: usize,
    /// Waypoints removed from the 2-opt ordering by pruning
    pub pruned_waypoints: usize,
}

/// Either kind of plan
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Local-cluster plan
    Local(PlanResult),
    /// Full-sweep plan
    Sweep(SweepResult),
}

impl Plan {
    /// The path the agent should follow
    pub fn path(&self) -> &[Point] {
        match self {
            Plan::Local(p) => &p.path,
            Plan::Sweep(s) => &s.opt_path,
        }
    }

    /// Length of the path to follow
    pub fn distance(&self) -> f64 {
        match self {
            Plan::Local(p) => p.distance,
            Plan::Sweep(s) => s.opt_distance,
        }
    }

    /// Targets this plan was built to collect
    pub fn targets(&self) -> &[Point] {
        match self {
            Plan::Local(p) => &p.cluster,
            Plan::Sweep(s) => &s.targets,
        }
    }

    /// Mode that produced the plan
    pub fn mode(&self) -> PlanningMode {
        match self {
            Plan::Local(_) => PlanningMode::LocalCluster,
            Plan::Sweep(_) => PlanningMode::FullSweep,
        }
    }
}

/// Anything that can plan a collection route from the current situation
pub trait PathPlanner {
    /// Plans in `mode` from `position` over `targets`; `None` when there is nothing to collect
    fn plan(&self, mode: PlanningMode, targets: &[Point], position: &Point) -> Option<Plan>;
}

/// The standard planning pipeline
#[derive(Debug, Clone)]
pub struct CollectionPlanner {
    config: PlannerConfig,
}

impl CollectionPlanner {
    /// Create a planner after validating `config`
    pub fn new(config: PlannerConfig) -> Result<Self, HarvestError> {
        config.validate()?;
        Ok(CollectionPlanner { config })
    }

    /// Plan a route through a single cluster
    pub fn plan_local(&self, targets: &[Point], position: &Point) -> Option<PlanResult> {
        if targets.is_empty() {
            return None;
        }

        let cfg = &self.config;
        let (scored, num_clusters) = match cfg.selection {
            SelectionStrategy::BestScore => {
                let clusters = find_all_clusters(targets, cfg.cluster_radius);
                let selection = select_best_cluster(&clusters, position, cfg.distance_bias)?;
                (selection.cluster, Some(selection.num_clusters))
            }
            SelectionStrategy::Nearest => {
                let cluster = find_nearest_cluster(targets, position, cfg.cluster_radius);
                (score_cluster(&cluster, position, cfg.distance_bias)?, None)
            }
        };

        let waypoints = with_start(position, nearest_neighbor_order(&scored.points, position));
        let total_waypoints = waypoints.len();
        let waypoints = prune_waypoints(&waypoints, cfg.capture_half_width);
        let path = smooth_path(&waypoints, cfg.interpolation_density);
        let distance = path_length(&path);

        log::info!(
            "Local plan: cluster of {} ({:.2} m away, score {:.2}), {}/{} waypoints, {:.2} m",
            scored.size(),
            scored.min_distance,
            scored.score,
            waypoints.len(),
            total_waypoints,
            distance
        );

        Some(PlanResult {
            cluster_size: scored.size(),
            cluster_score: scored.score,
            cluster_min_distance: scored.min_distance,
            cluster: scored.points,
            pruned_waypoints: total_waypoints - waypoints.len(),
            total_waypoints,
            waypoints,
            path,
            distance,
            num_clusters,
        })
    }

    /// Plan a route through every target, comparing plain and 2-opt orderings
    pub fn plan_sweep(&self, targets: &[Point], position: &Point) -> Option<SweepResult> {
        if targets.is_empty() {
            return None;
        }

        let cfg = &self.config;
        let nn_order = with_start(position, nearest_neighbor_order(targets, position));
        let total_waypoints = nn_order.len();
        let opt_order = two_opt_improve(&nn_order, cfg.max_two_opt_sweeps);

        let nn_waypoints = prune_waypoints(&nn_order, cfg.capture_half_width);
        let opt_waypoints = prune_waypoints(&opt_order, cfg.capture_half_width);

        let nn_path = smooth_path(&nn_waypoints, cfg.interpolation_density);
        let nn_distance = path_length(&nn_path);
        let opt_path = smooth_path(&opt_waypoints, cfg.interpolation_density);
        let opt_distance = path_length(&opt_path);

        let improvement_pct = if nn_distance > 0.0 {
            (nn_distance - opt_distance) / nn_distance * 100.0
        } else {
            0.0
        };

        log::info!(
            "Sweep plan: {} targets, NN {:.2} m, 2-opt {:.2} m ({:.1}% better)",
            targets.len(),
            nn_distance,
            opt_distance,
            improvement_pct
        );

        Some(SweepResult {
            targets: targets.to_vec(),
            pruned_waypoints: total_waypoints - opt_waypoints.len(),
            total_waypoints,
            nn_waypoints,
            nn_path,
            nn_distance,
            opt_waypoints,
            opt_path,
            opt_distance,
            improvement_pct,
        })
    }
}

impl PathPlanner for CollectionPlanner {
    fn plan(&self, mode: PlanningMode, targets: &[Point], position: &Point) -> Option<Plan> {
        match mode {
            PlanningMode::LocalCluster => self.plan_local(targets, position).map(Plan::Local),
            PlanningMode::FullSweep => self.plan_sweep(targets, position).map(Plan::Sweep),
        }
    }
}

/// Prepends the agent position to an ordering.
fn with_start(position: &Point, ordered: Vec<Point>) -> Vec<Point> {
    let mut tour = Vec::with_capacity(ordered.len() + 1);
    tour.push(*position);
    tour.extend(ordered);
    tour
}

/// Plan a single-cluster route with default tuning and the given cluster radius.
///
/// Returns `None` when `targets` is empty or `cluster_radius` is not positive.
pub fn plan_local(targets: &[Point], position: &Point, cluster_radius: f64) -> Option<PlanResult> {
    let config = PlannerConfig {
        cluster_radius,
        ..PlannerConfig::default()
    };
    match CollectionPlanner::new(config) {
        Ok(planner) => planner.plan_local(targets, position),
        Err(e) => {
            log::warn!("Refusing to plan: {}", e);
            None
        }
    }
}

/// Plan a full sweep with default tuning.
pub fn plan_sweep(targets: &[Point], position: &Point) -> Option<SweepResult> {
    CollectionPlanner {
        config: PlannerConfig::default(),
    }
    .plan_sweep(targets, position)
}
