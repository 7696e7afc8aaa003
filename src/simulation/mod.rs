//! Headless collection session
//!
//! Owns the mutable side of a run: agent pose, remaining targets, the current
//! plan and the status machine. The agent moves at constant speed along the
//! planned path, collects targets that come within reach of the intake, and
//! asks the planner for a new route whenever the old one runs out.

pub mod state;

pub use state::SessionStatus;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::HarvestError;
use crate::core::{FieldConfig, Point, distance};
use crate::navigation::{PathPlanner, Plan, PlanningMode, non_negative, positive};

/// Minimum step length used to derive a heading.
const HEADING_EPSILON: f64 = 1e-6;

/// Execution loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Constant travel speed (m/s)
    pub speed: f64,
    /// Extra reach beyond the intake half-width when collecting
    pub collection_margin: f64,
    /// How close a removal request must be to a target
    pub remove_radius: f64,
    /// Seconds a fresh full-sweep plan is held before driving
    pub comparison_pause: f64,
    /// Starting position; the field's home position when unset
    pub start_position: Option<Point>,
    /// Planning mode used on start
    pub mode: PlanningMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            speed: 3.5,
            collection_margin: 0.05,
            remove_radius: 0.5,
            comparison_pause: 2.0,
            start_position: None,
            mode: PlanningMode::LocalCluster,
        }
    }
}

impl SessionConfig {
    /// Rejects settings the execution loop cannot run with
    pub fn validate(&self) -> Result<(), HarvestError> {
        positive("session.speed", self.speed)?;
        positive("session.remove_radius", self.remove_radius)?;
        non_negative("session.collection_margin", self.collection_margin)?;
        non_negative("session.comparison_pause", self.comparison_pause)?;
        Ok(())
    }
}

/// A single collection run driven by an external clock
pub struct Session<P: PathPlanner> {
    planner: P,
    config: SessionConfig,
    field: FieldConfig,
    position: Point,
    heading: f64,
    targets: Vec<Point>,
    mode: PlanningMode,
    status: SessionStatus,
    paused: bool,
    plan: Option<Plan>,
    path_idx: usize,
    trail: Vec<Point>,
    replan_count: u32,
    collected: usize,
    comparison_timer: f64,
}

impl<P: PathPlanner> Session<P> {
    /// Creates an idle session at the configured start position
    pub fn new(planner: P, config: SessionConfig, field: FieldConfig) -> Result<Self, HarvestError> {
        config.validate()?;
        let position = config.start_position.unwrap_or_else(|| field.home_position());
        let mode = config.mode;

        Ok(Session {
            planner,
            config,
            field,
            position,
            heading: 0.0,
            targets: Vec::new(),
            mode,
            status: SessionStatus::Idle,
            paused: false,
            plan: None,
            path_idx: 0,
            trail: Vec::new(),
            replan_count: 0,
            collected: 0,
            comparison_timer: 0.0,
        })
    }

    /// Current agent position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current heading in radians
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Targets still on the field
    pub fn targets(&self) -> &[Point] {
        &self.targets
    }

    /// Current status
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Current planning mode
    pub fn mode(&self) -> PlanningMode {
        self.mode
    }

    /// Plan being executed, if any
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Positions visited since the last fresh plan
    pub fn trail(&self) -> &[Point] {
        &self.trail
    }

    /// Number of replans since the last reset
    pub fn replan_count(&self) -> u32 {
        self.replan_count
    }

    /// Targets collected since the last reset
    pub fn collected(&self) -> usize {
        self.collected
    }

    /// Whether stepping is suspended
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Places a target. Targets outside the field are ignored.
    ///
    /// Adding a target while executing triggers a replan.
    pub fn add_target(&mut self, target: Point) -> bool {
        if !self.field.contains(&target) {
            warn!("Ignoring target outside the field at ({:.2}, {:.2})", target.x, target.y);
            return false;
        }
        self.targets.push(target);
        if self.status == SessionStatus::Executing {
            self.replan();
        }
        true
    }

    /// Removes the target nearest to `near` if it lies within the remove radius
    pub fn remove_nearest_target(&mut self, near: &Point) -> Option<Point> {
        let (idx, d) = self
            .targets
            .iter()
            .enumerate()
            .map(|(i, t)| (i, distance(t, near)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        if d < self.config.remove_radius {
            Some(self.targets.remove(idx))
        } else {
            None
        }
    }

    /// Switches planning mode. A finished plan is dropped so the next start uses the new mode.
    pub fn set_mode(&mut self, mode: PlanningMode) {
        self.mode = mode;
        if self.status.can_start() {
            self.plan = None;
        }
    }

    /// Suspends or resumes stepping
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("Session {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Clears targets and plan and returns the agent home
    pub fn reset(&mut self) {
        self.position = self.config.start_position.unwrap_or_else(|| self.field.home_position());
        self.heading = 0.0;
        self.targets.clear();
        self.mode = self.config.mode;
        self.paused = false;
        self.plan = None;
        self.path_idx = 0;
        self.trail.clear();
        self.replan_count = 0;
        self.collected = 0;
        self.comparison_timer = 0.0;
        self.set_status(SessionStatus::Idle);
    }

    /// Plans from the current position and starts executing.
    ///
    /// Only accepted while idle or done.
    pub fn start(&mut self) {
        if !self.status.can_start() {
            debug!("Start ignored while {}", self.status);
            return;
        }
        self.set_status(SessionStatus::Planning);

        let Some(plan) = self.request_plan() else {
            return;
        };
        let mode = plan.mode();
        self.trail = vec![self.position];
        self.install(plan);

        if mode == PlanningMode::FullSweep && self.config.comparison_pause > 0.0 {
            self.comparison_timer = self.config.comparison_pause;
            self.set_status(SessionStatus::Comparing);
        } else {
            self.set_status(SessionStatus::Executing);
        }
    }

    /// Plans again from the current position and keeps executing, without a comparison pause
    pub fn replan(&mut self) {
        let Some(plan) = self.request_plan() else {
            return;
        };
        self.install(plan);
        self.replan_count += 1;
        self.set_status(SessionStatus::Executing);
    }

    /// Advances the session by `dt` seconds
    pub fn step(&mut self, dt: f64) {
        if self.paused || !self.status.is_active() {
            return;
        }

        if self.status == SessionStatus::Comparing {
            self.comparison_timer -= dt;
            if self.comparison_timer <= 0.0 {
                self.set_status(SessionStatus::Executing);
            }
            return;
        }

        let path: Vec<Point> = match &self.plan {
            Some(plan) => plan.path().to_vec(),
            None => return,
        };
        if self.path_idx + 1 >= path.len() {
            self.set_status(SessionStatus::Done);
            return;
        }

        let mut budget = self.config.speed * dt;
        while budget > 0.0 && self.path_idx + 1 < path.len() {
            let target = path[self.path_idx + 1];
            let to_target = target - self.position;
            let d = to_target.norm();

            if d <= budget {
                self.position = target;
                budget -= d;
                self.path_idx += 1;
            } else {
                self.position += to_target * (budget / d);
                budget = 0.0;
            }
        }

        if self.path_idx + 1 < path.len() {
            self.face(&path[self.path_idx + 1]);
        }
        self.trail.push(self.position);
        self.collect();

        if self.path_idx + 1 >= path.len() {
            if self.targets.is_empty() {
                self.set_status(SessionStatus::Done);
            } else {
                self.replan();
            }
        }
    }

    /// Asks the planner for a route. Leaves the session done when there is nothing to plan.
    fn request_plan(&mut self) -> Option<Plan> {
        if self.targets.is_empty() {
            self.finish();
            return None;
        }
        let plan = self.planner.plan(self.mode, &self.targets, &self.position);
        if plan.is_none() {
            warn!("Planner returned no plan for {} targets", self.targets.len());
            self.finish();
        }
        plan
    }

    fn install(&mut self, plan: Plan) {
        self.path_idx = 0;
        if let Some(next) = plan.path().get(1).copied() {
            self.face(&next);
        }
        self.plan = Some(plan);
    }

    fn finish(&mut self) {
        self.plan = None;
        self.set_status(SessionStatus::Done);
    }

    fn face(&mut self, toward: &Point) {
        let d = *toward - self.position;
        if d.norm() > HEADING_EPSILON {
            self.heading = d.y.atan2(d.x);
        }
    }

    /// Removes every target within reach of the intake.
    fn collect(&mut self) {
        let reach = self.field.capture_half_width() + self.config.collection_margin;
        let position = self.position;
        let before = self.targets.len();
        self.targets.retain(|t| distance(t, &position) >= reach);

        let taken = before - self.targets.len();
        if taken > 0 {
            self.collected += taken;
            debug!("Collected {} target(s), {} remaining", taken, self.targets.len());
        }
    }

    fn set_status(&mut self, next: SessionStatus) {
        if self.status != next {
            info!("Session {} -> {}", self.status, next);
            self.status = next;
        }
    }
}
