// core/field.rs

// Field and agent geometry in meters. The planner only consumes the intake
// half-width from here; the session uses the field extents to place the agent.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Field dimensions and agent footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Field extent along x
    pub length: f64,
    /// Field extent along y
    pub width: f64,
    /// Half side of the (square) agent body
    pub agent_radius: f64,
    /// Radius of a single target
    pub target_radius: f64,
    /// Full width of the capture zone at the agent's leading edge
    pub intake_width: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            length: 16.5,
            width: 8.1,
            agent_radius: 0.45,
            target_radius: 0.12,
            intake_width: 0.9,
        }
    }
}

impl FieldConfig {
    /// Half of the intake width: how far off the travel line a target is still captured.
    pub fn capture_half_width(&self) -> f64 {
        self.intake_width / 2.0
    }

    /// Default starting position: near the left wall, centered vertically.
    pub fn home_position(&self) -> Point {
        Point::new(1.0, self.width / 2.0)
    }

    /// Whether `p` lies inside the field rectangle.
    pub fn contains(&self, p: &Point) -> bool {
        (0.0..=self.length).contains(&p.x) && (0.0..=self.width).contains(&p.y)
    }
}
