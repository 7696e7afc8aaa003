//! Harvester - collection route planning for a mobile agent
//!
//! This library plans how an agent should drive across a bounded 2D field to
//! collect scattered targets: connectivity clustering, greedy ordering, 2-opt
//! refinement, intake-aware waypoint pruning and Catmull-Rom smoothing, plus a
//! headless session that executes and replans those routes.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod core;
pub mod navigation;
pub mod simulation;

// Re-export commonly used items for easier access
pub use crate::core::{FieldConfig, Point, path_length};
pub use navigation::{
    CollectionPlanner, PathPlanner, Plan, PlanResult, PlannerConfig, PlanningMode, SelectionStrategy,
    SweepResult, plan_local, plan_sweep,
};
pub use simulation::{Session, SessionConfig, SessionStatus};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Harvester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Planner tuning
    pub planner: PlannerConfig,
    /// Field and agent geometry
    pub field: FieldConfig,
    /// Execution loop settings
    pub session: SessionConfig,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        let field = FieldConfig::default();
        HarvestConfig {
            planner: PlannerConfig {
                capture_half_width: field.capture_half_width(),
                ..PlannerConfig::default()
            },
            field,
            session: SessionConfig::default(),
        }
    }
}

impl HarvestConfig {
    /// Load and validate a YAML configuration file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, HarvestError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| HarvestError::ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&data)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a YAML configuration document
    pub fn from_yaml_str(data: &str) -> Result<Self, HarvestError> {
        let config: HarvestConfig = serde_yaml::from_str(data)
            .map_err(|e| HarvestError::ConfigError(format!("failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for values the planner or session cannot use
    pub fn validate(&self) -> Result<(), HarvestError> {
        self.planner.validate()?;

        navigation::positive("field.length", self.field.length)?;
        navigation::positive("field.width", self.field.width)?;
        navigation::positive("field.intake_width", self.field.intake_width)?;

        self.session.validate()?;

        // Pruning and collection must agree on how far the intake reaches.
        if (self.planner.capture_half_width - self.field.capture_half_width()).abs() > 1e-9 {
            return Err(HarvestError::InvalidParameter(format!(
                "planner.capture_half_width ({}) must equal half of field.intake_width ({})",
                self.planner.capture_half_width,
                self.field.capture_half_width()
            )));
        }
        Ok(())
    }
}

/// Harvester error types
#[derive(Debug)]
pub enum HarvestError {
    /// Configuration could not be read or parsed
    ConfigError(String),
    /// A parameter is outside its valid range
    InvalidParameter(String),
}

impl std::fmt::Display for HarvestError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HarvestError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            HarvestError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for HarvestError {}
