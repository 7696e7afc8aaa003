// core/mod.rs

// Value types shared by the planner and the session: field points, distance
// helpers and the field/agent geometry constants.

pub mod field;
pub mod geometry;

pub use field::FieldConfig;
pub use geometry::{Point, distance, path_length, point_to_segment_distance};
