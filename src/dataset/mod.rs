//! Startup-time data: per-instance targets, palette, ribbon path.
//!
//! Everything here runs once when the scene is built. The outputs are
//! fixed arrays that the motion models read but never modify.

pub mod curve;
pub mod generator;
pub mod palette;

pub use curve::{build_ribbon_path, ribbon_control_points, CurvePath};
pub use generator::{generate, sphere_point, InstanceDataset, TreeShape};
pub use palette::{linear_rgba, Palette};
