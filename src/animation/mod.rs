//! Per-frame motion models for the instance groups.
//!
//! Every group is driven by one [`InstanceMotion`] implementation. The
//! scene calls it once per frame with the group's buffer; the model writes
//! the instances it moved and keeps no reference to the buffer.

pub mod ambient;
pub mod interpolation;
pub mod ribbon;
pub mod targeted;
pub mod topper;
pub mod traits;

pub use ambient::{AmbientMotion, FloatParams};
pub use ribbon::{RevealState, RibbonMotion};
pub use targeted::{MotionPhase, MotionProfile, TargetedMotion};
pub use topper::TopperMotion;
pub use traits::{FrameContext, InstanceMotion};
