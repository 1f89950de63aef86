use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Speeds and swirl profile shared by the targeted decoration groups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
pub struct MotionOptions {
    /// Base lerp rate (per second) toward the current target.
    #[schemars(title = "Animation Speed", range(min = 0.05, max = 10.0))]
    pub animation_speed: f32,
    /// Swirl multiplier while gathering into the tree.
    #[schemars(title = "Assemble Swirl", range(min = 0.0, max = 10.0))]
    pub assemble_swirl: f32,
    /// Swirl multiplier while flying apart.
    #[schemars(title = "Scatter Swirl", range(min = 0.0, max = 10.0))]
    pub scatter_swirl: f32,
    /// Scale from `speed * delta` to swirl angle in radians.
    #[schemars(skip)]
    pub swirl_rate: f32,
    /// Topper lerp rate relative to `animation_speed`.
    #[schemars(skip)]
    pub topper_speed_factor: f32,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            animation_speed: 1.1,
            assemble_swirl: 3.0,
            scatter_swirl: 0.5,
            swirl_rate: 0.1,
            topper_speed_factor: 0.9,
        }
    }
}
