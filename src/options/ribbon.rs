use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Glowing ribbon of lights draped around the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Ribbon", inline)]
#[serde(default)]
pub struct RibbonOptions {
    /// Number of bulbs sampled along the ribbon path.
    #[schemars(title = "Light Count", range(min = 1, max = 4000))]
    pub light_count: u32,
    /// Number of turns around the tree.
    #[schemars(title = "Turns", range(min = 1, max = 20))]
    pub turns: u32,
    /// Number of control-point spans used to build the curve.
    #[schemars(skip)]
    pub control_spans: u32,
    /// Clearance added to the cone radius so bulbs sit outside the foliage.
    #[schemars(title = "Radial Offset", range(min = 0.0, max = 5.0))]
    pub radial_offset: f32,
    /// Amplitude of the sinusoidal drape along the ribbon.
    #[schemars(skip)]
    pub drape: f32,
    /// Fraction of the ribbon over which the leading tip fades in.
    #[schemars(skip)]
    pub tip_fraction: f32,
    /// Twinkle angular speed (rad/s).
    #[schemars(title = "Twinkle Speed", range(min = 0.0, max = 20.0))]
    pub twinkle_speed: f32,
    /// Twinkle phase offset per bulb index.
    #[schemars(skip)]
    pub twinkle_phase: f32,
    /// Bulb scale multiplier once revealed.
    #[schemars(skip)]
    pub bulb_scale: f32,
    /// Reveal rate while assembling, relative to the animation speed.
    #[schemars(skip)]
    pub reveal_rate: f32,
    /// Retract rate while scattering, relative to the animation speed.
    #[schemars(skip)]
    pub retract_rate: f32,
    /// Expansion rate, relative to the animation speed.
    #[schemars(skip)]
    pub expansion_rate: f32,
    /// Radial expansion factor reached while scattered.
    #[schemars(title = "Scattered Expansion", range(min = 1.0, max = 10.0))]
    pub scattered_expansion: f32,
    /// Ribbon spin (rad/s) while assembled.
    #[schemars(skip)]
    pub assembled_spin: f32,
    /// Ribbon spin (rad/s) while scattered.
    #[schemars(skip)]
    pub scattered_spin: f32,
}

impl Default for RibbonOptions {
    fn default() -> Self {
        Self {
            light_count: 400,
            turns: 5,
            control_spans: 100,
            radial_offset: 1.2,
            drape: 0.25,
            tip_fraction: 0.05,
            twinkle_speed: 2.5,
            twinkle_phase: 0.15,
            bulb_scale: 1.2,
            reveal_rate: 0.4,
            retract_rate: 0.8,
            expansion_rate: 0.5,
            scattered_expansion: 3.0,
            assembled_spin: 0.08,
            scattered_spin: -0.05,
        }
    }
}
