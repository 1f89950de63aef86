use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ambient floating sparkles around the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Particles", inline)]
#[serde(default)]
pub struct ParticleOptions {
    /// Number of ambient particles.
    #[schemars(title = "Count", range(min = 0, max = 5000))]
    pub count: u32,
    /// Half-extent of the per-axis drift amplitude.
    #[schemars(skip)]
    pub spread: f32,
    /// Amplitude of the shared slow sway added to every particle.
    #[schemars(skip)]
    pub sway: f32,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 500,
            spread: 50.0,
            sway: 5.0,
        }
    }
}
