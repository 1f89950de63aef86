use serde::{Deserialize, Serialize};

/// Bright festive gold.
pub const GOLD: [f32; 3] = [1.0, 0.843, 0.0];
/// Rich metallic gold.
pub const METALLIC_GOLD: [f32; 3] = [0.831, 0.686, 0.216];
/// Vibrant red.
pub const CHRISTMAS_RED: [f32; 3] = [0.902, 0.0, 0.137];
/// Deep dark red.
pub const CRIMSON: [f32; 3] = [0.545, 0.0, 0.0];
/// Deep classic tree green.
pub const FOREST_GREEN: [f32; 3] = [0.059, 0.318, 0.196];
/// Dark pine green.
pub const PINE: [f32; 3] = [0.004, 0.267, 0.129];
/// Bright silver.
pub const SILVER: [f32; 3] = [0.898, 0.906, 0.922];
/// Pure white.
pub const SNOW_WHITE: [f32; 3] = [1.0, 1.0, 1.0];
/// Warm white.
pub const WARM_WHITE: [f32; 3] = [1.0, 0.961, 0.882];

/// Instance color palette (sRGB triples).
///
/// Entries may repeat: a color listed twice is picked twice as often.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Weighted palette for decoration instances.
    pub palette: Vec<[f32; 3]>,
    /// Ribbon bulb color.
    pub ribbon_bulb: [f32; 3],
    /// Ambient particle color.
    pub particle: [f32; 3],
    /// Tree topper color.
    pub topper: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            palette: vec![
                METALLIC_GOLD,
                GOLD,
                CHRISTMAS_RED,
                CHRISTMAS_RED,
                CRIMSON,
                FOREST_GREEN,
                FOREST_GREEN,
                FOREST_GREEN,
                PINE,
                PINE,
                SILVER,
                SNOW_WHITE,
                WARM_WHITE,
            ],
            ribbon_bulb: [1.0, 0.929, 0.835],
            particle: SNOW_WHITE,
            topper: GOLD,
        }
    }
}
