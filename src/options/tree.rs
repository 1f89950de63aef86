use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overall cone shape of the assembled tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tree", inline)]
#[serde(default)]
pub struct TreeOptions {
    /// Total number of decorative instances shared across all groups.
    #[schemars(title = "Instance Count", range(min = 0, max = 20000))]
    pub count: u32,
    /// Cone radius at the base.
    #[schemars(title = "Base Radius", range(min = 0.1, max = 20.0))]
    pub radius: f32,
    /// Cone height, centered on the origin.
    #[schemars(title = "Height", range(min = 0.1, max = 40.0))]
    pub height: f32,
    /// How many times the spiral wraps around the cone.
    #[schemars(title = "Spiral Turns", range(min = 0.0, max = 60.0))]
    pub spin: f32,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            count: 1800,
            radius: 3.5,
            height: 9.0,
            spin: 15.0,
        }
    }
}

/// Share of the instance budget and jitter for one decorative group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GroupShare {
    /// Fraction of [`TreeOptions::count`] assigned to this group.
    pub share: f32,
    /// Extra outward radius, sampled uniformly in `[0, radial_jitter)`.
    pub radial_jitter: f32,
    /// Vertical jitter, sampled uniformly in `[-h/2, h/2)`.
    pub height_jitter: f32,
}

impl GroupShare {
    const fn new(share: f32, radial_jitter: f32) -> Self {
        Self {
            share,
            radial_jitter,
            height_jitter: 0.0,
        }
    }

    /// Instance count for this group out of `total`, rounded down.
    #[must_use]
    pub fn count_of(&self, total: u32) -> usize {
        // Shares like 0.45 are not exact in f32.
        (total as f32 * self.share + 1e-3).floor().max(0.0) as usize
    }
}

impl Default for GroupShare {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Composition of the decorative groups that make up the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecorationOptions {
    /// Spherical baubles.
    pub ornaments: GroupShare,
    /// Small cubes.
    pub gifts: GroupShare,
    /// Octahedral sparkles.
    pub stars: GroupShare,
    /// Hooked tubes.
    pub candy_canes: GroupShare,
}

impl Default for DecorationOptions {
    fn default() -> Self {
        Self {
            ornaments: GroupShare::new(0.45, 0.3),
            gifts: GroupShare::new(0.2, 0.4),
            stars: GroupShare::new(0.15, 0.5),
            candy_canes: GroupShare::new(0.2, 0.4),
        }
    }
}

impl DecorationOptions {
    /// All group shares in submission order.
    #[must_use]
    pub fn shares(&self) -> [GroupShare; 4] {
        [self.ornaments, self.gifts, self.stars, self.candy_canes]
    }
}
