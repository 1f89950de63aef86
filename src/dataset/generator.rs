//! Tree and scatter target generation for the decoration groups.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use super::palette::Palette;
use crate::{options::TreeOptions, scene::TreeMode};

/// Inner radius of the scatter shell.
pub const SCATTER_MIN_RADIUS: f32 = 7.0;
/// Outer radius of the scatter shell.
pub const SCATTER_MAX_RADIUS: f32 = 16.0;
/// Smallest per-instance scale.
pub const MIN_SCALE: f32 = 0.4;
/// Largest per-instance scale.
pub const MAX_SCALE: f32 = 1.0;

/// Cone the tree targets are laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeShape {
    /// Total height, centered on the origin.
    pub height: f32,
    /// Radius at the base.
    pub radius: f32,
    /// Spiral wraps from base to tip.
    pub spin: f32,
}

impl From<&TreeOptions> for TreeShape {
    fn from(opts: &TreeOptions) -> Self {
        Self {
            height: opts.height,
            radius: opts.radius,
            spin: opts.spin,
        }
    }
}

impl TreeShape {
    /// Tree position at normalized index `t` with pre-sampled jitter.
    ///
    /// `radial_extra` is added to the tapered radius, `height_offset` to the
    /// height, and `phase` to the spiral angle.
    #[must_use]
    pub fn position(
        &self,
        t: f32,
        radial_extra: f32,
        height_offset: f32,
        phase: f32,
    ) -> Vec3 {
        let h = self.height * t + height_offset;
        let r = self.radius * (1.0 - t) + radial_extra;
        let angle = t * self.spin * TAU + phase;
        Vec3::new(angle.cos() * r, h - self.height / 2.0, angle.sin() * r)
    }
}

/// Point on a sphere of `radius` from two uniform samples in `[0, 1)`.
///
/// Uses inverse-transform sampling (`φ = acos(2v − 1)`) so directions are
/// uniform over the sphere rather than clustered at the poles.
#[must_use]
pub fn sphere_point(u: f32, v: f32, radius: f32) -> Vec3 {
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Fixed per-instance targets, scale and color for one group.
///
/// Built once; nothing in the crate mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceDataset {
    /// Assembled-mode targets.
    pub tree_positions: Vec<Vec3>,
    /// Scattered-mode targets.
    pub scatter_positions: Vec<Vec3>,
    /// Uniform scale per instance.
    pub scales: Vec<f32>,
    /// Linear RGBA color per instance.
    pub colors: Vec<[f32; 4]>,
}

impl InstanceDataset {
    /// Number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree_positions.len()
    }

    /// Whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree_positions.is_empty()
    }

    /// Target of instance `index` under `mode`.
    #[inline]
    #[must_use]
    pub fn target(&self, index: usize, mode: TreeMode) -> Option<Vec3> {
        match mode {
            TreeMode::Assembled => self.tree_positions.get(index).copied(),
            TreeMode::Scattered => self.scatter_positions.get(index).copied(),
        }
    }
}

/// Generate `count` instances on the tree cone and in the scatter shell.
///
/// Layout is deterministic in shape and random in fill: spiral phase,
/// radial and height jitter, scatter direction and radius, scale and
/// color all come from `rng`.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    radial_jitter: f32,
    height_jitter: f32,
    shape: &TreeShape,
    palette: &Palette,
    rng: &mut R,
) -> InstanceDataset {
    let mut data = InstanceDataset {
        tree_positions: Vec::with_capacity(count),
        scatter_positions: Vec::with_capacity(count),
        scales: Vec::with_capacity(count),
        colors: Vec::with_capacity(count),
    };

    for i in 0..count {
        let t = i as f32 / count as f32;
        let height_offset = (rng.random::<f32>() - 0.5) * height_jitter;
        let radial_extra = rng.random::<f32>() * radial_jitter;
        let phase = rng.random::<f32>() * TAU;
        data.tree_positions
            .push(shape.position(t, radial_extra, height_offset, phase));

        let (u, v) = (rng.random::<f32>(), rng.random::<f32>());
        let radius = SCATTER_MIN_RADIUS
            + rng.random::<f32>() * (SCATTER_MAX_RADIUS - SCATTER_MIN_RADIUS);
        data.scatter_positions.push(sphere_point(u, v, radius));

        data.scales
            .push(rng.random::<f32>() * (MAX_SCALE - MIN_SCALE) + MIN_SCALE);
        data.colors.push(palette.pick(rng));
    }

    data
}
