//! Ambient floating sparkles.
//!
//! A pure function of elapsed time: each particle drifts on its own slow
//! Lissajous-like path plus a shared sway. There is no mode dependence and
//! no convergence state.

use glam::Vec3;
use rand::Rng;

use super::traits::{FrameContext, InstanceMotion};
use crate::{
    options::ParticleOptions,
    scene::{InstanceBuffer, InstancePose},
};

/// Fixed random parameters of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatParams {
    /// Angular speed of the drift, in `[0.01, 0.015)`.
    pub speed: f32,
    /// Per-axis drift amplitude, each in `[-spread, spread)`.
    pub factors: Vec3,
}

impl FloatParams {
    /// Draw parameters for one particle.
    pub fn random<R: Rng + ?Sized>(spread: f32, rng: &mut R) -> Self {
        let mut factor = || (rng.random::<f32>() * 2.0 - 1.0) * spread;
        let factors = Vec3::new(factor(), factor(), factor());
        Self {
            speed: 0.01 + rng.random::<f32>() / 200.0,
            factors,
        }
    }
}

/// Motion model for the ambient particles.
#[derive(Debug, Clone)]
pub struct AmbientMotion {
    params: Vec<FloatParams>,
    sway: f32,
    color: [f32; 4],
}

impl AmbientMotion {
    /// `opts.count` particles with freshly drawn parameters.
    pub fn new<R: Rng + ?Sized>(
        opts: &ParticleOptions,
        color: [f32; 4],
        rng: &mut R,
    ) -> Self {
        let params = (0..opts.count)
            .map(|_| FloatParams::random(opts.spread, rng))
            .collect();
        Self {
            params,
            sway: opts.sway,
            color,
        }
    }

    /// Particle parameters.
    #[must_use]
    pub fn params(&self) -> &[FloatParams] {
        &self.params
    }

    /// Pose of particle `index` at `time` seconds.
    #[must_use]
    pub fn pose_at(&self, index: usize, time: f32) -> InstancePose {
        let Some(p) = self.params.get(index) else {
            return InstancePose::at(Vec3::ZERO, 0.0);
        };
        let (sin, cos) = (time * p.speed * 0.5).sin_cos();
        let position = Vec3::new(
            cos * p.factors.x + (time * 0.3).sin() * self.sway,
            sin * p.factors.y + (time * 0.5).cos() * self.sway,
            cos * p.factors.z + (time * 0.3).sin() * self.sway,
        );
        InstancePose {
            position,
            // Orientation follows position so each sparkle turns as it drifts.
            rotation: position,
            scale: 0.5 + 0.3 * (time * 2.0 + index as f32).sin(),
        }
    }

    fn write_all(&self, time: f32, buffer: &mut InstanceBuffer) {
        for i in 0..self.params.len() {
            buffer.write_pose(i, &self.pose_at(i, time));
        }
    }
}

impl InstanceMotion for AmbientMotion {
    fn instance_count(&self) -> usize {
        self.params.len()
    }

    fn seed(&mut self, buffer: &mut InstanceBuffer) {
        for i in 0..self.params.len() {
            buffer.write_color(i, self.color);
        }
        self.write_all(0.0, buffer);
    }

    fn advance(&mut self, frame: &FrameContext, buffer: &mut InstanceBuffer) {
        self.write_all(frame.elapsed, buffer);
    }

    fn name(&self) -> &'static str {
        "particles"
    }
}
