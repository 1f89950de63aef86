//! Swirl-augmented convergence toward per-instance tree / scatter targets.
//!
//! This is the motion model shared by every decoration group (ornaments,
//! gifts, stars, candy canes). Groups differ only in their dataset and
//! [`MotionProfile`].

use glam::Vec3;
use rand::Rng;

use super::{
    interpolation::{lerp_vec3, rotate_about_y},
    traits::{FrameContext, InstanceMotion},
};
use crate::{
    dataset::InstanceDataset,
    options::MotionOptions,
    scene::{InstanceBuffer, InstancePose, TreeMode},
};

/// Above this distance an instance is [`MotionPhase::Moving`].
pub const MOVE_THRESHOLD: f32 = 0.01;
/// Above this distance (and up to [`MOVE_THRESHOLD`]) an instance is
/// [`MotionPhase::Settling`]; at or below it the instance is settled.
pub const SNAP_THRESHOLD: f32 = 0.001;
/// Swirl only applies while farther than this from the target.
pub const SWIRL_THRESHOLD: f32 = 0.5;
/// Fixed per-frame lerp fraction while settling.
pub const SNAP_RATE: f32 = 0.2;
/// Upper bound on swirl displacement per frame, as a fraction of the
/// frame's lerp step. Keeps the spiral from orbiting the target forever.
pub const SWIRL_BUDGET: f32 = 0.25;

/// Number of distinct per-instance speed multipliers.
const SPEED_VARIANTS: usize = 10;

/// Convergence phase of one instance, decided each frame from distance
/// alone (no hysteresis).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// Far from target: swirl, lerp and tumble.
    Moving,
    /// Close: fixed-rate snap to kill visible jitter.
    Settling,
    /// Arrived: nothing is written.
    Settled,
}

impl MotionPhase {
    /// Phase for a distance to target.
    #[inline]
    #[must_use]
    pub fn classify(dist: f32) -> Self {
        if dist > MOVE_THRESHOLD {
            Self::Moving
        } else if dist > SNAP_THRESHOLD {
            Self::Settling
        } else {
            Self::Settled
        }
    }
}

/// Per-group motion constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Base lerp rate per second.
    pub base_speed: f32,
    /// Swirl multiplier while assembling.
    pub assemble_swirl: f32,
    /// Swirl multiplier while scattering.
    pub scatter_swirl: f32,
    /// Scale from `speed * delta` to swirl angle.
    pub swirl_rate: f32,
}

impl MotionProfile {
    /// Profile from the motion options.
    #[must_use]
    pub fn from_options(opts: &MotionOptions) -> Self {
        Self {
            base_speed: opts.animation_speed,
            assemble_swirl: opts.assemble_swirl,
            scatter_swirl: opts.scatter_swirl,
            swirl_rate: opts.swirl_rate,
        }
    }

    /// Speed of instance `index`: `base * (0.5 + (index mod 10) * 0.1)`.
    ///
    /// Deterministic variety without per-instance random state, so
    /// neighbouring instances arrive at staggered times.
    #[inline]
    #[must_use]
    pub fn speed_for(&self, index: usize) -> f32 {
        self.base_speed * (0.5 + (index % SPEED_VARIANTS) as f32 * 0.1)
    }

    /// Swirl multiplier for `mode`.
    #[inline]
    #[must_use]
    pub fn swirl_for(&self, mode: TreeMode) -> f32 {
        if mode.is_assembled() {
            self.assemble_swirl
        } else {
            self.scatter_swirl
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::from_options(&MotionOptions::default())
    }
}

/// Advance one instance toward `target`. Returns whether the pose changed.
///
/// - **Moving** (`dist > 0.01`): swirl the position about the vertical
///   axis (only while `dist > 0.5`), lerp toward the target at
///   `speed * delta`, and tumble pitch and yaw at `speed * min(dist, 1)`.
/// - **Settling** (`0.001 < dist <= 0.01`): lerp at a fixed 0.2.
/// - **Settled**: untouched.
pub fn step_instance(
    pose: &mut InstancePose,
    target: Vec3,
    speed: f32,
    swirl: f32,
    swirl_rate: f32,
    delta: f32,
) -> bool {
    let dist = pose.position.distance(target);
    match MotionPhase::classify(dist) {
        MotionPhase::Moving => {
            let t = (speed * delta).clamp(0.0, 1.0);
            if dist > SWIRL_THRESHOLD {
                let mut angle = delta * speed * swirl_rate * swirl;
                let radius = pose.position.x.hypot(pose.position.z);
                if radius > 0.0 {
                    let budget = SWIRL_BUDGET * t * dist / radius;
                    angle = angle.max(-budget).min(budget);
                }
                pose.position = rotate_about_y(pose.position, angle);
            }
            pose.position = lerp_vec3(pose.position, target, t);

            let tumble = speed * dist.min(1.0);
            pose.rotation.x += delta * tumble;
            pose.rotation.y += delta * tumble;
            true
        }
        MotionPhase::Settling => {
            pose.position = lerp_vec3(pose.position, target, SNAP_RATE);
            true
        }
        MotionPhase::Settled => false,
    }
}

/// Motion model for a decoration group converging on fixed targets.
#[derive(Debug, Clone)]
pub struct TargetedMotion {
    name: &'static str,
    dataset: InstanceDataset,
    profile: MotionProfile,
    poses: Vec<InstancePose>,
}

impl TargetedMotion {
    /// Instances start on their tree targets with a random pitch and yaw in
    /// `[0, π)`.
    pub fn new<R: Rng + ?Sized>(
        name: &'static str,
        dataset: InstanceDataset,
        profile: MotionProfile,
        rng: &mut R,
    ) -> Self {
        let poses = dataset
            .tree_positions
            .iter()
            .zip(&dataset.scales)
            .map(|(&position, &scale)| InstancePose {
                position,
                rotation: Vec3::new(
                    rng.random::<f32>() * std::f32::consts::PI,
                    rng.random::<f32>() * std::f32::consts::PI,
                    0.0,
                ),
                scale,
            })
            .collect();
        Self {
            name,
            dataset,
            profile,
            poses,
        }
    }

    /// The fixed targets this group converges on.
    #[must_use]
    pub fn dataset(&self) -> &InstanceDataset {
        &self.dataset
    }

    /// Current poses.
    #[must_use]
    pub fn poses(&self) -> &[InstancePose] {
        &self.poses
    }

    /// Mutable access to current poses, for placing instances explicitly.
    pub fn poses_mut(&mut self) -> &mut [InstancePose] {
        &mut self.poses
    }

    /// Motion constants.
    #[must_use]
    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    /// Distance of instance `index` from its target under `mode`.
    #[must_use]
    pub fn distance_to_target(&self, index: usize, mode: TreeMode) -> Option<f32> {
        let target = self.dataset.target(index, mode)?;
        self.poses.get(index).map(|p| p.position.distance(target))
    }

    /// Number of instances not yet settled under `mode`.
    #[must_use]
    pub fn unsettled(&self, mode: TreeMode) -> usize {
        (0..self.poses.len())
            .filter(|&i| {
                self.distance_to_target(i, mode)
                    .is_some_and(|d| MotionPhase::classify(d) != MotionPhase::Settled)
            })
            .count()
    }

    /// Advance every instance one frame, writing moved ones to `buffer`.
    /// Returns how many instances were written.
    pub fn step(&mut self, frame: &FrameContext, buffer: &mut InstanceBuffer) -> usize {
        // A zero-length frame advances nothing, including the fixed-rate snap.
        if frame.delta <= 0.0 {
            return 0;
        }

        let swirl = self.profile.swirl_for(frame.mode);
        let targets = match frame.mode {
            TreeMode::Assembled => &self.dataset.tree_positions,
            TreeMode::Scattered => &self.dataset.scatter_positions,
        };

        let mut written = 0;
        for (i, (pose, &target)) in self.poses.iter_mut().zip(targets).enumerate() {
            let speed = self.profile.speed_for(i);
            if step_instance(
                pose,
                target,
                speed,
                swirl,
                self.profile.swirl_rate,
                frame.delta,
            ) {
                buffer.write_pose(i, pose);
                written += 1;
            }
        }
        written
    }
}

impl InstanceMotion for TargetedMotion {
    fn instance_count(&self) -> usize {
        self.poses.len()
    }

    fn seed(&mut self, buffer: &mut InstanceBuffer) {
        for (i, (pose, &color)) in self.poses.iter().zip(&self.dataset.colors).enumerate() {
            buffer.write_pose(i, pose);
            buffer.write_color(i, color);
        }
    }

    fn advance(&mut self, frame: &FrameContext, buffer: &mut InstanceBuffer) {
        let written = self.step(frame, buffer);
        if written > 0 {
            log::trace!("{}: {written} instances moved", self.name);
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
