//! Ribbon of lights: progressive reveal along a fixed path.
//!
//! The ribbon never converges per instance. Two scalars (reveal progress
//! and radial expansion) chase mode-dependent targets, and every bulb is
//! recomputed from its path sample each frame.

use glam::Vec3;

use super::{
    interpolation::approach,
    traits::{FrameContext, InstanceMotion},
};
use crate::{
    options::RibbonOptions,
    scene::{InstanceBuffer, InstancePose, TreeMode},
};

/// Reveal progress and radial expansion of the ribbon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealState {
    /// Fraction of the ribbon revealed, `0..=1`.
    pub progress: f32,
    /// Horizontal scale applied to every path sample.
    pub expansion: f32,
}

impl Default for RevealState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            expansion: 1.0,
        }
    }
}

impl RevealState {
    /// Chase the targets for `mode`. Never resets, so a mode flip resumes
    /// from the current values.
    pub fn update(
        &mut self,
        mode: TreeMode,
        delta: f32,
        base_rate: f32,
        opts: &RibbonOptions,
    ) {
        let (progress_target, progress_rate, expansion_target) = match mode {
            TreeMode::Assembled => (1.0, opts.reveal_rate, 1.0),
            TreeMode::Scattered => {
                (0.0, opts.retract_rate, opts.scattered_expansion)
            }
        };
        self.progress = approach(
            self.progress,
            progress_target,
            base_rate * progress_rate,
            delta,
        );
        self.expansion = approach(
            self.expansion,
            expansion_target,
            base_rate * opts.expansion_rate,
            delta,
        );
    }
}

/// Motion model for the ribbon bulbs.
#[derive(Debug, Clone)]
pub struct RibbonMotion {
    samples: Vec<Vec3>,
    reveal: RevealState,
    yaw: f32,
    base_rate: f32,
    opts: RibbonOptions,
    color: [f32; 4],
}

impl RibbonMotion {
    /// Ribbon over ordered path `samples` (index 0 is revealed first).
    #[must_use]
    pub fn new(
        samples: Vec<Vec3>,
        base_rate: f32,
        opts: RibbonOptions,
        color: [f32; 4],
    ) -> Self {
        Self {
            samples,
            reveal: RevealState::default(),
            yaw: 0.0,
            base_rate,
            opts,
            color,
        }
    }

    /// Current reveal state.
    #[must_use]
    pub fn reveal(&self) -> RevealState {
        self.reveal
    }

    /// Accumulated spin about the vertical axis.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Path samples.
    #[must_use]
    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    /// Pose of bulb `index` for the current reveal state at `time` seconds.
    #[must_use]
    pub fn bulb_pose(&self, index: usize, time: f32) -> InstancePose {
        let Some(&base) = self.samples.get(index) else {
            return InstancePose::at(Vec3::ZERO, 0.0);
        };
        let RevealState {
            progress,
            expansion,
        } = self.reveal;
        let position =
            Vec3::new(base.x * expansion, base.y, base.z * expansion);

        let n = index as f32 / self.samples.len() as f32;
        let lead = progress - n;
        if lead <= 0.0 {
            return InstancePose::at(position, 0.0);
        }

        let mut scale = 1.0;
        if lead < self.opts.tip_fraction {
            scale *= lead / self.opts.tip_fraction;
        }
        let twinkle = 0.6
            + 0.4
                * (time * self.opts.twinkle_speed
                    + index as f32 * self.opts.twinkle_phase)
                    .sin();
        scale *= twinkle * self.opts.bulb_scale;
        InstancePose::at(position, scale)
    }

    fn write_all(&self, time: f32, buffer: &mut InstanceBuffer) {
        for i in 0..self.samples.len() {
            buffer.write_pose(i, &self.bulb_pose(i, time));
        }
    }
}

impl InstanceMotion for RibbonMotion {
    fn instance_count(&self) -> usize {
        self.samples.len()
    }

    fn seed(&mut self, buffer: &mut InstanceBuffer) {
        for i in 0..self.samples.len() {
            buffer.write_color(i, self.color);
        }
        self.write_all(0.0, buffer);
    }

    fn advance(&mut self, frame: &FrameContext, buffer: &mut InstanceBuffer) {
        if frame.delta > 0.0 {
            self.reveal
                .update(frame.mode, frame.delta, self.base_rate, &self.opts);
            let spin = match frame.mode {
                TreeMode::Assembled => self.opts.assembled_spin,
                TreeMode::Scattered => self.opts.scattered_spin,
            };
            self.yaw += spin * frame.delta;
        }
        self.write_all(frame.elapsed, buffer);
    }

    fn group_yaw(&self) -> f32 {
        self.yaw
    }

    fn name(&self) -> &'static str {
        "ribbon"
    }
}
