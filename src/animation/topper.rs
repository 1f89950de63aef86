//! The star on top of the tree.

use glam::Vec3;
use rand::Rng;

use super::{
    interpolation::{lerp_f32, lerp_vec3},
    traits::{FrameContext, InstanceMotion},
};
use crate::{
    dataset::TreeShape,
    scene::{InstanceBuffer, InstancePose, TreeMode},
};

/// Yaw rate while assembled (rad/s).
const ASSEMBLED_SPIN: f32 = 0.5;
/// Damping rate of pitch and roll toward upright while assembled.
const UPRIGHT_RATE: f32 = 2.0;
/// Per-axis tumble rate while scattered (rad/s).
const SCATTERED_TUMBLE: Vec3 = Vec3::new(0.3, 0.2, 0.1);

/// Motion model for the single topper instance.
#[derive(Debug, Clone)]
pub struct TopperMotion {
    pose: InstancePose,
    tree_target: Vec3,
    scatter_target: Vec3,
    speed: f32,
    color: [f32; 4],
}

impl TopperMotion {
    /// Topper resting on the tip of `shape`, with a random scatter target
    /// high above the scene.
    pub fn new<R: Rng + ?Sized>(
        shape: &TreeShape,
        speed: f32,
        color: [f32; 4],
        rng: &mut R,
    ) -> Self {
        let tree_target = Vec3::new(0.0, shape.height / 2.0 + 0.5, 0.0);
        let scatter_target = Vec3::new(
            (rng.random::<f32>() - 0.5) * 8.0,
            12.0 + rng.random::<f32>() * 4.0,
            (rng.random::<f32>() - 0.5) * 8.0,
        );
        Self {
            pose: InstancePose::at(tree_target, 1.0),
            tree_target,
            scatter_target,
            speed,
            color,
        }
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> &InstancePose {
        &self.pose
    }

    /// Target for `mode`.
    #[must_use]
    pub fn target(&self, mode: TreeMode) -> Vec3 {
        match mode {
            TreeMode::Assembled => self.tree_target,
            TreeMode::Scattered => self.scatter_target,
        }
    }
}

impl InstanceMotion for TopperMotion {
    fn instance_count(&self) -> usize {
        1
    }

    fn seed(&mut self, buffer: &mut InstanceBuffer) {
        buffer.write_pose(0, &self.pose);
        buffer.write_color(0, self.color);
    }

    fn advance(&mut self, frame: &FrameContext, buffer: &mut InstanceBuffer) {
        let delta = frame.delta;
        if delta <= 0.0 {
            return;
        }
        let target = self.target(frame.mode);
        let pose = &mut self.pose;
        pose.position = lerp_vec3(pose.position, target, delta * self.speed);
        match frame.mode {
            TreeMode::Assembled => {
                pose.rotation.y += delta * ASSEMBLED_SPIN;
                pose.rotation.x = lerp_f32(pose.rotation.x, 0.0, delta * UPRIGHT_RATE);
                pose.rotation.z = lerp_f32(pose.rotation.z, 0.0, delta * UPRIGHT_RATE);
            }
            TreeMode::Scattered => pose.rotation += SCATTERED_TUMBLE * delta,
        }
        buffer.write_pose(0, &self.pose);
    }

    fn name(&self) -> &'static str {
        "topper"
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::options::TreeOptions;

    const DT: f32 = 1.0 / 60.0;

    fn topper() -> TopperMotion {
        let shape = TreeShape::from(&TreeOptions::default());
        TopperMotion::new(&shape, 1.1 * 0.9, [1.0; 4], &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn targets_sit_on_tip_and_high_above() {
        let t = topper();
        assert_eq!(t.target(TreeMode::Assembled), Vec3::new(0.0, 5.0, 0.0));
        let s = t.target(TreeMode::Scattered);
        assert!(s.x.abs() <= 4.0 && s.z.abs() <= 4.0);
        assert!((12.0..16.0).contains(&s.y));
        assert_eq!(t.pose().position, t.target(TreeMode::Assembled));
    }

    #[test]
    fn flies_up_tumbling_then_returns_upright() {
        let mut t = topper();
        let mut buffer = InstanceBuffer::new(1);
        t.seed(&mut buffer);

        for _ in 0..600 {
            t.advance(&FrameContext::new(TreeMode::Scattered, DT, 0.0), &mut buffer);
        }
        let scatter = t.target(TreeMode::Scattered);
        assert!(t.pose().position.distance(scatter) < 0.01);
        assert!((t.pose().rotation.x - 3.0).abs() < 1e-3);
        assert!((t.pose().rotation.z - 1.0).abs() < 1e-3);

        for _ in 0..600 {
            t.advance(&FrameContext::new(TreeMode::Assembled, DT, 0.0), &mut buffer);
        }
        let home = t.target(TreeMode::Assembled);
        assert!(t.pose().position.distance(home) < 0.01);
        assert!(t.pose().rotation.x.abs() < 1e-3);
        assert!(t.pose().rotation.z.abs() < 1e-3);
        let translation = buffer.get(0).map(|raw| raw.translation());
        assert_eq!(translation.map(|p| p.distance(t.pose().position) < 1e-4), Some(true));
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut t = topper();
        let mut buffer = InstanceBuffer::new(1);
        let before = *t.pose();
        t.advance(&FrameContext::new(TreeMode::Scattered, 0.0, 1.0), &mut buffer);
        assert_eq!(*t.pose(), before);
        assert!(!buffer.is_dirty());
    }
}
