//! Authoritative scene: an arena of instance groups and their motion
//! models.
//!
//! The scene owns every [`InstanceBuffer`]. Motion models are stored next
//! to their buffer and receive it by `&mut` for exactly one call per
//! frame, so no model ever holds a reference across frames.

mod buffer;
mod mode;
mod surface;

pub use buffer::{
    GeometryHandle, GroupDescriptor, InstanceBuffer, InstanceGroup,
    InstanceKind, InstancePose, MaterialHandle,
};
use glam::{Mat4, Vec3};
pub use mode::{ModeSwitch, TreeMode};
use rand::Rng;
pub use surface::{GroupSubmission, RenderSurface, UploadTally};

use crate::{
    animation::{
        AmbientMotion, FrameContext, InstanceMotion, MotionProfile,
        RibbonMotion, TargetedMotion, TopperMotion,
    },
    dataset::{build_ribbon_path, generate, linear_rgba, Palette, TreeShape},
    options::Options,
};

/// Index of a group in the scene arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    /// Raw arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether a group rides on the tree root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Follows the whole-tree spin.
    Tree,
    /// Placed directly under the scene offset.
    Free,
}

struct GroupSlot {
    group: InstanceGroup,
    motion: Box<dyn InstanceMotion>,
    attachment: Attachment,
}

/// Per-tick statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Groups whose motion model ran.
    pub advanced: usize,
    /// Groups seeded this tick (their update was skipped).
    pub seeded: usize,
    /// Groups left dirty by this tick.
    pub dirty: usize,
}

/// Arena of instance groups plus scene-level transforms.
pub struct Scene {
    slots: Vec<GroupSlot>,
    root_offset: Vec3,
    tree_spin: f32,
    tree_yaw: f32,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("groups", &self.slots.len())
            .field("root_offset", &self.root_offset)
            .field("tree_yaw", &self.tree_yaw)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Empty scene with the given root translation and whole-tree spin
    /// rate (rad/s while assembled).
    #[must_use]
    pub fn new(root_offset: Vec3, tree_spin: f32) -> Self {
        Self {
            slots: Vec::new(),
            root_offset,
            tree_spin,
            tree_yaw: 0.0,
        }
    }

    /// Build the full tree scene described by `options`: four decoration
    /// groups, the ribbon, the topper and the ambient particles.
    pub fn build<R: Rng + ?Sized>(options: &Options, rng: &mut R) -> Self {
        let mut scene = Self::new(
            Vec3::from_array(options.scene.root_offset),
            options.scene.tree_spin,
        );
        let shape = TreeShape::from(&options.tree);
        let palette = Palette::from_srgb(&options.colors.palette);
        let profile = MotionProfile::from_options(&options.motion);
        let speed = options.motion.animation_speed;

        let decorations = [
            InstanceKind::Ornament,
            InstanceKind::GiftBox,
            InstanceKind::Star,
            InstanceKind::CandyCane,
        ];
        for (kind, share) in decorations.into_iter().zip(options.decorations.shares()) {
            let count = share.count_of(options.tree.count);
            let data = generate(
                count,
                share.radial_jitter,
                share.height_jitter,
                &shape,
                &palette,
                rng,
            );
            let motion = TargetedMotion::new(kind.label(), data, profile, rng);
            let _ = scene.add_group(
                descriptor_for(kind, scene.slots.len()),
                Box::new(motion),
                Attachment::Tree,
            );
        }

        let ribbon = RibbonMotion::new(
            build_ribbon_path(&options.ribbon, &shape),
            speed,
            options.ribbon.clone(),
            linear_rgba(options.colors.ribbon_bulb),
        );
        let _ = scene.add_group(
            descriptor_for(InstanceKind::RibbonLight, scene.slots.len()),
            Box::new(ribbon),
            Attachment::Tree,
        );

        let topper = TopperMotion::new(
            &shape,
            speed * options.motion.topper_speed_factor,
            linear_rgba(options.colors.topper),
            rng,
        );
        let _ = scene.add_group(
            descriptor_for(InstanceKind::Topper, scene.slots.len()),
            Box::new(topper),
            Attachment::Tree,
        );

        let particles = AmbientMotion::new(
            &options.particles,
            linear_rgba(options.colors.particle),
            rng,
        );
        let _ = scene.add_group(
            descriptor_for(InstanceKind::Particle, scene.slots.len()),
            Box::new(particles),
            Attachment::Free,
        );

        log::info!(
            "scene built: {} groups, {} instances",
            scene.group_count(),
            scene.instance_count()
        );
        scene
    }

    /// Register a group. Its buffer is sized from the motion model and
    /// seeded on the next [`tick`](Self::tick).
    pub fn add_group(
        &mut self,
        descriptor: GroupDescriptor,
        motion: Box<dyn InstanceMotion>,
        attachment: Attachment,
    ) -> GroupId {
        let id = GroupId(self.slots.len());
        let buffer = InstanceBuffer::new(motion.instance_count());
        log::debug!(
            "registered group {} ({}): {} instances, {attachment:?}",
            id.0,
            motion.name(),
            buffer.len()
        );
        self.slots.push(GroupSlot {
            group: InstanceGroup { descriptor, buffer },
            motion,
            attachment,
        });
        id
    }

    /// Swap the motion model of a group. The buffer is resized and
    /// reseeded on the next tick if the instance count differs.
    pub fn replace_motion(&mut self, id: GroupId, motion: Box<dyn InstanceMotion>) -> bool {
        match self.slots.get_mut(id.0) {
            Some(slot) => {
                slot.motion = motion;
                true
            }
            None => false,
        }
    }

    /// Group by id.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&InstanceGroup> {
        self.slots.get(id.0).map(|slot| &slot.group)
    }

    /// First group of `kind`.
    #[must_use]
    pub fn find(&self, kind: InstanceKind) -> Option<GroupId> {
        self.slots
            .iter()
            .position(|slot| slot.group.descriptor.kind == kind)
            .map(GroupId)
    }

    /// All groups in registration order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &InstanceGroup)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (GroupId(i), &slot.group))
    }

    /// Number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.slots.len()
    }

    /// Total instances across all groups.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.slots.iter().map(|slot| slot.group.buffer.len()).sum()
    }

    /// Accumulated whole-tree spin.
    #[must_use]
    pub fn tree_yaw(&self) -> f32 {
        self.tree_yaw
    }

    /// Run one update pass over every group.
    ///
    /// A group whose buffer is unseeded or no longer matches its model's
    /// instance count is (re)seeded instead of advanced; it moves from the
    /// next tick on.
    pub fn tick(&mut self, frame: &FrameContext) -> TickStats {
        let mut stats = TickStats::default();
        if frame.mode.is_assembled() && frame.delta > 0.0 {
            self.tree_yaw += self.tree_spin * frame.delta;
        }

        for (i, slot) in self.slots.iter_mut().enumerate() {
            let expected = slot.motion.instance_count();
            let buffer = &mut slot.group.buffer;
            if buffer.len() != expected {
                log::debug!(
                    "group {i} ({}): buffer holds {} instances, model drives {expected}; reallocating",
                    slot.motion.name(),
                    buffer.len()
                );
                *buffer = InstanceBuffer::new(expected);
            }
            if buffer.is_seeded() {
                slot.motion.advance(frame, buffer);
                stats.advanced += 1;
            } else {
                slot.motion.seed(buffer);
                buffer.mark_seeded();
                stats.seeded += 1;
                log::debug!("group {i} ({}): seeded, update skipped", slot.motion.name());
            }
            if buffer.is_dirty() {
                stats.dirty += 1;
            }
        }

        log::trace!(
            "tick: {} advanced, {} seeded, {} dirty",
            stats.advanced,
            stats.seeded,
            stats.dirty
        );
        stats
    }

    /// Hand every seeded group to `surface`, then clear dirty flags.
    pub fn submit(&mut self, surface: &mut dyn RenderSurface) {
        let base = Mat4::from_translation(self.root_offset);
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if !slot.group.buffer.is_seeded() {
                continue;
            }
            let tree_yaw = match slot.attachment {
                Attachment::Tree => self.tree_yaw,
                Attachment::Free => 0.0,
            };
            let root = base
                * Mat4::from_rotation_y(tree_yaw)
                * Mat4::from_rotation_y(slot.motion.group_yaw());
            let descriptor = slot.group.descriptor;
            surface.submit(&GroupSubmission {
                id: GroupId(i),
                kind: descriptor.kind,
                geometry: descriptor.geometry,
                material: descriptor.material,
                root,
                instances: slot.group.buffer.instances(),
                dirty: slot.group.buffer.is_dirty(),
            });
            slot.group.buffer.clear_dirty();
        }
    }
}

/// One mesh and one material per group, numbered in registration order.
fn descriptor_for(kind: InstanceKind, slot: usize) -> GroupDescriptor {
    GroupDescriptor {
        kind,
        geometry: GeometryHandle(slot as u32),
        material: MaterialHandle(slot as u32),
    }
}
