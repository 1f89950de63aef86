//! Top-level driver: options, scene, mode switch and frame clock.

mod options;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    animation::FrameContext,
    error::TreeError,
    options::Options,
    scene::{ModeSwitch, RenderSurface, Scene, TickStats, TreeMode},
    util::FrameClock,
};

/// Owns everything needed to animate the tree frame by frame.
///
/// The host calls [`frame`](Self::frame) (or [`advance`](Self::advance)
/// with its own delta) once per frame, then [`submit`](Self::submit) to
/// hand the groups to its render surface. The mode is flipped through a
/// cloned [`ModeSwitch`], possibly from another thread.
#[derive(Debug)]
pub struct TreeEngine {
    options: Options,
    scene: Scene,
    mode: ModeSwitch,
    clock: FrameClock,
    elapsed: f32,
    last_mode: TreeMode,
    frames: u64,
    /// Source for layouts rebuilt after the options change.
    rng: StdRng,
}

impl TreeEngine {
    /// Engine for validated `options`, seeded from the OS.
    pub fn new(options: Options) -> Result<Self, TreeError> {
        Self::with_rng(options, &mut rand::rng())
    }

    /// Engine with a reproducible layout.
    pub fn with_seed(options: Options, seed: u64) -> Result<Self, TreeError> {
        Self::with_rng(options, &mut StdRng::seed_from_u64(seed))
    }

    /// Engine drawing its random layout from `rng`. Later rebuilds draw
    /// from a generator seeded off `rng`, so seeded engines stay
    /// reproducible across option changes.
    pub fn with_rng<R: Rng + ?Sized>(
        options: Options,
        rng: &mut R,
    ) -> Result<Self, TreeError> {
        options.validate()?;
        let initial = options.scene.initial_mode;
        let scene = Scene::build(&options, rng);
        let rng = StdRng::seed_from_u64(rng.random());
        log::info!("tree engine ready, starting {initial:?}");
        Ok(Self {
            options,
            scene,
            mode: ModeSwitch::new(initial),
            clock: FrameClock::default(),
            elapsed: 0.0,
            last_mode: initial,
            frames: 0,
            rng,
        })
    }

    /// Handle for flipping the mode. Clones share state.
    #[must_use]
    pub fn mode_switch(&self) -> ModeSwitch {
        self.mode.clone()
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> TreeMode {
        self.mode.current()
    }

    /// Flip between assembled and scattered.
    pub fn toggle(&self) {
        self.mode.toggle();
    }

    /// Advance by the wall-clock time since the previous frame.
    pub fn frame(&mut self) -> TickStats {
        let (delta, _) = self.clock.tick();
        self.advance(delta)
    }

    /// Advance by `delta` seconds (clamped like a wall-clock frame).
    pub fn advance(&mut self, delta: f32) -> TickStats {
        let delta = self.clock.clamp_delta(delta);
        self.elapsed += delta;
        self.frames += 1;

        let mode = self.mode.current();
        if mode != self.last_mode {
            log::info!("mode changed to {mode:?} at {:.2}s", self.elapsed);
            self.last_mode = mode;
        }
        self.scene
            .tick(&FrameContext::new(mode, delta, self.elapsed))
    }

    /// Hand every seeded group to `surface`.
    pub fn submit(&mut self, surface: &mut dyn RenderSurface) {
        self.scene.submit(surface);
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Simulated seconds since start.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames advanced since start.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Smoothed wall-clock FPS.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::UploadTally;

    fn small() -> Options {
        let mut options = Options::default();
        options.tree.count = 60;
        options.ribbon.light_count = 30;
        options.particles.count = 10;
        options
    }

    #[test]
    fn rejects_invalid_options() {
        let mut options = small();
        options.tree.height = f32::NAN;
        assert!(matches!(
            TreeEngine::with_seed(options, 1),
            Err(TreeError::InvalidOptions(_))
        ));
    }

    #[test]
    fn toggle_through_cloned_switch() {
        let engine = TreeEngine::with_seed(small(), 2).unwrap();
        let switch = engine.mode_switch();
        assert_eq!(engine.mode(), TreeMode::Assembled);
        switch.toggle();
        assert_eq!(engine.mode(), TreeMode::Scattered);
        engine.toggle();
        assert_eq!(switch.current(), TreeMode::Assembled);
    }

    #[test]
    fn advance_clamps_delta_and_counts_frames() {
        let mut engine = TreeEngine::with_seed(small(), 3).unwrap();
        let _ = engine.advance(5.0);
        let _ = engine.advance(-1.0);
        assert_eq!(engine.frames(), 2);
        assert!((engine.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn initial_mode_from_options() {
        let mut options = small();
        options.scene.initial_mode = TreeMode::Scattered;
        let engine = TreeEngine::with_seed(options, 4).unwrap();
        assert_eq!(engine.mode(), TreeMode::Scattered);
    }

    #[test]
    fn submit_after_settling_uploads_only_moving_groups() {
        let mut engine = TreeEngine::with_seed(small(), 5).unwrap();
        let mut tally = UploadTally::default();
        let _ = engine.advance(1.0 / 60.0);
        engine.submit(&mut tally);
        assert_eq!(tally.groups, 7);
        assert_eq!(tally.dirty_groups, 7);

        tally.reset();
        let _ = engine.advance(1.0 / 60.0);
        engine.submit(&mut tally);
        // Ribbon, topper and particles rewrite every frame; the decorations
        // already sit on their tree targets.
        assert_eq!(tally.dirty_groups, 3);
    }
}
