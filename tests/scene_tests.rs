//! End-to-end behavior of the tree engine through a recording render
//! surface.

use std::thread;

use glam::{Mat4, Vec3};
use yuletide::{
    engine::TreeEngine,
    gpu::InstanceRaw,
    options::Options,
    scene::{GroupId, GroupSubmission, InstanceKind, RenderSurface, TreeMode},
};

const DT: f32 = 1.0 / 60.0;

const DECORATIONS: [InstanceKind; 4] = [
    InstanceKind::Ornament,
    InstanceKind::GiftBox,
    InstanceKind::Star,
    InstanceKind::CandyCane,
];

struct Recorded {
    id: GroupId,
    kind: InstanceKind,
    root: Mat4,
    dirty: bool,
    instances: Vec<InstanceRaw>,
}

#[derive(Default)]
struct Recorder {
    frames: Vec<Vec<Recorded>>,
}

impl Recorder {
    fn begin_frame(&mut self) {
        self.frames.push(Vec::new());
    }

    fn last(&self) -> &[Recorded] {
        self.frames.last().map(Vec::as_slice).unwrap_or_default()
    }

    fn last_of(&self, kind: InstanceKind) -> &Recorded {
        self.last()
            .iter()
            .find(|r| r.kind == kind)
            .unwrap_or_else(|| panic!("{kind:?} not submitted"))
    }
}

impl RenderSurface for Recorder {
    fn submit(&mut self, group: &GroupSubmission<'_>) {
        if self.frames.is_empty() {
            self.begin_frame();
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.push(Recorded {
                id: group.id,
                kind: group.kind,
                root: group.root,
                dirty: group.dirty,
                instances: group.instances.to_vec(),
            });
        }
    }
}

fn engine(count: u32, seed: u64) -> TreeEngine {
    let mut options = Options::default();
    options.tree.count = count;
    options.particles.count = 50;
    TreeEngine::with_seed(options, seed).unwrap()
}

fn run(engine: &mut TreeEngine, frames: usize, delta: f32, recorder: &mut Recorder) {
    for _ in 0..frames {
        let _ = engine.advance(delta);
        recorder.begin_frame();
        engine.submit(recorder);
    }
}

#[test]
fn every_group_is_submitted_each_frame() {
    let mut engine = engine(200, 1);
    let mut recorder = Recorder::default();
    run(&mut engine, 3, DT, &mut recorder);

    for frame in &recorder.frames {
        assert_eq!(frame.len(), 7);
        let ids: Vec<usize> = frame.iter().map(|r| r.id.index()).collect();
        assert_eq!(ids, (0..7).collect::<Vec<_>>());
    }
    assert!(recorder.frames[0].iter().all(|r| r.dirty));
}

#[test]
fn decorations_scatter_settle_and_reassemble() {
    let mut engine = engine(400, 2);
    let mut recorder = Recorder::default();
    run(&mut engine, 2, DT, &mut recorder);
    let assembled: Vec<Vec<InstanceRaw>> = DECORATIONS
        .iter()
        .map(|&k| recorder.last_of(k).instances.clone())
        .collect();

    engine.toggle();
    run(&mut engine, 60, DT, &mut recorder);
    for kind in DECORATIONS {
        assert!(recorder.last_of(kind).dirty, "{kind:?} should be moving");
    }

    run(&mut engine, 1000, DT, &mut recorder);
    for kind in DECORATIONS {
        assert!(!recorder.last_of(kind).dirty, "{kind:?} should have settled");
    }

    engine.toggle();
    run(&mut engine, 1060, DT, &mut recorder);
    for (kind, before) in DECORATIONS.iter().zip(&assembled) {
        let now = recorder.last_of(*kind);
        assert!(!now.dirty, "{kind:?} should have settled");
        for (a, b) in before.iter().zip(&now.instances) {
            assert!(a.translation().distance(b.translation()) <= 0.0011);
        }
    }
}

#[test]
fn ribbon_reveals_from_the_base() {
    let mut engine = engine(100, 3);
    let mut recorder = Recorder::default();
    run(&mut engine, 2, DT, &mut recorder);
    let visible = |r: &Recorded| {
        r.instances
            .iter()
            .filter(|raw| raw.uniform_scale() > 0.0)
            .count()
    };

    let early = visible(recorder.last_of(InstanceKind::RibbonLight));
    run(&mut engine, 120, DT, &mut recorder);
    let ribbon = recorder.last_of(InstanceKind::RibbonLight);
    let later = visible(ribbon);
    assert!(later > early);
    // Revealed bulbs form a prefix of the path.
    assert!(ribbon.instances[..later]
        .iter()
        .all(|raw| raw.uniform_scale() > 0.0));
    assert!(ribbon.instances[later..]
        .iter()
        .all(|raw| raw.uniform_scale() == 0.0));
}

#[test]
fn zero_delta_leaves_every_instance_unchanged() {
    let mut engine = engine(300, 4);
    let mut recorder = Recorder::default();
    run(&mut engine, 2, DT, &mut recorder);
    engine.toggle();
    run(&mut engine, 30, DT, &mut recorder);
    let before: Vec<Vec<InstanceRaw>> =
        recorder.last().iter().map(|r| r.instances.clone()).collect();

    run(&mut engine, 5, 0.0, &mut recorder);
    let after: Vec<Vec<InstanceRaw>> =
        recorder.last().iter().map(|r| r.instances.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn roots_carry_offset_and_tree_spin() {
    let mut engine = engine(100, 5);
    let mut recorder = Recorder::default();
    run(&mut engine, 120, DT, &mut recorder);

    let offset = Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0));
    assert_eq!(recorder.last_of(InstanceKind::Particle).root, offset);

    let yaw = engine.scene().tree_yaw();
    assert!((yaw - 0.2).abs() < 1e-3);
    let expected = offset * Mat4::from_rotation_y(yaw);
    let ornaments = recorder.last_of(InstanceKind::Ornament).root;
    assert!(ornaments.abs_diff_eq(expected, 1e-5));

    // The ribbon adds its own spin on top of the tree's.
    let ribbon = recorder.last_of(InstanceKind::RibbonLight).root;
    assert!(!ribbon.abs_diff_eq(expected, 1e-5));
}

#[test]
fn toggle_from_another_thread() {
    let mut engine = engine(100, 6);
    let switch = engine.mode_switch();
    let handle = thread::spawn(move || switch.toggle());
    handle.join().unwrap();
    let _ = engine.advance(DT);
    assert_eq!(engine.mode(), TreeMode::Scattered);
}

#[test]
fn bundled_preset_builds_a_scene() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("presets");
    assert!(Options::list_presets(&dir).contains(&"slow-gather".to_owned()));

    let options = Options::load(&dir.join("slow-gather.toml")).unwrap();
    assert_eq!(options.scene.initial_mode, TreeMode::Scattered);
    let engine = TreeEngine::with_seed(options, 7).unwrap();
    let ornaments = engine
        .scene()
        .find(InstanceKind::Ornament)
        .and_then(|id| engine.scene().group(id))
        .map(|g| g.buffer.len());
    assert_eq!(ornaments, Some(1080));
}

#[test]
fn reversed_swirl_preset_is_rejected() {
    let dir = std::env::temp_dir()
        .join(format!("yuletide-swirl-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("reversed.toml");
    std::fs::write(&path, "[motion]\nassemble_swirl = -3.0\n").unwrap();

    assert!(Options::load(&path).is_err());
    let mut options = Options::default();
    options.motion.assemble_swirl = -3.0;
    assert!(TreeEngine::with_seed(options, 8).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
