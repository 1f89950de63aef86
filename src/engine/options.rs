//! Options methods for TreeEngine

use std::path::Path;

use super::TreeEngine;
use crate::{error::TreeError, options::Options, scene::Scene};

impl TreeEngine {
    /// Replace options and rebuild the scene with a fresh layout.
    ///
    /// The current mode and elapsed time carry over; instances start again
    /// on their new tree targets.
    pub fn set_options(&mut self, new: Options) -> Result<(), TreeError> {
        new.validate()?;
        self.scene = Scene::build(&new, &mut self.rng);
        self.options = new;
        Ok(())
    }

    /// Load a named preset (`<dir>/<name>.toml`) and apply it.
    pub fn load_preset(&mut self, dir: &Path, name: &str) -> Result<(), TreeError> {
        let path = dir.join(format!("{name}.toml"));
        let options = Options::load(&path)?;
        log::info!("loaded preset '{name}' from {}", path.display());
        self.set_options(options)
    }

    /// Save the active options as a named preset in `dir`.
    pub fn save_preset(&self, dir: &Path, name: &str) -> Result<(), TreeError> {
        self.options.save(&dir.join(format!("{name}.toml")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_round_trip_rebuilds_scene() {
        let dir = std::env::temp_dir().join(format!(
            "yuletide-engine-presets-{}",
            std::process::id()
        ));
        let mut options = Options::default();
        options.tree.count = 40;
        options.particles.count = 5;
        let mut engine = TreeEngine::with_seed(options.clone(), 9).unwrap();
        engine.save_preset(&dir, "small").unwrap();

        options.tree.count = 100;
        engine.set_options(options).unwrap();
        assert_eq!(engine.options().tree.count, 100);

        engine.load_preset(&dir, "small").unwrap();
        assert_eq!(engine.options().tree.count, 40);
        let particles = engine
            .scene()
            .find(crate::scene::InstanceKind::Particle)
            .and_then(|id| engine.scene().group(id))
            .map(|g| g.buffer.len());
        assert_eq!(particles, Some(5));

        assert!(engine.load_preset(&dir, "missing").is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn seeded_engines_rebuild_identically() {
        let mut options = Options::default();
        options.tree.count = 80;
        options.particles.count = 8;
        let mut a = TreeEngine::with_seed(options.clone(), 21).unwrap();
        let mut b = TreeEngine::with_seed(options.clone(), 21).unwrap();

        options.tree.count = 120;
        a.set_options(options.clone()).unwrap();
        b.set_options(options).unwrap();
        let _ = a.advance(1.0 / 60.0);
        let _ = b.advance(1.0 / 60.0);

        let layout = |e: &TreeEngine| {
            e.scene()
                .groups()
                .map(|(_, g)| g.buffer.instances().to_vec())
                .collect::<Vec<_>>()
        };
        assert_eq!(layout(&a), layout(&b));
    }
}
