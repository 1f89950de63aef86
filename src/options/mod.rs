//! Centralized scene options with TOML preset support.
//!
//! All tweakable settings (tree shape, group composition, motion speeds,
//! ribbon, ambient particles, palette, scene placement) are consolidated
//! here. Options serialize to/from TOML presets.

mod colors;
mod motion;
mod particles;
mod ribbon;
mod scene;
mod tree;

use std::path::Path;

pub use colors::{
    ColorOptions, CHRISTMAS_RED, CRIMSON, FOREST_GREEN, GOLD, METALLIC_GOLD, PINE,
    SILVER, SNOW_WHITE, WARM_WHITE,
};
pub use motion::MotionOptions;
pub use particles::ParticleOptions;
pub use ribbon::RibbonOptions;
use schemars::JsonSchema;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};
pub use tree::{DecorationOptions, GroupShare, TreeOptions};

use crate::error::TreeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[ribbon]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Cone shape of the assembled tree.
    pub tree: TreeOptions,
    /// Split of the instance budget across decoration groups.
    #[schemars(skip)]
    pub decorations: DecorationOptions,
    /// Speeds and swirl profile.
    pub motion: MotionOptions,
    /// Ribbon of lights.
    pub ribbon: RibbonOptions,
    /// Ambient sparkles.
    pub particles: ParticleOptions,
    /// Scene placement and startup mode.
    pub scene: SceneOptions,
    /// Instance color palette.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let content = std::fs::read_to_string(path).map_err(TreeError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| TreeError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TreeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TreeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TreeError::Io)?;
        }
        std::fs::write(path, content).map_err(TreeError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Reject options that cannot produce a usable scene.
    pub fn validate(&self) -> Result<(), TreeError> {
        let tree = &self.tree;
        for (name, value) in [
            ("tree.radius", tree.radius),
            ("tree.height", tree.height),
            ("motion.animation_speed", self.motion.animation_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TreeError::InvalidOptions(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        let motion = &self.motion;
        for (name, value) in [
            ("motion.assemble_swirl", motion.assemble_swirl),
            ("motion.scatter_swirl", motion.scatter_swirl),
            ("motion.swirl_rate", motion.swirl_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TreeError::InvalidOptions(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !tree.spin.is_finite() {
            return Err(TreeError::InvalidOptions(
                "tree.spin must be finite".to_owned(),
            ));
        }
        for share in self.decorations.shares() {
            if !(0.0..=1.0).contains(&share.share)
                || !share.radial_jitter.is_finite()
                || !share.height_jitter.is_finite()
            {
                return Err(TreeError::InvalidOptions(format!(
                    "decoration share out of range: {share:?}"
                )));
            }
        }
        if self.ribbon.light_count == 0 || self.ribbon.control_spans == 0 {
            return Err(TreeError::InvalidOptions(
                "ribbon needs at least one light and one control span"
                    .to_owned(),
            ));
        }
        if self.colors.palette.is_empty() {
            return Err(TreeError::InvalidOptions(
                "colors.palette must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
