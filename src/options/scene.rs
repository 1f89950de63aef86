use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::TreeMode;

/// Scene-level placement and startup state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
pub struct SceneOptions {
    /// Translation applied to every group on submission.
    #[schemars(skip)]
    pub root_offset: [f32; 3],
    /// Whole-tree spin (rad/s) while assembled.
    #[schemars(title = "Tree Spin", range(min = 0.0, max = 2.0))]
    pub tree_spin: f32,
    /// Mode the scene starts in.
    #[schemars(title = "Initial Mode")]
    pub initial_mode: TreeMode,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            root_offset: [0.0, -1.0, 0.0],
            tree_spin: 0.1,
            initial_mode: TreeMode::Assembled,
        }
    }
}
