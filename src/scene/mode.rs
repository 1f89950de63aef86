//! The assembled / scattered toggle read by every motion model.

use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which target set every instance converges toward.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TreeMode {
    /// Instances gather into the spiral cone.
    #[default]
    Assembled,
    /// Instances drift apart into the spherical cloud.
    Scattered,
}

impl TreeMode {
    /// Whether instances are gathering into the tree.
    #[inline]
    #[must_use]
    pub fn is_assembled(self) -> bool {
        matches!(self, Self::Assembled)
    }

    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Assembled => Self::Scattered,
            Self::Scattered => Self::Assembled,
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            Self::Assembled => 0,
            Self::Scattered => 1,
        }
    }

    fn from_bits(bits: u8) -> Self {
        if bits & 1 == 0 {
            Self::Assembled
        } else {
            Self::Scattered
        }
    }
}

/// Shared handle to the process-wide mode.
///
/// Cloning yields another handle to the same value. The UI side calls
/// [`toggle`](Self::toggle); motion code only ever calls
/// [`current`](Self::current), once per frame. The value lives in an atomic
/// so a handle may be moved to an input thread without tearing.
#[derive(Debug, Clone)]
pub struct ModeSwitch {
    bits: Arc<AtomicU8>,
}

impl ModeSwitch {
    /// Handle starting in `initial`.
    #[must_use]
    pub fn new(initial: TreeMode) -> Self {
        Self {
            bits: Arc::new(AtomicU8::new(initial.to_bits())),
        }
    }

    /// Snapshot of the current mode.
    #[must_use]
    pub fn current(&self) -> TreeMode {
        TreeMode::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Flip between assembled and scattered.
    pub fn toggle(&self) {
        let _ = self.bits.fetch_xor(1, Ordering::AcqRel);
    }
}

impl Default for ModeSwitch {
    fn default() -> Self {
        Self::new(TreeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_assembled_by_default() {
        assert_eq!(ModeSwitch::default().current(), TreeMode::Assembled);
    }

    #[test]
    fn toggle_flips_every_handle() {
        let ui = ModeSwitch::new(TreeMode::Assembled);
        let frame_loop = ui.clone();

        ui.toggle();
        assert_eq!(frame_loop.current(), TreeMode::Scattered);

        ui.toggle();
        assert_eq!(frame_loop.current(), TreeMode::Assembled);
    }

    #[test]
    fn toggled_is_an_involution() {
        for mode in [TreeMode::Assembled, TreeMode::Scattered] {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }

    #[test]
    fn toggle_from_another_thread() {
        let switch = ModeSwitch::new(TreeMode::Assembled);
        let remote = switch.clone();
        std::thread::spawn(move || remote.toggle()).join().unwrap();
        assert_eq!(switch.current(), TreeMode::Scattered);
    }
}
