//=========================================================================
// Scene Tracker
//=========================================================================
//
// In-memory scene collaborator. Records swaps instead of touching a
// scene graph; real engines supply their own `SceneDirector`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::SceneDirector;

//=== Scene Tracker =======================================================

/// Bookkeeping scene collaborator.
///
/// Tracks the current scene path and how many swaps have been applied.
/// Useful as-is for tests and headless runs.
#[derive(Debug, Default)]
pub struct SceneTracker {
    current: String,
    last_transition: String,
    swap_count: u32,
}

impl SceneTracker {
    /// Creates a tracker with no scene presented.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition effect used by the most recent swap.
    pub fn last_transition(&self) -> &str {
        &self.last_transition
    }

    /// Number of swaps applied since construction.
    pub fn swap_count(&self) -> u32 {
        self.swap_count
    }
}

impl SceneDirector for SceneTracker {
    fn change_scene(&mut self, path: &str, transition: &str) {
        debug!("Scene swap to {:?} (transition {:?})", path, transition);
        self.current = path.to_string();
        self.last_transition = transition.to_string();
        self.swap_count += 1;
    }

    fn current_scene_path(&self) -> &str {
        &self.current
    }
}

//=========================================================================
// Tests
//=========================================================================
