//=========================================================================
// Pause Coordinator
//=========================================================================
//
// Maps a boolean pause flag onto the time-scale collaborator. The
// machine layers the notification and the PAUSED/PLAYING transition on
// top; this type only owns the flag and the pre-pause snapshot.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::collab::TimeScaler;

//=== State Names =========================================================

/// Catalog state targeted when pausing.
pub const PAUSED_STATE: &str = "PAUSED";

/// Catalog state targeted when resuming.
pub const PLAYING_STATE: &str = "PLAYING";

//=== Pause Coordinator ===================================================

/// Pause flag plus the time scale to restore on resume.
#[derive(Debug)]
pub(crate) struct PauseCoordinator {
    paused: bool,
    saved_scale: f32,
}

impl PauseCoordinator {
    pub fn new() -> Self {
        Self {
            paused: false,
            saved_scale: 1.0,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Engages pause: snapshots the current scale and freezes time.
    ///
    /// Returns false (debug log) when already paused.
    pub fn engage<T: TimeScaler>(&mut self, time: &mut T) -> bool {
        if self.paused {
            debug!("Already paused");
            return false;
        }
        self.saved_scale = time.time_scale();
        time.set_time_scale(0.0);
        self.paused = true;
        true
    }

    /// Releases pause: restores the snapshot taken by `engage`.
    ///
    /// Returns false (debug log) when not paused.
    pub fn release<T: TimeScaler>(&mut self, time: &mut T) -> bool {
        if !self.paused {
            debug!("Not paused");
            return false;
        }
        time.set_time_scale(self.saved_scale);
        self.paused = false;
        true
    }
}

//=========================================================================
// Tests
//=========================================================================
