//=========================================================================
// Bootstrap Gate
//=========================================================================
//
// Parks the catalog's default state until the framework is ready for
// it. Entering the initial state immediately at load time would fire
// entry-time UI actions against menus the UI layer has not registered
// yet; the gate holds the state until the director's tick observes a
// ready UI, then releases it exactly once.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Bootstrap Gate ======================================================

/// One-shot holder for the pending initial state.
#[derive(Debug, Default)]
pub(crate) struct BootstrapGate {
    pending: Option<String>,
    consumed: bool,
}

impl BootstrapGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks `state` as the pending initial state.
    ///
    /// Re-arming before consumption replaces the parked state (a
    /// catalog reload may change the default); arming after the gate
    /// has fired is a no-op.
    pub fn arm(&mut self, state: impl Into<String>) {
        if self.consumed {
            debug!("Bootstrap already completed; ignoring re-arm");
            return;
        }
        self.pending = Some(state.into());
    }

    /// The parked state, if any.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Releases the parked state. Yields at most once per process.
    pub fn consume(&mut self) -> Option<String> {
        let state = self.pending.take()?;
        self.consumed = true;
        Some(state)
    }

    /// True once the gate has fired.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

//=========================================================================
// Tests
//=========================================================================
