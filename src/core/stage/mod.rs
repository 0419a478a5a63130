//=========================================================================
// Stage Context
//=========================================================================
//
// Separates the machine (logic) from the stage (collaborators + shared
// data), in the same way the surrounding framework splits systems from
// context.
//
// Architecture:
//   GameStateMachine: catalog + current state + hooks (logic)
//   StageContext:     scene/UI/time collaborators + bus + deferred queue
//
//=========================================================================

//=== Module Declarations =================================================

mod deferred;

//=== Public API ==========================================================

pub use deferred::{DeferredQueue, SceneCommand};

//=== Internal Dependencies ===============================================

use crate::core::bus::NotificationBus;
use crate::core::collab::{SceneDirector, TimeScaler, UiSurface};

//=== Stage Context =======================================================

/// Collaborators and shared data handed to every machine operation.
///
/// Owned by the director; machine methods borrow it per call. The
/// machine never stores collaborator references itself, which keeps
/// hook closures free to use the context they are handed.
pub struct StageContext<S: SceneDirector, U: UiSurface, T: TimeScaler> {
    /// Scene collaborator; receives deferred swaps at the tick boundary.
    pub scenes: S,

    /// UI collaborator; drives menus, dialogs, and element visibility.
    pub ui: U,

    /// Time collaborator; scale is snapshot/restored across pause.
    pub time: T,

    /// Cross-cutting notification bus.
    pub bus: NotificationBus,

    /// Scene swaps requested mid-tick, drained by the director.
    pub scene_commands: DeferredQueue<SceneCommand>,
}

impl<S: SceneDirector, U: UiSurface, T: TimeScaler> StageContext<S, U, T> {
    /// Creates a context around the three injected collaborators.
    pub fn new(scenes: S, ui: U, time: T) -> Self {
        Self {
            scenes,
            ui,
            time,
            bus: NotificationBus::new(),
            scene_commands: DeferredQueue::new(),
        }
    }
}
