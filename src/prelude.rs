//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use statecraft::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Director facade
pub use crate::director::{DirectorBuilder, StageDirector};

// Catalog
pub use crate::core::catalog::{CatalogError, PropertyBag, StateCatalog, StateDefinition};

// Machine
pub use crate::core::machine::{
    GameStateMachine, HookArgs, HookRegistry, TransitionRequests, PAUSED_STATE, PLAYING_STATE,
};

// Stage
pub use crate::core::stage::{SceneCommand, StageContext};

// Collaborator seams
pub use crate::core::collab::{
    GameClock, SceneDirector, SceneTracker, TimeScaler, UiRegistry, UiSurface,
};

// Notification bus
pub use crate::core::bus::{
    Notification, NotificationBus, GAME_PAUSED, GAME_STATE_CHANGED, SCENE_CHANGED,
};
