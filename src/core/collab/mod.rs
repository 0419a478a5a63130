//=========================================================================
// Collaborator Seams
//=========================================================================
//
// Trait boundaries between the state machine and the subsystems it
// coordinates. The machine takes concrete implementations at
// construction; it never reaches for them through globals.
//
// Architecture:
//   SceneDirector - performs scene swaps requested by state properties
//   UiSurface     - menus, dialogs, named elements, readiness signal
//   TimeScaler    - time-scale snapshot/restore across pause
//
//=========================================================================

//=== Module Declarations =================================================

mod game_clock;
mod scene_tracker;
mod ui_registry;

//=== Public API ==========================================================

pub use game_clock::GameClock;
pub use scene_tracker::SceneTracker;
pub use ui_registry::UiRegistry;

//=== Scene Director Trait ================================================

/// Performs scene swaps on behalf of the state machine.
///
/// `change_scene` is fire-and-forget: the director's tick loop invokes
/// it only at the tick boundary, and completion is observable through
/// the `scene_changed` notification rather than a return value.
pub trait SceneDirector {
    /// Swaps to the scene at `path` using the named transition effect.
    fn change_scene(&mut self, path: &str, transition: &str);

    /// Path of the scene currently presented.
    fn current_scene_path(&self) -> &str;
}

//=== UI Surface Trait ====================================================

/// Menu, dialog, and element visibility surface driven by state
/// properties.
///
/// Implementations must tolerate being called for names they do not
/// know; the contract is warn-and-ignore, never panic.
pub trait UiSurface {
    /// True once the surface has registered its elements and can honor
    /// actions. The bootstrap gate holds the initial state until this
    /// reports true.
    fn is_ready(&self) -> bool;

    /// Opens a menu, optionally closing every other open menu first.
    fn open_menu(&mut self, name: &str, close_others: bool);

    /// Closes one menu by name.
    fn close_menu(&mut self, name: &str);

    /// Closes every open menu.
    fn close_all_menus(&mut self);

    /// Opens a dialog, modal or not.
    fn open_dialog(&mut self, name: &str, modal: bool);

    /// Closes every open dialog.
    fn close_all_dialogs(&mut self);

    /// Makes a named element visible.
    fn show_element(&mut self, name: &str);

    /// Hides a named element.
    fn hide_element(&mut self, name: &str);
}

//=== Time Scaler Trait ===================================================

/// Time-scale owner consulted by the pause coordinator.
///
/// Pausing snapshots the current scale and drives it to zero; resuming
/// restores the snapshot.
pub trait TimeScaler {
    /// Sets the global time scale (0.0 freezes tick-driven subsystems).
    fn set_time_scale(&mut self, scale: f32);

    /// Current global time scale.
    fn time_scale(&self) -> f32;
}
