//=========================================================================
// Machine System
//=========================================================================
//
// The state machine and its satellites.
//
// Architecture:
//   GameStateMachine
//     ├─ catalog: Option<StateCatalog>
//     ├─ hooks: HookRegistry (named entry/exit callbacks)
//     ├─ pause: PauseCoordinator (flag + time-scale snapshot)
//     └─ bootstrap: BootstrapGate (one-shot initial state)
//
// Flow:
//   change_state() → validate → publish → exit hook → entry hook
//                  → dispatcher::apply(properties)
//
//=========================================================================

//=== Module Declarations =================================================

mod bootstrap;
pub mod dispatcher;
mod hooks;
mod pause;
mod state_machine;

//=== Public API ==========================================================

pub use hooks::{HookArgs, HookRegistry, TransitionRequests};
pub use pause::{PAUSED_STATE, PLAYING_STATE};
pub use state_machine::{GameStateMachine, MAX_TRANSITION_CHAIN};
