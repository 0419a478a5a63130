//=========================================================================
// Core Systems
//=========================================================================
//
// All framework subsystems, leaves first:
//
//   catalog - immutable state table, transition rules, property merge
//   collab  - scene/UI/time trait seams + in-memory implementations
//   bus     - cross-cutting notification pub/sub
//   stage   - collaborator/data container + deferred command queue
//   machine - the state machine, hooks, pause, bootstrap, dispatcher
//
//=========================================================================

//=== Module Declarations =================================================

pub mod bus;
pub mod catalog;
pub mod collab;
pub mod machine;
pub mod stage;
