//=========================================================================
// Statecraft — Library Root
//
// This crate defines the public API surface of the framework.
//
// Responsibilities:
// - Expose the core subsystems (`core`) for embedders that need the
//   pieces individually (catalog, machine, bus, collaborator seams)
// - Provide the high-level `StageDirector` facade most applications
//   drive exclusively
//
// Typical usage:
// ```no_run
// use statecraft::DirectorBuilder;
//
// let mut director = DirectorBuilder::with_defaults()
//     .with_catalog_path("config/states.json")
//     .expect("catalog loads")
//     .build();
//
// director.ui_mut().set_ready(true);
// loop {
//     director.tick();
//     # break;
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all framework subsystems. It is exposed publicly for
// embedders that compose the pieces themselves; normal application
// code will mostly use the top-level `StageDirector` facade.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `director` defines the facade and its builder.
//
mod director;

//--- Public Exports ------------------------------------------------------

pub use director::{DirectorBuilder, StageDirector};
