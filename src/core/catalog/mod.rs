//=========================================================================
// Catalog System
//=========================================================================
//
// The configuration side of the state machine.
//
// Architecture:
//   StateCatalog
//     ├─ states: HashMap<String, StateDefinition>
//     └─ default_state: String
//
// Flow:
//   load() → validate → immutable catalog → transition_allowed() queries
//
//=========================================================================

//=== Module Declarations =================================================

mod definition;
mod error;
mod merge;
mod rules;
mod state_catalog;

//=== Public API ==========================================================

pub use state_catalog::StateCatalog;
pub use definition::{PropertyBag, StateDefinition};
pub use error::CatalogError;
pub use merge::{deep_merge, deep_merge_bags, merged_properties};
pub use rules::transition_allowed;
