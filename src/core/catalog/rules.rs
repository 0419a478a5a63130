//=========================================================================
// Transition Rules
//=========================================================================
//
// Pure predicate deciding whether a transition is legal under a catalog.
// Holds no state; the machine consults it before every change.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::StateCatalog;

//=== Predicate ===========================================================

/// Returns true when moving from `from` to `to` is legal under `catalog`.
///
/// - `to` must be a catalog member.
/// - An unknown `from` (notably `""` before the first transition) or a
///   `from` with an empty allowed set places no restriction on `to`.
/// - Otherwise `to` must appear in `from`'s allowed set.
pub fn transition_allowed(catalog: &StateCatalog, from: &str, to: &str) -> bool {
    if !catalog.contains(to) {
        return false;
    }

    match catalog.get(from) {
        None => true,
        Some(def) if def.is_unrestricted() => true,
        Some(def) => def.allowed_transitions.contains(to),
    }
}

//=========================================================================
// Tests
//=========================================================================
