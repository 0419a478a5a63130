//=========================================================================
// State Definition
//=========================================================================
//
// One named state: its reachable targets, optional entry/exit hook
// names, and the declarative property bag applied when it is entered.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};

//=== Property Bag ========================================================

/// Declarative side-effect map attached to a state definition.
///
/// Keys are interpreted by the effect dispatcher when the state is
/// entered (`changeScene`, `openMenu`, ...). Unknown keys are ignored,
/// which lets applications carry their own per-state metadata here.
pub type PropertyBag = Map<String, Value>;

//=== State Definition ====================================================

/// Configuration for a single named state.
///
/// The state's name is the key under which the definition is stored in
/// the catalog; it is not repeated inside the definition itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateDefinition {
    /// Target state names reachable from this state.
    ///
    /// An empty set is the "unrestricted" sentinel: any catalog member
    /// may be entered from here.
    pub allowed_transitions: HashSet<String>,

    /// Name of the hook invoked when this state is entered.
    pub entry_callback: Option<String>,

    /// Name of the hook invoked when this state is left.
    pub exit_callback: Option<String>,

    /// Declarative side effects applied after the entry hook.
    pub properties: PropertyBag,
}

impl StateDefinition {
    /// True when this state places no restriction on outgoing targets.
    pub fn is_unrestricted(&self) -> bool {
        self.allowed_transitions.is_empty()
    }
}

//=========================================================================
// Tests
//=========================================================================
