//=========================================================================
// Property Merge
//=========================================================================
//
// Recursive merge of property bags. Used when caller-supplied overrides
// are layered onto a state definition's base properties at apply time.
//
// Object/object pairs merge per key; every other pairing resolves to
// the overlay value.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde_json::Value;

//=== Internal Dependencies ===============================================

use super::PropertyBag;

//=== Merge ===============================================================

/// Merges `overlay` into `base`, recursing into nested objects.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Merges an override bag into a base bag, key by key.
pub fn deep_merge_bags(base: &mut PropertyBag, overlay: PropertyBag) {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(slot) => deep_merge(slot, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}

/// Returns the base properties with the overrides layered on top.
pub fn merged_properties(base: &PropertyBag, overrides: &PropertyBag) -> PropertyBag {
    if overrides.is_empty() {
        return base.clone();
    }
    let mut merged = base.clone();
    deep_merge_bags(&mut merged, overrides.clone());
    merged
}

//=========================================================================
// Tests
//=========================================================================
