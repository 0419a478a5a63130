//=========================================================================
// Effect Dispatcher
//=========================================================================
//
// Interprets a merged property bag into collaborator requests, in a
// fixed order:
//
//   1. changeScene        → deferred SceneCommand (never swaps inline)
//   2. closeAllMenus      ┐
//      closeAllDialogs    │ read either at the top level or under a
//      openMenu           │ nested "ui" object (nested wins), applied
//      openDialog         │ only while the UI surface reports ready
//      showUiElement      │
//      hideUiElement      ┘
//
// Malformed values warn and are skipped; unknown keys are ignored so
// applications can keep their own metadata in the same bag.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};
use serde_json::Value;

//=== Internal Dependencies ===============================================

use crate::core::catalog::PropertyBag;
use crate::core::collab::{SceneDirector, TimeScaler, UiSurface};
use crate::core::stage::{SceneCommand, StageContext};

//=== Property Keys =======================================================

const CHANGE_SCENE: &str = "changeScene";
const UI_NAMESPACE: &str = "ui";
const CLOSE_ALL_MENUS: &str = "closeAllMenus";
const CLOSE_ALL_DIALOGS: &str = "closeAllDialogs";
const OPEN_MENU: &str = "openMenu";
const OPEN_DIALOG: &str = "openDialog";
const SHOW_UI_ELEMENT: &str = "showUiElement";
const HIDE_UI_ELEMENT: &str = "hideUiElement";

//=== Dispatch ============================================================

/// Applies a merged property bag to the stage.
pub fn apply<S: SceneDirector, U: UiSurface, T: TimeScaler>(
    properties: &PropertyBag,
    stage: &mut StageContext<S, U, T>,
) {
    if let Some(value) = properties.get(CHANGE_SCENE) {
        if let Some(command) = scene_command(value) {
            debug!("Deferring scene swap to {:?}", command.path);
            stage.scene_commands.push(command);
        }
    }

    if !stage.ui.is_ready() {
        if has_ui_actions(properties) {
            debug!("UI not ready; skipping UI actions");
        }
        return;
    }

    if flag_value(properties, CLOSE_ALL_MENUS) {
        stage.ui.close_all_menus();
    }
    if flag_value(properties, CLOSE_ALL_DIALOGS) {
        stage.ui.close_all_dialogs();
    }
    if let Some(value) = ui_value(properties, OPEN_MENU) {
        match named_request(value, "closeOthers", true) {
            Some((name, close_others)) => stage.ui.open_menu(&name, close_others),
            None => warn!("Malformed {:?} value: {:?}", OPEN_MENU, value),
        }
    }
    if let Some(value) = ui_value(properties, OPEN_DIALOG) {
        match named_request(value, "modal", true) {
            Some((name, modal)) => stage.ui.open_dialog(&name, modal),
            None => warn!("Malformed {:?} value: {:?}", OPEN_DIALOG, value),
        }
    }
    if let Some(value) = ui_value(properties, SHOW_UI_ELEMENT) {
        match element_name(value) {
            Some(name) => stage.ui.show_element(name),
            None => warn!("Malformed {:?} value: {:?}", SHOW_UI_ELEMENT, value),
        }
    }
    if let Some(value) = ui_value(properties, HIDE_UI_ELEMENT) {
        match element_name(value) {
            Some(name) => stage.ui.hide_element(name),
            None => warn!("Malformed {:?} value: {:?}", HIDE_UI_ELEMENT, value),
        }
    }
}

//=== Value Coercion ======================================================

/// Reads a scene request from either a bare path string or a
/// `{path, transition}` object. The transition effect defaults to
/// `"none"`.
fn scene_command(value: &Value) -> Option<SceneCommand> {
    match value {
        Value::String(path) if !path.is_empty() => Some(SceneCommand {
            path: path.clone(),
            transition: "none".to_string(),
        }),
        Value::Object(map) => {
            let path = map.get("path").and_then(Value::as_str).unwrap_or("");
            if path.is_empty() {
                warn!("Scene request without a path: {:?}", value);
                return None;
            }
            let transition = map
                .get("transition")
                .and_then(Value::as_str)
                .unwrap_or("none");
            Some(SceneCommand {
                path: path.to_string(),
                transition: transition.to_string(),
            })
        }
        _ => {
            warn!("Malformed {:?} value: {:?}", CHANGE_SCENE, value);
            None
        }
    }
}

/// Looks up a UI action key, preferring the nested `ui` object over
/// the top level when both carry it.
fn ui_value<'a>(properties: &'a PropertyBag, key: &str) -> Option<&'a Value> {
    let nested = properties
        .get(UI_NAMESPACE)
        .and_then(Value::as_object)
        .and_then(|ui| ui.get(key));
    nested.or_else(|| properties.get(key))
}

fn has_ui_actions(properties: &PropertyBag) -> bool {
    const UI_KEYS: [&str; 6] = [
        CLOSE_ALL_MENUS,
        CLOSE_ALL_DIALOGS,
        OPEN_MENU,
        OPEN_DIALOG,
        SHOW_UI_ELEMENT,
        HIDE_UI_ELEMENT,
    ];
    properties.contains_key(UI_NAMESPACE) || UI_KEYS.iter().any(|k| properties.contains_key(*k))
}

/// True when a boolean action key is present and set.
fn flag_value(properties: &PropertyBag, key: &str) -> bool {
    match ui_value(properties, key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Bool(true)) => true,
        Some(other) => {
            warn!("Expected boolean for {:?}, got {:?}", key, other);
            false
        }
    }
}

/// Reads a `(name, flag)` request from a bare name string or a
/// `{name, <flag_key>}` object, with the flag defaulting as configured.
fn named_request(value: &Value, flag_key: &str, flag_default: bool) -> Option<(String, bool)> {
    match value {
        Value::String(name) if !name.is_empty() => Some((name.clone(), flag_default)),
        Value::Object(map) => {
            let name = map.get("name").and_then(Value::as_str).unwrap_or("");
            if name.is_empty() {
                return None;
            }
            let flag = map
                .get(flag_key)
                .and_then(Value::as_bool)
                .unwrap_or(flag_default);
            Some((name.to_string(), flag))
        }
        _ => None,
    }
}

fn element_name(value: &Value) -> Option<&str> {
    match value.as_str() {
        Some(name) if !name.is_empty() => Some(name),
        _ => None,
    }
}

//=========================================================================
// Tests
//=========================================================================
