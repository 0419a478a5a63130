//=========================================================================
// UI Registry
//=========================================================================
//
// In-memory UI collaborator. Menus, dialogs, and elements are
// registered up front and flipped open/closed by name; the readiness
// flag gates the bootstrap sequence.
//
// Acting on an unregistered name warns and does nothing, mirroring the
// scene-registration contract elsewhere in the framework.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::UiSurface;

//=== UI Registry =========================================================

/// Bookkeeping UI collaborator.
///
/// Register menus, dialogs, and elements during application setup, call
/// `set_ready(true)` once registration is complete, and the effect
/// dispatcher takes it from there.
#[derive(Debug, Default)]
pub struct UiRegistry {
    ready: bool,
    menus: HashMap<String, bool>,
    dialogs: HashMap<String, bool>,
    elements: HashMap<String, bool>,
}

impl UiRegistry {
    //--- Construction -----------------------------------------------------

    /// Creates an empty, not-yet-ready registry.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Registers a menu (initially closed).
    pub fn register_menu(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.menus.insert(name.clone(), false).is_some() {
            warn!("Menu {:?} was already registered and has been reset", name);
        }
    }

    /// Registers a dialog (initially closed).
    pub fn register_dialog(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.dialogs.insert(name.clone(), false).is_some() {
            warn!("Dialog {:?} was already registered and has been reset", name);
        }
    }

    /// Registers a named element (initially visible).
    pub fn register_element(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.elements.insert(name.clone(), true).is_some() {
            warn!("Element {:?} was already registered and has been reset", name);
        }
    }

    /// Marks the surface ready (or not). Actions are ignored until ready.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    //--- Queries ----------------------------------------------------------

    /// True if the named menu is currently open.
    pub fn is_menu_open(&self, name: &str) -> bool {
        self.menus.get(name).copied().unwrap_or(false)
    }

    /// True if the named dialog is currently open.
    pub fn is_dialog_open(&self, name: &str) -> bool {
        self.dialogs.get(name).copied().unwrap_or(false)
    }

    /// True if the named element is currently visible.
    pub fn is_element_visible(&self, name: &str) -> bool {
        self.elements.get(name).copied().unwrap_or(false)
    }

    /// Names of all currently open menus.
    pub fn open_menus(&self) -> Vec<&str> {
        self.menus
            .iter()
            .filter(|(_, open)| **open)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl UiSurface for UiRegistry {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn open_menu(&mut self, name: &str, close_others: bool) {
        if !self.ready {
            debug!("UI not ready; ignoring open_menu {:?}", name);
            return;
        }
        if !self.menus.contains_key(name) {
            warn!("Attempted to open unregistered menu {:?}", name);
            return;
        }
        if close_others {
            for open in self.menus.values_mut() {
                *open = false;
            }
        }
        self.menus.insert(name.to_string(), true);
    }

    fn close_menu(&mut self, name: &str) {
        if !self.ready {
            return;
        }
        match self.menus.get_mut(name) {
            Some(open) => *open = false,
            None => warn!("Attempted to close unregistered menu {:?}", name),
        }
    }

    fn close_all_menus(&mut self) {
        if !self.ready {
            return;
        }
        for open in self.menus.values_mut() {
            *open = false;
        }
    }

    fn open_dialog(&mut self, name: &str, modal: bool) {
        if !self.ready {
            debug!("UI not ready; ignoring open_dialog {:?}", name);
            return;
        }
        if !self.dialogs.contains_key(name) {
            warn!("Attempted to open unregistered dialog {:?}", name);
            return;
        }
        debug!("Opening dialog {:?} (modal: {})", name, modal);
        self.dialogs.insert(name.to_string(), true);
    }

    fn close_all_dialogs(&mut self) {
        if !self.ready {
            return;
        }
        for open in self.dialogs.values_mut() {
            *open = false;
        }
    }

    fn show_element(&mut self, name: &str) {
        if !self.ready {
            return;
        }
        match self.elements.get_mut(name) {
            Some(visible) => *visible = true,
            None => warn!("Attempted to show unregistered element {:?}", name),
        }
    }

    fn hide_element(&mut self, name: &str) {
        if !self.ready {
            return;
        }
        match self.elements.get_mut(name) {
            Some(visible) => *visible = false,
            None => warn!("Attempted to hide unregistered element {:?}", name),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_registry() -> UiRegistry {
        let mut ui = UiRegistry::new();
        ui.register_menu("main");
        ui.register_menu("options");
        ui.register_dialog("confirm_quit");
        ui.register_element("hud");
        ui.set_ready(true);
        ui
    }

    #[test]
    fn actions_before_ready_are_ignored() {
        let mut ui = UiRegistry::new();
        ui.register_menu("main");

        ui.open_menu("main", true);
        assert!(!ui.is_menu_open("main"));

        ui.set_ready(true);
        ui.open_menu("main", true);
        assert!(ui.is_menu_open("main"));
    }

    #[test]
    fn open_menu_can_close_others() {
        let mut ui = ready_registry();
        ui.open_menu("main", false);
        ui.open_menu("options", false);
        assert_eq!(ui.open_menus().len(), 2);

        ui.open_menu("main", true);
        assert!(ui.is_menu_open("main"));
        assert!(!ui.is_menu_open("options"));
    }

    #[test]
    fn unregistered_names_are_ignored() {
        let mut ui = ready_registry();
        ui.open_menu("ghost", true);
        assert!(!ui.is_menu_open("ghost"));

        ui.show_element("ghost");
        assert!(!ui.is_element_visible("ghost"));
    }

    #[test]
    fn close_menu_targets_one_menu() {
        let mut ui = ready_registry();
        ui.open_menu("main", false);
        ui.open_menu("options", false);

        ui.close_menu("options");
        assert!(ui.is_menu_open("main"));
        assert!(!ui.is_menu_open("options"));
    }

    #[test]
    fn dialogs_open_and_close() {
        let mut ui = ready_registry();
        ui.open_dialog("confirm_quit", true);
        assert!(ui.is_dialog_open("confirm_quit"));

        ui.close_all_dialogs();
        assert!(!ui.is_dialog_open("confirm_quit"));
    }

    #[test]
    fn elements_show_and_hide() {
        let mut ui = ready_registry();
        assert!(ui.is_element_visible("hud"));

        ui.hide_element("hud");
        assert!(!ui.is_element_visible("hud"));

        ui.show_element("hud");
        assert!(ui.is_element_visible("hud"));
    }
}
