//=========================================================================
// Hook Registry
//=========================================================================
//
// Startup-time registry mapping callback names from the catalog to
// typed closures. Replaces by-name reflective dispatch: resolution
// happens against an explicit table, and a miss is a logged warning
// that never aborts the transition.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::collections::VecDeque;

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::collab::{SceneDirector, TimeScaler, UiSurface};
use crate::core::stage::StageContext;

//=== Transition Requests =================================================

/// Follow-up transitions requested from inside a hook.
///
/// Hooks cannot re-enter the machine directly; they queue targets here
/// and the machine applies them, depth-first, once the in-flight
/// transition completes.
#[derive(Debug, Default)]
pub struct TransitionRequests {
    targets: VecDeque<String>,
}

impl TransitionRequests {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Requests a follow-up transition to `target`.
    pub fn request(&mut self, target: impl Into<String>) {
        self.targets.push_back(target.into());
    }

    /// True when no follow-ups are queued.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub(crate) fn pop(&mut self) -> Option<String> {
        self.targets.pop_front()
    }

    /// Front-loads `other`, preserving its order, so requests made by
    /// an inner transition run before the outer transition's remainder.
    pub(crate) fn prepend(&mut self, other: TransitionRequests) {
        for target in other.targets.into_iter().rev() {
            self.targets.push_front(target);
        }
    }
}

//=== Hook Arguments ======================================================

/// Everything a hook may touch: the stage and the follow-up queue.
pub struct HookArgs<'a, S: SceneDirector, U: UiSurface, T: TimeScaler> {
    pub stage: &'a mut StageContext<S, U, T>,
    pub requests: &'a mut TransitionRequests,
}

//=== Hook Registry =======================================================

/// Named entry/exit callbacks, registered once during setup.
pub struct HookRegistry<S: SceneDirector, U: UiSurface, T: TimeScaler> {
    hooks: HashMap<String, Box<dyn FnMut(&mut HookArgs<'_, S, U, T>)>>,
}

impl<S: SceneDirector, U: UiSurface, T: TimeScaler> HookRegistry<S, U, T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Registers a hook under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, hook: F)
    where
        F: FnMut(&mut HookArgs<'_, S, U, T>) + 'static,
    {
        let name = name.into();
        if self.hooks.insert(name.clone(), Box::new(hook)).is_some() {
            warn!("Hook {:?} was already registered and has been replaced", name);
        }
    }

    /// True if a hook is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Invokes the hook registered under `name`.
    ///
    /// Returns false (after a warning) when the name does not resolve;
    /// the caller proceeds with the rest of the transition either way.
    pub(crate) fn invoke(&mut self, name: &str, args: &mut HookArgs<'_, S, U, T>) -> bool {
        match self.hooks.get_mut(name) {
            Some(hook) => {
                hook(args);
                true
            }
            None => {
                warn!("No hook registered under {:?}", name);
                false
            }
        }
    }
}

impl<S: SceneDirector, U: UiSurface, T: TimeScaler> Default for HookRegistry<S, U, T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
