//=========================================================================
// Stage Director
//=========================================================================
//
// Main entry point and coordinator for the framework.
//
// Architecture:
// ```text
//     DirectorBuilder  ──build()──>  StageDirector  ──tick()──>  [loop]
//         │                              │
//         ├─ with_catalog()              ├─ owns GameStateMachine
//         ├─ with_hook()                 └─ owns StageContext
//         └─ collaborator injection          (scene/UI/time, bus, queue)
// ```
//
// `tick()` is the fixed drain point of the scheduler pass: the
// bootstrap gate fires here, and deferred scene swaps are applied and
// announced here, never in the middle of a transition.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use crossbeam_channel::Receiver;
use log::{debug, info};
use serde_json::Value;

//=== Internal Dependencies ===============================================

use crate::core::bus::{payload, Notification, SCENE_CHANGED};
use crate::core::catalog::{CatalogError, PropertyBag, StateCatalog};
use crate::core::collab::{
    GameClock, SceneDirector, SceneTracker, TimeScaler, UiRegistry, UiSurface,
};
use crate::core::machine::{GameStateMachine, HookArgs, HookRegistry};
use crate::core::stage::StageContext;

//=== DirectorBuilder =====================================================

/// Builder for configuring and constructing a [`StageDirector`].
///
/// Collaborators are injected up front; the catalog and hooks are
/// optional extras layered on before `build()`.
///
/// # Examples
///
/// With the in-memory collaborators:
/// ```
/// use statecraft::DirectorBuilder;
/// use statecraft::core::catalog::StateCatalog;
///
/// let catalog = StateCatalog::from_json(
///     r#"{"defaultState": "MENU", "states": {"MENU": {}, "PLAYING": {}}}"#,
/// ).unwrap();
///
/// let mut director = DirectorBuilder::with_defaults()
///     .with_catalog(catalog)
///     .build();
///
/// director.ui_mut().set_ready(true);
/// director.tick();
/// assert_eq!(director.current_state(), "MENU");
/// ```
pub struct DirectorBuilder<S: SceneDirector, U: UiSurface, T: TimeScaler> {
    catalog: Option<StateCatalog>,
    scenes: S,
    ui: U,
    time: T,
    hooks: HookRegistry<S, U, T>,
}

impl DirectorBuilder<SceneTracker, UiRegistry, GameClock> {
    /// Creates a builder around the crate's in-memory collaborators.
    pub fn with_defaults() -> Self {
        Self::new(SceneTracker::new(), UiRegistry::new(), GameClock::new())
    }
}

impl<S: SceneDirector, U: UiSurface, T: TimeScaler> DirectorBuilder<S, U, T> {
    /// Creates a builder with the three injected collaborators.
    pub fn new(scenes: S, ui: U, time: T) -> Self {
        Self {
            catalog: None,
            scenes,
            ui,
            time,
            hooks: HookRegistry::new(),
        }
    }

    /// Installs a pre-validated catalog.
    pub fn with_catalog(mut self, catalog: StateCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Loads and installs a catalog from a JSON file.
    pub fn with_catalog_path(self, path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let catalog = StateCatalog::load(path)?;
        Ok(self.with_catalog(catalog))
    }

    /// Registers an entry/exit hook under the name the catalog refers
    /// to it by.
    pub fn with_hook<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: FnMut(&mut HookArgs<'_, S, U, T>) + 'static,
    {
        self.hooks.register(name, hook);
        self
    }

    /// Builds the director. If a catalog was supplied the bootstrap
    /// gate is armed; the initial state is entered on the first
    /// `tick()` that observes a ready UI.
    pub fn build(self) -> StageDirector<S, U, T> {
        info!("Building stage director");
        let mut machine = GameStateMachine::new();
        *machine.hooks_mut() = self.hooks;
        if let Some(catalog) = self.catalog {
            machine.install_catalog(catalog);
        }
        StageDirector {
            machine,
            stage: StageContext::new(self.scenes, self.ui, self.time),
        }
    }
}

//=== StageDirector =======================================================

/// Facade over the state machine and its stage.
///
/// The application calls `tick()` once per scheduler pass and the
/// transition API (`change_state`, `pause`, ...) from gameplay and UI
/// code. Everything else (validation, hooks, property effects,
/// deferred scene swaps, notifications) happens behind this surface.
pub struct StageDirector<S: SceneDirector, U: UiSurface, T: TimeScaler> {
    machine: GameStateMachine<S, U, T>,
    stage: StageContext<S, U, T>,
}

impl<S: SceneDirector, U: UiSurface, T: TimeScaler> StageDirector<S, U, T> {
    //--- Tick Boundary ----------------------------------------------------

    /// Runs the fixed per-tick drain point:
    ///
    /// 1. Fires the bootstrap gate once the UI reports ready.
    /// 2. Applies deferred scene swaps and publishes `scene_changed`
    ///    for each.
    pub fn tick(&mut self) {
        self.machine.run_bootstrap(&mut self.stage);

        for command in self.stage.scene_commands.take() {
            debug!("Applying deferred scene swap to {:?}", command.path);
            self.stage
                .scenes
                .change_scene(&command.path, &command.transition);
            self.stage.bus.publish(
                SCENE_CHANGED,
                payload([
                    ("path", Value::from(command.path.as_str())),
                    ("transition", Value::from(command.transition.as_str())),
                ]),
            );
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Requests a state change; see [`GameStateMachine::change_state`].
    pub fn change_state(&mut self, target: &str) {
        self.machine.change_state(target, &mut self.stage);
    }

    /// Requests a state change with per-call property overrides.
    pub fn change_state_with(&mut self, target: &str, overrides: PropertyBag) {
        self.machine.change_state_with(target, overrides, &mut self.stage);
    }

    /// Pauses the game; see [`GameStateMachine::pause`].
    pub fn pause(&mut self) {
        self.machine.pause(&mut self.stage);
    }

    /// Resumes the game.
    pub fn resume(&mut self) {
        self.machine.resume(&mut self.stage);
    }

    /// Pauses or resumes based on the current flag.
    pub fn toggle_pause(&mut self) {
        self.machine.toggle_pause(&mut self.stage);
    }

    //--- Catalog ----------------------------------------------------------

    /// Re-loads the catalog from disk and swaps it in atomically.
    ///
    /// `current_state` is untouched. On failure the previous catalog
    /// stays in force and the error is returned to the caller.
    pub fn reload_catalog(&mut self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let catalog = StateCatalog::load(path)?;
        self.machine.install_catalog(catalog);
        Ok(())
    }

    /// Installs an already-validated catalog (non-file sources).
    pub fn install_catalog(&mut self, catalog: StateCatalog) {
        self.machine.install_catalog(catalog);
    }

    //--- Queries ----------------------------------------------------------

    /// Current state name; empty before bootstrap.
    pub fn current_state(&self) -> &str {
        self.machine.current_state()
    }

    /// Whether the game is paused.
    pub fn is_paused(&self) -> bool {
        self.machine.is_paused()
    }

    /// True once the initial state has been entered.
    pub fn is_bootstrapped(&self) -> bool {
        self.machine.is_bootstrapped()
    }

    /// The installed catalog, if any.
    pub fn catalog(&self) -> Option<&StateCatalog> {
        self.machine.catalog()
    }

    //--- Subscriptions ----------------------------------------------------

    /// Subscribes to one event by name.
    pub fn subscribe(&mut self, event: &str) -> Receiver<Notification> {
        self.stage.bus.subscribe(event)
    }

    /// Subscribes to every event.
    pub fn subscribe_all(&mut self) -> Receiver<Notification> {
        self.stage.bus.subscribe_all()
    }

    //--- Collaborator Access ----------------------------------------------

    /// Scene collaborator.
    pub fn scenes(&self) -> &S {
        &self.stage.scenes
    }

    /// UI collaborator.
    pub fn ui(&self) -> &U {
        &self.stage.ui
    }

    /// UI collaborator, mutable (registration, readiness).
    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.stage.ui
    }

    /// Time collaborator.
    pub fn time(&self) -> &T {
        &self.stage.time
    }

    /// Time collaborator, mutable (per-frame advance).
    pub fn time_mut(&mut self) -> &mut T {
        &mut self.stage.time
    }

    /// Hook registry, for registrations after construction.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry<S, U, T> {
        self.machine.hooks_mut()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bus::GAME_STATE_CHANGED;
    use serde_json::json;

    fn catalog() -> StateCatalog {
        StateCatalog::from_json(
            r#"{
                "defaultState": "MENU",
                "states": {
                    "MENU": { "allowedTransitions": ["PLAYING"] },
                    "PLAYING": {
                        "allowedTransitions": ["MENU"],
                        "properties": { "changeScene": "levels/level1" }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn builder_without_catalog_never_bootstraps() {
        let mut director = DirectorBuilder::with_defaults().build();
        director.ui_mut().set_ready(true);
        director.tick();
        assert_eq!(director.current_state(), "");
        assert!(!director.is_bootstrapped());
    }

    #[test]
    fn bootstrap_fires_on_first_ready_tick() {
        let mut director = DirectorBuilder::with_defaults()
            .with_catalog(catalog())
            .build();

        director.tick();
        assert_eq!(director.current_state(), "");

        director.ui_mut().set_ready(true);
        director.tick();
        assert_eq!(director.current_state(), "MENU");
    }

    #[test]
    fn scene_swap_waits_for_the_tick_boundary() {
        let mut director = DirectorBuilder::with_defaults()
            .with_catalog(catalog())
            .build();
        director.ui_mut().set_ready(true);
        director.tick();

        let events = director.subscribe_all();
        director.change_state("PLAYING");

        // The transition completed but the swap has not materialized.
        assert_eq!(director.current_state(), "PLAYING");
        assert_eq!(director.scenes().current_scene_path(), "");

        director.tick();
        assert_eq!(director.scenes().current_scene_path(), "levels/level1");

        let order: Vec<_> = events.try_iter().map(|n| n.event).collect();
        assert_eq!(order, vec![GAME_STATE_CHANGED, SCENE_CHANGED]);
    }

    #[test]
    fn change_state_with_overrides_reaches_the_dispatcher() {
        let mut director = DirectorBuilder::with_defaults()
            .with_catalog(catalog())
            .build();
        director.ui_mut().set_ready(true);
        director.tick();

        let overrides = match json!({"changeScene": "levels/level2"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        director.change_state_with("PLAYING", overrides);
        director.tick();

        assert_eq!(director.scenes().current_scene_path(), "levels/level2");
    }

    #[test]
    fn builder_hooks_are_registered() {
        let mut director = DirectorBuilder::with_defaults()
            .with_catalog(
                StateCatalog::from_json(
                    r#"{
                        "defaultState": "MENU",
                        "states": { "MENU": { "entryCallback": "on_enter_menu" } }
                    }"#,
                )
                .unwrap(),
            )
            .with_hook("on_enter_menu", |args| {
                args.stage.scenes.change_scene("menu", "none");
            })
            .build();

        director.ui_mut().set_ready(true);
        director.tick();
        assert_eq!(director.scenes().current_scene_path(), "menu");
    }

    #[test]
    fn reload_failure_keeps_the_old_catalog() {
        let mut director = DirectorBuilder::with_defaults()
            .with_catalog(catalog())
            .build();
        director.ui_mut().set_ready(true);
        director.tick();

        let result = director.reload_catalog("/no/such/catalog.json");
        assert!(result.is_err());
        assert!(director.catalog().is_some());
        assert_eq!(director.current_state(), "MENU");
    }
}
