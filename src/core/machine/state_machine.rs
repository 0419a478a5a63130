//=========================================================================
// Game State Machine
//=========================================================================
//
// Owner of the current application state.
//
// A transition validates against the installed catalog, then runs in
// strict synchronous order:
//
//   publish game_state_changed → exit hook → entry hook → properties
//
// Rejections (unknown target, transition not allowed, no catalog) are
// soft: logged, state unchanged, no side effects. Hooks queue
// follow-up transitions instead of re-entering the machine; follow-ups
// run depth-first after the in-flight transition, bounded by
// MAX_TRANSITION_CHAIN.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info};
use serde_json::Value;

//=== Internal Dependencies ===============================================

use crate::core::bus::{payload, GAME_PAUSED, GAME_STATE_CHANGED};
use crate::core::catalog::{merged_properties, transition_allowed, PropertyBag, StateCatalog};
use crate::core::collab::{SceneDirector, TimeScaler, UiSurface};
use crate::core::stage::StageContext;

use super::bootstrap::BootstrapGate;
use super::dispatcher;
use super::hooks::{HookArgs, HookRegistry, TransitionRequests};
use super::pause::{PauseCoordinator, PAUSED_STATE, PLAYING_STATE};

//=== Constants ===========================================================

/// Upper bound on hook-requested follow-up transitions per external
/// call. The remainder of a longer chain is dropped with an error log.
pub const MAX_TRANSITION_CHAIN: usize = 8;

//=== Game State Machine ==================================================

/// The application-wide mode machine.
///
/// Holds the catalog slot, the current state, the hook registry, the
/// pause coordinator, and the bootstrap gate. Collaborators arrive per
/// call through the [`StageContext`]; the machine stores no handles of
/// its own.
pub struct GameStateMachine<S: SceneDirector, U: UiSurface, T: TimeScaler> {
    catalog: Option<StateCatalog>,
    current_state: String,
    hooks: HookRegistry<S, U, T>,
    pause: PauseCoordinator,
    bootstrap: BootstrapGate,
}

impl<S: SceneDirector, U: UiSurface, T: TimeScaler> GameStateMachine<S, U, T> {
    //--- Construction -----------------------------------------------------

    /// Creates a machine with no catalog; every transition soft-fails
    /// until one is installed.
    pub fn new() -> Self {
        Self {
            catalog: None,
            current_state: String::new(),
            hooks: HookRegistry::new(),
            pause: PauseCoordinator::new(),
            bootstrap: BootstrapGate::new(),
        }
    }

    /// Installs (or replaces) the catalog.
    ///
    /// Before the first transition this also arms the bootstrap gate
    /// with the catalog's default state. Replacing the catalog later
    /// (hot reload) leaves `current_state` untouched.
    pub fn install_catalog(&mut self, catalog: StateCatalog) {
        info!(
            "Catalog installed: {} states, default {:?}",
            catalog.len(),
            catalog.default_state()
        );
        if self.current_state.is_empty() {
            self.bootstrap.arm(catalog.default_state());
        }
        self.catalog = Some(catalog);
    }

    //--- Queries ----------------------------------------------------------

    /// The current state name; empty before bootstrap.
    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    /// The installed catalog, if any.
    pub fn catalog(&self) -> Option<&StateCatalog> {
        self.catalog.as_ref()
    }

    /// Whether the pause coordinator has the game paused.
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// True once the bootstrap gate has entered the initial state.
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrap.is_consumed()
    }

    /// Hook registry, for registering entry/exit callbacks by name.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry<S, U, T> {
        &mut self.hooks
    }

    //--- Transitions ------------------------------------------------------

    /// Requests a transition to `target`.
    pub fn change_state(&mut self, target: &str, stage: &mut StageContext<S, U, T>) {
        self.change_state_with(target, PropertyBag::new(), stage);
    }

    /// Requests a transition to `target` with caller-supplied property
    /// overrides, deep-merged onto the state's own properties.
    pub fn change_state_with(
        &mut self,
        target: &str,
        overrides: PropertyBag,
        stage: &mut StageContext<S, U, T>,
    ) {
        let mut requests = TransitionRequests::new();
        self.transition(target, &overrides, stage, &mut requests);
        self.drain_requests(requests, stage);
    }

    /// Performs one validated transition. Returns false on rejection.
    fn transition(
        &mut self,
        target: &str,
        overrides: &PropertyBag,
        stage: &mut StageContext<S, U, T>,
        requests: &mut TransitionRequests,
    ) -> bool {
        if target == self.current_state {
            debug!("Already in state {:?}", target);
            return false;
        }
        let Some(catalog) = self.catalog.as_ref() else {
            error!("No catalog loaded; cannot enter {:?}", target);
            return false;
        };
        if !catalog.contains(target) {
            error!("Unknown state {:?}", target);
            return false;
        }
        if !transition_allowed(catalog, &self.current_state, target) {
            error!(
                "Transition {:?} -> {:?} is not allowed",
                self.current_state, target
            );
            return false;
        }

        let exit_hook = catalog
            .get(&self.current_state)
            .and_then(|def| def.exit_callback.clone());
        let (entry_hook, base_properties) = match catalog.get(target) {
            Some(def) => (def.entry_callback.clone(), def.properties.clone()),
            None => (None, PropertyBag::new()),
        };

        let old = std::mem::replace(&mut self.current_state, target.to_string());
        debug!("State changed {:?} -> {:?}", old, target);
        stage.bus.publish(
            GAME_STATE_CHANGED,
            payload([
                ("from", Value::from(old.as_str())),
                ("to", Value::from(target)),
            ]),
        );

        {
            let mut args = HookArgs {
                stage: &mut *stage,
                requests: &mut *requests,
            };
            if let Some(name) = exit_hook {
                self.hooks.invoke(&name, &mut args);
            }
            if let Some(name) = entry_hook {
                self.hooks.invoke(&name, &mut args);
            }
        }

        let properties = merged_properties(&base_properties, overrides);
        dispatcher::apply(&properties, stage);
        true
    }

    /// Applies hook-requested follow-up transitions, depth-first,
    /// stopping at MAX_TRANSITION_CHAIN.
    fn drain_requests(
        &mut self,
        mut requests: TransitionRequests,
        stage: &mut StageContext<S, U, T>,
    ) {
        let mut chained = 0usize;
        while let Some(target) = requests.pop() {
            chained += 1;
            if chained > MAX_TRANSITION_CHAIN {
                error!(
                    "Transition chain exceeded {} follow-ups; dropping the rest",
                    MAX_TRANSITION_CHAIN
                );
                break;
            }
            let mut inner = TransitionRequests::new();
            self.transition(&target, &PropertyBag::new(), stage, &mut inner);
            requests.prepend(inner);
        }
    }

    //--- Pause ------------------------------------------------------------

    /// Freezes time, broadcasts `game_paused`, and targets the PAUSED
    /// state. A missing PAUSED state is a configuration error: the flag
    /// still flips, the transition is rejected and logged.
    pub fn pause(&mut self, stage: &mut StageContext<S, U, T>) {
        if !self.pause.engage(&mut stage.time) {
            return;
        }
        stage
            .bus
            .publish(GAME_PAUSED, payload([("paused", Value::Bool(true))]));
        self.change_state(PAUSED_STATE, stage);
    }

    /// Restores the pre-pause time scale, broadcasts `game_paused`, and
    /// targets the PLAYING state.
    pub fn resume(&mut self, stage: &mut StageContext<S, U, T>) {
        if !self.pause.release(&mut stage.time) {
            return;
        }
        stage
            .bus
            .publish(GAME_PAUSED, payload([("paused", Value::Bool(false))]));
        self.change_state(PLAYING_STATE, stage);
    }

    /// Pauses or resumes based on the current flag.
    pub fn toggle_pause(&mut self, stage: &mut StageContext<S, U, T>) {
        if self.pause.is_paused() {
            self.resume(stage);
        } else {
            self.pause(stage);
        }
    }

    //--- Bootstrap --------------------------------------------------------

    /// Consumes the bootstrap gate when the UI is ready.
    ///
    /// Sets the initial state directly, since there is no prior state
    /// to validate against or exit from, then publishes the change and
    /// runs the entry hook and properties. Returns true the one time
    /// it fires.
    pub(crate) fn run_bootstrap(&mut self, stage: &mut StageContext<S, U, T>) -> bool {
        if self.bootstrap.pending().is_none() {
            return false;
        }
        if !stage.ui.is_ready() {
            debug!("UI not ready; holding the initial state");
            return false;
        }
        let Some(initial) = self.bootstrap.consume() else {
            return false;
        };

        let Some(catalog) = self.catalog.as_ref() else {
            error!("No catalog loaded; cannot enter initial state {:?}", initial);
            return false;
        };
        if !catalog.contains(&initial) {
            error!("Initial state {:?} is not defined", initial);
            return false;
        }
        let (entry_hook, properties) = match catalog.get(&initial) {
            Some(def) => (def.entry_callback.clone(), def.properties.clone()),
            None => (None, PropertyBag::new()),
        };

        info!("Entering initial state {:?}", initial);
        self.current_state = initial.clone();
        stage.bus.publish(
            GAME_STATE_CHANGED,
            payload([
                ("from", Value::from("")),
                ("to", Value::from(initial.as_str())),
            ]),
        );

        let mut requests = TransitionRequests::new();
        if let Some(name) = entry_hook {
            let mut args = HookArgs {
                stage: &mut *stage,
                requests: &mut requests,
            };
            self.hooks.invoke(&name, &mut args);
        }
        dispatcher::apply(&properties, stage);
        self.drain_requests(requests, stage);
        true
    }
}

impl<S: SceneDirector, U: UiSurface, T: TimeScaler> Default for GameStateMachine<S, U, T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collab::{GameClock, SceneTracker, UiRegistry};

    type TestMachine = GameStateMachine<SceneTracker, UiRegistry, GameClock>;
    type TestStage = StageContext<SceneTracker, UiRegistry, GameClock>;

    const GAME_CATALOG: &str = r#"{
        "defaultState": "MENU",
        "states": {
            "MENU": { "allowedTransitions": ["PLAYING"] },
            "PLAYING": { "allowedTransitions": ["PAUSED", "MENU"] },
            "PAUSED": { "allowedTransitions": ["PLAYING"] }
        }
    }"#;

    fn ready_stage() -> TestStage {
        let mut ui = UiRegistry::new();
        ui.set_ready(true);
        StageContext::new(SceneTracker::new(), ui, GameClock::new())
    }

    fn bootstrapped_machine(stage: &mut TestStage) -> TestMachine {
        let mut machine = TestMachine::new();
        machine.install_catalog(StateCatalog::from_json(GAME_CATALOG).unwrap());
        assert!(machine.run_bootstrap(stage));
        machine
    }

    #[test]
    fn starts_empty_without_catalog() {
        let machine = TestMachine::new();
        assert_eq!(machine.current_state(), "");
        assert!(machine.catalog().is_none());
        assert!(!machine.is_paused());
    }

    #[test]
    fn change_state_without_catalog_is_rejected() {
        let mut machine = TestMachine::new();
        let mut stage = ready_stage();
        machine.change_state("MENU", &mut stage);
        assert_eq!(machine.current_state(), "");
    }

    #[test]
    fn bootstrap_enters_the_default_state_once() {
        let mut stage = ready_stage();
        let machine = bootstrapped_machine(&mut stage);
        assert_eq!(machine.current_state(), "MENU");
        assert!(machine.is_bootstrapped());
    }

    #[test]
    fn bootstrap_waits_for_ui_readiness() {
        let mut stage = ready_stage();
        stage.ui.set_ready(false);

        let mut machine = TestMachine::new();
        machine.install_catalog(StateCatalog::from_json(GAME_CATALOG).unwrap());
        assert!(!machine.run_bootstrap(&mut stage));
        assert_eq!(machine.current_state(), "");

        stage.ui.set_ready(true);
        assert!(machine.run_bootstrap(&mut stage));
        assert_eq!(machine.current_state(), "MENU");
    }

    #[test]
    fn rebootstrap_is_a_no_op() {
        let mut stage = ready_stage();
        let mut machine = bootstrapped_machine(&mut stage);
        machine.change_state("PLAYING", &mut stage);

        assert!(!machine.run_bootstrap(&mut stage));
        assert_eq!(machine.current_state(), "PLAYING");
    }

    #[test]
    fn disallowed_transition_leaves_state_unchanged() {
        let mut stage = ready_stage();
        let mut machine = bootstrapped_machine(&mut stage);

        machine.change_state("PAUSED", &mut stage);
        assert_eq!(machine.current_state(), "MENU");
    }

    #[test]
    fn allowed_transition_changes_state_and_notifies() {
        let mut stage = ready_stage();
        let mut machine = bootstrapped_machine(&mut stage);
        let changes = stage.bus.subscribe(GAME_STATE_CHANGED);

        machine.change_state("PLAYING", &mut stage);
        assert_eq!(machine.current_state(), "PLAYING");

        let note = changes.try_recv().unwrap();
        assert_eq!(note.data["from"], "MENU");
        assert_eq!(note.data["to"], "PLAYING");
    }

    #[test]
    fn same_state_transition_is_silent() {
        let mut stage = ready_stage();
        let mut machine = bootstrapped_machine(&mut stage);
        let changes = stage.bus.subscribe(GAME_STATE_CHANGED);

        machine.change_state("MENU", &mut stage);
        assert_eq!(machine.current_state(), "MENU");
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn unknown_state_is_rejected() {
        let mut stage = ready_stage();
        let mut machine = bootstrapped_machine(&mut stage);
        machine.change_state("NO_SUCH_STATE", &mut stage);
        assert_eq!(machine.current_state(), "MENU");
    }

    #[test]
    fn exit_and_entry_hooks_run_in_order() {
        let mut stage = ready_stage();
        let mut machine = TestMachine::new();
        machine.install_catalog(
            StateCatalog::from_json(
                r#"{
                    "defaultState": "MENU",
                    "states": {
                        "MENU": { "exitCallback": "on_exit_menu" },
                        "PLAYING": { "entryCallback": "on_enter_playing" }
                    }
                }"#,
            )
            .unwrap(),
        );

        // Order is observable through the scene path: exit writes first.
        machine.hooks_mut().register("on_exit_menu", |args| {
            args.stage.scenes.change_scene("exited", "none");
        });
        machine.hooks_mut().register("on_enter_playing", |args| {
            args.stage.scenes.change_scene("entered", "none");
        });

        machine.run_bootstrap(&mut stage);
        machine.change_state("PLAYING", &mut stage);

        assert_eq!(stage.scenes.swap_count(), 2);
        assert_eq!(stage.scenes.current_scene_path(), "entered");
    }

    #[test]
    fn unresolvable_hook_does_not_block_the_transition() {
        let mut stage = ready_stage();
        stage.ui.register_menu("main");
        let mut machine = TestMachine::new();
        machine.install_catalog(
            StateCatalog::from_json(
                r#"{
                    "defaultState": "MENU",
                    "states": {
                        "MENU": {},
                        "PLAYING": {
                            "entryCallback": "never_registered",
                            "properties": { "openMenu": "main" }
                        }
                    }
                }"#,
            )
            .unwrap(),
        );
        machine.run_bootstrap(&mut stage);

        machine.change_state("PLAYING", &mut stage);
        assert_eq!(machine.current_state(), "PLAYING");
        // Properties still applied after the miss.
        assert!(stage.ui.is_menu_open("main"));
    }

    #[test]
    fn pause_round_trip_restores_scale() {
        let mut stage = ready_stage();
        stage.time.set_time_scale(0.5);
        let mut machine = bootstrapped_machine(&mut stage);
        machine.change_state("PLAYING", &mut stage);

        machine.pause(&mut stage);
        assert!(machine.is_paused());
        assert_eq!(machine.current_state(), "PAUSED");
        assert_eq!(stage.time.time_scale(), 0.0);

        machine.resume(&mut stage);
        assert!(!machine.is_paused());
        assert_eq!(machine.current_state(), "PLAYING");
        assert_eq!(stage.time.time_scale(), 0.5);
    }

    #[test]
    fn toggle_pause_dispatches_on_the_flag() {
        let mut stage = ready_stage();
        let mut machine = bootstrapped_machine(&mut stage);
        machine.change_state("PLAYING", &mut stage);

        machine.toggle_pause(&mut stage);
        assert!(machine.is_paused());
        machine.toggle_pause(&mut stage);
        assert!(!machine.is_paused());
    }

    #[test]
    fn pause_without_paused_state_flips_flag_but_not_state() {
        let mut stage = ready_stage();
        let mut machine = TestMachine::new();
        machine.install_catalog(
            StateCatalog::from_json(
                r#"{"defaultState": "MENU", "states": {"MENU": {}}}"#,
            )
            .unwrap(),
        );
        machine.run_bootstrap(&mut stage);

        machine.pause(&mut stage);
        assert!(machine.is_paused());
        assert_eq!(machine.current_state(), "MENU");
    }

    #[test]
    fn follow_up_requests_chain_depth_first() {
        let mut stage = ready_stage();
        let mut machine = TestMachine::new();
        machine.install_catalog(
            StateCatalog::from_json(
                r#"{
                    "defaultState": "MENU",
                    "states": {
                        "MENU": {},
                        "LOADING": { "entryCallback": "on_enter_loading" },
                        "PLAYING": {}
                    }
                }"#,
            )
            .unwrap(),
        );
        machine.hooks_mut().register("on_enter_loading", |args| {
            args.requests.request("PLAYING");
        });
        machine.run_bootstrap(&mut stage);

        machine.change_state("LOADING", &mut stage);
        assert_eq!(machine.current_state(), "PLAYING");
    }

    #[test]
    fn runaway_follow_up_chain_is_bounded() {
        let mut stage = ready_stage();
        let mut machine = TestMachine::new();
        machine.install_catalog(
            StateCatalog::from_json(
                r#"{
                    "defaultState": "A",
                    "states": {
                        "A": { "entryCallback": "ping" },
                        "B": { "entryCallback": "pong" }
                    }
                }"#,
            )
            .unwrap(),
        );
        machine.hooks_mut().register("ping", |args| {
            args.requests.request("B");
        });
        machine.hooks_mut().register("pong", |args| {
            args.requests.request("A");
        });

        // Entry hook of A immediately requests B, which requests A, ...
        // The chain must stop at the bound instead of spinning forever.
        machine.run_bootstrap(&mut stage);
        assert!(machine.is_bootstrapped());
    }

    #[test]
    fn catalog_reload_keeps_current_state() {
        let mut stage = ready_stage();
        let mut machine = bootstrapped_machine(&mut stage);
        machine.change_state("PLAYING", &mut stage);

        machine.install_catalog(
            StateCatalog::from_json(
                r#"{
                    "defaultState": "MENU",
                    "states": {
                        "MENU": {},
                        "PLAYING": { "allowedTransitions": ["MENU"] }
                    }
                }"#,
            )
            .unwrap(),
        );
        assert_eq!(machine.current_state(), "PLAYING");

        // New rules are in force immediately.
        machine.change_state("MENU", &mut stage);
        assert_eq!(machine.current_state(), "MENU");
    }
}
