//=========================================================================
// Bus System
//=========================================================================
//
// Cross-cutting notifications for subsystems that are otherwise
// unrelated to the state machine (audio ducking on pause, analytics on
// state change, loading screens on scene change, ...).
//
//=========================================================================

//=== Module Declarations =================================================

mod notification_bus;

//=== Public API ==========================================================

pub use notification_bus::{
    payload, Notification, NotificationBus, GAME_PAUSED, GAME_STATE_CHANGED, SCENE_CHANGED,
};
