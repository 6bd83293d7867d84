//=========================================================================
// Input
//=========================================================================
//
// Platform-independent input vocabulary and the interaction tracker that
// turns it into live simulation modifiers.
//
// Components:
// - `event`: KeyCode, Modifiers, InputEvent
// - `state_tracker`: InteractionTracker and its per-tick snapshot
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers};
pub use state_tracker::{
    InteractionSnapshot, InteractionTracker, DISTANCE_INITIAL, DISTANCE_MAX, DISTANCE_MIN,
    SCALE_MAX, SCALE_MIN,
};
