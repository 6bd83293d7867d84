//=========================================================================
// Core Bridge
//=========================================================================
//
// Contract between the core thread and its producers (the winit platform
// layer and host handles).
//
// Components:
// - `interface`: Event, command and error definitions
// - `event_collector`: Core-side draining of the channel once per tick
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::{Command, CoreEvent, PlatformError};
