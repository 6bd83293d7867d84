//=========================================================================
// Detection Simulator Library Root
//
// Synthetic source of camera detection events (gestures, objects, faces
// and recognized persons) for exercising detection consumers without a
// camera.
//
// Responsibilities:
// - Expose the simulator facade (`SimulatorBuilder`, `Simulator`)
// - Keep the winit platform layer hidden from end users
// - Expose the core systems for hosts that drive the pipeline directly
//
// Typical usage:
// ```no_run
// use detection_simulator::prelude::*;
//
// let simulator = SimulatorBuilder::new().build().unwrap();
// let events = simulator.subscribe();
// let handle = simulator.handle();
// handle.set_category_enabled(Category::Gesture, true).unwrap();
// handle.modules_started().unwrap();
// simulator.run().unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains every platform-independent system: configuration,
// coordinate mapping, input tracking, the entity store, the frame
// simulator, notifications and the debug emitters.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and Winit input conversion.
// `simulator` defines the builder and runtime entry points.
//
mod platform;
mod simulator;

//--- Public Exports ------------------------------------------------------

pub use simulator::{HandleError, Simulator, SimulatorBuilder, SimulatorHandle};
