//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use detection_simulator::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::{HandleError, Simulator, SimulatorBuilder, SimulatorHandle};

// Configuration
pub use crate::core::config::{ConfigError, SimConfig};

// Entities
pub use crate::core::entity::{
    Category, DetectionTemplate, EntityMeta, EntityTemplate, FaceTemplate, MoveKey,
    PersonTemplate, StoreError,
};

// Input
pub use crate::core::input::{InputEvent, KeyCode, Modifiers};

// Output
pub use crate::core::notify::{Detection, Notification, PersonFace, RecognizedPerson};

// Debugging
pub use crate::core::debug_emitter::{DebugDetection, DebugEmitter, DebugFace};
