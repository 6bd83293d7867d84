//=========================================================================
// Bridge Interface
//=========================================================================
//
// Messages that cross into the core thread, and the errors of the
// windowed front end that produces some of them.
//
// Producers:
//   Platform (winit)   → CoreEvent::Inputs / CoreEvent::Shutdown
//   SimulatorHandle    → CoreEvent::Command / Inputs / Shutdown
//
//=========================================================================

//=== External Crates =====================================================

use thiserror::Error;
use winit::error::EventLoopError;

//=== Internal Dependencies ===============================================

use crate::core::entity::{Category, EntityMeta, EntityTemplate};
use crate::core::input::InputEvent;

//=== Command =============================================================

/// Host-side request applied by the core thread between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append an empty template/meta pair.
    AppendEntity(Category),

    /// Remove the pair at `index`, shifting later entries down.
    RemoveEntity { category: Category, index: usize },

    /// Replace the pair at `index`.
    UpdateEntity {
        category: Category,
        index: usize,
        template: EntityTemplate,
        meta: EntityMeta,
    },

    /// Toggle emission for one category.
    SetCategoryEnabled { category: Category, enabled: bool },

    /// The host finished starting up; emission begins after the ready delay.
    ModulesStarted,
}

//=== CoreEvent ===========================================================

/// Everything the core thread receives over its channel.
#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// Batched input events for a frame.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    Command(Command),

    /// Window closed or host requested shutdown.
    Shutdown,
}

//=== PlatformError =======================================================

/// Windowed front-end initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),
}
