//=========================================================================
// Input Buffer
//
// Collects converted input events between two frame boundaries into two
// categories: discrete and continuous. Acts as a transient aggregator
// between the Platform and the core thread.
//
// Responsibilities:
// - Keep every key transition and wheel notch in arrival order
// - Collapse consecutive identical key and modifier events
// - Coalesce pointer motion to the latest position
// - Hand both lists over via `drain()`
//
// Notes:
// Wheel events are never collapsed: two identical notches must move the
// scale and distance accumulators twice.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Internally maintains:
// - `discrete`: ordered key, modifier and wheel events
// - `continuous`: last-known pointer position, if it moved
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Option<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: None,
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest pointer event replaces any previous one.
    //
    pub fn push_continuous(&mut self, event: InputEvent) {
        self.continuous = Some(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Duplicate consecutive key or modifier events are ignored; wheel
    // events are not.
    //
    pub fn push_discrete(&mut self, event: InputEvent) {
        let is_state = matches!(
            event,
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } | InputEvent::ModifiersChanged { .. }
        );
        if is_state && self.discrete.last() == Some(&event) {
            return;
        }
        self.discrete.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns `None` when nothing was buffered since the last drain.
    //
    pub fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.take().into_iter().collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------
    pub fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
