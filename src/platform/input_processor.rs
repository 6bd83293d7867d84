//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into simulator InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent → InputBuffer
//
// Stateful modifier tracking: caches modifier state from ModifiersChanged
// events, attaches it to subsequent key events and forwards each change so
// the core can drop modifiers released while the window was unfocused. Keys the simulator
// does not react to are filtered (returns None), as is key auto-repeat.
//
// Wheel deltas are normalized to the browser convention the tracker
// expects: positive `delta_y` scrolls down.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers};

/// Pixels per wheel line, matching the usual browser line height.
const PIXELS_PER_LINE: f64 = 100.0;

//=== InputProcessor ======================================================

/// Converts Winit events to InputEvents with stateful modifier tracking.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent events).
    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    /// Updates cached modifier state and returns the matching resync event.
    pub(crate) fn process_modifiers(&mut self, modifiers_state: ModifiersState) -> InputEvent {
        self.update_modifiers(modifiers_state);
        InputEvent::ModifiersChanged {
            modifiers: self.current_modifiers,
        }
    }

    #[cfg(test)]
    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit KeyEvent (filters unmapped keys and auto-repeat).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        let key_code = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(self.create_key_input_event(key_code, key_event.state))
    }

    /// Creates a pointer event (physical pixels, top-left origin).
    pub(crate) fn process_pointer_move(&self, x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMoved { x, y }
    }

    /// Converts a wheel delta to a browser-style `delta_y`.
    pub(crate) fn process_wheel(&self, delta: MouseScrollDelta) -> InputEvent {
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => -f64::from(y) * PIXELS_PER_LINE,
            MouseScrollDelta::PixelDelta(position) => -position.y,
        };
        InputEvent::Wheel { delta_y }
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_key_input_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyDown {
                key,
                modifiers: self.current_modifiers,
            },
            ElementState::Released => InputEvent::KeyUp {
                key,
                modifiers: self.current_modifiers,
            },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit ModifiersState to Modifiers.
///
/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Converts Winit physical key codes to simulator key codes.
///
/// Only the left-hand modifiers and Z are mapped.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::ControlLeft => KeyCode::ControlLeft,
            WinitKeyCode::AltLeft => KeyCode::AltLeft,
            WinitKeyCode::ShiftLeft => KeyCode::ShiftLeft,
            WinitKeyCode::KeyZ => KeyCode::KeyZ,
            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
