//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts platform input (Winit) into a small, portable
// vocabulary: the modifier keys that gate entity movement, pointer motion
// in image pixels, and browser-style wheel deltas.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InteractionTracker (modifiers, pointer, scale, distance)
//         ↓
//    InteractionSnapshot (read once per tick)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Only the keys the simulator reacts to are named. The left-hand
/// modifier keys bind entity movement; `KeyZ` is recognised for the
/// Ctrl+Z log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ControlLeft,
    AltLeft,
    ShiftLeft,
    KeyZ,

    /// Fallback for keys the platform layer does not map.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Carried on key events as reported by the platform, and used by the
/// interaction tracker to hold the movement-gating key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Alt only.
    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

//=== InputEvent ==========================================================

/// Low-level input event delivered to the core thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed down (auto-repeat is filtered by the platform layer).
    KeyDown { key: KeyCode, modifiers: Modifiers },

    /// Key released.
    KeyUp { key: KeyCode, modifiers: Modifiers },

    /// Pointer moved; coordinates are image pixels, top-left origin.
    PointerMoved { x: f64, y: f64 },

    /// Wheel scrolled. `delta_y` follows browser convention: positive
    /// values scroll down (towards the user).
    Wheel { delta_y: f64 },

    /// Platform modifier state changed. Reported on every modifier
    /// transition and when the window loses focus, so releases that never
    /// produce a key-up still reach the core.
    ModifiersChanged { modifiers: Modifiers },
}

impl InputEvent {
    /// Returns `true` for events where only the latest value matters.
    ///
    /// Pointer motion is coalesced per flush; keys and wheel notches are
    /// not, since every transition or notch changes accumulated state.
    pub fn is_continuous(&self) -> bool {
        matches!(self, InputEvent::PointerMoved { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_default_to_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(!Modifiers::NONE.ctrl && !Modifiers::NONE.alt && !Modifiers::NONE.shift);
    }

    #[test]
    fn modifier_constants_set_single_flag() {
        assert!(Modifiers::CTRL.ctrl && !Modifiers::CTRL.alt && !Modifiers::CTRL.shift);
        assert!(Modifiers::ALT.alt && !Modifiers::ALT.ctrl);
        assert!(Modifiers::SHIFT.shift && !Modifiers::SHIFT.ctrl);
    }

    #[test]
    fn only_pointer_motion_is_continuous() {
        assert!(InputEvent::PointerMoved { x: 1.0, y: 2.0 }.is_continuous());
        assert!(!InputEvent::Wheel { delta_y: 100.0 }.is_continuous());
        assert!(!InputEvent::ModifiersChanged { modifiers: Modifiers::NONE }.is_continuous());
        assert!(!InputEvent::KeyDown {
            key: KeyCode::ControlLeft,
            modifiers: Modifiers::CTRL
        }
        .is_continuous());
    }
}
