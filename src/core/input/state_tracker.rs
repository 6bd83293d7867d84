//=========================================================================
// Interaction State Tracker
//=========================================================================
//
// Live interactive modifiers applied to simulated entities.
//
// Architecture:
//   InputEvent → process_events() → modifiers / pointer / scale / distance
//                                        ↓
//                               snapshot() once per tick
//
// Two accumulators are driven by the same wheel event: a continuous
// scale factor and a fixed-step simulated distance. Each is clamped on
// its own.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers};

//=== Constants ===========================================================

/// Scale change per unit of wheel `delta_y`.
const SCALE_PER_DELTA: f64 = -0.001;

/// Bounds for the wheel-driven scale factor.
pub const SCALE_MIN: f64 = -100.0;
pub const SCALE_MAX: f64 = 100.0;

/// Starting simulated distance to the camera (mm).
pub const DISTANCE_INITIAL: f64 = 1000.0;

/// Bounds for the simulated distance (mm): 20 cm to 4 m.
pub const DISTANCE_MIN: f64 = 200.0;
pub const DISTANCE_MAX: f64 = 4000.0;

//=== InteractionSnapshot =================================================

/// Consistent copy of the interaction state, taken once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSnapshot {
    pub modifiers: Modifiers,
    pub pointer: (f64, f64),
    pub scale: f64,
    pub distance: f64,
}

impl Default for InteractionSnapshot {
    fn default() -> Self {
        Self {
            modifiers: Modifiers::NONE,
            pointer: (0.0, 0.0),
            scale: 1.0,
            distance: DISTANCE_INITIAL,
        }
    }
}

//=== InteractionTracker ==================================================

/// Tracks modifier keys, pointer position and the wheel accumulators.
pub struct InteractionTracker {
    modifiers: Modifiers,
    pointer: (f64, f64),
    scale: f64,
    distance: f64,

    //--- Configuration ---------------------------------------------------
    distance_enabled: bool,
    distance_step: f64,
}

impl InteractionTracker {
    /// Creates a tracker; `distance_step` is the per-notch distance change
    /// applied only while `distance_enabled` is set.
    pub fn new(distance_enabled: bool, distance_step: f64) -> Self {
        Self {
            modifiers: Modifiers::NONE,
            pointer: (0.0, 0.0),
            scale: 1.0,
            distance: DISTANCE_INITIAL,
            distance_enabled,
            distance_step,
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Applies a batch of input events in order.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => match key {
                KeyCode::KeyZ if modifiers.ctrl => info!("CTRL+Z pressed"),
                KeyCode::ControlLeft => self.modifiers.ctrl = true,
                KeyCode::AltLeft => self.modifiers.alt = true,
                KeyCode::ShiftLeft => self.modifiers.shift = true,
                _ => {}
            },

            InputEvent::KeyUp { key, .. } => match key {
                KeyCode::ControlLeft => self.modifiers.ctrl = false,
                KeyCode::AltLeft => self.modifiers.alt = false,
                KeyCode::ShiftLeft => self.modifiers.shift = false,
                _ => {}
            },

            InputEvent::PointerMoved { x, y } => {
                if self.pointer.0 != x {
                    self.pointer.0 = x;
                }
                if self.pointer.1 != y {
                    self.pointer.1 = y;
                }
            }

            InputEvent::Wheel { delta_y } => self.scroll(delta_y),

            InputEvent::ModifiersChanged { modifiers } => self.resync_modifiers(modifiers),
        }
    }

    /// Releases any held modifier the platform no longer reports.
    ///
    /// Only releases are taken from the platform state: it does not tell
    /// left from right keys, and presses are driven by the left-hand key
    /// events alone.
    fn resync_modifiers(&mut self, reported: Modifiers) {
        let released = Modifiers {
            shift: self.modifiers.shift && !reported.shift,
            ctrl: self.modifiers.ctrl && !reported.ctrl,
            alt: self.modifiers.alt && !reported.alt,
        };
        if released != Modifiers::NONE {
            debug!("modifiers released by platform resync: {:?}", released);
        }
        self.modifiers.shift &= reported.shift;
        self.modifiers.ctrl &= reported.ctrl;
        self.modifiers.alt &= reported.alt;
    }

    fn scroll(&mut self, delta_y: f64) {
        self.scale = (self.scale + delta_y * SCALE_PER_DELTA).clamp(SCALE_MIN, SCALE_MAX);

        if self.distance_enabled {
            // Only the direction matters; f64::signum(0.0) would be 1.0.
            let direction = if delta_y > 0.0 {
                1.0
            } else if delta_y < 0.0 {
                -1.0
            } else {
                0.0
            };
            self.distance = (self.distance + direction * self.distance_step)
                .clamp(DISTANCE_MIN, DISTANCE_MAX);
            debug!("wheel distance = {}", self.distance);
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Copies every field the frame simulator needs in one read.
    pub fn snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot {
            modifiers: self.modifiers,
            pointer: self.pointer,
            scale: self.scale,
            distance: self.distance,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn wheel(delta_y: f64) -> InputEvent {
        InputEvent::Wheel { delta_y }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    //=====================================================================
    // Modifier Keys
    //=====================================================================

    #[test]
    fn modifier_keys_follow_press_and_release() {
        let mut tracker = InteractionTracker::new(true, 10.0);

        tracker.process_events(&[key_down(KeyCode::ControlLeft), key_down(KeyCode::ShiftLeft)]);
        assert!(tracker.modifiers().ctrl);
        assert!(tracker.modifiers().shift);
        assert!(!tracker.modifiers().alt);

        tracker.process_events(&[key_up(KeyCode::ControlLeft)]);
        assert!(!tracker.modifiers().ctrl);
        assert!(tracker.modifiers().shift);
    }

    #[test]
    fn last_transition_wins() {
        let mut tracker = InteractionTracker::new(true, 10.0);
        tracker.process_events(&[
            key_down(KeyCode::AltLeft),
            key_up(KeyCode::AltLeft),
            key_down(KeyCode::AltLeft),
        ]);
        assert!(tracker.modifiers().alt);
    }

    #[test]
    fn modifier_change_releases_keys_without_key_up() {
        let mut tracker = InteractionTracker::new(true, 10.0);
        tracker.process_events(&[key_down(KeyCode::ControlLeft), key_down(KeyCode::AltLeft)]);

        // Focus lost while both keys were held: no key-up ever arrives.
        tracker.process_events(&[InputEvent::ModifiersChanged { modifiers: Modifiers::ALT }]);
        assert!(!tracker.modifiers().ctrl);
        assert!(tracker.modifiers().alt);

        tracker.process_events(&[InputEvent::ModifiersChanged { modifiers: Modifiers::NONE }]);
        assert_eq!(tracker.modifiers(), Modifiers::NONE);
        assert_eq!(tracker.snapshot().modifiers, Modifiers::NONE);
    }

    #[test]
    fn modifier_change_never_presses_keys() {
        let mut tracker = InteractionTracker::new(true, 10.0);
        tracker.process_events(&[InputEvent::ModifiersChanged { modifiers: Modifiers::CTRL }]);
        assert_eq!(tracker.modifiers(), Modifiers::NONE);
    }

    #[test]
    fn other_keys_do_not_touch_modifiers() {
        let mut tracker = InteractionTracker::new(true, 10.0);
        tracker.process_events(&[InputEvent::KeyDown {
            key: KeyCode::KeyZ,
            modifiers: Modifiers::CTRL,
        }]);
        assert_eq!(tracker.modifiers(), Modifiers::NONE);
    }

    //=====================================================================
    // Pointer
    //=====================================================================

    #[test]
    fn pointer_tracks_latest_position() {
        let mut tracker = InteractionTracker::new(true, 10.0);
        tracker.process_events(&[
            InputEvent::PointerMoved { x: 10.0, y: 20.0 },
            InputEvent::PointerMoved { x: 300.0, y: 20.0 },
        ]);
        assert_eq!(tracker.pointer(), (300.0, 20.0));
    }

    //=====================================================================
    // Wheel Accumulators
    //=====================================================================

    #[test]
    fn wheel_adjusts_scale_continuously() {
        let mut tracker = InteractionTracker::new(true, 10.0);
        tracker.process_events(&[wheel(-100.0)]);
        assert!(approx(tracker.scale(), 1.1));

        tracker.process_events(&[wheel(250.0)]);
        assert!(approx(tracker.scale(), 0.85));
    }

    #[test]
    fn scale_is_clamped() {
        let mut tracker = InteractionTracker::new(true, 10.0);
        tracker.process_events(&[wheel(-1_000_000.0)]);
        assert_eq!(tracker.scale(), SCALE_MAX);

        tracker.process_events(&[wheel(1_000_000_000.0)]);
        assert_eq!(tracker.scale(), SCALE_MIN);
    }

    #[test]
    fn distance_uses_only_wheel_direction() {
        let mut tracker = InteractionTracker::new(true, 10.0);
        tracker.process_events(&[wheel(3.0)]);
        assert_eq!(tracker.distance(), 1010.0);

        tracker.process_events(&[wheel(-500.0)]);
        assert_eq!(tracker.distance(), 1000.0);

        tracker.process_events(&[wheel(0.0)]);
        assert_eq!(tracker.distance(), 1000.0);
    }

    #[test]
    fn distance_is_clamped() {
        let mut tracker = InteractionTracker::new(true, 1000.0);
        tracker.process_events(&[wheel(1.0), wheel(1.0), wheel(1.0), wheel(1.0)]);
        assert_eq!(tracker.distance(), DISTANCE_MAX);

        tracker.process_events(&[wheel(-1.0); 10]);
        assert_eq!(tracker.distance(), DISTANCE_MIN);
    }

    #[test]
    fn distance_frozen_when_disabled() {
        let mut tracker = InteractionTracker::new(false, 10.0);
        tracker.process_events(&[wheel(100.0)]);
        assert_eq!(tracker.distance(), DISTANCE_INITIAL);
        assert!(approx(tracker.scale(), 0.9));
    }

    //=====================================================================
    // Snapshot
    //=====================================================================

    #[test]
    fn snapshot_copies_all_fields() {
        let mut tracker = InteractionTracker::new(true, 10.0);
        tracker.process_events(&[
            key_down(KeyCode::ShiftLeft),
            InputEvent::PointerMoved { x: 5.0, y: 6.0 },
            wheel(100.0),
        ]);

        let snapshot = tracker.snapshot();
        assert!(snapshot.modifiers.shift);
        assert_eq!(snapshot.pointer, (5.0, 6.0));
        assert!(approx(snapshot.scale, 0.9));
        assert_eq!(snapshot.distance, 1010.0);

        // Later input does not alter a taken snapshot
        tracker.process_events(&[wheel(100.0)]);
        assert_eq!(snapshot.distance, 1010.0);
    }

    #[test]
    fn new_tracker_matches_default_snapshot() {
        let tracker = InteractionTracker::new(true, 10.0);
        assert_eq!(tracker.snapshot(), InteractionSnapshot::default());
    }
}
