//=========================================================================
// Ready Gate
//=========================================================================
//
// Holds back emission until the host has started and a settle delay has
// elapsed.
//
// States:
//   Waiting ──signal()──> Armed { at } ──poll() ≥ at──> Ready
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== ReadyGate ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Waiting,
    Armed { at: Instant },
    Ready,
}

/// One-way latch from "host starting" to "emitting".
#[derive(Debug, Clone)]
pub(crate) struct ReadyGate {
    delay: Duration,
    state: GateState,
}

impl ReadyGate {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: GateState::Waiting,
        }
    }

    /// Arms the gate. Repeated signals keep the first deadline.
    pub(crate) fn signal(&mut self, now: Instant) {
        if self.state == GateState::Waiting {
            self.state = GateState::Armed { at: now + self.delay };
        }
    }

    /// Returns `true` once the deadline has passed; stays `true` afterwards.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            GateState::Ready => true,
            GateState::Armed { at } if now >= at => {
                self.state = GateState::Ready;
                true
            }
            _ => false,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
