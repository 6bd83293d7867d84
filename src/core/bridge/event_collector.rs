//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side channel drain with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<CoreEvent> → collect_frame() → input batches + commands
//                                         → TickControl
//
// Bounded polling prevents starvation. Pacing is left to the tick loop.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::{Command, CoreEvent};
use crate::core::input::InputEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects core events with bounded polling, split into input batches and
/// host commands in arrival order.
pub(crate) struct EventCollector {
    receiver: Receiver<CoreEvent>,
    input_batches: Vec<Vec<InputEvent>>,
    commands: Vec<Command>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 256;

    pub(crate) fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
            commands: Vec::new(),
        }
    }

    /// Collects pending events (bounded to prevent starvation).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        self.commands.clear();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    info!("All core event senders dropped");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Returns collected input batches for this frame.
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Takes ownership of collected commands, leaving an empty vec.
    pub(crate) fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    fn handle_event(&mut self, event: CoreEvent) -> TickControl {
        match event {
            CoreEvent::Inputs { discrete, continuous } => {
                if !discrete.is_empty() {
                    self.input_batches.push(discrete);
                }
                if !continuous.is_empty() {
                    self.input_batches.push(continuous);
                }
                TickControl::Continue
            }
            CoreEvent::Command(command) => {
                self.commands.push(command);
                TickControl::Continue
            }
            CoreEvent::Shutdown => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
