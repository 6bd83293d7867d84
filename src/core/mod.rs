//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for every simulator subsystem running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own the interaction tracker, entity store and category flags
// - Receive input batches and host commands over the core channel
// - Tick the frame simulator at the configured frame rate
// - Publish one notification per category per tick once ready
//
// Notes:
// The orchestrator runs independently from the platform layer. Every
// input batch and store mutation is applied between ticks, so a tick
// always reads one consistent interaction snapshot and whole
// template/meta pairs.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod bridge;
pub mod config;
pub mod coords;
pub mod debug_emitter;
pub mod entity;
pub mod frame;
pub mod input;
pub mod notify;
mod ready;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{debug, info, trace, warn};

//=== Internal Modules ====================================================

use bridge::{Command, CoreEvent, EventCollector, TickControl};
use config::SimConfig;
use entity::{CategoryFlags, EntityStore, StoreError};
use frame::FrameSimulator;
use input::InteractionTracker;
use notify::NotificationBus;
use ready::ReadyGate;

//=== CoreSystemsOrchestrator =============================================
//
// Owns all core state and schedules the per-tick pipeline:
//
//   collect events → apply inputs → apply commands → simulate → publish
//
pub(crate) struct CoreSystemsOrchestrator {
    tick_period: Duration,
    tracker: InteractionTracker,
    store: EntityStore,
    enabled: CategoryFlags,
    ready: ReadyGate,
    simulator: FrameSimulator,
    bus: NotificationBus,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub fn new(config: &SimConfig, bus: NotificationBus) -> Self {
        Self {
            tick_period: config.tick_period(),
            tracker: InteractionTracker::new(
                config.wheel_distance_enabled,
                config.wheel_distance_increment,
            ),
            store: EntityStore::new(),
            enabled: CategoryFlags::default(),
            ready: ReadyGate::new(config.ready_delay()),
            simulator: FrameSimulator::new(config),
            bus,
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread that ticks at the configured period.
    //
    // Each tick:
    //  1. Collects core events (inputs, commands, shutdown)
    //  2. Applies them to the tracker and the store
    //  3. Simulates and publishes a frame once ready
    //  4. Sleeps out the rest of the period
    //
    pub fn spawn_core_thread(mut self, receiver: Receiver<CoreEvent>) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            info!("Core thread started (tick period: {:?})", self.tick_period);

            loop {
                let frame_start = Instant::now();

                if let TickControl::Exit = self.tick(&mut collector, frame_start) {
                    info!("Core thread exiting.");
                    break;
                }

                let elapsed = frame_start.elapsed();
                if elapsed < self.tick_period {
                    thread::sleep(self.tick_period - elapsed);
                }
            }
        })
    }

    //--- tick() -----------------------------------------------------------

    /// Runs one pass of the pipeline without pacing.
    fn tick(&mut self, collector: &mut EventCollector, now: Instant) -> TickControl {
        //--- Step 1: Gather core events -----------------------------------
        if collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        //--- Step 2: Apply inputs, then commands --------------------------
        for batch in collector.batches() {
            self.tracker.process_events(batch);
        }
        for command in collector.take_commands() {
            if let Err(e) = self.apply_command(command, now) {
                warn!("Command rejected: {}", e);
            }
        }

        //--- Step 3: Simulate and publish ---------------------------------
        if self.ready.poll(now) {
            let snapshot = self.tracker.snapshot();
            let frame = self.simulator.simulate(&self.store, self.enabled, &snapshot);
            for notification in frame.into_notifications() {
                self.bus.publish(notification);
            }
        } else {
            trace!("Not ready, tick skipped");
        }

        TickControl::Continue
    }

    fn apply_command(&mut self, command: Command, now: Instant) -> Result<(), StoreError> {
        debug!("Applying {:?}", command);

        match command {
            Command::AppendEntity(category) => {
                let index = self.store.append(category);
                debug!("{} template appended at index {}", category, index);
            }
            Command::RemoveEntity { category, index } => self.store.remove(category, index)?,
            Command::UpdateEntity {
                category,
                index,
                template,
                meta,
            } => self.store.update(category, index, template, meta)?,
            Command::SetCategoryEnabled { category, enabled } => {
                self.enabled.set(category, enabled)
            }
            Command::ModulesStarted => {
                info!("Modules started, emitting after ready delay");
                self.ready.signal(now);
            }
        }

        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
