//=========================================================================
// Detection Simulator
//
// Main entry point and coordinator for the simulator runtime.
//
// Architecture:
// ```text
//     SimulatorBuilder ──build()──> Simulator ──run()──────────> [Window]
//         │                           │      └─spawn_headless()─> [Core]
//         ├─ with_config()            ├─ handle()    → SimulatorHandle
//         ├─ with_fps()               ├─ subscribe() → Receiver<Notification>
//         ├─ with_image_size()        └─ debug_emitter()
//         ├─ with_distance_simulation()
//         ├─ with_ready_delay_ms()
//         └─ with_channel_capacity()
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::bridge::{Command, CoreEvent, PlatformError};
use crate::core::config::{ConfigError, SimConfig, MAX_SIM_FPS};
use crate::core::coords::CoordinateMapper;
use crate::core::debug_emitter::DebugEmitter;
use crate::core::entity::{Category, EntityMeta, EntityTemplate, StoreError};
use crate::core::input::InputEvent;
use crate::core::notify::{Notification, NotificationBus};
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== SimulatorBuilder ====================================================

/// Builder for configuring and constructing a [`Simulator`].
///
/// # Default Values
///
/// - **Config**: [`SimConfig::default()`] (1920×1080 @ 30 fps)
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use detection_simulator::SimulatorBuilder;
///
/// let simulator = SimulatorBuilder::new()
///     .with_fps(15)
///     .with_image_size(1280.0, 720.0)
///     .build()
///     .expect("valid configuration");
///
/// let events = simulator.subscribe();
/// simulator.run().expect("window");
/// # drop(events);
/// ```
pub struct SimulatorBuilder {
    config: SimConfig,
    channel_capacity: usize,
}

impl SimulatorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
            channel_capacity: 128,
        }
    }

    /// Replaces the whole configuration, e.g. one loaded with
    /// [`SimConfig::load`].
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the simulated frame rate.
    ///
    /// # Panics
    ///
    /// Panics if `fps == 0` or `fps > MAX_SIM_FPS`.
    pub fn with_fps(mut self, fps: u32) -> Self {
        assert!(fps > 0, "FPS must be positive, got {}", fps);
        assert!(fps <= MAX_SIM_FPS, "FPS must be at most {}, got {}", MAX_SIM_FPS, fps);
        self.config.sim_fps = fps;
        self
    }

    /// Sets the simulated camera image size in pixels.
    pub fn with_image_size(mut self, width: f64, height: f64) -> Self {
        self.config.image_width = width;
        self.config.image_height = height;
        self
    }

    /// Enables or disables the wheel-driven distance on gestures and
    /// objects.
    pub fn with_distance_simulation(mut self, enabled: bool) -> Self {
        self.config.wheel_distance_enabled = enabled;
        self
    }

    /// Sets the delay between `modules_started()` and the first frame.
    pub fn with_ready_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.ready_delay_ms = delay_ms;
        self
    }

    /// Sets the capacity of the channel into the core thread.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Validates the configuration and builds the simulator.
    pub fn build(self) -> Result<Simulator, ConfigError> {
        self.config.validate()?;

        info!(
            "Building simulator ({}x{} @ {} fps, channel: {})",
            self.config.image_width,
            self.config.image_height,
            self.config.sim_fps,
            self.channel_capacity
        );

        let (tx, rx) = bounded(self.channel_capacity);

        Ok(Simulator {
            config: self.config,
            bus: NotificationBus::new(),
            tx,
            rx,
        })
    }
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Simulator ===========================================================

/// Detection simulator runtime.
///
/// ```text
/// Simulator (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ sim_fps)
///   │     └─► InteractionTracker, EntityStore, FrameSimulator
///   │
///   └─► Platform (Event Loop, optional)
///         └─► Window, Input Polling
/// ```
pub struct Simulator {
    config: SimConfig,
    bus: NotificationBus,
    tx: Sender<CoreEvent>,
    rx: Receiver<CoreEvent>,
}

impl Simulator {
    //--- Accessors --------------------------------------------------------

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Returns a cloneable handle for commands and injected input.
    pub fn handle(&self) -> SimulatorHandle {
        SimulatorHandle {
            sender: self.tx.clone(),
        }
    }

    /// Subscribes to every notification published from now on.
    pub fn subscribe(&self) -> Receiver<Notification> {
        self.bus.subscribe()
    }

    /// Returns an emitter publishing on the same bus as the tick loop.
    pub fn debug_emitter(&self) -> DebugEmitter {
        DebugEmitter::new(
            CoordinateMapper::new(self.config.image_width, self.config.image_height),
            self.bus.clone(),
        )
    }

    //--- Execution --------------------------------------------------------

    /// Starts the core thread without a window.
    ///
    /// The thread ends on [`SimulatorHandle::shutdown`] or once every
    /// handle has been dropped.
    pub fn spawn_headless(self) -> thread::JoinHandle<()> {
        info!("Starting headless simulator (fps: {})", self.config.sim_fps);
        CoreSystemsOrchestrator::new(&self.config, self.bus).spawn_core_thread(self.rx)
    }

    /// Opens the simulator window and blocks until it is closed.
    ///
    /// # Lifecycle
    ///
    /// 1. Spawns the core thread at the configured frame rate
    /// 2. Runs the platform event loop on this thread (blocks here)
    /// 3. On window close: the core thread is told to shut down and joined
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting simulator runtime (fps: {})", self.config.sim_fps);

        let Simulator { config, bus, tx, rx } = self;

        //--- 1. Spawn the core logic thread -------------------------------
        let core_handle = CoreSystemsOrchestrator::new(&config, bus).spawn_core_thread(rx);
        info!("Core logic thread spawned");

        //--- 2. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx.clone(), config.image_width, config.image_height);
        let result = platform.run();
        info!("Platform event loop exited");

        //--- 3. Cleanup ---------------------------------------------------
        let _ = tx.send(CoreEvent::Shutdown);
        drop(tx);

        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Simulator shutdown complete");
        result
    }
}

//=== HandleError =========================================================

/// Errors returned by [`SimulatorHandle`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandleError {
    /// The core thread has exited.
    #[error("simulator core thread is no longer running")]
    Disconnected,

    /// The entity update was rejected before it was sent.
    #[error(transparent)]
    Invalid(#[from] StoreError),
}

//=== SimulatorHandle =====================================================

/// Cloneable sender side of the core channel.
///
/// Commands are applied by the core thread between ticks, in send order.
/// Index-range errors are only detectable there and are logged, not
/// returned.
#[derive(Clone)]
pub struct SimulatorHandle {
    sender: Sender<CoreEvent>,
}

impl SimulatorHandle {
    //--- Entity Editing ---------------------------------------------------

    /// Appends an empty template to `category`. Its index is the
    /// category's previous length.
    pub fn append_entity(&self, category: Category) -> Result<(), HandleError> {
        self.command(Command::AppendEntity(category))
    }

    pub fn remove_entity(&self, category: Category, index: usize) -> Result<(), HandleError> {
        self.command(Command::RemoveEntity { category, index })
    }

    /// Replaces the template at `index` after validating it locally.
    pub fn update_entity(
        &self,
        index: usize,
        template: EntityTemplate,
        meta: EntityMeta,
    ) -> Result<(), HandleError> {
        template.validate()?;
        self.command(Command::UpdateEntity {
            category: template.category(),
            index,
            template,
            meta,
        })
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn set_category_enabled(&self, category: Category, enabled: bool) -> Result<(), HandleError> {
        self.command(Command::SetCategoryEnabled { category, enabled })
    }

    /// Signals that the host is up; emission starts after the ready delay.
    pub fn modules_started(&self) -> Result<(), HandleError> {
        self.command(Command::ModulesStarted)
    }

    pub fn shutdown(&self) -> Result<(), HandleError> {
        self.send(CoreEvent::Shutdown)
    }

    //--- Input Injection --------------------------------------------------

    /// Delivers one input event as if it came from the window.
    pub fn send_input(&self, event: InputEvent) -> Result<(), HandleError> {
        let (discrete, continuous) = if event.is_continuous() {
            (Vec::new(), vec![event])
        } else {
            (vec![event], Vec::new())
        };
        self.send(CoreEvent::Inputs { discrete, continuous })
    }

    //--- Internal Helpers -------------------------------------------------

    fn command(&self, command: Command) -> Result<(), HandleError> {
        self.send(CoreEvent::Command(command))
    }

    fn send(&self, event: CoreEvent) -> Result<(), HandleError> {
        self.sender.send(event).map_err(|_| HandleError::Disconnected)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{DetectionTemplate, FaceTemplate};

    #[test]
    fn builder_defaults() {
        let simulator = SimulatorBuilder::new().build().unwrap();
        assert_eq!(simulator.config(), &SimConfig::default());
    }

    #[test]
    fn builder_applies_settings() {
        let simulator = SimulatorBuilder::new()
            .with_fps(10)
            .with_image_size(640.0, 480.0)
            .with_distance_simulation(false)
            .with_ready_delay_ms(0)
            .build()
            .unwrap();

        let config = simulator.config();
        assert_eq!(config.sim_fps, 10);
        assert_eq!(config.image_width, 640.0);
        assert!(!config.wheel_distance_enabled);
        assert_eq!(config.ready_delay_ms, 0);
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let result = SimulatorBuilder::new().with_image_size(0.0, 480.0).build();
        assert!(matches!(result, Err(ConfigError::Invalid { field: "image_width", .. })));
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn builder_panics_on_zero_fps() {
        let _ = SimulatorBuilder::new().with_fps(0);
    }

    #[test]
    #[should_panic(expected = "FPS must be at most 1000")]
    fn builder_panics_on_sub_millisecond_fps() {
        let _ = SimulatorBuilder::new().with_fps(1001);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_panics_on_zero_capacity() {
        let _ = SimulatorBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn handle_sends_commands_in_order() {
        let simulator = SimulatorBuilder::new().build().unwrap();
        let handle = simulator.handle();

        handle.append_entity(Category::Object).unwrap();
        handle.set_category_enabled(Category::Object, true).unwrap();
        handle.send_input(InputEvent::PointerMoved { x: 1.0, y: 2.0 }).unwrap();

        let received: Vec<_> = simulator.rx.try_iter().collect();
        assert!(matches!(received[0], CoreEvent::Command(Command::AppendEntity(Category::Object))));
        assert!(matches!(
            received[1],
            CoreEvent::Command(Command::SetCategoryEnabled { category: Category::Object, enabled: true })
        ));
        match &received[2] {
            CoreEvent::Inputs { discrete, continuous } => {
                assert!(discrete.is_empty());
                assert_eq!(continuous.len(), 1);
            }
            other => panic!("Expected inputs, got {:?}", other),
        }
    }

    #[test]
    fn update_entity_validates_before_sending() {
        let simulator = SimulatorBuilder::new().build().unwrap();
        let handle = simulator.handle();

        let face = FaceTemplate::new(DetectionTemplate::new(1, "alice"), 1, 1.5);
        let result = handle.update_entity(1, EntityTemplate::Face(face), EntityMeta::default());

        assert!(matches!(result, Err(HandleError::Invalid(StoreError::InvalidField { .. }))));
        assert!(simulator.rx.try_recv().is_err());
    }

    #[test]
    fn handle_reports_disconnect() {
        let simulator = SimulatorBuilder::new().build().unwrap();
        let handle = simulator.handle();
        drop(simulator);

        assert_eq!(handle.modules_started(), Err(HandleError::Disconnected));
    }
}
