//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the simulator's core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  Core Orchestrator   │
//  │   ↓                      │    │   ↓                  │
//  │  InputProcessor          │    │  InteractionTracker  │
//  │   ├─ Converts Winit      │    │   ↓                  │
//  │   └─ Tracks modifiers    │    │  FrameSimulator      │
//  │   ↓                      │    │   ↓                  │
//  │  InputBuffer             │    │  NotificationBus     │
//  │   ├─ discrete: Vec<>     │    │                      │
//  │   └─ continuous: latest  │    └──────────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested         │             │
//  │   ↓ (flush)              │             │
//  │  Core Channel ───────────┼─────────────┘
//  └──────────────────────────┘    CoreEvent
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent atomically
//    → Core ticks at the simulation frame rate (independent of refresh)
//    → Empty buffers NOT sent
// ```
//
// The window's inner size is the configured image size in physical
// pixels, so cursor positions are image pixels without conversion.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::bridge::{CoreEvent, PlatformError};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

const WINDOW_TITLE: &str = "Detection Simulator";

//=== Platform ============================================================

/// Window manager and input event aggregator.
///
/// Runs on the main thread (Winit requirement on macOS/iOS) and sends
/// batched events to the core thread. Not `Send`; all communication with
/// other threads goes through the sender.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Image size the window's drawable area is created with.
    image_size: PhysicalSize<u32>,

    /// Buffers discrete/continuous input until frame boundary.
    buffer: InputBuffer,

    event_sender: Sender<CoreEvent>,

    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a platform instance; the window is created lazily in
    /// `resumed()`.
    pub fn new(event_sender: Sender<CoreEvent>, image_width: f64, image_height: f64) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            image_size: PhysicalSize::new(image_width.round() as u32, image_height.round() as u32),
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop on the calling thread until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered input events to the core thread.
    ///
    /// If the core thread is gone the events are dropped with a warning so
    /// the window can still be closed normally.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(CoreEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events ({} discrete, {} continuous)",
                    discrete_count + continuous_count,
                    discrete_count,
                    continuous_count
                );
            }
        }
    }

    fn request_shutdown(&self, event_loop: &ActiveEventLoop) {
        let _ = self.event_sender.send(CoreEvent::Shutdown);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(self.image_size)
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.request_shutdown(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.request_shutdown(event_loop);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                let event = self.input_processor.process_modifiers(state.state());
                self.buffer.push_discrete(event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_pointer_move(position.x, position.y);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(&key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped or repeated key ignored");
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.input_processor.process_wheel(delta);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crossbeam_channel::unbounded;
    use winit::keyboard::ModifiersState;

    fn platform() -> (Platform, crossbeam_channel::Receiver<CoreEvent>) {
        let (tx, rx) = unbounded();
        (Platform::new(tx, 1920.0, 1080.0), rx)
    }

    #[test]
    fn platform_creation() {
        let (platform, _rx) = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert_eq!(platform.image_size, PhysicalSize::new(1920, 1080));
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (mut platform, rx) = platform();

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events() {
        let (mut platform, rx) = platform();

        platform.buffer.push_discrete(InputEvent::KeyDown {
            key: KeyCode::ShiftLeft,
            modifiers: Modifiers::SHIFT,
        });
        platform.buffer.push_continuous(InputEvent::PointerMoved { x: 1.0, y: 2.0 });

        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(CoreEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete.len(), 1, "Should have 1 discrete event");
                assert_eq!(continuous.len(), 1, "Should have 1 continuous event");
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (mut platform, rx) = platform();
        platform.buffer.push_discrete(InputEvent::Wheel { delta_y: 100.0 });

        drop(rx);

        // Should not panic, just log warning
        platform.flush_input_buffer();
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (mut platform, rx) = platform();
        platform.buffer.push_discrete(InputEvent::Wheel { delta_y: -100.0 });

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn modifier_change_reaches_the_core() {
        let (mut platform, rx) = platform();

        let event = platform.input_processor.process_modifiers(ModifiersState::empty());
        platform.buffer.push_discrete(event);
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(CoreEvent::Inputs { discrete, .. }) => {
                assert_eq!(discrete, vec![InputEvent::ModifiersChanged { modifiers: Modifiers::NONE }]);
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
