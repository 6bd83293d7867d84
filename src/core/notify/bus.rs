//=========================================================================
// Notification Bus
//=========================================================================
//
// Fan-out publisher for outbound notifications.
//
// Architecture:
//   FrameSimulator / DebugEmitter → publish() → Sender per subscriber
//                                                    ↓
//   Host subscribers ←──────────────────────── Receiver<Notification>
//
// Subscribers whose receiver was dropped are pruned on the next publish.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::{Arc, Mutex, PoisonError};

//=== External Crates =====================================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::trace;

//=== Internal Dependencies ===============================================

use super::Notification;

//=== NotificationBus =====================================================

/// Cloneable handle to a shared subscriber list.
#[derive(Clone, Default)]
pub struct NotificationBus {
    subscribers: Arc<Mutex<Vec<Sender<Notification>>>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&self) -> Receiver<Notification> {
        let (tx, rx) = unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Delivers `notification` to every live subscriber.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, notification: Notification) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        subscribers.retain(|tx| tx.send(notification.clone()).is_ok());

        trace!(
            target: "core::notify",
            "{} delivered to {} subscriber(s)",
            notification.key(),
            subscribers.len()
        );
        subscribers.len()
    }

    /// Number of registered subscribers (including not-yet-pruned ones).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

//=========================================================================
// Tests
//=========================================================================
