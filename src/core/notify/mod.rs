//=========================================================================
// Notifications
//=========================================================================
//
// The simulator's entire output surface: typed payloads and the bus that
// delivers them to subscribers.
//
//=========================================================================

//=== Module Declarations =================================================

mod bus;
mod payload;

//=== Public API ==========================================================

pub use bus::NotificationBus;
pub use payload::{
    BoundingBox, Detection, FacePlaceholder, Notification, PersonFace, PersonMap,
    RecognizedPerson,
};
