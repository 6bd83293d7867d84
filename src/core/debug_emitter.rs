//=========================================================================
// Debug Emitter
//=========================================================================
//
// Single-shot notification constructors for manual and integration
// testing. They bypass the entity store and the tick loop but share the
// coordinate mapper and payload shapes with the frame simulator, so a
// subscriber cannot tell the two sources apart.
//
// A negative track id publishes the category's empty payload, which
// signals "nothing detected".
//
// All sizes and positions are given in image pixels.
//
//=========================================================================

//=== External Crates =====================================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::coords::CoordinateMapper;
use crate::core::input::InteractionSnapshot;
use crate::core::notify::{
    Detection, Notification, NotificationBus, PersonFace, PersonMap, RecognizedPerson,
};

//=== Defaults ============================================================

const UNKNOWN_NAME: &str = "unknown";
const DEFAULT_W_H: [f64; 2] = [100.0, 100.0];
const DEFAULT_CENTER: [f64; 2] = [50.0, 50.0];
const DEFAULT_FACE_CONFIDENCE: f64 = 0.2;
const PERSON_FACE_ID: i64 = 1;

//=== DebugDetection ======================================================

/// Parameters of a debug gesture or object detection.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugDetection {
    pub track_id: i64,
    pub name: String,
    pub w_h: [f64; 2],
    pub center: [f64; 2],
}

impl DebugDetection {
    pub fn new(track_id: i64) -> Self {
        Self {
            track_id,
            name: UNKNOWN_NAME.to_string(),
            w_h: DEFAULT_W_H,
            center: DEFAULT_CENTER,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_size(mut self, w: f64, h: f64) -> Self {
        self.w_h = [w, h];
        self
    }

    pub fn with_center(mut self, x: f64, y: f64) -> Self {
        self.center = [x, y];
        self
    }
}

//=== DebugFace ===========================================================

/// Parameters of a debug face detection.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugFace {
    pub detection: DebugDetection,
    pub id: i64,
    pub confidence: f64,
}

impl DebugFace {
    pub fn new(detection: DebugDetection) -> Self {
        Self {
            detection,
            id: 0,
            confidence: DEFAULT_FACE_CONFIDENCE,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}

//=== DebugEmitter ========================================================

/// Publishes hand-built notifications on the shared bus.
#[derive(Clone)]
pub struct DebugEmitter {
    mapper: CoordinateMapper,
    bus: NotificationBus,
}

impl DebugEmitter {
    pub fn new(mapper: CoordinateMapper, bus: NotificationBus) -> Self {
        Self { mapper, bus }
    }

    //--- Single-Category Emitters ----------------------------------------

    pub fn sim_gesture_detection(&self, params: &DebugDetection) -> Notification {
        let payload = self.detections(params.track_id, || self.detection(params));
        self.publish(Notification::DetectedGestures(payload))
    }

    pub fn sim_object_detection(&self, params: &DebugDetection) -> Notification {
        let payload = self.detections(params.track_id, || self.detection(params));
        self.publish(Notification::DetectedObjects(payload))
    }

    pub fn sim_face_detection(&self, params: &DebugFace) -> Notification {
        let payload = self.detections(params.detection.track_id, || Detection {
            id: Some(params.id),
            confidence: Some(params.confidence),
            ..self.detection(&params.detection)
        });
        self.publish(Notification::DetectedFaces(payload))
    }

    /// Publishes one recognized person with a synthetic face a quarter of
    /// the body size, sharing the body's center.
    pub fn sim_recognised_person(
        &self,
        track_id: i64,
        w_h: [f64; 2],
        center: [f64; 2],
        gestures: Vec<Detection>,
    ) -> Notification {
        let mut persons = PersonMap::new();

        if track_id >= 0 {
            let face = Detection {
                track_id: Some(track_id),
                name: Some(UNKNOWN_NAME.to_string()),
                w_h: Some(self.mapper.from_pixels([(w_h[0] / 4.0).floor(), (w_h[1] / 4.0).floor()])),
                center: Some(self.mapper.from_pixels(center)),
                id: Some(PERSON_FACE_ID),
                confidence: Some(DEFAULT_FACE_CONFIDENCE),
                ..Detection::default()
            };

            persons.insert(
                track_id,
                RecognizedPerson {
                    track_id,
                    name: UNKNOWN_NAME.to_string(),
                    center: self.mapper.from_pixels(center),
                    w_h: self.mapper.from_pixels(w_h),
                    gestures,
                    face: PersonFace::Detected(face),
                },
            );
        }

        self.publish(Notification::RecognizedPersons(persons))
    }

    //--- probe() ----------------------------------------------------------

    /// Interactive smoke test driven by the live interaction state.
    ///
    /// With Ctrl held, a `flat_right` gesture follows the pointer and the
    /// probe person carries a matching gesture. Otherwise the gesture
    /// channel is cleared and the person is published without gestures.
    pub fn probe(&self, input: &InteractionSnapshot) -> Vec<Notification> {
        const GESTURE: &str = "flat_right";
        const GESTURE_SIZE: f64 = 200.0;

        let (x, y) = input.pointer;
        let mut published = Vec::with_capacity(2);
        let mut gestures = Vec::new();

        if input.modifiers.ctrl {
            let gesture = DebugDetection::new(1)
                .with_name(GESTURE)
                .with_size(GESTURE_SIZE, GESTURE_SIZE)
                .with_center(x, y);
            published.push(self.sim_gesture_detection(&gesture));

            gestures.push(self.detection(&DebugDetection { track_id: 0, ..gesture }));
        } else {
            published.push(self.sim_gesture_detection(&DebugDetection::new(-1)));
        }

        published.push(self.sim_recognised_person(1, [400.0, 400.0], [210.0, 210.0], gestures));
        published
    }

    //--- Internal Helpers -------------------------------------------------

    fn detection(&self, params: &DebugDetection) -> Detection {
        Detection {
            track_id: Some(params.track_id),
            name: Some(params.name.clone()),
            w_h: Some(self.mapper.from_pixels(params.w_h)),
            center: Some(self.mapper.from_pixels(params.center)),
            ..Detection::default()
        }
    }

    fn detections(&self, track_id: i64, build: impl FnOnce() -> Detection) -> Vec<Detection> {
        if track_id < 0 {
            Vec::new()
        } else {
            vec![build()]
        }
    }

    fn publish(&self, notification: Notification) -> Notification {
        debug!(
            target: "core::debug",
            "Debug {} (empty: {})",
            notification.key(),
            notification.is_empty()
        );
        self.bus.publish(notification.clone());
        notification
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
