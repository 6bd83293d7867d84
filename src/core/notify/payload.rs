//=========================================================================
// Notification Payloads
//=========================================================================
//
// Serializable shapes of everything the simulator emits.
//
// Wire form (serde_json):
//   {"DETECTED_GESTURES":  [Detection, ...]}
//   {"DETECTED_OBJECTS":   [Detection, ...]}
//   {"DETECTED_FACES":     [Detection, ...]}
//   {"RECOGNIZED_PERSONS": {"<TrackID>": RecognizedPerson, ...}}
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::BTreeMap;

//=== External Crates =====================================================

use serde::Serialize;

//=== Internal Dependencies ===============================================

use crate::core::entity::{Category, DetectionTemplate, FaceTemplate};

//=== Detection ===========================================================

/// One emitted gesture, object or face record.
///
/// Absent fields are omitted from the wire form. Pixel fields only
/// survive when their partner was missing and normalization was skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Detection {
    #[serde(rename = "TrackID", skip_serializing_if = "Option::is_none")]
    pub track_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub posx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub w_h: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,

    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl From<&DetectionTemplate> for Detection {
    fn from(template: &DetectionTemplate) -> Self {
        Self {
            track_id: template.track_id,
            name: template.name.clone(),
            posx: template.posx,
            posy: template.posy,
            w: template.w,
            h: template.h,
            ..Self::default()
        }
    }
}

impl From<&FaceTemplate> for Detection {
    fn from(template: &FaceTemplate) -> Self {
        Self {
            id: template.id,
            confidence: template.confidence,
            ..Self::from(&template.detection)
        }
    }
}

//=== Recognized Persons ==================================================

/// Pixel-space bounding box carried by the placeholder face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Face attached to a person before any face detection links to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacePlaceholder {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub center: [f64; 2],
    pub w_h: [f64; 2],
    pub name: String,
    pub confidence: f64,
    pub emotion: u8,
    pub mask_state: u8,
    pub bbox: BoundingBox,
}

/// Face slot of a recognized person.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PersonFace {
    Detected(Detection),
    Placeholder(FacePlaceholder),
}

/// Composite person record, rebuilt from scratch every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognizedPerson {
    #[serde(rename = "TrackID")]
    pub track_id: i64,
    pub name: String,
    pub center: [f64; 2],
    pub w_h: [f64; 2],
    pub gestures: Vec<Detection>,
    pub face: PersonFace,
}

/// Recognized persons keyed by track id.
pub type PersonMap = BTreeMap<i64, RecognizedPerson>;

//=== Notification ========================================================

/// One outbound event: an envelope key wrapping a category payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Notification {
    #[serde(rename = "DETECTED_GESTURES")]
    DetectedGestures(Vec<Detection>),
    #[serde(rename = "DETECTED_OBJECTS")]
    DetectedObjects(Vec<Detection>),
    #[serde(rename = "DETECTED_FACES")]
    DetectedFaces(Vec<Detection>),
    #[serde(rename = "RECOGNIZED_PERSONS")]
    RecognizedPersons(PersonMap),
}

impl Notification {
    /// Empty payload for `category` ("nothing detected").
    pub fn empty(category: Category) -> Self {
        match category {
            Category::Gesture => Notification::DetectedGestures(Vec::new()),
            Category::Object => Notification::DetectedObjects(Vec::new()),
            Category::Face => Notification::DetectedFaces(Vec::new()),
            Category::Person => Notification::RecognizedPersons(PersonMap::new()),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Notification::DetectedGestures(_) => Category::Gesture,
            Notification::DetectedObjects(_) => Category::Object,
            Notification::DetectedFaces(_) => Category::Face,
            Notification::RecognizedPersons(_) => Category::Person,
        }
    }

    /// Envelope key, e.g. `"DETECTED_GESTURES"`.
    pub fn key(&self) -> &'static str {
        self.category().envelope_key()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Notification::DetectedGestures(list)
            | Notification::DetectedObjects(list)
            | Notification::DetectedFaces(list) => list.is_empty(),
            Notification::RecognizedPersons(persons) => persons.is_empty(),
        }
    }

    /// Serializes the full envelope, e.g. `{"DETECTED_FACES":[...]}`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the envelope into a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
