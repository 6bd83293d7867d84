//=========================================================================
// Entity Templates
//=========================================================================
//
// Typed, user-editable detection templates and their behavior metadata.
//
// Pixel-space fields are independent options: a transform that needs a
// pair (posx+posy, w+h) only runs when both halves are present.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::store::StoreError;
use super::Category;
use crate::core::input::Modifiers;

//=== DetectionTemplate ===================================================

/// Template shared by gestures and objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionTemplate {
    pub track_id: Option<i64>,
    pub name: Option<String>,
    pub posx: Option<f64>,
    pub posy: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl DetectionTemplate {
    pub fn new(track_id: i64, name: impl Into<String>) -> Self {
        Self {
            track_id: Some(track_id),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the pixel position.
    pub fn at(mut self, posx: f64, posy: f64) -> Self {
        self.posx = Some(posx);
        self.posy = Some(posy);
        self
    }

    /// Sets the pixel size.
    pub fn sized(mut self, w: f64, h: f64) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    fn validate(&self, category: Category) -> Result<(), StoreError> {
        check_finite(category, "posx", self.posx)?;
        check_finite(category, "posy", self.posy)?;
        check_finite(category, "w", self.w)?;
        check_finite(category, "h", self.h)
    }
}

//=== FaceTemplate ========================================================

/// Face template: a detection plus face identity and confidence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceTemplate {
    pub detection: DetectionTemplate,
    pub id: Option<i64>,
    pub confidence: Option<f64>,
}

impl FaceTemplate {
    pub fn new(detection: DetectionTemplate, id: i64, confidence: f64) -> Self {
        Self {
            detection,
            id: Some(id),
            confidence: Some(confidence),
        }
    }

    fn validate(&self) -> Result<(), StoreError> {
        self.detection.validate(Category::Face)?;
        if let Some(confidence) = self.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(StoreError::InvalidField {
                    category: Category::Face,
                    field: "confidence",
                    reason: format!("must lie in [0, 1], got {}", confidence),
                });
            }
        }
        Ok(())
    }
}

//=== PersonTemplate ======================================================

/// Person template: the aggregation key of a recognized person and the
/// face id carried by its placeholder face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonTemplate {
    pub track_id: Option<i64>,
    pub face_id: Option<i64>,
}

impl PersonTemplate {
    pub fn new(track_id: i64) -> Self {
        Self {
            track_id: Some(track_id),
            face_id: None,
        }
    }

    pub fn with_face_id(mut self, face_id: i64) -> Self {
        self.face_id = Some(face_id);
        self
    }
}

//=== EntityTemplate ======================================================

/// A template tagged with its category, as supplied by the editing layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityTemplate {
    Gesture(DetectionTemplate),
    Object(DetectionTemplate),
    Face(FaceTemplate),
    Person(PersonTemplate),
}

impl EntityTemplate {
    pub fn category(&self) -> Category {
        match self {
            EntityTemplate::Gesture(_) => Category::Gesture,
            EntityTemplate::Object(_) => Category::Object,
            EntityTemplate::Face(_) => Category::Face,
            EntityTemplate::Person(_) => Category::Person,
        }
    }

    /// Checks field values; called before a template enters the store.
    pub fn validate(&self) -> Result<(), StoreError> {
        match self {
            EntityTemplate::Gesture(t) => t.validate(Category::Gesture),
            EntityTemplate::Object(t) => t.validate(Category::Object),
            EntityTemplate::Face(t) => t.validate(),
            EntityTemplate::Person(_) => Ok(()),
        }
    }
}

//=== MoveKey / EntityMeta ================================================

/// Modifier key that must be held for a pointer-bound entity to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Ctrl,
    Alt,
    Shift,
}

impl MoveKey {
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            MoveKey::Ctrl => modifiers.ctrl,
            MoveKey::Alt => modifiers.alt,
            MoveKey::Shift => modifiers.shift,
        }
    }
}

/// Per-entity behavior flags. Never emitted, only used to compute output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityMeta {
    /// When set, the entity follows the pointer while the key is held and
    /// is left out of the tick otherwise.
    pub movement: Option<MoveKey>,

    /// When set, the pixel size is multiplied by the wheel scale.
    pub scale: bool,
}

impl EntityMeta {
    pub fn moved_by(key: MoveKey) -> Self {
        Self {
            movement: Some(key),
            scale: false,
        }
    }

    pub fn scaled() -> Self {
        Self {
            movement: None,
            scale: true,
        }
    }

    pub fn with_scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }
}

//=== Helpers =============================================================

fn check_finite(category: Category, field: &'static str, value: Option<f64>) -> Result<(), StoreError> {
    match value {
        Some(v) if !v.is_finite() => Err(StoreError::InvalidField {
            category,
            field,
            reason: format!("must be finite, got {}", v),
        }),
        _ => Ok(()),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
