//=========================================================================
// Entities
//=========================================================================
//
// Editable detection templates and the store that holds them.
//
// Components:
// - `Category` / `CategoryFlags`: the four detection classes and their
//   per-category simulation switches
// - `template`: typed per-category templates and behavior metadata
// - `store`: index-aligned template/meta lists per category
//
//=========================================================================

//=== Module Declarations =================================================

mod store;
mod template;

//=== Public API ==========================================================

pub use store::{CategoryList, EntityStore, StoreError};
pub use template::{
    DetectionTemplate, EntityMeta, EntityTemplate, FaceTemplate, MoveKey, PersonTemplate,
};

//=== Standard Library Imports ============================================

use std::fmt;

//=== Category ============================================================

/// Class of simulated detection, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Gesture,
    Object,
    Face,
    Person,
}

impl Category {
    /// All categories in tick order.
    pub const ALL: [Category; 4] = [
        Category::Gesture,
        Category::Object,
        Category::Face,
        Category::Person,
    ];

    const fn index(self) -> usize {
        match self {
            Category::Gesture => 0,
            Category::Object => 1,
            Category::Face => 2,
            Category::Person => 3,
        }
    }

    /// Envelope key of the notification this category emits.
    pub const fn envelope_key(self) -> &'static str {
        match self {
            Category::Gesture => "DETECTED_GESTURES",
            Category::Object => "DETECTED_OBJECTS",
            Category::Face => "DETECTED_FACES",
            Category::Person => "RECOGNIZED_PERSONS",
        }
    }

    /// Whether emitted records of this category carry the wheel distance.
    pub const fn carries_distance(self) -> bool {
        matches!(self, Category::Gesture | Category::Object)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Gesture => "gesture",
            Category::Object => "object",
            Category::Face => "face",
            Category::Person => "person",
        };
        f.write_str(name)
    }
}

//=== CategoryFlags =======================================================

/// Per-category "simulation enabled" switches. All start disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFlags {
    enabled: [bool; 4],
}

impl CategoryFlags {
    /// Flags with every category enabled.
    pub const fn all() -> Self {
        Self { enabled: [true; 4] }
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        self.enabled[category.index()] = enabled;
    }

    pub fn with(mut self, category: Category, enabled: bool) -> Self {
        self.set(category, enabled);
        self
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.enabled[category.index()]
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
