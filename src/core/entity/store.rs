//=========================================================================
// Entity Store
//=========================================================================
//
// Per-category, index-aligned lists of templates and behavior metadata.
//
// Invariants:
// - templates.len() == metas.len() for every category
// - index 0 is the built-in template entry: updatable, never removed
// - mutations never reorder; remove() shifts later indices down by one
//
// The store is owned by the core thread. Every mutation is applied
// between ticks, so a tick always reads whole template/meta pairs.
//
//=========================================================================

//=== External Crates =====================================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::template::{DetectionTemplate, EntityMeta, EntityTemplate, FaceTemplate, PersonTemplate};
use super::Category;

//=== StoreError ==========================================================

/// Rejected entity store mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("{category} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        category: Category,
        index: usize,
        len: usize,
    },
    #[error("{category} index 0 is the built-in template and cannot be removed")]
    ReservedIndex { category: Category },
    #[error("{found} template cannot be stored in the {expected} list")]
    CategoryMismatch { expected: Category, found: Category },
    #[error("invalid {category} field `{field}`: {reason}")]
    InvalidField {
        category: Category,
        field: &'static str,
        reason: String,
    },
}

//=== CategoryList ========================================================

/// Index-aligned template and meta lists for one category.
#[derive(Debug, Clone)]
pub struct CategoryList<T> {
    category: Category,
    templates: Vec<T>,
    metas: Vec<EntityMeta>,
}

impl<T: Default> CategoryList<T> {
    /// Creates a list holding only the empty built-in template entry.
    fn new(category: Category) -> Self {
        Self {
            category,
            templates: vec![T::default()],
            metas: vec![EntityMeta::default()],
        }
    }

    /// Appends an empty template/meta pair and returns its index.
    pub fn append(&mut self) -> usize {
        self.templates.push(T::default());
        self.metas.push(EntityMeta::default());
        self.templates.len() - 1
    }

    /// Removes the pair at `index`, shifting later entries down.
    pub fn remove(&mut self, index: usize) -> Result<(), StoreError> {
        if index == 0 {
            return Err(StoreError::ReservedIndex { category: self.category });
        }
        self.check_index(index)?;
        self.templates.remove(index);
        self.metas.remove(index);
        Ok(())
    }

    /// Replaces the pair at `index`.
    pub fn update(&mut self, index: usize, template: T, meta: EntityMeta) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.templates[index] = template;
        self.metas[index] = meta;
        Ok(())
    }
}

impl<T> CategoryList<T> {
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<(&T, &EntityMeta)> {
        Some((self.templates.get(index)?, self.metas.get(index)?))
    }

    /// Iterates template/meta pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &EntityMeta)> {
        self.templates.iter().zip(self.metas.iter())
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.templates.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                category: self.category,
                index,
                len: self.templates.len(),
            })
        }
    }
}

//=== EntityStore =========================================================

/// Editable templates for all four categories.
#[derive(Debug, Clone)]
pub struct EntityStore {
    gestures: CategoryList<DetectionTemplate>,
    objects: CategoryList<DetectionTemplate>,
    faces: CategoryList<FaceTemplate>,
    persons: CategoryList<PersonTemplate>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            gestures: CategoryList::new(Category::Gesture),
            objects: CategoryList::new(Category::Object),
            faces: CategoryList::new(Category::Face),
            persons: CategoryList::new(Category::Person),
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Appends an empty pair to `category` and returns its index.
    pub fn append(&mut self, category: Category) -> usize {
        match category {
            Category::Gesture => self.gestures.append(),
            Category::Object => self.objects.append(),
            Category::Face => self.faces.append(),
            Category::Person => self.persons.append(),
        }
    }

    pub fn remove(&mut self, category: Category, index: usize) -> Result<(), StoreError> {
        match category {
            Category::Gesture => self.gestures.remove(index),
            Category::Object => self.objects.remove(index),
            Category::Face => self.faces.remove(index),
            Category::Person => self.persons.remove(index),
        }
    }

    /// Validates `template` and replaces the pair at `index` of the list
    /// matching `category`.
    pub fn update(
        &mut self,
        category: Category,
        index: usize,
        template: EntityTemplate,
        meta: EntityMeta,
    ) -> Result<(), StoreError> {
        if template.category() != category {
            return Err(StoreError::CategoryMismatch {
                expected: category,
                found: template.category(),
            });
        }
        template.validate()?;

        match template {
            EntityTemplate::Gesture(t) => self.gestures.update(index, t, meta),
            EntityTemplate::Object(t) => self.objects.update(index, t, meta),
            EntityTemplate::Face(t) => self.faces.update(index, t, meta),
            EntityTemplate::Person(t) => self.persons.update(index, t, meta),
        }
    }

    //--- Access -----------------------------------------------------------

    pub fn gestures(&self) -> &CategoryList<DetectionTemplate> {
        &self.gestures
    }

    pub fn objects(&self) -> &CategoryList<DetectionTemplate> {
        &self.objects
    }

    pub fn faces(&self) -> &CategoryList<FaceTemplate> {
        &self.faces
    }

    pub fn persons(&self) -> &CategoryList<PersonTemplate> {
        &self.persons
    }

    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Gesture => self.gestures.len(),
            Category::Object => self.objects.len(),
            Category::Face => self.faces.len(),
            Category::Person => self.persons.len(),
        }
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
