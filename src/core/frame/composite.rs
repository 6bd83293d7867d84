//=========================================================================
// Composite Persons
//=========================================================================
//
// Builds the per-tick recognized-person mapping and folds detections of
// the other categories into it by shared track id.
//
// Lifecycle per tick:
//   seed() from person templates → link() per enriched detection → emit
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::coords::CoordinateMapper;
use crate::core::entity::{Category, CategoryList, PersonTemplate};
use crate::core::notify::{
    BoundingBox, Detection, FacePlaceholder, PersonFace, PersonMap, RecognizedPerson,
};

//=== Placeholder Values ==================================================

const PLACEHOLDER_NAME: &str = "Placeholder";
const PLACEHOLDER_CENTER: [f64; 2] = [0.1, 0.1];
const PLACEHOLDER_W_H: [f64; 2] = [0.05, 0.05];

/// Object class that supplies a person's body box.
const PERSON_OBJECT_NAME: &str = "person";

//=== seed() ==============================================================

/// Creates one placeholder record per person template with a track id.
///
/// A later template with the same track id replaces an earlier one.
pub(super) fn seed(templates: &CategoryList<PersonTemplate>, mapper: &CoordinateMapper) -> PersonMap {
    let mut persons = PersonMap::new();

    for (template, _) in templates.iter() {
        let Some(track_id) = template.track_id else {
            trace!(target: "core::frame", "Person template without track id skipped");
            continue;
        };

        persons.insert(
            track_id,
            RecognizedPerson {
                track_id,
                name: PLACEHOLDER_NAME.to_string(),
                center: PLACEHOLDER_CENTER,
                w_h: PLACEHOLDER_W_H,
                gestures: Vec::new(),
                face: PersonFace::Placeholder(placeholder_face(template.face_id, mapper)),
            },
        );
    }

    persons
}

fn placeholder_face(face_id: Option<i64>, mapper: &CoordinateMapper) -> FacePlaceholder {
    FacePlaceholder {
        id: face_id,
        center: [0.5, 0.5],
        w_h: [0.0, 1.0],
        name: PERSON_OBJECT_NAME.to_string(),
        confidence: 0.9,
        emotion: 4,
        mask_state: 0,
        bbox: BoundingBox {
            x: 0.0,
            y: 0.0,
            w: mapper.width(),
            h: mapper.height(),
        },
    }
}

//=== link() ==============================================================

/// Folds an enriched detection into the person sharing its track id.
///
/// - Gesture: appended to the person's `gestures`
/// - Object named "person": its `center` / `w_h` replace the person's
/// - Face: replaces the person's `face`
pub(super) fn link(category: Category, detection: &Detection, persons: &mut PersonMap) {
    let Some(person) = detection.track_id.and_then(|id| persons.get_mut(&id)) else {
        return;
    };

    match category {
        Category::Gesture => person.gestures.push(detection.clone()),
        Category::Object => {
            if detection.name.as_deref() == Some(PERSON_OBJECT_NAME) {
                if let Some(center) = detection.center {
                    person.center = center;
                }
                if let Some(w_h) = detection.w_h {
                    person.w_h = w_h;
                }
            }
        }
        Category::Face => person.face = PersonFace::Detected(detection.clone()),
        Category::Person => {}
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{EntityMeta, EntityStore, EntityTemplate};

    fn store_with_persons(ids: &[(i64, Option<i64>)]) -> EntityStore {
        let mut store = EntityStore::new();
        for (track_id, face_id) in ids {
            let index = store.append(Category::Person);
            let mut template = PersonTemplate::new(*track_id);
            template.face_id = *face_id;
            store
                .update(Category::Person, index, EntityTemplate::Person(template), EntityMeta::default())
                .unwrap();
        }
        store
    }

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(1920.0, 1080.0)
    }

    #[test]
    fn seed_creates_placeholders_for_tracked_persons() {
        let store = store_with_persons(&[(3, Some(11)), (5, None)]);
        let persons = seed(store.persons(), &mapper());

        // Index 0 template has no track id and is skipped
        assert_eq!(persons.keys().copied().collect::<Vec<_>>(), vec![3, 5]);

        let person = &persons[&3];
        assert_eq!(person.name, "Placeholder");
        assert_eq!(person.center, [0.1, 0.1]);
        assert_eq!(person.w_h, [0.05, 0.05]);
        assert!(person.gestures.is_empty());
        match &person.face {
            PersonFace::Placeholder(face) => {
                assert_eq!(face.id, Some(11));
                assert_eq!(face.name, "person");
                assert_eq!(face.bbox.w, 1920.0);
                assert_eq!(face.bbox.h, 1080.0);
            }
            other => panic!("Expected placeholder face, got {:?}", other),
        }
    }

    #[test]
    fn link_appends_gestures_in_order() {
        let store = store_with_persons(&[(1, None)]);
        let mut persons = seed(store.persons(), &mapper());

        for name in ["flat_right", "fist"] {
            let gesture = Detection { track_id: Some(1), name: Some(name.into()), ..Detection::default() };
            link(Category::Gesture, &gesture, &mut persons);
        }

        let names: Vec<_> = persons[&1].gestures.iter().map(|g| g.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["flat_right", "fist"]);
    }

    #[test]
    fn only_person_objects_move_the_body_box() {
        let store = store_with_persons(&[(2, None)]);
        let mut persons = seed(store.persons(), &mapper());

        let chair = Detection {
            track_id: Some(2),
            name: Some("chair".into()),
            center: Some([0.9, 0.9]),
            ..Detection::default()
        };
        link(Category::Object, &chair, &mut persons);
        assert_eq!(persons[&2].center, [0.1, 0.1]);

        let body = Detection {
            track_id: Some(2),
            name: Some("person".into()),
            center: Some([0.5, 0.5]),
            w_h: Some([0.2, 0.4]),
            ..Detection::default()
        };
        link(Category::Object, &body, &mut persons);
        assert_eq!(persons[&2].center, [0.5, 0.5]);
        assert_eq!(persons[&2].w_h, [0.2, 0.4]);
    }

    #[test]
    fn face_replaces_placeholder() {
        let store = store_with_persons(&[(4, None)]);
        let mut persons = seed(store.persons(), &mapper());

        let face = Detection { track_id: Some(4), id: Some(9), ..Detection::default() };
        link(Category::Face, &face, &mut persons);

        assert_eq!(persons[&4].face, PersonFace::Detected(face));
    }

    #[test]
    fn unmatched_or_untracked_detections_are_ignored() {
        let store = store_with_persons(&[(4, None)]);
        let mut persons = seed(store.persons(), &mapper());
        let before = persons.clone();

        link(Category::Gesture, &Detection { track_id: Some(8), ..Detection::default() }, &mut persons);
        link(Category::Face, &Detection::default(), &mut persons);

        assert_eq!(persons, before);
    }
}
