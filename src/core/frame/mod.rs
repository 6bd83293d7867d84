//=========================================================================
// Frame Simulator
//=========================================================================
//
// Turns the entity store and one interaction snapshot into the four
// category payloads of a tick.
//
// Pipeline per tick:
// ```text
//   person templates ──seed()──> PersonMap (placeholders)
//                                    ↑ link()
//   gestures / objects / faces:
//     gate ─> snapshot ─> movement pass ─> enrichment pass ─┘
//   persons: PersonMap filtered by the movement gate
// ```
//
// The composite mapping is seeded before any other category is
// processed, so a gesture and a face sharing a person's track id both
// land in that person within the same tick.
//
// `simulate()` never mutates its inputs and never fails. Missing fields
// skip the transform that needs them.
//
//=========================================================================

//=== Submodules ==========================================================

mod composite;

//=== Standard Library Imports ============================================

use std::collections::BTreeSet;

//=== External Crates =====================================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::config::SimConfig;
use crate::core::coords::CoordinateMapper;
use crate::core::entity::{Category, CategoryFlags, CategoryList, EntityMeta, EntityStore, PersonTemplate};
use crate::core::input::InteractionSnapshot;
use crate::core::notify::{Detection, Notification, PersonMap};

//=== Frame ===============================================================

/// All payloads assembled for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub gestures: Vec<Detection>,
    pub objects: Vec<Detection>,
    pub faces: Vec<Detection>,
    pub persons: PersonMap,
}

impl Frame {
    /// Wraps each payload in its envelope, in category order.
    pub fn into_notifications(self) -> [Notification; 4] {
        [
            Notification::DetectedGestures(self.gestures),
            Notification::DetectedObjects(self.objects),
            Notification::DetectedFaces(self.faces),
            Notification::RecognizedPersons(self.persons),
        ]
    }
}

//=== FrameSimulator ======================================================

/// Stateless per-tick transform of (store, flags, interaction) to a frame.
#[derive(Debug, Clone)]
pub struct FrameSimulator {
    mapper: CoordinateMapper,
    distance_enabled: bool,
}

impl FrameSimulator {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            mapper: CoordinateMapper::new(config.image_width, config.image_height),
            distance_enabled: config.wheel_distance_enabled,
        }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    //--- simulate() -------------------------------------------------------

    /// Assembles one tick's payloads.
    pub fn simulate(
        &self,
        store: &EntityStore,
        enabled: CategoryFlags,
        input: &InteractionSnapshot,
    ) -> Frame {
        let mut persons = composite::seed(store.persons(), &self.mapper);

        let gestures = self.detections(
            Category::Gesture,
            enabled,
            store.gestures().iter().map(|(t, m)| (Detection::from(t), *m)),
            input,
            &mut persons,
        );
        let objects = self.detections(
            Category::Object,
            enabled,
            store.objects().iter().map(|(t, m)| (Detection::from(t), *m)),
            input,
            &mut persons,
        );
        let faces = self.detections(
            Category::Face,
            enabled,
            store.faces().iter().map(|(t, m)| (Detection::from(t), *m)),
            input,
            &mut persons,
        );

        let persons = if enabled.is_enabled(Category::Person) {
            Self::visible_persons(store.persons(), input, persons)
        } else {
            PersonMap::new()
        };

        trace!(
            target: "core::frame",
            "Frame: {} gestures, {} objects, {} faces, {} persons",
            gestures.len(),
            objects.len(),
            faces.len(),
            persons.len()
        );

        Frame {
            gestures,
            objects,
            faces,
            persons,
        }
    }

    //--- Category Assembly ------------------------------------------------

    fn detections<I>(
        &self,
        category: Category,
        enabled: CategoryFlags,
        snapshot: I,
        input: &InteractionSnapshot,
        persons: &mut PersonMap,
    ) -> Vec<Detection>
    where
        I: Iterator<Item = (Detection, EntityMeta)>,
    {
        if !enabled.is_enabled(category) {
            return Vec::new();
        }

        // Templates without a track id (the unfilled built-in entry) are
        // never emitted.
        let snapshot = snapshot.filter(|(detection, _)| {
            let tracked = detection.track_id.is_some();
            if !tracked {
                trace!(target: "core::frame", "{} template without track id skipped", category);
            }
            tracked
        });

        // Movement pass: pointer-bound entities follow the pointer while
        // their key is held and are left out of this tick otherwise.
        let visible: Vec<(Detection, EntityMeta)> = snapshot
            .filter_map(|(mut detection, meta)| match meta.movement {
                Some(key) if !key.is_held(input.modifiers) => None,
                Some(_) => {
                    detection.posx = Some(input.pointer.0);
                    detection.posy = Some(input.pointer.1);
                    Some((detection, meta))
                }
                None => Some((detection, meta)),
            })
            .collect();

        // Enrichment pass
        visible
            .into_iter()
            .map(|(detection, meta)| {
                let detection = self.enrich(category, detection, meta, input);
                composite::link(category, &detection, persons);
                detection
            })
            .collect()
    }

    fn enrich(
        &self,
        category: Category,
        mut detection: Detection,
        meta: EntityMeta,
        input: &InteractionSnapshot,
    ) -> Detection {
        if self.distance_enabled && category.carries_distance() {
            detection.distance = Some(input.distance);
        }

        // Scale first, normalize second
        if meta.scale {
            detection.w = detection.w.map(|w| w * input.scale);
            detection.h = detection.h.map(|h| h * input.scale);
        }

        if let (Some(x), Some(y)) = (detection.posx, detection.posy) {
            detection.center = Some(self.mapper.from_pixels([x, y]));
            detection.posx = None;
            detection.posy = None;
        }

        if let (Some(w), Some(h)) = (detection.w, detection.h) {
            detection.w_h = Some(self.mapper.from_pixels([w, h]));
            detection.w = None;
            detection.h = None;
        }

        detection
    }

    /// Drops composites whose person template is pointer-bound and whose
    /// key is not held.
    fn visible_persons(
        templates: &CategoryList<PersonTemplate>,
        input: &InteractionSnapshot,
        mut persons: PersonMap,
    ) -> PersonMap {
        let visible: BTreeSet<i64> = templates
            .iter()
            .filter(|(_, meta)| meta.movement.map_or(true, |key| key.is_held(input.modifiers)))
            .filter_map(|(template, _)| template.track_id)
            .collect();

        persons.retain(|track_id, _| visible.contains(track_id));
        persons
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
