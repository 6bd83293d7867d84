//=========================================================================
// Headless Runtime Tests
//=========================================================================
//
// Drives a windowless simulator through its public handle and observes
// the published notifications.
//
//=========================================================================

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use detection_simulator::prelude::*;

const TIMEOUT: Duration = Duration::from_secs(5);

//--- Test Helpers --------------------------------------------------------

fn simulator() -> Simulator {
    SimulatorBuilder::new()
        .with_fps(100)
        .with_ready_delay_ms(0)
        .build()
        .unwrap()
}

/// Waits for the first notification matching `pick`.
fn wait_for<T>(rx: &Receiver<Notification>, mut pick: impl FnMut(Notification) -> Option<T>) -> T {
    let deadline = Instant::now() + TIMEOUT;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let notification = rx.recv_timeout(remaining).expect("notification before timeout");
        if let Some(found) = pick(notification) {
            return found;
        }
    }
}

//=========================================================================
// Tick Loop
//=========================================================================

#[test]
fn edited_gesture_is_emitted_normalized() {
    let simulator = simulator();
    let rx = simulator.subscribe();
    let handle = simulator.handle();
    let core = simulator.spawn_headless();

    handle.append_entity(Category::Gesture).unwrap();
    handle
        .update_entity(
            1,
            EntityTemplate::Gesture(DetectionTemplate::new(7, "flat_right").at(960.0, 540.0).sized(192.0, 108.0)),
            EntityMeta::default(),
        )
        .unwrap();
    handle.set_category_enabled(Category::Gesture, true).unwrap();
    handle.modules_started().unwrap();

    let gesture = wait_for(&rx, |n| match n {
        Notification::DetectedGestures(list) => list.into_iter().find(|g| g.track_id == Some(7)),
        _ => None,
    });

    assert_eq!(gesture.center, Some([0.5, 0.5]));
    assert_eq!(gesture.w_h, Some([0.1, 0.1]));
    assert_eq!(gesture.distance, Some(1000.0));

    handle.shutdown().unwrap();
    core.join().unwrap();
}

#[test]
fn wheel_input_changes_distance() {
    let simulator = simulator();
    let rx = simulator.subscribe();
    let handle = simulator.handle();
    let core = simulator.spawn_headless();

    handle.append_entity(Category::Object).unwrap();
    handle
        .update_entity(1, EntityTemplate::Object(DetectionTemplate::new(2, "cup")), EntityMeta::default())
        .unwrap();
    handle.set_category_enabled(Category::Object, true).unwrap();
    for _ in 0..3 {
        handle.send_input(InputEvent::Wheel { delta_y: -100.0 }).unwrap();
    }
    handle.modules_started().unwrap();

    let distance = wait_for(&rx, |n| match n {
        Notification::DetectedObjects(list) => {
            list.into_iter().find(|o| o.track_id == Some(2)).and_then(|o| o.distance)
        }
        _ => None,
    });
    assert_eq!(distance, 970.0);

    handle.shutdown().unwrap();
    core.join().unwrap();
}

#[test]
fn composite_person_links_across_categories() {
    let simulator = simulator();
    let rx = simulator.subscribe();
    let handle = simulator.handle();
    let core = simulator.spawn_headless();

    handle.append_entity(Category::Person).unwrap();
    handle
        .update_entity(1, EntityTemplate::Person(PersonTemplate::new(3)), EntityMeta::default())
        .unwrap();
    handle.append_entity(Category::Face).unwrap();
    handle
        .update_entity(
            1,
            EntityTemplate::Face(FaceTemplate::new(DetectionTemplate::new(3, "alice"), 9, 0.9)),
            EntityMeta::default(),
        )
        .unwrap();
    for category in [Category::Face, Category::Person] {
        handle.set_category_enabled(category, true).unwrap();
    }
    handle.modules_started().unwrap();

    let person = wait_for(&rx, |n| match n {
        Notification::RecognizedPersons(mut persons) => persons.remove(&3),
        _ => None,
    });

    match person.face {
        PersonFace::Detected(face) => assert_eq!(face.id, Some(9)),
        other => panic!("Expected linked face, got {:?}", other),
    }

    handle.shutdown().unwrap();
    core.join().unwrap();
}

//=========================================================================
// Lifecycle
//=========================================================================

#[test]
fn dropping_every_handle_stops_the_core() {
    let simulator = simulator();
    let handle = simulator.handle();
    let core = simulator.spawn_headless();

    drop(handle);

    core.join().unwrap();
}

#[test]
fn debug_emitter_shares_the_bus() {
    let simulator = simulator();
    let rx = simulator.subscribe();
    let emitter = simulator.debug_emitter();

    emitter.sim_gesture_detection(&DebugDetection::new(-1));

    let value = rx.recv_timeout(TIMEOUT).unwrap().to_value().unwrap();
    assert_eq!(value, serde_json::json!({ "DETECTED_GESTURES": [] }));
}
