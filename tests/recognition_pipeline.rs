// tests/recognition_pipeline.rs
//! Integration tests for the recognition stack

use gesture_core::config::constants::recognition::{LETTER_MODEL, SHAPE_MODEL};
use gesture_core::input::points_from;
use gesture_core::recognition::heuristic::convex_hull;
use gesture_core::recognition::{CommandTable, RouteMode};
use gesture_core::simulation::{StrokeGenerator, StrokeShape};
use gesture_core::{
    classify_shape, GesturePoint, HybridDispatcher, ModelRouter, Shape, ShapeClassifier,
    TrainedGestureStore,
};
use proptest::prelude::*;
use tempfile::tempdir;

#[test]
fn test_nearest_neighbour_example() {
    let mut store = TrainedGestureStore::new(8);
    store.add_sample("tri", &points_from(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]), "launch");
    store.add_sample(
        "zig",
        &points_from(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]),
        "undo",
    );

    let query = points_from(&[(0.0, 0.1), (1.0, -0.1), (0.5, 0.9)]);
    assert_eq!(store.predict(&query), "tri");
    assert_eq!(store.command_for_label("tri"), "launch");
    assert_eq!(store.command_for_label("zig"), "undo");
    assert_eq!(store.command_for_label("none"), "");
}

#[test]
fn test_nearest_neighbour_reference_vectors() {
    let mut store = TrainedGestureStore::new(3);
    store.add_sample("tri", &points_from(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]), "a");
    store.add_sample("other", &points_from(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]), "b");

    let query = points_from(&[(0.0, 0.0), (0.9, 0.1), (0.1, 0.9)]);
    assert_eq!(store.predict(&query), "tri");
}

#[test]
fn test_heuristic_basics() {
    let square = points_from(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let triangle = points_from(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    assert_eq!(classify_shape(&square), Some(Shape::Square));
    assert_eq!(classify_shape(&triangle), Some(Shape::Triangle));
    assert_eq!(classify_shape(&points_from(&[(5.0, 5.0)])), Some(Shape::Circle));
    assert_eq!(classify_shape(&[]), None);
}

#[test]
fn test_generated_squares_are_squares() {
    let mut generator = StrokeGenerator::seeded(11).with_noise(0.02);
    for _ in 0..20 {
        let stroke = generator.generate(StrokeShape::Square, 24);
        assert_eq!(classify_shape(&stroke), Some(Shape::Square));
    }
}

#[test]
fn test_trained_store_separates_generated_shapes() {
    let shapes = [StrokeShape::Circle, StrokeShape::Triangle, StrokeShape::Line];
    let mut training = StrokeGenerator::seeded(1).with_noise(0.02);
    let mut store = TrainedGestureStore::new(16);
    for (shape, stroke) in training.labelled_set(&shapes, 3, 16) {
        store.add_sample(shape.as_str(), &stroke, &format!("on-{}", shape.as_str()));
    }

    let mut queries = StrokeGenerator::seeded(2).with_noise(0.02);
    for (shape, stroke) in queries.labelled_set(&shapes, 5, 16) {
        assert_eq!(store.predict(&stroke), shape.as_str());
    }
}

#[test]
fn test_dispatcher_prefers_training_then_heuristic() {
    let square = points_from(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let mut dispatcher = HybridDispatcher::new(16);

    assert_eq!(dispatcher.predict(&square), "square");
    assert_eq!(dispatcher.command_for_gesture(&square), "custom");

    dispatcher.add_sample("frame", &square, "screenshot");
    assert_eq!(dispatcher.predict(&square), "frame");
    assert_eq!(dispatcher.command_for_gesture(&square), "screenshot");

    assert!(dispatcher.undo());
    assert_eq!(dispatcher.command_for_gesture(&square), "custom");
}

#[test]
fn test_router_auto_mode() {
    let mut router = ModelRouter::new();
    let short = points_from(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    let long: Vec<GesturePoint> = (0..7).map(|i| GesturePoint::new(i as f32, 0.0)).collect();

    assert_eq!(router.recognize(&short, "auto"), "");

    router.register(SHAPE_MODEL, ShapeClassifier::heuristic());
    assert_eq!(router.recognize(&short, "auto"), "triangle");
    assert_eq!(router.recognize(&long, "auto"), "");

    router.register(LETTER_MODEL, ShapeClassifier::heuristic());
    assert_eq!(router.recognize(&long, RouteMode::Auto), "circle");
    assert_eq!(router.recognize(&short, "unregistered"), "");
}

#[test]
fn test_registry_on_disk_drives_dispatcher() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("models.json");
    let commands = dir.path().join("commands.json");
    std::fs::write(
        &registry,
        format!(
            r#"{{"{}": "{}"}}"#,
            SHAPE_MODEL,
            dir.path().join("absent.onnx").display()
        ),
    )
    .unwrap();
    std::fs::write(&commands, r#"{"triangle": "open-terminal", "dot": "click"}"#).unwrap();

    let mut router = ModelRouter::with_command_map(&commands);
    assert!(router.load_config(&registry));

    let dispatcher = HybridDispatcher::new(16).with_router(router);
    let triangle = points_from(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    assert_eq!(dispatcher.predict(&triangle), "triangle");
    assert_eq!(dispatcher.command_for_gesture(&triangle), "open-terminal");
    assert_eq!(dispatcher.command_for_symbol("circle"), "click");
}

#[test]
fn test_command_map_alias_asymmetry() {
    let mut table = CommandTable::with_defaults();
    table.apply_document(r#"{"circle": "open"}"#);
    assert_eq!(table.command_for("dot"), "paste");

    table.apply_document(r#"{"dot": "click"}"#);
    assert_eq!(table.command_for("circle"), "click");
}

#[test]
fn test_missing_model_keeps_heuristic() {
    let mut dispatcher = HybridDispatcher::new(16);
    assert!(!dispatcher.load_model("does/not/exist.onnx"));
    let square = points_from(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    assert_eq!(dispatcher.predict(&square), "square");
}

proptest! {
    #[test]
    fn prop_hull_is_drawn_from_input(
        coords in prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 0..40),
    ) {
        let points = points_from(&coords);
        let hull = convex_hull(&points);

        prop_assert!(hull.len() <= points.len());
        for vertex in &hull {
            prop_assert!(points.contains(vertex));
        }
        prop_assert_eq!(classify_shape(&points).is_some(), !points.is_empty());
    }

    #[test]
    fn prop_hull_ignores_point_order(
        coords in prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0), 3..30),
    ) {
        let points = points_from(&coords);
        let mut reversed = points.clone();
        reversed.reverse();
        prop_assert_eq!(convex_hull(&points), convex_hull(&reversed));
    }
}
