use super::*;
use crate::state::test_helpers::test_orchestrator;

fn code(outcome: &Outcome) -> Option<&str> {
    outcome.code.as_deref()
}

// =============================================================================
// place_point
// =============================================================================

#[test]
fn place_point_commits_element() {
    let mut editor = test_orchestrator();
    let outcome = editor.place_point("tree", 100.0, 100.0);
    assert!(outcome.success, "{}", outcome.message);

    let view = editor.project_state().unwrap();
    assert_eq!(view.elements.len(), 1);
    let record = &view.elements[0];
    assert_eq!(record.type_key, "tree");
    assert_eq!(record.width, Some(40.0));
    assert_eq!(record.shape, Shape::Point { x: 100.0, y: 100.0 });
    assert_eq!(view.undo_depth, 1);
}

#[test]
fn place_point_boundary_law() {
    let mut editor = test_orchestrator();
    assert!(editor.place_point("tree", 0.0, 0.0).success);
    assert!(editor.place_point("tree", 500.0, 300.0).success);

    let rejected = editor.place_point("tree", -1.0, 0.0);
    assert!(!rejected.success);
    assert_eq!(code(&rejected), Some("E_OUT_OF_BOUNDS"));
    assert_eq!(code(&editor.place_point("tree", 501.0, 0.0)), Some("E_OUT_OF_BOUNDS"));
}

#[test]
fn place_point_unknown_type() {
    let mut editor = test_orchestrator();
    let outcome = editor.place_point("castle", 10.0, 10.0);
    assert!(!outcome.success);
    assert_eq!(code(&outcome), Some("E_UNKNOWN_TYPE"));
    assert!(outcome.message.contains("castle"));
}

#[test]
fn place_point_rejects_path_type() {
    let mut editor = test_orchestrator();
    let outcome = editor.place_point("road", 10.0, 10.0);
    assert_eq!(code(&outcome), Some("E_WRONG_GEOMETRY"));
}

#[test]
fn rejected_placement_leaves_no_trace() {
    let mut editor = test_orchestrator();
    assert!(editor.place_point("tree", 100.0, 100.0).success);
    let before = editor.project_state().unwrap();

    let outcome = editor.place_point("tree", 110.0, 110.0);
    assert_eq!(code(&outcome), Some("E_COLLISION"));
    assert_eq!(editor.project_state().unwrap(), before);
    assert_eq!(editor.history.depth(), 1);
}

#[test]
fn tree_scenario() {
    let mut editor = test_orchestrator();
    assert!(editor.place_point("tree", 100.0, 100.0).success);

    let rejected = editor.place_point("tree", 110.0, 110.0);
    assert!(!rejected.success);
    assert_eq!(code(&rejected), Some("E_COLLISION"));

    // The rejection rolled back to the first tree only.
    let view = editor.project_state().unwrap();
    assert_eq!(view.elements.len(), 1);
    assert_eq!(view.elements[0].shape, Shape::Point { x: 100.0, y: 100.0 });

    // No snapshot of the rejected attempt remains, so undo removes the first tree.
    assert!(editor.undo().success);
    assert!(editor.project_state().unwrap().elements.is_empty());
}

#[test]
fn point_near_committed_road_is_rejected() {
    let mut editor = test_orchestrator();
    assert!(editor.append_path_vertex("road", Point::new(0.0, 100.0)).success);
    assert!(editor.append_path_vertex("road", Point::new(200.0, 100.0)).success);
    assert!(editor.finish_path("road").success);

    assert_eq!(code(&editor.place_point("tree", 50.0, 110.0)), Some("E_COLLISION"));
    assert!(editor.place_point("tree", 50.0, 120.0).success);
}

// =============================================================================
// place_path
// =============================================================================

#[test]
fn place_path_commits_whole_path() {
    let mut editor = test_orchestrator();
    let outcome = editor.place_path("road", vec![Point::new(0.0, 0.0), Point::new(50.0, 50.0), Point::new(90.0, 10.0)]);
    assert!(outcome.success);
    let view = editor.project_state().unwrap();
    assert_eq!(view.elements.len(), 1);
    assert!(matches!(&view.elements[0].shape, Shape::Path { path } if path.len() == 3));
    assert_eq!(view.elements[0].visual, "#6b7280");
}

#[test]
fn place_path_rejects_any_out_of_bounds_vertex() {
    let mut editor = test_orchestrator();
    let outcome = editor.place_path("road", vec![Point::new(0.0, 0.0), Point::new(50.0, 400.0)]);
    assert_eq!(code(&outcome), Some("E_OUT_OF_BOUNDS"));
    assert_eq!(editor.history.depth(), 0);
}

#[test]
fn place_path_rejects_vertex_in_point_box() {
    let mut editor = test_orchestrator();
    assert!(editor.place_point("building", 100.0, 100.0).success);
    let outcome = editor.place_path("road", vec![Point::new(0.0, 0.0), Point::new(110.0, 90.0)]);
    assert_eq!(code(&outcome), Some("E_COLLISION"));
    assert_eq!(editor.project_state().unwrap().elements.len(), 1);
}

#[test]
fn place_path_needs_two_vertices() {
    let mut editor = test_orchestrator();
    let outcome = editor.place_path("road", vec![Point::new(0.0, 0.0)]);
    assert_eq!(code(&outcome), Some("E_TOO_FEW_VERTICES"));
    assert_eq!(code(&editor.place_path("tree", vec![])), Some("E_WRONG_GEOMETRY"));
}

// =============================================================================
// Incremental path drawing
// =============================================================================

#[test]
fn two_vertices_then_finish_commits_path() {
    let mut editor = test_orchestrator();
    assert!(editor.append_path_vertex("road", Point::new(10.0, 10.0)).success);
    assert!(editor.append_path_vertex("road", Point::new(60.0, 10.0)).success);

    let view = editor.project_state().unwrap();
    assert_eq!(view.temp_path.len(), 2);
    assert_eq!(view.temp_path_type.as_deref(), Some("road"));
    assert!(view.elements.is_empty());

    assert!(editor.finish_path("road").success);
    let view = editor.project_state().unwrap();
    assert!(view.temp_path.is_empty());
    assert!(view.temp_path_type.is_none());
    assert_eq!(view.elements.len(), 1);
    assert_eq!(
        view.elements[0].shape,
        Shape::Path { path: vec![Point::new(10.0, 10.0), Point::new(60.0, 10.0)] }
    );
}

#[test]
fn finish_with_too_few_vertices_cancels() {
    let mut editor = test_orchestrator();
    let empty = editor.finish_path("road");
    assert!(empty.success);
    assert_eq!(empty.message, "Drawing cancelled.");

    assert!(editor.append_path_vertex("road", Point::new(10.0, 10.0)).success);
    let single = editor.finish_path("road");
    assert!(single.success);
    assert_eq!(single.message, "Drawing cancelled.");

    let view = editor.project_state().unwrap();
    assert!(view.elements.is_empty());
    assert!(view.temp_path.is_empty());
}

#[test]
fn finish_with_too_few_vertices_ignores_type_key() {
    let mut editor = test_orchestrator();
    let empty = editor.finish_path("tree");
    assert!(empty.success);
    assert_eq!(empty.message, "Drawing cancelled.");

    assert!(editor.append_path_vertex("road", Point::new(1.0, 1.0)).success);
    let single = editor.finish_path("castle");
    assert!(single.success);
    assert_eq!(single.message, "Drawing cancelled.");

    let view = editor.project_state().unwrap();
    assert!(view.temp_path.is_empty());
    assert!(view.temp_path_type.is_none());
    assert!(view.elements.is_empty());
}

#[test]
fn append_rejects_vertex_out_of_bounds() {
    let mut editor = test_orchestrator();
    assert!(editor.append_path_vertex("road", Point::new(10.0, 10.0)).success);
    let outcome = editor.append_path_vertex("road", Point::new(10.0, 301.0));
    assert_eq!(code(&outcome), Some("E_OUT_OF_BOUNDS"));
    assert_eq!(editor.project_state().unwrap().temp_path, vec![Point::new(10.0, 10.0)]);
    assert_eq!(editor.history.depth(), 1);
}

#[test]
fn append_rejects_vertex_inside_tree() {
    let mut editor = test_orchestrator();
    assert!(editor.place_point("tree", 100.0, 100.0).success);
    let outcome = editor.append_path_vertex("road", Point::new(110.0, 95.0));
    assert_eq!(code(&outcome), Some("E_COLLISION"));
    assert!(editor.project_state().unwrap().temp_path_type.is_none());
}

#[test]
fn append_does_not_check_segment_crossing() {
    let mut editor = test_orchestrator();
    assert!(editor.place_point("tree", 100.0, 100.0).success);
    // The segment passes straight through the tree, but only vertices are checked.
    assert!(editor.append_path_vertex("road", Point::new(50.0, 100.0)).success);
    assert!(editor.append_path_vertex("road", Point::new(150.0, 100.0)).success);
    assert!(editor.finish_path("road").success);
}

#[test]
fn append_rejects_point_type() {
    let mut editor = test_orchestrator();
    assert_eq!(code(&editor.append_path_vertex("tree", Point::new(1.0, 1.0))), Some("E_WRONG_GEOMETRY"));
    assert_eq!(code(&editor.append_path_vertex("lava", Point::new(1.0, 1.0))), Some("E_UNKNOWN_TYPE"));
}

#[test]
fn append_rejects_type_switch_mid_path() {
    let catalog = Catalog::from_yaml_str(
        "road: {name: Road, visual: '#666', width: 10, height: 10, class: path}\n\
         river: {name: River, visual: '#00f', class: path}\n",
    )
    .unwrap();
    let mut editor = PlacementOrchestrator::new(catalog);
    assert!(editor.append_path_vertex("road", Point::new(1.0, 1.0)).success);
    let outcome = editor.append_path_vertex("river", Point::new(2.0, 2.0));
    assert_eq!(code(&outcome), Some("E_TYPE_MISMATCH"));
    assert_eq!(editor.project_state().unwrap().temp_path.len(), 1);

    assert!(editor.append_path_vertex("road", Point::new(3.0, 3.0)).success);
    assert_eq!(code(&editor.finish_path("river")), Some("E_TYPE_MISMATCH"));
    assert_eq!(editor.project_state().unwrap().temp_path.len(), 2);
}

#[test]
fn undo_unwinds_path_one_vertex_at_a_time() {
    let mut editor = test_orchestrator();
    assert!(editor.append_path_vertex("road", Point::new(10.0, 10.0)).success);
    assert!(editor.append_path_vertex("road", Point::new(20.0, 20.0)).success);
    assert!(editor.append_path_vertex("road", Point::new(30.0, 30.0)).success);

    assert!(editor.undo().success);
    assert_eq!(editor.project_state().unwrap().temp_path.len(), 2);
    assert!(editor.undo().success);
    assert_eq!(editor.project_state().unwrap().temp_path.len(), 1);
    assert!(editor.undo().success);
    let view = editor.project_state().unwrap();
    assert!(view.temp_path.is_empty());
    assert!(view.temp_path_type.is_none());
}

#[test]
fn undo_after_finish_restores_drawing() {
    let mut editor = test_orchestrator();
    assert!(editor.append_path_vertex("road", Point::new(10.0, 10.0)).success);
    assert!(editor.append_path_vertex("road", Point::new(20.0, 20.0)).success);
    assert!(editor.finish_path("road").success);

    assert!(editor.undo().success);
    let view = editor.project_state().unwrap();
    assert!(view.elements.is_empty());
    assert_eq!(view.temp_path.len(), 2);
}

#[test]
fn cancel_path_clears_buffer_and_is_undoable() {
    let mut editor = test_orchestrator();
    assert!(editor.append_path_vertex("road", Point::new(10.0, 10.0)).success);
    assert!(editor.cancel_path().success);
    assert!(editor.project_state().unwrap().temp_path.is_empty());

    assert!(editor.undo().success);
    assert_eq!(editor.project_state().unwrap().temp_path, vec![Point::new(10.0, 10.0)]);
}

// =============================================================================
// undo + projection
// =============================================================================

#[test]
fn undo_with_empty_history_succeeds() {
    let mut editor = test_orchestrator();
    let outcome = editor.undo();
    assert!(outcome.success);
    assert_eq!(outcome.message, "Nothing to undo.");
    assert!(outcome.code.is_none());
}

#[test]
fn n_operations_then_n_undos_restore_initial_state() {
    let mut editor = test_orchestrator();
    let initial = editor.project_state().unwrap();

    let results = [
        editor.place_point("tree", 50.0, 50.0),
        editor.append_path_vertex("road", Point::new(200.0, 10.0)),
        editor.append_path_vertex("road", Point::new(200.0, 250.0)),
        editor.finish_path("road"),
        editor.place_point("water", 400.0, 200.0),
        editor.place_path("road", vec![Point::new(300.0, 10.0), Point::new(450.0, 10.0)]),
    ];
    assert!(results.iter().all(|o| o.success));

    for _ in 0..results.len() {
        assert!(editor.undo().success);
    }
    assert_eq!(editor.project_state().unwrap(), initial);
}

#[test]
fn projection_uses_cached_metadata() {
    let mut editor = test_orchestrator();
    assert!(editor.place_point("tree", 50.0, 50.0).success);
    assert!(editor.place_point("tree", 150.0, 50.0).success);
    assert!(editor.place_point("tree", 250.0, 50.0).success);
    for _ in 0..3 {
        editor.project_state().unwrap();
    }
    assert_eq!(editor.cache.constructions(), 1);
}

#[test]
fn projection_serializes_camel_case() {
    let mut editor = test_orchestrator();
    assert!(editor.place_point("tree", 50.0, 60.0).success);
    assert!(editor.append_path_vertex("road", Point::new(300.0, 10.0)).success);

    let json = serde_json::to_value(editor.project_state().unwrap()).unwrap();
    assert_eq!(json["tempPath"], serde_json::json!([{"x": 300.0, "y": 10.0}]));
    assert_eq!(json["undoDepth"], serde_json::json!(2));
    let tree = &json["elements"][0];
    assert_eq!(tree["type"], "tree");
    assert_eq!(tree["class"], "point");
    assert_eq!(tree["name"], "Árvore");
    assert_eq!(tree["x"], 50.0);
    assert_eq!(tree["height"], 40.0);
}

#[test]
fn catalog_lists_every_type() {
    let editor = test_orchestrator();
    let items = editor.catalog();
    let keys: Vec<&str> = items.iter().map(|i| i.type_key.as_str()).collect();
    assert_eq!(keys, vec!["building", "road", "tree", "water"]);
    let json = serde_json::to_value(&items[1]).unwrap();
    assert_eq!(json["type"], "road");
    assert_eq!(json["class"], "path");
}

#[test]
fn error_codes_are_distinct() {
    let errors = [
        PlacementError::UnknownType("x".into()),
        PlacementError::OutOfBounds { x: 0.0, y: 0.0 },
        PlacementError::Collision { type_key: "tree".into(), id: Uuid::nil() },
        PlacementError::WrongGeometry {
            type_key: "tree".into(),
            expected: GeometryClass::Path,
            actual: GeometryClass::Point,
        },
        PlacementError::PathTypeMismatch { drawing: "a".into(), requested: "b".into() },
        PlacementError::TooFewVertices(1),
    ];
    let mut codes: Vec<&str> = errors.iter().map(ErrorCode::error_code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}
