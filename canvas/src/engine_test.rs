#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

const T0: u64 = 1_700_000_000_000;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn element_at(id: u64, kind: ElementKind, x: f64, y: f64, w: f64, h: f64) -> PlacedElement {
    PlacedElement { id: ElementId(id), kind, x, y, width: w, height: h, rotation: 0 }
}

fn core_with(elements: Vec<PlacedElement>) -> EngineCore {
    let mut core = EngineCore::new();
    core.load_snapshot(Layout::from_elements(elements).unwrap());
    core
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_element_updated(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::ElementUpdated { .. }))
}

/// Drop one element and return its id.
fn drop_one(core: &mut EngineCore, payload: &str, at: Point) -> ElementId {
    let actions = core.on_drop(payload, at, T0);
    match actions.first() {
        Some(Action::ElementCreated(el)) => el.id,
        other => panic!("expected ElementCreated, got {other:?}"),
    }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn core_new_is_empty_and_idle() {
    let core = EngineCore::new();
    assert!(core.doc.is_empty());
    assert!(core.selection().is_none());
    assert!(core.input.is_idle());
    assert_eq!(core.camera, Camera::default());
    assert!(!core.can_rotate());
    assert!(core.selection_summary().is_none());
}

// =============================================================
// Drop
// =============================================================

#[test]
fn drop_creates_default_element_centered_on_point() {
    let mut core = EngineCore::new();
    let actions = core.on_drop("Chair", pt(100.0, 100.0), T0);

    let expected = PlacedElement {
        id: ElementId(T0),
        kind: ElementKind::Chair,
        x: 75.0,
        y: 75.0,
        width: 50.0,
        height: 50.0,
        rotation: 0,
    };
    assert_eq!(actions, vec![Action::ElementCreated(expected.clone()), Action::RenderNeeded]);
    assert_eq!(core.snapshot(), vec![expected]);
}

#[test]
fn drop_does_not_change_selection() {
    let mut core = EngineCore::new();
    let first = drop_one(&mut core, "Table", pt(100.0, 100.0));
    core.on_pointer_down(pt(100.0, 100.0));
    core.on_pointer_up(pt(100.0, 100.0));
    assert_eq!(core.selection(), Some(first));

    let actions = core.on_drop("Door", pt(400.0, 400.0), T0 + 5);
    assert!(!has_action(&actions, |a| matches!(a, Action::SelectionChanged(_))));
    assert_eq!(core.selection(), Some(first));
}

#[test]
fn drop_accepts_legacy_labels() {
    let mut core = EngineCore::new();
    drop_one(&mut core, "Meja", pt(50.0, 50.0));
    assert_eq!(core.snapshot()[0].kind, ElementKind::Table);
}

#[test]
fn drop_with_unknown_payload_is_ignored() {
    let mut core = EngineCore::new();
    assert!(core.on_drop("Sofa", pt(100.0, 100.0), T0).is_empty());
    assert!(core.on_drop("", pt(100.0, 100.0), T0).is_empty());
    assert!(core.doc.is_empty());
}

#[test]
fn drops_in_same_millisecond_get_distinct_ids() {
    let mut core = EngineCore::new();
    let a = core.on_drop("Table", pt(100.0, 100.0), T0);
    let b = core.on_drop("Table", pt(200.0, 100.0), T0);
    let (Some(Action::ElementCreated(a)), Some(Action::ElementCreated(b))) = (a.first(), b.first()) else {
        panic!("expected two creations");
    };
    assert_ne!(a.id, b.id);
    assert_eq!(core.doc.len(), 2);
}

#[test]
fn drop_appends_on_top() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    let id = drop_one(&mut core, "Door", pt(10.0, 10.0));
    assert_eq!(core.doc.index_of(id), Some(1));
}

#[test]
fn drop_maps_client_point_through_camera() {
    let mut core = EngineCore::new();
    core.camera = Camera::from_client_rect(300.0, 100.0, 800.0, 600.0, 800.0, 600.0);
    let id = drop_one(&mut core, "Chair", pt(400.0, 200.0));
    let el = core.object(id).unwrap();
    assert_eq!((el.x, el.y), (75.0, 75.0));
}

// =============================================================
// Selection via pointer-down
// =============================================================

#[test]
fn pointer_down_on_element_selects_and_starts_drag() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    let actions = core.on_pointer_down(pt(10.0, 20.0));

    assert_eq!(actions, vec![Action::SelectionChanged(Some(ElementId(1))), Action::RenderNeeded]);
    assert_eq!(core.selection(), Some(ElementId(1)));
    assert_eq!(core.input, InputState::Dragging { id: ElementId(1), grab_offset: pt(10.0, 20.0) });
}

#[test]
fn pointer_down_on_empty_space_clears_selection() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    core.on_pointer_down(pt(10.0, 10.0));
    core.on_pointer_up(pt(10.0, 10.0));

    let actions = core.on_pointer_down(pt(300.0, 300.0));
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert!(core.selection().is_none());
    assert!(core.input.is_idle());
}

#[test]
fn pointer_down_on_empty_space_without_selection_only_renders() {
    let mut core = EngineCore::new();
    assert_eq!(core.on_pointer_down(pt(5.0, 5.0)), vec![Action::RenderNeeded]);
}

#[test]
fn pointer_down_on_overlap_picks_first_element() {
    let mut core = core_with(vec![
        element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0),
        element_at(2, ElementKind::Chair, 20.0, 20.0, 50.0, 50.0),
    ]);
    core.on_pointer_down(pt(30.0, 30.0));
    assert_eq!(core.selection(), Some(ElementId(1)));
}

#[test]
fn pointer_down_on_edge_misses() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    core.on_pointer_down(pt(0.0, 25.0));
    assert!(core.selection().is_none());
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn drag_moves_element_keeping_grab_offset() {
    let mut core = EngineCore::new();
    let id = drop_one(&mut core, "Chair", pt(100.0, 100.0));

    core.on_pointer_down(pt(100.0, 100.0));
    let actions = core.on_pointer_move(pt(120.0, 90.0));
    core.on_pointer_up(pt(120.0, 90.0));

    assert!(has_element_updated(&actions));
    assert!(has_render_needed(&actions));
    let el = core.object(id).unwrap();
    assert_eq!((el.x, el.y, el.width, el.height), (95.0, 65.0, 50.0, 50.0));
}

#[test]
fn drag_reports_new_position() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    core.on_pointer_down(pt(10.0, 10.0));
    let actions = core.on_pointer_move(pt(60.0, 30.0));
    assert_eq!(
        actions[0],
        Action::ElementUpdated {
            id: ElementId(1),
            fields: PartialElement { x: Some(50.0), y: Some(20.0), ..Default::default() },
        }
    );
}

#[test]
fn drag_is_not_clamped_to_canvas() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    core.on_pointer_down(pt(10.0, 10.0));
    core.on_pointer_move(pt(-100.0, 2000.0));
    let el = core.object(ElementId(1)).unwrap();
    assert_eq!((el.x, el.y), (-110.0, 1990.0));
}

#[test]
fn move_while_idle_is_noop() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    assert!(core.on_pointer_move(pt(10.0, 10.0)).is_empty());
    assert_eq!(core.object(ElementId(1)).unwrap().x, 0.0);
}

#[test]
fn pointer_up_ends_gesture() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    core.on_pointer_down(pt(10.0, 10.0));
    assert!(core.on_pointer_up(pt(10.0, 10.0)).is_empty());
    assert!(core.input.is_idle());
    assert!(core.on_pointer_move(pt(40.0, 40.0)).is_empty());
    assert_eq!(core.object(ElementId(1)).unwrap().x, 0.0);
}

// =============================================================
// Resizing
// =============================================================

fn selected_core() -> EngineCore {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    core.on_pointer_down(pt(25.0, 25.0));
    core.on_pointer_up(pt(25.0, 25.0));
    core
}

#[test]
fn pointer_down_on_handle_starts_resize_without_reselecting() {
    let mut core = selected_core();
    let actions = core.on_pointer_down(pt(50.0, 50.0));
    assert!(actions.is_empty());
    assert_eq!(
        core.input,
        InputState::Resizing { id: ElementId(1), start: pt(50.0, 50.0), orig_w: 50.0, orig_h: 50.0 }
    );
}

#[test]
fn handle_is_ignored_when_not_selected() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    core.on_pointer_down(pt(52.0, 52.0));
    assert!(core.input.is_idle());
    assert!(core.selection().is_none());
}

#[test]
fn resize_grows_by_pointer_delta() {
    let mut core = selected_core();
    core.on_pointer_down(pt(50.0, 50.0));
    core.on_pointer_move(pt(80.0, 60.0));
    let el = core.object(ElementId(1)).unwrap();
    assert_eq!((el.x, el.y, el.width, el.height), (0.0, 0.0, 80.0, 60.0));
}

#[test]
fn resize_clamps_to_minimum_size() {
    let mut core = selected_core();
    core.on_pointer_down(pt(50.0, 50.0));
    let actions = core.on_pointer_move(pt(-500.0, 45.0));

    let el = core.object(ElementId(1)).unwrap();
    assert_eq!((el.width, el.height), (MIN_ELEMENT_SIZE, 45.0));
    assert_eq!(
        actions[0],
        Action::ElementUpdated {
            id: ElementId(1),
            fields: PartialElement { width: Some(10.0), height: Some(45.0), ..Default::default() },
        }
    );
}

#[test]
fn resize_never_goes_below_minimum_over_many_moves() {
    let mut core = selected_core();
    core.on_pointer_down(pt(50.0, 50.0));
    for step in 0..40 {
        let p = f64::from(step);
        core.on_pointer_move(pt(50.0 - p * 7.0, 50.0 - p * 3.0));
        let el = core.object(ElementId(1)).unwrap();
        assert!(el.width >= MIN_ELEMENT_SIZE);
        assert!(el.height >= MIN_ELEMENT_SIZE);
    }
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn rotate_without_selection_is_noop() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    assert!(!core.can_rotate());
    assert!(core.rotate_selected().is_empty());
    assert_eq!(core.object(ElementId(1)).unwrap().rotation, 0);
}

#[test]
fn rotate_advances_by_one_step() {
    let mut core = selected_core();
    assert!(core.can_rotate());
    let actions = core.rotate_selected();
    assert_eq!(
        actions,
        vec![
            Action::ElementUpdated {
                id: ElementId(1),
                fields: PartialElement { rotation: Some(45), ..Default::default() },
            },
            Action::RenderNeeded,
        ]
    );
}

#[test]
fn eight_rotations_are_identity() {
    let mut core = selected_core();
    let mut seen = Vec::new();
    for _ in 0..8 {
        core.rotate_selected();
        seen.push(core.object(ElementId(1)).unwrap().rotation);
    }
    assert_eq!(seen, vec![45, 90, 135, 180, 225, 270, 315, 0]);
}

#[test]
fn rotation_does_not_change_box() {
    let mut core = selected_core();
    core.rotate_selected();
    core.rotate_selected();
    let el = core.object(ElementId(1)).unwrap();
    assert_eq!((el.x, el.y, el.width, el.height), (0.0, 0.0, 50.0, 50.0));
}

// =============================================================
// Load
// =============================================================

#[test]
fn load_replaces_elements_wholesale() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    let layout = Layout::from_elements(vec![element_at(9, ElementKind::Door, 5.0, 5.0, 20.0, 40.0)]).unwrap();
    let actions = core.load_snapshot(layout);

    assert!(has_render_needed(&actions));
    assert_eq!(core.doc.len(), 1);
    assert!(core.object(ElementId(1)).is_none());
    assert_eq!(core.object(ElementId(9)).unwrap().kind, ElementKind::Door);
}

#[test]
fn load_empty_layout_shows_nothing() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    core.load_snapshot(Layout::new());
    assert!(core.doc.is_empty());
    assert!(core.snapshot().is_empty());
}

#[test]
fn load_keeps_selection_when_id_survives() {
    let mut core = selected_core();
    let layout = Layout::from_elements(vec![element_at(1, ElementKind::Table, 200.0, 0.0, 50.0, 50.0)]).unwrap();
    let actions = core.load_snapshot(layout);

    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(core.selection(), Some(ElementId(1)));
    assert_eq!(core.selected_element().unwrap().x, 200.0);
}

#[test]
fn load_clears_stale_selection() {
    let mut core = selected_core();
    let layout = Layout::from_elements(vec![element_at(2, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]).unwrap();
    let actions = core.load_snapshot(layout);

    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert!(core.selection().is_none());
    assert!(!core.can_rotate());
}

#[test]
fn load_during_drag_drops_the_gesture() {
    let mut core = core_with(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    core.on_pointer_down(pt(10.0, 10.0));
    core.load_snapshot(Layout::from_elements(vec![element_at(1, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]).unwrap());
    assert!(core.input.is_idle());
    assert!(core.on_pointer_move(pt(100.0, 100.0)).is_empty());
}

#[test]
fn new_ids_after_load_skip_loaded_ids() {
    let mut core = core_with(vec![element_at(T0, ElementKind::Table, 0.0, 0.0, 50.0, 50.0)]);
    let id = drop_one(&mut core, "Chair", pt(300.0, 300.0));
    assert_ne!(id, ElementId(T0));
    assert!(Layout::from_elements(core.snapshot()).is_ok());
}

// =============================================================
// Summary / full scenario
// =============================================================

#[test]
fn selection_summary_describes_selected_element() {
    let mut core = selected_core();
    core.rotate_selected();
    assert_eq!(
        core.selection_summary().as_deref(),
        Some("Selected: Table | Position: (0, 0) | Size: 50x50 | Rotation: 45\u{b0}")
    );
}

#[test]
fn drop_drag_rotate_scenario() {
    let mut core = EngineCore::new();
    let id = drop_one(&mut core, "Chair", pt(100.0, 100.0));

    core.on_pointer_down(pt(100.0, 100.0));
    core.on_pointer_move(pt(120.0, 90.0));
    core.on_pointer_up(pt(120.0, 90.0));
    core.rotate_selected();

    let expected = PlacedElement {
        id,
        kind: ElementKind::Chair,
        x: 95.0,
        y: 65.0,
        width: 50.0,
        height: 50.0,
        rotation: 45,
    };
    assert_eq!(core.snapshot(), vec![expected]);

    let wire = serde_json::to_value(core.snapshot()).unwrap();
    assert_eq!(wire[0]["type"], "Chair");
    assert_eq!(wire[0]["rotation"], 45);
}
