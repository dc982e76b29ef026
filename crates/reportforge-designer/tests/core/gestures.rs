use reportforge_core::{Error, GestureError};
use reportforge_designer::{
    BandType, ContainerRef, DesignerState, ElementId, ElementKind, Geometry, GestureMode, Handle,
    NodeRef, Point,
};

const DETAIL: ContainerRef = ContainerRef::Band(BandType::Detail);

/// Designer with one 100x30 static text at (x, y) in the Detail band.
/// With zero margins the Detail band spans page y 150..200.
fn state_with_text(x: i32, y: i32) -> (DesignerState, ElementId) {
    let mut state = DesignerState::default();
    let id = state
        .drop_element(ElementKind::StaticText, x, y, DETAIL)
        .unwrap();
    (state, id)
}

fn geometry(state: &DesignerState, id: ElementId) -> Geometry {
    state.model().element_geometry(id).unwrap()
}

#[test]
fn test_move_gesture_grows_band_on_release() {
    let (mut state, id) = state_with_text(0, 0);
    state
        .press(NodeRef::Element(id), Point::new(10.0, 155.0), GestureMode::Move)
        .unwrap();
    state.drag(Point::new(10.0, 175.0)).unwrap();
    let live = state.drag(Point::new(10.0, 195.0)).unwrap();
    assert_eq!((live.x, live.y), (0, 40));
    assert_eq!(state.model().container_height(DETAIL).unwrap(), 50);

    assert!(state.release(Point::new(10.0, 195.0)).unwrap());
    assert_eq!(state.model().container_height(DETAIL).unwrap(), 70);
    assert_eq!(state.history().undo_name(), Some("Move Element"));

    assert!(state.undo());
    assert_eq!(geometry(&state, id), Geometry::new(0, 0, 100, 30));
    assert_eq!(state.model().container_height(DETAIL).unwrap(), 50);
}

#[test]
fn test_release_without_change_records_nothing() {
    let (mut state, id) = state_with_text(0, 0);
    let start = Point::new(10.0, 160.0);
    state
        .press(NodeRef::Element(id), start, GestureMode::Move)
        .unwrap();
    state.drag(Point::new(30.0, 170.0)).unwrap();
    state.drag(start).unwrap();

    assert!(!state.release(start).unwrap());
    assert_eq!(state.history().undo_count(), 1);
    assert!(!state.is_gesture_active());
}

#[test]
fn test_press_selects_target() {
    let (mut state, id) = state_with_text(0, 0);
    state.select(NodeRef::Design).unwrap();

    state
        .press(NodeRef::Element(id), Point::new(10.0, 160.0), GestureMode::Move)
        .unwrap();
    assert_eq!(state.selected(), Some(NodeRef::Element(id)));
}

#[test]
fn test_snapped_resize_lands_on_grid() {
    let (mut state, id) = state_with_text(20, 10);
    state.set_snap_to_grid(true);

    state
        .press(
            NodeRef::Element(id),
            Point::new(0.0, 0.0),
            GestureMode::Resize(Handle::BottomRight),
        )
        .unwrap();
    state.drag(Point::new(23.0, 14.0)).unwrap();
    assert!(state.release(Point::new(23.0, 14.0)).unwrap());
    assert_eq!(geometry(&state, id), Geometry::new(20, 10, 120, 40));
    assert_eq!(state.history().undo_name(), Some("Resize Element"));

    state.undo();
    assert_eq!(geometry(&state, id), Geometry::new(20, 10, 100, 30));
}

#[test]
fn test_left_resize_stops_at_floor() {
    let (mut state, id) = state_with_text(20, 10);
    state.set_snap_to_grid(true);
    let handle = GestureMode::Resize(Handle::Left);

    state
        .press(NodeRef::Element(id), Point::new(0.0, 0.0), handle)
        .unwrap();
    // Would leave a zero width, so the axis stays put
    let next = state.drag(Point::new(95.0, 0.0)).unwrap();
    assert_eq!(next, Geometry::new(20, 10, 100, 30));

    let next = state.drag(Point::new(85.0, 0.0)).unwrap();
    assert_eq!(next, Geometry::new(110, 10, 10, 30));
    assert_eq!(next.right(), 120);
    assert!(state.release(Point::new(85.0, 0.0)).unwrap());
}

#[test]
fn test_drag_into_other_band_reassigns() {
    let (mut state, id) = state_with_text(0, 0);
    state
        .press(NodeRef::Element(id), Point::new(10.0, 160.0), GestureMode::Move)
        .unwrap();
    state.drag(Point::new(10.0, 75.0)).unwrap();
    assert!(state.release(Point::new(10.0, 75.0)).unwrap());

    let page_header = ContainerRef::Band(BandType::PageHeader);
    assert_eq!(state.model().owner_of(id), Some(page_header));
    assert_eq!(geometry(&state, id), Geometry::new(0, 15, 100, 30));
    assert_eq!(state.selected(), Some(NodeRef::Element(id)));
    assert_eq!(state.history().undo_name(), Some("Move Element to Container"));

    assert!(state.undo());
    assert_eq!(state.model().owner_of(id), Some(DETAIL));
    assert_eq!(geometry(&state, id), Geometry::new(0, 0, 100, 30));
    assert!(state
        .model()
        .container_children(page_header)
        .unwrap()
        .is_empty());
}

#[test]
fn test_drag_into_frame_reassigns_to_frame() {
    let mut state = DesignerState::default();
    // A 200x100 frame grows Title to 100, pushing Detail down to 200..250
    let frame = state
        .drop_element(ElementKind::Frame, 300, 0, ContainerRef::Band(BandType::Title))
        .unwrap();
    let text = state
        .drop_element(ElementKind::StaticText, 0, 0, DETAIL)
        .unwrap();

    state
        .press(NodeRef::Element(text), Point::new(10.0, 205.0), GestureMode::Move)
        .unwrap();
    state.drag(Point::new(310.0, 10.0)).unwrap();
    assert!(state.release(Point::new(310.0, 10.0)).unwrap());

    assert_eq!(state.model().owner_of(text), Some(ContainerRef::Frame(frame)));
    assert_eq!(geometry(&state, text), Geometry::new(0, 5, 100, 30));
}

#[test]
fn test_drag_distance_is_divided_by_zoom() {
    let (mut state, id) = state_with_text(0, 0);
    for _ in 0..10 {
        state.zoom_in();
    }
    assert_eq!(state.zoom(), 2.0);

    state
        .press(NodeRef::Element(id), Point::new(20.0, 310.0), GestureMode::Move)
        .unwrap();
    state.drag(Point::new(60.0, 330.0)).unwrap();
    assert!(state.release(Point::new(60.0, 330.0)).unwrap());
    assert_eq!(state.model().owner_of(id), Some(DETAIL));
    assert_eq!(geometry(&state, id), Geometry::new(20, 10, 100, 30));
}

#[test]
fn test_second_press_is_refused() {
    let (mut state, id) = state_with_text(0, 0);
    let target = NodeRef::Element(id);
    state
        .press(target, Point::new(10.0, 160.0), GestureMode::Move)
        .unwrap();

    let err = state
        .press(target, Point::new(10.0, 160.0), GestureMode::Move)
        .unwrap_err();
    assert!(matches!(err, Error::Gesture(GestureError::GestureInProgress)));
}

#[test]
fn test_drag_without_press_fails() {
    let (mut state, _) = state_with_text(0, 0);
    let err = state.drag(Point::new(1.0, 1.0)).unwrap_err();
    assert!(matches!(err, Error::Gesture(GestureError::NoGesture)));
}

#[test]
fn test_cancel_restores_pressed_geometry() {
    let (mut state, id) = state_with_text(30, 5);
    state
        .press(NodeRef::Element(id), Point::new(40.0, 160.0), GestureMode::Move)
        .unwrap();
    state.drag(Point::new(90.0, 170.0)).unwrap();
    assert_ne!(geometry(&state, id), Geometry::new(30, 5, 100, 30));

    assert!(state.cancel_gesture().unwrap());
    assert_eq!(geometry(&state, id), Geometry::new(30, 5, 100, 30));
    assert!(!state.is_gesture_active());
    assert_eq!(state.history().undo_count(), 1);
}

#[test]
fn test_reassign_grows_target_and_undo_shrinks_it() {
    let mut state = DesignerState::default();
    let title = ContainerRef::Band(BandType::Title);
    let page_header = ContainerRef::Band(BandType::PageHeader);
    let id = state
        .drop_element(ElementKind::StaticText, 10, 10, title)
        .unwrap();

    state
        .press(NodeRef::Element(id), Point::new(20.0, 20.0), GestureMode::Move)
        .unwrap();
    state.drag(Point::new(20.0, 95.0)).unwrap();
    assert!(state.release(Point::new(20.0, 95.0)).unwrap());

    // Page y 85 lands 35 into PageHeader, whose bottom must reach 35 + 30
    assert_eq!(state.model().owner_of(id), Some(page_header));
    assert_eq!(geometry(&state, id), Geometry::new(10, 35, 100, 30));
    assert_eq!(state.model().container_height(page_header).unwrap(), 65);

    assert!(state.undo());
    assert_eq!(state.model().container_height(page_header).unwrap(), 50);
    assert_eq!(state.model().owner_of(id), Some(title));
    assert_eq!(geometry(&state, id), Geometry::new(10, 10, 100, 30));
}

#[test]
fn test_reassign_above_target_top_clamps_to_zero() {
    let mut state = DesignerState::default();
    let title = ContainerRef::Band(BandType::Title);
    let id = state
        .drop_element(ElementKind::StaticText, 0, 0, ContainerRef::Band(BandType::PageHeader))
        .unwrap();

    // The element ends at page y -9 while the pointer sits inside Title
    state
        .press(NodeRef::Element(id), Point::new(10.0, 79.0), GestureMode::Move)
        .unwrap();
    assert_eq!(state.drag(Point::new(10.0, 20.0)).unwrap().y, -59);
    assert!(state.release(Point::new(10.0, 20.0)).unwrap());

    assert_eq!(state.model().owner_of(id), Some(title));
    assert_eq!(geometry(&state, id), Geometry::new(0, 0, 100, 30));
    assert_eq!(state.model().container_height(title).unwrap(), 50);
}

#[test]
fn test_press_on_band_keeps_selection() {
    let (mut state, _) = state_with_text(0, 0);
    state.select(NodeRef::Design).unwrap();

    let err = state
        .press(NodeRef::Band(BandType::Detail), Point::new(10.0, 160.0), GestureMode::Move)
        .unwrap_err();
    assert!(matches!(err, Error::Gesture(GestureError::NotAnElement(_))));
    assert_eq!(state.selected(), Some(NodeRef::Design));
    assert!(!state.is_gesture_active());
}

#[test]
fn test_press_at_picks_element_under_pointer() {
    let (mut state, id) = state_with_text(0, 0);

    let pressed = state
        .press_at(Point::new(10.0, 160.0), GestureMode::Move)
        .unwrap();
    assert_eq!(pressed, Some(id));
    assert_eq!(state.selected(), Some(NodeRef::Element(id)));
    assert!(state.is_gesture_active());
    state.cancel_gesture().unwrap();

    let pressed = state
        .press_at(Point::new(10.0, 300.0), GestureMode::Move)
        .unwrap();
    assert_eq!(pressed, None);
    assert_eq!(state.selected(), None);
    assert!(!state.is_gesture_active());
}

#[test]
fn test_pan_shifts_hit_testing() {
    let (mut state, id) = state_with_text(0, 0);
    assert_eq!(state.element_at(Point::new(10.0, 260.0)), None);

    state.set_pan(0.0, 100.0);
    assert_eq!(state.element_at(Point::new(10.0, 260.0)), Some(id));
    state.pan_by(5.0, -100.0);
    assert_eq!(state.pan(), (5.0, 0.0));
    assert_eq!(state.element_at(Point::new(15.0, 160.0)), Some(id));
}

#[test]
fn test_release_target_accounts_for_pan() {
    let (mut state, id) = state_with_text(0, 0);
    state.set_pan(0.0, 100.0);

    // Scene y 175 is page y 75, inside PageHeader
    state
        .press(NodeRef::Element(id), Point::new(10.0, 260.0), GestureMode::Move)
        .unwrap();
    state.drag(Point::new(10.0, 175.0)).unwrap();
    assert!(state.release(Point::new(10.0, 175.0)).unwrap());

    assert_eq!(
        state.model().owner_of(id),
        Some(ContainerRef::Band(BandType::PageHeader))
    );
    assert_eq!(geometry(&state, id), Geometry::new(0, 15, 100, 30));
}
