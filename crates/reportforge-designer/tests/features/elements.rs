use reportforge_core::{Error, LogLevel, ModelError};
use reportforge_designer::{
    BandType, ContainerRef, DesignerState, ElementContent, ElementId, ElementKind, Geometry,
    NodeRef,
};

const DETAIL: ContainerRef = ContainerRef::Band(BandType::Detail);

#[test]
fn test_drop_creates_selects_and_undoes() {
    let mut state = DesignerState::default();
    let id = state
        .drop_by_name("STATIC_TEXT", 0, 0, DETAIL)
        .unwrap();

    let element = state.model().element(id).unwrap();
    assert_eq!(element.kind(), ElementKind::StaticText);
    assert_eq!(element.geometry(), Geometry::new(0, 0, 100, 30));
    assert_eq!(state.selected(), Some(NodeRef::Element(id)));
    assert_eq!(state.model().container_height(DETAIL).unwrap(), 50);
    assert!(state.display_name().ends_with('*'));

    assert!(state.undo());
    assert!(state.model().element(id).is_err());
    assert_eq!(state.selected(), None);
}

#[test]
fn test_drop_into_frame_grows_frame() {
    let mut state = DesignerState::default();
    let frame = state
        .drop_element(ElementKind::Frame, 0, 0, DETAIL)
        .unwrap();
    let target = ContainerRef::Frame(frame);
    state
        .drop_element(ElementKind::StaticText, 0, 80, target)
        .unwrap();

    assert_eq!(state.model().container_height(target).unwrap(), 110);
    state.undo();
    assert_eq!(state.model().container_height(target).unwrap(), 100);
}

#[test]
fn test_drop_onto_non_container_fails() {
    let mut state = DesignerState::default();
    let text = state
        .drop_element(ElementKind::StaticText, 0, 0, DETAIL)
        .unwrap();

    let err = state
        .drop_element(ElementKind::Line, 0, 0, ContainerRef::Frame(text))
        .unwrap_err();
    assert!(matches!(err, Error::Model(ModelError::NotAContainer { .. })));
    assert_eq!(state.history().undo_count(), 1);
}

#[test]
fn test_group_top_level_element() {
    let mut state = DesignerState::default();
    let id = state
        .drop_element(ElementKind::Rectangle, 40, 5, DETAIL)
        .unwrap();

    assert!(state.group_selection());
    let Some(NodeRef::Element(frame_id)) = state.selected() else {
        panic!("frame not selected");
    };
    let frame = state.model().element(frame_id).unwrap();
    assert_eq!(frame.kind(), ElementKind::Frame);
    assert_eq!(frame.geometry(), Geometry::new(40, 5, 100, 50));
    assert_eq!(state.model().owner_of(frame_id), Some(DETAIL));
    assert_eq!(state.model().owner_of(id), Some(ContainerRef::Frame(frame_id)));
    assert_eq!(state.model().element_geometry(id).unwrap(), Geometry::new(0, 0, 100, 50));
    assert_eq!(state.history().undo_name(), Some("Group into Frame"));

    assert!(state.undo());
    assert_eq!(state.model().owner_of(id), Some(DETAIL));
    assert_eq!(state.model().element_geometry(id).unwrap(), Geometry::new(40, 5, 100, 50));
    assert_eq!(state.selected(), None);
}

#[test]
fn test_group_nested_element_keeps_frame_selected() {
    let mut state = DesignerState::default();
    let outer = state
        .drop_element(ElementKind::Frame, 0, 0, DETAIL)
        .unwrap();
    let inner = state
        .drop_element(ElementKind::Ellipse, 10, 10, ContainerRef::Frame(outer))
        .unwrap();

    assert!(state.group_selection());
    let Some(NodeRef::Element(frame_id)) = state.selected() else {
        panic!("frame not selected");
    };
    assert_ne!(frame_id, inner);
    assert_eq!(state.model().owner_of(frame_id), Some(ContainerRef::Frame(outer)));
    assert_eq!(state.model().owner_of(inner), Some(ContainerRef::Frame(frame_id)));
    // Everything stays reachable by id
    assert!(state.model().element(outer).is_ok());
    assert!(state.model().element(inner).is_ok());
}

#[test]
fn test_group_without_selection_is_noop() {
    let mut state = DesignerState::default();
    let before = state.design().clone();
    state.select(NodeRef::Band(BandType::Title)).unwrap();

    assert!(!state.group_selection());
    assert_eq!(state.design(), &before);
    assert_eq!(state.log().latest().unwrap().level, LogLevel::Warning);
}

#[test]
fn test_delete_selection_removes_from_one_container() {
    let mut state = DesignerState::default();
    let keep = state
        .drop_element(ElementKind::StaticText, 0, 0, DETAIL)
        .unwrap();
    let doomed = state
        .drop_element(ElementKind::StaticText, 0, 20, DETAIL)
        .unwrap();
    let count = state.model().element_count();

    assert!(state.delete_selection());
    assert_eq!(state.model().element_count(), count - 1);
    assert!(state.model().element(doomed).is_err());
    assert_eq!(state.selected(), None);
    let ids: Vec<ElementId> = state
        .model()
        .container_children(DETAIL)
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![keep]);

    assert!(state.undo());
    assert_eq!(state.model().index_in_container(doomed), Some(1));
}

#[test]
fn test_delete_nested_element() {
    let mut state = DesignerState::default();
    let frame = state
        .drop_element(ElementKind::Frame, 0, 0, DETAIL)
        .unwrap();
    let inner = state
        .drop_element(ElementKind::Image, 5, 5, ContainerRef::Frame(frame))
        .unwrap();

    assert!(state.delete_selection());
    assert!(state.model().element(inner).is_err());
    assert!(state
        .model()
        .container_children(ContainerRef::Frame(frame))
        .unwrap()
        .is_empty());
}

#[test]
fn test_delete_without_selection_is_noop() {
    let mut state = DesignerState::default();
    state.drop_element(ElementKind::Line, 0, 0, DETAIL).unwrap();
    state.clear_selection();
    let before = state.design().clone();
    let undo_count = state.history().undo_count();

    assert!(!state.delete_selection());
    assert_eq!(state.design(), &before);
    assert_eq!(state.history().undo_count(), undo_count);

    let entry = state.log().latest().unwrap();
    assert_eq!(entry.level, LogLevel::Warning);
    assert_eq!(entry.message, "Cannot delete");
}

#[test]
fn test_text_edit_is_undoable() {
    let mut state = DesignerState::default();
    let id = state
        .drop_element(ElementKind::StaticText, 0, 0, DETAIL)
        .unwrap();

    assert!(state.set_element_text(id, "Invoice").unwrap());
    assert_eq!(state.model().element(id).unwrap().text(), Some("Invoice"));
    state.undo();
    assert_ne!(state.model().element(id).unwrap().text(), Some("Invoice"));

    let rect = state
        .drop_element(ElementKind::Rectangle, 0, 0, DETAIL)
        .unwrap();
    assert!(matches!(
        state.set_element_text(rect, "nope"),
        Err(Error::Model(ModelError::UnsupportedProperty { .. }))
    ));
}

#[test]
fn test_frame_content_is_exhaustive() {
    let mut state = DesignerState::default();
    let frame = state
        .drop_element(ElementKind::Frame, 0, 0, DETAIL)
        .unwrap();
    match &state.model().element(frame).unwrap().content {
        ElementContent::Frame { children } => assert!(children.is_empty()),
        other => panic!("unexpected content {:?}", other),
    }
}
