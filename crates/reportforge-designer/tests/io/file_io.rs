use reportforge_core::LogLevel;
use reportforge_designer::{BandType, ContainerRef, DesignerState, ElementKind, NodeRef};
use tempfile::TempDir;

#[test]
fn test_save_and_open_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("invoice.rfd");

    let mut state = DesignerState::default();
    state.set_design_name("Invoice");
    let id = state
        .drop_element(ElementKind::TextField, 0, 0, ContainerRef::Band(BandType::Detail))
        .unwrap();
    state.save_file(&path).unwrap();
    assert!(!state.is_modified);
    assert_eq!(state.display_name(), "invoice.rfd");
    assert_eq!(state.config().recent_files.first(), Some(&path));

    let mut reopened = DesignerState::default();
    reopened.open_file(&path).unwrap();
    assert_eq!(reopened.design(), state.design());
    assert!(reopened.model().element(id).is_ok());
    assert_eq!(reopened.current_file_path.as_deref(), Some(path.as_path()));
    assert_eq!(reopened.selected(), Some(NodeRef::Design));
    assert!(!reopened.can_undo());
}

#[test]
fn test_failed_open_leaves_everything_alone() {
    let mut state = DesignerState::default();
    let id = state
        .drop_element(ElementKind::Ellipse, 0, 0, ContainerRef::Band(BandType::Summary))
        .unwrap();
    let design = state.design().clone();
    let undo_count = state.history().undo_count();

    assert!(state.open_str("<jasperReport/>").is_err());

    assert_eq!(state.design(), &design);
    assert_eq!(state.selected(), Some(NodeRef::Element(id)));
    assert_eq!(state.history().undo_count(), undo_count);
    assert_eq!(state.log().len(), 1);
    let entry = state.log().latest().unwrap();
    assert_eq!(entry.level, LogLevel::Error);
    assert!(!entry.description.is_empty());
}

#[test]
fn test_open_missing_file_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let mut state = DesignerState::default();

    let err = state.open_file(dir.path().join("absent.rfd")).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.rfd"));
    assert_eq!(state.log().len(), 1);
    assert!(state.current_file_path.is_none());
}

#[test]
fn test_open_replaces_document_and_stales_old_ids() {
    let mut source_state = DesignerState::default();
    source_state.set_query_string("select 1");
    let text = source_state.save_to_string().unwrap();

    let mut state = DesignerState::default();
    let old = state
        .drop_element(ElementKind::Rectangle, 0, 0, ContainerRef::Band(BandType::Title))
        .unwrap();
    state.open_str(&text).unwrap();

    assert_eq!(state.design().query, "select 1");
    assert!(state.model().element(old).unwrap_err().to_string().contains("Stale"));
    assert_eq!(state.selected(), Some(NodeRef::Design));
    assert!(!state.can_undo());
    assert!(!state.is_modified);
}

#[test]
fn test_new_design_resets_state() {
    let mut state = DesignerState::default();
    state.add_band(BandType::Background);
    state.set_design_name("Scratch");

    state.new_design();
    assert!(!state.model().has_band(BandType::Background));
    assert_eq!(state.design().name, "NewReport");
    assert_eq!(state.display_name(), "NewReport");
    assert!(!state.can_undo());
    assert_eq!(state.model().generation(), 1);
}
