use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use reportforge_core::{shared_vec, Error, LogLevel, RenderError};
use reportforge_designer::{
    BandType, ContainerRef, Design, DesignerState, ElementKind, HistoryState, JsonDesignCodec,
    MarginSide, NodeRef, PageImage, ReportRenderer, ViewMode,
};
use reportforge_settings::DesignerConfig;

#[test]
fn test_zoom_steps_are_clamped() {
    let mut state = DesignerState::default();
    assert_eq!(state.zoom_in(), 1.1);
    assert_eq!(state.zoom_out(), 1.0);

    for _ in 0..50 {
        state.zoom_in();
    }
    assert_eq!(state.zoom(), 4.0);

    for _ in 0..60 {
        state.zoom_out();
    }
    assert_eq!(state.zoom(), 0.2);

    state.reset_zoom();
    assert_eq!(state.zoom(), 1.0);
}

#[test]
fn test_query_edit_is_undoable() {
    let mut state = DesignerState::default();
    let states = shared_vec::<HistoryState>();
    let sink = states.clone();
    state.on_history_changed(Box::new(move |s| sink.borrow_mut().push(*s)));

    assert!(state.set_query_string("select * from orders"));
    assert!(!state.set_query_string("select * from orders"));
    assert_eq!(state.design().query, "select * from orders");

    state.undo();
    assert_eq!(state.design().query, "");
    assert_eq!(states.borrow().len(), 2);
    assert!(states.borrow()[1].can_redo);
}

#[test]
fn test_design_properties_are_undoable() {
    let mut state = DesignerState::default();
    assert!(state.set_design_name("Invoices"));
    assert!(state.set_margin(MarginSide::Top, 30));
    assert_eq!(state.display_name(), "Invoices*");

    state.undo();
    state.undo();
    assert_eq!(state.design().name, "NewReport");
    assert_eq!(state.design().margins.top, 0);
}

#[test]
fn test_selection_listener_sees_changes() {
    let mut state = DesignerState::default();
    let seen = shared_vec::<Option<NodeRef>>();
    let sink = seen.clone();
    state.on_selection_changed(Box::new(move |s| sink.borrow_mut().push(*s)));

    state.select(NodeRef::Band(BandType::Title)).unwrap();
    state.clear_selection();
    assert_eq!(
        *seen.borrow(),
        vec![Some(NodeRef::Band(BandType::Title)), None]
    );
    assert!(state.select(NodeRef::Band(BandType::Background)).is_err());
}

#[test]
fn test_source_view_round_trip() {
    let mut state = DesignerState::default();
    state
        .drop_element(ElementKind::StaticText, 0, 0, ContainerRef::Band(BandType::Title))
        .unwrap();

    state.set_view_mode(ViewMode::Source).unwrap();
    assert_eq!(state.view_mode(), ViewMode::Source);
    assert!(state.source_text().contains("NewReport"));

    let edited = state.source_text().replace("NewReport", "Edited");
    state.apply_source_text(&edited).unwrap();
    assert_eq!(state.design().name, "Edited");
    assert_eq!(state.design().element_count(), 1);
    assert!(state.is_modified);
    assert!(!state.can_undo());
}

#[test]
fn test_bad_source_text_keeps_design() {
    let mut state = DesignerState::default();
    state.set_view_mode(ViewMode::Source).unwrap();
    let before = state.design().clone();

    assert!(state.apply_source_text("{ not a design").is_err());
    assert_eq!(state.design(), &before);
    assert_eq!(state.log().latest().unwrap().level, LogLevel::Error);
}

#[test]
fn test_preview_arrives_off_thread() {
    let mut state = DesignerState::default();
    state.set_view_mode(ViewMode::Preview).unwrap();
    assert!(state.is_preview_pending());

    let deadline = Instant::now() + Duration::from_secs(10);
    while !state.poll_preview().unwrap() {
        assert!(Instant::now() < deadline, "preview never arrived");
        thread::sleep(Duration::from_millis(5));
    }

    let page = state.last_preview().unwrap();
    assert_eq!((page.width(), page.height()), (595, 842));
    assert!(!state.is_preview_pending());
}

struct FailingRenderer;

impl ReportRenderer for FailingRenderer {
    fn render(&self, _design: &Design) -> Result<PageImage, RenderError> {
        panic!("layout engine crashed");
    }
}

#[test]
fn test_renderer_panic_ends_pending_preview() {
    let mut state = DesignerState::with_collaborators(
        DesignerConfig::default(),
        Box::new(JsonDesignCodec::new()),
        Arc::new(FailingRenderer),
    );
    state.request_preview().unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    let err = loop {
        match state.poll_preview() {
            Ok(false) => {
                assert!(Instant::now() < deadline, "preview never settled");
                thread::sleep(Duration::from_millis(5));
            }
            Ok(true) => panic!("a panicking renderer produced a page"),
            Err(e) => break e,
        }
    };

    assert!(matches!(err, Error::Render(RenderError::Panicked(_))));
    assert!(!state.is_preview_pending());
    assert!(state.last_preview().is_none());
    let entry = state.log().latest().unwrap();
    assert_eq!(entry.level, LogLevel::Error);
    assert!(entry.description.contains("layout engine crashed"));
}

#[test]
fn test_grid_settings() {
    let mut state = DesignerState::default();
    assert_eq!(state.grid_size(), 10);
    assert!(!state.snap_to_grid());
    assert!(state.show_grid());

    assert!(!state.set_grid_size(0));
    assert!(state.set_grid_size(25));
    state.set_snap_to_grid(true);
    state.set_show_grid(false);
    assert_eq!(state.config().grid.size, 25);
    assert!(state.snap_to_grid());
    assert!(!state.show_grid());
}
