use std::sync::Arc;

use reportforge_core::CodecError;
use reportforge_designer::{
    Band, BandType, ContainerRef, Design, DesignCodec, DesignerState, Element, ElementId,
    ElementKind, Geometry, JsonDesignCodec, OutlineRenderer, SplitType,
};
use reportforge_settings::DesignerConfig;

fn every_kind_design() -> Design {
    let mut design = Design::default();
    design.query = "select id, total from invoices".to_string();
    let mut no_data = Band::new(BandType::NoData, 40);
    no_data.split_type = SplitType::Immediate;
    no_data.print_when_expression = Some("$V{REPORT_COUNT} == 0".to_string());
    design.insert_band(no_data).unwrap();

    let detail = design.band_mut(BandType::Detail).unwrap();
    for (i, kind) in ElementKind::ALL.into_iter().enumerate() {
        detail.elements.push(Element::at(kind, i as i32 * 5, 0));
    }
    let nested = Element::frame(
        ElementId::new(),
        Geometry::new(0, 0, 120, 40),
        vec![Element::static_text("inside", Geometry::new(2, 2, 60, 20))],
    );
    detail.elements.push(nested);
    design
}

#[test]
fn test_every_element_kind_survives_json() {
    let codec = JsonDesignCodec::new();
    let design = every_kind_design();
    let text = codec.save(&design).unwrap();
    assert_eq!(codec.load(&text).unwrap(), design);
}

#[test]
fn test_compact_snippet_is_single_line() {
    let codec = JsonDesignCodec::compact();
    let element = Element::at(ElementKind::Subreport, 1, 2);
    let snippet = codec.serialize_element(&element).unwrap();
    assert!(!snippet.contains('\n'));
    assert_eq!(codec.deserialize_element(&snippet).unwrap(), element);
    assert!(matches!(
        codec.deserialize_element("   "),
        Err(CodecError::EmptySnippet)
    ));
}

/// Codec that refuses everything, to exercise failure paths
struct BrokenCodec;

impl DesignCodec for BrokenCodec {
    fn load(&self, _source: &str) -> Result<Design, CodecError> {
        Err(CodecError::Parse("broken codec".to_string()))
    }

    fn save(&self, _design: &Design) -> Result<String, CodecError> {
        Err(CodecError::Serialize("broken codec".to_string()))
    }

    fn serialize_element(&self, _element: &Element) -> Result<String, CodecError> {
        Err(CodecError::Serialize("broken codec".to_string()))
    }

    fn deserialize_element(&self, _snippet: &str) -> Result<Element, CodecError> {
        Err(CodecError::EmptySnippet)
    }
}

#[test]
fn test_codec_failures_are_logged_not_applied() {
    let mut state = DesignerState::with_collaborators(
        DesignerConfig::default(),
        Box::new(BrokenCodec),
        Arc::new(OutlineRenderer::new()),
    );
    state
        .drop_element(ElementKind::Line, 0, 0, ContainerRef::Band(BandType::Title))
        .unwrap();

    assert!(!state.copy());
    assert!(state.clipboard().is_none());
    assert!(state.save_to_string().is_err());
    assert!(state.open_str("{}").is_err());
    assert_eq!(state.design().element_count(), 1);
    assert_eq!(state.log().len(), 3);
}

#[test]
fn test_out_of_range_sizes_are_rejected_on_load() {
    let codec = JsonDesignCodec::new();

    let mut negative_band = Design::default();
    negative_band.band_mut(BandType::Detail).unwrap().height = -40;
    let text = codec.save(&negative_band).unwrap();
    assert!(matches!(codec.load(&text), Err(CodecError::Parse(_))));

    let mut negative_element = Design::default();
    let mut element = Element::at(ElementKind::Rectangle, 0, 0);
    element.width = -1;
    negative_element
        .band_mut(BandType::Title)
        .unwrap()
        .elements
        .push(element);
    let text = codec.save(&negative_element).unwrap();
    assert!(matches!(codec.load(&text), Err(CodecError::Parse(_))));

    let mut empty_page = Design::default();
    empty_page.page_height = 0;
    let text = codec.save(&empty_page).unwrap();
    assert!(matches!(codec.load(&text), Err(CodecError::Parse(_))));
}

#[test]
fn test_open_with_negative_band_height_keeps_current_design() {
    let mut broken = Design::default();
    broken.band_mut(BandType::Detail).unwrap().height = -40;
    let text = JsonDesignCodec::new().save(&broken).unwrap();

    let mut state = DesignerState::default();
    assert!(state.open_str(&text).is_err());
    assert_eq!(state.design().band(BandType::Detail).unwrap().height, 50);
    assert_eq!(state.log().len(), 1);
}
