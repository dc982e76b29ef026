use reportforge_core::{shared_vec, EventFilter, ModelError};
use reportforge_designer::{
    BandType, ContainerRef, Design, DesignModel, Element, ElementId, Geometry, ListChange,
    ModelEvent, ModelEventCategory, NodeRef, Property,
};

fn model_with_text() -> (DesignModel, ElementId) {
    let mut model = DesignModel::default();
    let element = Element::static_text("Name", Geometry::new(0, 0, 100, 30));
    let id = element.id;
    model
        .add_element(ContainerRef::Band(BandType::Detail), element)
        .unwrap();
    (model, id)
}

#[test]
fn test_setter_writes_tree_and_notifies_once() {
    let (mut model, id) = model_with_text();
    let seen = shared_vec::<ModelEvent>();
    let sink = seen.clone();
    model.subscribe_node(NodeRef::Element(id), move |e| sink.borrow_mut().push(e.clone()));

    assert!(model.set_x(id, 25).unwrap());
    assert_eq!(model.element(id).unwrap().x, 25);
    assert!(!model.set_x(id, 25).unwrap());

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(matches!(
        seen[0],
        ModelEvent::PropertyChanged {
            property: Property::X,
            ..
        }
    ));
}

#[test]
fn test_size_edits_respect_floor() {
    let (mut model, id) = model_with_text();
    model.set_width(id, 3).unwrap();
    model.set_height(id, -20).unwrap();
    let geometry = model.element_geometry(id).unwrap();
    assert_eq!((geometry.width, geometry.height), (10, 10));
}

#[test]
fn test_container_list_changes_are_ordered() {
    let mut model = DesignModel::default();
    let changes = shared_vec::<ListChange<ElementId>>();
    let sink = changes.clone();
    model.subscribe(EventFilter::category(ModelEventCategory::Structure), move |e| {
        if let ModelEvent::ChildrenChanged { change, .. } = e {
            sink.borrow_mut().push(change.clone());
        }
    });

    let first = Element::static_text("a", Geometry::new(0, 0, 50, 20));
    let second = Element::static_text("b", Geometry::new(0, 20, 50, 20));
    let (a, b) = (first.id, second.id);
    let detail = ContainerRef::Band(BandType::Detail);
    model.add_element(detail, first).unwrap();
    model.add_element(detail, second).unwrap();
    model.remove_element(a).unwrap();

    let children: Vec<ElementId> = model
        .container_children(detail)
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(children, vec![b]);
    assert_eq!(
        *changes.borrow(),
        vec![
            ListChange::Added { index: 0, item: a },
            ListChange::Added { index: 1, item: b },
            ListChange::Removed { index: 0, item: a },
        ]
    );
}

#[test]
fn test_owner_lookup_reaches_nested_frames() {
    let mut model = DesignModel::default();
    let leaf = Element::static_text("deep", Geometry::new(0, 0, 40, 20));
    let leaf_id = leaf.id;
    let inner_id = ElementId::new();
    let inner = Element::frame(inner_id, Geometry::new(0, 0, 80, 40), vec![leaf]);
    let outer = Element::frame(ElementId::new(), Geometry::new(0, 0, 200, 50), vec![inner]);
    model
        .add_element(ContainerRef::Band(BandType::Summary), outer)
        .unwrap();

    assert_eq!(model.owner_of(leaf_id), Some(ContainerRef::Frame(inner_id)));
    assert_eq!(model.element_count(), 3);
}

#[test]
fn test_references_go_stale_on_replace() {
    let (mut model, id) = model_with_text();
    model.replace_design(Design::default()).unwrap();

    assert!(matches!(
        model.element(id),
        Err(ModelError::StaleReference { .. })
    ));
    assert!(matches!(
        model.element(ElementId::new()),
        Err(ModelError::ElementNotFound { .. })
    ));
}

#[test]
fn test_missing_band_is_reported() {
    let mut model = DesignModel::default();
    assert!(matches!(
        model.set_band_height(BandType::Background, 30),
        Err(ModelError::BandNotFound { .. })
    ));
}
