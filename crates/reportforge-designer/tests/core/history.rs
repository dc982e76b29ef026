use reportforge_designer::{
    AddBandCommand, AddElementCommand, BandType, ChangePropertyCommand, Command, ContainerRef,
    DeleteBandCommand, DesignModel, Element, ElementId, ElementKind, Geometry,
    GroupIntoFrameCommand, HistoryManager, MarginSide, MoveElementCommand,
    ReassignElementCommand, RemoveElementCommand, ResizeElementCommand,
};

const DETAIL: ContainerRef = ContainerRef::Band(BandType::Detail);

fn sample_model() -> (DesignModel, ElementId, ElementId) {
    let mut model = DesignModel::default();
    let text = Element::static_text("Total", Geometry::new(10, 10, 100, 30));
    let text_id = text.id;
    let frame_id = ElementId::new();
    let frame = Element::frame(
        frame_id,
        Geometry::new(200, 0, 150, 40),
        vec![Element::new(ElementKind::Rectangle)],
    );
    model.add_element(DETAIL, text).unwrap();
    model.add_element(DETAIL, frame).unwrap();
    (model, text_id, frame_id)
}

type CommandFactory = fn(&DesignModel, ElementId, ElementId) -> Box<dyn Command>;

fn command_factories() -> [(&'static str, CommandFactory); 12] {
    [
        ("query", |m, _, _| Box::new(ChangePropertyCommand::query(m, "select 1"))),
        ("margin", |m, _, _| {
            Box::new(ChangePropertyCommand::margin(m, MarginSide::Left, 40))
        }),
        ("band height", |m, _, _| {
            Box::new(ChangePropertyCommand::band_height(m, BandType::Title, 90).unwrap())
        }),
        ("text", |m, text, _| {
            Box::new(ChangePropertyCommand::element_text(m, text, "Grand Total").unwrap())
        }),
        ("move", |_, text, _| {
            Box::new(MoveElementCommand::new(text, (10, 10), (10, 80)))
        }),
        ("resize", |_, text, _| {
            Box::new(ResizeElementCommand::new(
                text,
                Geometry::new(10, 10, 100, 30),
                Geometry::new(0, 0, 300, 120),
            ))
        }),
        ("reassign", |_, text, frame| {
            Box::new(ReassignElementCommand::new(
                text,
                (DETAIL, 0),
                Geometry::new(10, 10, 100, 30),
                ContainerRef::Frame(frame),
                (5, 25),
            ))
        }),
        ("add", |_, _, frame| {
            Box::new(AddElementCommand::new(
                ContainerRef::Frame(frame),
                Element::at(ElementKind::Ellipse, 0, 60),
            ))
        }),
        ("remove", |_, _, frame| Box::new(RemoveElementCommand::new(frame))),
        ("group", |_, text, _| Box::new(GroupIntoFrameCommand::new(text))),
        ("add band", |_, _, _| {
            Box::new(AddBandCommand::new(BandType::Background, 50))
        }),
        ("delete band", |_, _, _| Box::new(DeleteBandCommand::new(BandType::Detail))),
    ]
}

#[test]
fn test_undo_restores_prior_state_for_every_command() {
    for (label, factory) in command_factories() {
        let (mut model, text, frame) = sample_model();
        let before = model.design().clone();
        let mut history = HistoryManager::default();

        history.execute(factory(&model, text, frame), &mut model);
        assert_ne!(model.design(), &before, "{} changed nothing", label);

        assert!(history.undo(&mut model));
        assert_eq!(model.design(), &before, "{} not undone", label);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }
}

#[test]
fn test_redo_replays_to_same_state() {
    for (label, factory) in command_factories() {
        let (mut model, text, frame) = sample_model();
        let mut history = HistoryManager::default();

        history.execute(factory(&model, text, frame), &mut model);
        let cmd = Box::new(ChangePropertyCommand::design_name(&model, "Invoices"));
        history.execute(cmd, &mut model);
        let after = model.design().clone();

        history.undo(&mut model);
        history.undo(&mut model);
        history.redo(&mut model);
        history.redo(&mut model);
        assert_eq!(model.design(), &after, "{} redo diverged", label);
    }
}

#[test]
fn test_new_command_discards_redo_lineage() {
    let (mut model, text, _) = sample_model();
    let mut history = HistoryManager::default();

    history.execute(Box::new(MoveElementCommand::new(text, (10, 10), (20, 20))), &mut model);
    history.execute(Box::new(MoveElementCommand::new(text, (20, 20), (30, 30))), &mut model);
    history.undo(&mut model);
    assert!(history.can_redo());

    let cmd = Box::new(ChangePropertyCommand::query(&model, "select * from orders"));
    history.execute(cmd, &mut model);
    assert!(!history.can_redo());
    assert_eq!(history.undo_count(), 2);
}

#[test]
fn test_move_command_execute_undo_redo() {
    let (mut model, text, _) = sample_model();
    let mut history = HistoryManager::default();
    let position = |model: &DesignModel| {
        let g = model.element_geometry(text).unwrap();
        (g.x, g.y)
    };

    history.execute(Box::new(MoveElementCommand::new(text, (10, 10), (50, 50))), &mut model);
    assert_eq!(position(&model), (50, 50));
    history.undo(&mut model);
    assert_eq!(position(&model), (10, 10));
    history.redo(&mut model);
    assert_eq!(position(&model), (50, 50));
}

#[test]
fn test_band_grows_to_fit_moved_element() {
    let mut model = DesignModel::default();
    let element = Element::static_text("Amount", Geometry::new(0, 0, 100, 30));
    let id = element.id;
    let mut history = HistoryManager::default();

    history.execute(Box::new(AddElementCommand::new(DETAIL, element)), &mut model);
    assert_eq!(model.container_height(DETAIL).unwrap(), 50);

    history.execute(Box::new(MoveElementCommand::new(id, (0, 0), (0, 40))), &mut model);
    assert_eq!(model.container_height(DETAIL).unwrap(), 70);

    history.undo(&mut model);
    assert_eq!(model.container_height(DETAIL).unwrap(), 50);
}
