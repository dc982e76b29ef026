//! Headless demo: opens a design (or builds a small one), runs a few
//! gestures and edits, and prints the resulting document.

use anyhow::Context;
use reportforge::{
    init_logging, BandType, ContainerRef, DesignerState, ElementKind, GestureMode, NodeRef, Point,
    SettingsManager, BUILD_DATE, VERSION,
};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("ReportForge {} (built {})", VERSION, BUILD_DATE);

    let mut settings = SettingsManager::new()?;
    let config = match settings.load() {
        Ok(config) => config.clone(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable settings: {}", e);
            Default::default()
        }
    };

    let mut designer = DesignerState::new(config);
    match std::env::args_os().nth(1) {
        Some(path) => designer.open_file(&path)?,
        None => build_sample(&mut designer)?,
    }

    let source = designer
        .save_to_string()
        .context("Failed to serialize design")?;
    println!("{}", source);

    for entry in designer.log().entries() {
        tracing::info!("{}", entry);
    }
    Ok(())
}

fn build_sample(designer: &mut DesignerState) -> anyhow::Result<()> {
    designer.set_design_name("Sample");
    designer.set_snap_to_grid(true);

    let title = designer.drop_element(
        ElementKind::StaticText,
        10,
        10,
        ContainerRef::Band(BandType::Title),
    )?;
    designer.set_element_text(title, "Quarterly Report")?;

    // Drag the title down into the page header band
    designer.press(NodeRef::Element(title), Point::new(20.0, 20.0), GestureMode::Move)?;
    designer.drag(Point::new(40.0, 65.0))?;
    designer.release(Point::new(40.0, 65.0))?;

    designer.drop_element(
        ElementKind::TextField,
        0,
        0,
        ContainerRef::Band(BandType::Detail),
    )?;
    designer.group_selection();

    tracing::info!(
        "Sample built: undo available = {}, selected = {:?}",
        designer.can_undo(),
        designer.selected()
    );
    Ok(())
}
