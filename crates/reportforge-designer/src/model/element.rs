//! Report elements.
//!
//! [`ElementContent`] is the closed set of element kinds; every consumer
//! matches on it exhaustively. [`ElementKind`] is the payload-free tag used
//! by palettes and drop targets.

use reportforge_core::{ElementId, ModelError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geometry::Geometry;

/// Smallest width or height an edit may produce.
pub const MIN_ELEMENT_SIZE: i32 = 10;

/// Payload-free element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    StaticText,
    TextField,
    Rectangle,
    Ellipse,
    Line,
    Image,
    Frame,
    Break,
    Subreport,
    Chart,
    Crosstab,
    Barcode,
}

impl ElementKind {
    pub const ALL: [ElementKind; 12] = [
        ElementKind::StaticText,
        ElementKind::TextField,
        ElementKind::Rectangle,
        ElementKind::Ellipse,
        ElementKind::Line,
        ElementKind::Image,
        ElementKind::Frame,
        ElementKind::Break,
        ElementKind::Subreport,
        ElementKind::Chart,
        ElementKind::Crosstab,
        ElementKind::Barcode,
    ];

    /// Width and height given to a freshly dropped element
    pub fn default_size(self) -> (i32, i32) {
        match self {
            ElementKind::StaticText | ElementKind::TextField => (100, 30),
            ElementKind::Rectangle | ElementKind::Ellipse => (100, 50),
            ElementKind::Line => (100, 1),
            ElementKind::Image => (60, 60),
            ElementKind::Frame | ElementKind::Subreport | ElementKind::Crosstab => (200, 100),
            ElementKind::Break => (100, 5),
            ElementKind::Chart => (200, 150),
            ElementKind::Barcode => (100, 50),
        }
    }

    /// Palette identifier, e.g. `STATIC_TEXT`
    pub fn palette_id(self) -> &'static str {
        match self {
            ElementKind::StaticText => "STATIC_TEXT",
            ElementKind::TextField => "TEXT_FIELD",
            ElementKind::Rectangle => "RECTANGLE",
            ElementKind::Ellipse => "ELLIPSE",
            ElementKind::Line => "LINE",
            ElementKind::Image => "IMAGE",
            ElementKind::Frame => "FRAME",
            ElementKind::Break => "BREAK",
            ElementKind::Subreport => "SUBREPORT",
            ElementKind::Chart => "CHART",
            ElementKind::Crosstab => "CROSSTAB",
            ElementKind::Barcode => "BARCODE",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ElementKind::StaticText => "Static Text",
            ElementKind::TextField => "Text Field",
            ElementKind::Rectangle => "Rectangle",
            ElementKind::Ellipse => "Ellipse",
            ElementKind::Line => "Line",
            ElementKind::Image => "Image",
            ElementKind::Frame => "Frame",
            ElementKind::Break => "Break",
            ElementKind::Subreport => "Subreport",
            ElementKind::Chart => "Chart",
            ElementKind::Crosstab => "Crosstab",
            ElementKind::Barcode => "Barcode",
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, ElementKind::Frame)
    }

    /// Default payload for this kind
    pub fn default_content(self) -> ElementContent {
        match self {
            ElementKind::StaticText => ElementContent::StaticText {
                text: "Static Text".to_string(),
            },
            ElementKind::TextField => ElementContent::TextField {
                expression: "$F{Field}".to_string(),
            },
            ElementKind::Rectangle => ElementContent::Rectangle,
            ElementKind::Ellipse => ElementContent::Ellipse,
            ElementKind::Line => ElementContent::Line,
            ElementKind::Image => ElementContent::Image { expression: None },
            ElementKind::Frame => ElementContent::Frame {
                children: Vec::new(),
            },
            ElementKind::Break => ElementContent::Break {
                break_type: BreakType::Page,
            },
            ElementKind::Subreport => ElementContent::Subreport {
                expression: "\"repo:subreport.jrxml\"".to_string(),
            },
            ElementKind::Chart => ElementContent::Chart {
                chart_type: ChartType::Pie,
            },
            ElementKind::Crosstab => ElementContent::Crosstab,
            ElementKind::Barcode => ElementContent::Barcode {
                code: "123456789".to_string(),
            },
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ElementKind {
    type Err = ModelError;

    /// Accepts palette ids (`STATIC_TEXT`), type names (`StaticText`) and
    /// display names (`Static Text`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        ElementKind::ALL
            .into_iter()
            .find(|kind| {
                kind.display_name()
                    .chars()
                    .filter(|c| *c != ' ')
                    .flat_map(char::to_lowercase)
                    .eq(key.chars())
            })
            .ok_or_else(|| ModelError::InvalidElementKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BreakType {
    #[default]
    Page,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    Pie,
    Bar,
    Line,
}

/// Kind-specific payload of an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementContent {
    StaticText { text: String },
    TextField { expression: String },
    Rectangle,
    Ellipse,
    Line,
    Image { expression: Option<String> },
    Frame { children: Vec<Element> },
    Break { break_type: BreakType },
    Subreport { expression: String },
    Chart { chart_type: ChartType },
    Crosstab,
    Barcode { code: String },
}

impl ElementContent {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementContent::StaticText { .. } => ElementKind::StaticText,
            ElementContent::TextField { .. } => ElementKind::TextField,
            ElementContent::Rectangle => ElementKind::Rectangle,
            ElementContent::Ellipse => ElementKind::Ellipse,
            ElementContent::Line => ElementKind::Line,
            ElementContent::Image { .. } => ElementKind::Image,
            ElementContent::Frame { .. } => ElementKind::Frame,
            ElementContent::Break { .. } => ElementKind::Break,
            ElementContent::Subreport { .. } => ElementKind::Subreport,
            ElementContent::Chart { .. } => ElementKind::Chart,
            ElementContent::Crosstab => ElementKind::Crosstab,
            ElementContent::Barcode { .. } => ElementKind::Barcode,
        }
    }
}

/// A placeable layout primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub content: ElementContent,
}

impl Element {
    /// New element of the given kind with its default size and payload
    pub fn new(kind: ElementKind) -> Self {
        Self::at(kind, 0, 0)
    }

    pub fn at(kind: ElementKind, x: i32, y: i32) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id: ElementId::new(),
            x,
            y,
            width,
            height,
            content: kind.default_content(),
        }
    }

    /// A static text element; handy for building documents in code.
    pub fn static_text(text: impl Into<String>, geometry: Geometry) -> Self {
        Self::with_geometry(
            ElementContent::StaticText { text: text.into() },
            geometry,
        )
    }

    /// A frame with exactly `geometry` as bounds holding `children`.
    pub fn frame(id: ElementId, geometry: Geometry, children: Vec<Element>) -> Self {
        Self {
            id,
            ..Self::with_geometry(ElementContent::Frame { children }, geometry)
        }
    }

    pub fn with_geometry(content: ElementContent, geometry: Geometry) -> Self {
        Self {
            id: ElementId::new(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            content,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_geometry(&mut self, g: Geometry) {
        self.x = g.x;
        self.y = g.y;
        self.width = g.width;
        self.height = g.height;
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Display text of a static text element
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            ElementContent::StaticText { text } => Some(text),
            _ => None,
        }
    }

    /// Expression of a text field, image or subreport
    pub fn expression(&self) -> Option<&str> {
        match &self.content {
            ElementContent::TextField { expression }
            | ElementContent::Subreport { expression } => Some(expression),
            ElementContent::Image { expression } => expression.as_deref(),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[Element]> {
        match &self.content {
            ElementContent::Frame { children } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            ElementContent::Frame { children } => Some(children),
            _ => None,
        }
    }

    /// Visit this element and every descendant, parents first
    pub fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a Element)) {
        f(self);
        if let Some(children) = self.children() {
            for child in children {
                child.walk(f);
            }
        }
    }

    /// Ids of this element and all descendants
    pub fn subtree_ids(&self) -> Vec<ElementId> {
        let mut ids = Vec::new();
        self.walk(&mut |e| ids.push(e.id));
        ids
    }

    /// Assign fresh ids to this element and every descendant
    pub fn regenerate_ids(&mut self) {
        self.id = ElementId::new();
        if let Some(children) = self.children_mut() {
            for child in children {
                child.regenerate_ids();
            }
        }
    }
}
