//! Change notifications published by [`DesignModel`](super::DesignModel).

use reportforge_core::{BusEvent, ElementId};
use std::fmt;

use crate::model::{BandType, ContainerRef, MarginSide, NodeRef, SplitType};

/// A reactive field of a design node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    // Design
    Name,
    PageWidth,
    PageHeight,
    ColumnWidth,
    Margin(MarginSide),
    Query,
    // Band
    SplitType,
    PrintWhenExpression,
    // Band and element
    Height,
    // Element
    X,
    Y,
    Width,
    Text,
    Expression,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Name => "Name",
            Property::PageWidth => "Page Width",
            Property::PageHeight => "Page Height",
            Property::ColumnWidth => "Column Width",
            Property::Margin(MarginSide::Left) => "Left Margin",
            Property::Margin(MarginSide::Right) => "Right Margin",
            Property::Margin(MarginSide::Top) => "Top Margin",
            Property::Margin(MarginSide::Bottom) => "Bottom Margin",
            Property::Query => "Query",
            Property::SplitType => "Split Type",
            Property::PrintWhenExpression => "Print When Expression",
            Property::Height => "Height",
            Property::X => "X",
            Property::Y => "Y",
            Property::Width => "Width",
            Property::Text => "Text",
            Property::Expression => "Expression",
        };
        f.write_str(name)
    }
}

/// New value carried by a [`ModelEvent::PropertyChanged`]
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int(i32),
    Text(String),
    OptText(Option<String>),
    Split(SplitType),
}

/// Ordered-list change of a band sequence or a container's children
#[derive(Debug, Clone, PartialEq)]
pub enum ListChange<T> {
    Added { index: usize, item: T },
    Removed { index: usize, item: T },
}

impl<T> ListChange<T> {
    pub fn index(&self) -> usize {
        match self {
            ListChange::Added { index, .. } | ListChange::Removed { index, .. } => *index,
        }
    }

    pub fn item(&self) -> &T {
        match self {
            ListChange::Added { item, .. } | ListChange::Removed { item, .. } => item,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelEventCategory {
    Design,
    Band,
    Element,
    Structure,
}

/// Everything a renderer needs to stay in step with the tree
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    PropertyChanged {
        node: NodeRef,
        property: Property,
        value: PropertyValue,
    },
    BandsChanged(ListChange<BandType>),
    ChildrenChanged {
        container: ContainerRef,
        change: ListChange<ElementId>,
    },
    /// The whole document was swapped out; every earlier reference is stale.
    DesignReplaced { generation: u64 },
    /// The parent index was rebuilt from the tree.
    Resynced { generation: u64, dropped: usize },
}

impl ModelEvent {
    /// Node whose state this event describes
    pub fn node(&self) -> Option<NodeRef> {
        match self {
            ModelEvent::PropertyChanged { node, .. } => Some(*node),
            ModelEvent::BandsChanged(_) => Some(NodeRef::Design),
            ModelEvent::ChildrenChanged { container, .. } => Some(container.as_node()),
            ModelEvent::DesignReplaced { .. } | ModelEvent::Resynced { .. } => None,
        }
    }
}

impl BusEvent for ModelEvent {
    type Category = ModelEventCategory;

    fn category(&self) -> ModelEventCategory {
        match self {
            ModelEvent::PropertyChanged { node, .. } => match node {
                NodeRef::Design => ModelEventCategory::Design,
                NodeRef::Band(_) => ModelEventCategory::Band,
                NodeRef::Element(_) => ModelEventCategory::Element,
            },
            ModelEvent::BandsChanged(_)
            | ModelEvent::ChildrenChanged { .. }
            | ModelEvent::DesignReplaced { .. }
            | ModelEvent::Resynced { .. } => ModelEventCategory::Structure,
        }
    }

    fn description(&self) -> String {
        match self {
            ModelEvent::PropertyChanged {
                node,
                property,
                value,
            } => format!("{} {} = {:?}", node, property, value),
            ModelEvent::BandsChanged(ListChange::Added { index, item }) => {
                format!("band {} added at {}", item, index)
            }
            ModelEvent::BandsChanged(ListChange::Removed { index, item }) => {
                format!("band {} removed from {}", item, index)
            }
            ModelEvent::ChildrenChanged { container, change } => match change {
                ListChange::Added { index, item } => {
                    format!("{} added to {} at {}", item, container, index)
                }
                ListChange::Removed { index, item } => {
                    format!("{} removed from {} at {}", item, container, index)
                }
            },
            ModelEvent::DesignReplaced { generation } => {
                format!("design replaced (generation {})", generation)
            }
            ModelEvent::Resynced {
                generation,
                dropped,
            } => format!("resynced generation {} ({} dropped)", generation, dropped),
        }
    }
}
