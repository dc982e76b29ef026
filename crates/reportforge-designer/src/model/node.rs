use reportforge_core::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::band::BandType;

/// Pointer-free reference to a node of the current design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    Design,
    Band(BandType),
    Element(ElementId),
}

impl NodeRef {
    pub fn element(&self) -> Option<ElementId> {
        match self {
            NodeRef::Element(id) => Some(*id),
            _ => None,
        }
    }

    pub fn band(&self) -> Option<BandType> {
        match self {
            NodeRef::Band(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Design => write!(f, "design"),
            NodeRef::Band(t) => write!(f, "band {}", t),
            NodeRef::Element(id) => write!(f, "element {}", id),
        }
    }
}

/// Anything that owns an ordered list of child elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerRef {
    Band(BandType),
    Frame(ElementId),
}

impl ContainerRef {
    pub fn as_node(&self) -> NodeRef {
        match self {
            ContainerRef::Band(t) => NodeRef::Band(*t),
            ContainerRef::Frame(id) => NodeRef::Element(*id),
        }
    }
}

impl From<BandType> for ContainerRef {
    fn from(t: BandType) -> Self {
        ContainerRef::Band(t)
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Band(t) => write!(f, "band {}", t),
            ContainerRef::Frame(id) => write!(f, "frame {}", id),
        }
    }
}
