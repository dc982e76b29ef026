//! Error handling for ReportForge
//!
//! Provides error types for every layer of the designer core:
//! - Model errors (tree lookups and structural edits)
//! - Gesture errors (pointer state machine misuse)
//! - Codec errors (document and clipboard serialization)
//! - Render errors (preview collaborator failures)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::types::ElementId;

/// Design tree error type
///
/// Raised when an operation names a node that is not part of the
/// current document, or would break the one-band-per-type rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No element with this id exists in the current document
    #[error("Element {id} not found")]
    ElementNotFound {
        /// The id that failed to resolve.
        id: ElementId,
    },

    /// The band type is not present in the design
    #[error("Band '{band}' not found")]
    BandNotFound {
        /// Display name of the missing band.
        band: String,
    },

    /// The band type is already present in the design
    #[error("Band '{band}' already exists")]
    BandExists {
        /// Display name of the existing band.
        band: String,
    },

    /// The band type name could not be parsed
    #[error("Unknown band type: {0}")]
    InvalidBandType(String),

    /// The element kind name could not be parsed
    #[error("Unknown element kind: {0}")]
    InvalidElementKind(String),

    /// The target cannot hold child elements
    #[error("Element {id} is not a container")]
    NotAContainer {
        /// The id of the non-frame element.
        id: ElementId,
    },

    /// A reference issued against an earlier document generation
    #[error("Stale reference to {what} from document generation {generation}")]
    StaleReference {
        /// A short description of the node.
        what: String,
        /// The generation the reference was issued in.
        generation: u64,
    },

    /// An element cannot be moved into its own subtree
    #[error("Element {id} cannot be placed inside itself")]
    CyclicPlacement {
        /// The element being moved.
        id: ElementId,
    },

    /// An element with this id is already part of the document
    #[error("Element {id} already exists")]
    DuplicateId {
        /// The clashing id.
        id: ElementId,
    },

    /// A loaded value breaks a size or range rule
    #[error("Invalid {what}: {value}")]
    InvalidValue {
        /// What the value describes.
        what: String,
        /// The offending value.
        value: String,
    },

    /// The element kind has no such property
    #[error("Element {id} has no {property} property")]
    UnsupportedProperty {
        /// The element written to.
        id: ElementId,
        /// Name of the property.
        property: String,
    },
}

/// Gesture state machine error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// A press arrived while another gesture is still live
    #[error("A gesture is already in progress")]
    GestureInProgress,

    /// Drag or release arrived with no preceding press
    #[error("No gesture in progress")]
    NoGesture,

    /// Only elements can be moved or resized
    #[error("Gesture target {0} is not an element")]
    NotAnElement(String),
}

/// Document and clipboard codec error type
#[derive(Error, Debug)]
pub enum CodecError {
    /// The source text could not be parsed
    #[error("Failed to parse document: {0}")]
    Parse(String),

    /// The design could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialize(String),

    /// The document declares a format version this build cannot read
    #[error("Unsupported document version {found} (expected {expected})")]
    UnsupportedVersion {
        /// The version found in the source.
        found: u32,
        /// The version this build writes.
        expected: u32,
    },

    /// A clipboard snippet carried no element
    #[error("Clipboard snippet contains no element")]
    EmptySnippet,

    /// Standard I/O error while reading or writing a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            CodecError::Io(std::io::Error::other(err.to_string()))
        } else if err.is_data() || err.is_syntax() || err.is_eof() {
            CodecError::Parse(err.to_string())
        } else {
            CodecError::Serialize(err.to_string())
        }
    }
}

/// Preview rendering error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The design could not be compiled
    #[error("Compilation failed: {0}")]
    Compile(String),

    /// The compiled report could not be filled
    #[error("Fill failed: {0}")]
    Fill(String),

    /// The renderer panicked on the worker thread
    #[error("Renderer panicked: {0}")]
    Panicked(String),

    /// The preview worker went away before answering
    #[error("Preview worker disconnected")]
    WorkerGone,
}

/// Main error type for ReportForge
///
/// Unified error type that can represent any error from the designer core.
#[derive(Error, Debug)]
pub enum Error {
    /// Design tree error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Gesture error
    #[error(transparent)]
    Gesture(#[from] GestureError),

    /// Codec error
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a load/save error
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Error::Codec(_))
    }

    /// Check if this is a stale reference error
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Error::Model(ModelError::StaleReference { .. }))
    }
}

/// Result type using ReportForge's Error type
pub type Result<T> = std::result::Result<T, Error>;
