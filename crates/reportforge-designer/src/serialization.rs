//! Serialization of designs and clipboard snippets.
//!
//! [`DesignCodec`] is the boundary the designer loads and saves through.
//! [`JsonDesignCodec`] is the bundled implementation: a versioned JSON
//! envelope around the serde form of the model types.

use chrono::{DateTime, Utc};
use reportforge_core::CodecError;
use serde::{Deserialize, Serialize};

use crate::model::{Design, Element};

/// Design file format version
pub const DESIGN_FORMAT_VERSION: u32 = 1;

const GENERATOR: &str = concat!("reportforge-designer ", env!("CARGO_PKG_VERSION"));

/// Loads and saves designs and single elements
pub trait DesignCodec {
    fn load(&self, source: &str) -> Result<Design, CodecError>;

    fn save(&self, design: &Design) -> Result<String, CodecError>;

    /// Self-contained text form of one element and its subtree
    fn serialize_element(&self, element: &Element) -> Result<String, CodecError>;

    fn deserialize_element(&self, snippet: &str) -> Result<Element, CodecError>;
}

/// Complete design file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignFile {
    pub version: u32,
    pub metadata: DesignMetadata,
    pub design: Design,
}

/// Design metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub generator: String,
}

impl DesignFile {
    pub fn new(design: Design) -> Self {
        let now = Utc::now();
        Self {
            version: DESIGN_FORMAT_VERSION,
            metadata: DesignMetadata {
                name: design.name.clone(),
                created: now,
                modified: now,
                generator: GENERATOR.to_string(),
            },
            design,
        }
    }
}

/// Clipboard payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSnippet {
    pub version: u32,
    #[serde(default)]
    pub element: Option<Element>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

fn check_version(source: &str) -> Result<(), CodecError> {
    let probe: VersionProbe = serde_json::from_str(source)?;
    if probe.version != DESIGN_FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: probe.version,
            expected: DESIGN_FORMAT_VERSION,
        });
    }
    Ok(())
}

/// JSON implementation of [`DesignCodec`]
#[derive(Debug, Clone)]
pub struct JsonDesignCodec {
    pretty: bool,
}

impl JsonDesignCodec {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Single-line output, used for clipboard snippets and tests
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    fn to_string<T: Serialize>(&self, value: &T) -> Result<String, CodecError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        text.map_err(|e| CodecError::Serialize(e.to_string()))
    }
}

impl Default for JsonDesignCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignCodec for JsonDesignCodec {
    fn load(&self, source: &str) -> Result<Design, CodecError> {
        check_version(source)?;
        let file: DesignFile = serde_json::from_str(source)?;
        file.design
            .validate()
            .map_err(|e| CodecError::Parse(e.to_string()))?;
        let mut design = file.design;
        design.sort_bands();
        tracing::debug!(
            "Parsed design '{}' written by '{}'",
            design.name,
            file.metadata.generator
        );
        Ok(design)
    }

    fn save(&self, design: &Design) -> Result<String, CodecError> {
        self.to_string(&DesignFile::new(design.clone()))
    }

    fn serialize_element(&self, element: &Element) -> Result<String, CodecError> {
        serde_json::to_string(&ElementSnippet {
            version: DESIGN_FORMAT_VERSION,
            element: Some(element.clone()),
        })
        .map_err(|e| CodecError::Serialize(e.to_string()))
    }

    fn deserialize_element(&self, snippet: &str) -> Result<Element, CodecError> {
        if snippet.trim().is_empty() {
            return Err(CodecError::EmptySnippet);
        }
        check_version(snippet)?;
        let snippet: ElementSnippet = serde_json::from_str(snippet)?;
        snippet.element.ok_or(CodecError::EmptySnippet)
    }
}
