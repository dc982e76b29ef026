use reportforge_core::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::element::Element;

/// Band type; declaration order is document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BandType {
    Title,
    PageHeader,
    ColumnHeader,
    Detail,
    ColumnFooter,
    PageFooter,
    LastPageFooter,
    Summary,
    NoData,
    Background,
}

impl BandType {
    pub const ALL: [BandType; 10] = [
        BandType::Title,
        BandType::PageHeader,
        BandType::ColumnHeader,
        BandType::Detail,
        BandType::ColumnFooter,
        BandType::PageFooter,
        BandType::LastPageFooter,
        BandType::Summary,
        BandType::NoData,
        BandType::Background,
    ];

    /// Bands every new design starts with
    pub const MANDATORY: [BandType; 7] = [
        BandType::Title,
        BandType::PageHeader,
        BandType::ColumnHeader,
        BandType::Detail,
        BandType::ColumnFooter,
        BandType::PageFooter,
        BandType::Summary,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            BandType::Title => "Title",
            BandType::PageHeader => "Page Header",
            BandType::ColumnHeader => "Column Header",
            BandType::Detail => "Detail",
            BandType::ColumnFooter => "Column Footer",
            BandType::PageFooter => "Page Footer",
            BandType::LastPageFooter => "Last Page Footer",
            BandType::Summary => "Summary",
            BandType::NoData => "No Data",
            BandType::Background => "Background",
        }
    }

    pub fn is_mandatory(self) -> bool {
        Self::MANDATORY.contains(&self)
    }
}

impl fmt::Display for BandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for BandType {
    type Err = ModelError;

    /// Accepts `PageHeader`, `Page Header`, `PAGE_HEADER` and friends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        BandType::ALL
            .into_iter()
            .find(|t| {
                t.display_name()
                    .chars()
                    .filter(|c| *c != ' ')
                    .flat_map(char::to_lowercase)
                    .eq(key.chars())
            })
            .ok_or_else(|| ModelError::InvalidBandType(s.to_string()))
    }
}

/// Page-break policy of a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitType {
    #[default]
    Stretch,
    Prevent,
    Immediate,
}

/// A horizontal layout region of a design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub band_type: BandType,
    pub height: i32,
    #[serde(default)]
    pub split_type: SplitType,
    /// `None` when the band always prints
    #[serde(default)]
    pub print_when_expression: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Band {
    pub fn new(band_type: BandType, height: i32) -> Self {
        Self {
            band_type,
            height: height.max(0),
            split_type: SplitType::default(),
            print_when_expression: None,
            elements: Vec::new(),
        }
    }
}

/// Blank or whitespace-only expression text means "no expression"
pub fn normalize_expression(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
