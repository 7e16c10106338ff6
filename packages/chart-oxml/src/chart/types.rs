//! Value types shared by the data-label kinds.

use std::fmt;

use crate::codec::XmlValue;
use crate::config::validate_point_index;
use crate::error::OxmlError;

/// Index of a data point within its series (`xsd:unsignedInt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointIndex(u32);

impl PointIndex {
    /// Create a point index.
    #[must_use]
    pub const fn new(idx: u32) -> Self {
        Self(idx)
    }

    /// The raw index value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for PointIndex {
    fn from(idx: u32) -> Self {
        Self(idx)
    }
}

/// Signed indices come from callers computing offsets; negatives are
/// rejected with `InvalidArgument`.
impl TryFrom<i64> for PointIndex {
    type Error = OxmlError;

    fn try_from(idx: i64) -> Result<Self, Self::Error> {
        validate_point_index(idx).map(Self)
    }
}

impl fmt::Display for PointIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl XmlValue for PointIndex {
    const XSD_TYPE: &'static str = u32::XSD_TYPE;

    fn from_xml(raw: &str) -> Option<Self> {
        u32::from_xml(raw).map(Self)
    }

    fn to_xml(&self) -> Option<String> {
        self.0.to_xml()
    }
}

/// One of the six boolean show/hide flags of a data label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFlag {
    LegendKey,
    Value,
    CategoryName,
    SeriesName,
    Percent,
    BubbleSize,
}

impl ShowFlag {
    /// All flags in schema order.
    pub const ALL: [ShowFlag; 6] = [
        ShowFlag::LegendKey,
        ShowFlag::Value,
        ShowFlag::CategoryName,
        ShowFlag::SeriesName,
        ShowFlag::Percent,
        ShowFlag::BubbleSize,
    ];

    /// Qualified tag of the flag element.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            ShowFlag::LegendKey => "c:showLegendKey",
            ShowFlag::Value => "c:showVal",
            ShowFlag::CategoryName => "c:showCatName",
            ShowFlag::SeriesName => "c:showSerName",
            ShowFlag::Percent => "c:showPercent",
            ShowFlag::BubbleSize => "c:showBubbleSize",
        }
    }
}
