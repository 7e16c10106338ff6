//! Data label position (`c:dLblPos`).

use crate::codec::XmlValue;
use crate::error::{OxmlError, Result};
use crate::xml::{NodeId, XmlPart};

/// Where a data label sits relative to its data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLabelPosition {
    /// Above the point.
    Above,
    /// Below the point.
    Below,
    /// Chosen by the renderer.
    BestFit,
    /// Centered on the point.
    Center,
    /// Inside the base of the point.
    InsideBase,
    /// Inside the end of the point.
    InsideEnd,
    /// Left of the point.
    Left,
    /// Outside the end of the point.
    OutsideEnd,
    /// Right of the point.
    Right,
    /// Labels disagree; only ever reported, never written.
    Mixed,
}

impl XmlValue for DataLabelPosition {
    const XSD_TYPE: &'static str = "ST_DLblPos";

    fn from_xml(raw: &str) -> Option<Self> {
        let position = match raw {
            "t" => Self::Above,
            "b" => Self::Below,
            "bestFit" => Self::BestFit,
            "ctr" => Self::Center,
            "inBase" => Self::InsideBase,
            "inEnd" => Self::InsideEnd,
            "l" => Self::Left,
            "outEnd" => Self::OutsideEnd,
            "r" => Self::Right,
            _ => return None,
        };
        Some(position)
    }

    fn to_xml(&self) -> Option<String> {
        let raw = match self {
            Self::Above => "t",
            Self::Below => "b",
            Self::BestFit => "bestFit",
            Self::Center => "ctr",
            Self::InsideBase => "inBase",
            Self::InsideEnd => "inEnd",
            Self::Left => "l",
            Self::OutsideEnd => "outEnd",
            Self::Right => "r",
            Self::Mixed => return None,
        };
        Some(raw.to_string())
    }
}

/// View over a `<c:dLblPos>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLabelPositionElement {
    id: NodeId,
}

impl DataLabelPositionElement {
    /// Qualified tag of this kind.
    pub const TAG: &'static str = "c:dLblPos";

    /// Wrap an existing `<c:dLblPos>` node.
    pub fn from_node(part: &XmlPart, id: NodeId) -> Result<Self> {
        if !part.has_tag(id, Self::TAG) {
            return Err(OxmlError::schema(part.tag(id), format!("expected <{}>", Self::TAG)));
        }
        Ok(Self { id })
    }

    /// The wrapped node.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.id
    }

    /// The required `val` attribute.
    ///
    /// # Errors
    /// * `SchemaViolation` if `val` is missing
    /// * `InvalidValue` if `val` is not a known position
    pub fn val(&self, part: &XmlPart) -> Result<DataLabelPosition> {
        part.get_value(self.id, "val")?
            .ok_or_else(|| OxmlError::schema(Self::TAG, "missing required attribute 'val'"))
    }

    /// Set the `val` attribute.
    ///
    /// # Errors
    /// `InvalidValue` for [`DataLabelPosition::Mixed`].
    pub fn set_val(&self, part: &mut XmlPart, position: DataLabelPosition) -> Result<()> {
        part.set_value(self.id, "val", &position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_codec() {
        assert_eq!(
            DataLabelPosition::from_xml("outEnd"),
            Some(DataLabelPosition::OutsideEnd)
        );
        assert_eq!(DataLabelPosition::from_xml("sideways"), None);
        assert_eq!(DataLabelPosition::Center.to_xml().as_deref(), Some("ctr"));
        assert_eq!(DataLabelPosition::Mixed.to_xml(), None);
    }

    #[test]
    fn test_element_val() {
        let mut part = XmlPart::new(DataLabelPositionElement::TAG);
        let pos = DataLabelPositionElement::from_node(&part, part.root()).unwrap();

        let err = pos.val(&part).unwrap_err();
        assert!(matches!(err, OxmlError::SchemaViolation { .. }));

        pos.set_val(&mut part, DataLabelPosition::InsideEnd).unwrap();
        assert_eq!(part.attribute(pos.node(), "val"), Some("inEnd"));
        assert_eq!(pos.val(&part).unwrap(), DataLabelPosition::InsideEnd);
    }

    #[test]
    fn test_element_rejects_mixed() {
        let mut part = XmlPart::new(DataLabelPositionElement::TAG);
        let pos = DataLabelPositionElement::from_node(&part, part.root()).unwrap();
        pos.set_val(&mut part, DataLabelPosition::Left).unwrap();

        let err = pos.set_val(&mut part, DataLabelPosition::Mixed).unwrap_err();
        assert!(matches!(err, OxmlError::InvalidValue { .. }));
        assert_eq!(pos.val(&part).unwrap(), DataLabelPosition::Left);
    }

    #[test]
    fn test_element_invalid_raw_value() {
        let mut part = XmlPart::new(DataLabelPositionElement::TAG);
        let root = part.root();
        part.set_attribute(root, "val", "middle");
        let pos = DataLabelPositionElement::from_node(&part, root).unwrap();

        assert!(matches!(
            pos.val(&part).unwrap_err(),
            OxmlError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_from_node_wrong_tag() {
        let part = XmlPart::new("c:dLbl");
        assert!(DataLabelPositionElement::from_node(&part, part.root()).is_err());
    }
}
