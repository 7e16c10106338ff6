//! Data-label settings of a series (`c:dLbls`).

use super::datalabel::DataLabel;
use super::position::{DataLabelPosition, DataLabelPositionElement};
use super::types::{PointIndex, ShowFlag};
use crate::error::{OxmlError, Result};
use crate::schema::schema;
use crate::xml::{NodeId, Position, XmlPart};

/// View over a `<c:dLbls>` element.
///
/// Holds the series-wide label settings plus zero or more `<c:dLbl>`
/// overrides, kept in ascending point-index order with at most one label per
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLabels {
    id: NodeId,
}

impl DataLabels {
    /// Qualified tag of this kind.
    pub const TAG: &'static str = "c:dLbls";

    /// Wrap an existing `<c:dLbls>` node.
    ///
    /// # Errors
    /// `SchemaViolation` if the node has another tag.
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

    /// Build a detached default `<c:dLbls>` that shows values only:
    ///
    /// ```xml
    /// <c:dLbls>
    ///   <c:showLegendKey val="0"/>
    ///   <c:showVal val="1"/>
    ///   <c:showCatName val="0"/>
    ///   <c:showSerName val="0"/>
    ///   <c:showPercent val="0"/>
    ///   <c:showBubbleSize val="0"/>
    /// </c:dLbls>
    /// ```
    pub fn new_default(part: &mut XmlPart) -> Result<Self> {
        let id = Self::build_default(part)?;
        Ok(Self { id })
    }

    pub(crate) fn build_default(part: &mut XmlPart) -> Result<NodeId> {
        let dlbls = part.create_element(Self::TAG);
        for flag in ShowFlag::ALL {
            let element = part.create_element(flag.tag());
            part.set_value(element, "val", &(flag == ShowFlag::Value))?;
            part.append(dlbls, element)?;
        }
        Ok(dlbls)
    }

    /// Every `<c:dLbl>` child in document order.
    pub fn data_labels(&self, part: &XmlPart) -> Result<Vec<DataLabel>> {
        schema()
            .repeated(Self::TAG, DataLabel::TAG)?
            .list(part, self.id)?
            .into_iter()
            .map(|id| DataLabel::from_node(part, id))
            .collect()
    }

    /// The label overriding point `idx`, if any.
    pub fn get_for_point(&self, part: &XmlPart, idx: PointIndex) -> Result<Option<DataLabel>> {
        for dlbl in self.data_labels(part)? {
            if dlbl.idx(part)? == idx {
                return Ok(Some(dlbl));
            }
        }
        Ok(None)
    }

    /// Return the label for point `idx`, creating it if needed.
    ///
    /// A new label is placed before the first label with a greater index,
    /// after the last label when every index is smaller, and at the
    /// `<c:dLbl>` slot of the sequence when there are no labels yet. The
    /// ascending order of existing labels is assumed, not repaired.
    ///
    /// # Errors
    /// * `SchemaViolation` if an existing label lacks a readable `c:idx`
    /// * `InvalidValue` if an existing `c:idx/@val` is not an unsigned integer
    pub fn get_or_add_for_point(&self, part: &mut XmlPart, idx: PointIndex) -> Result<DataLabel> {
        // Read every index up front so a malformed label fails before any
        // mutation
        let mut existing = Vec::new();
        for dlbl in self.data_labels(part)? {
            existing.push((dlbl, dlbl.idx(part)?));
        }

        if let Some((dlbl, _)) = existing.iter().find(|(_, i)| *i == idx) {
            tracing::trace!(idx = %idx, "found data label");
            return Ok(*dlbl);
        }

        let dlbl = DataLabel::new_default(part)?;
        dlbl.set_idx(part, idx)?;

        let next = existing.iter().find(|(_, i)| *i > idx).map(|(d, _)| d.node());
        match (next, existing.last()) {
            (Some(next), _) => {
                part.insert(self.id, Position::Before(next), dlbl.node())?;
            }
            (None, Some((last, _))) => {
                part.insert(self.id, Position::After(last.node()), dlbl.node())?;
            }
            (None, None) => {
                schema()
                    .repeated(Self::TAG, DataLabel::TAG)?
                    .insert_in_sequence(part, self.id, dlbl.node())?;
            }
        }

        tracing::debug!(idx = %idx, count = existing.len() + 1, "added data label");
        Ok(dlbl)
    }

    /// The `<c:numFmt>` child, if any.
    pub fn number_format(&self, part: &XmlPart) -> Result<Option<NodeId>> {
        schema().optional(Self::TAG, "c:numFmt")?.get(part, self.id)
    }

    /// The `<c:numFmt>` child, created empty in sequence if absent.
    pub fn get_or_add_number_format(&self, part: &mut XmlPart) -> Result<NodeId> {
        schema().optional(Self::TAG, "c:numFmt")?.get_or_create(part, self.id)
    }

    /// Remove `<c:numFmt>` if present.
    pub fn remove_number_format(&self, part: &mut XmlPart) -> Result<()> {
        schema().optional(Self::TAG, "c:numFmt")?.remove_if_present(part, self.id)?;
        Ok(())
    }

    /// The `<c:txPr>` child, if any.
    pub fn text_properties(&self, part: &XmlPart) -> Result<Option<NodeId>> {
        schema().optional(Self::TAG, "c:txPr")?.get(part, self.id)
    }

    /// The `<c:txPr>` child, created with its default text body if absent.
    pub fn get_or_add_text_properties(&self, part: &mut XmlPart) -> Result<NodeId> {
        schema().optional(Self::TAG, "c:txPr")?.get_or_create(part, self.id)
    }

    /// Remove `<c:txPr>` if present.
    pub fn remove_text_properties(&self, part: &mut XmlPart) -> Result<()> {
        schema().optional(Self::TAG, "c:txPr")?.remove_if_present(part, self.id)?;
        Ok(())
    }

    /// The `<c:dLblPos>` child, if any.
    pub fn position_element(&self, part: &XmlPart) -> Result<Option<DataLabelPositionElement>> {
        schema()
            .optional(Self::TAG, DataLabelPositionElement::TAG)?
            .get(part, self.id)?
            .map(|id| DataLabelPositionElement::from_node(part, id))
            .transpose()
    }

    /// The `<c:dLblPos>` child, created with `val` set to `default` if absent.
    ///
    /// An existing element keeps its value.
    pub fn get_or_add_position_element(
        &self,
        part: &mut XmlPart,
        default: DataLabelPosition,
    ) -> Result<DataLabelPositionElement> {
        if let Some(existing) = self.position_element(part)? {
            return Ok(existing);
        }
        self.set_position(part, Some(default))?;
        self.position_element(part)?.ok_or_else(|| OxmlError::NotFound {
            parent: Self::TAG.to_string(),
            child: DataLabelPositionElement::TAG.to_string(),
        })
    }

    /// Remove `<c:dLblPos>` if present.
    pub fn remove_position_element(&self, part: &mut XmlPart) -> Result<()> {
        self.set_position(part, None)
    }

    /// The series-wide label position, if set.
    pub fn position(&self, part: &XmlPart) -> Result<Option<DataLabelPosition>> {
        super::position(part, self.id)
    }

    /// Set the series-wide label position, or remove it with `None`.
    pub fn set_position(
        &self,
        part: &mut XmlPart,
        position: Option<DataLabelPosition>,
    ) -> Result<()> {
        super::set_position(part, self.id, position)
    }

    /// A series-wide show/hide flag; `None` when not set.
    pub fn show_flag(&self, part: &XmlPart, flag: ShowFlag) -> Result<Option<bool>> {
        super::show_flag(part, self.id, flag)
    }

    /// Set a series-wide show/hide flag.
    pub fn set_show_flag(&self, part: &mut XmlPart, flag: ShowFlag, value: bool) -> Result<()> {
        super::set_show_flag(part, self.id, flag, value)
    }

    /// The `<a:defRPr>` under `<c:txPr>`, creating every missing ancestor.
    pub fn def_run_properties(&self, part: &mut XmlPart) -> Result<NodeId> {
        super::def_run_properties(part, self.id)
    }
}
