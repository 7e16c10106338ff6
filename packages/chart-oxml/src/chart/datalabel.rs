//! Data label for one point (`c:dLbl`).

use super::position::{DataLabelPosition, DataLabelPositionElement};
use super::types::{PointIndex, ShowFlag};
use crate::error::{OxmlError, Result};
use crate::schema::schema;
use crate::xml::{NodeId, XmlPart};

/// View over a `<c:dLbl>` element: formatting and visibility overrides for
/// the data point identified by its `c:idx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLabel {
    id: NodeId,
}

impl DataLabel {
    /// Qualified tag of this kind.
    pub const TAG: &'static str = "c:dLbl";

    /// Wrap an existing `<c:dLbl>` node.
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

    /// Build a detached default `<c:dLbl>`:
    ///
    /// ```xml
    /// <c:dLbl>
    ///   <c:idx val="0"/>
    ///   <c:showLegendKey val="0"/>
    /// </c:dLbl>
    /// ```
    pub fn new_default(part: &mut XmlPart) -> Result<Self> {
        let id = Self::build_default(part)?;
        Ok(Self { id })
    }

    pub(crate) fn build_default(part: &mut XmlPart) -> Result<NodeId> {
        let dlbl = part.create_element(Self::TAG);
        let idx = part.create_element("c:idx");
        part.set_value(idx, "val", &PointIndex::new(0))?;
        let show_legend_key = part.create_element(ShowFlag::LegendKey.tag());
        part.set_value(show_legend_key, "val", &false)?;

        part.append(dlbl, idx)?;
        part.append(dlbl, show_legend_key)?;
        Ok(dlbl)
    }

    fn idx_element(&self, part: &XmlPart) -> Result<NodeId> {
        schema().required(Self::TAG, "c:idx")?.get(part, self.id)
    }

    /// The point index from the required `c:idx/@val`.
    ///
    /// # Errors
    /// * `SchemaViolation` if `c:idx` or its `val` is missing
    /// * `InvalidValue` if `val` is not an unsigned integer
    pub fn idx(&self, part: &XmlPart) -> Result<PointIndex> {
        let idx = self.idx_element(part)?;
        part.get_value(idx, "val")?
            .ok_or_else(|| OxmlError::schema("c:idx", "missing required attribute 'val'"))
    }

    /// Set the point index.
    ///
    /// Callers keeping labels inside a [`DataLabels`](super::DataLabels)
    /// must not break its ascending order; use
    /// [`DataLabels::get_or_add_for_point`](super::DataLabels::get_or_add_for_point)
    /// to create labels instead.
    pub fn set_idx(&self, part: &mut XmlPart, idx: PointIndex) -> Result<()> {
        let element = self.idx_element(part)?;
        part.set_value(element, "val", &idx)
    }

    /// The `<c:tx>` child, if any.
    pub fn tx(&self, part: &XmlPart) -> Result<Option<NodeId>> {
        schema().optional(Self::TAG, "c:tx")?.get(part, self.id)
    }

    /// The `<c:tx><c:rich>` text body, if any.
    pub fn rich(&self, part: &XmlPart) -> Result<Option<NodeId>> {
        match self.tx(part)? {
            Some(tx) => schema().optional("c:tx", "c:rich")?.get(part, tx),
            None => Ok(None),
        }
    }

    /// Check if the label text is overridden with rich text.
    pub fn has_rich_text(&self, part: &XmlPart) -> Result<bool> {
        Ok(self.rich(part)?.is_some())
    }

    /// Return the `<c:tx>` child holding a `<c:rich>`, creating both if needed.
    ///
    /// A `<c:strRef>` alternative in the same slot is removed first, so the
    /// result always has exactly one `<c:rich>` and no `<c:strRef>`.
    pub fn get_or_add_tx_rich(&self, part: &mut XmlPart) -> Result<NodeId> {
        let registry = schema();
        let tx = registry.optional(Self::TAG, "c:tx")?.get_or_create(part, self.id)?;
        if registry.optional("c:tx", "c:strRef")?.remove_if_present(part, tx)? {
            tracing::debug!("replaced string reference with rich text");
        }
        registry.optional("c:tx", "c:rich")?.get_or_create(part, tx)?;
        Ok(tx)
    }

    /// Remove the `<c:tx>` child if it holds rich text; otherwise do nothing.
    pub fn remove_tx_rich(&self, part: &mut XmlPart) -> Result<()> {
        if let (Some(tx), Some(_)) = (self.tx(part)?, self.rich(part)?) {
            part.remove(self.id, tx)?;
        }
        Ok(())
    }

    /// The label position, if overridden.
    pub fn position(&self, part: &XmlPart) -> Result<Option<DataLabelPosition>> {
        super::position(part, self.id)
    }

    /// Override the label position, or clear the override with `None`.
    pub fn set_position(
        &self,
        part: &mut XmlPart,
        position: Option<DataLabelPosition>,
    ) -> Result<()> {
        super::set_position(part, self.id, position)
    }

    /// Drop the position override if present.
    pub fn remove_position(&self, part: &mut XmlPart) -> Result<()> {
        self.set_position(part, None)
    }

    /// The `<c:dLblPos>` child, created with `val` set if absent.
    pub fn get_or_add_position_element(
        &self,
        part: &mut XmlPart,
        default: DataLabelPosition,
    ) -> Result<DataLabelPositionElement> {
        if self.position(part)?.is_none() {
            self.set_position(part, Some(default))?;
        }
        let id = schema()
            .optional(Self::TAG, DataLabelPositionElement::TAG)?
            .get_or_create(part, self.id)?;
        DataLabelPositionElement::from_node(part, id)
    }

    /// A show/hide flag; `None` when the label inherits it.
    pub fn show_flag(&self, part: &XmlPart, flag: ShowFlag) -> Result<Option<bool>> {
        super::show_flag(part, self.id, flag)
    }

    /// Set a show/hide flag, creating its element in sequence if needed.
    pub fn set_show_flag(&self, part: &mut XmlPart, flag: ShowFlag, value: bool) -> Result<()> {
        super::set_show_flag(part, self.id, flag, value)
    }

    /// The `<a:defRPr>` under `<c:txPr>`, creating every missing ancestor.
    pub fn def_run_properties(&self, part: &mut XmlPart) -> Result<NodeId> {
        super::def_run_properties(part, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHART_NS;
    use pretty_assertions::assert_eq;

    fn parse_dlbl(inner: &str) -> (XmlPart, DataLabel) {
        let xml = format!(r#"<c:dLbl xmlns:c="{CHART_NS}">{inner}</c:dLbl>"#);
        let part = XmlPart::parse(&xml).unwrap();
        let dlbl = DataLabel::from_node(&part, part.root()).unwrap();
        (part, dlbl)
    }

    #[test]
    fn test_new_default() {
        let mut part = XmlPart::new("c:dLbls");
        let dlbl = DataLabel::new_default(&mut part).unwrap();

        assert_eq!(part.child_tags(dlbl.node()), vec!["c:idx", "c:showLegendKey"]);
        assert_eq!(dlbl.idx(&part).unwrap(), PointIndex::new(0));
        assert_eq!(dlbl.show_flag(&part, ShowFlag::LegendKey).unwrap(), Some(false));
        assert_eq!(part.parent(dlbl.node()), None);
    }

    #[test]
    fn test_idx() {
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="42"/>"#);
        assert_eq!(dlbl.idx(&part).unwrap(), PointIndex::new(42));

        dlbl.set_idx(&mut part, PointIndex::new(7)).unwrap();
        assert_eq!(dlbl.idx(&part).unwrap().value(), 7);
    }

    #[test]
    fn test_idx_missing_is_schema_violation() {
        let (part, dlbl) = parse_dlbl(r#"<c:showVal val="1"/>"#);
        assert!(matches!(
            dlbl.idx(&part).unwrap_err(),
            OxmlError::SchemaViolation { .. }
        ));

        let (part, dlbl) = parse_dlbl("<c:idx/>");
        assert!(matches!(
            dlbl.idx(&part).unwrap_err(),
            OxmlError::SchemaViolation { .. }
        ));
    }

    #[test]
    fn test_get_or_add_tx_rich_inserts_in_sequence() {
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="1"/><c:showVal val="1"/>"#);

        let tx = dlbl.get_or_add_tx_rich(&mut part).unwrap();

        assert_eq!(part.child_tags(dlbl.node()), vec!["c:idx", "c:tx", "c:showVal"]);
        assert_eq!(part.child_tags(tx), vec!["c:rich"]);
        let rich = part.first_child(tx, "c:rich").unwrap();
        assert_eq!(part.child_tags(rich), vec!["a:bodyPr", "a:lstStyle", "a:p"]);
    }

    #[test]
    fn test_get_or_add_tx_rich_replaces_str_ref() {
        let (mut part, dlbl) = parse_dlbl(
            r#"<c:idx val="1"/><c:tx><c:strRef><c:f>Sheet1!$A$1</c:f></c:strRef></c:tx>"#,
        );

        let tx = dlbl.get_or_add_tx_rich(&mut part).unwrap();

        assert_eq!(part.child_tags(tx), vec!["c:rich"]);
        assert!(dlbl.has_rich_text(&part).unwrap());
    }

    #[test]
    fn test_get_or_add_tx_rich_is_idempotent() {
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="1"/>"#);

        let first = dlbl.get_or_add_tx_rich(&mut part).unwrap();
        let rich = dlbl.rich(&part).unwrap();
        let second = dlbl.get_or_add_tx_rich(&mut part).unwrap();

        assert_eq!(first, second);
        assert_eq!(dlbl.rich(&part).unwrap(), rich);
        assert_eq!(part.children_by_tag(dlbl.node(), "c:tx").len(), 1);
    }

    #[test]
    fn test_remove_tx_rich() {
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="1"/><c:tx><c:rich/></c:tx>"#);
        dlbl.remove_tx_rich(&mut part).unwrap();
        assert_eq!(part.child_tags(dlbl.node()), vec!["c:idx"]);
    }

    #[test]
    fn test_remove_tx_rich_keeps_str_ref() {
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="1"/><c:tx><c:strRef/></c:tx>"#);
        dlbl.remove_tx_rich(&mut part).unwrap();
        assert_eq!(part.child_tags(dlbl.node()), vec!["c:idx", "c:tx"]);

        // Absent tx is a no-op as well
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="1"/>"#);
        dlbl.remove_tx_rich(&mut part).unwrap();
        assert_eq!(part.child_tags(dlbl.node()), vec!["c:idx"]);
    }

    #[test]
    fn test_position_round_trip() {
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="1"/><c:showVal val="1"/>"#);
        assert_eq!(dlbl.position(&part).unwrap(), None);

        dlbl.set_position(&mut part, Some(DataLabelPosition::Above)).unwrap();
        assert_eq!(
            part.child_tags(dlbl.node()),
            vec!["c:idx", "c:dLblPos", "c:showVal"]
        );
        assert_eq!(dlbl.position(&part).unwrap(), Some(DataLabelPosition::Above));

        dlbl.remove_position(&mut part).unwrap();
        assert_eq!(part.child_tags(dlbl.node()), vec!["c:idx", "c:showVal"]);
        dlbl.set_position(&mut part, None).unwrap();
    }

    #[test]
    fn test_set_position_mixed_leaves_tree_untouched() {
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="1"/>"#);
        let err = dlbl
            .set_position(&mut part, Some(DataLabelPosition::Mixed))
            .unwrap_err();

        assert!(matches!(err, OxmlError::InvalidValue { .. }));
        assert_eq!(part.child_tags(dlbl.node()), vec!["c:idx"]);
    }

    #[test]
    fn test_get_or_add_position_element() {
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="1"/>"#);
        let pos = dlbl
            .get_or_add_position_element(&mut part, DataLabelPosition::BestFit)
            .unwrap();
        assert_eq!(pos.val(&part).unwrap(), DataLabelPosition::BestFit);

        let again = dlbl
            .get_or_add_position_element(&mut part, DataLabelPosition::Left)
            .unwrap();
        assert_eq!(again, pos);
        assert_eq!(again.val(&part).unwrap(), DataLabelPosition::BestFit);
    }

    #[test]
    fn test_show_flags() {
        let (mut part, dlbl) =
            parse_dlbl(r#"<c:idx val="1"/><c:showVal/><c:separator>, </c:separator>"#);

        assert_eq!(dlbl.show_flag(&part, ShowFlag::Value).unwrap(), Some(true));
        assert_eq!(dlbl.show_flag(&part, ShowFlag::Percent).unwrap(), None);

        dlbl.set_show_flag(&mut part, ShowFlag::Percent, false).unwrap();
        dlbl.set_show_flag(&mut part, ShowFlag::LegendKey, true).unwrap();

        assert_eq!(
            part.child_tags(dlbl.node()),
            vec!["c:idx", "c:showLegendKey", "c:showVal", "c:showPercent", "c:separator"]
        );
        assert_eq!(dlbl.show_flag(&part, ShowFlag::Percent).unwrap(), Some(false));
    }

    #[test]
    fn test_def_run_properties() {
        let (mut part, dlbl) = parse_dlbl(r#"<c:idx val="1"/><c:showVal val="1"/>"#);
        let def_rpr = dlbl.def_run_properties(&mut part).unwrap();

        assert_eq!(part.tag(def_rpr), "a:defRPr");
        assert_eq!(part.child_tags(dlbl.node()), vec!["c:idx", "c:txPr", "c:showVal"]);
    }

    #[test]
    fn test_from_node_wrong_tag() {
        let part = XmlPart::new("c:dLbls");
        assert!(DataLabel::from_node(&part, part.root()).is_err());
    }
}
