//! Chart data-label element kinds.
//!
//! - [`DataLabels`]: `<c:dLbls>`, shared label settings of a series plus
//!   per-point overrides kept in ascending point order
//! - [`DataLabel`]: `<c:dLbl>`, the override for one point
//! - [`DataLabelPositionElement`]: `<c:dLblPos>`

mod datalabel;
mod datalabels;
mod position;
mod types;

pub use datalabel::DataLabel;
pub use datalabels::DataLabels;
pub use position::{DataLabelPosition, DataLabelPositionElement};
pub use types::{PointIndex, ShowFlag};

use crate::codec;
use crate::error::Result;
use crate::schema::schema;
use crate::text;
use crate::xml::{NodeId, XmlPart};

// Accessors shared by <c:dLbl> and <c:dLbls>, which bind the same optional
// children.

fn show_flag(part: &XmlPart, owner: NodeId, flag: ShowFlag) -> Result<Option<bool>> {
    let Some(element) = schema().optional(part.tag(owner), flag.tag())?.get(part, owner)? else {
        return Ok(None);
    };
    // CT_Boolean defaults to true when `val` is omitted
    Ok(Some(part.get_value(element, "val")?.unwrap_or(true)))
}

fn set_show_flag(part: &mut XmlPart, owner: NodeId, flag: ShowFlag, value: bool) -> Result<()> {
    let owner_tag = part.tag(owner).to_string();
    let element = schema()
        .optional(&owner_tag, flag.tag())?
        .get_or_create(part, owner)?;
    part.set_value(element, "val", &value)
}

fn position(part: &XmlPart, owner: NodeId) -> Result<Option<DataLabelPosition>> {
    schema()
        .optional(part.tag(owner), DataLabelPositionElement::TAG)?
        .get(part, owner)?
        .map(|id| DataLabelPositionElement::from_node(part, id)?.val(part))
        .transpose()
}

fn set_position(
    part: &mut XmlPart,
    owner: NodeId,
    position: Option<DataLabelPosition>,
) -> Result<()> {
    let owner_tag = part.tag(owner).to_string();
    let slot = schema().optional(&owner_tag, DataLabelPositionElement::TAG)?;
    let Some(position) = position else {
        slot.remove_if_present(part, owner)?;
        return Ok(());
    };

    // Reject values without XML form before touching the tree
    let raw = codec::encode("val", &position)?;
    let element = slot.get_or_create(part, owner)?;
    part.set_attribute(element, "val", raw);
    Ok(())
}

fn def_run_properties(part: &mut XmlPart, owner: NodeId) -> Result<NodeId> {
    let owner_tag = part.tag(owner).to_string();
    let tx_pr = schema().optional(&owner_tag, "c:txPr")?.get_or_create(part, owner)?;
    text::def_run_properties(part, tx_pr)
}
