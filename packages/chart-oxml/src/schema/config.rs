//! Schema configuration for chart data labels.

use super::registry::SchemaRegistry;
use super::types::ElementSpec;
use crate::chart::{DataLabel, DataLabels};
use crate::error::Result;
use crate::text;

/// Child sequence of `<c:dLbl>`.
pub const DLBL_SEQUENCE: &[&str] = &[
    "c:idx",
    "c:layout",
    "c:tx",
    "c:numFmt",
    "c:spPr",
    "c:txPr",
    "c:dLblPos",
    "c:showLegendKey",
    "c:showVal",
    "c:showCatName",
    "c:showSerName",
    "c:showPercent",
    "c:showBubbleSize",
    "c:separator",
    "c:extLst",
];

/// Child sequence of `<c:dLbls>`.
pub const DLBLS_SEQUENCE: &[&str] = &[
    "c:dLbl",
    "c:numFmt",
    "c:spPr",
    "c:txPr",
    "c:dLblPos",
    "c:showLegendKey",
    "c:showVal",
    "c:showCatName",
    "c:showSerName",
    "c:showPercent",
    "c:showBubbleSize",
    "c:separator",
    "c:showLeaderLines",
    "c:leaderLines",
    "c:extLst",
];

/// Child sequence of `<c:tx>`; the two children are alternatives.
pub const TX_SEQUENCE: &[&str] = &["c:strRef", "c:rich"];

/// Child sequence of `<c:rich>` and `<c:txPr>`.
pub const TEXT_BODY_SEQUENCE: &[&str] = &["a:bodyPr", "a:lstStyle", "a:p"];

/// Child sequence of `<a:p>`.
pub const PARAGRAPH_SEQUENCE: &[&str] = &["a:pPr", "a:r", "a:br", "a:fld", "a:endParaRPr"];

/// Child sequence of `<a:pPr>`.
pub const PARAGRAPH_PROPERTIES_SEQUENCE: &[&str] = &[
    "a:lnSpc",
    "a:spcBef",
    "a:spcAft",
    "a:buClrTx",
    "a:buClr",
    "a:buSzTx",
    "a:buSzPct",
    "a:buSzPts",
    "a:buFontTx",
    "a:buFont",
    "a:buNone",
    "a:buAutoNum",
    "a:buChar",
    "a:buBlip",
    "a:tabLst",
    "a:defRPr",
    "a:extLst",
];

/// The six boolean show/hide flags shared by `<c:dLbl>` and `<c:dLbls>`.
pub const SHOW_FLAGS: [&str; 6] = [
    "c:showLegendKey",
    "c:showVal",
    "c:showCatName",
    "c:showSerName",
    "c:showPercent",
    "c:showBubbleSize",
];

/// Create the schema registry for chart data labels.
///
/// ```text
/// c:dLbls
/// ├── c:dLbl*            (ascending c:idx/@val)
/// │   ├── c:idx          (required)
/// │   ├── c:tx?
/// │   │   └── c:strRef? | c:rich?
/// │   ├── c:numFmt? c:txPr? c:dLblPos?
/// │   └── c:show*?
/// ├── c:numFmt? c:txPr? c:dLblPos?
/// └── c:show*?
/// ```
///
/// # Errors
/// `SchemaViolation` if one of the declarations is inconsistent.
pub fn create_chart_schema() -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();

    registry.register(
        ElementSpec::new("c:dLbls", DLBLS_SEQUENCE)
            .with_repeatable("c:dLbl")
            .with_optionals(["c:numFmt", "c:txPr", "c:dLblPos"])
            .with_optionals(SHOW_FLAGS)
            .with_default(DataLabels::build_default),
    )?;

    registry.register(
        ElementSpec::new("c:dLbl", DLBL_SEQUENCE)
            .with_required("c:idx")
            .with_optionals(["c:tx", "c:numFmt", "c:txPr", "c:dLblPos"])
            .with_optionals(SHOW_FLAGS)
            .with_default(DataLabel::build_default),
    )?;

    registry.register(
        ElementSpec::new("c:tx", TX_SEQUENCE)
            .with_optional("c:strRef")
            .with_optional("c:rich"),
    )?;

    // Text bodies
    registry.register(
        ElementSpec::new("c:rich", TEXT_BODY_SEQUENCE)
            .with_required("a:bodyPr")
            .with_optional("a:lstStyle")
            .with_repeatable("a:p")
            .with_default(text::new_rich),
    )?;
    registry.register(
        ElementSpec::new("c:txPr", TEXT_BODY_SEQUENCE)
            .with_required("a:bodyPr")
            .with_optional("a:lstStyle")
            .with_repeatable("a:p")
            .with_default(text::new_text_properties),
    )?;
    registry.register(ElementSpec::new("a:p", PARAGRAPH_SEQUENCE).with_optional("a:pPr"))?;
    registry.register(
        ElementSpec::new("a:pPr", PARAGRAPH_PROPERTIES_SEQUENCE).with_optional("a:defRPr"),
    )?;

    Ok(registry)
}
