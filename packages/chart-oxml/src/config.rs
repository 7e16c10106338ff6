//! Configuration constants and validation functions for the object model.

use crate::error::{OxmlError, Result};

/// DrawingML chart namespace (`c:` prefix).
pub const CHART_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// DrawingML main namespace (`a:` prefix).
pub const DRAWINGML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// Office relationships namespace (`r:` prefix).
pub const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Known prefix to namespace URI mappings.
///
/// Qualified tags inside an [`XmlPart`](crate::xml::XmlPart) always use these
/// prefixes, whatever prefixes the source document declared.
pub const NAMESPACES: &[(&str, &str)] = &[
    ("c", CHART_NS),
    ("a", DRAWINGML_NS),
    ("r", RELATIONSHIPS_NS),
];

/// Largest point index representable in `xsd:unsignedInt`.
pub const MAX_POINT_INDEX: i64 = u32::MAX as i64;

/// Look up the namespace URI bound to a prefix.
///
/// # Examples
/// ```
/// use chart_oxml::config::{namespace_for, CHART_NS};
///
/// assert_eq!(namespace_for("c").unwrap(), CHART_NS);
/// assert!(namespace_for("zz").is_err());
/// ```
pub fn namespace_for(prefix: &str) -> Result<&'static str> {
    NAMESPACES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
        .ok_or_else(|| OxmlError::UnknownNamespace(format!("prefix '{prefix}'")))
}

/// Look up the canonical prefix for a namespace URI.
pub fn prefix_for(uri: &str) -> Option<&'static str> {
    NAMESPACES
        .iter()
        .find(|(_, u)| *u == uri)
        .map(|(prefix, _)| *prefix)
}

/// Split a qualified tag like `c:dLbl` into prefix and local name.
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

/// Build `xmlns:` declaration pairs for the given prefixes.
///
/// # Examples
/// ```
/// use chart_oxml::config::nsdecls;
///
/// let decls = nsdecls(&["c"]).unwrap();
/// assert_eq!(decls[0].0, "xmlns:c");
/// ```
pub fn nsdecls(prefixes: &[&str]) -> Result<Vec<(String, &'static str)>> {
    prefixes
        .iter()
        .map(|prefix| Ok((format!("xmlns:{prefix}"), namespace_for(prefix)?)))
        .collect()
}

/// Validate a point index supplied as a signed integer.
///
/// # Returns
/// * `Ok(u32)` if within `0..=u32::MAX`
/// * `Err(OxmlError::InvalidArgument)` otherwise
///
/// # Examples
/// ```
/// use chart_oxml::config::validate_point_index;
///
/// assert_eq!(validate_point_index(7).unwrap(), 7);
/// assert!(validate_point_index(-1).is_err());
/// ```
pub fn validate_point_index(idx: i64) -> Result<u32> {
    if !(0..=MAX_POINT_INDEX).contains(&idx) {
        return Err(OxmlError::InvalidArgument(format!(
            "point index {idx} outside 0..={MAX_POINT_INDEX}"
        )));
    }
    u32::try_from(idx).map_err(|_| OxmlError::InvalidArgument(format!("point index {idx}")))
}
