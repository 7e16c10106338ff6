//! Attribute value codecs.
//!
//! A codec maps between the raw text of an attribute and a semantic value.
//! Codecs never raise errors themselves: they return `None` and the tree
//! accessor turns that into [`OxmlError::InvalidValue`](crate::OxmlError)
//! with the attribute name attached.

use std::fmt::Debug;

use crate::error::{OxmlError, Result};

/// A value that can be stored in an XML attribute.
pub trait XmlValue: Sized + Debug {
    /// Schema type name used in error messages.
    const XSD_TYPE: &'static str;

    /// Parse the raw attribute text.
    fn from_xml(raw: &str) -> Option<Self>;

    /// Render the value as attribute text, or `None` if it has no XML form.
    fn to_xml(&self) -> Option<String>;
}

/// Render `value` for attribute `name`, rejecting values without XML form.
pub(crate) fn encode<T: XmlValue>(name: &str, value: &T) -> Result<String> {
    value.to_xml().ok_or_else(|| {
        OxmlError::invalid_value(
            name,
            format!("{value:?}"),
            format!("no {} representation", T::XSD_TYPE),
        )
    })
}

/// `xsd:boolean`: accepts `true`/`false`/`1`/`0`, writes `1`/`0`.
impl XmlValue for bool {
    const XSD_TYPE: &'static str = "xsd:boolean";

    fn from_xml(raw: &str) -> Option<Self> {
        match raw {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }

    fn to_xml(&self) -> Option<String> {
        Some(if *self { "1" } else { "0" }.to_string())
    }
}

/// `xsd:unsignedInt`.
impl XmlValue for u32 {
    const XSD_TYPE: &'static str = "xsd:unsignedInt";

    fn from_xml(raw: &str) -> Option<Self> {
        // Reject a leading '+' which `u32::from_str` would accept
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok()
    }

    fn to_xml(&self) -> Option<String> {
        Some(self.to_string())
    }
}
