//! Writing an [`XmlPart`] back to XML text.

use std::collections::BTreeSet;
use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::tree::{NodeId, XmlPart};
use crate::config::split_qname;
use crate::error::{OxmlError, Result};

impl XmlPart {
    /// Serialize the whole part, starting at the root element.
    ///
    /// # Examples
    /// ```
    /// use chart_oxml::xml::XmlPart;
    ///
    /// let mut part = XmlPart::new("c:dLblPos");
    /// let root = part.root();
    /// part.set_attribute(root, "val", "ctr");
    /// assert_eq!(
    ///     part.to_xml().unwrap(),
    ///     r#"<c:dLblPos xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" val="ctr"/>"#
    /// );
    /// ```
    pub fn to_xml(&self) -> Result<String> {
        self.element_to_xml(self.root())
    }

    /// Serialize one element and its subtree as a standalone fragment.
    ///
    /// The fragment root carries an `xmlns` declaration for every prefix
    /// used in the subtree.
    pub fn element_to_xml(&self, id: NodeId) -> Result<String> {
        let mut prefixes = BTreeSet::new();
        self.collect_prefixes(id, &mut prefixes);

        let mut declarations = Vec::with_capacity(prefixes.len());
        for prefix in prefixes {
            let uri = self
                .namespace_uri(prefix)
                .ok_or_else(|| OxmlError::UnknownNamespace(format!("prefix '{prefix}'")))?;
            declarations.push((format!("xmlns:{prefix}"), uri));
        }

        let mut writer = Writer::new(Cursor::new(Vec::new()));
        self.write_element(&mut writer, id, &declarations)?;
        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }

    fn collect_prefixes<'a>(&'a self, id: NodeId, prefixes: &mut BTreeSet<&'a str>) {
        let names = std::iter::once(self.tag(id))
            .chain(self.attributes(id).iter().map(|(name, _)| name.as_str()));
        for name in names {
            if let (Some(prefix), _) = split_qname(name) {
                if prefix != "xml" {
                    prefixes.insert(prefix);
                }
            }
        }
        for child in self.children(id) {
            self.collect_prefixes(*child, prefixes);
        }
    }

    fn write_element(
        &self,
        writer: &mut Writer<Cursor<Vec<u8>>>,
        id: NodeId,
        declarations: &[(String, &str)],
    ) -> Result<()> {
        let tag = self.tag(id);
        let mut start = BytesStart::new(tag);
        for (name, uri) in declarations {
            start.push_attribute((name.as_str(), *uri));
        }
        for (name, value) in self.attributes(id) {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        let children = self.children(id);
        let text = self.text(id);
        if children.is_empty() && text.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in children {
            self.write_element(writer, *child, &[])?;
        }
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }
}
