//! Reading part XML into an [`XmlPart`].
//!
//! Element and attribute names are re-qualified with the canonical prefixes
//! from [`config::NAMESPACES`], so lookups by `c:dLbl` work no matter which
//! prefix the producer chose. Other namespaces keep their source prefix
//! unless it is taken or empty, in which case a generated `nsN` prefix is
//! used. Whitespace-only text is dropped from elements with element
//! children and kept on leaves, where it is the value.

use std::collections::HashMap;

use roxmltree::{Document, ExpandedName, Node};

use super::tree::{NodeId, XmlPart};
use crate::config;
use crate::error::Result;

impl XmlPart {
    /// Parse a complete XML document into a new part.
    ///
    /// # Errors
    /// `XmlParse` if the input is not well-formed.
    ///
    /// # Examples
    /// ```
    /// use chart_oxml::xml::XmlPart;
    ///
    /// let xml = r#"<chart:dLbls xmlns:chart="http://schemas.openxmlformats.org/drawingml/2006/chart">
    ///   <chart:showVal val="1"/>
    /// </chart:dLbls>"#;
    /// let part = XmlPart::parse(xml).unwrap();
    /// assert_eq!(part.tag(part.root()), "c:dLbls");
    /// assert_eq!(part.child_tags(part.root()), vec!["c:showVal"]);
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let source_root = doc.root_element();

        // Start with a placeholder tag; foreign prefixes must be registered first
        let mut part = XmlPart::new("");
        let mut prefixes = Prefixes::default();
        let tag = prefixes.qualify(&mut part, source_root, source_root.tag_name())?;
        let root = part.root();
        part.rename(root, tag);
        part.import_content(&mut prefixes, source_root, root)?;

        tracing::trace!(root = %part.tag(root), "parsed part");
        Ok(part)
    }

    fn import_content(
        &mut self,
        prefixes: &mut Prefixes,
        source: Node<'_, '_>,
        target: NodeId,
    ) -> Result<()> {
        for attribute in source.attributes() {
            let name = match attribute.namespace() {
                Some(uri) => prefixes.qualify_uri(self, source, uri, attribute.name())?,
                None => attribute.name().to_string(),
            };
            self.set_attribute(target, &name, attribute.value());
        }

        let text: String = source
            .children()
            .filter(|child| child.is_text())
            .filter_map(|child| child.text())
            .collect();
        // Indentation between elements is layout; text on a leaf is its value
        let is_leaf = !source.children().any(|child| child.is_element());
        if !text.is_empty() && (is_leaf || !text.trim().is_empty()) {
            self.set_text(target, Some(text));
        }

        for child in source.children().filter(Node::is_element) {
            let tag = prefixes.qualify(self, child, child.tag_name())?;
            let id = self.create_element(tag);
            self.append(target, id)?;
            self.import_content(prefixes, child, id)?;
        }

        Ok(())
    }
}

/// Prefix chosen for each namespace URI outside the canonical table.
#[derive(Debug, Default)]
struct Prefixes {
    by_uri: HashMap<String, String>,
    generated: usize,
}

impl Prefixes {
    fn qualify(
        &mut self,
        part: &mut XmlPart,
        node: Node<'_, '_>,
        name: ExpandedName<'_, '_>,
    ) -> Result<String> {
        match name.namespace() {
            Some(uri) => self.qualify_uri(part, node, uri, name.name()),
            None => Ok(name.name().to_string()),
        }
    }

    fn qualify_uri(
        &mut self,
        part: &mut XmlPart,
        node: Node<'_, '_>,
        uri: &str,
        local: &str,
    ) -> Result<String> {
        if let Some(prefix) = config::prefix_for(uri) {
            return Ok(format!("{prefix}:{local}"));
        }
        if let Some(prefix) = self.by_uri.get(uri) {
            return Ok(format!("{prefix}:{local}"));
        }

        // The source prefix is reused unless it is the default namespace or
        // already bound elsewhere, e.g. `c` rebound to another URI
        let prefix = match node
            .lookup_prefix(uri)
            .filter(|p| !p.is_empty() && part.namespace_uri(p).is_none())
        {
            Some(prefix) => prefix.to_string(),
            None => self.generate(part),
        };
        part.register_namespace(&prefix, uri)?;
        tracing::trace!(%prefix, %uri, "bound foreign namespace");

        let qualified = format!("{prefix}:{local}");
        self.by_uri.insert(uri.to_string(), prefix);
        Ok(qualified)
    }

    fn generate(&mut self, part: &XmlPart) -> String {
        loop {
            let candidate = format!("ns{}", self.generated);
            self.generated += 1;
            if part.namespace_uri(&candidate).is_none() {
                return candidate;
            }
        }
    }
}
