//! Arena-backed mutable element tree.
//!
//! An [`XmlPart`] owns every node of one document part. Nodes are addressed
//! by [`NodeId`], a plain index that is only meaningful together with the
//! part that issued it. Removing a node detaches it from its parent but keeps
//! it in the arena, so a handle never dangles. Detached nodes are only
//! reclaimed by [`XmlPart::compacted`], which issues fresh handles.

use std::fmt;

use crate::codec::{self, XmlValue};
use crate::config;
use crate::error::{OxmlError, Result};

/// Handle to one element node inside an [`XmlPart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural position for [`XmlPart::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Index 0 among the parent's children.
    First,
    /// After the parent's last child.
    Last,
    /// Immediately before the given sibling.
    Before(NodeId),
    /// Immediately after the given sibling.
    After(NodeId),
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(tag: String) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A document part: the owner of an element tree.
///
/// Tags are stored qualified with the canonical prefixes from
/// [`config::NAMESPACES`](crate::config::NAMESPACES), e.g. `c:dLbl`.
///
/// All accessors taking a [`NodeId`] panic if the id was issued by a
/// different part.
///
/// The arena only grows: removed and replaced subtrees stay allocated, and
/// `clone` copies them too. Long editing sessions should swap in
/// [`compacted`](Self::compacted) at a point where no handles are held.
#[derive(Debug, Clone)]
pub struct XmlPart {
    nodes: Vec<NodeData>,
    root: NodeId,
    /// Prefix bindings outside the canonical table, learned while parsing.
    foreign_namespaces: Vec<(String, String)>,
}

impl XmlPart {
    /// Create a part holding a single empty root element.
    ///
    /// # Examples
    /// ```
    /// use chart_oxml::xml::XmlPart;
    ///
    /// let part = XmlPart::new("c:ser");
    /// assert_eq!(part.tag(part.root()), "c:ser");
    /// assert!(part.children(part.root()).is_empty());
    /// ```
    #[must_use]
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData::new(root_tag.into())],
            root: NodeId(0),
            foreign_namespaces: Vec::new(),
        }
    }

    /// Namespace URI bound to `prefix`, canonical bindings first.
    #[must_use]
    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        config::namespace_for(prefix).ok().or_else(|| {
            self.foreign_namespaces
                .iter()
                .find(|(p, _)| p == prefix)
                .map(|(_, uri)| uri.as_str())
        })
    }

    /// Bind a prefix outside the canonical table.
    ///
    /// # Errors
    /// `UnknownNamespace` if `prefix` is already bound to a different URI.
    pub fn register_namespace(&mut self, prefix: &str, uri: &str) -> Result<()> {
        match self.namespace_uri(prefix) {
            Some(existing) if existing == uri => Ok(()),
            Some(existing) => Err(OxmlError::UnknownNamespace(format!(
                "prefix '{prefix}' bound to '{uri}', expected '{existing}'"
            ))),
            None => {
                self.foreign_namespaces
                    .push((prefix.to_string(), uri.to_string()));
                Ok(())
            }
        }
    }

    /// The document element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes held by the arena, attached or not.
    #[must_use]
    pub fn allocated_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Copy of this part holding only the nodes reachable from the root.
    ///
    /// Ids are reassigned in document order with the root at `#0`, so
    /// handles into `self` are not valid in the copy.
    #[must_use]
    pub fn compacted(&self) -> XmlPart {
        let mut part = XmlPart {
            nodes: Vec::new(),
            root: NodeId(0),
            foreign_namespaces: self.foreign_namespaces.clone(),
        };
        part.copy_subtree(self, self.root, None);

        tracing::debug!(
            before = self.nodes.len(),
            after = part.nodes.len(),
            "compacted part"
        );
        part
    }

    fn copy_subtree(&mut self, source: &XmlPart, id: NodeId, parent: Option<NodeId>) -> NodeId {
        let data = source.node(id);
        let copy = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: data.tag.clone(),
            attributes: data.attributes.clone(),
            text: data.text.clone(),
            parent,
            children: Vec::with_capacity(data.children.len()),
        });
        for child in &data.children {
            let child_copy = self.copy_subtree(source, *child, Some(copy));
            self.node_mut(copy).children.push(child_copy);
        }
        copy
    }

    /// Create a detached empty element with the given qualified tag.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(tag.into()));
        id
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    /// Qualified tag of an element.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    pub(crate) fn rename(&mut self, id: NodeId, tag: String) {
        self.node_mut(id).tag = tag;
    }

    /// Check if an element has the given qualified tag.
    #[must_use]
    pub fn has_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id) == tag
    }

    /// Parent element, or `None` for the root and detached nodes.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Direct children in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Tags of the direct children in document order.
    #[must_use]
    pub fn child_tags(&self, id: NodeId) -> Vec<&str> {
        self.children(id).iter().map(|c| self.tag(*c)).collect()
    }

    /// Text content of an element.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    /// Replace the text content of an element.
    pub fn set_text(&mut self, id: NodeId, text: Option<String>) {
        self.node_mut(id).text = text;
    }

    /// Find the first direct child with the given tag.
    ///
    /// # Examples
    /// ```
    /// use chart_oxml::xml::XmlPart;
    ///
    /// let part = XmlPart::parse(r#"<c:dLbl xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:idx val="1"/></c:dLbl>"#).unwrap();
    /// assert!(part.first_child(part.root(), "c:idx").is_some());
    /// assert!(part.first_child(part.root(), "c:tx").is_none());
    /// ```
    #[must_use]
    pub fn first_child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.has_tag(*child, tag))
    }

    /// Find all direct children with the given tag, in document order.
    #[must_use]
    pub fn children_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.has_tag(*child, tag))
            .collect()
    }

    /// Find the first direct child whose tag is one of `tags`.
    #[must_use]
    pub fn first_child_in(&self, id: NodeId, tags: &[&str]) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| tags.contains(&self.tag(*child)))
    }

    /// Check if `ancestor` is `id` itself or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn child_position(&self, parent: NodeId, child: NodeId) -> Result<usize> {
        self.children(parent)
            .iter()
            .position(|c| *c == child)
            .ok_or_else(|| OxmlError::NotFound {
                parent: self.tag(parent).to_string(),
                child: self.tag(child).to_string(),
            })
    }

    /// Splice a detached element into `parent` at `position`.
    ///
    /// # Errors
    /// * `InvalidArgument` if `child` is already attached, is the root, or
    ///   would become its own ancestor
    /// * `NotFound` if the sibling anchor is not a direct child of `parent`
    ///
    /// The tree is untouched when an error is returned.
    pub fn insert(&mut self, parent: NodeId, position: Position, child: NodeId) -> Result<()> {
        if child == self.root || self.parent(child).is_some() {
            return Err(OxmlError::InvalidArgument(format!(
                "<{}> {child} is already attached",
                self.tag(child)
            )));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(OxmlError::InvalidArgument(format!(
                "<{}> {child} cannot be inserted inside itself",
                self.tag(child)
            )));
        }

        let index = match position {
            Position::First => 0,
            Position::Last => self.children(parent).len(),
            Position::Before(anchor) => self.child_position(parent, anchor)?,
            Position::After(anchor) => self.child_position(parent, anchor)? + 1,
        };

        self.node_mut(parent).children.insert(index, child);
        self.node_mut(child).parent = Some(parent);

        tracing::debug!(
            parent = %self.tag(parent),
            child = %self.tag(child),
            index,
            "inserted element"
        );
        Ok(())
    }

    /// Append a detached element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert(parent, Position::Last, child)
    }

    /// Detach `child` from `parent`.
    ///
    /// # Errors
    /// `NotFound` if `child` is not a direct child of `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self.child_position(parent, child)?;
        self.node_mut(parent).children.remove(index);
        self.node_mut(child).parent = None;

        tracing::debug!(
            parent = %self.tag(parent),
            child = %self.tag(child),
            index,
            "removed element"
        );
        Ok(())
    }

    /// Raw attribute value.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        &self.node(id).attributes
    }

    /// Set a raw attribute value, keeping its position if already present.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let attributes = &mut self.node_mut(id).attributes;
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => attributes.push((name.to_string(), value)),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let attributes = &mut self.node_mut(id).attributes;
        let index = attributes.iter().position(|(n, _)| n == name)?;
        Some(attributes.remove(index).1)
    }

    /// Read an attribute through its value codec.
    ///
    /// # Returns
    /// `Ok(None)` when the attribute is absent.
    ///
    /// # Errors
    /// `InvalidValue` when the raw text is rejected by the codec.
    pub fn get_value<T: XmlValue>(&self, id: NodeId, name: &str) -> Result<Option<T>> {
        let Some(raw) = self.attribute(id, name) else {
            return Ok(None);
        };
        T::from_xml(raw).map(Some).ok_or_else(|| {
            OxmlError::invalid_value(name, raw, format!("expected {}", T::XSD_TYPE))
        })
    }

    /// Write an attribute through its value codec.
    ///
    /// # Errors
    /// `InvalidValue` when the codec has no XML form for `value`; the
    /// attribute is left as it was.
    pub fn set_value<T: XmlValue>(&mut self, id: NodeId, name: &str, value: &T) -> Result<()> {
        let raw = codec::encode(name, value)?;
        self.set_attribute(id, name, raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn part_with_children(tags: &[&str]) -> (XmlPart, Vec<NodeId>) {
        let mut part = XmlPart::new("c:dLbls");
        let root = part.root();
        let ids = tags
            .iter()
            .map(|tag| {
                let id = part.create_element(*tag);
                part.append(root, id).unwrap();
                id
            })
            .collect();
        (part, ids)
    }

    #[test]
    fn test_first_child_and_children_by_tag() {
        let (part, ids) = part_with_children(&["c:dLbl", "c:numFmt", "c:dLbl"]);
        let root = part.root();

        assert_eq!(part.first_child(root, "c:dLbl"), Some(ids[0]));
        assert_eq!(part.children_by_tag(root, "c:dLbl"), vec![ids[0], ids[2]]);
        assert!(part.first_child(root, "c:txPr").is_none());
        assert!(part.children_by_tag(root, "c:txPr").is_empty());
    }

    #[test]
    fn test_insert_positions() {
        let (mut part, ids) = part_with_children(&["c:showVal"]);
        let root = part.root();

        let first = part.create_element("c:dLbl");
        part.insert(root, Position::First, first).unwrap();
        let before = part.create_element("c:txPr");
        part.insert(root, Position::Before(ids[0]), before).unwrap();
        let after = part.create_element("c:showCatName");
        part.insert(root, Position::After(ids[0]), after).unwrap();

        assert_eq!(
            part.child_tags(root),
            vec!["c:dLbl", "c:txPr", "c:showVal", "c:showCatName"]
        );
        assert_eq!(part.parent(after), Some(root));
    }

    #[test]
    fn test_insert_anchor_not_a_child() {
        let (mut part, ids) = part_with_children(&["c:dLbl"]);
        let root = part.root();
        let stranger = part.create_element("c:idx");
        part.append(ids[0], stranger).unwrap();

        let new = part.create_element("c:numFmt");
        let err = part.insert(root, Position::Before(stranger), new).unwrap_err();

        assert!(matches!(err, OxmlError::NotFound { .. }));
        assert_eq!(part.child_tags(root), vec!["c:dLbl"]);
        assert_eq!(part.parent(new), None);
    }

    #[test]
    fn test_insert_attached_child_rejected() {
        let (mut part, ids) = part_with_children(&["c:dLbl"]);
        let root = part.root();

        let err = part.append(root, ids[0]).unwrap_err();
        assert!(matches!(err, OxmlError::InvalidArgument(_)));
        assert_eq!(part.children(root).len(), 1);
    }

    #[test]
    fn test_insert_into_own_subtree_rejected() {
        let mut part = XmlPart::new("c:dLbls");
        let outer = part.create_element("c:dLbl");
        let inner = part.create_element("c:idx");
        part.append(outer, inner).unwrap();

        let err = part.append(inner, outer).unwrap_err();
        assert!(matches!(err, OxmlError::InvalidArgument(_)));
    }

    #[test]
    fn test_remove_detaches() {
        let (mut part, ids) = part_with_children(&["c:dLbl", "c:showVal"]);
        let root = part.root();

        part.remove(root, ids[0]).unwrap();
        assert_eq!(part.child_tags(root), vec!["c:showVal"]);
        assert_eq!(part.parent(ids[0]), None);

        // Detached nodes can be spliced back in
        part.insert(root, Position::First, ids[0]).unwrap();
        assert_eq!(part.child_tags(root), vec!["c:dLbl", "c:showVal"]);
    }

    #[test]
    fn test_remove_not_a_child() {
        let (mut part, _) = part_with_children(&["c:dLbl"]);
        let root = part.root();
        let loose = part.create_element("c:txPr");

        let err = part.remove(root, loose).unwrap_err();
        assert!(matches!(err, OxmlError::NotFound { .. }));
    }

    #[test]
    fn test_attributes_keep_order() {
        let mut part = XmlPart::new("c:idx");
        let root = part.root();
        part.set_attribute(root, "val", "1");
        part.set_attribute(root, "extra", "x");
        part.set_attribute(root, "val", "2");

        assert_eq!(part.attribute(root, "val"), Some("2"));
        assert_eq!(part.attributes(root)[0].0, "val");
        assert_eq!(part.remove_attribute(root, "extra"), Some("x".to_string()));
        assert_eq!(part.attribute(root, "extra"), None);
    }

    #[test]
    fn test_compacted_drops_detached_nodes() {
        let (mut part, ids) = part_with_children(&["c:dLbl", "c:showVal"]);
        let root = part.root();
        let idx = part.create_element("c:idx");
        part.set_attribute(idx, "val", "4");
        part.append(ids[0], idx).unwrap();

        for _ in 0..100 {
            let tx_pr = part.create_element("c:txPr");
            let body_pr = part.create_element("a:bodyPr");
            part.append(tx_pr, body_pr).unwrap();
            part.insert(root, Position::Before(ids[1]), tx_pr).unwrap();
            part.remove(root, tx_pr).unwrap();
        }
        assert_eq!(part.allocated_nodes(), 204);

        let compact = part.compacted();

        assert_eq!(compact.allocated_nodes(), 4);
        assert_eq!(compact.to_xml().unwrap(), part.to_xml().unwrap());
        let dlbl = compact.first_child(compact.root(), "c:dLbl").unwrap();
        let copied_idx = compact.first_child(dlbl, "c:idx").unwrap();
        assert_eq!(compact.parent(copied_idx), Some(dlbl));
        assert_eq!(compact.attribute(copied_idx, "val"), Some("4"));
    }

    #[test]
    fn test_compacted_keeps_foreign_namespaces() {
        let mut part = XmlPart::new("c:extLst");
        part.register_namespace("c15", "urn:test:c15").unwrap();
        let root = part.root();
        let layout = part.create_element("c15:layout");
        part.append(root, layout).unwrap();

        let compact = part.compacted();
        assert_eq!(compact.namespace_uri("c15"), Some("urn:test:c15"));
        assert_eq!(compact.to_xml().unwrap(), part.to_xml().unwrap());
    }

    #[test]
    fn test_typed_values() {
        let mut part = XmlPart::new("c:showVal");
        let root = part.root();

        assert_eq!(part.get_value::<bool>(root, "val").unwrap(), None);
        part.set_value(root, "val", &true).unwrap();
        assert_eq!(part.attribute(root, "val"), Some("1"));
        assert_eq!(part.get_value::<bool>(root, "val").unwrap(), Some(true));

        part.set_attribute(root, "val", "maybe");
        let err = part.get_value::<bool>(root, "val").unwrap_err();
        assert!(matches!(err, OxmlError::InvalidValue { .. }));
    }
}
