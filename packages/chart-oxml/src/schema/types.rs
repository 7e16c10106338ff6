//! Types for the schema registry.

use crate::error::{OxmlError, Result};
use crate::xml::{NodeId, XmlPart};

/// Constructor for the default subtree of an element kind.
///
/// Returns a detached element; the caller decides where it goes.
pub type DefaultBuilder = fn(&mut XmlPart) -> Result<NodeId>;

/// How many times a child may occur under its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one.
    Required,
    /// Zero or one.
    Optional,
    /// Zero or more, contiguous.
    Repeatable,
}

/// Binding of one child tag to its presence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSpec {
    /// Qualified child tag.
    pub tag: &'static str,

    /// Presence rule.
    pub cardinality: Cardinality,

    /// Tags strictly after `tag` in the owner's sequence.
    ///
    /// A new child goes right before the first existing sibling with one of
    /// these tags.
    pub successors: &'static [&'static str],
}

/// Declarative specification of one element kind.
///
/// The `sequence` is the authoritative sibling order for the kind's
/// children. Only the children bound with one of the `with_*` methods get
/// descriptors; the rest of the sequence is there to place them correctly
/// around children the model does not manage.
#[derive(Debug, Clone)]
pub struct ElementSpec {
    /// Qualified tag of the owning element.
    pub tag: &'static str,

    /// Canonical ordered list of legal child tags.
    pub sequence: &'static [&'static str],

    /// Bound children.
    pub children: Vec<ChildSpec>,

    /// Constructor used whenever an element of this kind is created.
    pub default_builder: Option<DefaultBuilder>,
}

impl ElementSpec {
    /// Create a new element specification.
    #[must_use]
    pub fn new(tag: &'static str, sequence: &'static [&'static str]) -> Self {
        Self {
            tag,
            sequence,
            children: Vec::new(),
            default_builder: None,
        }
    }

    fn with_child(mut self, tag: &'static str, cardinality: Cardinality) -> Self {
        // Unknown tags get no successors here and are rejected by `validate`
        let sequence: &'static [&'static str] = self.sequence;
        let successors = match sequence.iter().position(|t| *t == tag) {
            Some(pos) => &sequence[pos + 1..],
            None => &[],
        };
        self.children.push(ChildSpec {
            tag,
            cardinality,
            successors,
        });
        self
    }

    /// Bind a child that must occur exactly once.
    #[must_use]
    pub fn with_required(self, tag: &'static str) -> Self {
        self.with_child(tag, Cardinality::Required)
    }

    /// Bind a child that may occur at most once.
    #[must_use]
    pub fn with_optional(self, tag: &'static str) -> Self {
        self.with_child(tag, Cardinality::Optional)
    }

    /// Bind several optional children at once.
    #[must_use]
    pub fn with_optionals(self, tags: impl IntoIterator<Item = &'static str>) -> Self {
        tags.into_iter().fold(self, Self::with_optional)
    }

    /// Bind a child that may occur any number of times.
    #[must_use]
    pub fn with_repeatable(self, tag: &'static str) -> Self {
        self.with_child(tag, Cardinality::Repeatable)
    }

    /// Set the default subtree constructor.
    #[must_use]
    pub fn with_default(mut self, builder: DefaultBuilder) -> Self {
        self.default_builder = Some(builder);
        self
    }

    /// Get the binding for a child tag.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&ChildSpec> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Check the sequence and bindings for internal consistency.
    ///
    /// # Errors
    /// `SchemaViolation` if the sequence repeats a tag, a bound child is not
    /// in the sequence, or a child is bound twice.
    pub fn validate(&self) -> Result<()> {
        for (i, tag) in self.sequence.iter().enumerate() {
            if self.sequence[i + 1..].contains(tag) {
                return Err(OxmlError::schema(
                    self.tag,
                    format!("<{tag}> appears twice in the tag sequence"),
                ));
            }
        }

        for (i, child) in self.children.iter().enumerate() {
            if !self.sequence.contains(&child.tag) {
                return Err(OxmlError::schema(
                    self.tag,
                    format!("bound child <{}> is not in the tag sequence", child.tag),
                ));
            }
            if self.children[i + 1..].iter().any(|c| c.tag == child.tag) {
                return Err(OxmlError::schema(
                    self.tag,
                    format!("child <{}> is bound twice", child.tag),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEQ: &[&str] = &["c:dLbl", "c:numFmt", "c:spPr", "c:txPr", "c:extLst"];

    #[test]
    fn test_successors_follow_sequence() {
        let spec = ElementSpec::new("c:dLbls", SEQ)
            .with_repeatable("c:dLbl")
            .with_optional("c:txPr");

        let dlbl = spec.child("c:dLbl").unwrap();
        assert_eq!(dlbl.cardinality, Cardinality::Repeatable);
        assert_eq!(dlbl.successors, &SEQ[1..]);

        let txpr = spec.child("c:txPr").unwrap();
        assert_eq!(txpr.successors, &["c:extLst"]);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_last_child_has_no_successors() {
        let spec = ElementSpec::new("c:dLbls", SEQ).with_optional("c:extLst");
        assert!(spec.child("c:extLst").unwrap().successors.is_empty());
    }

    #[test]
    fn test_with_optionals() {
        let spec = ElementSpec::new("c:dLbls", SEQ).with_optionals(["c:numFmt", "c:spPr"]);
        assert_eq!(spec.children.len(), 2);
        assert!(spec
            .children
            .iter()
            .all(|c| c.cardinality == Cardinality::Optional));
    }

    #[test]
    fn test_validate_rejects_unknown_child() {
        let spec = ElementSpec::new("c:dLbls", SEQ).with_optional("c:bogus");
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_sequence_tag() {
        const DUP: &[&str] = &["c:idx", "c:tx", "c:idx"];
        assert!(ElementSpec::new("c:dLbl", DUP).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_double_binding() {
        let spec = ElementSpec::new("c:dLbls", SEQ)
            .with_optional("c:txPr")
            .with_repeatable("c:txPr");
        assert!(spec.validate().is_err());
    }
}
