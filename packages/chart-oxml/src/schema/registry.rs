//! Schema registry mapping element kinds to their specifications.

use std::collections::{HashMap, HashSet};

use super::descriptor::{OptionalChild, RepeatedChild, RequiredChild};
use super::types::{Cardinality, ChildSpec, ElementSpec};
use crate::error::{OxmlError, Result};
use crate::xml::{NodeId, XmlPart};

/// Registry of element specifications, keyed by qualified tag.
///
/// Built once and read-only afterwards; see [`schema`](super::schema) for
/// the process-wide chart instance.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    specs: HashMap<&'static str, ElementSpec>,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element specification after validating it.
    ///
    /// # Errors
    /// `SchemaViolation` if the declaration is inconsistent or its tag is taken.
    pub fn register(&mut self, spec: ElementSpec) -> Result<()> {
        spec.validate()?;
        if self.specs.contains_key(spec.tag) {
            return Err(OxmlError::schema(spec.tag, "element kind registered twice"));
        }
        self.specs.insert(spec.tag, spec);
        Ok(())
    }

    /// Get the specification for a tag.
    #[must_use]
    pub fn get_spec(&self, tag: &str) -> Option<&ElementSpec> {
        self.specs.get(tag)
    }

    /// Check if a tag has a registered specification.
    #[must_use]
    pub fn is_registered(&self, tag: &str) -> bool {
        self.specs.contains_key(tag)
    }

    /// Return set of all registered tag names.
    #[must_use]
    pub fn registered_tags(&self) -> HashSet<&str> {
        self.specs.keys().copied().collect()
    }

    fn binding(&self, owner: &str, tag: &str, expected: Cardinality) -> Result<(&'static str, &ChildSpec)> {
        let spec = self
            .get_spec(owner)
            .ok_or_else(|| OxmlError::schema(owner, "element kind not registered"))?;
        let child = spec
            .child(tag)
            .ok_or_else(|| OxmlError::schema(owner, format!("child <{tag}> not bound")))?;
        if child.cardinality != expected {
            return Err(OxmlError::schema(
                owner,
                format!(
                    "child <{tag}> is {:?}, not {expected:?}",
                    child.cardinality
                ),
            ));
        }
        Ok((spec.tag, child))
    }

    /// Descriptor for a required child.
    pub fn required(&self, owner: &str, tag: &str) -> Result<RequiredChild<'_>> {
        let (owner, child) = self.binding(owner, tag, Cardinality::Required)?;
        Ok(RequiredChild::new(self, owner, child.tag, child.successors))
    }

    /// Descriptor for an optional child.
    pub fn optional(&self, owner: &str, tag: &str) -> Result<OptionalChild<'_>> {
        let (owner, child) = self.binding(owner, tag, Cardinality::Optional)?;
        Ok(OptionalChild::new(self, owner, child.tag, child.successors))
    }

    /// Descriptor for a repeatable child.
    pub fn repeated(&self, owner: &str, tag: &str) -> Result<RepeatedChild<'_>> {
        let (owner, child) = self.binding(owner, tag, Cardinality::Repeatable)?;
        Ok(RepeatedChild::new(self, owner, child.tag, child.successors))
    }

    /// Create a detached element of the given kind.
    ///
    /// Uses the kind's registered default subtree when there is one, an
    /// empty element otherwise.
    pub fn new_element(&self, part: &mut XmlPart, tag: &str) -> Result<NodeId> {
        match self.get_spec(tag).and_then(|spec| spec.default_builder) {
            Some(builder) => {
                let id = builder(part)?;
                if !part.has_tag(id, tag) {
                    return Err(OxmlError::schema(
                        tag,
                        format!("default builder produced <{}>", part.tag(id)),
                    ));
                }
                Ok(id)
            }
            None => Ok(part.create_element(tag)),
        }
    }
}
