//! Child descriptors: accessor behavior synthesized from a [`ChildSpec`].
//!
//! A descriptor is a small `Copy` value bound to one owner kind and one child
//! tag. It is obtained from a [`SchemaRegistry`], which also supplies the
//! default-subtree constructor used when a child has to be created.
//!
//! [`ChildSpec`]: super::ChildSpec

use super::registry::SchemaRegistry;
use crate::error::{OxmlError, Result};
use crate::xml::{NodeId, Position, XmlPart};

/// Shared placement data of every descriptor kind.
#[derive(Debug, Clone, Copy)]
struct Slot<'r> {
    registry: &'r SchemaRegistry,
    owner: &'static str,
    tag: &'static str,
    successors: &'static [&'static str],
}

impl<'r> Slot<'r> {
    fn check_owner(&self, part: &XmlPart, owner: NodeId) -> Result<()> {
        if part.has_tag(owner, self.owner) {
            return Ok(());
        }
        Err(OxmlError::schema(
            part.tag(owner),
            format!("descriptor for <{}> belongs to <{}>", self.tag, self.owner),
        ))
    }

    /// Splice `child` in before the first successor sibling, or append.
    fn insert_in_sequence(&self, part: &mut XmlPart, owner: NodeId, child: NodeId) -> Result<()> {
        let position = part
            .first_child_in(owner, self.successors)
            .map_or(Position::Last, Position::Before);
        part.insert(owner, position, child)
    }

    fn create_in_sequence(&self, part: &mut XmlPart, owner: NodeId) -> Result<NodeId> {
        let child = self.registry.new_element(part, self.tag)?;
        self.insert_in_sequence(part, owner, child)?;
        Ok(child)
    }
}

/// Accessor for a child that must occur exactly once.
#[derive(Debug, Clone, Copy)]
pub struct RequiredChild<'r> {
    slot: Slot<'r>,
}

/// Accessor for a child that may occur at most once.
#[derive(Debug, Clone, Copy)]
pub struct OptionalChild<'r> {
    slot: Slot<'r>,
}

/// Accessor for a child kind that may repeat.
#[derive(Debug, Clone, Copy)]
pub struct RepeatedChild<'r> {
    slot: Slot<'r>,
}

macro_rules! descriptor_common {
    ($name:ident) => {
        impl<'r> $name<'r> {
            pub(crate) fn new(
                registry: &'r SchemaRegistry,
                owner: &'static str,
                tag: &'static str,
                successors: &'static [&'static str],
            ) -> Self {
                Self {
                    slot: Slot {
                        registry,
                        owner,
                        tag,
                        successors,
                    },
                }
            }

            /// Qualified child tag this descriptor manages.
            #[must_use]
            pub fn tag(&self) -> &'static str {
                self.slot.tag
            }

            /// Qualified tag of the owning element kind.
            #[must_use]
            pub fn owner(&self) -> &'static str {
                self.slot.owner
            }

            /// Sibling tags that must come after this child.
            #[must_use]
            pub fn successors(&self) -> &'static [&'static str] {
                self.slot.successors
            }
        }
    };
}

descriptor_common!(RequiredChild);
descriptor_common!(OptionalChild);
descriptor_common!(RepeatedChild);

impl RequiredChild<'_> {
    /// Return the child.
    ///
    /// # Errors
    /// `SchemaViolation` if the child is missing.
    pub fn get(&self, part: &XmlPart, owner: NodeId) -> Result<NodeId> {
        self.slot.check_owner(part, owner)?;
        part.first_child(owner, self.slot.tag).ok_or_else(|| {
            OxmlError::schema(
                self.slot.owner,
                format!("missing required child <{}>", self.slot.tag),
            )
        })
    }
}

impl OptionalChild<'_> {
    /// Return the child if present.
    pub fn get(&self, part: &XmlPart, owner: NodeId) -> Result<Option<NodeId>> {
        self.slot.check_owner(part, owner)?;
        Ok(part.first_child(owner, self.slot.tag))
    }

    /// Return the child, creating its default subtree in sequence if absent.
    pub fn get_or_create(&self, part: &mut XmlPart, owner: NodeId) -> Result<NodeId> {
        if let Some(existing) = self.get(part, owner)? {
            tracing::trace!(tag = %self.slot.tag, "found optional child");
            return Ok(existing);
        }
        self.slot.create_in_sequence(part, owner)
    }

    /// Create the child in sequence without checking for an existing one.
    ///
    /// Callers must have removed any existing child first.
    pub fn insert_new(&self, part: &mut XmlPart, owner: NodeId) -> Result<NodeId> {
        self.slot.check_owner(part, owner)?;
        self.slot.create_in_sequence(part, owner)
    }

    /// Remove the child if present.
    ///
    /// # Returns
    /// `true` if anything was removed.
    pub fn remove_if_present(&self, part: &mut XmlPart, owner: NodeId) -> Result<bool> {
        self.slot.check_owner(part, owner)?;
        // Malformed input may carry duplicates; clear them all
        let matches = part.children_by_tag(owner, self.slot.tag);
        for child in &matches {
            part.remove(owner, *child)?;
        }
        Ok(!matches.is_empty())
    }
}

impl RepeatedChild<'_> {
    /// Return every child of this kind in document order.
    pub fn list(&self, part: &XmlPart, owner: NodeId) -> Result<Vec<NodeId>> {
        self.slot.check_owner(part, owner)?;
        Ok(part.children_by_tag(owner, self.slot.tag))
    }

    /// Create a new default child after the existing ones of its kind.
    pub fn add_last(&self, part: &mut XmlPart, owner: NodeId) -> Result<NodeId> {
        self.slot.check_owner(part, owner)?;
        self.slot.create_in_sequence(part, owner)
    }

    /// Place an already-built detached child at this kind's slot.
    pub fn insert_in_sequence(&self, part: &mut XmlPart, owner: NodeId, child: NodeId) -> Result<()> {
        self.slot.check_owner(part, owner)?;
        if !part.has_tag(child, self.slot.tag) {
            return Err(OxmlError::InvalidArgument(format!(
                "expected <{}>, got <{}>",
                self.slot.tag,
                part.tag(child)
            )));
        }
        self.slot.insert_in_sequence(part, owner, child)
    }
}
