//! Generic element tree: the arena, its reader and its writer.

mod parse;
mod serialize;
mod tree;

pub use tree::{NodeId, Position, XmlPart};
