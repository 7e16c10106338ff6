//! Chart OXML - Schema-ordered object model for DrawingML chart data labels.
//!
//! This crate wraps the `<c:dLbls>`, `<c:dLbl>` and `<c:dLblPos>` elements of
//! a chart part in typed views. Every child the model creates is placed at
//! its schema position, and per-point labels stay in ascending point order.
//!
//! # Example
//!
//! ```
//! use chart_oxml::{DataLabelPosition, DataLabels, PointIndex, XmlPart};
//!
//! let mut part = XmlPart::new("c:dLbls");
//! let dlbls = DataLabels::from_node(&part, part.root()).unwrap();
//!
//! let label = dlbls.get_or_add_for_point(&mut part, PointIndex::new(2)).unwrap();
//! label.set_position(&mut part, Some(DataLabelPosition::Above)).unwrap();
//!
//! assert_eq!(label.idx(&part).unwrap().value(), 2);
//! assert!(part.to_xml().unwrap().contains(r#"<c:dLblPos val="t"/>"#));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespace table and argument validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Arena XML tree with parsing and serialization
//! - [`codec`]: Attribute value codecs
//! - [`schema`]: Tag sequences, child cardinality and descriptors
//! - [`text`]: Minimal text bodies for label formatting
//! - [`chart`]: Data-label element kinds

pub mod chart;
pub mod codec;
pub mod config;
pub mod error;
pub mod schema;
pub mod text;
pub mod xml;

// Re-export commonly used items
pub use chart::{
    DataLabel, DataLabelPosition, DataLabelPositionElement, DataLabels, PointIndex, ShowFlag,
};
pub use error::{OxmlError, Result};
pub use schema::schema;
pub use xml::{NodeId, Position, XmlPart};
