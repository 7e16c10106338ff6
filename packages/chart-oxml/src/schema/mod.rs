//! Schema registry: tag sequences and child cardinality.
//!
//! Each element kind is declared once with an [`ElementSpec`]: its canonical
//! child order plus the presence rule of every child the model manages.
//! Descriptors derived from those declarations are the only way the model
//! creates children, which keeps every element's children in sequence order.

mod config;
mod descriptor;
mod registry;
mod types;

use std::sync::LazyLock;

pub use config::{
    create_chart_schema, DLBLS_SEQUENCE, DLBL_SEQUENCE, PARAGRAPH_PROPERTIES_SEQUENCE,
    PARAGRAPH_SEQUENCE, SHOW_FLAGS, TEXT_BODY_SEQUENCE, TX_SEQUENCE,
};
pub use descriptor::{OptionalChild, RepeatedChild, RequiredChild};
pub use registry::SchemaRegistry;
pub use types::{Cardinality, ChildSpec, DefaultBuilder, ElementSpec};

/// Process-wide chart schema.
#[allow(clippy::expect_used)] // Static declarations, validated by tests
static CHART_SCHEMA: LazyLock<SchemaRegistry> =
    LazyLock::new(|| create_chart_schema().expect("valid chart schema"));

/// The chart schema registry, built on first use.
#[must_use]
pub fn schema() -> &'static SchemaRegistry {
    &CHART_SCHEMA
}
