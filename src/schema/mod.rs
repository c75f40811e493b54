//! Index schema model
//!
//! This module defines the mapping side of the DSL:
//! - Field types with wire names and value validation
//! - Document types (meta fields, declared fields, dynamic templates)
//! - The per-index registry of document types

mod document;
mod field_type;
mod registry;

pub use document::{Document, DocumentBuilder, MappingField};
pub use field_type::FieldType;
pub use registry::Index;
