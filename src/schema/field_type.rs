//! Field type definitions
//!
//! Declares how a field is mapped by the engine and which values it accepts.

use std::sync::Arc;

use serde_json::Value;

use super::document::Document;
use crate::error::DslError;
use crate::Result;

/// Field data type
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldType {
    /// Legacy analyzed string
    #[default]
    String,
    /// Full-text searchable field
    Text,
    /// Exact match keyword field
    Keyword,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    Float,
    Double,
    Boolean,
    /// Date/time as a formatted string or epoch milliseconds
    Date,
    /// Base64 encoded blob
    Binary,
    Ip,
    /// `"lat,lon"`, `[lon, lat]` or `{"lat": .., "lon": ..}`
    GeoPoint,
    /// Inner object with its own field mappings
    Object(Arc<Document>),
    /// Nested object, indexed as a separate hidden document
    Nested(Arc<Document>),
    /// Array of values of the inner type
    List(Box<FieldType>),
}

impl FieldType {
    /// Create an object type over a sub-document
    pub fn object(document: Document) -> Self {
        FieldType::Object(Arc::new(document))
    }

    /// Create a nested type over a sub-document
    pub fn nested(document: Document) -> Self {
        FieldType::Nested(Arc::new(document))
    }

    /// Create a list of the given type
    pub fn list(inner: FieldType) -> Self {
        FieldType::List(Box::new(inner))
    }

    /// Type name used in mapping bodies; lists map as their element type
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Keyword => "keyword",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Binary => "binary",
            FieldType::Ip => "ip",
            FieldType::GeoPoint => "geo_point",
            FieldType::Object(_) => "object",
            FieldType::Nested(_) => "nested",
            FieldType::List(inner) => inner.wire_name(),
        }
    }

    /// Sub-document of object and nested types (looked through lists)
    pub fn document(&self) -> Option<&Arc<Document>> {
        match self {
            FieldType::Object(doc) | FieldType::Nested(doc) => Some(doc),
            FieldType::List(inner) => inner.document(),
            _ => None,
        }
    }

    /// Check if this field type supports range queries
    pub fn supports_range(&self) -> bool {
        match self {
            FieldType::Integer
            | FieldType::Long
            | FieldType::Float
            | FieldType::Double
            | FieldType::Date
            | FieldType::Ip => true,
            FieldType::List(inner) => inner.supports_range(),
            _ => false,
        }
    }

    /// Validate a value against this field type
    ///
    /// Null is accepted for every type, matching the engine's handling of
    /// missing values.
    pub fn validate(&self, value: &Value) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        let ok = match self {
            FieldType::String
            | FieldType::Text
            | FieldType::Keyword
            | FieldType::Binary
            | FieldType::Ip => value.is_string(),
            FieldType::Integer => value
                .as_i64()
                .map(|v| i32::try_from(v).is_ok())
                .unwrap_or(false),
            FieldType::Long => value.is_i64() || value.is_u64(),
            FieldType::Float | FieldType::Double => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            // ISO string or epoch millis
            FieldType::Date => value.is_string() || value.is_i64() || value.is_u64(),
            FieldType::GeoPoint => match value {
                Value::String(_) => true,
                Value::Array(items) => items.len() == 2 && items.iter().all(Value::is_number),
                Value::Object(map) => map.contains_key("lat") && map.contains_key("lon"),
                _ => false,
            },
            FieldType::Object(doc) | FieldType::Nested(doc) => {
                if !value.is_object() {
                    return Err(self.mismatch(value));
                }
                return doc.validate(value);
            }
            FieldType::List(inner) => {
                return match value {
                    Value::Array(items) => items.iter().try_for_each(|item| inner.validate(item)),
                    single => inner.validate(single),
                };
            }
        };
        if ok {
            Ok(())
        } else {
            Err(self.mismatch(value))
        }
    }

    fn mismatch(&self, value: &Value) -> DslError {
        DslError::Validation(format!(
            "{} field does not accept value {}",
            self.wire_name(),
            value
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Field;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        assert_eq!(FieldType::default().wire_name(), "string");
        assert_eq!(FieldType::GeoPoint.wire_name(), "geo_point");
        assert_eq!(FieldType::list(FieldType::Integer).wire_name(), "integer");
    }

    #[test]
    fn test_validate_scalars() {
        assert!(FieldType::Text.validate(&json!("hello")).is_ok());
        assert!(FieldType::Text.validate(&json!(123)).is_err());
        assert!(FieldType::Long.validate(&json!(123)).is_ok());
        assert!(FieldType::Long.validate(&json!("123")).is_err());
        assert!(FieldType::Integer.validate(&json!(i64::MAX)).is_err());
        assert!(FieldType::Double.validate(&json!(1)).is_ok());
        assert!(FieldType::Boolean.validate(&json!(null)).is_ok());
    }

    #[test]
    fn test_validate_geo_point() {
        assert!(FieldType::GeoPoint.validate(&json!("41.12,-71.34")).is_ok());
        assert!(FieldType::GeoPoint.validate(&json!([-71.34, 41.12])).is_ok());
        assert!(FieldType::GeoPoint.validate(&json!({"lat": 41.12, "lon": -71.34})).is_ok());
        assert!(FieldType::GeoPoint.validate(&json!([1.0])).is_err());
    }

    #[test]
    fn test_validate_list_and_object() {
        let tags = FieldType::list(FieldType::Keyword);
        assert!(tags.validate(&json!(["a", "b"])).is_ok());
        assert!(tags.validate(&json!("a")).is_ok());
        assert!(tags.validate(&json!(["a", 1])).is_err());

        let author = Document::builder("author")
            .field(Field::typed("age", FieldType::Integer))
            .build()
            .unwrap();
        let object = FieldType::object(author);
        assert!(object.document().is_some());
        assert!(object.validate(&json!({"age": 40})).is_ok());
        assert!(object.validate(&json!({"age": "old"})).is_err());
        assert!(object.validate(&json!("author")).is_err());
    }

    #[test]
    fn test_supports_range() {
        assert!(FieldType::Date.supports_range());
        assert!(FieldType::list(FieldType::Long).supports_range());
        assert!(!FieldType::Keyword.supports_range());
    }
}
