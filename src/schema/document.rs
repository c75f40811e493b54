//! Document schemas
//!
//! A [`Document`] describes one mapping type: its meta mapping fields
//! (`_routing`, `_parent`, ...), the declared user fields, and dynamic
//! fields whose names are `path_match` globs applied to undeclared fields.

use regex::Regex;
use serde_json::Value;

use crate::compiler::MappingCompiler;
use crate::error::DslError;
use crate::query::{Expr, Field, Params};
use crate::Result;

/// Meta field of a mapping type (`_routing`, `_parent`, `_all`, ...)
///
/// Compiles to its options only, or to nothing when it has none.
#[derive(Clone, Debug, PartialEq)]
pub struct MappingField {
    name: String,
    options: Params,
}

impl MappingField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Params::new(),
        }
    }

    pub fn id() -> Self {
        Self::new("_id")
    }

    pub fn source() -> Self {
        Self::new("_source")
    }

    pub fn all() -> Self {
        Self::new("_all")
    }

    pub fn routing() -> Self {
        Self::new("_routing")
    }

    pub fn timestamp() -> Self {
        Self::new("_timestamp")
    }

    pub fn ttl() -> Self {
        Self::new("_ttl")
    }

    /// Parent/child link to another document type
    pub fn parent(doc_type: impl Into<String>) -> Self {
        Self::new("_parent").with_option("type", doc_type.into())
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Params {
        &self.options
    }
}

/// Mapping type schema
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    doc_type: String,
    dynamic: bool,
    mapping_options: Params,
    mapping_fields: Vec<MappingField>,
    user_fields: Vec<Field>,
    dynamic_fields: Vec<Field>,
    /// Compiled `path_match` of each dynamic field, in the same order
    path_matches: Vec<PathMatch>,
}

/// Anchored regex compiled from a `path_match` glob
#[derive(Clone, Debug)]
struct PathMatch(Regex);

impl PartialEq for PathMatch {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl Document {
    /// Start declaring a document type
    pub fn builder(doc_type: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder {
            doc_type: doc_type.into(),
            dynamic: false,
            mapping_options: Params::new(),
            mapping_fields: Vec::new(),
            user_fields: Vec::new(),
            dynamic_fields: Vec::new(),
        }
    }

    /// Schema-less document: any field name resolves to an untyped field
    pub fn dynamic(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            dynamic: true,
            mapping_options: Params::new(),
            mapping_fields: Vec::new(),
            user_fields: Vec::new(),
            dynamic_fields: Vec::new(),
            path_matches: Vec::new(),
        }
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn mapping_options(&self) -> &Params {
        &self.mapping_options
    }

    pub fn mapping_fields(&self) -> &[MappingField] {
        &self.mapping_fields
    }

    pub fn user_fields(&self) -> &[Field] {
        &self.user_fields
    }

    pub fn dynamic_fields(&self) -> &[Field] {
        &self.dynamic_fields
    }

    /// Resolve a field by name
    ///
    /// Lookup order: declared fields (a dotted name selects a sub-field of a
    /// declared field), then dynamic field patterns, then any name on a
    /// schema-less document.
    pub fn field(&self, name: &str) -> Result<Field> {
        if let Some(field) = self.declared(name) {
            return Ok(field.clone());
        }
        if let Some((head, rest)) = name.split_once('.') {
            if let Some(field) = self.declared(head) {
                return Ok(field.sub(rest));
            }
        }
        if let Some(template) = self.matching_template(name) {
            return Ok(Field::typed(name, template.field_type().clone()).attached_to(&self.doc_type));
        }
        if self.dynamic {
            return Ok(Field::new(name).attached_to(&self.doc_type));
        }
        Err(DslError::UnknownField {
            doc_type: self.doc_type.clone(),
            field: name.to_string(),
        })
    }

    /// Check a source document against the declared field types
    pub fn validate(&self, source: &Value) -> Result<()> {
        let Value::Object(map) = source else {
            return Err(DslError::Validation(format!(
                "{} document must be an object, got {}",
                self.doc_type, source
            )));
        };

        for (name, value) in map {
            let result = if let Some(field) = self.declared(name) {
                field.field_type().validate(value)
            } else if let Some(template) = self.matching_template(name) {
                template.field_type().validate(value)
            } else if self.dynamic {
                Ok(())
            } else {
                Err(DslError::UnknownField {
                    doc_type: self.doc_type.clone(),
                    field: name.clone(),
                })
            };
            result.map_err(|e| match e {
                DslError::Validation(reason) => {
                    DslError::Validation(format!("{}.{}: {}", self.doc_type, name, reason))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Compile the put-mapping body of this document
    pub fn to_mapping(&self) -> Result<Value> {
        MappingCompiler::default().compile_document(self)
    }

    fn declared(&self, name: &str) -> Option<&Field> {
        self.user_fields.iter().find(|f| f.name() == name)
    }

    fn matching_template(&self, name: &str) -> Option<&Field> {
        self.dynamic_fields
            .iter()
            .zip(&self.path_matches)
            .find(|(_, path_match)| path_match.0.is_match(name))
            .map(|(template, _)| template)
    }
}

/// Builder for [`Document`]
#[derive(Clone, Debug)]
pub struct DocumentBuilder {
    doc_type: String,
    dynamic: bool,
    mapping_options: Params,
    mapping_fields: Vec<MappingField>,
    user_fields: Vec<Field>,
    dynamic_fields: Vec<Field>,
}

impl DocumentBuilder {
    /// Accept undeclared fields on lookup and validation
    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// Add a type-level mapping option (`dynamic`, `date_detection`, ...)
    pub fn mapping_option(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.mapping_options.insert(key, value);
        self
    }

    pub fn mapping_field(mut self, field: MappingField) -> Self {
        self.mapping_fields.push(field);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.user_fields.push(field);
        self
    }

    /// Add a dynamic field; its name is a `path_match` glob
    pub fn dynamic_field(mut self, field: Field) -> Self {
        self.dynamic_fields.push(field);
        self
    }

    pub fn build(self) -> Result<Document> {
        if self.doc_type.is_empty() {
            return Err(DslError::Validation(
                "document type name cannot be empty".to_string(),
            ));
        }

        for (i, field) in self.user_fields.iter().enumerate() {
            if field.name().is_empty() {
                return Err(DslError::Validation(format!(
                    "{}: field name cannot be empty",
                    self.doc_type
                )));
            }
            if self.user_fields[..i].iter().any(|f| f.name() == field.name()) {
                return Err(DslError::Validation(format!(
                    "{}: field `{}` is declared twice",
                    self.doc_type,
                    field.name()
                )));
            }
        }

        let path_matches = self
            .dynamic_fields
            .iter()
            .map(|template| glob_to_regex(template.name()).map(PathMatch))
            .collect::<Result<Vec<_>>>()?;

        let doc_type = self.doc_type;
        let user_fields = self
            .user_fields
            .into_iter()
            .map(|f| f.attached_to(&doc_type))
            .collect();

        Ok(Document {
            doc_type,
            dynamic: self.dynamic,
            mapping_options: self.mapping_options,
            mapping_fields: self.mapping_fields,
            user_fields,
            dynamic_fields: self.dynamic_fields,
            path_matches,
        })
    }
}

/// Convert a `path_match` glob into an anchored regex; only `*` is special
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut regex_pattern = String::with_capacity(pattern.len() + 2);
    regex_pattern.push('^');

    for ch in pattern.chars() {
        match ch {
            '*' => regex_pattern.push_str(".*"),
            '.' | '?' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
                regex_pattern.push('\\');
                regex_pattern.push(ch);
            }
            _ => regex_pattern.push(ch),
        }
    }

    regex_pattern.push('$');

    Regex::new(&regex_pattern)
        .map_err(|e| DslError::Validation(format!("invalid path_match pattern `{}`: {}", pattern, e)))
}
