//! Field references
//!
//! A `Field` is both the target of queries (`status = "active"`, sorting on
//! `created_at`) and the unit of an index mapping (declared type, multi-fields,
//! mapping options). Query builders hang off the field so that
//! `Field::new("age").gte(18)` reads like the filter it produces.

use indexmap::IndexMap;

use super::{
    FieldQuery, FieldQueryKind, QueryExpression, Range, RangeBuilder, Sort, Terms,
};
use crate::query::expr::Expr;
use crate::query::params::Params;
use crate::schema::FieldType;

/// Sub-field definitions indexing one value several ways
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MultiFields {
    #[default]
    None,
    /// Sub-field name to type
    Types(IndexMap<String, FieldType>),
    /// Fully specified sub-fields, with their own mapping options
    Fields(Vec<Field>),
}

impl MultiFields {
    pub fn is_empty(&self) -> bool {
        match self {
            MultiFields::None => true,
            MultiFields::Types(types) => types.is_empty(),
            MultiFields::Fields(fields) => fields.is_empty(),
        }
    }
}

/// Reference to a document field
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    sub_field: Option<String>,
    doc_type: Option<String>,
    field_type: FieldType,
    multi_fields: MultiFields,
    mapping_options: Params,
}

impl Field {
    /// Create an untyped field reference
    pub fn new(name: impl Into<String>) -> Self {
        Self::typed(name, FieldType::default())
    }

    /// Create a field with a declared type
    pub fn typed(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            sub_field: None,
            doc_type: None,
            field_type,
            multi_fields: MultiFields::None,
            mapping_options: Params::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted path used in queries, including the sub-field selector
    pub fn path(&self) -> String {
        match &self.sub_field {
            Some(sub) => format!("{}.{}", self.name, sub),
            None => self.name.clone(),
        }
    }

    pub fn sub_field(&self) -> Option<&str> {
        self.sub_field.as_deref()
    }

    /// Document type this field was resolved from, if any
    pub fn doc_type(&self) -> Option<&str> {
        self.doc_type.as_deref()
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn multi_fields(&self) -> &MultiFields {
        &self.multi_fields
    }

    pub fn mapping_options(&self) -> &Params {
        &self.mapping_options
    }

    /// Select a sub-field (e.g. the `raw` variant of an analyzed string)
    pub fn sub(&self, name: impl Into<String>) -> Self {
        Self {
            sub_field: Some(name.into()),
            ..self.clone()
        }
    }

    /// Bind this field to its owning document type
    pub fn attached_to(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Set the declared type
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Add a typed sub-field
    pub fn with_multi_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        match &mut self.multi_fields {
            MultiFields::Fields(fields) => fields.push(Field::typed(name, field_type)),
            MultiFields::Types(types) => {
                types.insert(name.into(), field_type);
            }
            MultiFields::None => {
                let mut types = IndexMap::new();
                types.insert(name.into(), field_type);
                self.multi_fields = MultiFields::Types(types);
            }
        }
        self
    }

    /// Replace sub-field definitions
    pub fn with_multi_fields(mut self, multi_fields: MultiFields) -> Self {
        self.multi_fields = multi_fields;
        self
    }

    /// Add a mapping option (`analyzer`, `index`, `format`, ...)
    pub fn with_mapping_option(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.mapping_options.insert(key, value);
        self
    }

    pub fn term(&self, value: impl Into<Expr>) -> FieldQuery {
        FieldQuery::new(FieldQueryKind::Term, self, value)
    }

    pub fn terms<T: Into<Expr>>(&self, values: impl IntoIterator<Item = T>) -> Terms {
        Terms::new(self, values)
    }

    pub fn match_query(&self, query: impl Into<Expr>) -> FieldQuery {
        FieldQuery::new(FieldQueryKind::Match, self, query)
    }

    pub fn match_phrase(&self, query: impl Into<Expr>) -> FieldQuery {
        FieldQuery::new(FieldQueryKind::MatchPhrase, self, query)
    }

    pub fn prefix(&self, value: impl Into<Expr>) -> FieldQuery {
        FieldQuery::new(FieldQueryKind::Prefix, self, value)
    }

    pub fn wildcard(&self, pattern: impl Into<Expr>) -> FieldQuery {
        FieldQuery::new(FieldQueryKind::Wildcard, self, pattern)
    }

    pub fn regexp(&self, pattern: impl Into<Expr>) -> FieldQuery {
        FieldQuery::new(FieldQueryKind::Regexp, self, pattern)
    }

    pub fn fuzzy(&self, value: impl Into<Expr>) -> FieldQuery {
        FieldQuery::new(FieldQueryKind::Fuzzy, self, value)
    }

    /// Start a range over this field
    pub fn range(&self) -> RangeBuilder {
        Range::builder(self)
    }

    pub fn gte(&self, value: impl Into<Expr>) -> Range {
        Range::bounded(self, "gte", value)
    }

    pub fn gt(&self, value: impl Into<Expr>) -> Range {
        Range::bounded(self, "gt", value)
    }

    pub fn lte(&self, value: impl Into<Expr>) -> Range {
        Range::bounded(self, "lte", value)
    }

    pub fn lt(&self, value: impl Into<Expr>) -> Range {
        Range::bounded(self, "lt", value)
    }

    pub fn exists(&self) -> QueryExpression {
        QueryExpression::exists(self)
    }

    pub fn missing(&self) -> QueryExpression {
        QueryExpression::missing(self)
    }

    pub fn asc(&self) -> Sort {
        Sort::new(self).asc()
    }

    pub fn desc(&self) -> Sort {
        Sort::new(self).desc()
    }

    /// Weighted field reference (`title^2`) for multi-field queries
    pub fn boost(&self, weight: f64) -> BoostExpression {
        BoostExpression::new(self, weight)
    }
}

/// `expr^weight` notation used in field lists
#[derive(Clone, Debug, PartialEq)]
pub struct BoostExpression {
    pub expr: Expr,
    pub weight: Expr,
}

impl BoostExpression {
    pub fn new(expr: impl Into<Expr>, weight: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            weight: weight.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_with_sub_field() {
        let name = Field::new("name");
        assert_eq!(name.path(), "name");
        assert_eq!(name.sub("raw").path(), "name.raw");
        assert_eq!(name.sub("raw").name(), "name");
    }

    #[test]
    fn test_attached_field_keeps_name() {
        let field = Field::new("status").attached_to("product");
        assert_eq!(field.doc_type(), Some("product"));
        assert_eq!(field.path(), "status");
    }

    #[test]
    fn test_multi_field_accumulates() {
        let field = Field::typed("name", FieldType::String)
            .with_multi_field("raw", FieldType::Keyword)
            .with_multi_field("en", FieldType::Text);

        match field.multi_fields() {
            MultiFields::Types(types) => {
                let names: Vec<&String> = types.keys().collect();
                assert_eq!(names, vec!["raw", "en"]);
            }
            other => panic!("unexpected multi fields: {:?}", other),
        }
    }

    #[test]
    fn test_default_type() {
        assert_eq!(Field::new("x").field_type(), &FieldType::String);
        assert!(Field::new("x").multi_fields().is_empty());
    }
}
