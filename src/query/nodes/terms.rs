//! Multi-value queries - `terms` and `multi_match`

use crate::query::expr::Expr;
use crate::query::params::Params;

/// Query that matches documents containing any of the specified terms in a field
///
/// ```json
/// { "terms": { "tags": ["rust", "search"], "execution": "bool" } }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Terms {
    pub field: Expr,
    pub terms: Vec<Expr>,
    /// Parameters placed beside the field
    pub params: Params,
}

impl Terms {
    pub fn new<T: Into<Expr>>(field: impl Into<Expr>, terms: impl IntoIterator<Item = T>) -> Self {
        Self {
            field: field.into(),
            terms: terms.into_iter().map(Into::into).collect(),
            params: Params::new(),
        }
    }

    /// Add a term to the query
    pub fn add_term(mut self, term: impl Into<Expr>) -> Self {
        self.terms.push(term.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn with_boost(self, boost: f64) -> Self {
        self.with_param("boost", boost)
    }
}

/// Full-text query over several fields
///
/// ```json
/// { "multi_match": { "query": "rust", "fields": ["title^2", "body"], "type": "best_fields" } }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MultiMatch {
    pub query: Expr,
    pub fields: Vec<Expr>,
    pub params: Params,
}

impl MultiMatch {
    pub fn new<T: Into<Expr>>(query: impl Into<Expr>, fields: impl IntoIterator<Item = T>) -> Self {
        Self {
            query: query.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            params: Params::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Set the multi_match `type` (best_fields, most_fields, cross_fields, ...)
    pub fn with_type(self, match_type: impl Into<String>) -> Self {
        self.with_param("type", match_type.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::Field;

    #[test]
    fn test_terms_creation() {
        let terms = Field::new("tags").terms(["rust", "search"]).add_term("dsl");
        assert_eq!(terms.terms.len(), 3);
        assert!(terms.params.is_empty());
    }

    #[test]
    fn test_multi_match_fields_accept_boosts() {
        let title = Field::new("title");
        let mm = MultiMatch::new(
            "rust",
            vec![Expr::from(title.boost(2.0)), Expr::from(Field::new("body"))],
        )
        .with_type("best_fields");
        assert_eq!(mm.fields.len(), 2);
        assert_eq!(mm.params.get("type"), Some(&Expr::from("best_fields")));
    }
}
