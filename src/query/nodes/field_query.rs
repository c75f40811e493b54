//! Single-field queries - term, match, prefix, wildcard and friends
//!
//! All of these share one wire shape. Without parameters the short form is
//! used:
//!
//! ```json
//! { "term": { "status": "active" } }
//! ```
//!
//! With parameters the value moves under the kind's query key:
//!
//! ```json
//! { "term": { "status": { "value": "active", "boost": 2.0 } } }
//! ```

use crate::query::expr::Expr;
use crate::query::params::Params;
use crate::query::types::MatchOperator;

/// Which single-field query to emit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldQueryKind {
    Term,
    Match,
    MatchPhrase,
    MatchPhrasePrefix,
    Prefix,
    Wildcard,
    Regexp,
    Fuzzy,
    Common,
}

impl FieldQueryKind {
    /// Top-level key of the query object
    pub fn query_name(&self) -> &'static str {
        match self {
            FieldQueryKind::Term => "term",
            FieldQueryKind::Match => "match",
            FieldQueryKind::MatchPhrase => "match_phrase",
            FieldQueryKind::MatchPhrasePrefix => "match_phrase_prefix",
            FieldQueryKind::Prefix => "prefix",
            FieldQueryKind::Wildcard => "wildcard",
            FieldQueryKind::Regexp => "regexp",
            FieldQueryKind::Fuzzy => "fuzzy",
            FieldQueryKind::Common => "common",
        }
    }

    /// Key holding the query value in the long form
    pub fn query_key(&self) -> &'static str {
        match self {
            FieldQueryKind::Match
            | FieldQueryKind::MatchPhrase
            | FieldQueryKind::MatchPhrasePrefix
            | FieldQueryKind::Common => "query",
            FieldQueryKind::Term
            | FieldQueryKind::Prefix
            | FieldQueryKind::Wildcard
            | FieldQueryKind::Regexp
            | FieldQueryKind::Fuzzy => "value",
        }
    }
}

/// Query against a single field
#[derive(Clone, Debug, PartialEq)]
pub struct FieldQuery {
    pub kind: FieldQueryKind,
    pub field: Expr,
    pub query: Expr,
    pub params: Params,
}

impl FieldQuery {
    pub fn new(kind: FieldQueryKind, field: impl Into<Expr>, query: impl Into<Expr>) -> Self {
        Self {
            kind,
            field: field.into(),
            query: query.into(),
            params: Params::new(),
        }
    }

    /// Add a field-level parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Merge field-level parameters
    pub fn with_params(mut self, params: Params) -> Self {
        self.params.merge(params);
        self
    }

    pub fn with_boost(self, boost: f64) -> Self {
        self.with_param("boost", boost)
    }

    pub fn with_operator(self, operator: MatchOperator) -> Self {
        self.with_param("operator", operator)
    }

    pub fn with_analyzer(self, analyzer: impl Into<String>) -> Self {
        self.with_param("analyzer", analyzer.into())
    }

    /// Whether this query serializes in the long (parameterized) form
    pub fn is_long_form(&self) -> bool {
        !self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::Field;

    #[test]
    fn test_query_keys() {
        assert_eq!(FieldQueryKind::Term.query_key(), "value");
        assert_eq!(FieldQueryKind::Match.query_key(), "query");
        assert_eq!(FieldQueryKind::MatchPhrasePrefix.query_name(), "match_phrase_prefix");
    }

    #[test]
    fn test_long_form_selection() {
        let short = Field::new("title").match_query("rust");
        assert!(!short.is_long_form());

        let long = short.clone().with_operator(MatchOperator::And);
        assert!(long.is_long_form());
        assert_eq!(long.params.get("operator"), Some(&Expr::from("and")));
        // builders never touch the original
        assert!(short.params.is_empty());
    }
}
