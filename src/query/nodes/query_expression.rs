//! Named query expressions of the form `{ name: { ...params } }`
//!
//! Most compound queries and filters (`bool`, `dis_max`, `nested`,
//! `constant_score`, `exists`, ...) have no serialization quirks beyond
//! "name wrapping parameters", so they share one node type with a set of
//! constructors.

use crate::query::expr::Expr;
use crate::query::params::Params;
use crate::query::types::MinimumShouldMatch;

/// Generic `{name: params}` query or filter
#[derive(Clone, Debug, PartialEq)]
pub struct QueryExpression {
    pub name: String,
    pub params: Params,
}

impl QueryExpression {
    pub fn new(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn match_all() -> Self {
        Self::new("match_all", Params::new())
    }

    pub fn exists(field: impl Into<Expr>) -> Self {
        Self::new("exists", Params::new().with("field", field))
    }

    pub fn missing(field: impl Into<Expr>) -> Self {
        Self::new("missing", Params::new().with("field", field))
    }

    pub fn ids<T: Into<Expr>>(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<Expr> = values.into_iter().map(Into::into).collect();
        Self::new("ids", Params::new().with("values", values))
    }

    /// Per-shard document limit filter
    pub fn limit(value: u64) -> Self {
        Self::new("limit", Params::new().with("value", value))
    }

    /// Query restricted by a filter; the query part is optional
    pub fn filtered(query: Option<Expr>, filter: impl Into<Expr>) -> Self {
        let mut params = Params::new();
        if let Some(query) = query {
            params.insert("query", query);
        }
        params.insert("filter", filter);
        Self::new("filtered", params)
    }

    pub fn dis_max<T: Into<Expr>>(queries: impl IntoIterator<Item = T>) -> Self {
        let queries: Vec<Expr> = queries.into_iter().map(Into::into).collect();
        Self::new("dis_max", Params::new().with("queries", queries))
    }

    /// Constant score wrapper around a filter
    pub fn constant_score(filter: impl Into<Expr>) -> Self {
        Self::new("constant_score", Params::new().with("filter", filter))
    }

    /// Constant score wrapper around a query
    pub fn constant_score_query(query: impl Into<Expr>) -> Self {
        Self::new("constant_score", Params::new().with("query", query))
    }

    pub fn nested(path: impl Into<Expr>, query: impl Into<Expr>) -> Self {
        Self::new(
            "nested",
            Params::new().with("path", path).with("query", query),
        )
    }

    pub fn has_parent(parent_type: impl Into<String>, query: impl Into<Expr>) -> Self {
        Self::new(
            "has_parent",
            Params::new()
                .with("parent_type", parent_type.into())
                .with("query", query),
        )
    }

    pub fn has_child(child_type: impl Into<String>, query: impl Into<Expr>) -> Self {
        Self::new(
            "has_child",
            Params::new()
                .with("type", child_type.into())
                .with("query", query),
        )
    }

    pub fn boosting(
        positive: impl Into<Expr>,
        negative: impl Into<Expr>,
        negative_boost: f64,
    ) -> Self {
        Self::new(
            "boosting",
            Params::new()
                .with("positive", positive)
                .with("negative", negative)
                .with("negative_boost", negative_boost),
        )
    }

    /// Function score query; each function is given as its own parameter map
    pub fn function_score(query: impl Into<Expr>, functions: Vec<Params>) -> Self {
        let functions: Vec<Expr> = functions.into_iter().map(Expr::Map).collect();
        Self::new(
            "function_score",
            Params::new()
                .with("query", query)
                .with("functions", functions),
        )
    }
}

/// Boolean query combining multiple clauses
///
/// ```json
/// {
///   "bool": {
///     "must": [ { "match": { "content": "rust programming" } } ],
///     "filter": [ { "range": { "year": { "gte": 2015 } } } ],
///     "should": [ { "term": { "tags": "tutorial" } } ],
///     "must_not": [ { "term": { "status": "draft" } } ],
///     "minimum_should_match": 1
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoolQuery {
    /// Clauses that must match (AND, scoring)
    pub must: Vec<Expr>,
    /// Clauses that must match (AND, no scoring)
    pub filter: Vec<Expr>,
    /// Clauses where at least one should match (OR, scoring)
    pub should: Vec<Expr>,
    /// Clauses that must not match (NOT, no scoring)
    pub must_not: Vec<Expr>,
    pub minimum_should_match: Option<MinimumShouldMatch>,
    pub boost: Option<f64>,
}

impl BoolQuery {
    /// Create a new empty boolean query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a must clause
    pub fn must(mut self, query: impl Into<Expr>) -> Self {
        self.must.push(query.into());
        self
    }

    /// Add a filter clause
    pub fn filter(mut self, query: impl Into<Expr>) -> Self {
        self.filter.push(query.into());
        self
    }

    /// Add a should clause
    pub fn should(mut self, query: impl Into<Expr>) -> Self {
        self.should.push(query.into());
        self
    }

    /// Add a must_not clause
    pub fn must_not(mut self, query: impl Into<Expr>) -> Self {
        self.must_not.push(query.into());
        self
    }

    /// Set minimum should match
    pub fn with_minimum_should_match(mut self, msm: MinimumShouldMatch) -> Self {
        self.minimum_should_match = Some(msm);
        self
    }

    /// Set boost factor
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Check if this is an empty query
    pub fn is_empty(&self) -> bool {
        self.clause_count() == 0
    }

    /// Get total number of clauses
    pub fn clause_count(&self) -> usize {
        self.must.len() + self.filter.len() + self.should.len() + self.must_not.len()
    }
}

impl From<BoolQuery> for QueryExpression {
    fn from(q: BoolQuery) -> Self {
        let mut params = Params::new();
        if !q.must.is_empty() {
            params.insert("must", q.must);
        }
        if !q.filter.is_empty() {
            params.insert("filter", q.filter);
        }
        if !q.should.is_empty() {
            params.insert("should", q.should);
        }
        if !q.must_not.is_empty() {
            params.insert("must_not", q.must_not);
        }
        if let Some(msm) = q.minimum_should_match {
            params.insert("minimum_should_match", msm);
        }
        if let Some(boost) = q.boost {
            params.insert("boost", boost);
        }
        QueryExpression::new("bool", params)
    }
}

impl From<BoolQuery> for Expr {
    fn from(q: BoolQuery) -> Self {
        Expr::from(QueryExpression::from(q))
    }
}

/// A query used where a filter is expected
///
/// Compiles to `{"query": q}`, or to `{"fquery": {"query": q, ...params}}`
/// when parameters such as `_cache` are present.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedQuery {
    pub query: Expr,
    pub params: Params,
}

impl WrappedQuery {
    pub fn new(query: impl Into<Expr>) -> Self {
        Self {
            query: query.into(),
            params: Params::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }
}
