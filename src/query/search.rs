//! Search request container
//!
//! `SearchQuery` gathers every part of a search body. Builder methods consume
//! and return the query, so a base query can be cloned and refined without
//! affecting other users of it.
//!
//! A query carries the [`CompilerConfig`] that [`SearchQuery::to_body`]
//! compiles it with. Queries started from an [`Index`](crate::schema::Index)
//! inherit the index's compiler settings.

use serde_json::Value;

use super::expr::Expr;
use super::nodes::{Aggregation, Aggregations, BooleanExpression, QueryExpression, QueryRescorer, Source};
use crate::compiler::QueryCompiler;
use crate::config::CompilerConfig;
use crate::Result;

/// Search request under construction
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchQuery {
    query: Option<Expr>,
    filters: Vec<Expr>,
    post_filters: Vec<Expr>,
    order_by: Vec<Expr>,
    source: Option<Source>,
    aggregations: Aggregations,
    limit: Option<u64>,
    offset: Option<u64>,
    rescores: Vec<QueryRescorer>,
    config: CompilerConfig,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoring query
    pub fn query(mut self, query: impl Into<Expr>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Add a filter; multiple filters are joined with `and`
    pub fn filter(mut self, filter: impl Into<Expr>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Add a post filter, applied after aggregations are computed
    pub fn post_filter(mut self, filter: impl Into<Expr>) -> Self {
        self.post_filters.push(filter.into());
        self
    }

    /// Append a sort clause (a [`Sort`](super::nodes::Sort) or a bare field)
    pub fn order_by(mut self, sort: impl Into<Expr>) -> Self {
        self.order_by.push(sort.into());
        self
    }

    pub fn source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Add a named top-level aggregation
    pub fn aggregation(mut self, name: impl Into<String>, agg: impl Into<Aggregation>) -> Self {
        self.aggregations.insert(name.into(), agg.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn rescore(mut self, rescorer: QueryRescorer) -> Self {
        self.rescores.push(rescorer);
        self
    }

    /// Compiler settings used by [`to_body`](Self::to_body)
    pub fn with_compiler_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn get_query(&self) -> Option<&Expr> {
        self.query.as_ref()
    }

    pub fn get_order_by(&self) -> &[Expr] {
        &self.order_by
    }

    pub fn get_source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn get_aggregations(&self) -> &Aggregations {
        &self.aggregations
    }

    pub fn get_limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn get_rescores(&self) -> &[QueryRescorer] {
        &self.rescores
    }

    pub fn get_compiler_config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Query with the accumulated filters applied
    ///
    /// Without filters this is the plain query; with filters it is a
    /// `filtered` query whose query part is omitted when none was set.
    pub fn get_filtered_query(&self) -> Option<Expr> {
        match Self::join_filters(&self.filters) {
            Some(filter) => Some(QueryExpression::filtered(self.query.clone(), filter).into()),
            None => self.query.clone(),
        }
    }

    /// Accumulated post filters joined into one expression
    pub fn get_post_filter(&self) -> Option<Expr> {
        Self::join_filters(&self.post_filters)
    }

    fn join_filters(filters: &[Expr]) -> Option<Expr> {
        match filters {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(BooleanExpression::and(many.iter().cloned()).into()),
        }
    }

    /// Compile into a search request body with the query's compiler settings
    pub fn to_body(&self) -> Result<Value> {
        QueryCompiler::new(self.config.clone()).compile_search(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DepthProfile;
    use crate::error::DslError;
    use crate::query::ast::Node;
    use crate::query::nodes::{Field, NotExpression};

    #[test]
    fn test_search_query_default() {
        let q = SearchQuery::new();
        assert!(q.get_filtered_query().is_none());
        assert!(q.get_post_filter().is_none());
        assert!(q.get_limit().is_none());
    }

    #[test]
    fn test_builders_do_not_affect_clones() {
        let base = SearchQuery::new().filter(Field::new("status").term("active"));
        let paged = base.clone().limit(10).offset(20);

        assert_eq!(base.get_limit(), None);
        assert_eq!(paged.get_limit(), Some(10));
        assert_eq!(paged.get_offset(), Some(20));
    }

    #[test]
    fn test_multiple_filters_are_joined() {
        let q = SearchQuery::new()
            .filter(Field::new("status").term("active"))
            .filter(Field::new("age").gte(18));

        let filtered = q.get_filtered_query().unwrap();
        match filtered.as_node() {
            Some(Node::QueryExpression(expr)) => {
                assert_eq!(expr.name, "filtered");
                assert!(!expr.params.contains_key("query"));
                match expr.params.get("filter").and_then(Expr::as_node) {
                    Some(Node::Boolean(b)) => assert_eq!(b.len(), 2),
                    other => panic!("expected and filter, got {:?}", other),
                }
            }
            other => panic!("expected filtered query, got {:?}", other),
        }
    }

    #[test]
    fn test_query_without_filters_is_returned_as_is() {
        let query: Expr = Field::new("title").match_query("rust").into();
        let q = SearchQuery::new().query(query.clone());
        assert_eq!(q.get_filtered_query(), Some(query));
    }

    #[test]
    fn test_to_body_uses_compiler_config() {
        let mut filter: Expr = Field::new("deleted").term(true).into();
        for _ in 0..40 {
            filter = NotExpression::new(filter).into();
        }
        let q = SearchQuery::new().filter(filter);
        assert!(q.to_body().is_ok());

        let shallow = CompilerConfig::default().with_profile(DepthProfile::Shallow);
        let strict = q.clone().with_compiler_config(shallow.clone());
        assert_eq!(strict.get_compiler_config(), &shallow);
        assert!(matches!(
            strict.to_body(),
            Err(DslError::DepthExceeded { limit: 32 })
        ));
    }
}
