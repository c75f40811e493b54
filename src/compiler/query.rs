//! Search request dialect
//!
//! Produces the request body sent to the engine's `_search` endpoint. Filters
//! use the 1.x `filtered` query with `and`/`or`/`not` combinators.

use serde_json::{Map, Value};
use tracing::debug;

use super::{float_value, into_key, single, Compiler};
use crate::config::CompilerConfig;
use crate::query::{
    Aggregation, Aggregations, BooleanExpression, BoostExpression, FieldQuery, FilterAgg,
    MultiMatch, Node, NotExpression, Params, QueryExpression, QueryRescorer, Range, SearchQuery,
    Sort, Source, Terms, WrappedQuery,
};
use crate::Result;

/// Compiler for search request bodies
#[derive(Clone, Debug, Default)]
pub struct QueryCompiler {
    config: CompilerConfig,
}

impl QueryCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Compile a full search request body
    pub fn compile_search(&self, query: &SearchQuery) -> Result<Value> {
        let body = self.visit_search(query, self.enter(0)?)?;
        debug!(
            keys = body.as_object().map(|b| b.len()).unwrap_or(0),
            "compiled search body"
        );
        Ok(body)
    }

    /// Compile a standalone aggregation container
    pub fn compile_aggregations(&self, aggregations: &Aggregations) -> Result<Value> {
        Ok(Value::Object(self.visit_aggregations(aggregations, 0)?))
    }

    fn visit_boost(&self, boost: &BoostExpression, depth: usize) -> Result<Value> {
        let target = self.visit_key(&boost.expr, depth)?;
        let weight = match self.visit(&boost.weight, depth)? {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(Value::String(format!("{}^{}", target, weight)))
    }

    fn visit_field_query(&self, query: &FieldQuery, depth: usize) -> Result<Value> {
        let name = query.kind.query_name();
        let field = self.visit_key(&query.field, depth)?;
        let value = self
            .visit(&query.query, depth)
            .map_err(|e| e.at_key(&field).at_key(name))?;

        let body = if query.params.is_empty() {
            value
        } else {
            let mut body = Map::new();
            body.insert(query.kind.query_key().to_string(), value);
            body.extend(
                self.visit_params(&query.params, depth)
                    .map_err(|e| e.at_key(&field).at_key(name))?,
            );
            Value::Object(body)
        };
        Ok(single(name, single(field, body)))
    }

    fn visit_query_expression(&self, query: &QueryExpression, depth: usize) -> Result<Value> {
        let params = self
            .visit_params(&query.params, depth)
            .map_err(|e| e.at_key(&query.name))?;
        Ok(single(query.name.clone(), Value::Object(params)))
    }

    fn visit_range(&self, range: &Range, depth: usize) -> Result<Value> {
        let field = self.visit_key(&range.field, depth)?;
        let mut body = self
            .visit_params(&range.range_params, depth)
            .map_err(|e| e.at_key("range"))?;
        let bounds = self
            .visit_params(&range.params, depth)
            .map_err(|e| e.at_key(&field).at_key("range"))?;
        // field-level entry replaces a query-level key of the same name
        body.insert(field, Value::Object(bounds));
        Ok(single("range", Value::Object(body)))
    }

    fn visit_terms(&self, terms: &Terms, depth: usize) -> Result<Value> {
        let field = self.visit_key(&terms.field, depth)?;
        let values = self
            .visit_list(&terms.terms, depth)
            .map_err(|e| e.at_key(&field).at_key("terms"))?;

        let mut body = Map::new();
        body.insert(field, Value::Array(values));
        body.extend(
            self.visit_params(&terms.params, depth)
                .map_err(|e| e.at_key("terms"))?,
        );
        Ok(single("terms", Value::Object(body)))
    }

    fn visit_multi_match(&self, query: &MultiMatch, depth: usize) -> Result<Value> {
        let mut body = Map::new();
        body.insert("query".to_string(), self.visit(&query.query, depth)?);
        body.insert(
            "fields".to_string(),
            Value::Array(self.visit_list(&query.fields, depth)?),
        );
        body.extend(self.visit_params(&query.params, depth)?);
        Ok(single("multi_match", Value::Object(body)))
    }

    fn visit_wrapped_query(&self, query: &WrappedQuery, depth: usize) -> Result<Value> {
        let mut body = Map::new();
        body.insert("query".to_string(), self.visit(&query.query, depth)?);
        if query.params.is_empty() {
            return Ok(Value::Object(body));
        }
        body.extend(self.visit_params(&query.params, depth)?);
        Ok(single("fquery", Value::Object(body)))
    }

    fn visit_boolean(&self, expr: &BooleanExpression, depth: usize) -> Result<Value> {
        let key = expr.operator.as_str();
        let filters = Value::Array(
            self.visit_list(&expr.expressions, depth)
                .map_err(|e| e.at_key(key))?,
        );
        if expr.params.is_empty() {
            return Ok(single(key, filters));
        }

        let mut body = Map::new();
        body.insert("filters".to_string(), filters);
        body.extend(self.visit_params(&expr.params, depth)?);
        Ok(single(key, Value::Object(body)))
    }

    fn visit_not(&self, expr: &NotExpression, depth: usize) -> Result<Value> {
        let filter = self.visit(&expr.expr, depth).map_err(|e| e.at_key("not"))?;
        if expr.params.is_empty() {
            return Ok(single("not", filter));
        }

        let mut body = Map::new();
        body.insert("filter".to_string(), filter);
        body.extend(self.visit_params(&expr.params, depth)?);
        Ok(single("not", Value::Object(body)))
    }

    fn visit_sort(&self, sort: &Sort, depth: usize) -> Result<Value> {
        let target = self.visit(&sort.expr, depth)?;
        if !sort.params.is_empty() {
            let mut body = Map::new();
            if let Some(order) = sort.order {
                body.insert("order".to_string(), order.as_str().into());
            }
            body.extend(self.visit_params(&sort.params, depth)?);
            return Ok(single(into_key(target)?, Value::Object(body)));
        }
        match sort.order {
            Some(order) => Ok(single(into_key(target)?, order.as_str().into())),
            None => Ok(target),
        }
    }

    fn visit_aggregation(&self, agg: &Aggregation, depth: usize) -> Result<Value> {
        match agg {
            Aggregation::Metric(metric) => {
                let params = self.visit_params(&metric.params, depth)?;
                Ok(single(metric.name.clone(), Value::Object(params)))
            }
            Aggregation::Bucket(bucket) => self
                .visit_bucket(&bucket.name, &bucket.params, &bucket.aggregations, depth)
                .map(Value::Object),
            Aggregation::Filter(filter) => {
                let mut body =
                    self.visit_bucket(FilterAgg::NAME, &Params::new(), &filter.aggregations, depth)?;
                let compiled = self
                    .visit(&filter.filter, depth)
                    .map_err(|e| e.at_key(FilterAgg::NAME))?;
                body.insert(FilterAgg::NAME.to_string(), compiled);
                Ok(Value::Object(body))
            }
        }
    }

    fn visit_bucket(
        &self,
        name: &str,
        params: &Params,
        aggregations: &Aggregations,
        depth: usize,
    ) -> Result<Map<String, Value>> {
        let mut body = Map::new();
        body.insert(
            name.to_string(),
            Value::Object(self.visit_params(params, depth)?),
        );
        if !aggregations.is_empty() {
            let nested = self
                .visit_aggregations(aggregations, depth)
                .map_err(|e| e.at_key("aggregations"))?;
            body.insert("aggregations".to_string(), Value::Object(nested));
        }
        Ok(body)
    }

    fn visit_aggregations(
        &self,
        aggregations: &Aggregations,
        depth: usize,
    ) -> Result<Map<String, Value>> {
        let depth = self.enter(depth)?;
        let mut out = Map::with_capacity(aggregations.len());
        for (name, agg) in aggregations {
            let compiled = self
                .visit_aggregation(agg, depth)
                .map_err(|e| e.at_key(name))?;
            out.insert(name.clone(), compiled);
        }
        Ok(out)
    }

    fn visit_source(&self, source: &Source, depth: usize) -> Result<Value> {
        match source {
            Source::Disabled => Ok(Value::Bool(false)),
            Source::Fields(fields) => Ok(Value::Array(self.visit_list(fields, depth)?)),
            Source::Filter { include, exclude } => {
                let mut body = Map::new();
                if !include.is_empty() {
                    let include = self
                        .visit_list(include, depth)
                        .map_err(|e| e.at_key("include"))?;
                    body.insert("include".to_string(), Value::Array(include));
                }
                if !exclude.is_empty() {
                    let exclude = self
                        .visit_list(exclude, depth)
                        .map_err(|e| e.at_key("exclude"))?;
                    body.insert("exclude".to_string(), Value::Array(exclude));
                }
                Ok(Value::Object(body))
            }
        }
    }

    fn visit_rescore(&self, rescorer: &QueryRescorer, depth: usize) -> Result<Value> {
        let mut query = Map::new();
        query.insert(
            "rescore_query".to_string(),
            self.visit(&rescorer.query, depth)
                .map_err(|e| e.at_key("rescore_query"))?,
        );
        if let Some(weight) = rescorer.query_weight {
            query.insert("query_weight".to_string(), float_value(weight)?);
        }
        if let Some(weight) = rescorer.rescore_query_weight {
            query.insert("rescore_query_weight".to_string(), float_value(weight)?);
        }
        if let Some(mode) = rescorer.score_mode {
            query.insert("score_mode".to_string(), mode.as_str().into());
        }

        let mut body = Map::new();
        body.insert("query".to_string(), Value::Object(query));
        if let Some(window_size) = rescorer.window_size {
            body.insert("window_size".to_string(), window_size.into());
        }
        Ok(Value::Object(body))
    }

    fn visit_search(&self, search: &SearchQuery, depth: usize) -> Result<Value> {
        let mut body = Map::new();

        if let Some(query) = search.get_filtered_query() {
            let query = self.visit(&query, depth).map_err(|e| e.at_key("query"))?;
            body.insert("query".to_string(), query);
        }

        if !search.get_order_by().is_empty() {
            let sort = self
                .visit_list(search.get_order_by(), depth)
                .map_err(|e| e.at_key("sort"))?;
            body.insert("sort".to_string(), Value::Array(sort));
        }

        if let Some(source) = search.get_source().filter(|s| !s.is_empty()) {
            let source = self
                .visit_source(source, self.enter(depth)?)
                .map_err(|e| e.at_key("_source"))?;
            body.insert("_source".to_string(), source);
        }

        if !search.get_aggregations().is_empty() {
            let aggregations = self
                .visit_aggregations(search.get_aggregations(), depth)
                .map_err(|e| e.at_key("aggregations"))?;
            body.insert("aggregations".to_string(), Value::Object(aggregations));
        }

        if let Some(limit) = search.get_limit() {
            body.insert("size".to_string(), limit.into());
        }
        if let Some(offset) = search.get_offset() {
            body.insert("from".to_string(), offset.into());
        }

        if !search.get_rescores().is_empty() {
            let depth = self.enter(depth)?;
            let rescores = search
                .get_rescores()
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    self.visit_rescore(r, depth)
                        .map_err(|e| e.at_index(i).at_key("rescore"))
                })
                .collect::<Result<Vec<_>>>()?;
            body.insert("rescore".to_string(), Value::Array(rescores));
        }

        if let Some(post_filter) = search.get_post_filter() {
            let post_filter = self
                .visit(&post_filter, depth)
                .map_err(|e| e.at_key("post_filter"))?;
            body.insert("post_filter".to_string(), post_filter);
        }

        Ok(Value::Object(body))
    }
}

impl Compiler for QueryCompiler {
    const DIALECT: &'static str = "query";

    fn config(&self) -> &CompilerConfig {
        &self.config
    }

    fn visit_node(&self, node: &Node, depth: usize) -> Result<Value> {
        match node {
            Node::Field(field) => Ok(Value::String(field.path())),
            Node::MappingField(field) => Ok(Value::String(field.name().to_string())),
            Node::Boost(boost) => self.visit_boost(boost, depth),
            Node::FieldQuery(query) => self.visit_field_query(query, depth),
            Node::QueryExpression(query) => self.visit_query_expression(query, depth),
            Node::Range(range) => self.visit_range(range, depth),
            Node::Terms(terms) => self.visit_terms(terms, depth),
            Node::MultiMatch(query) => self.visit_multi_match(query, depth),
            Node::Query(query) => self.visit_wrapped_query(query, depth),
            Node::Boolean(expr) => self.visit_boolean(expr, depth),
            Node::Not(expr) => self.visit_not(expr, depth),
            Node::Sort(sort) => self.visit_sort(sort, depth),
            Node::Aggregation(agg) => self.visit_aggregation(agg, depth),
            Node::Source(source) => self.visit_source(source, depth),
            Node::Rescore(rescorer) => self.visit_rescore(rescorer, depth),
            Node::Search(search) => self.visit_search(search, depth),
            Node::Document(_) => Err(self.unsupported(node)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DslError;
    use crate::query::{Expr, Field, MatchOperator, SortOrder};
    use serde_json::json;

    fn compile(expr: impl Into<Expr>) -> Value {
        QueryCompiler::default().compile(&expr.into()).unwrap()
    }

    #[test]
    fn test_field_compiles_to_path() {
        assert_eq!(compile(Field::new("name").sub("raw")), json!("name.raw"));
    }

    #[test]
    fn test_boost_expression() {
        assert_eq!(compile(Field::new("title").boost(2.0)), json!("title^2.0"));
        assert_eq!(
            compile(BoostExpression::new(Field::new("title"), 3)),
            json!("title^3")
        );
    }

    #[test]
    fn test_field_query_short_and_long_form() {
        assert_eq!(
            compile(Field::new("status").term("active")),
            json!({"term": {"status": "active"}})
        );
        assert_eq!(
            compile(
                Field::new("title")
                    .match_query("quick fox")
                    .with_operator(MatchOperator::And)
                    .with_boost(2.0)
            ),
            json!({"match": {"title": {"query": "quick fox", "operator": "and", "boost": 2.0}}})
        );
        assert_eq!(
            compile(Field::new("name").prefix("jo").with_boost(1.5)),
            json!({"prefix": {"name": {"value": "jo", "boost": 1.5}}})
        );
    }

    #[test]
    fn test_range_levels() {
        let range = Field::new("age")
            .gte(18)
            .lt(65)
            .with_range_param("_cache", true);
        assert_eq!(
            compile(range),
            json!({"range": {"_cache": true, "age": {"gte": 18, "lt": 65}}})
        );
    }

    #[test]
    fn test_range_field_level_wins_on_collision() {
        let range = Field::new("age").gte(18).with_range_param("age", "ignored");
        assert_eq!(compile(range), json!({"range": {"age": {"gte": 18}}}));
    }

    #[test]
    fn test_terms_and_multi_match() {
        assert_eq!(
            compile(Field::new("tags").terms(["a", "b"]).with_param("execution", "or")),
            json!({"terms": {"tags": ["a", "b"], "execution": "or"}})
        );
        assert_eq!(
            compile(MultiMatch::new("fox", [Field::new("title").boost(2.0), Field::new("body").boost(1.0)])),
            json!({"multi_match": {"query": "fox", "fields": ["title^2.0", "body^1.0"]}})
        );
    }

    #[test]
    fn test_wrapped_query_uses_fquery_with_params() {
        let inner = Field::new("title").match_query("fox");
        assert_eq!(
            compile(WrappedQuery::new(inner.clone())),
            json!({"query": {"match": {"title": "fox"}}})
        );
        assert_eq!(
            compile(WrappedQuery::new(inner).with_param("_cache", true)),
            json!({"fquery": {"query": {"match": {"title": "fox"}}, "_cache": true}})
        );
    }

    #[test]
    fn test_boolean_and_not() {
        let a = Field::new("a").term(1);
        let b = Field::new("b").term(2);

        assert_eq!(
            compile(a.clone() & b.clone()),
            json!({"and": [{"term": {"a": 1}}, {"term": {"b": 2}}]})
        );
        assert_eq!(
            compile(BooleanExpression::or([a.clone(), b]).with_param("_cache", true)),
            json!({"or": {"filters": [{"term": {"a": 1}}, {"term": {"b": 2}}], "_cache": true}})
        );
        assert_eq!(compile(!a.clone()), json!({"not": {"term": {"a": 1}}}));
        assert_eq!(
            compile(NotExpression::new(a).with_param("_cache", false)),
            json!({"not": {"filter": {"term": {"a": 1}}, "_cache": false}})
        );
    }

    #[test]
    fn test_sort_forms() {
        assert_eq!(compile(Sort::new(Field::new("name"))), json!("name"));
        assert_eq!(compile(Field::new("date").desc()), json!({"date": "desc"}));
        assert_eq!(
            compile(
                Sort::new(Field::new("price"))
                    .with_order(SortOrder::Asc)
                    .with_param("mode", "avg")
            ),
            json!({"price": {"order": "asc", "mode": "avg"}})
        );
        assert_eq!(
            compile(Sort::new(Field::new("price")).with_param("missing", "_last")),
            json!({"price": {"missing": "_last"}})
        );
    }

    #[test]
    fn test_source_forms() {
        assert_eq!(compile(Source::Disabled), json!(false));
        assert_eq!(compile(Source::fields(["name", "date"])), json!(["name", "date"]));
        assert_eq!(
            compile(Source::filter(["obj.*"], ["obj.secret"])),
            json!({"include": ["obj.*"], "exclude": ["obj.secret"]})
        );
    }

    #[test]
    fn test_rescore() {
        let rescorer = QueryRescorer::new(Field::new("title").match_phrase("quick fox"))
            .with_window_size(100)
            .with_query_weight(0.7);
        assert_eq!(
            compile(rescorer),
            json!({
                "query": {
                    "rescore_query": {"match_phrase": {"title": "quick fox"}},
                    "query_weight": 0.7
                },
                "window_size": 100
            })
        );
    }

    #[test]
    fn test_document_is_unsupported_in_query_dialect() {
        let doc = crate::schema::Document::dynamic("product");
        let err = QueryCompiler::default().compile(&doc.into()).unwrap_err();
        match err {
            DslError::UnsupportedNode { tag, dialect } => {
                assert_eq!(tag, "document");
                assert_eq!(dialect, "query");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_path_points_at_parameter() {
        let query = Field::new("title").match_query("fox").with_param("boost", f64::INFINITY);
        let err = QueryCompiler::default().compile(&query.into()).unwrap_err();
        assert_eq!(err.path(), Some("match.title.boost"));
    }

    #[test]
    fn test_compile_is_repeatable() {
        let expr: Expr = (Field::new("a").term(1) | Field::new("b").gte(2)).into();
        let compiler = QueryCompiler::default();
        assert_eq!(compiler.compile(&expr).unwrap(), compiler.compile(&expr).unwrap());
    }
}
