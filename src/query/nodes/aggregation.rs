//! Aggregation nodes
//!
//! Three shapes exist:
//! - metric aggregations: `{ "avg": { "field": "price" } }`
//! - bucket aggregations, which may nest named sub-aggregations:
//!   `{ "terms": { "field": "category" }, "aggregations": { ... } }`
//! - filter buckets, whose body *is* the compiled filter:
//!   `{ "filter": { "term": { "status": "active" } }, "aggregations": { ... } }`

use indexmap::IndexMap;

use crate::query::ast::CompileTag;
use crate::query::expr::Expr;
use crate::query::params::Params;

/// Named aggregations, in declaration order
pub type Aggregations = IndexMap<String, Aggregation>;

/// Any aggregation node
#[derive(Clone, Debug, PartialEq)]
pub enum Aggregation {
    Metric(MetricAgg),
    Bucket(BucketAgg),
    Filter(FilterAgg),
}

impl Aggregation {
    pub fn tag(&self) -> CompileTag {
        match self {
            Aggregation::Metric(_) => CompileTag::Agg,
            Aggregation::Bucket(_) => CompileTag::BucketAgg,
            Aggregation::Filter(_) => CompileTag::FilterAgg,
        }
    }

    /// Engine name of the aggregation (`terms`, `avg`, `filter`, ...)
    pub fn agg_name(&self) -> &str {
        match self {
            Aggregation::Metric(agg) => &agg.name,
            Aggregation::Bucket(agg) => &agg.name,
            Aggregation::Filter(_) => FilterAgg::NAME,
        }
    }
}

impl From<MetricAgg> for Aggregation {
    fn from(v: MetricAgg) -> Self {
        Aggregation::Metric(v)
    }
}

impl From<BucketAgg> for Aggregation {
    fn from(v: BucketAgg) -> Self {
        Aggregation::Bucket(v)
    }
}

impl From<FilterAgg> for Aggregation {
    fn from(v: FilterAgg) -> Self {
        Aggregation::Filter(v)
    }
}

/// Single-value or multi-value metric over the documents in scope
#[derive(Clone, Debug, PartialEq)]
pub struct MetricAgg {
    pub name: String,
    pub params: Params,
}

impl MetricAgg {
    pub fn new(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    fn on_field(name: &str, field: impl Into<Expr>) -> Self {
        Self::new(name, Params::new().with("field", field))
    }

    pub fn avg(field: impl Into<Expr>) -> Self {
        Self::on_field("avg", field)
    }

    pub fn min(field: impl Into<Expr>) -> Self {
        Self::on_field("min", field)
    }

    pub fn max(field: impl Into<Expr>) -> Self {
        Self::on_field("max", field)
    }

    pub fn sum(field: impl Into<Expr>) -> Self {
        Self::on_field("sum", field)
    }

    pub fn stats(field: impl Into<Expr>) -> Self {
        Self::on_field("stats", field)
    }

    pub fn extended_stats(field: impl Into<Expr>) -> Self {
        Self::on_field("extended_stats", field)
    }

    pub fn value_count(field: impl Into<Expr>) -> Self {
        Self::on_field("value_count", field)
    }

    pub fn cardinality(field: impl Into<Expr>) -> Self {
        Self::on_field("cardinality", field)
    }

    pub fn percentiles(field: impl Into<Expr>) -> Self {
        Self::on_field("percentiles", field)
    }

    pub fn top_hits(size: u64) -> Self {
        Self::new("top_hits", Params::new().with("size", size))
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }
}

/// Aggregation that splits documents into buckets
#[derive(Clone, Debug, PartialEq)]
pub struct BucketAgg {
    pub name: String,
    pub params: Params,
    pub aggregations: Aggregations,
}

impl BucketAgg {
    pub fn new(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
            aggregations: Aggregations::new(),
        }
    }

    pub fn terms(field: impl Into<Expr>) -> Self {
        Self::new("terms", Params::new().with("field", field))
    }

    pub fn significant_terms(field: impl Into<Expr>) -> Self {
        Self::new("significant_terms", Params::new().with("field", field))
    }

    pub fn histogram(field: impl Into<Expr>, interval: impl Into<Expr>) -> Self {
        Self::new(
            "histogram",
            Params::new().with("field", field).with("interval", interval),
        )
    }

    pub fn date_histogram(field: impl Into<Expr>, interval: impl Into<String>) -> Self {
        Self::new(
            "date_histogram",
            Params::new()
                .with("field", field)
                .with("interval", interval.into()),
        )
    }

    /// Range buckets, each described by its own `from`/`to`/`key` map
    pub fn range(field: impl Into<Expr>, ranges: Vec<Params>) -> Self {
        let ranges: Vec<Expr> = ranges.into_iter().map(Expr::Map).collect();
        Self::new(
            "range",
            Params::new().with("field", field).with("ranges", ranges),
        )
    }

    pub fn missing(field: impl Into<Expr>) -> Self {
        Self::new("missing", Params::new().with("field", field))
    }

    pub fn nested(path: impl Into<Expr>) -> Self {
        Self::new("nested", Params::new().with("path", path))
    }

    pub fn global() -> Self {
        Self::new("global", Params::new())
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Nest a named sub-aggregation
    pub fn aggregation(mut self, name: impl Into<String>, agg: impl Into<Aggregation>) -> Self {
        self.aggregations.insert(name.into(), agg.into());
        self
    }
}

/// Single bucket of documents matching a filter
#[derive(Clone, Debug, PartialEq)]
pub struct FilterAgg {
    pub filter: Expr,
    pub aggregations: Aggregations,
}

impl FilterAgg {
    pub const NAME: &'static str = "filter";

    pub fn new(filter: impl Into<Expr>) -> Self {
        Self {
            filter: filter.into(),
            aggregations: Aggregations::new(),
        }
    }

    /// Nest a named sub-aggregation
    pub fn aggregation(mut self, name: impl Into<String>, agg: impl Into<Aggregation>) -> Self {
        self.aggregations.insert(name.into(), agg.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::Field;

    #[test]
    fn test_tags_and_names() {
        let metric = Aggregation::from(MetricAgg::avg(Field::new("price")));
        assert_eq!(metric.tag(), CompileTag::Agg);
        assert_eq!(metric.agg_name(), "avg");

        let filter = Aggregation::from(FilterAgg::new(Field::new("status").term("active")));
        assert_eq!(filter.tag(), CompileTag::FilterAgg);
        assert_eq!(filter.agg_name(), "filter");
    }

    #[test]
    fn test_nested_aggregations_keep_order() {
        let agg = BucketAgg::terms(Field::new("category"))
            .aggregation("max_price", MetricAgg::max(Field::new("price")))
            .aggregation("avg_price", MetricAgg::avg(Field::new("price")));

        let names: Vec<&String> = agg.aggregations.keys().collect();
        assert_eq!(names, vec!["max_price", "avg_price"]);
    }
}
