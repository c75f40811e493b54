//! Concrete query node implementations
//!
//! Each type here is a builder-style, immutable-once-built node that converts
//! into [`Expr`](crate::query::Expr) for composition.

mod aggregation;
mod boolean;
mod field;
mod field_query;
mod query_expression;
mod range;
mod rescore;
mod sort;
mod source;
mod terms;

pub use aggregation::{Aggregation, Aggregations, BucketAgg, FilterAgg, MetricAgg};
pub use boolean::{BooleanExpression, NotExpression};
pub use field::{BoostExpression, Field, MultiFields};
pub use field_query::{FieldQuery, FieldQueryKind};
pub use query_expression::{BoolQuery, QueryExpression, WrappedQuery};
pub use range::{Range, RangeBuilder, RANGE_BOUNDS};
pub use rescore::QueryRescorer;
pub use sort::Sort;
pub use source::Source;
pub use terms::{MultiMatch, Terms};
