//! Query DSL object model
//!
//! This module provides the node types used to describe a search request:
//! - Field queries (term, match, prefix, wildcard, ...)
//! - Boolean filters (and, or, not) and compound queries (bool, dis_max, ...)
//! - Range and terms queries
//! - Sorting, source selection and rescoring
//! - Aggregations (metric, bucket, filter)
//!
//! # Example
//!
//! ```
//! use searchdsl::query::{Field, SearchQuery};
//!
//! let status = Field::new("status");
//! let age = Field::new("age");
//!
//! let body = SearchQuery::new()
//!     .filter(status.term("active") & age.gte(18))
//!     .order_by(Field::new("created_at").desc())
//!     .limit(10)
//!     .to_body()
//!     .unwrap();
//!
//! assert_eq!(body["size"], 10);
//! ```

pub mod ast;
pub mod expr;
mod finite;
pub mod nodes;
pub mod params;
pub mod search;
pub mod types;

pub use ast::{CompileTag, Node};
pub use expr::Expr;
pub use nodes::*;
pub use params::Params;
pub use search::SearchQuery;
pub use types::*;
