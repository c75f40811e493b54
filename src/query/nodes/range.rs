//! Range query - matches documents with field values in a range
//!
//! Two parameter scopes exist: field-level parameters (the bounds plus
//! options such as `boost` or `format`) sit under the field name, while
//! query-level parameters (`execution`, `_cache`, `_name`) sit next to it:
//!
//! ```json
//! { "range": { "_cache": false, "age": { "gte": 18, "lt": 65 } } }
//! ```

use crate::error::DslError;
use crate::query::expr::Expr;
use crate::query::params::Params;
use crate::Result;

/// Keys that count as range bounds
pub const RANGE_BOUNDS: [&str; 6] = ["gte", "gt", "lte", "lt", "from", "to"];

/// Query matching field values within bounds
#[derive(Clone, Debug, PartialEq)]
pub struct Range {
    pub field: Expr,
    /// Bounds and other options nested under the field
    pub params: Params,
    /// Options placed beside the field
    pub range_params: Params,
}

impl Range {
    /// Start building a range; at least one bound is required
    pub fn builder(field: impl Into<Expr>) -> RangeBuilder {
        RangeBuilder {
            field: field.into(),
            params: Params::new(),
            range_params: Params::new(),
        }
    }

    /// Create a range with a single bound
    pub fn bounded(field: impl Into<Expr>, bound: &str, value: impl Into<Expr>) -> Self {
        Self {
            field: field.into(),
            params: Params::new().with(bound, value),
            range_params: Params::new(),
        }
    }

    /// Set the greater-than-or-equal bound
    pub fn gte(mut self, value: impl Into<Expr>) -> Self {
        self.params.insert("gte", value);
        self
    }

    /// Set the greater-than bound
    pub fn gt(mut self, value: impl Into<Expr>) -> Self {
        self.params.insert("gt", value);
        self
    }

    /// Set the less-than-or-equal bound
    pub fn lte(mut self, value: impl Into<Expr>) -> Self {
        self.params.insert("lte", value);
        self
    }

    /// Set the less-than bound
    pub fn lt(mut self, value: impl Into<Expr>) -> Self {
        self.params.insert("lt", value);
        self
    }

    /// Add a field-level parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Add a query-level parameter
    pub fn with_range_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.range_params.insert(key, value);
        self
    }

    pub fn with_boost(self, boost: f64) -> Self {
        self.with_param("boost", boost)
    }

    /// Check if any bound is set
    pub fn has_bounds(&self) -> bool {
        RANGE_BOUNDS.iter().any(|b| self.params.contains_key(b))
    }

    /// Check if this range is unbounded on the lower end
    pub fn is_unbounded_lower(&self) -> bool {
        !["gte", "gt", "from"]
            .iter()
            .any(|b| self.params.contains_key(b))
    }

    /// Check if this range is unbounded on the upper end
    pub fn is_unbounded_upper(&self) -> bool {
        !["lte", "lt", "to"].iter().any(|b| self.params.contains_key(b))
    }
}

/// Builder for [`Range`] that rejects bound-less ranges
#[derive(Clone, Debug)]
pub struct RangeBuilder {
    field: Expr,
    params: Params,
    range_params: Params,
}

impl RangeBuilder {
    pub fn gte(mut self, value: impl Into<Expr>) -> Self {
        self.params.insert("gte", value);
        self
    }

    pub fn gt(mut self, value: impl Into<Expr>) -> Self {
        self.params.insert("gt", value);
        self
    }

    pub fn lte(mut self, value: impl Into<Expr>) -> Self {
        self.params.insert("lte", value);
        self
    }

    pub fn lt(mut self, value: impl Into<Expr>) -> Self {
        self.params.insert("lt", value);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn range_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.range_params.insert(key, value);
        self
    }

    pub fn build(self) -> Result<Range> {
        let range = Range {
            field: self.field,
            params: self.params,
            range_params: self.range_params,
        };
        if !range.has_bounds() {
            return Err(DslError::Validation(
                "range query requires at least one of gte, gt, lte, lt, from, to".to_string(),
            ));
        }
        Ok(range)
    }
}
