//! Sort clauses

use crate::query::expr::Expr;
use crate::query::params::Params;
use crate::query::types::SortOrder;

/// One entry of the `sort` list
///
/// Depending on what is set it compiles to `"field"`, `{"field": "desc"}`
/// or `{"field": {"order": "desc", "missing": "_last"}}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sort {
    pub expr: Expr,
    pub order: Option<SortOrder>,
    pub params: Params,
}

impl Sort {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            order: None,
            params: Params::new(),
        }
    }

    pub fn asc(mut self) -> Self {
        self.order = Some(SortOrder::Asc);
        self
    }

    pub fn desc(mut self) -> Self {
        self.order = Some(SortOrder::Desc);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Add a sort option (`missing`, `mode`, `unmapped_type`, ...)
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::Field;

    #[test]
    fn test_sort_builders() {
        let sort = Field::new("created_at").desc();
        assert_eq!(sort.order, Some(SortOrder::Desc));
        assert!(sort.params.is_empty());

        let sort = Sort::new(Field::new("price")).with_param("missing", "_last");
        assert_eq!(sort.order, None);
        assert_eq!(sort.params.len(), 1);
    }
}
