//! Boolean filter combinators - `and`, `or`, `not`
//!
//! Without parameters the children are a bare list:
//!
//! ```json
//! { "and": [ { "term": { "status": "active" } }, { "range": { "age": { "gte": 18 } } } ] }
//! ```
//!
//! With parameters (e.g. `_cache`) the list moves under `filters`:
//!
//! ```json
//! { "and": { "filters": [ ... ], "_cache": true } }
//! ```
//!
//! The `&`, `|` and `!` operators build these nodes, flattening chains of the
//! same operator into a single combinator.

use std::ops;

use super::{
    BoostExpression, Field, FieldQuery, MultiMatch, QueryExpression, Range, Terms, WrappedQuery,
};
use crate::query::ast::Node;
use crate::query::expr::Expr;
use crate::query::params::Params;
use crate::query::types::BoolOperator;

/// `and` / `or` over an ordered list of filters
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanExpression {
    pub operator: BoolOperator,
    pub expressions: Vec<Expr>,
    pub params: Params,
}

impl BooleanExpression {
    pub fn new<T: Into<Expr>>(
        operator: BoolOperator,
        expressions: impl IntoIterator<Item = T>,
    ) -> Self {
        Self {
            operator,
            expressions: expressions.into_iter().map(Into::into).collect(),
            params: Params::new(),
        }
    }

    pub fn and<T: Into<Expr>>(expressions: impl IntoIterator<Item = T>) -> Self {
        Self::new(BoolOperator::And, expressions)
    }

    pub fn or<T: Into<Expr>>(expressions: impl IntoIterator<Item = T>) -> Self {
        Self::new(BoolOperator::Or, expressions)
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params.merge(params);
        self
    }

    /// Append another operand
    pub fn push(mut self, expr: impl Into<Expr>) -> Self {
        self.expressions.push(expr.into());
        self
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Combine two operands, extending `lhs` in place when it is already a
    /// parameter-free combinator of the same operator
    fn combine(operator: BoolOperator, lhs: Expr, rhs: Expr) -> Expr {
        match lhs {
            Expr::Node(node) => match *node {
                Node::Boolean(b) if b.operator == operator && b.params.is_empty() => {
                    b.push(rhs).into()
                }
                other => Self::new(operator, [Expr::from(other), rhs]).into(),
            },
            lhs => Self::new(operator, [lhs, rhs]).into(),
        }
    }
}

/// Negation of a single filter
#[derive(Clone, Debug, PartialEq)]
pub struct NotExpression {
    pub expr: Expr,
    pub params: Params,
}

impl NotExpression {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            params: Params::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.params.insert(key, value);
        self
    }
}

impl<R: Into<Expr>> ops::BitAnd<R> for Expr {
    type Output = Expr;

    fn bitand(self, rhs: R) -> Expr {
        BooleanExpression::combine(BoolOperator::And, self, rhs.into())
    }
}

impl<R: Into<Expr>> ops::BitOr<R> for Expr {
    type Output = Expr;

    fn bitor(self, rhs: R) -> Expr {
        BooleanExpression::combine(BoolOperator::Or, self, rhs.into())
    }
}

impl ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        NotExpression::new(self).into()
    }
}

macro_rules! impl_bool_ops {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<R: Into<Expr>> ops::BitAnd<R> for $ty {
                type Output = Expr;

                fn bitand(self, rhs: R) -> Expr {
                    Expr::from(self) & rhs
                }
            }

            impl<R: Into<Expr>> ops::BitOr<R> for $ty {
                type Output = Expr;

                fn bitor(self, rhs: R) -> Expr {
                    Expr::from(self) | rhs
                }
            }

            impl ops::Not for $ty {
                type Output = Expr;

                fn not(self) -> Expr {
                    !Expr::from(self)
                }
            }
        )+
    };
}

impl_bool_ops!(
    BooleanExpression,
    NotExpression,
    FieldQuery,
    Range,
    Terms,
    MultiMatch,
    QueryExpression,
    WrappedQuery,
    BoostExpression,
    Field,
);
