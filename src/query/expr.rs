//! Generic expression values
//!
//! Every slot in the AST that accepts "anything" (a query value, a parameter,
//! a list of terms) holds an `Expr`. Scalars pass through the compiler
//! unchanged, lists and maps are compiled element by element, and nodes are
//! dispatched to the active dialect.

use serde::Serialize;

use super::ast::Node;
use super::finite;
use super::params::Params;
use crate::error::DslError;
use crate::Result;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Expr>),
    Map(Params),
    /// Pre-built JSON, emitted verbatim
    Raw(serde_json::Value),
    Node(Box<Node>),
}

impl Expr {
    /// Convert any serializable value into a raw JSON expression
    ///
    /// NaN and infinite floats are rejected as malformed rather than
    /// written as `null`.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        finite::check(value).map_err(|e| DslError::malformed(e.to_string()))?;
        Ok(Expr::Raw(serde_json::to_value(value)?))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Expr::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Expr::Null)
    }
}

impl From<bool> for Expr {
    fn from(v: bool) -> Self {
        Expr::Bool(v)
    }
}

impl From<i32> for Expr {
    fn from(v: i32) -> Self {
        Expr::Int(v as i64)
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Expr::Int(v)
    }
}

impl From<u32> for Expr {
    fn from(v: u32) -> Self {
        Expr::Int(v as i64)
    }
}

impl From<u64> for Expr {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => Expr::Int(v),
            Err(_) => Expr::Raw(serde_json::Value::from(v)),
        }
    }
}

impl From<usize> for Expr {
    fn from(v: usize) -> Self {
        Expr::from(v as u64)
    }
}

impl From<f32> for Expr {
    fn from(v: f32) -> Self {
        Expr::Float(v as f64)
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Float(v)
    }
}

impl From<&str> for Expr {
    fn from(v: &str) -> Self {
        Expr::String(v.to_string())
    }
}

impl From<String> for Expr {
    fn from(v: String) -> Self {
        Expr::String(v)
    }
}

impl From<&String> for Expr {
    fn from(v: &String) -> Self {
        Expr::String(v.clone())
    }
}

impl<T: Into<Expr>> From<Vec<T>> for Expr {
    fn from(v: Vec<T>) -> Self {
        Expr::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Expr>, const N: usize> From<[T; N]> for Expr {
    fn from(v: [T; N]) -> Self {
        Expr::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<Params> for Expr {
    fn from(v: Params) -> Self {
        Expr::Map(v)
    }
}

impl From<serde_json::Value> for Expr {
    fn from(v: serde_json::Value) -> Self {
        Expr::Raw(v)
    }
}

impl From<Node> for Expr {
    fn from(v: Node) -> Self {
        Expr::Node(Box::new(v))
    }
}
