//! Expression compilers
//!
//! A compiler turns an [`Expr`] tree into a `serde_json::Value` tree in one
//! depth-first pass. The generic part lives in the [`Compiler`] trait:
//! nodes are dispatched to the dialect's `visit_node`, maps and lists are
//! compiled element by element, scalars pass through. Two dialects exist:
//!
//! - [`QueryCompiler`] produces search request bodies
//! - [`MappingCompiler`] produces put-mapping bodies
//!
//! Compiling never mutates the input and keeps no state between calls, so
//! the same AST can be compiled repeatedly (and concurrently) with identical
//! results.

mod mapping;
mod query;

pub use mapping::MappingCompiler;
pub use query::QueryCompiler;

use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::config::CompilerConfig;
use crate::error::DslError;
use crate::query::{Expr, Node, Params};
use crate::Result;

/// Tag-dispatching visitor shared by all dialects
pub trait Compiler {
    /// Dialect name used in errors and logs
    const DIALECT: &'static str;

    fn config(&self) -> &CompilerConfig;

    /// Compile a single node; `depth` is the node's own nesting level
    fn visit_node(&self, node: &Node, depth: usize) -> Result<Value>;

    /// Compile an expression tree
    fn compile(&self, expr: &Expr) -> Result<Value> {
        self.visit(expr, 0)
    }

    /// Step one level deeper, failing once the configured limit is passed
    fn enter(&self, depth: usize) -> Result<usize> {
        let limit = self.config().max_depth;
        if depth >= limit {
            return Err(DslError::DepthExceeded { limit });
        }
        Ok(depth + 1)
    }

    fn visit(&self, expr: &Expr, depth: usize) -> Result<Value> {
        match expr {
            Expr::Node(node) => {
                let depth = self.enter(depth)?;
                trace!(dialect = Self::DIALECT, tag = %node.tag(), depth, "visiting node");
                self.visit_node(node, depth)
            }
            Expr::Map(params) => {
                let depth = self.enter(depth)?;
                Ok(Value::Object(self.visit_params(params, depth)?))
            }
            Expr::List(items) => {
                let depth = self.enter(depth)?;
                Ok(Value::Array(self.visit_list(items, depth)?))
            }
            Expr::Null => Ok(Value::Null),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Int(i) => Ok(Value::from(*i)),
            Expr::Float(f) => float_value(*f),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Raw(v) => Ok(v.clone()),
        }
    }

    /// Compile every value of a parameter container, keeping key order
    fn visit_params(&self, params: &Params, depth: usize) -> Result<Map<String, Value>> {
        let mut out = Map::with_capacity(params.len());
        for (key, value) in params {
            let value = self.visit(value, depth).map_err(|e| e.at_key(key))?;
            out.insert(key.clone(), value);
        }
        Ok(out)
    }

    fn visit_list(&self, items: &[Expr], depth: usize) -> Result<Vec<Value>> {
        // keep recursion in this frame; DEEP_MAX_DEPTH is sized against it
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            out.push(self.visit(item, depth).map_err(|e| e.at_index(i))?);
        }
        Ok(out)
    }

    /// Compile an expression that must produce a map key (usually a field)
    fn visit_key(&self, expr: &Expr, depth: usize) -> Result<String> {
        into_key(self.visit(expr, depth)?)
    }

    fn unsupported(&self, node: &Node) -> DslError {
        DslError::UnsupportedNode {
            tag: node.tag().as_str(),
            dialect: Self::DIALECT,
        }
    }
}

/// One-entry JSON object
pub(crate) fn single(key: impl Into<String>, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.into(), value);
    Value::Object(map)
}

pub(crate) fn float_value(f: f64) -> Result<Value> {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| DslError::malformed(format!("{} is not a finite number", f)))
}

pub(crate) fn into_key(value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(DslError::malformed(format!(
            "expected a field name, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use serde_json::json;

    #[test]
    fn test_scalars_pass_through() {
        let compiler = QueryCompiler::default();
        assert_eq!(compiler.compile(&Expr::Null).unwrap(), Value::Null);
        assert_eq!(compiler.compile(&Expr::from(true)).unwrap(), json!(true));
        assert_eq!(compiler.compile(&Expr::from(42)).unwrap(), json!(42));
        assert_eq!(compiler.compile(&Expr::from(1.5)).unwrap(), json!(1.5));
        assert_eq!(compiler.compile(&Expr::from("x")).unwrap(), json!("x"));
        assert_eq!(
            compiler.compile(&Expr::Raw(json!({"a": [1, 2]}))).unwrap(),
            json!({"a": [1, 2]})
        );
    }

    #[test]
    fn test_containers_keep_shape() {
        let expr = Expr::from(params! {
            "b" => vec![Expr::from(1), Expr::from(params! { "c" => "d" })],
            "a" => Expr::Null,
        });
        let compiled = QueryCompiler::default().compile(&expr).unwrap();
        assert_eq!(compiled, json!({"b": [1, {"c": "d"}], "a": null}));

        let keys: Vec<&String> = compiled.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_non_finite_float_is_malformed() {
        let expr = Expr::from(params! { "outer" => vec![Expr::from(params! { "w" => f64::NAN })] });
        let err = QueryCompiler::default().compile(&expr).unwrap_err();
        assert!(matches!(err, DslError::MalformedParameter { .. }));
        assert_eq!(err.path(), Some("outer[0].w"));
    }

    #[test]
    fn test_depth_limit() {
        let mut expr = Expr::from(1);
        for _ in 0..10 {
            expr = Expr::List(vec![expr]);
        }

        let shallow = QueryCompiler::new(CompilerConfig::new(5));
        assert!(matches!(
            shallow.compile(&expr),
            Err(DslError::DepthExceeded { limit: 5 })
        ));

        let deep = QueryCompiler::new(CompilerConfig::new(10));
        assert!(deep.compile(&expr).is_ok());
    }
}
