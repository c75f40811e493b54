pub mod compiler;
pub mod config;
pub mod error;
pub mod query;
pub mod schema;

pub use compiler::{Compiler, MappingCompiler, QueryCompiler};
pub use config::{CompilerConfig, DepthProfile, IndexSettings, DEEP_MAX_DEPTH};
pub use error::{DslError, Result};
pub use query::{Expr, Field, Node, Params, SearchQuery};
pub use schema::{Document, FieldType, Index, MappingField};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
