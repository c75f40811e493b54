use thiserror::Error;

/// Main error type for DSL construction and compilation
#[derive(Error, Debug)]
pub enum DslError {
    #[error("Node `{tag}` is not supported by the {dialect} compiler")]
    UnsupportedNode {
        tag: &'static str,
        dialect: &'static str,
    },

    #[error("Malformed parameter at `{path}`: {reason}")]
    MalformedParameter { path: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown field `{field}` on document type `{doc_type}`")]
    UnknownField { doc_type: String, field: String },

    #[error("Expression nesting exceeds the limit of {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for DSL operations
pub type Result<T> = std::result::Result<T, DslError>;

impl DslError {
    /// Create a malformed parameter error rooted at the current value
    pub fn malformed(reason: impl Into<String>) -> Self {
        DslError::MalformedParameter {
            path: String::new(),
            reason: reason.into(),
        }
    }

    /// Prefix the key path of a malformed parameter error with a map key
    pub fn at_key(self, key: &str) -> Self {
        match self {
            DslError::MalformedParameter { path, reason } => {
                let path = if path.is_empty() {
                    key.to_string()
                } else if path.starts_with('[') {
                    format!("{}{}", key, path)
                } else {
                    format!("{}.{}", key, path)
                };
                DslError::MalformedParameter { path, reason }
            }
            other => other,
        }
    }

    /// Prefix the key path of a malformed parameter error with a list index
    pub fn at_index(self, index: usize) -> Self {
        match self {
            DslError::MalformedParameter { path, reason } => {
                let path = if path.is_empty() || path.starts_with('[') {
                    format!("[{}]{}", index, path)
                } else {
                    format!("[{}].{}", index, path)
                };
                DslError::MalformedParameter { path, reason }
            }
            other => other,
        }
    }

    /// Key path of the offending value, for malformed parameter errors
    pub fn path(&self) -> Option<&str> {
        match self {
            DslError::MalformedParameter { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Check if this error stems from using the API incorrectly rather than bad input data
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            DslError::UnsupportedNode { .. } | DslError::DepthExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DslError::UnsupportedNode {
            tag: "document",
            dialect: "query",
        };
        assert_eq!(
            err.to_string(),
            "Node `document` is not supported by the query compiler"
        );
    }

    #[test]
    fn test_malformed_path_building() {
        let err = DslError::malformed("not a finite number")
            .at_key("gte")
            .at_key("age")
            .at_index(1)
            .at_key("filters");
        assert_eq!(err.path(), Some("filters[1].age.gte"));
        assert_eq!(
            err.to_string(),
            "Malformed parameter at `filters[1].age.gte`: not a finite number"
        );
    }

    #[test]
    fn test_nested_indices() {
        let err = DslError::malformed("bad").at_index(2).at_index(0);
        assert_eq!(err.path(), Some("[0][2]"));
    }

    #[test]
    fn test_programming_errors() {
        assert!(DslError::DepthExceeded { limit: 8 }.is_programming_error());
        assert!(!DslError::Validation("x".to_string()).is_programming_error());
        assert!(DslError::Validation("x".to_string()).path().is_none());
    }
}
