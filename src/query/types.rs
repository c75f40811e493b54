//! Core value types shared by query nodes

use serde::{Deserialize, Serialize};

use super::expr::Expr;

/// Operator for combining terms in a match query
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOperator {
    /// All terms must match (AND)
    And,
    /// At least one term must match (OR)
    #[default]
    Or,
}

impl MatchOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOperator::And => "and",
            MatchOperator::Or => "or",
        }
    }
}

impl From<MatchOperator> for Expr {
    fn from(v: MatchOperator) -> Self {
        Expr::from(v.as_str())
    }
}

/// Minimum should match configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinimumShouldMatch {
    /// Exact count
    Count(usize),
    /// Percentage (e.g., "75%")
    Percentage(String),
}

impl Default for MinimumShouldMatch {
    fn default() -> Self {
        MinimumShouldMatch::Count(1)
    }
}

impl From<MinimumShouldMatch> for Expr {
    fn from(v: MinimumShouldMatch) -> Self {
        match v {
            MinimumShouldMatch::Count(n) => Expr::from(n),
            MinimumShouldMatch::Percentage(p) => Expr::from(p),
        }
    }
}

/// Boolean filter operator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOperator {
    And,
    Or,
}

impl BoolOperator {
    /// Engine keyword for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BoolOperator::And => "and",
            BoolOperator::Or => "or",
        }
    }
}

/// Sort direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl From<SortOrder> for Expr {
    fn from(v: SortOrder) -> Self {
        Expr::from(v.as_str())
    }
}

/// How rescorer scores combine with the original query score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    Total,
    Multiply,
    Avg,
    Max,
    Min,
}

impl ScoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Total => "total",
            ScoreMode::Multiply => "multiply",
            ScoreMode::Avg => "avg",
            ScoreMode::Max => "max",
            ScoreMode::Min => "min",
        }
    }
}

impl From<ScoreMode> for Expr {
    fn from(v: ScoreMode) -> Self {
        Expr::from(v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_should_match_expr() {
        assert_eq!(Expr::from(MinimumShouldMatch::Count(2)), Expr::Int(2));
        assert_eq!(
            Expr::from(MinimumShouldMatch::Percentage("75%".to_string())),
            Expr::from("75%")
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(BoolOperator::Or.as_str(), "or");
        assert_eq!(SortOrder::Desc.as_str(), "desc");
        assert_eq!(ScoreMode::Multiply.as_str(), "multiply");
        assert_eq!(MatchOperator::default(), MatchOperator::Or);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SortOrder::Asc).unwrap();
        assert_eq!(json, "\"asc\"");
        let mode: ScoreMode = serde_json::from_str("\"avg\"").unwrap();
        assert_eq!(mode, ScoreMode::Avg);
    }
}
