//! Query rescoring

use crate::query::expr::Expr;
use crate::query::types::ScoreMode;

/// Second-pass rescoring of the top hits
///
/// ```json
/// {
///   "window_size": 50,
///   "query": {
///     "rescore_query": { "match_phrase": { "title": "rust search" } },
///     "query_weight": 0.7,
///     "rescore_query_weight": 1.2
///   }
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QueryRescorer {
    pub query: Expr,
    pub window_size: Option<u64>,
    pub query_weight: Option<f64>,
    pub rescore_query_weight: Option<f64>,
    pub score_mode: Option<ScoreMode>,
}

impl QueryRescorer {
    pub fn new(query: impl Into<Expr>) -> Self {
        Self {
            query: query.into(),
            window_size: None,
            query_weight: None,
            rescore_query_weight: None,
            score_mode: None,
        }
    }

    pub fn with_window_size(mut self, window_size: u64) -> Self {
        self.window_size = Some(window_size);
        self
    }

    pub fn with_query_weight(mut self, weight: f64) -> Self {
        self.query_weight = Some(weight);
        self
    }

    pub fn with_rescore_query_weight(mut self, weight: f64) -> Self {
        self.rescore_query_weight = Some(weight);
        self
    }

    pub fn with_score_mode(mut self, mode: ScoreMode) -> Self {
        self.score_mode = Some(mode);
        self
    }
}
