use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound on how many history rows a single request may ask for
pub const MAX_HISTORY_LIMIT: i64 = 1000;

/// Query parameters for the history endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(range(min = 1, max = "MAX_HISTORY_LIMIT"))]
    pub n: Option<i64>,
}

impl HistoryQuery {
    /// Requested row count, falling back to `default_limit` when absent
    pub fn limit(&self, default_limit: usize) -> usize {
        self.n
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(default_limit)
    }
}
