use serde::{Deserialize, Serialize};

/// One entry of `GET /api/timeframes`, e.g. `{ value: "M1", label: "1 Minute" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeOption {
    pub value: String,
    pub label: String,
}
