use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the match listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchQuery {
    /// Display threshold: results with match_percentage <= threshold
    /// are dropped. Kept caller-side so pages stop re-implementing it.
    #[serde(default)]
    pub threshold: u8,
}

impl Default for MatchQuery {
    fn default() -> Self {
        Self { threshold: 0 }
    }
}

/// Request to drop cached rankings for a subject, sent by the profile
/// service whenever a profile or thesis is edited.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InvalidateRequest {
    #[validate(length(min = 1))]
    pub subject_id: String,
}
