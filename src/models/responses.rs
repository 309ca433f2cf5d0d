use serde::{Deserialize, Serialize};

use crate::models::domain::ScoreBreakdown;

/// Externally surfaced score breakdown
///
/// The presentation layer only consumes the semantic and industry/stage
/// components, so only those are serialized; skill overlap and numeric
/// fit stay internal to the engine (they still drive the percentage and
/// the matched/missing skill lists). `semantic` is omitted entirely when
/// the embedding provider was unavailable rather than reported as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdownView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<f64>,
    pub industry_stage: f64,
}

impl From<&ScoreBreakdown> for ScoreBreakdownView {
    fn from(breakdown: &ScoreBreakdown) -> Self {
        Self {
            semantic: breakdown.semantic,
            industry_stage: breakdown.industry_stage,
        }
    }
}

/// Investor row returned to a founder's investor-match page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorMatchRow {
    pub investor_id: String,
    pub name: String,
    pub fund: Option<String>,
    pub match_percentage: u8,
    pub score_breakdown: ScoreBreakdownView,
}

/// Startup row returned to an investor's deal-flow feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupMatchRow {
    pub startup_id: String,
    pub name: String,
    pub tagline: Option<String>,
    pub match_percentage: u8,
    pub score_breakdown: ScoreBreakdownView,
}

/// Talent row returned to a founder's talent-match page for one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentMatchRow {
    pub talent_id: String,
    pub name: String,
    pub headline: Option<String>,
    pub match_percentage: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Applicant row, passed through from the store unscored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantRow {
    pub match_id: String,
    pub name: String,
    pub headline: Option<String>,
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response to an invalidation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateResponse {
    pub success: bool,
    pub subject_id: String,
}
