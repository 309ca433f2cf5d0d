// Model exports
pub mod domain;
pub mod raw;
pub mod requests;
pub mod responses;

pub use domain::{EntityType, MatchResult, MatchableEntity, ScoreBreakdown, ScoringWeights};
pub use raw::{RawApplicant, RawInvestor, RawJob, RawRecord, RawStartup, RawTalent, TalentSkill};
pub use requests::{InvalidateRequest, MatchQuery};
pub use responses::{
    ApplicantRow, ErrorResponse, HealthResponse, InvalidateResponse, InvestorMatchRow,
    ScoreBreakdownView, StartupMatchRow, TalentMatchRow,
};
