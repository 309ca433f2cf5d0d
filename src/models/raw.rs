use serde::{Deserialize, Serialize};

use crate::models::EntityType;

/// Raw record served by the profile/job store, tagged by entity type
///
/// Field shapes mirror the marketplace backend tables; everything the
/// engine does not strictly need is optional so partially filled
/// profiles still normalize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "entity_type")]
pub enum RawRecord {
    #[serde(rename = "STARTUP")]
    Startup(RawStartup),
    #[serde(rename = "TALENT")]
    Talent(RawTalent),
    #[serde(rename = "INVESTOR")]
    Investor(RawInvestor),
    #[serde(rename = "JOB")]
    Job(RawJob),
}

impl RawRecord {
    pub fn id(&self) -> &str {
        match self {
            RawRecord::Startup(r) => &r.id,
            RawRecord::Talent(r) => &r.id,
            RawRecord::Investor(r) => &r.id,
            RawRecord::Job(r) => &r.id,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            RawRecord::Startup(_) => EntityType::Startup,
            RawRecord::Talent(_) => EntityType::Talent,
            RawRecord::Investor(_) => EntityType::Investor,
            RawRecord::Job(_) => EntityType::Job,
        }
    }

    pub fn updated_at(&self) -> Option<&str> {
        match self {
            RawRecord::Startup(r) => r.updated_at.as_deref(),
            RawRecord::Talent(r) => r.updated_at.as_deref(),
            RawRecord::Investor(r) => r.updated_at.as_deref(),
            RawRecord::Job(r) => r.updated_at.as_deref(),
        }
    }

    /// Display name for presentation rows (job postings use their title)
    pub fn display_name(&self) -> &str {
        match self {
            RawRecord::Startup(r) => r.name.as_deref().unwrap_or(""),
            RawRecord::Talent(r) => r.name.as_deref().unwrap_or(""),
            RawRecord::Investor(r) => r.name.as_deref().unwrap_or(""),
            RawRecord::Job(r) => r.title.as_deref().unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStartup {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub industry: Option<String>,
    pub stage: Option<String>,
    pub funding_goal: Option<f64>,
    pub use_of_funds: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub problem_statement: Option<String>,
    pub updated_at: Option<String>,
    pub embedding: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentSkill {
    pub name: String,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTalent {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<TalentSkill>,
    pub bio: Option<String>,
    pub experience_level: Option<String>,
    pub updated_at: Option<String>,
    pub embedding: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInvestor {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub fund: Option<String>,
    /// 'angel', 'vc' or 'diaspora'
    #[serde(rename = "type")]
    pub investor_type: Option<String>,
    #[serde(default)]
    pub investment_stage: Vec<String>,
    pub thesis_text: Option<String>,
    #[serde(default)]
    pub preferred_sectors: Vec<String>,
    pub check_size_min: Option<f64>,
    pub check_size_max: Option<f64>,
    pub geography_focus: Option<String>,
    pub updated_at: Option<String>,
    pub embedding: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub id: String,
    pub startup_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub compensation: Option<String>,
    pub updated_at: Option<String>,
    pub embedding: Option<Vec<f32>>,
}

/// Applicant row served verbatim by the store's applications collection.
/// Applicants are a collaborator concern, not a scored pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawApplicant {
    pub match_id: String,
    pub name: Option<String>,
    pub headline: Option<String>,
    pub message: Option<String>,
}
