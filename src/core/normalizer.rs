use std::collections::BTreeSet;

use thiserror::Error;

use crate::models::{
    EntityType, MatchableEntity, RawInvestor, RawJob, RawRecord, RawStartup, RawTalent,
};

/// Errors raised when a raw record cannot be turned into a scorable entity
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("record is missing an id")]
    MissingId,
}

/// Convert a raw store record into the canonical scoring view
///
/// Missing fields stay absent rather than defaulting to zero so the
/// structured scorer can treat them as unknown instead of a mismatch.
pub fn normalize(record: &RawRecord) -> Result<MatchableEntity, ValidationError> {
    if record.id().trim().is_empty() {
        return Err(ValidationError::MissingId);
    }

    let entity = match record {
        RawRecord::Startup(r) => normalize_startup(r),
        RawRecord::Talent(r) => normalize_talent(r),
        RawRecord::Investor(r) => normalize_investor(r),
        RawRecord::Job(r) => normalize_job(r),
    };

    Ok(entity)
}

fn normalize_startup(r: &RawStartup) -> MatchableEntity {
    // A startup's "skills" are its sector plus its stack: the set an
    // investor's preferred sectors or a job's requirements overlap with.
    let mut skills = skill_set(r.tech_stack.iter().chain(r.required_skills.iter()));
    if let Some(industry) = normalize_token(r.industry.as_deref()) {
        skills.insert(industry);
    }

    MatchableEntity {
        id: r.id.clone(),
        entity_type: EntityType::Startup,
        skills,
        industry: normalize_token(r.industry.as_deref()),
        stage: normalize_token(r.stage.as_deref()),
        investor_type: None,
        geography: None,
        check_size_range: r.funding_goal.map(|goal| (goal, goal)),
        text_blob: text_blob(&[
            r.tagline.as_deref(),
            r.problem_statement.as_deref(),
            r.use_of_funds.as_deref(),
        ]),
        embedding: r.embedding.clone(),
    }
}

fn normalize_talent(r: &RawTalent) -> MatchableEntity {
    MatchableEntity {
        id: r.id.clone(),
        entity_type: EntityType::Talent,
        skills: skill_set(r.skills.iter().map(|s| &s.name)),
        industry: None,
        stage: None,
        investor_type: None,
        geography: normalize_token(r.location.as_deref()),
        check_size_range: None,
        text_blob: text_blob(&[r.headline.as_deref(), r.bio.as_deref()]),
        embedding: r.embedding.clone(),
    }
}

fn normalize_investor(r: &RawInvestor) -> MatchableEntity {
    let check_size_range = match (r.check_size_min, r.check_size_max) {
        (Some(min), Some(max)) if min <= max => Some((min, max)),
        (Some(min), Some(max)) => Some((max, min)),
        _ => None,
    };

    MatchableEntity {
        id: r.id.clone(),
        entity_type: EntityType::Investor,
        skills: skill_set(r.preferred_sectors.iter()),
        industry: normalize_token(r.preferred_sectors.first().map(String::as_str)),
        // Investors list the stages they invest in; the earliest entry is
        // the anchor for stage-adjacency scoring.
        stage: normalize_token(r.investment_stage.first().map(String::as_str)),
        investor_type: normalize_token(r.investor_type.as_deref()),
        geography: normalize_token(r.geography_focus.as_deref()),
        check_size_range,
        text_blob: text_blob(&[r.thesis_text.as_deref()]),
        embedding: r.embedding.clone(),
    }
}

fn normalize_job(r: &RawJob) -> MatchableEntity {
    MatchableEntity {
        id: r.id.clone(),
        entity_type: EntityType::Job,
        skills: skill_set(r.required_skills.iter()),
        industry: None,
        stage: None,
        investor_type: None,
        geography: normalize_token(r.location.as_deref()),
        check_size_range: None,
        text_blob: text_blob(&[
            r.title.as_deref(),
            r.description.as_deref(),
            r.requirements.as_deref(),
        ]),
        embedding: r.embedding.clone(),
    }
}

/// Lower-case, trim and deduplicate a skill/sector list
fn skill_set<'a, I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + 'a + ?Sized,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalize_token(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

fn text_blob(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .filter_map(|p| *p)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityType, TalentSkill};

    #[test]
    fn test_missing_id_rejected() {
        let record = RawRecord::Startup(RawStartup {
            id: "  ".to_string(),
            name: None,
            tagline: None,
            industry: None,
            stage: None,
            funding_goal: None,
            use_of_funds: None,
            tech_stack: vec![],
            required_skills: vec![],
            problem_statement: None,
            updated_at: None,
            embedding: None,
        });

        assert!(matches!(normalize(&record), Err(ValidationError::MissingId)));
    }

    #[test]
    fn test_startup_normalization() {
        let record = RawRecord::Startup(RawStartup {
            id: "s-1".to_string(),
            name: Some("KathmanduPay".to_string()),
            tagline: Some("Remittances without the fees".to_string()),
            industry: Some("Fintech".to_string()),
            stage: Some("Seed".to_string()),
            funding_goal: Some(150_000.0),
            use_of_funds: Some("Hiring and licensing".to_string()),
            tech_stack: vec!["React".to_string(), "react".to_string(), "Rust".to_string()],
            required_skills: vec!["Payments".to_string()],
            problem_statement: Some("Moving money home is expensive".to_string()),
            updated_at: None,
            embedding: None,
        });

        let entity = normalize(&record).unwrap();
        assert_eq!(entity.entity_type, EntityType::Startup);
        assert_eq!(entity.industry.as_deref(), Some("fintech"));
        assert_eq!(entity.stage.as_deref(), Some("seed"));
        assert_eq!(entity.check_size_range, Some((150_000.0, 150_000.0)));
        // deduplicated, lower-cased, industry folded in
        assert!(entity.skills.contains("react"));
        assert!(entity.skills.contains("fintech"));
        assert_eq!(entity.skills.len(), 4);
        assert_eq!(
            entity.text_blob,
            "Remittances without the fees Moving money home is expensive Hiring and licensing"
        );
    }

    #[test]
    fn test_talent_skills_from_structured_entries() {
        let record = RawRecord::Talent(RawTalent {
            id: "t-1".to_string(),
            name: Some("Bibek".to_string()),
            headline: Some("Full-stack engineer".to_string()),
            location: Some("Kathmandu".to_string()),
            skills: vec![
                TalentSkill {
                    name: "React".to_string(),
                    proficiency: Some("expert".to_string()),
                },
                TalentSkill {
                    name: " Python ".to_string(),
                    proficiency: None,
                },
            ],
            bio: None,
            experience_level: None,
            updated_at: None,
            embedding: None,
        });

        let entity = normalize(&record).unwrap();
        assert!(entity.skills.contains("react"));
        assert!(entity.skills.contains("python"));
        assert_eq!(entity.geography.as_deref(), Some("kathmandu"));
    }

    #[test]
    fn test_investor_missing_check_size_stays_none() {
        let record = RawRecord::Investor(RawInvestor {
            id: "inv-1".to_string(),
            name: None,
            fund: None,
            investor_type: Some("Angel".to_string()),
            investment_stage: vec!["pre-seed".to_string(), "seed".to_string()],
            thesis_text: Some("Early fintech in South Asia".to_string()),
            preferred_sectors: vec!["Fintech".to_string()],
            check_size_min: Some(25_000.0),
            check_size_max: None,
            geography_focus: None,
            updated_at: None,
            embedding: None,
        });

        let entity = normalize(&record).unwrap();
        assert!(entity.check_size_range.is_none());
        assert_eq!(entity.stage.as_deref(), Some("pre-seed"));
        assert_eq!(entity.investor_type.as_deref(), Some("angel"));
        assert_eq!(entity.text_blob, "Early fintech in South Asia");
    }

    #[test]
    fn test_reversed_check_size_bounds_are_swapped() {
        let record = RawRecord::Investor(RawInvestor {
            id: "inv-2".to_string(),
            name: None,
            fund: None,
            investor_type: None,
            investment_stage: vec![],
            thesis_text: None,
            preferred_sectors: vec![],
            check_size_min: Some(200_000.0),
            check_size_max: Some(50_000.0),
            geography_focus: None,
            updated_at: None,
            embedding: None,
        });

        let entity = normalize(&record).unwrap();
        assert_eq!(entity.check_size_range, Some((50_000.0, 200_000.0)));
    }
}
