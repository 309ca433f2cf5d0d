use std::collections::BTreeSet;

use crate::models::MatchableEntity;

/// Funding ladder used for stage-adjacency scoring, earliest first
const STAGE_ORDER: [&str; 5] = ["pre-seed", "seed", "series-a", "series-b", "series-c"];

/// Neutral score for attributes that are unknown on either side.
/// Incomplete profiles must not be punished as mismatches.
const NEUTRAL: f64 = 0.5;

/// Skill overlap between a subject's required set and a candidate's set
///
/// Returns the [0,1] overlap ratio plus the matched and missing skill
/// sets. An empty requirement set is no constraint, so it scores a
/// neutral 1.0 rather than 0.
pub fn skill_overlap(
    required: &BTreeSet<String>,
    candidate: &BTreeSet<String>,
) -> (f64, BTreeSet<String>, BTreeSet<String>) {
    if required.is_empty() {
        return (1.0, BTreeSet::new(), BTreeSet::new());
    }

    let matched: BTreeSet<String> = required.intersection(candidate).cloned().collect();
    let missing: BTreeSet<String> = required.difference(candidate).cloned().collect();

    let score = (matched.len() as f64 / required.len() as f64).clamp(0.0, 1.0);
    (score, matched, missing)
}

/// Industry/stage compatibility between two entities
///
/// Mean of an exact-industry component and a stage-adjacency component.
/// An attribute absent (or unrecognized) on either side contributes the
/// neutral 0.5 instead of zero.
pub fn industry_stage(subject: &MatchableEntity, candidate: &MatchableEntity) -> f64 {
    let industry = match (subject.industry.as_deref(), candidate.industry.as_deref()) {
        (Some(a), Some(b)) => {
            if a == b {
                1.0
            } else {
                0.0
            }
        }
        _ => NEUTRAL,
    };

    let stage = stage_compatibility(subject.stage.as_deref(), candidate.stage.as_deref());

    (industry + stage) / 2.0
}

fn stage_compatibility(a: Option<&str>, b: Option<&str>) -> f64 {
    let (a_idx, b_idx) = match (a.and_then(stage_index), b.and_then(stage_index)) {
        (Some(a_idx), Some(b_idx)) => (a_idx, b_idx),
        _ => return NEUTRAL,
    };

    match a_idx.abs_diff(b_idx) {
        0 => 1.0,
        1 => 0.5,
        _ => 0.0,
    }
}

fn stage_index(stage: &str) -> Option<usize> {
    STAGE_ORDER.iter().position(|s| *s == stage)
}

/// Numeric-range fit, e.g. investor check size against a funding ask
///
/// Undefined (`None`) unless both ranges are present. Overlapping ranges
/// score 1.0; disjoint ranges decay linearly with the gap relative to
/// the nearest range boundary, floored at 0.
pub fn numeric_fit(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<f64> {
    let ((a_min, a_max), (b_min, b_max)) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return None,
    };

    if a_min <= b_max && b_min <= a_max {
        return Some(1.0);
    }

    // Disjoint: measure the gap against the lower bound of the higher range
    let (gap, reference) = if a_min > b_max {
        (a_min - b_max, a_min)
    } else {
        (b_min - a_max, b_min)
    };

    if reference <= 0.0 {
        return Some(0.0);
    }

    Some((1.0 - gap / reference).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityType;

    fn entity(industry: Option<&str>, stage: Option<&str>) -> MatchableEntity {
        MatchableEntity {
            id: "e".to_string(),
            entity_type: EntityType::Startup,
            skills: BTreeSet::new(),
            industry: industry.map(str::to_string),
            stage: stage.map(str::to_string),
            investor_type: None,
            geography: None,
            check_size_range: None,
            text_blob: String::new(),
            embedding: None,
        }
    }

    fn skills(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_lowercase()).collect()
    }

    #[test]
    fn test_skill_overlap_half() {
        let required = skills(&["react", "node"]);
        let candidate = skills(&["react", "python"]);

        let (score, matched, missing) = skill_overlap(&required, &candidate);
        assert_eq!(score, 0.5);
        assert_eq!(matched, skills(&["react"]));
        assert_eq!(missing, skills(&["node"]));
    }

    #[test]
    fn test_empty_requirements_are_neutral() {
        let (score, matched, missing) = skill_overlap(&BTreeSet::new(), &skills(&["react"]));
        assert_eq!(score, 1.0);
        assert!(matched.is_empty());
        assert!(missing.is_empty());
    }

    #[test]
    fn test_matched_and_missing_are_disjoint() {
        let required = skills(&["react", "node", "rust"]);
        let candidate = skills(&["rust", "go"]);

        let (_, matched, missing) = skill_overlap(&required, &candidate);
        assert!(matched.is_disjoint(&missing));
        assert!(matched.is_subset(&required));
    }

    #[test]
    fn test_exact_industry_and_stage() {
        let a = entity(Some("fintech"), Some("seed"));
        let b = entity(Some("fintech"), Some("seed"));
        assert_eq!(industry_stage(&a, &b), 1.0);
    }

    #[test]
    fn test_missing_industry_is_neutral_not_zero() {
        let a = entity(None, Some("seed"));
        let b = entity(Some("fintech"), Some("seed"));
        // industry neutral 0.5, stage exact 1.0 -> 0.75
        assert_eq!(industry_stage(&a, &b), 0.75);
    }

    #[test]
    fn test_adjacent_stages_get_partial_credit() {
        assert_eq!(stage_compatibility(Some("pre-seed"), Some("seed")), 0.5);
        assert_eq!(stage_compatibility(Some("seed"), Some("series-b")), 0.0);
        assert_eq!(stage_compatibility(Some("series-a"), Some("series-a")), 1.0);
    }

    #[test]
    fn test_unknown_stage_string_is_neutral() {
        assert_eq!(stage_compatibility(Some("growth"), Some("seed")), NEUTRAL);
        assert_eq!(stage_compatibility(None, Some("seed")), NEUTRAL);
    }

    #[test]
    fn test_numeric_fit_overlap() {
        let investor = Some((50_000.0, 250_000.0));
        let ask = Some((150_000.0, 150_000.0));
        assert_eq!(numeric_fit(investor, ask), Some(1.0));
    }

    #[test]
    fn test_numeric_fit_decays_with_gap() {
        // Investor writes up to 100k, startup asks 150k:
        // gap 50k against the 150k ask -> 1 - 1/3
        let score = numeric_fit(Some((50_000.0, 100_000.0)), Some((150_000.0, 150_000.0))).unwrap();
        assert!((score - (1.0 - 50_000.0 / 150_000.0)).abs() < 1e-9);

        // Far apart floors at zero
        let far = numeric_fit(Some((1_000.0, 2_000.0)), Some((500_000.0, 500_000.0))).unwrap();
        assert!(far < 1.0);
        assert!(far >= 0.0);
    }

    #[test]
    fn test_numeric_fit_undefined_when_either_absent() {
        assert_eq!(numeric_fit(None, Some((1.0, 2.0))), None);
        assert_eq!(numeric_fit(Some((1.0, 2.0)), None), None);
    }
}
