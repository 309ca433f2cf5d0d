use crate::models::{ScoreBreakdown, ScoringWeights};

/// Combine sub-scores into a 0-100 match percentage
///
/// Undefined sub-scores drop out and their weight is redistributed
/// proportionally over the remaining ones, so the result is always
/// computable from the structured sub-scores alone. Rounding is
/// half-up; the output is clamped to 0..=100 as a last defence.
pub fn aggregate(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> u8 {
    let mut pairs: Vec<(f64, f64)> = vec![
        (weights.skills, breakdown.skill_overlap),
        (weights.industry_stage, breakdown.industry_stage),
    ];

    if let Some(semantic) = breakdown.semantic {
        pairs.push((weights.semantic, semantic));
    }
    if let Some(numeric) = breakdown.numeric_fit {
        pairs.push((weights.numeric, numeric));
    }

    let total_weight: f64 = pairs.iter().map(|(w, _)| w).sum();
    if total_weight <= 0.0 {
        return 0;
    }

    let combined: f64 = pairs
        .iter()
        .map(|(w, v)| w * v.clamp(0.0, 1.0))
        .sum::<f64>()
        / total_weight;

    // f64::round is half-away-from-zero, which is half-up for the
    // non-negative values reaching this point.
    ((combined * 100.0).round() as i64).clamp(0, 100) as u8
}
