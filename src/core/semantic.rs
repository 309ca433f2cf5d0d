/// Semantic similarity between two embedding vectors
///
/// Cosine similarity mapped from [-1,1] to [0,1] via (cos+1)/2. Returns
/// `None` when the signal is undefined: either embedding absent, a
/// dimension mismatch, or a zero-norm vector. The aggregator excludes
/// undefined sub-scores instead of counting them as 0.
pub fn semantic_score(a: Option<&[f32]>, b: Option<&[f32]>) -> Option<f64> {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return None,
    };

    let cos = cosine_similarity(a, b)?;
    Some(((cos + 1.0) / 2.0).clamp(0.0, 1.0))
}

/// Plain cosine similarity in [-1,1]
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}
