//! Shared vector math for the normalizer, aggregator and similarity engine.

/// Compute the signed cosine similarity between two vectors.
///
/// Returns `None` when either vector has zero magnitude; the similarity
/// engine surfaces that as an undefined comparison instead of a misleading
/// score of 0.0. Callers validate dimensionality before calling.
///
/// # Returns
/// Cosine similarity in range [-1.0, 1.0], or `None` for degenerate input
pub fn cosine(a: &[f32], b: &[f32]) -> Option<f32> {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    // Floating-point rounding can push the quotient slightly past ±1.
    Some((dot / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

/// Compute L2 norm (magnitude) of a vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Normalize a vector in place (L2 normalization).
///
/// If the vector has zero magnitude, it remains unchanged.
pub fn normalize_in_place(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        for x in v {
            *x /= norm;
        }
    }
}
