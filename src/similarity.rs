//! Pairwise compatibility scoring.
//!
//! Standard cosine similarity over either two profile means, or a profile
//! mean and a single track vector. The signed value in [-1, 1] is kept for
//! ranking; [`Score::unit`] remaps it into [0, 1] for presentation.

use crate::error::{EngineError, Result};
use crate::math;
use crate::profile::UserProfile;
use crate::types::Score;

/// Signed cosine similarity between two vectors of matching dimensionality.
///
/// Deterministic and side-effect free.
///
/// # Errors
/// [`EngineError::DimensionMismatch`] for vectors of different lengths,
/// [`EngineError::UndefinedSimilarity`] when either vector has zero norm
/// (empty profile or unusable track) — never a misleading numeric score.
pub fn similarity(a: &[f32], b: &[f32]) -> Result<Score> {
    if a.len() != b.len() {
        return Err(EngineError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    math::cosine(a, b)
        .map(Score::from_signed)
        .ok_or(EngineError::UndefinedSimilarity)
}

/// Compatibility score between two user profiles, compared by mean vector.
///
/// # Errors
/// [`EngineError::UndefinedSimilarity`] when either profile is empty; callers
/// should surface that as "not enough data" rather than a score.
pub fn profile_similarity(a: &UserProfile, b: &UserProfile) -> Result<Score> {
    let mean_a = a.mean().ok_or(EngineError::UndefinedSimilarity)?;
    let mean_b = b.mean().ok_or(EngineError::UndefinedSimilarity)?;
    similarity(&mean_a, &mean_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::FrameNormalizer;

    fn profile_of(tracks: &[Vec<f32>]) -> UserProfile {
        let normalizer = FrameNormalizer::new(tracks[0].len());
        let mut profile = UserProfile::new(tracks[0].len());
        for t in tracks {
            profile
                .add_track(&normalizer.track_vector(&[t.clone()]).unwrap())
                .unwrap();
        }
        profile
    }

    #[test]
    fn test_self_similarity_is_one() {
        let a = vec![0.3, -0.7, 0.2];
        let score = similarity(&a, &a).unwrap();
        assert!((score.signed() - 1.0).abs() < 1e-6);
        assert!((score.unit() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_similarity_is_bounded() {
        let a = vec![2.0, -3.0, 1.0];
        let b = vec![-1.0, 4.0, 0.5];
        let score = similarity(&a, &b).unwrap();
        assert!((-1.0..=1.0).contains(&score.signed()));
        assert!((0.0..=1.0).contains(&score.unit()));
    }

    #[test]
    fn test_zero_norm_vector_is_undefined() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(similarity(&a, &b), Err(EngineError::UndefinedSimilarity));
        assert_eq!(similarity(&b, &a), Err(EngineError::UndefinedSimilarity));
    }

    #[test]
    fn test_length_mismatch_is_invalid_input() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(
            similarity(&a, &b),
            Err(EngineError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn test_unit_remap_preserves_order() {
        let anchor = vec![1.0, 0.0, 0.0];
        let close = similarity(&anchor, &[0.9, 0.1, 0.0]).unwrap();
        let far = similarity(&anchor, &[0.1, 0.9, 0.0]).unwrap();

        assert!(close.signed() > far.signed());
        assert!(close.unit() > far.unit());
    }

    #[test]
    fn test_empty_profile_is_undefined() {
        let empty = UserProfile::new(3);
        let full = profile_of(&[vec![1.0, 0.0, 0.0]]);
        assert_eq!(
            profile_similarity(&empty, &full),
            Err(EngineError::UndefinedSimilarity)
        );
    }

    #[test]
    fn test_profile_against_single_track() {
        let profile = profile_of(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
        let track = FrameNormalizer::new(3)
            .track_vector(&[vec![1.0, 0.0, 0.0]])
            .unwrap();

        let score = similarity(&profile.mean().unwrap(), track.as_slice()).unwrap();
        assert!((score.signed() - 1.0 / 2.0_f32.sqrt()).abs() < 1e-5);
    }
}
