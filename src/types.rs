//! Core data types exchanged with the engine's collaborators.
//!
//! Track vectors and profiles are persisted by the caller's storage layer,
//! so everything here derives serde traits; the engine itself never does I/O.

use serde::{Deserialize, Serialize};

/// User identifier as supplied by the front end.
pub type UserId = String;

/// The single aggregated, normalized feature vector summarizing one track.
///
/// Produced by [`crate::FrameNormalizer`]; a zero vector marks a degenerate
/// (silent or corrupt) track that must not contribute to a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackVector {
    values: Vec<f32>,
}

impl TrackVector {
    pub(crate) fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// A zero vector of the given dimensionality, marking an unusable track.
    pub(crate) fn unusable(dim: usize) -> Self {
        Self {
            values: vec![0.0; dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Whether the track carries any signal. Unusable tracks are skipped by
    /// the profile aggregator.
    pub fn is_usable(&self) -> bool {
        self.values.iter().any(|v| *v != 0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// A bounded compatibility score.
///
/// The signed cosine value in [-1, 1] drives ranking; [`Score::unit`] remaps
/// it monotonically into [0, 1] for presentation, so ranking order is the
/// same in either form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f32);

impl Score {
    pub(crate) fn from_signed(signed: f32) -> Self {
        Self(signed)
    }

    /// Signed cosine similarity in [-1, 1]
    pub fn signed(self) -> f32 {
        self.0
    }

    /// Presentation value in [0, 1]
    pub fn unit(self) -> f32 {
        (self.0 + 1.0) / 2.0
    }
}

/// One scored pairing between the anchor user and a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// User the ranking was computed for
    pub anchor: UserId,
    /// Candidate being compared against the anchor
    pub candidate: UserId,
    /// Compatibility score between the two profiles
    pub score: Score,
    /// Evidence count `min(n_anchor, n_candidate)` backing the score
    pub evidence: u32,
}

/// A candidate left out of the ranking, with the reason so the front end can
/// explain the omission instead of silently dropping the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub candidate: UserId,
    pub reason: ExclusionReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Candidate has no contributing tracks
    EmptyProfile,
    /// Pair has too little shared listening history to score reliably
    BelowMinEvidence { evidence: u32, required: u32 },
    /// Candidate's tracks cancel out to a zero-norm profile
    DegenerateProfile,
}

/// Output of the match ranker: scored matches in descending order plus the
/// excluded candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub matches: Vec<MatchResult>,
    pub excluded: Vec<Exclusion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unusable_track_vector() {
        let track = TrackVector::unusable(3);
        assert_eq!(track.dim(), 3);
        assert!(!track.is_usable());

        let track = TrackVector::new(vec![0.0, 0.1, 0.0]);
        assert!(track.is_usable());
    }

    #[test]
    fn test_score_unit_remap() {
        assert!((Score::from_signed(-1.0).unit() - 0.0).abs() < 1e-6);
        assert!((Score::from_signed(0.0).unit() - 0.5).abs() < 1e-6);
        assert!((Score::from_signed(1.0).unit() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_track_vector_serde_round_trip() {
        let track = TrackVector::new(vec![0.6, 0.8]);
        let json = serde_json::to_string(&track).unwrap();
        let back: TrackVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, track);
    }

    #[test]
    fn test_exclusion_reason_serde_shape() {
        let reason = ExclusionReason::BelowMinEvidence {
            evidence: 1,
            required: 2,
        };
        let json = serde_json::to_string(&reason).unwrap();
        assert!(json.contains("below_min_evidence"));
    }
}
