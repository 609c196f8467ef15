//! One-to-many match ranking.
//!
//! A pure read-side pass over a snapshot of candidate profiles: one
//! similarity computation per candidate, then a single sort. Input profiles
//! are never mutated, so per-candidate comparisons are safe to parallelize
//! by the caller if the candidate set ever warrants it.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::config::{EngineConfig, DEFAULT_MIN_EVIDENCE};
use crate::error::{EngineError, Result};
use crate::math;
use crate::profile::UserProfile;
use crate::similarity;
use crate::types::{Exclusion, ExclusionReason, MatchResult, Ranking, UserId};

/// Orders candidate users by compatibility with an anchor user.
#[derive(Debug, Clone)]
pub struct MatchRanker {
    min_evidence: u32,
}

impl Default for MatchRanker {
    fn default() -> Self {
        Self {
            min_evidence: DEFAULT_MIN_EVIDENCE,
        }
    }
}

impl MatchRanker {
    pub fn new(min_evidence: u32) -> Self {
        Self { min_evidence }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.matching.min_evidence)
    }

    /// Rank candidates by descending score against the anchor profile.
    ///
    /// Candidates that cannot be scored are reported in
    /// [`Ranking::excluded`] with a reason instead of being silently
    /// dropped: empty profiles, pairs whose evidence count
    /// `min(n_anchor, n_candidate)` is below the configured minimum, and
    /// degenerate (zero-norm) profiles.
    ///
    /// Ties are broken by evidence count descending, then candidate id
    /// ascending, so the ordering is deterministic regardless of map
    /// iteration order.
    ///
    /// # Errors
    /// [`EngineError::UndefinedSimilarity`] when the anchor profile is
    /// empty or its mean has zero norm, since no candidate can be scored
    /// against it; [`EngineError::DimensionMismatch`] if any candidate
    /// profile has a different dimensionality, since that signals corrupted
    /// data rather than a per-candidate condition.
    pub fn rank(
        &self,
        anchor_id: &str,
        anchor: &UserProfile,
        candidates: &HashMap<UserId, UserProfile>,
    ) -> Result<Ranking> {
        let anchor_mean = anchor.mean().ok_or(EngineError::UndefinedSimilarity)?;
        // A degenerate anchor is the anchor's condition, not the candidates'.
        if math::l2_norm(&anchor_mean) == 0.0 {
            return Err(EngineError::UndefinedSimilarity);
        }

        let mut matches = Vec::new();
        let mut excluded = Vec::new();

        for (candidate_id, profile) in candidates {
            if profile.dim() != anchor.dim() {
                return Err(EngineError::DimensionMismatch {
                    expected: anchor.dim(),
                    got: profile.dim(),
                });
            }

            let Some(candidate_mean) = profile.mean() else {
                debug!(candidate = %candidate_id, "excluding candidate with empty profile");
                excluded.push(Exclusion {
                    candidate: candidate_id.clone(),
                    reason: ExclusionReason::EmptyProfile,
                });
                continue;
            };

            let evidence = anchor.track_count().min(profile.track_count());
            if evidence < self.min_evidence {
                debug!(
                    candidate = %candidate_id,
                    evidence,
                    required = self.min_evidence,
                    "excluding candidate below evidence threshold"
                );
                excluded.push(Exclusion {
                    candidate: candidate_id.clone(),
                    reason: ExclusionReason::BelowMinEvidence {
                        evidence,
                        required: self.min_evidence,
                    },
                });
                continue;
            }

            match similarity::similarity(&anchor_mean, &candidate_mean) {
                Ok(score) => matches.push(MatchResult {
                    anchor: anchor_id.to_string(),
                    candidate: candidate_id.clone(),
                    score,
                    evidence,
                }),
                // Non-empty tracks can still cancel out to a zero-norm mean.
                Err(EngineError::UndefinedSimilarity) => {
                    debug!(candidate = %candidate_id, "excluding candidate with degenerate profile");
                    excluded.push(Exclusion {
                        candidate: candidate_id.clone(),
                        reason: ExclusionReason::DegenerateProfile,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        matches.sort_by(|a, b| {
            b.score
                .signed()
                .partial_cmp(&a.score.signed())
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.evidence.cmp(&a.evidence))
                .then_with(|| a.candidate.cmp(&b.candidate))
        });
        excluded.sort_by(|a, b| a.candidate.cmp(&b.candidate));

        Ok(Ranking { matches, excluded })
    }
}
