//! Per-user taste profile aggregation.
//!
//! A profile is the running, un-normalized sum of a user's track vectors
//! plus the contributing track count. Keeping the sum rather than the mean
//! makes add/remove O(1) with no recomputation over the track list, and each
//! track contributes exactly once regardless of update order.
//!
//! Profiles are caller-owned snapshots: the engine never caches or mutates
//! them across calls, and concurrent updates for the same user must be
//! serialized by the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::types::TrackVector;

/// Running aggregate of a user's track vectors.
///
/// Invariant: `track_count == 0` implies the sum is exactly the zero vector
/// ("empty" profile, not comparable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    sum: Vec<f32>,
    track_count: u32,
}

impl UserProfile {
    /// An empty profile of the given dimensionality.
    pub fn new(dim: usize) -> Self {
        Self {
            sum: vec![0.0; dim],
            track_count: 0,
        }
    }

    pub fn dim(&self) -> usize {
        self.sum.len()
    }

    /// Number of contributing tracks
    pub fn track_count(&self) -> u32 {
        self.track_count
    }

    /// An empty profile has no contributing tracks and cannot be compared.
    pub fn is_empty(&self) -> bool {
        self.track_count == 0
    }

    /// Add a track's vector to the profile.
    ///
    /// Unusable (zero) vectors are skipped without incrementing the track
    /// count, so degenerate tracks never dilute the average.
    ///
    /// # Errors
    /// [`EngineError::DimensionMismatch`] if the vector does not match the
    /// profile's dimensionality; the profile is left unchanged.
    pub fn add_track(&mut self, track: &TrackVector) -> Result<()> {
        self.check_dim(track)?;
        if !track.is_usable() {
            debug!(track_count = self.track_count, "skipping unusable track");
            return Ok(());
        }

        for (acc, &v) in self.sum.iter_mut().zip(track.as_slice()) {
            *acc += v;
        }
        self.track_count += 1;
        Ok(())
    }

    /// Remove a previously added track's vector from the profile.
    ///
    /// The aggregator trusts the caller's track bookkeeping; it only asserts
    /// that the count never goes negative. Unusable vectors are skipped
    /// symmetrically to [`Self::add_track`].
    ///
    /// # Errors
    /// [`EngineError::EmptyProfileRemoval`] when removing from an empty
    /// profile, [`EngineError::DimensionMismatch`] on mismatched input. The
    /// profile is left unchanged in both cases.
    pub fn remove_track(&mut self, track: &TrackVector) -> Result<()> {
        self.check_dim(track)?;
        if !track.is_usable() {
            return Ok(());
        }
        if self.track_count == 0 {
            return Err(EngineError::EmptyProfileRemoval);
        }

        for (acc, &v) in self.sum.iter_mut().zip(track.as_slice()) {
            *acc -= v;
        }
        self.track_count -= 1;
        if self.track_count == 0 {
            // Restore the empty-profile invariant exactly, no float residue.
            self.sum.fill(0.0);
        }
        Ok(())
    }

    /// The profile's mean vector, or `None` when the profile is empty.
    pub fn mean(&self) -> Option<Vec<f32>> {
        if self.track_count == 0 {
            return None;
        }
        let n = self.track_count as f32;
        Some(self.sum.iter().map(|v| v / n).collect())
    }

    fn check_dim(&self, track: &TrackVector) -> Result<()> {
        if track.dim() != self.dim() {
            return Err(EngineError::DimensionMismatch {
                expected: self.dim(),
                got: track.dim(),
            });
        }
        Ok(())
    }
}
