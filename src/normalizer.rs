//! Per-track feature normalization.
//!
//! Collapses a track's MFCC frames into one fixed-length vector: the
//! coefficient-wise mean across frames (dropping the time axis, since taste
//! matching compares spectral character rather than rhythm) followed by L2
//! normalization so that track length and loudness do not bias the cosine
//! comparison downstream.

use tracing::debug;

use crate::config::{EngineConfig, DEFAULT_DIM};
use crate::error::{EngineError, Result};
use crate::math;
use crate::types::TrackVector;

/// Normalizes raw MFCC frames into per-track vectors of a fixed
/// dimensionality.
#[derive(Debug, Clone)]
pub struct FrameNormalizer {
    dim: usize,
}

impl Default for FrameNormalizer {
    fn default() -> Self {
        Self { dim: DEFAULT_DIM }
    }
}

impl FrameNormalizer {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.profile.dim)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Compute the normalized track vector for a sequence of frames.
    ///
    /// Pure function of its input. A mean with zero norm (silent or
    /// degenerate audio) yields a zero vector flagged unusable via
    /// [`TrackVector::is_usable`] rather than a division by zero.
    ///
    /// # Errors
    /// [`EngineError::EmptyFrames`] for an empty sequence,
    /// [`EngineError::DimensionMismatch`] for any frame of the wrong length.
    pub fn track_vector(&self, frames: &[Vec<f32>]) -> Result<TrackVector> {
        if frames.is_empty() {
            return Err(EngineError::EmptyFrames);
        }

        let mut mean = vec![0.0f32; self.dim];
        for frame in frames {
            if frame.len() != self.dim {
                return Err(EngineError::DimensionMismatch {
                    expected: self.dim,
                    got: frame.len(),
                });
            }
            for (acc, &v) in mean.iter_mut().zip(frame) {
                *acc += v;
            }
        }

        let count = frames.len() as f32;
        for v in &mut mean {
            *v /= count;
        }

        if math::l2_norm(&mean) == 0.0 {
            debug!(frames = frames.len(), "zero-norm mean, track is unusable");
            return Ok(TrackVector::unusable(self.dim));
        }

        math::normalize_in_place(&mut mean);
        Ok(TrackVector::new(mean))
    }

    /// Decode a persisted MFCC blob into frames.
    ///
    /// The storage layer keeps raw coefficients as a little-endian `f32`
    /// matrix laid out coefficient-major: `dim` rows of `T` columns, so the
    /// first `T` values are coefficient 0 across time. Output is `T` frames
    /// of `dim` coefficients each, ready for [`Self::track_vector`].
    ///
    /// # Errors
    /// [`EngineError::InvalidBlob`] if the byte length is not a whole number
    /// of `f32`s divisible into `dim` rows, or the blob is empty.
    pub fn frames_from_bytes(&self, bytes: &[u8]) -> Result<Vec<Vec<f32>>> {
        let invalid = || EngineError::InvalidBlob {
            len: bytes.len(),
            dim: self.dim,
        };

        if self.dim == 0 || bytes.len() % 4 != 0 {
            return Err(invalid());
        }
        let total = bytes.len() / 4;
        if total == 0 || total % self.dim != 0 {
            return Err(invalid());
        }

        let frame_count = total / self.dim;
        let mut frames = vec![vec![0.0f32; self.dim]; frame_count];
        for (i, chunk) in bytes.chunks_exact(4).enumerate() {
            let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            frames[i % frame_count][i / frame_count] = value;
        }

        Ok(frames)
    }
}
