//! Music taste matching engine.
//!
//! Computes pairwise "music compatibility" between users from MFCC-derived
//! track feature vectors. Raw per-frame coefficients are collapsed into one
//! normalized vector per track, aggregated into a per-user taste profile,
//! and compared with cosine similarity; a ranker orders candidate users
//! against an anchor user and reports unrankable candidates with a reason.
//!
//! The crate is a pure in-process library: fetching audio features,
//! persisting track vectors and profiles, and rendering scores to users all
//! belong to the caller.

pub mod config;
pub mod error;
pub mod math;
pub mod normalizer;
pub mod profile;
pub mod rank;
pub mod similarity;
pub mod types;

pub use config::EngineConfig;
pub use error::{EngineError, ErrorKind, Result};
pub use normalizer::FrameNormalizer;
pub use profile::UserProfile;
pub use rank::MatchRanker;
pub use similarity::{profile_similarity, similarity};
pub use types::{Exclusion, ExclusionReason, MatchResult, Ranking, Score, TrackVector, UserId};
