//! No-Action triage: which emails could be closed without action, which
//! already are, and which sit on the border.

pub mod auth;
pub mod engine;
pub mod summary;

pub use auth::{auth_results, auth_score, AuthResults};
pub use engine::{
    BorderlineEntry, CandidateStatus, TierMatch, TriageEngine, TriageEntry, TriageOutcome,
};
pub use summary::PatternSummary;
