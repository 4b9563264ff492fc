//! Per-email and per-batch signal analysis feeding the reporters.

pub mod batch;
pub mod email;

pub use batch::{Analyzer, BatchAnalysis, BatchStats, SignalFrequency};
pub use email::EmailAnalysis;
