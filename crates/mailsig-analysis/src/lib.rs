//! # mailsig-analysis
//!
//! Reads batches of email detection-signal rows, decides which signals are
//! active, evaluates classification rules, runs the No-Action triage, and
//! renders text/CSV/JSON reports.

pub mod analysis;
pub mod columns;
pub mod ingest;
pub mod report;
pub mod rules;
pub mod signals;
pub mod triage;

pub use analysis::{Analyzer, BatchAnalysis, EmailAnalysis};
pub use ingest::{read_batch, select, Batch, Selection, SelectionStrategy};
pub use rules::{classify, evaluate, ClassificationRule, Predicate, RuleSet};
pub use signals::{active_signals, SignalCategory, SignalRegistry};
pub use triage::{TriageEngine, TriageOutcome};
