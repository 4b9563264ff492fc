//! Signal classifier: which signals of a row are active, what they are
//! about, and how risky the row looks.

pub mod active;
pub mod category;
pub mod registry;
pub mod risk;

pub use active::{active_signals, active_values, ActiveSignal};
pub use category::SignalCategory;
pub use registry::SignalRegistry;
pub use risk::{HighRiskIndicator, Recommendation, RiskLevel, RiskModel};
