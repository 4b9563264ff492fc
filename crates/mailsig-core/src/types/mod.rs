//! Row, value, and signal types shared across the workspace.

pub mod email_id;
pub mod row;
pub mod signal;
pub mod value;

pub use email_id::EmailId;
pub use row::{Row, Schema};
pub use signal::{ActivePredicate, SignalDefinition, SignalKind};
pub use value::SignalValue;
