//! Observability for mailsig.
//! `tracing` crate with `EnvFilter`, per-module log levels.

pub mod events;
pub mod setup;

pub use setup::{init_tracing, init_tracing_with_default};
