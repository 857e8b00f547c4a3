//! Run state machine
//!
//! Explicit, finite, and deterministic lifecycle of one autonomous run.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{EndReason, State};
