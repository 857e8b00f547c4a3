//! Configuration types
//!
//! Run-time knobs of the sequencer. Phase tables are compile-time constants
//! and are not configurable.

pub mod types;

pub use types::*;
