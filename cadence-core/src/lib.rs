//! Board-agnostic core of the autonomous sequencer
//!
//! This crate contains all autonomous logic that does not depend on
//! specific robot hardware:
//!
//! - Collaborator traits (drive, feeder, shooter, infrastructure, clock)
//! - Tick and pressure gates
//! - Run state machine
//! - Phase tables and the routines built from them
//! - The lifecycle command the scheduler drives
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod gate;
pub mod routine;
pub mod sequencer;
pub mod state;
pub mod status;
pub mod traits;

#[cfg(test)]
mod testing;
