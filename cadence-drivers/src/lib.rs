//! Collaborator implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cadence-core:
//!
//! - Analog pressure transducer
//! - DIO status-signal output over embedded-hal pins
//! - Pneumatic hub combining both into `Infrastructure`
//! - Proportional turn-to-angle controller
//! - Simulated subsystems for host-side runs

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod pneumatics;
pub mod pressure;
pub mod sim;
pub mod status;
pub mod turn;
