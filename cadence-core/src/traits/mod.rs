//! Collaborator traits
//!
//! These traits define the narrow interface between the sequencer and the
//! robot subsystems it commands. Concrete implementations live in
//! `cadence-drivers` or in the robot framework glue.

pub mod clock;
pub mod drive;
pub mod feeder;
pub mod infrastructure;
pub mod shooter;

pub use clock::Clock;
pub use drive::{Drive, DriveCommand};
pub use feeder::Feeder;
pub use infrastructure::Infrastructure;
pub use shooter::Shooter;
