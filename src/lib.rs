//! Gate-based quantum circuit simulator
//!
//! Circuits are ordered lists of [`quantum::Instruction`]s. Each gate is
//! embedded into the full register space as a dense operator and applied to
//! the state vector in program order; measurements sample and collapse the
//! state and feed a classical record that conditional blocks read back.
//!
//! Qubit 0 is the most significant bit of every basis index.

pub mod config;
pub mod error;
pub mod quantum;
pub mod simulators;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::config::SimulatorConfig;
    pub use crate::error::{Result, SimulatorError};
    pub use crate::quantum::prelude::*;
    pub use crate::simulators::{
        AcceleratorBuffer, MeasurementRecord, SimulatedQubits, StatevectorAccelerator,
        StatevectorSimulator,
    };
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
