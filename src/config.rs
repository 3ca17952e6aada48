//! Simulator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulatorError};

/// Default ceiling on the number of simulated qubits.
///
/// Embedded operators are dense 2^N × 2^N matrices, so memory grows as 4^N.
pub const DEFAULT_MAX_QUBITS: usize = 10;

/// Hard upper bound accepted for `max_qubits`.
///
/// At 12 qubits one embedded operator takes 256 MiB.
pub const HARD_MAX_QUBITS: usize = 12;

/// Configuration shared by every run of an accelerator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest register the accelerator will allocate.
    pub max_qubits: usize,
    /// Seed for measurement sampling. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Allowed deviation of the squared norm from 1.
    pub normalization_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
            normalization_tolerance: 1e-10,
        }
    }
}

impl SimulatorConfig {
    /// Set the qubit ceiling.
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Fix the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the normalization tolerance.
    pub fn with_normalization_tolerance(mut self, tolerance: f64) -> Self {
        self.normalization_tolerance = tolerance;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 || self.max_qubits > HARD_MAX_QUBITS {
            return Err(SimulatorError::invalid_parameter(
                "max_qubits",
                format!("must be in 1..={}", HARD_MAX_QUBITS),
            ));
        }
        if !(self.normalization_tolerance > 0.0 && self.normalization_tolerance < 1.0) {
            return Err(SimulatorError::invalid_parameter(
                "normalization_tolerance",
                "must be in (0, 1)",
            ));
        }
        Ok(())
    }
}
