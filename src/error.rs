//! Error types for the simulator.
//!
//! Every failure the simulator can report is a variant of [`SimulatorError`].

use thiserror::Error;

use crate::quantum::state::Outcome;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur while building operators or running circuits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Matrix or vector dimensions do not line up. Always an internal bug.
    #[error("Dimension mismatch in {operation}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Operation that detected the mismatch.
        operation: &'static str,
        /// Expected dimension.
        expected: usize,
        /// Actual dimension encountered.
        actual: usize,
    },

    /// A gate targets a qubit outside the register or repeats a qubit.
    #[error("Invalid qubit index {index} for {qubit_count}-qubit register: {reason}")]
    InvalidQubitIndex {
        /// Offending index.
        index: usize,
        /// Size of the register.
        qubit_count: usize,
        /// Why the index was rejected.
        reason: &'static str,
    },

    /// The circuit references more qubits than the buffer holds.
    #[error("Buffer too small: circuit requires {required} qubits, buffer has {available}")]
    BufferTooSmall {
        /// Qubits the circuit needs.
        required: usize,
        /// Qubits allocated in the buffer.
        available: usize,
    },

    /// The instruction kind is not implemented by this simulator.
    #[error("Unsupported instruction: {name}")]
    UnsupportedInstruction {
        /// Name of the instruction.
        name: String,
    },

    /// The drawn measurement outcome has (numerically) zero probability.
    #[error("Zero probability for outcome {outcome} on qubit {qubit} (p={probability:e})")]
    MeasurementOfZeroProbabilityState {
        /// Measured qubit.
        qubit: usize,
        /// Outcome that was selected.
        outcome: Outcome,
        /// Probability of that outcome.
        probability: f64,
    },

    /// A state vector does not have unit norm.
    #[error("State vector is not normalized (norm^2 = {norm_sqr})")]
    NotNormalized {
        /// Squared norm that was found.
        norm_sqr: f64,
    },

    /// The requested buffer size exceeds what the simulator accepts.
    #[error("Invalid buffer size {requested}: at most {max} qubits are supported")]
    InvalidBufferSize {
        /// Requested qubit count.
        requested: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// No buffer is registered under the given name.
    #[error("Unknown buffer '{0}'")]
    UnknownBuffer(String),

    /// A buffer with that name is already registered.
    #[error("Buffer '{0}' already exists")]
    DuplicateBuffer(String),

    /// Invalid configuration value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Reason why the parameter is invalid.
        reason: String,
    },
}

impl SimulatorError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(operation: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { operation, expected, actual }
    }

    /// Create an out-of-range qubit error.
    pub fn qubit_out_of_range(index: usize, qubit_count: usize) -> Self {
        Self::InvalidQubitIndex {
            index,
            qubit_count,
            reason: "out of range",
        }
    }

    /// Create a duplicated qubit error.
    pub fn duplicate_qubit(index: usize, qubit_count: usize) -> Self {
        Self::InvalidQubitIndex {
            index,
            qubit_count,
            reason: "duplicated within one gate",
        }
    }

    /// Create a buffer-too-small error.
    pub fn buffer_too_small(required: usize, available: usize) -> Self {
        Self::BufferTooSmall { required, available }
    }

    /// Create an unsupported instruction error.
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedInstruction { name: name.into() }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error signals a bug inside the simulator rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::MeasurementOfZeroProbabilityState { .. }
        )
    }
}
