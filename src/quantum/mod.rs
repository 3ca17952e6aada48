// src/quantum/mod.rs
//! Quantum building blocks
//!
//! Dense tensor algebra, the gate catalog, operator embedding, the
//! instruction model and the state vector.

pub mod tensor;
pub mod gate;
pub mod embedding;
pub mod instruction;
pub mod state;

pub use tensor::{ComplexMatrix, ComplexVector};
pub use gate::{SingleQubitGate, RotationGate, TwoQubitGate};
pub use embedding::embed;
pub use instruction::Instruction;
pub use state::{StateVector, Outcome};

/// Re-export commonly used types
pub mod prelude {
    pub use super::{ComplexMatrix, ComplexVector};
    pub use super::{SingleQubitGate, RotationGate, TwoQubitGate};
    pub use super::{Instruction, StateVector, Outcome};
    pub use super::embed;
}
