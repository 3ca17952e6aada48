// src/quantum/instruction.rs
//! Gate instructions consumed by the simulator
//!
//! Circuits arrive as an ordered slice of [`Instruction`]s, already parsed by
//! whatever front end produced them. The simulator only reads them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulatorError};
use super::gate::{RotationGate, SingleQubitGate, TwoQubitGate};
use super::state::Outcome;

/// One instruction of a circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Fixed single-qubit unitary
    Single { gate: SingleQubitGate, target: usize },

    /// Parametrized single-qubit rotation
    Rotation {
        gate: RotationGate,
        target: usize,
        angle: f64,
    },

    /// Two-qubit unitary on (control, target)
    Controlled {
        gate: TwoQubitGate,
        control: usize,
        target: usize,
    },

    /// Measure `target` in the computational basis and record the bit under `key`
    Measure { target: usize, key: usize },

    /// Run `body` only when the bit recorded under `key` equals `guard`
    Conditional {
        key: usize,
        guard: Outcome,
        body: Vec<Instruction>,
    },

    /// An instruction kind this simulator does not implement
    Opaque { name: String, qubits: Vec<usize> },
}

impl Instruction {
    /// Hadamard on `target`
    pub fn h(target: usize) -> Self {
        Instruction::Single { gate: SingleQubitGate::H, target }
    }

    /// Pauli-X on `target`
    pub fn x(target: usize) -> Self {
        Instruction::Single { gate: SingleQubitGate::X, target }
    }

    /// Pauli-Y on `target`
    pub fn y(target: usize) -> Self {
        Instruction::Single { gate: SingleQubitGate::Y, target }
    }

    /// Pauli-Z on `target`
    pub fn z(target: usize) -> Self {
        Instruction::Single { gate: SingleQubitGate::Z, target }
    }

    /// Rx rotation
    pub fn rx(target: usize, angle: f64) -> Self {
        Instruction::Rotation { gate: RotationGate::Rx, target, angle }
    }

    /// Ry rotation
    pub fn ry(target: usize, angle: f64) -> Self {
        Instruction::Rotation { gate: RotationGate::Ry, target, angle }
    }

    /// Rz rotation
    pub fn rz(target: usize, angle: f64) -> Self {
        Instruction::Rotation { gate: RotationGate::Rz, target, angle }
    }

    /// CNOT gate
    pub fn cnot(control: usize, target: usize) -> Self {
        Instruction::Controlled { gate: TwoQubitGate::Cnot, control, target }
    }

    /// Controlled-Z gate
    pub fn cz(control: usize, target: usize) -> Self {
        Instruction::Controlled { gate: TwoQubitGate::Cz, control, target }
    }

    /// SWAP gate
    pub fn swap(qubit1: usize, qubit2: usize) -> Self {
        Instruction::Controlled {
            gate: TwoQubitGate::Swap,
            control: qubit1,
            target: qubit2,
        }
    }

    /// Measurement of `target` recorded under `key`
    pub fn measure(target: usize, key: usize) -> Self {
        Instruction::Measure { target, key }
    }

    /// Conditional block
    pub fn conditional(key: usize, guard: Outcome, body: Vec<Instruction>) -> Self {
        Instruction::Conditional { key, guard, body }
    }

    /// Display name of the instruction
    pub fn name(&self) -> String {
        match self {
            Instruction::Single { gate, .. } => gate.name().to_string(),
            Instruction::Rotation { gate, angle, .. } => format!("{}({:.2})", gate, angle),
            Instruction::Controlled { gate, .. } => gate.name().to_string(),
            Instruction::Measure { .. } => "Measure".to_string(),
            Instruction::Conditional { .. } => "Conditional".to_string(),
            Instruction::Opaque { name, .. } => name.clone(),
        }
    }

    /// Qubits this instruction operates on directly (nested bodies excluded)
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Instruction::Single { target, .. }
            | Instruction::Rotation { target, .. }
            | Instruction::Measure { target, .. } => vec![*target],
            Instruction::Controlled { control, target, .. } => vec![*control, *target],
            Instruction::Conditional { .. } => Vec::new(),
            Instruction::Opaque { qubits, .. } => qubits.clone(),
        }
    }

    /// Largest qubit index referenced, including nested bodies
    pub fn max_qubit_index(&self) -> Option<usize> {
        match self {
            Instruction::Conditional { body, .. } => max_qubit_index(body),
            other => other.qubits().into_iter().max(),
        }
    }

    /// Check every qubit reference (nested included) against a register size.
    ///
    /// Out-of-range references fail with `BufferTooSmall`; an instruction
    /// naming the same qubit twice fails with `InvalidQubitIndex`.
    pub fn validate(&self, qubit_count: usize) -> Result<()> {
        if let Instruction::Conditional { body, .. } = self {
            return validate_all(body, qubit_count);
        }

        let qubits = self.qubits();
        for (i, &q) in qubits.iter().enumerate() {
            if q >= qubit_count {
                return Err(SimulatorError::buffer_too_small(q + 1, qubit_count));
            }
            if qubits[..i].contains(&q) {
                return Err(SimulatorError::duplicate_qubit(q, qubit_count));
            }
        }
        Ok(())
    }
}

/// Largest qubit index referenced by any instruction in `instructions`
pub fn max_qubit_index(instructions: &[Instruction]) -> Option<usize> {
    instructions.iter().filter_map(Instruction::max_qubit_index).max()
}

/// Number of qubits a circuit needs
pub fn required_qubits(instructions: &[Instruction]) -> usize {
    max_qubit_index(instructions).map_or(0, |q| q + 1)
}

/// Validate every instruction against a register size
pub fn validate_all(instructions: &[Instruction], qubit_count: usize) -> Result<()> {
    let required = required_qubits(instructions);
    if required > qubit_count {
        return Err(SimulatorError::buffer_too_small(required, qubit_count));
    }
    instructions.iter().try_for_each(|instr| instr.validate(qubit_count))
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Conditional { key, guard, body } => {
                write!(f, "if c[{}] == {} {{ {} instructions }}", key, guard, body.len())
            }
            Instruction::Measure { target, key } => write!(f, "Measure q{} -> c[{}]", target, key),
            other => {
                write!(f, "{}", other.name())?;
                for q in other.qubits() {
                    write!(f, " q{}", q)?;
                }
                Ok(())
            }
        }
    }
}
