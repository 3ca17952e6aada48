// src/quantum/gate.rs
//! Gate catalog
//!
//! Canonical unitaries for the gates the simulator understands. Two-qubit
//! matrices use the standard basis ordering |control, target⟩ with the
//! control as the most significant bit of the local block.

use std::fmt;

use num_complex::Complex64;
use ndarray::array;
use serde::{Deserialize, Serialize};

use super::tensor::ComplexMatrix;

/// Common complex numbers used in quantum gates
pub mod constants {
    use num_complex::Complex64;

    /// The imaginary unit i
    pub const I: Complex64 = Complex64::new(0.0, 1.0);

    /// Complex one
    pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

    /// Complex zero
    pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

    /// 1/sqrt(2)
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
}

use constants::{I, ONE, ZERO};

/// Hadamard gate
pub fn hadamard() -> ComplexMatrix {
    let factor = Complex64::new(constants::FRAC_1_SQRT_2, 0.0);
    array![
        [factor, factor],
        [factor, -factor]
    ]
}

/// Pauli-X (NOT)
pub fn pauli_x() -> ComplexMatrix {
    array![
        [ZERO, ONE],
        [ONE, ZERO]
    ]
}

/// Pauli-Y
pub fn pauli_y() -> ComplexMatrix {
    array![
        [ZERO, -I],
        [I, ZERO]
    ]
}

/// Pauli-Z
pub fn pauli_z() -> ComplexMatrix {
    array![
        [ONE, ZERO],
        [ZERO, -ONE]
    ]
}

/// Rotation about X: exp(-iθX/2)
pub fn rx(theta: f64) -> ComplexMatrix {
    let cos = Complex64::new((theta / 2.0).cos(), 0.0);
    let sin = Complex64::new(0.0, -(theta / 2.0).sin());
    array![
        [cos, sin],
        [sin, cos]
    ]
}

/// Rotation about Y: exp(-iθY/2)
pub fn ry(theta: f64) -> ComplexMatrix {
    let cos = Complex64::new((theta / 2.0).cos(), 0.0);
    let sin = Complex64::new((theta / 2.0).sin(), 0.0);
    array![
        [cos, -sin],
        [sin, cos]
    ]
}

/// Rotation about Z as diag(1, e^{iθ}).
pub fn rz(theta: f64) -> ComplexMatrix {
    array![
        [ONE, ZERO],
        [ZERO, Complex64::from_polar(1.0, theta)]
    ]
}

/// Controlled-NOT
pub fn cnot() -> ComplexMatrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE],
        [ZERO, ZERO, ONE, ZERO]
    ]
}

/// Controlled-Z
pub fn cz() -> ComplexMatrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ZERO, ZERO, -ONE]
    ]
}

/// SWAP
pub fn swap() -> ComplexMatrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE]
    ]
}

/// Fixed single-qubit gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SingleQubitGate {
    /// Hadamard gate
    H,
    /// Pauli-X gate (NOT gate)
    X,
    /// Pauli-Y gate
    Y,
    /// Pauli-Z gate
    Z,
}

impl SingleQubitGate {
    /// Returns the 2×2 matrix of this gate
    pub fn matrix(&self) -> ComplexMatrix {
        match self {
            SingleQubitGate::H => hadamard(),
            SingleQubitGate::X => pauli_x(),
            SingleQubitGate::Y => pauli_y(),
            SingleQubitGate::Z => pauli_z(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SingleQubitGate::H => "H",
            SingleQubitGate::X => "X",
            SingleQubitGate::Y => "Y",
            SingleQubitGate::Z => "Z",
        }
    }
}

/// Single-qubit rotations taking one angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationGate {
    /// Rotation around X-axis
    Rx,
    /// Rotation around Y-axis
    Ry,
    /// Rotation around Z-axis
    Rz,
}

impl RotationGate {
    /// Returns the 2×2 matrix for the given angle
    pub fn matrix(&self, angle: f64) -> ComplexMatrix {
        match self {
            RotationGate::Rx => rx(angle),
            RotationGate::Ry => ry(angle),
            RotationGate::Rz => rz(angle),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RotationGate::Rx => "Rx",
            RotationGate::Ry => "Ry",
            RotationGate::Rz => "Rz",
        }
    }
}

/// Fixed two-qubit gates, operands ordered (control, target)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TwoQubitGate {
    /// CNOT gate
    Cnot,
    /// Controlled-Z gate
    Cz,
    /// SWAP gate
    Swap,
}

impl TwoQubitGate {
    /// Returns the 4×4 matrix of this gate
    pub fn matrix(&self) -> ComplexMatrix {
        match self {
            TwoQubitGate::Cnot => cnot(),
            TwoQubitGate::Cz => cz(),
            TwoQubitGate::Swap => swap(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TwoQubitGate::Cnot => "CNOT",
            TwoQubitGate::Cz => "CZ",
            TwoQubitGate::Swap => "SWAP",
        }
    }
}

impl fmt::Display for SingleQubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for RotationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TwoQubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantum::tensor::{is_unitary, matmul, approx_eq, identity};
    use std::f64::consts::PI;

    #[test]
    fn test_catalog_is_unitary() {
        for m in [hadamard(), pauli_x(), pauli_y(), pauli_z(), cnot(), cz(), swap()] {
            assert!(is_unitary(&m, 1e-12));
        }
        for theta in [0.0, 0.3, PI / 2.0, PI, 2.5 * PI] {
            assert!(is_unitary(&rx(theta), 1e-12));
            assert!(is_unitary(&ry(theta), 1e-12));
            assert!(is_unitary(&rz(theta), 1e-12));
        }
    }

    #[test]
    fn test_rz_convention() {
        let m = rz(PI / 2.0);
        assert!((m[[0, 0]] - ONE).norm() < 1e-12);
        assert!((m[[1, 1]] - I).norm() < 1e-12);

        // Rz(π) = Z
        assert!(approx_eq(&rz(PI), &pauli_z(), 1e-12));
    }

    #[test]
    fn test_involutions() {
        for m in [hadamard(), pauli_x(), pauli_z(), cnot()] {
            let squared = matmul(&m, &m).unwrap();
            assert!(approx_eq(&squared, &identity(m.nrows()), 1e-12));
        }
    }
}
