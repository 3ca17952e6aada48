use num_complex::Complex64;
use std::f64::consts::PI;

use firetensor::quantum::embedding::embed;
use firetensor::quantum::gate::{self, constants, RotationGate, SingleQubitGate, TwoQubitGate};
use firetensor::quantum::tensor::{self, approx_eq, identity, kron, ComplexMatrix};
use firetensor::SimulatorError;

/// Helper function for comparing complex numbers with tolerance
fn complex_approx_eq(a: Complex64, b: Complex64, epsilon: f64) -> bool {
    (a - b).norm() < epsilon
}

/// Reference operator for a CNOT built straight from bit arithmetic
fn cnot_by_bits(control: usize, target: usize, n: usize) -> ComplexMatrix {
    let dim = 1 << n;
    let mut m = ComplexMatrix::zeros((dim, dim));
    for x in 0..dim {
        let control_bit = (x >> (n - 1 - control)) & 1;
        let y = x ^ (control_bit << (n - 1 - target));
        m[[y, x]] = Complex64::new(1.0, 0.0);
    }
    m
}

#[test]
fn test_hadamard_entries() {
    let h = gate::hadamard();
    let s = constants::FRAC_1_SQRT_2;
    assert!(complex_approx_eq(h[[0, 0]], Complex64::new(s, 0.0), 1e-12));
    assert!(complex_approx_eq(h[[0, 1]], Complex64::new(s, 0.0), 1e-12));
    assert!(complex_approx_eq(h[[1, 0]], Complex64::new(s, 0.0), 1e-12));
    assert!(complex_approx_eq(h[[1, 1]], Complex64::new(-s, 0.0), 1e-12));
}

#[test]
fn test_cnot_basis_ordering() {
    // Control is the high bit of the local block: |10⟩ <-> |11⟩
    let cnot = gate::cnot();
    assert_eq!(cnot[[3, 2]], constants::ONE);
    assert_eq!(cnot[[2, 3]], constants::ONE);
    assert_eq!(cnot[[1, 1]], constants::ONE);
    assert_eq!(cnot[[0, 0]], constants::ONE);
}

#[test]
fn test_enum_matrices_match_catalog() {
    assert!(approx_eq(&SingleQubitGate::H.matrix(), &gate::hadamard(), 1e-12));
    assert!(approx_eq(&SingleQubitGate::X.matrix(), &gate::pauli_x(), 1e-12));
    assert!(approx_eq(&SingleQubitGate::Z.matrix(), &gate::pauli_z(), 1e-12));
    assert!(approx_eq(&RotationGate::Rz.matrix(0.7), &gate::rz(0.7), 1e-12));
    assert!(approx_eq(&TwoQubitGate::Cnot.matrix(), &gate::cnot(), 1e-12));
}

#[test]
fn test_rotation_relations() {
    // Rx(π) = -iX, Ry(π) = -iY
    let minus_i = Complex64::new(0.0, -1.0);
    assert!(approx_eq(&gate::rx(PI), &gate::pauli_x().mapv(|z| z * minus_i), 1e-12));
    assert!(approx_eq(&gate::ry(PI), &gate::pauli_y().mapv(|z| z * minus_i), 1e-12));

    // Rz angles add
    let composed = tensor::matmul(&gate::rz(0.4), &gate::rz(0.9)).unwrap();
    assert!(approx_eq(&composed, &gate::rz(1.3), 1e-12));
}

#[test]
fn test_hzh_equals_x() {
    let h = gate::hadamard();
    let hz = tensor::matmul(&h, &gate::pauli_z()).unwrap();
    let hzh = tensor::matmul(&hz, &h).unwrap();
    assert!(approx_eq(&hzh, &gate::pauli_x(), 1e-12));
}

#[test]
fn test_embed_single_qubit_in_middle() {
    let z = gate::pauli_z();
    let full = embed(&z, &[1], 3).unwrap();
    let expected = kron(&kron(&identity(2), &z), &identity(2));
    assert!(approx_eq(&full, &expected, 1e-12));
}

#[test]
fn test_embed_cnot_every_placement() {
    for n in 2..=4 {
        for control in 0..n {
            for target in 0..n {
                if control == target {
                    continue;
                }
                let full = embed(&gate::cnot(), &[control, target], n).unwrap();
                assert!(
                    approx_eq(&full, &cnot_by_bits(control, target, n), 1e-12),
                    "CNOT({}, {}) on {} qubits embedded incorrectly",
                    control, target, n
                );
            }
        }
    }
}

#[test]
fn test_embedded_operators_stay_unitary() {
    let full = embed(&gate::cz(), &[3, 0], 4).unwrap();
    assert!(tensor::is_unitary(&full, 1e-12));

    let full = embed(&gate::ry(1.1), &[2], 4).unwrap();
    assert!(tensor::is_unitary(&full, 1e-12));
}

#[test]
fn test_embed_out_of_range_and_duplicates() {
    assert_eq!(
        embed(&gate::pauli_x(), &[2], 2).unwrap_err(),
        SimulatorError::qubit_out_of_range(2, 2)
    );
    assert_eq!(
        embed(&gate::cnot(), &[0, 0], 2).unwrap_err(),
        SimulatorError::duplicate_qubit(0, 2)
    );
}
