// src/quantum/embedding.rs
//! Embedding of small gate matrices into the full register space
//!
//! A k-qubit gate acting on an N-qubit register becomes a 2^N × 2^N operator.
//! Single-qubit gates are tensored with identities in place. Gates on several
//! qubits are handled by permuting the register so that the operands occupy
//! the leading positions in operand order, applying `G ⊗ I` there, and
//! permuting back: `Pᵀ (G ⊗ I) P`. This works for operands at any distance
//! and in any order.

use crate::error::{Result, SimulatorError};
use super::tensor::{self, ComplexMatrix};

/// Check that `targets` are distinct and inside an `total_qubits` register.
pub fn validate_targets(targets: &[usize], total_qubits: usize) -> Result<()> {
    for (i, &q) in targets.iter().enumerate() {
        if q >= total_qubits {
            return Err(SimulatorError::qubit_out_of_range(q, total_qubits));
        }
        if targets[..i].contains(&q) {
            return Err(SimulatorError::duplicate_qubit(q, total_qubits));
        }
    }
    Ok(())
}

/// Build the full-register operator of `gate` acting on `targets`.
///
/// `targets[0]` corresponds to the most significant bit of the gate's local
/// basis, so for a controlled gate it is the control.
pub fn embed(gate: &ComplexMatrix, targets: &[usize], total_qubits: usize) -> Result<ComplexMatrix> {
    validate_targets(targets, total_qubits)?;

    let k = targets.len();
    let local_dim = 1usize << k;
    if k == 0 || gate.nrows() != local_dim || gate.ncols() != local_dim {
        return Err(SimulatorError::dimension_mismatch(
            "embed (gate size vs. target count)",
            local_dim,
            gate.nrows(),
        ));
    }

    if k == 1 {
        return Ok(embed_single(gate, targets[0], total_qubits));
    }

    // Operands first, remaining qubits after them in register order
    let order: Vec<usize> = targets
        .iter()
        .copied()
        .chain((0..total_qubits).filter(|q| !targets.contains(q)))
        .collect();

    let block = tensor::kron(gate, &tensor::identity(1 << (total_qubits - k)));

    if is_identity_order(&order) {
        return Ok(block);
    }

    let permutation = tensor::basis_permutation(&order)?;
    Ok(tensor::conjugate_by_permutation(&block, &permutation))
}

/// I ⊗ … ⊗ G ⊗ … ⊗ I with G at `target`
fn embed_single(gate: &ComplexMatrix, target: usize, total_qubits: usize) -> ComplexMatrix {
    let left = tensor::identity(1 << target);
    let right = tensor::identity(1 << (total_qubits - 1 - target));
    tensor::kron_all([&left, gate, &right])
}

fn is_identity_order(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(position, &q)| position == q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantum::gate::{cnot, pauli_x, swap};
    use crate::quantum::tensor::{approx_eq, identity, kron};

    #[test]
    fn test_single_qubit_positions() {
        let x = pauli_x();
        let on_first = embed(&x, &[0], 2).unwrap();
        assert!(approx_eq(&on_first, &kron(&x, &identity(2)), 1e-12));

        let on_second = embed(&x, &[1], 2).unwrap();
        assert!(approx_eq(&on_second, &kron(&identity(2), &x), 1e-12));
    }

    #[test]
    fn test_adjacent_cnot_matches_plain_kron() {
        let full = embed(&cnot(), &[1, 2], 3).unwrap();
        assert!(approx_eq(&full, &kron(&identity(2), &cnot()), 1e-12));
    }

    #[test]
    fn test_reversed_cnot() {
        // Control on qubit 1, target on qubit 0: |01⟩ -> |11⟩
        let full = embed(&cnot(), &[1, 0], 2).unwrap();
        assert_eq!(full[[3, 1]].re, 1.0);
        assert_eq!(full[[1, 1]].re, 0.0);
    }

    #[test]
    fn test_swap_is_symmetric_in_operands() {
        let a = embed(&swap(), &[0, 3], 4).unwrap();
        let b = embed(&swap(), &[3, 0], 4).unwrap();
        assert!(approx_eq(&a, &b, 1e-12));
    }

    #[test]
    fn test_invalid_targets() {
        assert!(matches!(
            embed(&pauli_x(), &[3], 3),
            Err(SimulatorError::InvalidQubitIndex { .. })
        ));
        assert!(matches!(
            embed(&cnot(), &[1, 1], 3),
            Err(SimulatorError::InvalidQubitIndex { .. })
        ));
        assert!(matches!(
            embed(&cnot(), &[0], 3),
            Err(SimulatorError::DimensionMismatch { .. })
        ));
    }
}
