// src/quantum/tensor.rs
//! Dense complex linear algebra used to build and apply gate operators.
//!
//! All functions are pure and allocate their results; nothing is shared
//! between calls.

use num_complex::Complex64;
use ndarray::{Array1, Array2};

use crate::error::{Result, SimulatorError};

/// Square complex matrix representing an operator.
pub type ComplexMatrix = Array2<Complex64>;

/// Complex amplitude vector.
pub type ComplexVector = Array1<Complex64>;

/// Identity matrix of the given dimension
pub fn identity(dim: usize) -> ComplexMatrix {
    Array2::from_diag(&Array1::from_elem(dim, Complex64::new(1.0, 0.0)))
}

/// Kronecker (tensor) product `a ⊗ b`.
///
/// The result has shape `(a.rows * b.rows, a.cols * b.cols)`; row `i * b.rows + k`
/// and column `j * b.cols + l` hold `a[i, j] * b[k, l]`.
pub fn kron(a: &ComplexMatrix, b: &ComplexMatrix) -> ComplexMatrix {
    let (a_rows, a_cols) = a.dim();
    let (b_rows, b_cols) = b.dim();

    let mut result = Array2::zeros((a_rows * b_rows, a_cols * b_cols));

    for i in 0..a_rows {
        for j in 0..a_cols {
            let scale = a[[i, j]];
            if scale == Complex64::new(0.0, 0.0) {
                continue;
            }
            for k in 0..b_rows {
                for l in 0..b_cols {
                    result[[i * b_rows + k, j * b_cols + l]] = scale * b[[k, l]];
                }
            }
        }
    }

    result
}

/// Kronecker product of a sequence of factors, left to right.
///
/// An empty sequence yields the 1×1 identity.
pub fn kron_all<'a, I>(factors: I) -> ComplexMatrix
where
    I: IntoIterator<Item = &'a ComplexMatrix>,
{
    factors
        .into_iter()
        .fold(identity(1), |acc, factor| kron(&acc, factor))
}

/// Matrix product `a · b`.
pub fn matmul(a: &ComplexMatrix, b: &ComplexMatrix) -> Result<ComplexMatrix> {
    if a.ncols() != b.nrows() {
        return Err(SimulatorError::dimension_mismatch("matmul", a.ncols(), b.nrows()));
    }
    Ok(a.dot(b))
}

/// Apply a square operator to a state vector.
pub fn apply(operator: &ComplexMatrix, vector: &ComplexVector) -> Result<ComplexVector> {
    if operator.nrows() != operator.ncols() {
        return Err(SimulatorError::dimension_mismatch(
            "apply (operator must be square)",
            operator.nrows(),
            operator.ncols(),
        ));
    }
    if operator.ncols() != vector.len() {
        return Err(SimulatorError::dimension_mismatch("apply", operator.ncols(), vector.len()));
    }
    Ok(operator.dot(vector))
}

/// Conjugate transpose
pub fn adjoint(matrix: &ComplexMatrix) -> ComplexMatrix {
    matrix.t().mapv(|z| z.conj())
}

/// Check that `matrix` is unitary to within `tolerance` (entrywise).
pub fn is_unitary(matrix: &ComplexMatrix, tolerance: f64) -> bool {
    if matrix.nrows() != matrix.ncols() {
        return false;
    }
    let product = adjoint(matrix).dot(matrix);
    approx_eq(&product, &identity(matrix.nrows()), tolerance)
}

/// Entrywise comparison of two matrices.
pub fn approx_eq(a: &ComplexMatrix, b: &ComplexMatrix, tolerance: f64) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < tolerance)
}

/// Basis-index map that reorders qubits.
///
/// `order[j]` names the qubit that ends up at position `j`. Qubit 0 is the
/// most significant bit of a basis index. Entry `x` of the result is the
/// basis index whose bit at position `j` equals bit `order[j]` of `x`; read as
/// a matrix `P` with `P[p[x], x] = 1`, `Pᵀ` undoes it.
pub fn basis_permutation(order: &[usize]) -> Result<Vec<usize>> {
    let n = order.len();
    let mut seen = vec![false; n];
    for &q in order {
        if q >= n {
            return Err(SimulatorError::qubit_out_of_range(q, n));
        }
        if seen[q] {
            return Err(SimulatorError::duplicate_qubit(q, n));
        }
        seen[q] = true;
    }

    let dim = 1usize << n;
    Ok((0..dim)
        .map(|x| {
            order.iter().enumerate().fold(0usize, |permuted, (position, &q)| {
                let bit = (x >> (n - 1 - q)) & 1;
                permuted | (bit << (n - 1 - position))
            })
        })
        .collect())
}

/// `Pᵀ · matrix · P` for the permutation `P` described by `permutation`.
///
/// Entry `[x, y]` of the result is `matrix[p[x], p[y]]`, so no product is formed.
pub fn conjugate_by_permutation(matrix: &ComplexMatrix, permutation: &[usize]) -> ComplexMatrix {
    let dim = permutation.len();
    Array2::from_shape_fn((dim, dim), |(x, y)| matrix[[permutation[x], permutation[y]]])
}
