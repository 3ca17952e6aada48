// src/quantum/state.rs
//! Quantum state representations
//!
//! A register of N qubits is a vector of 2^N complex amplitudes. Qubit 0 is
//! the most significant bit of a basis index, so for three qubits the
//! amplitude of |q0 q1 q2⟩ lives at index `q0 << 2 | q1 << 1 | q2`.

use std::fmt::{self, Display};

use num_complex::Complex64;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulatorError};
use super::tensor::{self, ComplexMatrix, ComplexVector};

/// Tolerance used when checking that a state is normalized
pub const NORMALIZATION_TOLERANCE: f64 = 1e-10;

/// A measurement outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    /// Measurement yielded 0
    Zero,
    /// Measurement yielded 1
    One,
}

impl Outcome {
    /// Outcome corresponding to a bit value (any non-zero bit is `One`)
    pub fn from_bit(bit: usize) -> Self {
        if bit == 0 {
            Outcome::Zero
        } else {
            Outcome::One
        }
    }

    /// The outcome as 0 or 1
    pub fn bit(self) -> usize {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Zero => write!(f, "0"),
            Outcome::One => write!(f, "1"),
        }
    }
}

/// Bit shift of `qubit` within a basis index of a `qubit_count`-qubit register
#[inline]
pub fn bit_shift(qubit: usize, qubit_count: usize) -> usize {
    qubit_count - 1 - qubit
}

/// Value of `qubit` in basis index `index`
#[inline]
pub fn qubit_bit(index: usize, qubit: usize, qubit_count: usize) -> usize {
    (index >> bit_shift(qubit, qubit_count)) & 1
}

/// State vector representation of a quantum state
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    /// Number of qubits
    qubit_count: usize,

    /// The state vector as an array of complex amplitudes
    amplitudes: ComplexVector,
}

impl StateVector {
    /// Create a new state vector with the given amplitudes
    pub fn new(qubit_count: usize, amplitudes: ComplexVector) -> Result<Self> {
        let expected_dim = 1 << qubit_count;

        if amplitudes.len() != expected_dim {
            return Err(SimulatorError::dimension_mismatch(
                "state vector",
                expected_dim,
                amplitudes.len(),
            ));
        }

        let state = StateVector {
            qubit_count,
            amplitudes,
        };

        let norm_sqr = state.norm_sqr();
        if (norm_sqr - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(SimulatorError::NotNormalized { norm_sqr });
        }

        Ok(state)
    }

    /// Build a state from raw amplitudes, inferring the qubit count
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Result<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(SimulatorError::dimension_mismatch(
                "state vector (length must be a power of two)",
                len.next_power_of_two().max(1),
                len,
            ));
        }
        Self::new(len.trailing_zeros() as usize, Array1::from(amplitudes))
    }

    /// Create a new state vector in the computational basis state |index⟩
    pub fn computational_basis(qubit_count: usize, index: usize) -> Result<Self> {
        let dim = 1 << qubit_count;

        if index >= dim {
            return Err(SimulatorError::dimension_mismatch("basis index", dim, index));
        }

        let mut amplitudes = Array1::zeros(dim);
        amplitudes[index] = Complex64::new(1.0, 0.0);

        Ok(StateVector {
            qubit_count,
            amplitudes,
        })
    }

    /// Create the zero state |00...0⟩
    ///
    /// Allocates `2^qubit_count` amplitudes without checking the size; callers
    /// that accept sizes from outside go through a ceiling first.
    pub fn zero_state(qubit_count: usize) -> Self {
        let mut amplitudes = Array1::zeros(1 << qubit_count);
        amplitudes[0] = Complex64::new(1.0, 0.0);
        StateVector {
            qubit_count,
            amplitudes,
        }
    }

    /// Number of qubits in the register
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Dimension of the Hilbert space (2^n for n qubits)
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get a reference to the amplitudes
    pub fn amplitudes(&self) -> &ComplexVector {
        &self.amplitudes
    }

    /// Calculate the probability of measuring the given bit string
    pub fn probability(&self, bit_string: usize) -> f64 {
        if bit_string >= self.dimension() {
            return 0.0;
        }

        self.amplitudes[bit_string].norm_sqr()
    }

    /// Probabilities of every basis state
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).collect()
    }

    /// Sum of squared magnitudes
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).sum()
    }

    /// Check if the state vector is normalized within `tolerance`
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm_sqr() - 1.0).abs() < tolerance
    }

    /// Inner product ⟨self|other⟩
    pub fn inner_product(&self, other: &Self) -> Result<Complex64> {
        if self.dimension() != other.dimension() {
            return Err(SimulatorError::dimension_mismatch(
                "inner product",
                self.dimension(),
                other.dimension(),
            ));
        }

        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Replace the amplitudes with `operator · amplitudes`
    pub fn apply_operator(&mut self, operator: &ComplexMatrix) -> Result<()> {
        self.amplitudes = tensor::apply(operator, &self.amplitudes)?;
        Ok(())
    }

    /// Keep only amplitudes where `qubit` equals `outcome`, scaling them by `scale`.
    ///
    /// Leaves the state unnormalized unless `scale` is chosen by the caller.
    pub(crate) fn project(&mut self, qubit: usize, outcome: Outcome, scale: f64) {
        let n = self.qubit_count;
        let keep = outcome.bit();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if qubit_bit(i, qubit, n) == keep {
                *amp *= scale;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
    }
}

impl Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}-qubit state:", self.qubit_count)?;

        let threshold = 1e-10;
        let mut has_entries = false;

        for (i, amp) in self.amplitudes.iter().enumerate() {
            let prob = amp.norm_sqr();
            if prob > threshold {
                has_entries = true;
                let bit_string = format!("{:0width$b}", i, width = self.qubit_count);
                writeln!(
                    f,
                    "  ({:.6}{:+.6}i) |{}⟩ [{:.1}%]",
                    amp.re,
                    amp.im,
                    bit_string,
                    prob * 100.0
                )?;
            }
        }

        if !has_entries {
            writeln!(f, "  (zero state)")?;
        }

        Ok(())
    }
}
