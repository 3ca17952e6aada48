//! Statevector simulator
//!
//! Owns the evolving state vector of one run. Gates are applied by building
//! the full-register operator and multiplying it into the state; measurement
//! samples an outcome from the marginal probability of the measured qubit and
//! collapses the state onto it.
use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{Result, SimulatorError};
use crate::quantum::embedding::embed;
use crate::quantum::instruction::Instruction;
use crate::quantum::state::{qubit_bit, Outcome, StateVector};
use crate::quantum::tensor::ComplexMatrix;

/// Outcomes whose probability falls below this are treated as impossible
pub const ZERO_PROBABILITY_THRESHOLD: f64 = 1e-12;

/// A statevector simulator for quantum circuits
#[derive(Clone, Debug)]
pub struct StatevectorSimulator<R: Rng = StdRng> {
    /// The current state of the simulator
    state: StateVector,
    /// Random number generator for measurements
    rng: R,
}

impl StatevectorSimulator<StdRng> {
    /// Create a new statevector simulator with the specified number of qubits
    pub fn new(qubit_count: usize) -> Self {
        Self::from_state(StateVector::zero_state(qubit_count))
    }

    /// Create a simulator whose measurements are reproducible
    pub fn with_seed(qubit_count: usize, seed: u64) -> Self {
        Self::with_rng(StateVector::zero_state(qubit_count), StdRng::seed_from_u64(seed))
    }

    /// Create a simulator from an existing state vector
    pub fn from_state(state: StateVector) -> Self {
        Self::with_rng(state, StdRng::from_entropy())
    }
}

impl<R: Rng> StatevectorSimulator<R> {
    /// Create a simulator from a state and a random source
    pub fn with_rng(state: StateVector, rng: R) -> Self {
        StatevectorSimulator { state, rng }
    }

    /// Get the current state vector
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Consume the simulator, returning the final state
    pub fn into_state(self) -> StateVector {
        self.state
    }

    /// Reset the simulator to the |0...0⟩ state
    pub fn reset(&mut self) {
        self.state = StateVector::zero_state(self.state.qubit_count());
    }

    /// Get the number of qubits in the simulator
    pub fn qubit_count(&self) -> usize {
        self.state.qubit_count()
    }

    /// Apply a gate matrix to the given qubits
    pub fn apply_unitary(&mut self, gate: &ComplexMatrix, qubits: &[usize]) -> Result<()> {
        let operator = embed(gate, qubits, self.qubit_count())?;
        self.state.apply_operator(&operator)
    }

    /// Apply a unitary instruction (single, rotation or two-qubit gate)
    pub fn apply_gate(&mut self, instruction: &Instruction) -> Result<()> {
        let (gate, qubits) = match instruction {
            Instruction::Single { gate, target } => (gate.matrix(), vec![*target]),
            Instruction::Rotation { gate, target, angle } => (gate.matrix(*angle), vec![*target]),
            Instruction::Controlled { gate, control, target } => {
                (gate.matrix(), vec![*control, *target])
            }
            other => return Err(SimulatorError::unsupported(other.name())),
        };

        trace!(gate = %instruction, "applying gate");
        self.apply_unitary(&gate, &qubits)
    }

    /// Probabilities of both outcomes for `qubit`, without collapsing the state
    pub fn measure_qubit_probability(&self, qubit: usize) -> Result<HashMap<Outcome, f64>> {
        let (prob_zero, prob_one) = self.marginal(qubit)?;

        let mut probabilities = HashMap::new();
        probabilities.insert(Outcome::Zero, prob_zero);
        probabilities.insert(Outcome::One, prob_one);

        Ok(probabilities)
    }

    /// Measure a single qubit and collapse the state
    pub fn measure_qubit(&mut self, qubit: usize) -> Result<Outcome> {
        let (prob_zero, prob_one) = self.marginal(qubit)?;

        // Marginals sum to 1 only up to rounding; sample against their total
        let random_val = self.rng.gen::<f64>() * (prob_zero + prob_one);
        let (outcome, probability) = if random_val < prob_zero {
            (Outcome::Zero, prob_zero)
        } else {
            (Outcome::One, prob_one)
        };

        self.collapse(qubit, outcome, probability)?;

        debug!(qubit, %outcome, probability, "measured qubit");
        Ok(outcome)
    }

    /// Project `qubit` onto `outcome` and renormalize.
    ///
    /// Fails if the outcome has zero probability in the current state.
    pub fn collapse_to_outcome(&mut self, qubit: usize, outcome: Outcome) -> Result<()> {
        let (prob_zero, prob_one) = self.marginal(qubit)?;
        let probability = match outcome {
            Outcome::Zero => prob_zero,
            Outcome::One => prob_one,
        };
        self.collapse(qubit, outcome, probability)
    }

    fn collapse(&mut self, qubit: usize, outcome: Outcome, probability: f64) -> Result<()> {
        if probability < ZERO_PROBABILITY_THRESHOLD {
            return Err(SimulatorError::MeasurementOfZeroProbabilityState {
                qubit,
                outcome,
                probability,
            });
        }

        self.state.project(qubit, outcome, 1.0 / probability.sqrt());
        Ok(())
    }

    /// Summed probability of `qubit` being 0 and being 1
    fn marginal(&self, qubit: usize) -> Result<(f64, f64)> {
        let n = self.qubit_count();
        if qubit >= n {
            return Err(SimulatorError::qubit_out_of_range(qubit, n));
        }

        let mut prob_zero = 0.0;
        let mut prob_one = 0.0;
        for (i, amp) in self.state.amplitudes().iter().enumerate() {
            if qubit_bit(i, qubit, n) == 0 {
                prob_zero += amp.norm_sqr();
            } else {
                prob_one += amp.norm_sqr();
            }
        }

        Ok((prob_zero, prob_one))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use rand::RngCore;

    /// Random source pinned to the largest draw `gen::<f64>()` can produce
    struct SaturatedRng;

    impl RngCore for SaturatedRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(u8::MAX);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_measure_slightly_subnormalized_state_with_high_draw() {
        // |a0|^2 = 1 - 1e-11 is within tolerance, and |1⟩ has no weight
        let a0 = Complex64::new((1.0 - 1e-11f64).sqrt(), 0.0);
        let state = StateVector::from_amplitudes(vec![a0, Complex64::new(0.0, 0.0)]).unwrap();
        let mut sim = StatevectorSimulator::with_rng(state, SaturatedRng);

        assert_eq!(sim.measure_qubit(0).unwrap(), Outcome::Zero);
        assert!(sim.state().is_normalized(1e-12));
    }

    #[test]
    fn test_high_draw_still_selects_one_when_likely() {
        let state = StateVector::computational_basis(1, 1).unwrap();
        let mut sim = StatevectorSimulator::with_rng(state, SaturatedRng);
        assert_eq!(sim.measure_qubit(0).unwrap(), Outcome::One);
    }

    #[test]
    fn test_measure_basis_state_is_deterministic() {
        let state = StateVector::computational_basis(2, 0b10).unwrap();
        let mut sim = StatevectorSimulator::with_rng(state, StdRng::seed_from_u64(7));
        for _ in 0..10 {
            assert_eq!(sim.measure_qubit(0).unwrap(), Outcome::One);
            assert_eq!(sim.measure_qubit(1).unwrap(), Outcome::Zero);
        }
    }

    #[test]
    fn test_collapse_to_impossible_outcome_fails() {
        let mut sim = StatevectorSimulator::with_seed(1, 1);
        assert!(matches!(
            sim.collapse_to_outcome(0, Outcome::One),
            Err(SimulatorError::MeasurementOfZeroProbabilityState { qubit: 0, .. })
        ));
    }

    #[test]
    fn test_apply_gate_rejects_non_unitary_instructions() {
        let mut sim = StatevectorSimulator::with_seed(1, 1);
        assert!(matches!(
            sim.apply_gate(&Instruction::measure(0, 0)),
            Err(SimulatorError::UnsupportedInstruction { .. })
        ));
    }
}
