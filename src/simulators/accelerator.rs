//! Statevector accelerator
//!
//! Entry point for running circuits. The accelerator checks a circuit against
//! the buffer before touching the state, then drives a [`CircuitVisitor`]
//! over the instructions in program order. A failing run is not rolled back:
//! the buffer keeps whatever state existed when the failure happened.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::SimulatorConfig;
use crate::error::{Result, SimulatorError};
use crate::quantum::instruction::{self, Instruction};
use crate::quantum::state::StateVector;

use super::buffer::{AcceleratorBuffer, BufferRegistry, SimulatedQubits};
use super::statevector::StatevectorSimulator;
use super::visitor::CircuitVisitor;

/// Gate-model accelerator backed by a dense statevector simulator
#[derive(Debug, Default)]
pub struct StatevectorAccelerator {
    config: SimulatorConfig,
    buffers: BufferRegistry,
}

impl StatevectorAccelerator {
    /// Create an accelerator with a validated configuration
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(StatevectorAccelerator {
            buffers: BufferRegistry::with_max_qubits(config.max_qubits),
            config,
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Whether a register of `qubit_count` qubits can be simulated
    pub fn is_valid_buffer_size(&self, qubit_count: usize) -> bool {
        qubit_count <= self.config.max_qubits
    }

    /// Allocate a buffer holding the largest supported register
    pub fn create_buffer(&mut self, name: &str) -> Result<&mut SimulatedQubits> {
        let size = self.config.max_qubits;
        self.create_buffer_with_size(name, size)
    }

    /// Allocate a buffer of `qubit_count` qubits
    pub fn create_buffer_with_size(
        &mut self,
        name: &str,
        qubit_count: usize,
    ) -> Result<&mut SimulatedQubits> {
        if !self.is_valid_buffer_size(qubit_count) {
            return Err(SimulatorError::InvalidBufferSize {
                requested: qubit_count,
                max: self.config.max_qubits,
            });
        }
        self.buffers.allocate(name, qubit_count)
    }

    /// Look up a buffer by name
    pub fn buffer(&self, name: &str) -> Result<&SimulatedQubits> {
        self.buffers.lookup(name)
    }

    pub fn buffer_mut(&mut self, name: &str) -> Result<&mut SimulatedQubits> {
        self.buffers.lookup_mut(name)
    }

    /// Remove a buffer from the accelerator and return it
    pub fn remove_buffer(&mut self, name: &str) -> Result<SimulatedQubits> {
        self.buffers.remove(name)
    }

    /// Run `instructions` against `buffer` using the configured seed
    pub fn execute<B>(&self, buffer: &mut B, instructions: &[Instruction]) -> Result<()>
    where
        B: AcceleratorBuffer + ?Sized,
    {
        self.execute_with_rng(buffer, instructions, self.rng(0))
    }

    /// Run `instructions` against the registered buffer `name`
    pub fn execute_named(&mut self, name: &str, instructions: &[Instruction]) -> Result<()> {
        let rng = self.rng(0);
        let buffer = self.buffers.lookup_mut(name)?;
        run(&self.config, buffer, instructions, rng)
    }

    /// Run `instructions` against an explicit random source
    pub fn execute_with_rng<B, R>(
        &self,
        buffer: &mut B,
        instructions: &[Instruction],
        rng: R,
    ) -> Result<()>
    where
        B: AcceleratorBuffer + ?Sized,
        R: Rng,
    {
        run(&self.config, buffer, instructions, rng)
    }

    /// Run one circuit against several independent buffers in parallel.
    ///
    /// Each buffer gets its own generator; with a configured seed the
    /// generator for position `i` is seeded with `seed + i`.
    pub fn execute_batch(
        &self,
        buffers: &mut [SimulatedQubits],
        instructions: &[Instruction],
    ) -> Vec<Result<()>> {
        buffers
            .par_iter_mut()
            .enumerate()
            .map(|(i, buffer)| run(&self.config, buffer, instructions, self.rng(i as u64)))
            .collect()
    }

    fn rng(&self, offset: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(offset)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Pre-flight checks followed by one pass over the circuit
fn run<B, R>(
    config: &SimulatorConfig,
    buffer: &mut B,
    instructions: &[Instruction],
    rng: R,
) -> Result<()>
where
    B: AcceleratorBuffer + ?Sized,
    R: Rng,
{
    let qubit_count = buffer.qubit_count();
    if qubit_count > config.max_qubits {
        return Err(SimulatorError::InvalidBufferSize {
            requested: qubit_count,
            max: config.max_qubits,
        });
    }
    instruction::validate_all(instructions, qubit_count)?;

    let norm_sqr = buffer.state().norm_sqr();
    if (norm_sqr - 1.0).abs() > config.normalization_tolerance {
        return Err(SimulatorError::NotNormalized { norm_sqr });
    }

    debug!(
        buffer = buffer.name(),
        qubit_count,
        instructions = instructions.len(),
        "starting run"
    );

    let state = buffer.replace_state(StateVector::zero_state(0));
    let mut simulator = StatevectorSimulator::with_rng(state, rng);

    let (result, executed) = {
        let mut visitor = CircuitVisitor::new(&mut simulator, &mut *buffer);
        let result = visitor.visit_all(instructions);
        (result, visitor.executed())
    };

    buffer.replace_state(simulator.into_state());

    match &result {
        Ok(()) => debug!(buffer = buffer.name(), executed, "run finished"),
        Err(err) => warn!(buffer = buffer.name(), executed, error = %err, "run aborted"),
    }

    result
}
