//! Instruction dispatch
//!
//! [`CircuitVisitor`] walks a circuit and routes each instruction kind to its
//! handler. Gates go to the simulator, measurements go to the simulator and
//! then into the buffer's record, and conditional blocks consult that record
//! before recursing into their bodies.
use rand::Rng;
use tracing::{debug, trace};

use crate::error::{Result, SimulatorError};
use crate::quantum::gate::{RotationGate, SingleQubitGate, TwoQubitGate};
use crate::quantum::instruction::Instruction;
use crate::quantum::state::Outcome;

use super::buffer::AcceleratorBuffer;
use super::statevector::StatevectorSimulator;

/// Dispatches instructions against one simulator and one buffer
pub struct CircuitVisitor<'a, R: Rng, B: AcceleratorBuffer + ?Sized> {
    simulator: &'a mut StatevectorSimulator<R>,
    buffer: &'a mut B,
    executed: usize,
}

impl<'a, R: Rng, B: AcceleratorBuffer + ?Sized> CircuitVisitor<'a, R, B> {
    pub fn new(simulator: &'a mut StatevectorSimulator<R>, buffer: &'a mut B) -> Self {
        CircuitVisitor {
            simulator,
            buffer,
            executed: 0,
        }
    }

    /// Number of instructions executed so far, nested ones included
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Visit instructions in order, stopping at the first failure
    pub fn visit_all(&mut self, instructions: &[Instruction]) -> Result<()> {
        instructions.iter().try_for_each(|instruction| self.visit(instruction))
    }

    /// Dispatch a single instruction to its handler
    pub fn visit(&mut self, instruction: &Instruction) -> Result<()> {
        trace!(instruction = %instruction, "dispatching");
        match instruction {
            Instruction::Single { gate, target } => self.visit_single(*gate, *target)?,
            Instruction::Rotation { gate, target, angle } => {
                self.visit_rotation(*gate, *target, *angle)?
            }
            Instruction::Controlled { gate, control, target } => {
                self.visit_controlled(*gate, *control, *target)?
            }
            Instruction::Measure { target, key } => self.visit_measure(*target, *key)?,
            Instruction::Conditional { key, guard, body } => {
                self.visit_conditional(*key, *guard, body)?
            }
            Instruction::Opaque { name, .. } => {
                return Err(SimulatorError::unsupported(name.clone()));
            }
        }
        self.executed += 1;
        Ok(())
    }

    fn visit_single(&mut self, gate: SingleQubitGate, target: usize) -> Result<()> {
        self.simulator.apply_unitary(&gate.matrix(), &[target])
    }

    fn visit_rotation(&mut self, gate: RotationGate, target: usize, angle: f64) -> Result<()> {
        self.simulator.apply_unitary(&gate.matrix(angle), &[target])
    }

    fn visit_controlled(&mut self, gate: TwoQubitGate, control: usize, target: usize) -> Result<()> {
        self.simulator.apply_unitary(&gate.matrix(), &[control, target])
    }

    fn visit_measure(&mut self, target: usize, key: usize) -> Result<()> {
        let outcome = self.simulator.measure_qubit(target)?;
        self.buffer.record_measurement(key, outcome);
        Ok(())
    }

    fn visit_conditional(&mut self, key: usize, guard: Outcome, body: &[Instruction]) -> Result<()> {
        match self.buffer.measurement(key) {
            Some(recorded) if recorded == guard => self.visit_all(body),
            recorded => {
                debug!(key, %guard, ?recorded, "conditional guard not met, skipping block");
                Ok(())
            }
        }
    }
}
