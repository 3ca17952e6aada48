//! Accelerator buffers
//!
//! A buffer holds the qubit register of a named simulation together with the
//! classical bits recorded by measurements. The accelerator writes into a
//! buffer but does not decide how it is created or stored; [`BufferRegistry`]
//! is the in-memory store used by [`StatevectorAccelerator`].
//!
//! [`StatevectorAccelerator`]: super::accelerator::StatevectorAccelerator
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::HARD_MAX_QUBITS;
use crate::error::{Result, SimulatorError};
use crate::quantum::state::{Outcome, StateVector};

/// One recorded measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    /// Classical register key
    pub key: usize,
    /// Observed bit
    pub outcome: Outcome,
}

/// Append-only log of measurement outcomes for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    entries: Vec<MeasurementEntry>,
}

impl MeasurementRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome for `key`
    pub fn record(&mut self, key: usize, outcome: Outcome) {
        self.entries.push(MeasurementEntry { key, outcome });
    }

    /// Most recent outcome recorded under `key`
    pub fn get(&self, key: usize) -> Option<Outcome> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| entry.outcome)
    }

    /// All entries in the order they were recorded
    pub fn entries(&self) -> &[MeasurementEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest outcome of every key as a bit string, key 0 first.
    ///
    /// Keys that were never measured show as `-`.
    pub fn bit_string(&self) -> String {
        let width = self.entries.iter().map(|e| e.key + 1).max().unwrap_or(0);
        (0..width)
            .map(|key| match self.get(key) {
                Some(outcome) => if outcome == Outcome::One { '1' } else { '0' },
                None => '-',
            })
            .collect()
    }
}

/// What the accelerator needs from a buffer
pub trait AcceleratorBuffer {
    /// Name the buffer was allocated under
    fn name(&self) -> &str;

    /// Number of qubits in the register
    fn qubit_count(&self) -> usize;

    /// Current register state
    fn state(&self) -> &StateVector;

    /// Swap in a new register state, returning the old one
    fn replace_state(&mut self, state: StateVector) -> StateVector;

    /// Store a measurement outcome under a classical key
    fn record_measurement(&mut self, key: usize, outcome: Outcome);

    /// Most recent outcome stored under `key`
    fn measurement(&self, key: usize) -> Option<Outcome>;
}

/// Buffer of simulated qubits
#[derive(Debug, Clone)]
pub struct SimulatedQubits {
    name: String,
    state: StateVector,
    record: MeasurementRecord,
}

impl SimulatedQubits {
    /// Allocate `qubit_count` qubits in |0...0⟩.
    ///
    /// The size is trusted; [`BufferRegistry::allocate`] applies a ceiling.
    pub fn new(name: impl Into<String>, qubit_count: usize) -> Self {
        SimulatedQubits {
            name: name.into(),
            state: StateVector::zero_state(qubit_count),
            record: MeasurementRecord::new(),
        }
    }

    /// Allocate a buffer starting from a prepared state
    pub fn from_state(name: impl Into<String>, state: StateVector) -> Self {
        SimulatedQubits {
            name: name.into(),
            state,
            record: MeasurementRecord::new(),
        }
    }

    /// Recorded measurements
    pub fn measurements(&self) -> &MeasurementRecord {
        &self.record
    }

    /// Return the register to |0...0⟩ and forget all measurements
    pub fn reset(&mut self) {
        self.state = StateVector::zero_state(self.state.qubit_count());
        self.record = MeasurementRecord::new();
    }
}

impl AcceleratorBuffer for SimulatedQubits {
    fn name(&self) -> &str {
        &self.name
    }

    fn qubit_count(&self) -> usize {
        self.state.qubit_count()
    }

    fn state(&self) -> &StateVector {
        &self.state
    }

    fn replace_state(&mut self, state: StateVector) -> StateVector {
        std::mem::replace(&mut self.state, state)
    }

    fn record_measurement(&mut self, key: usize, outcome: Outcome) {
        self.record.record(key, outcome);
    }

    fn measurement(&self, key: usize) -> Option<Outcome> {
        self.record.get(key)
    }
}

/// Named buffers owned by one accelerator
#[derive(Debug)]
pub struct BufferRegistry {
    buffers: HashMap<String, SimulatedQubits>,
    max_qubits: usize,
}

impl Default for BufferRegistry {
    fn default() -> Self {
        Self::with_max_qubits(HARD_MAX_QUBITS)
    }
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that refuses buffers larger than `max_qubits`
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        BufferRegistry {
            buffers: HashMap::new(),
            max_qubits: max_qubits.min(HARD_MAX_QUBITS),
        }
    }

    /// Largest register this registry will allocate
    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    /// Allocate and store a buffer; the name must be unused and the size
    /// within the registry ceiling
    pub fn allocate(&mut self, name: &str, qubit_count: usize) -> Result<&mut SimulatedQubits> {
        if qubit_count > self.max_qubits {
            return Err(SimulatorError::InvalidBufferSize {
                requested: qubit_count,
                max: self.max_qubits,
            });
        }
        if self.buffers.contains_key(name) {
            return Err(SimulatorError::DuplicateBuffer(name.to_string()));
        }
        info!(buffer = name, qubit_count, "allocating buffer");
        Ok(self
            .buffers
            .entry(name.to_string())
            .or_insert_with(|| SimulatedQubits::new(name, qubit_count)))
    }

    pub fn lookup(&self, name: &str) -> Result<&SimulatedQubits> {
        self.buffers
            .get(name)
            .ok_or_else(|| SimulatorError::UnknownBuffer(name.to_string()))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Result<&mut SimulatedQubits> {
        self.buffers
            .get_mut(name)
            .ok_or_else(|| SimulatorError::UnknownBuffer(name.to_string()))
    }

    /// Drop a buffer, handing it back to the caller
    pub fn remove(&mut self, name: &str) -> Result<SimulatedQubits> {
        self.buffers
            .remove(name)
            .ok_or_else(|| SimulatorError::UnknownBuffer(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buffers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_returns_latest_outcome() {
        let mut record = MeasurementRecord::new();
        record.record(0, Outcome::One);
        record.record(2, Outcome::Zero);
        record.record(0, Outcome::Zero);

        assert_eq!(record.get(0), Some(Outcome::Zero));
        assert_eq!(record.get(1), None);
        assert_eq!(record.len(), 3);
        assert_eq!(record.bit_string(), "0-0");
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = BufferRegistry::new();
        registry.allocate("qreg", 2).unwrap();
        assert_eq!(
            registry.allocate("qreg", 3).unwrap_err(),
            SimulatorError::DuplicateBuffer("qreg".to_string())
        );
        assert_eq!(registry.lookup("qreg").unwrap().qubit_count(), 2);
        assert!(registry.lookup("missing").is_err());
    }

    #[test]
    fn test_registry_enforces_ceiling() {
        let mut registry = BufferRegistry::with_max_qubits(3);
        assert_eq!(
            registry.allocate("wide", 64).unwrap_err(),
            SimulatorError::InvalidBufferSize { requested: 64, max: 3 }
        );
        assert!(!registry.contains("wide"));
        assert_eq!(registry.allocate("ok", 3).unwrap().qubit_count(), 3);

        let unbounded = BufferRegistry::with_max_qubits(usize::MAX);
        assert_eq!(unbounded.max_qubits(), HARD_MAX_QUBITS);
    }

    #[test]
    fn test_reset_clears_measurements() {
        let mut buffer = SimulatedQubits::new("q", 1);
        buffer.record_measurement(0, Outcome::One);
        buffer.reset();
        assert!(buffer.measurements().is_empty());
    }
}
