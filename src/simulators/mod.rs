//! Quantum circuit simulators
//!
//! The statevector simulator, the instruction dispatcher and the accelerator
//! that ties them to named buffers.

pub mod statevector;
pub mod buffer;
pub mod visitor;
pub mod accelerator;

pub use statevector::StatevectorSimulator;
pub use buffer::{AcceleratorBuffer, BufferRegistry, MeasurementEntry, MeasurementRecord, SimulatedQubits};
pub use visitor::CircuitVisitor;
pub use accelerator::StatevectorAccelerator;
