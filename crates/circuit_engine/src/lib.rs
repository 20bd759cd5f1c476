// =============================================================================
// Quantum Circuit Workbench - Circuit Engine
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Re-exports
//   3. Prelude Module
// =============================================================================
// Purpose: State engine behind an interactive single-qubit circuit editor.
//          Owns the gate algebra, the sparse per-wire gate grid, and the
//          compaction and propagation pass that keeps every cached amplitude
//          consistent after each edit.
// =============================================================================

pub mod complex_amplitude;
pub mod configuration;
pub mod editor_session;
pub mod error;
pub mod gate_operations;
pub mod initial_state;
pub mod quantum_circuit;
pub mod quantum_line;
pub mod qubit_state;

pub use configuration::CircuitConfiguration;
pub use editor_session::CircuitEditorSession;
pub use error::{CircuitError, CircuitResult};
pub use gate_operations::GateKind;
pub use initial_state::InitialStateSelection;
pub use quantum_circuit::{ExportedGateOperation, QuantumCircuit};
pub use quantum_line::{GateCell, QuantumLine};
pub use qubit_state::SingleQubitState;

pub mod prelude {
    pub use crate::complex_amplitude::*;
    pub use crate::configuration::*;
    pub use crate::editor_session::*;
    pub use crate::error::*;
    pub use crate::gate_operations::*;
    pub use crate::initial_state::*;
    pub use crate::quantum_circuit::*;
    pub use crate::quantum_line::*;
    pub use crate::qubit_state::*;
}
