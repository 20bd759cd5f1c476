// =============================================================================
// Quantum Circuit Workbench - Engine Error Types
// =============================================================================
// Table of Contents:
//   1. CircuitError - Every rejected edit or invalid request
//   2. CircuitResult - Result alias
// =============================================================================
// Purpose: Structural and index errors raised at the circuit call boundary.
//          A returned error always means the requested edit did not happen;
//          numerical operations on amplitudes never produce errors.
// =============================================================================

use crate::gate_operations::GateKind;
use thiserror::Error;

// =============================================================================
// 1. CircuitError - Main error enum
// =============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("Unsupported gate: {gate:?} has no single-qubit algebra")]
    UnsupportedGate { gate: GateKind },

    #[error("Unknown initial state index {index}: expected 0..{available}")]
    InvalidStateIndex { index: usize, available: usize },

    #[error("Line index {index} out of range: circuit width is {width}, maximum is {maximum}")]
    LineIndexOutOfRange {
        index: usize,
        width: usize,
        maximum: usize,
    },

    #[error("Column index must not be negative, got {0}")]
    ColumnIndexNegative(isize),

    #[error("Column {column} is not occupied: line has {column_count} columns")]
    ColumnIndexOutOfRange { column: usize, column_count: usize },

    #[error("Column 0 of line {line_index} is reserved for state preparation")]
    InitialCellReserved { line_index: usize },

    #[error("Invalid circuit width {requested}: must be between {minimum} and {maximum}")]
    InvalidWidth {
        requested: usize,
        minimum: usize,
        maximum: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Circuit {0} not found in editor session")]
    CircuitNotFound(usize),
}

// =============================================================================
// 2. Result type alias
// =============================================================================

pub type CircuitResult<T> = Result<T, CircuitError>;
