// =============================================================================
// Quantum Circuit Workbench - Gate Operations
// =============================================================================
// Table of Contents:
//   1. GateKind - Closed set of gate kinds with display metadata
//   2. SingleQubitGateInterface - Core trait for single-qubit gates
//   3. Single-qubit gates (Hadamard, Pauli X/Y/Z)
//   4. Gate dispatch (apply_gate, gate_for_kind)
// =============================================================================
// Purpose: Pure gate algebra over SingleQubitState. Every implemented gate is
//          unitary. Two-qubit kinds are reserved names only and are rejected
//          with UnsupportedGate until a joint-state model exists.
// =============================================================================

use crate::complex_amplitude::{
    AMPLITUDE_IMAGINARY_UNIT, AMPLITUDE_ONE, AMPLITUDE_ZERO, ComplexAmplitude,
};
use crate::error::{CircuitError, CircuitResult};
use crate::qubit_state::SingleQubitState;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

pub type SingleQubitGateMatrix = [[ComplexAmplitude; 2]; 2];

// =============================================================================
// 1. GateKind - Gate kinds and metadata
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    Init,
    Hadamard,
    PauliX,
    PauliY,
    PauliZ,
    ControlledNot,
    Swap,
}

const PLACEABLE_GATE_KINDS: [GateKind; 4] = [
    GateKind::Hadamard,
    GateKind::PauliX,
    GateKind::PauliY,
    GateKind::PauliZ,
];

impl GateKind {
    /// Kinds a user may drop onto a wire.
    pub fn placeable_gate_kinds() -> &'static [GateKind] {
        &PLACEABLE_GATE_KINDS
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            GateKind::Init => "|0⟩",
            GateKind::Hadamard => "H",
            GateKind::PauliX => "X",
            GateKind::PauliY => "Y",
            GateKind::PauliZ => "Z",
            GateKind::ControlledNot => "⊕",
            GateKind::Swap => "✖",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GateKind::Init => "Init",
            GateKind::Hadamard => "Hadamard",
            GateKind::PauliX => "Pauli-X",
            GateKind::PauliY => "Pauli-Y",
            GateKind::PauliZ => "Pauli-Z",
            GateKind::ControlledNot => "C-Not",
            GateKind::Swap => "SWAP",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GateKind::Init => "State preparation.",
            GateKind::Hadamard => "Simple superposition gate.",
            GateKind::PauliX => "NOT gate.",
            GateKind::PauliY => "NOT & Phase flip gate.",
            GateKind::PauliZ => "Phase flip gate.",
            GateKind::ControlledNot | GateKind::Swap => "Work In Progress",
        }
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        match self {
            GateKind::ControlledNot | GateKind::Swap => 2,
            _ => 1,
        }
    }

    pub fn is_implemented(&self) -> bool {
        !matches!(self, GateKind::ControlledNot | GateKind::Swap)
    }

    /// Operation name used by circuit exporters. `Init` exports as nothing.
    pub fn exported_operation_name(&self) -> CircuitResult<Option<&'static str>> {
        match self {
            GateKind::Init => Ok(None),
            GateKind::Hadamard => Ok(Some("h")),
            GateKind::PauliX => Ok(Some("x")),
            GateKind::PauliY => Ok(Some("y")),
            GateKind::PauliZ => Ok(Some("z")),
            GateKind::ControlledNot | GateKind::Swap => {
                Err(CircuitError::UnsupportedGate { gate: *self })
            }
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// 2. SingleQubitGateInterface - Core trait for single-qubit gates
// =============================================================================

pub trait SingleQubitGateInterface: Send + Sync + fmt::Debug {
    fn apply_to_qubit_state(&self, state: &SingleQubitState) -> SingleQubitState;
    fn gate_name(&self) -> &str;
    fn gate_kind(&self) -> GateKind;
    fn gate_matrix(&self) -> SingleQubitGateMatrix;
}

/// Multiplies a 2x2 matrix into the column vector (alpha, beta).
pub fn apply_gate_matrix(
    matrix: &SingleQubitGateMatrix,
    state: &SingleQubitState,
) -> SingleQubitState {
    SingleQubitState::new(
        matrix[0][0] * state.alpha + matrix[0][1] * state.beta,
        matrix[1][0] * state.alpha + matrix[1][1] * state.beta,
    )
}

// =============================================================================
// 3. Single-qubit gates
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct HadamardGate;

impl SingleQubitGateInterface for HadamardGate {
    fn apply_to_qubit_state(&self, state: &SingleQubitState) -> SingleQubitState {
        SingleQubitState::new(
            (state.alpha + state.beta) * FRAC_1_SQRT_2,
            (state.alpha - state.beta) * FRAC_1_SQRT_2,
        )
    }

    fn gate_name(&self) -> &str {
        "hadamard_gate"
    }

    fn gate_kind(&self) -> GateKind {
        GateKind::Hadamard
    }

    fn gate_matrix(&self) -> SingleQubitGateMatrix {
        let inv_sqrt2 = ComplexAmplitude::new(FRAC_1_SQRT_2, 0.0);
        [[inv_sqrt2, inv_sqrt2], [inv_sqrt2, -inv_sqrt2]]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PauliXGate;

impl SingleQubitGateInterface for PauliXGate {
    fn apply_to_qubit_state(&self, state: &SingleQubitState) -> SingleQubitState {
        SingleQubitState::new(state.beta, state.alpha)
    }

    fn gate_name(&self) -> &str {
        "pauli_x_gate"
    }

    fn gate_kind(&self) -> GateKind {
        GateKind::PauliX
    }

    fn gate_matrix(&self) -> SingleQubitGateMatrix {
        [[AMPLITUDE_ZERO, AMPLITUDE_ONE], [AMPLITUDE_ONE, AMPLITUDE_ZERO]]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PauliYGate;

impl SingleQubitGateInterface for PauliYGate {
    fn apply_to_qubit_state(&self, state: &SingleQubitState) -> SingleQubitState {
        // alpha' = -i * beta, beta' = i * alpha
        SingleQubitState::new(
            -AMPLITUDE_IMAGINARY_UNIT * state.beta,
            AMPLITUDE_IMAGINARY_UNIT * state.alpha,
        )
    }

    fn gate_name(&self) -> &str {
        "pauli_y_gate"
    }

    fn gate_kind(&self) -> GateKind {
        GateKind::PauliY
    }

    fn gate_matrix(&self) -> SingleQubitGateMatrix {
        [
            [AMPLITUDE_ZERO, -AMPLITUDE_IMAGINARY_UNIT],
            [AMPLITUDE_IMAGINARY_UNIT, AMPLITUDE_ZERO],
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PauliZGate;

impl SingleQubitGateInterface for PauliZGate {
    fn apply_to_qubit_state(&self, state: &SingleQubitState) -> SingleQubitState {
        SingleQubitState::new(state.alpha, -state.beta)
    }

    fn gate_name(&self) -> &str {
        "pauli_z_gate"
    }

    fn gate_kind(&self) -> GateKind {
        GateKind::PauliZ
    }

    fn gate_matrix(&self) -> SingleQubitGateMatrix {
        [[AMPLITUDE_ONE, AMPLITUDE_ZERO], [AMPLITUDE_ZERO, -AMPLITUDE_ONE]]
    }
}

// =============================================================================
// 4. Gate dispatch
// =============================================================================

/// Gate object for a placeable kind. `Init` and the reserved two-qubit kinds
/// have none.
pub fn gate_for_kind(kind: GateKind) -> Option<&'static dyn SingleQubitGateInterface> {
    match kind {
        GateKind::Hadamard => Some(&HadamardGate),
        GateKind::PauliX => Some(&PauliXGate),
        GateKind::PauliY => Some(&PauliYGate),
        GateKind::PauliZ => Some(&PauliZGate),
        GateKind::Init | GateKind::ControlledNot | GateKind::Swap => None,
    }
}

/// Applies `kind` to `input`.
///
/// `Init` passes its input through: the propagation pass feeds the line's
/// prepared state into column 0, so the Init cell's result is that state.
pub fn apply_gate(kind: GateKind, input: SingleQubitState) -> CircuitResult<SingleQubitState> {
    if kind == GateKind::Init {
        return Ok(input);
    }
    gate_for_kind(kind)
        .map(|gate| gate.apply_to_qubit_state(&input))
        .ok_or(CircuitError::UnsupportedGate { gate: kind })
}
