// =============================================================================
// Quantum Circuit Workbench - Initial State Selection
// =============================================================================
// Table of Contents:
//   1. InitialStateSelection - Six canonical preparation states
//   2. Index mapping
// =============================================================================

use crate::error::{CircuitError, CircuitResult};
use crate::qubit_state::SingleQubitState;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

const R: f64 = FRAC_1_SQRT_2;

// =============================================================================
// 1. InitialStateSelection - Canonical states
// =============================================================================

/// States a line can be prepared in, in selector order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitialStateSelection {
    #[default]
    Zero,
    Minus,
    PlusI,
    One,
    Plus,
    MinusI,
}

const ALL_SELECTIONS: [InitialStateSelection; 6] = [
    InitialStateSelection::Zero,
    InitialStateSelection::Minus,
    InitialStateSelection::PlusI,
    InitialStateSelection::One,
    InitialStateSelection::Plus,
    InitialStateSelection::MinusI,
];

impl InitialStateSelection {
    pub const COUNT: usize = ALL_SELECTIONS.len();

    pub fn all() -> &'static [InitialStateSelection] {
        &ALL_SELECTIONS
    }

    pub fn qubit_state(&self) -> SingleQubitState {
        let parameters = match self {
            InitialStateSelection::Zero => [1.0, 0.0, 0.0, 0.0],
            InitialStateSelection::Minus => [R, 0.0, -R, 0.0],
            InitialStateSelection::PlusI => [R, 0.0, 0.0, R],
            InitialStateSelection::One => [0.0, 0.0, 1.0, 0.0],
            InitialStateSelection::Plus => [R, 0.0, R, 0.0],
            InitialStateSelection::MinusI => [R, 0.0, 0.0, -R],
        };
        SingleQubitState::from_parameter_array(parameters)
    }

    pub fn label(&self) -> &'static str {
        match self {
            InitialStateSelection::Zero => "|0⟩",
            InitialStateSelection::Minus => "|-⟩",
            InitialStateSelection::PlusI => "|i⟩",
            InitialStateSelection::One => "|1⟩",
            InitialStateSelection::Plus => "|+⟩",
            InitialStateSelection::MinusI => "|-i⟩",
        }
    }

    // =========================================================================
    // 2. Index mapping
    // =========================================================================

    pub fn from_index(index: usize) -> CircuitResult<Self> {
        ALL_SELECTIONS
            .get(index)
            .copied()
            .ok_or(CircuitError::InvalidStateIndex {
                index,
                available: Self::COUNT,
            })
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_is_normalized() {
        for selection in InitialStateSelection::all() {
            assert!(
                selection.qubit_state().is_normalized(1e-9),
                "{} is not normalized",
                selection.label()
            );
        }
    }

    #[test]
    fn test_index_round_trip_follows_selector_order() {
        assert_eq!(InitialStateSelection::from_index(0), Ok(InitialStateSelection::Zero));
        assert_eq!(InitialStateSelection::from_index(1), Ok(InitialStateSelection::Minus));
        assert_eq!(InitialStateSelection::from_index(2), Ok(InitialStateSelection::PlusI));
        assert_eq!(InitialStateSelection::from_index(3), Ok(InitialStateSelection::One));
        assert_eq!(InitialStateSelection::from_index(4), Ok(InitialStateSelection::Plus));
        assert_eq!(InitialStateSelection::from_index(5), Ok(InitialStateSelection::MinusI));
        for selection in InitialStateSelection::all() {
            assert_eq!(InitialStateSelection::from_index(selection.index()), Ok(*selection));
        }
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        assert_eq!(
            InitialStateSelection::from_index(6),
            Err(CircuitError::InvalidStateIndex {
                index: 6,
                available: 6
            })
        );
    }

    #[test]
    fn test_probabilities_of_canonical_states() {
        assert_eq!(InitialStateSelection::Zero.qubit_state().probability(), 0.0);
        assert!((InitialStateSelection::One.qubit_state().probability() - 1.0).abs() < 1e-12);
        for selection in [
            InitialStateSelection::Minus,
            InitialStateSelection::PlusI,
            InitialStateSelection::Plus,
            InitialStateSelection::MinusI,
        ] {
            assert!((selection.qubit_state().probability() - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(InitialStateSelection::Plus.label(), "|+⟩");
        assert_eq!(InitialStateSelection::MinusI.label(), "|-i⟩");
    }
}
