// =============================================================================
// Quantum Circuit Workbench - Single Qubit State
// =============================================================================
// Table of Contents:
//   1. SingleQubitState - alpha|0⟩ + beta|1⟩
//   2. Parameter array conversion
//   3. Normalization and comparison
// =============================================================================
// Purpose: Two-amplitude state vector carried along each wire. Gates are
//          unitary and preparation vectors are pre-normalized, so the
//          normalization invariant holds by construction.
// =============================================================================

use crate::complex_amplitude::{
    amplitude_from_parts, amplitudes_approximately_equal, ComplexAmplitude, AMPLITUDE_ONE,
    AMPLITUDE_ZERO,
};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// 1. SingleQubitState - Amplitude pair
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SingleQubitState {
    pub alpha: ComplexAmplitude,
    pub beta: ComplexAmplitude,
}

impl Default for SingleQubitState {
    fn default() -> Self {
        Self::zero()
    }
}

impl SingleQubitState {
    pub const fn new(alpha: ComplexAmplitude, beta: ComplexAmplitude) -> Self {
        Self { alpha, beta }
    }

    pub const fn zero() -> Self {
        Self::new(AMPLITUDE_ONE, AMPLITUDE_ZERO)
    }

    pub const fn one() -> Self {
        Self::new(AMPLITUDE_ZERO, AMPLITUDE_ONE)
    }

    /// Probability of measuring |1⟩.
    pub fn probability(&self) -> f64 {
        self.beta.norm_sqr()
    }

    pub fn probability_of_zero(&self) -> f64 {
        self.alpha.norm_sqr()
    }

    // =========================================================================
    // 2. Parameter array conversion
    // =========================================================================

    /// Builds a state from `[alpha.re, alpha.im, beta.re, beta.im]`.
    pub const fn from_parameter_array(parameters: [f64; 4]) -> Self {
        Self::new(
            amplitude_from_parts(parameters[0], parameters[1]),
            amplitude_from_parts(parameters[2], parameters[3]),
        )
    }

    pub fn parameter_array(&self) -> [f64; 4] {
        [self.alpha.re, self.alpha.im, self.beta.re, self.beta.im]
    }

    // =========================================================================
    // 3. Normalization and comparison
    // =========================================================================

    pub fn norm_squared(&self) -> f64 {
        self.alpha.norm_sqr() + self.beta.norm_sqr()
    }

    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm_squared() - 1.0).abs() <= tolerance
    }

    pub fn approximately_equals(&self, other: &Self, tolerance: f64) -> bool {
        amplitudes_approximately_equal(self.alpha, other.alpha, tolerance)
            && amplitudes_approximately_equal(self.beta, other.beta, tolerance)
    }
}

impl fmt::Display for SingleQubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.4}{:+.4}i)|0⟩ + ({:.4}{:+.4}i)|1⟩",
            self.alpha.re, self.alpha.im, self.beta.re, self.beta.im
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state() {
        let state = SingleQubitState::zero();
        assert_eq!(state.probability(), 0.0);
        assert_eq!(state.probability_of_zero(), 1.0);
        assert!(state.is_normalized(1e-12));
    }

    #[test]
    fn test_one_state_probability() {
        let state = SingleQubitState::one();
        assert!((state.probability() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parameter_array_layout() {
        let state = SingleQubitState::from_parameter_array([0.1, 0.2, 0.3, 0.4]);
        assert_eq!(state.alpha, amplitude_from_parts(0.1, 0.2));
        assert_eq!(state.beta, amplitude_from_parts(0.3, 0.4));
        assert_eq!(state.parameter_array(), [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_probability_uses_imaginary_part() {
        let r = std::f64::consts::FRAC_1_SQRT_2;
        let state = SingleQubitState::from_parameter_array([r, 0.0, 0.0, r]);
        assert!((state.probability() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unnormalized_state_detected() {
        let state = SingleQubitState::from_parameter_array([1.0, 0.0, 1.0, 0.0]);
        assert!(!state.is_normalized(1e-9));
    }

    #[test]
    fn test_display_contains_both_amplitudes() {
        let text = SingleQubitState::one().to_string();
        assert!(text.contains("|0⟩"));
        assert!(text.contains("|1⟩"));
    }
}
