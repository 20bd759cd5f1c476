// =============================================================================
// Quantum Circuit Workbench - Complex Amplitudes
// =============================================================================
// Table of Contents:
//   1. ComplexAmplitude - Value type for a single amplitude
//   2. Construction and comparison helpers
// =============================================================================
// Purpose: Amplitudes are plain num-complex values. Addition, multiplication,
//          negation and real scaling come from the operator impls on
//          Complex64; this module only adds the helpers the engine needs.
// =============================================================================

use num_complex::Complex64;

// =============================================================================
// 1. ComplexAmplitude - Value type
// =============================================================================

pub type ComplexAmplitude = Complex64;

pub const AMPLITUDE_ZERO: ComplexAmplitude = Complex64::new(0.0, 0.0);
pub const AMPLITUDE_ONE: ComplexAmplitude = Complex64::new(1.0, 0.0);
pub const AMPLITUDE_IMAGINARY_UNIT: ComplexAmplitude = Complex64::new(0.0, 1.0);

// =============================================================================
// 2. Construction and comparison helpers
// =============================================================================

#[inline]
pub const fn amplitude_from_parts(real: f64, imaginary: f64) -> ComplexAmplitude {
    Complex64::new(real, imaginary)
}

#[inline]
pub fn scale_by_real(amplitude: ComplexAmplitude, factor: f64) -> ComplexAmplitude {
    amplitude * factor
}

/// Compares real and imaginary parts independently.
pub fn amplitudes_approximately_equal(
    left: ComplexAmplitude,
    right: ComplexAmplitude,
    tolerance: f64,
) -> bool {
    (left.re - right.re).abs() <= tolerance && (left.im - right.im).abs() <= tolerance
}
