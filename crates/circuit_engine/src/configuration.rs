// =============================================================================
// Quantum Circuit Workbench - Engine Configuration
// =============================================================================
// Table of Contents:
//   1. CircuitConfiguration - Width limits and numeric tolerance
//   2. Presets
//   3. Validation and TOML loading
// =============================================================================

use crate::error::{CircuitError, CircuitResult};
use serde::{Deserialize, Serialize};

// =============================================================================
// 1. CircuitConfiguration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfiguration {
    pub initial_width: usize,
    pub maximum_qubit_count: usize,
    /// Trailing-line compaction never shrinks a circuit below this width.
    pub minimum_visible_width: usize,
    pub normalization_tolerance: f64,
}

impl Default for CircuitConfiguration {
    fn default() -> Self {
        Self {
            initial_width: 2,
            maximum_qubit_count: 8,
            minimum_visible_width: 2,
            normalization_tolerance: 1e-9,
        }
    }
}

// =============================================================================
// 2. Presets
// =============================================================================

impl CircuitConfiguration {
    pub fn new(initial_width: usize, maximum_qubit_count: usize) -> Self {
        Self {
            initial_width,
            maximum_qubit_count,
            ..Self::default()
        }
    }

    pub fn single_wire() -> Self {
        Self {
            initial_width: 1,
            minimum_visible_width: 1,
            ..Self::default()
        }
    }

    // =========================================================================
    // 3. Validation and TOML loading
    // =========================================================================

    pub fn validate(&self) -> CircuitResult<()> {
        if self.minimum_visible_width == 0 {
            return Err(CircuitError::InvalidConfiguration(
                "minimum_visible_width must be at least 1".to_string(),
            ));
        }
        if self.minimum_visible_width > self.maximum_qubit_count {
            return Err(CircuitError::InvalidConfiguration(format!(
                "minimum_visible_width {} exceeds maximum_qubit_count {}",
                self.minimum_visible_width, self.maximum_qubit_count
            )));
        }
        if self.initial_width < self.minimum_visible_width
            || self.initial_width > self.maximum_qubit_count
        {
            return Err(CircuitError::InvalidWidth {
                requested: self.initial_width,
                minimum: self.minimum_visible_width,
                maximum: self.maximum_qubit_count,
            });
        }
        if !self.normalization_tolerance.is_finite() || self.normalization_tolerance <= 0.0 {
            return Err(CircuitError::InvalidConfiguration(format!(
                "normalization_tolerance must be positive, got {}",
                self.normalization_tolerance
            )));
        }
        Ok(())
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> CircuitResult<Self> {
        let configuration: Self = toml::from_str(source)
            .map_err(|e| CircuitError::InvalidConfiguration(e.to_string()))?;
        configuration.validate()?;
        Ok(configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let configuration = CircuitConfiguration::default();
        assert!(configuration.validate().is_ok());
        assert_eq!(configuration.maximum_qubit_count, 8);
        assert_eq!(configuration.minimum_visible_width, 2);
    }

    #[test]
    fn test_single_wire_preset_is_valid() {
        assert!(CircuitConfiguration::single_wire().validate().is_ok());
    }

    #[test]
    fn test_toml_partial_document() {
        let configuration = CircuitConfiguration::from_toml_str("initial_width = 4\n").unwrap();
        assert_eq!(configuration.initial_width, 4);
        assert_eq!(configuration.maximum_qubit_count, 8);
    }

    #[test]
    fn test_toml_rejects_width_above_maximum() {
        let result = CircuitConfiguration::from_toml_str(
            "initial_width = 9\nmaximum_qubit_count = 8\n",
        );
        assert!(matches!(result, Err(CircuitError::InvalidWidth { requested: 9, .. })));
    }

    #[test]
    fn test_toml_rejects_malformed_document() {
        let result = CircuitConfiguration::from_toml_str("initial_width = \"two\"");
        assert!(matches!(result, Err(CircuitError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        let configuration = CircuitConfiguration {
            normalization_tolerance: 0.0,
            ..CircuitConfiguration::default()
        };
        assert!(configuration.validate().is_err());
    }
}
