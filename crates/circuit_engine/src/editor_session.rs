// =============================================================================
// Quantum Circuit Workbench - Editor Session
// =============================================================================
// Table of Contents:
//   1. CircuitEditorSession - Owner of every open circuit
//   2. Active circuit selection
// =============================================================================

use crate::configuration::CircuitConfiguration;
use crate::error::{CircuitError, CircuitResult};
use crate::quantum_circuit::QuantumCircuit;

// =============================================================================
// 1. CircuitEditorSession
// =============================================================================

/// Circuits open in one editing session. There is always at least one, and
/// exactly one is active.
#[derive(Debug, Clone)]
pub struct CircuitEditorSession {
    circuits: Vec<QuantumCircuit>,
    active_index: usize,
    configuration: CircuitConfiguration,
}

impl CircuitEditorSession {
    pub fn new(configuration: CircuitConfiguration) -> CircuitResult<Self> {
        let first = QuantumCircuit::with_configuration(configuration.clone())?;
        Ok(Self {
            circuits: vec![first],
            active_index: 0,
            configuration,
        })
    }

    pub fn configuration(&self) -> &CircuitConfiguration {
        &self.configuration
    }

    /// Opens a new circuit of the given width and makes it active.
    pub fn create_circuit(&mut self, initial_width: usize) -> CircuitResult<usize> {
        let circuit = QuantumCircuit::with_configuration(CircuitConfiguration {
            initial_width,
            ..self.configuration.clone()
        })?;
        self.circuits.push(circuit);
        self.active_index = self.circuits.len() - 1;
        tracing::debug!(
            index = self.active_index,
            width = initial_width,
            "opened circuit"
        );
        Ok(self.active_index)
    }

    pub fn circuits(&self) -> &[QuantumCircuit] {
        &self.circuits
    }

    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    pub fn circuit(&self, index: usize) -> CircuitResult<&QuantumCircuit> {
        self.circuits.get(index).ok_or(CircuitError::CircuitNotFound(index))
    }

    pub fn circuit_mut(&mut self, index: usize) -> CircuitResult<&mut QuantumCircuit> {
        self.circuits
            .get_mut(index)
            .ok_or(CircuitError::CircuitNotFound(index))
    }

    // =========================================================================
    // 2. Active circuit selection
    // =========================================================================

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn select_circuit(&mut self, index: usize) -> CircuitResult<()> {
        if index >= self.circuits.len() {
            tracing::warn!(index, available = self.circuits.len(), "no circuit to select");
            return Err(CircuitError::CircuitNotFound(index));
        }
        self.active_index = index;
        Ok(())
    }

    pub fn active_circuit(&self) -> &QuantumCircuit {
        &self.circuits[self.active_index]
    }

    pub fn active_circuit_mut(&mut self) -> &mut QuantumCircuit {
        &mut self.circuits[self.active_index]
    }
}

impl Default for CircuitEditorSession {
    fn default() -> Self {
        let configuration = CircuitConfiguration::default();
        Self {
            circuits: vec![QuantumCircuit::default()],
            active_index: 0,
            configuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate_operations::GateKind;

    #[test]
    fn test_session_starts_with_one_active_circuit() {
        let session = CircuitEditorSession::default();
        assert_eq!(session.circuit_count(), 1);
        assert_eq!(session.active_index(), 0);
        assert_eq!(session.active_circuit().width(), 2);
    }

    #[test]
    fn test_create_circuit_becomes_active() {
        let mut session = CircuitEditorSession::default();
        let index = session.create_circuit(4).unwrap();
        assert_eq!(index, 1);
        assert_eq!(session.active_circuit().width(), 4);
    }

    #[test]
    fn test_create_circuit_inherits_limits() {
        let mut session = CircuitEditorSession::new(CircuitConfiguration::new(2, 3)).unwrap();
        assert!(matches!(
            session.create_circuit(4),
            Err(CircuitError::InvalidWidth { maximum: 3, .. })
        ));
        assert_eq!(session.circuit_count(), 1);
    }

    #[test]
    fn test_edits_target_active_circuit_only() {
        let mut session = CircuitEditorSession::default();
        session.create_circuit(2).unwrap();
        session
            .active_circuit_mut()
            .insert_gate(0, 1, GateKind::PauliX, "X")
            .unwrap();

        assert_eq!(session.circuit(1).unwrap().gate_count(), 1);
        assert_eq!(session.circuit(0).unwrap().gate_count(), 0);

        session.select_circuit(0).unwrap();
        assert_eq!(session.active_circuit().gate_count(), 0);
    }

    #[test]
    fn test_session_can_move_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CircuitEditorSession>();
    }

    #[test]
    fn test_select_missing_circuit_rejected() {
        let mut session = CircuitEditorSession::default();
        assert_eq!(session.select_circuit(3), Err(CircuitError::CircuitNotFound(3)));
        assert_eq!(session.active_index(), 0);
        assert!(session.circuit_mut(1).is_err());
    }
}
