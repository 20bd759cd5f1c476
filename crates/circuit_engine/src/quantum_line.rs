// =============================================================================
// Quantum Circuit Workbench - Quantum Line
// =============================================================================
// Table of Contents:
//   1. GateCell - One occupied time-slot on a wire
//   2. QuantumLine - Sparse column array for one wire
//   3. Gate insertion protocol (doubled slot coordinates)
//   4. Removal and column shifting
//   5. Propagation pass
// =============================================================================
// Purpose: A line owns its cells exclusively. Column 0 always holds the Init
//          cell. Structural edits only move or relabel cells; cached result
//          states are brought up to date by update_line, which the circuit
//          runs after every edit.
// =============================================================================

use crate::error::{CircuitError, CircuitResult};
use crate::gate_operations::{apply_gate, GateKind};
use crate::initial_state::InitialStateSelection;
use crate::qubit_state::SingleQubitState;

// =============================================================================
// 1. GateCell - Occupied time-slot
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GateCell {
    column: usize,
    gate_kind: GateKind,
    display_label: String,
    result_state: SingleQubitState,
}

impl GateCell {
    fn new(
        column: usize,
        gate_kind: GateKind,
        display_label: String,
        result_state: SingleQubitState,
    ) -> Self {
        Self {
            column,
            gate_kind,
            display_label,
            result_state,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn gate_kind(&self) -> GateKind {
        self.gate_kind
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    /// State after this gate, given whatever entered it on the last pass.
    pub fn result_state(&self) -> SingleQubitState {
        self.result_state
    }

    pub fn probability(&self) -> f64 {
        self.result_state.probability()
    }
}

// =============================================================================
// 2. QuantumLine - Sparse column array
// =============================================================================

/// One wire. `cells.len()` is the column count; `None` entries are empty
/// time-slots, not identity gates.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumLine {
    line_index: usize,
    cells: Vec<Option<GateCell>>,
    initial_state: InitialStateSelection,
}

impl QuantumLine {
    pub fn new(line_index: usize) -> Self {
        Self::with_initial_state(line_index, InitialStateSelection::Zero)
    }

    pub fn with_initial_state(line_index: usize, initial_state: InitialStateSelection) -> Self {
        let init_cell = GateCell::new(
            0,
            GateKind::Init,
            initial_state.label().to_string(),
            initial_state.qubit_state(),
        );
        Self {
            line_index,
            cells: vec![Some(init_cell)],
            initial_state,
        }
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn column_count(&self) -> usize {
        self.cells.len()
    }

    pub fn initial_state(&self) -> InitialStateSelection {
        self.initial_state
    }

    pub fn prepared_state(&self) -> SingleQubitState {
        self.initial_state.qubit_state()
    }

    pub fn cell(&self, column: usize) -> Option<&GateCell> {
        self.cells.get(column).and_then(Option::as_ref)
    }

    pub fn is_column_occupied(&self, column: usize) -> bool {
        self.cell(column).is_some()
    }

    /// Occupied cells in column order, Init cell first.
    pub fn occupied_cells(&self) -> impl Iterator<Item = &GateCell> {
        self.cells.iter().flatten()
    }

    pub fn gate_count(&self) -> usize {
        self.occupied_cells().count() - 1
    }

    /// State leaving the wire after its last gate.
    pub fn final_state(&self) -> SingleQubitState {
        self.occupied_cells()
            .last()
            .map(GateCell::result_state)
            .unwrap_or_else(|| self.prepared_state())
    }

    /// Every cached result state has unit norm within `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        self.occupied_cells()
            .all(|cell| cell.result_state.is_normalized(tolerance))
    }

    /// Only the Init cell is present and it still prepares |0⟩.
    pub fn is_untouched(&self) -> bool {
        self.initial_state == InitialStateSelection::Zero && self.gate_count() == 0
    }

    /// Result of the nearest occupied column strictly before `column`.
    fn state_entering(&self, column: usize) -> SingleQubitState {
        self.cells[..column.min(self.cells.len())]
            .iter()
            .rev()
            .flatten()
            .next()
            .map(GateCell::result_state)
            .unwrap_or_else(|| self.prepared_state())
    }

    fn renumber_cells(&mut self) {
        for (column, cell) in self.cells.iter_mut().enumerate() {
            if let Some(cell) = cell {
                cell.column = column;
            }
        }
    }

    // =========================================================================
    // 3. Gate insertion protocol
    // =========================================================================

    /// Checks that `gate_kind` may be placed at `target_slot`.
    pub fn validate_insertion(&self, target_slot: usize, gate_kind: GateKind) -> CircuitResult<()> {
        if !gate_kind.is_implemented() {
            return Err(CircuitError::UnsupportedGate { gate: gate_kind });
        }
        if gate_kind == GateKind::Init || target_slot == 0 {
            return Err(CircuitError::InitialCellReserved {
                line_index: self.line_index,
            });
        }
        Ok(())
    }

    /// Places a gate using doubled slot coordinates: slot `2k` overwrites
    /// column `k`, slot `2k + 1` inserts into the gap after column `k`.
    /// Slots at or past the gap after the last column append.
    ///
    /// Downstream result states are stale until [`QuantumLine::update_line`]
    /// runs. Returns the new column count.
    pub fn insert_gate(
        &mut self,
        target_slot: usize,
        gate_kind: GateKind,
        display_label: impl Into<String>,
    ) -> CircuitResult<usize> {
        self.validate_insertion(target_slot, gate_kind)?;
        let display_label = display_label.into();
        let column_count = self.column_count();

        if target_slot >= 2 * column_count - 1 {
            let input = self.state_entering(column_count);
            let result = apply_gate(gate_kind, input)?;
            self.cells
                .push(Some(GateCell::new(column_count, gate_kind, display_label, result)));
        } else if target_slot % 2 == 1 {
            let new_index = target_slot / 2 + 1;
            // An empty column on either side of the gap absorbs the new cell.
            let settle_index = if self.cells[new_index - 1].is_none() {
                Some(new_index - 1)
            } else if self.cells[new_index].is_none() {
                Some(new_index)
            } else {
                None
            };
            let column = settle_index.unwrap_or(new_index);
            let input = self.state_entering(column);
            let result = apply_gate(gate_kind, input)?;
            let cell = GateCell::new(column, gate_kind, display_label, result);
            if settle_index.is_some() {
                self.cells[column] = Some(cell);
            } else {
                self.cells.insert(new_index, Some(cell));
                self.renumber_cells();
                tracing::trace!(
                    line = self.line_index,
                    column = new_index,
                    "shifted cells right for gap insertion"
                );
            }
        } else {
            let column = target_slot / 2;
            match self.cells[column].as_mut() {
                Some(cell) => {
                    cell.gate_kind = gate_kind;
                    cell.display_label = display_label;
                }
                None => {
                    let input = self.state_entering(column);
                    let result = apply_gate(gate_kind, input)?;
                    self.cells[column] =
                        Some(GateCell::new(column, gate_kind, display_label, result));
                }
            }
        }

        Ok(self.column_count())
    }

    // =========================================================================
    // 4. Removal and column shifting
    // =========================================================================

    /// Empties `column`. Returns the removed cell, or `None` when the column
    /// was already empty or past the end of the line.
    pub fn remove_gate(&mut self, column: usize) -> CircuitResult<Option<GateCell>> {
        if column == 0 {
            return Err(CircuitError::InitialCellReserved {
                line_index: self.line_index,
            });
        }
        Ok(self.cells.get_mut(column).and_then(Option::take))
    }

    /// Shifts every cell after `column` left by one. Only succeeds when
    /// `column` is an empty slot inside the line.
    pub fn remove_column(&mut self, column: usize) -> bool {
        if column == 0 || column >= self.cells.len() || self.cells[column].is_some() {
            return false;
        }
        self.cells.remove(column);
        self.renumber_cells();
        true
    }

    /// Replaces the prepared state and re-propagates the whole line.
    pub fn set_initial_state(&mut self, initial_state: InitialStateSelection) -> CircuitResult<()> {
        self.initial_state = initial_state;
        if let Some(init_cell) = self.cells[0].as_mut() {
            init_cell.display_label = initial_state.label().to_string();
        }
        self.update_line()
    }

    // =========================================================================
    // 5. Propagation pass
    // =========================================================================

    /// Recomputes every cached result state from the prepared state forward,
    /// then trims trailing empty columns.
    pub fn update_line(&mut self) -> CircuitResult<()> {
        let mut last_state = self.prepared_state();
        for cell in self.cells.iter_mut().flatten() {
            cell.result_state = apply_gate(cell.gate_kind, last_state)?;
            last_state = cell.result_state;
        }

        while matches!(self.cells.last(), Some(None)) {
            self.cells.pop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn occupied_columns(line: &QuantumLine) -> Vec<usize> {
        line.occupied_cells().map(GateCell::column).collect()
    }

    fn labels(line: &QuantumLine) -> Vec<String> {
        line.occupied_cells()
            .map(|cell| cell.display_label().to_string())
            .collect()
    }

    fn append(line: &mut QuantumLine, kind: GateKind) -> usize {
        let count = line.insert_gate(usize::MAX / 2, kind, kind.symbol()).unwrap();
        line.update_line().unwrap();
        count
    }

    #[test]
    fn test_new_line_has_only_init_cell() {
        let line = QuantumLine::new(3);
        assert_eq!(line.line_index(), 3);
        assert_eq!(line.column_count(), 1);
        assert_eq!(line.gate_count(), 0);
        assert!(line.is_untouched());
        let init = line.cell(0).unwrap();
        assert_eq!(init.gate_kind(), GateKind::Init);
        assert_eq!(init.display_label(), "|0⟩");
    }

    #[test]
    fn test_sequential_appends_grow_column_count() {
        let mut line = QuantumLine::new(0);
        let kinds = [GateKind::Hadamard, GateKind::PauliX, GateKind::PauliZ, GateKind::PauliY];
        for (n, kind) in kinds.into_iter().enumerate() {
            assert_eq!(append(&mut line, kind), n + 2);
        }
        assert_eq!(line.column_count(), kinds.len() + 1);
        assert_eq!(occupied_columns(&line), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_append_slot_is_gap_after_last_column() {
        let mut line = QuantumLine::new(0);
        assert_eq!(line.insert_gate(1, GateKind::PauliX, "X").unwrap(), 2);
        assert_eq!(line.insert_gate(3, GateKind::PauliZ, "Z").unwrap(), 3);
        assert_eq!(labels(&line), vec!["|0⟩", "X", "Z"]);
    }

    #[test]
    fn test_appended_cell_uses_preceding_result() {
        let mut line = QuantumLine::new(0);
        line.insert_gate(1, GateKind::PauliX, "X").unwrap();
        line.insert_gate(3, GateKind::Hadamard, "H").unwrap();
        let state = line.cell(2).unwrap().result_state();
        assert!((state.alpha.re - std::f64::consts::FRAC_1_SQRT_2).abs() < TOLERANCE);
        assert!((state.beta.re + std::f64::consts::FRAC_1_SQRT_2).abs() < TOLERANCE);
    }

    #[test]
    fn test_gap_insertion_shifts_later_cells() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::Hadamard);
        append(&mut line, GateKind::PauliX);
        append(&mut line, GateKind::PauliZ);
        let before = line.column_count();

        // gap between column 1 and column 2
        let after = line.insert_gate(3, GateKind::PauliY, "Y").unwrap();
        line.update_line().unwrap();

        assert_eq!(after, before + 1);
        assert_eq!(labels(&line), vec!["|0⟩", "H", "Y", "X", "Z"]);
        assert_eq!(occupied_columns(&line), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_gap_insertion_settles_into_empty_column() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::Hadamard);
        append(&mut line, GateKind::PauliX);
        append(&mut line, GateKind::PauliZ);
        line.remove_gate(2).unwrap();

        let count = line.insert_gate(3, GateKind::PauliY, "Y").unwrap();
        assert_eq!(count, 4);
        assert_eq!(labels(&line), vec!["|0⟩", "H", "Y", "Z"]);
        assert_eq!(occupied_columns(&line), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_gap_insertion_settles_into_hole_on_the_left() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::PauliX);
        append(&mut line, GateKind::PauliZ);
        append(&mut line, GateKind::PauliX);
        line.remove_gate(2).unwrap();

        // gap between the hole at column 2 and the X at column 3
        let count = line.insert_gate(5, GateKind::Hadamard, "H").unwrap();
        assert_eq!(count, 4);
        assert_eq!(labels(&line), vec!["|0⟩", "X", "H", "X"]);
        assert_eq!(occupied_columns(&line), vec![0, 1, 2, 3]);
        let hadamard = line.cell(2).unwrap().result_state();
        assert!((hadamard.beta.re + std::f64::consts::FRAC_1_SQRT_2).abs() < TOLERANCE);
    }

    #[test]
    fn test_normalization_check_uses_given_tolerance() {
        let mut line = QuantumLine::with_initial_state(0, InitialStateSelection::Plus);
        append(&mut line, GateKind::Hadamard);
        append(&mut line, GateKind::PauliY);
        assert!(line.is_normalized(1e-9));

        line.cells[1] = Some(GateCell::new(
            1,
            GateKind::Hadamard,
            "H".to_string(),
            SingleQubitState::from_parameter_array([1.0, 0.0, 0.01, 0.0]),
        ));
        assert!(!line.is_normalized(1e-9));
        assert!(line.is_normalized(1e-3));
    }

    #[test]
    fn test_overwrite_keeps_column_count_and_repropagates() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::PauliX);
        append(&mut line, GateKind::PauliZ);
        assert!((line.final_state().probability() - 1.0).abs() < TOLERANCE);

        let count = line.insert_gate(2, GateKind::Hadamard, "H").unwrap();
        assert_eq!(count, 3);
        line.update_line().unwrap();
        assert_eq!(line.cell(1).unwrap().gate_kind(), GateKind::Hadamard);
        assert_eq!(line.cell(1).unwrap().display_label(), "H");
        assert!((line.final_state().probability() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_even_slot_fills_hole() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::PauliX);
        append(&mut line, GateKind::PauliZ);
        line.remove_gate(1).unwrap();
        line.insert_gate(2, GateKind::Hadamard, "H").unwrap();
        assert_eq!(line.cell(1).unwrap().gate_kind(), GateKind::Hadamard);
        assert_eq!(line.column_count(), 3);
    }

    #[test]
    fn test_init_cell_is_reserved() {
        let mut line = QuantumLine::new(2);
        assert_eq!(
            line.insert_gate(0, GateKind::Hadamard, "H"),
            Err(CircuitError::InitialCellReserved { line_index: 2 })
        );
        assert_eq!(
            line.insert_gate(1, GateKind::Init, "|0⟩"),
            Err(CircuitError::InitialCellReserved { line_index: 2 })
        );
        assert!(line.remove_gate(0).is_err());
        assert_eq!(line.column_count(), 1);
    }

    #[test]
    fn test_unsupported_gate_rejected_without_mutation() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::Hadamard);
        let snapshot = line.clone();
        assert_eq!(
            line.insert_gate(1, GateKind::ControlledNot, "⊕"),
            Err(CircuitError::UnsupportedGate {
                gate: GateKind::ControlledNot
            })
        );
        assert_eq!(line, snapshot);
    }

    #[test]
    fn test_remove_gate_returns_cell_and_trims() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::Hadamard);
        append(&mut line, GateKind::PauliX);

        let removed = line.remove_gate(2).unwrap().unwrap();
        assert_eq!(removed.gate_kind(), GateKind::PauliX);
        assert_eq!(line.column_count(), 3);
        line.update_line().unwrap();
        assert_eq!(line.column_count(), 2);

        assert_eq!(line.remove_gate(7).unwrap(), None);
    }

    #[test]
    fn test_remove_column_shifts_left() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::Hadamard);
        append(&mut line, GateKind::PauliX);
        line.remove_gate(1).unwrap();

        assert!(!line.remove_column(2));
        assert!(line.remove_column(1));
        assert_eq!(occupied_columns(&line), vec![0, 1]);
        assert_eq!(line.cell(1).unwrap().gate_kind(), GateKind::PauliX);
    }

    #[test]
    fn test_set_initial_state_repropagates_downstream() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::Hadamard);
        line.set_initial_state(InitialStateSelection::Plus).unwrap();

        assert_eq!(line.cell(0).unwrap().display_label(), "|+⟩");
        assert!(!line.is_untouched());
        assert!(line.final_state().approximately_equals(&SingleQubitState::zero(), TOLERANCE));
    }

    #[test]
    fn test_empty_columns_pass_state_through() {
        let mut line = QuantumLine::new(0);
        append(&mut line, GateKind::PauliX);
        append(&mut line, GateKind::PauliZ);
        append(&mut line, GateKind::Hadamard);
        line.remove_gate(2).unwrap();
        line.update_line().unwrap();

        let expected = SingleQubitState::from_parameter_array([
            std::f64::consts::FRAC_1_SQRT_2,
            0.0,
            -std::f64::consts::FRAC_1_SQRT_2,
            0.0,
        ]);
        assert!(line.final_state().approximately_equals(&expected, TOLERANCE));
        assert_eq!(line.column_count(), 4);
    }
}
