// =============================================================================
// Quantum Circuit Workbench - Quantum Circuit
// =============================================================================
// Table of Contents:
//   1. QuantumCircuit - Ordered wires with a shared column space
//   2. Edit operations (insert, remove, move, initial state)
//   3. Boundary validation
//   4. Propagation and compaction
//   5. Export read contract
// =============================================================================
// Purpose: Every public edit validates first, mutates, then runs the full
//          propagation and compaction pass before returning, so callers only
//          ever observe a consistent grid. A rejected edit mutates nothing.
// =============================================================================

use crate::configuration::CircuitConfiguration;
use crate::error::{CircuitError, CircuitResult};
use crate::gate_operations::GateKind;
use crate::initial_state::InitialStateSelection;
use crate::quantum_line::{GateCell, QuantumLine};
use crate::qubit_state::SingleQubitState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// 1. QuantumCircuit - Main circuit container
// =============================================================================

#[derive(Debug, Clone)]
pub struct QuantumCircuit {
    id: Uuid,
    lines: Vec<QuantumLine>,
    max_column_count: usize,
    configuration: CircuitConfiguration,
}

impl Default for QuantumCircuit {
    fn default() -> Self {
        Self::from_validated_configuration(CircuitConfiguration::default())
    }
}

impl QuantumCircuit {
    pub fn new(initial_width: usize) -> CircuitResult<Self> {
        Self::with_configuration(CircuitConfiguration {
            initial_width,
            ..CircuitConfiguration::default()
        })
    }

    pub fn with_configuration(configuration: CircuitConfiguration) -> CircuitResult<Self> {
        configuration.validate()?;
        Ok(Self::from_validated_configuration(configuration))
    }

    fn from_validated_configuration(configuration: CircuitConfiguration) -> Self {
        let lines = (0..configuration.initial_width).map(QuantumLine::new).collect();
        tracing::debug!(width = configuration.initial_width, "created quantum circuit");
        Self {
            id: Uuid::new_v4(),
            lines,
            max_column_count: 1,
            configuration,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of wires.
    pub fn width(&self) -> usize {
        self.lines.len()
    }

    /// Shared column space every line is laid out in.
    pub fn max_column_count(&self) -> usize {
        self.max_column_count
    }

    pub fn configuration(&self) -> &CircuitConfiguration {
        &self.configuration
    }

    pub fn lines(&self) -> &[QuantumLine] {
        &self.lines
    }

    pub fn line(&self, line_index: usize) -> Option<&QuantumLine> {
        self.lines.get(line_index)
    }

    pub fn cell(&self, line_index: usize, column: usize) -> Option<&GateCell> {
        self.line(line_index).and_then(|line| line.cell(column))
    }

    pub fn gate_count(&self) -> usize {
        self.lines.iter().map(QuantumLine::gate_count).sum()
    }

    /// State leaving each wire, in line order.
    pub fn final_states(&self) -> Vec<SingleQubitState> {
        self.lines.iter().map(QuantumLine::final_state).collect()
    }

    /// Checks every cached state against the configured tolerance.
    pub fn is_normalized(&self) -> bool {
        let tolerance = self.configuration.normalization_tolerance;
        self.lines.iter().all(|line| line.is_normalized(tolerance))
    }

    // =========================================================================
    // 2. Edit operations
    // =========================================================================

    /// Places a gate on `line_index` at the doubled `target_slot`. A line
    /// index equal to the current width adds a fresh |0⟩ line first.
    /// Returns the line's column count after compaction.
    pub fn insert_gate(
        &mut self,
        line_index: usize,
        target_slot: isize,
        gate_kind: GateKind,
        display_label: impl Into<String>,
    ) -> CircuitResult<usize> {
        self.apply_insertion(line_index, target_slot, gate_kind, display_label.into())
            .inspect(|column_count| {
                tracing::debug!(
                    line = line_index,
                    slot = target_slot,
                    gate = %gate_kind,
                    column_count,
                    max_column_count = self.max_column_count,
                    "inserted gate"
                )
            })
            .inspect_err(|error| {
                tracing::warn!(
                    line = line_index,
                    slot = target_slot,
                    %error,
                    "rejected gate insertion"
                )
            })
    }

    fn apply_insertion(
        &mut self,
        line_index: usize,
        target_slot: isize,
        gate_kind: GateKind,
        display_label: String,
    ) -> CircuitResult<usize> {
        let slot = Self::validate_non_negative(target_slot)?;
        self.validate_insertion_target(line_index, slot, gate_kind)?;

        if line_index == self.width() {
            self.lines.push(QuantumLine::new(line_index));
        }
        self.lines[line_index].insert_gate(slot, gate_kind, display_label)?;
        self.refresh()?;
        Ok(self.lines[line_index].column_count())
    }

    /// Empties `column` on `line_index`, returning the removed cell.
    pub fn remove_gate(
        &mut self,
        line_index: usize,
        column: isize,
    ) -> CircuitResult<Option<GateCell>> {
        self.apply_removal(line_index, column)
            .inspect(|removed| {
                tracing::debug!(
                    line = line_index,
                    column,
                    removed = removed.is_some(),
                    width = self.width(),
                    "removed gate"
                )
            })
            .inspect_err(|error| {
                tracing::warn!(line = line_index, column, %error, "rejected gate removal")
            })
    }

    fn apply_removal(
        &mut self,
        line_index: usize,
        column: isize,
    ) -> CircuitResult<Option<GateCell>> {
        let column = Self::validate_non_negative(column)?;
        self.validate_existing_line(line_index)?;

        let removed = self.lines[line_index].remove_gate(column)?;
        if removed.is_some() {
            self.refresh()?;
        }
        Ok(removed)
    }

    /// Lifts the gate at `from_column` and drops it at the doubled `to_slot`
    /// of `to_line`. The slot is read against the layout with the source
    /// column already emptied. Returns the destination line's column count.
    pub fn move_gate(
        &mut self,
        from_line: usize,
        from_column: isize,
        to_line: usize,
        to_slot: isize,
    ) -> CircuitResult<usize> {
        self.apply_move(from_line, from_column, to_line, to_slot)
            .inspect(|column_count| {
                tracing::debug!(
                    from_line,
                    from_column,
                    to_line,
                    to_slot,
                    column_count,
                    "moved gate"
                )
            })
            .inspect_err(|error| {
                tracing::warn!(
                    from_line,
                    from_column,
                    to_line,
                    to_slot,
                    %error,
                    "rejected gate move"
                )
            })
    }

    fn apply_move(
        &mut self,
        from_line: usize,
        from_column: isize,
        to_line: usize,
        to_slot: isize,
    ) -> CircuitResult<usize> {
        let from_column = Self::validate_non_negative(from_column)?;
        let to_slot = Self::validate_non_negative(to_slot)?;
        self.validate_existing_line(from_line)?;
        if from_column == 0 {
            return Err(CircuitError::InitialCellReserved {
                line_index: from_line,
            });
        }
        let source_line = &self.lines[from_line];
        let gate_kind = source_line
            .cell(from_column)
            .map(GateCell::gate_kind)
            .ok_or(CircuitError::ColumnIndexOutOfRange {
                column: from_column,
                column_count: source_line.column_count(),
            })?;
        self.validate_insertion_target(to_line, to_slot, gate_kind)?;

        let cell = self.lines[from_line]
            .remove_gate(from_column)?
            .ok_or(CircuitError::ColumnIndexOutOfRange {
                column: from_column,
                column_count: self.lines[from_line].column_count(),
            })?;
        if to_line == self.width() {
            self.lines.push(QuantumLine::new(to_line));
        }
        self.lines[to_line].insert_gate(to_slot, cell.gate_kind(), cell.display_label())?;
        self.refresh()?;
        Ok(self.lines[to_line].column_count())
    }

    /// Prepares `line_index` in the canonical state at `state_index` and
    /// re-propagates that line only.
    pub fn set_initial_qubit(
        &mut self,
        line_index: usize,
        state_index: usize,
    ) -> CircuitResult<()> {
        self.apply_initial_state(line_index, state_index)
            .inspect(|_| {
                tracing::debug!(line = line_index, state_index, "set initial qubit")
            })
            .inspect_err(|error| {
                tracing::warn!(line = line_index, state_index, %error, "rejected initial state")
            })
    }

    fn apply_initial_state(&mut self, line_index: usize, state_index: usize) -> CircuitResult<()> {
        let selection = InitialStateSelection::from_index(state_index)?;
        self.validate_existing_line(line_index)?;
        self.lines[line_index].set_initial_state(selection)?;
        debug_assert!(self.is_normalized(), "prepared state is not normalized");
        Ok(())
    }

    // =========================================================================
    // 3. Boundary validation
    // =========================================================================

    fn validate_non_negative(index: isize) -> CircuitResult<usize> {
        usize::try_from(index).map_err(|_| CircuitError::ColumnIndexNegative(index))
    }

    fn line_index_error(&self, line_index: usize) -> CircuitError {
        CircuitError::LineIndexOutOfRange {
            index: line_index,
            width: self.width(),
            maximum: self.configuration.maximum_qubit_count,
        }
    }

    fn validate_existing_line(&self, line_index: usize) -> CircuitResult<()> {
        if line_index < self.width() {
            Ok(())
        } else {
            Err(self.line_index_error(line_index))
        }
    }

    /// An insertion may target an existing line or the next line, below the
    /// qubit cap.
    fn validate_insertion_target(
        &self,
        line_index: usize,
        slot: usize,
        gate_kind: GateKind,
    ) -> CircuitResult<()> {
        if line_index > self.width() || line_index >= self.configuration.maximum_qubit_count {
            return Err(self.line_index_error(line_index));
        }
        match self.lines.get(line_index) {
            Some(line) => line.validate_insertion(slot, gate_kind),
            None => QuantumLine::new(line_index).validate_insertion(slot, gate_kind),
        }
    }

    // =========================================================================
    // 4. Propagation and compaction
    // =========================================================================

    fn refresh(&mut self) -> CircuitResult<()> {
        for line in &mut self.lines {
            line.update_line()?;
        }
        self.compact_trailing_lines();
        self.compact_columns();
        self.max_column_count = self
            .lines
            .iter()
            .map(QuantumLine::column_count)
            .max()
            .unwrap_or(1);
        debug_assert!(self.is_normalized(), "propagation produced an unnormalized state");
        Ok(())
    }

    /// Drops a contiguous trailing run of untouched lines, never going below
    /// the configured minimum width.
    fn compact_trailing_lines(&mut self) {
        while self.lines.len() > self.configuration.minimum_visible_width
            && self.lines.last().is_some_and(QuantumLine::is_untouched)
        {
            self.lines.pop();
            tracing::trace!(width = self.lines.len(), "removed trailing empty line");
        }
    }

    /// Closes every column that is empty on all lines.
    fn compact_columns(&mut self) {
        let mut shared_column_count = self
            .lines
            .iter()
            .map(QuantumLine::column_count)
            .max()
            .unwrap_or(1);
        let mut column = 1;
        while column < shared_column_count {
            if self.lines.iter().any(|line| line.is_column_occupied(column)) {
                column += 1;
                continue;
            }
            for line in &mut self.lines {
                line.remove_column(column);
            }
            shared_column_count -= 1;
            tracing::trace!(column, "closed empty column");
        }
    }

    // =========================================================================
    // 5. Export read contract
    // =========================================================================

    /// Occupied non-Init cells in line-major, column order with their export
    /// operation names.
    pub fn exported_operations(&self) -> CircuitResult<Vec<ExportedGateOperation>> {
        let mut operations = Vec::with_capacity(self.gate_count());
        for line in &self.lines {
            for cell in line.occupied_cells() {
                if let Some(operation_name) = cell.gate_kind().exported_operation_name()? {
                    operations.push(ExportedGateOperation {
                        line_index: line.line_index(),
                        column: cell.column(),
                        gate_kind: cell.gate_kind(),
                        operation_name: operation_name.to_string(),
                    });
                }
            }
        }
        Ok(operations)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedGateOperation {
    pub line_index: usize,
    pub column: usize,
    pub gate_kind: GateKind,
    pub operation_name: String,
}
