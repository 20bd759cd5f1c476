// =============================================================================
// Quantum Circuit Workbench - Circuit Visualization Layer
// =============================================================================
// Table of Contents:
//   1. PhaseColor - Cell tint derived from the result state
//   2. CellView / LineView - Per-wire drawing data
//   3. CircuitViewSnapshot - Whole-circuit read model
//   4. CircuitRenderer - Abstract renderer interface
// =============================================================================
// Purpose: Read-only projection of a circuit for drawing. Everything a UI
//          needs per cell (label, probability, color) is copied out of the
//          engine into plain serializable values, so the UI never holds a
//          borrow of the circuit between edits.
// =============================================================================

use circuit_engine::{GateCell, GateKind, QuantumCircuit, QuantumLine, SingleQubitState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PHASE_TOLERANCE: f64 = 1e-12;

// =============================================================================
// 1. PhaseColor - Cell tint
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl PhaseColor {
    pub const PURE_GREEN: PhaseColor = PhaseColor {
        red: 0,
        green: 255,
        blue: 0,
        alpha: 1.0,
    };

    /// Tints by the relative phase of the |1⟩ amplitude. A state whose
    /// |0⟩ amplitude is ±1 on the real axis has no relative phase and is
    /// drawn pure green.
    pub fn from_qubit_state(state: &SingleQubitState) -> Self {
        let alpha_real = state.alpha.re;
        let distance = (1.0 - alpha_real * alpha_real).max(0.0).sqrt();
        if (alpha_real.abs() - 1.0).abs() <= PHASE_TOLERANCE || distance <= PHASE_TOLERANCE {
            return Self::PURE_GREEN;
        }

        let sin_phi = state.beta.im / distance;
        let cos_phi = state.beta.re / distance;
        Self {
            red: channel((-165.0 * sin_phi).ceil().max(0.0) + 90.0),
            green: channel((165.0 * cos_phi.abs()).ceil().max(0.0) + 90.0),
            blue: channel((255.0 * sin_phi).ceil().max(0.0)),
            alpha: 1.0,
        }
    }

    pub fn with_opacity(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn css_string(&self) -> String {
        format!("rgba({},{},{},{})", self.red, self.green, self.blue, self.alpha)
    }
}

fn channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

// =============================================================================
// 2. CellView / LineView - Per-wire drawing data
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub column: usize,
    pub gate_kind: GateKind,
    pub display_label: String,
    /// Probability of measuring |1⟩ after this cell.
    pub probability: f64,
    pub phase_color: PhaseColor,
}

impl CellView {
    pub fn from_cell(cell: &GateCell) -> Self {
        let result_state = cell.result_state();
        Self {
            column: cell.column(),
            gate_kind: cell.gate_kind(),
            display_label: cell.display_label().to_string(),
            probability: result_state.probability(),
            phase_color: PhaseColor::from_qubit_state(&result_state),
        }
    }

    pub fn probability_percent(&self) -> f64 {
        self.probability * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineView {
    pub line_index: usize,
    pub column_count: usize,
    /// Occupied cells only, in column order.
    pub cells: Vec<CellView>,
}

impl LineView {
    pub fn from_line(line: &QuantumLine) -> Self {
        Self {
            line_index: line.line_index(),
            column_count: line.column_count(),
            cells: line.occupied_cells().map(CellView::from_cell).collect(),
        }
    }

    pub fn cell_at(&self, column: usize) -> Option<&CellView> {
        self.cells
            .binary_search_by_key(&column, |cell| cell.column)
            .ok()
            .map(|position| &self.cells[position])
    }

    pub fn final_cell(&self) -> Option<&CellView> {
        self.cells.last()
    }
}

// =============================================================================
// 3. CircuitViewSnapshot - Whole-circuit read model
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitViewSnapshot {
    pub circuit_id: Uuid,
    pub width: usize,
    pub max_column_count: usize,
    pub lines: Vec<LineView>,
}

impl CircuitViewSnapshot {
    pub fn from_circuit(circuit: &QuantumCircuit) -> Self {
        let snapshot = Self {
            circuit_id: circuit.id(),
            width: circuit.width(),
            max_column_count: circuit.max_column_count(),
            lines: circuit.lines().iter().map(LineView::from_line).collect(),
        };
        tracing::trace!(
            circuit = %snapshot.circuit_id,
            width = snapshot.width,
            max_column_count = snapshot.max_column_count,
            "captured circuit snapshot"
        );
        snapshot
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    fn longest_label(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|line| line.cells.iter())
            .map(|cell| cell.display_label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

// =============================================================================
// 4. CircuitRenderer - Abstract renderer interface
// =============================================================================

pub trait CircuitRenderer: Send + Sync {
    fn render_line(&self, line: &LineView, max_column_count: usize) -> RenderOutput;
    fn render_snapshot(&self, snapshot: &CircuitViewSnapshot) -> RenderOutput;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOutput {
    pub format: RenderFormat,
    pub data: Vec<u8>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl RenderOutput {
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderFormat {
    Ascii,
}

const WIRE: char = '─';

/// One text row per line. Every column occupies the same number of
/// characters on every row, widened if a label would not fit.
#[derive(Debug, Clone)]
pub struct AsciiCircuitRenderer {
    pub cell_width: usize,
    pub show_probabilities: bool,
}

impl Default for AsciiCircuitRenderer {
    fn default() -> Self {
        Self {
            cell_width: 6,
            show_probabilities: true,
        }
    }
}

impl AsciiCircuitRenderer {
    fn render_row(&self, line: &LineView, max_column_count: usize, cell_width: usize) -> String {
        let mut row = format!("q{}: ", line.line_index);
        for column in 0..max_column_count {
            match line.cell_at(column) {
                Some(cell) => row.push_str(&format!(
                    "{:─^width$}",
                    cell.display_label,
                    width = cell_width
                )),
                None => row.extend(std::iter::repeat_n(WIRE, cell_width)),
            }
        }
        if self.show_probabilities {
            if let Some(cell) = line.final_cell() {
                row.push_str(&format!("  P(1)={:5.1}%", cell.probability_percent()));
            }
        }
        row
    }
}

impl CircuitRenderer for AsciiCircuitRenderer {
    fn render_line(&self, line: &LineView, max_column_count: usize) -> RenderOutput {
        let longest = line
            .cells
            .iter()
            .map(|cell| cell.display_label.chars().count())
            .max()
            .unwrap_or(0);
        let cell_width = self.cell_width.max(longest + 2);
        let row = self.render_row(line, max_column_count.max(line.column_count), cell_width);

        RenderOutput {
            format: RenderFormat::Ascii,
            width: Some(row.chars().count() as u32),
            height: Some(1),
            data: row.into_bytes(),
        }
    }

    fn render_snapshot(&self, snapshot: &CircuitViewSnapshot) -> RenderOutput {
        let cell_width = self.cell_width.max(snapshot.longest_label() + 2);
        let rows: Vec<String> = snapshot
            .lines
            .iter()
            .map(|line| self.render_row(line, snapshot.max_column_count, cell_width))
            .collect();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let output = rows.join("\n");

        RenderOutput {
            format: RenderFormat::Ascii,
            data: output.into_bytes(),
            width: Some(width as u32),
            height: Some(snapshot.lines.len() as u32),
        }
    }
}
