// =============================================================================
// Quantum Circuit Workbench - Circuit Editing Demo
// =============================================================================
// Table of Contents:
//   1. Session and circuit setup
//   2. Placing, moving and removing gates
//   3. Snapshot, ASCII render and export listing
// =============================================================================
// Purpose: Walks one editing session end to end with debug logging enabled,
//          printing the circuit after every edit the way a UI would redraw it.
// =============================================================================

use circuit_engine::prelude::*;
use circuit_visualization::{AsciiCircuitRenderer, CircuitRenderer, CircuitViewSnapshot};

const APPEND: isize = isize::MAX / 4;

fn redraw(title: &str, circuit: &QuantumCircuit) {
    let snapshot = CircuitViewSnapshot::from_circuit(circuit);
    let output = AsciiCircuitRenderer::default().render_snapshot(&snapshot);
    println!("── {title} (width {}, columns {})", snapshot.width, snapshot.max_column_count);
    println!("{}", output.as_text());
    println!();
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    // =========================================================================
    // 1. Session and circuit setup
    // =========================================================================
    let configuration = CircuitConfiguration::from_toml_str("initial_width = 3\n")?;
    let mut session = CircuitEditorSession::new(configuration)?;
    let circuit = session.active_circuit_mut();
    redraw("empty circuit", circuit);

    // =========================================================================
    // 2. Placing, moving and removing gates
    // =========================================================================
    circuit.set_initial_qubit(0, InitialStateSelection::Plus.index())?;
    circuit.insert_gate(0, APPEND, GateKind::Hadamard, GateKind::Hadamard.symbol())?;
    circuit.insert_gate(1, APPEND, GateKind::PauliX, GateKind::PauliX.symbol())?;
    circuit.insert_gate(1, APPEND, GateKind::PauliY, GateKind::PauliY.symbol())?;
    redraw("after placing H, X, Y", circuit);

    circuit.insert_gate(1, 1, GateKind::PauliZ, GateKind::PauliZ.symbol())?;
    redraw("after inserting Z into the first gap", circuit);

    circuit.move_gate(1, 3, 2, APPEND)?;
    redraw("after moving Y to line 2", circuit);

    circuit.remove_gate(2, 1)?;
    redraw("after removing Y", circuit);

    if let Err(error) = circuit.insert_gate(0, 1, GateKind::ControlledNot, "⊕") {
        println!("rejected: {error}");
        println!();
    }

    // =========================================================================
    // 3. Snapshot, ASCII render and export listing
    // =========================================================================
    let snapshot = CircuitViewSnapshot::from_circuit(circuit);
    println!("{}", snapshot.to_json_pretty()?);
    println!();

    for operation in circuit.exported_operations()? {
        println!(
            "line {} column {}: {}",
            operation.line_index, operation.column, operation.operation_name
        );
    }
    Ok(())
}
