use tracing::debug;

use crate::api::SimError;
use crate::circuit::Circuit;
use crate::state::MAX_QUBITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    H(usize),
    X(usize),
    CX(usize, usize),
}

impl Gate {
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::H(q) | Gate::X(q) => vec![q],
            Gate::CX(c, t) => vec![c, t],
        }
    }
}

/// Pulls every `[k]` index out of a statement, in order.
fn indices(line: &str) -> Result<Vec<usize>, SimError> {
    let mut out = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find('[') {
        let end = rest[start..]
            .find(']')
            .map(|e| start + e)
            .ok_or_else(|| SimError::Qasm(format!("unclosed '[' in {line:?}")))?;
        let index = rest[start + 1..end]
            .trim()
            .parse::<usize>()
            .map_err(|_| SimError::Qasm(format!("bad index in {line:?}")))?;
        out.push(index);
        rest = &rest[end + 1..];
    }
    Ok(out)
}

fn single_index(line: &str) -> Result<usize, SimError> {
    match indices(line)?.as_slice() {
        [i] => Ok(*i),
        _ => Err(SimError::Qasm(format!("expected exactly one index in {line:?}"))),
    }
}

/// A small OpenQASM reader covering the 2.0 and 3.0 statements a GHZ
/// circuit uses.
pub fn parse_qasm(qasm_str: &str) -> Result<Circuit, SimError> {
    let mut circuit = Circuit::new(0);

    for line in qasm_str.lines() {
        let trimmed_line = line.trim();
        if trimmed_line.is_empty()
            || trimmed_line.starts_with("//")
            || trimmed_line.starts_with("OPENQASM")
            || trimmed_line.starts_with("include")
        {
            continue;
        }
        let statement = trimmed_line.trim_end_matches(';').trim();

        // qreg q[n]; / qubit[n] q;
        if statement.starts_with("qreg") || statement.starts_with("qubit") {
            circuit.num_qubits = single_index(statement)?;
        }
        // creg c[n]; / bit[n] c;
        else if statement.starts_with("creg") || statement.starts_with("bit") {
            circuit.num_clbits = single_index(statement)?;
        } else if statement.starts_with("h ") {
            circuit.add_gate(Gate::H(single_index(statement)?));
        } else if statement.starts_with("x ") {
            circuit.add_gate(Gate::X(single_index(statement)?));
        } else if statement.starts_with("cx ") {
            match indices(statement)?.as_slice() {
                [c, t] => circuit.add_gate(Gate::CX(*c, *t)),
                _ => return Err(SimError::Qasm(format!("cx needs two operands: {trimmed_line:?}"))),
            }
        }
        // measure q[i] -> c[j];
        else if statement.starts_with("measure") {
            match indices(statement)?.as_slice() {
                [q, c] => circuit.measurements.push((*q, *c)),
                _ => return Err(SimError::Qasm(format!("measure needs q[i] -> c[j]: {trimmed_line:?}"))),
            }
        }
        // c[j] = measure q[i];
        else if let Some((lhs, rhs)) = statement.split_once('=') {
            if !rhs.trim().starts_with("measure") {
                return Err(SimError::Qasm(format!("unsupported statement: {trimmed_line:?}")));
            }
            circuit.measurements.push((single_index(rhs)?, single_index(lhs)?));
        } else {
            return Err(SimError::Qasm(format!("unsupported statement: {trimmed_line:?}")));
        }
    }

    validate(&circuit)?;
    debug!(
        qubits = circuit.num_qubits,
        gates = circuit.gates.len(),
        measurements = circuit.measurements.len(),
        "parsed circuit"
    );
    Ok(circuit)
}

/// Checks register bounds and operand indices before anything is simulated.
pub(crate) fn validate(circuit: &Circuit) -> Result<(), SimError> {
    if circuit.num_qubits == 0 {
        return Err(SimError::Qasm("no qubit register declared".to_string()));
    }
    if circuit.num_qubits > MAX_QUBITS {
        return Err(SimError::Qasm(format!(
            "register of {} qubits exceeds the statevector limit of {MAX_QUBITS}",
            circuit.num_qubits
        )));
    }
    for gate in &circuit.gates {
        if let Some(q) = gate.qubits().into_iter().find(|q| *q >= circuit.num_qubits) {
            return Err(SimError::Qubit(q));
        }
    }
    for &(q, c) in &circuit.measurements {
        if q >= circuit.num_qubits {
            return Err(SimError::Qubit(q));
        }
        if c >= circuit.num_clbits {
            return Err(SimError::Qasm(format!(
                "classical bit c[{c}] outside register of {}",
                circuit.num_clbits
            )));
        }
    }
    Ok(())
}
