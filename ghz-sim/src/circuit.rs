use crate::parser::Gate;

/// A parsed circuit: register sizes, gates in program order and the
/// `(qubit, classical bit)` measurement map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    pub num_qubits: usize,
    pub num_clbits: usize,
    pub gates: Vec<Gate>,
    pub measurements: Vec<(usize, usize)>,
}

impl Circuit {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits: 0,
            gates: Vec::new(),
            measurements: Vec::new(),
        }
    }

    pub fn from_qasm(qasm: &str) -> Result<Self, crate::api::SimError> {
        crate::parser::parse_qasm(qasm)
    }

    pub fn add_gate(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Width of the reported bitstrings. Circuits without measurements
    /// report every qubit.
    pub fn output_width(&self) -> usize {
        if self.measurements.is_empty() {
            self.num_qubits
        } else {
            self.num_clbits
        }
    }

    /// Renders basis state `index` as the classical outcome string, lowest
    /// bit rightmost.
    pub fn outcome(&self, index: usize) -> String {
        let width = self.output_width();
        if self.measurements.is_empty() {
            return format!("{:0width$b}", index, width = width);
        }
        let mut bits = vec!['0'; width];
        for &(qubit, clbit) in &self.measurements {
            if (index >> qubit) & 1 == 1 {
                bits[width - 1 - clbit] = '1';
            }
        }
        bits.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_without_measurements_is_plain_binary() {
        let circuit = Circuit::new(3);
        assert_eq!(circuit.outcome(0b011), "011");
    }

    #[test]
    fn outcome_follows_measurement_map() {
        let mut circuit = Circuit::new(2);
        circuit.num_clbits = 2;
        circuit.measurements = vec![(0, 1), (1, 0)];
        // qubit 0 set lands in classical bit 1
        assert_eq!(circuit.outcome(0b01), "10");
        assert_eq!(circuit.outcome(0b11), "11");
    }
}
