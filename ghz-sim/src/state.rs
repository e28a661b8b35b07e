use num_complex::Complex;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::Serialize;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::api::SimError;

/// Largest register the dense statevector will allocate (2^30 amplitudes).
pub const MAX_QUBITS: usize = 30;

// custom type for gate matrices
pub type GateMatrix = [[Complex<f64>; 2]; 2];

pub const HADAMARD: GateMatrix = [
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

pub const PAULI_X: GateMatrix = [
    [Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)],
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
];

#[derive(Serialize, Clone, Debug)]
pub struct StateVector {
    pub num_qubits: usize,
    pub amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// |0...0⟩ on `num_qubits` qubits; basis index bit `k` is qubit `k`.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits; // 2^num_qubits
        let mut amplitudes = vec![Complex::new(0.0, 0.0); size];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Self {
            num_qubits,
            amplitudes,
        }
    }

    pub fn apply_single_qubit_gate(&mut self, gate_matrix: &GateMatrix, target_qubit: usize) {
        let k = 1 << target_qubit;
        for i in 0..self.amplitudes.len() {
            if (i & k) == 0 {
                let j = i | k;
                let amp_i = self.amplitudes[i];
                let amp_j = self.amplitudes[j];

                self.amplitudes[i] = gate_matrix[0][0] * amp_i + gate_matrix[0][1] * amp_j;
                self.amplitudes[j] = gate_matrix[1][0] * amp_i + gate_matrix[1][1] * amp_j;
            }
        }
    }

    pub fn apply_cx(&mut self, control_qubit: usize, target_qubit: usize) {
        let control_mask = 1 << control_qubit;
        let target_mask = 1 << target_qubit;

        for i in 0..self.amplitudes.len() {
            if (i & control_mask) != 0 && (i & target_mask) == 0 {
                self.amplitudes.swap(i, i | target_mask);
            }
        }
    }

    /// Born-rule probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Draws `shots` basis-state indices and returns how often each came up.
    pub fn sample_counts(&self, shots: u32, rng: &mut impl Rng) -> Result<Vec<u64>, SimError> {
        let dist = WeightedIndex::new(self.probabilities())
            .map_err(|e| SimError::Internal(e.to_string()))?;
        let mut counts = vec![0u64; self.amplitudes.len()];
        for _ in 0..shots {
            counts[dist.sample(rng)] += 1;
        }
        Ok(counts)
    }
}
