// src/statevector_backend.rs
use std::collections::BTreeMap;

use ghz::SampleDistribution;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::api::{Backend, SimError};
use crate::circuit::Circuit;
use crate::parser::{Gate, validate};
use crate::state::{HADAMARD, PAULI_X, StateVector};

// Basis states below this probability are numerical noise.
const EPSILON: f64 = 1e-12;

/// Dense statevector executor. A seed makes shot sampling reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatevectorBackend {
    seed: Option<u64>,
}

impl StatevectorBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn evolve(&self, circuit: &Circuit) -> Result<StateVector, SimError> {
        // Circuits can be built by hand, so bounds are checked here too.
        validate(circuit)?;
        let mut state = StateVector::new(circuit.num_qubits);
        for gate in &circuit.gates {
            match *gate {
                Gate::H(q) => state.apply_single_qubit_gate(&HADAMARD, q),
                Gate::X(q) => state.apply_single_qubit_gate(&PAULI_X, q),
                Gate::CX(c, t) => state.apply_cx(c, t),
            }
        }
        Ok(state)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Backend for StatevectorBackend {
    fn probabilities(&self, circuit: &Circuit) -> Result<SampleDistribution, SimError> {
        let state = self.evolve(circuit)?;

        // Several basis states collapse onto one outcome when only part of
        // the register is measured.
        let mut outcomes: BTreeMap<String, f64> = BTreeMap::new();
        for (index, p) in state.probabilities().into_iter().enumerate() {
            if p > EPSILON {
                *outcomes.entry(circuit.outcome(index)).or_insert(0.0) += p;
            }
        }
        debug!(qubits = circuit.num_qubits, outcomes = outcomes.len(), "computed exact distribution");
        Ok(SampleDistribution::from_pairs(outcomes)?)
    }

    fn sample(&self, circuit: &Circuit, shots: u32) -> Result<SampleDistribution, SimError> {
        if shots == 0 {
            return Err(SimError::Internal("cannot sample zero shots".to_string()));
        }
        let state = self.evolve(circuit)?;
        let counts = state.sample_counts(shots, &mut self.rng())?;

        let mut outcomes: BTreeMap<String, u64> = BTreeMap::new();
        for (index, count) in counts.into_iter().enumerate() {
            if count > 0 {
                *outcomes.entry(circuit.outcome(index)).or_insert(0) += count;
            }
        }
        debug!(qubits = circuit.num_qubits, shots, outcomes = outcomes.len(), "sampled distribution");
        Ok(SampleDistribution::from_counts(outcomes)?)
    }
}
