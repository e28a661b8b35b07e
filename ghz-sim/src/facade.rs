// src/facade.rs
use ghz::SampleDistribution;

use crate::api::{Backend, SimError};
use crate::circuit::Circuit;
use crate::statevector_backend::StatevectorBackend;

pub fn run_qasm_probabilities(qasm: &str) -> Result<SampleDistribution, SimError> {
    let circ = Circuit::from_qasm(qasm)?;
    StatevectorBackend::new().probabilities(&circ)
}

pub fn run_qasm_sample(
    qasm: &str,
    shots: u32,
    seed: Option<u64>,
) -> Result<SampleDistribution, SimError> {
    let circ = Circuit::from_qasm(qasm)?;
    let backend = seed.map_or_else(StatevectorBackend::new, StatevectorBackend::with_seed);
    backend.sample(&circ, shots)
}
