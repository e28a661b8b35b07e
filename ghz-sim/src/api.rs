// src/api.rs
use ghz::{GhzError, SampleDistribution};

use crate::circuit::Circuit;

/// A lightweight error enum so callers don't rely on the executor internals.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("QASM parse error: {0}")]
    Qasm(String),
    #[error("Invalid qubit index: {0}")]
    Qubit(usize),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Ghz(#[from] GhzError),
}

/// Something that can execute a parsed circuit and report the outcome
/// distribution over its classical register.
pub trait Backend {
    /// Exact outcome probabilities, read off the final state.
    fn probabilities(&self, circuit: &Circuit) -> Result<SampleDistribution, SimError>;

    /// Relative frequencies from `shots` sampled measurements.
    fn sample(&self, circuit: &Circuit, shots: u32) -> Result<SampleDistribution, SimError>;
}
