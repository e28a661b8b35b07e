use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::circuit::QubitCount;
use crate::distribution::{Bitstring, Distribution, SampleDistribution};
use crate::error::{GhzError, Result};

/// Flat metrics map handed to a reporting backend.
pub type Metrics = Map<String, Value>;

const MASS_TOLERANCE: f64 = 1e-6;

/// Ideal GHZ probability of `state`: one half for all-zeros and all-ones,
/// zero for everything else.
pub fn expected_probability(n: QubitCount, state: &Bitstring) -> f64 {
    let n = n.get();
    if state.len() != n {
        return 0.0;
    }
    let s = state.as_str();
    if s.bytes().all(|b| b == b'0') || s.bytes().all(|b| b == b'1') {
        0.5
    } else {
        0.0
    }
}

/// Hellinger distance between two index-aligned probability vectors.
///
/// H(P, Q) = sqrt(Σ (sqrt(p_i) - sqrt(q_i))²) / sqrt(2), bounded in [0, 1].
pub fn hellinger(p1: &[f64], p2: &[f64]) -> Result<f64> {
    if p1.len() != p2.len() {
        return Err(GhzError::MalformedInput(format!(
            "probability vectors differ in length: {} vs {}",
            p1.len(),
            p2.len()
        )));
    }
    let sum: f64 = p1
        .iter()
        .zip(p2)
        .map(|(a, b)| (a.sqrt() - b.sqrt()).powi(2))
        .sum();
    Ok(sum.sqrt() / std::f64::consts::SQRT_2)
}

/// Result of one scoring cycle: the echoed observation and its distance
/// from the ideal GHZ distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub probabilities: SampleDistribution,
    #[serde(rename = "HD")]
    pub distance: f64,
}

impl ScoreReport {
    /// Adds `probabilities` and `HD` on top of whatever `base` already holds.
    pub fn metrics(&self, mut base: Metrics) -> Metrics {
        let probabilities = self
            .probabilities
            .iter()
            .map(|(bits, p)| Value::Array(vec![Value::String(bits.to_string()), Value::from(*p)]))
            .collect();
        base.insert("probabilities".to_string(), Value::Array(probabilities));
        base.insert("HD".to_string(), Value::from(self.distance));
        base
    }
}

/// Scores observed distributions against the ideal `size`-qubit GHZ state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionScorer {
    size: QubitCount,
}

impl DistributionScorer {
    pub fn new(size: QubitCount) -> Self {
        Self { size }
    }

    pub fn size(&self) -> QubitCount {
        self.size
    }

    pub fn score<D: Distribution + ?Sized>(&self, observed: &D) -> Result<ScoreReport> {
        let n = self.size.get();
        let entries = observed.as_list()?;
        if entries.is_empty() {
            return Err(GhzError::MalformedInput(
                "observed distribution is empty".to_string(),
            ));
        }

        let mut p1 = Vec::with_capacity(entries.len());
        let mut p2 = Vec::with_capacity(entries.len());
        for (state, prob) in &entries {
            if state.len() != n {
                return Err(GhzError::MalformedInput(format!(
                    "bitstring {:?} has length {}, expected {n}",
                    state.as_str(),
                    state.len()
                )));
            }
            p1.push(*prob);
            p2.push(expected_probability(self.size, state));
        }

        // Ideal states the backend never reported still carry expected mass.
        for ideal in [Bitstring::zeros(n), Bitstring::ones(n)] {
            if !entries.iter().any(|(state, _)| *state == ideal) {
                p1.push(0.0);
                p2.push(expected_probability(self.size, &ideal));
            }
        }

        let probabilities = SampleDistribution::new(entries);
        let mass = probabilities.total_mass();
        if (mass - 1.0).abs() > MASS_TOLERANCE {
            warn!(qubits = n, mass, "observed distribution does not sum to 1");
        }

        let distance = hellinger(&p1, &p2)?;
        info!(qubits = n, states = p1.len(), distance, "scored GHZ distribution");

        Ok(ScoreReport {
            probabilities,
            distance,
        })
    }
}

/// Validates `n` and scores `observed` in one call.
pub fn score<D: Distribution + ?Sized>(n: usize, observed: &D) -> Result<ScoreReport> {
    DistributionScorer::new(QubitCount::new(n)?).score(observed)
}
