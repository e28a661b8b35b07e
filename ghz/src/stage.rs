// src/stage.rs
//
// Benchmark pipeline adapters. Data moves down through `preprocess` and back
// up through `postprocess`; each stage checks that it received the kind of
// data it understands.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::circuit::{CircuitGenerator, CircuitText, QubitCount};
use crate::dialect::DialectVersion;
use crate::distribution::SampleDistribution;
use crate::error::{GhzError, Result};
use crate::scorer::{DistributionScorer, ScoreReport};

/// Configuration payload handed from the application stage to the circuit stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePayload {
    pub size: QubitCount,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum StageData {
    Size(SizePayload),
    Circuit(CircuitText),
    Distribution(SampleDistribution),
    Other(Value),
}

impl StageData {
    pub fn kind(&self) -> &'static str {
        match self {
            StageData::Size(_) => "size payload",
            StageData::Circuit(_) => "circuit",
            StageData::Distribution(_) => "sample distribution",
            StageData::Other(_) => "other",
        }
    }

    fn mismatch(&self, expected: &'static str) -> GhzError {
        let received = match self {
            StageData::Other(value) => {
                format!("other ({})", crate::distribution::json_kind(value))
            }
            data => data.kind().to_string(),
        };
        GhzError::TypeMismatch { expected, received }
    }
}

/// The application stage: announces the register size and scores what comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhzApplication {
    pub size: QubitCount,
}

impl GhzApplication {
    pub fn new(size: QubitCount) -> Self {
        Self { size }
    }

    pub fn preprocess(&self) -> StageData {
        StageData::Size(SizePayload { size: self.size })
    }

    pub fn postprocess(&self, data: StageData) -> Result<ScoreReport> {
        match data {
            StageData::Distribution(observed) => DistributionScorer::new(self.size).score(&observed),
            other => Err(other.mismatch("sample distribution")),
        }
    }
}

/// The circuit stage: turns a size payload into OpenQASM text and passes
/// measured distributions straight back up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QasmGhzCircuit {
    pub measure: bool,
    pub dialect: DialectVersion,
}

impl QasmGhzCircuit {
    pub fn new(dialect: DialectVersion, measure: bool) -> Self {
        Self { measure, dialect }
    }

    pub fn preprocess(&self, data: StageData) -> Result<StageData> {
        let size = match &data {
            StageData::Size(payload) => payload.size,
            StageData::Other(Value::Object(map)) => {
                let size = map.get("size").and_then(Value::as_u64).ok_or_else(|| {
                    GhzError::Configuration(format!(
                        "payload has no positive integer \"size\": {}",
                        Value::Object(map.clone())
                    ))
                })?;
                let size = usize::try_from(size)
                    .map_err(|_| GhzError::Configuration(format!("size {size} is too large")))?;
                QubitCount::new(size)?
            }
            _ => return Err(data.mismatch("size payload")),
        };

        CircuitGenerator::new(self.dialect, self.measure)
            .generate(size)
            .map(StageData::Circuit)
    }

    pub fn postprocess(&self, data: StageData) -> Result<StageData> {
        match data {
            StageData::Distribution(_) => Ok(data),
            other => Err(other.mismatch("sample distribution")),
        }
    }
}
