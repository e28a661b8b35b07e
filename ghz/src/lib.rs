pub mod circuit;
pub mod config;
pub mod dialect;
pub mod distribution;
pub mod error;
pub mod scorer;
pub mod stage;

// Re-export key components for easier access from the binary or other libraries.
pub use circuit::{CircuitGenerator, CircuitSink, CircuitText, QubitCount, WriteSink, generate};
pub use config::GhzConfig;
pub use dialect::DialectVersion;
pub use distribution::{BitKey, Bitstring, Distribution, SampleDistribution};
pub use error::{GhzError, Result};
pub use scorer::{DistributionScorer, Metrics, ScoreReport, expected_probability, hellinger, score};
pub use stage::{GhzApplication, QasmGhzCircuit, SizePayload, StageData};
