// src/circuit.rs
use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::DialectVersion;
use crate::error::{GhzError, Result};

/// Size of the GHZ register. Always at least one qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct QubitCount(usize);

impl QubitCount {
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(GhzError::Configuration(
                "qubit count must be at least 1, got 0".to_string(),
            ));
        }
        Ok(Self(n))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for QubitCount {
    type Error = GhzError;

    fn try_from(n: usize) -> Result<Self> {
        Self::new(n)
    }
}

impl From<QubitCount> for usize {
    fn from(n: QubitCount) -> Self {
        n.0
    }
}

impl fmt::Display for QubitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rendered circuit source. Produced once by the generator and handed to an
/// executor as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CircuitText(String);

impl CircuitText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CircuitText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CircuitText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destination for rendered circuit statements, one statement per call.
pub trait CircuitSink {
    fn push_line(&mut self, line: &str) -> Result<()>;
}

impl CircuitSink for String {
    fn push_line(&mut self, line: &str) -> Result<()> {
        self.push_str(line);
        self.push('\n');
        Ok(())
    }
}

impl CircuitSink for Vec<String> {
    fn push_line(&mut self, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Streams statements into any `std::io::Write`, newline terminated.
pub struct WriteSink<W: Write>(pub W);

impl<W: Write> WriteSink<W> {
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> CircuitSink for WriteSink<W> {
    fn push_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.0, "{line}")?;
        Ok(())
    }
}

/// Renders the GHZ preparation circuit: header, Hadamard plus CNOT chain,
/// then optional per-qubit measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CircuitGenerator {
    pub dialect: DialectVersion,
    pub measure: bool,
}

impl CircuitGenerator {
    pub fn new(dialect: DialectVersion, measure: bool) -> Self {
        Self { dialect, measure }
    }

    pub fn generate(&self, n: QubitCount) -> Result<CircuitText> {
        let mut text = String::new();
        self.generate_into(n, &mut text)?;
        Ok(CircuitText(text))
    }

    pub fn generate_into<S: CircuitSink + ?Sized>(&self, n: QubitCount, sink: &mut S) -> Result<()> {
        let n = n.get();
        debug!(qubits = n, dialect = %self.dialect, measure = self.measure, "rendering GHZ circuit");

        for line in self.dialect.header(n).lines() {
            sink.push_line(line)?;
        }

        sink.push_line("h q[0];")?;
        for i in 0..n - 1 {
            sink.push_line(&format!("cx q[{}],q[{}];", i, i + 1))?;
        }

        if self.measure {
            for i in 0..n {
                sink.push_line(&format!("measure q[{i}] -> c[{i}];"))?;
            }
        }
        Ok(())
    }
}

/// Validates raw inputs and renders the circuit in one call.
pub fn generate(n: usize, dialect_version: u32, include_measurement: bool) -> Result<CircuitText> {
    let dialect = DialectVersion::try_from(dialect_version)?;
    let n = QubitCount::new(n)?;
    CircuitGenerator::new(dialect, include_measurement).generate(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_prefix(text: &CircuitText, prefix: &str) -> usize {
        text.as_str().lines().filter(|l| l.starts_with(prefix)).count()
    }

    #[test]
    fn three_qubit_qasm3_with_measurement() {
        let text = generate(3, 3, true).unwrap();
        let expected = "OPENQASM 3.0;\n\
                        include \"stdgates.inc\";\n\
                        qubit[3] q;\n\
                        bit[3] c;\n\
                        h q[0];\n\
                        cx q[0],q[1];\n\
                        cx q[1],q[2];\n\
                        measure q[0] -> c[0];\n\
                        measure q[1] -> c[1];\n\
                        measure q[2] -> c[2];\n";
        assert_eq!(text.as_str(), expected);
    }

    #[test]
    fn two_qubit_qasm2_without_measurement() {
        let text = generate(2, 2, false).unwrap();
        assert_eq!(
            text.as_str(),
            "OPENQASM 2.0;\nqreg q[2];\ncreg c[2];\nh q[0];\ncx q[0],q[1];\n"
        );
    }

    #[test]
    fn single_qubit_has_no_entangling_chain() {
        let text = generate(1, 3, true).unwrap();
        assert_eq!(count_prefix(&text, "h "), 1);
        assert_eq!(count_prefix(&text, "cx "), 0);
        assert_eq!(count_prefix(&text, "measure "), 1);
    }

    #[test]
    fn zero_qubits_is_rejected() {
        assert!(matches!(generate(0, 3, false), Err(GhzError::Configuration(_))));
    }

    #[test]
    fn unsupported_dialect_is_rejected() {
        let err = generate(4, 1, false).unwrap_err();
        assert!(matches!(err, GhzError::Configuration(_)));
        assert!(err.to_string().contains("unsupported dialect version 1"));
    }

    #[test]
    fn line_sink_matches_string_output() {
        let generator = CircuitGenerator::new(DialectVersion::V2, true);
        let n = QubitCount::new(4).unwrap();

        let mut lines: Vec<String> = Vec::new();
        generator.generate_into(n, &mut lines).unwrap();
        let text = generator.generate(n).unwrap();

        assert_eq!(lines.join("\n") + "\n", text.as_str());
    }

    #[test]
    fn write_sink_streams_same_bytes() {
        let generator = CircuitGenerator::new(DialectVersion::V3, false);
        let n = QubitCount::new(5).unwrap();

        let mut sink = WriteSink(Vec::new());
        generator.generate_into(n, &mut sink).unwrap();
        let bytes = sink.into_inner();

        assert_eq!(bytes, generator.generate(n).unwrap().as_str().as_bytes());
    }
}
