use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GhzError, Result};

/// Revision of the OpenQASM text dialect a circuit is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DialectVersion {
    V2,
    #[default]
    V3,
}

/// Renders the register declarations for `n` qubits and `n` classical bits.
pub type HeaderTemplate = fn(usize) -> String;

struct DialectRow {
    number: u32,
    header: HeaderTemplate,
}

// Version -> header template. Adding a dialect means adding a variant, a row
// and an arm in `row`; the match keeps every variant covered.
static QASM2: DialectRow = DialectRow {
    number: 2,
    header: qasm2_header,
};
static QASM3: DialectRow = DialectRow {
    number: 3,
    header: qasm3_header,
};

const ALL: [DialectVersion; 2] = [DialectVersion::V2, DialectVersion::V3];

// `h`/`cx` are left without `include "qelib1.inc";`: only the later dialect
// imports its standard gate library.
fn qasm2_header(n: usize) -> String {
    format!("OPENQASM 2.0;\nqreg q[{n}];\ncreg c[{n}];\n")
}

fn qasm3_header(n: usize) -> String {
    format!("OPENQASM 3.0;\ninclude \"stdgates.inc\";\nqubit[{n}] q;\nbit[{n}] c;\n")
}

impl DialectVersion {
    fn row(self) -> &'static DialectRow {
        match self {
            DialectVersion::V2 => &QASM2,
            DialectVersion::V3 => &QASM3,
        }
    }

    /// All supported versions, oldest first.
    pub fn supported() -> Vec<u32> {
        ALL.iter().map(|version| version.number()).collect()
    }

    pub fn number(self) -> u32 {
        self.row().number
    }

    pub fn header_template(self) -> HeaderTemplate {
        self.row().header
    }

    pub fn header(self, n: usize) -> String {
        (self.header_template())(n)
    }
}

impl TryFrom<u32> for DialectVersion {
    type Error = GhzError;

    fn try_from(value: u32) -> Result<Self> {
        ALL.into_iter()
            .find(|version| version.number() == value)
            .ok_or_else(|| {
                GhzError::Configuration(format!(
                    "unsupported dialect version {value}, supported versions are {:?}",
                    Self::supported()
                ))
            })
    }
}

impl From<DialectVersion> for u32 {
    fn from(version: DialectVersion) -> Self {
        version.number()
    }
}

impl FromStr for DialectVersion {
    type Err = GhzError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let number = trimmed.parse::<u32>().map_err(|_| {
            GhzError::Configuration(format!(
                "unsupported dialect version {trimmed:?}, supported versions are {:?}",
                Self::supported()
            ))
        })?;
        Self::try_from(number)
    }
}

impl fmt::Display for DialectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpenQASM {}", self.number())
    }
}
