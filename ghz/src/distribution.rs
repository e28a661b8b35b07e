use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GhzError, Result};

/// A measured register outcome, one `'0'`/`'1'` character per qubit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bitstring(String);

impl Bitstring {
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(bad) = s.chars().find(|c| *c != '0' && *c != '1') {
            return Err(GhzError::MalformedInput(format!(
                "bitstring {s:?} contains {bad:?}, only '0' and '1' are allowed"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Normalizes a list of 0/1 values, e.g. `[0, 1, 1]` -> `"011"`.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        bits.iter()
            .map(|b| match b {
                0 => Ok('0'),
                1 => Ok('1'),
                other => Err(GhzError::MalformedInput(format!(
                    "bit list {bits:?} contains {other}, only 0 and 1 are allowed"
                ))),
            })
            .collect::<Result<String>>()
            .map(Self)
    }

    /// All-zero string of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self("0".repeat(n))
    }

    /// All-one string of length `n`.
    pub fn ones(n: usize) -> Self {
        Self("1".repeat(n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for Bitstring {
    type Error = GhzError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Bitstring> for String {
    fn from(b: Bitstring) -> Self {
        b.0
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything usable as a distribution key: textual bitstrings or 0/1 lists.
pub trait BitKey {
    fn to_bitstring(&self) -> Result<Bitstring>;
}

impl BitKey for Bitstring {
    fn to_bitstring(&self) -> Result<Bitstring> {
        Ok(self.clone())
    }
}

impl BitKey for str {
    fn to_bitstring(&self) -> Result<Bitstring> {
        Bitstring::parse(self)
    }
}

impl BitKey for String {
    fn to_bitstring(&self) -> Result<Bitstring> {
        Bitstring::parse(self)
    }
}

impl BitKey for [u8] {
    fn to_bitstring(&self) -> Result<Bitstring> {
        Bitstring::from_bits(self)
    }
}

impl BitKey for Vec<u8> {
    fn to_bitstring(&self) -> Result<Bitstring> {
        Bitstring::from_bits(self)
    }
}

impl<T: BitKey + ?Sized> BitKey for &T {
    fn to_bitstring(&self) -> Result<Bitstring> {
        (**self).to_bitstring()
    }
}

/// The "distribution-like" capability: yields ordered `(bitstring, probability)`
/// pairs with keys already normalized.
pub trait Distribution {
    fn as_list(&self) -> Result<Vec<(Bitstring, f64)>>;
}

fn normalize_pairs<'a, K, I>(pairs: I) -> Result<Vec<(Bitstring, f64)>>
where
    K: BitKey + 'a,
    I: IntoIterator<Item = (&'a K, &'a f64)>,
{
    pairs
        .into_iter()
        .map(|(key, prob)| Ok((key.to_bitstring()?, *prob)))
        .collect()
}

impl<K: BitKey> Distribution for [(K, f64)] {
    fn as_list(&self) -> Result<Vec<(Bitstring, f64)>> {
        normalize_pairs(self.iter().map(|(k, p)| (k, p)))
    }
}

impl<K: BitKey> Distribution for Vec<(K, f64)> {
    fn as_list(&self) -> Result<Vec<(Bitstring, f64)>> {
        self.as_slice().as_list()
    }
}

impl<K: BitKey> Distribution for BTreeMap<K, f64> {
    fn as_list(&self) -> Result<Vec<(Bitstring, f64)>> {
        normalize_pairs(self.iter())
    }
}

// Hash maps have no stable order, so report them sorted by bitstring.
impl<K: BitKey, S: BuildHasher> Distribution for HashMap<K, f64, S> {
    fn as_list(&self) -> Result<Vec<(Bitstring, f64)>> {
        let mut pairs = normalize_pairs(self.iter())?;
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(pairs)
    }
}

/// Ordered list of observed `(bitstring, probability)` pairs, as handed over
/// by a measurement or simulation backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleDistribution {
    entries: Vec<(Bitstring, f64)>,
}

impl SampleDistribution {
    pub fn new(entries: Vec<(Bitstring, f64)>) -> Self {
        Self { entries }
    }

    /// Builds a distribution from any key type, keeping the given order.
    pub fn from_pairs<K: BitKey>(pairs: impl IntoIterator<Item = (K, f64)>) -> Result<Self> {
        let entries = pairs
            .into_iter()
            .map(|(key, prob)| Ok((key.to_bitstring()?, prob)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Converts shot counts to relative frequencies, keeping the given order.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts<K: BitKey>(counts: impl IntoIterator<Item = (K, u64)>) -> Result<Self> {
        let counts = counts
            .into_iter()
            .map(|(key, count)| Ok((key.to_bitstring()?, count)))
            .collect::<Result<Vec<_>>>()?;

        let total = counts
            .iter()
            .try_fold(0u64, |acc, (_, c)| acc.checked_add(*c))
            .ok_or_else(|| {
                GhzError::MalformedInput(format!(
                    "shot counts overflow a 64-bit total across {} outcomes",
                    counts.len()
                ))
            })?;
        if total == 0 {
            return Err(GhzError::MalformedInput(
                "counts contain no shots".to_string(),
            ));
        }

        let entries = counts
            .into_iter()
            .map(|(key, count)| (key, count as f64 / total as f64))
            .collect();
        Ok(Self { entries })
    }

    /// Reads one of the accepted JSON shapes:
    /// `[["00", 0.5], ...]`, `[[[0, 0], 0.5], ...]`, `{"00": 0.5, ...}` or
    /// `{"counts": {"00": 512, ...}}`.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let entries = items
                    .iter()
                    .map(json_pair)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self { entries })
            }
            Value::Object(map) => {
                if let Some(counts) = map.get("counts") {
                    let Value::Object(counts) = counts else {
                        return Err(type_mismatch("counts object", counts));
                    };
                    let counts = counts
                        .iter()
                        .map(|(key, count)| {
                            let count = count.as_u64().ok_or_else(|| {
                                GhzError::MalformedInput(format!(
                                    "count for {key:?} is not a non-negative integer: {count}"
                                ))
                            })?;
                            Ok((key.as_str(), count))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    return Self::from_counts(counts);
                }

                let entries = map
                    .iter()
                    .map(|(key, prob)| Ok((Bitstring::parse(key)?, json_probability(prob)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self { entries })
            }
            other => Err(type_mismatch("probability distribution", other)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Bitstring, f64)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all probabilities. Measured data need not add up to exactly 1.
    pub fn total_mass(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    pub fn into_entries(self) -> Vec<(Bitstring, f64)> {
        self.entries
    }
}

impl Distribution for SampleDistribution {
    fn as_list(&self) -> Result<Vec<(Bitstring, f64)>> {
        Ok(self.entries.clone())
    }
}

/// Short name of a JSON value's type, used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(expected: &'static str, value: &Value) -> GhzError {
    GhzError::TypeMismatch {
        expected,
        received: json_kind(value).to_string(),
    }
}

fn json_probability(value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        GhzError::MalformedInput(format!("probability is not a number: {value}"))
    })
}

fn json_pair(item: &Value) -> Result<(Bitstring, f64)> {
    let Some([key, prob]) = item.as_array().map(Vec::as_slice) else {
        return Err(GhzError::MalformedInput(format!(
            "expected a [bitstring, probability] pair, got {item}"
        )));
    };

    let bitstring = match key {
        Value::String(s) => Bitstring::parse(s)?,
        Value::Array(bits) => {
            let bits = bits
                .iter()
                .map(|b| {
                    b.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| {
                            GhzError::MalformedInput(format!("bit value is not 0 or 1: {b}"))
                        })
                })
                .collect::<Result<Vec<u8>>>()?;
            Bitstring::from_bits(&bits)?
        }
        other => {
            return Err(GhzError::MalformedInput(format!(
                "bitstring must be a string or a list of bits, got {}",
                json_kind(other)
            )));
        }
    };
    Ok((bitstring, json_probability(prob)?))
}
