use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::circuit::{CircuitGenerator, QubitCount};
use crate::dialect::DialectVersion;
use crate::error::{GhzError, Result};

fn default_dialect() -> u32 {
    DialectVersion::default().number()
}

/// Benchmark configuration as it appears in a JSON or YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhzConfig {
    pub size: usize,
    #[serde(default)]
    pub measure: bool,
    #[serde(default = "default_dialect")]
    pub dialect: u32,
}

impl GhzConfig {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            measure: false,
            dialect: default_dialect(),
        }
    }

    /// Loads a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Err(GhzError::Configuration(format!(
                "cannot tell the format of {}, expected a .json, .yaml or .yml file",
                path.display()
            ))),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| GhzError::Configuration(e.to_string()))
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).map_err(|e| GhzError::Configuration(e.to_string()))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| GhzError::Configuration(e.to_string()))
    }

    pub fn validate(&self) -> Result<(QubitCount, DialectVersion)> {
        Ok((QubitCount::new(self.size)?, DialectVersion::try_from(self.dialect)?))
    }

    pub fn generator(&self) -> Result<(QubitCount, CircuitGenerator)> {
        let (size, dialect) = self.validate()?;
        Ok((size, CircuitGenerator::new(dialect, self.measure)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn defaults_fill_optional_fields() {
        let config = GhzConfig::from_value(json!({"size": 4})).unwrap();
        assert_eq!(config, GhzConfig::new(4));
        assert_eq!(config.dialect, 3);
        assert!(!config.measure);
    }

    #[test]
    fn reads_yaml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("ghz.yaml");
        let mut f = std::fs::File::create(&yaml_path).unwrap();
        writeln!(f, "size: 5\nmeasure: true\ndialect: 2").unwrap();
        let yaml = GhzConfig::from_path(&yaml_path).unwrap();
        assert_eq!(yaml.size, 5);
        assert!(yaml.measure);
        assert_eq!(yaml.validate().unwrap().1, DialectVersion::V2);

        let json_path = dir.path().join("ghz.json");
        std::fs::write(&json_path, r#"{"size": 2}"#).unwrap();
        assert_eq!(GhzConfig::from_path(&json_path).unwrap(), GhzConfig::new(2));

        let toml_path = dir.path().join("ghz.toml");
        std::fs::write(&toml_path, "size = 2").unwrap();
        assert!(matches!(
            GhzConfig::from_path(&toml_path),
            Err(GhzError::Configuration(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            GhzConfig::from_path(dir.path().join("absent.json")),
            Err(GhzError::Io(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = GhzConfig::new(3);
        config.dialect = 5;
        assert!(config.validate().is_err());
        assert!(GhzConfig::new(0).validate().is_err());
        assert!(GhzConfig::from_json_str(r#"{"measure": true}"#).is_err());
    }
}
