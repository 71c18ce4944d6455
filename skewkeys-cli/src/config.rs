//! Configuration file support for skewkeys
//!
//! This module provides TOML-based profiles for reproducible key generation.
//! Every section is optional; a missing profile means the built-in defaults
//! (1024 distinct keys, 4096 operations, skewness 2.0). Any value can be
//! overridden with `--set path=value`.

use anyhow::{bail, Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use skewkeys_core::{SkewFamily, SkewPolicy};
use std::path::{Path, PathBuf};

/// Top-level profile configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ProfileConfig {
    #[serde(default)]
    pub experiment: ExperimentConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    /// Distribution family and placement of the skewed sequence
    #[serde(default)]
    pub skew: SkewPolicy,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Experiment metadata
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ExperimentConfig {
    /// Experiment name
    #[serde(default = "default_name")]
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Master seed for reproducibility (None = use entropy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_name() -> String {
    "skewed-keys".to_string()
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self { name: default_name(), description: None, seed: None }
    }
}

/// Key sequence parameters shared by both generated files
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct KeysConfig {
    /// Domain size: every key is in [0, number_of_distinct_keys)
    #[serde(default = "default_distinct_keys")]
    pub number_of_distinct_keys: u64,
    /// Number of keys (lines) per file
    #[serde(default = "default_nops")]
    pub nops: u64,
    /// Shape parameter of the skewed sequence
    #[serde(default = "default_skewness")]
    pub skewness: f64,
}

fn default_distinct_keys() -> u64 {
    1 << 10
}

fn default_nops() -> u64 {
    1 << 12
}

fn default_skewness() -> f64 {
    2.0
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            number_of_distinct_keys: default_distinct_keys(),
            nops: default_nops(),
            skewness: default_skewness(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct OutputConfig {
    /// File receiving the uniform key sequence
    #[serde(default = "default_uniform_file")]
    pub uniform_file: PathBuf,
    /// File receiving the skewed key sequence
    #[serde(default = "default_skewed_file")]
    pub skewed_file: PathBuf,
    /// Optional JSON report path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

fn default_uniform_file() -> PathBuf {
    PathBuf::from("random_keys.txt")
}

fn default_skewed_file() -> PathBuf {
    PathBuf::from("skewed_keys.txt")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            uniform_file: default_uniform_file(),
            skewed_file: default_skewed_file(),
            report: None,
        }
    }
}

impl ProfileConfig {
    /// Load profile from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load a profile (or the defaults when `path` is None), apply `--set`
    /// style overrides and validate the result
    pub fn load(path: Option<&Path>, overrides: &[String]) -> Result<Self> {
        let mut value = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str::<toml::Value>(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            None => toml::Value::Table(toml::map::Map::new()),
        };

        for override_str in overrides {
            let (key, val) = parse_key_value(override_str)
                .with_context(|| format!("Invalid override format: {}", override_str))?;

            set_toml_path(&mut value, key, val)
                .with_context(|| format!("Failed to apply override: {}", override_str))?;
        }

        let config: ProfileConfig =
            value.try_into().context("Failed to deserialize modified configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.experiment.name.is_empty() {
            bail!("Experiment name cannot be empty");
        }

        if self.keys.number_of_distinct_keys == 0 {
            bail!("keys.number_of_distinct_keys must be >= 1");
        }
        if usize::try_from(self.keys.nops).is_err() {
            bail!("keys.nops {} does not fit in memory on this platform", self.keys.nops);
        }
        if !self.keys.skewness.is_finite() {
            bail!("keys.skewness must be a finite number");
        }

        self.skew.validate().context("Invalid [skew] section")?;
        if self.skew.family == SkewFamily::Zipfian && self.keys.skewness < 0.0 {
            bail!("keys.skewness is the zipfian exponent and must be >= 0.0");
        }

        if self.output.uniform_file.as_os_str().is_empty()
            || self.output.skewed_file.as_os_str().is_empty()
        {
            bail!("Output file paths cannot be empty");
        }
        if self.output.uniform_file == self.output.skewed_file {
            bail!(
                "uniform_file and skewed_file must differ (both are {})",
                self.output.uniform_file.display()
            );
        }

        Ok(())
    }
}

/// Split "key=value" at the first '='
fn parse_key_value(override_str: &str) -> Result<(&str, &str)> {
    match override_str.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("Invalid override format '{}'. Expected 'key=value'", override_str),
    }
}

/// Set a value in TOML using a dotted table path ("keys.nops"), creating
/// missing tables on the way
fn set_toml_path(root: &mut toml::Value, path: &str, value_str: &str) -> Result<()> {
    let segments: Vec<&str> = path.split('.').filter(|part| !part.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("Empty path");
    };

    let mut current = root;
    for key in parents {
        let toml::Value::Table(table) = current else {
            bail!("Cannot navigate through non-table value at key '{}'", key);
        };
        current =
            table.entry(key.to_string()).or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    let toml::Value::Table(table) = current else {
        bail!("Cannot set key '{}' on non-table value", last);
    };
    table.insert(last.to_string(), parse_value(value_str)?);
    Ok(())
}

/// Parse a string value with type inference
fn parse_value(value_str: &str) -> Result<toml::Value> {
    let trimmed = value_str.trim();

    match trimmed {
        "true" => return Ok(toml::Value::Boolean(true)),
        "false" => return Ok(toml::Value::Boolean(false)),
        _ => {}
    }

    if let Ok(int_val) = trimmed.parse::<i64>() {
        return Ok(toml::Value::Integer(int_val));
    }
    if let Ok(float_val) = trimmed.parse::<f64>() {
        return Ok(toml::Value::Float(float_val));
    }

    // Arrays and inline tables go through the TOML parser itself
    let is_array = trimmed.starts_with('[') && trimmed.ends_with(']');
    let is_table = trimmed.starts_with('{') && trimmed.ends_with('}');
    if is_array || is_table {
        let wrapped = format!("value = {}", trimmed);
        if let Ok(toml::Value::Table(mut table)) = toml::from_str::<toml::Value>(&wrapped) {
            if let Some(value) = table.remove("value") {
                return Ok(value);
            }
        }
        bail!("Failed to parse {}: {}", if is_array { "array" } else { "inline table" }, trimmed);
    }

    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);

    Ok(toml::Value::String(unquoted.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true").unwrap(), toml::Value::Boolean(true));
        assert_eq!(parse_value(" 42 ").unwrap(), toml::Value::Integer(42));
        assert_eq!(parse_value("-3").unwrap(), toml::Value::Integer(-3));
        assert_eq!(parse_value("2.5").unwrap(), toml::Value::Float(2.5));
        assert_eq!(parse_value("zipfian").unwrap(), toml::Value::String("zipfian".into()));
        assert_eq!(parse_value("\"1024\"").unwrap(), toml::Value::String("1024".into()));
        assert_eq!(
            parse_value("[1, 2]").unwrap(),
            toml::Value::Array(vec![toml::Value::Integer(1), toml::Value::Integer(2)])
        );
        // only bracketed on one side: kept as a plain string
        assert_eq!(parse_value("[1, 2").unwrap(), toml::Value::String("[1, 2".into()));
        assert!(parse_value("[1, =]").is_err());
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("keys.nops=10").unwrap(), ("keys.nops", "10"));
        assert_eq!(parse_key_value("a=b=c").unwrap(), ("a", "b=c"));
        assert!(parse_key_value("keys.nops").is_err());
        assert!(parse_key_value("=5").is_err());
    }

    #[test]
    fn test_set_toml_path_creates_tables() {
        let mut value = toml::Value::Table(toml::map::Map::new());
        set_toml_path(&mut value, "skew.family", "zipfian").unwrap();
        assert_eq!(value["skew"]["family"].as_str(), Some("zipfian"));
    }

    #[test]
    fn test_set_toml_path_rejects_non_tables() {
        let mut value: toml::Value = toml::from_str("[keys]\nnops = 4").unwrap();
        assert!(set_toml_path(&mut value, "keys.nops.deeper", "1").is_err());
        assert!(set_toml_path(&mut value, "", "1").is_err());
        assert!(set_toml_path(&mut value, "..", "1").is_err());

        set_toml_path(&mut value, "keys.nops", "9").unwrap();
        assert_eq!(value["keys"]["nops"].as_integer(), Some(9));
    }

    #[test]
    fn test_defaults() {
        let config = ProfileConfig::load(None, &[]).unwrap();
        assert_eq!(config.keys.number_of_distinct_keys, 1024);
        assert_eq!(config.keys.nops, 4096);
        assert_eq!(config.keys.skewness, 2.0);
        assert_eq!(config.skew, SkewPolicy::default());
        assert_eq!(config.output.uniform_file, PathBuf::from("random_keys.txt"));
        assert_eq!(config.output.skewed_file, PathBuf::from("skewed_keys.txt"));
        assert_eq!(config.experiment.seed, None);
    }
}
