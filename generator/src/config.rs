//! Generator configuration.
//!
//! Defaults match the layout a Monaco repository expects
//! (`vars/monitors.csv` in, `projects/synthetic-monitor/<id>/` out).
//! Environment variables override the defaults and CLI flags override both.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Default input table.
pub const DEFAULT_INPUT_PATH: &str = "vars/monitors.csv";

/// Base directory that receives one sub-directory per monitor.
pub const DEFAULT_OUTPUT_DIR: &str = "projects/synthetic-monitor";

/// Monitor definition file written in each monitor directory.
pub const DEFAULT_MONITOR_FILE_NAME: &str = "monitor.json";

/// Project descriptor file written in each monitor directory.
pub const DEFAULT_PROJECT_FILE_NAME: &str = "project.yaml";

/// Monaco API the generated configs are deployed through.
pub const DEFAULT_API_CATEGORY: &str = "synthetic-monitor";

pub const DEFAULT_DELIMITER: u8 = b',';

pub const ENV_INPUT: &str = "SYNTHGEN_INPUT";
pub const ENV_OUTPUT_DIR: &str = "SYNTHGEN_OUTPUT_DIR";
pub const ENV_API: &str = "SYNTHGEN_API";
pub const ENV_DELIMITER: &str = "SYNTHGEN_DELIMITER";

/// Everything a generation run needs to know about paths and names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub monitor_file_name: String,
    pub project_file_name: String,
    pub api_category: String,
    pub delimiter: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            monitor_file_name: DEFAULT_MONITOR_FILE_NAME.to_string(),
            project_file_name: DEFAULT_PROJECT_FILE_NAME.to_string(),
            api_category: DEFAULT_API_CATEGORY.to_string(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl GeneratorConfig {
    /// Defaults overridden by `SYNTHGEN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GeneratorConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(input) = get(ENV_INPUT) {
            config.input_path = PathBuf::from(input);
        }
        if let Some(output) = get(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(output);
        }
        if let Some(api) = get(ENV_API) {
            config.api_category = api.trim().to_string();
        }
        if let Some(delimiter) = get(ENV_DELIMITER) {
            config.delimiter = parse_delimiter(&delimiter)?;
        }

        Ok(config)
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Directory that holds the files of one monitor.
    pub fn monitor_dir(&self, monitor_id: &str) -> PathBuf {
        self.output_dir.join(monitor_id)
    }
}

/// Parse a delimiter given as text. Accepts one ASCII character, `\t` or `tab`.
pub fn parse_delimiter(raw: &str) -> Result<u8, ConfigError> {
    match raw {
        "\\t" | "tab" | "TAB" | "\t" => return Ok(b'\t'),
        _ => {}
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(ConfigError::InvalidDelimiter(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.input_path, PathBuf::from("vars/monitors.csv"));
        assert_eq!(config.output_dir, PathBuf::from("projects/synthetic-monitor"));
        assert_eq!(config.monitor_file_name, "monitor.json");
        assert_eq!(config.project_file_name, "project.yaml");
        assert_eq!(config.delimiter, b',');
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_INPUT, "data/checks.csv"),
            (ENV_OUTPUT_DIR, "out"),
            (ENV_DELIMITER, "tab"),
            (ENV_API, "   "),
        ]
        .into_iter()
        .collect();

        let config =
            GeneratorConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.input_path, PathBuf::from("data/checks.csv"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.delimiter, b'\t');
        // blank values fall back to the default
        assert_eq!(config.api_category, "synthetic-monitor");
    }

    #[test]
    fn test_invalid_delimiter_from_env() {
        let result = GeneratorConfig::from_lookup(|k| {
            (k == ENV_DELIMITER).then(|| ";;".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidDelimiter(_))));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert!(parse_delimiter("é").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_monitor_dir() {
        let config = GeneratorConfig::default().with_output_dir("out");
        assert_eq!(config.monitor_dir("mon-1"), PathBuf::from("out/mon-1"));
    }
}
