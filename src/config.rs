//! Configuration Management
//!
//! Static lookup data for the audit job, loaded from a JSON file with
//! built-in defaults for anything the file leaves out.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default QuickSight namespace holding the audited groups and users
pub const DEFAULT_NAMESPACE: &str = "gademo";

/// Default service segment used in the report object keys
pub const DEFAULT_SERVICE: &str = "quicksight";

/// Default SSM parameter holding the report bucket settings
pub const DEFAULT_PARAMETER_KEY: &str = "/qs/config/groups";

/// Region used when neither the CLI, the config file nor the environment names one
pub const FALLBACK_REGION: &str = "us-east-1";

/// Sample datasets shipped with every QuickSight account
const DEFAULT_EXCLUDED_DATASETS: &[&str] = &[
    "Business Review",
    "People Overview",
    "Sales Pipeline",
    "Web and Social Media Analytics",
];

/// Job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// QuickSight namespace for group, user and membership listings
    pub namespace: String,
    /// Service segment in `monitoring/<service>/...` report keys
    pub service: String,
    /// SSM parameter name holding `{"bucket-name": ...}`
    pub parameter_key: String,
    /// Dataset display names left out of the access report
    pub excluded_datasets: Vec<String>,
    /// Region shared by every AWS client
    pub region: Option<String>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            parameter_key: DEFAULT_PARAMETER_KEY.to_string(),
            excluded_datasets: DEFAULT_EXCLUDED_DATASETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            region: None,
        }
    }
}

impl JobConfig {
    /// Default config file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("qsaudit").join("config.json"))
    }

    /// Load configuration from an explicit path, the default path, or defaults.
    ///
    /// An explicitly named file must exist and parse. The default path is
    /// optional, but once present it must parse as well.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Report destination stored in the parameter store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BucketParameter {
    #[serde(rename = "bucket-name")]
    pub bucket_name: String,
}

impl BucketParameter {
    /// Parse the JSON-encoded parameter value
    pub fn parse(value: &str) -> Result<Self> {
        serde_json::from_str(value)
            .context("Parameter value is not a JSON object with a 'bucket-name' field")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = JobConfig::default();
        assert_eq!(config.namespace, "gademo");
        assert_eq!(config.service, "quicksight");
        assert_eq!(config.parameter_key, "/qs/config/groups");
        assert_eq!(config.excluded_datasets.len(), 4);
        assert!(config
            .excluded_datasets
            .contains(&"Web and Social Media Analytics".to_string()));
        assert!(config.region.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"namespace": "default", "excluded_datasets": []}}"#).unwrap();

        let config = JobConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.namespace, "default");
        assert!(config.excluded_datasets.is_empty());
        assert_eq!(config.service, "quicksight");
        assert_eq!(config.parameter_key, "/qs/config/groups");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = JobConfig::load(Some(&dir.path().join("absent.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_bucket_parameter() {
        let parsed = BucketParameter::parse(r#"{"bucket-name": "audit-bucket", "other": 1}"#).unwrap();
        assert_eq!(parsed.bucket_name, "audit-bucket");

        assert!(BucketParameter::parse(r#"{"bucket": "audit-bucket"}"#).is_err());
        assert!(BucketParameter::parse("audit-bucket").is_err());
    }
}
