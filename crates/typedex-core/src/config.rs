//! Configuration loading and typed config structures for Typedex.
//!
//! The canonical configuration lives in `typedex-config.yaml` at the
//! project root. Every field is defaulted, so an empty file (or no file at
//! all) yields a working configuration against the public provider.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use typedex_types::{SpeciesName, TypeName};

use crate::rules::{
    FORCED_TERMINALS, PSEUDO_TYPES, REGION_EXCLUSIVE, TYPE_INTRODUCTIONS, TaxonomyRules,
};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level pipeline configuration.
///
/// Mirrors the structure of `typedex-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TypedexConfig {
    /// Remote provider settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Where resources are written.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Curated rule tables.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Annual trigger for `schedule` mode.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TypedexConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `TYPEDEX_BASE_URL` overrides `source.base_url`
    /// - `TYPEDEX_REQUEST_DELAY_MS` overrides `source.request_delay_ms`
    /// - `TYPEDEX_DATA_DIR` overrides `storage.data_dir`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, apply environment
    /// overrides, and validate.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override selected values from the environment when set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("TYPEDEX_BASE_URL") {
            self.source.base_url = val;
        }
        if let Ok(val) = std::env::var("TYPEDEX_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("TYPEDEX_REQUEST_DELAY_MS") {
            self.source.request_delay_ms =
                val.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        field: "source.request_delay_ms",
                        reason: e.to_string(),
                    }
                })?;
        }
        Ok(())
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.base_url.trim().is_empty() {
            return Err(invalid("source.base_url", "must not be empty"));
        }
        if self.source.species_limit == 0 {
            return Err(invalid("source.species_limit", "must be positive"));
        }
        if self.source.fallback_generation_count == 0 {
            return Err(invalid(
                "source.fallback_generation_count",
                "must be positive",
            ));
        }
        if self.rules.type_introductions.values().any(|g| *g == 0) {
            return Err(invalid("rules.type_introductions", "generations start at 1"));
        }
        self.schedule.validate()
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Remote provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// Base URL; relative references are joined to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Minimum delay between consecutive requests.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// `limit` passed to the species catalog endpoint.
    #[serde(default = "default_species_limit")]
    pub species_limit: u32,

    /// Generation count used when the provider omits one.
    #[serde(default = "default_fallback_generation_count")]
    pub fallback_generation_count: u32,
}

impl SourceConfig {
    /// The inter-request delay as a [`Duration`].
    pub const fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_delay_ms: default_request_delay_ms(),
            species_limit: default_species_limit(),
            fallback_generation_count: default_fallback_generation_count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Output location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Root directory for `source.json`, `manifest.json`, and resources.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Rule tables as written in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Identities whose prior form is region-specific.
    #[serde(default = "default_region_exclusive")]
    pub region_exclusive: Vec<String>,

    /// Identities that end a line despite having evolutions.
    #[serde(default = "default_forced_terminals")]
    pub forced_terminals: Vec<String>,

    /// Catalog types that are not playable types.
    #[serde(default = "default_excluded_types")]
    pub excluded_types: Vec<String>,

    /// First generation of each late type.
    #[serde(default = "default_type_introductions")]
    pub type_introductions: BTreeMap<String, u32>,
}

impl RulesConfig {
    /// Convert into the tables used by the pipeline.
    pub fn to_rules(&self) -> TaxonomyRules {
        TaxonomyRules {
            region_exclusive: self
                .region_exclusive
                .iter()
                .map(|s| SpeciesName::new(s.as_str()))
                .collect(),
            forced_terminals: self
                .forced_terminals
                .iter()
                .map(|s| SpeciesName::new(s.as_str()))
                .collect(),
            excluded_types: self
                .excluded_types
                .iter()
                .map(|s| TypeName::new(s.as_str()))
                .collect(),
            type_introductions: self
                .type_introductions
                .iter()
                .map(|(name, generation)| (TypeName::new(name.as_str()), *generation))
                .collect(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            region_exclusive: default_region_exclusive(),
            forced_terminals: default_forced_terminals(),
            excluded_types: default_excluded_types(),
            type_introductions: default_type_introductions(),
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Annual trigger instant (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScheduleConfig {
    /// Month of year, 1-12.
    #[serde(default = "default_month")]
    pub month: u32,

    /// Day of month, 1-31.
    #[serde(default = "default_day")]
    pub day: u32,

    /// Hour of day, 0-23.
    #[serde(default)]
    pub hour: u32,

    /// Minute of hour, 0-59.
    #[serde(default)]
    pub minute: u32,
}

impl ScheduleConfig {
    fn validate(self) -> Result<(), ConfigError> {
        if !(1..=12).contains(&self.month) {
            return Err(invalid("schedule.month", "must be within 1..=12"));
        }
        if !(1..=31).contains(&self.day) {
            return Err(invalid("schedule.day", "must be within 1..=31"));
        }
        if self.hour > 23 {
            return Err(invalid("schedule.hour", "must be within 0..=23"));
        }
        if self.minute > 59 {
            return Err(invalid("schedule.minute", "must be within 0..=59"));
        }
        Ok(())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            month: default_month(),
            day: default_day(),
            hour: 0,
            minute: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Fallback level when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2/".to_owned()
}

const fn default_request_delay_ms() -> u64 {
    200
}

const fn default_species_limit() -> u32 {
    9999
}

const fn default_fallback_generation_count() -> u32 {
    9
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_region_exclusive() -> Vec<String> {
    REGION_EXCLUSIVE.iter().map(|s| (*s).to_owned()).collect()
}

fn default_forced_terminals() -> Vec<String> {
    FORCED_TERMINALS.iter().map(|s| (*s).to_owned()).collect()
}

fn default_excluded_types() -> Vec<String> {
    PSEUDO_TYPES.iter().map(|s| (*s).to_owned()).collect()
}

fn default_type_introductions() -> BTreeMap<String, u32> {
    TYPE_INTRODUCTIONS
        .iter()
        .map(|(name, generation)| ((*name).to_owned(), *generation))
        .collect()
}

const fn default_month() -> u32 {
    2
}

const fn default_day() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_rule_tables() {
        let config = TypedexConfig::default();
        assert_eq!(config.source.request_delay(), Duration::from_millis(200));
        assert_eq!(config.source.species_limit, 9999);
        assert_eq!(config.source.fallback_generation_count, 9);
        assert_eq!(config.schedule.month, 2);
        assert_eq!(config.schedule.day, 1);
        assert_eq!(config.rules.to_rules(), TaxonomyRules::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
source:
  base_url: "http://localhost:8000/api/v2/"
  request_delay_ms: 50
  species_limit: 151
  fallback_generation_count: 8

storage:
  data_dir: "/tmp/typedex"

rules:
  region_exclusive: ["perrserker"]
  forced_terminals: []
  excluded_types: ["unknown"]
  type_introductions:
    fairy: 6

schedule:
  month: 3
  day: 15
  hour: 6
  minute: 30

logging:
  level: "debug"
"#;
        let config = serde_yml::from_str::<TypedexConfig>(yaml).unwrap();

        assert_eq!(config.source.species_limit, 151);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/typedex"));
        assert_eq!(config.schedule.minute, 30);
        assert_eq!(config.logging.level, "debug");

        let rules = config.rules.to_rules();
        assert_eq!(rules.region_exclusive.len(), 1);
        assert!(rules.forced_terminals.is_empty());
        assert!(rules.is_type_available(&TypeName::from("steel"), 1));
        assert!(!rules.is_type_available(&TypeName::from("fairy"), 5));
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = serde_yml::from_str::<TypedexConfig>("schedule:\n  day: 10\n").unwrap();

        assert_eq!(config.schedule.day, 10);
        assert_eq!(config.schedule.month, 2);
        assert_eq!(config.source.base_url, "https://pokeapi.co/api/v2/");
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(serde_yml::from_str::<TypedexConfig>("").is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut config = TypedexConfig::default();
        config.schedule.month = 13;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "schedule.month",
                ..
            })
        ));

        let mut config = TypedexConfig::default();
        config.source.species_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("typedex-config.yaml");
        if path.exists() {
            let config = TypedexConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
