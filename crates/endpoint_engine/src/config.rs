use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use endpoint_core::DEFAULT_REFRESH_PERIOD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const TEXT_PLAIN: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Total wait for the HEAD probe before it is abandoned.
    #[serde(rename = "timeout_ms", with = "millis")]
    pub timeout: Duration,
    /// Value of the `Accept` request header.
    pub accept: String,
    /// Substring the response `content-type` must contain.
    pub expected_content_type: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            accept: TEXT_PLAIN.to_string(),
            expected_content_type: TEXT_PLAIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    #[serde(rename = "period_ms", with = "millis")]
    pub period: Duration,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            period: DEFAULT_REFRESH_PERIOD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub probe: ProbeSettings,
    pub refresh: RefreshSettings,
}

impl EngineConfig {
    /// Parses a RON document; omitted fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new();
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.timeout.is_zero() {
            return Err(ConfigError::Invalid("probe.timeout_ms must be > 0".into()));
        }
        if self.refresh.period.is_zero() {
            return Err(ConfigError::Invalid("refresh.period_ms must be > 0".into()));
        }
        if self.probe.expected_content_type.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "probe.expected_content_type must not be empty".into(),
            ));
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
