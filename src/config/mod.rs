use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_MODEL: &str = "qwen2.5:7b";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:11434";
pub const DEFAULT_MAX_ROUNDS: usize = 10;
const DEFAULT_CONFIG_PATH: &str = "config/astrolabe.toml";

/// Session configuration: which model to run, where the backend lives, and
/// how many rounds the tool loop may take before giving up.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub model: String,
    pub endpoint: String,
    pub system_prompt: Option<String>,
    pub max_rounds: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            system_prompt: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    model: Option<String>,
    endpoint: Option<String>,
    system_prompt: Option<String>,
    max_rounds: Option<usize>,
}

impl AgentConfig {
    /// Loads configuration from `path`, or from the default location when
    /// `None`. A missing file at the default location is not an error; a
    /// missing file at an explicit path is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return read_config(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        match read_config(default_path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("Configuration file not found; using defaults");
                Ok(Self::default())
            }
            Err(other) => Err(other),
        }
    }
}

fn read_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    debug!(path = %path.display(), "Reading agent configuration file");
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(AgentConfig {
        model: parsed.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        endpoint: parsed
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        system_prompt: parsed.system_prompt,
        max_rounds: parsed.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "model = \"llama3.1:8b\"\nendpoint = \"http://127.0.0.1:9000\"\nmax_rounds = 4"
        )
        .unwrap();

        let config = AgentConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.endpoint, "http://127.0.0.1:9000");
        assert_eq!(config.max_rounds, 4);
        assert!(config.system_prompt.is_none());
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "system_prompt = \"Be terse.\"").unwrap();

        let config = AgentConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.max_rounds, DEFAULT_MAX_ROUNDS);
        assert_eq!(config.system_prompt.as_deref(), Some("Be terse."));
    }

    #[test]
    fn load_rejects_missing_explicit_path() {
        let error = AgentConfig::load(Some(Path::new("/nonexistent/astrolabe.toml"))).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = [not toml").unwrap();

        let error = AgentConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }
}
