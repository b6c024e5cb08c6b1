//! Debate runtime configuration.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (applied by `main`)
//! 2. Environment variables (`OPENAI_API_BASE`, `DEBATE_MODEL`, ...)
//! 3. Optional TOML file passed with `--config`
//! 4. Built-in defaults
//!
//! The API key is only ever read from `OPENROUTER_API_KEY` and is never
//! serialized.

use std::path::{Path, PathBuf};

use coordination::debate::TurnPolicy;
use serde::{Deserialize, Serialize};

use crate::errors::DebateError;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: u64 = 1024;
const DEFAULT_LOG_PATH: &str = "debate.log";
const DEFAULT_DIAGRAM_PATH: &str = "dag_diagram.dot";

pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
const ENV_BASE_URL: &str = "OPENAI_API_BASE";
const ENV_MODEL: &str = "DEBATE_MODEL";
const ENV_ROUND_LIMIT: &str = "DEBATE_ROUND_LIMIT";
const ENV_TEMPERATURE: &str = "DEBATE_TEMPERATURE";

/// OpenAI-compatible completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(skip)]
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Top-level configuration passed into the controller and CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebateConfig {
    pub provider: ProviderConfig,
    pub policy: TurnPolicy,
    /// File receiving a plain-text copy of the log (None = stderr only).
    pub log_path: Option<PathBuf>,
    /// Where the workflow diagram is written after the run.
    pub diagram_path: PathBuf,
    /// Optional transcript output.
    pub transcript_path: Option<PathBuf>,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            policy: TurnPolicy::default(),
            log_path: Some(PathBuf::from(DEFAULT_LOG_PATH)),
            diagram_path: PathBuf::from(DEFAULT_DIAGRAM_PATH),
            transcript_path: None,
        }
    }
}

/// Command-line overrides, the highest-precedence layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub rounds: Option<u32>,
    pub model: Option<String>,
    pub diagram: Option<PathBuf>,
    pub transcript: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub no_log_file: bool,
}

impl DebateConfig {
    /// Load defaults, an optional TOML file, then process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, DebateError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like `load`, with an explicit environment lookup.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, DebateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Full resolution: TOML, environment, CLI flags, then validation.
    pub fn resolve<F>(
        path: Option<&Path>,
        lookup: F,
        overrides: &CliOverrides,
    ) -> Result<Self, DebateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_with(path, lookup)?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line flags on top of file and environment settings.
    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(rounds) = overrides.rounds {
            self.policy.round_limit = rounds;
        }
        if let Some(model) = &overrides.model {
            self.provider.model = model.clone();
        }
        if let Some(path) = &overrides.diagram {
            self.diagram_path = path.clone();
        }
        if let Some(path) = &overrides.transcript {
            self.transcript_path = Some(path.clone());
        }
        if let Some(path) = &overrides.log_file {
            self.log_path = Some(path.clone());
        }
        if overrides.no_log_file {
            self.log_path = None;
        }
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, DebateError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DebateError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, DebateError> {
        toml::from_str(raw)
            .map_err(|e| DebateError::Configuration(format!("invalid config file: {e}")))
    }

    /// Apply overrides from `lookup` (the process environment in production).
    ///
    /// Fails when the API key is absent or a numeric override does not parse.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), DebateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        self.provider.api_key = non_empty(ENV_API_KEY).ok_or_else(|| {
            DebateError::Configuration(format!(
                "{ENV_API_KEY} not found. Please set it in your environment or .env file."
            ))
        })?;

        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.provider.base_url = url;
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.provider.model = model;
        }
        if let Some(raw) = non_empty(ENV_ROUND_LIMIT) {
            self.policy.round_limit = raw.trim().parse().map_err(|_| {
                DebateError::Configuration(format!("{ENV_ROUND_LIMIT} must be an integer, got {raw:?}"))
            })?;
        }
        if let Some(raw) = non_empty(ENV_TEMPERATURE) {
            self.provider.temperature = raw.trim().parse().map_err(|_| {
                DebateError::Configuration(format!("{ENV_TEMPERATURE} must be a number, got {raw:?}"))
            })?;
        }
        Ok(())
    }

    /// Validate all settings.
    pub fn validate(&self) -> Result<(), DebateError> {
        if self.provider.api_key.is_empty() {
            return Err(DebateError::Configuration(format!("{ENV_API_KEY} is empty")));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(DebateError::Configuration(format!(
                "temperature must be in [0, 2], got {}",
                self.provider.temperature
            )));
        }
        if self.provider.max_tokens == 0 {
            return Err(DebateError::Configuration("max_tokens must be > 0".to_string()));
        }
        if self.provider.model.trim().is_empty() {
            return Err(DebateError::Configuration("model must not be empty".to_string()));
        }
        self.policy.validate().map_err(DebateError::Configuration)
    }
}

/// Check if the completion endpoint is reachable (GET {base_url}/models).
pub async fn check_endpoint(url: &str) -> bool {
    let models_url = format!("{}/models", url.trim_end_matches('/'));
    match reqwest::Client::new()
        .get(&models_url)
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await
    {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use coordination::debate::ParticipantRole;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_configuration_error() {
        let mut cfg = DebateConfig::default();
        let err = cfg.apply_env(env(&[])).unwrap_err();
        assert_eq!(err.kind(), "configuration");
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let mut cfg = DebateConfig::default();
        assert!(cfg.apply_env(env(&[(ENV_API_KEY, "   ")])).is_err());
    }

    #[test]
    fn defaults_with_key_validate() {
        let mut cfg = DebateConfig::default();
        cfg.apply_env(env(&[(ENV_API_KEY, "sk-test")])).unwrap();
        cfg.validate().expect("defaults should be valid");
        assert_eq!(cfg.policy.round_limit, 8);
        assert_eq!(cfg.policy.opening_role, ParticipantRole::Scientist);
        assert_eq!(cfg.provider.model, DEFAULT_MODEL);
        assert_eq!(cfg.provider.max_tokens, 1024);
        assert_eq!(cfg.log_path.as_deref(), Some(Path::new("debate.log")));
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = DebateConfig::default();
        cfg.apply_env(env(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_BASE_URL, "http://localhost:8080/v1"),
            (ENV_MODEL, "mistral-7b"),
            (ENV_ROUND_LIMIT, "4"),
            (ENV_TEMPERATURE, "0.2"),
        ]))
        .unwrap();
        assert_eq!(cfg.provider.base_url, "http://localhost:8080/v1");
        assert_eq!(cfg.provider.model, "mistral-7b");
        assert_eq!(cfg.policy.round_limit, 4);
        assert!((cfg.provider.temperature - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn bad_round_limit_rejected() {
        let mut cfg = DebateConfig::default();
        let err = cfg
            .apply_env(env(&[(ENV_API_KEY, "k"), (ENV_ROUND_LIMIT, "eight")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_ROUND_LIMIT));
    }

    #[test]
    fn zero_round_limit_fails_validation() {
        let mut cfg = DebateConfig::default();
        cfg.apply_env(env(&[(ENV_API_KEY, "k"), (ENV_ROUND_LIMIT, "0")]))
            .unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let mut cfg = DebateConfig::default();
        cfg.apply_env(env(&[(ENV_API_KEY, "k")])).unwrap();
        cfg.provider.temperature = 3.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
diagram_path = "out/graph.dot"

[provider]
model = "llama-3-8b"
max_tokens = 256

[policy]
round_limit = 6
opening_role = "philosopher"
"#
        )
        .unwrap();

        let cfg = DebateConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(cfg.provider.model, "llama-3-8b");
        assert_eq!(cfg.provider.max_tokens, 256);
        assert_eq!(cfg.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.policy.round_limit, 6);
        assert_eq!(cfg.policy.opening_role, ParticipantRole::Philosopher);
        assert_eq!(cfg.diagram_path, PathBuf::from("out/graph.dot"));
        assert!(cfg.provider.api_key.is_empty());
    }

    fn toml_with_rounds(rounds: u32) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[policy]\nround_limit = {rounds}\n\n[provider]\nmodel = \"from-toml\""
        )
        .unwrap();
        file
    }

    #[test]
    fn env_overrides_toml() {
        let file = toml_with_rounds(6);
        let cfg = DebateConfig::resolve(
            Some(file.path()),
            env(&[(ENV_API_KEY, "k"), (ENV_ROUND_LIMIT, "4")]),
            &CliOverrides::default(),
        )
        .unwrap();
        assert_eq!(cfg.policy.round_limit, 4);
        assert_eq!(cfg.provider.model, "from-toml");
    }

    #[test]
    fn cli_overrides_env_and_toml() {
        let file = toml_with_rounds(6);
        let overrides = CliOverrides {
            rounds: Some(10),
            model: Some("from-cli".into()),
            diagram: Some(PathBuf::from("cli.dot")),
            transcript: Some(PathBuf::from("cli.txt")),
            ..Default::default()
        };
        let cfg = DebateConfig::resolve(
            Some(file.path()),
            env(&[(ENV_API_KEY, "k"), (ENV_ROUND_LIMIT, "4"), (ENV_MODEL, "from-env")]),
            &overrides,
        )
        .unwrap();
        assert_eq!(cfg.policy.round_limit, 10);
        assert_eq!(cfg.provider.model, "from-cli");
        assert_eq!(cfg.diagram_path, PathBuf::from("cli.dot"));
        assert_eq!(cfg.transcript_path, Some(PathBuf::from("cli.txt")));
    }

    #[test]
    fn log_file_flags() {
        let custom = CliOverrides {
            log_file: Some(PathBuf::from("run.log")),
            ..Default::default()
        };
        let cfg = DebateConfig::resolve(None, env(&[(ENV_API_KEY, "k")]), &custom).unwrap();
        assert_eq!(cfg.log_path, Some(PathBuf::from("run.log")));

        let disabled = CliOverrides {
            no_log_file: true,
            ..Default::default()
        };
        let cfg = DebateConfig::resolve(None, env(&[(ENV_API_KEY, "k")]), &disabled).unwrap();
        assert!(cfg.log_path.is_none());
    }

    #[test]
    fn cli_zero_rounds_fails_resolution() {
        let overrides = CliOverrides {
            rounds: Some(0),
            ..Default::default()
        };
        let err =
            DebateConfig::resolve(None, env(&[(ENV_API_KEY, "k")]), &overrides).unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }

    #[test]
    fn invalid_toml_is_configuration_error() {
        let err = DebateConfig::from_toml_str("provider = 3").unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }
}
