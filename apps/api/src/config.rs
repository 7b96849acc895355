use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::agent::Credentials;
use crate::llm_client::DEFAULT_MODEL;

const AGENT_CONFIG_FILE: &str = "agent_config.json";
const DEFAULT_PORT: u16 = 3773;

/// Application configuration loaded from environment variables.
/// No variable is required: without API keys the agent runs on the mock backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub model_name: String,
    pub port: u16,
    pub rust_log: String,
    pub agent: AgentConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let explicit = optional_env("AGENT_CONFIG").map(PathBuf::from);

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            model_name: optional_env("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: parse_port(optional_env("PORT").as_deref())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            agent: load_agent_config(&candidate_paths(explicit)),
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            openai_api_key: self.openai_api_key.clone(),
            openrouter_api_key: self.openrouter_api_key.clone(),
            model_name: self.model_name.clone(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .context("PORT must be a valid port number"),
        None => Ok(DEFAULT_PORT),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Agent manifest (agent_config.json)
// ────────────────────────────────────────────────────────────────────────────

/// Public description of the agent, served at `/api/v1/agent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub deployment: DeploymentConfig,
    #[serde(default)]
    pub environment_variables: Vec<EnvVarSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub url: String,
    #[serde(default)]
    pub expose: bool,
    #[serde(default)]
    pub protocol_version: String,
    #[serde(default)]
    pub proxy_urls: Vec<String>,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvVarSpec {
    pub key: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            url: format!("http://127.0.0.1:{DEFAULT_PORT}"),
            expose: true,
            protocol_version: "1.0.0".to_string(),
            proxy_urls: vec!["127.0.0.1".to_string()],
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        let var = |key: &str, description: &str, required: bool| EnvVarSpec {
            key: key.to_string(),
            description: description.to_string(),
            required,
        };

        Self {
            name: "screenplay-writer".to_string(),
            description: "AI screenplay writing agent for professional script development"
                .to_string(),
            version: "1.0.0".to_string(),
            deployment: DeploymentConfig::default(),
            environment_variables: vec![
                var("OPENAI_API_KEY", "OpenAI API key for LLM calls", false),
                var("OPENROUTER_API_KEY", "OpenRouter API key for LLM calls", true),
                var("MEM0_API_KEY", "Mem0 API key for memory operations", false),
            ],
        }
    }
}

impl AgentConfig {
    /// True when the manifest allows any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.deployment.cors_origins.iter().any(|o| o == "*")
    }
}

/// Search order: explicit path, working directory, crate directory.
fn candidate_paths(explicit: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = explicit.into_iter().collect();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(AGENT_CONFIG_FILE));
    }
    paths.push(Path::new(env!("CARGO_MANIFEST_DIR")).join(AGENT_CONFIG_FILE));
    paths
}

/// Loads the first readable manifest among `paths`, falling back to the default.
pub fn load_agent_config(paths: &[PathBuf]) -> AgentConfig {
    for path in paths.iter().filter(|p| p.exists()) {
        match read_agent_config(path) {
            Ok(config) => {
                info!("Loaded agent config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Error reading {}: {e:#}", path.display());
            }
        }
    }

    warn!("No {AGENT_CONFIG_FILE} found, using default configuration");
    AgentConfig::default()
}

fn read_agent_config(path: &Path) -> Result<AgentConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in '{}'", path.display()))
}
