use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::presentation::diagnostic::RenderOptions;

/// Prefix of environment variables overriding file settings
/// (`DEPLOY_RESOLVER_DEFAULT_ENVIRONMENT`, `DEPLOY_RESOLVER_CANDIDATES__PATH`, ...).
pub const ENV_PREFIX: &str = "DEPLOY_RESOLVER";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Where users can register applications; quoted in remediation text.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Environment used when none is given on the command line.
    #[serde(default)]
    pub default_environment: Option<String>,
    /// Command prefix shown in every remediation hint.
    #[serde(default = "default_command_hint")]
    pub command_hint: String,
    #[serde(default)]
    pub candidates: CandidatesConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CandidatesConfig {
    /// JSON file holding the visible app environments.
    pub path: Option<PathBuf>,
}

fn default_endpoint() -> String {
    "https://cloud.example.com".to_string()
}

fn default_command_hint() -> String {
    "deploy <command>".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_environment: None,
            command_hint: default_command_hint(),
            candidates: CandidatesConfig::default(),
        }
    }
}

impl AppConfig {
    /// `<config dir>/deploy-resolver/config.toml`, when the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deploy-resolver").join("config.toml"))
    }

    /// Load settings from `path` (required) or from [`AppConfig::default_path`]
    /// (optional), then apply `DEPLOY_RESOLVER_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                builder =
                    builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                if let Some(path) = Self::default_path() {
                    builder = builder.add_source(
                        File::from(path.as_path())
                            .format(FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        let cfg = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| match path {
                Some(path) => format!("Failed to read config file: {}", path.display()),
                None => "Failed to read configuration".to_string(),
            })?;

        cfg.try_deserialize()
            .with_context(|| "Failed to parse configuration")
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            command_hint: self.command_hint.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}
