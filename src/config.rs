// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::services::encoder::DEFAULT_MAX_ATTACHMENT_BYTES;

/// Hosting-environment variables consulted for the credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const MAX_ATTACHMENT_CEILING: usize = 100 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,

    /// Generative Language API root (default: https://generativelanguage.googleapis.com/v1beta)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Never serialized; resolved separately in [`Config::load`].
    #[serde(skip)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds. Unset means the call runs to completion.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Sampling temperature (0.0-2.0). Unset leaves the backend default.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Per-file attachment limit in bytes (default 20 MiB)
    #[serde(default = "default_max_attachment_bytes")]
    pub max_attachment_bytes: usize,
}

fn default_model() -> String {
    "gemini-3-flash-preview".into()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_max_attachment_bytes() -> usize {
    DEFAULT_MAX_ATTACHMENT_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: None,
            temperature: None,
            max_attachment_bytes: default_max_attachment_bytes(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.hakim.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".hakim.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // HAKIM_MODEL, HAKIM_API_KEY, HAKIM_TIMEOUT_SECS, ...
        figment = figment.merge(Env::prefixed("HAKIM_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let file_or_env_key = figment.extract_inner::<String>("api_key").ok();
        config.api_key = Self::resolve_api_key(file_or_env_key);

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// First non-blank key from: config layers, hosting env vars, keychain.
    fn resolve_api_key(configured: Option<String>) -> Option<SecretString> {
        let from_env = || {
            API_KEY_ENV_VARS
                .iter()
                .find_map(|name| std::env::var(name).ok())
        };

        #[cfg(feature = "secure-storage")]
        let from_keyring = || {
            keyring::Entry::new("hakim", "gemini")
                .ok()
                .and_then(|entry| entry.get_password().ok())
        };
        #[cfg(not(feature = "secure-storage"))]
        let from_keyring = || None::<String>;

        configured
            .filter(|k| !k.trim().is_empty())
            .or_else(|| from_env().filter(|k| !k.trim().is_empty()))
            .or_else(|| from_keyring().filter(|k| !k.trim().is_empty()))
            .map(SecretString::from)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "hakim").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref m) = cli.model {
            self.model = m.clone();
        }
        if let Some(t) = cli.timeout {
            self.timeout_secs = Some(t);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::Configuration("model cannot be empty".into()));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            Error::Configuration(format!("base_url '{}' is not a valid URL: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if let Some(timeout) = self.timeout_secs {
            if !(1..=3600).contains(&timeout) {
                return Err(Error::Configuration(format!(
                    "timeout_secs must be 1–3600, got {timeout}"
                )));
            }
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(Error::Configuration(format!(
                    "temperature must be 0.0–2.0, got {temperature}"
                )));
            }
        }

        if !(1..=MAX_ATTACHMENT_CEILING).contains(&self.max_attachment_bytes) {
            return Err(Error::Configuration(format!(
                "max_attachment_bytes must be 1–{MAX_ATTACHMENT_CEILING}, got {}",
                self.max_attachment_bytes
            )));
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Configuration(
                "Cannot determine config directory".into(),
            ));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# Hakim Configuration

# Gemini model used for the analysis
model = "gemini-3-flash-preview"

# Generative Language API root
base_url = "https://generativelanguage.googleapis.com/v1beta"

# API key. Prefer GEMINI_API_KEY or `hakim set-key` over storing it here.
# api_key = ""

# Request timeout in seconds (unset: wait for the backend to finish)
# timeout_secs = 120

# Sampling temperature, 0.0-2.0 (unset: backend default)
# temperature = 0.2

# Per-file attachment limit in bytes
max_attachment_bytes = 20971520
"#;

        fs::write(&path, content)?;

        // Set secure permissions (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
