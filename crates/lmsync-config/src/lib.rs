//! Configuration for the lmsync CLI.
//!
//! TOML profiles, environment overrides, and access-key resolution
//! (env var, system keyring, plaintext — in that order). The access
//! key is handed out only as a `SecretString` and never written back
//! to disk by this crate.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lmsync_api::{Credentials, TransportConfig};
use lmsync_core::ReconcilePolicy;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{name}' in config")]
    UnknownProfile { name: String },

    #[error("no access key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "plain".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named account profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Account name — the `<company>` in `<company>.logicmonitor.com`.
    pub company: String,

    /// API token access id.
    pub access_id: String,

    /// Access key in plaintext (prefer keyring or env var).
    pub access_key: Option<String>,

    /// Environment variable name holding the access key.
    pub access_key_env: Option<String>,

    /// Override request timeout, in seconds.
    pub timeout: Option<u64>,

    /// Override the rejection codes treated as "already exists" on
    /// create.
    pub duplicate_error_codes: Option<Vec<i64>>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "lmsync", "lmsync").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("lmsync");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("LMSYNC_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
///
/// Callers must not put resolved secrets into `Config` before saving;
/// only what the operator typed belongs in the file.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Profile selection ───────────────────────────────────────────────

/// Pick a profile by explicit name or the configured default.
pub fn select_profile<'c>(
    config: &'c Config,
    name: Option<&str>,
) -> Result<(String, &'c Profile), ConfigError> {
    let name = name
        .map(ToOwned::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    config
        .profiles
        .get(&name)
        .map(|p| (name.clone(), p))
        .ok_or(ConfigError::UnknownProfile { name })
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the access key for a profile.
///
/// Order: the profile's named env var, then the system keyring entry
/// `lmsync/{profile}/access-key`, then plaintext in the config file.
pub fn resolve_access_key(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.access_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new("lmsync", &format!("{profile_name}/access-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(ref key) = profile.access_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build API credentials from a profile.
pub fn profile_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    if profile.company.is_empty() {
        return Err(ConfigError::Validation {
            field: "company".into(),
            reason: "must not be empty".into(),
        });
    }
    if profile.access_id.is_empty() {
        return Err(ConfigError::Validation {
            field: "access_id".into(),
            reason: "must not be empty".into(),
        });
    }

    let access_key = resolve_access_key(profile, profile_name)?;
    Ok(Credentials {
        company: profile.company.clone(),
        access_id: profile.access_id.clone(),
        access_key,
    })
}

/// Transport settings for a profile, falling back to global defaults.
pub fn profile_transport(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    TransportConfig {
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    }
}

/// Reconciliation policy for a profile.
pub fn profile_policy(profile: &Profile) -> ReconcilePolicy {
    match &profile.duplicate_error_codes {
        Some(codes) => ReconcilePolicy {
            duplicate_error_codes: codes.clone(),
        },
        None => ReconcilePolicy::default(),
    }
}
