//! Builds the signed API client from config file, profile, and CLI
//! flag overrides. Flags win over profile values; a missing profile is
//! tolerated when the flags supply everything.

use std::time::Duration;

use secrecy::SecretString;

use lmsync_api::{Credentials, LmClient, TransportConfig};
use lmsync_core::ReconcilePolicy;
use lmsync_config::{self as config, ConfigError};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub struct AppContext {
    pub client: LmClient,
    pub policy: ReconcilePolicy,
    pub dry_run: bool,
}

pub fn build(global: &GlobalOpts) -> Result<AppContext, CliError> {
    let cfg = config::load_config_or_default();

    let (credentials, transport, policy) = match config::select_profile(&cfg, global.profile.as_deref())
    {
        Ok((name, profile)) => {
            let access_key = match global.access_key.as_deref() {
                Some(key) => SecretString::from(key.to_owned()),
                None => config::resolve_access_key(profile, &name)?,
            };
            let credentials = Credentials {
                company: global
                    .company
                    .clone()
                    .unwrap_or_else(|| profile.company.clone()),
                access_id: global
                    .access_id
                    .clone()
                    .unwrap_or_else(|| profile.access_id.clone()),
                access_key,
            };
            validate(&credentials)?;

            let timeout = global
                .timeout
                .or(profile.timeout)
                .unwrap_or(cfg.defaults.timeout);
            (
                credentials,
                TransportConfig {
                    timeout: Duration::from_secs(timeout),
                },
                config::profile_policy(profile),
            )
        }

        // An explicitly named profile must exist; otherwise flags and
        // env vars alone may carry the invocation.
        Err(ConfigError::UnknownProfile { name }) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound { name });
        }
        Err(ConfigError::UnknownProfile { name }) => {
            let access_key = global
                .access_key
                .as_deref()
                .map(|k| SecretString::from(k.to_owned()))
                .ok_or(CliError::NoCredentials { profile: name })?;
            let credentials = Credentials {
                company: global.company.clone().unwrap_or_default(),
                access_id: global.access_id.clone().unwrap_or_default(),
                access_key,
            };
            validate(&credentials)?;

            let timeout = global.timeout.unwrap_or(cfg.defaults.timeout);
            (
                credentials,
                TransportConfig {
                    timeout: Duration::from_secs(timeout),
                },
                ReconcilePolicy::default(),
            )
        }
        Err(other) => return Err(other.into()),
    };

    let client = LmClient::new(&credentials, &transport)?;
    Ok(AppContext {
        client,
        policy,
        dry_run: global.check,
    })
}

fn validate(credentials: &Credentials) -> Result<(), CliError> {
    if credentials.company.is_empty() {
        return Err(CliError::Validation {
            field: "company".into(),
            reason: "must not be empty".into(),
        });
    }
    if credentials.access_id.is_empty() {
        return Err(CliError::Validation {
            field: "access-id".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}
