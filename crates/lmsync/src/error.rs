//! CLI error types with miette diagnostics.
//!
//! Maps engine and config errors into user-facing diagnostics with
//! actionable help text, and onto process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use lmsync_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("REST API call to {path} failed")]
    #[diagnostic(
        code(lmsync::connection_failed),
        help(
            "Check network connectivity and the account name.\n\
             The API endpoint is https://<company>.logicmonitor.com/santaba/rest"
        )
    )]
    ConnectionFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(lmsync::auth_failed),
        help(
            "Verify the access id and access key for this API token.\n\
             Store the key with: lmsync config set-key --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No access key configured for profile '{profile}'")]
    #[diagnostic(
        code(lmsync::no_credentials),
        help(
            "Store one with: lmsync config set-key --profile {profile}\n\
             Or set the LMSYNC_ACCESS_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resolution ───────────────────────────────────────────────────
    #[error("No {entity} match found for '{name}'")]
    #[diagnostic(
        code(lmsync::not_found),
        help("Name references are exact matches; check spelling and case.")
    )]
    NotFound { entity: String, name: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error on {path} (status {status}): {message}")]
    #[diagnostic(code(lmsync::api_error))]
    ApiError {
        path: String,
        status: i64,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(lmsync::rejected),
        help("The server rejected the mutation; the reply body is included above.")
    )]
    Rejected { message: String },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lmsync::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(lmsync::profile_not_found),
        help(
            "List the config with: lmsync config show\n\
             Or pass --company, --access-id, and --access-key directly."
        )
    )]
    ProfileNotFound { name: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(lmsync::config))]
    Config(String),

    // ── IO / data ────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Output serialization failed: {0}")]
    #[diagnostic(code(lmsync::output))]
    Output(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::CONFLICT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Error mappings ───────────────────────────────────────────────────

// The API reports bad credentials as an embedded 1401 status.
const STATUS_UNAUTHENTICATED: i64 = 1401;

impl From<lmsync_api::Error> for CliError {
    fn from(err: lmsync_api::Error) -> Self {
        match err {
            lmsync_api::Error::Transport { path, source } => Self::ConnectionFailed {
                path,
                source: source.into(),
            },
            lmsync_api::Error::Api {
                path,
                status,
                message,
            } => {
                if status == STATUS_UNAUTHENTICATED {
                    Self::AuthFailed { message }
                } else {
                    Self::ApiError {
                        path,
                        status,
                        message,
                    }
                }
            }
            other => Self::Config(other.to_string()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(api) => api.into(),
            CoreError::ResolutionFailed { entity, name } => Self::NotFound {
                entity: entity.into(),
                name,
            },
            rejected @ CoreError::MutationRejected { .. } => Self::Rejected {
                message: rejected.to_string(),
            },
        }
    }
}

impl From<lmsync_config::ConfigError> for CliError {
    fn from(err: lmsync_config::ConfigError) -> Self {
        match err {
            lmsync_config::ConfigError::UnknownProfile { name } => Self::ProfileNotFound { name },
            lmsync_config::ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            lmsync_config::ConfigError::Validation { field, reason } => {
                Self::Validation { field, reason }
            }
            other => Self::Config(other.to_string()),
        }
    }
}
