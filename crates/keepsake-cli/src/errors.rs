//! CLI error types for structured error handling.
//!
//! Vault errors are mapped to typed CLI errors so that each failure class
//! exits with its own code.

use std::fmt;

use keepsake_core::VaultError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, token file)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passkey, locked out)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input or malformed token
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl From<VaultError> for CliError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::WrongPasskey { remaining: 0 } => CliError::auth_failed_with_hint(
                err.to_string(),
                "Hint: This session is now locked. Start a new session to try again.",
            ),
            VaultError::WrongPasskey { .. } | VaultError::AuthenticationFailure => {
                CliError::auth_failed(err.to_string())
            }
            VaultError::LockedOut => CliError::auth_failed_with_hint(
                "Too many failed passkey attempts.",
                "Hint: This session is locked. Start a new session to try again.",
            ),
            VaultError::InvalidInput(_) | VaultError::MalformedToken(_) | VaultError::Crypto(_) => {
                CliError::InvalidInput(err.to_string())
            }
        }
    }
}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and no hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}
