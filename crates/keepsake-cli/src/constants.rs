//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config file, token file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, arguments, or token.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passkey, locked out).
    pub const AUTH_FAILED: i32 = 5;
}

/// Environment variable consulted for the passkey before prompting.
pub const PASSKEY_ENV: &str = "KEEPSAKE_PASSKEY";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "KEEPSAKE_LOG";
