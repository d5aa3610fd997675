//! Error types for Keepsake core operations.
//!
//! Every fallible operation in the core returns [`VaultError`]. Messages are
//! safe to show to a user: they never carry plaintext, passkeys, or key
//! material. The CLI layer maps these to exit codes.

use thiserror::Error;

/// Result type alias for Keepsake operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for Keepsake operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Empty or malformed arguments, or an invalid configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The token was corrupted or was not produced by a vault
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// The passkey did not open the token; counted toward lockout
    #[error("Incorrect passkey ({remaining} attempt{} remaining)", plural(.remaining))]
    WrongPasskey { remaining: u32 },

    /// Too many failed attempts; retrieval refused until an external reset
    #[error("Too many failed attempts; access is locked")]
    LockedOut,

    /// Authenticated decryption rejected the ciphertext.
    ///
    /// Raised by the cipher. The vault service reports it to callers as
    /// [`VaultError::WrongPasskey`], so wrong keys and tampering look the same.
    #[error("Authentication failed")]
    AuthenticationFailure,

    /// Unexpected failure inside the cipher or key derivation
    #[error("Encryption error: {0}")]
    Crypto(String),
}

fn plural(count: &u32) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

impl VaultError {
    /// Whether this error means the session is locked out.
    pub fn is_locked(&self) -> bool {
        matches!(self, VaultError::LockedOut)
    }

    /// Remaining attempts carried by a [`VaultError::WrongPasskey`].
    pub fn remaining_attempts(&self) -> Option<u32> {
        match self {
            VaultError::WrongPasskey { remaining } => Some(*remaining),
            _ => None,
        }
    }

    /// Whether the same call may succeed with different input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, VaultError::WrongPasskey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_passkey_message_pluralizes() {
        assert_eq!(
            VaultError::WrongPasskey { remaining: 2 }.to_string(),
            "Incorrect passkey (2 attempts remaining)"
        );
        assert_eq!(
            VaultError::WrongPasskey { remaining: 1 }.to_string(),
            "Incorrect passkey (1 attempt remaining)"
        );
    }

    #[test]
    fn test_lockout_flags() {
        assert!(VaultError::LockedOut.is_locked());
        assert!(!VaultError::LockedOut.is_retryable());
        assert_eq!(VaultError::LockedOut.remaining_attempts(), None);

        let wrong = VaultError::WrongPasskey { remaining: 0 };
        assert!(!wrong.is_locked());
        assert!(wrong.is_retryable());
        assert_eq!(wrong.remaining_attempts(), Some(0));
    }
}
