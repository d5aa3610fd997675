//! Vault configuration.
//!
//! The configuration surface is deliberately small: lockout threshold, KDF
//! cost, and salt length. Every field has a default so a partial TOML or JSON
//! document deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::crypto::KdfParams;
use crate::error::{Result, VaultError};

/// Default number of consecutive failures before lockout.
pub const DEFAULT_THRESHOLD_ATTEMPTS: u32 = 3;

/// Default PBKDF2-HMAC-SHA256 iteration count.
pub const DEFAULT_KDF_ITERATIONS: u32 = 390_000;

/// Lowest iteration count the vault accepts.
pub const MIN_KDF_ITERATIONS: u32 = 300_000;

/// Default (and minimum) salt length in bytes.
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Configuration for a [`crate::VaultService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Consecutive failed retrievals that lock a session.
    pub threshold_attempts: u32,
    /// PBKDF2 rounds used for every derivation.
    pub kdf_iterations: u32,
    /// Bytes of random salt stored at the front of each token.
    pub salt_length: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            threshold_attempts: DEFAULT_THRESHOLD_ATTEMPTS,
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }
}

impl VaultConfig {
    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidInput` if the threshold is zero, the
    /// iteration count is below [`MIN_KDF_ITERATIONS`], or the salt is shorter
    /// than [`DEFAULT_SALT_LENGTH`].
    pub fn validate(&self) -> Result<()> {
        if self.threshold_attempts == 0 {
            return Err(VaultError::InvalidInput(
                "threshold_attempts must be at least 1".to_string(),
            ));
        }

        if self.kdf_iterations < MIN_KDF_ITERATIONS {
            return Err(VaultError::InvalidInput(format!(
                "kdf_iterations must be at least {} (got {})",
                MIN_KDF_ITERATIONS, self.kdf_iterations
            )));
        }

        if self.salt_length < DEFAULT_SALT_LENGTH {
            return Err(VaultError::InvalidInput(format!(
                "salt_length must be at least {} bytes (got {})",
                DEFAULT_SALT_LENGTH, self.salt_length
            )));
        }

        Ok(())
    }

    /// Key derivation parameters implied by this configuration.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.kdf_iterations,
            salt_len: self.salt_length,
        }
    }
}
