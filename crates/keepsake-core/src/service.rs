//! The vault facade: store and retrieve.

use tracing::{debug, warn};

use crate::config::VaultConfig;
use crate::crypto::{decrypt, derive_key, encrypt, generate_salt};
use crate::error::{Result, VaultError};
use crate::limiter::AttemptLimiter;
use crate::token::VaultEntry;

/// Encrypts plaintext into tokens and opens them again.
///
/// The service holds only configuration. Lockout state lives in an
/// [`AttemptLimiter`] that the session layer creates and passes in, so one
/// service can serve many sessions at once.
#[derive(Debug, Clone, Default)]
pub struct VaultService {
    config: VaultConfig,
}

impl VaultService {
    /// Build a service from a validated configuration.
    pub fn new(config: VaultConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// A fresh limiter using the configured threshold, for one session.
    pub fn new_limiter(&self) -> AttemptLimiter {
        AttemptLimiter::new(self.config.threshold_attempts)
    }

    /// Encrypt `plaintext` under `passkey` and return the token.
    ///
    /// Each call uses a new salt, so storing the same plaintext twice yields
    /// unrelated tokens. The token is not kept anywhere.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidInput` if either argument is empty.
    pub fn store(&self, plaintext: &str, passkey: &str) -> Result<String> {
        if plaintext.is_empty() {
            return Err(VaultError::InvalidInput(
                "Plaintext cannot be empty".to_string(),
            ));
        }
        require_passkey(passkey)?;

        let params = self.config.kdf_params();
        let salt = generate_salt(params.salt_len)?;
        let key = derive_key(passkey, &salt, &params)?;
        let ciphertext = encrypt(&key, plaintext.as_bytes())?;

        let token = VaultEntry::new(salt, ciphertext).encode();
        debug!(
            token_len = token.len(),
            iterations = params.iterations,
            "stored entry"
        );
        Ok(token)
    }

    /// Open `token` with `passkey`, counting failures against `limiter`.
    ///
    /// A locked limiter rejects the call before any work is done. A wrong
    /// passkey and a tampered token are reported identically.
    ///
    /// # Errors
    ///
    /// - `VaultError::LockedOut` if the limiter is locked
    /// - `VaultError::InvalidInput` if the passkey is empty
    /// - `VaultError::MalformedToken` if the token cannot be decoded
    /// - `VaultError::WrongPasskey` if authentication fails; this is counted
    /// - `VaultError::MalformedToken` if the decrypted payload is not UTF-8;
    ///   the passkey was correct, so the failure count is still cleared
    pub fn retrieve(&self, limiter: &AttemptLimiter, token: &str, passkey: &str) -> Result<String> {
        let attempt = limiter.begin().inspect_err(|_| {
            warn!("retrieval refused: session is locked");
        })?;
        require_passkey(passkey)?;

        let params = self.config.kdf_params();
        let entry = VaultEntry::decode(token, params.salt_len)?;
        let key = derive_key(passkey, entry.salt(), &params)?;

        let plaintext = match decrypt(&key, entry.ciphertext()) {
            Ok(plaintext) => plaintext,
            Err(VaultError::AuthenticationFailure) => {
                let remaining = attempt.fail();
                warn!(remaining, "retrieval failed authentication");
                return Err(VaultError::WrongPasskey { remaining });
            }
            Err(err) => return Err(err),
        };

        // The passkey is proven once authentication succeeds.
        attempt.succeed();
        let text = std::str::from_utf8(&plaintext)
            .map_err(|_| VaultError::MalformedToken("payload is not UTF-8 text".to_string()))?
            .to_string();
        debug!(token_len = token.len(), "retrieved entry");
        Ok(text)
    }
}

fn require_passkey(passkey: &str) -> Result<()> {
    if passkey.is_empty() {
        return Err(VaultError::InvalidInput(
            "Passkey cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(feature = "async")]
mod blocking {
    use std::sync::Arc;

    use super::VaultService;
    use crate::error::{Result, VaultError};
    use crate::limiter::AttemptLimiter;

    impl VaultService {
        /// [`VaultService::store`] on tokio's blocking pool.
        ///
        /// Dropping the future does not stop the derivation; the result is
        /// discarded.
        pub async fn store_blocking(&self, plaintext: String, passkey: String) -> Result<String> {
            let service = self.clone();
            tokio::task::spawn_blocking(move || service.store(&plaintext, &passkey))
                .await
                .map_err(|e| VaultError::Crypto(format!("Blocking task failed: {}", e)))?
        }

        /// [`VaultService::retrieve`] on tokio's blocking pool.
        pub async fn retrieve_blocking(
            &self,
            limiter: Arc<AttemptLimiter>,
            token: String,
            passkey: String,
        ) -> Result<String> {
            let service = self.clone();
            tokio::task::spawn_blocking(move || service.retrieve(&limiter, &token, &passkey))
                .await
                .map_err(|e| VaultError::Crypto(format!("Blocking task failed: {}", e)))?
        }
    }
}
