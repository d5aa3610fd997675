//! # Keepsake Core
//!
//! Core library for Keepsake - a passkey-based encryption vault.
//!
//! Plaintext goes in together with a passkey and comes out as a single opaque
//! token. The token can be opened again only with the same passkey. Neither
//! the passkey nor any key material is stored anywhere.
//!
//! ## Architecture
//!
//! - **crypto**: PBKDF2 key derivation and XChaCha20-Poly1305 encryption
//! - **token**: the `base64url(salt || ciphertext)` token format
//! - **limiter**: per-session brute-force lockout
//! - **service**: the `store` / `retrieve` facade tying it all together
//! - **config**: thresholds and KDF cost
//!
//! ## Example
//!
//! ```
//! use keepsake_core::{VaultError, VaultService};
//!
//! let vault = VaultService::default();
//! let session = vault.new_limiter();
//!
//! let token = vault.store("hello world", "p@ss1").unwrap();
//! assert_eq!(vault.retrieve(&session, &token, "p@ss1").unwrap(), "hello world");
//!
//! let err = vault.retrieve(&session, &token, "wrong").unwrap_err();
//! assert_eq!(err, VaultError::WrongPasskey { remaining: 2 });
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod limiter;
pub mod service;
pub mod token;

pub use config::VaultConfig;
pub use error::{Result, VaultError};
pub use limiter::{Attempt, AttemptLimiter};
pub use service::VaultService;
pub use token::VaultEntry;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
