//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every entry carries its own random salt, and the key is re-derived from
//! passkey + salt on every encrypt and decrypt. Keys are never cached.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, VaultError};

/// Length of derived key in bytes (256 bits, the XChaCha20-Poly1305 key size).
pub const KEY_LENGTH: usize = 32;

/// Cost and shape of a key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// PBKDF2 rounds.
    pub iterations: u32,
    /// Exact salt length expected, in bytes.
    pub salt_len: usize,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: crate::config::DEFAULT_KDF_ITERATIONS,
            salt_len: crate::config::DEFAULT_SALT_LENGTH,
        }
    }
}

/// A symmetric key derived from a passkey.
///
/// Key material is zeroized when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passkey and salt.
///
/// # Arguments
///
/// * `passkey` - The user's passkey
/// * `salt` - Per-entry random salt, exactly `params.salt_len` bytes
/// * `params` - Iteration count and salt length
///
/// # Security
///
/// - Same passkey + salt always produces the same key
/// - A different salt produces an unrelated key, so two entries sharing a
///   passkey are unlinkable
///
/// # Examples
///
/// ```
/// use keepsake_core::crypto::{derive_key, KdfParams};
///
/// let salt = [7u8; 16];
/// let key = derive_key("my-passkey", &salt, &KdfParams::default()).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(passkey: &str, salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    if salt.len() != params.salt_len {
        return Err(VaultError::InvalidInput(format!(
            "Salt must be exactly {} bytes (got {})",
            params.salt_len,
            salt.len()
        )));
    }

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(passkey.as_bytes(), salt, params.iterations, &mut key_bytes);

    Ok(DerivedKey::from_bytes(key_bytes))
}

/// Fill a new salt of `len` bytes from the operating system CSPRNG.
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    getrandom::getrandom(&mut salt)
        .map_err(|e| VaultError::Crypto(format!("Failed to generate salt: {}", e)))?;
    Ok(salt)
}
