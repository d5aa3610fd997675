//! Authenticated encryption with XChaCha20-Poly1305.
//!
//! Key size: 32 bytes. Nonce: 24 bytes (random per call). Tag: 16 bytes.
//!
//! Output layout:
//!   [ nonce (24 bytes) | ciphertext + tag ]

use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    XChaCha20Poly1305, XNonce,
};
use zeroize::Zeroizing;

use super::key::DerivedKey;
use crate::error::{Result, VaultError};

/// XChaCha20 nonce length.
pub const NONCE_LENGTH: usize = 24;

/// Poly1305 tag length.
pub const TAG_LENGTH: usize = 16;

/// Encrypt `plaintext`, prepending a fresh random nonce.
pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Crypto(format!("Invalid key: {}", e)))?;

    let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| VaultError::Crypto("Encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt `nonce || ciphertext+tag` produced by [`encrypt`].
///
/// # Errors
///
/// Returns `VaultError::AuthenticationFailure` if the data is truncated, was
/// modified, or was sealed under a different key. The three cases are not
/// distinguished.
pub fn decrypt(key: &DerivedKey, data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if data.len() < NONCE_LENGTH + TAG_LENGTH {
        return Err(VaultError::AuthenticationFailure);
    }
    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LENGTH);
    let nonce = XNonce::from_slice(nonce_bytes);

    let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Crypto(format!("Invalid key: {}", e)))?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::AuthenticationFailure)?;

    Ok(Zeroizing::new(plaintext))
}
