//! Vault entries and their token encoding.
//!
//! A token is `base64url(salt || ciphertext)`. The salt length is fixed by
//! configuration (16 bytes by default), so the split is unambiguous.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::error::{Result, VaultError};

/// URL-safe base64 that writes padding but accepts tokens with or without it.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// One stored secret: the salt its key was derived with and the sealed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    salt: Vec<u8>,
    ciphertext: Vec<u8>,
}

impl VaultEntry {
    /// Create an entry from its parts.
    pub fn new(salt: Vec<u8>, ciphertext: Vec<u8>) -> Self {
        Self { salt, ciphertext }
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Encode as a single token string.
    ///
    /// ```
    /// use keepsake_core::VaultEntry;
    ///
    /// let entry = VaultEntry::new(vec![0u8; 16], b"sealed".to_vec());
    /// let token = entry.encode();
    /// assert_eq!(VaultEntry::decode(&token, 16).unwrap(), entry);
    /// ```
    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(self.salt.len() + self.ciphertext.len());
        raw.extend_from_slice(&self.salt);
        raw.extend_from_slice(&self.ciphertext);
        TOKEN_ENGINE.encode(raw)
    }

    /// Decode a token, splitting off the first `salt_len` bytes as the salt.
    ///
    /// Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::MalformedToken` if the token is not base64-url or
    /// decodes to fewer than `salt_len` bytes.
    pub fn decode(token: &str, salt_len: usize) -> Result<Self> {
        let raw = TOKEN_ENGINE
            .decode(token.trim())
            .map_err(|e| VaultError::MalformedToken(format!("not base64-url: {}", e)))?;

        if raw.len() < salt_len {
            return Err(VaultError::MalformedToken(format!(
                "decoded length {} is shorter than the {}-byte salt",
                raw.len(),
                salt_len
            )));
        }

        let mut salt = raw;
        let ciphertext = salt.split_off(salt_len);
        Ok(Self { salt, ciphertext })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_salt_then_ciphertext() {
        let entry = VaultEntry::new(vec![0xAA; 16], vec![1, 2, 3]);
        let raw = TOKEN_ENGINE.decode(entry.encode()).unwrap();

        assert_eq!(&raw[..16], &[0xAA; 16]);
        assert_eq!(&raw[16..], &[1, 2, 3]);
    }

    #[test]
    fn test_token_uses_url_safe_alphabet() {
        // 0xFB 0xFF encodes to characters that differ between the standard
        // and URL-safe alphabets.
        let entry = VaultEntry::new(vec![0xFB; 16], vec![0xFF; 5]);
        let token = entry.encode();

        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn test_decode_accepts_missing_padding_and_whitespace() {
        let entry = VaultEntry::new(vec![3; 16], vec![9; 4]);
        let token = entry.encode();
        assert!(token.ends_with('='));

        let unpadded = token.trim_end_matches('=');
        assert_eq!(VaultEntry::decode(unpadded, 16).unwrap(), entry);

        let pasted = format!("  {}\n", token);
        assert_eq!(VaultEntry::decode(&pasted, 16).unwrap(), entry);
    }

    #[test]
    fn test_decode_exactly_salt_length() {
        let entry = VaultEntry::new(vec![5; 16], Vec::new());
        let decoded = VaultEntry::decode(&entry.encode(), 16).unwrap();

        assert_eq!(decoded.salt(), &[5; 16]);
        assert!(decoded.ciphertext().is_empty());
    }

    #[test]
    fn test_decode_too_short() {
        let token = TOKEN_ENGINE.encode([0u8; 15]);
        let result = VaultEntry::decode(&token, 16);

        assert!(matches!(result, Err(VaultError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_not_base64() {
        let result = VaultEntry::decode("not base64 at all!", 16);
        assert!(matches!(result, Err(VaultError::MalformedToken(_))));

        let result = VaultEntry::decode("not-valid-base64", 16);
        assert!(matches!(result, Err(VaultError::MalformedToken(_))));
    }
}
