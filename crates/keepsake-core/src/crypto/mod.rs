//! Cryptographic operations for Keepsake.
//!
//! This module provides key derivation and authenticated encryption using
//! well-audited RustCrypto crates:
//! - **PBKDF2-HMAC-SHA256**: slow, iterated key derivation from a passkey
//! - **XChaCha20-Poly1305**: authenticated encryption with random nonces
//!
//! ## Security Model
//!
//! - A fresh random salt per entry; the key is re-derived on every call
//! - Passkey correctness is proven only by successful authenticated decryption
//! - Key material and decrypted plaintext are zeroized on drop
//! - No passkeys or passkey hashes are stored
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of a token
//! - Offline brute-force attacks on the passkey
//! - Tampering with a token
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to process memory while a call is running

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt};
pub use key::{derive_key, generate_salt, DerivedKey, KdfParams, KEY_LENGTH};
