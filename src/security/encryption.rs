// Copyright 2024-2026 todo-crypt Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-session text encryption service.
//!
//! Split into sub-modules:
//! - `encryption_core`: AES-256-CBC cipher and error type
//! - `encryption_key`: master key validation and PBKDF2 derivation
//! - `payload`: `iv:ciphertext` wire format

pub use super::encryption_core::*;
pub use super::encryption_key::{
    derive_session_cipher, MasterKey, MASTER_KEY_ENV, MIN_MASTER_KEY_LENGTH, PBKDF2_ITERATIONS,
    SALT,
};
pub use super::payload::EncryptedPayload;

use super::payload;
use super::session;

/// Stateless encryption service. Every call re-resolves the master key and
/// re-derives the session key; nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncryptionService;

impl EncryptionService {
    /// 32 random bytes as 64 lowercase hex characters.
    pub fn generate_session_token() -> String {
        session::generate_session_token()
    }

    /// Encrypt under the key derived from `ENCRYPTION_MASTER_KEY` + `session_token`.
    pub fn encrypt(plaintext: &str, session_token: &str) -> Result<String, EncryptionError> {
        let master = MasterKey::from_env()?;
        Self::encrypt_with(&master, plaintext, session_token)
    }

    /// Decrypt a payload produced by [`EncryptionService::encrypt`].
    pub fn decrypt(encrypted: &str, session_token: &str) -> Result<String, EncryptionError> {
        let parsed = EncryptedPayload::parse(encrypted)?;
        let master = MasterKey::from_env()?;
        Self::decrypt_payload(&master, &parsed, session_token)
    }

    /// Whether `text` has the shape of an encrypted payload.
    pub fn is_encrypted(text: &str) -> bool {
        let encrypted = payload::looks_encrypted(text);
        tracing::trace!(encrypted, len = text.len(), "encrypted payload check");
        encrypted
    }

    /// Encrypt with an explicitly supplied master key.
    pub fn encrypt_with(
        master: &MasterKey,
        plaintext: &str,
        session_token: &str,
    ) -> Result<String, EncryptionError> {
        let cipher = derive_session_cipher(master, session_token);
        let (iv, ciphertext) = cipher.encrypt(plaintext);
        tracing::debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "encrypted text"
        );
        Ok(EncryptedPayload::new(iv, ciphertext).encode())
    }

    /// Decrypt with an explicitly supplied master key.
    pub fn decrypt_with(
        master: &MasterKey,
        encrypted: &str,
        session_token: &str,
    ) -> Result<String, EncryptionError> {
        let parsed = EncryptedPayload::parse(encrypted)?;
        Self::decrypt_payload(master, &parsed, session_token)
    }

    fn decrypt_payload(
        master: &MasterKey,
        parsed: &EncryptedPayload,
        session_token: &str,
    ) -> Result<String, EncryptionError> {
        let cipher = derive_session_cipher(master, session_token);
        let plaintext = cipher.decrypt(&parsed.iv, &parsed.ciphertext)?;
        tracing::debug!(ciphertext_len = parsed.ciphertext.len(), "decrypted text");
        Ok(plaintext)
    }
}

#[cfg(test)]
#[path = "encryption_tests.rs"]
mod tests;
