// Copyright 2024-2026 todo-crypt Contributors
// SPDX-License-Identifier: Apache-2.0

//! Master key resolution and per-session key derivation.
//!
//! The per-session key is PBKDF2-HMAC-SHA256 over the master key
//! concatenated with the session token. Salt and iteration count are
//! fixed and shared by every session. A per-token salt would be stronger
//! against precomputation across many tokens under one master key, but
//! existing stored payloads depend on these exact parameters.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use super::encryption_core::{EncryptionError, TextCipher, KEY_SIZE};

/// Environment variable holding the master key.
pub const MASTER_KEY_ENV: &str = "ENCRYPTION_MASTER_KEY";
/// Minimum master key length, in UTF-16 code units (the unit existing
/// deployments validated against).
pub const MIN_MASTER_KEY_LENGTH: usize = 64;
/// Fixed PBKDF2 salt shared by all sessions.
pub const SALT: &[u8] = b"todoapp-salt";
/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Validated process-wide master secret.
pub struct MasterKey(Zeroizing<String>);

impl MasterKey {
    /// Validate a master key obtained from any configuration source.
    pub fn new(value: impl Into<String>) -> Result<Self, EncryptionError> {
        let value = Zeroizing::new(value.into());
        if value.is_empty() {
            return Err(EncryptionError::MasterKeyMissing);
        }
        let length = utf16_len(&value);
        if length < MIN_MASTER_KEY_LENGTH {
            return Err(EncryptionError::MasterKeyTooShort { length });
        }
        Ok(Self(value))
    }

    /// Read and validate `ENCRYPTION_MASTER_KEY`. Not cached.
    pub fn from_env() -> Result<Self, EncryptionError> {
        match std::env::var(MASTER_KEY_ENV) {
            Ok(value) => Self::new(value),
            // A non-UTF-8 value cannot be used as derivation input either.
            Err(_) => Err(EncryptionError::MasterKeyMissing),
        }
    }

    /// Length in UTF-16 code units.
    pub(crate) fn len(&self) -> usize {
        utf16_len(&self.0)
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Derive the raw session key bytes.
pub fn derive_key_bytes(master: &MasterKey, session_token: &str) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut input = Zeroizing::new(Vec::with_capacity(
        master.as_bytes().len() + session_token.len(),
    ));
    input.extend_from_slice(master.as_bytes());
    input.extend_from_slice(session_token.as_bytes());

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2_hmac::<Sha256>(&input, SALT, PBKDF2_ITERATIONS, &mut key[..]);
    key
}

/// Derive a cipher bound to one session.
pub fn derive_session_cipher(master: &MasterKey, session_token: &str) -> TextCipher {
    let mut key = *derive_key_bytes(master, session_token);
    let cipher = TextCipher::new(key);
    key.zeroize();
    tracing::debug!(
        iterations = PBKDF2_ITERATIONS,
        token_len = session_token.len(),
        "derived session key"
    );
    cipher
}

#[cfg(test)]
#[path = "encryption_key_tests.rs"]
mod tests;
