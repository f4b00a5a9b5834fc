//! Async wrappers for request handlers.
//!
//! Key derivation runs 100,000 PBKDF2 iterations per call, so these run the
//! work on tokio's blocking pool instead of the async worker threads.

use crate::security::encryption::{EncryptionError, EncryptionService};

/// [`EncryptionService::encrypt`] on the blocking pool.
pub async fn encrypt_async(
    plaintext: impl Into<String>,
    session_token: impl Into<String>,
) -> Result<String, EncryptionError> {
    let plaintext = plaintext.into();
    let session_token = session_token.into();
    tokio::task::spawn_blocking(move || EncryptionService::encrypt(&plaintext, &session_token))
        .await
        .map_err(|e| EncryptionError::TaskFailed(e.to_string()))?
}

/// [`EncryptionService::decrypt`] on the blocking pool.
pub async fn decrypt_async(
    encrypted: impl Into<String>,
    session_token: impl Into<String>,
) -> Result<String, EncryptionError> {
    let encrypted = encrypted.into();
    let session_token = session_token.into();
    tokio::task::spawn_blocking(move || EncryptionService::decrypt(&encrypted, &session_token))
        .await
        .map_err(|e| EncryptionError::TaskFailed(e.to_string()))?
}

#[cfg(test)]
#[path = "blocking_tests.rs"]
mod tests;
