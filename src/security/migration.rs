//! Read/write helpers for stores that still hold legacy plaintext records.

use super::encryption::{EncryptionError, EncryptionService, MasterKey};

/// Shown in place of text that could not be decrypted.
pub const DECRYPTION_FAILED_PLACEHOLDER: &str = "[Decryption Failed]";

/// Decrypt a stored value, passing legacy plaintext through unchanged.
pub fn reveal(stored: &str, session_token: &str) -> Result<String, EncryptionError> {
    if !EncryptionService::is_encrypted(stored) {
        return Ok(stored.to_string());
    }
    EncryptionService::decrypt(stored, session_token)
}

/// Like [`reveal`], with an explicit master key.
pub fn reveal_with(
    master: &MasterKey,
    stored: &str,
    session_token: &str,
) -> Result<String, EncryptionError> {
    if !EncryptionService::is_encrypted(stored) {
        return Ok(stored.to_string());
    }
    EncryptionService::decrypt_with(master, stored, session_token)
}

/// Display policy: any decryption failure becomes the placeholder.
pub fn reveal_or_placeholder(stored: &str, session_token: &str) -> String {
    reveal(stored, session_token).unwrap_or_else(|_| DECRYPTION_FAILED_PLACEHOLDER.to_string())
}

/// Encrypt for storage. Always encrypts: the payload-shape check is a
/// read-side heuristic and user text may legitimately look like a payload.
pub fn seal(text: &str, session_token: &str) -> Result<String, EncryptionError> {
    EncryptionService::encrypt(text, session_token)
}

/// Like [`seal`], with an explicit master key.
pub fn seal_with(
    master: &MasterKey,
    text: &str,
    session_token: &str,
) -> Result<String, EncryptionError> {
    EncryptionService::encrypt_with(master, text, session_token)
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
