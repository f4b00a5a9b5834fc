// Copyright 2024-2026 todo-crypt Contributors
// SPDX-License-Identifier: Apache-2.0

//! Stored representation of encrypted text: `<iv hex>:<ciphertext hex>`.

use super::encryption_core::{EncryptionError, IV_SIZE};

/// Separator between IV and ciphertext.
pub const SEPARATOR: char = ':';
/// Hex length of the IV component.
pub const IV_HEX_LEN: usize = IV_SIZE * 2;

/// Decoded `iv:ciphertext` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    pub iv: [u8; IV_SIZE],
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    pub fn new(iv: [u8; IV_SIZE], ciphertext: Vec<u8>) -> Self {
        Self { iv, ciphertext }
    }

    /// Parse a stored payload strictly.
    pub fn parse(text: &str) -> Result<Self, EncryptionError> {
        let (iv_hex, ct_hex) = split_components(text).ok_or(EncryptionError::InvalidFormat)?;

        let iv_bytes = hex::decode(iv_hex).map_err(|e| EncryptionError::InvalidHex(e.to_string()))?;
        let iv: [u8; IV_SIZE] = iv_bytes
            .as_slice()
            .try_into()
            .map_err(|_| EncryptionError::InvalidIv { length: iv_bytes.len() })?;
        let ciphertext =
            hex::decode(ct_hex).map_err(|e| EncryptionError::InvalidHex(e.to_string()))?;

        Ok(Self { iv, ciphertext })
    }

    /// Lowercase hex wire form.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(IV_HEX_LEN + 1 + self.ciphertext.len() * 2);
        out.push_str(&hex::encode(self.iv));
        out.push(SEPARATOR);
        out.push_str(&hex::encode(&self.ciphertext));
        out
    }
}

impl std::fmt::Display for EncryptedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl std::str::FromStr for EncryptedPayload {
    type Err = EncryptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Format heuristic: two non-empty hex components, the first exactly 32
/// characters long. Never fails. Plaintext that happens to match the
/// pattern is misclassified.
pub fn looks_encrypted(text: &str) -> bool {
    let Some((iv_hex, ct_hex)) = split_components(text) else {
        return false;
    };
    iv_hex.len() == IV_HEX_LEN && is_hex(iv_hex) && is_hex(ct_hex)
}

/// Exactly two non-empty components.
fn split_components(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.split(SEPARATOR);
    let first = parts.next()?;
    let second = parts.next()?;
    if parts.next().is_some() || first.is_empty() || second.is_empty() {
        return None;
    }
    Some((first, second))
}

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
