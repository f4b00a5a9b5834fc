// Copyright 2024-2026 todo-crypt Contributors
// SPDX-License-Identifier: Apache-2.0

//! Text Encryption Core
//!
//! AES-256-CBC with PKCS#7 padding over a per-session derived key.
//!
//! # Security
//! - A fresh 16-byte IV is drawn from the OS CSPRNG for every call
//! - CBC carries no authentication tag; a wrong key is detected only
//!   through padding validation or invalid UTF-8 in the output
//! - Key material is zeroed on drop via `zeroize`

use aes::cipher::{
    block_padding::Pkcs7, generic_array::GenericArray, BlockDecryptMut, BlockEncryptMut, KeyIvInit,
};
use thiserror::Error;
use zeroize::Zeroizing;

/// Derived key size (256 bits)
pub const KEY_SIZE: usize = 32;
/// IV size (one AES block)
pub const IV_SIZE: usize = 16;
/// AES block size
pub const BLOCK_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encryption error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncryptionError {
    #[error("ENCRYPTION_MASTER_KEY environment variable is required")]
    MasterKeyMissing,
    #[error("ENCRYPTION_MASTER_KEY must be at least 64 characters (256 bits), got {length}")]
    MasterKeyTooShort { length: usize },
    #[error("Invalid encrypted data format")]
    InvalidFormat,
    #[error("Invalid encrypted data format: IV must be 16 bytes, got {length}")]
    InvalidIv { length: usize },
    #[error("Invalid encrypted data format: {0}")]
    InvalidHex(String),
    #[error("Decryption failed: wrong session token or corrupted ciphertext")]
    DecryptionFailed,
    #[error("Encryption task failed: {0}")]
    TaskFailed(String),
}

impl EncryptionError {
    /// Master key absent or misconfigured. Needs operator intervention.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MasterKeyMissing | Self::MasterKeyTooShort { .. })
    }

    /// Input to decrypt was not an `iv:ciphertext` hex payload.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat | Self::InvalidIv { .. } | Self::InvalidHex(_)
        )
    }
}

/// Text cipher bound to a single derived key.
pub struct TextCipher {
    key: Zeroizing<[u8; KEY_SIZE]>,
}

impl TextCipher {
    /// Create a cipher over an already-derived key
    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    /// Encrypt UTF-8 text under a fresh random IV. Returns (iv, ciphertext).
    pub fn encrypt(&self, plaintext: &str) -> ([u8; IV_SIZE], Vec<u8>) {
        let iv = Self::generate_iv();
        let ciphertext = self.encrypt_with_iv(&iv, plaintext.as_bytes());
        (iv, ciphertext)
    }

    /// Decrypt to UTF-8 text. Never returns partial output.
    pub fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<String, EncryptionError> {
        let iv: &[u8; IV_SIZE] = iv
            .try_into()
            .map_err(|_| EncryptionError::InvalidIv { length: iv.len() })?;
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(EncryptionError::DecryptionFailed);
        }

        let key = GenericArray::from_slice(self.key.as_slice());
        let plaintext = Aes256CbcDec::new(key, GenericArray::from_slice(&iv[..]))
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| EncryptionError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| EncryptionError::DecryptionFailed)
    }

    /// Deterministic encryption for known-answer checks.
    pub(crate) fn encrypt_with_iv(&self, iv: &[u8; IV_SIZE], plaintext: &[u8]) -> Vec<u8> {
        let key = GenericArray::from_slice(self.key.as_slice());
        Aes256CbcEnc::new(key, GenericArray::from_slice(&iv[..]))
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
    }

    /// Generate random IV using CSPRNG.
    fn generate_iv() -> [u8; IV_SIZE] {
        use rand::RngCore;
        let mut iv = [0u8; IV_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut iv[..]);
        iv
    }
}

impl std::fmt::Debug for TextCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextCipher").field("key", &"<redacted>").finish()
    }
}
