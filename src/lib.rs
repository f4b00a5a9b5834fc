// Copyright 2024-2026 todo-crypt Contributors
// SPDX-License-Identifier: Apache-2.0

//! todo-crypt: per-session encryption of todo text at rest.
//!
//! Each user's text is encrypted under a key derived from a process-wide
//! master secret and that user's opaque session token. The service holds
//! no state; every call re-derives its key.

pub mod blocking;
pub mod config;
pub mod security;

pub use security::{
    generate_session_token, EncryptedPayload, EncryptionError, EncryptionService, MasterKey,
};

/// Serializes tests that mutate the process environment.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
