// Copyright 2024-2026 todo-crypt Contributors
// SPDX-License-Identifier: Apache-2.0

//! Security module: per-session text encryption, session tokens and
//! legacy-record migration.

pub mod encryption;
pub mod migration;
pub mod payload;
pub mod session;

mod encryption_core;
mod encryption_key;

pub use encryption::{EncryptedPayload, EncryptionError, EncryptionService, MasterKey};
pub use migration::{reveal, reveal_or_placeholder, seal, DECRYPTION_FAILED_PLACEHOLDER};
pub use session::{generate_session_token, session_token_from_header, DEFAULT_SESSION_TOKEN};
