//! Session token generation and request plumbing.

/// Random bytes in a session token (256 bits).
pub const SESSION_TOKEN_BYTES: usize = 32;
/// Token used by the API layer when a request carries none.
pub const DEFAULT_SESSION_TOKEN: &str = "default";

const BEARER_PREFIX: &str = "Bearer ";

/// Generate a cryptographically secure session token: 64 lowercase hex chars.
pub fn generate_session_token() -> String {
    use rand::RngCore;
    let mut random_bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(random_bytes.as_mut_slice());
    hex::encode(random_bytes)
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn session_token_from_header(header: &str) -> Option<&str> {
    header.strip_prefix(BEARER_PREFIX)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
