//! End-to-end tests for the environment-configured service.
//!
//! The master key is process-global, so every test holds `ENV_LOCK`.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use todo_crypt::security::{migration, DECRYPTION_FAILED_PLACEHOLDER};
use todo_crypt::{EncryptionError, EncryptionService};

const MASTER_KEY_ENV: &str = "ENCRYPTION_MASTER_KEY";
const MASTER_KEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
const TOKEN: &str = "abcd1234efgh5678ijkl9012mnop3456qrst7890uvwx1234yzab5678cdef9012";

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn with_master_key() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    std::env::set_var(MASTER_KEY_ENV, MASTER_KEY);
    guard
}

fn is_payload_shape(s: &str) -> bool {
    let Some((iv, ct)) = s.split_once(':') else {
        return false;
    };
    let lower_hex = |p: &str| !p.is_empty() && p.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    iv.len() == 32 && lower_hex(iv) && lower_hex(ct)
}

#[test]
fn test_hello_world_scenario() {
    let _guard = with_master_key();
    let encrypted = EncryptionService::encrypt("Hello, World!", TOKEN).unwrap();
    assert!(is_payload_shape(&encrypted), "unexpected payload: {}", encrypted);
    assert_eq!(EncryptionService::decrypt(&encrypted, TOKEN).unwrap(), "Hello, World!");
}

#[test]
fn test_round_trip_law() {
    let _guard = with_master_key();
    let samples = [
        "",
        " ",
        "!@#$%^&*()_+-=[]{}|;:,.<>?/~`\n\t",
        "caf\u{e9} \u{65e5}\u{672c}\u{8a9e} \u{1F44D}\u{1F3FD}",
        "\r\n\u{7}\u{1b}[0m",
    ];
    let tokens = ["", "short", TOKEN];
    for token in tokens {
        for sample in samples {
            let encrypted = EncryptionService::encrypt(sample, token).unwrap();
            assert!(EncryptionService::is_encrypted(&encrypted));
            assert_eq!(EncryptionService::decrypt(&encrypted, token).unwrap(), sample);
        }
    }
}

#[test]
fn test_non_determinism() {
    let _guard = with_master_key();
    let a = EncryptionService::encrypt("same", TOKEN).unwrap();
    let b = EncryptionService::encrypt("same", TOKEN).unwrap();
    assert_ne!(a, b);
    assert_eq!(EncryptionService::decrypt(&a, TOKEN).unwrap(), "same");
    assert_eq!(EncryptionService::decrypt(&b, TOKEN).unwrap(), "same");
}

#[test]
fn test_wrong_token_fails() {
    let _guard = with_master_key();
    let encrypted = EncryptionService::encrypt("Hello, World!", TOKEN).unwrap();
    let wrong = "wrong1234token5678here9012abcd3456efgh7890ijkl1234mnop5678qrst9012";
    let result = EncryptionService::decrypt(&encrypted, wrong);
    assert!(result.is_err());
    assert_ne!(result.ok().as_deref(), Some("Hello, World!"));
}

#[test]
fn test_format_rejection() {
    let _guard = with_master_key();
    for token in ["", TOKEN] {
        let err = EncryptionService::decrypt("invalid-format", token).unwrap_err();
        assert_eq!(err.to_string(), "Invalid encrypted data format");
        assert!(err.is_format());
    }
}

#[test]
fn test_is_encrypted_heuristic() {
    let _guard = with_master_key();
    let encrypted = EncryptionService::encrypt("test", TOKEN).unwrap();
    assert!(EncryptionService::is_encrypted(&encrypted));
    assert!(!EncryptionService::is_encrypted("plain text"));
    assert!(!EncryptionService::is_encrypted("onlyonepart"));
    assert!(!EncryptionService::is_encrypted("short:hex"));
    assert!(!EncryptionService::is_encrypted("nonhex:characters!"));
}

#[test]
fn test_token_uniqueness() {
    let tokens: HashSet<String> = (0..1000)
        .map(|_| EncryptionService::generate_session_token())
        .collect();
    assert_eq!(tokens.len(), 1000);
    for token in &tokens {
        assert_eq!(token.len(), 64);
        assert!(token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }
}

#[test]
fn test_master_key_validation() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());

    std::env::remove_var(MASTER_KEY_ENV);
    let err = EncryptionService::encrypt("anything", "anything").unwrap_err();
    assert_eq!(err, EncryptionError::MasterKeyMissing);
    assert!(err.to_string().contains("ENCRYPTION_MASTER_KEY environment variable is required"));

    std::env::set_var(MASTER_KEY_ENV, "short");
    let err = EncryptionService::encrypt("anything", "anything").unwrap_err();
    assert!(err.to_string().contains("at least 64 characters"));

    std::env::set_var(MASTER_KEY_ENV, &MASTER_KEY[..63]);
    assert!(EncryptionService::encrypt("anything", "anything").unwrap_err().is_configuration());

    std::env::set_var(MASTER_KEY_ENV, MASTER_KEY);
    assert!(EncryptionService::encrypt("anything", "anything").is_ok());
}

#[test]
fn test_legacy_records_migrate() {
    let _guard = with_master_key();
    let stored = ["legacy plaintext todo", "meeting at 10:30"];
    for legacy in stored {
        assert_eq!(migration::reveal(legacy, TOKEN).unwrap(), legacy);
        let sealed = migration::seal(legacy, TOKEN).unwrap();
        assert!(EncryptionService::is_encrypted(&sealed));
        assert_eq!(migration::reveal(&sealed, TOKEN).unwrap(), legacy);
        assert_eq!(
            migration::reveal_or_placeholder(&sealed, "someone-else"),
            DECRYPTION_FAILED_PLACEHOLDER
        );
    }
}

#[test]
fn test_payload_shaped_user_text_is_encrypted_at_rest() {
    let _guard = with_master_key();
    let user_text = "deadbeefdeadbeefdeadbeefdeadbeef:cafe";
    let sealed = migration::seal(user_text, TOKEN).unwrap();
    assert_ne!(sealed, user_text);
    assert_eq!(migration::reveal_or_placeholder(&sealed, TOKEN), user_text);
}
