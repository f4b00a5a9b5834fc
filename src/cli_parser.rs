//! CLI argument parsing and help text for todo-crypt.

/// Arguments of `encrypt`, `decrypt` and `reveal`.
#[derive(Debug, PartialEq, Eq)]
pub struct TokenArgs {
    pub token: String,
    pub input: String,
}

/// Parse `--token <TOKEN> <INPUT>` in either order.
pub fn parse_token_args(args: &[String]) -> Result<TokenArgs, String> {
    let mut token = None;
    let mut input = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--token" => {
                if i + 1 < args.len() {
                    token = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    return Err("Missing value for --token".to_string());
                }
            }
            "--" => {
                if i + 1 < args.len() && input.is_none() {
                    input = Some(args[i + 1..].join(" "));
                }
                break;
            }
            other => {
                if input.is_some() {
                    return Err(format!("Unexpected argument: {}", other));
                }
                input = Some(other.to_string());
                i += 1;
            }
        }
    }

    let token = token.ok_or_else(|| "Missing required --token".to_string())?;
    let input = input.ok_or_else(|| "Missing input argument".to_string())?;
    Ok(TokenArgs { token, input })
}

/// Print general usage information.
pub fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "todo-crypt - per-session encryption for todo text v{}

USAGE:
    todo-crypt-cli [COMMAND] [OPTIONS]

COMMANDS:
    token        Generate a new session token
    encrypt      Encrypt text for a session
    decrypt      Decrypt a stored payload for a session
    reveal       Decrypt a stored value, passing legacy plaintext through
    check        Report whether text is an encrypted payload
    config       Show configuration (master key value is never printed)
    self-test    Run cryptographic self-tests
    version      Show version information
    help         Show this help message

EXAMPLES:
    todo-crypt-cli token
    todo-crypt-cli encrypt --token <TOKEN> \"Buy milk\"
    todo-crypt-cli decrypt --token <TOKEN> <IV_HEX>:<CIPHERTEXT_HEX>
    todo-crypt-cli check \"Buy milk\"

ENVIRONMENT:
    ENCRYPTION_MASTER_KEY   Master secret, at least 64 characters
    RUST_LOG                Log level (debug, info, warn, error)
    TODO_CRYPT_LOG_FORMAT   Set to 'json' for JSON log lines
    NODE_ENV                Environment (development, staging, production)

EXIT CODES:
    0  Success
    1  Failure
    2  Configuration error
",
        version
    );
}

/// Print detailed help for a specific command.
pub fn print_command_help(command: &str) {
    match command {
        "token" => print_token_help(),
        "encrypt" => print_encrypt_help(),
        "decrypt" => print_decrypt_help(),
        "reveal" => print_reveal_help(),
        "check" => print_check_help(),
        "config" => print_config_help(),
        _ => {
            eprintln!(
                "No detailed help available for '{}'. Use 'todo-crypt-cli help' for general usage.",
                command
            );
        }
    }
}

fn print_token_help() {
    eprintln!(
        "todo-crypt-cli token - Generate a session token

USAGE:
    todo-crypt-cli token

DESCRIPTION:
    Prints 64 lowercase hex characters (256 bits from the OS CSPRNG).
"
    );
}

fn print_encrypt_help() {
    eprintln!(
        "todo-crypt-cli encrypt - Encrypt text

USAGE:
    todo-crypt-cli encrypt --token <TOKEN> <TEXT>

OPTIONS:
    --token <TOKEN>  Session token the key is derived from

EXIT CODES:
    0  Payload printed as <iv hex>:<ciphertext hex>
    2  ENCRYPTION_MASTER_KEY missing or too short
"
    );
}

fn print_decrypt_help() {
    eprintln!(
        "todo-crypt-cli decrypt - Decrypt a payload

USAGE:
    todo-crypt-cli decrypt --token <TOKEN> <PAYLOAD>

OPTIONS:
    --token <TOKEN>  Session token used at encryption time

EXIT CODES:
    0  Plaintext printed
    1  Invalid format, wrong token or corrupted ciphertext
    2  ENCRYPTION_MASTER_KEY missing or too short
"
    );
}

fn print_reveal_help() {
    eprintln!(
        "todo-crypt-cli reveal - Read a stored value

USAGE:
    todo-crypt-cli reveal --token <TOKEN> <STORED>

DESCRIPTION:
    Decrypts encrypted payloads; legacy plaintext is printed unchanged.
"
    );
}

fn print_check_help() {
    eprintln!(
        "todo-crypt-cli check - Detect encrypted payloads

USAGE:
    todo-crypt-cli check <TEXT>

DESCRIPTION:
    Prints 'encrypted' or 'plaintext'. Format check only; nothing is decrypted.
"
    );
}

fn print_config_help() {
    eprintln!(
        "todo-crypt-cli config - Show configuration

USAGE:
    todo-crypt-cli config [--json]

EXIT CODES:
    0  Master key is usable
    2  Master key missing or too short
"
    );
}
