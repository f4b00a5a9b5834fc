//! todo-crypt CLI entry point.
//!
//! Operator tooling around the encryption service: mint session tokens,
//! encrypt and decrypt stored text, inspect configuration.

mod cli_parser;

use std::process::ExitCode;

use todo_crypt::config::AppConfig;
use todo_crypt::security::{migration, self_tests};
use todo_crypt::{EncryptionError, EncryptionService};

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match command {
        "token" => {
            println!("{}", EncryptionService::generate_session_token());
            ExitCode::SUCCESS
        }
        "encrypt" => run_with_token(&args, "encrypt", EncryptionService::encrypt),
        "decrypt" => run_with_token(&args, "decrypt", EncryptionService::decrypt),
        "reveal" => run_with_token(&args, "reveal", migration::reveal),
        "check" => run_check(&args),
        "config" => run_config(&args),
        "self-test" => match self_tests::run_power_on_self_tests() {
            Ok(()) => {
                println!("Self-tests: PASSED");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Self-tests FAILED: {}", e);
                ExitCode::from(EXIT_FAILURE)
            }
        },
        "help" | "--help" | "-h" => {
            if let Some(sub) = args.get(2) {
                cli_parser::print_command_help(sub);
            } else {
                cli_parser::print_usage();
            }
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("todo-crypt {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            cli_parser::print_usage();
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("TODO_CRYPT_LOG_FORMAT").is_ok_and(|v| v == "json");
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Shared driver for `<command> --token T <INPUT>`.
fn run_with_token<F>(args: &[String], command: &str, op: F) -> ExitCode
where
    F: FnOnce(&str, &str) -> Result<String, EncryptionError>,
{
    let parsed = match cli_parser::parse_token_args(&args[2..]) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            cli_parser::print_command_help(command);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = self_tests::run_power_on_self_tests() {
        eprintln!("Self-test FAILED: {}", e);
        eprintln!("Cryptographic operations disabled.");
        return ExitCode::from(EXIT_FAILURE);
    }

    match op(&parsed.input, &parsed.token) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_configuration() => {
            eprintln!("Configuration error: {}", e);
            ExitCode::from(EXIT_CONFIG)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run_check(args: &[String]) -> ExitCode {
    let Some(text) = args.get(2) else {
        eprintln!("Missing TEXT argument");
        cli_parser::print_command_help("check");
        return ExitCode::FAILURE;
    };
    if EncryptionService::is_encrypted(text) {
        println!("encrypted");
    } else {
        println!("plaintext");
    }
    ExitCode::SUCCESS
}

fn run_config(args: &[String]) -> ExitCode {
    let config = AppConfig::load();
    let json = args.get(2).map(|s| s.as_str()) == Some("--json");

    if json {
        match serde_json::to_string_pretty(&config) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_FAILURE);
            }
        }
    } else {
        println!("environment:   {}", config.environment);
        println!("port:          {}", config.port);
        println!("database uri:  {}", config.database.connection_string);
        println!("database name: {}", config.database.database_name);
        if let Some(port) = config.database.port {
            println!("database port: {}", port);
        }
        println!("master key:    {:?}", config.master_key);
    }

    if config.master_key.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_CONFIG)
    }
}
