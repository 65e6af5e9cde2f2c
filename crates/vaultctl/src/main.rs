//! `vaultctl` — command-line driver for the password vault engine.
//!
//! Parses arguments, prompts for secrets without echoing them, opens or
//! creates the requested vault, and renders results or errors for a human
//! operator. Holds no vault state across invocations — every subcommand is
//! a single open-act-persist cycle.

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use vault_engine::{VaultError, VaultHandle};
use zeroize::Zeroize;

/// Passphrase length ceiling enforced at the prompt boundary, not by the engine.
const MAX_PASSPHRASE_LEN: usize = 32;
/// Record-name length ceiling enforced at the prompt boundary, not by the engine.
const MAX_NAME_LEN: usize = 31;
/// Generated-password length bounds, matching `vault_crypto::password::MAX_LENGTH`.
const MIN_PASS_SIZE: usize = 1;
const MAX_PASS_SIZE: usize = 10_000;

#[derive(Parser)]
#[command(name = "vaultctl", version, about = "Local encrypted password vault")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new, empty vault file.
    Create { path: PathBuf },
    /// Open a vault and print its summary.
    Open { path: PathBuf },
    /// Print a vault's summary (filename, record count, last edit).
    Info { path: PathBuf },
    /// List every record name stored in a vault.
    List { path: PathBuf },
    /// Print the password stored under a record name.
    Get { path: PathBuf, name: String },
    /// Generate and store a new password under a record name.
    Add { path: PathBuf, name: String },
    /// Delete a record from a vault.
    Remove { path: PathBuf, name: String },
}

/// Errors the driver itself can produce, on top of whatever the engine
/// reports. Kept separate from `VaultError` so a usage mistake (a
/// passphrase that's too long, an out-of-range password length) never gets
/// rendered as a cryptographic or file-format failure.
#[derive(Debug, Error)]
enum DriverError {
    #[error("{0}")]
    Vault(#[from] VaultError),
    #[error("{0}")]
    Usage(String),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(command: Command) -> Result<(), DriverError> {
    match command {
        Command::Create { path } => cmd_create(&path),
        Command::Open { path } | Command::Info { path } => cmd_info(&path),
        Command::List { path } => cmd_list(&path),
        Command::Get { path, name } => cmd_get(&path, &name),
        Command::Add { path, name } => cmd_add(&path, &name),
        Command::Remove { path, name } => cmd_remove(&path, &name),
    }
}

fn cmd_create(path: &Path) -> Result<(), DriverError> {
    let mut passphrase = prompt_passphrase("New passphrase: ")?;
    let handle = VaultHandle::create(path, passphrase.as_bytes());
    passphrase.zeroize();
    let handle = handle?;
    tracing::info!(path = %path.display(), "vault created");
    println!("created vault at {}", path.display());
    handle.close();
    Ok(())
}

fn cmd_info(path: &Path) -> Result<(), DriverError> {
    let mut passphrase = prompt_passphrase("Passphrase: ")?;
    let handle = VaultHandle::open(path, passphrase.as_bytes());
    passphrase.zeroize();
    let handle = handle?;
    tracing::info!(path = %path.display(), records = handle.num_records(), "vault opened");
    let info = handle.info();
    println!("filename:    {}", info.filename.display());
    println!("num_records: {}", info.num_records);
    println!("last_edit:   {}", info.last_edit);
    handle.close();
    Ok(())
}

fn cmd_list(path: &Path) -> Result<(), DriverError> {
    let mut passphrase = prompt_passphrase("Passphrase: ")?;
    let handle = VaultHandle::open(path, passphrase.as_bytes());
    passphrase.zeroize();
    let handle = handle?;
    tracing::info!(path = %path.display(), records = handle.num_records(), "vault opened");
    let records = handle.list()?;
    for record in records {
        println!("{}\t{}\t{}", record.name, record.pass_size, record.create_time);
    }
    handle.close();
    Ok(())
}

fn cmd_get(path: &Path, name: &str) -> Result<(), DriverError> {
    validate_name(name)?;
    let mut passphrase = prompt_passphrase("Passphrase: ")?;
    let handle = VaultHandle::open(path, passphrase.as_bytes());
    passphrase.zeroize();
    let handle = handle?;
    tracing::info!(path = %path.display(), records = handle.num_records(), "vault opened");

    let mut plaintext = handle.get(name)?;
    let end = plaintext.iter().position(|&b| b == 0).unwrap_or(plaintext.len());
    let password = String::from_utf8_lossy(&plaintext[..end]).into_owned();
    println!("{password}");
    plaintext.zeroize();

    handle.close();
    Ok(())
}

fn cmd_add(path: &Path, name: &str) -> Result<(), DriverError> {
    validate_name(name)?;
    let pass_size = prompt_pass_size()?;
    let mut passphrase = prompt_passphrase("Passphrase: ")?;
    let handle = VaultHandle::open(path, passphrase.as_bytes());
    passphrase.zeroize();
    let mut handle = handle?;

    handle.add(name, pass_size)?;
    tracing::info!(path = %path.display(), name, "record added");
    println!("added {name} ({pass_size} characters)");
    handle.close();
    Ok(())
}

fn cmd_remove(path: &Path, name: &str) -> Result<(), DriverError> {
    validate_name(name)?;
    let mut passphrase = prompt_passphrase("Passphrase: ")?;
    let handle = VaultHandle::open(path, passphrase.as_bytes());
    passphrase.zeroize();
    let mut handle = handle?;

    handle.delete(name)?;
    tracing::info!(path = %path.display(), name, "record removed");
    println!("removed {name}");
    handle.close();
    Ok(())
}

fn validate_name(name: &str) -> Result<(), DriverError> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(DriverError::Usage(format!(
            "record name must be 1..={MAX_NAME_LEN} bytes, got {}",
            name.len()
        )));
    }
    Ok(())
}

fn prompt_passphrase(prompt: &str) -> Result<String, DriverError> {
    let passphrase = rpassword::prompt_password(prompt)?;
    if passphrase.len() > MAX_PASSPHRASE_LEN {
        return Err(DriverError::Usage(format!(
            "passphrase must be at most {MAX_PASSPHRASE_LEN} bytes"
        )));
    }
    Ok(passphrase)
}

fn prompt_pass_size() -> Result<usize, DriverError> {
    println!("password length (1..={MAX_PASS_SIZE}):");
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let pass_size: usize = line
        .trim()
        .parse()
        .map_err(|_| DriverError::Usage("password length must be a positive integer".into()))?;
    if pass_size < MIN_PASS_SIZE || pass_size > MAX_PASS_SIZE {
        return Err(DriverError::Usage(format!(
            "password length must be {MIN_PASS_SIZE}..={MAX_PASS_SIZE}, got {pass_size}"
        )));
    }
    Ok(pass_size)
}
