//! CLI module — Clap argument parser, prompts, and the interactive
//! vault session.

pub mod output;
pub mod session;

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{LockboxError, Result};

/// Lockbox CLI: session-scoped encrypted vault.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Encrypted vault for text secrets and files, for one session",
    version
)]
pub struct Cli {
    /// Key derivation mode: digest or stretched (overrides config)
    #[arg(long)]
    pub kdf: Option<String>,

    /// Directory where downloaded files are written (overrides config)
    #[arg(long)]
    pub out_dir: Option<String>,
}

/// Read a passphrase, trying in order:
/// 1. `LOCKBOX_PASSPHRASE` env var (scripting/CI)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory
/// on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("LOCKBOX_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Passphrase")
        .interact()
        .map_err(|e| prompt_err("passphrase prompt", e))?;
    Ok(Zeroizing::new(pw))
}

/// Map a prompt error: Ctrl-C surfaces as an interrupted IO error and
/// becomes `UserCancelled`; anything else is a real failure.
pub(crate) fn prompt_err(context: &str, e: dialoguer::Error) -> LockboxError {
    match e {
        dialoguer::Error::IO(ref io) if io.kind() == std::io::ErrorKind::Interrupted => {
            LockboxError::UserCancelled
        }
        other => LockboxError::CommandFailed(format!("{context}: {other}")),
    }
}
