//! The interactive vault session.
//!
//! One process holds one vault: entries added here live until the
//! session ends and are gone afterwards.  Every action that touches
//! plaintext asks for the passphrase again — the key is re-derived per
//! operation and never kept between actions.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use dialoguer::{Input, Password, Select};
use zeroize::Zeroizing;

use crate::errors::{LockboxError, Result};
use crate::vault::{
    filter_entries, FileInput, RevealState, RevealTracker, TypeFilter, Vault, VaultEntry,
};

use super::output;

/// Menu actions in display order.
const ACTIONS: &[&str] = &[
    "Add text secret",
    "Add files",
    "List entries",
    "Reveal secret",
    "Reveal file name",
    "Download file",
    "Copy secret to clipboard",
    "Quit",
];

/// One interactive vault session.
pub struct Session {
    vault: Vault,
    tracker: RevealTracker,
    out_dir: PathBuf,
}

impl Session {
    pub fn new(vault: Vault, out_dir: PathBuf) -> Self {
        Self {
            vault,
            tracker: RevealTracker::new(),
            out_dir,
        }
    }

    /// Run the menu loop until the user quits.
    ///
    /// Individual action failures are reported and the loop continues;
    /// only quitting (or a broken terminal) ends the session.
    pub fn run(&mut self) -> Result<()> {
        output::info("Vault open — entries live only for this session.");

        loop {
            let choice = Select::new()
                .with_prompt("Action")
                .items(ACTIONS)
                .default(0)
                .interact_opt()
                .map_err(|e| super::prompt_err("menu", e))?;

            let result = match choice {
                Some(0) => self.add_text(),
                Some(1) => self.add_files(),
                Some(2) => self.list(),
                Some(3) => self.reveal_secret(),
                Some(4) => self.reveal_file_name(),
                Some(5) => self.download(),
                Some(6) => self.copy_to_clipboard(),
                // "Quit" or escape.
                _ => break,
            };

            if let Err(e) = result {
                match e {
                    LockboxError::UserCancelled => output::tip("Cancelled."),
                    other => output::error(&other.to_string()),
                }
            }
        }

        output::info("Session closed — the vault is gone.");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    fn add_text(&mut self) -> Result<()> {
        let name = prompt_label()?;
        let secret = Zeroizing::new(
            Password::new()
                .with_prompt("Secret to store")
                .interact()
                .map_err(|e| super::prompt_err("secret prompt", e))?,
        );
        let expires_at = prompt_expiry()?;
        let passphrase = super::prompt_passphrase()?;

        let entry =
            self.vault
                .add_text_entry(&name, &secret, passphrase.as_bytes(), expires_at)?;
        output::success(&format!("Stored text secret '{}' as entry {}", entry.name, entry.id));
        Ok(())
    }

    fn add_files(&mut self) -> Result<()> {
        let name = prompt_label()?;
        let paths: String = Input::new()
            .with_prompt("File paths (space-separated)")
            .interact_text()
            .map_err(|e| super::prompt_err("path prompt", e))?;

        let mut files = Vec::new();
        for path in paths.split_whitespace() {
            let path = Path::new(path);
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    LockboxError::CommandFailed(format!("'{}' has no file name", path.display()))
                })?;
            let bytes = fs::read(path)?;
            files.push(FileInput { file_name, bytes });
        }
        if files.is_empty() {
            return Err(LockboxError::CommandFailed("no files given".into()));
        }

        let expires_at = prompt_expiry()?;
        let passphrase = super::prompt_passphrase()?;

        let added = self
            .vault
            .add_file_entries(&name, &files, passphrase.as_bytes(), expires_at)?;
        output::success(&format!("Stored {} file(s) under label '{name}'", added.len()));
        Ok(())
    }

    fn list(&self) -> Result<()> {
        let search: String = Input::new()
            .with_prompt("Search (prefix, empty for all)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| super::prompt_err("search prompt", e))?;

        let filters = ["All", "Text", "File"];
        let picked = Select::new()
            .with_prompt("Type")
            .items(&filters)
            .default(0)
            .interact()
            .map_err(|e| super::prompt_err("type prompt", e))?;
        let filter: TypeFilter = filters[picked].parse()?;

        let hits = filter_entries(self.vault.entries(), &search, filter);
        output::print_entries_table(&hits, &self.tracker);
        Ok(())
    }

    fn reveal_secret(&mut self) -> Result<()> {
        let id = prompt_entry_id()?;
        // Borrow through the vault directly so the tracker stays
        // mutably borrowable alongside the entry.
        let entry = self.vault.get(id).ok_or(LockboxError::EntryNotFound(id))?;

        // Toggling off needs no passphrase.
        if self.tracker.state(id) == RevealState::Revealed {
            self.tracker.toggle(&self.vault, entry, &[])?;
            output::info(&format!("Entry {id} hidden again."));
            return Ok(());
        }

        let passphrase = super::prompt_passphrase()?;
        self.tracker
            .toggle(&self.vault, entry, passphrase.as_bytes())?;

        match self.tracker.plaintext(id) {
            Some(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => output::success(&format!("Entry {id}: {text}")),
                Err(_) => output::info(&format!(
                    "Entry {id} revealed ({} raw bytes) — use `Download file` to save it.",
                    bytes.len()
                )),
            },
            None => output::info(&format!("Entry {id} hidden.")),
        }
        Ok(())
    }

    fn reveal_file_name(&self) -> Result<()> {
        let id = prompt_entry_id()?;
        let entry = self.entry(id)?;
        let passphrase = super::prompt_passphrase()?;

        let file_name = self.vault.reveal_file_name(entry, passphrase.as_bytes())?;
        output::success(&format!("Entry {id} file name: {file_name}"));
        Ok(())
    }

    fn download(&self) -> Result<()> {
        let id = prompt_entry_id()?;
        let entry = self.entry(id)?;
        let passphrase = super::prompt_passphrase()?;

        // Decrypt the name first so a wrong passphrase fails before
        // any bytes are produced.
        let file_name = self.vault.reveal_file_name(entry, passphrase.as_bytes())?;
        let bytes = self.vault.reveal_secret(entry, passphrase.as_bytes())?;

        // Only the final component — a stored name must not be able to
        // climb out of the download directory.
        let safe_name = Path::new(&file_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("entry-{id}.bin"));

        fs::create_dir_all(&self.out_dir)?;
        let target = self.out_dir.join(&safe_name);
        fs::write(&target, &bytes)?;

        output::success(&format!(
            "Wrote {} byte(s) to {}",
            bytes.len(),
            target.display()
        ));
        Ok(())
    }

    fn copy_to_clipboard(&self) -> Result<()> {
        let id = prompt_entry_id()?;
        let entry = self.entry(id)?;
        let passphrase = super::prompt_passphrase()?;

        let text = self.vault.reveal_text(entry, passphrase.as_bytes())?;

        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| LockboxError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(text)
            .map_err(|e| LockboxError::CommandFailed(format!("clipboard write: {e}")))?;

        output::success(&format!("Entry {id} secret copied to clipboard."));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn entry(&self, id: u64) -> Result<&VaultEntry> {
        self.vault.get(id).ok_or(LockboxError::EntryNotFound(id))
    }
}

/// Prompt for the plaintext label shown in listings.
fn prompt_label() -> Result<String> {
    let name: String = Input::new()
        .with_prompt("Label")
        .interact_text()
        .map_err(|e| super::prompt_err("label prompt", e))?;
    Ok(name)
}

/// Prompt for an entry id.
fn prompt_entry_id() -> Result<u64> {
    let id: u64 = Input::new()
        .with_prompt("Entry id")
        .interact_text()
        .map_err(|e| super::prompt_err("id prompt", e))?;
    Ok(id)
}

/// Prompt for an optional expiry date (`YYYY-MM-DD`, empty for none).
fn prompt_expiry() -> Result<Option<DateTime<Utc>>> {
    let raw: String = Input::new()
        .with_prompt("Expiry date (YYYY-MM-DD, empty for none)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| super::prompt_err("expiry prompt", e))?;

    if raw.trim().is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| LockboxError::CommandFailed(format!("invalid expiry date: {e}")))?;
    let end_of_day = date
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| LockboxError::CommandFailed("invalid expiry date".into()))?;

    Ok(Some(end_of_day.and_utc()))
}
