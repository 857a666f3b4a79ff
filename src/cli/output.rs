//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across the session.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{RevealState, RevealTracker, VaultEntry};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Mask shown for secrets and file names that are not revealed.
const MASK: &str = "****************";

/// Print a table of vault entries (Id, Name, Type, Value, Created, Expires).
///
/// The value column shows the cached plaintext for entries the
/// tracker currently has revealed, and a mask for everything else.
pub fn print_entries_table(entries: &[&VaultEntry], tracker: &RevealTracker) {
    if entries.is_empty() {
        info("Vault currently empty, or nothing matches the filter.");
        tip("Use `Add text secret` or `Add files` to fill the vault.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Type", "Value", "Created", "Expires"]);

    for entry in entries {
        let value = match tracker.state(entry.id) {
            RevealState::Revealed => tracker
                .plaintext(entry.id)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_else(|| MASK.to_string()),
            _ => MASK.to_string(),
        };

        table.add_row(vec![
            entry.id.to_string(),
            entry.name.clone(),
            entry.kind.to_string(),
            value,
            entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry
                .expires_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    println!("{table}");
}
