//! Vault module — the in-memory encrypted entry store.
//!
//! This module provides:
//! - `VaultEntry`, `EntryKind`, and `FileInput` types (`entry`)
//! - The append-only `Vault` store and reveal operations (`store`)
//! - Search and type filtering over entries (`filter`)
//! - The per-entry reveal state machine (`reveal`)

pub mod entry;
pub mod filter;
pub mod reveal;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{EntryKind, FileInput, VaultEntry};
pub use filter::{filter_entries, TypeFilter};
pub use reveal::{RevealState, RevealTracker};
pub use store::Vault;
