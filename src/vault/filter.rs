//! Search and type filtering over the entry list.
//!
//! Filtering is a borrowed view of the store, never a second copy:
//! the vault stays the only owner of its entries.

use std::str::FromStr;

use crate::errors::{LockboxError, Result};

use super::entry::{EntryKind, VaultEntry};

/// Which entry kinds a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Text,
    File,
}

impl TypeFilter {
    fn matches(self, kind: EntryKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Text => kind == EntryKind::Text,
            TypeFilter::File => kind == EntryKind::File,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = LockboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "text" => Ok(Self::Text),
            "file" => Ok(Self::File),
            other => Err(LockboxError::CommandFailed(format!(
                "unknown type filter '{other}' — expected all, text, or file"
            ))),
        }
    }
}

/// Return the entries matching `search` and `filter`, preserving
/// insertion order and without deduplicating.
///
/// An entry passes when its label starts with `search`
/// (case-insensitive; an empty search matches every label) and its
/// kind is allowed by `filter`.
pub fn filter_entries<'a>(
    entries: &'a [VaultEntry],
    search: &str,
    filter: TypeFilter,
) -> Vec<&'a VaultEntry> {
    let needle = search.to_lowercase();

    entries
        .iter()
        .filter(|entry| {
            (needle.is_empty() || entry.name.to_lowercase().starts_with(&needle))
                && filter.matches(entry.kind)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, name: &str, kind: EntryKind) -> VaultEntry {
        let file_name = match kind {
            EntryKind::Text => String::new(),
            EntryKind::File => "ZW52".to_string(),
        };
        VaultEntry::new(id, name.to_string(), kind, "ZW52".to_string(), file_name, None)
            .expect("valid entry")
    }

    #[test]
    fn prefix_search_is_case_insensitive_and_ordered() {
        let entries = vec![
            entry(1, "Bank", EntryKind::Text),
            entry(2, "bank2", EntryKind::File),
            entry(3, "Email", EntryKind::Text),
        ];

        let hits = filter_entries(&entries, "ban", TypeFilter::All);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Bank");
        assert_eq!(hits[1].name, "bank2");
    }

    #[test]
    fn type_filter_without_search() {
        let entries = vec![
            entry(1, "Bank", EntryKind::Text),
            entry(2, "bank2", EntryKind::File),
            entry(3, "Email", EntryKind::Text),
        ];

        let hits = filter_entries(&entries, "", TypeFilter::Text);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 1);
        assert_eq!(hits[1].id, 3);
    }

    #[test]
    fn search_matches_prefix_not_substring() {
        let entries = vec![entry(1, "MyBank", EntryKind::Text)];

        assert!(filter_entries(&entries, "bank", TypeFilter::All).is_empty());
        assert_eq!(filter_entries(&entries, "myb", TypeFilter::All).len(), 1);
    }

    #[test]
    fn from_str_accepts_any_case() {
        assert_eq!("All".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!("text".parse::<TypeFilter>().unwrap(), TypeFilter::Text);
        assert_eq!("FILE".parse::<TypeFilter>().unwrap(), TypeFilter::File);
        assert!("folder".parse::<TypeFilter>().is_err());
    }
}
