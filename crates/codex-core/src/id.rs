use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a book or master-codex entry, e.g. `char_3`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// The collection an identifier is allocated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// A book in the series.
    Book,
    /// A master character.
    Character,
    /// A master location.
    Location,
    /// A master lore entry.
    Lore,
}

impl IdKind {
    /// Prefix used in generated identifiers.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Character => "char",
            Self::Location => "loc",
            Self::Lore => "lore",
        }
    }
}

/// Monotonic per-collection counters, persisted with the document.
///
/// Counters only ever grow, so an identifier handed out once is never handed
/// out again even after the entry it named has been deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdAllocator {
    counters: BTreeMap<String, u64>,
}

impl IdAllocator {
    /// Create an allocator with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier for `kind`.
    ///
    /// `taken` reports whether a candidate is already present in the target
    /// collection; such candidates are skipped.
    pub fn allocate(&mut self, kind: IdKind, taken: impl Fn(&str) -> bool) -> Id {
        let counter = self.counters.entry(kind.prefix().to_string()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{}_{}", kind.prefix(), counter);
            if !taken(&candidate) {
                return Id(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_sequential_ids_per_kind() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(IdKind::Character, |_| false).as_str(), "char_1");
        assert_eq!(ids.allocate(IdKind::Character, |_| false).as_str(), "char_2");
        assert_eq!(ids.allocate(IdKind::Book, |_| false).as_str(), "book_1");
        assert_eq!(ids.allocate(IdKind::Lore, |_| false).as_str(), "lore_1");
    }

    #[test]
    fn skips_ids_already_taken() {
        let mut ids = IdAllocator::new();
        let id = ids.allocate(IdKind::Location, |c| c == "loc_1" || c == "loc_2");
        assert_eq!(id.as_str(), "loc_3");
    }

    #[test]
    fn counters_survive_serialization() {
        let mut ids = IdAllocator::new();
        ids.allocate(IdKind::Lore, |_| false);
        let json = serde_json::to_string(&ids).unwrap();
        let mut restored: IdAllocator = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.allocate(IdKind::Lore, |_| false).as_str(), "lore_2");
    }
}
