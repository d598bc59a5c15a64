use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::codex::{Character, Location, LoreEntry};
use crate::id::{Id, IdAllocator, IdKind};
use crate::series::Series;
use crate::timeline::MasterEvent;

/// Metadata about the document itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// When the document was first created.
    pub created_at: DateTime<Utc>,
    /// Identifier counters for every collection.
    #[serde(default)]
    pub id_counters: IdAllocator,
}

impl Meta {
    /// Fresh metadata stamped with the current time.
    pub fn new() -> Self {
        Self {
            created_at: Utc::now(),
            id_counters: IdAllocator::new(),
        }
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self::new()
    }
}

/// The series-wide registries shared by every book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Master {
    /// Master characters, in creation order.
    pub characters: Vec<Character>,
    /// Master locations, in creation order.
    pub locations: Vec<Location>,
    /// Lore and magic-system entries, in creation order.
    pub lore: Vec<LoreEntry>,
}

/// The single root document holding all series state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata.
    pub meta: Meta,
    /// Series overview, unset until first created.
    pub series: Option<Series>,
    /// Books in display order.
    pub books: Vec<Book>,
    /// Shared characters, locations and lore.
    pub master: Master,
    /// Series-wide timeline.
    pub timeline: Vec<MasterEvent>,
}

impl Document {
    /// The default shape written on first run: everything empty.
    pub fn new() -> Self {
        Self {
            meta: Meta::new(),
            series: None,
            books: Vec::new(),
            master: Master::default(),
            timeline: Vec::new(),
        }
    }

    /// Allocate a fresh identifier for `kind`, unique within its collection.
    pub(crate) fn allocate_id(&mut self, kind: IdKind) -> Id {
        let Self { meta, books, master, .. } = self;
        meta.id_counters.allocate(kind, |candidate| match kind {
            IdKind::Book => books.iter().any(|b| b.id.as_str() == candidate),
            IdKind::Character => master.characters.iter().any(|c| c.id.as_str() == candidate),
            IdKind::Location => master.locations.iter().any(|l| l.id.as_str() == candidate),
            IdKind::Lore => master.lore.iter().any(|l| l.id.as_str() == candidate),
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
