//! The master codex: characters, locations and lore shared by every book.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::analyze_personality_text;
use crate::document::Document;
use crate::edit::keep_previous;
use crate::error::{CodexError, CodexResult};
use crate::id::{Id, IdKind};

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// A series-wide character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier.
    pub id: Id,
    /// Display name.
    pub name: String,
    /// Role in the series.
    pub role: String,
    /// Free-text personality description.
    pub personality: String,
    /// Heuristic summary derived from `personality`.
    pub personality_analysis: String,
    /// Growth across the whole series.
    pub series_arc: String,
    /// Anything else.
    pub notes: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Raw user input for creating or editing a character.
#[derive(Debug, Clone, Default)]
pub struct CharacterInput {
    /// Display name.
    pub name: String,
    /// Role in the series.
    pub role: String,
    /// Personality description.
    pub personality: String,
    /// Series-wide arc.
    pub series_arc: String,
    /// Notes.
    pub notes: String,
}

impl CharacterInput {
    /// Input with a name and role; other fields blank.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            ..Self::default()
        }
    }

    /// Set the personality description.
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = personality.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// A series-wide location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: Id,
    /// Display name.
    pub name: String,
    /// Brief description.
    pub brief: String,
    /// How the place changes across the series.
    pub evolution: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Raw user input for creating or editing a location.
#[derive(Debug, Clone, Default)]
pub struct LocationInput {
    /// Display name.
    pub name: String,
    /// Brief description.
    pub brief: String,
    /// Cross-series evolution note.
    pub evolution: String,
}

// ---------------------------------------------------------------------------
// Lore
// ---------------------------------------------------------------------------

/// A lore or magic-system entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreEntry {
    /// Unique identifier.
    pub id: Id,
    /// Rule or piece of lore.
    pub title: String,
    /// Summary or rules text.
    pub summary: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Raw user input for creating or editing a lore entry.
#[derive(Debug, Clone, Default)]
pub struct LoreInput {
    /// Title.
    pub title: String,
    /// Summary.
    pub summary: String,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

impl Document {
    /// Look up a master character by id.
    pub fn character(&self, id: &str) -> Option<&Character> {
        self.master.characters.iter().find(|c| c.id.as_str() == id)
    }

    /// Create a master character and analyze its personality text.
    pub fn create_character(&mut self, input: CharacterInput) -> &Character {
        let id = self.allocate_id(IdKind::Character);
        let personality = input.personality.trim().to_string();
        let character = Character {
            id,
            name: input.name.trim().to_string(),
            role: input.role.trim().to_string(),
            personality_analysis: analyze_personality_text(&personality),
            personality,
            series_arc: input.series_arc.trim().to_string(),
            notes: input.notes.trim().to_string(),
            created_at: Utc::now(),
        };
        tracing::info!(id = %character.id, name = %character.name, "master character created");
        self.master.characters.push(character);
        &self.master.characters[self.master.characters.len() - 1]
    }

    /// Edit a master character; blank fields keep their previous value.
    ///
    /// The personality analysis is recomputed from the resulting text.
    pub fn edit_character(&mut self, id: &str, input: CharacterInput) -> CodexResult<&Character> {
        let character = self
            .master
            .characters
            .iter_mut()
            .find(|c| c.id.as_str() == id)
            .ok_or_else(|| CodexError::CharacterNotFound(Id::from(id)))?;
        keep_previous(&mut character.name, &input.name);
        keep_previous(&mut character.role, &input.role);
        keep_previous(&mut character.personality, &input.personality);
        character.personality_analysis = analyze_personality_text(&character.personality);
        keep_previous(&mut character.series_arc, &input.series_arc);
        keep_previous(&mut character.notes, &input.notes);
        Ok(character)
    }

    /// Delete a master character and every book reference to it.
    pub fn delete_character(&mut self, id: &str) -> CodexResult<Character> {
        let index = self
            .master
            .characters
            .iter()
            .position(|c| c.id.as_str() == id)
            .ok_or_else(|| CodexError::CharacterNotFound(Id::from(id)))?;
        let removed = self.master.characters.remove(index);
        for book in &mut self.books {
            book.characters.retain(|cid| cid != &removed.id);
            book.book_char_profiles.remove(&removed.id);
        }
        tracing::info!(id = %removed.id, "master character deleted with book references");
        Ok(removed)
    }

    /// Create a master location.
    pub fn create_location(&mut self, input: LocationInput) -> &Location {
        let id = self.allocate_id(IdKind::Location);
        self.master.locations.push(Location {
            id,
            name: input.name.trim().to_string(),
            brief: input.brief.trim().to_string(),
            evolution: input.evolution.trim().to_string(),
            created_at: Utc::now(),
        });
        &self.master.locations[self.master.locations.len() - 1]
    }

    /// Edit a master location; blank fields keep their previous value.
    pub fn edit_location(&mut self, id: &str, input: LocationInput) -> CodexResult<&Location> {
        let location = self
            .master
            .locations
            .iter_mut()
            .find(|l| l.id.as_str() == id)
            .ok_or_else(|| CodexError::LocationNotFound(Id::from(id)))?;
        keep_previous(&mut location.name, &input.name);
        keep_previous(&mut location.brief, &input.brief);
        keep_previous(&mut location.evolution, &input.evolution);
        Ok(location)
    }

    /// Delete a master location. Nothing else refers to locations.
    pub fn delete_location(&mut self, id: &str) -> CodexResult<Location> {
        let index = self
            .master
            .locations
            .iter()
            .position(|l| l.id.as_str() == id)
            .ok_or_else(|| CodexError::LocationNotFound(Id::from(id)))?;
        Ok(self.master.locations.remove(index))
    }

    /// Create a lore entry.
    pub fn create_lore(&mut self, input: LoreInput) -> &LoreEntry {
        let id = self.allocate_id(IdKind::Lore);
        self.master.lore.push(LoreEntry {
            id,
            title: input.title.trim().to_string(),
            summary: input.summary.trim().to_string(),
            created_at: Utc::now(),
        });
        &self.master.lore[self.master.lore.len() - 1]
    }

    /// Edit a lore entry; blank fields keep their previous value.
    pub fn edit_lore(&mut self, id: &str, input: LoreInput) -> CodexResult<&LoreEntry> {
        let entry = self
            .master
            .lore
            .iter_mut()
            .find(|l| l.id.as_str() == id)
            .ok_or_else(|| CodexError::LoreNotFound(Id::from(id)))?;
        keep_previous(&mut entry.title, &input.title);
        keep_previous(&mut entry.summary, &input.summary);
        Ok(entry)
    }

    /// Delete a lore entry. Nothing else refers to lore.
    pub fn delete_lore(&mut self, id: &str) -> CodexResult<LoreEntry> {
        let index = self
            .master
            .lore
            .iter()
            .position(|l| l.id.as_str() == id)
            .ok_or_else(|| CodexError::LoreNotFound(Id::from(id)))?;
        Ok(self.master.lore.remove(index))
    }
}
