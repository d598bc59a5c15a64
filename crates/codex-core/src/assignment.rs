//! Assigning master characters to books.
//!
//! A book's reference list and its profile map move together: assigning a
//! character creates an empty profile, unassigning removes it.

use crate::book::{Book, BookProfile};
use crate::codex::{Character, CharacterInput};
use crate::document::Document;
use crate::edit::keep_previous;
use crate::error::{CodexError, CodexResult};
use crate::id::Id;

/// One entry of a book's character list, resolved against the master codex.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignedCharacter<'d> {
    /// The reference resolves to a master character.
    Resolved {
        /// The master record.
        character: &'d Character,
        /// Book-local profile, if present.
        profile: Option<&'d BookProfile>,
    },
    /// The reference points at an id no longer in the master codex.
    Missing(&'d Id),
}

impl AssignedCharacter<'_> {
    /// Label shown in pickers: the name, or `(missing:<id>)`.
    pub fn label(&self) -> String {
        match self {
            Self::Resolved { character, .. } => character.name.clone(),
            Self::Missing(id) => format!("(missing:{id})"),
        }
    }
}

/// Outcome of adding an existing master character to a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// The character was added with an empty profile.
    Added,
    /// The book already referenced the character; nothing changed.
    AlreadyPresent,
}

impl Book {
    /// Edit the book-local profile of an assigned character.
    ///
    /// Blank fields keep their previous value.
    pub fn edit_profile(
        &mut self,
        character_id: &str,
        role_in_book: &str,
        notes: &str,
    ) -> CodexResult<&BookProfile> {
        let id = self
            .characters
            .iter()
            .find(|cid| cid.as_str() == character_id)
            .cloned()
            .ok_or_else(|| CodexError::CharacterNotFound(Id::from(character_id)))?;
        let profile = self.book_char_profiles.entry(id).or_default();
        keep_previous(&mut profile.role_in_book, role_in_book);
        keep_previous(&mut profile.notes, notes);
        Ok(profile)
    }

    /// Drop a character reference together with its profile.
    ///
    /// Returns false if the book did not reference the character.
    pub fn unassign(&mut self, character_id: &str) -> bool {
        let before = self.characters.len();
        self.characters.retain(|cid| cid.as_str() != character_id);
        self.book_char_profiles.remove(character_id);
        self.characters.len() < before
    }
}

impl Document {
    /// Resolve every character reference of a book, in book order.
    pub fn assigned_characters(&self, book_id: &str) -> CodexResult<Vec<AssignedCharacter<'_>>> {
        let book = self.book(book_id)?;
        Ok(book
            .characters
            .iter()
            .map(|cid| match self.character(cid.as_str()) {
                Some(character) => AssignedCharacter::Resolved {
                    character,
                    profile: book.book_char_profiles.get(cid),
                },
                None => AssignedCharacter::Missing(cid),
            })
            .collect())
    }

    /// Add an existing master character to a book.
    pub fn assign_character(
        &mut self,
        book_id: &str,
        character_id: &str,
    ) -> CodexResult<Assignment> {
        let id = self
            .character(character_id)
            .map(|c| c.id.clone())
            .ok_or_else(|| CodexError::CharacterNotFound(Id::from(character_id)))?;
        let book = self.book_mut(book_id)?;
        if book.characters.contains(&id) {
            return Ok(Assignment::AlreadyPresent);
        }
        book.characters.push(id.clone());
        book.book_char_profiles.entry(id).or_default();
        Ok(Assignment::Added)
    }

    /// Create a master character and add it to a book in one step.
    pub fn create_and_assign(&mut self, book_id: &str, input: CharacterInput) -> CodexResult<Id> {
        // Fail before creating anything if the book is unknown.
        self.book(book_id)?;
        let id = self.create_character(input).id.clone();
        self.assign_character(book_id, id.as_str())?;
        Ok(id)
    }
}
