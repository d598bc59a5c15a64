//! Book-local and series-wide timelines.
//!
//! Both are plain ordered logs of free-text events. Master events may name a
//! book id; the reference is stored as typed and never validated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::edit::{keep_previous, keep_previous_opt, take_position};
use crate::error::{CodexError, CodexResult};

/// An event in a single book's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEvent {
    /// Free-text moment ("Day 1", "Year 300", ...).
    pub when: String,
    /// What happens.
    pub desc: String,
}

impl fmt::Display for BookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.when, self.desc)
    }
}

/// An event in the series-wide timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterEvent {
    /// Free-text moment, absolute or relative.
    pub when: String,
    /// What happens.
    pub desc: String,
    /// Book the event belongs to, if any. Not checked against the book list.
    #[serde(default)]
    pub book_id: Option<String>,
}

impl fmt::Display for MasterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.when, self.desc)?;
        if let Some(book) = &self.book_id {
            write!(f, " (book: {book})")?;
        }
        Ok(())
    }
}

/// Raw user input for a timeline event.
#[derive(Debug, Clone, Default)]
pub struct EventInput {
    /// When it happens.
    pub when: String,
    /// What happens.
    pub desc: String,
    /// Related book id; ignored for book-local events.
    pub book_id: String,
}

impl EventInput {
    /// Input with only `when` and `desc` set.
    pub fn new(when: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            when: when.into(),
            desc: desc.into(),
            book_id: String::new(),
        }
    }

    /// Attach a related book id.
    pub fn with_book(mut self, book_id: impl Into<String>) -> Self {
        self.book_id = book_id.into();
        self
    }
}

impl From<EventInput> for BookEvent {
    fn from(input: EventInput) -> Self {
        Self {
            when: input.when.trim().to_string(),
            desc: input.desc.trim().to_string(),
        }
    }
}

impl From<EventInput> for MasterEvent {
    fn from(input: EventInput) -> Self {
        let book_id = input.book_id.trim();
        Self {
            when: input.when.trim().to_string(),
            desc: input.desc.trim().to_string(),
            book_id: (!book_id.is_empty()).then(|| book_id.to_string()),
        }
    }
}

impl Document {
    /// Append an event to the master timeline.
    pub fn add_master_event(&mut self, input: EventInput) -> &MasterEvent {
        let event = MasterEvent::from(input);
        let known = event
            .book_id
            .as_deref()
            .is_none_or(|book| self.books.iter().any(|b| b.id.as_str() == book));
        if !known {
            tracing::debug!(book = ?event.book_id, "master event names an unknown book id");
        }
        self.timeline.push(event);
        &self.timeline[self.timeline.len() - 1]
    }

    /// Edit the master event at 1-based `position`, keeping blank fields.
    pub fn edit_master_event(
        &mut self,
        position: usize,
        input: EventInput,
    ) -> CodexResult<&MasterEvent> {
        let len = self.timeline.len();
        let event = position
            .checked_sub(1)
            .and_then(|i| self.timeline.get_mut(i))
            .ok_or(CodexError::IndexOutOfRange { position, len })?;
        keep_previous(&mut event.when, &input.when);
        keep_previous(&mut event.desc, &input.desc);
        keep_previous_opt(&mut event.book_id, &input.book_id);
        Ok(event)
    }

    /// Remove the master event at 1-based `position`.
    pub fn remove_master_event(&mut self, position: usize) -> CodexResult<MasterEvent> {
        take_position(&mut self.timeline, position)
    }
}
