//! Books: creation, selection and the per-book outline, themes and timeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::edit::{keep_previous, keep_previous_count, parse_count, take_position};
use crate::error::{CodexError, CodexResult};
use crate::id::{Id, IdKind};
use crate::timeline::{BookEvent, EventInput};

/// Book-local data attached to a master character reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookProfile {
    /// What the character does in this particular book.
    pub role_in_book: String,
    /// Book-specific notes.
    pub notes: String,
}

/// A single book in the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, stable for the document's lifetime.
    pub id: Id,
    /// Book title.
    pub title: String,
    /// Position in the series, if known.
    pub number: Option<u64>,
    /// Short description.
    pub logline: String,
    /// Estimated word count.
    pub planned_length: Option<u64>,
    /// Major plot beats in order.
    pub plot_outline: Vec<String>,
    /// Referenced master character ids.
    pub characters: Vec<Id>,
    /// Book-local profile for every referenced character.
    pub book_char_profiles: BTreeMap<Id, BookProfile>,
    /// Events local to this book.
    pub timeline: Vec<BookEvent>,
    /// Theme tags.
    #[serde(default)]
    pub themes: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Raw user input for creating a book or editing its basic info.
#[derive(Debug, Clone, Default)]
pub struct BookInput {
    /// Title.
    pub title: String,
    /// Book number as typed.
    pub number: String,
    /// Logline.
    pub logline: String,
    /// Estimated word count as typed. Only used on creation.
    pub planned_length: String,
}

impl BookInput {
    /// Input carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Book {
    /// Display label used when picking a book.
    pub fn label(&self) -> String {
        let title = if self.title.is_empty() {
            "<untitled>"
        } else {
            self.title.as_str()
        };
        match self.number {
            Some(n) => format!("{title} (#{n})"),
            None => title.to_string(),
        }
    }

    /// Replace title, number and logline, keeping any field left blank.
    ///
    /// The number is only replaced when the input is a whole number.
    pub fn edit_basic_info(&mut self, input: BookInput) {
        keep_previous(&mut self.title, &input.title);
        keep_previous_count(&mut self.number, &input.number);
        keep_previous(&mut self.logline, &input.logline);
    }

    /// Append a plot beat.
    pub fn add_beat(&mut self, beat: impl Into<String>) {
        self.plot_outline.push(beat.into());
    }

    /// Remove the plot beat at 1-based `position`.
    pub fn remove_beat(&mut self, position: usize) -> CodexResult<String> {
        take_position(&mut self.plot_outline, position)
    }

    /// Tag the book with a theme. Returns false for blank or repeated themes.
    pub fn add_theme(&mut self, theme: &str) -> bool {
        let theme = theme.trim();
        let folded = theme.to_lowercase();
        if theme.is_empty() || self.themes.iter().any(|t| t.to_lowercase() == folded) {
            return false;
        }
        self.themes.push(theme.to_string());
        true
    }

    /// Remove the theme at 1-based `position`.
    pub fn remove_theme(&mut self, position: usize) -> CodexResult<String> {
        take_position(&mut self.themes, position)
    }

    /// Append an event to this book's timeline.
    pub fn add_event(&mut self, input: EventInput) -> &BookEvent {
        self.timeline.push(BookEvent::from(input));
        &self.timeline[self.timeline.len() - 1]
    }

    /// Remove the event at 1-based `position` of this book's timeline.
    pub fn remove_event(&mut self, position: usize) -> CodexResult<BookEvent> {
        take_position(&mut self.timeline, position)
    }
}

impl Document {
    /// Append a new, empty book built from `input`.
    pub fn create_book(&mut self, input: BookInput) -> &Book {
        let id = self.allocate_id(IdKind::Book);
        let book = Book {
            id,
            title: input.title.trim().to_string(),
            number: parse_count(&input.number),
            logline: input.logline.trim().to_string(),
            planned_length: parse_count(&input.planned_length),
            plot_outline: Vec::new(),
            characters: Vec::new(),
            book_char_profiles: BTreeMap::new(),
            timeline: Vec::new(),
            themes: Vec::new(),
            created_at: Utc::now(),
        };
        tracing::info!(id = %book.id, title = %book.title, "book created");
        self.books.push(book);
        &self.books[self.books.len() - 1]
    }

    /// Display labels of all books in collection order.
    ///
    /// The iterator is lazy; call again to start over.
    pub fn book_labels(&self) -> impl Iterator<Item = String> + '_ {
        self.books.iter().map(Book::label)
    }

    /// The book at zero-based `index`, if any.
    pub fn select_book(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Look up a book by id.
    pub fn book(&self, id: &str) -> CodexResult<&Book> {
        self.books
            .iter()
            .find(|b| b.id.as_str() == id)
            .ok_or_else(|| CodexError::BookNotFound(Id::from(id)))
    }

    /// Look up a book by id for modification.
    pub fn book_mut(&mut self, id: &str) -> CodexResult<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| b.id.as_str() == id)
            .ok_or_else(|| CodexError::BookNotFound(Id::from(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_book() -> (Document, Id) {
        let mut doc = Document::new();
        let id = doc
            .create_book(BookInput {
                title: "The Start".into(),
                number: "1".into(),
                logline: "It begins.".into(),
                planned_length: "90000".into(),
            })
            .id
            .clone();
        (doc, id)
    }

    #[test]
    fn create_book_starts_empty() {
        let (doc, id) = doc_with_book();
        let book = doc.book(id.as_str()).unwrap();
        assert_eq!(book.number, Some(1));
        assert_eq!(book.planned_length, Some(90_000));
        assert!(book.plot_outline.is_empty());
        assert!(book.characters.is_empty());
        assert!(book.book_char_profiles.is_empty());
        assert!(book.timeline.is_empty());
        assert!(book.themes.is_empty());
    }

    #[test]
    fn malformed_numbers_are_unset() {
        let mut doc = Document::new();
        let book = doc.create_book(BookInput {
            number: "first".into(),
            planned_length: "lots".into(),
            ..BookInput::titled("X")
        });
        assert_eq!(book.number, None);
        assert_eq!(book.planned_length, None);
    }

    #[test]
    fn labels_are_restartable() {
        let mut doc = Document::new();
        doc.create_book(BookInput::titled("One"));
        doc.create_book(BookInput::titled(""));
        let first: Vec<_> = doc.book_labels().collect();
        let second: Vec<_> = doc.book_labels().collect();
        assert_eq!(first, vec!["One".to_string(), "<untitled>".to_string()]);
        assert_eq!(first, second);
    }

    #[test]
    fn select_book_out_of_range() {
        let (doc, _) = doc_with_book();
        assert!(doc.select_book(0).is_some());
        assert!(doc.select_book(1).is_none());
    }

    #[test]
    fn edit_basic_info_keeps_blank_and_malformed() {
        let (mut doc, id) = doc_with_book();
        let book = doc.book_mut(id.as_str()).unwrap();
        book.edit_basic_info(BookInput {
            title: "".into(),
            number: "two".into(),
            logline: "A new start.".into(),
            planned_length: String::new(),
        });
        assert_eq!(book.title, "The Start");
        assert_eq!(book.number, Some(1));
        assert_eq!(book.logline, "A new start.");
        book.edit_basic_info(BookInput {
            number: "2".into(),
            ..BookInput::default()
        });
        assert_eq!(book.number, Some(2));
    }

    #[test]
    fn beats_add_and_remove() {
        let (mut doc, id) = doc_with_book();
        let book = doc.book_mut(id.as_str()).unwrap();
        assert!(book.remove_beat(1).is_err());
        book.add_beat("Inciting incident");
        book.add_beat("Midpoint");
        assert_eq!(book.remove_beat(1).unwrap(), "Inciting incident");
        assert!(book.remove_beat(2).is_err());
        assert_eq!(book.plot_outline, vec!["Midpoint".to_string()]);
    }

    #[test]
    fn themes_ignore_blank_and_repeats() {
        let (mut doc, id) = doc_with_book();
        let book = doc.book_mut(id.as_str()).unwrap();
        assert!(book.add_theme("Betrayal"));
        assert!(!book.add_theme("betrayal"));
        assert!(!book.add_theme("  "));
        assert!(book.add_theme("Hope"));
        assert_eq!(book.remove_theme(1).unwrap(), "Betrayal");
        assert_eq!(book.themes, vec!["Hope".to_string()]);
    }

    #[test]
    fn theme_repeats_fold_non_ascii_case() {
        let (mut doc, id) = doc_with_book();
        let book = doc.book_mut(id.as_str()).unwrap();
        assert!(book.add_theme("Ärger"));
        assert!(!book.add_theme("ärger"));
        assert!(!book.add_theme("ÄRGER"));
        assert_eq!(book.themes, vec!["Ärger".to_string()]);
    }

    #[test]
    fn book_timeline_add_and_remove() {
        let (mut doc, id) = doc_with_book();
        let book = doc.book_mut(id.as_str()).unwrap();
        book.add_event(EventInput::new("Day 1", "Arrival"));
        book.add_event(EventInput::new("Day 2", "Betrayal"));
        assert_eq!(book.remove_event(2).unwrap().desc, "Betrayal");
        assert_eq!(book.timeline[0].to_string(), "Day 1: Arrival");
        assert!(book.remove_event(0).is_err());
    }

    #[test]
    fn unknown_book_id() {
        let doc = Document::new();
        assert!(matches!(doc.book("book_1"), Err(CodexError::BookNotFound(_))));
    }
}
