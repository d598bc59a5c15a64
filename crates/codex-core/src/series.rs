use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::edit::parse_count;

/// Series-level overview metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Series title.
    pub title: String,
    /// Overall genre.
    pub genre: String,
    /// One-sentence series logline.
    pub logline: String,
    /// Planned number of books, if decided.
    pub planned_books: Option<u64>,
    /// How the books connect (standalones in a shared world, sequential saga...).
    pub interconnection_style: String,
    /// The protagonist's arc across the whole series.
    pub protagonist_overall_arc: String,
    /// When the overview was last written.
    pub updated_at: DateTime<Utc>,
}

/// Raw user input for the series overview form.
#[derive(Debug, Clone, Default)]
pub struct SeriesInput {
    /// Series title.
    pub title: String,
    /// Overall genre.
    pub genre: String,
    /// Series logline.
    pub logline: String,
    /// Planned book count as typed; left unset unless it is a whole number.
    pub planned_books: String,
    /// Interconnection style.
    pub interconnection_style: String,
    /// Protagonist's overall arc.
    pub protagonist_arc: String,
}

impl Document {
    /// Overwrite the whole series record from `input` and stamp it.
    ///
    /// Every field is replaced: a blank input stores an empty string rather
    /// than keeping the previous value.
    pub fn set_series(&mut self, input: SeriesInput) -> &Series {
        tracing::debug!(title = %input.title, "series overview replaced");
        self.series.insert(Series {
            title: input.title.trim().to_string(),
            genre: input.genre.trim().to_string(),
            logline: input.logline.trim().to_string(),
            planned_books: parse_count(&input.planned_books),
            interconnection_style: input.interconnection_style.trim().to_string(),
            protagonist_overall_arc: input.protagonist_arc.trim().to_string(),
            updated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, books: &str) -> SeriesInput {
        SeriesInput {
            title: title.to_string(),
            genre: "Fantasy".to_string(),
            logline: "A saga.".to_string(),
            planned_books: books.to_string(),
            interconnection_style: "Sequential saga".to_string(),
            protagonist_arc: "From thief to queen.".to_string(),
        }
    }

    #[test]
    fn creates_series_record() {
        let mut doc = Document::new();
        let series = doc.set_series(input("Ashes", "3"));
        assert_eq!(series.title, "Ashes");
        assert_eq!(series.planned_books, Some(3));
    }

    #[test]
    fn malformed_book_count_is_unset() {
        let mut doc = Document::new();
        assert_eq!(doc.set_series(input("Ashes", "three")).planned_books, None);
    }

    // Known asymmetry: unlike every other editor, blank input here clears
    // the field instead of keeping the previous value.
    #[test]
    fn blank_fields_replace_previous_values() {
        let mut doc = Document::new();
        doc.set_series(input("Ashes", "3"));
        doc.set_series(SeriesInput::default());
        let series = doc.series.as_ref().unwrap();
        assert_eq!(series.title, "");
        assert_eq!(series.genre, "");
        assert_eq!(series.planned_books, None);
    }
}
