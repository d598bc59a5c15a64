//! Read-only heuristic scans over the document.
//!
//! Nothing here mutates state. The scans are intentionally shallow: an
//! empty issue list means nothing obvious was found, not that the series is
//! consistent.

use std::fmt;

use crate::book::{Book, BookProfile};
use crate::codex::Character;
use crate::document::Document;
use crate::id::Id;

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// A keyword set and the sentence it contributes when any keyword matches.
#[derive(Debug, Clone, Copy)]
pub struct TraitRule {
    /// Lower-case substrings that trigger the rule.
    pub keywords: &'static [&'static str],
    /// Sentence appended to the analysis.
    pub summary: &'static str,
}

impl TraitRule {
    /// Whether any keyword occurs in the already lower-cased text.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Trait rules in the order their sentences are emitted.
pub const TRAIT_RULES: &[TraitRule] = &[
    TraitRule {
        keywords: &["conscientious", "conscientiousness", "organized"],
        summary: "High conscientiousness: likely reliable, structured, and plan-driven.",
    },
    TraitRule {
        keywords: &["agreeable", "kind", "friendly"],
        summary: "High agreeableness: likely cooperative and empathetic.",
    },
    TraitRule {
        keywords: &["low agree", "not agreeable", "blunt"],
        summary: "Low agreeableness: may be blunt or confrontational.",
    },
    TraitRule {
        keywords: &["open", "curious", "creative"],
        summary: "High openness: imaginative and curious; likely to pursue novel choices.",
    },
    TraitRule {
        keywords: &["neurotic", "anxious", "sensitive"],
        summary: "Emotional sensitivity: may react strongly under stress.",
    },
    TraitRule {
        keywords: &["extro", "outgoing", "social"],
        summary: "Outgoing: gains energy from others, socially proactive.",
    },
    TraitRule {
        keywords: &["intro", "quiet", "reserved"],
        summary: "Reserved: internal processing, may prefer solitude or a small circle.",
    },
];

/// Returned when no trait rule matches.
pub const NO_PERSONALITY_SIGNAL: &str =
    "No strong signals detected from input; personality summary unavailable.";

/// Summarize a free-text personality description using [`TRAIT_RULES`].
///
/// Rules are independent: every matching rule contributes its sentence, in
/// table order, joined by single spaces.
pub fn analyze_personality_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let traits: Vec<&str> = TRAIT_RULES
        .iter()
        .filter(|rule| rule.matches(&lowered))
        .map(|rule| rule.summary)
        .collect();
    if traits.is_empty() {
        NO_PERSONALITY_SIGNAL.to_string()
    } else {
        traits.join(" ")
    }
}

// ---------------------------------------------------------------------------
// Continuity
// ---------------------------------------------------------------------------

/// A potential continuity problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinuityIssue {
    /// A book references a character id absent from the master codex.
    MissingCharacter {
        /// Title of the referencing book.
        book: String,
        /// The dangling id.
        id: Id,
    },
    /// Several master characters share a (case-insensitive) name.
    DuplicateName {
        /// The shared name, lower-cased.
        name: String,
        /// Ids of every character with that name, in codex order.
        ids: Vec<Id>,
    },
}

impl fmt::Display for ContinuityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCharacter { book, id } => {
                write!(f, "Book '{book}' references missing master character id {id}")
            }
            Self::DuplicateName { name, ids } => {
                let ids: Vec<&str> = ids.iter().map(Id::as_str).collect();
                write!(
                    f,
                    "Multiple master characters share name '{name}' (ids: {}); possible duplication.",
                    ids.join(", ")
                )
            }
        }
    }
}

impl Document {
    /// Scan for dangling character references and duplicate names.
    ///
    /// Missing references come first (book order, then reference order),
    /// followed by duplicate names in order of first appearance.
    pub fn continuity_check(&self) -> Vec<ContinuityIssue> {
        let mut issues = Vec::new();

        for book in &self.books {
            for cid in &book.characters {
                if self.character(cid.as_str()).is_none() {
                    issues.push(ContinuityIssue::MissingCharacter {
                        book: book.title.clone(),
                        id: cid.clone(),
                    });
                }
            }
        }

        let mut by_name: Vec<(String, Vec<Id>)> = Vec::new();
        for character in &self.master.characters {
            let name = character.name.to_lowercase();
            match by_name.iter_mut().find(|(n, _)| *n == name) {
                Some((_, ids)) => ids.push(character.id.clone()),
                None => by_name.push((name, vec![character.id.clone()])),
            }
        }
        issues.extend(
            by_name
                .into_iter()
                .filter(|(_, ids)| ids.len() > 1)
                .map(|(name, ids)| ContinuityIssue::DuplicateName { name, ids }),
        );

        tracing::debug!(issues = issues.len(), "continuity check finished");
        issues
    }
}

// ---------------------------------------------------------------------------
// Character arcs
// ---------------------------------------------------------------------------

/// A book in which a character appears, with its book-local profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance<'d> {
    /// The book.
    pub book: &'d Book,
    /// Profile for the character in that book, if recorded.
    pub profile: Option<&'d BookProfile>,
}

/// A character's series-wide arc plus every book it appears in.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcReport<'d> {
    /// The master character.
    pub character: &'d Character,
    /// Appearances in book-collection order; empty if unassigned.
    pub appearances: Vec<Appearance<'d>>,
}

impl Document {
    /// Build the arc report for a master character, if it exists.
    pub fn character_arc_report(&self, character_id: &str) -> Option<ArcReport<'_>> {
        let character = self.character(character_id)?;
        let appearances = self
            .books
            .iter()
            .filter(|b| b.characters.contains(&character.id))
            .map(|book| Appearance {
                book,
                profile: book.book_char_profiles.get(&character.id),
            })
            .collect();
        Some(ArcReport {
            character,
            appearances,
        })
    }
}

// ---------------------------------------------------------------------------
// Themes
// ---------------------------------------------------------------------------

/// Observation when at least one theme is under-represented.
pub const THEMES_UNEVEN: &str = "Some themes are not strong across the series; consider reinforcing themes that define your series identity.";

/// Observation when every theme is well covered.
pub const THEMES_CONSISTENT: &str =
    "Themes appear consistently across books (as far as recorded).";

/// How often one theme occurs across the series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCoverage {
    /// Lower-cased theme tag.
    pub theme: String,
    /// Number of occurrences across all books.
    pub count: usize,
    /// True when `count` is strictly below half the book count.
    pub under_represented: bool,
}

/// Theme tally across the whole series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohesionReport {
    /// Themes in order of first appearance.
    pub themes: Vec<ThemeCoverage>,
    /// Book count used as the threshold denominator (at least 1).
    pub total_books: usize,
}

impl CohesionReport {
    /// The fixed observation sentence for this report.
    pub fn observation(&self) -> &'static str {
        if self.themes.iter().any(|t| t.under_represented) {
            THEMES_UNEVEN
        } else {
            THEMES_CONSISTENT
        }
    }
}

impl Document {
    /// Tally theme tags across books; `None` when no themes are recorded.
    pub fn thematic_cohesion(&self) -> Option<CohesionReport> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for theme in self.books.iter().flat_map(|b| &b.themes) {
            let theme = theme.to_lowercase();
            match counts.iter_mut().find(|(t, _)| *t == theme) {
                Some((_, count)) => *count += 1,
                None => counts.push((theme, 1)),
            }
        }
        if counts.is_empty() {
            return None;
        }

        let total_books = self.books.len().max(1);
        let themes = counts
            .into_iter()
            .map(|(theme, count)| ThemeCoverage {
                theme,
                count,
                under_represented: count * 2 < total_books,
            })
            .collect();
        Some(CohesionReport {
            themes,
            total_books,
        })
    }
}

// ---------------------------------------------------------------------------
// Single book
// ---------------------------------------------------------------------------

/// Structural suggestions shown when a book has both an outline and a cast.
pub const BOOK_SUGGESTIONS: &[&str] = &[
    "Ensure each major plot beat affects at least one character's arc.",
    "Check that book-specific timeline events align with the Master Timeline.",
];

/// Quick observations about one book's skeleton.
///
/// Returns the gaps found; an empty list means the book has both an outline
/// and assigned characters, in which case [`BOOK_SUGGESTIONS`] apply.
pub fn book_observations(book: &Book) -> Vec<&'static str> {
    let mut observations = Vec::new();
    if book.plot_outline.is_empty() {
        observations.push("No plot outline recorded.");
    }
    if book.characters.is_empty() {
        observations.push("No characters assigned to this book.");
    }
    observations
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::book::BookInput;
    use crate::codex::CharacterInput;

    #[test]
    fn personality_no_signal() {
        assert_eq!(analyze_personality_text("tall"), NO_PERSONALITY_SIGNAL);
        assert_eq!(analyze_personality_text(""), NO_PERSONALITY_SIGNAL);
    }

    #[test]
    fn personality_rules_are_non_exclusive_and_ordered() {
        let out = analyze_personality_text("Quiet, KIND, and organized");
        let conscientious = out.find("High conscientiousness").unwrap();
        let agreeable = out.find("High agreeableness").unwrap();
        let reserved = out.find("Reserved").unwrap();
        assert!(conscientious < agreeable && agreeable < reserved);
    }

    #[test]
    fn personality_blunt_is_low_agreeableness() {
        let out = analyze_personality_text("blunt");
        assert_eq!(out, "Low agreeableness: may be blunt or confrontational.");
    }

    proptest! {
        #[test]
        fn personality_is_deterministic(text in ".{0,60}") {
            prop_assert_eq!(analyze_personality_text(&text), analyze_personality_text(&text));
        }

        #[test]
        fn organized_always_reports_conscientiousness(prefix in ".{0,20}", suffix in ".{0,20}") {
            let out = analyze_personality_text(&format!("{prefix}organized{suffix}"));
            prop_assert!(out.contains(TRAIT_RULES[0].summary));
        }
    }

    #[test]
    fn continuity_clean_document_has_no_issues() {
        let mut doc = Document::new();
        let ava = doc.create_character(CharacterInput::new("Ava", "Hero")).id.clone();
        let kade = doc.create_character(CharacterInput::new("Kade", "Rival")).id.clone();
        let book = doc.create_book(BookInput::titled("One")).id.clone();
        doc.assign_character(book.as_str(), ava.as_str()).unwrap();
        doc.assign_character(book.as_str(), kade.as_str()).unwrap();
        assert!(doc.continuity_check().is_empty());
    }

    #[test]
    fn continuity_reports_duplicate_names_once() {
        let mut doc = Document::new();
        let a = doc.create_character(CharacterInput::new("Rex", "")).id.clone();
        let b = doc.create_character(CharacterInput::new("rex", "")).id.clone();
        doc.create_character(CharacterInput::new("Ava", ""));
        let issues = doc.continuity_check();
        assert_eq!(
            issues,
            vec![ContinuityIssue::DuplicateName {
                name: "rex".into(),
                ids: vec![a.clone(), b.clone()],
            }]
        );
        let text = issues[0].to_string();
        assert!(text.contains(a.as_str()) && text.contains(b.as_str()));
    }

    #[test]
    fn continuity_reports_missing_references() {
        let mut doc = Document::new();
        let book = doc.create_book(BookInput::titled("One")).id.clone();
        doc.book_mut(book.as_str()).unwrap().characters.push(Id::from("char_9"));
        let issues = doc.continuity_check();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].to_string(),
            "Book 'One' references missing master character id char_9"
        );
    }

    #[test]
    fn arc_report_lists_appearances_in_book_order() {
        let mut doc = Document::new();
        let ava = doc.create_character(CharacterInput::new("Ava", "Hero")).id.clone();
        let one = doc.create_book(BookInput::titled("One")).id.clone();
        doc.create_book(BookInput::titled("Two"));
        let three = doc.create_book(BookInput::titled("Three")).id.clone();
        doc.assign_character(three.as_str(), ava.as_str()).unwrap();
        doc.assign_character(one.as_str(), ava.as_str()).unwrap();
        doc.book_mut(one.as_str())
            .unwrap()
            .edit_profile(ava.as_str(), "Runaway", "")
            .unwrap();

        let report = doc.character_arc_report(ava.as_str()).unwrap();
        let titles: Vec<&str> = report.appearances.iter().map(|a| a.book.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Three"]);
        assert_eq!(report.appearances[0].profile.unwrap().role_in_book, "Runaway");
    }

    #[test]
    fn arc_report_for_unassigned_character() {
        let mut doc = Document::new();
        let ava = doc.create_character(CharacterInput::new("Ava", "Hero")).id.clone();
        assert!(doc.character_arc_report(ava.as_str()).unwrap().appearances.is_empty());
        assert!(doc.character_arc_report("char_9").is_none());
    }

    #[test]
    fn cohesion_without_themes() {
        let mut doc = Document::new();
        assert!(doc.thematic_cohesion().is_none());
        doc.create_book(BookInput::titled("One"));
        assert!(doc.thematic_cohesion().is_none());
    }

    #[test]
    fn cohesion_flags_rare_themes() {
        let mut doc = Document::new();
        for title in ["One", "Two", "Three", "Four"] {
            let id = doc.create_book(BookInput::titled(title)).id.clone();
            doc.book_mut(id.as_str()).unwrap().add_theme("Hope");
        }
        let first = doc.books[0].id.clone();
        let book = doc.book_mut(first.as_str()).unwrap();
        book.add_theme("Betrayal");
        assert!(book.add_theme("Ärger"));
        assert!(!book.add_theme("ärger"));

        let report = doc.thematic_cohesion().unwrap();
        assert_eq!(report.total_books, 4);
        assert_eq!(report.themes[0], ThemeCoverage {
            theme: "hope".into(),
            count: 4,
            under_represented: false,
        });
        assert_eq!(report.themes[1].theme, "betrayal");
        assert!(report.themes[1].under_represented);
        assert_eq!(report.themes[2], ThemeCoverage {
            theme: "ärger".into(),
            count: 1,
            under_represented: true,
        });
        assert_eq!(report.observation(), THEMES_UNEVEN);
    }

    #[test]
    fn cohesion_half_coverage_is_not_under_represented() {
        let mut doc = Document::new();
        let one = doc.create_book(BookInput::titled("One")).id.clone();
        doc.create_book(BookInput::titled("Two"));
        doc.book_mut(one.as_str()).unwrap().add_theme("Hope");
        let report = doc.thematic_cohesion().unwrap();
        assert!(!report.themes[0].under_represented);
        assert_eq!(report.observation(), THEMES_CONSISTENT);
    }

    #[test]
    fn book_observations_report_gaps() {
        let mut doc = Document::new();
        let ava = doc.create_character(CharacterInput::new("Ava", "")).id.clone();
        let id = doc.create_book(BookInput::titled("One")).id.clone();
        assert_eq!(book_observations(doc.book(id.as_str()).unwrap()).len(), 2);
        doc.assign_character(id.as_str(), ava.as_str()).unwrap();
        doc.book_mut(id.as_str()).unwrap().add_beat("Opening");
        assert!(book_observations(doc.book(id.as_str()).unwrap()).is_empty());
    }
}
