//! Core types for Series Codex: the series document, books, the master
//! codex, timelines, and the read-only analysis and advice helpers.
//!
//! All state lives in one [`Document`], persisted as a single JSON file by
//! [`Store`]. A [`Session`] ties the two together for an interactive run.

/// Keyword-triggered writing advice.
pub mod advice;
/// Heuristic analysis: personality, continuity, arcs, themes.
pub mod analysis;
/// Assigning master characters to books.
pub mod assignment;
/// Books and their outlines, themes and local timelines.
pub mod book;
/// Master characters, locations and lore.
pub mod codex;
/// Session configuration.
pub mod config;
/// The root document.
pub mod document;
/// Keep-previous editing helpers.
pub mod edit;
/// Error types used throughout the crate.
pub mod error;
/// Identifiers and their allocator.
pub mod id;
/// Series overview.
pub mod series;
/// The interactive session object.
pub mod session;
/// JSON persistence.
pub mod store;
/// Book-local and master timelines.
pub mod timeline;

/// Re-export the advice response type.
pub use advice::Advice;
/// Re-export analysis report types.
pub use analysis::{ArcReport, CohesionReport, ContinuityIssue};
/// Re-export assignment types.
pub use assignment::{AssignedCharacter, Assignment};
/// Re-export book types.
pub use book::{Book, BookInput, BookProfile};
/// Re-export master codex types.
pub use codex::{Character, CharacterInput, Location, LocationInput, LoreEntry, LoreInput};
/// Re-export configuration.
pub use config::CodexConfig;
/// Re-export document types.
pub use document::{Document, Master, Meta};
/// Re-export error types.
pub use error::{CodexError, CodexResult};
/// Re-export identifier types.
pub use id::{Id, IdAllocator, IdKind};
/// Re-export series types.
pub use series::{Series, SeriesInput};
/// Re-export the session.
pub use session::Session;
/// Re-export the store.
pub use store::Store;
/// Re-export timeline types.
pub use timeline::{BookEvent, EventInput, MasterEvent};
