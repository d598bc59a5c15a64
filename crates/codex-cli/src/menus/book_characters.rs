use codex_core::{AssignedCharacter, Assignment, Id, Session};

use super::codex::read_character_input;
use super::with_book;
use crate::console::Console;
use crate::error::ShellResult;

/// Manage which master characters appear in one book.
pub fn run(session: &mut Session, console: &mut Console<'_>, book_id: &Id) -> ShellResult {
    loop {
        console.blank()?;
        console.line("Book Characters Menu")?;
        console.menu(&[
            ("1", "List book characters"),
            ("2", "Add master character to this book"),
            ("3", "Create new master character and add it"),
            ("4", "Edit book-specific character profile"),
            ("5", "Remove character from book"),
            ("6", "Back"),
        ])?;
        let Some(choice) = console.menu_choice()? else {
            break;
        };
        match choice.as_str() {
            "1" => list(session, console, book_id)?,
            "2" => add_existing(session, console, book_id)?,
            "3" => {
                let input = read_character_input(console)?;
                let name = input.name.trim().to_string();
                session.apply(|doc| doc.create_and_assign(book_id.as_str(), input))??;
                console.reaction(&format!(
                    "Master character '{name}' created and added to this book."
                ))?;
            }
            "4" => edit_profile(session, console, book_id)?,
            "5" => remove(session, console, book_id)?,
            "6" => break,
            _ => console.line("Unknown option.")?,
        }
    }
    Ok(())
}

/// Picker labels for the book's cast plus the ids they stand for.
fn cast(session: &Session, book_id: &Id) -> ShellResult<(Vec<String>, Vec<Id>)> {
    let book = session.document().book(book_id.as_str())?;
    let labels = session
        .document()
        .assigned_characters(book_id.as_str())?
        .iter()
        .map(AssignedCharacter::label)
        .collect();
    Ok((labels, book.characters.clone()))
}

fn list(session: &Session, console: &mut Console<'_>, book_id: &Id) -> ShellResult {
    let assigned = session.document().assigned_characters(book_id.as_str())?;
    if assigned.is_empty() {
        return console.line("No characters assigned to this book.");
    }
    for entry in &assigned {
        match entry {
            AssignedCharacter::Resolved { character, profile } => {
                console.line(format!("- {} (id:{})", character.name, character.id))?;
                let role = profile.map(|p| p.role_in_book.as_str());
                if let Some(role) = role.filter(|r| !r.is_empty()) {
                    console.line(format!("    role in book: {role}"))?;
                }
            }
            AssignedCharacter::Missing(_) => console.line(format!("- {}", entry.label()))?,
        }
    }
    Ok(())
}

fn add_existing(session: &mut Session, console: &mut Console<'_>, book_id: &Id) -> ShellResult {
    let names: Vec<String> = session
        .document()
        .master
        .characters
        .iter()
        .map(|c| c.name.clone())
        .collect();
    let Some(index) = console.choose(&names, "Choose master character to add: ")? else {
        return Ok(());
    };
    let character_id = session.document().master.characters[index].id.clone();
    let outcome =
        session.apply(|doc| doc.assign_character(book_id.as_str(), character_id.as_str()))??;
    match outcome {
        Assignment::Added => console.reaction("Character added to book."),
        Assignment::AlreadyPresent => console.line("Character already in book."),
    }
}

fn edit_profile(session: &mut Session, console: &mut Console<'_>, book_id: &Id) -> ShellResult {
    let (labels, ids) = cast(session, book_id)?;
    if ids.is_empty() {
        return console.line("No characters to edit.");
    }
    let Some(index) = console.choose(&labels, "Select character to edit: ")? else {
        return Ok(());
    };
    let character_id = &ids[index];
    let current = session
        .document()
        .book(book_id.as_str())?
        .book_char_profiles
        .get(character_id)
        .cloned()
        .unwrap_or_default();
    console.line("Edit book-specific profile (leave blank to keep):")?;
    let role = console.ask(&format!("Role in this book [{}]: ", current.role_in_book))?;
    let notes = console.ask(&format!("Notes [{}]: ", current.notes))?;
    with_book(session, book_id.as_str(), |book| {
        book.edit_profile(character_id.as_str(), &role, &notes).map(|_| ())
    })??;
    console.reaction("Book-specific character profile updated.")
}

fn remove(session: &mut Session, console: &mut Console<'_>, book_id: &Id) -> ShellResult {
    let (labels, ids) = cast(session, book_id)?;
    if ids.is_empty() {
        return console.line("No characters to remove.");
    }
    let Some(index) = console.choose(&labels, "Select character to remove: ")? else {
        return Ok(());
    };
    with_book(session, book_id.as_str(), |book| book.unassign(ids[index].as_str()))?;
    console.reaction("Character removed from book.")
}
