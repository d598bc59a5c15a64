use codex_core::{EventInput, Id, Session};

use super::with_book;
use crate::console::Console;
use crate::error::ShellResult;

/// One pass over a book's own timeline: list, then add or remove once.
pub fn run_book(session: &mut Session, console: &mut Console<'_>, book_id: &Id) -> ShellResult {
    let book = session.document().book(book_id.as_str())?;
    console.blank()?;
    console.line(format!("Timeline for Book: {}", book.title))?;
    let events: Vec<String> = book.timeline.iter().map(ToString::to_string).collect();
    for (i, event) in events.iter().enumerate() {
        console.line(format!("[{}] {event}", i + 1))?;
    }
    console.menu(&[("1", "Add event"), ("2", "Remove event"), ("3", "Back")])?;
    match console.menu_choice()?.as_deref() {
        Some("1") => {
            let when = console.ask("When (e.g., Day 1 / Year / precise date): ")?;
            let desc = console.ask("Event description: ")?;
            with_book(session, book_id.as_str(), |book| {
                book.add_event(EventInput::new(when, desc));
            })?;
            console.reaction("Timeline event added.")?;
        }
        Some("2") => {
            if events.is_empty() {
                return console.line("No events.");
            }
            if let Some(i) = console.choose(&events, "Select event to remove: ")? {
                with_book(session, book_id.as_str(), |book| book.remove_event(i + 1))??;
                console.line("Event removed.")?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// The series-wide timeline loop.
pub fn run_master(session: &mut Session, console: &mut Console<'_>) -> ShellResult {
    loop {
        console.heading("Master Timeline")?;
        let events: Vec<String> = session
            .document()
            .timeline
            .iter()
            .map(ToString::to_string)
            .collect();
        if events.is_empty() {
            console.line("(No master timeline events yet)")?;
        }
        for (i, event) in events.iter().enumerate() {
            console.line(format!("[{}] {event}", i + 1))?;
        }
        console.menu(&[
            ("1", "Add timeline event"),
            ("2", "Edit event"),
            ("3", "Remove event"),
            ("4", "Back"),
        ])?;
        let Some(choice) = console.menu_choice()? else {
            break;
        };
        match choice.as_str() {
            "1" => {
                let input = EventInput {
                    when: console.ask("When (absolute or relative): ")?,
                    desc: console.ask("Description: ")?,
                    book_id: console.ask("Related book id (optional): ")?,
                };
                session.apply(|doc| {
                    doc.add_master_event(input);
                })?;
                console.reaction("Master timeline updated.")?;
            }
            "2" => {
                let Some(i) = console.choose(&events, "Select event to edit: ")? else {
                    continue;
                };
                let current = session.document().timeline[i].clone();
                let input = EventInput {
                    when: console.ask(&format!("When [{}]: ", current.when))?,
                    desc: console.ask(&format!("Desc [{}]: ", current.desc))?,
                    book_id: console.ask(&format!(
                        "Book ID [{}]: ",
                        current.book_id.as_deref().unwrap_or_default()
                    ))?,
                };
                session.apply(|doc| doc.edit_master_event(i + 1, input).map(|_| ()))??;
                console.reaction("Master timeline event updated.")?;
            }
            "3" => {
                let Some(i) = console.choose(&events, "Select event to remove: ")? else {
                    continue;
                };
                let removed = session.apply(|doc| doc.remove_master_event(i + 1))??;
                console.line(format!("Removed timeline event: {}", removed.desc))?;
            }
            "4" => break,
            _ => console.line("Unknown option.")?,
        }
    }
    Ok(())
}
