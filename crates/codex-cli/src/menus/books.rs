use codex_core::analysis::{BOOK_SUGGESTIONS, book_observations};
use codex_core::{BookInput, Id, Session};

use super::{book_characters, or_dash, timeline, with_book};
use crate::console::Console;
use crate::error::ShellResult;

pub fn run(session: &mut Session, console: &mut Console<'_>) -> ShellResult {
    console.heading("Manage Books")?;
    console.menu(&[
        ("A", "Create New Book"),
        ("B", "Select Existing Book"),
        ("C", "Back"),
    ])?;
    match console.menu_choice()?.as_deref() {
        Some("a") => create(session, console),
        Some("b") => {
            let Some(id) = select(session, console)? else {
                return Ok(());
            };
            submenu(session, console, &id)
        }
        _ => Ok(()),
    }
}

fn create(session: &mut Session, console: &mut Console<'_>) -> ShellResult {
    console.heading("Create New Book")?;
    let input = BookInput {
        title: console.ask("Book Title: ")?,
        number: console.ask("Book Number (1-based, optional): ")?,
        logline: console.ask("Short description / logline: ")?,
        planned_length: console.ask("Estimated word count (optional): ")?,
    };
    session.apply(|doc| {
        doc.create_book(input);
    })?;
    console.blank()?;
    console.reaction("Book created. Think about the inciting incident next.")
}

fn select(session: &Session, console: &mut Console<'_>) -> ShellResult<Option<Id>> {
    let doc = session.document();
    if doc.books.is_empty() {
        console.blank()?;
        console.line("No books created yet.")?;
        return Ok(None);
    }
    let labels: Vec<String> = doc.book_labels().collect();
    let index = console.choose(&labels, "Select a book number (or press Enter to cancel): ")?;
    Ok(index
        .and_then(|i| doc.select_book(i))
        .map(|book| book.id.clone()))
}

fn submenu(session: &mut Session, console: &mut Console<'_>, id: &Id) -> ShellResult {
    loop {
        let title = session.document().book(id.as_str())?.title.clone();
        console.heading(&format!("Book: {title}"))?;
        console.menu(&[
            ("a", "Book Plot Outline"),
            ("b", "Book Characters"),
            ("c", "Book Timeline"),
            ("d", "Book-Specific Analysis"),
            ("e", "Edit Basic Info"),
            ("f", "Book Themes"),
            ("g", "Back"),
        ])?;
        let Some(choice) = console.menu_choice()? else {
            break;
        };
        match choice.as_str() {
            "a" => outline(session, console, id)?,
            "b" => book_characters::run(session, console, id)?,
            "c" => timeline::run_book(session, console, id)?,
            "d" => analysis(session, console, id)?,
            "e" => edit_basic_info(session, console, id)?,
            "f" => themes(session, console, id)?,
            "g" => break,
            _ => console.line("Unknown option.")?,
        }
    }
    session.save()?;
    Ok(())
}

fn outline(session: &mut Session, console: &mut Console<'_>, id: &Id) -> ShellResult {
    console.blank()?;
    console.line("Book Plot Outline (major beats).")?;
    let beats = session.document().book(id.as_str())?.plot_outline.clone();
    for (i, beat) in beats.iter().enumerate() {
        console.line(format!("[{}] {beat}", i + 1))?;
    }
    console.menu(&[("1", "Add Beat"), ("2", "Remove Beat"), ("3", "Back")])?;
    match console.menu_choice()?.as_deref() {
        Some("1") => {
            let beat = console.ask("Describe the plot beat (short): ")?;
            with_book(session, id.as_str(), |book| book.add_beat(beat))?;
            console.reaction("Added plot beat. What's the emotional core here?")?;
        }
        Some("2") => {
            if let Some(i) = console.choose(&beats, "Select beat to remove: ")? {
                let removed = with_book(session, id.as_str(), |book| book.remove_beat(i + 1))??;
                console.line(format!("Removed: {removed}"))?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn edit_basic_info(session: &mut Session, console: &mut Console<'_>, id: &Id) -> ShellResult {
    let book = session.document().book(id.as_str())?.clone();
    console.blank()?;
    console.line("Current basic info:")?;
    console.line(format!("  title:   {}", book.title))?;
    console.line(format!("  number:  {}", or_dash(book.number)))?;
    console.line(format!("  logline: {}", book.logline))?;

    let input = BookInput {
        title: console.ask(&format!("Title [{}]: ", book.title))?,
        number: console.ask(&format!("Number [{}]: ", or_dash(book.number)))?,
        logline: console.ask(&format!("Logline [{}]: ", book.logline))?,
        planned_length: String::new(),
    };
    with_book(session, id.as_str(), |book| book.edit_basic_info(input))?;
    console.reaction("Book basic info updated.")
}

fn themes(session: &mut Session, console: &mut Console<'_>, id: &Id) -> ShellResult {
    console.blank()?;
    console.line("Book Themes")?;
    let themes = session.document().book(id.as_str())?.themes.clone();
    if themes.is_empty() {
        console.line("(No themes tagged yet)")?;
    }
    for (i, theme) in themes.iter().enumerate() {
        console.line(format!("[{}] {theme}", i + 1))?;
    }
    console.menu(&[("1", "Add Theme"), ("2", "Remove Theme"), ("3", "Back")])?;
    match console.menu_choice()?.as_deref() {
        Some("1") => {
            let theme = console.ask("Theme (e.g., betrayal, found family): ")?;
            if with_book(session, id.as_str(), |book| book.add_theme(&theme))? {
                console.reaction("Theme tagged. Watch how it echoes across the series.")?;
            } else {
                console.notice("Theme is blank or already tagged on this book.")?;
            }
        }
        Some("2") => {
            if let Some(i) = console.choose(&themes, "Select theme to remove: ")? {
                let removed = with_book(session, id.as_str(), |book| book.remove_theme(i + 1))??;
                console.line(format!("Removed theme: {removed}"))?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn analysis(session: &Session, console: &mut Console<'_>, id: &Id) -> ShellResult {
    let book = session.document().book(id.as_str())?;
    console.heading(&format!("Book Analysis: {}", book.title))?;
    let observations = book_observations(book);
    if observations.is_empty() {
        console.line("This book has a skeleton outline and characters. Quick suggestions:")?;
        for suggestion in BOOK_SUGGESTIONS {
            console.line(format!("- {suggestion}"))?;
        }
    } else {
        console.line("Observations:")?;
        for observation in observations {
            console.line(format!("- {observation}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::tests::drive;

    #[test]
    fn create_book_and_edit_basic_info() {
        let dir = TempDir::new().unwrap();
        let script = [
            "2", "a", "The Start", "1", "It begins.", "lots",
            "2", "b", "1", "e", "", "two", "A new start.", "g",
            "7",
        ]
        .join("\n");
        let (session, out) = drive(&dir, &script);
        let book = &session.document().books[0];
        assert_eq!(book.title, "The Start");
        assert_eq!(book.number, Some(1));
        assert_eq!(book.logline, "A new start.");
        assert_eq!(book.planned_length, None);
        assert!(out.contains("Book created."));
        assert!(out.contains("The Start (#1)"));
    }

    #[test]
    fn outline_add_and_remove() {
        let dir = TempDir::new().unwrap();
        let script = [
            "2", "a", "One", "", "", "",
            "2", "b", "1",
            "a", "1", "Inciting incident",
            "a", "1", "Midpoint",
            "a", "2", "1",
            "a", "2", "9",
            "g", "7",
        ]
        .join("\n");
        let (session, out) = drive(&dir, &script);
        assert_eq!(session.document().books[0].plot_outline, vec!["Midpoint".to_string()]);
        assert!(out.contains("Removed: Inciting incident"));
    }

    #[test]
    fn themes_and_book_analysis() {
        let dir = TempDir::new().unwrap();
        let script = [
            "2", "a", "One", "", "", "",
            "2", "b", "1",
            "d",
            "f", "1", "Betrayal",
            "f", "1", "betrayal",
            "g", "7",
        ]
        .join("\n");
        let (session, out) = drive(&dir, &script);
        assert_eq!(session.document().books[0].themes, vec!["Betrayal".to_string()]);
        assert!(out.contains("No plot outline recorded."));
        assert!(out.contains("already tagged"));
    }

    #[test]
    fn selecting_without_books() {
        let dir = TempDir::new().unwrap();
        let (_, out) = drive(&dir, "2\nb\n7\n");
        assert!(out.contains("No books created yet."));
    }
}
