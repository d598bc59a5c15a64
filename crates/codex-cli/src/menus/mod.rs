//! The menu tree. Every handler borrows the session and the console; the
//! session saves the whole document after each mutation.

pub mod advice;
pub mod analysis;
pub mod book_characters;
pub mod books;
pub mod codex;
pub mod series;
pub mod timeline;

use codex_core::{Book, Session};

use crate::console::Console;
use crate::error::ShellResult;

/// Run the top-level menu until "save & exit" or end of input.
pub fn run(session: &mut Session, console: &mut Console<'_>) -> ShellResult {
    welcome(console)?;
    loop {
        console.blank()?;
        console.line("Main Menu")?;
        console.menu(&[
            ("1", "Series Overview"),
            ("2", "Manage Books"),
            ("3", "Master Codex"),
            ("4", "Master Timeline"),
            ("5", "Series Analysis"),
            ("6", "The Oracle's Advice"),
            ("7", "Save & Exit"),
        ])?;
        let Some(choice) = console.menu_choice()? else {
            break;
        };
        match choice.as_str() {
            "1" => series::run(session, console)?,
            "2" => books::run(session, console)?,
            "3" => codex::run(session, console)?,
            "4" => timeline::run_master(session, console)?,
            "5" => analysis::run(session, console)?,
            "6" => advice::run(session, console)?,
            "7" => break,
            _ => console.line("Unknown option. Please choose 1-7.")?,
        }
    }
    if console.exhausted() {
        tracing::info!("input closed, saving before exit");
    }
    session.save()?;
    console.line("Data saved. Goodbye, and keep writing.")?;
    Ok(())
}

fn welcome(console: &mut Console<'_>) -> ShellResult {
    let rule = "=".repeat(80);
    console.line(&rule)?;
    console.line("SERIES CODEX: your multi-book series manager")?;
    console.line("Type the number or letter of a menu option to proceed.")?;
    console.line(rule)
}

/// Mutate one book and persist the document.
pub(crate) fn with_book<T>(
    session: &mut Session,
    book_id: &str,
    edit: impl FnOnce(&mut Book) -> T,
) -> ShellResult<T> {
    Ok(session.apply(|doc| doc.book_mut(book_id).map(edit))??)
}

/// Render an optional number, `-` when unset.
pub(crate) fn or_dash(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |n| n.to_string())
}
