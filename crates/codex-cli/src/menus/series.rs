use codex_core::{Series, SeriesInput, Session};

use super::or_dash;
use crate::console::Console;
use crate::error::ShellResult;

pub fn run(session: &mut Session, console: &mut Console<'_>) -> ShellResult {
    console.heading("Series Overview")?;
    match &session.document().series {
        Some(series) => {
            console.line("Current series info:")?;
            show(console, series)?;
        }
        None => console.line("No series defined yet.")?,
    }

    console.blank()?;
    console.line("Options:")?;
    console.menu(&[("1", "Create / Edit Series"), ("2", "Back to Main Menu")])?;
    if console.menu_choice()?.as_deref() != Some("1") {
        return Ok(());
    }

    // Every field is replaced, blanks included.
    let input = SeriesInput {
        title: console.ask("Series Title: ")?,
        genre: console.ask("Overall Genre: ")?,
        logline: console.ask("Series Logline (one sentence): ")?,
        planned_books: console.ask("Planned number of books (or leave blank): ")?,
        interconnection_style: console.ask(
            "Interconnection Style (e.g., 'Standalone novels with shared world', 'Sequential saga'): ",
        )?,
        protagonist_arc: console.ask("Protagonist's Overall Arc (1-2 sentences): ")?,
    };
    session.apply(|doc| {
        doc.set_series(input);
    })?;
    console.blank()?;
    console.reaction("Series overview saved. You just built the spine of your saga.")
}

fn show(console: &mut Console<'_>, series: &Series) -> ShellResult {
    console.line(format!("  title:                 {}", series.title))?;
    console.line(format!("  genre:                 {}", series.genre))?;
    console.line(format!("  logline:               {}", series.logline))?;
    console.line(format!("  planned books:         {}", or_dash(series.planned_books)))?;
    console.line(format!("  interconnection style: {}", series.interconnection_style))?;
    console.line(format!("  protagonist arc:       {}", series.protagonist_overall_arc))?;
    console.line(format!(
        "  updated:               {}",
        series.updated_at.format("%Y-%m-%d %H:%M UTC")
    ))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::tests::drive;

    #[test]
    fn create_then_view_series() {
        let dir = TempDir::new().unwrap();
        let script = "1\n1\nAshes\nFantasy\nA saga.\nthree\nSequential\nThief to queen\n1\n2\n7\n";
        let (session, out) = drive(&dir, script);
        let series = session.document().series.as_ref().unwrap();
        assert_eq!(series.title, "Ashes");
        assert_eq!(series.planned_books, None);
        assert!(out.contains("Series overview saved."));
        assert!(out.contains("title:                 Ashes"));
    }

    #[test]
    fn re_editing_replaces_every_field() {
        let dir = TempDir::new().unwrap();
        let script = "1\n1\nAshes\nFantasy\n\n3\n\n\n1\n1\n\nHorror\n\n\n\n\n7\n";
        let (session, _) = drive(&dir, script);
        let series = session.document().series.as_ref().unwrap();
        assert_eq!(series.title, "");
        assert_eq!(series.genre, "Horror");
        assert_eq!(series.planned_books, None);
    }
}
