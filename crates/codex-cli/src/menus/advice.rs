use codex_core::Session;

use crate::console::Console;
use crate::error::ShellResult;

/// Ask one question and print the matching advice.
pub fn run(session: &Session, console: &mut Console<'_>) -> ShellResult {
    console.heading("The Oracle's Advice")?;
    console.line("Type a focused query like:")?;
    console.line("  - 'What conflicts could arise between [Character A] and [Character B]?'")?;
    console.line("  - 'How can I escalate stakes in Book 2?'")?;
    let query = console.ask("> ")?;
    let advice = session.document().advice(&query);
    console.blank()?;
    console.wrapped(&advice.heading, 0)?;
    for point in &advice.points {
        console.wrapped(point, 2)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::tests::drive;

    #[test]
    fn empty_query() {
        let dir = TempDir::new().unwrap();
        let (_, out) = drive(&dir, "6\n\n7\n");
        assert!(out.contains("No query entered."));
    }

    #[test]
    fn escalation_query() {
        let dir = TempDir::new().unwrap();
        let (_, out) = drive(&dir, "6\nHow do I raise the stakes?\n7\n");
        assert!(out.contains("Ways to escalate stakes:"));
        assert!(out.contains("Moral stakes"));
    }
}
