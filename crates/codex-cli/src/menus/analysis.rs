use codex_core::Session;

use crate::console::Console;
use crate::error::ShellResult;

pub fn run(session: &Session, console: &mut Console<'_>) -> ShellResult {
    loop {
        console.heading("Series Analysis")?;
        console.menu(&[
            ("1", "Continuity Check"),
            ("2", "Character Arc Report"),
            ("3", "Thematic Cohesion"),
            ("4", "Back"),
        ])?;
        let Some(choice) = console.menu_choice()? else {
            break;
        };
        match choice.as_str() {
            "1" => continuity(session, console)?,
            "2" => arc_report(session, console)?,
            "3" => cohesion(session, console)?,
            "4" => break,
            _ => console.line("Unknown option.")?,
        }
    }
    Ok(())
}

fn continuity(session: &Session, console: &mut Console<'_>) -> ShellResult {
    console.heading("Continuity Check")?;
    let issues = session.document().continuity_check();
    if issues.is_empty() {
        return console.line("No obvious continuity issues found. (This is a lightweight scan.)");
    }
    console.line("Potential continuity issues found:")?;
    for issue in &issues {
        console.line(format!("- {issue}"))?;
    }
    Ok(())
}

fn arc_report(session: &Session, console: &mut Console<'_>) -> ShellResult {
    console.heading("Character Arc Report")?;
    let doc = session.document();
    let names: Vec<&str> = doc.master.characters.iter().map(|c| c.name.as_str()).collect();
    let Some(index) = console.choose(&names, "Select character for arc report: ")? else {
        return Ok(());
    };
    let Some(report) = doc.character_arc_report(doc.master.characters[index].id.as_str()) else {
        return Ok(());
    };
    let character = report.character;
    console.blank()?;
    console.line(format!("Character: {}", character.name))?;
    console.line(format!("Master role: {}", character.role))?;
    console.line(format!("Series arc: {}", character.series_arc))?;
    console.line("Personality analysis:")?;
    console.wrapped(&character.personality_analysis, 2)?;
    if report.appearances.is_empty() {
        return console.line("(Character not assigned to any book yet.)");
    }
    console.line("Appearances by book:")?;
    for appearance in &report.appearances {
        let (role, notes) = appearance
            .profile
            .map(|p| (p.role_in_book.as_str(), p.notes.as_str()))
            .unwrap_or_default();
        console.line(format!(
            "- {}: role: {role}; notes: {notes}",
            appearance.book.title
        ))?;
    }
    Ok(())
}

fn cohesion(session: &Session, console: &mut Console<'_>) -> ShellResult {
    console.heading("Thematic Cohesion Analysis")?;
    let Some(report) = session.document().thematic_cohesion() else {
        return console.line(
            "No themes recorded across books. Consider tagging themes for each book.",
        );
    };
    console.line("Themes and coverage across books:")?;
    for coverage in &report.themes {
        let flag = if coverage.under_represented {
            " (under-represented)"
        } else {
            ""
        };
        console.line(format!(
            "- {}: appears in {} book(s){flag}",
            coverage.theme, coverage.count
        ))?;
    }
    console.blank()?;
    console.line("Observations:")?;
    console.wrapped(report.observation(), 2)
}
