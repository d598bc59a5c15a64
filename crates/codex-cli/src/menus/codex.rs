use comfy_table::{ContentArrangement, Table};

use codex_core::{CharacterInput, Id, LocationInput, LoreInput, Session};

use crate::console::Console;
use crate::error::ShellResult;

pub fn run(session: &mut Session, console: &mut Console<'_>) -> ShellResult {
    loop {
        console.heading("Master Codex")?;
        console.menu(&[
            ("A", "Characters"),
            ("B", "Locations"),
            ("C", "Lore/Magic System"),
            ("D", "Back"),
        ])?;
        let Some(choice) = console.menu_choice()? else {
            break;
        };
        match choice.as_str() {
            "a" => characters(session, console)?,
            "b" => locations(session, console)?,
            "c" => lore(session, console)?,
            "d" => break,
            _ => console.line("Unknown option.")?,
        }
    }
    Ok(())
}

/// Prompt for every field of a new master character.
pub(crate) fn read_character_input(console: &mut Console<'_>) -> ShellResult<CharacterInput> {
    console.heading("Create Master Character")?;
    Ok(CharacterInput {
        name: console.ask("Character Name: ")?,
        role: console.ask("Role in series (short): ")?,
        personality: console.ask("Personality summary (keywords or short sentence): ")?,
        series_arc: console
            .ask("Series-wide arc (summary of character growth across books): ")?,
        notes: console.ask("Additional notes (optional): ")?,
    })
}

fn crud_menu(
    console: &mut Console<'_>,
    title: &str,
    (noun, plural): (&str, &str),
) -> ShellResult<Option<String>> {
    let labels = [
        format!("List {plural}"),
        format!("Create {noun}"),
        format!("Edit {noun}"),
        format!("Delete {noun}"),
    ];
    console.blank()?;
    console.line(title)?;
    console.menu(&[
        ("1", labels[0].as_str()),
        ("2", labels[1].as_str()),
        ("3", labels[2].as_str()),
        ("4", labels[3].as_str()),
        ("5", "Back"),
    ])?;
    console.menu_choice()
}

fn new_table(console: &Console<'_>, header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(u16::try_from(console.width()).unwrap_or(u16::MAX));
    table.set_header(header.to_vec());
    table
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

fn characters(session: &mut Session, console: &mut Console<'_>) -> ShellResult {
    loop {
        let Some(choice) = crud_menu(console, "Master Characters", ("character", "characters"))?
        else {
            break;
        };
        let labels: Vec<String> = session
            .document()
            .master
            .characters
            .iter()
            .map(|c| format!("{} ({})", c.name, c.role))
            .collect();
        match choice.as_str() {
            "1" => list_characters(session, console)?,
            "2" => {
                let input = read_character_input(console)?;
                let name = session
                    .apply(|doc| doc.create_character(input).name.clone())?;
                console.reaction(&format!("Master character '{name}' created and saved."))?;
            }
            "3" => {
                let Some(index) = console.choose(&labels, "Select character to edit: ")? else {
                    continue;
                };
                let current = session.document().master.characters[index].clone();
                let input = CharacterInput {
                    name: console.ask(&format!("Name [{}]: ", current.name))?,
                    role: console.ask(&format!("Role [{}]: ", current.role))?,
                    personality: console.ask(&format!("Personality [{}]: ", current.personality))?,
                    series_arc: console.ask(&format!("Series Arc [{}]: ", current.series_arc))?,
                    notes: console.ask(&format!("Notes [{}]: ", current.notes))?,
                };
                let analysis = session.apply(|doc| {
                    doc.edit_character(current.id.as_str(), input)
                        .map(|c| c.personality_analysis.clone())
                })??;
                console.line(format!("Personality analysis: {analysis}"))?;
                console.reaction(
                    "Master character updated. Book references pick up the change automatically.",
                )?;
            }
            "4" => {
                let Some(index) = console.choose(&labels, "Select character to delete: ")? else {
                    continue;
                };
                let id = session.document().master.characters[index].id.clone();
                let removed = session.apply(|doc| doc.delete_character(id.as_str()))??;
                console.line(format!(
                    "Deleted {} and removed references from books.",
                    removed.name
                ))?;
            }
            "5" => break,
            _ => console.line("Unknown option.")?,
        }
    }
    Ok(())
}

fn list_characters(session: &Session, console: &mut Console<'_>) -> ShellResult {
    let characters = &session.document().master.characters;
    if characters.is_empty() {
        return console.line("No characters yet.");
    }
    let mut table = new_table(console, &["Id", "Name", "Role", "Personality analysis"]);
    for c in characters {
        table.add_row(vec![
            c.id.as_str(),
            c.name.as_str(),
            c.role.as_str(),
            c.personality_analysis.as_str(),
        ]);
    }
    console.line(table)
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

fn locations(session: &mut Session, console: &mut Console<'_>) -> ShellResult {
    loop {
        let Some(choice) = crud_menu(console, "Master Locations", ("location", "locations"))? else {
            break;
        };
        let names: Vec<(Id, String)> = session
            .document()
            .master
            .locations
            .iter()
            .map(|l| (l.id.clone(), l.name.clone()))
            .collect();
        let labels: Vec<&str> = names.iter().map(|(_, n)| n.as_str()).collect();
        match choice.as_str() {
            "1" => list_locations(session, console)?,
            "2" => {
                let input = LocationInput {
                    name: console.ask("Location Name: ")?,
                    brief: console.ask("Brief description: ")?,
                    evolution: console.ask("How it changes across the series: ")?,
                };
                session.apply(|doc| {
                    doc.create_location(input);
                })?;
                console.reaction("Location added.")?;
            }
            "3" => {
                let Some(index) = console.choose(&labels, "Select location to edit: ")? else {
                    continue;
                };
                let current = session.document().master.locations[index].clone();
                let input = LocationInput {
                    name: console.ask(&format!("Name [{}]: ", current.name))?,
                    brief: console.ask(&format!("Brief [{}]: ", current.brief))?,
                    evolution: console.ask(&format!("Evolution [{}]: ", current.evolution))?,
                };
                session.apply(|doc| doc.edit_location(current.id.as_str(), input).map(|_| ()))??;
                console.reaction("Location updated.")?;
            }
            "4" => {
                let Some(index) = console.choose(&labels, "Select location to delete: ")? else {
                    continue;
                };
                let id = &names[index].0;
                let removed = session.apply(|doc| doc.delete_location(id.as_str()))??;
                console.line(format!("Deleted {}.", removed.name))?;
            }
            "5" => break,
            _ => console.line("Unknown option.")?,
        }
    }
    Ok(())
}

fn list_locations(session: &Session, console: &mut Console<'_>) -> ShellResult {
    let locations = &session.document().master.locations;
    if locations.is_empty() {
        return console.line("No locations yet.");
    }
    let mut table = new_table(console, &["Id", "Name", "Brief", "Evolution"]);
    for l in locations {
        table.add_row(vec![
            l.id.as_str(),
            l.name.as_str(),
            l.brief.as_str(),
            l.evolution.as_str(),
        ]);
    }
    console.line(table)
}

// ---------------------------------------------------------------------------
// Lore
// ---------------------------------------------------------------------------

fn lore(session: &mut Session, console: &mut Console<'_>) -> ShellResult {
    loop {
        let Some(choice) =
            crud_menu(console, "Lore / Magic System", ("lore entry", "lore entries"))?
        else {
            break;
        };
        let titles: Vec<(Id, String)> = session
            .document()
            .master
            .lore
            .iter()
            .map(|l| (l.id.clone(), l.title.clone()))
            .collect();
        let labels: Vec<&str> = titles.iter().map(|(_, t)| t.as_str()).collect();
        match choice.as_str() {
            "1" => {
                let entries = &session.document().master.lore;
                if entries.is_empty() {
                    console.line("No lore entries yet.")?;
                }
                for entry in entries {
                    console.line(format!("- {} (id:{})", entry.title, entry.id))?;
                    console.wrapped(&entry.summary, 4)?;
                }
            }
            "2" => {
                let input = LoreInput {
                    title: console.ask("Title (rule or piece of lore): ")?,
                    summary: console.ask("Summary / rules: ")?,
                };
                session.apply(|doc| {
                    doc.create_lore(input);
                })?;
                console.reaction("Lore entry added.")?;
            }
            "3" => {
                let Some(index) = console.choose(&labels, "Select lore entry to edit: ")? else {
                    continue;
                };
                let current = session.document().master.lore[index].clone();
                let input = LoreInput {
                    title: console.ask(&format!("Title [{}]: ", current.title))?,
                    summary: console.ask(&format!("Summary [{}]: ", current.summary))?,
                };
                session.apply(|doc| doc.edit_lore(current.id.as_str(), input).map(|_| ()))??;
                console.reaction("Lore updated.")?;
            }
            "4" => {
                let Some(index) = console.choose(&labels, "Select lore to delete: ")? else {
                    continue;
                };
                let id = &titles[index].0;
                let removed = session.apply(|doc| doc.delete_lore(id.as_str()))??;
                console.line(format!("Deleted {}.", removed.title))?;
            }
            "5" => break,
            _ => console.line("Unknown option.")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::tests::drive;

    #[test]
    fn character_create_list_and_edit() {
        let dir = TempDir::new().unwrap();
        let script = [
            "3", "a",
            "2", "Ava", "Hero", "quiet and organized", "Thief to queen", "",
            "1",
            "3", "1", "", "", "blunt", "", "",
            "5", "d", "7",
        ]
        .join("\n");
        let (session, out) = drive(&dir, &script);
        assert!(out.contains("Master character 'Ava' created and saved."));
        assert!(out.contains("char_1"));
        assert!(out.contains("Personality [quiet and organized]: "));
        let ava = &session.document().master.characters[0];
        assert_eq!(ava.name, "Ava");
        assert_eq!(ava.series_arc, "Thief to queen");
        assert_eq!(
            ava.personality_analysis,
            "Low agreeableness: may be blunt or confrontational."
        );
    }

    #[test]
    fn locations_crud() {
        let dir = TempDir::new().unwrap();
        let script = [
            "3", "b",
            "2", "Harbor", "A port town", "Burns in book 2",
            "2", "Citadel", "", "",
            "3", "1", "Old Harbor", "", "",
            "4", "2",
            "1",
            "5", "d", "7",
        ]
        .join("\n");
        let (session, out) = drive(&dir, &script);
        let locations = &session.document().master.locations;
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Old Harbor");
        assert_eq!(locations[0].brief, "A port town");
        assert!(out.contains("Deleted Citadel."));
        assert!(out.contains("loc_1"));
    }

    #[test]
    fn lore_crud_and_empty_list() {
        let dir = TempDir::new().unwrap();
        let script = [
            "3", "c",
            "1",
            "2", "Blood magic", "Costs a memory per spell.",
            "3", "1", "", "Costs a memory per spell, always the happiest one.",
            "1",
            "4", "1",
            "5", "d", "7",
        ]
        .join("\n");
        let (session, out) = drive(&dir, &script);
        assert!(out.contains("No lore entries yet."));
        assert!(out.contains("always the happiest one."));
        assert!(out.contains("Deleted Blood magic."));
        assert!(session.document().master.lore.is_empty());
    }

    #[test]
    fn cancelled_selection_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let script = ["3", "a", "4", "5", "d", "7"].join("\n");
        let (_, out) = drive(&dir, &script);
        assert!(out.contains("(none)"));
    }
}
