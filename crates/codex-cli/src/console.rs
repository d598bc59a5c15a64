//! Line-oriented terminal I/O for the menu shell.

use std::fmt::Display;
use std::io::{BufRead, Write};

use colored::Colorize;

use crate::error::ShellResult;

/// Prompts, menus and wrapped prose over any reader/writer pair.
///
/// End of input is reported as an empty answer; once it has been seen,
/// [`Console::menu_choice`] returns `None` so menu loops can unwind.
pub struct Console<'io> {
    input: &'io mut dyn BufRead,
    output: &'io mut dyn Write,
    wrap_width: usize,
    exhausted: bool,
}

impl<'io> Console<'io> {
    pub fn new(input: &'io mut dyn BufRead, output: &'io mut dyn Write, wrap_width: usize) -> Self {
        Self {
            input,
            output,
            wrap_width,
            exhausted: false,
        }
    }

    /// Print `prompt` and read one trimmed line.
    pub fn ask(&mut self, prompt: &str) -> ShellResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        if self.exhausted {
            writeln!(self.output)?;
            return Ok(String::new());
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.exhausted = true;
            writeln!(self.output)?;
            tracing::debug!("end of input reached");
        }
        Ok(line.trim().to_string())
    }

    /// Read a menu selection, lower-cased. `None` once input is exhausted.
    pub fn menu_choice(&mut self) -> ShellResult<Option<String>> {
        let choice = self.ask("> ")?;
        if self.exhausted && choice.is_empty() {
            return Ok(None);
        }
        Ok(Some(choice.to_lowercase()))
    }

    /// Configured wrap width, also used for tables.
    pub fn width(&self) -> usize {
        self.wrap_width
    }

    /// Whether end of input has been reached.
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn line(&mut self, text: impl Display) -> ShellResult {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> ShellResult {
        writeln!(self.output)?;
        Ok(())
    }

    /// Section heading, preceded by a blank line.
    pub fn heading(&mut self, title: &str) -> ShellResult {
        writeln!(self.output)?;
        writeln!(self.output, "{}", format!("--- {title} ---").bold())?;
        Ok(())
    }

    /// Print menu entries as `[key] label`.
    pub fn menu(&mut self, entries: &[(&str, &str)]) -> ShellResult {
        for (key, label) in entries {
            writeln!(self.output, "[{key}] {label}")?;
        }
        Ok(())
    }

    /// Print prose wrapped to the configured width.
    pub fn wrapped(&mut self, text: &str, indent: usize) -> ShellResult {
        let filled = fill(text, self.wrap_width, indent);
        if !filled.is_empty() {
            writeln!(self.output, "{filled}")?;
        }
        Ok(())
    }

    /// Encouraging note after a successful change.
    pub fn reaction(&mut self, text: &str) -> ShellResult {
        writeln!(self.output, "{} {text}", "[Reactive Comment]".green())?;
        Ok(())
    }

    /// Non-fatal notice, e.g. a cancelled selection.
    pub fn notice(&mut self, text: &str) -> ShellResult {
        writeln!(self.output, "{}", text.yellow())?;
        Ok(())
    }

    /// Number `items` from 1 and read a selection.
    ///
    /// Returns the zero-based index, or `None` for an empty list, a blank
    /// answer, or anything that is not a listed number.
    pub fn choose<S: AsRef<str>>(
        &mut self,
        items: &[S],
        prompt: &str,
    ) -> ShellResult<Option<usize>> {
        if items.is_empty() {
            writeln!(self.output, "  (none)")?;
            return Ok(None);
        }
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  [{}] {}", i + 1, item.as_ref())?;
        }
        let answer = self.ask(prompt)?;
        let index = answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=items.len()).contains(n))
            .map(|n| n - 1);
        if index.is_none() && !answer.is_empty() {
            tracing::debug!(%answer, "selection cancelled");
        }
        Ok(index)
    }
}

/// Greedy word wrap with a fixed left indent.
pub fn fill(text: &str, width: usize, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            indent + word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if current.is_empty() {
            current.push_str(&pad);
        } else {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}
