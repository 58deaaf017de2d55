//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Color, Style};

use crate::source_file::{Location, SourceFile};

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Style::Bold.with(match self.severity {
            Severity::Error => Color::Red.with("[error]:"),
            Severity::Info => Color::Green.with("[info]:"),
            Severity::Warning => Color::Yellow.with("[warning]:"),
        });

        let message_part = Style::Bold.with(&self.display);

        write!(f, "{log_header} {message_part}")
    }
}

fn get_digit(mut number: usize) -> usize {
    let mut digit = 0;

    while number > 0 {
        number /= 10;
        digit += 1;
    }

    digit
}

/// Structure implementing [`Display`] that prints the source line around a location with a caret
/// pointing at its column.
#[derive(Debug, Clone, Copy, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The source file the location refers to.
    pub source_file: &'a SourceFile,

    /// The location to point at.
    pub location: Location,

    /// The help message printed next to the caret.
    pub help_display: Option<T>,
}

impl<'a, T> SourceCodeDisplay<'a, T> {
    fn write_gutter(
        f: &mut std::fmt::Formatter<'_>,
        line_number: Option<usize>,
        width: usize,
    ) -> std::fmt::Result {
        match line_number {
            Some(line_number) => write!(
                f,
                "{}{:pad$} {} ",
                Style::Bold.with(Color::Cyan.with(line_number)),
                "",
                Style::Bold.with(Color::Cyan.with("┃")),
                pad = width - get_digit(line_number),
            ),
            None => write!(
                f,
                "{:width$} {} ",
                "",
                Style::Bold.with(Color::Cyan.with("┃")),
            ),
        }
    }

    fn write_line(f: &mut std::fmt::Formatter<'_>, line: &str) -> std::fmt::Result {
        for character in line.chars() {
            match character {
                '\t' => write!(f, "    ")?,
                '\n' | '\r' => {}
                character => write!(f, "{character}")?,
            }
        }

        writeln!(f)
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = self.location.line;
        let width = get_digit(line + 1);

        writeln!(
            f,
            "{:width$}{} {}:{}",
            "",
            Style::Bold.with(Color::Cyan.with("-->")),
            self.source_file.full_path().display(),
            self.location,
        )?;

        Self::write_gutter(f, None, width)?;
        writeln!(f)?;

        if let Some(previous) = self.source_file.get_line(line.saturating_sub(1)) {
            Self::write_gutter(f, Some(line - 1), width)?;
            Self::write_line(f, previous)?;
        }

        let current = self.source_file.get_line(line).unwrap_or_default();
        Self::write_gutter(f, Some(line), width)?;
        Self::write_line(f, current)?;

        // the caret is aligned by re-emitting the expanded width of every preceding character
        Self::write_gutter(f, None, width)?;
        for character in current.chars().take(self.location.column.saturating_sub(1)) {
            write!(f, "{}", if character == '\t' { "    " } else { " " })?;
        }
        write!(f, "{}", Style::Bold.with(Color::Red.with("^")))?;
        if let Some(help) = &self.help_display {
            write!(f, " {}: {help}", Style::Bold.with("help"))?;
        }
        writeln!(f)?;

        if let Some(next) = self.source_file.get_line(line + 1) {
            Self::write_gutter(f, Some(line + 1), width)?;
            Self::write_line(f, next)?;
        }

        Ok(())
    }
}
