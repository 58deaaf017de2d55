//! Contains the [`Diagnostic`] value every front-end error is reported as.

use derive_new::new;
use getset::{CopyGetters, Getters};
use thiserror::Error;

use crate::source_file::Location;

/// Is the position-tagged description of the first error that aborted tokenizing or parsing.
///
/// The [`Display`](std::fmt::Display) output follows the external diagnostic format
/// `( <line> : <column> ) - <message>`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error, Getters, CopyGetters, new,
)]
#[error("( {line} : {column} ) - {message}")]
pub struct Diagnostic {
    /// Gets the line the error was found at (starts at 1).
    #[get_copy = "pub"]
    line: usize,

    /// Gets the column the error was found at (starts at 1).
    #[get_copy = "pub"]
    column: usize,

    /// Gets the human-readable description of the error.
    #[get = "pub"]
    message: String,
}

impl Diagnostic {
    /// Creates a [`Diagnostic`] pointing at the given location.
    #[must_use]
    pub fn at(location: Location, message: impl Into<String>) -> Self {
        Self::new(location.line, location.column, message.into())
    }

    /// Gets the location the error was found at.
    #[must_use]
    pub fn location(&self) -> Location { Location::new(self.line, self.column) }

    /// Renders the diagnostic in the external format, line terminator included.
    #[must_use]
    pub fn render(&self) -> String { format!("{self}\r\n") }
}

#[cfg(test)]
mod tests {
    use super::Diagnostic;
    use crate::source_file::Location;

    #[test]
    fn renders_external_format() {
        let diagnostic = Diagnostic::at(Location::new(4, 12), "Expecting 'THEN' in 'IF' statement!");

        assert_eq!(
            diagnostic.to_string(),
            "( 4 : 12 ) - Expecting 'THEN' in 'IF' statement!"
        );
        assert_eq!(
            diagnostic.render(),
            "( 4 : 12 ) - Expecting 'THEN' in 'IF' statement!\r\n"
        );
        assert_eq!(diagnostic.location(), Location::new(4, 12));
    }
}
