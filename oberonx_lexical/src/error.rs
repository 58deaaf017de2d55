//! Contains all kinds of lexical errors that can occur while tokenizing the source code.

use oberonx_base::{diagnostic::Diagnostic, source_file::Location};
use thiserror::Error;

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
///
/// Every variant carries the location of the first character of the offending lexeme.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("Illegal character '{character}'!")]
    IllegalCharacter { location: Location, character: char },

    /// The location is the one of the outermost `(*`.
    #[error("Comment is not closed before end of file!")]
    UnterminatedComment { location: Location },

    #[error("String is not closed before end of line!")]
    UnterminatedString { location: Location },

    #[error("Hex string is not closed before end of file!")]
    UnterminatedHexString { location: Location },

    #[error("Illegal character '{character}' in hex string!")]
    MalformedHexString { location: Location, character: char },

    #[error("Malformed number '{text}'!")]
    MalformedNumber { location: Location, text: String },
}

impl Error {
    /// Gets the location the error points at.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::IllegalCharacter { location, .. }
            | Self::UnterminatedComment { location }
            | Self::UnterminatedString { location }
            | Self::UnterminatedHexString { location }
            | Self::MalformedHexString { location, .. }
            | Self::MalformedNumber { location, .. } => *location,
        }
    }
}

impl From<Error> for Diagnostic {
    fn from(error: Error) -> Self { Self::at(error.location(), error.to_string()) }
}
