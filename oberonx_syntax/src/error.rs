//! Contains the errors that abort parsing.

use derive_more::From;
use derive_new::new;
use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use oberonx_base::{diagnostic::Diagnostic, source_file::Location};
use oberonx_lexical::error as lexical;
use thiserror::Error;

/// The current token does not fit the production being parsed.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error, Getters, CopyGetters, new,
)]
#[error("{message}")]
pub struct SyntaxError {
    /// Gets the location of the offending token.
    #[get_copy = "pub"]
    location: Location,

    /// Gets the description of what the parser expected.
    #[get = "pub"]
    message: String,
}

/// Is an enumeration containing every error that can abort a parse: the lexical errors raised
/// while advancing the tokenizer and the syntax errors raised by the productions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Error, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Lexical(lexical::Error),

    #[error(transparent)]
    Syntax(SyntaxError),
}

impl Error {
    /// Gets the location the error points at.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::Lexical(error) => error.location(),
            Self::Syntax(error) => error.location,
        }
    }
}

impl From<Error> for Diagnostic {
    fn from(error: Error) -> Self {
        match error {
            Error::Lexical(error) => error.into(),
            Error::Syntax(error) => Self::at(error.location, error.message),
        }
    }
}
