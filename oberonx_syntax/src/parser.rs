//! Contains the [`Parser`] logic shared by every production.
//!
//! The productions themselves live next to the syntax tree nodes they build, in the
//! [`crate::syntax_tree`] submodules.

use oberonx_base::source_file::Location;
use oberonx_lexical::{
    token::{KeywordKind, Token, TokenKind},
    tokenizer::Tokenizer,
};

use crate::error::{Error, SyntaxError};

/// Is a recursive-descent parser reading its input through a [`Tokenizer`] with one token of
/// lookahead.
///
/// Every production starts at the current token and leaves the parser at the first token it did
/// not consume.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser reading tokens from the given tokenizer.
    #[must_use]
    pub fn new(tokenizer: Tokenizer<'a>) -> Self { Self { tokenizer } }

    /// Gets the tokenizer the parser reads from.
    #[must_use]
    pub fn tokenizer(&self) -> &Tokenizer<'a> { &self.tokenizer }

    /// Gets the current token.
    #[must_use]
    pub fn current(&self) -> &Token { self.tokenizer.current() }

    /// Gets the kind of the current token.
    #[must_use]
    pub fn kind(&self) -> TokenKind { self.tokenizer.kind() }

    /// Gets the location of the current token.
    #[must_use]
    pub fn location(&self) -> Location { self.tokenizer.location() }

    /// Returns `true` if the current token is of the given kind.
    #[must_use]
    pub fn at(&self, kind: impl Into<TokenKind>) -> bool { self.kind() == kind.into() }

    /// Returns `true` if the current token is the given keyword.
    #[must_use]
    pub fn at_keyword(&self, keyword: KeywordKind) -> bool { self.at(keyword) }

    /// Consumes the current token.
    ///
    /// # Errors
    /// [`Error::Lexical`] if the next token cannot be scanned.
    pub fn advance(&mut self) -> Result<(), Error> {
        self.tokenizer.advance()?;
        Ok(())
    }

    /// Creates a [`SyntaxError`] pointing at the current token.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> Error {
        SyntaxError::new(self.location(), message.into()).into()
    }

    /// Checks that the current token is of the given kind without consuming it.
    ///
    /// # Errors
    /// [`Error::Syntax`] carrying `message` if the current token is of another kind.
    pub fn check_symbol(&self, kind: impl Into<TokenKind>, message: &str) -> Result<(), Error> {
        if self.at(kind) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// Checks that the current token is of the given kind and consumes it.
    ///
    /// The check happens before advancing, so the error points at the offending token.
    ///
    /// # Errors
    /// [`Error::Syntax`] carrying `message` if the current token is of another kind, or
    /// [`Error::Lexical`] if the next token cannot be scanned.
    pub fn check_symbol_and_advance(
        &mut self,
        kind: impl Into<TokenKind>,
        message: &str,
    ) -> Result<(), Error> {
        self.check_symbol(kind, message)?;
        self.advance()
    }

    /// Consumes the current token if it is of the given kind.
    ///
    /// # Errors
    /// [`Error::Lexical`] if the next token cannot be scanned.
    pub fn eat(&mut self, kind: impl Into<TokenKind>) -> Result<bool, Error> {
        if self.at(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects the current token to be an identifier, consumes it and returns its text.
    ///
    /// # Errors
    /// [`Error::Syntax`] carrying `message` if the current token is not an identifier, or
    /// [`Error::Lexical`] if the next token cannot be scanned.
    pub fn expect_identifier(&mut self, message: &str) -> Result<String, Error> {
        self.check_symbol(TokenKind::Identifier, message)?;
        let name = self.tokenizer.text().to_owned();
        self.advance()?;
        Ok(name)
    }
}
