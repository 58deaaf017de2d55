//! Contains the [`Tokenizer`], which scans the characters of a source file into [`Token`]s one at
//! a time.

use std::{str::FromStr, sync::Arc};

use getset::Getters;
use oberonx_base::source_file::{self, Location, SourceFile};

use crate::{
    error::Error,
    token::{KeywordKind, Token, TokenKind},
};

/// Scans a source file lazily, holding only the current [`Token`].
///
/// A freshly created tokenizer holds an end-of-file token at `1:1`; the first real token becomes
/// available after the first call to [`Tokenizer::advance()`].
#[derive(Debug, Clone, Getters)]
pub struct Tokenizer<'a> {
    iterator: source_file::Iterator<'a>,

    /// Gets the current token.
    #[get = "pub"]
    current: Token,

    line: usize,
    column: usize,
}

fn is_hex_digit(character: char) -> bool {
    character.is_ascii_digit() || ('A'..='F').contains(&character)
}

fn is_identifier_character(character: char) -> bool {
    character == '_' || character.is_ascii_alphanumeric()
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer positioned before the first character of the source file.
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>) -> Self {
        Self {
            iterator: source_file.iter(),
            current: Token::eof(Location::default()),
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the whole source file, the trailing end-of-file token included.
    ///
    /// # Errors
    /// The first lexical [`Error`] found in the source file.
    pub fn tokenize(source_file: &'a Arc<SourceFile>) -> Result<Vec<Token>, Error> {
        let mut tokenizer = Self::new(source_file);
        let mut tokens = Vec::new();

        loop {
            tokenizer.advance()?;
            tokens.push(tokenizer.current.clone());

            if tokenizer.kind() == TokenKind::Eof {
                return Ok(tokens);
            }
        }
    }

    /// Gets the source file being tokenized.
    #[must_use]
    pub fn source_file(&self) -> &'a Arc<SourceFile> { self.iterator.source_file() }

    /// Gets the kind of the current token.
    #[must_use]
    pub fn kind(&self) -> TokenKind { self.current.kind() }

    /// Gets the text of the current token.
    #[must_use]
    pub fn text(&self) -> &str { self.current.text() }

    /// Gets the location of the current token.
    #[must_use]
    pub fn location(&self) -> Location { self.current.location() }

    /// Discards the current token and scans the next one.
    ///
    /// Once the end of the source file is reached, every further call produces another
    /// end-of-file token.
    ///
    /// # Errors
    /// Any lexical [`Error`] found while scanning the next token. The current token is left
    /// unchanged in that case.
    pub fn advance(&mut self) -> Result<(), Error> {
        self.skip_insignificant()?;

        let location = self.position();
        let Some(character) = self.bump() else {
            self.current = Token::eof(location);
            return Ok(());
        };

        self.current = match character {
            '_' | 'a'..='z' | 'A'..='Z' => self.handle_identifier_and_keyword(character, location),
            '0'..='9' => self.handle_numeric_literal(character, location)?,
            '"' | '\'' => self.handle_string(character, location)?,
            '$' => self.handle_hex_string(location)?,
            _ => Token::bare(self.handle_punctuation(character, location)?, location),
        };

        Ok(())
    }

    fn position(&self) -> Location { Location::new(self.line, self.column) }

    fn peek(&mut self) -> Option<char> { self.iterator.peek().map(|(_, character)| character) }

    fn peek_second(&self) -> Option<char> {
        self.iterator.peek_second().map(|(_, character)| character)
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// Consumes one character. `\r\n` is consumed as a whole and, like a lone `\r`, reported as
    /// `\n`.
    fn bump(&mut self) -> Option<char> {
        let (_, character) = self.iterator.next()?;

        match character {
            '\n' => self.new_line(),
            '\r' => {
                if self.peek() == Some('\n') {
                    self.iterator.next();
                }
                self.new_line();
                return Some('\n');
            }
            _ => self.column += 1,
        }

        Some(character)
    }

    fn bump_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Moves the characters satisfying the predicate into `text`.
    fn walk(&mut self, text: &mut String, predicate: impl Fn(char) -> bool) {
        while let Some(character) = self.peek() {
            if !predicate(character) {
                break;
            }

            text.push(character);
            self.bump();
        }
    }

    fn skip_insignificant(&mut self) -> Result<(), Error> {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\n' | '\r') => {
                    self.bump();
                }
                Some('(') if self.peek_second() == Some('*') => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), Error> {
        let location = self.position();

        // `(*`
        self.bump();
        self.bump();

        let mut depth = 1_usize;
        while depth > 0 {
            match self.bump() {
                Some('(') if self.peek() == Some('*') => {
                    self.bump();
                    depth += 1;
                }
                Some('*') if self.peek() == Some(')') => {
                    self.bump();
                    depth -= 1;
                }
                Some(_) => {}
                None => return Err(Error::UnterminatedComment { location }),
            }
        }

        Ok(())
    }

    fn handle_identifier_and_keyword(&mut self, first: char, location: Location) -> Token {
        let mut text = String::from(first);
        self.walk(&mut text, is_identifier_character);

        match KeywordKind::from_str(&text) {
            Ok(keyword) => Token::bare(keyword.into(), location),
            Err(_) => Token::new(TokenKind::Identifier, text, location),
        }
    }

    fn handle_numeric_literal(&mut self, first: char, location: Location) -> Result<Token, Error> {
        let mut text = String::from(first);
        self.walk(&mut text, is_hex_digit);

        let is_decimal = text.chars().all(|character| character.is_ascii_digit());

        let kind = match self.peek() {
            Some(suffix @ ('H' | 'X')) => {
                text.push(suffix);
                self.bump();

                if suffix == 'H' {
                    TokenKind::Number
                } else {
                    TokenKind::HexChar
                }
            }

            // `1..2` is a range, not the real `1.`
            Some('.') if is_decimal && self.peek_second() != Some('.') => {
                text.push('.');
                self.bump();
                self.walk(&mut text, |character| character.is_ascii_digit());

                if let Some(marker @ ('E' | 'D')) = self.peek() {
                    text.push(marker);
                    self.bump();

                    if let Some(sign @ ('+' | '-')) = self.peek() {
                        text.push(sign);
                        self.bump();
                    }

                    if !self.peek().is_some_and(|character| character.is_ascii_digit()) {
                        return Err(Error::MalformedNumber { location, text });
                    }

                    self.walk(&mut text, |character| character.is_ascii_digit());
                }

                TokenKind::Number
            }

            _ if is_decimal => TokenKind::Number,

            _ => return Err(Error::MalformedNumber { location, text }),
        };

        // a number glued to an identifier character is not two tokens
        if let Some(character) = self.peek().filter(|character| is_identifier_character(*character))
        {
            text.push(character);
            return Err(Error::MalformedNumber { location, text });
        }

        Ok(Token::new(kind, text, location))
    }

    fn handle_string(&mut self, quote: char, location: Location) -> Result<Token, Error> {
        let mut text = String::new();

        loop {
            match self.peek() {
                Some(character) if character == quote => {
                    self.bump();
                    return Ok(Token::new(TokenKind::String, text, location));
                }
                Some('\n' | '\r') | None => return Err(Error::UnterminatedString { location }),
                Some(character) => {
                    text.push(character);
                    self.bump();
                }
            }
        }
    }

    fn handle_hex_string(&mut self, location: Location) -> Result<Token, Error> {
        let mut text = String::new();

        loop {
            let character_location = self.position();

            match self.bump() {
                Some('$') => return Ok(Token::new(TokenKind::HexString, text, location)),
                Some(character) if is_hex_digit(character) || character.is_ascii_whitespace() => {
                    text.push(character);
                }
                Some(character) => {
                    return Err(Error::MalformedHexString {
                        location: character_location,
                        character,
                    })
                }
                None => return Err(Error::UnterminatedHexString { location }),
            }
        }
    }

    fn handle_punctuation(&mut self, character: char, location: Location) -> Result<TokenKind, Error> {
        Ok(match character {
            ':' if self.bump_if('=') => TokenKind::Assign,
            ':' => TokenKind::Colon,
            '<' if self.bump_if('=') => TokenKind::LessEqual,
            '<' => TokenKind::Less,
            '>' if self.bump_if('=') => TokenKind::GreaterEqual,
            '>' => TokenKind::Greater,
            '.' if self.bump_if('.') => TokenKind::UpTo,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '#' => TokenKind::Hash,
            '^' => TokenKind::Caret,
            '+' => TokenKind::Plus,
            '|' => TokenKind::Bar,
            '~' => TokenKind::Tilde,
            '=' => TokenKind::Equal,
            '&' => TokenKind::Ampersand,
            character => return Err(Error::IllegalCharacter { location, character }),
        })
    }
}
