//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr};

use derive_new::new;
use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use lazy_static::lazy_static;
use oberonx_base::source_file::{Location, SourceElement};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// Is an enumeration representing keywords of the language.
///
/// Every keyword is spelled either entirely in uppercase or entirely in lowercase; a mixed-case
/// spelling such as `Module` is an ordinary identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Array,
    Begin,
    By,
    Case,
    Const,
    Definition,
    Div,
    Do,
    Else,
    Elsif,
    End,
    Exit,
    False,
    For,
    If,
    Import,
    In,
    Is,
    Loop,
    Mod,
    Module,
    Nil,
    Of,
    Or,
    Pointer,
    Proc,
    Procedure,
    Record,
    Repeat,
    Return,
    Then,
    To,
    True,
    Type,
    Until,
    Var,
    While,
    With,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

lazy_static! {
    static ref STRING_KEYWORD_MAP: HashMap<String, KeywordKind> = {
        let mut map = HashMap::new();

        for keyword in KeywordKind::iter() {
            map.insert(keyword.as_str().to_owned(), keyword);
            map.insert(keyword.as_str().to_ascii_lowercase(), keyword);
        }

        map
    };
}

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STRING_KEYWORD_MAP.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the uppercase spelling of the keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Array => "ARRAY",
            Self::Begin => "BEGIN",
            Self::By => "BY",
            Self::Case => "CASE",
            Self::Const => "CONST",
            Self::Definition => "DEFINITION",
            Self::Div => "DIV",
            Self::Do => "DO",
            Self::Else => "ELSE",
            Self::Elsif => "ELSIF",
            Self::End => "END",
            Self::Exit => "EXIT",
            Self::False => "FALSE",
            Self::For => "FOR",
            Self::If => "IF",
            Self::Import => "IMPORT",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Loop => "LOOP",
            Self::Mod => "MOD",
            Self::Module => "MODULE",
            Self::Nil => "NIL",
            Self::Of => "OF",
            Self::Or => "OR",
            Self::Pointer => "POINTER",
            Self::Proc => "PROC",
            Self::Procedure => "PROCEDURE",
            Self::Record => "RECORD",
            Self::Repeat => "REPEAT",
            Self::Return => "RETURN",
            Self::Then => "THEN",
            Self::To => "TO",
            Self::True => "TRUE",
            Self::Type => "TYPE",
            Self::Until => "UNTIL",
            Self::Var => "VAR",
            Self::While => "WHILE",
            Self::With => "WITH",
        }
    }

    /// Returns `true` if the keyword can start a statement.
    #[must_use]
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            Self::If
                | Self::Case
                | Self::With
                | Self::Loop
                | Self::Exit
                | Self::Return
                | Self::While
                | Self::Repeat
                | Self::For
        )
    }
}

/// Is an enumeration containing all kinds of tokens of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum TokenKind {
    Keyword(KeywordKind),

    Minus,
    Comma,
    Semicolon,
    Colon,
    Assign,
    Dot,
    UpTo,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Asterisk,
    Slash,
    Hash,
    Caret,
    Plus,
    LessEqual,
    GreaterEqual,
    Bar,
    Tilde,
    Less,
    Greater,
    Equal,
    Ampersand,

    Identifier,
    Number,
    String,
    HexString,
    HexChar,

    Eof,
}

impl From<KeywordKind> for TokenKind {
    fn from(keyword: KeywordKind) -> Self { Self::Keyword(keyword) }
}

impl TokenKind {
    /// Gets the source spelling of a punctuation token, `None` for every other kind.
    #[must_use]
    pub fn punctuation(self) -> Option<&'static str> {
        Some(match self {
            Self::Minus => "-",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Assign => ":=",
            Self::Dot => ".",
            Self::UpTo => "..",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Hash => "#",
            Self::Caret => "^",
            Self::Plus => "+",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Bar => "|",
            Self::Tilde => "~",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "=",
            Self::Ampersand => "&",
            _ => return None,
        })
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(punctuation) = self.punctuation() {
            return write!(f, "'{punctuation}'");
        }

        match self {
            Self::Keyword(keyword) => write!(f, "'{keyword}'"),
            Self::Identifier => f.write_str("identifier"),
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string"),
            Self::HexString => f.write_str("hex string"),
            Self::HexChar => f.write_str("hex character"),
            Self::Eof => f.write_str("end of file"),
            _ => unreachable!("punctuation is handled above"),
        }
    }
}

/// Represents a single lexical unit produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters, new)]
pub struct Token {
    /// Gets the kind of the token.
    #[get_copy = "pub"]
    kind: TokenKind,

    /// Gets the raw lexeme of identifiers and literals; empty for every other kind.
    ///
    /// String and hex string literals are stored without their delimiters.
    #[get = "pub"]
    text: String,

    /// Gets the location of the first character of the token.
    #[get_copy = "pub"]
    location: Location,
}

impl Token {
    /// Creates an end-of-file token at the given location.
    #[must_use]
    pub fn eof(location: Location) -> Self { Self::new(TokenKind::Eof, String::new(), location) }

    /// Creates a token that carries no text.
    #[must_use]
    pub fn bare(kind: TokenKind, location: Location) -> Self {
        Self::new(kind, String::new(), location)
    }
}

impl SourceElement for Token {
    fn location(&self) -> Location { self.location }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.location, self.kind)?;

        if !self.text.is_empty() {
            write!(f, " {}", self.text)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
