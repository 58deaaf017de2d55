//! Contains all the definition of syntax trees for the language and their parsing logic.
//!
//! Every node records the location of the first token consumed by its production, available
//! through [`SourceElement::location()`]. Nodes own their children exclusively and are never
//! mutated once built.

use getset::{CopyGetters, Getters};
use oberonx_base::source_file::{Location, SourceElement};
use oberonx_lexical::token::TokenKind;

use crate::{error::Error, parser::Parser};

/// Implements [`SourceElement`] for nodes storing their own `location` field.
macro_rules! impl_source_element {
    ($($ty:ty),*) => {
        $(
            impl SourceElement for $ty {
                fn location(&self) -> Location { self.location }
            }
        )*
    };
}

pub mod declaration;
pub mod expression;
pub mod module;
pub mod statement;
pub mod types;

/// Syntax Synopsis:
///
/// ``` ebnf
/// Qualident:
///     (Identifier '.')? Identifier
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Qualident {
    location: Location,

    /// Gets the name of the module qualifying the identifier, if any.
    #[get = "pub"]
    module: Option<String>,

    /// Gets the identifier itself.
    #[get = "pub"]
    name: String,
}

impl std::fmt::Display for Qualident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "{module}.")?;
        }
        f.write_str(&self.name)
    }
}

/// Is the export mark written after a declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Export {
    /// No mark; the name is visible in its own module only.
    #[default]
    Private,

    /// `*`
    Exported,

    /// `-`, exported for reading only.
    ReadOnly,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// IdentDef:
///     Identifier ('*' | '-')?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct IdentDef {
    location: Location,

    /// Gets the declared name.
    #[get = "pub"]
    name: String,

    /// Gets the export mark following the name.
    #[get_copy = "pub"]
    export: Export,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// IdentList:
///     IdentDef (','? IdentDef)*
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct IdentList {
    location: Location,

    /// Gets the declared names in source order.
    #[get = "pub"]
    names: Vec<IdentDef>,
}

impl_source_element!(Qualident, IdentDef, IdentList);

impl<'a> Parser<'a> {
    /// Parses a [`Qualident`].
    ///
    /// # Errors
    /// If the current token is not an identifier, or a `.` is not followed by one.
    pub fn parse_qualident(&mut self) -> Result<Qualident, Error> {
        let location = self.location();
        let first = self.expect_identifier("Expecting name literal!")?;

        if self.eat(TokenKind::Dot)? {
            let name = self.expect_identifier("Expecting name literal after '.' in qualident!")?;

            Ok(Qualident {
                location,
                module: Some(first),
                name,
            })
        } else {
            Ok(Qualident {
                location,
                module: None,
                name: first,
            })
        }
    }

    /// Parses an [`IdentDef`].
    ///
    /// # Errors
    /// If the current token is not an identifier.
    pub fn parse_ident_def(&mut self) -> Result<IdentDef, Error> {
        let location = self.location();
        let name = self.expect_identifier("Expecting name literal!")?;

        let export = if self.eat(TokenKind::Asterisk)? {
            Export::Exported
        } else if self.eat(TokenKind::Minus)? {
            Export::ReadOnly
        } else {
            Export::Private
        };

        Ok(IdentDef {
            location,
            name,
            export,
        })
    }

    /// Parses an [`IdentList`]. The commas between the names are optional.
    ///
    /// # Errors
    /// If a name is missing.
    pub fn parse_ident_list(&mut self) -> Result<IdentList, Error> {
        let location = self.location();
        let mut names = vec![self.parse_ident_def()?];

        while self.eat(TokenKind::Comma)? || self.at(TokenKind::Identifier) {
            names.push(self.parse_ident_def()?);
        }

        Ok(IdentList { location, names })
    }
}

#[cfg(test)]
pub(crate) mod tests;
