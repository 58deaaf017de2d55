//! Contains the syntax trees related to type denotations and their parsing logic.

use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use oberonx_base::source_file::{Location, SourceElement};
use oberonx_lexical::token::{KeywordKind, TokenKind};

use super::{
    declaration::{FormalParameters, ProcedureKeyword},
    expression::Expression,
    IdentList, Qualident,
};
use crate::{error::Error, parser::Parser};

/// Syntax Synopsis:
///
/// ``` ebnf
/// Type:
///     NamedType
///     | Enumeration
///     | ArrayType
///     | RecordType
///     | PointerType
///     | ProcedureType
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Type {
    Named(NamedType),
    Enumeration(Enumeration),
    Array(ArrayType),
    Record(RecordType),
    Pointer(PointerType),
    Procedure(ProcedureType),
}

impl SourceElement for Type {
    fn location(&self) -> Location {
        match self {
            Self::Named(named) => named.location,
            Self::Enumeration(enumeration) => enumeration.location,
            Self::Array(array) => array.location,
            Self::Record(record) => record.location,
            Self::Pointer(pointer) => pointer.location,
            Self::Procedure(procedure) => procedure.location,
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// NamedType:
///     Qualident TypeActuals?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct NamedType {
    location: Location,

    #[get = "pub"]
    qualident: Qualident,

    #[get = "pub"]
    actuals: Option<TypeActuals>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// TypeParams:
///     '(' Identifier (','? Identifier)* ')'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct TypeParams {
    location: Location,

    #[get = "pub"]
    names: Vec<String>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// TypeActuals:
///     '(' NamedType (','? NamedType)* ')'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct TypeActuals {
    location: Location,

    #[get = "pub"]
    types: Vec<NamedType>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Enumeration:
///     '(' Identifier (','? Identifier)* ')'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Enumeration {
    location: Location,

    #[get = "pub"]
    values: Vec<String>,
}

/// Is the way an array type was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArraySyntax {
    /// `ARRAY [n] OF T`, `ARRAY n OF T` or `ARRAY OF T`
    Keyword,

    /// `[n] T`
    Bracket,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ArrayType:
///     'ARRAY' ('[' LengthList ']' | LengthList?) 'OF' Type
///     | '[' LengthList? ']' Type
///     ;
/// ```
///
/// An absent length list denotes an open array.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct ArrayType {
    location: Location,

    #[get_copy = "pub"]
    syntax: ArraySyntax,

    #[get = "pub"]
    lengths: Option<LengthList>,

    #[get = "pub"]
    element: Box<Type>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// LengthList:
///     'VAR'? Expression (',' Expression)*
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct LengthList {
    location: Location,

    /// Gets whether the lengths are run-time values, written with a leading `VAR`.
    #[get_copy = "pub"]
    is_variable: bool,

    #[get = "pub"]
    lengths: Vec<Expression>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// RecordType:
///     'RECORD' ('(' NamedType ')')? (FieldList (';'? FieldList)*)? ';'? 'END'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct RecordType {
    location: Location,

    #[get = "pub"]
    base: Option<NamedType>,

    #[get = "pub"]
    fields: Vec<FieldList>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// FieldList:
///     IdentList ':' Type
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct FieldList {
    location: Location,

    #[get = "pub"]
    names: IdentList,

    #[get = "pub"]
    r#type: Type,
}

/// Is the way a pointer type was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointerSyntax {
    /// `POINTER TO T`
    PointerTo,

    /// `^T`
    Caret,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// PointerType:
///     ('POINTER' 'TO' | '^') Type
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct PointerType {
    location: Location,

    #[get_copy = "pub"]
    syntax: PointerSyntax,

    #[get = "pub"]
    target: Box<Type>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ProcedureType:
///     ('PROCEDURE' | 'PROC') FormalParameters?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct ProcedureType {
    location: Location,

    #[get_copy = "pub"]
    keyword: ProcedureKeyword,

    #[get = "pub"]
    parameters: Option<FormalParameters>,
}

impl_source_element!(
    NamedType,
    TypeParams,
    TypeActuals,
    Enumeration,
    ArrayType,
    LengthList,
    RecordType,
    FieldList,
    PointerType,
    ProcedureType
);

impl<'a> Parser<'a> {
    /// Parses a [`Type`].
    ///
    /// # Errors
    /// If the current token cannot start a type or the type is malformed.
    pub fn parse_type(&mut self) -> Result<Type, Error> {
        match self.kind() {
            TokenKind::Identifier => self.parse_named_type().map(Type::Named),
            TokenKind::LeftParen => self.parse_enumeration().map(Type::Enumeration),
            TokenKind::Keyword(KeywordKind::Array) | TokenKind::LeftBracket => {
                self.parse_array_type().map(Type::Array)
            }
            TokenKind::Keyword(KeywordKind::Record) => self.parse_record_type().map(Type::Record),
            TokenKind::Keyword(KeywordKind::Pointer) | TokenKind::Caret => {
                self.parse_pointer_type().map(Type::Pointer)
            }
            TokenKind::Keyword(KeywordKind::Procedure | KeywordKind::Proc) => {
                self.parse_procedure_type().map(Type::Procedure)
            }
            _ => Err(self.error("Illegal Type!")),
        }
    }

    /// Parses a [`NamedType`].
    ///
    /// # Errors
    /// If the name or its actual type arguments are malformed.
    pub fn parse_named_type(&mut self) -> Result<NamedType, Error> {
        let location = self.location();
        let qualident = self.parse_qualident()?;
        let actuals = if self.at(TokenKind::LeftParen) {
            Some(self.parse_type_actuals()?)
        } else {
            None
        };

        Ok(NamedType {
            location,
            qualident,
            actuals,
        })
    }

    /// Parses a parenthesized list of names, each optionally separated by a comma.
    fn parse_name_list(&mut self, message: &str) -> Result<Vec<String>, Error> {
        let mut names = vec![self.expect_identifier(message)?];

        while !self.at(TokenKind::RightParen) {
            self.eat(TokenKind::Comma)?;
            names.push(self.expect_identifier(message)?);
        }
        self.advance()?;

        Ok(names)
    }

    /// Parses [`TypeParams`].
    ///
    /// # Errors
    /// If the list is not parenthesized or holds anything but names.
    pub fn parse_type_params(&mut self) -> Result<TypeParams, Error> {
        let location = self.location();
        self.check_symbol_and_advance(TokenKind::LeftParen, "Expecting '(' in Type Params!")?;
        let names = self.parse_name_list("Expecting name literal in Type Params!")?;

        Ok(TypeParams { location, names })
    }

    /// Parses [`TypeActuals`].
    ///
    /// # Errors
    /// If the list is not parenthesized or holds anything but named types.
    pub fn parse_type_actuals(&mut self) -> Result<TypeActuals, Error> {
        let location = self.location();
        self.check_symbol_and_advance(TokenKind::LeftParen, "Expecting '(' in Type Actuals!")?;

        let message = "Expecting type name in Type Actuals!";
        self.check_symbol(TokenKind::Identifier, message)?;
        let mut types = vec![self.parse_named_type()?];

        while !self.at(TokenKind::RightParen) {
            self.eat(TokenKind::Comma)?;
            self.check_symbol(TokenKind::Identifier, message)?;
            types.push(self.parse_named_type()?);
        }
        self.advance()?;

        Ok(TypeActuals { location, types })
    }

    /// Parses an [`Enumeration`].
    ///
    /// # Errors
    /// If an element is not a name.
    pub fn parse_enumeration(&mut self) -> Result<Enumeration, Error> {
        let location = self.location();
        self.check_symbol_and_advance(TokenKind::LeftParen, "Expecting '(' in enumeration!")?;
        let values = self.parse_name_list("Expecting name of enumeration element!")?;

        Ok(Enumeration { location, values })
    }

    /// Parses an [`ArrayType`].
    ///
    /// # Errors
    /// If the brackets, the `OF` keyword, a length or the element type is malformed.
    pub fn parse_array_type(&mut self) -> Result<ArrayType, Error> {
        let location = self.location();

        if self.eat(KeywordKind::Array)? {
            let lengths = if self.eat(TokenKind::LeftBracket)? {
                let lengths = self.parse_length_list()?;
                self.check_symbol_and_advance(
                    TokenKind::RightBracket,
                    "Expecting ']' in 'ARRAY' type!",
                )?;
                Some(lengths)
            } else if self.at_keyword(KeywordKind::Of) {
                None
            } else {
                Some(self.parse_length_list()?)
            };

            self.check_symbol_and_advance(KeywordKind::Of, "Expecting 'OF' in 'ARRAY' type!")?;
            let element = self.parse_type()?;

            Ok(ArrayType {
                location,
                syntax: ArraySyntax::Keyword,
                lengths,
                element: Box::new(element),
            })
        } else {
            self.check_symbol_and_advance(
                TokenKind::LeftBracket,
                "Expecting '[' in 'ARRAY' type!",
            )?;
            let lengths = if self.at(TokenKind::RightBracket) {
                None
            } else {
                Some(self.parse_length_list()?)
            };
            self.check_symbol_and_advance(
                TokenKind::RightBracket,
                "Expecting ']' in 'ARRAY' type!",
            )?;
            let element = self.parse_type()?;

            Ok(ArrayType {
                location,
                syntax: ArraySyntax::Bracket,
                lengths,
                element: Box::new(element),
            })
        }
    }

    fn parse_length_list(&mut self) -> Result<LengthList, Error> {
        let location = self.location();
        let is_variable = self.eat(KeywordKind::Var)?;
        let lengths = self.parse_expression_list()?;

        Ok(LengthList {
            location,
            is_variable,
            lengths,
        })
    }

    /// Parses a [`RecordType`].
    ///
    /// # Errors
    /// If the base type or a field list is malformed, or `END` is missing.
    pub fn parse_record_type(&mut self) -> Result<RecordType, Error> {
        let location = self.location();
        self.check_symbol_and_advance(KeywordKind::Record, "Expecting 'RECORD'!")?;

        let base = if self.eat(TokenKind::LeftParen)? {
            let base = self.parse_named_type()?;
            self.check_symbol_and_advance(
                TokenKind::RightParen,
                "Expecting ')' in base 'RECORD' type!",
            )?;
            Some(base)
        } else {
            None
        };

        let mut fields = Vec::new();
        while self.at(TokenKind::Identifier) {
            fields.push(self.parse_field_list()?);
            self.eat(TokenKind::Semicolon)?;
        }

        self.check_symbol_and_advance(
            KeywordKind::End,
            "Expecting 'END' at end of 'RECORD' type!",
        )?;

        Ok(RecordType {
            location,
            base,
            fields,
        })
    }

    fn parse_field_list(&mut self) -> Result<FieldList, Error> {
        let location = self.location();
        let names = self.parse_ident_list()?;
        self.check_symbol_and_advance(
            TokenKind::Colon,
            "Expecting ':' in Field declaration of 'RECORD'!",
        )?;
        let r#type = self.parse_type()?;

        Ok(FieldList {
            location,
            names,
            r#type,
        })
    }

    /// Parses a [`PointerType`].
    ///
    /// # Errors
    /// If `TO` is missing after `POINTER` or the target type is malformed.
    pub fn parse_pointer_type(&mut self) -> Result<PointerType, Error> {
        let location = self.location();

        let syntax = if self.eat(KeywordKind::Pointer)? {
            self.check_symbol_and_advance(
                KeywordKind::To,
                "Expecting 'TO' in pointer declaration!",
            )?;
            PointerSyntax::PointerTo
        } else {
            self.check_symbol_and_advance(TokenKind::Caret, "Expecting '^' in pointer declaration!")?;
            PointerSyntax::Caret
        };

        let target = self.parse_type()?;

        Ok(PointerType {
            location,
            syntax,
            target: Box::new(target),
        })
    }

    /// Parses a [`ProcedureType`].
    ///
    /// # Errors
    /// If the formal parameters are malformed.
    pub fn parse_procedure_type(&mut self) -> Result<ProcedureType, Error> {
        let location = self.location();
        let keyword = self.parse_procedure_keyword()?;
        let parameters = if self.at(TokenKind::LeftParen) {
            Some(self.parse_formal_parameters()?)
        } else {
            None
        };

        Ok(ProcedureType {
            location,
            keyword,
            parameters,
        })
    }
}

#[cfg(test)]
mod tests;
