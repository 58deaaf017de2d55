//! Contains the syntax trees related to declarations and their parsing logic.

use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use oberonx_base::source_file::{Location, SourceElement};
use oberonx_lexical::token::{KeywordKind, TokenKind};

use super::{
    expression::Expression,
    statement::{Statement, StatementSequence},
    types::{Type, TypeParams},
    IdentDef, IdentList,
};
use crate::{error::Error, parser::Parser};

/// Is the kind of a declaration section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Section {
    Const,
    Type,
    Var,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// DeclarationSequence:
///     ( 'CONST' (ConstDeclaration ';'?)*
///     | 'TYPE' (TypeDeclaration ';'?)*
///     | 'VAR' (VariableDeclaration ';'?)*
///     | ProcedureDeclaration ';'?
///     | ProcedureHeading ';'?
///     )*
///     ;
/// ```
///
/// Procedure declarations with bodies appear in modules; definitions only declare headings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct DeclarationSequence {
    location: Location,

    #[get = "pub"]
    declarations: Vec<Declaration>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Declaration:
///     ConstDeclaration
///     | TypeDeclaration
///     | VariableDeclaration
///     | ProcedureDeclaration
///     | ProcedureHeading
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Declaration {
    Const(ConstDeclaration),
    Type(TypeDeclaration),
    Variable(VariableDeclaration),
    Procedure(ProcedureDeclaration),
    ProcedureHeading(ProcedureHeading),
}

impl SourceElement for Declaration {
    fn location(&self) -> Location {
        match self {
            Self::Const(declaration) => declaration.location,
            Self::Type(declaration) => declaration.location,
            Self::Variable(declaration) => declaration.location,
            Self::Procedure(declaration) => declaration.location,
            Self::ProcedureHeading(heading) => heading.location,
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ConstDeclaration:
///     IdentDef '=' Expression
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ConstDeclaration {
    location: Location,

    #[get = "pub"]
    name: IdentDef,

    #[get = "pub"]
    value: Expression,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// TypeDeclaration:
///     IdentDef TypeParams? '=' Type
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct TypeDeclaration {
    location: Location,

    #[get = "pub"]
    name: IdentDef,

    #[get = "pub"]
    type_params: Option<TypeParams>,

    #[get = "pub"]
    r#type: Type,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// VariableDeclaration:
///     IdentList ':' Type
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct VariableDeclaration {
    location: Location,

    #[get = "pub"]
    names: IdentList,

    #[get = "pub"]
    r#type: Type,
}

/// Is the keyword a procedure is introduced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum ProcedureKeyword {
    Procedure,
    Proc,
}

/// Is the passing mode of a parameter or a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ParameterMode {
    /// No mode keyword; passed by value.
    #[default]
    Value,

    /// `VAR`
    Variable,

    /// `IN`
    In,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ProcedureDeclaration:
///     ProcedureHeading ';'? ProcedureBody 'END' Identifier
///     ;
/// ```
///
/// The closing identifier must repeat the name of the procedure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ProcedureDeclaration {
    location: Location,

    #[get = "pub"]
    heading: ProcedureHeading,

    #[get = "pub"]
    body: ProcedureBody,

    #[get = "pub"]
    closing_name: String,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ProcedureHeading:
///     ('PROCEDURE' | 'PROC') Receiver? IdentDef FormalParameters?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct ProcedureHeading {
    location: Location,

    #[get_copy = "pub"]
    keyword: ProcedureKeyword,

    #[get = "pub"]
    receiver: Option<Receiver>,

    #[get = "pub"]
    name: IdentDef,

    #[get = "pub"]
    parameters: Option<FormalParameters>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Receiver:
///     '(' ('VAR' | 'IN')? Identifier ':' Identifier ')'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct Receiver {
    location: Location,

    #[get_copy = "pub"]
    mode: ParameterMode,

    #[get = "pub"]
    name: String,

    #[get = "pub"]
    type_name: String,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ProcedureBody:
///     DeclarationSequence ('BEGIN' StatementSequence | Return ';'?)?
///     ;
/// ```
///
/// A body made of a lone `RETURN` is stored as a sequence holding that statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ProcedureBody {
    location: Location,

    #[get = "pub"]
    declarations: DeclarationSequence,

    #[get = "pub"]
    statements: Option<StatementSequence>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// FormalParameters:
///     '(' (FPSection (';'? FPSection)*)? ')' (':' Type)?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct FormalParameters {
    location: Location,

    #[get = "pub"]
    sections: Vec<FPSection>,

    #[get = "pub"]
    return_type: Option<Box<Type>>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// FPSection:
///     ('VAR' | 'IN')? Identifier (','? Identifier)* ':' Type
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct FPSection {
    location: Location,

    #[get_copy = "pub"]
    mode: ParameterMode,

    #[get = "pub"]
    names: Vec<String>,

    #[get = "pub"]
    r#type: Type,
}

impl_source_element!(
    DeclarationSequence,
    ConstDeclaration,
    TypeDeclaration,
    VariableDeclaration,
    ProcedureDeclaration,
    ProcedureHeading,
    Receiver,
    ProcedureBody,
    FormalParameters,
    FPSection
);

impl<'a> Parser<'a> {
    /// Returns `true` if the current token closes a declaration section.
    fn at_section_end(&self) -> bool {
        match self.kind() {
            TokenKind::Eof => true,
            TokenKind::Keyword(keyword) => matches!(
                keyword,
                KeywordKind::Const
                    | KeywordKind::Type
                    | KeywordKind::Var
                    | KeywordKind::Procedure
                    | KeywordKind::Proc
                    | KeywordKind::End
                    | KeywordKind::Begin
                    | KeywordKind::Return
                    | KeywordKind::Import
            ),
            _ => false,
        }
    }

    /// Parses a [`DeclarationSequence`].
    ///
    /// `with_bodies` selects between procedure declarations with bodies and bare procedure
    /// headings.
    ///
    /// # Errors
    /// If one of the declarations is malformed.
    pub fn parse_declaration_sequence(
        &mut self,
        with_bodies: bool,
    ) -> Result<DeclarationSequence, Error> {
        let location = self.location();
        let mut declarations = Vec::new();

        loop {
            let section = match self.kind() {
                TokenKind::Keyword(KeywordKind::Const) => Section::Const,
                TokenKind::Keyword(KeywordKind::Type) => Section::Type,
                TokenKind::Keyword(KeywordKind::Var) => Section::Var,
                TokenKind::Keyword(KeywordKind::Procedure | KeywordKind::Proc) => {
                    declarations.push(if with_bodies {
                        Declaration::Procedure(self.parse_procedure_declaration()?)
                    } else {
                        Declaration::ProcedureHeading(self.parse_procedure_heading()?)
                    });
                    self.eat(TokenKind::Semicolon)?;
                    continue;
                }
                _ => break,
            };
            self.advance()?;

            while !self.at_section_end() {
                declarations.push(match section {
                    Section::Const => Declaration::Const(self.parse_const_declaration()?),
                    Section::Type => Declaration::Type(self.parse_type_declaration()?),
                    Section::Var => Declaration::Variable(self.parse_variable_declaration()?),
                });
                self.eat(TokenKind::Semicolon)?;
            }
        }

        Ok(DeclarationSequence {
            location,
            declarations,
        })
    }

    /// Parses a [`ConstDeclaration`].
    ///
    /// # Errors
    /// If the name, the `=` or the value is malformed.
    pub fn parse_const_declaration(&mut self) -> Result<ConstDeclaration, Error> {
        let location = self.location();
        let name = self.parse_ident_def()?;
        self.check_symbol_and_advance(TokenKind::Equal, "Expecting '=' in 'CONST' declaration!")?;
        let value = self.parse_expression()?;

        Ok(ConstDeclaration {
            location,
            name,
            value,
        })
    }

    /// Parses a [`TypeDeclaration`].
    ///
    /// # Errors
    /// If the name, the type parameters, the `=` or the type is malformed.
    pub fn parse_type_declaration(&mut self) -> Result<TypeDeclaration, Error> {
        let location = self.location();
        let name = self.parse_ident_def()?;
        let type_params = if self.at(TokenKind::LeftParen) {
            Some(self.parse_type_params()?)
        } else {
            None
        };
        self.check_symbol_and_advance(TokenKind::Equal, "Expecting '=' in 'TYPE' declaration!")?;
        let r#type = self.parse_type()?;

        Ok(TypeDeclaration {
            location,
            name,
            type_params,
            r#type,
        })
    }

    /// Parses a [`VariableDeclaration`].
    ///
    /// # Errors
    /// If the names, the `:` or the type is malformed.
    pub fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, Error> {
        let location = self.location();
        let names = self.parse_ident_list()?;
        self.check_symbol_and_advance(TokenKind::Colon, "Expecting ':' in 'VAR' declaration!")?;
        let r#type = self.parse_type()?;

        Ok(VariableDeclaration {
            location,
            names,
            r#type,
        })
    }

    /// Parses `PROCEDURE` or `PROC`.
    ///
    /// # Errors
    /// If the current token is neither.
    pub fn parse_procedure_keyword(&mut self) -> Result<ProcedureKeyword, Error> {
        let keyword = match self.kind() {
            TokenKind::Keyword(KeywordKind::Procedure) => ProcedureKeyword::Procedure,
            TokenKind::Keyword(KeywordKind::Proc) => ProcedureKeyword::Proc,
            _ => return Err(self.error("Expecting 'PROCEDURE' or 'PROC'!")),
        };
        self.advance()?;

        Ok(keyword)
    }

    /// Parses a [`ProcedureDeclaration`].
    ///
    /// # Errors
    /// If the heading or the body is malformed, or the closing name differs from the
    /// procedure's name.
    pub fn parse_procedure_declaration(&mut self) -> Result<ProcedureDeclaration, Error> {
        let location = self.location();
        let heading = self.parse_procedure_heading()?;
        self.eat(TokenKind::Semicolon)?;
        let body = self.parse_procedure_body()?;

        self.check_symbol_and_advance(
            KeywordKind::End,
            "Expecting 'END' in 'PROCEDURE' or 'PROC' declaration!",
        )?;
        self.check_symbol(
            TokenKind::Identifier,
            "Missing name literal at end of 'PROCEDURE' or 'PROC' declaration!",
        )?;
        if self.current().text() != heading.name.name() {
            return Err(self.error("Procedure name is inconsistant in procedure!"));
        }
        let closing_name = self.current().text().clone();
        self.advance()?;

        Ok(ProcedureDeclaration {
            location,
            heading,
            body,
            closing_name,
        })
    }

    /// Parses a [`ProcedureHeading`].
    ///
    /// # Errors
    /// If the receiver, the name or the formal parameters are malformed.
    pub fn parse_procedure_heading(&mut self) -> Result<ProcedureHeading, Error> {
        let location = self.location();
        let keyword = self.parse_procedure_keyword()?;
        let receiver = if self.at(TokenKind::LeftParen) {
            Some(self.parse_receiver()?)
        } else {
            None
        };
        let name = self.parse_ident_def()?;
        let parameters = if self.at(TokenKind::LeftParen) {
            Some(self.parse_formal_parameters()?)
        } else {
            None
        };

        Ok(ProcedureHeading {
            location,
            keyword,
            receiver,
            name,
            parameters,
        })
    }

    fn parse_parameter_mode(&mut self) -> Result<ParameterMode, Error> {
        Ok(if self.eat(KeywordKind::Var)? {
            ParameterMode::Variable
        } else if self.eat(KeywordKind::In)? {
            ParameterMode::In
        } else {
            ParameterMode::Value
        })
    }

    /// Parses a [`Receiver`].
    ///
    /// # Errors
    /// If the receiver is malformed.
    pub fn parse_receiver(&mut self) -> Result<Receiver, Error> {
        let location = self.location();
        self.check_symbol_and_advance(TokenKind::LeftParen, "Expecting '(' in reciver!")?;

        let mode = self.parse_parameter_mode()?;
        let name = self.expect_identifier("Expecting name literal in reciver's first column!")?;
        self.check_symbol_and_advance(TokenKind::Colon, "Expecting ':' in reciver!")?;
        let type_name =
            self.expect_identifier("Expecting name literal in reciver's first column!")?;
        self.check_symbol_and_advance(TokenKind::RightParen, "Expecting ')' in reciver!")?;

        Ok(Receiver {
            location,
            mode,
            name,
            type_name,
        })
    }

    /// Parses a [`ProcedureBody`].
    ///
    /// # Errors
    /// If a declaration or a statement is malformed.
    pub fn parse_procedure_body(&mut self) -> Result<ProcedureBody, Error> {
        let location = self.location();
        let declarations = self.parse_declaration_sequence(true)?;

        let statements = if self.eat(KeywordKind::Begin)? {
            Some(self.parse_statement_sequence()?)
        } else if self.at_keyword(KeywordKind::Return) {
            let r#return = self.parse_return()?;
            self.eat(TokenKind::Semicolon)?;
            Some(StatementSequence::single(Statement::Return(r#return)))
        } else {
            None
        };

        Ok(ProcedureBody {
            location,
            declarations,
            statements,
        })
    }

    /// Parses [`FormalParameters`].
    ///
    /// # Errors
    /// If a section or the return type is malformed.
    pub fn parse_formal_parameters(&mut self) -> Result<FormalParameters, Error> {
        let location = self.location();
        self.check_symbol_and_advance(TokenKind::LeftParen, "Expecting '(' in Parameters!")?;

        let mut sections = Vec::new();
        while !self.at(TokenKind::RightParen) {
            sections.push(self.parse_fp_section()?);
            self.eat(TokenKind::Semicolon)?;
        }
        self.advance()?;

        let return_type = if self.eat(TokenKind::Colon)? {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };

        Ok(FormalParameters {
            location,
            sections,
            return_type,
        })
    }

    fn parse_fp_section(&mut self) -> Result<FPSection, Error> {
        let location = self.location();
        let mode = self.parse_parameter_mode()?;

        let message = "Expecting literal name in arguments!";
        let mut names = vec![self.expect_identifier(message)?];
        while !self.at(TokenKind::Colon) {
            self.eat(TokenKind::Comma)?;
            names.push(self.expect_identifier(message)?);
        }
        self.advance()?;

        let r#type = self.parse_type()?;

        Ok(FPSection {
            location,
            mode,
            names,
            r#type,
        })
    }
}

#[cfg(test)]
mod tests;
