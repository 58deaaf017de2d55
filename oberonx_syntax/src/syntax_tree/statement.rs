//! Contains the syntax trees related to statements and their parsing logic.

use enum_as_inner::EnumAsInner;
use getset::Getters;
use oberonx_base::source_file::{Location, SourceElement};
use oberonx_lexical::token::{KeywordKind, TokenKind};

use super::{
    expression::{ActualParameters, Designator, Expression},
    Qualident,
};
use crate::{error::Error, parser::Parser};

/// Syntax Synopsis:
///
/// ``` ebnf
/// Statement:
///     Assignment
///     | ProcedureCall
///     | If
///     | Case
///     | While
///     | Repeat
///     | For
///     | With
///     | Loop
///     | Exit
///     | Return
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Statement {
    Assignment(Assignment),
    ProcedureCall(ProcedureCall),
    If(If),
    Case(Case),
    While(While),
    Repeat(Repeat),
    For(For),
    With(With),
    Loop(Loop),
    Exit(Location),
    Return(Return),
}

impl SourceElement for Statement {
    fn location(&self) -> Location {
        match self {
            Self::Assignment(assignment) => assignment.location,
            Self::ProcedureCall(procedure_call) => procedure_call.location,
            Self::If(r#if) => r#if.location,
            Self::Case(case) => case.location,
            Self::While(r#while) => r#while.location,
            Self::Repeat(repeat) => repeat.location,
            Self::For(r#for) => r#for.location,
            Self::With(with) => with.location,
            Self::Loop(r#loop) => r#loop.location,
            Self::Exit(location) => *location,
            Self::Return(r#return) => r#return.location,
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// StatementSequence:
///     (Statement (';'? Statement)*)? ';'?
///     ;
/// ```
///
/// The sequence may be empty; two consecutive `;` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct StatementSequence {
    location: Location,

    #[get = "pub"]
    statements: Vec<Statement>,
}

impl SourceElement for StatementSequence {
    fn location(&self) -> Location { self.location }
}

impl StatementSequence {
    pub(crate) fn single(statement: Statement) -> Self {
        Self {
            location: statement.location(),
            statements: vec![statement],
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Assignment:
///     Designator ':=' Expression
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Assignment {
    location: Location,

    #[get = "pub"]
    target: Designator,

    #[get = "pub"]
    value: Expression,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ProcedureCall:
///     Designator ActualParameters?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ProcedureCall {
    location: Location,

    #[get = "pub"]
    designator: Designator,

    #[get = "pub"]
    arguments: Option<ActualParameters>,
}

/// Is a guarded branch: `ELSIF` in an `IF` statement or in a `WHILE` statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Elsif {
    location: Location,

    #[get = "pub"]
    condition: Expression,

    #[get = "pub"]
    body: StatementSequence,
}

impl SourceElement for Elsif {
    fn location(&self) -> Location { self.location }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Else:
///     'ELSE' StatementSequence
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Else {
    location: Location,

    #[get = "pub"]
    body: StatementSequence,
}

impl SourceElement for Else {
    fn location(&self) -> Location { self.location }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// If:
///     'IF' Expression 'THEN' StatementSequence
///     ('ELSIF' Expression 'THEN' StatementSequence)*
///     Else?
///     'END'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct If {
    location: Location,

    #[get = "pub"]
    condition: Expression,

    #[get = "pub"]
    then: StatementSequence,

    #[get = "pub"]
    elsifs: Vec<Elsif>,

    #[get = "pub"]
    r#else: Option<Else>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Case:
///     'CASE' Expression 'OF' CaseArm? ('|' CaseArm?)* Else? 'END'
///     ;
/// ```
///
/// Empty arms are dropped from the tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Case {
    location: Location,

    #[get = "pub"]
    expression: Expression,

    #[get = "pub"]
    arms: Vec<CaseArm>,

    #[get = "pub"]
    r#else: Option<Else>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// CaseArm:
///     CaseLabelList ':' StatementSequence
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct CaseArm {
    location: Location,

    #[get = "pub"]
    labels: CaseLabelList,

    #[get = "pub"]
    body: StatementSequence,
}

impl SourceElement for CaseArm {
    fn location(&self) -> Location { self.location }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// CaseLabelList:
///     LabelRange (',' LabelRange)*
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct CaseLabelList {
    location: Location,

    #[get = "pub"]
    ranges: Vec<LabelRange>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// LabelRange:
///     Expression ('..' Expression)?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct LabelRange {
    location: Location,

    #[get = "pub"]
    low: Expression,

    #[get = "pub"]
    high: Option<Expression>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// While:
///     'WHILE' Expression 'DO' StatementSequence
///     ('ELSIF' Expression 'DO' StatementSequence)*
///     'END'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct While {
    location: Location,

    #[get = "pub"]
    condition: Expression,

    #[get = "pub"]
    body: StatementSequence,

    #[get = "pub"]
    elsifs: Vec<Elsif>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Repeat:
///     'REPEAT' StatementSequence 'UNTIL' Expression
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Repeat {
    location: Location,

    #[get = "pub"]
    body: StatementSequence,

    #[get = "pub"]
    condition: Expression,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// For:
///     'FOR' Identifier ':=' Expression 'TO' Expression ('BY' Expression)?
///     'DO' StatementSequence 'END'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct For {
    location: Location,

    #[get = "pub"]
    variable: String,

    #[get = "pub"]
    from: Expression,

    #[get = "pub"]
    to: Expression,

    #[get = "pub"]
    by: Option<Expression>,

    #[get = "pub"]
    body: StatementSequence,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// With:
///     'WITH' WithArm ('|' WithArm)* Else? 'END'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct With {
    location: Location,

    #[get = "pub"]
    arms: Vec<WithArm>,

    #[get = "pub"]
    r#else: Option<Else>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// WithArm:
///     Guard 'DO' StatementSequence
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct WithArm {
    location: Location,

    #[get = "pub"]
    guard: Guard,

    #[get = "pub"]
    body: StatementSequence,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Guard:
///     Qualident ':' Qualident
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Guard {
    location: Location,

    #[get = "pub"]
    variable: Qualident,

    #[get = "pub"]
    type_name: Qualident,
}

/// `LOOP StatementSequence END`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Loop {
    location: Location,

    #[get = "pub"]
    body: StatementSequence,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Return:
///     'RETURN' Expression?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Return {
    location: Location,

    #[get = "pub"]
    value: Option<Expression>,
}

impl_source_element!(
    Assignment,
    ProcedureCall,
    If,
    Case,
    CaseLabelList,
    LabelRange,
    While,
    Repeat,
    For,
    With,
    WithArm,
    Guard,
    Loop,
    Return
);

impl<'a> Parser<'a> {
    /// Returns `true` if the current token can start a statement.
    #[must_use]
    pub fn at_statement_start(&self) -> bool {
        match self.kind() {
            TokenKind::Identifier => true,
            TokenKind::Keyword(keyword) => keyword.starts_statement(),
            _ => false,
        }
    }

    /// Parses a [`StatementSequence`].
    ///
    /// # Errors
    /// If a statement is malformed or two `;` follow each other.
    pub fn parse_statement_sequence(&mut self) -> Result<StatementSequence, Error> {
        let location = self.location();
        let mut statements = Vec::new();

        if self.at(TokenKind::Semicolon) {
            return Err(self.error("Unexpected ';' !"));
        }

        while self.at_statement_start() {
            statements.push(self.parse_statement()?);

            if self.eat(TokenKind::Semicolon)? && self.at(TokenKind::Semicolon) {
                return Err(self.error("Unexpected ';' !"));
            }
        }

        Ok(StatementSequence {
            location,
            statements,
        })
    }

    /// Parses a [`Statement`].
    ///
    /// # Errors
    /// If the current token cannot start a statement or the statement is malformed.
    pub fn parse_statement(&mut self) -> Result<Statement, Error> {
        match self.kind() {
            TokenKind::Identifier => self.parse_assignment_or_call(),
            TokenKind::Keyword(KeywordKind::If) => self.parse_if().map(Statement::If),
            TokenKind::Keyword(KeywordKind::Case) => self.parse_case().map(Statement::Case),
            TokenKind::Keyword(KeywordKind::While) => self.parse_while().map(Statement::While),
            TokenKind::Keyword(KeywordKind::Repeat) => self.parse_repeat().map(Statement::Repeat),
            TokenKind::Keyword(KeywordKind::For) => self.parse_for().map(Statement::For),
            TokenKind::Keyword(KeywordKind::With) => self.parse_with().map(Statement::With),
            TokenKind::Keyword(KeywordKind::Loop) => self.parse_loop().map(Statement::Loop),
            TokenKind::Keyword(KeywordKind::Exit) => {
                let location = self.location();
                self.advance()?;
                Ok(Statement::Exit(location))
            }
            TokenKind::Keyword(KeywordKind::Return) => self.parse_return().map(Statement::Return),
            _ => Err(self.error("Expecting statement!")),
        }
    }

    fn parse_assignment_or_call(&mut self) -> Result<Statement, Error> {
        let location = self.location();
        let (mut designator, arguments) = self.parse_designator()?;

        if self.eat(TokenKind::Assign)? {
            // `v(T) := e`: the trailing list can only be a type guard
            if let Some(arguments) = arguments {
                designator.push_type_guard(arguments)?;
            }

            let value = self.parse_expression()?;

            Ok(Statement::Assignment(Assignment {
                location,
                target: designator,
                value,
            }))
        } else {
            Ok(Statement::ProcedureCall(ProcedureCall {
                location,
                designator,
                arguments,
            }))
        }
    }

    fn parse_else(&mut self) -> Result<Option<Else>, Error> {
        if !self.at_keyword(KeywordKind::Else) {
            return Ok(None);
        }

        let location = self.location();
        self.advance()?;
        let body = self.parse_statement_sequence()?;

        Ok(Some(Else { location, body }))
    }

    fn parse_elsif(&mut self, separator: KeywordKind, message: &str) -> Result<Elsif, Error> {
        let location = self.location();
        self.advance()?;

        let condition = self.parse_expression()?;
        self.check_symbol_and_advance(separator, message)?;
        let body = self.parse_statement_sequence()?;

        Ok(Elsif {
            location,
            condition,
            body,
        })
    }

    /// Parses an [`If`] statement.
    ///
    /// # Errors
    /// If the statement is malformed.
    pub fn parse_if(&mut self) -> Result<If, Error> {
        let location = self.location();
        self.advance()?;

        let condition = self.parse_expression()?;
        self.check_symbol_and_advance(KeywordKind::Then, "Expecting 'THEN' in 'IF' statement!")?;
        let then = self.parse_statement_sequence()?;

        let mut elsifs = Vec::new();
        while self.at_keyword(KeywordKind::Elsif) {
            elsifs.push(
                self.parse_elsif(KeywordKind::Then, "Expecting 'THEN' in 'ELSIF' statement!")?,
            );
        }

        let r#else = self.parse_else()?;
        self.check_symbol_and_advance(
            KeywordKind::End,
            "Expecting 'END' at end of 'IF' statement!",
        )?;

        Ok(If {
            location,
            condition,
            then,
            elsifs,
            r#else,
        })
    }

    /// Parses a [`Case`] statement.
    ///
    /// # Errors
    /// If the statement is malformed.
    pub fn parse_case(&mut self) -> Result<Case, Error> {
        let location = self.location();
        self.advance()?;

        let expression = self.parse_expression()?;
        self.check_symbol_and_advance(KeywordKind::Of, "Expecting 'OF' in 'CASE' Statement!")?;

        let mut arms = Vec::new();
        loop {
            if !self.at(TokenKind::Bar)
                && !self.at_keyword(KeywordKind::Else)
                && !self.at_keyword(KeywordKind::End)
            {
                arms.push(self.parse_case_arm()?);
            }

            if !self.eat(TokenKind::Bar)? {
                break;
            }
        }

        let r#else = self.parse_else()?;
        self.check_symbol_and_advance(
            KeywordKind::End,
            "Expecting 'END' at end of 'CASE' Statement!",
        )?;

        Ok(Case {
            location,
            expression,
            arms,
            r#else,
        })
    }

    fn parse_case_arm(&mut self) -> Result<CaseArm, Error> {
        let location = self.location();

        let labels_location = self.location();
        let mut ranges = vec![self.parse_label_range()?];
        while self.eat(TokenKind::Comma)? {
            ranges.push(self.parse_label_range()?);
        }

        self.check_symbol_and_advance(TokenKind::Colon, "Expecting ':' in 'CASE' Statement!")?;
        let body = self.parse_statement_sequence()?;

        Ok(CaseArm {
            location,
            labels: CaseLabelList {
                location: labels_location,
                ranges,
            },
            body,
        })
    }

    fn parse_label_range(&mut self) -> Result<LabelRange, Error> {
        let location = self.location();
        let low = self.parse_expression()?;
        let high = if self.eat(TokenKind::UpTo)? {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(LabelRange {
            location,
            low,
            high,
        })
    }

    /// Parses a [`While`] statement.
    ///
    /// # Errors
    /// If the statement is malformed.
    pub fn parse_while(&mut self) -> Result<While, Error> {
        let location = self.location();
        self.advance()?;

        let condition = self.parse_expression()?;
        self.check_symbol_and_advance(KeywordKind::Do, "Expecting 'DO' in 'WHILE' statement!")?;
        let body = self.parse_statement_sequence()?;

        let mut elsifs = Vec::new();
        while self.at_keyword(KeywordKind::Elsif) {
            elsifs.push(self.parse_elsif(KeywordKind::Do, "Expecting 'DO' in 'ELSIF' statement!")?);
        }

        self.check_symbol_and_advance(
            KeywordKind::End,
            "Expecting 'END' at end of 'WHILE' statement!",
        )?;

        Ok(While {
            location,
            condition,
            body,
            elsifs,
        })
    }

    /// Parses a [`Repeat`] statement.
    ///
    /// # Errors
    /// If the statement is malformed.
    pub fn parse_repeat(&mut self) -> Result<Repeat, Error> {
        let location = self.location();
        self.advance()?;

        let body = self.parse_statement_sequence()?;
        self.check_symbol_and_advance(KeywordKind::Until, "Expected 'UNTIL'!")?;
        let condition = self.parse_expression()?;

        Ok(Repeat {
            location,
            body,
            condition,
        })
    }

    /// Parses a [`For`] statement.
    ///
    /// # Errors
    /// If the statement is malformed.
    pub fn parse_for(&mut self) -> Result<For, Error> {
        let location = self.location();
        self.advance()?;

        let variable = self.expect_identifier("Expecting literal name in 'FOR' Statement!")?;
        self.check_symbol_and_advance(TokenKind::Assign, "Expecting ':=' in 'FOR' Statement!")?;
        let from = self.parse_expression()?;
        self.check_symbol_and_advance(KeywordKind::To, "Missing 'TO' in 'FOR' Statement!")?;
        let to = self.parse_expression()?;

        let by = if self.eat(KeywordKind::By)? {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.check_symbol_and_advance(KeywordKind::Do, "Expecting 'DO' in 'FOR' Statement!")?;
        let body = self.parse_statement_sequence()?;
        self.check_symbol_and_advance(KeywordKind::End, "Expecting 'END' in 'FOR' Statement!")?;

        Ok(For {
            location,
            variable,
            from,
            to,
            by,
            body,
        })
    }

    /// Parses a [`With`] statement.
    ///
    /// # Errors
    /// If the statement is malformed.
    pub fn parse_with(&mut self) -> Result<With, Error> {
        let location = self.location();
        self.advance()?;

        let mut arms = vec![self.parse_with_arm()?];
        while self.eat(TokenKind::Bar)? {
            arms.push(self.parse_with_arm()?);
        }

        let r#else = self.parse_else()?;
        self.check_symbol_and_advance(
            KeywordKind::End,
            "Expecting 'END' at end of 'WITH' Statement!",
        )?;

        Ok(With {
            location,
            arms,
            r#else,
        })
    }

    fn parse_with_arm(&mut self) -> Result<WithArm, Error> {
        let location = self.location();

        let variable = self.parse_qualident()?;
        self.check_symbol_and_advance(
            TokenKind::Colon,
            "Expecting ':' in guard part of 'WITH' Statement!",
        )?;
        let type_name = self.parse_qualident()?;

        self.check_symbol_and_advance(KeywordKind::Do, "Expecting 'DO' in 'WITH' Statement!")?;
        let body = self.parse_statement_sequence()?;

        Ok(WithArm {
            location,
            guard: Guard {
                location,
                variable,
                type_name,
            },
            body,
        })
    }

    /// Parses a [`Loop`] statement.
    ///
    /// # Errors
    /// If the statement is malformed.
    pub fn parse_loop(&mut self) -> Result<Loop, Error> {
        let location = self.location();
        self.advance()?;

        let body = self.parse_statement_sequence()?;
        self.check_symbol_and_advance(
            KeywordKind::End,
            "Expecting 'END' at end of 'LOOP' Statement!",
        )?;

        Ok(Loop { location, body })
    }

    /// Parses a [`Return`] statement.
    ///
    /// # Errors
    /// If the returned expression is malformed.
    pub fn parse_return(&mut self) -> Result<Return, Error> {
        let location = self.location();
        self.advance()?;

        let ends_statement = match self.kind() {
            TokenKind::Semicolon | TokenKind::Bar | TokenKind::Eof => true,
            TokenKind::Keyword(
                KeywordKind::End | KeywordKind::Else | KeywordKind::Elsif | KeywordKind::Until,
            ) => true,
            TokenKind::Keyword(keyword) => keyword.starts_statement(),
            _ => false,
        };

        let value = if ends_statement {
            None
        } else {
            Some(self.parse_expression()?)
        };

        Ok(Return { location, value })
    }
}
