//! Contains the syntax trees related to expressions and their parsing logic.
//!
//! Precedence, from the loosest to the tightest binding: a single optional relation, the
//! additive operators with an optional leading sign, the multiplicative operators, and factors.

use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use oberonx_base::source_file::{Location, SourceElement};
use oberonx_lexical::token::{KeywordKind, TokenKind};

use super::Qualident;
use crate::{error::Error, parser::Parser};

/// Is the text of a literal token exactly as the tokenizer produced it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Literal {
    location: Location,

    #[get = "pub"]
    text: String,
}

impl SourceElement for Literal {
    fn location(&self) -> Location { self.location }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Expression:
///     SimpleExpression (Relation SimpleExpression)?
///     ;
///
/// SimpleExpression:
///     ('+' | '-')? Term (('+' | '-' | 'OR') Term)*
///     ;
///
/// Term:
///     Factor (('*' | '/' | 'DIV' | 'MOD' | '&') Factor)*
///     ;
///
/// Factor:
///     Number
///     | String
///     | HexString
///     | HexChar
///     | 'NIL'
///     | 'TRUE'
///     | 'FALSE'
///     | Set
///     | Designator ActualParameters?
///     | '(' Expression ')'
///     | '~' Factor
///     ;
/// ```
///
/// A parenthesized expression leaves no node of its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Expression {
    Number(Literal),
    String(Literal),
    HexString(Literal),
    HexChar(Literal),
    Nil(Location),
    True(Location),
    False(Location),
    Set(Set),
    Designator(Designator),
    Call(Call),
    Unary(Unary),
    Binary(Binary),
}

impl SourceElement for Expression {
    fn location(&self) -> Location {
        match self {
            Self::Number(literal)
            | Self::String(literal)
            | Self::HexString(literal)
            | Self::HexChar(literal) => literal.location,
            Self::Nil(location) | Self::True(location) | Self::False(location) => *location,
            Self::Set(set) => set.location,
            Self::Designator(designator) => designator.location,
            Self::Call(call) => call.location,
            Self::Unary(unary) => unary.location,
            Self::Binary(binary) => binary.location,
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// BinaryOperator:
///     '<' | '<=' | '=' | '#' | '>' | '>=' | 'IN' | 'IS'
///     | '+' | '-' | 'OR'
///     | '*' | '/' | 'DIV' | 'MOD' | '&'
///     ;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum BinaryOperator {
    Less,
    LessEqual,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    In,
    Is,
    Add,
    Subtract,
    Or,
    Multiply,
    Divide,
    IntegerDivide,
    Modulo,
    And,
}

impl BinaryOperator {
    /// Returns `true` for the relational operators, which do not chain.
    #[must_use]
    pub fn is_relation(self) -> bool {
        matches!(
            self,
            Self::Less
                | Self::LessEqual
                | Self::Equal
                | Self::NotEqual
                | Self::Greater
                | Self::GreaterEqual
                | Self::In
                | Self::Is
        )
    }

    fn relation(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Less => Self::Less,
            TokenKind::LessEqual => Self::LessEqual,
            TokenKind::Equal => Self::Equal,
            TokenKind::Hash => Self::NotEqual,
            TokenKind::Greater => Self::Greater,
            TokenKind::GreaterEqual => Self::GreaterEqual,
            TokenKind::Keyword(KeywordKind::In) => Self::In,
            TokenKind::Keyword(KeywordKind::Is) => Self::Is,
            _ => return None,
        })
    }

    fn additive(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Subtract,
            TokenKind::Keyword(KeywordKind::Or) => Self::Or,
            _ => return None,
        })
    }

    fn multiplicative(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Asterisk => Self::Multiply,
            TokenKind::Slash => Self::Divide,
            TokenKind::Keyword(KeywordKind::Div) => Self::IntegerDivide,
            TokenKind::Keyword(KeywordKind::Mod) => Self::Modulo,
            TokenKind::Ampersand => Self::And,
            _ => return None,
        })
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Binary:
///     Expression BinaryOperator Expression
///     ;
/// ```
///
/// The location is the first token of the production that built the node, so a parenthesized
/// left operand starts at its `(`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct Binary {
    location: Location,

    #[get = "pub"]
    left_operand: Box<Expression>,

    #[get_copy = "pub"]
    operator: BinaryOperator,

    #[get = "pub"]
    right_operand: Box<Expression>,
}

impl Binary {
    fn new(
        location: Location,
        left_operand: Expression,
        operator: BinaryOperator,
        right_operand: Expression,
    ) -> Self {
        Self {
            location,
            left_operand: Box::new(left_operand),
            operator,
            right_operand: Box::new(right_operand),
        }
    }
}

impl SourceElement for Binary {
    fn location(&self) -> Location { self.location }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// UnaryOperator:
///     '+' | '-' | '~'
///     ;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Unary:
///     UnaryOperator Expression
///     ;
/// ```
///
/// A sign applies to the first term of a simple expression; `~` applies to a factor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct Unary {
    location: Location,

    #[get_copy = "pub"]
    operator: UnaryOperator,

    #[get = "pub"]
    operand: Box<Expression>,
}

impl SourceElement for Unary {
    fn location(&self) -> Location { self.location }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Set:
///     '{' (Element (',' Element)*)? '}'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Set {
    location: Location,

    #[get = "pub"]
    elements: Vec<Element>,
}

impl SourceElement for Set {
    fn location(&self) -> Location { self.location }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Element:
///     Expression ('..' Expression)?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Element {
    location: Location,

    #[get = "pub"]
    low: Expression,

    #[get = "pub"]
    high: Option<Expression>,
}

impl SourceElement for Element {
    fn location(&self) -> Location { self.location }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Designator:
///     Qualident Selector*
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Designator {
    location: Location,

    #[get = "pub"]
    qualident: Qualident,

    #[get = "pub"]
    selectors: Vec<Selector>,
}

impl SourceElement for Designator {
    fn location(&self) -> Location { self.location }
}

impl Designator {
    /// Returns the plain qualident if the designator has no selectors.
    #[must_use]
    pub fn as_bare_qualident(&self) -> Option<&Qualident> {
        self.selectors.is_empty().then_some(&self.qualident)
    }

    /// Appends the argument list as a type guard selector.
    ///
    /// # Errors
    /// If the list does not consist of exactly one bare qualident.
    pub fn push_type_guard(&mut self, arguments: ActualParameters) -> Result<(), Error> {
        self.selectors
            .push(Selector::TypeGuard(TypeGuard::try_from(arguments)?));
        Ok(())
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Selector:
///     '.' Identifier
///     | '[' ExpressionList ']'
///     | '^'
///     | '(' Qualident ')'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Selector {
    Field(Field),
    Index(Index),
    Dereference(Location),
    TypeGuard(TypeGuard),
}

impl SourceElement for Selector {
    fn location(&self) -> Location {
        match self {
            Self::Field(field) => field.location,
            Self::Index(index) => index.location,
            Self::Dereference(location) => *location,
            Self::TypeGuard(type_guard) => type_guard.location,
        }
    }
}

/// `.name`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Field {
    location: Location,

    #[get = "pub"]
    name: String,
}

/// `[e0, e1, ...]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Index {
    location: Location,

    #[get = "pub"]
    indices: Vec<Expression>,
}

/// `(T)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct TypeGuard {
    location: Location,

    #[get = "pub"]
    type_name: Qualident,
}

impl_source_element!(Field, Index, TypeGuard);

impl TryFrom<ActualParameters> for TypeGuard {
    type Error = Error;

    fn try_from(arguments: ActualParameters) -> Result<Self, Self::Error> {
        let location = arguments.location;
        let mut arguments = arguments.arguments;

        match (arguments.pop(), arguments.is_empty()) {
            (Some(Expression::Designator(designator)), true) if designator.selectors.is_empty() => {
                Ok(Self {
                    location,
                    type_name: designator.qualident,
                })
            }
            _ => Err(
                crate::error::SyntaxError::new(location, "Expecting type name in type guard!".into())
                    .into(),
            ),
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ActualParameters:
///     '(' (Expression (',' Expression)*)? ')'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ActualParameters {
    location: Location,

    #[get = "pub"]
    arguments: Vec<Expression>,
}

impl SourceElement for ActualParameters {
    fn location(&self) -> Location { self.location }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Call:
///     Designator ActualParameters
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Call {
    location: Location,

    #[get = "pub"]
    designator: Designator,

    #[get = "pub"]
    arguments: ActualParameters,
}

impl SourceElement for Call {
    fn location(&self) -> Location { self.location }
}

impl<'a> Parser<'a> {
    /// Parses an [`Expression`].
    ///
    /// # Errors
    /// If the tokens do not form an expression.
    pub fn parse_expression(&mut self) -> Result<Expression, Error> {
        let location = self.location();
        let left_operand = self.parse_simple_expression()?;

        // the right operand is a simple expression, so relations never chain
        let Some(operator) = BinaryOperator::relation(self.kind()) else {
            return Ok(left_operand);
        };
        self.advance()?;

        let right_operand = self.parse_simple_expression()?;

        Ok(Expression::Binary(Binary::new(
            location,
            left_operand,
            operator,
            right_operand,
        )))
    }

    /// Parses a simple expression: an optionally signed, left-associative chain of terms.
    ///
    /// # Errors
    /// If the tokens do not form a simple expression.
    pub fn parse_simple_expression(&mut self) -> Result<Expression, Error> {
        let location = self.location();
        let sign = match self.kind() {
            TokenKind::Plus => Some(UnaryOperator::Plus),
            TokenKind::Minus => Some(UnaryOperator::Minus),
            _ => None,
        };

        if sign.is_some() {
            self.advance()?;
        }

        let mut expression = self.parse_term()?;

        if let Some(operator) = sign {
            expression = Expression::Unary(Unary {
                location,
                operator,
                operand: Box::new(expression),
            });
        }

        while let Some(operator) = BinaryOperator::additive(self.kind()) {
            self.advance()?;
            let right_operand = self.parse_term()?;
            expression =
                Expression::Binary(Binary::new(location, expression, operator, right_operand));
        }

        Ok(expression)
    }

    /// Parses a term: a left-associative chain of factors.
    ///
    /// # Errors
    /// If the tokens do not form a term.
    pub fn parse_term(&mut self) -> Result<Expression, Error> {
        let location = self.location();
        let mut expression = self.parse_factor()?;

        while let Some(operator) = BinaryOperator::multiplicative(self.kind()) {
            self.advance()?;
            let right_operand = self.parse_factor()?;
            expression =
                Expression::Binary(Binary::new(location, expression, operator, right_operand));
        }

        Ok(expression)
    }

    /// Parses a factor.
    ///
    /// # Errors
    /// If the current token cannot start a factor.
    pub fn parse_factor(&mut self) -> Result<Expression, Error> {
        let location = self.location();

        let expression = match self.kind() {
            TokenKind::Number => Expression::Number(self.literal()),
            TokenKind::String => Expression::String(self.literal()),
            TokenKind::HexString => Expression::HexString(self.literal()),
            TokenKind::HexChar => Expression::HexChar(self.literal()),
            TokenKind::Keyword(KeywordKind::Nil) => Expression::Nil(location),
            TokenKind::Keyword(KeywordKind::True) => Expression::True(location),
            TokenKind::Keyword(KeywordKind::False) => Expression::False(location),

            TokenKind::LeftBrace => return self.parse_set().map(Expression::Set),

            TokenKind::Identifier => {
                let (designator, arguments) = self.parse_designator()?;

                return Ok(match arguments {
                    Some(arguments) => Expression::Call(Call {
                        location,
                        designator,
                        arguments,
                    }),
                    None => Expression::Designator(designator),
                });
            }

            TokenKind::LeftParen => {
                self.advance()?;
                let expression = self.parse_expression()?;
                self.check_symbol_and_advance(
                    TokenKind::RightParen,
                    "Expecting ')' in expression!",
                )?;

                return Ok(expression);
            }

            TokenKind::Tilde => {
                self.advance()?;
                let operand = self.parse_factor()?;

                return Ok(Expression::Unary(Unary {
                    location,
                    operator: UnaryOperator::Not,
                    operand: Box::new(operand),
                }));
            }

            _ => return Err(self.error("Illegal literal!")),
        };

        // single-token factors
        self.advance()?;

        Ok(expression)
    }

    fn literal(&self) -> Literal {
        Literal {
            location: self.location(),
            text: self.current().text().clone(),
        }
    }

    /// Parses a [`Set`].
    ///
    /// # Errors
    /// If an element is malformed or the closing `}` is missing.
    pub fn parse_set(&mut self) -> Result<Set, Error> {
        let location = self.location();
        self.check_symbol_and_advance(TokenKind::LeftBrace, "Expecting '{' at start of set!")?;

        let mut elements = Vec::new();

        if !self.at(TokenKind::RightBrace) {
            loop {
                let element_location = self.location();
                let low = self.parse_expression()?;
                let high = if self.eat(TokenKind::UpTo)? {
                    Some(self.parse_expression()?)
                } else {
                    None
                };

                elements.push(Element {
                    location: element_location,
                    low,
                    high,
                });

                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
        }

        self.check_symbol_and_advance(TokenKind::RightBrace, "Expecting '}' at end of set!")?;

        Ok(Set { location, elements })
    }

    /// Parses a comma separated, non-empty list of expressions.
    ///
    /// # Errors
    /// If one of the expressions is malformed.
    pub fn parse_expression_list(&mut self) -> Result<Vec<Expression>, Error> {
        let mut expressions = vec![self.parse_expression()?];

        while self.eat(TokenKind::Comma)? {
            expressions.push(self.parse_expression()?);
        }

        Ok(expressions)
    }

    /// Parses [`ActualParameters`].
    ///
    /// # Errors
    /// If the list is not enclosed by parentheses or an argument is malformed.
    pub fn parse_actual_parameters(&mut self) -> Result<ActualParameters, Error> {
        let location = self.location();
        self.check_symbol_and_advance(TokenKind::LeftParen, "Expecting '(' in Parameters!")?;

        let arguments = if self.at(TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parse_expression_list()?
        };

        self.check_symbol_and_advance(TokenKind::RightParen, "Expecting ')' in Parameters!")?;

        Ok(ActualParameters {
            location,
            arguments,
        })
    }

    /// Parses a [`Designator`] together with the argument list that may trail it.
    ///
    /// `(` after a designator may open either a type guard or call arguments. Every parenthesized
    /// list is read as arguments first; a list followed by another selector must be a type guard
    /// and is converted into one, while the trailing list is returned as the call arguments.
    ///
    /// # Errors
    /// If a selector is malformed, or a list in the middle of the designator is not a type guard.
    pub fn parse_designator(&mut self) -> Result<(Designator, Option<ActualParameters>), Error> {
        let location = self.location();
        let qualident = self.parse_qualident()?;
        let mut designator = Designator {
            location,
            qualident,
            selectors: Vec::new(),
        };
        let mut arguments: Option<ActualParameters> = None;

        loop {
            let selector_location = self.location();

            let selector = match self.kind() {
                TokenKind::Dot
                | TokenKind::LeftBracket
                | TokenKind::Caret
                | TokenKind::LeftParen
                    if arguments.is_some() =>
                {
                    if let Some(pending) = arguments.take() {
                        designator.push_type_guard(pending)?;
                    }
                    continue;
                }

                TokenKind::Dot => {
                    self.advance()?;
                    let name =
                        self.expect_identifier("Expecting name literal after '.' in selector!")?;

                    Selector::Field(Field {
                        location: selector_location,
                        name,
                    })
                }

                TokenKind::LeftBracket => {
                    self.advance()?;
                    let indices = self.parse_expression_list()?;
                    self.check_symbol_and_advance(
                        TokenKind::RightBracket,
                        "Expected ']' in indexing!",
                    )?;

                    Selector::Index(Index {
                        location: selector_location,
                        indices,
                    })
                }

                TokenKind::Caret => {
                    self.advance()?;
                    Selector::Dereference(selector_location)
                }

                TokenKind::LeftParen => {
                    arguments = Some(self.parse_actual_parameters()?);
                    continue;
                }

                _ => break,
            };

            designator.selectors.push(selector);
        }

        Ok((designator, arguments))
    }
}

#[cfg(test)]
mod tests;
