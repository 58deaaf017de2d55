use std::fmt::Display;

use oberonx_base::source_file::{Location, SourceElement};
use oberonx_test::input::Input;
use proptest::{
    prelude::Arbitrary,
    prop_assert_eq, prop_oneof, proptest,
    strategy::{BoxedStrategy, Just, Strategy},
    test_runner::{TestCaseError, TestCaseResult},
};

use crate::syntax_tree::tests::{assert_syntax_error, parse, Identifier};

/// Is the tightness of a production; an operand looser than what its position requires is
/// printed in parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Relation,
    Simple,
    Term,
    Factor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    Number(u32),
    Nil,
    True,
    False,
    Call {
        function: Identifier,
        arguments: Vec<Expression>,
    },
    Unary {
        operator: super::UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        left_operand: Box<Expression>,
        operator: super::BinaryOperator,
        right_operand: Box<Expression>,
    },
}

fn level_of(operator: super::BinaryOperator) -> Level {
    use super::BinaryOperator as Op;

    match operator {
        Op::Add | Op::Subtract | Op::Or => Level::Simple,
        Op::Multiply | Op::Divide | Op::IntegerDivide | Op::Modulo | Op::And => Level::Term,
        _ => Level::Relation,
    }
}

fn operator_text(operator: super::BinaryOperator) -> &'static str {
    use super::BinaryOperator as Op;

    match operator {
        Op::Less => "<",
        Op::LessEqual => "<=",
        Op::Equal => "=",
        Op::NotEqual => "#",
        Op::Greater => ">",
        Op::GreaterEqual => ">=",
        Op::In => "IN",
        Op::Is => "IS",
        Op::Add => "+",
        Op::Subtract => "-",
        Op::Or => "OR",
        Op::Multiply => "*",
        Op::Divide => "/",
        Op::IntegerDivide => "DIV",
        Op::Modulo => "MOD",
        Op::And => "&",
    }
}

impl Expression {
    fn level(&self) -> Level {
        match self {
            Self::Binary { operator, .. } => level_of(*operator),
            Self::Unary {
                operator: super::UnaryOperator::Plus | super::UnaryOperator::Minus,
                ..
            } => Level::Simple,
            _ => Level::Factor,
        }
    }

    fn write_at(&self, required: Level, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.level() < required {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Nil => f.write_str("NIL"),
            Self::True => f.write_str("TRUE"),
            Self::False => f.write_str("FALSE"),
            Self::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(")")
            }
            Self::Unary { operator, operand } => {
                let (text, required) = match operator {
                    super::UnaryOperator::Plus => ("+", Level::Term),
                    super::UnaryOperator::Minus => ("-", Level::Term),
                    super::UnaryOperator::Not => ("~", Level::Factor),
                };
                f.write_str(text)?;
                operand.write_at(required, f)
            }
            Self::Binary {
                left_operand,
                operator,
                right_operand,
            } => {
                let level = level_of(*operator);
                let (left, right) = match level {
                    Level::Relation => (Level::Simple, Level::Simple),
                    Level::Simple => (Level::Simple, Level::Term),
                    _ => (Level::Term, Level::Factor),
                };

                left_operand.write_at(left, f)?;
                write!(f, " {} ", operator_text(*operator))?;
                right_operand.write_at(right, f)
            }
        }
    }
}

impl Arbitrary for Expression {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use super::{BinaryOperator as Op, UnaryOperator};

        let leaf = prop_oneof![
            Identifier::arbitrary().prop_map(Self::Identifier),
            (0..100_000u32).prop_map(Self::Number),
            Just(Self::Nil),
            Just(Self::True),
            Just(Self::False),
        ];

        let binary_operator = proptest::sample::select(vec![
            Op::Less,
            Op::LessEqual,
            Op::Equal,
            Op::NotEqual,
            Op::Greater,
            Op::GreaterEqual,
            Op::In,
            Op::Is,
            Op::Add,
            Op::Subtract,
            Op::Or,
            Op::Multiply,
            Op::Divide,
            Op::IntegerDivide,
            Op::Modulo,
            Op::And,
        ]);

        let unary_operator = proptest::sample::select(vec![
            UnaryOperator::Plus,
            UnaryOperator::Minus,
            UnaryOperator::Not,
        ]);

        leaf.prop_recursive(4, 24, 3, move |inner| {
            prop_oneof![
                (inner.clone(), binary_operator.clone(), inner.clone()).prop_map(
                    |(left_operand, operator, right_operand)| Self::Binary {
                        left_operand: Box::new(left_operand),
                        operator,
                        right_operand: Box::new(right_operand),
                    }
                ),
                (unary_operator.clone(), inner.clone()).prop_map(|(operator, operand)| {
                    Self::Unary {
                        operator,
                        operand: Box::new(operand),
                    }
                }),
                (
                    Identifier::arbitrary(),
                    proptest::collection::vec(inner, 0..3)
                )
                    .prop_map(|(function, arguments)| Self::Call {
                        function,
                        arguments
                    }),
            ]
        })
        .boxed()
    }
}

impl Input<&super::Expression> for &Expression {
    fn assert(self, output: &super::Expression) -> TestCaseResult {
        match (self, output) {
            (Expression::Identifier(identifier), super::Expression::Designator(designator)) => {
                prop_assert_eq!(designator.selectors().len(), 0);
                identifier.assert(designator.qualident())
            }
            (Expression::Number(number), super::Expression::Number(literal)) => {
                prop_assert_eq!(&number.to_string(), literal.text());
                Ok(())
            }
            (Expression::Nil, super::Expression::Nil(..))
            | (Expression::True, super::Expression::True(..))
            | (Expression::False, super::Expression::False(..)) => Ok(()),
            (
                Expression::Call {
                    function,
                    arguments,
                },
                super::Expression::Call(call),
            ) => {
                prop_assert_eq!(call.designator().selectors().len(), 0);
                function.assert(call.designator().qualident())?;
                arguments.assert(call.arguments().arguments())
            }
            (Expression::Unary { operator, operand }, super::Expression::Unary(unary)) => {
                prop_assert_eq!(*operator, unary.operator());
                operand.as_ref().assert(unary.operand().as_ref())
            }
            (
                Expression::Binary {
                    left_operand,
                    operator,
                    right_operand,
                },
                super::Expression::Binary(binary),
            ) => {
                prop_assert_eq!(*operator, binary.operator());
                left_operand.as_ref().assert(binary.left_operand().as_ref())?;
                right_operand
                    .as_ref()
                    .assert(binary.right_operand().as_ref())
            }
            _ => Err(TestCaseError::fail(format!(
                "expected {self:?} but found {output:?}",
            ))),
        }
    }
}

proptest! {
    #[test]
    fn expression(
        expression_input in Expression::arbitrary(),
    ) {
        let source = expression_input.to_string();
        let expression = parse(&source, |parser| parser.parse_expression())?;

        expression_input.assert(&expression)?;
    }
}

#[test]
fn multiplication_binds_tighter() {
    let expression = parse("1 + 2 * 3", |parser| parser.parse_expression()).unwrap();
    let binary = expression.as_binary().unwrap();

    assert_eq!(binary.operator(), super::BinaryOperator::Add);
    assert_eq!(binary.left_operand().as_number().unwrap().text(), "1");

    let right = binary.right_operand().as_binary().unwrap();
    assert_eq!(right.operator(), super::BinaryOperator::Multiply);
    assert_eq!(right.location(), Location::new(1, 5));
}

#[test]
fn parenthesized_left_operand_locations() {
    for (source, operator) in [
        ("(a) * b", super::BinaryOperator::Multiply),
        ("(a) + b", super::BinaryOperator::Add),
        ("(a) = b", super::BinaryOperator::Equal),
    ] {
        let expression = parse(source, |parser| parser.parse_expression()).unwrap();
        let binary = expression.as_binary().unwrap();

        assert_eq!(binary.operator(), operator, "{source}");
        assert_eq!(binary.location(), Location::new(1, 1), "{source}");
        assert_eq!(
            binary.left_operand().location(),
            Location::new(1, 2),
            "{source}"
        );
    }

    let sum = parse("x + (a) * b", |parser| parser.parse_expression()).unwrap();
    let product = sum.as_binary().unwrap().right_operand();
    assert_eq!(product.location(), Location::new(1, 5));

    let negated = parse("-(a) * b", |parser| parser.parse_expression()).unwrap();
    let negated = negated.as_unary().unwrap();
    assert_eq!(negated.location(), Location::new(1, 1));
    assert_eq!(negated.operand().location(), Location::new(1, 2));
}

#[test]
fn sign_applies_to_first_term() {
    let expression = parse("-a * b + c", |parser| parser.parse_expression()).unwrap();
    let sum = expression.as_binary().unwrap();
    assert_eq!(sum.operator(), super::BinaryOperator::Add);

    let negated = sum.left_operand().as_unary().unwrap();
    assert_eq!(negated.operator(), super::UnaryOperator::Minus);
    assert_eq!(
        negated.operand().as_binary().unwrap().operator(),
        super::BinaryOperator::Multiply
    );
}

#[test]
fn relations_do_not_chain() {
    let source_file = oberonx_base::source_file::SourceFile::temp("a < b < c").unwrap();
    let mut parser = crate::parser::Parser::new(
        oberonx_lexical::tokenizer::Tokenizer::new(&source_file),
    );
    parser.advance().unwrap();

    let expression = parser.parse_expression().unwrap();
    assert_eq!(
        expression.as_binary().unwrap().operator(),
        super::BinaryOperator::Less
    );

    // the second relation is left for the caller
    assert_eq!(parser.kind(), oberonx_lexical::token::TokenKind::Less);
    assert_eq!(parser.location(), Location::new(1, 7));
}

#[test]
fn literals_and_sets() {
    let set = parse("{0, 2..5, i}", |parser| parser.parse_expression()).unwrap();
    let elements = set.as_set().unwrap().elements();

    assert_eq!(elements.len(), 3);
    assert!(elements[0].high().is_none());
    assert_eq!(elements[1].low().as_number().unwrap().text(), "2");
    assert_eq!(elements[1].high().as_ref().unwrap().as_number().unwrap().text(), "5");
    assert_eq!(elements[2].location(), Location::new(1, 11));

    assert!(parse("{}", |parser| parser.parse_expression())
        .unwrap()
        .as_set()
        .unwrap()
        .elements()
        .is_empty());

    let string = parse("\"text\"", |parser| parser.parse_expression()).unwrap();
    assert!(string.as_string().is_some());

    let hex_char = parse("0DX", |parser| parser.parse_expression()).unwrap();
    assert_eq!(hex_char.as_hex_char().unwrap().text(), "0DX");

    let parenthesized = parse("(NIL)", |parser| parser.parse_expression()).unwrap();
    assert_eq!(parenthesized, super::Expression::Nil(Location::new(1, 2)));
}

#[test]
fn designator_selectors() {
    let expression = parse("a.b[i, j]^.c", |parser| parser.parse_expression()).unwrap();
    let designator = expression.as_designator().unwrap();

    assert_eq!(designator.qualident().to_string(), "a.b");

    let selectors = designator.selectors();
    assert_eq!(selectors.len(), 3);
    assert_eq!(selectors[0].as_index().unwrap().indices().len(), 2);
    assert_eq!(selectors[1], super::Selector::Dereference(Location::new(1, 10)));
    assert_eq!(selectors[2].as_field().unwrap().name(), "c");
}

#[test]
fn type_guard_followed_by_selector() {
    let expression = parse("p(Node).next", |parser| parser.parse_expression()).unwrap();
    let designator = expression.as_designator().unwrap();
    let selectors = designator.selectors();

    assert_eq!(selectors.len(), 2);
    assert_eq!(selectors[0].as_type_guard().unwrap().type_name().name(), "Node");
    assert_eq!(selectors[0].location(), Location::new(1, 2));
    assert_eq!(selectors[1].as_field().unwrap().name(), "next");
}

#[test]
fn trailing_arguments_form_a_call() {
    let expression = parse("f(x)(y)", |parser| parser.parse_expression()).unwrap();
    let call = expression.as_call().unwrap();

    assert_eq!(call.designator().selectors().len(), 1);
    assert_eq!(call.arguments().arguments().len(), 1);
    assert_eq!(call.arguments().location(), Location::new(1, 5));
    assert_eq!(call.location(), Location::new(1, 1));
}

#[test]
fn type_guard_requires_type_name() {
    assert_syntax_error(
        "p(1).next",
        |parser| parser.parse_expression(),
        "Expecting type name in type guard!",
        1,
        2,
    );
    assert_syntax_error(
        "p(a, b)^",
        |parser| parser.parse_expression(),
        "Expecting type name in type guard!",
        1,
        2,
    );
}

#[test]
fn malformed_factors() {
    assert_syntax_error(
        "(a + b",
        |parser| parser.parse_expression(),
        "Expecting ')' in expression!",
        1,
        7,
    );
    assert_syntax_error("a + ;", |parser| parser.parse_expression(), "Illegal literal!", 1, 5);
    assert_syntax_error(
        "a[1",
        |parser| parser.parse_expression(),
        "Expected ']' in indexing!",
        1,
        4,
    );
}
