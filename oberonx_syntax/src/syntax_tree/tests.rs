use std::{fmt::Display, str::FromStr};

use oberonx_base::source_file::{Location, SourceElement, SourceFile};
use oberonx_lexical::{
    token::{KeywordKind, TokenKind},
    tokenizer::Tokenizer,
};
use oberonx_test::input::Input;
use proptest::{
    prelude::Arbitrary,
    prop_assert_eq, proptest,
    strategy::{BoxedStrategy, Strategy},
    test_runner::{TestCaseError, TestCaseResult},
};

use super::{Export, Qualident};
use crate::{error::Error, parser::Parser};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(pub String);

impl Arbitrary for Identifier {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        "[a-zA-Z][a-zA-Z0-9_]{0,7}"
            .prop_filter("keywords are not identifiers", |name| {
                KeywordKind::from_str(name).is_err()
            })
            .prop_map(Self)
            .boxed()
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl Input<&String> for &Identifier {
    fn assert(self, output: &String) -> TestCaseResult {
        prop_assert_eq!(&self.0, output);
        Ok(())
    }
}

impl Input<&Qualident> for &Identifier {
    fn assert(self, output: &Qualident) -> TestCaseResult {
        prop_assert_eq!(output.module(), &None);
        self.assert(output.name())
    }
}

/// Runs the given production on `source` and checks that it consumed every token.
pub fn parse<T, F>(source: impl Display, f: F) -> Result<T, TestCaseError>
where
    F: FnOnce(&mut Parser) -> Result<T, Error>,
{
    let source_file = SourceFile::temp(&source)?;
    let mut parser = Parser::new(Tokenizer::new(&source_file));

    let output = parser
        .advance()
        .and_then(|()| f(&mut parser))
        .map_err(|error| {
            TestCaseError::fail(format!(
                "{location}: {error};\nsource: {source}",
                location = error.location()
            ))
        })?;

    if !parser.at(TokenKind::Eof) {
        return Err(TestCaseError::fail(format!(
            "unconsumed token {current} after parsing;\nsource: {source}",
            current = parser.current(),
        )));
    }

    Ok(output)
}

/// Runs the given production on `source` and returns the error it stopped with.
pub fn parse_error<T, F>(source: impl Display, f: F) -> Result<Error, TestCaseError>
where
    T: std::fmt::Debug,
    F: FnOnce(&mut Parser) -> Result<T, Error>,
{
    let source_file = SourceFile::temp(&source)?;
    let mut parser = Parser::new(Tokenizer::new(&source_file));

    match parser.advance().and_then(|()| f(&mut parser)) {
        Ok(output) => Err(TestCaseError::fail(format!(
            "expected an error but parsed {output:#?};\nsource: {source}"
        ))),
        Err(error) => Ok(error),
    }
}

/// Asserts that parsing `source` fails with `message` at the given position.
pub fn assert_syntax_error<T, F>(source: impl Display, f: F, message: &str, line: usize, column: usize)
where
    T: std::fmt::Debug,
    F: FnOnce(&mut Parser) -> Result<T, Error>,
{
    let error = parse_error(source, f).unwrap();
    let syntax = error.as_syntax().expect("expected a syntax error");

    assert_eq!(syntax.message(), message);
    assert_eq!(syntax.location(), Location::new(line, column));
}

#[test]
fn qualident() {
    let plain = parse("Name", |parser| parser.parse_qualident()).unwrap();
    assert_eq!(plain.module(), &None);
    assert_eq!(plain.name(), "Name");
    assert_eq!(plain.to_string(), "Name");

    let qualified = parse("  Out.Int", |parser| parser.parse_qualident()).unwrap();
    assert_eq!(qualified.module().as_deref(), Some("Out"));
    assert_eq!(qualified.name(), "Int");
    assert_eq!(qualified.location(), Location::new(1, 3));
    assert_eq!(qualified.to_string(), "Out.Int");

    assert_syntax_error(
        "Out.",
        |parser| parser.parse_qualident(),
        "Expecting name literal after '.' in qualident!",
        1,
        5,
    );
    assert_syntax_error("7", |parser| parser.parse_qualident(), "Expecting name literal!", 1, 1);
}

#[test]
fn ident_def_export_marks() {
    let list = parse("a, b* c-", |parser| parser.parse_ident_list()).unwrap();
    assert_eq!(list.location(), Location::new(1, 1));
    let marks = list
        .names()
        .iter()
        .map(|name| (name.name().as_str(), name.export(), name.location()))
        .collect::<Vec<_>>();

    assert_eq!(marks, [
        ("a", Export::Private, Location::new(1, 1)),
        ("b", Export::Exported, Location::new(1, 4)),
        ("c", Export::ReadOnly, Location::new(1, 7)),
    ]);
}

proptest! {
    #[test]
    fn ident_list(
        names in proptest::collection::vec(Identifier::arbitrary(), 1..6),
        commas in proptest::collection::vec(proptest::bool::ANY, 6),
    ) {
        let mut source = names[0].to_string();
        for (name, comma) in names.iter().skip(1).zip(&commas) {
            source.push_str(if *comma { ", " } else { " " });
            source.push_str(&name.0);
        }

        let list = parse(&source, |parser| parser.parse_ident_list())?;

        prop_assert_eq!(list.names().len(), names.len());
        for (input, output) in names.iter().zip(list.names()) {
            input.assert(output.name())?;
            prop_assert_eq!(output.export(), Export::Private);
        }
    }
}
