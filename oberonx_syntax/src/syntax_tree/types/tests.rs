use oberonx_base::source_file::{Location, SourceElement};
use proptest::{prop_assert, prop_assert_eq, proptest};

use super::{ArraySyntax, PointerSyntax, Type};
use crate::syntax_tree::{
    declaration::ProcedureKeyword,
    tests::{assert_syntax_error, parse},
};

fn parse_type(source: &str) -> Type { parse(source, |parser| parser.parse_type()).unwrap() }

#[test]
fn named_types() {
    let named = parse_type("Lists.List(INTEGER, Texts.Text)");
    let named = named.as_named().unwrap();

    assert_eq!(named.qualident().to_string(), "Lists.List");

    let actuals = named.actuals().as_ref().unwrap();
    assert_eq!(actuals.location(), Location::new(1, 11));
    assert_eq!(actuals.types().len(), 2);
    assert_eq!(actuals.types()[1].qualident().to_string(), "Texts.Text");
}

#[test]
fn enumeration() {
    let enumeration = parse_type("(red, green blue)");
    assert_eq!(enumeration.as_enumeration().unwrap().values(), &[
        "red", "green", "blue"
    ]);

    assert_syntax_error(
        "(red, 1)",
        |parser| parser.parse_type(),
        "Expecting name of enumeration element!",
        1,
        7,
    );
}

#[test]
fn array_forms() {
    let keyword = parse_type("ARRAY 10, 20 OF CHAR");
    let keyword = keyword.as_array().unwrap();
    assert_eq!(keyword.syntax(), ArraySyntax::Keyword);
    assert_eq!(keyword.lengths().as_ref().unwrap().lengths().len(), 2);
    assert!(keyword.element().is_named());

    let bracketed = parse_type("ARRAY [VAR n] OF REAL");
    let lengths = bracketed.as_array().unwrap().lengths().as_ref().unwrap();
    assert!(lengths.is_variable());
    assert_eq!(lengths.location(), Location::new(1, 8));

    let open = parse_type("ARRAY OF ARRAY OF CHAR");
    let open = open.as_array().unwrap();
    assert!(open.lengths().is_none());
    assert!(open.element().is_array());

    let bracket = parse_type("[4] [] BYTE");
    let bracket = bracket.as_array().unwrap();
    assert_eq!(bracket.syntax(), ArraySyntax::Bracket);

    let inner = bracket.element().as_array().unwrap();
    assert!(inner.lengths().is_none());
    assert_eq!(inner.location(), Location::new(1, 5));
}

#[test]
fn record_type() {
    let record = parse_type("RECORD (Base) x, y: INTEGER; next: POINTER TO Node; END");
    let record = record.as_record().unwrap();

    assert_eq!(
        record.base().as_ref().unwrap().qualident().name(),
        "Base"
    );
    assert_eq!(record.fields().len(), 2);
    assert_eq!(record.fields()[0].names().names().len(), 2);
    assert_eq!(record.fields()[1].location(), Location::new(1, 30));

    let empty = parse_type("RECORD END");
    assert!(empty.as_record().unwrap().fields().is_empty());
}

#[test]
fn pointer_and_procedure_types() {
    let pointer = parse_type("^RECORD END");
    let pointer = pointer.as_pointer().unwrap();
    assert_eq!(pointer.syntax(), PointerSyntax::Caret);
    assert_eq!(pointer.target().location(), Location::new(1, 2));

    let pointer_to = parse_type("POINTER TO Node");
    assert_eq!(
        pointer_to.as_pointer().unwrap().syntax(),
        PointerSyntax::PointerTo
    );

    let procedure = parse_type("PROCEDURE (x: INTEGER): BOOLEAN");
    let procedure = procedure.as_procedure().unwrap();
    assert_eq!(procedure.keyword(), ProcedureKeyword::Procedure);
    assert!(procedure
        .parameters()
        .as_ref()
        .unwrap()
        .return_type()
        .is_some());

    let bare = parse_type("PROC");
    assert!(bare.as_procedure().unwrap().parameters().is_none());
}

#[test]
fn malformed_types() {
    assert_syntax_error("5", |parser| parser.parse_type(), "Illegal Type!", 1, 1);
    assert_syntax_error(
        "ARRAY 5 CHAR",
        |parser| parser.parse_type(),
        "Expecting 'OF' in 'ARRAY' type!",
        1,
        9,
    );
    assert_syntax_error(
        "POINTER Node",
        |parser| parser.parse_type(),
        "Expecting 'TO' in pointer declaration!",
        1,
        9,
    );
    assert_syntax_error(
        "RECORD x: INTEGER",
        |parser| parser.parse_type(),
        "Expecting 'END' at end of 'RECORD' type!",
        1,
        18,
    );
}

proptest! {
    #[test]
    fn nested_pointers(depth in 0usize..8, caret in proptest::bool::ANY) {
        let prefix = if caret { "^" } else { "POINTER TO " };
        let source = format!("{}T", prefix.repeat(depth));

        let mut r#type = parse(&source, |parser| parser.parse_type())?;

        for _ in 0..depth {
            let Type::Pointer(pointer) = r#type else {
                return Err(proptest::test_runner::TestCaseError::fail("expected a pointer"));
            };
            prop_assert_eq!(
                pointer.syntax(),
                if caret { PointerSyntax::Caret } else { PointerSyntax::PointerTo }
            );
            r#type = *pointer.target;
        }

        prop_assert!(r#type.is_named());
    }
}
