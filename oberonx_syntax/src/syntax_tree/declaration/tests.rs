use oberonx_base::source_file::{Location, SourceElement};
use oberonx_test::input::Input;
use proptest::{prelude::Arbitrary, prop_assert_eq, proptest};

use super::{Declaration, DeclarationSequence, ParameterMode, ProcedureKeyword};
use crate::syntax_tree::{
    tests::{assert_syntax_error, parse, Identifier},
    Export,
};

fn parse_declarations(source: &str, with_bodies: bool) -> DeclarationSequence {
    parse(source, |parser| parser.parse_declaration_sequence(with_bodies)).unwrap()
}

#[test]
fn sections() {
    let sequence = parse_declarations(
        "CONST N = 10; M* = N * 2; TYPE T = INTEGER VAR x, y: T",
        true,
    );
    let declarations = sequence.declarations();
    assert_eq!(declarations.len(), 4);

    let constant = declarations[1].as_const().unwrap();
    assert_eq!(constant.location(), Location::new(1, 15));
    assert_eq!(constant.name().export(), Export::Exported);
    assert!(constant.value().is_binary());

    let r#type = declarations[2].as_type().unwrap();
    assert_eq!(r#type.location(), Location::new(1, 32));
    assert!(r#type.r#type().is_named());

    let variable = declarations[3].as_variable().unwrap();
    assert_eq!(variable.location(), Location::new(1, 48));
    assert_eq!(variable.names().names().len(), 2);
}

#[test]
fn sections_may_repeat() {
    let sequence = parse_declarations("VAR a: A; VAR b: B CONST c = 1 VAR d: D;", true);
    let kinds = sequence
        .declarations()
        .iter()
        .map(|declaration| declaration.is_variable())
        .collect::<Vec<_>>();

    assert_eq!(kinds, [true, true, false, true]);
}

#[test]
fn empty_sections() {
    let sequence = parse_declarations("CONST TYPE VAR", true);
    assert!(sequence.declarations().is_empty());
    assert_eq!(sequence.location(), Location::new(1, 1));
}

#[test]
fn procedure_declaration() {
    let sequence = parse_declarations(
        "PROCEDURE (VAR n: Node) Draw*(x, y: INTEGER; VAR done: BOOLEAN): INTEGER; RETURN 0 END Draw",
        true,
    );
    let procedure = sequence.declarations()[0].as_procedure().unwrap();
    let heading = procedure.heading();

    assert_eq!(heading.keyword(), ProcedureKeyword::Procedure);
    assert_eq!(heading.name().name(), "Draw");
    assert_eq!(heading.name().location(), Location::new(1, 25));

    let receiver = heading.receiver().as_ref().unwrap();
    assert_eq!(receiver.mode(), ParameterMode::Variable);
    assert_eq!(receiver.name(), "n");
    assert_eq!(receiver.type_name(), "Node");

    let parameters = heading.parameters().as_ref().unwrap();
    assert_eq!(parameters.sections().len(), 2);
    assert_eq!(parameters.sections()[0].names(), &["x", "y"]);
    assert_eq!(parameters.sections()[0].mode(), ParameterMode::Value);
    assert_eq!(parameters.sections()[1].mode(), ParameterMode::Variable);
    assert!(parameters.return_type().is_some());

    // a lone RETURN is the whole body
    let statements = procedure.body().statements().as_ref().unwrap();
    assert_eq!(statements.statements().len(), 1);
    assert_eq!(statements.location(), Location::new(1, 75));
    assert_eq!(procedure.closing_name(), "Draw");
}

#[test]
fn nested_procedures() {
    let sequence = parse_declarations(
        "PROC Outer; VAR i: INTEGER; PROCEDURE Inner(); BEGIN END Inner; BEGIN Inner END Outer;",
        true,
    );
    let outer = sequence.declarations()[0].as_procedure().unwrap();

    assert_eq!(outer.heading().keyword(), ProcedureKeyword::Proc);

    let inner = outer.body().declarations().declarations();
    assert_eq!(inner.len(), 2);
    assert!(inner[1]
        .as_procedure()
        .unwrap()
        .heading()
        .parameters()
        .as_ref()
        .unwrap()
        .sections()
        .is_empty());
    assert_eq!(
        outer
            .body()
            .statements()
            .as_ref()
            .unwrap()
            .statements()
            .len(),
        1
    );
}

#[test]
fn procedure_without_body() {
    let sequence = parse_declarations("PROCEDURE P; END P", true);
    let procedure = sequence.declarations()[0].as_procedure().unwrap();

    assert!(procedure.body().statements().is_none());
    assert!(procedure.body().declarations().declarations().is_empty());
}

#[test]
fn procedure_headings() {
    let sequence = parse_declarations(
        "PROCEDURE Open(IN name: ARRAY OF CHAR): File; PROC Close(f: File) VAR count-: INTEGER",
        false,
    );
    let declarations = sequence.declarations();

    assert_eq!(declarations.len(), 3);
    assert_eq!(
        declarations[0]
            .as_procedure_heading()
            .unwrap()
            .parameters()
            .as_ref()
            .unwrap()
            .sections()[0]
            .mode(),
        ParameterMode::In
    );
    assert!(declarations[1].is_procedure_heading());
    assert_eq!(
        declarations[2].as_variable().unwrap().names().names()[0].export(),
        Export::ReadOnly
    );
}

#[test]
fn generic_type_declaration() {
    let sequence = parse_declarations("TYPE List*(T) = POINTER TO RECORD value: T END;", true);
    let declaration = sequence.declarations()[0].as_type().unwrap();

    assert_eq!(
        declaration.type_params().as_ref().unwrap().names(),
        &["T"]
    );
    assert!(declaration.r#type().is_pointer());
}

#[test]
fn procedure_name_mismatch() {
    assert_syntax_error(
        "PROCEDURE P; BEGIN END Q",
        |parser| parser.parse_declaration_sequence(true),
        "Procedure name is inconsistant in procedure!",
        1,
        24,
    );
    assert_syntax_error(
        "PROCEDURE P; BEGIN END",
        |parser| parser.parse_declaration_sequence(true),
        "Missing name literal at end of 'PROCEDURE' or 'PROC' declaration!",
        1,
        23,
    );
}

#[test]
fn malformed_declarations() {
    assert_syntax_error(
        "CONST N := 1",
        |parser| parser.parse_declaration_sequence(true),
        "Expecting '=' in 'CONST' declaration!",
        1,
        9,
    );
    assert_syntax_error(
        "VAR x INTEGER",
        |parser| parser.parse_declaration_sequence(true),
        "Expecting ':' in 'VAR' declaration!",
        1,
        14,
    );
    assert_syntax_error(
        "PROCEDURE (n Node) P; END P",
        |parser| parser.parse_declaration_sequence(true),
        "Expecting ':' in reciver!",
        1,
        14,
    );
    assert_syntax_error(
        "PROCEDURE P(x, 1: T); END P",
        |parser| parser.parse_declaration_sequence(true),
        "Expecting literal name in arguments!",
        1,
        16,
    );
}

proptest! {
    #[test]
    fn variable_names(
        names in proptest::collection::vec(Identifier::arbitrary(), 1..5),
        type_name in Identifier::arbitrary(),
    ) {
        let source = format!(
            "VAR {}: {type_name};",
            names.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
        let sequence = parse(&source, |parser| parser.parse_declaration_sequence(true))?;

        prop_assert_eq!(sequence.declarations().len(), 1);

        let Declaration::Variable(variable) = &sequence.declarations()[0] else {
            return Err(proptest::test_runner::TestCaseError::fail("expected a variable"));
        };

        prop_assert_eq!(variable.names().names().len(), names.len());
        for (input, output) in names.iter().zip(variable.names().names()) {
            input.assert(output.name())?;
        }
        type_name.assert(variable.r#type().as_named().unwrap().qualident())?;
    }
}
