use std::{fmt::Display, fs::File, path::PathBuf, process::ExitCode, sync::Arc};

pub use clap::Parser;
use oberonx_base::{
    diagnostic::Diagnostic,
    log::{Message, Severity, SourceCodeDisplay},
    source_file::SourceFile,
};
use oberonx_lexical::tokenizer::Tokenizer;
use oberonx_syntax::{parser, syntax_tree::module::Unit};

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "oberonx",
    about = "Tokenizer and parser for Oberon-family source files.",
    author = "66011245@kmitl.ac.th"
)]
pub struct Argument {
    /// The source file to parse.
    pub file: PathBuf,

    /// Prints out every token of the file before parsing it.
    #[clap(long = "dump-tokens")]
    pub dump_tokens: bool,

    /// Prints out the syntax tree of the file.
    #[clap(long = "dump-syntax")]
    pub dump_syntax: bool,

    /// Shows the offending source line under an error.
    #[clap(long = "show-source")]
    pub show_source: bool,
}

/// Is the stage a run stopped at. The cause has already been reported when it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Failure {
    Load,
    Diagnostic,
}

fn report_error(display: impl Display) { eprintln!("{}", Message::new(Severity::Error, display)); }

fn load(argument: &Argument) -> Result<Arc<SourceFile>, Failure> {
    let file = File::open(&argument.file).map_err(|error| {
        report_error(format!("{}: {error}", argument.file.display()));
        Failure::Load
    })?;

    SourceFile::load(file, argument.file.clone()).map_err(|error| {
        report_error(format!("{}: {error}", argument.file.display()));
        Failure::Load
    })
}

/// Prints the diagnostic in the external format on the standard output stream.
fn report_diagnostic(
    argument: &Argument,
    source_file: &SourceFile,
    diagnostic: &Diagnostic,
) -> Failure {
    print!("{}", diagnostic.render());

    if argument.show_source {
        report_error(diagnostic.message());
        eprintln!(
            "{}",
            SourceCodeDisplay::new(source_file, diagnostic.location(), Some(diagnostic.message()))
        );
    }

    Failure::Diagnostic
}

fn execute(argument: &Argument) -> Result<Option<Unit>, Failure> {
    let source_file = load(argument)?;

    if argument.dump_tokens {
        let tokens = Tokenizer::tokenize(&source_file)
            .map_err(|error| report_diagnostic(argument, &source_file, &error.into()))?;

        for token in tokens {
            println!("{token}");
        }
    }

    let mut parser = parser::Parser::new(Tokenizer::new(&source_file));
    let unit = parser
        .parse_oberon()
        .map_err(|error| report_diagnostic(argument, &source_file, &error.into()))?;

    match &unit {
        Some(unit) => {
            let kind = match unit {
                Unit::Module(_) => "module",
                Unit::Definition(_) => "definition",
            };
            eprintln!(
                "{}",
                Message::new(Severity::Info, format!("parsed {kind} `{}`", unit.name()))
            );

            if argument.dump_syntax {
                println!("{unit:#?}");
            }
        }
        None => eprintln!(
            "{}",
            Message::new(
                Severity::Info,
                format!("{}: the file is empty", argument.file.display())
            )
        ),
    }

    Ok(unit)
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: Argument) -> ExitCode {
    match execute(&argument) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
