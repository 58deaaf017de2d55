use std::process::ExitCode;

use oberonx_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    oberonx_driver::run(argument)
}
