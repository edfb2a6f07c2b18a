use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(tokalign::run(std::env::args_os()))
}
