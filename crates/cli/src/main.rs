use std::process::ExitCode;

fn main() -> ExitCode {
    salestotal_cli::run()
}
