use std::process::ExitCode;

fn main() -> ExitCode {
    changelog_validator::cli::run()
}
