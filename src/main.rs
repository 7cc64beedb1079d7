use std::process::ExitCode;

fn main() -> ExitCode {
    match pitscore::run_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
