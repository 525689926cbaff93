use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    if let Err(error) = galcat::run() {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
