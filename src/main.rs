use std::process::ExitCode;

fn main() -> ExitCode {
    match grid_filters::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
