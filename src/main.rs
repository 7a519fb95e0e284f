use std::process::ExitCode;

fn main() -> ExitCode {
    match facet_box::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("facet-box: {e}");
            ExitCode::FAILURE
        }
    }
}
