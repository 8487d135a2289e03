use std::process::ExitCode;

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let mut stderr = std::io::stderr();
    ExitCode::from(autoblob::run(std::env::args_os(), &mut stderr))
}
