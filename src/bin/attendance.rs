use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;

use attendance_tracker::cli::{self, Cli};
use attendance_tracker::utils::logger;

fn main() -> ExitCode {
    dotenv().ok();

    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let mut stdout = std::io::stdout().lock();
    match cli::run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
