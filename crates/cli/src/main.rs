use std::process::ExitCode;

use rust_verbs_cli::run;
use rust_verbs_cli::sample_commands::sample_sources;

fn main() -> ExitCode {
    env_logger::init();

    run(&sample_sources())
}
