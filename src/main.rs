use clap::Parser;
use oscalp::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
