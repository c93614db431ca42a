//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use wayfarer_cli::CliError;

fn main() {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    match wayfarer_cli::run() {
        Ok(()) => {}
        // Help and version requests are reported by clap itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("wayfarer: {err}");
            std::process::exit(1);
        }
    }
}
