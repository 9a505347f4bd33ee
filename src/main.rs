//! imgmeta - Print the metadata of image files.

use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgmeta::{app, Config};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let code = app::run(&config, &mut stdout.lock(), &mut stderr.lock());

    if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so they never mix with the report on stdout.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "imgmeta=debug"
    } else {
        "imgmeta=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
