use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse an XML file and report the byte offset of the first error.
///
/// Exits with 0 if the file parses, 1 if it does not (printing the error
/// message and the offset), and 2 if the file cannot be read.
#[derive(Parser)]
#[command(name = "xmlprobe", version)]
struct Cli {
    /// XML file to parse
    path: PathBuf,
}

const IO_ERROR_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    // stdout only ever carries the failure report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match xmlprobe::run(&cli.path, &mut io::stdout().lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("xmlprobe: {}: {}", cli.path.display(), err);
            ExitCode::from(IO_ERROR_EXIT_CODE)
        }
    }
}
