#![deny(missing_docs)]

//! # Actiondoc CLI
//!
//! Command Line Interface for the actiondoc OpenAPI compiler.
//!
//! Supported Commands:
//! - `build`: Compiles the document and writes it (or prints it).
//! - `check`: Compiles the document and prints a summary.

use clap::{Parser, Subcommand};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::CliResult;

mod build;
mod check;
mod error;
mod source;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Action catalog to OpenAPI 3.0.1 compiler")]
struct Cli {
    /// Emit logs as JSON lines.
    #[clap(long, global = true)]
    log_json: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile the OpenAPI document and write it under the public directory.
    Build(build::BuildArgs),
    /// Compile the OpenAPI document and report its contents.
    Check(check::CheckArgs),
}

/// Both formats share one writer so stdout stays reserved for the document.
fn log_subscriber<W>(json: bool, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        Box::new(registry.with(fmt::layer().json().with_writer(writer)))
    } else {
        Box::new(registry.with(fmt::layer().compact().with_target(false).with_writer(writer)))
    }
}

fn init_logging(json: bool) {
    log_subscriber(json, std::io::stderr).init();
}

fn main() -> CliResult<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_json);

    match &cli.command {
        Commands::Build(args) => {
            build::execute(args)?;
        }
        Commands::Check(args) => {
            check::execute(args)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_logs_go_to_the_given_writer() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Capture(buffer.clone());
        let subscriber = log_subscriber(true, move || sink.clone());
        tracing::subscriber::with_default(subscriber, || tracing::error!("captured"));

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("\"message\":\"captured\""), "{}", output);
    }

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_arguments() {
        let cli = Cli::try_parse_from([
            "actiondoc",
            "build",
            "--catalog",
            "catalog.yaml",
            "--stdout",
            "--log-json",
        ])
        .unwrap();
        assert!(cli.log_json);
        match cli.command {
            Commands::Build(args) => {
                assert!(args.stdout);
                assert_eq!(args.source.catalog.to_str(), Some("catalog.yaml"));
            }
            Commands::Check(_) => panic!("expected build"),
        }
    }
}
