//! Command-line interface for the exporter
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Usage errors (printed to stdout, exit status 1)
//! - Building the export request and logging settings from arguments

use clap::Parser;
use clap::error::ErrorKind;
use std::io::Write;

use crate::config::{Config, LogLevel};
use crate::error::Result;
use crate::export::ExportRequest;

/// Exit status used for usage errors
pub const USAGE_EXIT_CODE: i32 = 1;

/// Export the first documents of every collection in a MongoDB database
#[derive(Parser, Debug)]
#[command(
    name = "mongo-sample-export",
    version,
    about = "Export a sample of every collection of a MongoDB database to <database>.json",
    long_about = "Connects to MongoDB, reads the first 10 documents of every collection in
the given database and writes them to <database>.json as indented Extended JSON."
)]
pub struct CliArgs {
    /// Name of the database to export
    #[arg(value_name = "DATABASE")]
    pub database: String,

    /// MongoDB connection URI
    ///
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    #[arg(long, value_name = "URI")]
    pub uri: Option<String>,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Effective configuration
    config: Config,
}

impl CliInterface {
    /// Parse the process arguments
    ///
    /// Help and version requests print and exit 0. Any other argument error,
    /// including a missing database name, prints the usage to stdout and
    /// exits with [`USAGE_EXIT_CODE`].
    pub fn new() -> Result<Self> {
        match CliArgs::try_parse() {
            Ok(args) => Self::from_args(args),
            Err(err) => exit_with_usage(err),
        }
    }

    /// Build the interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let mut config = Config::default();
        Self::apply_args_to_config(&mut config, &args);
        config.validate()?;

        Ok(Self { args, config })
    }

    /// The export request described by the arguments
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest::new(self.args.database.clone(), self.config.export.clone())
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(uri) = &args.uri {
            config.export.uri = uri.clone();
        }

        if args.very_verbose {
            config.logging.level = LogLevel::Trace;
        } else if args.verbose {
            config.logging.level = LogLevel::Debug;
        }
    }
}

/// Report an argument error and terminate the process
fn exit_with_usage(err: clap::Error) -> ! {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            print!("{}", err.render());
            let _ = std::io::stdout().flush();
            std::process::exit(USAGE_EXIT_CODE);
        }
    }
}
