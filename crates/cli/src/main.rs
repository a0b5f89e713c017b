// rlink - daily roster import: extract roles and groups from event sign-ups,
// match groups against the reference list, write the bulk-import file.

mod exit_codes;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("RLINK_COMMIT"), ")",
    "\nengine:  rosterlink-recon ", env!("CARGO_PKG_VERSION"),
    "\ntarget:  ", env!("RLINK_TARGET"),
);

#[derive(Parser)]
#[command(name = "rlink")]
#[command(about = "Match event sign-ups to groups and roles for bulk import")]
#[command(long_version = LONG_VERSION)]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG applies otherwise.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the import pipeline from a TOML config file
    #[command(after_help = "\
Examples:
  rlink run daily.recon.toml
  rlink run daily.recon.toml --json
  rlink run daily.recon.toml --output result.json
  rlink run daily.recon.toml --submit --username api-user")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Print the run result as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the run result as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Submit a bulk-import job after writing the export
        #[arg(long)]
        submit: bool,

        /// Bulk-import API user (overrides the configured env var)
        #[arg(long)]
        username: Option<String>,

        /// Bulk-import API password (overrides the configured env var)
        #[arg(long)]
        password: Option<String>,
    },

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  rlink validate daily.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },

    /// Resolve one group name against a reference file
    #[command(after_help = "\
Examples:
  rlink resolve 'coalition north side' --reference groups.csv
  rlink resolve 'southside' --reference groups.csv --column supportergroupname --cutoff 0.6")]
    Resolve {
        /// Free-text group name
        query: String,

        /// Reference CSV with candidate names
        #[arg(long)]
        reference: PathBuf,

        /// Column holding candidate names
        #[arg(long, default_value = "name")]
        column: String,

        /// Minimum similarity in [0, 1]
        #[arg(long, default_value_t = 0.8)]
        cutoff: f64,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            submit,
            username,
            password,
        } => recon::cmd_run(recon::RunArgs {
            config,
            json,
            output,
            submit,
            username,
            password,
        }),
        Commands::Validate { config } => recon::cmd_validate(config),
        Commands::Resolve {
            query,
            reference,
            column,
            cutoff,
        } => recon::cmd_resolve(query, reference, column, cutoff),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
