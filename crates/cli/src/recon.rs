//! `rlink run`, `rlink validate`, `rlink resolve`.

use std::path::{Path, PathBuf};

use rosterlink_bulk::{BulkImportClient, BulkImportJob, Credentials};
use rosterlink_io::csv::{load_reference, read_file_as_utf8};
use rosterlink_io::{CsvSource, LocalSink, RecordSource, ResultSink};
use rosterlink_recon::config::SubmitConfig;
use rosterlink_recon::{EntityResolver, ReconResult, RunConfig};

use crate::exit_codes::{
    submit_exit_code, EXIT_INPUT, EXIT_INVALID_CONFIG, EXIT_OUTPUT, EXIT_SUBMIT_NOT_AUTH,
    EXIT_SUBMIT_NOT_CONFIGURED,
};
use crate::CliError;

pub struct RunArgs {
    pub config: PathBuf,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub submit: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

fn load_config(config_path: &Path) -> Result<RunConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::new(
            EXIT_INVALID_CONFIG,
            format!("cannot read config {}: {e}", config_path.display()),
        )
    })?;
    RunConfig::from_toml(&config_str).map_err(|e| CliError::new(EXIT_INVALID_CONFIG, e.to_string()))
}

/// Relative paths in a config resolve against the config file's directory.
fn base_dir(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or_else(|| Path::new("."))
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config = load_config(&args.config)?;
    let base_dir = base_dir(&args.config);

    // Fail on missing submit settings before touching any files
    let submit = match (&config.submit, args.submit) {
        (Some(submit), true) => Some(submit),
        (None, true) => {
            return Err(CliError::new(
                EXIT_SUBMIT_NOT_CONFIGURED,
                "--submit requires a [submit] section in the config",
            )
            .with_hint("add [submit] with api_base, file_name, source_url and columns"))
        }
        (_, false) => None,
    };

    let source = CsvSource::from_config(&config.input, base_dir);
    let input = source
        .fetch()
        .map_err(|e| CliError::new(EXIT_INPUT, e.to_string()))?;

    let result = rosterlink_recon::run(&config, &input)
        .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, e.to_string()))?;

    let sink = LocalSink::from_config(&config.output, base_dir);
    let report = sink
        .persist(&result)
        .map_err(|e| CliError::new(EXIT_OUTPUT, e.to_string()))?;

    let json_file = args
        .output
        .clone()
        .or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    if args.json || json_file.is_some() {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::other(format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = json_file {
            std::fs::write(path, &json_str).map_err(|e| {
                CliError::new(EXIT_OUTPUT, format!("cannot write {}: {e}", path.display()))
            })?;
            eprintln!("wrote {}", path.display());
        }

        if args.json {
            println!("{json_str}");
        }
    }

    print_summary(&result);
    eprintln!("wrote {} ({} rows)", report.csv_path.display(), report.rows);
    if let Some(ref archive) = report.archive_path {
        eprintln!("wrote {}", archive.display());
    }

    if let Some(submit) = submit {
        let credentials = resolve_credentials(
            args.username,
            args.password,
            submit,
            |name| std::env::var(name).ok(),
        )?;
        submit_job(submit, credentials)?;
    }

    Ok(())
}

fn print_summary(result: &ReconResult) {
    let s = &result.summary;
    eprintln!(
        "{}: {} events, {} with role ({} leaders, {} members), {} with group",
        result.meta.config_name, s.total_events, s.with_role, s.leaders, s.members, s.with_group,
    );
    eprintln!(
        "groups: {} matched, {} below cutoff {}, {} without candidates; {} exported",
        s.matched, s.below_cutoff, result.meta.cutoff, s.no_candidates, s.exported,
    );
}

/// Flag wins over the configured environment variable.
fn resolve_credentials(
    username: Option<String>,
    password: Option<String>,
    submit: &SubmitConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Credentials, CliError> {
    let username = username.or_else(|| env(&submit.username_env));
    let password = password.or_else(|| env(&submit.password_env));

    match (username, password) {
        (Some(username), Some(password)) => Ok(Credentials { username, password }),
        (username, _) => {
            let (missing, var) = if username.is_none() {
                ("username", &submit.username_env)
            } else {
                ("password", &submit.password_env)
            };
            Err(CliError::new(
                EXIT_SUBMIT_NOT_AUTH,
                format!("no bulk-import {missing} provided"),
            )
            .with_hint(format!("pass --{missing} or set {var}")))
        }
    }
}

fn submit_job(submit: &SubmitConfig, credentials: Credentials) -> Result<(), CliError> {
    let client = BulkImportClient::new(&submit.api_base, credentials)
        .map_err(|e| CliError::new(submit_exit_code(&e), e.to_string()))?;

    let job = BulkImportJob::from_config(submit);
    let receipt = client
        .submit(&job)
        .map_err(|e| CliError::new(submit_exit_code(&e), e.to_string()))?;

    match receipt.job_id {
        Some(id) => eprintln!("submitted bulk-import job {id} (HTTP {})", receipt.status),
        None => eprintln!("submitted bulk-import job (HTTP {}): {}", receipt.status, receipt.body),
    }
    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    eprintln!(
        "valid: '{}' role field {}, group field {}, cutoff {}{}",
        config.name,
        config.fields.role,
        config.fields.group,
        config.cutoff,
        if config.submit.is_some() { ", submit configured" } else { "" },
    );
    Ok(())
}

pub fn cmd_resolve(
    query: String,
    reference: PathBuf,
    column: String,
    cutoff: f64,
) -> Result<(), CliError> {
    if !cutoff.is_finite() || !(0.0..=1.0).contains(&cutoff) {
        return Err(CliError::args(format!("--cutoff must be within [0, 1], got {cutoff}")));
    }

    let content = read_file_as_utf8(&reference).map_err(|e| CliError::new(EXIT_INPUT, e.to_string()))?;
    let names = load_reference(&reference.display().to_string(), &content, &column)
        .map_err(|e| CliError::new(EXIT_INPUT, e.to_string()))?;

    let resolution = EntityResolver::new(&names, cutoff).resolve(Some(&query));
    let json_str = serde_json::to_string_pretty(&resolution)
        .map_err(|e| CliError::other(format!("JSON serialization error: {e}")))?;
    println!("{json_str}");
    Ok(())
}
