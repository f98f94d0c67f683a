use std::env;
use std::io;

use atty::Stream;
use camtag_core::{Config, HttpStorageClient, RunRequest};
use clap::error::ErrorKind;
use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use tracing::info;

mod cli;
mod output;
mod style;

use cli::{CamtagCli, USAGE};
use output::{OutputOptions, ReportPrinter};

const LOG_ENV: &str = "CAMTAG_LOG";

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = parse_or_exit();
    init_tracing(cli.trace, cli.verbose);

    let config = load_config(&cli).map_err(|err| eyre!("{err:#}"))?;
    let client = HttpStorageClient::new(config.server()).map_err(|err| eyre!("{err:#}"))?;

    let request = RunRequest {
        mode: cli.mode,
        tags: cli.tags.clone(),
        paths: cli.files.clone(),
        dry_run: cli.dry_run,
    };
    let printer = ReportPrinter::new(OutputOptions {
        json: cli.json,
        no_color: cli.no_color,
        is_tty: atty::is(Stream::Stdout),
    });

    let summary = camtag_core::run(&client, &request, |report| printer.emit(report));
    info!(
        files = summary.files,
        changed = summary.changed,
        unchanged = summary.unchanged,
        skipped = summary.skipped,
        errors = summary.errors,
        failed_mutations = summary.failed_mutations,
        "done"
    );
    Ok(())
}

/// Parses arguments; malformed invocations print usage on stdout and exit 1.
fn parse_or_exit() -> CamtagCli {
    match CamtagCli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprint!("{}", err.render());
            println!("Usage: {USAGE}");
            std::process::exit(1);
        }
    }
}

fn load_config(cli: &CamtagCli) -> anyhow::Result<Config> {
    let config = Config::from_env()?;
    match cli.server.as_deref() {
        Some(server) => config.with_server(server),
        None => Ok(config),
    }
}

fn init_tracing(trace: bool, verbose: u8) {
    let level = if trace {
        "trace"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = env::var(LOG_ENV)
        .unwrap_or_else(|_| format!("camtag={level},camtag_core={level}"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
