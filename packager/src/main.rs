//! ruplacer release packager CLI entrypoint.
//!
//! Builds the release binary, stages and archives it, publishes the archive
//! into `dist/` and, on Linux, builds a Debian package.

use camino::Utf8PathBuf;
use clap::Parser;
use ruplacer_packager::builder::{BuildConfig, CargoReleaseBuilder};
use ruplacer_packager::cli::Cli;
use ruplacer_packager::command::{CommandExecutor, SystemCommandExecutor};
use ruplacer_packager::config::PipelineConfig;
use ruplacer_packager::error::{PackagerError, Result};
use ruplacer_packager::output::{success_message, write_stderr_line};
use ruplacer_packager::pipeline::{
    PipelineOutcome, ResolvedRelease, execute, print_plan, resolve_release,
};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(verbosity)),
    )
    .init();
}

/// Log level used when `RUST_LOG` is not set.
fn default_log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 | 1 => "warn",
        _ => "debug",
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let cwd = current_dir()?;
    let config = cli.to_config(&cwd)?;
    let resolved = resolve_release(&config)?;
    let executor = SystemCommandExecutor::in_dir(config.work_dir());
    run_resolved(&config, &resolved, &executor, stderr)
}

fn run_resolved(
    config: &PipelineConfig,
    resolved: &ResolvedRelease,
    executor: &dyn CommandExecutor,
    stderr: &mut dyn Write,
) -> Result<()> {
    if config.dry_run() {
        print_plan(config, resolved, stderr);
        return Ok(());
    }

    let builder = CargoReleaseBuilder::new(
        executor,
        BuildConfig {
            verbosity: config.verbosity(),
        },
    );
    let outcome = execute(config, resolved, &builder, executor, stderr)?;

    if !config.quiet() {
        report_outcome(&outcome, stderr);
    }
    Ok(())
}

fn report_outcome(outcome: &PipelineOutcome, stderr: &mut dyn Write) {
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, success_message(&outcome.archive_path));
    if let Some(checksum) = &outcome.checksum_path {
        write_stderr_line(stderr, success_message(checksum));
    }
    if outcome.secondary_packaged {
        write_stderr_line(stderr, "Debian package written by cargo-deb");
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|e| PackagerError::InvalidWorkDir {
        reason: format!("current directory is not valid UTF-8: {e}"),
    })
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}
