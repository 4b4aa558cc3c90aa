use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use impala_vars_lib::error::FileKind;
use impala_vars_lib::paths;
use impala_vars_lib::runner::{run_query, RunOutcome, ShellInvocation};
use impala_vars_lib::{QueryTemplate, Variables};
use log::LevelFilter;
use std::io::{self, Write};
use std::process::ExitCode;

pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_exit(&err),
    };

    init_logging(cli.verbose);

    match execute(cli) {
        Ok(outcome) => exit_code_for(outcome),
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Prints clap's message; help and version exit 0, usage errors exit 1.
fn usage_exit(err: &clap::Error) -> ExitCode {
    // Nothing useful can be done if the terminal is gone.
    let _ = err.print();
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn execute(cli: Cli) -> anyhow::Result<RunOutcome> {
    let Cli {
        additional_options,
        dry_run,
        shell,
        sql_file,
        config_file,
        ..
    } = cli;

    let sql_path = paths::resolve(&sql_file);
    log::debug!("Provided sql path is: {}", sql_path.display());
    let config_path = paths::resolve(&config_file);
    log::debug!("Provided config. file path is: {}", config_path.display());

    paths::ensure_file(&sql_path, FileKind::Query)?;
    paths::ensure_file(&config_path, FileKind::Config)?;

    let template = QueryTemplate::from_file(&sql_path)?;
    let variables = Variables::from_file(&config_path)?;
    log::debug!("Query placeholders: {}", template.placeholders()?.join(", "));

    let query = template.render(&variables)?;
    let invocation = ShellInvocation::new(shell, additional_options.as_deref(), query);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_query(&invocation, dry_run, &mut out)
        .with_context(|| format!("Could not run the query from {}", sql_path.display()))
}

fn exit_code_for(outcome: RunOutcome) -> ExitCode {
    match outcome {
        RunOutcome::DryRun => ExitCode::SUCCESS,
        RunOutcome::Completed(_) if outcome.success() => {
            log::info!("Everything ok, goodbye!");
            ExitCode::SUCCESS
        }
        RunOutcome::Completed(code) => {
            log::error!("Error executing the query (exit code {code})");
            ExitCode::from(shell_exit_byte(code))
        }
    }
}

/// The shell's status as a process exit byte, falling back to 1 when it does
/// not fit or would read as success.
fn shell_exit_byte(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|&byte| byte != 0).unwrap_or(1)
}
