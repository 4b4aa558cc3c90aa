//! Invocation of the external query shell.

use std::fmt;
use std::io::{self, Write};
use std::process::Command;

use crate::error::VarsError;

/// Executable launched when no other shell is configured.
pub const DEFAULT_SHELL: &str = "impala-shell";

/// Flag that introduces the query text on the shell command line.
pub const QUERY_FLAG: &str = "-q";

/// A fully prepared shell command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInvocation {
    program: String,
    args: Vec<String>,
}

/// How a call to [`run_query`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The query was printed instead of executed.
    DryRun,
    /// The shell ran and exited with this code.
    Completed(i32),
}

impl RunOutcome {
    pub fn success(self) -> bool {
        matches!(self, RunOutcome::DryRun | RunOutcome::Completed(0))
    }
}

impl ShellInvocation {
    /// Builds `program [additional options...] -q query`.
    ///
    /// `additional_options` is split on whitespace; quoting is not
    /// interpreted.
    pub fn new(
        program: impl Into<String>,
        additional_options: Option<&str>,
        query: impl Into<String>,
    ) -> Self {
        let mut args: Vec<String> = additional_options
            .map(|options| options.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        args.push(QUERY_FLAG.to_string());
        args.push(query.into());

        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The query text, always the last argument.
    pub fn query(&self) -> &str {
        self.args.last().map_or("", String::as_str)
    }
}

impl fmt::Display for ShellInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Prints the query to `out` when `dry_run` is set, otherwise runs the shell
/// and waits for it.
///
/// The shell inherits this process's stdio. A shell terminated by a signal is
/// logged as a warning and reported as exit code 1.
pub fn run_query<W: Write>(
    invocation: &ShellInvocation,
    dry_run: bool,
    out: &mut W,
) -> Result<RunOutcome, VarsError> {
    if dry_run {
        log::debug!("Performing a dry run");
        write_query(out, invocation.query()).map_err(VarsError::Output)?;
        return Ok(RunOutcome::DryRun);
    }

    log::debug!("Calling {} with arguments: {invocation}", invocation.program());
    let status = Command::new(&invocation.program)
        .args(&invocation.args)
        .status()
        .map_err(|source| VarsError::Launch {
            program: invocation.program.clone(),
            source,
        })?;

    let code = status.code().unwrap_or_else(|| {
        log::warn!("{} was terminated by a signal ({status})", invocation.program());
        1
    });
    Ok(RunOutcome::Completed(code))
}

fn write_query<W: Write>(out: &mut W, query: &str) -> io::Result<()> {
    out.write_all(query.as_bytes())?;
    out.flush()
}
