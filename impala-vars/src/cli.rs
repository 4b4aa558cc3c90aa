//! Defines the command-line interface for the application.

use clap::Parser;
use impala_vars_lib::runner::DEFAULT_SHELL;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "impala-vars",
    version,
    about = "Run a query against impala, using impala-shell, performing variable substitution from a configuration file."
)]
pub struct Cli {
    /// Additional options for impala-shell, double quoted (e.g. "-k -d DBNAME").
    #[arg(short, long, value_name = "OPTIONS", allow_hyphen_values = true)]
    pub additional_options: Option<String>,

    /// Turn on verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Just print the formatted sql query without executing it.
    #[arg(short, long)]
    pub dry_run: bool,

    /// The query shell to launch.
    #[arg(long, value_name = "PROGRAM", env = "IMPALA_SHELL", default_value = DEFAULT_SHELL)]
    pub shell: String,

    /// Path to the SQL file containing {name} placeholders.
    #[arg(value_name = "SQL_FILE")]
    pub sql_file: PathBuf,

    /// Path to the configuration file with one name=value per line.
    #[arg(value_name = "CONFIG_FILE")]
    pub config_file: PathBuf,
}
