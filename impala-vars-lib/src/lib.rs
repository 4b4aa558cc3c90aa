//! `impala-vars-lib` holds the logic behind the `impala-vars` CLI: reading a
//! flat `name=value` variables file, substituting those variables into a SQL
//! template and handing the result to `impala-shell`.
//!
//! Nothing in here terminates the process. Every failure is a
//! [`VarsError`](error::VarsError) for the caller to report.
//!
//! # Example
//!
//! ```rust
//! use impala_vars_lib::runner::{run_query, RunOutcome, ShellInvocation, DEFAULT_SHELL};
//! use impala_vars_lib::{QueryTemplate, Variables};
//!
//! # fn demo() -> Result<(), impala_vars_lib::error::VarsError> {
//! let variables: Variables = "table = users\n\nlimit=10\n".parse()?;
//! let template = QueryTemplate::new("SELECT * FROM {table} LIMIT {limit}");
//!
//! let query = template.render(&variables)?;
//! assert_eq!(query, "SELECT * FROM users LIMIT 10");
//!
//! let invocation = ShellInvocation::new(DEFAULT_SHELL, Some("-k -d sales"), query);
//! let mut out = Vec::new();
//! assert_eq!(run_query(&invocation, true, &mut out)?, RunOutcome::DryRun);
//! assert_eq!(out, b"SELECT * FROM users LIMIT 10");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub mod error;
pub mod paths;
pub mod runner;
pub mod template;
pub mod variables;

pub use template::QueryTemplate;
pub use variables::Variables;
