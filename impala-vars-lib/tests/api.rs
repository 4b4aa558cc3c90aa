use assert_fs::prelude::*;
use impala_vars_lib::error::{FileKind, VarsError};
use impala_vars_lib::paths;
use impala_vars_lib::runner::{ShellInvocation, DEFAULT_SHELL};
use impala_vars_lib::{QueryTemplate, Variables};

#[test]
fn load_files_and_render_query() {
    let temp = assert_fs::TempDir::new().unwrap();
    let sql = temp.child("daily.sql");
    sql.write_str("SELECT count(*) FROM {db}.events WHERE day = '{day}';\n")
        .unwrap();
    let config = temp.child("daily.conf");
    config.write_str("db=analytics\n\nday = 2024-05-01\n").unwrap();

    let sql_path = paths::resolve(sql.path());
    let config_path = paths::resolve(config.path());
    paths::ensure_file(&sql_path, FileKind::Query).expect("sql file exists");
    paths::ensure_file(&config_path, FileKind::Config).expect("config file exists");

    let template = QueryTemplate::from_file(&sql_path).expect("template loads");
    let variables = Variables::from_file(&config_path).expect("variables load");
    let query = template.render(&variables).expect("render succeeds");

    assert_eq!(
        query,
        "SELECT count(*) FROM analytics.events WHERE day = '2024-05-01';\n"
    );

    let invocation = ShellInvocation::new(DEFAULT_SHELL, Some("-i impalad:21000"), query.clone());
    assert_eq!(invocation.args(), ["-i", "impalad:21000", "-q", query.as_str()]);
}

#[test]
fn invalid_config_line_stops_loading() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child("bad.conf");
    config.write_str("db=analytics\nfilter=a=b\n").unwrap();

    let err = Variables::from_file(config.path()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid line 2 in configuration file: \"filter=a=b\""
    );
}

#[test]
fn missing_variable_message_names_the_variable() {
    let err = QueryTemplate::new("SELECT {missing}")
        .render(&Variables::default())
        .unwrap_err();

    assert!(matches!(err, VarsError::MissingVariable(_)));
    assert_eq!(
        err.to_string(),
        "The query requires a variable missing from the configuration file: \"missing\""
    );
}
