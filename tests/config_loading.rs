// tests/config_loading.rs

use std::io::Write;

use bob_runner::config::load_and_validate;
use bob_runner::errors::BobError;
use bob_runner::types::Command;
use tempfile::NamedTempFile;

const PROJECT: &str = r#"
[config]
quiet = true

[[task.lint]]
type = "jshint"
exec = "jshint lib/ test/"

[[task.lint]]
type = "csslint"
exec = "csslint css/"

[[task.test]]
type = "buster"
exec = "buster-test"
"#;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn expands_tasks_in_requested_order() {
    let file = write_config(PROJECT);
    let cfg = load_and_validate(file.path()).unwrap();

    assert!(cfg.config.quiet);
    let commands = cfg.commands_for(&["test", "lint"]).unwrap();
    assert_eq!(
        commands,
        vec![
            Command::new("test", "buster", "buster-test"),
            Command::new("lint", "jshint", "jshint lib/ test/"),
            Command::new("lint", "csslint", "csslint css/"),
        ]
    );
}

#[test]
fn unknown_task_is_reported() {
    let file = write_config(PROJECT);
    let cfg = load_and_validate(file.path()).unwrap();

    match cfg.commands_for(&["lint", "deploy"]) {
        Err(BobError::TaskNotFound(name)) => assert_eq!(name, "deploy"),
        other => panic!("expected TaskNotFound, got {other:?}"),
    }
}

#[test]
fn unknown_fields_are_a_toml_error() {
    let file = write_config(
        r#"
[[task.lint]]
type = "jshint"
exec = "jshint"
retries = 3
"#,
    );

    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(BobError::TomlError(_))), "got {result:?}");
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("definitely/not/here/bob.toml");
    assert!(matches!(result, Err(BobError::IoError(_))));
}

#[test]
fn task_without_commands_is_rejected() {
    let file = write_config("task = { lint = [] }\n");

    match load_and_validate(file.path()) {
        Err(BobError::ConfigError(msg)) => assert!(msg.contains("has no commands")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}
