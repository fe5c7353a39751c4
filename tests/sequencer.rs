// tests/sequencer.rs

use std::error::Error;
use std::path::PathBuf;

use bob_runner::errors::BobError;
use bob_runner::exec::ExecOptions;
use bob_runner_test_utils::{init_tracing, with_timeout, CommandListBuilder, FakeRun, Harness};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn runs_single_command_with_derived_log_path() -> TestResult {
    init_tracing();
    let harness = Harness::with_runs([FakeRun::success()
        .stdout("somedata")
        .stderr("somedata")]);
    let commands = CommandListBuilder::new()
        .command("test", "buster", "somecommand")
        .build();
    let opts = ExecOptions::new().with_cwd("somedir");

    with_timeout(harness.sequencer().exec_series(&commands, &opts)).await?;

    assert_eq!(harness.fs.dir_requests(), vec![PathBuf::from("somedir/.bob/test")]);
    assert_eq!(
        harness.fs.sink_requests(),
        vec![PathBuf::from("somedir/.bob/test/buster.out")]
    );
    assert_eq!(harness.console.lines(), vec!["test | somecommand"]);
    assert_eq!(
        harness.fs.contents_string("somedir/.bob/test/buster.out").as_deref(),
        Some("somedatasomedata")
    );
    assert_eq!(harness.console.echo_count(), 2);
    Ok(())
}

#[tokio::test]
async fn empty_list_does_nothing() -> TestResult {
    let harness = Harness::new();

    harness.sequencer().exec_series(&[], &ExecOptions::new()).await?;

    assert!(harness.fs.dir_requests().is_empty());
    assert!(harness.spawner.calls().is_empty());
    assert!(harness.console.lines().is_empty());
    Ok(())
}

#[tokio::test]
async fn passes_first_error_through_and_stops() {
    init_tracing();
    let harness = Harness::with_runs([FakeRun::failing("someerror")]);
    let commands = CommandListBuilder::new()
        .command("test", "buster", "somecommand")
        .command("test", "mocha", "othercommand")
        .command("lint", "jshint", "thirdcommand")
        .build();
    // Caller-supplied dir/task/type are replaced per command.
    let opts = ExecOptions::new()
        .with_cwd("somedir")
        .with_task("test")
        .with_kind("buster")
        .with_dir("somedir/.bob/test");

    let err = with_timeout(harness.sequencer().exec_series(&commands, &opts))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "someerror");
    assert_eq!(harness.spawner.commands(), vec!["somecommand"]);
    assert_eq!(harness.fs.dir_requests(), vec![PathBuf::from("somedir/.bob/test")]);
    assert_eq!(
        harness.fs.sink_requests(),
        vec![PathBuf::from("somedir/.bob/test/buster.out")]
    );
}

#[tokio::test]
async fn runs_all_commands_in_order() -> TestResult {
    let harness = Harness::new();
    let commands = CommandListBuilder::new()
        .command("lint", "jshint", "jshint lib")
        .command("lint", "csslint", "csslint css")
        .command("test", "buster", "buster-test")
        .build();
    let opts = ExecOptions::new().with_cwd("somedir").quiet(true);

    harness.sequencer().exec_series(&commands, &opts).await?;

    assert_eq!(
        harness.spawner.commands(),
        vec!["jshint lib", "csslint css", "buster-test"]
    );
    // One directory request per command, even for a repeated task.
    assert_eq!(
        harness.fs.dir_requests(),
        vec![
            PathBuf::from("somedir/.bob/lint"),
            PathBuf::from("somedir/.bob/lint"),
            PathBuf::from("somedir/.bob/test"),
        ]
    );
    assert_eq!(
        harness.console.lines(),
        vec!["lint | jshint lib", "lint | csslint css", "test | buster-test"]
    );
    Ok(())
}

#[tokio::test]
async fn merged_options_keep_cwd_and_quiet() -> TestResult {
    let harness = Harness::new();
    let commands = CommandListBuilder::new()
        .command("test", "buster", "somecommand")
        .build();
    let opts = ExecOptions::new().with_cwd("somedir").quiet(true);

    harness.sequencer().exec_series(&commands, &opts).await?;

    let calls = harness.spawner.calls();
    assert_eq!(
        calls[0].options,
        ExecOptions::new()
            .with_cwd("somedir")
            .with_dir("somedir/.bob/test")
            .with_task("test")
            .with_kind("buster")
            .quiet(true)
    );
    Ok(())
}

#[tokio::test]
async fn failure_in_middle_skips_the_rest() {
    let harness = Harness::with_runs([FakeRun::success(), FakeRun::failing("lint failed")]);
    let commands = CommandListBuilder::new()
        .command("lint", "jshint", "first")
        .command("lint", "csslint", "second")
        .command("test", "buster", "third")
        .build();

    let err = harness
        .sequencer()
        .exec_series(&commands, &ExecOptions::new().with_cwd("somedir"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "lint failed");
    assert_eq!(harness.spawner.commands(), vec!["first", "second"]);
    assert!(!harness.fs.is_dir("somedir/.bob/test"));
}

#[tokio::test]
async fn directory_failure_stops_before_spawning() {
    let harness = Harness::new();
    harness.fs.deny_writes_under("locked");
    let commands = CommandListBuilder::new()
        .command("test", "buster", "somecommand")
        .build();

    let err = harness
        .sequencer()
        .exec_series(&commands, &ExecOptions::new().with_cwd("locked"))
        .await
        .unwrap_err();

    match err {
        BobError::Prepare { path, .. } => assert_eq!(path, PathBuf::from("locked/.bob/test")),
        other => panic!("expected Prepare, got {other:?}"),
    }
    assert!(harness.spawner.calls().is_empty());
    assert!(harness.console.lines().is_empty());
}

#[tokio::test]
async fn requires_cwd_for_non_empty_list() {
    let harness = Harness::new();
    let commands = CommandListBuilder::new()
        .command("test", "buster", "somecommand")
        .build();

    let err = harness
        .sequencer()
        .exec_series(&commands, &ExecOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, BobError::MissingOption("cwd")));
}
