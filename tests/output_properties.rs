// tests/output_properties.rs

use proptest::prelude::*;

use bob_runner::exec::ExecOptions;
use bob_runner::types::StreamKind;
use bob_runner_test_utils::{CommandListBuilder, FakeRun, Harness};

fn run_blocking<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(f)
}

fn chunks_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..64), 0..12)
}

proptest! {
    #[test]
    fn stdout_chunks_reach_log_and_echo_in_order(chunks in chunks_strategy(), quiet in any::<bool>()) {
        let mut run = FakeRun::success();
        for chunk in &chunks {
            run = run.stdout(chunk.clone());
        }
        let harness = Harness::with_runs([run]);
        harness.fs.add_dir("somedir");
        let opts = ExecOptions::new()
            .with_task("lint")
            .with_dir("somedir")
            .with_kind("jshint")
            .quiet(quiet);

        run_blocking(harness.executor().exec("cmd", &opts)).unwrap();

        prop_assert_eq!(harness.fs.contents("somedir/jshint.out").unwrap(), chunks.concat());
        if quiet {
            prop_assert_eq!(harness.console.echo_count(), 0);
        } else {
            prop_assert_eq!(harness.console.echoed(StreamKind::Stdout), chunks);
        }
    }

    #[test]
    fn both_streams_keep_order_and_destination(
        stdout_chunks in chunks_strategy(),
        stderr_chunks in chunks_strategy(),
    ) {
        let mut run = FakeRun::success();
        for chunk in &stdout_chunks {
            run = run.stdout(chunk.clone());
        }
        for chunk in &stderr_chunks {
            run = run.stderr(chunk.clone());
        }
        let harness = Harness::with_runs([run]);
        harness.fs.add_dir("somedir");
        let opts = ExecOptions::new()
            .with_task("test")
            .with_dir("somedir")
            .with_kind("buster");

        run_blocking(harness.executor().exec("cmd", &opts)).unwrap();

        let total: usize = stdout_chunks.iter().chain(&stderr_chunks).map(Vec::len).sum();
        prop_assert_eq!(harness.fs.contents("somedir/buster.out").unwrap().len(), total);
        prop_assert_eq!(harness.console.echoed(StreamKind::Stdout), stdout_chunks);
        prop_assert_eq!(harness.console.echoed(StreamKind::Stderr), stderr_chunks);
    }

    #[test]
    fn series_stops_at_first_failure(outcomes in proptest::collection::vec(any::<bool>(), 0..8)) {
        let runs: Vec<FakeRun> = outcomes
            .iter()
            .enumerate()
            .map(|(i, ok)| if *ok { FakeRun::success() } else { FakeRun::failing(&format!("fail-{i}")) })
            .collect();
        let harness = Harness::with_runs(runs);
        let mut builder = CommandListBuilder::new();
        for i in 0..outcomes.len() {
            builder = builder.command("task", &format!("t{i}"), &format!("cmd-{i}"));
        }
        let commands = builder.build();

        let result = run_blocking(
            harness.sequencer().exec_series(&commands, &ExecOptions::new().with_cwd("root")),
        );

        let first_failure = outcomes.iter().position(|ok| !ok);
        let expected_spawns = first_failure.map_or(outcomes.len(), |i| i + 1);
        let expected: Vec<String> = (0..expected_spawns).map(|i| format!("cmd-{i}")).collect();
        prop_assert_eq!(harness.spawner.commands(), expected);

        match first_failure {
            Some(i) => prop_assert_eq!(result.unwrap_err().to_string(), format!("fail-{i}")),
            None => prop_assert!(result.is_ok()),
        }
    }
}
