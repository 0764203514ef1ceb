// tests/input_errors.rs

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tempfile::NamedTempFile;

use contend::cli::CliArgs;
use contend::config::SimOptions;
use contend::errors::{ContendError, exit_code};
use contend::input::parse_file;
use contend::simulate;
use contend_test_utils::recording_sink::RecordingSink;

fn args_for(path: &str) -> CliArgs {
    CliArgs::try_parse_from(["contend", path, "10", "2"]).unwrap()
}

#[tokio::test]
async fn unrecognized_line_aborts_before_any_worker_starts() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "resources cpu:2\ntask t1 100 50 cpu:1\nworker t2 10 10 cpu:1\n"
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let err = contend::run(args_for(&path)).await.unwrap_err();
    match err {
        ContendError::Parse { line, ref message, .. } => {
            assert_eq!(line, 3);
            assert!(message.contains("worker"));
        }
        ref other => panic!("Expected Parse error, got: {:?}", other),
    }
    assert_eq!(err.exit_code(), exit_code::INPUT_FORMAT);

    // Same pipeline with a recording monitor: parsing fails first, so the
    // simulation is never reached and no snapshot is ever taken.
    let (sink, recorded) = RecordingSink::new(16);
    let outcome = match parse_file(&path) {
        Ok(workload) => Some(simulate(workload, SimOptions::default(), sink).await),
        Err(_) => None,
    };
    assert!(outcome.is_none());
    assert_eq!(recorded.lock().unwrap().count, 0);
}

#[tokio::test]
async fn missing_input_file_is_an_io_error() {
    let err = contend::run(args_for("/no/such/dir/input.txt"))
        .await
        .unwrap_err();

    assert!(matches!(err, ContendError::Io { .. }));
    assert_eq!(err.exit_code(), exit_code::INPUT_IO);
}

#[tokio::test]
async fn dry_run_parses_without_simulating() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "resources cpu:1\ntask t1 100000 100000 cpu:1\n").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let args = CliArgs::try_parse_from(["contend", &path, "0", "1000", "--dry-run"]).unwrap();
    // Would take far longer than the test if it actually ran.
    tokio::time::timeout(std::time::Duration::from_secs(5), contend::run(args))
        .await
        .expect("dry run should not simulate")
        .unwrap();
}

#[test]
fn bundled_sample_input_parses() {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workload = parse_file(manifest.join("demos/sample.txt")).unwrap();

    assert_eq!(workload.resources.len(), 4);
    assert_eq!(workload.tasks.len(), 5);
    assert!(workload.tasks.iter().all(|t| !t.requirements.is_empty()));
}

#[test]
fn invalid_settings_file_maps_to_settings_exit_code() {
    let mut settings = NamedTempFile::new().unwrap();
    write!(settings, "[simulation]\nbackoff_ms = \"fast\"\n").unwrap();

    let args = CliArgs::try_parse_from([
        "contend",
        "input.txt",
        "0",
        "1",
        "--settings",
        settings.path().to_str().unwrap(),
    ])
    .unwrap();

    let err = contend::config::SimConfig::from_args(&args).unwrap_err();
    assert_eq!(err.exit_code(), exit_code::SETTINGS);
}
