use fh_kernel::process::testing::RecordingRunner;
use fh_runner::settings::{DEFAULT_INSTANCE_URL, DEFAULT_RUNNER_LABELS, DEFAULT_RUNNER_NAME};
use fh_runner::{Registrar, Registration, RunnerError, RunnerLayout, RunnerSettings};
use std::fs;
use tempfile::TempDir;

fn deployment() -> (TempDir, RunnerLayout) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let layout = RunnerLayout::new(tmp.path());
    (tmp, layout)
}

fn value_after<'a>(args: &'a [String], flag: &str) -> &'a str {
    let i = args.iter().position(|a| a == flag).unwrap_or_else(|| panic!("{flag} missing"));
    args[i + 1].as_str()
}

#[test]
fn missing_token_fails_without_running_anything() {
    let (_tmp, layout) = deployment();
    let settings = RunnerSettings::default();
    let runner = RecordingRunner::new();

    let err = Registrar::new(&settings, &layout, &runner).register().unwrap_err();

    assert!(matches!(err, RunnerError::MissingToken { .. }));
    assert!(err.is_configuration());
    assert_eq!(runner.call_count(), 0);
    assert!(!layout.data_dir().exists(), "data dir must not be touched before validation");
}

#[test]
fn existing_marker_short_circuits() {
    let (_tmp, layout) = deployment();
    fs::create_dir_all(layout.data_dir()).unwrap();
    fs::write(layout.marker().path(), b"{}").unwrap();

    let settings = RunnerSettings::default().with_registration_token("tok");
    let runner = RecordingRunner::new();

    let outcome = Registrar::new(&settings, &layout, &runner).register().unwrap();

    assert_eq!(outcome, Registration::AlreadyRegistered { marker: layout.marker().path().to_path_buf() });
    assert_eq!(runner.call_count(), 0);
    assert_eq!(fs::read(layout.marker().path()).unwrap(), b"{}", "marker must be left untouched");
}

#[test]
fn registration_uses_defaults_when_unset() {
    let (_tmp, layout) = deployment();
    let settings = RunnerSettings::default().with_registration_token("tok-123");
    let runner = RecordingRunner::new();

    let outcome = Registrar::new(&settings, &layout, &runner).register().unwrap();
    assert_eq!(outcome, Registration::Registered);

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    let spec = &calls[0];
    let data_dir = std::path::absolute(layout.data_dir()).unwrap();

    assert_eq!(spec.program(), "docker");
    assert_eq!(
        spec.arguments(),
        [
            "run".to_owned(),
            "--rm".to_owned(),
            "--network".to_owned(),
            "forgejo_net".to_owned(),
            "-v".to_owned(),
            format!("{}:/data", data_dir.display()),
            "--entrypoint".to_owned(),
            "forgejo-runner".to_owned(),
            "code.forgejo.org/forgejo/runner:12".to_owned(),
            "register".to_owned(),
            "--instance".to_owned(),
            DEFAULT_INSTANCE_URL.to_owned(),
            "--token".to_owned(),
            "tok-123".to_owned(),
            "--name".to_owned(),
            DEFAULT_RUNNER_NAME.to_owned(),
            "--labels".to_owned(),
            DEFAULT_RUNNER_LABELS.to_owned(),
            "--no-interactive".to_owned(),
        ]
    );
    assert!(layout.data_dir().is_dir());
}

#[test]
fn registration_passes_configured_values_verbatim() {
    let (_tmp, layout) = deployment();
    let mut settings = RunnerSettings::default().with_registration_token("abc-token-xyz");
    settings.instance_url = "https://git.example.org".to_owned();
    settings.name = "builder-7".to_owned();
    settings.labels = "self-hosted:host".to_owned();
    let runner = RecordingRunner::new();

    Registrar::new(&settings, &layout, &runner).register().unwrap();

    let spec = runner.calls().remove(0);
    let args = spec.arguments();

    assert_eq!(value_after(args, "--instance"), "https://git.example.org");
    assert_eq!(value_after(args, "--token"), "abc-token-xyz");
    assert_eq!(value_after(args, "--name"), "builder-7");
    assert_eq!(value_after(args, "--labels"), "self-hosted:host");
    assert!(!spec.to_string().contains("abc-token-xyz"), "token leaked into display: {spec}");
}

#[test]
fn failing_registration_is_an_external_error() {
    let (_tmp, layout) = deployment();
    let settings = RunnerSettings::default().with_registration_token("tok-secret-42");
    let runner = RecordingRunner::new().then_exit(1);

    let err = Registrar::new(&settings, &layout, &runner).register().unwrap_err();

    assert!(matches!(err, RunnerError::CommandFailed { .. }));
    assert!(!err.is_configuration());
    assert!(!err.to_string().contains("tok-secret-42"), "token leaked into error: {err}");
}

#[test]
fn missing_docker_is_an_external_error() {
    let (_tmp, layout) = deployment();
    let settings = RunnerSettings::default().with_registration_token("tok");
    let runner = RecordingRunner::new().then_spawn_failure();

    let err = Registrar::new(&settings, &layout, &runner).register().unwrap_err();

    assert!(matches!(err, RunnerError::Process { .. }));
}
