//! Tests for the checkout sequence and the process runner.

use std::cell::RefCell;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{
    CheckoutRequest, GitRunner, ProcessGitRunner, SourceFetcher, StepStatus, checkout_steps,
};
use crate::error::ResourceError;
use crate::local::ssh::SshCredentials;

/// Records every invocation and fails the step at `fail_at`, if any.
#[derive(Debug, Default)]
struct RecordingRunner {
    calls: RefCell<Vec<Vec<String>>>,
    fail_at: Option<usize>,
}

impl RecordingRunner {
    fn failing_at(index: usize) -> Self {
        Self {
            calls: RefCell::default(),
            fail_at: Some(index),
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl GitRunner for RecordingRunner {
    fn run(&self, _workdir: &Utf8Path, args: &[String]) -> io::Result<StepStatus> {
        let index = self.calls.borrow().len();
        self.calls.borrow_mut().push(args.to_vec());
        if self.fail_at == Some(index) {
            Ok(StepStatus::exited(128))
        } else {
            Ok(StepStatus::exited(0))
        }
    }
}

struct Workspace {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn home(&self) -> Utf8PathBuf {
        self.root.join("home")
    }

    fn destination(&self) -> Utf8PathBuf {
        self.root.join("out").join("repo")
    }
}

#[fixture]
fn workspace() -> Workspace {
    let temp = TempDir::new().expect("temp dir should be created");
    let root =
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("temp path should be UTF-8");
    std::fs::create_dir(root.join("home")).expect("home dir should be created");
    Workspace { _temp: temp, root }
}

fn request<'a>(destination: &'a Utf8Path, private_key: Option<&'a str>) -> CheckoutRequest<'a> {
    CheckoutRequest {
        uri: "git@github.com:hpcloud/fun.git",
        pr_number: 58,
        sha: "fecdba",
        destination,
        private_key,
    }
}

fn as_strings(calls: &[Vec<String>]) -> Vec<String> {
    calls.iter().map(|args| args.join(" ")).collect()
}

#[rstest]
fn steps_fetch_pull_request_head_and_check_out_commit() {
    let steps: Vec<String> = checkout_steps("https://github.com/o/r.git", 45, "abc")
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        steps,
        vec![
            "git init",
            "git remote add origin https://github.com/o/r.git",
            "git fetch --depth 1 origin refs/pull/45/head:pr",
            "git checkout abc",
            "git submodule update --init --recursive --depth 1",
        ]
    );
}

#[rstest]
fn uri_with_spaces_stays_a_single_argument() {
    let steps = checkout_steps("file:///tmp/my repo", 1, "abc");
    let remote = steps.get(1).expect("remote step should exist");
    assert_eq!(remote.args().last().map(String::as_str), Some("file:///tmp/my repo"));
}

#[rstest]
fn successful_sequence_runs_every_step(workspace: Workspace) {
    let destination = workspace.destination();
    let fetcher = SourceFetcher::new(
        RecordingRunner::default(),
        SshCredentials::new(workspace.home(), "github.com"),
    );

    fetcher
        .materialize(&request(&destination, None))
        .expect("checkout should succeed");

    assert!(destination.is_dir(), "destination should be created");
    assert_eq!(fetcher.runner.calls().len(), 5);
    assert!(
        !workspace.home().join(".ssh").exists(),
        "no SSH files without a key"
    );
}

#[rstest]
#[case::init(0, "git init")]
#[case::fetch(2, "git fetch --depth 1 origin refs/pull/58/head:pr")]
#[case::submodules(4, "git submodule update --init --recursive --depth 1")]
fn failing_step_aborts_sequence(
    workspace: Workspace,
    #[case] fail_at: usize,
    #[case] expected_step: &str,
) {
    let destination = workspace.destination();
    let fetcher = SourceFetcher::new(
        RecordingRunner::failing_at(fail_at),
        SshCredentials::new(workspace.home(), "github.com"),
    );

    let error = fetcher
        .materialize(&request(&destination, None))
        .expect_err("checkout should fail");

    assert_eq!(
        error,
        ResourceError::GitStep {
            step: expected_step.to_owned(),
            detail: "exit code 128".to_owned(),
        }
    );
    let calls = fetcher.runner.calls();
    assert_eq!(calls.len(), fail_at + 1, "no step may run after a failure");
    assert_eq!(as_strings(&calls).last().map(String::as_str), expected_step.strip_prefix("git "));
}

#[rstest]
fn private_key_is_provisioned_before_fetching(workspace: Workspace) {
    let destination = workspace.destination();
    let fetcher = SourceFetcher::new(
        RecordingRunner::default(),
        SshCredentials::new(workspace.home(), "github.com"),
    );

    fetcher
        .materialize(&request(&destination, Some("KEY")))
        .expect("checkout should succeed");

    assert!(workspace.home().join(".ssh/config").is_file());
    assert!(workspace.home().join(".ssh/github.key").is_file());
}

#[rstest]
fn process_runner_reports_spawn_failure(workspace: Workspace) {
    let runner = ProcessGitRunner::new(workspace.root.join("missing-git").into_string());
    let destination = workspace.destination();
    let fetcher = SourceFetcher::new(runner, SshCredentials::new(workspace.home(), "github.com"));

    let error = fetcher
        .materialize(&request(&destination, None))
        .expect_err("missing executable should fail");

    match error {
        ResourceError::GitStep { step, detail } => {
            assert_eq!(step, "git init");
            assert!(detail.contains("could not start git"), "unexpected: {detail}");
        }
        other => panic!("expected GitStep, got {other:?}"),
    }
}

#[cfg(unix)]
#[rstest]
fn process_runner_passes_argv_and_exit_codes(workspace: Workspace) {
    use cap_std::ambient_authority;
    use cap_std::fs::PermissionsExt;
    use cap_std::fs_utf8::Dir;

    let log = workspace.root.join("git.log");
    let script = format!(
        "#!/bin/sh\nprintf '%s|' \"$@\" >> '{log}'\nprintf '\\n' >> '{log}'\n[ \"$1\" = checkout ] && exit 3\nexit 0\n"
    );
    let dir = Dir::open_ambient_dir(&workspace.root, ambient_authority())
        .expect("workspace should open");
    dir.write("fake-git", script).expect("script should be written");
    let mut permissions = dir
        .metadata("fake-git")
        .expect("script metadata should be readable")
        .permissions();
    permissions.set_mode(0o755);
    dir.set_permissions("fake-git", permissions)
        .expect("script should be made executable");

    let runner = ProcessGitRunner::new(workspace.root.join("fake-git").into_string());
    let destination = workspace.destination();
    let fetcher = SourceFetcher::new(runner, SshCredentials::new(workspace.home(), "github.com"));

    let error = fetcher
        .materialize(&request(&destination, None))
        .expect_err("checkout step should fail");

    assert_eq!(
        error,
        ResourceError::GitStep {
            step: "git checkout fecdba".to_owned(),
            detail: "exit code 3".to_owned(),
        }
    );
    let logged = std::fs::read_to_string(&log).expect("log should be readable");
    let lines: Vec<&str> = logged.lines().collect();
    assert_eq!(
        lines,
        vec![
            "init|",
            "remote|add|origin|git@github.com:hpcloud/fun.git|",
            "fetch|--depth|1|origin|refs/pull/58/head:pr|",
            "checkout|fecdba|",
        ]
    );
}
