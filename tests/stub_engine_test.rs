use std::sync::Arc;
use std::time::{Duration, Instant};

use shipdeck::deploy::keys::{CommitKey, DEPLOYER_APP_ID, JobKey};
use shipdeck::engine::{Engine, Event, Request, StubEngine};
use shipdeck::store::{CommitStore, JobOutputStore};

fn stores() -> (Arc<CommitStore>, Arc<JobOutputStore>) {
    (Arc::new(CommitStore::new()), Arc::new(JobOutputStore::new()))
}

#[test]
fn fetch_commit_lands_in_the_commit_store() {
    let (commits, job_outputs) = stores();
    let stub = StubEngine::with_fixture(Arc::clone(&commits), Arc::clone(&job_outputs));
    let handle = stub.start();

    let key = CommitKey {
        owner_login: "acme".to_owned(),
        repo_name: "site".to_owned(),
        sha: "abc123".to_owned(),
    };
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    commits.add_change_listener(
        &key,
        Arc::new(move || {
            let _ = tx.send(());
        }),
    );

    handle.send(Request::FetchCommit {
        owner_login: "acme".to_owned(),
        repo_name: "site".to_owned(),
        sha: "abc123".to_owned(),
    });

    rx.recv_timeout(Duration::from_secs(2))
        .expect("engine should write the commit within 2 seconds");

    let commit = commits.get_state(&key).commit.expect("commit present");
    assert_eq!(commit.sha, "abc123");
    assert!(!commit.message.is_empty());
}

#[test]
fn deploy_streams_output_to_eof_and_closes() {
    let (commits, job_outputs) = stores();
    let mut stub = StubEngine::with_fixture(Arc::clone(&commits), Arc::clone(&job_outputs));
    stub.script = vec!["step one\n".to_owned(), "step two\n".to_owned()];
    stub.chunk_delay = Duration::ZERO;
    let handle = stub.start();

    // Job ids are deterministic per engine instance, so the listener can be
    // registered before the deploy is dispatched.
    let key = JobKey {
        app_id: DEPLOYER_APP_ID.to_owned(),
        job_id: "deploy-1".to_owned(),
    };
    let (change_tx, change_rx) = std::sync::mpsc::channel::<()>();
    job_outputs.add_change_listener(
        &key,
        Arc::new(move || {
            let _ = change_tx.send(());
        }),
    );

    let (reply_tx, reply_rx) = std::sync::mpsc::channel::<Event>();
    handle.send(Request::DeployCommit {
        app_id: "web".to_owned(),
        owner_login: "acme".to_owned(),
        repo_name: "site".to_owned(),
        branch_name: "main".to_owned(),
        sha: "abc123".to_owned(),
        reply_tx,
    });

    let event = reply_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("engine should reply within 2 seconds");
    match event {
        Event::DeployStarted { job } => assert_eq!(job.id, "deploy-1"),
        Event::DeployFailed { message } => panic!("unexpected deploy failure: {message}"),
    }

    // Drain change notifications until the stream reports end-of-output.
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let state = job_outputs.get_state(&key);
        if state.eof == Some(true) {
            assert_eq!(state.open, Some(false));
            assert_eq!(state.output.as_deref(), Some("step one\nstep two\n"));
            break;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        assert!(!remaining.is_zero(), "stream did not finish in time");
        let _ = change_rx.recv_timeout(remaining);
    }
}

#[test]
fn consecutive_deploys_get_distinct_job_ids() {
    let (commits, job_outputs) = stores();
    let mut stub = StubEngine::with_fixture(commits, job_outputs);
    stub.script = Vec::new();
    stub.chunk_delay = Duration::ZERO;
    let handle = stub.start();

    let (reply_tx, reply_rx) = std::sync::mpsc::channel::<Event>();
    for _ in 0..2 {
        handle.send(Request::DeployCommit {
            app_id: "web".to_owned(),
            owner_login: "acme".to_owned(),
            repo_name: "site".to_owned(),
            branch_name: "main".to_owned(),
            sha: "abc123".to_owned(),
            reply_tx: reply_tx.clone(),
        });
    }

    let mut ids = Vec::new();
    for _ in 0..2 {
        let event = reply_rx
            .recv_timeout(Duration::from_secs(2))
            .expect("engine should reply within 2 seconds");
        match event {
            Event::DeployStarted { job } => ids.push(job.id),
            Event::DeployFailed { message } => panic!("unexpected deploy failure: {message}"),
        }
    }
    assert_eq!(ids, vec!["deploy-1".to_owned(), "deploy-2".to_owned()]);
}
