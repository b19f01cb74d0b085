use crate::deploy::keys::{commit_key, job_key};
use crate::deploy::props::DeployProps;
use crate::store::{CommitStore, JobOutputStore};
use crate::types::Commit;

/// The deploy view's renderable snapshot, rebuilt wholesale on every
/// triggering event. Rendering reads it; nothing else does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedState {
    /// True between deploy confirmation and job termination.
    pub deploying: bool,
    /// True once the job stream reported end-of-output. Never cleared.
    pub deployed: bool,
    /// Whether the deploy action is currently unavailable.
    pub deploy_disabled: bool,
    pub commit: Option<Commit>,
    pub job_output: Option<String>,
    pub job_error: Option<String>,
}

/// Fold the current store snapshots and props into a fresh [`ProjectedState`].
///
/// Only `deploying` and the sticky `deployed` flag are carried over from
/// `prior`; every other field is re-derived. Precedence, in order:
///
/// 1. a closed stream (`open == Some(false)`) cancels `deploying`,
/// 2. end-of-stream marks `deployed`,
/// 3. `deploy_disabled` follows from a missing commit or an in-flight deploy,
/// 4. a host error message overrides both, re-enabling the action.
///
/// Idempotent given props and store contents.
pub fn project(
    props: &DeployProps,
    prior: Option<&ProjectedState>,
    commits: &CommitStore,
    job_outputs: &JobOutputStore,
) -> ProjectedState {
    let mut deploying = prior.is_some_and(|s| s.deploying);
    let mut deployed = prior.is_some_and(|s| s.deployed);

    let commit = commits.get_state(&commit_key(props)).commit;

    let mut job_output = None;
    let mut job_error = None;
    if let Some(key) = job_key(props) {
        let job_state = job_outputs.get_state(&key);
        job_output = job_state.output;
        job_error = job_state.stream_error;

        if job_state.open == Some(false) {
            deploying = false;
        }
        if job_state.eof == Some(true) {
            deployed = true;
        }
    }

    let mut deploy_disabled = commit.is_none() || deploying;

    if props.error_msg.is_some() {
        deploy_disabled = false;
        deploying = false;
    }

    ProjectedState {
        deploying,
        deployed,
        deploy_disabled,
        commit,
        job_output,
        job_error,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::Job;

    fn props() -> DeployProps {
        DeployProps {
            app_id: "web".to_owned(),
            owner_login: "acme".to_owned(),
            repo_name: "site".to_owned(),
            sha: "abc123".to_owned(),
            branch_name: "main".to_owned(),
            job: None,
            error_msg: None,
        }
    }

    fn props_with_job() -> DeployProps {
        DeployProps {
            job: Some(Job {
                id: "deploy-1".to_owned(),
            }),
            ..props()
        }
    }

    fn stores() -> (Arc<CommitStore>, Arc<JobOutputStore>) {
        (Arc::new(CommitStore::new()), Arc::new(JobOutputStore::new()))
    }

    fn sample_commit() -> Commit {
        Commit {
            sha: "abc123".to_owned(),
            message: "add deploy button".to_owned(),
            author_name: Some("Lea".to_owned()),
            author_email: None,
            committed_date: None,
        }
    }

    fn seed_commit(commits: &CommitStore) {
        commits.update(&commit_key(&props()), |s| s.commit = Some(sample_commit()));
    }

    #[test]
    fn empty_stores_disable_the_action() {
        let (commits, jobs) = stores();
        let state = project(&props(), None, &commits, &jobs);
        assert!(state.deploy_disabled);
        assert!(!state.deploying);
        assert!(!state.deployed);
        assert_eq!(state.commit, None);
    }

    #[test]
    fn present_commit_enables_the_action() {
        let (commits, jobs) = stores();
        seed_commit(&commits);
        let state = project(&props(), None, &commits, &jobs);
        assert!(!state.deploy_disabled);
        assert_eq!(state.commit, Some(sample_commit()));
    }

    #[test]
    fn no_job_means_no_job_fields() {
        let (commits, jobs) = stores();
        let key = job_key(&props_with_job()).unwrap();
        jobs.update(&key, |s| s.append_output("should not leak"));

        let state = project(&props(), None, &commits, &jobs);
        assert_eq!(state.job_output, None);
        assert_eq!(state.job_error, None);
    }

    #[test]
    fn open_stream_keeps_deploying_and_shows_output() {
        let (commits, jobs) = stores();
        seed_commit(&commits);
        let key = job_key(&props_with_job()).unwrap();
        jobs.update(&key, |s| {
            s.open = Some(true);
            s.eof = Some(false);
            s.append_output("building...");
        });

        let prior = ProjectedState {
            deploying: true,
            ..ProjectedState::default()
        };
        let state = project(&props_with_job(), Some(&prior), &commits, &jobs);
        assert!(state.deploying);
        assert!(!state.deployed);
        assert!(state.deploy_disabled);
        assert_eq!(state.job_output.as_deref(), Some("building..."));
    }

    #[test]
    fn closed_stream_cancels_deploying() {
        let (commits, jobs) = stores();
        seed_commit(&commits);
        let key = job_key(&props_with_job()).unwrap();
        jobs.update(&key, |s| s.open = Some(false));

        let prior = ProjectedState {
            deploying: true,
            ..ProjectedState::default()
        };
        let state = project(&props_with_job(), Some(&prior), &commits, &jobs);
        assert!(!state.deploying);
    }

    #[test]
    fn absent_open_flag_does_not_cancel_deploying() {
        let (commits, jobs) = stores();
        seed_commit(&commits);
        let key = job_key(&props_with_job()).unwrap();
        jobs.update(&key, |s| s.append_output("queued\n"));

        let prior = ProjectedState {
            deploying: true,
            ..ProjectedState::default()
        };
        let state = project(&props_with_job(), Some(&prior), &commits, &jobs);
        assert!(state.deploying);
    }

    #[test]
    fn eof_marks_deployed() {
        let (commits, jobs) = stores();
        seed_commit(&commits);
        let key = job_key(&props_with_job()).unwrap();
        jobs.update(&key, |s| s.eof = Some(true));

        let state = project(&props_with_job(), None, &commits, &jobs);
        assert!(state.deployed);
    }

    #[test]
    fn deployed_is_sticky_across_recomputations() {
        let (commits, jobs) = stores();
        seed_commit(&commits);
        let prior = ProjectedState {
            deployed: true,
            ..ProjectedState::default()
        };
        // Even with the job handle gone from props, deployed stays set.
        let state = project(&props(), Some(&prior), &commits, &jobs);
        assert!(state.deployed);
    }

    #[test]
    fn stream_error_is_surfaced_without_clearing_deploying() {
        let (commits, jobs) = stores();
        seed_commit(&commits);
        let key = job_key(&props_with_job()).unwrap();
        jobs.update(&key, |s| {
            s.open = Some(true);
            s.stream_error = Some("connection reset".to_owned());
        });

        let prior = ProjectedState {
            deploying: true,
            ..ProjectedState::default()
        };
        let state = project(&props_with_job(), Some(&prior), &commits, &jobs);
        assert_eq!(state.job_error.as_deref(), Some("connection reset"));
        assert!(state.deploying);
        assert!(state.deploy_disabled);
    }

    #[test]
    fn host_error_reenables_the_action() {
        let (commits, jobs) = stores();
        seed_commit(&commits);
        let failed = DeployProps {
            error_msg: Some("deploy failed".to_owned()),
            ..props()
        };
        let prior = ProjectedState {
            deploying: true,
            deploy_disabled: true,
            ..ProjectedState::default()
        };
        let state = project(&failed, Some(&prior), &commits, &jobs);
        assert!(!state.deploying);
        assert!(!state.deploy_disabled);
    }

    #[test]
    fn host_error_reenables_even_without_commit() {
        let (commits, jobs) = stores();
        let failed = DeployProps {
            error_msg: Some("controller unreachable".to_owned()),
            ..props()
        };
        let state = project(&failed, None, &commits, &jobs);
        assert!(!state.deploy_disabled);
    }

    #[test]
    fn projection_is_idempotent() {
        let (commits, jobs) = stores();
        seed_commit(&commits);
        let key = job_key(&props_with_job()).unwrap();
        jobs.update(&key, |s| {
            s.open = Some(true);
            s.append_output("step 1\n");
        });

        let prior = ProjectedState {
            deploying: true,
            ..ProjectedState::default()
        };
        let first = project(&props_with_job(), Some(&prior), &commits, &jobs);
        let second = project(&props_with_job(), Some(&prior), &commits, &jobs);
        assert_eq!(first, second);
    }
}
