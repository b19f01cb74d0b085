use crate::deploy::props::DeployProps;

/// Job namespace of the platform's deployer. Deploy jobs always run under
/// this app id, independent of the app being deployed.
pub const DEPLOYER_APP_ID: &str = "deployer";

/// Identifies one commit record in the commit store.
///
/// Keys are freshly allocated on every derivation; equality is structural,
/// so two derivations from unchanged props always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitKey {
    pub owner_login: String,
    pub repo_name: String,
    pub sha: String,
}

/// Identifies one entry in the job-output store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobKey {
    pub app_id: String,
    pub job_id: String,
}

/// Commit key for the current props. Always derivable.
pub fn commit_key(props: &DeployProps) -> CommitKey {
    CommitKey {
        owner_login: props.owner_login.clone(),
        repo_name: props.repo_name.clone(),
        sha: props.sha.clone(),
    }
}

/// Job key for the current props, or `None` while no job handle exists.
pub fn job_key(props: &DeployProps) -> Option<JobKey> {
    props.job.as_ref().map(|job| JobKey {
        app_id: DEPLOYER_APP_ID.to_owned(),
        job_id: job.id.clone(),
    })
}
