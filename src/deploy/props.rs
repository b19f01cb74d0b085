use crate::types::Job;

/// Input properties of the deploy view, delivered and re-delivered by the
/// host whenever anything it owns changes.
///
/// `job` appears once the host learns the deploy job's id. `error_msg`
/// carries a host-level failure: the deploy attempt died before a job was
/// even created, so the view must re-enable the action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeployProps {
    /// App the commit is deployed to.
    pub app_id: String,
    pub owner_login: String,
    pub repo_name: String,
    pub sha: String,
    pub branch_name: String,
    pub job: Option<Job>,
    pub error_msg: Option<String>,
}
