use std::sync::Arc;

use crate::deploy::keys::{self, CommitKey, JobKey};
use crate::deploy::projection::{self, ProjectedState};
use crate::deploy::props::DeployProps;
use crate::deploy::subscription::Subscription;
use crate::engine::DeployDispatch;
use crate::store::{CommitState, CommitStore, JobOutputState, JobOutputStore, Listener};

/// Callback invoked when the user dismisses the view after a finished deploy.
pub type HideCallback = Arc<dyn Fn() + Send + Sync>;

/// The deploy view's core: props in, projected state out, with the two
/// store registrations tracking the current keys at all times.
///
/// The model never polls and never blocks. Stores call `on_change` when an
/// entry the view is registered on moves; the host reacts by calling
/// [`DeployViewModel::refresh`] and re-rendering from
/// [`DeployViewModel::state`].
pub struct DeployViewModel {
    props: DeployProps,
    commits: Arc<CommitStore>,
    job_outputs: Arc<JobOutputStore>,
    dispatcher: Arc<dyn DeployDispatch>,
    on_change: Listener,
    on_hide: HideCallback,
    commit_sub: Subscription<CommitKey, CommitState>,
    job_sub: Subscription<JobKey, JobOutputState>,
    state: ProjectedState,
}

impl DeployViewModel {
    pub fn new(
        props: DeployProps,
        commits: Arc<CommitStore>,
        job_outputs: Arc<JobOutputStore>,
        dispatcher: Arc<dyn DeployDispatch>,
        on_change: Listener,
        on_hide: HideCallback,
    ) -> Self {
        let state = projection::project(&props, None, &commits, &job_outputs);
        let commit_sub = Subscription::new(Arc::clone(&commits));
        let job_sub = Subscription::new(Arc::clone(&job_outputs));
        Self {
            props,
            commits,
            job_outputs,
            dispatcher,
            on_change,
            on_hide,
            commit_sub,
            job_sub,
            state,
        }
    }

    /// Register on the store entries matching the current keys.
    pub fn mount(&mut self) {
        self.commit_sub
            .set_key(Some(&keys::commit_key(&self.props)), &self.on_change);
        self.job_sub
            .set_key(keys::job_key(&self.props).as_ref(), &self.on_change);
        tracing::debug!(
            sha = %self.props.sha,
            job = ?self.props.job.as_ref().map(|j| j.id.as_str()),
            "deploy view mounted"
        );
    }

    /// Apply a new set of props.
    ///
    /// Registrations whose key changed are migrated, and the projection is
    /// recomputed immediately — without waiting for a store notification —
    /// whenever a key moved or the host delivered an error message.
    pub fn update_props(&mut self, props: DeployProps) {
        let error_present = props.error_msg.is_some();
        let commit_changed = self
            .commit_sub
            .set_key(Some(&keys::commit_key(&props)), &self.on_change);
        let job_changed = self
            .job_sub
            .set_key(keys::job_key(&props).as_ref(), &self.on_change);

        self.props = props;
        if error_present || commit_changed || job_changed {
            self.refresh();
        }
    }

    /// Recompute the projected state from the latest store snapshots.
    ///
    /// The host calls this from its change-notification handler; the call
    /// is idempotent given store contents.
    pub fn refresh(&mut self) {
        self.state = projection::project(
            &self.props,
            Some(&self.state),
            &self.commits,
            &self.job_outputs,
        );
    }

    /// Handle a deploy confirmation.
    ///
    /// A no-op while the action is disabled. Flags the view as deploying
    /// before dispatch so a second activation cannot race the round trip
    /// through the action layer.
    pub fn deploy_click(&mut self) {
        if self.state.deploy_disabled {
            return;
        }
        self.state.deploying = true;
        self.state.deploy_disabled = true;
        tracing::info!(
            app = %self.props.app_id,
            sha = %self.props.sha,
            "dispatching deploy"
        );
        self.dispatcher.deploy_commit(
            &self.props.app_id,
            &self.props.owner_login,
            &self.props.repo_name,
            &self.props.branch_name,
            &self.props.sha,
        );
    }

    /// Handle the post-deploy dismissal. Only reachable once the job
    /// stream reported end-of-output.
    pub fn dismiss_click(&self) {
        if self.state.deployed {
            (self.on_hide)();
        }
    }

    /// Deregister from both stores. After this no store change can reach
    /// the view again; this is the sole cancellation point.
    pub fn unmount(&mut self) {
        self.commit_sub.clear();
        self.job_sub.clear();
        tracing::debug!(sha = %self.props.sha, "deploy view unmounted");
    }

    pub fn state(&self) -> &ProjectedState {
        &self.state
    }

    pub fn props(&self) -> &DeployProps {
        &self.props
    }
}
