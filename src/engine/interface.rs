use std::sync::mpsc::Sender;

use crate::types::Job;

/// Handle to the backend engine held by the UI layer.
///
/// Cheaply cloneable. When the last handle is dropped the sender channel
/// closes, signalling the engine to shut down.
#[derive(Clone)]
pub struct EngineHandle {
    tx: tokio::sync::mpsc::UnboundedSender<Request>,
}

impl EngineHandle {
    pub(super) fn new(tx: tokio::sync::mpsc::UnboundedSender<Request>) -> Self {
        Self { tx }
    }

    /// Send a request to the engine. Non-blocking — returns immediately.
    pub fn send(&self, req: Request) {
        // Ignore errors: if the receiver is gone the engine has already shut down.
        let _ = self.tx.send(req);
    }
}

/// Trait implemented by backend engines.
///
/// An engine owns the write side of the stores: request results land there
/// and reach views through store change listeners, not through replies.
pub trait Engine: Send + 'static {
    fn start(self) -> EngineHandle;
}

/// All operations the UI layer can send to the engine.
pub enum Request {
    /// Resolve one commit record into the commit store.
    FetchCommit {
        owner_login: String,
        repo_name: String,
        sha: String,
    },
    /// Start a deploy of `sha` to the app. The job handle comes back as a
    /// [`Event::DeployStarted`]; everything after that flows through the
    /// job-output store.
    DeployCommit {
        app_id: String,
        owner_login: String,
        repo_name: String,
        branch_name: String,
        sha: String,
        reply_tx: Sender<Event>,
    },
    Shutdown,
}

/// Host-facing events: the facts the host must fold into the deploy view's
/// props. Store contents never travel in events.
pub enum Event {
    /// A deploy job was created; the host hands the handle to the view.
    DeployStarted { job: Job },
    /// The deploy attempt died before a job was created.
    DeployFailed { message: String },
}

/// The action layer's deploy entry point, as seen by the deploy view.
///
/// Fire-and-forget: success or failure surfaces later through store updates
/// and host props, never through a return value.
pub trait DeployDispatch: Send + Sync {
    fn deploy_commit(
        &self,
        app_id: &str,
        owner_login: &str,
        repo_name: &str,
        branch_name: &str,
        sha: &str,
    );
}

/// Dispatches deploys through the engine, tagging each request with the
/// reply channel the host drains for deploy lifecycle events.
pub struct EngineDispatcher {
    pub handle: EngineHandle,
    pub reply_tx: Sender<Event>,
}

impl DeployDispatch for EngineDispatcher {
    fn deploy_commit(
        &self,
        app_id: &str,
        owner_login: &str,
        repo_name: &str,
        branch_name: &str,
        sha: &str,
    ) {
        self.handle.send(Request::DeployCommit {
            app_id: app_id.to_owned(),
            owner_login: owner_login.to_owned(),
            repo_name: repo_name.to_owned(),
            branch_name: branch_name.to_owned(),
            sha: sha.to_owned(),
            reply_tx: self.reply_tx.clone(),
        });
    }
}
