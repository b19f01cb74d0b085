use serde::{Deserialize, Serialize};

/// Handle to an asynchronous deploy job created by the platform's deployer.
///
/// Only the id travels with the handle; everything else about the job (its
/// output, stream state) lives in the job-output store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
}
