use crate::deploy::keys::JobKey;

use super::Store;

/// Snapshot held by the job-output store for one [`JobKey`].
///
/// Every field starts absent and is filled in by the producer as the stream
/// progresses: `open` goes `Some(true)` when the stream attaches and
/// `Some(false)` when it closes — normally or not — while `eof` is only ever
/// set to `Some(true)`, on a clean end-of-output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOutputState {
    pub output: Option<String>,
    pub stream_error: Option<String>,
    pub open: Option<bool>,
    pub eof: Option<bool>,
}

impl JobOutputState {
    /// Append a chunk to the accumulated output, creating it if absent.
    pub fn append_output(&mut self, chunk: &str) {
        match &mut self.output {
            Some(buf) => buf.push_str(chunk),
            None => self.output = Some(chunk.to_owned()),
        }
    }
}

/// Store of live job output, keyed by deployer app id and job id.
pub type JobOutputStore = Store<JobKey, JobOutputState>;
